//! Render model for one generated binding file.
//!
//! Everything here is built fresh per interface and serialized straight into
//! the template context.

use std::collections::BTreeSet;

use bluegen_common::{Api, Method, Property};
use serde::Serialize;

/// Supporting module a builder found it needs while producing the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Capability {
    /// A type expression references the D-Bus types module.
    BusTypes,
    /// A constructor expression calls into the formatting module.
    Formatting,
}

/// Capabilities collected across all builders for one interface.
pub type Capabilities = BTreeSet<Capability>;

/// A property with its resolved Go types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyDoc {
    /// The property, with cleaned name, formatted docs and displayed Go type.
    #[serde(flatten)]
    pub property: Property,
    /// Base Go type, without annotation.
    pub raw_type: String,
    /// Zero value of `raw_type`.
    pub raw_type_initializer: String,
    /// Whether a setter is generated.
    pub writable: bool,
}

/// One synthesized return slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReturnVar {
    /// Variable name (`val0`, `val1`, ...).
    pub name: String,
    /// Go type of the slot.
    pub ty: String,
}

/// Return plumbing for a method producing values besides the error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReturnVars {
    /// Slots in return order.
    pub vars: Vec<ReturnVar>,
    /// `var valN T` declarations joined by newline and indent.
    pub definition: String,
    /// `&valN` references joined by `, `.
    pub refs: String,
    /// Bare names joined by `, `.
    pub list: String,
}

/// A method with its call plumbing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodDoc {
    /// The method, with cleaned name, formatted docs and cast return types.
    #[serde(flatten)]
    pub method: Method,
    /// Formatted argument declarations (`name type, ...`).
    pub args_list: String,
    /// Formatted call-site argument names.
    pub params_list: String,
    /// True when the method returns only an error.
    pub single_return: bool,
    /// Rendered Go return type: `error` or `(T1, T2, error)`.
    pub return_signature: String,
    /// Present only when `single_return` is false.
    pub return_vars: Option<ReturnVars>,
}

/// Constructor argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstructorArg {
    /// Go parameter name.
    pub name: String,
    /// Go parameter type.
    pub ty: String,
    /// One line description.
    pub docs: String,
}

/// One way of instantiating the generated client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Constructor {
    /// Appended to `New<Interface>` to name the constructor.
    pub suffix: String,
    /// Constructor parameters.
    pub args: Vec<ConstructorArg>,
    /// Formatted parameter declarations.
    pub args_list: String,
    /// Go expression for the object path.
    pub object_path: String,
    /// Go expression for the service name.
    pub service: String,
}

/// The complete render model for one interface.
#[derive(Debug, Clone, Serialize)]
pub struct ApiDoc {
    /// Go package name.
    pub package: String,
    /// Pre-rendered import block, empty when nothing is imported.
    pub imports: String,
    /// The interface, with formatted title and description.
    pub api: Api,
    /// Short interface name used for Go identifiers.
    pub interface_name: String,
    /// Properties sorted by name.
    pub properties: Vec<PropertyDoc>,
    /// Methods in document order.
    pub methods: Vec<MethodDoc>,
    /// Constructors.
    pub constructors: Vec<Constructor>,
    /// Whether reflection based property helpers are emitted.
    pub expose_properties: bool,
}
