//! Interface description model.
//!
//! These types mirror what the documentation extractor produces for every
//! BlueZ API file: groups of interfaces, each with its properties and methods.
//! Type descriptors are kept verbatim; casting them to Go is the generator's job.

use serde::{Deserialize, Serialize};

/// A documentation file worth of interfaces (e.g. `adapter-api.txt`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiGroup {
    /// Source documentation file name.
    pub file_name: String,
    /// Human readable group name.
    pub name: String,
    /// Group level documentation.
    pub description: String,
    /// Interfaces described in the file, in document order.
    pub apis: Vec<Api>,
}

impl ApiGroup {
    /// Go package name for every binding generated from this group.
    ///
    /// Derived from the file stem with a trailing `-api` removed, e.g.
    /// `adapter-api.txt` becomes `adapter`. Falls back to the group name and
    /// finally to `bluez` when neither yields an identifier.
    pub fn package_name(&self) -> String {
        let stem = self
            .file_name
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .split('.')
            .next()
            .unwrap_or_default();
        let stem = stem.strip_suffix("-api").unwrap_or(stem);

        [stem, self.name.as_str()]
            .into_iter()
            .map(sanitize_package)
            .find(|name| !name.is_empty())
            .unwrap_or_else(|| "bluez".to_string())
    }
}

fn sanitize_package(raw: &str) -> String {
    let name: String = raw
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    match name.chars().next() {
        Some(first) if first.is_ascii_digit() => format!("p{name}"),
        _ => name,
    }
}

/// One bus interface description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Api {
    /// Dotted interface name, e.g. `org.bluez.Adapter1`.
    pub interface: String,
    /// Short title line.
    pub title: String,
    /// Free-form documentation.
    pub description: String,
    /// Bus service name as documented (`org.bluez`, `unique name`, ...).
    pub service: String,
    /// Object path as documented (`/org/bluez`, `[variable prefix]/{hci0,hci1,...}`, ...).
    pub object_path: String,
    /// Properties in document order.
    pub properties: Vec<Property>,
    /// Methods in document order.
    pub methods: Vec<Method>,
}

impl Api {
    /// Last segment of the dotted interface name (`Adapter1` for `org.bluez.Adapter1`).
    pub fn short_name(&self) -> &str {
        self.interface
            .rsplit('.')
            .next()
            .unwrap_or(&self.interface)
    }
}

/// Access and availability markers attached to a documented property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyFlag {
    /// Value can only be read.
    Readonly,
    /// Value can be read and written.
    Readwrite,
    /// Property may be absent on some objects.
    Optional,
    /// Property is behind BlueZ's experimental switch.
    Experimental,
}

/// A documented property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Property {
    /// Property name, possibly with trailing punctuation from the docs.
    pub name: String,
    /// Raw type descriptor, possibly carrying an inline annotation.
    #[serde(rename = "type")]
    pub ty: String,
    /// Property documentation.
    pub docs: String,
    /// Access markers.
    pub flags: Vec<PropertyFlag>,
}

impl Property {
    /// Whether a setter should be generated.
    pub fn is_writable(&self) -> bool {
        !self.flags.contains(&PropertyFlag::Readonly)
    }
}

/// A method argument.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Arg {
    /// Argument name.
    pub name: String,
    /// Raw type descriptor.
    #[serde(rename = "type")]
    pub ty: String,
}

/// A documented method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Method {
    /// Method name, possibly suffixed with ` (optional)`.
    pub name: String,
    /// Arguments in call order.
    pub args: Vec<Arg>,
    /// Comma separated return type descriptors; empty means error only.
    pub return_type: String,
    /// Method documentation.
    pub docs: String,
}
