//! Intermediate representation of one generated binding file.
//!
//! Flow: `Api` -> cast types -> properties / methods / constructors -> imports -> `ApiDoc`.
//! Each builder records the supporting modules it relied on in a shared
//! `Capabilities` set, which the import resolver consumes last.

pub mod cast;
pub mod constructors;
pub mod docs;
pub mod imports;
pub mod methods;
pub mod properties;
pub mod types;

pub use cast::{UnsupportedTypeError, cast_type, raw_type, raw_type_initializer};
pub use constructors::build_constructors;
pub use docs::{DEFAULT_DOC_WIDTH, prepare_docs};
pub use imports::{Import, render_imports, resolve_imports};
pub use methods::build_methods;
pub use properties::build_properties;
pub use types::{ApiDoc, Capabilities, Capability, Constructor, MethodDoc, PropertyDoc};
