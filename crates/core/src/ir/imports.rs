//! Import resolution for the generated Go file.
//!
//! Builders report what they used as `Capability` tags; this module turns
//! the tags plus the exposure flag into the minimal import block.

use std::collections::BTreeSet;

use super::types::{Capabilities, Capability};
use crate::config::ModulePaths;

/// A supporting Go module the generated file may need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Import {
    /// Synchronization primitives guarding the properties struct.
    Sync,
    /// The base protocol abstraction (client, config, bus handles).
    BaseProtocol,
    /// Runtime reflection, for property exposure.
    Reflection,
    /// Struct introspection, for property exposure.
    StructIntrospection,
    /// Small helpers used by property exposure.
    Utility,
    /// D-Bus value types.
    BusTypes,
    /// String formatting.
    Formatting,
}

impl Import {
    /// Module path for this import under the configured module layout.
    pub fn path(self, modules: &ModulePaths) -> &str {
        match self {
            Import::Sync => &modules.sync,
            Import::BaseProtocol => &modules.base,
            Import::Reflection => &modules.reflection,
            Import::StructIntrospection => &modules.structs,
            Import::Utility => &modules.util,
            Import::BusTypes => &modules.bus_types,
            Import::Formatting => &modules.formatting,
        }
    }
}

/// Resolve the import set for one interface.
pub fn resolve_imports(expose_properties: bool, caps: &Capabilities) -> BTreeSet<Import> {
    let mut imports = BTreeSet::from([Import::Sync, Import::BaseProtocol]);

    if expose_properties {
        imports.extend([Import::Reflection, Import::StructIntrospection, Import::Utility]);
    }
    if caps.contains(&Capability::BusTypes) {
        imports.insert(Import::BusTypes);
    }
    if caps.contains(&Capability::Formatting) {
        imports.insert(Import::Formatting);
    }

    imports
}

/// Render a Go import block, paths sorted the way gofmt orders them.
///
/// Returns an empty string when there is nothing to import.
pub fn render_imports(imports: &BTreeSet<Import>, modules: &ModulePaths) -> String {
    let paths: BTreeSet<&str> = imports
        .iter()
        .map(|import| import.path(modules))
        .filter(|path| !path.is_empty())
        .collect();

    if paths.is_empty() {
        return String::new();
    }

    let lines: Vec<String> = paths.iter().map(|path| format!("\t\"{path}\"")).collect();
    format!("import (\n{}\n)", lines.join("\n"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_base_imports() {
        let imports = resolve_imports(false, &Capabilities::new());
        assert_eq!(
            imports.into_iter().collect::<Vec<_>>(),
            vec![Import::Sync, Import::BaseProtocol]
        );
    }

    #[test]
    fn test_full_import_set() {
        let forward = Capabilities::from([Capability::BusTypes, Capability::Formatting]);
        let backward: Capabilities = [Capability::Formatting, Capability::BusTypes, Capability::BusTypes]
            .into_iter()
            .collect();

        let expected = BTreeSet::from([
            Import::Sync,
            Import::BaseProtocol,
            Import::Reflection,
            Import::StructIntrospection,
            Import::Utility,
            Import::BusTypes,
            Import::Formatting,
        ]);
        assert_eq!(resolve_imports(true, &forward), expected);
        assert_eq!(resolve_imports(true, &backward), expected);
        assert_eq!(expected.len(), 7);
    }

    #[test]
    fn test_render_sorted() {
        let modules = ModulePaths::default();
        let imports = resolve_imports(false, &Capabilities::from([Capability::Formatting, Capability::BusTypes]));
        assert_eq!(
            render_imports(&imports, &modules),
            "import (\n\t\"fmt\"\n\t\"github.com/godbus/dbus/v5\"\n\t\"github.com/muka/go-bluetooth/bluez\"\n\t\"sync\"\n)"
        );
    }

    #[test]
    fn test_render_dedupes_paths() {
        let modules = ModulePaths {
            util: "github.com/muka/go-bluetooth/bluez".into(),
            ..ModulePaths::default()
        };
        let imports = resolve_imports(true, &Capabilities::new());
        let rendered = render_imports(&imports, &modules);
        assert_eq!(rendered.matches("go-bluetooth/bluez").count(), 1);
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_imports(&BTreeSet::new(), &ModulePaths::default()), "");

        let blank = ModulePaths {
            sync: String::new(),
            base: String::new(),
            ..ModulePaths::default()
        };
        let imports = resolve_imports(false, &Capabilities::new());
        assert_eq!(render_imports(&imports, &blank), "");
    }
}
