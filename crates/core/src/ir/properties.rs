//! Property model: documented properties merged with the override table.

use std::collections::BTreeMap;

use bluegen_common::Property;
use tracing::debug;

use super::cast::{UnsupportedTypeError, cast_type, raw_type, raw_type_initializer, uses_bus_types};
use super::docs::prepare_docs;
use super::types::{Capabilities, Capability, PropertyDoc};

/// Property docs sit inside the generated properties struct.
const PROPERTY_DOC_INDENT: usize = 2;

/// Build the final property list for one interface.
///
/// Documented properties are cast and resolved first. Override entries then
/// replace the displayed type of a documented property with the same name
/// (its documented raw type and initializer are kept), or add a new
/// undocumented property. The result is sorted by name with no duplicates.
pub fn build_properties(
    properties: &[Property],
    overrides: Option<&BTreeMap<String, String>>,
    doc_width: usize,
    caps: &mut Capabilities,
) -> Result<Vec<PropertyDoc>, UnsupportedTypeError> {
    let mut props: BTreeMap<String, PropertyDoc> = BTreeMap::new();

    for prop in properties {
        let name = prop
            .name
            .trim_matches(|c| matches!(c, ':' | ' ' | '\t'))
            .to_string();
        if name.is_empty() {
            debug!(raw_name = %prop.name, "Skipping property without a name.");
            continue;
        }

        let ty = cast_type(&prop.ty);
        let initializer = raw_type_initializer(&ty).inspect_err(|err| {
            debug!(property = %name, %err, "Property type has no initializer.");
        })?;

        let doc = PropertyDoc {
            raw_type: raw_type(&ty).to_string(),
            raw_type_initializer: initializer,
            writable: prop.is_writable(),
            property: Property {
                name: name.clone(),
                ty,
                docs: prepare_docs(&prop.docs, true, PROPERTY_DOC_INDENT, doc_width),
                flags: prop.flags.clone(),
            },
        };
        props.insert(name, doc);
    }

    for (name, ty) in overrides.into_iter().flatten() {
        if let Some(existing) = props.get_mut(name) {
            debug!(property = %name, from = %existing.property.ty, to = %ty, "Overriding property type.");
            existing.property.ty.clone_from(ty);
            continue;
        }

        let initializer = raw_type_initializer(ty).inspect_err(|err| {
            debug!(property = %name, %err, "Override type has no initializer.");
        })?;
        props.insert(
            name.clone(),
            PropertyDoc {
                raw_type: raw_type(ty).to_string(),
                raw_type_initializer: initializer,
                writable: true,
                property: Property {
                    name: name.clone(),
                    ty: ty.clone(),
                    docs: String::new(),
                    flags: Vec::new(),
                },
            },
        );
    }

    if props.values().any(|prop| {
        [&prop.property.ty, &prop.raw_type, &prop.raw_type_initializer]
            .into_iter()
            .any(|expr| uses_bus_types(expr))
    }) {
        caps.insert(Capability::BusTypes);
    }

    Ok(props.into_values().collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::ir::docs::DEFAULT_DOC_WIDTH;
    use bluegen_common::PropertyFlag;

    fn prop(name: &str, ty: &str) -> Property {
        Property {
            name: name.into(),
            ty: ty.into(),
            ..Property::default()
        }
    }

    fn overrides(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn build(
        properties: &[Property],
        table: Option<&BTreeMap<String, String>>,
    ) -> (Vec<PropertyDoc>, Capabilities) {
        let mut caps = Capabilities::new();
        let props = build_properties(properties, table, DEFAULT_DOC_WIDTH, &mut caps).unwrap();
        (props, caps)
    }

    #[test]
    fn test_documented_properties() {
        let mut percentage = prop("Percentage:", "byte");
        percentage.docs = "The percentage of battery left.\nRange 0-100.".into();
        percentage.flags = vec![PropertyFlag::Readonly];

        let (props, caps) = build(&[percentage], None);
        assert_eq!(props.len(), 1);
        let p = &props[0];
        assert_eq!(p.property.name, "Percentage");
        assert_eq!(p.property.ty, "byte");
        assert_eq!(p.raw_type, "byte");
        assert_eq!(p.raw_type_initializer, "[]uint8{}");
        assert_eq!(p.property.docs, "The percentage of battery left.\n\t\t// Range 0-100.");
        assert!(!p.writable);
        assert!(caps.is_empty());
    }

    #[test]
    fn test_override_merge() {
        let table = overrides(&[("B", "float64"), ("C", "bool")]);
        let (props, _) = build(&[prop("A", "int"), prop("B", "string")], Some(&table));

        let summary: Vec<(&str, &str)> = props
            .iter()
            .map(|p| (p.property.name.as_str(), p.property.ty.as_str()))
            .collect();
        assert_eq!(summary, vec![("A", "int"), ("B", "float64"), ("C", "bool")]);

        // B keeps its documented raw type, C is derived from the override
        assert_eq!(props[1].raw_type, "string");
        assert_eq!(props[1].raw_type_initializer, "\"\"");
        assert_eq!(props[2].raw_type, "bool");
        assert_eq!(props[2].raw_type_initializer, "false");
        assert!(props[2].property.docs.is_empty());
    }

    #[test]
    fn test_every_property_resolved() {
        let table = overrides(&[("Extra", "map[string]dbus.Variant `dbus:\"ignore\"`")]);
        let (props, _) = build(
            &[prop("Address", "string"), prop("Devices", "array{object}")],
            Some(&table),
        );
        for p in &props {
            assert!(!p.raw_type.is_empty(), "{} has no raw type", p.property.name);
            assert!(!p.raw_type_initializer.is_empty());
        }
        let extra = props.iter().find(|p| p.property.name == "Extra").unwrap();
        assert_eq!(extra.raw_type, "map[string]dbus.Variant");
        assert_eq!(extra.raw_type_initializer, "map[string]dbus.Variant{}");
    }

    #[test]
    fn test_bus_types_capability() {
        let (_, caps) = build(&[prop("Adapter", "object")], None);
        assert!(caps.contains(&Capability::BusTypes));

        let table = overrides(&[("Data", "map[uint16]dbus.Variant")]);
        let (_, caps) = build(&[prop("Name", "string")], Some(&table));
        assert!(caps.contains(&Capability::BusTypes));
    }

    #[test]
    fn test_bus_types_kept_by_overridden_documented_property() {
        let table = overrides(&[("Characteristic", "string")]);
        let (props, caps) = build(&[prop("Characteristic", "object")], Some(&table));

        assert_eq!(props[0].property.ty, "string");
        assert_eq!(props[0].raw_type, "dbus.ObjectPath");
        assert_eq!(props[0].raw_type_initializer, "dbus.ObjectPath(\"\")");
        assert!(caps.contains(&Capability::BusTypes));
    }

    #[test]
    fn test_sorted_by_name() {
        let (props, _) = build(
            &[prop("Zeta", "string"), prop("Alpha", "string"), prop("Mid", "bool")],
            None,
        );
        let names: Vec<&str> = props.iter().map(|p| p.property.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Mid", "Zeta"]);
    }

    #[test]
    fn test_unsupported_type() {
        let mut caps = Capabilities::new();
        let err = build_properties(
            &[prop("Value", "variant")],
            None,
            DEFAULT_DOC_WIDTH,
            &mut caps,
        )
        .unwrap_err();
        assert_eq!(err.ty, "dbus.Variant");
    }

    #[test]
    fn test_unsupported_override_type() {
        let table = overrides(&[("Handle", "dbus.UnixFD")]);
        let mut caps = Capabilities::new();
        let result = build_properties(&[], Some(&table), DEFAULT_DOC_WIDTH, &mut caps);
        assert!(result.is_err());
    }
}
