//! Generation of one Go binding file from one interface description.
//!
//! The pipeline is:
//! 1. Model: `Api` -> `ApiDoc` (types cast, overrides merged, imports resolved)
//! 2. Render: `ApiDoc` -> Go source (via the template)
//! 3. Write: Go source -> `<out_dir>/<package>/gen_<Interface>.go`

use std::fs;
use std::path::{Path, PathBuf};

use bluegen_common::{Api, ApiGroup};
use tracing::{debug, info};

use crate::config::GeneratorConfig;
use crate::error::GenerateError;
use crate::ir::{
    ApiDoc, Capabilities, build_constructors, build_methods, build_properties, prepare_docs,
    render_imports, resolve_imports,
};
use crate::render::Renderer;

/// Where the binding for `api` is written under `out_dir`.
pub fn output_path(out_dir: &Path, group: &ApiGroup, api: &Api) -> PathBuf {
    out_dir
        .join(group.package_name())
        .join(format!("gen_{}.go", api.short_name()))
}

/// Assemble the render model for one interface.
pub fn build_api_doc(api: &Api, group: &ApiGroup, config: &GeneratorConfig) -> Result<ApiDoc, GenerateError> {
    let mut caps = Capabilities::new();
    let expose_properties = config.expose_properties(&api.interface);

    let properties = build_properties(
        &api.properties,
        config.property_overrides(&api.interface),
        config.doc_width,
        &mut caps,
    )
    .map_err(|source| GenerateError::UnsupportedType {
        interface: api.interface.clone(),
        source,
    })?;
    let methods = build_methods(&api.methods, config.doc_width, &mut caps);
    let constructors = build_constructors(api, &config.variable_prefix, &mut caps);

    let imports = resolve_imports(expose_properties, &caps);
    debug!(
        interface = %api.interface,
        properties = properties.len(),
        methods = methods.len(),
        constructors = constructors.len(),
        imports = ?imports,
        "Built binding model."
    );

    Ok(ApiDoc {
        package: group.package_name(),
        imports: render_imports(&imports, &config.modules),
        api: Api {
            title: api.title.trim().to_string(),
            description: prepare_docs(&api.description, false, 0, config.doc_width),
            ..api.clone()
        },
        interface_name: api.short_name().to_string(),
        properties,
        methods,
        constructors,
        expose_properties,
    })
}

/// Render the binding for one interface in memory.
///
/// `path` only labels render errors.
pub fn render_api(
    renderer: &Renderer,
    path: &Path,
    api: &Api,
    group: &ApiGroup,
    config: &GeneratorConfig,
) -> Result<String, GenerateError> {
    let doc = build_api_doc(api, group, config)?;
    renderer.render(&doc, path)
}

/// Generate the binding for one interface and write it to `path`.
///
/// Nothing is written unless rendering succeeds.
pub fn generate_api(
    renderer: &Renderer,
    path: &Path,
    api: &Api,
    group: &ApiGroup,
    config: &GeneratorConfig,
) -> Result<(), GenerateError> {
    let source = render_api(renderer, path, api, group, config)?;

    let file_error = |source: std::io::Error| GenerateError::FileCreation {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(file_error)?;
    }
    fs::write(path, &source).map_err(file_error)?;

    info!(
        interface = %api.interface,
        path = %path.display(),
        bytes = source.len(),
        "Generated binding."
    );
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use bluegen_common::{Method, Property};

    fn group() -> ApiGroup {
        ApiGroup {
            file_name: "battery-api.txt".into(),
            name: "BlueZ D-Bus Battery API description".into(),
            ..ApiGroup::default()
        }
    }

    fn battery() -> Api {
        Api {
            interface: "org.bluez.Battery1".into(),
            title: "  Battery hierarchy \n".into(),
            description: "Battery information.".into(),
            service: "org.bluez".into(),
            object_path: "[variable prefix]/{hci0,hci1,...}/dev_XX_XX_XX_XX_XX_XX".into(),
            properties: vec![Property {
                name: "Percentage".into(),
                ty: "byte".into(),
                ..Property::default()
            }],
            methods: vec![Method {
                name: "Refresh".into(),
                ..Method::default()
            }],
        }
    }

    #[test]
    fn test_output_path() {
        let path = output_path(Path::new("out"), &group(), &battery());
        assert_eq!(path, Path::new("out/battery/gen_Battery1.go"));
    }

    #[test]
    fn test_build_api_doc() {
        let doc = build_api_doc(&battery(), &group(), &GeneratorConfig::default()).unwrap();
        assert_eq!(doc.package, "battery");
        assert_eq!(doc.interface_name, "Battery1");
        assert_eq!(doc.api.title, "Battery hierarchy");
        assert_eq!(doc.api.description, "// Battery information.");
        assert_eq!(doc.properties.len(), 1);
        assert_eq!(doc.methods.len(), 1);
        assert_eq!(doc.constructors.len(), 1);
        assert!(!doc.expose_properties);
        // objectPath argument pulls in the bus types module
        assert!(doc.imports.contains("\"github.com/godbus/dbus/v5\""));
        assert!(!doc.imports.contains("\"fmt\""));
        assert!(!doc.imports.contains("\"reflect\""));
    }

    #[test]
    fn test_build_api_doc_uses_config() {
        let config = GeneratorConfig::from_toml_str(
            r#"
[interfaces."org.bluez.Battery1"]
expose_properties = true

[interfaces."org.bluez.Battery1".properties]
Source = "string"
"#,
        )
        .unwrap();
        let doc = build_api_doc(&battery(), &group(), &config).unwrap();
        assert!(doc.expose_properties);
        assert!(doc.imports.contains("\"reflect\""));
        assert!(doc.imports.contains("\"github.com/fatih/structs\""));
        let names: Vec<&str> = doc.properties.iter().map(|p| p.property.name.as_str()).collect();
        assert_eq!(names, vec!["Percentage", "Source"]);
    }

    #[test]
    fn test_unsupported_type_names_interface() {
        let mut api = battery();
        api.properties[0].ty = "variant".into();
        let err = build_api_doc(&api, &group(), &GeneratorConfig::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "org.bluez.Battery1: unsupported type 'dbus.Variant'"
        );
    }

    #[test]
    fn test_generate_api_writes_nothing_on_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut api = battery();
        api.properties[0].ty = "fd".into();
        let path = output_path(dir.path(), &group(), &api);

        let renderer = Renderer::new(None).unwrap();
        let result = generate_api(&renderer, &path, &api, &group(), &GeneratorConfig::default());
        assert!(matches!(result, Err(GenerateError::UnsupportedType { .. })));
        assert!(!path.exists());
        assert!(!path.parent().unwrap().exists());
    }

    #[test]
    fn test_generate_api_file_creation_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("battery");
        fs::write(&blocker, "not a directory").unwrap();
        let path = output_path(dir.path(), &group(), &battery());

        let renderer = Renderer::new(None).unwrap();
        let err = generate_api(&renderer, &path, &battery(), &group(), &GeneratorConfig::default())
            .unwrap_err();
        assert!(matches!(err, GenerateError::FileCreation { .. }));
    }
}
