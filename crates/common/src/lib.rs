//! Shared types for bluegen.
//!
//! This crate holds the interface description model consumed by the
//! generator and the helpers used to load description files produced by the
//! documentation extractor.

pub mod model;

use serde::Deserialize;
use std::fs;
use std::path::Path;

// Re-export commonly used types
pub use model::{Api, ApiGroup, Arg, Method, Property, PropertyFlag};

/// File extensions recognised as interface description files.
pub const DESCRIPTION_EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

/// A description file holds either a list of groups or a single group.
#[derive(Deserialize)]
#[serde(untagged)]
enum DescriptionFile {
    Many(Vec<ApiGroup>),
    One(ApiGroup),
}

impl From<DescriptionFile> for Vec<ApiGroup> {
    fn from(file: DescriptionFile) -> Self {
        match file {
            DescriptionFile::Many(groups) => groups,
            DescriptionFile::One(group) => vec![group],
        }
    }
}

/// Check whether a path looks like an interface description file.
pub fn is_description_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| DESCRIPTION_EXTENSIONS.contains(&ext))
}

/// Parse description text; YAML when `yaml` is set, JSON otherwise.
pub fn parse_api_groups(contents: &str, yaml: bool) -> Result<Vec<ApiGroup>, String> {
    let file: DescriptionFile = if yaml {
        serde_yaml::from_str(contents).map_err(|e| format!("Invalid YAML description: {e}"))?
    } else {
        serde_json::from_str(contents).map_err(|e| format!("Invalid JSON description: {e}"))?
    };
    Ok(file.into())
}

/// Read the API groups stored in a description file.
pub fn load_api_groups(path: &Path) -> Result<Vec<ApiGroup>, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read description file {}: {e}", path.display()))?;

    let yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == "yaml" || ext == "yml");

    parse_api_groups(&contents, yaml).map_err(|e| format!("{}: {e}", path.display()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const GROUP_JSON: &str = r#"{
        "file_name": "battery-api.txt",
        "name": "Battery hierarchy",
        "apis": [
            {
                "interface": "org.bluez.Battery1",
                "service": "org.bluez",
                "object_path": "[variable prefix]/{hci0,hci1,...}/dev_XX_XX_XX_XX_XX_XX",
                "properties": [{ "name": "Percentage", "type": "byte" }]
            }
        ]
    }"#;

    #[test]
    fn test_parse_single_group() {
        let groups = parse_api_groups(GROUP_JSON, false).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].package_name(), "battery");
        assert_eq!(groups[0].apis[0].short_name(), "Battery1");
    }

    #[test]
    fn test_parse_group_list_yaml() {
        let yaml = r"
- file_name: adapter-api.txt
  apis:
    - interface: org.bluez.Adapter1
      methods:
        - name: StartDiscovery
- file_name: device-api.txt
  apis:
    - interface: org.bluez.Device1
";
        let groups = parse_api_groups(yaml, true).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].apis[0].methods[0].name, "StartDiscovery");
        assert_eq!(groups[1].package_name(), "device");
    }

    #[test]
    fn test_parse_invalid() {
        let err = parse_api_groups("{ not json", false).unwrap_err();
        assert!(err.starts_with("Invalid JSON description"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("battery.json");
        fs::write(&path, GROUP_JSON).unwrap();

        let groups = load_api_groups(&path).unwrap();
        assert_eq!(groups[0].apis.len(), 1);

        let missing = load_api_groups(&dir.path().join("missing.json")).unwrap_err();
        assert!(missing.contains("missing.json"));
    }

    #[test]
    fn test_is_description_path() {
        assert!(is_description_path(Path::new("a/adapter.json")));
        assert!(is_description_path(Path::new("adapter.yml")));
        assert!(!is_description_path(Path::new("adapter.txt")));
        assert!(!is_description_path(Path::new("adapter")));
    }
}
