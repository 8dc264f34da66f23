//! Generator configuration loaded from `bluegen.toml`.
//!
//! Holds the per-interface override tables and the Go module layout. Every
//! field has a default, so an empty file (or no file) is a valid config.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::GenerateError;
use crate::ir::DEFAULT_DOC_WIDTH;

/// Default concrete value of `[variable prefix]` in documented object paths.
pub const DEFAULT_VARIABLE_PREFIX: &str = "/org/bluez";

/// Go module paths imported by generated files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModulePaths {
    /// Synchronization primitives.
    pub sync: String,
    /// Base protocol abstraction.
    pub base: String,
    /// Runtime reflection.
    pub reflection: String,
    /// Struct introspection.
    pub structs: String,
    /// Property exposure helpers.
    pub util: String,
    /// D-Bus value types.
    pub bus_types: String,
    /// String formatting.
    pub formatting: String,
}

impl Default for ModulePaths {
    fn default() -> Self {
        Self {
            sync: "sync".to_string(),
            base: "github.com/muka/go-bluetooth/bluez".to_string(),
            reflection: "reflect".to_string(),
            structs: "github.com/fatih/structs".to_string(),
            util: "github.com/muka/go-bluetooth/util".to_string(),
            bus_types: "github.com/godbus/dbus/v5".to_string(),
            formatting: "fmt".to_string(),
        }
    }
}

/// Overrides for a single interface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterfaceOverride {
    /// Emit reflection based property exposure helpers.
    pub expose_properties: bool,
    /// Property name to Go type, replacing or adding properties.
    pub properties: BTreeMap<String, String>,
}

/// Top level generator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Concrete path substituted for `[variable prefix]`.
    pub variable_prefix: String,
    /// Template replacing the built-in one.
    pub template: Option<PathBuf>,
    /// Comment wrap width.
    pub doc_width: usize,
    /// Go module layout.
    pub modules: ModulePaths,
    /// Overrides keyed by dotted interface name.
    pub interfaces: BTreeMap<String, InterfaceOverride>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            variable_prefix: DEFAULT_VARIABLE_PREFIX.to_string(),
            template: None,
            doc_width: DEFAULT_DOC_WIDTH,
            modules: ModulePaths::default(),
            interfaces: BTreeMap::new(),
        }
    }
}

impl GeneratorConfig {
    /// Load a configuration file.
    ///
    /// A relative `template` path is resolved against the config file's directory.
    pub fn load(path: &Path) -> Result<Self, GenerateError> {
        let contents = fs::read_to_string(path).map_err(|err| GenerateError::Config {
            path: path.to_path_buf(),
            reason: format!("Failed to read config file: {err}"),
        })?;

        let mut config = Self::from_toml_str(&contents).map_err(|reason| GenerateError::Config {
            path: path.to_path_buf(),
            reason,
        })?;

        if let (Some(template), Some(dir)) = (config.template.as_mut(), path.parent())
            && template.is_relative()
        {
            *template = dir.join(&*template);
        }

        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|err| format!("Failed to parse config: {err}"))
    }

    /// Property type overrides for an interface, if any.
    pub fn property_overrides(&self, interface: &str) -> Option<&BTreeMap<String, String>> {
        self.interfaces
            .get(interface)
            .map(|entry| &entry.properties)
            .filter(|properties| !properties.is_empty())
    }

    /// Whether property exposure helpers are emitted for an interface.
    pub fn expose_properties(&self, interface: &str) -> bool {
        self.interfaces
            .get(interface)
            .is_some_and(|entry| entry.expose_properties)
    }
}
