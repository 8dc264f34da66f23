//! Template rendering for generated binding files.

use std::fs;
use std::path::Path;

use tera::{Context, Tera};

use crate::error::GenerateError;
use crate::ir::ApiDoc;

/// Name the binding template is registered under.
pub const TEMPLATE_NAME: &str = "api.go";

const DEFAULT_TEMPLATE: &str = include_str!("../templates/api.go.tera");

/// A compiled binding template.
#[derive(Debug)]
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// Compile the built-in template, or the one at `template` when given.
    pub fn new(template: Option<&Path>) -> Result<Self, GenerateError> {
        let source = match template {
            Some(path) => fs::read_to_string(path).map_err(|err| GenerateError::Config {
                path: path.to_path_buf(),
                reason: format!("Failed to read template: {err}"),
            })?,
            None => DEFAULT_TEMPLATE.to_string(),
        };

        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, &source)
            .map_err(GenerateError::Template)?;
        Ok(Self { tera })
    }

    /// Render one binding file. `path` is only used to label errors.
    pub fn render(&self, doc: &ApiDoc, path: &Path) -> Result<String, GenerateError> {
        let render_error = |source: tera::Error| GenerateError::Render {
            path: path.to_path_buf(),
            source,
        };
        let context = Context::from_serialize(doc).map_err(render_error)?;
        self.tera.render(TEMPLATE_NAME, &context).map_err(render_error)
    }
}
