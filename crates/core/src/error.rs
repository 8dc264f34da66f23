//! Error types for the binding generator.

use std::path::PathBuf;

use thiserror::Error;

use crate::ir::UnsupportedTypeError;

/// Errors that can occur while generating one binding file.
///
/// Every variant is scoped to a single generation task, so a batch run can
/// report it and carry on with the remaining interfaces.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// A property or override type has no known zero value.
    #[error("{interface}: {source}")]
    UnsupportedType {
        /// Interface being generated.
        interface: String,
        /// The offending type.
        #[source]
        source: UnsupportedTypeError,
    },

    /// The destination file or its directory could not be created.
    #[error("Failed to create output file '{}': {source}", path.display())]
    FileCreation {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A previously generated file could not be read back.
    #[error("Failed to read generated file '{}': {source}", path.display())]
    FileRead {
        /// Generated file path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The template failed to render the model.
    #[error("Failed to render '{}': {source}", path.display())]
    Render {
        /// Destination path.
        path: PathBuf,
        /// Underlying template failure.
        #[source]
        source: tera::Error,
    },

    /// The template itself could not be loaded or parsed.
    #[error("Invalid template: {0}")]
    Template(#[source] tera::Error),

    /// The generator configuration could not be loaded.
    #[error("Invalid configuration '{}': {reason}", path.display())]
    Config {
        /// Configuration file path.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },
}
