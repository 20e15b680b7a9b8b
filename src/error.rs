//! Crate-wide error type.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the YAML, schema, and context helpers.
#[derive(Debug, Error)]
pub enum HelperError {
    #[error("I/O error on \"{}\": {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid YAML in \"{}\": {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("cannot write output: {0}")]
    Output(#[source] io::Error),
    #[error("cannot serialize document: {0}")]
    Serialize(#[from] serde_yaml::Error),
    #[error("invalid attribute table \"{}\": {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("workflow config \"{}\" must be a mapping at the top level", .0.display())]
    ConfigNotMapping(PathBuf),
    #[error("component \"{0}\" is not present in the schema")]
    MissingComponent(String),
    #[error("path template \"{template}\" references unknown placeholder \"{name}\"")]
    UnknownPlaceholder { template: String, name: String },
    #[error("path template \"{0}\" has an unterminated placeholder")]
    UnterminatedPlaceholder(String),
}

pub type Result<T> = std::result::Result<T, HelperError>;

impl HelperError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
