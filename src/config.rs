//! Workflow configuration loading.
//!
//! The workflow keeps one top-level `config.yaml` at the project root. Its
//! schema belongs to the workflow, so it is handled here as an untyped YAML
//! mapping.

use std::path::Path;

use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::error::{HelperError, Result};
use crate::yaml_diff::load_yaml;

/// File name of the top-level workflow configuration.
pub const CONFIG_FILE: &str = "config.yaml";

/// Loads `<root>/<file_name>` as a mapping.
///
/// A missing file, an empty file, or a document that is just `null` all
/// yield an empty mapping.
///
/// # Errors
///
/// Returns [`HelperError::Yaml`] if the file is not valid YAML,
/// [`HelperError::ConfigNotMapping`] if its top level is not a mapping, and
/// [`HelperError::Io`] if it exists but cannot be read.
pub fn load_workflow_config(root: &Path, file_name: &str) -> Result<Mapping> {
    let path = root.join(file_name);
    if !path.is_file() {
        debug!(path = %path.display(), "no workflow config; using empty mapping");
        return Ok(Mapping::new());
    }
    match load_yaml(&path)? {
        Value::Mapping(map) => {
            debug!(path = %path.display(), keys = map.len(), "loaded workflow config");
            Ok(map)
        }
        Value::Null => Ok(Mapping::new()),
        _ => Err(HelperError::ConfigNotMapping(path)),
    }
}

/// Returns a top-level string entry of a workflow config.
pub fn config_str<'a>(config: &'a Mapping, key: &str) -> Option<&'a str> {
    config.get(key).and_then(Value::as_str)
}
