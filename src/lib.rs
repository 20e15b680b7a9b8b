//! Auxiliary helpers for the carbon-free-energy network workflow.

/// Workflow `config.yaml` loading.
pub mod config;
/// Mock per-step execution contexts for running one step in isolation.
pub mod context;
pub mod error;
pub mod io;
pub mod logging;
/// Component attribute schemas and the multi-port link patch.
pub mod schema;
pub mod yaml_diff;

pub use context::{StepContext, Wildcards, mock_snakemake, mock_step_context};
pub use error::{HelperError, Result};
pub use schema::{ComponentSchema, override_component_attrs};
pub use yaml_diff::{compare_yaml, load_yaml, print_yaml_diff};
