//! Mock per-step execution context.
//!
//! A workflow step normally receives its config, wildcards, and file paths
//! from the workflow orchestrator. [`mock_step_context`] builds the same
//! bundle directly so a single step can be run and tested on its own.

use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_yaml::Mapping;
use tracing::{debug, warn};

use crate::config::{CONFIG_FILE, config_str, load_workflow_config};
use crate::error::{HelperError, Result};

pub mod layout;
pub mod template;

pub use layout::{ProjectLayout, RootResolution, SCRIPTS_DIR};

/// Time resolution used in network file names when the config does not set one.
pub const DEFAULT_TIME_SAMPLING: &str = "1H";

/// Wildcard values used when the caller does not supply them.
pub const SUMMARISE_NETWORK_DEFAULTS: &[(&str, &str)] = &[
    ("year", "2030"),
    ("zone", "DE"),
    ("palette", "p3"),
    ("policy", "ref"),
    ("participation", "0"),
];

const SUMMARISE_NETWORK_INPUTS: &[(&str, &str)] = &[
    (
        "network",
        "../input/elec_s_37_lv1.0__{time_sampling}-B-solar+p3_{year}.nc",
    ),
    (
        "grid_cfe",
        "../results/grid_cfe/{zone}/grid_cfe_{palette}_{policy}_{participation}.csv",
    ),
];

const SUMMARISE_NETWORK_OUTPUTS: &[&str] =
    &["../results/summaries/{zone}/summary_{palette}_{policy}_{participation}.yaml"];

/// A workflow step the mock knows how to wire up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    SummariseNetwork,
    /// Any other step; its context carries no inputs or outputs.
    Unsupported(String),
}

impl Step {
    pub fn name(&self) -> &str {
        match self {
            Self::SummariseNetwork => "summarise_network",
            Self::Unsupported(name) => name.as_str(),
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported(_))
    }
}

impl From<&str> for Step {
    fn from(name: &str) -> Self {
        match name {
            "summarise_network" => Self::SummariseNetwork,
            other => Self::Unsupported(other.to_string()),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Step {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Named wildcard values for one step invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Wildcards(BTreeMap<String, String>);

impl Wildcards {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn get_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.get(name).unwrap_or(default)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parses `name=value` pairs, e.g. from the command line.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first argument without `=` or with an
    /// empty name.
    pub fn parse_pairs<I, S>(pairs: I) -> std::result::Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut wildcards = Self::new();
        for pair in pairs {
            let pair = pair.as_ref();
            match pair.split_once('=') {
                Some((name, value)) if !name.is_empty() => wildcards.insert(name, value),
                _ => return Err(format!("invalid wildcard `{pair}` (expected name=value)")),
            }
        }
        Ok(wildcards)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Wildcards {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Stand-in for the orchestrator's per-step object.
///
/// Input and output paths are relative to the scripts directory, exactly as
/// a step script would see them; use [`StepContext::resolved_input`] and
/// [`StepContext::resolved_output`] for paths anchored at the project.
#[derive(Debug, Clone, Serialize)]
pub struct StepContext {
    pub step: Step,
    pub config: Mapping,
    pub wildcards: Wildcards,
    pub input: IndexMap<String, PathBuf>,
    pub output: Vec<PathBuf>,
    pub log: Vec<PathBuf>,
}

impl StepContext {
    /// Inputs joined onto the layout's scripts directory.
    pub fn resolved_input(&self, layout: &ProjectLayout) -> IndexMap<String, PathBuf> {
        self.input
            .iter()
            .map(|(name, path)| (name.clone(), layout.scripts_path(path)))
            .collect()
    }

    /// Outputs joined onto the layout's scripts directory.
    pub fn resolved_output(&self, layout: &ProjectLayout) -> Vec<PathBuf> {
        self.output
            .iter()
            .map(|path| layout.scripts_path(path))
            .collect()
    }
}

/// Builds the context `step` would receive, reading `config.yaml` from the
/// layout's project root.
///
/// Wildcards the step needs but the caller omits fall back to
/// [`SUMMARISE_NETWORK_DEFAULTS`]. An unsupported step yields empty inputs
/// and outputs whatever wildcards are given.
///
/// # Errors
///
/// Propagates config loading failures; a missing config file is not an error.
pub fn mock_step_context(
    layout: &ProjectLayout,
    step: Step,
    wildcards: Wildcards,
) -> Result<StepContext> {
    let config = load_workflow_config(&layout.project_root, CONFIG_FILE)?;

    let (input, output) = match &step {
        Step::SummariseNetwork => summarise_network_paths(&config, &wildcards)?,
        Step::Unsupported(name) => {
            warn!(step = %name, "no mock inputs or outputs for step");
            (IndexMap::new(), Vec::new())
        }
    };
    debug!(
        %step,
        inputs = input.len(),
        outputs = output.len(),
        "built mock step context"
    );

    Ok(StepContext {
        step,
        config,
        wildcards,
        input,
        output,
        log: Vec::new(),
    })
}

/// Builds a mock context from the current working directory.
///
/// The project is located with [`ProjectLayout::from_working_dir`], so the
/// call works from the project root, its `scripts` directory, or any other
/// directory inside the project.
///
/// # Errors
///
/// Returns [`HelperError::Io`] if the working directory cannot be read, and
/// propagates [`mock_step_context`] failures.
pub fn mock_snakemake(step_name: &str, wildcards: Wildcards) -> Result<StepContext> {
    let cwd = env::current_dir().map_err(|e| HelperError::io(".", e))?;
    let (layout, resolution) = ProjectLayout::from_working_dir(&cwd);
    debug!(?resolution, "mocking step from working directory");
    mock_step_context(&layout, Step::from(step_name), wildcards)
}

/// The `time_sampling` config entry, or [`DEFAULT_TIME_SAMPLING`] when it is
/// absent or not a string.
fn time_sampling(config: &Mapping) -> &str {
    match config.get("time_sampling") {
        None => DEFAULT_TIME_SAMPLING,
        Some(_) => config_str(config, "time_sampling").unwrap_or_else(|| {
            warn!(
                default = DEFAULT_TIME_SAMPLING,
                "config time_sampling is not a string; using default"
            );
            DEFAULT_TIME_SAMPLING
        }),
    }
}

fn summarise_network_paths(
    config: &Mapping,
    wildcards: &Wildcards,
) -> Result<(IndexMap<String, PathBuf>, Vec<PathBuf>)> {
    let time_sampling = time_sampling(config);
    let lookup = |name: &str| {
        if name == "time_sampling" {
            return Some(time_sampling);
        }
        wildcards.get(name).or_else(|| {
            SUMMARISE_NETWORK_DEFAULTS
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| *value)
        })
    };

    let mut input = IndexMap::new();
    for (name, tpl) in SUMMARISE_NETWORK_INPUTS {
        input.insert((*name).to_string(), PathBuf::from(template::render(tpl, lookup)?));
    }
    let output = SUMMARISE_NETWORK_OUTPUTS
        .iter()
        .map(|tpl| template::render(tpl, lookup).map(PathBuf::from))
        .collect::<Result<Vec<_>>>()?;
    Ok((input, output))
}
