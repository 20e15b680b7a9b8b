//! Loading and line-based diffing of YAML configuration documents.
//!
//! Documents are compared as text: each is dumped with mapping keys sorted
//! recursively, split into lines, and the two line lists are diffed in the
//! unified format.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use std::cmp::Ordering;

use serde_yaml::{Mapping, Value};
use similar::{Algorithm, DiffTag};
use tracing::debug;

use crate::error::{HelperError, Result};

/// Context lines shown around each change, as in `diff -u`.
pub const DEFAULT_CONTEXT: usize = 3;

/// Reads and parses a whole YAML file.
///
/// An empty file parses to `Value::Null`.
///
/// # Errors
///
/// Returns [`HelperError::Io`] if the file cannot be read and
/// [`HelperError::Yaml`] if it is not valid YAML.
pub fn load_yaml(path: &Path) -> Result<Value> {
    let raw = fs::read_to_string(path).map_err(|e| HelperError::io(path, e))?;
    if raw.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_yaml::from_str(&raw).map_err(|source| HelperError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

/// Returns a copy of `value` with every mapping's keys in sorted order.
pub fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Mapping(map) => {
            let mut entries: Vec<(&Value, &Value)> = map.iter().collect();
            entries.sort_by(|(a, _), (b, _)| compare_keys(a, b));
            let mut sorted = Mapping::with_capacity(entries.len());
            for (k, v) in entries {
                sorted.insert(k.clone(), canonicalize(v));
            }
            Value::Mapping(sorted)
        }
        Value::Sequence(items) => Value::Sequence(items.iter().map(canonicalize).collect()),
        Value::Tagged(tagged) => {
            let mut tagged = tagged.clone();
            tagged.value = canonicalize(&tagged.value);
            Value::Tagged(tagged)
        }
        other => other.clone(),
    }
}

/// Key order of the canonical dump: numbers by value, then booleans, then
/// strings, then anything else by its YAML text.
fn compare_keys(a: &Value, b: &Value) -> Ordering {
    key_rank(a).cmp(&key_rank(b)).then_with(|| match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => number_value(x).total_cmp(&number_value(y)),
        },
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => key_text(a).cmp(&key_text(b)),
    })
}

fn key_rank(key: &Value) -> u8 {
    match key {
        Value::Number(_) => 0,
        Value::Bool(_) => 1,
        Value::String(_) => 2,
        Value::Null => 3,
        _ => 4,
    }
}

fn number_value(n: &serde_yaml::Number) -> f64 {
    n.as_f64().unwrap_or(f64::NAN)
}

fn key_text(key: &Value) -> String {
    match key {
        Value::Null => "null".to_string(),
        other => serde_yaml::to_string(other).unwrap_or_default(),
    }
}

/// Dumps a document in canonical form and splits it into lines.
///
/// # Errors
///
/// Returns [`HelperError::Serialize`] if the value cannot be serialized.
pub fn canonical_lines(value: &Value) -> Result<Vec<String>> {
    let text = serde_yaml::to_string(&canonicalize(value))?;
    Ok(text.lines().map(str::to_string).collect())
}

/// Loads two YAML files and returns their unified diff.
///
/// Headers name `file1` and `file2`. An empty vector means the canonical
/// dumps are identical.
///
/// # Errors
///
/// Propagates read, parse, and serialization failures of either file.
pub fn compare_yaml(file1: &Path, file2: &Path) -> Result<Vec<String>> {
    let left = canonical_lines(&load_yaml(file1)?)?;
    let right = canonical_lines(&load_yaml(file2)?)?;
    let diff = unified_diff(
        &left,
        &right,
        &file1.display().to_string(),
        &file2.display().to_string(),
        DEFAULT_CONTEXT,
    );
    debug!(
        file1 = %file1.display(),
        file2 = %file2.display(),
        lines = diff.len(),
        "compared yaml documents"
    );
    Ok(diff)
}

/// Writes the diff of two YAML files to `writer`, one line per diff line.
///
/// # Errors
///
/// Propagates [`compare_yaml`] failures and write failures.
pub fn write_yaml_diff(file1: &Path, file2: &Path, mut writer: impl Write) -> Result<()> {
    for line in compare_yaml(file1, file2)? {
        writeln!(writer, "{line}").map_err(HelperError::Output)?;
    }
    writer.flush().map_err(HelperError::Output)
}

/// Prints the diff of two YAML files to standard output.
///
/// # Errors
///
/// See [`write_yaml_diff`].
pub fn print_yaml_diff(file1: &Path, file2: &Path) -> Result<()> {
    let stdout = io::stdout();
    write_yaml_diff(file1, file2, stdout.lock())
}

/// Computes a unified diff of two line lists.
///
/// Output lines carry no terminators. Identical inputs produce no output at
/// all, not even headers.
pub fn unified_diff<S: AsRef<str>>(
    a: &[S],
    b: &[S],
    from: &str,
    to: &str,
    context: usize,
) -> Vec<String> {
    let a: Vec<&str> = a.iter().map(AsRef::as_ref).collect();
    let b: Vec<&str> = b.iter().map(AsRef::as_ref).collect();
    let ops = similar::capture_diff_slices(Algorithm::Myers, &a, &b);

    let mut out = Vec::new();
    for group in similar::group_diff_ops(ops, context) {
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            continue;
        };
        if out.is_empty() {
            out.push(format!("--- {from}"));
            out.push(format!("+++ {to}"));
        }
        out.push(format!(
            "@@ -{} +{} @@",
            format_range(first.old_range().start, last.old_range().end),
            format_range(first.new_range().start, last.new_range().end)
        ));
        for op in &group {
            let (tag, old, new) = op.as_tag_tuple();
            if tag == DiffTag::Equal {
                out.extend(a[old].iter().map(|l| format!(" {l}")));
                continue;
            }
            if matches!(tag, DiffTag::Replace | DiffTag::Delete) {
                out.extend(a[old].iter().map(|l| format!("-{l}")));
            }
            if matches!(tag, DiffTag::Replace | DiffTag::Insert) {
                out.extend(b[new].iter().map(|l| format!("+{l}")));
            }
        }
    }
    out
}

fn format_range(start: usize, stop: usize) -> String {
    let length = stop - start;
    match length {
        1 => format!("{}", start + 1),
        0 => format!("{start},0"),
        _ => format!("{},{length}", start + 1),
    }
}
