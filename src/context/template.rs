//! `{name}` placeholder substitution for path templates.

use crate::error::{HelperError, Result};

/// Renders `template`, replacing each `{name}` with `lookup(name)`.
///
/// # Errors
///
/// Returns [`HelperError::UnknownPlaceholder`] if `lookup` has no value for a
/// placeholder and [`HelperError::UnterminatedPlaceholder`] if a `{` is never
/// closed.
pub fn render<'a>(template: &str, lookup: impl Fn(&str) -> Option<&'a str>) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after
            .find('}')
            .ok_or_else(|| HelperError::UnterminatedPlaceholder(template.to_string()))?;
        let name = &after[..close];
        let value = lookup(name).ok_or_else(|| HelperError::UnknownPlaceholder {
            template: template.to_string(),
            name: name.to_string(),
        })?;
        out.push_str(value);
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    Ok(out)
}
