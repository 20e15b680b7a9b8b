//! Extra `Link` ports for links with more than two buses.
//!
//! Links connect `bus0` to `bus1` by default. Multi-output links such as
//! CHP units or electrolysers with heat recovery need up to three further
//! buses, each with its own efficiency and power output.

use tracing::debug;

use super::{AttributeRow, ComponentSchema, DefaultValue};
use crate::error::{HelperError, Result};

/// Component that receives the extra ports.
pub const LINK: &str = "Link";

const OPTIONAL_INPUT: &str = "Input (optional)";
const OUTPUT: &str = "Output";
const ORDINALS: [(u8, &str); 3] = [(2, "2nd"), (3, "3rd"), (4, "4th")];

/// The nine extra `Link` rows, in insertion order: three bus references,
/// then three efficiencies, then three output series.
pub fn multilink_attrs() -> Vec<(String, AttributeRow)> {
    let buses = ORDINALS.iter().map(|(i, ord)| {
        (
            format!("bus{i}"),
            AttributeRow::new("string", None, None, &format!("{ord} bus"), OPTIONAL_INPUT),
        )
    });
    let efficiencies = ORDINALS.iter().map(|(i, ord)| {
        (
            format!("efficiency{i}"),
            AttributeRow::new(
                "static or series",
                Some("per unit"),
                Some(DefaultValue::Number(1.0)),
                &format!("{ord} bus efficiency"),
                OPTIONAL_INPUT,
            ),
        )
    });
    let outputs = ORDINALS.iter().map(|(i, ord)| {
        (
            format!("p{i}"),
            AttributeRow::new(
                "series",
                Some("MW"),
                Some(DefaultValue::Number(0.0)),
                &format!("{ord} bus output"),
                OUTPUT,
            ),
        )
    });
    buses.chain(efficiencies).chain(outputs).collect()
}

/// Returns a copy of `base` whose `Link` table also describes links with up
/// to five ports (`bus0`..`bus4`).
///
/// The copy owns every table, so `base` stays untouched. Rows already present
/// under one of the new names are replaced in place; all others are appended.
///
/// # Errors
///
/// Returns [`HelperError::MissingComponent`] if `base` has no `Link` table.
pub fn override_component_attrs(base: &ComponentSchema) -> Result<ComponentSchema> {
    let mut patched = base.clone();
    let link = patched
        .get_mut(LINK)
        .ok_or_else(|| HelperError::MissingComponent(LINK.to_string()))?;
    for (name, row) in multilink_attrs() {
        link.insert(name, row);
    }
    debug!(rows = link.len(), "extended Link attributes");
    Ok(patched)
}

impl ComponentSchema {
    /// Standard schema with the multi-port `Link` rows added.
    ///
    /// # Errors
    ///
    /// Propagates failures from [`ComponentSchema::base`].
    pub fn with_multilink() -> Result<Self> {
        override_component_attrs(&Self::base()?)
    }
}
