//! Component attribute schemas for the power-network data model.
//!
//! A [`ComponentSchema`] maps each component kind (`Bus`, `Link`, ...) to an
//! [`AttributeTable`] describing its fields. Both types are plain owned
//! values: cloning a schema copies every table, so a patched copy never
//! aliases the schema it was derived from.

use std::fmt;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::io::attrs::read_attribute_table;

/// Multi-port link attribute patch.
pub mod multilink;

pub use multilink::override_component_attrs;

/// Known components as `(name, list_name)`; `list_name` is the CSV file stem.
pub const COMPONENTS: &[(&str, &str)] = &[
    ("Bus", "buses"),
    ("Line", "lines"),
    ("Link", "links"),
    ("Generator", "generators"),
    ("Load", "loads"),
    ("Store", "stores"),
    ("StorageUnit", "storage_units"),
];

const EMBEDDED_TABLES: &[(&str, &str)] = &[
    ("Bus", include_str!("../../data/component_attrs/buses.csv")),
    ("Line", include_str!("../../data/component_attrs/lines.csv")),
    ("Link", include_str!("../../data/component_attrs/links.csv")),
    (
        "Generator",
        include_str!("../../data/component_attrs/generators.csv"),
    ),
    ("Load", include_str!("../../data/component_attrs/loads.csv")),
    ("Store", include_str!("../../data/component_attrs/stores.csv")),
    (
        "StorageUnit",
        include_str!("../../data/component_attrs/storage_units.csv"),
    ),
];

/// Returns the CSV file stem for a component name.
///
/// Unknown components fall back to their lowercased name.
pub fn list_name(component: &str) -> String {
    COMPONENTS
        .iter()
        .find(|(name, _)| *name == component)
        .map_or_else(|| component.to_lowercase(), |(_, list)| (*list).to_string())
}

/// Default value of an attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl DefaultValue {
    /// Interprets a raw table cell: `True`/`False` as booleans, anything
    /// `f64` accepts (including `inf`) as a number, the rest as text.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "True" | "true" => Self::Bool(true),
            "False" | "false" => Self::Bool(false),
            _ => raw
                .parse::<f64>()
                .map_or_else(|_| Self::Text(raw.to_string()), Self::Number),
        }
    }
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(true) => write!(f, "True"),
            Self::Bool(false) => write!(f, "False"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// One row of an attribute table.
///
/// `unit` and `default` are `None` where the source table marks them as
/// not applicable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeRow {
    /// Type tag, e.g. `string`, `float`, `static or series`, `series`.
    #[serde(rename = "type")]
    pub attr_type: String,
    pub unit: Option<String>,
    pub default: Option<DefaultValue>,
    pub description: String,
    /// Status tag, e.g. `Input (required)`, `Input (optional)`, `Output`.
    pub status: String,
}

impl AttributeRow {
    pub fn new(
        attr_type: &str,
        unit: Option<&str>,
        default: Option<DefaultValue>,
        description: &str,
        status: &str,
    ) -> Self {
        Self {
            attr_type: attr_type.to_string(),
            unit: unit.map(str::to_string),
            default,
            description: description.to_string(),
            status: status.to_string(),
        }
    }
}

/// Attribute rows of one component, keyed by attribute name in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeTable {
    rows: IndexMap<String, AttributeRow>,
}

impl AttributeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a row. A replaced row keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, row: AttributeRow) -> Option<AttributeRow> {
        self.rows.insert(name.into(), row)
    }

    pub fn get(&self, name: &str) -> Option<&AttributeRow> {
        self.rows.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rows.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeRow)> {
        self.rows.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, AttributeRow)> for AttributeTable {
    fn from_iter<I: IntoIterator<Item = (String, AttributeRow)>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

/// Attribute tables for every component kind of a network.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentSchema {
    components: IndexMap<String, AttributeTable>,
}

impl ComponentSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the standard schema from the attribute tables shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns [`crate::HelperError::Csv`] if an embedded table is malformed.
    pub fn base() -> Result<Self> {
        let mut schema = Self::new();
        for (component, raw) in EMBEDDED_TABLES {
            let origin = format!("<embedded>/{}.csv", list_name(component));
            let table = read_attribute_table(raw.as_bytes(), Path::new(&origin))?;
            schema.insert(*component, table);
        }
        Ok(schema)
    }

    pub fn insert(&mut self, component: impl Into<String>, table: AttributeTable) {
        self.components.insert(component.into(), table);
    }

    pub fn get(&self, component: &str) -> Option<&AttributeTable> {
        self.components.get(component)
    }

    pub fn get_mut(&mut self, component: &str) -> Option<&mut AttributeTable> {
        self.components.get_mut(component)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn component_names(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeTable)> {
        self.components.iter().map(|(k, v)| (k.as_str(), v))
    }
}
