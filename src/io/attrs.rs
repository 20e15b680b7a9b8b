//! CSV reading and writing of component attribute tables.
//!
//! One file per component, named after the component's list name
//! (`links.csv`, `buses.csv`, ...), with the column layout
//! `attribute,type,unit,default,description,status`.

use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{HelperError, Result};
use crate::schema::{
    AttributeRow, AttributeTable, COMPONENTS, ComponentSchema, DefaultValue, list_name,
};

/// Column header of an attribute table file.
pub const HEADER: &str = "attribute,type,unit,default,description,status";

/// Cell values treated as "not applicable".
const NULL_MARKERS: &[&str] = &["", "n/a", "N/A", "NA", "NaN", "nan", "None", "null"];

#[derive(Debug, Deserialize)]
struct CsvRow {
    attribute: String,
    #[serde(rename = "type")]
    attr_type: String,
    unit: Option<String>,
    default: Option<String>,
    description: String,
    status: String,
}

fn nullable(cell: Option<String>) -> Option<String> {
    cell.filter(|v| !NULL_MARKERS.contains(&v.trim()))
}

/// Parses an attribute table from CSV.
///
/// `origin` only labels errors.
///
/// # Errors
///
/// Returns [`HelperError::Csv`] if the header or a row does not match the
/// attribute table layout.
pub fn read_attribute_table(reader: impl Read, origin: &Path) -> Result<AttributeTable> {
    let csv_err = |source| HelperError::Csv {
        path: origin.to_path_buf(),
        source,
    };
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut table = AttributeTable::new();
    for record in rdr.deserialize::<CsvRow>() {
        let row = record.map_err(csv_err)?;
        table.insert(
            row.attribute,
            AttributeRow {
                attr_type: row.attr_type,
                unit: nullable(row.unit),
                default: nullable(row.default).map(|d| DefaultValue::parse(&d)),
                description: row.description,
                status: row.status,
            },
        );
    }
    Ok(table)
}

/// Writes an attribute table as CSV. Absent cells are written as `n/a`.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_attribute_table(table: &AttributeTable, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(HEADER.split(','))?;
    for (name, row) in table.iter() {
        wtr.write_record([
            name.to_string(),
            row.attr_type.clone(),
            row.unit.clone().unwrap_or_else(|| "n/a".to_string()),
            row.default
                .as_ref()
                .map_or_else(|| "n/a".to_string(), ToString::to_string),
            row.description.clone(),
            row.status.clone(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

impl ComponentSchema {
    /// Loads every known component table found in `dir`.
    ///
    /// Components without a file are left out of the result.
    ///
    /// # Errors
    ///
    /// Returns [`HelperError::Io`] if `dir` or a table file cannot be read and
    /// [`HelperError::Csv`] if a table is malformed.
    pub fn from_csv_dir(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(HelperError::io(
                dir,
                io::Error::new(io::ErrorKind::NotFound, "not a directory"),
            ));
        }
        let mut schema = Self::new();
        for (component, list) in COMPONENTS {
            let path = dir.join(format!("{list}.csv"));
            if !path.exists() {
                debug!(component, path = %path.display(), "no attribute table");
                continue;
            }
            let file = File::open(&path).map_err(|e| HelperError::io(&path, e))?;
            schema.insert(*component, read_attribute_table(file, &path)?);
        }
        Ok(schema)
    }

    /// Writes one `<list_name>.csv` per component into `dir`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`HelperError::Io`] if the directory or a file cannot be written.
    pub fn write_csv_dir(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir).map_err(|e| HelperError::io(dir, e))?;
        for (component, table) in self.iter() {
            let path = dir.join(format!("{}.csv", list_name(component)));
            let file = File::create(&path).map_err(|e| HelperError::io(&path, e))?;
            write_attribute_table(table, BufWriter::new(file))
                .map_err(|e| HelperError::io(&path, e))?;
            debug!(component, rows = table.len(), path = %path.display(), "wrote attribute table");
        }
        Ok(())
    }
}
