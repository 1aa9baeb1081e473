//! Serialization for Catalog
//!
//! Line-oriented text format:
//!
//! ```text
//! \nCatalog Version 1\n
//! Number of fields = F\n
//!   Field[0]: name = NAME, type = int|float\n
//!   ...
//! Number of rows = N\n
//!   Row[0]: V0, V1, ...\n
//!   ...
//! ```
//!
//! Several catalogs may be concatenated in one stream; each read consumes
//! exactly one.

use super::{Catalog, FieldType, FieldValue, Schema};
use crate::error::{Error, Result};
use std::io::{BufReader, BufWriter, Read, Write};
use std::iter::Peekable;
use std::path::Path;

/// Catalog serialization format version
const CATALOG_VERSION: i32 = 1;

/// Maximum number of columns in a catalog
const MAX_FIELDS: usize = 10_000;
/// Maximum number of rows in a catalog
const MAX_ROWS: usize = 100_000_000;

/// Maximum input size in bytes to prevent unbounded memory growth.
pub(crate) const MAX_INPUT_SIZE: usize = 500_000_000;

impl Catalog {
    /// Read a Catalog from a reader.
    pub fn read_from_reader(reader: &mut impl Read) -> Result<Self> {
        let mut buf = String::new();
        reader
            .take(MAX_INPUT_SIZE as u64)
            .read_to_string(&mut buf)?;
        Self::read_from_bytes(buf.as_bytes())
    }

    /// Read a Catalog from a file.
    pub fn read_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        let mut reader = BufReader::new(file);
        Self::read_from_reader(&mut reader)
    }

    /// Read a Catalog from bytes.
    pub fn read_from_bytes(data: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(data)
            .map_err(|e| Error::DecodeError(format!("invalid UTF-8: {e}")))?;
        let mut lines = text.lines().peekable();
        parse_catalog(&mut lines)
    }

    /// Write a Catalog to a writer.
    pub fn write_to_writer(&self, writer: &mut impl Write) -> Result<()> {
        write_catalog(writer, self)
    }

    /// Write a Catalog to a file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        self.write_to_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write a Catalog to bytes.
    pub fn write_to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_to_writer(&mut buf)?;
        Ok(buf)
    }
}

// --- Internal parsing/writing helpers ---

/// Write a Catalog in the text format.
pub(crate) fn write_catalog(writer: &mut impl Write, cat: &Catalog) -> Result<()> {
    let schema = cat.schema();
    writeln!(writer, "\nCatalog Version {CATALOG_VERSION}")?;
    writeln!(writer, "Number of fields = {}", schema.len())?;
    for (i, f) in schema.fields().iter().enumerate() {
        writeln!(
            writer,
            "  Field[{i}]: name = {}, type = {}",
            f.name,
            f.ty.as_str()
        )?;
    }

    writeln!(writer, "Number of rows = {}", cat.len())?;
    for (i, row) in cat.rows().enumerate() {
        write!(writer, "  Row[{i}]:")?;
        for (j, cell) in row.iter().enumerate() {
            let sep = if j == 0 { " " } else { ", " };
            match cell {
                FieldValue::Int(v) => write!(writer, "{sep}{v}")?,
                FieldValue::Float(v) => write!(writer, "{sep}{v:?}")?,
            }
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Parse a Catalog from a line iterator.
///
/// Expects the iterator to be positioned before the version header line.
pub(crate) fn parse_catalog<'a>(
    lines: &mut Peekable<impl Iterator<Item = &'a str>>,
) -> Result<Catalog> {
    let version = find_and_parse_int(lines, "Catalog Version ")?;
    if version != CATALOG_VERSION as i64 {
        return Err(Error::DecodeError(format!(
            "invalid Catalog version: {version}"
        )));
    }

    let nfields = find_and_parse_count(lines, "Number of fields = ", MAX_FIELDS)?;
    let mut schema = Schema::new();
    for _ in 0..nfields {
        let (name, ty) = parse_field_line(lines)?;
        schema
            .add_field(&name, ty)
            .map_err(|e| Error::DecodeError(format!("bad field: {e}")))?;
    }

    let nrows = find_and_parse_count(lines, "Number of rows = ", MAX_ROWS)?;
    let mut cat = Catalog::with_capacity(schema, nrows.min(1 << 16));
    for _ in 0..nrows {
        let row = parse_row_line(lines, cat.schema())?;
        cat.push_row(row)?;
    }
    Ok(cat)
}

/// Find a line starting with `prefix` and parse the integer after it.
pub(crate) fn find_and_parse_int<'a>(
    lines: &mut Peekable<impl Iterator<Item = &'a str>>,
    prefix: &str,
) -> Result<i64> {
    for line in lines.by_ref() {
        let trimmed = line.trim();
        if let Some(rest) = trimmed.strip_prefix(prefix) {
            return rest.trim().parse::<i64>().map_err(|e| {
                Error::DecodeError(format!("failed to parse integer after '{prefix}': {e}"))
            });
        }
    }
    Err(Error::DecodeError(format!(
        "expected line with '{prefix}' not found"
    )))
}

fn find_and_parse_count<'a>(
    lines: &mut Peekable<impl Iterator<Item = &'a str>>,
    prefix: &str,
    max: usize,
) -> Result<usize> {
    let n = find_and_parse_int(lines, prefix)?;
    if n < 0 || n as usize > max {
        return Err(Error::DecodeError(format!(
            "invalid count after '{prefix}': {n}"
        )));
    }
    Ok(n as usize)
}

/// Parse a field line like "  Field[0]: name = y, type = int"
fn parse_field_line<'a>(
    lines: &mut Peekable<impl Iterator<Item = &'a str>>,
) -> Result<(String, FieldType)> {
    for line in lines.by_ref() {
        let trimmed = line.trim();
        if !trimmed.starts_with("Field[") {
            continue;
        }
        let after_colon = trimmed
            .split_once(": ")
            .ok_or_else(|| Error::DecodeError(format!("invalid field line: {trimmed}")))?
            .1;

        let mut name: Option<String> = None;
        let mut ty: Option<FieldType> = None;
        for part in after_colon.split(',') {
            let (key, val) = part
                .split_once('=')
                .ok_or_else(|| Error::DecodeError(format!("invalid key/value pair: '{part}'")))?;
            match key.trim() {
                "name" => name = Some(val.trim().to_string()),
                "type" => {
                    ty = Some(FieldType::parse(val.trim()).ok_or_else(|| {
                        Error::DecodeError(format!("unknown field type '{}'", val.trim()))
                    })?)
                }
                other => {
                    return Err(Error::DecodeError(format!(
                        "unknown key '{other}' in field line"
                    )));
                }
            }
        }
        let name = name.ok_or_else(|| Error::DecodeError("missing field name".into()))?;
        let ty = ty.ok_or_else(|| Error::DecodeError("missing field type".into()))?;
        return Ok((name, ty));
    }
    Err(Error::DecodeError("expected Field line not found".into()))
}

/// Parse a row line like "  Row[3]: 1, 2, 0.5"
fn parse_row_line<'a>(
    lines: &mut Peekable<impl Iterator<Item = &'a str>>,
    schema: &Schema,
) -> Result<Vec<FieldValue>> {
    for line in lines.by_ref() {
        let trimmed = line.trim();
        if !trimmed.starts_with("Row[") {
            continue;
        }
        let (_, cells) = trimmed
            .split_once(':')
            .ok_or_else(|| Error::DecodeError(format!("invalid row line: {trimmed}")))?;
        let cells: Vec<&str> = if cells.trim().is_empty() {
            Vec::new()
        } else {
            cells.split(',').map(str::trim).collect()
        };
        if cells.len() != schema.len() {
            return Err(Error::DecodeError(format!(
                "row has {} cells, expected {}",
                cells.len(),
                schema.len()
            )));
        }
        return cells
            .iter()
            .zip(schema.fields())
            .map(|(cell, field)| match field.ty {
                FieldType::Int => cell.parse::<i64>().map(FieldValue::Int).map_err(|e| {
                    Error::DecodeError(format!("bad int '{cell}' in '{}': {e}", field.name))
                }),
                FieldType::Float => cell.parse::<f64>().map(FieldValue::Float).map_err(|e| {
                    Error::DecodeError(format!("bad float '{cell}' in '{}': {e}", field.name))
                }),
            })
            .collect();
    }
    Err(Error::DecodeError("expected Row line not found".into()))
}
