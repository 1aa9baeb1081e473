//! Footprint persistence
//!
//! A footprint is stored as two catalogs: its spans (`y`, `x0`, `x1`
//! integer columns, in the order the footprint holds them) and its peaks
//! (the peak schema's columns). The byte form is a version header
//! followed by both catalogs in the [`Catalog`] text format.
//!
//! Peak catalogs written before the current peak schema, with float
//! columns `x`, `y` and `value`, are still readable; their integer
//! positions are taken from the truncated float positions.

use super::Footprint;
use crate::error::{Error, Result};
use crate::peak::{MINIMAL_PEAK_FIELDS, PeakCatalog, PeakRecord, PeakSchema};
use crate::table::serial::{MAX_INPUT_SIZE, find_and_parse_int, parse_catalog, write_catalog};
use crate::table::{Catalog, FieldType, FieldValue, Schema};
use log::warn;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::sync::Arc;

/// Footprint serialization format version
const FOOTPRINT_VERSION: i64 = 1;

/// Columns of the span catalog
const SPAN_FIELDS: [&str; 3] = ["y", "x0", "x1"];

/// Float columns of the legacy peak catalog: position and value
const LEGACY_PEAK_FIELDS: [&str; 3] = ["x", "y", "value"];

fn span_schema() -> Result<Schema> {
    let mut schema = Schema::new();
    for name in SPAN_FIELDS {
        schema.add_field(name, FieldType::Int)?;
    }
    Ok(schema)
}

fn peak_table_schema(schema: &PeakSchema) -> Result<Schema> {
    let mut table = Schema::new();
    for (i, name) in schema.field_names().enumerate() {
        let ty = if i < 2 { FieldType::Int } else { FieldType::Float };
        table.add_field(name, ty)?;
    }
    Ok(table)
}

fn int_cell(row: &[FieldValue], col: usize) -> Result<i32> {
    match row.get(col) {
        Some(FieldValue::Int(v)) => i32::try_from(*v)
            .map_err(|_| Error::DecodeError(format!("value {v} does not fit in i32"))),
        Some(other) => Err(Error::DecodeError(format!(
            "expected integer cell, got {other:?}"
        ))),
        None => Err(Error::IndexOutOfBounds {
            index: col,
            len: row.len(),
        }),
    }
}

fn float_cell(row: &[FieldValue], col: usize) -> Result<f32> {
    row.get(col)
        .map(|v| v.as_f64() as f32)
        .ok_or(Error::IndexOutOfBounds {
            index: col,
            len: row.len(),
        })
}

fn column(schema: &Schema, name: &str) -> Result<usize> {
    schema
        .index_of(name)
        .ok_or_else(|| Error::SchemaMismatch(format!("missing column '{name}'")))
}

impl Footprint {
    /// Persist as a `(spans, peaks)` pair of catalogs.
    pub fn write_catalogs(&self) -> Result<(Catalog, Catalog)> {
        let mut spans = Catalog::with_capacity(span_schema()?, self.spans.len());
        for s in &self.spans {
            spans.push_row(vec![
                FieldValue::Int(s.y as i64),
                FieldValue::Int(s.x0 as i64),
                FieldValue::Int(s.x1 as i64),
            ])?;
        }

        let mut peaks = Catalog::with_capacity(
            peak_table_schema(self.peaks.schema())?,
            self.peaks.len(),
        );
        for p in &self.peaks {
            let mut row = vec![
                FieldValue::Int(p.ix as i64),
                FieldValue::Int(p.iy as i64),
                FieldValue::Float(p.fx as f64),
                FieldValue::Float(p.fy as f64),
                FieldValue::Float(p.peak_value as f64),
            ];
            row.extend(p.extra.iter().map(|&v| FieldValue::Float(v as f64)));
            peaks.push_row(row)?;
        }
        Ok((spans, peaks))
    }

    /// Rebuild a footprint from a `(spans, peaks)` pair of catalogs.
    ///
    /// Spans are appended in catalog order without normalizing.
    ///
    /// # Errors
    ///
    /// Returns `SchemaMismatch` if a catalog lacks the expected columns.
    pub fn read_catalogs(spans: &Catalog, peaks: &Catalog) -> Result<Footprint> {
        let mut foot = Footprint::default();
        let cols = [
            column(spans.schema(), SPAN_FIELDS[0])?,
            column(spans.schema(), SPAN_FIELDS[1])?,
            column(spans.schema(), SPAN_FIELDS[2])?,
        ];
        for row in spans.rows() {
            foot.add_span(
                int_cell(row, cols[0])?,
                int_cell(row, cols[1])?,
                int_cell(row, cols[2])?,
            );
        }
        foot.peaks = read_peaks(peaks)?;
        Ok(foot)
    }

    /// Read a footprint from a reader.
    pub fn read_from_reader(reader: &mut impl Read) -> Result<Self> {
        let mut buf = String::new();
        reader
            .take(MAX_INPUT_SIZE as u64)
            .read_to_string(&mut buf)?;
        Self::read_from_bytes(buf.as_bytes())
    }

    /// Read a footprint from a file.
    pub fn read_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        let mut reader = BufReader::new(file);
        Self::read_from_reader(&mut reader)
    }

    /// Read a footprint from bytes.
    pub fn read_from_bytes(data: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(data)
            .map_err(|e| Error::DecodeError(format!("invalid UTF-8: {e}")))?;
        let mut lines = text.lines().peekable();
        let version = find_and_parse_int(&mut lines, "Footprint Version ")?;
        if version != FOOTPRINT_VERSION {
            return Err(Error::DecodeError(format!(
                "invalid Footprint version: {version}"
            )));
        }
        let spans = parse_catalog(&mut lines)?;
        let peaks = parse_catalog(&mut lines)?;
        Self::read_catalogs(&spans, &peaks)
    }

    /// Write the footprint to a writer.
    pub fn write_to_writer(&self, writer: &mut impl Write) -> Result<()> {
        let (spans, peaks) = self.write_catalogs()?;
        writeln!(writer, "\nFootprint Version {FOOTPRINT_VERSION}")?;
        write_catalog(writer, &spans)?;
        write_catalog(writer, &peaks)
    }

    /// Write the footprint to a file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        self.write_to_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write the footprint to bytes.
    pub fn write_to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_to_writer(&mut buf)?;
        Ok(buf)
    }
}

/// Columns of a legacy peak table with no place in the minimal schema
fn legacy_extra_columns(schema: &Schema) -> Vec<&str> {
    schema
        .fields()
        .iter()
        .map(|f| f.name.as_str())
        .filter(|name| !LEGACY_PEAK_FIELDS.contains(name))
        .collect()
}

fn read_peaks(cat: &Catalog) -> Result<PeakCatalog> {
    let schema = cat.schema();
    if MINIMAL_PEAK_FIELDS
        .iter()
        .all(|name| schema.index_of(name).is_some())
    {
        return read_current_peaks(cat);
    }

    if !LEGACY_PEAK_FIELDS
        .iter()
        .all(|name| schema.index_of(name).is_some())
    {
        return Err(Error::SchemaMismatch(
            "peak catalog matches neither the current nor the legacy schema".into(),
        ));
    }
    let dropped = legacy_extra_columns(schema);
    if dropped.is_empty() {
        warn!("reading {} peaks from a legacy (x, y, value) peak table", cat.len());
    } else {
        warn!(
            "reading {} peaks from a legacy (x, y, value) peak table, dropping columns {}",
            cat.len(),
            dropped.join(", ")
        );
    }
    let [cx, cy, cv] = [
        column(schema, LEGACY_PEAK_FIELDS[0])?,
        column(schema, LEGACY_PEAK_FIELDS[1])?,
        column(schema, LEGACY_PEAK_FIELDS[2])?,
    ];
    let mut peaks = PeakCatalog::minimal();
    for row in cat.rows() {
        peaks.add(float_cell(row, cx)?, float_cell(row, cy)?, float_cell(row, cv)?);
    }
    Ok(peaks)
}

fn read_current_peaks(cat: &Catalog) -> Result<PeakCatalog> {
    let schema = cat.schema();
    let minimal: Vec<usize> = MINIMAL_PEAK_FIELDS
        .iter()
        .map(|name| column(schema, name))
        .collect::<Result<_>>()?;
    let extra: Vec<(usize, &str)> = schema
        .fields()
        .iter()
        .enumerate()
        .filter(|(_, f)| !MINIMAL_PEAK_FIELDS.contains(&f.name.as_str()))
        .map(|(i, f)| (i, f.name.as_str()))
        .collect();
    let peak_schema = PeakSchema::with_extra_fields(extra.iter().map(|&(_, n)| n.to_string()))?;

    let mut peaks = PeakCatalog::new(Arc::new(peak_schema));
    for row in cat.rows() {
        peaks.push(PeakRecord {
            ix: int_cell(row, minimal[0])?,
            iy: int_cell(row, minimal[1])?,
            fx: float_cell(row, minimal[2])?,
            fy: float_cell(row, minimal[3])?,
            peak_value: float_cell(row, minimal[4])?,
            extra: extra
                .iter()
                .map(|&(i, _)| float_cell(row, i))
                .collect::<Result<_>>()?,
        })?;
    }
    Ok(peaks)
}
