//! Peak records attached to a footprint
//!
//! A peak is an integer pixel position, a sub-pixel position and a value,
//! optionally followed by caller-defined float fields. Records live in a
//! [`PeakCatalog`] whose [`PeakSchema`] is shared between copies; the
//! records themselves are always deep-copied.

use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::sync::Arc;

/// Names of the fields every peak carries, in column order.
pub const MINIMAL_PEAK_FIELDS: [&str; 5] = ["i.x", "i.y", "f.x", "f.y", "peakValue"];

/// Column layout of a peak catalog.
///
/// The minimal fields always come first; `extra` names any additional
/// float-valued columns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PeakSchema {
    extra: Vec<String>,
}

impl PeakSchema {
    /// Schema with only the minimal fields
    pub fn minimal() -> Self {
        Self::default()
    }

    /// Schema with additional float fields appended after the minimal ones
    ///
    /// # Errors
    ///
    /// Returns an error if a name is empty, duplicated, or collides with a
    /// minimal field.
    pub fn with_extra_fields<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut extra: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            if name.is_empty()
                || MINIMAL_PEAK_FIELDS.contains(&name.as_str())
                || extra.contains(&name)
            {
                return Err(Error::InvalidParameter(format!(
                    "invalid peak field name '{name}'"
                )));
            }
            extra.push(name);
        }
        Ok(Self { extra })
    }

    /// Names of the additional float fields
    pub fn extra_fields(&self) -> &[String] {
        &self.extra
    }

    /// All field names in column order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        MINIMAL_PEAK_FIELDS
            .iter()
            .copied()
            .chain(self.extra.iter().map(String::as_str))
    }

    /// Look up a float-valued key by field name
    pub fn key(&self, name: &str) -> Option<PeakKey> {
        match name {
            "peakValue" => Some(PeakKey::PeakValue),
            "f.x" => Some(PeakKey::Fx),
            "f.y" => Some(PeakKey::Fy),
            _ => self
                .extra
                .iter()
                .position(|n| n == name)
                .map(PeakKey::Extra),
        }
    }
}

/// A float-valued peak field usable as a sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PeakKey {
    #[default]
    PeakValue,
    Fx,
    Fy,
    /// Index into the schema's extra fields
    Extra(usize),
}

/// A single peak.
#[derive(Debug, Clone, PartialEq)]
pub struct PeakRecord {
    pub ix: i32,
    pub iy: i32,
    pub fx: f32,
    pub fy: f32,
    pub peak_value: f32,
    pub extra: Vec<f32>,
}

impl PeakRecord {
    /// Value of a float key; missing extra fields read as NaN
    pub fn get(&self, key: PeakKey) -> f32 {
        match key {
            PeakKey::PeakValue => self.peak_value,
            PeakKey::Fx => self.fx,
            PeakKey::Fy => self.fy,
            PeakKey::Extra(i) => self.extra.get(i).copied().unwrap_or(f32::NAN),
        }
    }
}

/// An ordered, appendable collection of peaks sharing one schema.
#[derive(Debug, Clone, Default)]
pub struct PeakCatalog {
    schema: Arc<PeakSchema>,
    records: Vec<PeakRecord>,
}

impl PeakCatalog {
    /// Create an empty catalog with the given schema
    pub fn new(schema: Arc<PeakSchema>) -> Self {
        Self {
            schema,
            records: Vec::new(),
        }
    }

    /// Create an empty catalog with the minimal schema
    pub fn minimal() -> Self {
        Self::default()
    }

    /// The shared schema
    pub fn schema(&self) -> &Arc<PeakSchema> {
        &self.schema
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PeakRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PeakRecord> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[PeakRecord] {
        &self.records
    }

    /// Append a peak at sub-pixel position (fx, fy).
    ///
    /// The integer position is the truncation of the float position; extra
    /// fields are initialised to NaN.
    pub fn add(&mut self, fx: f32, fy: f32, peak_value: f32) -> &mut PeakRecord {
        let n_extra = self.schema.extra.len();
        self.records.push(PeakRecord {
            ix: fx as i32,
            iy: fy as i32,
            fx,
            fy,
            peak_value,
            extra: vec![f32::NAN; n_extra],
        });
        let last = self.records.len() - 1;
        &mut self.records[last]
    }

    /// Append a fully specified record
    ///
    /// # Errors
    ///
    /// Returns an error if the record's extra fields don't match the schema.
    pub fn push(&mut self, record: PeakRecord) -> Result<()> {
        if record.extra.len() != self.schema.extra.len() {
            return Err(Error::SchemaMismatch(format!(
                "peak has {} extra fields, schema has {}",
                record.extra.len(),
                self.schema.extra.len()
            )));
        }
        self.records.push(record);
        Ok(())
    }

    /// Append every record of `other`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if both catalogs hold records and their
    /// schemas differ. An empty `other` is always accepted, and an empty
    /// `self` adopts `other`'s schema.
    pub fn extend_from(&mut self, other: &PeakCatalog) -> Result<()> {
        if other.is_empty() {
            return Ok(());
        }
        if self.is_empty() {
            self.schema = Arc::clone(&other.schema);
        } else if self.schema != other.schema {
            return Err(Error::InvalidParameter(
                "cannot merge peak catalogs with different schemas".into(),
            ));
        }
        self.records.extend(other.records.iter().cloned());
        Ok(())
    }

    /// Keep only the records for which `f` returns true
    pub fn retain(&mut self, f: impl FnMut(&PeakRecord) -> bool) {
        self.records.retain(f);
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Apply `f` to every record in place
    pub fn for_each_mut(&mut self, f: impl FnMut(&mut PeakRecord)) {
        self.records.iter_mut().for_each(f);
    }

    /// Sort from most positive to most negative value of `key`.
    ///
    /// The sort is stable; NaN values sort last.
    pub fn sort_by_key(&mut self, key: PeakKey) {
        self.records
            .sort_by(|a, b| descending_nan_last(a.get(key), b.get(key)));
    }
}

fn descending_nan_last(a: f32, b: f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.total_cmp(&a),
    }
}

impl<'a> IntoIterator for &'a PeakCatalog {
    type Item = &'a PeakRecord;
    type IntoIter = std::slice::Iter<'a, PeakRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
