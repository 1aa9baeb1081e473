//! Catalog - a table of typed columns
//!
//! The persistence service for footprints: a [`Schema`] of named integer
//! or float columns and a sequence of rows holding one [`FieldValue`] per
//! column. See [`serial`] for the text format.

pub mod serial;

use crate::error::{Error, Result};

/// Column type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Int,
    Float,
}

impl FieldType {
    fn as_str(self) -> &'static str {
        match self {
            FieldType::Int => "int",
            FieldType::Float => "float",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "int" => Some(FieldType::Int),
            "float" => Some(FieldType::Float),
            _ => None,
        }
    }
}

/// A named, typed column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub ty: FieldType,
}

/// Ordered set of columns
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty, already used, or contains
    /// characters reserved by the text format (`,` `=` or whitespace).
    pub fn add_field(&mut self, name: &str, ty: FieldType) -> Result<usize> {
        if name.is_empty() || name.contains([',', '=']) || name.contains(char::is_whitespace) {
            return Err(Error::InvalidParameter(format!(
                "invalid field name '{name}'"
            )));
        }
        if self.index_of(name).is_some() {
            return Err(Error::InvalidParameter(format!(
                "duplicate field name '{name}'"
            )));
        }
        self.fields.push(Field {
            name: name.to_string(),
            ty,
        });
        Ok(self.fields.len() - 1)
    }

    /// Builder form of [`add_field`](Self::add_field)
    pub fn with_field(mut self, name: &str, ty: FieldType) -> Result<Self> {
        self.add_field(name, ty)?;
        Ok(self)
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Column index of `name`
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Check whether the schema has exactly these column names, in order
    pub fn has_names(&self, names: &[&str]) -> bool {
        self.fields.len() == names.len()
            && self.fields.iter().zip(names).all(|(f, n)| f.name == *n)
    }
}

/// A single cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
}

impl FieldValue {
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValue::Int(_) => FieldType::Int,
            FieldValue::Float(_) => FieldType::Float,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            FieldValue::Int(v) => v as f64,
            FieldValue::Float(v) => v,
        }
    }
}

/// A table of rows sharing one schema
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    schema: Schema,
    rows: Vec<Vec<FieldValue>>,
}

impl Catalog {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
        }
    }

    pub fn with_capacity(schema: Schema, n: usize) -> Self {
        Self {
            schema,
            rows: Vec::with_capacity(n),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a row
    ///
    /// # Errors
    ///
    /// Returns `SchemaMismatch` if the row's length or cell types don't
    /// match the schema.
    pub fn push_row(&mut self, row: Vec<FieldValue>) -> Result<()> {
        if row.len() != self.schema.len() {
            return Err(Error::SchemaMismatch(format!(
                "row has {} cells, schema has {} fields",
                row.len(),
                self.schema.len()
            )));
        }
        for (cell, field) in row.iter().zip(&self.schema.fields) {
            if cell.field_type() != field.ty {
                return Err(Error::SchemaMismatch(format!(
                    "field '{}' expects {}, got {}",
                    field.name,
                    field.ty.as_str(),
                    cell.field_type().as_str()
                )));
            }
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn row(&self, index: usize) -> Option<&[FieldValue]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[FieldValue]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Cell at (row, column)
    ///
    /// # Errors
    ///
    /// Returns an error if either index is out of range.
    pub fn get(&self, row: usize, col: usize) -> Result<FieldValue> {
        let r = self.rows.get(row).ok_or(Error::IndexOutOfBounds {
            index: row,
            len: self.rows.len(),
        })?;
        r.get(col).copied().ok_or(Error::IndexOutOfBounds {
            index: col,
            len: r.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_rejects_bad_names() {
        let mut s = Schema::new();
        assert!(s.add_field("y", FieldType::Int).is_ok());
        assert!(s.add_field("y", FieldType::Int).is_err());
        assert!(s.add_field("a,b", FieldType::Int).is_err());
        assert!(s.add_field("a b", FieldType::Int).is_err());
        assert!(s.add_field("", FieldType::Float).is_err());
    }

    #[test]
    fn test_push_row_checks_types() {
        let schema = Schema::new()
            .with_field("y", FieldType::Int)
            .and_then(|s| s.with_field("v", FieldType::Float))
            .unwrap();
        let mut cat = Catalog::new(schema);
        assert!(cat.push_row(vec![FieldValue::Int(1)]).is_err());
        assert!(
            cat.push_row(vec![FieldValue::Float(1.0), FieldValue::Float(2.0)])
                .is_err()
        );
        cat.push_row(vec![FieldValue::Int(1), FieldValue::Float(2.5)])
            .unwrap();
        assert_eq!(cat.get(0, 1).unwrap(), FieldValue::Float(2.5));
        assert!(cat.get(1, 0).is_err());
        assert!(cat.schema().has_names(&["y", "v"]));
    }
}
