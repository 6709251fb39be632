//! Input and output record types.

use serde::Serialize;
use std::fmt;

use super::schema::{self, OUTPUT_SCHEMA, SCHEMA_LEN};

/// One input row keyed by the input file's header names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputRecord {
    fields: Vec<(String, String)>,
}

impl InputRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from header names and cell values.
    ///
    /// Missing trailing cells become empty strings.
    pub fn from_row(headers: &[String], values: &[String]) -> Self {
        let fields = headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                let value = values.get(i).map(|v| v.trim()).unwrap_or("");
                (header.clone(), value.to_string())
            })
            .collect();
        Self { fields }
    }

    /// Set a field, replacing any existing value under the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(field) => field.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Value of a field. With duplicate headers the rightmost column wins.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for InputRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}

/// Outcome of the remote lookup for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    Success,
    Error(String),
}

impl FetchStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("SUCCESS"),
            Self::Error(message) => write!(f, "ERROR: {}", message),
        }
    }
}

/// A row conforming to `OUTPUT_SCHEMA`: one value per column, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRecord {
    values: Vec<String>,
}

impl OutputRecord {
    /// A record with every column empty.
    pub fn blank() -> Self {
        Self {
            values: vec![String::new(); SCHEMA_LEN],
        }
    }

    /// Set a schema column. Returns `false` when `column` is not in the schema.
    pub fn set(&mut self, column: &str, value: impl Into<String>) -> bool {
        match schema::position(column) {
            Some(i) => {
                self.values[i] = value.into();
                true
            }
            None => false,
        }
    }

    /// Value of a schema column.
    pub fn get(&self, column: &str) -> Option<&str> {
        schema::position(column).map(|i| self.values[i].as_str())
    }

    /// `(column, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        OUTPUT_SCHEMA
            .iter()
            .copied()
            .zip(self.values.iter().map(String::as_str))
    }

    /// Values in schema order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn fetch_status(&self) -> &str {
        self.get(schema::FETCH_STATUS).unwrap_or_default()
    }

    pub fn is_error(&self) -> bool {
        self.fetch_status().starts_with("ERROR:")
    }
}
