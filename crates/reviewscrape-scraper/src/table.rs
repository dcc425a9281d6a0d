//! CSV serialization of record lists.
//!
//! The column set is a [`TableSchema`] value. [`serialize`] derives it from
//! the first record; [`serialize_with`] takes it from the caller.

use std::collections::HashMap;

use reviewscrape_core::{LodgingReview, NormalizedReviewRecord};

use crate::error::ScraperError;

/// A record viewed as ordered `(column, value)` pairs.
pub trait ToRow {
    fn row(&self) -> Vec<(String, String)>;
}

impl ToRow for NormalizedReviewRecord {
    fn row(&self) -> Vec<(String, String)> {
        let opt = |v: Option<&str>| v.unwrap_or_default().to_owned();
        let values = [
            self.entity_name.clone(),
            self.entity_id.clone(),
            self.title.clone(),
            self.content.clone(),
            self.rating.map(|r| r.to_string()).unwrap_or_default(),
            opt(self.date_of_visit.as_deref()),
            opt(self.rating_date.as_deref()),
        ];
        Self::COLUMNS
            .iter()
            .map(|c| (*c).to_owned())
            .zip(values)
            .collect()
    }
}

impl ToRow for LodgingReview {
    fn row(&self) -> Vec<(String, String)> {
        vec![
            ("title".to_owned(), self.title.clone()),
            ("content".to_owned(), self.content.clone()),
        ]
    }
}

impl ToRow for Vec<(String, String)> {
    fn row(&self) -> Vec<(String, String)> {
        self.clone()
    }
}

/// Ordered column names of an output table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    columns: Vec<String>,
}

impl TableSchema {
    #[must_use]
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Takes the columns of the first record, in that record's order.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Serialization`] when `records` is empty.
    pub fn from_first<R: ToRow>(records: &[R]) -> Result<Self, ScraperError> {
        let first = records.first().ok_or_else(|| {
            ScraperError::Serialization("no records to derive columns from".to_owned())
        })?;
        Ok(Self::new(first.row().into_iter().map(|(column, _)| column)))
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

/// Serializes `records` with the columns of the first record.
///
/// Later records' values for other columns are dropped; columns a later
/// record lacks are written as empty cells.
///
/// # Errors
///
/// Returns [`ScraperError::Serialization`] when `records` is empty or the
/// CSV writer fails.
pub fn serialize<R: ToRow>(records: &[R]) -> Result<String, ScraperError> {
    let schema = TableSchema::from_first(records)?;
    serialize_with(&schema, records)
}

/// Serializes `records` with an explicit column set. An empty record list
/// gives a header-only table.
///
/// # Errors
///
/// Returns [`ScraperError::Serialization`] if the CSV writer fails.
pub fn serialize_with<R: ToRow>(schema: &TableSchema, records: &[R]) -> Result<String, ScraperError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(schema.columns()).map_err(serialization_failure)?;

    for record in records {
        let mut cells: HashMap<String, String> = record.row().into_iter().collect();
        let line: Vec<String> = schema
            .columns()
            .iter()
            .map(|column| cells.remove(column).unwrap_or_default())
            .collect();
        writer.write_record(&line).map_err(serialization_failure)?;
    }

    let bytes = writer.into_inner().map_err(serialization_failure)?;
    String::from_utf8(bytes).map_err(serialization_failure)
}

fn serialization_failure(e: impl std::fmt::Display) -> ScraperError {
    ScraperError::Serialization(e.to_string())
}
