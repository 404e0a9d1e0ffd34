//! Append-only audit log paired with a record store.
//!
//! One row per mutation ever applied to the paired store. Rows are never
//! edited or removed; there is deliberately no update or delete API here.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, WriterBuilder};
use rust_decimal::Decimal;

use crate::error::{FundError, Result};
use crate::fs;

use super::types::{Entry, EntryKind, HistoryAction, HistoryEntry, DATE_FORMAT, TIMESTAMP_FORMAT};

/// Columns every history file starts with, ahead of the entry snapshot.
const PREFIX_COLUMNS: [&str; 3] = ["Action", "Timestamp", "Username"];

/// An ordered, grow-only sequence of audit rows, persisted as a full-file
/// CSV snapshot on every append.
pub struct HistoryLog {
    path: PathBuf,
    kind: EntryKind,
}

impl HistoryLog {
    pub fn new(path: impl Into<PathBuf>, kind: EntryKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Declared column order: the three prefix columns, then the paired
    /// store's columns.
    pub fn columns(&self) -> [&'static str; 7] {
        [
            PREFIX_COLUMNS[0],
            PREFIX_COLUMNS[1],
            PREFIX_COLUMNS[2],
            "Id",
            self.kind.primary_column(),
            "Amount",
            "Date",
        ]
    }

    /// Create the backing file with a header row if it does not exist.
    pub fn create_if_missing(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }
        fs::write_snapshot(&self.path, self.header_bytes()?.as_slice())?;
        Ok(())
    }

    /// Append one audit row, stamped with the current wall-clock time.
    ///
    /// `snapshot` is the affected entry's field values in the paired store's
    /// column order (post-image for ADD/EDIT, pre-image for DELETE).
    ///
    /// # Errors
    ///
    /// Returns `FundError::SchemaMismatch` if the snapshot's field count does
    /// not equal the declared schema minus the three prefix columns. This is
    /// a hard gate: a mismatch indicates schema drift and aborts before any
    /// partial write. Returns `FundError::Storage` if the file is absent
    /// (files are pre-created at initialization) or malformed.
    pub fn append(&self, action: HistoryAction, username: &str, snapshot: &[String]) -> Result<()> {
        let expected = self.columns().len() - PREFIX_COLUMNS.len();
        if snapshot.len() != expected {
            return Err(FundError::SchemaMismatch(format!(
                "snapshot has {} fields but the schema [{}] declares {}",
                snapshot.len(),
                self.columns().join(", "),
                expected
            )));
        }

        let mut rows = self.load_raw()?;
        let timestamp = Local::now().naive_local().format(TIMESTAMP_FORMAT).to_string();
        let mut row = vec![action.as_str().to_string(), timestamp, username.to_string()];
        row.extend_from_slice(snapshot);
        rows.push(row);
        self.save_raw(&rows)
    }

    /// Read the full ordered history.
    ///
    /// # Errors
    ///
    /// Returns `FundError::Storage` if the file is absent or malformed.
    pub fn load(&self) -> Result<Vec<HistoryEntry>> {
        let mut entries = Vec::new();
        for row in self.load_raw()? {
            entries.push(self.parse_row(&row)?);
        }
        Ok(entries)
    }

    fn load_raw(&self) -> Result<Vec<Vec<String>>> {
        if !self.path.exists() {
            return Err(FundError::Storage(format!(
                "{} is missing; run `fundbook init` first",
                self.path.display()
            )));
        }
        let mut reader = ReaderBuilder::new().from_path(&self.path)?;
        let expected = self.columns();
        let headers = reader.headers()?;
        if headers.iter().ne(expected) {
            return Err(FundError::Storage(format!(
                "{} has columns [{}], expected [{}]",
                self.path.display(),
                headers.iter().collect::<Vec<_>>().join(", "),
                expected.join(", ")
            )));
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(rows)
    }

    fn save_raw(&self, rows: &[Vec<String>]) -> Result<()> {
        let mut writer = WriterBuilder::new().from_writer(Vec::new());
        writer.write_record(self.columns())?;
        for row in rows {
            writer.write_record(row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| FundError::Storage(e.to_string()))?;
        fs::write_snapshot(&self.path, &bytes)?;
        Ok(())
    }

    fn header_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = WriterBuilder::new().from_writer(Vec::new());
        writer.write_record(self.columns())?;
        writer
            .into_inner()
            .map_err(|e| FundError::Storage(e.to_string()))
    }

    fn parse_row(&self, row: &[String]) -> Result<HistoryEntry> {
        let columns = self.columns();
        if row.len() != columns.len() {
            return Err(FundError::Storage(format!(
                "{}: row has {} fields, expected {}",
                self.path.display(),
                row.len(),
                columns.len()
            )));
        }

        let action = row[0].parse::<HistoryAction>()?;
        let timestamp = NaiveDateTime::parse_from_str(&row[1], TIMESTAMP_FORMAT)
            .map_err(|e| self.malformed(columns[1], e))?;
        let id = row[3]
            .parse::<u64>()
            .map_err(|e| self.malformed(columns[3], e))?;
        let amount = row[5]
            .parse::<Decimal>()
            .map_err(|e| self.malformed(columns[5], e))?;
        let date = NaiveDate::parse_from_str(&row[6], DATE_FORMAT)
            .map_err(|e| self.malformed(columns[6], e))?;

        Ok(HistoryEntry {
            action,
            timestamp,
            username: row[2].clone(),
            snapshot: Entry {
                id,
                label: row[4].clone(),
                amount,
                date,
            },
        })
    }

    fn malformed(&self, column: &str, err: impl std::fmt::Display) -> FundError {
        FundError::Storage(format!(
            "{}: malformed {} value: {}",
            self.path.display(),
            column,
            err
        ))
    }
}
