//! CSV-backed record store for one kind of fund entry.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use rust_decimal::Decimal;

use crate::error::{FundError, Result};
use crate::fs;

use super::types::{Entry, EntryKind, NewEntry, DATE_FORMAT};

/// An ordered, mutable collection of entries of one kind, persisted as a
/// full-file CSV snapshot.
///
/// Every mutation is a whole-file rewrite (not a true append). That is an
/// O(n) cost per mutation, accepted at this data scale.
pub struct RecordStore {
    path: PathBuf,
    kind: EntryKind,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>, kind: EntryKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Declared column order of the backing file.
    pub fn columns(&self) -> [&'static str; 4] {
        ["Id", self.kind.primary_column(), "Amount", "Date"]
    }

    /// Create the backing file with a header row if it does not exist.
    pub fn create_if_missing(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }
        self.save(&[])
    }

    /// Read the full snapshot.
    ///
    /// # Errors
    ///
    /// Returns `FundError::Storage` if the file is absent, its header does
    /// not carry the declared columns, or a row fails to parse.
    pub fn load(&self) -> Result<Vec<Entry>> {
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

        let mut entries = Vec::new();
        for record in reader.records() {
            entries.push(self.parse_row(&record?)?);
        }
        Ok(entries)
    }

    /// Rewrite the full snapshot (header plus one line per entry) atomically.
    pub fn save(&self, entries: &[Entry]) -> Result<()> {
        let mut writer = WriterBuilder::new().from_writer(Vec::new());
        writer.write_record(self.columns())?;
        for entry in entries {
            writer.write_record(entry.to_fields())?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| FundError::Storage(e.to_string()))?;
        fs::write_snapshot(&self.path, &bytes)?;
        Ok(())
    }

    /// The id the next appended entry will receive.
    pub fn next_id(&self) -> Result<u64> {
        Ok(next_id(&self.load()?))
    }

    /// Validate and store a new entry, returning it with its assigned id.
    pub fn append(&self, new: &NewEntry) -> Result<Entry> {
        new.validate(self.kind)?;
        let mut entries = self.load()?;
        let entry = Entry::assign(next_id(&entries), new);
        entries.push(entry.clone());
        self.save(&entries)?;
        Ok(entry)
    }

    /// Replace the entry carrying `id` with the submitted values.
    ///
    /// # Errors
    ///
    /// Returns `FundError::UnknownEntry` if no stored entry has that id.
    pub fn update(&self, id: u64, new: &NewEntry) -> Result<Entry> {
        new.validate(self.kind)?;
        let mut entries = self.load()?;
        let slot = entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or(FundError::UnknownEntry(id))?;
        *slot = Entry::assign(id, new);
        let updated = slot.clone();
        self.save(&entries)?;
        Ok(updated)
    }

    /// Remove and return the entry carrying `id`. Remaining entries keep
    /// their ids.
    pub fn delete(&self, id: u64) -> Result<Entry> {
        let mut entries = self.load()?;
        let position = entries
            .iter()
            .position(|entry| entry.id == id)
            .ok_or(FundError::UnknownEntry(id))?;
        let removed = entries.remove(position);
        self.save(&entries)?;
        Ok(removed)
    }

    /// Sum of all amounts; zero for an empty store.
    pub fn aggregate_amount(&self) -> Result<Decimal> {
        Ok(self.load()?.iter().map(|entry| entry.amount).sum())
    }

    fn parse_row(&self, record: &StringRecord) -> Result<Entry> {
        let columns = self.columns();
        let field = |index: usize| -> Result<&str> {
            record.get(index).ok_or_else(|| {
                FundError::Storage(format!(
                    "{}: row is missing the {} column",
                    self.path.display(),
                    columns[index]
                ))
            })
        };

        let id = field(0)?
            .parse::<u64>()
            .map_err(|e| self.malformed(columns[0], e))?;
        let label = field(1)?.to_string();
        let amount = field(2)?
            .parse::<Decimal>()
            .map_err(|e| self.malformed(columns[2], e))?;
        let date = NaiveDate::parse_from_str(field(3)?, DATE_FORMAT)
            .map_err(|e| self.malformed(columns[3], e))?;

        Ok(Entry {
            id,
            label,
            amount,
            date,
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

/// Next surrogate id for a snapshot: one past the highest id present,
/// starting at 1 for an empty store.
pub(crate) fn next_id(entries: &[Entry]) -> u64 {
    entries.iter().map(|entry| entry.id).max().map_or(1, |max| max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store(dir: &Path, kind: EntryKind) -> RecordStore {
        let store = RecordStore::new(dir.join("store.csv"), kind);
        store.create_if_missing().unwrap();
        store
    }

    fn new_entry(label: &str, amount: i64, date: &str) -> NewEntry {
        NewEntry::new(
            label,
            Decimal::new(amount, 0),
            NaiveDate::parse_from_str(date, DATE_FORMAT).unwrap(),
        )
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("absent.csv"), EntryKind::Collection);
        let err = store.load().unwrap_err();
        assert!(matches!(err, FundError::Storage(_)));
    }

    #[test]
    fn test_create_if_missing_writes_header_only() {
        let dir = tempdir().unwrap();
        let store = store(dir.path(), EntryKind::Expense);
        let contents = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents, "Id,Purpose,Amount,Date\n");
        assert!(store.load().unwrap().is_empty());

        // A second call must not truncate existing data.
        store.append(&new_entry("Lights", 40, "2024-09-02")).unwrap();
        store.create_if_missing().unwrap();
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn test_append_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let store = store(dir.path(), EntryKind::Collection);

        let first = store.append(&new_entry("Asha", 500, "2024-09-01")).unwrap();
        let second = store
            .append(&NewEntry::new(
                "Ravi",
                "120.75".parse::<Decimal>().unwrap(),
                NaiveDate::parse_from_str("2024-09-02", DATE_FORMAT).unwrap(),
            ))
            .unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        let loaded = store.load().unwrap();
        assert_eq!(loaded, vec![first, second]);
        assert_eq!(loaded[1].amount.to_string(), "120.75");
    }

    #[test]
    fn test_append_rejects_invalid_entry() {
        let dir = tempdir().unwrap();
        let store = store(dir.path(), EntryKind::Collection);
        assert!(store.append(&new_entry(" ", 500, "2024-09-01")).is_err());
        assert!(store.append(&new_entry("Asha", 0, "2024-09-01")).is_err());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_update_replaces_matching_id() {
        let dir = tempdir().unwrap();
        let store = store(dir.path(), EntryKind::Collection);
        let entry = store.append(&new_entry("Asha", 500, "2024-09-01")).unwrap();

        let updated = store
            .update(entry.id, &new_entry("Asha", 600, "2024-09-01"))
            .unwrap();
        assert_eq!(updated.id, entry.id);
        assert_eq!(store.load().unwrap(), vec![updated]);

        let err = store
            .update(99, &new_entry("Asha", 600, "2024-09-01"))
            .unwrap_err();
        assert!(matches!(err, FundError::UnknownEntry(99)));
    }

    #[test]
    fn test_delete_keeps_other_ids_stable() {
        let dir = tempdir().unwrap();
        let store = store(dir.path(), EntryKind::Collection);
        for (label, amount) in [("Asha", 500), ("Ravi", 120), ("Meena", 300)] {
            store.append(&new_entry(label, amount, "2024-09-01")).unwrap();
        }

        let removed = store.delete(2).unwrap();
        assert_eq!(removed.label, "Ravi");

        let remaining = store.load().unwrap();
        assert_eq!(
            remaining.iter().map(|e| e.id).collect::<Vec<_>>(),
            vec![1, 3]
        );
        assert!(matches!(
            store.delete(2).unwrap_err(),
            FundError::UnknownEntry(2)
        ));
    }

    #[test]
    fn test_next_id_is_one_past_highest() {
        let dir = tempdir().unwrap();
        let store = store(dir.path(), EntryKind::Collection);
        assert_eq!(store.next_id().unwrap(), 1);

        store.append(&new_entry("Asha", 500, "2024-09-01")).unwrap();
        store.append(&new_entry("Ravi", 250, "2024-09-01")).unwrap();
        assert_eq!(store.next_id().unwrap(), 3);

        // Only the highest id feeds the counter; deleting it frees the id.
        store.delete(1).unwrap();
        assert_eq!(store.next_id().unwrap(), 3);
        store.delete(2).unwrap();
        assert_eq!(store.next_id().unwrap(), 1);
    }

    #[test]
    fn test_aggregate_amount_empty_is_zero() {
        let dir = tempdir().unwrap();
        let store = store(dir.path(), EntryKind::Expense);
        assert_eq!(store.aggregate_amount().unwrap(), Decimal::ZERO);

        store.append(&new_entry("Lights", 40, "2024-09-02")).unwrap();
        store.append(&new_entry("Prasad", 60, "2024-09-03")).unwrap();
        assert_eq!(store.aggregate_amount().unwrap(), Decimal::new(100, 0));
    }

    #[test]
    fn test_load_rejects_wrong_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.csv");
        std::fs::write(&path, "Name,Amount,Date\n").unwrap();
        let store = RecordStore::new(&path, EntryKind::Collection);
        let err = store.load().unwrap_err();
        assert!(err.to_string().contains("expected"));
    }

    #[test]
    fn test_load_rejects_malformed_amount() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.csv");
        std::fs::write(&path, "Id,Name,Amount,Date\n1,Asha,lots,2024-09-01\n").unwrap();
        let store = RecordStore::new(&path, EntryKind::Collection);
        let err = store.load().unwrap_err();
        assert!(err.to_string().contains("Amount"));
    }
}
