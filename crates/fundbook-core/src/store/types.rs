//! Core data types for the fund ledger.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{FundError, Result};

/// On-disk date format (`2024-09-01`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// On-disk audit timestamp format, second precision (`2024-09-01 18:04:33`).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The two kinds of fund entries, each backed by its own store/history
/// file pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Collection,
    Expense,
}

impl EntryKind {
    /// Header label of the kind-specific primary column.
    pub fn primary_column(&self) -> &'static str {
        match self {
            EntryKind::Collection => "Name",
            EntryKind::Expense => "Purpose",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Collection => "collection",
            EntryKind::Expense => "expense",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A prospective entry, before an id has been assigned.
///
/// Carries the validation rules shared by both kinds: the primary field must
/// be non-empty after trimming, and the amount must be positive.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    /// The Name (collections) or Purpose (expenses) value.
    pub label: String,
    pub amount: Decimal,
    pub date: NaiveDate,
}

impl NewEntry {
    pub fn new(label: impl Into<String>, amount: Decimal, date: NaiveDate) -> Self {
        Self {
            label: label.into(),
            amount,
            date,
        }
    }

    /// Check the entry invariants.
    ///
    /// # Errors
    ///
    /// Returns `FundError::Validation` if the trimmed label is empty or the
    /// amount is not positive. Nothing is written when this fails.
    pub fn validate(&self, kind: EntryKind) -> Result<()> {
        if self.label.trim().is_empty() {
            return Err(FundError::Validation(format!(
                "{} must not be empty",
                kind.primary_column()
            )));
        }
        if self.amount <= Decimal::ZERO {
            return Err(FundError::Validation(format!(
                "Amount must be positive, got {}",
                self.amount
            )));
        }
        Ok(())
    }
}

/// One stored collection or expense row.
///
/// The id is a surrogate key assigned at creation time, independent of row
/// position. Deleting an entry never renumbers the others.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub id: u64,
    /// The Name (collections) or Purpose (expenses) value, trimmed.
    pub label: String,
    pub amount: Decimal,
    pub date: NaiveDate,
}

impl Entry {
    /// Bind a validated `NewEntry` to an id, trimming the label.
    pub(crate) fn assign(id: u64, new: &NewEntry) -> Self {
        Self {
            id,
            label: new.label.trim().to_string(),
            amount: new.amount,
            date: new.date,
        }
    }

    /// Field values in declared column order: Id, Name/Purpose, Amount, Date.
    pub fn to_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.label.clone(),
            self.amount.to_string(),
            self.date.format(DATE_FORMAT).to_string(),
        ]
    }

    /// Whether the stored values equal the submitted ones. Used to detect
    /// no-op edits, which must not grow the history log.
    pub fn matches(&self, new: &NewEntry) -> bool {
        self.label == new.label.trim() && self.amount == new.amount && self.date == new.date
    }
}

/// Mutation verbs recorded in the history log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HistoryAction {
    Add,
    Edit,
    Delete,
}

impl HistoryAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryAction::Add => "ADD",
            HistoryAction::Edit => "EDIT",
            HistoryAction::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for HistoryAction {
    type Err = FundError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ADD" => Ok(HistoryAction::Add),
            "EDIT" => Ok(HistoryAction::Edit),
            "DELETE" => Ok(HistoryAction::Delete),
            other => Err(FundError::Storage(format!(
                "unknown history action: {other}"
            ))),
        }
    }
}

/// Immutable audit record of one mutation. Never edited or removed once
/// appended.
///
/// The snapshot is the entry's post-image for ADD and EDIT, and its
/// pre-image for DELETE.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub action: HistoryAction,
    pub timestamp: NaiveDateTime,
    pub username: String,
    pub snapshot: Entry,
}

/// Aggregate totals across both stores, recomputed on demand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
    pub collected: Decimal,
    pub spent: Decimal,
    /// Always `collected - spent`.
    pub balance: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_validate_rejects_blank_label() {
        let new = NewEntry::new("   ", Decimal::new(100, 0), date("2024-09-01"));
        let err = new.validate(EntryKind::Collection).unwrap_err();
        assert!(matches!(err, FundError::Validation(_)));
        assert!(err.to_string().contains("Name"));

        let err = new.validate(EntryKind::Expense).unwrap_err();
        assert!(err.to_string().contains("Purpose"));
    }

    #[test]
    fn test_validate_rejects_non_positive_amount() {
        for amount in [Decimal::ZERO, Decimal::new(-5, 0)] {
            let new = NewEntry::new("Asha", amount, date("2024-09-01"));
            let err = new.validate(EntryKind::Collection).unwrap_err();
            assert!(matches!(err, FundError::Validation(_)));
        }
    }

    #[test]
    fn test_assign_trims_label() {
        let new = NewEntry::new("  Asha ", Decimal::new(500, 0), date("2024-09-01"));
        let entry = Entry::assign(1, &new);
        assert_eq!(entry.label, "Asha");
        assert!(entry.matches(&new));
    }

    #[test]
    fn test_entry_fields_in_column_order() {
        let entry = Entry::assign(
            7,
            &NewEntry::new("Lights", Decimal::new(2550, 2), date("2024-09-03")),
        );
        assert_eq!(entry.to_fields(), ["7", "Lights", "25.50", "2024-09-03"]);
    }

    #[test]
    fn test_history_action_round_trip() {
        for action in [HistoryAction::Add, HistoryAction::Edit, HistoryAction::Delete] {
            assert_eq!(action.as_str().parse::<HistoryAction>().unwrap(), action);
        }
        assert!("add".parse::<HistoryAction>().is_err());
    }
}
