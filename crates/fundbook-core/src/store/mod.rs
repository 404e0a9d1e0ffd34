//! File-backed stores for fund entries and their audit history.
//!
//! Each `EntryKind` is persisted as a pair of CSV files: a mutable record
//! store (grows and shrinks) and an append-only history log (grows only).
//! Both are full-file snapshots: a mutation reads everything, changes it in
//! memory, and rewrites the file through an atomic rename. No locking exists;
//! the design assumes a single active writer session.

mod history;
mod record;
mod types;

pub use history::HistoryLog;
pub use record::RecordStore;
pub use types::{
    Entry, EntryKind, HistoryAction, HistoryEntry, NewEntry, Totals, DATE_FORMAT, TIMESTAMP_FORMAT,
};

pub(crate) use record::next_id;
