//! Command handlers for the Fundbook CLI.

pub mod entries;
pub mod history;
pub mod init;
pub mod report;
