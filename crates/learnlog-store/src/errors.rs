//! Mapping of SQLite failures onto the journal error taxonomy

use learnlog_core::errors::JournalError;
use rusqlite::ErrorCode;

pub use learnlog_core::errors::Result;

/// Any backend failure we have no more specific mapping for
pub fn from_rusqlite(err: rusqlite::Error) -> JournalError {
    JournalError::StorageUnavailable {
        message: err.to_string(),
    }
}

pub fn io_error(operation: &str, err: std::io::Error) -> JournalError {
    JournalError::StorageUnavailable {
        message: format!("{}: {}", operation, err),
    }
}

pub fn migration_error(migration_id: &str, reason: &str) -> JournalError {
    JournalError::StorageUnavailable {
        message: format!("Migration {} failed: {}", migration_id, reason),
    }
}

/// An applied migration no longer matches the embedded SQL
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> JournalError {
    JournalError::Internal {
        message: format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ),
    }
}

/// Whether `err` is a UNIQUE violation on `table.column`
pub fn is_unique_violation(err: &rusqlite::Error, column: &str) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, Some(msg)) => {
            e.code == ErrorCode::ConstraintViolation
                && msg.starts_with("UNIQUE constraint failed")
                && msg.contains(column)
        }
        _ => false,
    }
}

pub fn is_foreign_key_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, msg) => {
            e.code == ErrorCode::ConstraintViolation
                && msg
                    .as_deref()
                    .is_some_and(|m| m.starts_with("FOREIGN KEY constraint failed"))
        }
        _ => false,
    }
}
