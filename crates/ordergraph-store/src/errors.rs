//! Error helpers for ordergraph-store
//!
//! The store speaks `ExError` from ordergraph-core; these helpers build the
//! store-specific variants.

use ordergraph_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// A migration script failed to apply
pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// An applied migration no longer matches the embedded script
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::IllegalState)
        .with_op("migration_checksum")
        .with_entity_id(migration_id)
        .with_message(format!(
            "Checksum mismatch for migration {}: recorded {}, embedded {}",
            migration_id, expected, actual
        ))
}

/// Seed document is structurally valid YAML but semantically wrong
pub fn seed_validation(reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("seed_parse")
        .with_message(reason.to_string())
}

/// Longest rusqlite message carried into an `ExError`
///
/// Input errors quote the whole statement; the full SQL is in the session's
/// debug log.
pub const MAX_MESSAGE_LEN: usize = 512;

/// Any other rusqlite failure
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(truncated(err.to_string()))
}

fn truncated(mut message: String) -> String {
    if message.len() <= MAX_MESSAGE_LEN {
        return message;
    }
    let mut end = MAX_MESSAGE_LEN;
    while !message.is_char_boundary(end) {
        end -= 1;
    }
    message.truncate(end);
    message.push_str("...");
    message
}

pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Whether `err` is a UNIQUE / PRIMARY KEY constraint violation
pub fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation
                && (e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                    || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rusqlite_is_persistence() {
        let err = from_rusqlite(rusqlite::Error::QueryReturnedNoRows);
        assert_eq!(err.kind(), ExErrorKind::Persistence);
        assert_eq!(err.op(), Some("sqlite"));
        assert!(err.kind().is_transient());
    }

    #[test]
    fn test_from_rusqlite_truncates_long_messages() {
        let column = format!("é{}", "x".repeat(10 * MAX_MESSAGE_LEN));
        let err = from_rusqlite(rusqlite::Error::InvalidColumnName(column));

        assert!(err.message().len() <= MAX_MESSAGE_LEN + 3);
        assert!(err.message().ends_with("..."));
    }

    #[test]
    fn test_from_rusqlite_keeps_short_messages() {
        let err = from_rusqlite(rusqlite::Error::InvalidColumnName("name".to_string()));
        assert!(err.message().contains("name"));
        assert!(!err.message().ends_with("..."));
    }

    #[test]
    fn test_checksum_mismatch_names_migration() {
        let err = checksum_mismatch("001_initial_schema", "aa", "bb");
        assert_eq!(err.kind(), ExErrorKind::IllegalState);
        assert_eq!(err.entity_id(), Some("001_initial_schema"));
    }

    #[test]
    fn test_unique_violation_detected() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (name TEXT UNIQUE); INSERT INTO t VALUES ('a');")
            .unwrap();
        let err = conn
            .execute("INSERT INTO t VALUES ('a')", [])
            .unwrap_err();
        assert!(is_unique_violation(&err));
        assert!(!is_unique_violation(&rusqlite::Error::QueryReturnedNoRows));
    }
}
