// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use hearing_sync::CaseStoreError;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersistenceError {
    /// A database error occurred.
    #[error("Database error: {0}")]
    DatabaseError(String),
    /// Database connection failed.
    #[error("Database connection failed: {0}")]
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),
    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),
    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// Initialization error.
    #[error("Initialization error: {0}")]
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    #[error("Foreign key enforcement is not enabled")]
    ForeignKeyEnforcementNotEnabled,
    /// The connection lock was poisoned by a panicking writer.
    #[error("Connection lock poisoned")]
    LockPoisoned,
    /// The requested case was not found.
    #[error("Case not found: {0}")]
    CaseNotFound(String),
    /// The case is no longer at the expected version.
    #[error("Case {case_id} is not at version {expected_version}")]
    VersionConflict {
        case_id: String,
        expected_version: i64,
    },
}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        Self::DatabaseError(err.to_string())
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<PersistenceError> for CaseStoreError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::CaseNotFound(case_id) => Self::NotFound { case_id },
            PersistenceError::VersionConflict {
                case_id,
                expected_version,
            } => Self::Conflict {
                case_id,
                expected_version,
            },
            other => Self::Backend(other.to_string()),
        }
    }
}
