//! Storage Errors

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// The database could not be opened or the connection is unusable.
    #[error("connection error: {message}")]
    Connection { message: String },

    /// A statement failed to prepare or execute.
    #[error("query error: {message}")]
    Query { message: String },

    /// A stored value could not be turned back into a catalog type.
    #[error("decode error: {message}")]
    Decode { message: String },

    #[error("internal error: {message}")]
    Internal { message: String },
}

pub type StorageResult<T> = Result<T, StorageError>;

impl StorageError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::FromSqlConversionFailure(..)
            | rusqlite::Error::InvalidColumnType(..)
            | rusqlite::Error::IntegralValueOutOfRange(..) => StorageError::Decode {
                message: err.to_string(),
            },
            other => StorageError::Query {
                message: other.to_string(),
            },
        }
    }
}
