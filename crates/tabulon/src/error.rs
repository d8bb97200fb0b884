//! Error type for table construction.
//!
//! Cell resolution itself has no recoverable failure modes: accessor and
//! renderer closures are programmer-supplied and any panic inside them
//! aborts the build. The error type covers the fallible edges around the
//! core, currently record and configuration deserialization.

use std::fmt;

/// Error type for table construction operations.
#[derive(Debug)]
pub enum TableError {
    /// Record or configuration data could not be (de)serialized.
    Serialization(String),
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::Serialization(msg) => write!(f, "serialization error: {}", msg),
        }
    }
}

impl std::error::Error for TableError {}

impl From<serde_json::Error> for TableError {
    fn from(err: serde_json::Error) -> Self {
        TableError::Serialization(err.to_string())
    }
}
