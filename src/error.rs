//! # Error Module
//!
//! Two kinds of trouble can come out of a generation request:
//!
//! - [`SetlistError`] is structural and fatal. The call returns `Err` and no
//!   partial setlist is produced.
//! - [`Warning`] is a per-song anomaly. It is logged, collected on the
//!   [`Selection`](crate::sampler::Selection), and the call carries on.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Crate-wide result type for the library API.
pub type Result<T> = std::result::Result<T, SetlistError>;

/// Fatal errors reported to the caller before (or instead of) any output.
#[derive(Debug, Error)]
pub enum SetlistError {
    /// A generation parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A catalog cell that must be numeric or boolean could not be converted.
    #[error("invalid catalog at line {line}: column `{column}` has unusable value `{value}`")]
    InvalidCatalog {
        line: u64,
        column: &'static str,
        value: String,
    },

    /// The catalog file could not be parsed as CSV.
    #[error("failed to read catalog {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Filesystem failure while reading or writing a catalog.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SetlistError {
    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }
}

/// Recoverable anomalies met while building a selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// An include title matched no song in the catalog.
    NotFound { title: String },
    /// An include named a song that is already in the selection.
    AlreadySelected { title: String },
    /// An include would push the selection over the time budget.
    CapacityExceeded {
        title: String,
        time: f64,
        remaining: f64,
    },
    /// Songs are still eligible but none of them carries a usable weight.
    NoSamplingWeight { eligible: usize },
}

impl Warning {
    /// The include title this warning refers to, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::NotFound { title }
            | Self::AlreadySelected { title }
            | Self::CapacityExceeded { title, .. } => Some(title),
            Self::NoSamplingWeight { .. } => None,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { title } => write!(f, "`{title}' not found in catalog"),
            Self::AlreadySelected { title } => write!(f, "`{title}' already selected"),
            Self::CapacityExceeded { title, time, remaining } => write!(
                f,
                "`{title}' ({time:.1} min) exceeds remaining time ({remaining:.1} min)"
            ),
            Self::NoSamplingWeight { eligible } => write!(
                f,
                "{eligible} eligible songs left but none has a usable weight"
            ),
        }
    }
}
