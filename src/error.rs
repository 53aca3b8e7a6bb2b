//! Error type for table construction and resolution.

use std::error::Error;
use std::fmt;

/// Everything that can go wrong while building or rolling a table.
#[derive(Debug, Clone, PartialEq)]
pub enum TableError {
    /// An entry was supplied with a non-positive or non-finite weight.
    InvalidWeight { weight: f64 },
    /// A rebuild produced a range too narrow (or starting too high) to ever
    /// be selected. The offending bounds are reported as computed.
    DegenerateRange { low: f64, high: f64 },
    /// A roll was attempted against a table with no entries.
    EmptyTable,
    /// No entry's range contained the supplied probability value. Indicates
    /// a `p` outside [0, 1] (or NaN); unreachable for valid input against a
    /// consistent table.
    NoMatch { p: f64 },
    /// `populate` was called while a populate scope was already active.
    BatchAlreadyActive,
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::InvalidWeight { weight } => {
                write!(f, "entry weight must be positive and finite, got {weight}")
            }
            TableError::DegenerateRange { low, high } => {
                write!(f, "entry range {low} -> {high} is too narrow to ever be rolled")
            }
            TableError::EmptyTable => write!(f, "attempting to roll an empty table"),
            TableError::NoMatch { p } => {
                write!(f, "no entry range contains p = {p}; p must be between 0 and 1")
            }
            TableError::BatchAlreadyActive => {
                write!(f, "populate scopes cannot be nested")
            }
        }
    }
}

impl Error for TableError {}
