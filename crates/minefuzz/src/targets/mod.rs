//! The contract of the five mining utilities under test.
//!
//! The harness never calls the utilities directly. It goes through the
//! [`MiningTargets`] trait so any implementation can be fuzzed, and ships
//! [`ReferenceMining`] as the well-behaved default.

mod reference;

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::invoke::FailureKind;

pub use reference::{ReferenceMining, TIMESTAMP_FORMAT};

/// Error raised by a function under test.
#[derive(Debug, Error)]
pub enum TargetError {
    /// Filesystem failure inside the target.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An argument outside the function's domain.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Operands of a kind the function cannot combine.
    #[error("Unsupported operand types: {left} and {right}")]
    UnsupportedOperand {
        left: DateArgKind,
        right: DateArgKind,
    },
}

impl TargetError {
    /// The failure kind this error is recorded under.
    pub fn kind(&self) -> FailureKind {
        match self {
            TargetError::Io { .. } => FailureKind::Io,
            TargetError::InvalidArgument(_) => FailureKind::InvalidArgument,
            TargetError::UnsupportedOperand { .. } => FailureKind::UnsupportedOperand,
        }
    }
}

/// Result type alias for target functions.
pub type TargetResult<T> = std::result::Result<T, TargetError>;

/// Operand for the date-difference function.
///
/// Well-formed operands are [`DateArg::DateTime`]; the remaining variants are
/// the adversarial shapes used to test type robustness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DateArg {
    /// A calendar datetime.
    DateTime(NaiveDateTime),
    /// Arbitrary short text.
    Text(String),
    /// ISO-8601 rendering of a datetime.
    IsoText(String),
    /// An integer where a date is expected.
    Integer(i64),
    /// Absence of a value.
    Null,
}

impl DateArg {
    pub fn kind(&self) -> DateArgKind {
        match self {
            DateArg::DateTime(_) => DateArgKind::DateTime,
            DateArg::Text(_) => DateArgKind::Text,
            DateArg::IsoText(_) => DateArgKind::IsoText,
            DateArg::Integer(_) => DateArgKind::Integer,
            DateArg::Null => DateArgKind::Null,
        }
    }

    /// The datetime, if this operand is well-formed.
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            DateArg::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }
}

impl fmt::Display for DateArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateArg::DateTime(dt) => write!(f, "datetime({})", dt.format("%Y-%m-%d %H:%M:%S")),
            DateArg::Text(s) | DateArg::IsoText(s) => write!(f, "{:?}", s),
            DateArg::Integer(n) => write!(f, "{}", n),
            DateArg::Null => write!(f, "null"),
        }
    }
}

/// Kind tag of a [`DateArg`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateArgKind {
    DateTime,
    Text,
    IsoText,
    Integer,
    Null,
}

impl DateArgKind {
    pub fn label(&self) -> &'static str {
        match self {
            DateArgKind::DateTime => "datetime",
            DateArgKind::Text => "text",
            DateArgKind::IsoText => "iso_text",
            DateArgKind::Integer => "integer",
            DateArgKind::Null => "null",
        }
    }
}

impl fmt::Display for DateArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The five mining utilities the harness fuzzes.
pub trait MiningTargets {
    /// Format the current time as text.
    fn give_timestamp(&self) -> TargetResult<String>;

    /// Remove the directory tree at `path` if present.
    ///
    /// Must not fail when `path` does not exist. `label` is a free-form tag.
    fn delete_repo(&self, path: &Path, label: &str) -> TargetResult<()>;

    /// Write `content` to `path` and return the number of bytes written.
    fn dump_content(&self, content: &str, path: &Path) -> TargetResult<u64>;

    /// Split `items` into contiguous groups of at most `size` elements.
    fn make_chunks(&self, items: &[i64], size: usize) -> TargetResult<Vec<Vec<i64>>>;

    /// Absolute whole-day difference between two dates.
    fn days_between(&self, first: &DateArg, second: &DateArg) -> TargetResult<i64>;

    /// Name of the implementation, for logs.
    fn name(&self) -> &str {
        "unnamed"
    }
}
