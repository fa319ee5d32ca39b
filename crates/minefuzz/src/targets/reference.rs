//! Reference implementation of the mining utilities.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

use super::{DateArg, MiningTargets, TargetError, TargetResult};

/// Timestamp layout produced by [`ReferenceMining::give_timestamp`].
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Textual layouts accepted when coercing a text operand to a date.
const TEXT_DATE_LAYOUTS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Well-behaved implementation of every target function.
///
/// By default `days_between` is lenient: text operands are parsed as
/// ISO-8601, integers are Unix seconds, and a pair with any operand that
/// cannot be read as a date is zero days apart. Running the full harness
/// against the lenient implementation yields no error or exception records.
///
/// [`ReferenceMining::strict`] instead rejects every operand that is not a
/// datetime, the way a dynamically typed subtraction would.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceMining {
    strict_dates: bool,
}

impl ReferenceMining {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject non-datetime operands in `days_between`.
    pub fn strict() -> Self {
        Self { strict_dates: true }
    }
}

fn coerce_datetime(arg: &DateArg) -> Option<NaiveDateTime> {
    match arg {
        DateArg::DateTime(dt) => Some(*dt),
        DateArg::Text(s) | DateArg::IsoText(s) => {
            let s = s.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.naive_utc());
            }
            TEXT_DATE_LAYOUTS
                .iter()
                .find_map(|layout| NaiveDateTime::parse_from_str(s, layout).ok())
                .or_else(|| {
                    NaiveDate::parse_from_str(s, "%Y-%m-%d")
                        .ok()
                        .and_then(|d| d.and_hms_opt(0, 0, 0))
                })
        }
        DateArg::Integer(secs) => DateTime::from_timestamp(*secs, 0).map(|dt| dt.naive_utc()),
        DateArg::Null => None,
    }
}

impl MiningTargets for ReferenceMining {
    fn give_timestamp(&self) -> TargetResult<String> {
        Ok(Local::now().format(TIMESTAMP_FORMAT).to_string())
    }

    fn delete_repo(&self, path: &Path, _label: &str) -> TargetResult<()> {
        match fs::remove_dir_all(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(TargetError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn dump_content(&self, content: &str, path: &Path) -> TargetResult<u64> {
        let io_err = |source| TargetError::Io {
            path: path.to_path_buf(),
            source,
        };

        fs::write(path, content).map_err(io_err)?;
        let metadata = fs::metadata(path).map_err(io_err)?;

        Ok(metadata.len())
    }

    fn make_chunks(&self, items: &[i64], size: usize) -> TargetResult<Vec<Vec<i64>>> {
        if size == 0 {
            return Err(TargetError::InvalidArgument(
                "chunk size must be at least 1".to_string(),
            ));
        }

        Ok(items.chunks(size).map(<[i64]>::to_vec).collect())
    }

    fn days_between(&self, first: &DateArg, second: &DateArg) -> TargetResult<i64> {
        if self.strict_dates {
            return match (first.as_datetime(), second.as_datetime()) {
                (Some(d1), Some(d2)) => Ok((d2 - d1).num_days().abs()),
                _ => Err(TargetError::UnsupportedOperand {
                    left: first.kind(),
                    right: second.kind(),
                }),
            };
        }

        match (coerce_datetime(first), coerce_datetime(second)) {
            (Some(d1), Some(d2)) => Ok((d2 - d1).num_days().abs()),
            _ => Ok(0),
        }
    }

    fn name(&self) -> &str {
        if self.strict_dates {
            "reference-strict"
        } else {
            "reference"
        }
    }
}
