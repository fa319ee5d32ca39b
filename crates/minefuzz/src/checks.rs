//! Invariant checkers, one per target function.
//!
//! A checker classifies a returned value as sane or suspicious. It never
//! fails: anything it cannot confirm becomes a [`Verdict::Suspicious`].

use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;

use crate::targets::TIMESTAMP_FORMAT;

/// Classification of one returned value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The value passed its invariant. Carries a short description.
    Sane(String),
    /// The value broke its invariant. Carries the reason.
    Suspicious(String),
}

impl Verdict {
    pub fn is_sane(&self) -> bool {
        matches!(self, Verdict::Sane(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Verdict::Sane(m) | Verdict::Suspicious(m) => m,
        }
    }
}

/// The timestamp must be text: no control characters.
///
/// Whether it follows the mining module's own layout, or is empty, is noted
/// but not enforced.
pub fn check_timestamp(value: &str) -> Verdict {
    if value.chars().any(char::is_control) {
        return Verdict::Suspicious(format!(
            "give_timestamp returned non-textual value: {:?}",
            value
        ));
    }

    let layout = if value.is_empty() {
        "empty"
    } else if NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).is_ok() {
        "standard layout"
    } else {
        "non-standard layout"
    };
    Verdict::Sane(format!("give_timestamp() -> {} ({})", value, layout))
}

/// The file must exist and its size must agree with the reported size and
/// with the content's byte length.
pub fn check_written_file(path: &Path, content: &str, reported: u64) -> Verdict {
    let metadata = match fs::metadata(path) {
        Ok(m) if m.is_file() => m,
        Ok(_) => {
            return Verdict::Suspicious(format!("Not a regular file: {}", path.display()));
        }
        Err(_) => {
            return Verdict::Suspicious(format!("File not created: {}", path.display()));
        }
    };

    let actual = metadata.len();
    let expected = content.len() as u64;

    if reported != actual {
        Verdict::Suspicious(format!(
            "dump_content reported {} bytes but {} are on disk",
            reported, actual
        ))
    } else if actual != expected {
        Verdict::Suspicious(format!(
            "dump_content wrote {} bytes for {} bytes of content",
            actual, expected
        ))
    } else {
        Verdict::Sane(format!(
            "dump_content -> returned={}, actual={}",
            reported, actual
        ))
    }
}

/// The deleter has no return value; only a path left behind is suspicious.
pub fn check_deleted(path: &Path, label: &str, existed_before: bool) -> Verdict {
    let exists_after = path.exists();
    if exists_after {
        Verdict::Suspicious(format!(
            "delete_repo({:?}, {:?}) left the path in place",
            path.display().to_string(),
            label
        ))
    } else {
        Verdict::Sane(format!(
            "delete_repo({:?}, {:?}) -> existed_before={}, exists_after={}",
            path.display().to_string(),
            label,
            existed_before,
            exists_after
        ))
    }
}

/// Concatenating the chunks must reproduce `items`, and every chunk must
/// respect `size`.
pub fn check_chunks(items: &[i64], size: usize, chunks: &[Vec<i64>]) -> Verdict {
    let flattened: Vec<i64> = chunks.iter().flatten().copied().collect();
    if flattened != items {
        return Verdict::Suspicious(format!(
            "make_chunks lost or reordered elements. original_len={}, flattened_len={}",
            items.len(),
            flattened.len()
        ));
    }

    if let Some(pos) = chunks.iter().position(Vec::is_empty) {
        return Verdict::Suspicious(format!("make_chunks produced an empty chunk at {}", pos));
    }

    let last = chunks.len().saturating_sub(1);
    for (pos, chunk) in chunks.iter().enumerate() {
        let bad = if pos == last {
            chunk.len() > size
        } else {
            chunk.len() != size
        };
        if bad {
            return Verdict::Suspicious(format!(
                "make_chunks chunk {} has {} elements for size {}",
                pos,
                chunk.len(),
                size
            ));
        }
    }

    Verdict::Sane(format!(
        "make_chunks(len={}, size={}) -> {} chunks",
        items.len(),
        size,
        chunks.len()
    ))
}

/// A day count must be non-negative.
pub fn check_day_count(days: i64) -> Verdict {
    if days < 0 {
        Verdict::Suspicious(format!("days_between returned negative count {}", days))
    } else {
        Verdict::Sane(format!("days_between -> {}", days))
    }
}
