//! Log record types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::campaign::CampaignKind;
use crate::invoke::FailureDetail;

/// Severity level of a log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Progress or a sane result.
    Info,
    /// A target returned a value that broke its invariant.
    Error,
    /// A target raised a failure.
    Exception,
}

impl Severity {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Error => "ERROR",
            Severity::Exception => "EXCEPTION",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One entry of the run log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    /// Position in the run, strictly increasing from 0.
    pub sequence: u64,
    pub timestamp: DateTime<Utc>,
    pub severity: Severity,
    /// Campaign the record belongs to (None for run-level banners).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign: Option<CampaignKind>,
    /// Iteration within the campaign.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iteration: Option<usize>,
    pub message: String,
    /// Full detail for exception records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureDetail>,
}

impl LogRecord {
    /// Render the message the way it appears in text logs.
    pub fn display_message(&self) -> String {
        match self.iteration {
            Some(i) => format!("Iteration {}: {}", i, self.message),
            None => self.message.clone(),
        }
    }
}
