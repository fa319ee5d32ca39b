//! The run recorder: ordered, append-only log plus running tallies.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::campaign::CampaignKind;
use crate::error::Result;
use crate::invoke::FailureDetail;

use super::record::{LogRecord, Severity};
use super::sink::RecordSink;

/// Counts of records by severity for one campaign.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignTally {
    pub info: usize,
    pub error: usize,
    pub exception: usize,
}

impl CampaignTally {
    fn count(&mut self, severity: Severity) {
        match severity {
            Severity::Info => self.info += 1,
            Severity::Error => self.error += 1,
            Severity::Exception => self.exception += 1,
        }
    }

    /// Error plus exception records.
    pub fn problems(&self) -> usize {
        self.error + self.exception
    }
}

/// Summary of a run, built up as records are appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Seed the generators were started from.
    pub seed: Option<u64>,
    /// Name of the target implementation.
    pub targets: Option<String>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    /// Tallies per campaign, in run order.
    pub campaigns: IndexMap<CampaignKind, CampaignTally>,
    /// Total records appended.
    pub total_records: u64,
    /// Whether the sandbox was removed at the end of the run.
    pub sandbox_removed: Option<bool>,
}

impl RunSummary {
    fn new() -> Self {
        Self {
            seed: None,
            targets: None,
            started_at: Utc::now(),
            finished_at: None,
            campaigns: IndexMap::new(),
            total_records: 0,
            sandbox_removed: None,
        }
    }

    /// Tallies summed over every campaign.
    pub fn totals(&self) -> CampaignTally {
        self.campaigns
            .values()
            .fold(CampaignTally::default(), |acc, t| CampaignTally {
                info: acc.info + t.info,
                error: acc.error + t.error,
                exception: acc.exception + t.exception,
            })
    }

    /// True when no campaign produced an error or exception record.
    pub fn is_clean(&self) -> bool {
        self.totals().problems() == 0
    }

    pub fn tally(&self, campaign: CampaignKind) -> CampaignTally {
        self.campaigns.get(&campaign).copied().unwrap_or_default()
    }
}

/// Ordered, timestamped log of a run.
///
/// Passed explicitly to every component that records; there is no global
/// logger. Every record is written to each attached sink in order.
pub struct RunRecorder {
    sinks: Vec<Box<dyn RecordSink>>,
    next_sequence: u64,
    summary: RunSummary,
}

impl RunRecorder {
    /// A recorder with no sinks. Tallies are still kept.
    pub fn new() -> Self {
        Self {
            sinks: Vec::new(),
            next_sequence: 0,
            summary: RunSummary::new(),
        }
    }

    /// Attach a sink.
    pub fn with_sink(mut self, sink: impl RecordSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Attach an already boxed sink.
    pub fn with_boxed_sink(mut self, sink: Box<dyn RecordSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Append one record.
    pub fn append(
        &mut self,
        severity: Severity,
        campaign: Option<CampaignKind>,
        iteration: Option<usize>,
        message: impl Into<String>,
        failure: Option<FailureDetail>,
    ) -> Result<()> {
        let record = LogRecord {
            sequence: self.next_sequence,
            timestamp: Utc::now(),
            severity,
            campaign,
            iteration,
            message: message.into(),
            failure,
        };
        self.next_sequence += 1;

        self.summary.total_records += 1;
        if let Some(campaign) = campaign {
            self.summary
                .campaigns
                .entry(campaign)
                .or_default()
                .count(severity);
        }

        for sink in &mut self.sinks {
            sink.write_record(&record)?;
        }
        Ok(())
    }

    /// Run-level informational record.
    pub fn banner(&mut self, message: impl Into<String>) -> Result<()> {
        self.append(Severity::Info, None, None, message, None)
    }

    /// Mark the start of a campaign.
    pub fn campaign_started(&mut self, campaign: CampaignKind) -> Result<()> {
        self.summary.campaigns.entry(campaign).or_default();
        self.append(
            Severity::Info,
            Some(campaign),
            None,
            format!("=== Fuzzing {} ===", campaign.signature()),
            None,
        )
    }

    /// A sane result.
    pub fn ok(
        &mut self,
        campaign: CampaignKind,
        iteration: usize,
        message: impl Into<String>,
    ) -> Result<()> {
        let message = format!("OK {}", message.into());
        self.append(Severity::Info, Some(campaign), Some(iteration), message, None)
    }

    /// A result that broke its invariant.
    pub fn suspicious(
        &mut self,
        campaign: CampaignKind,
        iteration: usize,
        message: impl Into<String>,
    ) -> Result<()> {
        self.append(Severity::Error, Some(campaign), Some(iteration), message, None)
    }

    /// A captured failure.
    pub fn failure(&mut self, detail: FailureDetail) -> Result<()> {
        let message = format!(
            "EXCEPTION in {}: {}",
            detail.campaign.function_name(),
            detail.message
        );
        self.append(
            Severity::Exception,
            Some(detail.campaign),
            Some(detail.iteration),
            message,
            Some(detail),
        )
    }

    /// Record run-level facts that are not log lines.
    pub fn set_run_info(&mut self, seed: u64, targets: &str) {
        self.summary.seed = Some(seed);
        self.summary.targets = Some(targets.to_string());
    }

    pub fn set_sandbox_removed(&mut self, removed: bool) {
        self.summary.sandbox_removed = Some(removed);
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// Flush every sink and return the final summary.
    pub fn finish(mut self) -> Result<RunSummary> {
        for sink in &mut self.sinks {
            sink.flush()?;
        }
        self.summary.finished_at = Some(Utc::now());
        Ok(self.summary)
    }
}

impl Default for RunRecorder {
    fn default() -> Self {
        Self::new()
    }
}
