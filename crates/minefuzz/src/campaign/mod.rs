//! Fuzz campaigns: one per target function.
//!
//! A campaign pairs an input generator with an invariant checker for one
//! target. [`run_campaign`] drives any campaign through the shared
//! generate / invoke / check / record loop.

mod chunks;
mod content;
mod days;
mod delete;
mod timestamp;

use std::fmt;

use fastrand::Rng;
use serde::{Deserialize, Serialize};

use crate::checks::Verdict;
use crate::error::Result;
use crate::invoke::{Failure, InvocationOutcome, invoke};
use crate::record::RunRecorder;
use crate::targets::{MiningTargets, TargetResult};

pub use chunks::{ChunkInput, ListChunkerCampaign};
pub use content::{ContentInput, ContentWriterCampaign};
pub use days::{DateDifferenceCampaign, DaysInput};
pub use delete::{DeleteInput, DirectoryDeleterCampaign};
pub use timestamp::TimestampCampaign;

/// The five campaigns, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignKind {
    TimestampFormatter,
    ContentWriter,
    DirectoryDeleter,
    ListChunker,
    DateDifference,
}

impl CampaignKind {
    /// Fixed run order.
    pub const ORDER: [CampaignKind; 5] = [
        CampaignKind::TimestampFormatter,
        CampaignKind::ContentWriter,
        CampaignKind::DirectoryDeleter,
        CampaignKind::ListChunker,
        CampaignKind::DateDifference,
    ];

    /// Short tag used in log lines.
    pub fn slug(&self) -> &'static str {
        match self {
            CampaignKind::TimestampFormatter => "timestamp",
            CampaignKind::ContentWriter => "writer",
            CampaignKind::DirectoryDeleter => "deleter",
            CampaignKind::ListChunker => "chunker",
            CampaignKind::DateDifference => "days",
        }
    }

    /// Name of the target function.
    pub fn function_name(&self) -> &'static str {
        match self {
            CampaignKind::TimestampFormatter => "give_timestamp()",
            CampaignKind::ContentWriter => "dump_content()",
            CampaignKind::DirectoryDeleter => "delete_repo()",
            CampaignKind::ListChunker => "make_chunks()",
            CampaignKind::DateDifference => "days_between()",
        }
    }

    /// Call shape of the target function.
    pub fn signature(&self) -> &'static str {
        match self {
            CampaignKind::TimestampFormatter => "give_timestamp()",
            CampaignKind::ContentWriter => "dump_content(content, path)",
            CampaignKind::DirectoryDeleter => "delete_repo(path, label)",
            CampaignKind::ListChunker => "make_chunks(items, size)",
            CampaignKind::DateDifference => "days_between(d1, d2)",
        }
    }

    /// Whether the campaign creates or removes files in the sandbox.
    pub fn touches_filesystem(&self) -> bool {
        matches!(
            self,
            CampaignKind::ContentWriter | CampaignKind::DirectoryDeleter
        )
    }
}

impl fmt::Display for CampaignKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// One target function's fuzzing strategy.
pub trait Campaign {
    /// Everything one call needs.
    type Input: fmt::Debug;
    /// What the target returns on success.
    type Output: fmt::Debug;

    fn kind(&self) -> CampaignKind;

    /// Generate the input for `iteration`, building any filesystem fixture.
    fn prepare(&self, rng: &mut Rng, iteration: usize) -> Result<Self::Input>;

    /// What `prepare` was building, for the record of a fixture failure.
    fn fixture_inputs(&self, iteration: usize) -> String {
        format!("iteration={}", iteration)
    }

    /// Call the target.
    fn invoke(&self, targets: &dyn MiningTargets, input: &Self::Input)
    -> TargetResult<Self::Output>;

    /// Classify a returned value.
    fn check(&self, input: &Self::Input, output: &Self::Output) -> Verdict;
}

/// Run `iterations` rounds of `campaign` against `targets`.
///
/// Target failures and fixture failures are recorded and the loop moves on.
/// Only recorder failures stop the campaign.
pub fn run_campaign<C: Campaign>(
    campaign: &C,
    targets: &dyn MiningTargets,
    rng: &mut Rng,
    iterations: usize,
    recorder: &mut RunRecorder,
) -> Result<()> {
    let kind = campaign.kind();
    recorder.campaign_started(kind)?;

    for iteration in 0..iterations {
        let input = match campaign.prepare(rng, iteration) {
            Ok(input) => input,
            Err(err) => {
                let detail = Failure::fixture(&err).into_detail(
                    kind,
                    iteration,
                    campaign.fixture_inputs(iteration),
                );
                recorder.failure(detail)?;
                continue;
            }
        };

        match invoke(|| campaign.invoke(targets, &input)) {
            InvocationOutcome::Returned(output) => match campaign.check(&input, &output) {
                Verdict::Sane(note) => recorder.ok(kind, iteration, note)?,
                Verdict::Suspicious(reason) => recorder.suspicious(kind, iteration, reason)?,
            },
            InvocationOutcome::Raised(failure) => {
                let detail = failure.into_detail(kind, iteration, format!("{:?}", input));
                recorder.failure(detail)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoke::FailureKind;
    use crate::record::{MemorySink, Severity};
    use crate::sandbox::Sandbox;
    use crate::targets::{DateArg, ReferenceMining};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    /// Chunker that panics on every third call.
    struct FlakyChunker {
        calls: std::cell::Cell<usize>,
    }

    impl MiningTargets for FlakyChunker {
        fn give_timestamp(&self) -> TargetResult<String> {
            ReferenceMining::new().give_timestamp()
        }

        fn delete_repo(&self, path: &Path, label: &str) -> TargetResult<()> {
            ReferenceMining::new().delete_repo(path, label)
        }

        fn dump_content(&self, content: &str, path: &Path) -> TargetResult<u64> {
            ReferenceMining::new().dump_content(content, path)
        }

        fn make_chunks(&self, items: &[i64], size: usize) -> TargetResult<Vec<Vec<i64>>> {
            let n = self.calls.get();
            self.calls.set(n + 1);
            if n % 3 == 2 {
                panic!("flaky chunker failed on call {}", n);
            }
            ReferenceMining::new().make_chunks(items, size)
        }

        fn days_between(&self, first: &DateArg, second: &DateArg) -> TargetResult<i64> {
            ReferenceMining::new().days_between(first, second)
        }
    }

    #[test]
    fn test_order_matches_fixed_sequence() {
        let slugs: Vec<&str> = CampaignKind::ORDER.iter().map(|k| k.slug()).collect();
        assert_eq!(slugs, vec!["timestamp", "writer", "deleter", "chunker", "days"]);
    }

    #[test]
    fn test_failure_does_not_stop_later_iterations() {
        let targets = FlakyChunker {
            calls: std::cell::Cell::new(0),
        };
        let sink = MemorySink::new();
        let mut recorder = RunRecorder::new().with_sink(sink.clone());
        let mut rng = Rng::with_seed(9);

        run_campaign(&ListChunkerCampaign, &targets, &mut rng, 9, &mut recorder).unwrap();

        let records = sink.records();
        // header + one record per iteration
        assert_eq!(records.len(), 10);

        let exceptions: Vec<usize> = records
            .iter()
            .filter(|r| r.severity == Severity::Exception)
            .filter_map(|r| r.iteration)
            .collect();
        assert_eq!(exceptions, vec![2, 5, 8]);

        let failure = records[3].failure.as_ref().unwrap();
        assert!(failure.inputs.starts_with("ChunkInput"));
        assert_eq!(failure.message, "flaky chunker failed on call 2");
    }

    #[test]
    fn test_fixture_failure_records_intended_path() {
        let dir = TempDir::new().unwrap();
        // A regular file where the sandbox directory should be
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let campaign = DirectoryDeleterCampaign::new(Sandbox::new(&blocker));

        let sink = MemorySink::new();
        let mut recorder = RunRecorder::new().with_sink(sink.clone());
        let mut rng = Rng::with_seed(3);

        run_campaign(&campaign, &ReferenceMining::new(), &mut rng, 1, &mut recorder).unwrap();

        let records = sink.records();
        assert_eq!(records.len(), 2);
        let failure = records[1].failure.as_ref().unwrap();
        assert_eq!(failure.kind, FailureKind::Fixture);
        assert_eq!(failure.iteration, 0);
        assert!(failure.inputs.starts_with("path="));
        assert!(failure.inputs.ends_with("dir_0"));
    }
}
