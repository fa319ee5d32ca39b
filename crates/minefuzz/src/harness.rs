//! The orchestrator: sandbox setup, the five campaigns, teardown.

use std::path::PathBuf;
use std::sync::Arc;

use fastrand::Rng;
use serde::{Deserialize, Serialize};

use crate::campaign::{
    CampaignKind, ContentWriterCampaign, DateDifferenceCampaign, DirectoryDeleterCampaign,
    ListChunkerCampaign, TimestampCampaign, run_campaign,
};
use crate::error::{HarnessError, Result};
use crate::record::{RunRecorder, RunSummary};
use crate::sandbox::Sandbox;
use crate::targets::{MiningTargets, ReferenceMining};

/// Iterations per campaign when nothing else is configured.
pub const DEFAULT_ITERATIONS: usize = 50;

/// Configuration for a harness run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Iterations for each of the five campaigns.
    pub iterations: usize,
    /// Scratch directory; wiped at start and removed at the end. An
    /// existing non-empty directory is only reused if it carries the
    /// sandbox marker.
    pub sandbox_dir: PathBuf,
    /// Generator seed (None = pick one and log it).
    pub seed: Option<u64>,
    /// Leave the sandbox on disk after the run.
    pub keep_sandbox: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            sandbox_dir: Sandbox::default_root(),
            seed: None,
            keep_sandbox: false,
        }
    }
}

impl HarnessConfig {
    /// Reject sandbox paths that cannot name a directory of their own.
    ///
    /// Whether an existing directory may be wiped is decided later by
    /// [`Sandbox::reset`].
    pub fn validate(&self) -> Result<()> {
        if self.sandbox_dir.as_os_str().is_empty() {
            return Err(HarnessError::Config("sandbox directory is empty".to_string()));
        }
        if self.sandbox_dir.file_name().is_none() {
            return Err(HarnessError::Config(format!(
                "sandbox directory '{}' has no final component",
                self.sandbox_dir.display()
            )));
        }
        Ok(())
    }
}

/// Runs the five campaigns against a set of targets.
pub struct Harness {
    config: HarnessConfig,
    targets: Arc<dyn MiningTargets>,
}

impl Harness {
    /// Harness with default configuration against [`ReferenceMining`].
    pub fn new() -> Self {
        Self::with_config(HarnessConfig::default())
    }

    /// Harness with custom configuration against [`ReferenceMining`].
    pub fn with_config(config: HarnessConfig) -> Self {
        Self {
            config,
            targets: Arc::new(ReferenceMining::new()),
        }
    }

    /// Fuzz a different implementation of the mining utilities.
    pub fn with_targets(mut self, targets: impl MiningTargets + 'static) -> Self {
        self.targets = Arc::new(targets);
        self
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Execute one full run and return its summary.
    ///
    /// Target failures and suspicious results never make this fail; they end
    /// up in the recorder. Errors here come from the harness itself: an
    /// invalid configuration, a sandbox that cannot be prepared, or a sink
    /// that cannot be written. The sandbox is torn down either way.
    pub fn run(&self, mut recorder: RunRecorder) -> Result<RunSummary> {
        self.config.validate()?;

        let seed = self.config.seed.unwrap_or_else(|| fastrand::u64(..));
        let mut rng = Rng::with_seed(seed);
        recorder.set_run_info(seed, self.targets.name());

        let sandbox = Sandbox::new(&self.config.sandbox_dir);
        sandbox.reset()?;

        let outcome = self.run_campaigns(&sandbox, seed, &mut rng, &mut recorder);

        let removed = if self.config.keep_sandbox {
            false
        } else {
            sandbox.teardown()
        };
        recorder.set_sandbox_removed(removed);

        outcome?;
        recorder.finish()
    }

    fn run_campaigns(
        &self,
        sandbox: &Sandbox,
        seed: u64,
        rng: &mut Rng,
        recorder: &mut RunRecorder,
    ) -> Result<()> {
        let targets = self.targets.as_ref();
        let iterations = self.config.iterations;

        recorder.banner(format!(
            "==== STARTING FUZZING RUN (targets={}, seed={}, iterations={}) ====",
            targets.name(),
            seed,
            iterations
        ))?;

        for kind in CampaignKind::ORDER {
            if kind.touches_filesystem() {
                sandbox.clear()?;
            }

            match kind {
                CampaignKind::TimestampFormatter => {
                    run_campaign(&TimestampCampaign, targets, rng, iterations, recorder)?
                }
                CampaignKind::ContentWriter => run_campaign(
                    &ContentWriterCampaign::new(sandbox.clone()),
                    targets,
                    rng,
                    iterations,
                    recorder,
                )?,
                CampaignKind::DirectoryDeleter => run_campaign(
                    &DirectoryDeleterCampaign::new(sandbox.clone()),
                    targets,
                    rng,
                    iterations,
                    recorder,
                )?,
                CampaignKind::ListChunker => {
                    run_campaign(&ListChunkerCampaign, targets, rng, iterations, recorder)?
                }
                CampaignKind::DateDifference => {
                    run_campaign(&DateDifferenceCampaign, targets, rng, iterations, recorder)?
                }
            }
        }

        recorder.banner("==== FUZZING RUN COMPLETE ====")
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}
