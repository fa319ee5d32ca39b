//! File-content writer campaign.

use std::path::PathBuf;

use fastrand::Rng;

use crate::checks::{self, Verdict};
use crate::error::Result;
use crate::generators::{MAX_CONTENT_LEN, random_text};
use crate::sandbox::Sandbox;
use crate::targets::{MiningTargets, TargetResult};

use super::{Campaign, CampaignKind};

#[derive(Debug, Clone)]
pub struct ContentInput {
    pub content: String,
    pub path: PathBuf,
}

/// Writes random printable text to a fresh file in the sandbox.
#[derive(Debug, Clone)]
pub struct ContentWriterCampaign {
    sandbox: Sandbox,
}

impl ContentWriterCampaign {
    pub fn new(sandbox: Sandbox) -> Self {
        Self { sandbox }
    }
}

impl Campaign for ContentWriterCampaign {
    type Input = ContentInput;
    type Output = u64;

    fn kind(&self) -> CampaignKind {
        CampaignKind::ContentWriter
    }

    fn prepare(&self, rng: &mut Rng, iteration: usize) -> Result<ContentInput> {
        Ok(ContentInput {
            content: random_text(rng, 0, MAX_CONTENT_LEN),
            path: self.sandbox.path(format!("fuzz_file_{}.txt", iteration)),
        })
    }

    fn invoke(&self, targets: &dyn MiningTargets, input: &ContentInput) -> TargetResult<u64> {
        targets.dump_content(&input.content, &input.path)
    }

    fn check(&self, input: &ContentInput, output: &u64) -> Verdict {
        checks::check_written_file(&input.path, &input.content, *output)
    }
}
