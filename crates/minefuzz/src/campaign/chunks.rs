//! List chunker campaign.

use fastrand::Rng;

use crate::checks::{self, Verdict};
use crate::error::Result;
use crate::generators::{MAX_CHUNK_SIZE, MAX_LIST_LEN, random_int_list};
use crate::targets::{MiningTargets, TargetResult};

use super::{Campaign, CampaignKind};

#[derive(Debug, Clone)]
pub struct ChunkInput {
    pub items: Vec<i64>,
    pub size: usize,
}

/// Random lists of 0..=100 integers split with sizes 1..=20.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListChunkerCampaign;

impl Campaign for ListChunkerCampaign {
    type Input = ChunkInput;
    type Output = Vec<Vec<i64>>;

    fn kind(&self) -> CampaignKind {
        CampaignKind::ListChunker
    }

    fn prepare(&self, rng: &mut Rng, _iteration: usize) -> Result<ChunkInput> {
        Ok(ChunkInput {
            items: random_int_list(rng, MAX_LIST_LEN),
            // the chunker contract requires size >= 1
            size: rng.usize(1..=MAX_CHUNK_SIZE),
        })
    }

    fn invoke(&self, targets: &dyn MiningTargets, input: &ChunkInput) -> TargetResult<Vec<Vec<i64>>> {
        targets.make_chunks(&input.items, input.size)
    }

    fn check(&self, input: &ChunkInput, output: &Vec<Vec<i64>>) -> Verdict {
        checks::check_chunks(&input.items, input.size, output)
    }
}
