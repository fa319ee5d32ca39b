//! Timestamp formatter campaign.

use fastrand::Rng;

use crate::checks::{self, Verdict};
use crate::error::Result;
use crate::targets::{MiningTargets, TargetResult};

use super::{Campaign, CampaignKind};

/// Calls `give_timestamp()` repeatedly; it takes no input.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampCampaign;

impl Campaign for TimestampCampaign {
    type Input = ();
    type Output = String;

    fn kind(&self) -> CampaignKind {
        CampaignKind::TimestampFormatter
    }

    fn prepare(&self, _rng: &mut Rng, _iteration: usize) -> Result<()> {
        Ok(())
    }

    fn invoke(&self, targets: &dyn MiningTargets, _input: &()) -> TargetResult<String> {
        targets.give_timestamp()
    }

    fn check(&self, _input: &(), output: &String) -> Verdict {
        checks::check_timestamp(output)
    }
}
