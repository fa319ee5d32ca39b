//! Date-difference campaign.
//!
//! Most pairs are well-formed datetimes; the rest mix in malformed operands.
//! Whatever the target does with malformed operands is recorded as-is: an
//! error is logged as an exception, a returned count still has to be
//! non-negative.

use fastrand::Rng;

use crate::checks::{self, Verdict};
use crate::error::Result;
use crate::generators::random_date_pair;
use crate::targets::{DateArg, MiningTargets, TargetResult};

use super::{Campaign, CampaignKind};

#[derive(Debug, Clone)]
pub struct DaysInput {
    pub first: DateArg,
    pub second: DateArg,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DateDifferenceCampaign;

impl Campaign for DateDifferenceCampaign {
    type Input = DaysInput;
    type Output = i64;

    fn kind(&self) -> CampaignKind {
        CampaignKind::DateDifference
    }

    fn prepare(&self, rng: &mut Rng, _iteration: usize) -> Result<DaysInput> {
        let (first, second) = random_date_pair(rng)?;
        Ok(DaysInput { first, second })
    }

    fn invoke(&self, targets: &dyn MiningTargets, input: &DaysInput) -> TargetResult<i64> {
        targets.days_between(&input.first, &input.second)
    }

    fn check(&self, input: &DaysInput, output: &i64) -> Verdict {
        match checks::check_day_count(*output) {
            Verdict::Sane(_) => Verdict::Sane(format!(
                "days_between({}, {}) -> {}",
                input.first, input.second, output
            )),
            Verdict::Suspicious(_) => Verdict::Suspicious(format!(
                "days_between({}, {}) -> suspicious result: {}",
                input.first, input.second, output
            )),
        }
    }
}
