//! Invocation wrapper: call a target and capture whatever happens.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};

use crate::campaign::CampaignKind;
use crate::error::HarnessError;
use crate::targets::TargetResult;

/// Category of a captured failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The target reported a filesystem error.
    Io,
    /// The target rejected an argument.
    InvalidArgument,
    /// The target could not combine its operands.
    UnsupportedOperand,
    /// The target panicked.
    Panic,
    /// The harness could not build the iteration's fixture.
    Fixture,
}

impl FailureKind {
    pub fn label(&self) -> &'static str {
        match self {
            FailureKind::Io => "io",
            FailureKind::InvalidArgument => "invalid_argument",
            FailureKind::UnsupportedOperand => "unsupported_operand",
            FailureKind::Panic => "panic",
            FailureKind::Fixture => "fixture",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A failure raised by one call, before it is tied to an iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

impl Failure {
    /// Attach the iteration context the recorder needs.
    pub fn into_detail(
        self,
        campaign: CampaignKind,
        iteration: usize,
        inputs: impl Into<String>,
    ) -> FailureDetail {
        FailureDetail {
            campaign,
            iteration,
            kind: self.kind,
            message: self.message,
            inputs: inputs.into(),
        }
    }

    /// A fixture that could not be built for an iteration.
    pub fn fixture(err: &HarnessError) -> Self {
        Self {
            kind: FailureKind::Fixture,
            message: err.to_string(),
        }
    }
}

/// Full detail of a failure, as recorded in the run log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureDetail {
    pub campaign: CampaignKind,
    pub iteration: usize,
    pub kind: FailureKind,
    pub message: String,
    /// Rendering of the exact inputs that triggered the failure.
    pub inputs: String,
}

/// What came back from one call to a target.
#[derive(Debug)]
pub enum InvocationOutcome<T> {
    Returned(T),
    Raised(Failure),
}

impl<T> InvocationOutcome<T> {
    pub fn is_raised(&self) -> bool {
        matches!(self, InvocationOutcome::Raised(_))
    }
}

/// Run `call`, turning both returned errors and panics into
/// [`InvocationOutcome::Raised`].
pub fn invoke<T>(call: impl FnOnce() -> TargetResult<T>) -> InvocationOutcome<T> {
    match panic::catch_unwind(AssertUnwindSafe(call)) {
        Ok(Ok(value)) => InvocationOutcome::Returned(value),
        Ok(Err(err)) => InvocationOutcome::Raised(Failure {
            kind: err.kind(),
            message: err.to_string(),
        }),
        Err(payload) => InvocationOutcome::Raised(Failure {
            kind: FailureKind::Panic,
            message: panic_message(payload.as_ref()),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic with non-string payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::targets::TargetError;

    #[test]
    fn test_returned_value_passes_through() {
        let outcome = invoke(|| Ok(41 + 1));
        assert!(matches!(outcome, InvocationOutcome::Returned(42)));
    }

    #[test]
    fn test_target_error_is_captured() {
        let outcome: InvocationOutcome<()> =
            invoke(|| Err(TargetError::InvalidArgument("size 0".to_string())));

        match outcome {
            InvocationOutcome::Raised(failure) => {
                assert_eq!(failure.kind, FailureKind::InvalidArgument);
                assert_eq!(failure.message, "Invalid argument: size 0");
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_panic_is_captured() {
        let outcome: InvocationOutcome<u8> = invoke(|| panic!("boom at {}", 3));

        match outcome {
            InvocationOutcome::Raised(failure) => {
                assert_eq!(failure.kind, FailureKind::Panic);
                assert_eq!(failure.message, "boom at 3");
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_static_str_panic_is_captured() {
        let outcome: InvocationOutcome<u8> = invoke(|| panic!("plain"));
        assert!(outcome.is_raised());
    }

    #[test]
    fn test_into_detail_keeps_context() {
        let detail = Failure {
            kind: FailureKind::Io,
            message: "denied".to_string(),
        }
        .into_detail(CampaignKind::ContentWriter, 7, "content=\"\"");

        assert_eq!(detail.campaign, CampaignKind::ContentWriter);
        assert_eq!(detail.iteration, 7);
        assert_eq!(detail.inputs, "content=\"\"");
    }
}
