//! minefuzz: randomized black-box fuzz harness for repository-mining utilities.
//!
//! The harness exercises five small functions (a timestamp formatter, a
//! recursive directory deleter, a file-content writer, a list chunker and a
//! date-difference calculator) with generated valid and adversarial inputs,
//! and records for each call whether it failed and whether its result broke a
//! sanity invariant.
//!
//! # Core Principles
//!
//! - **Failures are data**: a target that errors or panics is recorded, never fatal
//! - **Explicit recorder**: every record goes through a [`RunRecorder`] passed in by the caller
//! - **Reproducible**: generators draw from a seeded RNG and the seed is logged
//!
//! # Example
//!
//! ```no_run
//! use minefuzz::{Harness, LogFormat, RunRecorder, file_sink};
//!
//! let recorder = RunRecorder::new()
//!     .with_boxed_sink(file_sink("fuzz_results.log", LogFormat::Text).unwrap());
//! let summary = Harness::new().run(recorder).unwrap();
//!
//! println!("Problems: {}", summary.totals().problems());
//! ```

pub mod campaign;
pub mod checks;
pub mod error;
pub mod generators;
pub mod invoke;
pub mod record;
pub mod sandbox;
pub mod targets;

mod harness;

pub use crate::harness::{DEFAULT_ITERATIONS, Harness, HarnessConfig};
pub use campaign::CampaignKind;
pub use checks::Verdict;
pub use error::{HarnessError, Result};
pub use invoke::{FailureDetail, FailureKind, InvocationOutcome};
pub use record::{
    CampaignTally, JsonLinesSink, LogFormat, LogRecord, MemorySink, RecordSink, RunRecorder,
    RunSummary, Severity, TextSink, file_sink,
};
pub use sandbox::Sandbox;
pub use targets::{DateArg, DateArgKind, MiningTargets, ReferenceMining, TargetError, TargetResult};
