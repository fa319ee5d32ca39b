//! Run recording: log records, sinks and the recorder.

mod record;
mod recorder;
mod sink;

pub use record::{LogRecord, Severity};
pub use recorder::{CampaignTally, RunRecorder, RunSummary};
pub use sink::{JsonLinesSink, LogFormat, MemorySink, RecordSink, TextSink, file_sink};
