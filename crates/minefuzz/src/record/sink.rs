//! Destinations for log records.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::error::{HarnessError, Result};

use super::record::LogRecord;

/// Something that accepts log records in order.
pub trait RecordSink {
    /// Append one record.
    fn write_record(&mut self, record: &LogRecord) -> Result<()>;

    /// Push buffered records to their destination.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// On-disk layout of a run log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// `timestamp [LEVEL] message` lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "log" => Ok(LogFormat::Text),
            "json" | "jsonl" | "ndjson" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}. Use text or json.", s)),
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

/// Open `path` for writing (truncating) and wrap it in a sink of `format`.
pub fn file_sink(path: impl AsRef<Path>, format: LogFormat) -> Result<Box<dyn RecordSink>> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| HarnessError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let writer = BufWriter::new(file);

    Ok(match format {
        LogFormat::Text => Box::new(TextSink::new(writer)),
        LogFormat::Json => Box::new(JsonLinesSink::new(writer)),
    })
}

/// Human-readable log lines.
///
/// ```text
/// 2024-12-30 10:00:00,123 [INFO] [chunker] Iteration 4: make_chunks(len=12, size=5) -> 3 chunks
/// ```
///
/// Exception records are followed by indented detail lines.
pub struct TextSink<W: Write> {
    writer: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for TextSink<W> {
    fn write_record(&mut self, record: &LogRecord) -> Result<()> {
        let timestamp = record.timestamp.format("%Y-%m-%d %H:%M:%S,%3f");
        let line = match record.campaign {
            Some(campaign) => format!(
                "{} [{}] [{}] {}",
                timestamp,
                record.severity,
                campaign.slug(),
                record.display_message()
            ),
            None => format!(
                "{} [{}] {}",
                timestamp,
                record.severity,
                record.display_message()
            ),
        };
        writeln!(self.writer, "{}", line).map_err(HarnessError::Sink)?;

        if let Some(failure) = &record.failure {
            writeln!(self.writer, "    kind: {}", failure.kind).map_err(HarnessError::Sink)?;
            writeln!(self.writer, "    message: {}", failure.message)
                .map_err(HarnessError::Sink)?;
            writeln!(self.writer, "    inputs: {}", failure.inputs).map_err(HarnessError::Sink)?;
        }

        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(HarnessError::Sink)
    }
}

/// One serialized [`LogRecord`] per line.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for JsonLinesSink<W> {
    fn write_record(&mut self, record: &LogRecord) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n").map_err(HarnessError::Sink)
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(HarnessError::Sink)
    }
}

/// Shared in-memory buffer of records.
///
/// Clones share the same buffer, so a caller can keep one handle and give
/// another to the recorder.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every record written so far.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RecordSink for MemorySink {
    fn write_record(&mut self, record: &LogRecord) -> Result<()> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
        Ok(())
    }
}
