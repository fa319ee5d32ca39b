//! Colored terminal echo of log records, and panic-output control.

use std::panic::{self, PanicHookInfo};

use colored::Colorize;
use minefuzz::{LogRecord, RecordSink, Severity};

type PanicHook = Box<dyn Fn(&PanicHookInfo<'_>) + Sync + Send + 'static>;

/// Silences the panic hook while alive and puts the previous hook back on
/// drop, whichever way the scope is left.
///
/// Panics inside targets are still captured and logged.
pub struct QuietPanics {
    previous: Option<PanicHook>,
}

impl QuietPanics {
    pub fn install() -> Self {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(|_| {}));
        Self {
            previous: Some(previous),
        }
    }
}

impl Drop for QuietPanics {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            panic::set_hook(previous);
        }
    }
}

/// Writes every record to stderr as it is appended.
pub struct ConsoleSink;

impl RecordSink for ConsoleSink {
    fn write_record(&mut self, record: &LogRecord) -> minefuzz::Result<()> {
        let level = match record.severity {
            Severity::Info => record.severity.label().blue(),
            Severity::Error => record.severity.label().yellow().bold(),
            Severity::Exception => record.severity.label().red().bold(),
        };
        let campaign = record
            .campaign
            .map(|c| format!("[{}] ", c.slug()))
            .unwrap_or_default();

        eprintln!(
            "{} {}{}",
            level,
            campaign.dimmed(),
            record.display_message()
        );

        if let Some(failure) = &record.failure {
            eprintln!("    {} {}", "kind:".dimmed(), failure.kind);
            eprintln!("    {} {}", "inputs:".dimmed(), failure.inputs);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_quiet_panics_restores_previous_hook() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        panic::set_hook(Box::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        let early_exit = || -> Result<(), String> {
            let _quiet = QuietPanics::install();
            let _ = panic::catch_unwind(|| panic!("silenced"));
            Err("harness failed".to_string())
        };
        assert!(early_exit().is_err());
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        let _ = panic::catch_unwind(|| panic!("reported"));
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        let _ = panic::take_hook();
    }
}
