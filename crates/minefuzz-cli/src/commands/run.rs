//! Run command - execute the five fuzz campaigns.

use colored::Colorize;
use minefuzz::{
    CampaignKind, Harness, HarnessConfig, ReferenceMining, RunRecorder, RunSummary, file_sink,
};

use crate::cli::RunArgs;
use crate::console::{ConsoleSink, QuietPanics};

pub fn run(args: RunArgs, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = HarnessConfig {
        iterations: args.iterations,
        seed: args.seed,
        keep_sandbox: args.keep_sandbox,
        ..HarnessConfig::default()
    };
    if let Some(sandbox) = args.sandbox {
        config.sandbox_dir = sandbox;
    }

    let targets = if args.strict_dates {
        ReferenceMining::strict()
    } else {
        ReferenceMining::new()
    };

    let mut recorder = RunRecorder::new().with_boxed_sink(file_sink(&args.log, args.format)?);
    if verbose {
        recorder = recorder.with_sink(ConsoleSink);
    }

    if !args.json {
        println!(
            "{} {} campaigns x {} iterations",
            "Fuzzing".cyan().bold(),
            CampaignKind::ORDER.len(),
            config.iterations
        );
    }

    let summary = {
        let _quiet = (!verbose).then(QuietPanics::install);
        Harness::with_config(config)
            .with_targets(targets)
            .run(recorder)?
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary, &args.log.display().to_string());
    }

    Ok(())
}

fn print_summary(summary: &RunSummary, log: &str) {
    println!();
    println!("{}", "Campaigns:".yellow().bold());
    for (kind, tally) in &summary.campaigns {
        let status = if tally.problems() == 0 {
            "ok".green()
        } else {
            "issues".red()
        };
        println!(
            "  {:10} {:6}  info {:4}  error {:4}  exception {:4}",
            kind.slug(),
            status,
            tally.info,
            tally.error.to_string().yellow(),
            tally.exception.to_string().red()
        );
    }
    println!();

    let totals = summary.totals();
    println!(
        "Records: {}  (errors: {}, exceptions: {})",
        summary.total_records.to_string().white().bold(),
        totals.error.to_string().yellow(),
        totals.exception.to_string().red()
    );
    if let Some(seed) = summary.seed {
        println!("Seed:    {}", seed.to_string().cyan());
    }
    if let Some(finished) = summary.finished_at {
        let elapsed = finished - summary.started_at;
        println!("Elapsed: {} ms", elapsed.num_milliseconds());
    }
    if summary.sandbox_removed == Some(false) {
        println!("{}", "Sandbox was left on disk.".yellow());
    }
    println!();

    if summary.is_clean() {
        println!("{} Log written to {}", "No issues found.".green().bold(), log.cyan());
    } else {
        println!(
            "{} See {} for details.",
            "Issues found.".red().bold(),
            log.cyan()
        );
    }
}
