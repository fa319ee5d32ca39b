//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use minefuzz::{DEFAULT_ITERATIONS, LogFormat};

/// Default log file, written to the working directory.
pub const DEFAULT_LOG: &str = "fuzz_results.log";

/// minefuzz: fuzz harness for repository-mining utilities
#[derive(Parser)]
#[command(name = "minefuzz")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Command to run (default: run)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Echo every log record to the terminal
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run all five fuzz campaigns
    Run(RunArgs),

    /// List the campaigns in run order
    Campaigns {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Iterations per campaign
    #[arg(short = 'n', long, default_value_t = DEFAULT_ITERATIONS)]
    pub iterations: usize,

    /// Seed for the input generators (default: random, logged)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Scratch directory (default: <temp>/minefuzz_tmp); must be new, empty or a previous sandbox
    #[arg(long)]
    pub sandbox: Option<PathBuf>,

    /// Leave the scratch directory in place after the run
    #[arg(long)]
    pub keep_sandbox: bool,

    /// Path of the run log
    #[arg(short, long, default_value = DEFAULT_LOG)]
    pub log: PathBuf,

    /// Log format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: LogFormat,

    /// Make the reference days_between reject non-datetime operands
    #[arg(long)]
    pub strict_dates: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            seed: None,
            sandbox: None,
            keep_sandbox: false,
            log: PathBuf::from(DEFAULT_LOG),
            format: LogFormat::Text,
            strict_dates: false,
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_parses() {
        let cli = Cli::try_parse_from(["minefuzz"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_run_flags() {
        let cli = Cli::try_parse_from([
            "minefuzz", "run", "-n", "10", "--seed", "42", "--format", "json", "--strict-dates",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Run(args)) => {
                assert_eq!(args.iterations, 10);
                assert_eq!(args.seed, Some(42));
                assert_eq!(args.format, LogFormat::Json);
                assert!(args.strict_dates);
                assert_eq!(args.log, PathBuf::from(DEFAULT_LOG));
            }
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn test_run_defaults_match_default_args() {
        let cli = Cli::try_parse_from(["minefuzz", "run"]).unwrap();
        let Some(Commands::Run(args)) = cli.command else {
            panic!("expected run command");
        };
        let default = RunArgs::default();

        assert_eq!(args.iterations, default.iterations);
        assert_eq!(args.log, default.log);
        assert_eq!(args.format, default.format);
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["minefuzz", "run", "--format", "xml"]).is_err());
    }
}
