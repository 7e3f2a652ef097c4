//! # shipcheck CLI entry point
//!
//! Parses command-line arguments, installs logging, and dispatches to
//! subcommand handlers.

use std::io::Write;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use shipcheck_cli::check::{run_check, CheckArgs};
use shipcheck_cli::classify::{run_classify, ClassifyArgs};
use shipcheck_cli::rules::{run_rules, RulesArgs};

/// Shipment diagnostics.
///
/// Evaluates shipment snapshots against the rule catalog and reports
/// critical issues, warnings, and suggestions.
#[derive(Parser, Debug)]
#[command(name = "shipcheck", version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging. Repeat for more (-v, -vv, -vvv).
    /// Ignored when RUST_LOG is set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate a shipment snapshot and print diagnostics.
    Check(CheckArgs),

    /// List the rule catalog in evaluation order.
    Rules(RulesArgs),

    /// Classify location codes as seaport, airport, or unknown.
    Classify(ClassifyArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = match &cli.command {
        Commands::Check(args) => run_check(args, &mut out),
        Commands::Rules(args) => run_rules(args, &mut out),
        Commands::Classify(args) => run_classify(args, &mut out),
    };
    let result = flushed(result, &mut out);

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

/// Flush `out`, turning a failed flush into an error even when the command
/// itself succeeded.
fn flushed<W: Write>(result: anyhow::Result<u8>, out: &mut W) -> anyhow::Result<u8> {
    let flush = out.flush().context("failed to flush output");
    let code = result?;
    flush?;
    Ok(code)
}

fn init_tracing(verbose: u8, json: bool) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shipcheck_core::{Scope, Severity};

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn flush_failure_is_an_error() {
        let err = flushed(Ok(0), &mut BrokenPipe).unwrap_err();
        assert!(format!("{err:#}").contains("failed to flush output"));
        assert_eq!(flushed(Ok(2), &mut Vec::new()).unwrap(), 2);
        let err = flushed(Err(anyhow::anyhow!("bad snapshot")), &mut BrokenPipe).unwrap_err();
        assert!(err.to_string().contains("bad snapshot"));
    }

    #[test]
    fn cli_parse_check_with_filters() {
        let cli = Cli::try_parse_from([
            "shipcheck",
            "check",
            "state.json",
            "--scope",
            "cargo",
            "--fail-on",
            "warning",
            "--format",
            "json",
        ])
        .unwrap();
        let Commands::Check(args) = cli.command else {
            panic!("expected check");
        };
        assert_eq!(args.state.to_str(), Some("state.json"));
        assert_eq!(args.scope, Some(Scope::Cargo));
        assert_eq!(args.fail_on, Some(Severity::Warning));
        assert!(args.engine.tables.is_none());
    }

    #[test]
    fn cli_parse_rejects_unknown_scope() {
        assert!(Cli::try_parse_from(["shipcheck", "check", "s.json", "--scope", "vessel"]).is_err());
    }

    #[test]
    fn cli_parse_rules_with_config() {
        let cli = Cli::try_parse_from(["shipcheck", "-vv", "rules", "--config", "rules.yaml"]).unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Rules(args) = cli.command else {
            panic!("expected rules");
        };
        assert_eq!(args.engine.config.as_deref().and_then(|p| p.to_str()), Some("rules.yaml"));
    }

    #[test]
    fn cli_parse_classify_requires_code() {
        assert!(Cli::try_parse_from(["shipcheck", "classify"]).is_err());
        let cli = Cli::try_parse_from(["shipcheck", "classify", "CNSHA", "LAX", "--log-json"]).unwrap();
        assert!(cli.log_json);
        assert!(matches!(cli.command, Commands::Classify(ref a) if a.codes.len() == 2));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
