//! Command line interface for bluegen.
//!
//! `bluegen generate` writes Go bindings for every interface found in the
//! input descriptions; `bluegen check` verifies previously generated files are
//! current without touching them.

pub mod check;
pub mod common;
pub mod generate;

use clap::{CommandFactory, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Environment variable controlling log output.
pub const LOG_ENV: &str = "BLUEGEN_LOG";

const LOG_TARGETS: [&str; 3] = ["bluegen_common", "bluegen_core", "bluegen_cli"];

#[derive(Parser, Debug)]
#[command(
    name = "bluegen",
    version,
    about = "\x1b[34mbluegen\x1b[0m generates Go bindings from BlueZ D-Bus API descriptions"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate Go bindings
    Generate(generate::GenerateArgs),
    /// Check that generated bindings are up to date
    Check(check::CheckArgs),
}

/// Parse `args` (program name first) and run the selected command.
///
/// Returns the process exit code.
pub fn run_cli(args: Vec<String>) -> i32 {
    match Cli::try_parse_from(args) {
        Ok(cli) => match cli.command {
            Some(Commands::Generate(args)) => {
                init_tracing(args.input.verbose);
                generate::run(args)
            }
            Some(Commands::Check(args)) => {
                init_tracing(args.input.verbose);
                check::run(args)
            }
            None => {
                let mut cmd = Cli::command();
                let _ = cmd.print_help();
                println!();
                0
            }
        },
        Err(e) => {
            let code = e.exit_code();
            let _ = e.print();
            code
        }
    }
}

/// Build the tracing filter from the `BLUEGEN_LOG` value.
///
/// A plain level applies to the bluegen crates only; anything else is used
/// as a full filter spec.
fn log_filter(env: Option<&str>, verbose: bool) -> String {
    let targets = |level: &str| {
        LOG_TARGETS
            .iter()
            .map(|target| format!("{target}={level}"))
            .collect::<Vec<_>>()
            .join(",")
    };

    match env {
        Some(level) if is_plain_level(level) => targets(&level.to_ascii_lowercase()),
        Some(spec) if !spec.trim().is_empty() => spec.to_string(),
        _ if verbose => targets("debug"),
        _ => targets("info"),
    }
}

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}

fn init_tracing(verbose: bool) {
    let env = std::env::var(LOG_ENV).ok();
    let filter = log_filter(env.as_deref(), verbose);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        debug!("Tracing subscriber already initialized.");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_default() {
        assert_eq!(
            log_filter(None, false),
            "bluegen_common=info,bluegen_core=info,bluegen_cli=info"
        );
        assert_eq!(
            log_filter(None, true),
            "bluegen_common=debug,bluegen_core=debug,bluegen_cli=debug"
        );
    }

    #[test]
    fn test_log_filter_plain_level() {
        assert_eq!(
            log_filter(Some("WARN"), true),
            "bluegen_common=warn,bluegen_core=warn,bluegen_cli=warn"
        );
    }

    #[test]
    fn test_log_filter_spec() {
        assert_eq!(log_filter(Some("bluegen_core=trace"), false), "bluegen_core=trace");
        assert_eq!(
            log_filter(Some("  "), false),
            "bluegen_common=info,bluegen_core=info,bluegen_cli=info"
        );
    }

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "bluegen", "generate", "--input", "docs", "--out-dir", "out", "-v",
        ])
        .unwrap();
        let Some(Commands::Generate(args)) = cli.command else {
            unreachable!("expected the generate command");
        };
        assert!(args.input.verbose);
        assert!(args.input.config.is_none());
        assert_eq!(args.input.out_dir.to_str(), Some("out"));
    }

    #[test]
    fn test_parse_requires_out_dir() {
        assert!(Cli::try_parse_from(["bluegen", "check", "--input", "docs"]).is_err());
    }

    #[test]
    fn test_unknown_command_exit_code() {
        assert_eq!(run_cli(vec!["bluegen".into(), "frobnicate".into()]), 2);
    }
}
