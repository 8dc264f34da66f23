//! `bluegen generate`: write Go bindings for every described interface.

use bluegen_core::generate_all;
use clap::Args;
use console::style;

use crate::common::{InputArgs, Prepared, prepare, run_command};

/// Arguments for `bluegen generate`
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Input, output and configuration
    #[command(flatten)]
    pub input: InputArgs,
}

/// Run the command, returning the exit code.
pub fn run(args: GenerateArgs) -> i32 {
    run_command(|| run_inner(&args))
}

fn run_inner(args: &GenerateArgs) -> Result<(), String> {
    let Prepared {
        groups,
        config,
        renderer,
    } = prepare(&args.input)?;

    let report = generate_all(&groups, &args.input.out_dir, &config, &renderer);

    for path in &report.generated {
        println!("{} {}", style("generated").green(), path.display());
    }
    for failure in &report.failures {
        eprintln!("{} {}", style("failed").red().bold(), failure.error);
    }

    let total = report.generated.len() + report.failures.len();
    if report.is_success() {
        println!(
            "{} {total} binding(s) in {}",
            style("✓").green().bold(),
            args.input.out_dir.display()
        );
        Ok(())
    } else {
        Err(format!(
            "{} of {total} interface(s) failed to generate",
            report.failures.len()
        ))
    }
}
