//! `bluegen check`: compare generated bindings on disk with fresh output.

use bluegen_core::{FileStatus, check_all};
use clap::Args;
use console::{Style, style};
use similar::{ChangeTag, TextDiff};

use crate::common::{InputArgs, Prepared, prepare, run_command};

/// Arguments for `bluegen check`
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Input, output and configuration
    #[command(flatten)]
    pub input: InputArgs,
    /// Print a diff for every stale file
    #[arg(long)]
    pub diff: bool,
}

/// Run the command, returning the exit code.
pub fn run(args: CheckArgs) -> i32 {
    run_command(|| run_inner(&args))
}

fn run_inner(args: &CheckArgs) -> Result<(), String> {
    let Prepared {
        groups,
        config,
        renderer,
    } = prepare(&args.input)?;

    let report = check_all(&groups, &args.input.out_dir, &config, &renderer);

    for file in report.outdated() {
        match &file.status {
            FileStatus::Missing => {
                println!("{} {}", style("missing").yellow(), file.path.display());
            }
            FileStatus::Stale { current } => {
                println!("{} {}", style("stale").yellow(), file.path.display());
                if args.diff {
                    print!(
                        "{}",
                        unified_diff(&file.path.display().to_string(), current, &file.rendered)
                    );
                }
            }
            FileStatus::UpToDate => {}
        }
    }
    for failure in &report.failures {
        eprintln!("{} {}", style("failed").red().bold(), failure.error);
    }

    if report.is_clean() {
        println!(
            "{} {} binding(s) up to date",
            style("✓").green().bold(),
            report.files.len()
        );
        return Ok(());
    }

    let outdated = report.outdated().count();
    Err(format!(
        "{outdated} binding(s) out of date, {} failed; run `bluegen generate` to update",
        report.failures.len()
    ))
}

/// Unified diff from the file on disk to the freshly generated content.
///
/// Returns an empty string when both are equal.
pub fn unified_diff(label: &str, current: &str, rendered: &str) -> String {
    if current == rendered {
        return String::new();
    }

    let diff = TextDiff::from_lines(current, rendered);
    let bold = Style::new().bold();
    let mut output = String::new();

    output.push_str(&format!("{}\n", bold.apply_to(format!("--- {label} (on disk)"))));
    output.push_str(&format!("{}\n", bold.apply_to(format!("+++ {label} (generated)"))));

    for (idx, group) in diff.grouped_ops(3).iter().enumerate() {
        if idx > 0 {
            output.push_str("...\n");
        }
        for op in group {
            for change in diff.iter_changes(op) {
                let (sign, line_style) = match change.tag() {
                    ChangeTag::Delete => ("-", Style::new().red()),
                    ChangeTag::Insert => ("+", Style::new().green()),
                    ChangeTag::Equal => (" ", Style::new()),
                };
                let mut line = format!("{sign}{}", change.value());
                if change.missing_newline() {
                    line.push('\n');
                }
                output.push_str(&line_style.apply_to(line).to_string());
            }
        }
    }

    output
}
