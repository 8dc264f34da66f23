//! `bluegen` command line entry point.

fn main() {
    std::process::exit(bluegen_cli::run_cli(std::env::args().collect()));
}
