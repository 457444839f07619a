use clap::Parser;
use stratdeck::cli::{Cli, run};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
