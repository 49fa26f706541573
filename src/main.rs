use clap::Parser;
use dividend_extractor::cli::{log_level, run, Cli};
use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = easy_logging::init(module_path!(), log_level(cli.verbose)) {
        let _ = writeln!(io::stderr(), "Failed to initialize the logging: {err}.");
        return ExitCode::FAILURE;
    }

    run(cli)
}
