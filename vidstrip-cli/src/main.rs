// vidstrip-cli/src/main.rs
//
// Entry point for the vidstrip binary.
//
// Responsibilities:
// - Parsing command-line arguments.
// - Initialising logging.
// - Dispatching to the selected subcommand.
// - Mapping failures to process exit codes (a failed tool's exit code is
//   passed through).

use clap::Parser;
use console::style;
use vidstrip_cli::error::exit_code_for;
use vidstrip_cli::logging::init_logging;
use vidstrip_cli::{Cli, Commands, run_check, run_generate};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Generate(args) => run_generate(args).map(|_| ()),
        Commands::Check(args) => run_check(args),
    };

    if let Err(e) = result {
        eprintln!("{} {e:#}", style("Error:").red().bold());
        std::process::exit(exit_code_for(&e));
    }
}
