//! Implementation of the 'check' subcommand.
//!
//! Tries to start every configured tool and reports which ones are missing.

use console::style;
use log::info;
use vidstrip_core::check_tools;

use crate::cli::CheckArgs;
use crate::config::resolve_tool_options;
use crate::error::CliResult;

/// Main entry point for the check command.
pub fn run_check(args: CheckArgs) -> CliResult<()> {
    let options = resolve_tool_options(args.config.as_deref(), &args.tools)?;
    let results = check_tools(&options);

    let mut missing = 0;
    for (tool, result) in &results {
        match result {
            Ok(()) => println!("{} {tool}", style("[OK]  ").green()),
            Err(e) => {
                missing += 1;
                println!("{} {tool}: {e}", style("[FAIL]").red().bold());
            }
        }
    }

    if missing > 0 {
        anyhow::bail!("{missing} of {} external tools unavailable", results.len());
    }
    info!("External dependency check passed.");
    Ok(())
}
