// ============================================================================
// vidstrip-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: env_logger initialisation for the vidstrip binary
//
// The core library logs through the `log` facade; this module installs the
// env_logger backend with a compact format. Output of the external tools
// arrives under the `vidstrip::tools` target and is printed indented.
//
// USAGE:
// - default: info
// - --verbose: debug
// - RUST_LOG, when set, overrides both (e.g. RUST_LOG=vidstrip::tools=off)

use std::io::Write;

use log::LevelFilter;
use vidstrip_core::logging::TOOL_OUTPUT_TARGET;

/// Log level for the given verbosity flag.
pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Installs the global logger. Later calls are no-ops.
pub fn init_logging(verbose: bool) {
    let level = level_for(verbose);
    let result = env_logger::Builder::new()
        .filter_level(level)
        .parse_env("RUST_LOG")
        .format(|buf, record| {
            if record.target() == TOOL_OUTPUT_TARGET {
                return writeln!(buf, "    {}", record.args());
            }
            let style = buf.default_level_style(record.level());
            writeln!(buf, "{style}{:<5}{style:#} {}", record.level(), record.args())
        })
        .try_init();

    if result.is_ok() {
        log::debug!("Logger initialized with level: {level}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for(false), LevelFilter::Info);
        assert_eq!(level_for(true), LevelFilter::Debug);
    }
}
