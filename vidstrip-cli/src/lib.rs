// vidstrip-cli/src/lib.rs
//
// Library portion of the vidstrip CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;

// Re-export items needed by the binary or integration tests
pub use cli::{CheckArgs, Cli, Commands, GenerateArgs, ToolArgs};
pub use commands::check::run_check;
pub use commands::generate::run_generate;
