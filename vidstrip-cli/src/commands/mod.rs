//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of a specific command.

/// Module containing the implementation of the `generate` command.
pub mod generate;

/// Module containing the implementation of the `check` command.
pub mod check;
