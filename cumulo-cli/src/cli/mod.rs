//! Command-line interface orchestration for the cumulo solver.
//!
//! The CLI reads a file of `x,y,z` coordinates, runs the bounded-prefix and
//! full-scan clustering traversals over the sorted pairwise distances, and
//! prints the two headline results.

mod commands;

pub use commands::{Cli, CliError, ExecutionSummary, render_summary, run_cli};

#[cfg(test)]
mod tests;
