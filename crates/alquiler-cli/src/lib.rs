//! # alquiler-cli
//!
//! Command tree and terminal output for driving the booking workflow.
//! The `alquiler` binary parses [`Cli`], loads configuration, sets up
//! logging, and hands over to [`Cli::execute`].

pub mod commands;
pub mod context;
pub mod output;

pub use commands::Cli;
