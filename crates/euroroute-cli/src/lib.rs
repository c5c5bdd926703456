//! euroroute CLI library.
//!
//! Subcommand handlers, terminal styling, and output formatting for the
//! `euroroute` binary.

pub mod commands;
pub mod output;
pub mod terminal;
