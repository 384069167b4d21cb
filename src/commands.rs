//! Subcommands of the `mj` binary that do not parse documents.
pub mod generate;
