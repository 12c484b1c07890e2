//! Command-line interface for running matches and engine utilities.
//! This module is not part of the public library API.

pub mod args;
pub mod commands;

pub use args::Chess;
