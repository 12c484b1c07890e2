//! Shared utilities for CLI commands.

use chessmatch::board::Board;

/// The position given with `--fen`, or the standard starting position.
pub(crate) fn starting_position(fen: Option<Board>) -> Board {
    fen.unwrap_or_default()
}
