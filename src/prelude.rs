//! Common types re-exported for convenience.

pub use crate::board::{Board, Color, Piece};
pub use crate::chess_move::ChessMove;
pub use crate::evaluate::GameEnding;
pub use crate::game::{MatchConfig, MatchLoop, MatchOutcome, MatchReporter, MatchResult};
pub use crate::provider::{MoveProvider, MoveSource, ProviderError, ProviderKind};
pub use crate::searcher::{best_move, SearchError};
pub use common::bitboard::{Bitboard, Square};
