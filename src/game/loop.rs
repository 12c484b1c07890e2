use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use thiserror::Error;

use crate::board::error::BoardError;
use crate::board::{Board, Color};
use crate::chess_move::ChessMove;
use crate::provider::{MoveProvider, MoveSource, ProviderError, RandomProvider};

use super::outcome::{MatchOutcome, MatchReporter, MatchResult};

pub const DEFAULT_SEARCH_DEPTH: u8 = 3;

#[derive(Error, Debug, PartialEq)]
pub enum GameError {
    #[error("Board error: {0}")]
    BoardError(#[from] BoardError),
}

#[derive(Clone, Debug)]
pub struct MatchConfig {
    pub starting_position: Board,
    /// Depth handed to every provider; only the search provider uses it.
    pub search_depth: u8,
    /// Pause after each applied move.
    pub turn_delay: Duration,
    /// Stop with an unknown result after this many moves.
    pub move_limit: Option<usize>,
    /// Seed for the last-resort random provider.
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            starting_position: Board::default(),
            search_depth: DEFAULT_SEARCH_DEPTH,
            turn_delay: Duration::ZERO,
            move_limit: None,
            seed: None,
        }
    }
}

/// Plays one game between two providers, alternating turns until the
/// position is terminal.
pub struct MatchLoop {
    board: Board,
    white: MoveProvider,
    black: MoveProvider,
    config: MatchConfig,
    fallback: RandomProvider,
    moves: Vec<ChessMove>,
}

impl MatchLoop {
    pub fn new(white: MoveProvider, black: MoveProvider, config: MatchConfig) -> Self {
        Self {
            board: config.starting_position.clone(),
            white,
            black,
            fallback: RandomProvider::new(config.seed),
            config,
            moves: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Moves played so far, in order.
    pub fn moves(&self) -> &[ChessMove] {
        &self.moves
    }

    pub fn provider(&self, color: Color) -> &MoveProvider {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    /// Runs the match to completion and hands the outcome to `reporter`
    /// exactly once.
    pub fn run<R: MatchReporter>(&mut self, reporter: &mut R) -> Result<MatchOutcome, GameError> {
        let started_at = Instant::now();
        info!(
            "starting match: {} (white) vs {} (black)",
            self.white.id(),
            self.black.id()
        );

        let (result, ending) = loop {
            if let Some(ending) = self.board.game_ending() {
                info!("game over: {:?}", ending);
                break (MatchResult::from(ending), Some(ending));
            }

            if let Some(limit) = self.config.move_limit {
                if self.moves.len() >= limit {
                    info!("move limit of {} reached", limit);
                    break (MatchResult::Unknown, None);
                }
            }

            let mover = self.board.turn();
            let chess_move = match self.request_move(mover) {
                Some(chess_move) => chess_move,
                None => {
                    warn!("no move available for {}", mover);
                    break (MatchResult::Unknown, None);
                }
            };

            self.board.apply_legal(chess_move)?;
            self.moves.push(chess_move);
            info!(
                "{}. {} ({}) plays {}",
                self.moves.len(),
                mover,
                self.provider(mover).id(),
                chess_move
            );
            debug!("\n{}", self.board);

            if !self.config.turn_delay.is_zero() {
                thread::sleep(self.config.turn_delay);
            }
        };

        let outcome = MatchOutcome {
            white_id: self.white.id().to_string(),
            black_id: self.black.id().to_string(),
            result,
            ending,
            moves: self.moves.len(),
            elapsed: started_at.elapsed(),
        };
        reporter.report(&outcome);
        Ok(outcome)
    }

    /// Asks the mover's provider for a move, substituting a random move when
    /// the provider is unavailable.
    fn request_move(&mut self, mover: Color) -> Option<ChessMove> {
        let depth = self.config.search_depth;
        let provider = match mover {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        };

        match provider.provide(&mut self.board, depth) {
            Ok(chess_move) => Some(chess_move),
            Err(ProviderError::NoLegalMoves) => None,
            Err(error @ ProviderError::Unavailable { .. }) => {
                warn!("{} provider failed, playing a random move: {}", mover, error);
                self.fallback.choose(&mut self.board).ok()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use common::bitboard::*;

    use super::*;
    use crate::evaluate::GameEnding;
    use crate::game::outcome::ScoreTally;
    use crate::input_handler::fen::parse_fen;
    use crate::input_handler::{InputError, SquareSelector};
    use crate::provider::{HumanProvider, SearchProvider};

    struct Clicks(Vec<Square>);

    impl SquareSelector for Clicks {
        fn select_square(&mut self) -> Result<Square, InputError> {
            if self.0.is_empty() {
                return Err(InputError::InputClosed);
            }
            Ok(self.0.remove(0))
        }
    }

    fn human(clicks: Vec<Square>) -> MoveProvider {
        MoveProvider::Human(HumanProvider::new(Box::new(Clicks(clicks))))
    }

    fn random(seed: u64) -> MoveProvider {
        MoveProvider::Random(RandomProvider::new(Some(seed)))
    }

    #[test]
    fn test_fools_mate_is_attributed_to_black() {
        let mut game = MatchLoop::new(
            human(vec![F2, F3, G2, G4]),
            human(vec![E7, E5, D8, H4]),
            MatchConfig::default(),
        );
        let mut tally = ScoreTally::new();
        let outcome = game.run(&mut tally).unwrap();

        assert_eq!(outcome.result, MatchResult::BlackWins);
        assert_eq!(
            outcome.ending,
            Some(GameEnding::Checkmate {
                winner: Color::Black
            })
        );
        assert_eq!(outcome.moves, 4);
        assert_eq!(outcome.white_id, "human");
        assert_eq!(tally.black_wins, 1);
        assert_eq!(tally.games(), 1);
    }

    #[test]
    fn test_fivefold_repetition_reports_unknown() {
        let white = [G1, F3, F3, G1].repeat(4);
        let black = [G8, F6, F6, G8].repeat(4);
        let mut game = MatchLoop::new(human(white), human(black), MatchConfig::default());
        let mut tally = ScoreTally::new();
        let outcome = game.run(&mut tally).unwrap();

        assert_eq!(outcome.ending, Some(GameEnding::FivefoldRepetition));
        assert_eq!(outcome.result, MatchResult::Unknown);
        assert_eq!(outcome.moves, 16);
        assert_eq!(tally.unknown, 1);
        assert_eq!(tally.draws, 0);
    }

    #[test]
    fn test_move_limit_reports_unknown() {
        let config = MatchConfig {
            move_limit: Some(10),
            ..Default::default()
        };
        let mut game = MatchLoop::new(random(1), random(2), config);
        let mut tally = ScoreTally::new();
        let outcome = game.run(&mut tally).unwrap();

        assert!(outcome.moves <= 10);
        if outcome.moves == 10 {
            assert_eq!(outcome.result, MatchResult::Unknown);
        }
        assert_eq!(game.moves().len(), outcome.moves);
        assert_eq!(tally.games(), 1);
    }

    #[test]
    fn test_terminal_start_position_plays_no_moves() {
        let config = MatchConfig {
            starting_position: parse_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap(),
            ..Default::default()
        };
        let mut game = MatchLoop::new(random(1), random(2), config);
        let outcome = game.run(&mut ScoreTally::new()).unwrap();

        assert_eq!(outcome.result, MatchResult::Draw);
        assert_eq!(outcome.ending, Some(GameEnding::Stalemate));
        assert_eq!(outcome.moves, 0);
    }

    #[test]
    fn test_unavailable_provider_is_replaced_by_random_moves() {
        let config = MatchConfig {
            move_limit: Some(2),
            seed: Some(9),
            ..Default::default()
        };
        let mut game = MatchLoop::new(human(vec![]), random(2), config);
        let outcome = game.run(&mut ScoreTally::new()).unwrap();

        assert_eq!(outcome.moves, 2);
        assert_eq!(outcome.result, MatchResult::Unknown);
    }

    #[test]
    fn test_search_converts_material_advantage() {
        // white to move mates or wins the rook; either way the search keeps
        // playing legal moves until the limit
        let config = MatchConfig {
            starting_position: parse_fen("4k3/8/8/8/8/8/3r4/R3K2Q w - - 0 1").unwrap(),
            search_depth: 2,
            move_limit: Some(6),
            ..Default::default()
        };
        let mut game = MatchLoop::new(
            MoveProvider::Search(SearchProvider::new()),
            MoveProvider::Search(SearchProvider::new()),
            config,
        );
        let outcome = game.run(&mut ScoreTally::new()).unwrap();

        assert!(outcome.moves > 0);
        assert_eq!(game.moves().len(), outcome.moves);
        assert!(crate::evaluate::score(game.board()) > 0);
    }
}
