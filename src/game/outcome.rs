use std::fmt;
use std::time::Duration;

use log::info;

use crate::board::Color;
use crate::evaluate::GameEnding;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MatchResult {
    WhiteWins,
    BlackWins,
    Draw,
    /// The match stopped without a scored ending: fivefold repetition, the
    /// move limit, or no provider could produce a move.
    Unknown,
}

/// Fivefold repetition ends the game without being scored as a draw.
impl From<GameEnding> for MatchResult {
    fn from(ending: GameEnding) -> Self {
        match ending {
            GameEnding::Checkmate {
                winner: Color::White,
            } => MatchResult::WhiteWins,
            GameEnding::Checkmate {
                winner: Color::Black,
            } => MatchResult::BlackWins,
            GameEnding::Stalemate
            | GameEnding::InsufficientMaterial
            | GameEnding::SeventyFiveMoveRule => MatchResult::Draw,
            GameEnding::FivefoldRepetition => MatchResult::Unknown,
        }
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = match self {
            MatchResult::WhiteWins => "white wins",
            MatchResult::BlackWins => "black wins",
            MatchResult::Draw => "draw",
            MatchResult::Unknown => "game over",
        };
        write!(f, "{}", result)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchOutcome {
    pub white_id: String,
    pub black_id: String,
    pub result: MatchResult,
    /// How the game ended, when it reached a terminal position.
    pub ending: Option<GameEnding>,
    pub moves: usize,
    pub elapsed: Duration,
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = match self.result {
            MatchResult::WhiteWins => format!("{} (white) wins", self.white_id),
            MatchResult::BlackWins => format!("{} (black) wins", self.black_id),
            other => other.to_string(),
        };
        write!(
            f,
            "{} vs {}: {}",
            self.white_id, self.black_id, result
        )?;
        if let Some(ending) = self.ending {
            write!(f, " by {:?}", ending)?;
        }
        write!(f, " after {} moves in {:.1?}", self.moves, self.elapsed)
    }
}

/// Receives the outcome of every finished match.
pub trait MatchReporter {
    fn report(&mut self, outcome: &MatchOutcome);
}

/// Logs each outcome at info level.
#[derive(Debug, Default)]
pub struct LogReporter;

impl MatchReporter for LogReporter {
    fn report(&mut self, outcome: &MatchOutcome) {
        info!("{}", outcome);
    }
}

/// Running totals across matches.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoreTally {
    pub white_wins: u32,
    pub black_wins: u32,
    pub draws: u32,
    pub unknown: u32,
}

impl ScoreTally {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn games(&self) -> u32 {
        self.white_wins + self.black_wins + self.draws + self.unknown
    }

    pub fn record(&mut self, result: MatchResult) {
        match result {
            MatchResult::WhiteWins => self.white_wins += 1,
            MatchResult::BlackWins => self.black_wins += 1,
            MatchResult::Draw => self.draws += 1,
            MatchResult::Unknown => self.unknown += 1,
        }
    }
}

impl MatchReporter for ScoreTally {
    fn report(&mut self, outcome: &MatchOutcome) {
        self.record(outcome.result);
    }
}

impl fmt::Display for ScoreTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "games: {}, white wins: {}, black wins: {}, draws: {}, unfinished: {}",
            self.games(),
            self.white_wins,
            self.black_wins,
            self.draws,
            self.unknown
        )
    }
}

impl<R: MatchReporter + ?Sized> MatchReporter for &mut R {
    fn report(&mut self, outcome: &MatchOutcome) {
        (**self).report(outcome);
    }
}

impl<A: MatchReporter, B: MatchReporter> MatchReporter for (A, B) {
    fn report(&mut self, outcome: &MatchOutcome) {
        self.0.report(outcome);
        self.1.report(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(result: MatchResult) -> MatchOutcome {
        MatchOutcome {
            white_id: "search".to_string(),
            black_id: "remote".to_string(),
            result,
            ending: None,
            moves: 12,
            elapsed: Duration::from_millis(1500),
        }
    }

    #[test]
    fn test_result_from_game_ending() {
        assert_eq!(
            MatchResult::from(GameEnding::Checkmate {
                winner: Color::Black
            }),
            MatchResult::BlackWins
        );
        assert_eq!(
            MatchResult::from(GameEnding::Checkmate {
                winner: Color::White
            }),
            MatchResult::WhiteWins
        );
        for ending in [
            GameEnding::Stalemate,
            GameEnding::InsufficientMaterial,
            GameEnding::SeventyFiveMoveRule,
        ] {
            assert_eq!(MatchResult::from(ending), MatchResult::Draw);
        }
        assert_eq!(
            MatchResult::from(GameEnding::FivefoldRepetition),
            MatchResult::Unknown
        );
    }

    #[test]
    fn test_tally_accumulates() {
        let mut tally = ScoreTally::new();
        for result in [
            MatchResult::WhiteWins,
            MatchResult::Draw,
            MatchResult::WhiteWins,
            MatchResult::BlackWins,
            MatchResult::Unknown,
        ] {
            tally.report(&outcome(result));
        }

        assert_eq!(tally.white_wins, 2);
        assert_eq!(tally.black_wins, 1);
        assert_eq!(tally.draws, 1);
        assert_eq!(tally.unknown, 1);
        assert_eq!(tally.games(), 5);
    }

    #[test]
    fn test_paired_reporters_both_receive_outcome() {
        let mut first = ScoreTally::new();
        let mut second = ScoreTally::new();
        (&mut first, &mut second).report(&outcome(MatchResult::Draw));
        assert_eq!(first.draws, 1);
        assert_eq!(second.draws, 1);
    }

    #[test]
    fn test_outcome_display_names_the_winner() {
        let text = outcome(MatchResult::BlackWins).to_string();
        assert!(text.starts_with("search vs remote: remote (black) wins"));
        assert!(text.contains("12 moves"));
    }
}
