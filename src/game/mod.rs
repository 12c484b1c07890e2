pub mod r#loop; // `loop` is reserved keyword, need to escape with `r#`
pub mod outcome;
pub mod position_counter;

pub use outcome::{LogReporter, MatchOutcome, MatchReporter, MatchResult, ScoreTally};
pub use r#loop::{GameError, MatchConfig, MatchLoop};
