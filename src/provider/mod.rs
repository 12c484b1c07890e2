//! Interchangeable sources of moves for one side of a match.

pub mod human;
pub mod random;
pub mod remote;
pub mod search;
pub mod uci_engine;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::board::Board;
use crate::chess_move::ChessMove;

pub use human::HumanProvider;
pub use random::RandomProvider;
pub use remote::{RemoteServiceConfig, RemoteServiceProvider};
pub use search::SearchProvider;
pub use uci_engine::{SubprocessEngineConfig, SubprocessEngineProvider};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProviderError {
    #[error("move provider unavailable: {reason}")]
    Unavailable { reason: String },
    #[error("no legal moves in the current position")]
    NoLegalMoves,
}

/// Something that can pick a move for the side to move.
///
/// Implementations return a move that is legal in `board`, or an error. The
/// board may be mutated while a move is chosen but is restored before
/// returning.
pub trait MoveSource {
    fn provide(&mut self, board: &mut Board, depth: u8) -> Result<ChessMove, ProviderError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Search,
    Random,
    Human,
    RemoteService,
    SubprocessEngine,
}

impl ProviderKind {
    pub fn id(&self) -> &'static str {
        match self {
            ProviderKind::Search => "search",
            ProviderKind::Random => "random",
            ProviderKind::Human => "human",
            ProviderKind::RemoteService => "remote",
            ProviderKind::SubprocessEngine => "engine",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "search" => Ok(ProviderKind::Search),
            "random" => Ok(ProviderKind::Random),
            "human" => Ok(ProviderKind::Human),
            "remote" => Ok(ProviderKind::RemoteService),
            "engine" => Ok(ProviderKind::SubprocessEngine),
            _ => Err(format!(
                "unknown provider {:?}, expected one of: search, random, human, remote, engine",
                s
            )),
        }
    }
}

/// Settings needed to build any provider kind.
#[derive(Clone, Debug, Default)]
pub struct ProviderConfig {
    pub remote: RemoteServiceConfig,
    pub engine: SubprocessEngineConfig,
    /// Search root moves on the rayon thread pool.
    pub parallel_search: bool,
    /// Seed for random choices, including fallbacks. `None` seeds from entropy.
    pub seed: Option<u64>,
}

pub enum MoveProvider {
    Search(SearchProvider),
    Random(RandomProvider),
    Human(HumanProvider),
    RemoteService(RemoteServiceProvider),
    SubprocessEngine(SubprocessEngineProvider),
}

macro_rules! delegate_to_variants {
    ($self:ident, $method:ident, $($arg:expr),*) => {
        match $self {
            MoveProvider::Search(p) => p.$method($($arg),*),
            MoveProvider::Random(p) => p.$method($($arg),*),
            MoveProvider::Human(p) => p.$method($($arg),*),
            MoveProvider::RemoteService(p) => p.$method($($arg),*),
            MoveProvider::SubprocessEngine(p) => p.$method($($arg),*),
        }
    };
}

impl MoveProvider {
    /// Builds the provider selected by `kind`. Human providers read squares
    /// from standard input.
    pub fn from_kind(kind: ProviderKind, config: &ProviderConfig) -> Result<Self, ProviderError> {
        let provider = match kind {
            ProviderKind::Search if config.parallel_search => {
                MoveProvider::Search(SearchProvider::parallel())
            }
            ProviderKind::Search => MoveProvider::Search(SearchProvider::new()),
            ProviderKind::Random => MoveProvider::Random(RandomProvider::new(config.seed)),
            ProviderKind::Human => MoveProvider::Human(HumanProvider::stdin()),
            ProviderKind::RemoteService => MoveProvider::RemoteService(
                RemoteServiceProvider::new(config.remote.clone(), config.seed)?,
            ),
            ProviderKind::SubprocessEngine => MoveProvider::SubprocessEngine(
                SubprocessEngineProvider::new(config.engine.clone(), config.seed),
            ),
        };
        Ok(provider)
    }

    pub fn kind(&self) -> ProviderKind {
        match self {
            MoveProvider::Search(_) => ProviderKind::Search,
            MoveProvider::Random(_) => ProviderKind::Random,
            MoveProvider::Human(_) => ProviderKind::Human,
            MoveProvider::RemoteService(_) => ProviderKind::RemoteService,
            MoveProvider::SubprocessEngine(_) => ProviderKind::SubprocessEngine,
        }
    }

    pub fn id(&self) -> &'static str {
        self.kind().id()
    }
}

impl MoveSource for MoveProvider {
    fn provide(&mut self, board: &mut Board, depth: u8) -> Result<ChessMove, ProviderError> {
        delegate_to_variants!(self, provide, board, depth)
    }
}

impl fmt::Debug for MoveProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MoveProvider({})", self.id())
    }
}
