use std::time::Duration;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::Board;
use crate::chess_move::{ChessMove, MoveParseError};

use super::{MoveSource, ProviderError, RandomProvider};

pub const DEFAULT_REMOTE_URL: &str = "http://127.0.0.1:8000/move";
pub const DEFAULT_REMOTE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug)]
pub struct RemoteServiceConfig {
    pub url: String,
    pub timeout: Duration,
}

impl Default for RemoteServiceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_REMOTE_URL.to_string(),
            timeout: DEFAULT_REMOTE_TIMEOUT,
        }
    }
}

#[derive(Serialize, Debug)]
struct MoveRequest<'a> {
    fen: &'a str,
    depth: u8,
}

#[derive(Deserialize, Debug)]
struct MoveResponse {
    #[serde(rename = "move")]
    chess_move: String,
}

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("service answered with status {status}")]
    Status { status: reqwest::StatusCode },
    #[error("unparsable move: {0}")]
    InvalidMove(#[from] MoveParseError),
    #[error("illegal move {chess_move} for {fen}")]
    IllegalMove { chess_move: ChessMove, fen: String },
}

/// Asks an HTTP service for a move, posting the position as JSON:
/// `{"fen": "...", "depth": 3}` answered by `{"move": "e2e4"}`.
/// Every failure degrades to a random legal move.
pub struct RemoteServiceProvider {
    config: RemoteServiceConfig,
    client: reqwest::blocking::Client,
    fallback: RandomProvider,
}

impl RemoteServiceProvider {
    pub fn new(config: RemoteServiceConfig, seed: Option<u64>) -> Result<Self, ProviderError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|error| ProviderError::Unavailable {
                reason: error.to_string(),
            })?;

        Ok(Self {
            config,
            client,
            fallback: RandomProvider::new(seed),
        })
    }

    pub fn request_move(&self, board: &mut Board, depth: u8) -> Result<ChessMove, RemoteError> {
        let fen = board.to_fen();
        let response = self
            .client
            .post(&self.config.url)
            .json(&MoveRequest { fen: &fen, depth })
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status { status });
        }

        let body: MoveResponse = response.json()?;
        let chess_move = ChessMove::from_uci(&body.chess_move)?;
        if !board.legal_moves().contains(&chess_move) {
            return Err(RemoteError::IllegalMove { chess_move, fen });
        }

        debug!("{} answered {}", self.config.url, chess_move);
        Ok(chess_move)
    }
}

impl MoveSource for RemoteServiceProvider {
    fn provide(&mut self, board: &mut Board, depth: u8) -> Result<ChessMove, ProviderError> {
        match self.request_move(board, depth) {
            Ok(chess_move) => Ok(chess_move),
            Err(error) => {
                warn!(
                    "remote move service at {} failed, playing a random move: {}",
                    self.config.url, error
                );
                self.fallback.choose(board)
            }
        }
    }
}
