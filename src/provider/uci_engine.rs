use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use thiserror::Error;

use crate::board::Board;
use crate::chess_move::{ChessMove, MoveParseError};

use super::{MoveSource, ProviderError, RandomProvider};

const DEFAULT_ENGINE_PATH: &str = "stockfish";
const DEFAULT_MOVETIME: Duration = Duration::from_millis(1000);
const DEFAULT_GRACE: Duration = Duration::from_secs(2);
const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone, Debug)]
pub struct SubprocessEngineConfig {
    pub path: PathBuf,
    pub args: Vec<String>,
    /// Thinking time passed to `go movetime`.
    pub movetime: Duration,
    /// Extra time allowed for `bestmove` to arrive after `movetime`.
    pub grace: Duration,
}

impl Default for SubprocessEngineConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_ENGINE_PATH),
            args: Vec::new(),
            movetime: DEFAULT_MOVETIME,
            grace: DEFAULT_GRACE,
        }
    }
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("engine io error: {0}")]
    Io(#[from] io::Error),
    #[error("engine did not answer {expected:?} in time")]
    Timeout { expected: &'static str },
    #[error("engine closed its output")]
    Closed,
    #[error("malformed bestmove line: {line:?}")]
    MalformedBestMove { line: String },
    #[error("unparsable move: {0}")]
    InvalidMove(#[from] MoveParseError),
    #[error("illegal move {chess_move}")]
    IllegalMove { chess_move: ChessMove },
}

/// A running UCI engine. Output lines are forwarded by a reader thread so
/// every wait can be bounded.
struct EngineProcess {
    process: Child,
    stdin: ChildStdin,
    lines: Receiver<String>,
}

impl EngineProcess {
    fn spawn(config: &SubprocessEngineConfig) -> Result<Self, EngineError> {
        let mut process = Command::new(&config.path)
            .args(&config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        let stdin = process.stdin.take().ok_or(EngineError::Closed)?;
        let stdout = process.stdout.take().ok_or(EngineError::Closed)?;

        let (sender, lines) = mpsc::channel();
        thread::spawn(move || {
            for line in BufReader::new(stdout).lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(_) => break,
                };
                if sender.send(line.trim().to_string()).is_err() {
                    break;
                }
            }
        });

        let mut engine = Self {
            process,
            stdin,
            lines,
        };
        engine.send_command("uci")?;
        engine.wait_for("uciok", HANDSHAKE_TIMEOUT)?;
        engine.send_command("isready")?;
        engine.wait_for("readyok", HANDSHAKE_TIMEOUT)?;
        Ok(engine)
    }

    fn send_command(&mut self, command: &str) -> Result<(), EngineError> {
        debug!("engine <- {}", command);
        writeln!(self.stdin, "{}", command)?;
        self.stdin.flush()?;
        Ok(())
    }

    /// Waits for a line starting with `expected` and returns it.
    fn wait_for(&self, expected: &'static str, timeout: Duration) -> Result<String, EngineError> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.lines.recv_timeout(remaining) {
                Ok(line) => {
                    debug!("engine -> {}", line);
                    if line.starts_with(expected) {
                        return Ok(line);
                    }
                }
                Err(RecvTimeoutError::Timeout) => return Err(EngineError::Timeout { expected }),
                Err(RecvTimeoutError::Disconnected) => return Err(EngineError::Closed),
            }
        }
    }

    fn best_move(
        &mut self,
        fen: &str,
        movetime: Duration,
        grace: Duration,
    ) -> Result<ChessMove, EngineError> {
        self.send_command(&format!("position fen {}", fen))?;
        self.send_command(&format!("go movetime {}", movetime.as_millis()))?;

        let line = self.wait_for("bestmove", movetime + grace)?;
        let notation = line
            .split_whitespace()
            .nth(1)
            .ok_or_else(|| EngineError::MalformedBestMove { line: line.clone() })?;
        Ok(ChessMove::from_uci(notation)?)
    }
}

impl Drop for EngineProcess {
    fn drop(&mut self) {
        let _ = self.send_command("quit");
        let _ = self.process.kill();
        let _ = self.process.wait();
    }
}

/// Plays the moves of an external UCI engine. The process is started on
/// first use and restarted after a failure. Whenever the engine cannot
/// produce a legal move in time, a random legal move is played instead.
pub struct SubprocessEngineProvider {
    config: SubprocessEngineConfig,
    engine: Option<EngineProcess>,
    fallback: RandomProvider,
}

impl SubprocessEngineProvider {
    pub fn new(config: SubprocessEngineConfig, seed: Option<u64>) -> Self {
        Self {
            config,
            engine: None,
            fallback: RandomProvider::new(seed),
        }
    }

    pub fn request_move(&mut self, board: &mut Board) -> Result<ChessMove, EngineError> {
        if self.engine.is_none() {
            info!("starting engine {}", self.config.path.display());
            self.engine = Some(EngineProcess::spawn(&self.config)?);
        }
        let engine = self.engine.as_mut().ok_or(EngineError::Closed)?;

        let chess_move = match engine.best_move(&board.to_fen(), self.config.movetime, self.config.grace)
        {
            Ok(chess_move) => chess_move,
            Err(error) => {
                self.engine = None;
                return Err(error);
            }
        };

        if !board.legal_moves().contains(&chess_move) {
            return Err(EngineError::IllegalMove { chess_move });
        }
        Ok(chess_move)
    }
}

impl MoveSource for SubprocessEngineProvider {
    fn provide(&mut self, board: &mut Board, _depth: u8) -> Result<ChessMove, ProviderError> {
        match self.request_move(board) {
            Ok(chess_move) => Ok(chess_move),
            Err(error) => {
                warn!(
                    "engine {} failed, playing a random move: {}",
                    self.config.path.display(),
                    error
                );
                self.fallback.choose(board)
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::std_move;
    use common::bitboard::*;

    /// A shell stand-in for a UCI engine that always answers `bestmove`.
    fn scripted_engine(bestmove: &str) -> SubprocessEngineConfig {
        let script = format!(
            r#"while read -r line; do
                case "$line" in
                    uci) echo "id name scripted"; echo "uciok" ;;
                    isready) echo "readyok" ;;
                    go*) echo "info depth 1"; echo "bestmove {}" ;;
                    quit) exit 0 ;;
                esac
            done"#,
            bestmove
        );
        SubprocessEngineConfig {
            path: PathBuf::from("sh"),
            args: vec!["-c".to_string(), script],
            movetime: Duration::from_millis(10),
            grace: Duration::from_secs(2),
        }
    }

    #[test]
    fn test_engine_move_is_used() {
        let mut provider = SubprocessEngineProvider::new(scripted_engine("e2e4 ponder e7e5"), Some(5));
        let mut board = Board::default();

        assert_eq!(provider.provide(&mut board, 3), Ok(std_move!(E2, E4)));
        // the same process serves the next request
        assert_eq!(provider.provide(&mut board, 3), Ok(std_move!(E2, E4)));
    }

    #[test]
    fn test_illegal_engine_move_falls_back_to_random_move() {
        let mut provider = SubprocessEngineProvider::new(scripted_engine("e7e5"), Some(5));
        let mut board = Board::default();

        assert!(matches!(
            provider.request_move(&mut board),
            Err(EngineError::IllegalMove { .. })
        ));
        let chess_move = provider.provide(&mut board, 3).unwrap();
        assert!(board.legal_moves().contains(&chess_move));
    }

    #[test]
    fn test_missing_engine_falls_back_to_random_move() {
        let config = SubprocessEngineConfig {
            path: PathBuf::from("/nonexistent/uci-engine"),
            ..Default::default()
        };
        let mut provider = SubprocessEngineProvider::new(config, Some(5));
        let mut board = Board::default();

        assert!(matches!(
            provider.request_move(&mut board),
            Err(EngineError::Io(_))
        ));
        let chess_move = provider.provide(&mut board, 3).unwrap();
        assert!(board.legal_moves().contains(&chess_move));
    }

    #[test]
    fn test_silent_engine_times_out() {
        let mut config = scripted_engine("e2e4");
        config.args[1] = r#"while read -r line; do
                case "$line" in
                    uci) echo "uciok" ;;
                    isready) echo "readyok" ;;
                esac
            done"#
            .to_string();
        config.grace = Duration::from_millis(200);

        let mut provider = SubprocessEngineProvider::new(config, Some(5));
        let mut board = Board::default();

        assert!(matches!(
            provider.request_move(&mut board),
            Err(EngineError::Timeout {
                expected: "bestmove"
            })
        ));
        let chess_move = provider.provide(&mut board, 3).unwrap();
        assert!(board.legal_moves().contains(&chess_move));
    }
}
