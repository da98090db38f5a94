//! Error types for the execution pipeline.
//!
//! Every failure mode an adapter can hit is represented here. None of these
//! are fatal to a session: the dispatcher recovers all of them and turns
//! them into displayable output text, so categorization exists to drive the
//! local-to-remote fallback and to keep diagnostics specific.

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum RunnerError {
    #[error("interpreter is not ready")]
    InterpreterNotReady,
    #[error("interpreter runtime failed to load: {0}")]
    InterpreterLoad(String),
    #[error("interpreter internal fault: {0}")]
    InterpreterFault(String),
    #[error("could not reach the execution service: {0}")]
    RemoteTransport(String),
    #[error("execution service returned HTTP {status}: {body}")]
    RemoteService { status: u16, body: String },
    #[error("could not parse the execution service response: {0}")]
    RemoteResponse(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for RunnerError {
    fn from(err: std::io::Error) -> Self {
        RunnerError::Io(err.to_string())
    }
}

impl From<reqwest::Error> for RunnerError {
    fn from(err: reqwest::Error) -> Self {
        RunnerError::RemoteTransport(err.to_string())
    }
}

impl From<serde_yaml::Error> for RunnerError {
    fn from(err: serde_yaml::Error) -> Self {
        RunnerError::Config(err.to_string())
    }
}
