use pacer_sim::error::PacerSimError;
use thiserror::Error;

use crate::threads::ThreadError;

pub type PacerTuiResult<T> = Result<T, PacerTuiError>;

#[derive(Error, Debug)]
pub enum PacerTuiError {
    #[error("IO error: {}", _0)]
    Io(std::io::Error),
    #[error("simulator error: {}", _0)]
    Sim(PacerSimError),
    #[error("logging setup failed: {}", _0)]
    Logging(String),
    #[error("thread error: {}", _0)]
    Thread(ThreadError),
}

impl From<std::io::Error> for PacerTuiError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error)
    }
}

impl From<PacerSimError> for PacerTuiError {
    fn from(error: PacerSimError) -> Self {
        Self::Sim(error)
    }
}

impl From<ThreadError> for PacerTuiError {
    fn from(error: ThreadError) -> Self {
        Self::Thread(error)
    }
}
