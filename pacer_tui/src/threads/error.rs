use pacer_sim::error::PacerSimError;
use thiserror::Error;

pub type ThreadResult = Result<(), ThreadError>;

#[derive(Error, Debug)]
pub enum ThreadError {
    #[error("thread panicked: {}", _0)]
    Panic(String),
    #[error("IO error: {}", _0)]
    Io(std::io::Error),
    #[error("simulator error: {}", _0)]
    Sim(PacerSimError),
}

impl From<std::io::Error> for ThreadError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error)
    }
}

impl From<PacerSimError> for ThreadError {
    fn from(error: PacerSimError) -> Self {
        Self::Sim(error)
    }
}
