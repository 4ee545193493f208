use thiserror::Error;

pub type PacerSimResult<T> = Result<T, PacerSimError>;

#[derive(Debug, Error)]
pub enum PacerSimError {
    #[error("configuration error: {}", _0)]
    Config(figment::Error),
    #[error("IO error: {}", _0)]
    Io(std::io::Error),
    #[error("invalid schedule: {}", _0)]
    Schedule(String),
    #[error("task `{}` panicked: {}", _0, _1)]
    TaskPanicked(String, String),
}

impl From<figment::Error> for PacerSimError {
    fn from(error: figment::Error) -> Self {
        Self::Config(error)
    }
}

impl From<std::io::Error> for PacerSimError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error)
    }
}
