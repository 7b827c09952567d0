use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("No embedding path found after {attempts} attempts")]
    NoPathFound { attempts: u32 },
    #[error("Word of {len} letters does not fit the requested shape")]
    WordDoesNotFit { len: usize },
    #[error("Word book has no usable words")]
    EmptyWordBook,
}

/// Failures reported by the economy collaborator.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum EconomyError {
    #[error("No attempts available")]
    InsufficientAttempts,
    #[error("Not enough coins")]
    InsufficientCoins,
    #[error("Daily coin cap reached")]
    DailyCapReached,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Score submission failed: {0}")]
pub struct SubmitError(pub String);

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum RoundError {
    #[error(transparent)]
    Economy(#[from] EconomyError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error("Daily challenge already completed")]
    DailyCompleted,
}

pub type Result<T> = core::result::Result<T, RoundError>;
