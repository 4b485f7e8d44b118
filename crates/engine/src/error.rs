use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Lock window closed")]
    LockWindowClosed,

    #[error("Prediction contains no positions")]
    EmptyPrediction,

    #[error("Prediction already locked")]
    AlreadyLocked,

    #[error("No locked prediction found")]
    NotLocked,

    #[error("Invalid position: {0}")]
    InvalidPosition(String),

    #[error("Driver {0} is not selectable for this race")]
    IneligibleDriver(String),

    #[error("Race already completed")]
    RaceCompleted,

    #[error("Not found")]
    NotFound,

    #[error("Invalid reference data: {0}")]
    InvalidReferenceData(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;

impl EngineError {
    /// Validation errors are rejected synchronously, before any store write.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EngineError::LockWindowClosed
                | EngineError::EmptyPrediction
                | EngineError::AlreadyLocked
                | EngineError::NotLocked
                | EngineError::InvalidPosition(_)
                | EngineError::IneligibleDriver(_)
                | EngineError::RaceCompleted
        )
    }
}
