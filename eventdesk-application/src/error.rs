use eventdesk_boundary::legacy::LegacyError;
use eventdesk_core::{repositories::Error as RepoError, usecases::Error as ParameterError};
use thiserror::Error;

pub use eventdesk_core::repositories;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> AppError {
        AppError::Business(BError::Repo(err))
    }
}

impl From<ParameterError> for AppError {
    fn from(err: ParameterError) -> AppError {
        AppError::Business(err.into())
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Business(#[from] BError),
    #[error("The same action is already in progress")]
    ActionInProgress,
    #[error(transparent)]
    Legacy(#[from] LegacyError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// The use case error, if any.
    pub fn parameter(&self) -> Option<&ParameterError> {
        match self {
            Self::Business(BError::Parameter(err)) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum BError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),
    #[error(transparent)]
    Repo(#[from] repositories::Error),
}
