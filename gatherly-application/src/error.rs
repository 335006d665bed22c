use gatherly_core::{
    repositories::Error as RepoError,
    usecases::{Error as ParameterError, ErrorKind},
};
use std::io;
use thiserror::Error;

pub use gatherly_core::repositories;

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

impl From<gatherly_core::rate_limit::LimitExceeded> for AppError {
    fn from(err: gatherly_core::rate_limit::LimitExceeded) -> AppError {
        ParameterError::from(err).into()
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Business(#[from] BError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl AppError {
    /// Classification of the error as seen by the caller.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Business(err) => err.kind(),
            Self::Other(_) | Self::Io(_) => ErrorKind::Internal,
        }
    }
}

#[derive(Debug, Error)]
pub enum BError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),
    #[error(transparent)]
    Repo(#[from] repositories::Error),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Parameter(err) => err.kind(),
            Self::Repo(RepoError::NotFound) => ErrorKind::NotFound,
            Self::Repo(RepoError::AlreadyExists) => ErrorKind::Conflict,
            Self::Repo(_) | Self::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl From<String> for BError {
    fn from(s: String) -> Self {
        Self::Internal(s)
    }
}
