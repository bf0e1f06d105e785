//! The module contains the errors the engine can return.
//!
//! The errors are:
//!
//! - [`Validation`] malformed or semantically invalid input, no side effects.
//! - [`NotFound`] a referenced transaction, rule or account does not exist.
//! - [`AccountNotFound`] a balance adjustment hit a dangling account id.
//! - [`Conflict`] a unique field is already taken.
//! - [`Cancelled`] the caller withdrew the unit of work before commit.
//! - [`Database`] the store failed; details are for logs only.
//!
//!  [`Validation`]: EngineError::Validation
//!  [`NotFound`]: EngineError::NotFound
//!  [`AccountNotFound`]: EngineError::AccountNotFound
//!  [`Conflict`]: EngineError::Conflict
//!  [`Cancelled`]: EngineError::Cancelled
//!  [`Database`]: EngineError::Database
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("\"{0}\" not found!")]
    NotFound(String),
    #[error("account {0} not found, balance not updated")]
    AccountNotFound(i64),
    #[error("\"{0}\" already present!")]
    Conflict(String),
    #[error("Operation cancelled")]
    Cancelled,
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl EngineError {
    /// True for both `NotFound` and `AccountNotFound`.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::AccountNotFound(_))
    }

    /// Classify a store error, turning unique violations into `Conflict`.
    pub(crate) fn from_db(err: DbErr, what: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::Conflict(what.to_string()),
            _ => Self::Database(err),
        }
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::AccountNotFound(a), Self::AccountNotFound(b)) => a == b,
            (Self::Conflict(a), Self::Conflict(b)) => a == b,
            (Self::Cancelled, Self::Cancelled) => true,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
