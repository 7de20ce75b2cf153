//! Booking error types.

use sea_orm::{DbErr, TransactionError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid reference: {0}")]
    InvalidReference(String),

    #[error("database error: {0}")]
    Persistence(#[from] DbErr),
}

impl BookingError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }
}

impl From<TransactionError<BookingError>> for BookingError {
    fn from(err: TransactionError<BookingError>) -> Self {
        match err {
            TransactionError::Connection(e) => Self::Persistence(e),
            TransactionError::Transaction(e) => e,
        }
    }
}
