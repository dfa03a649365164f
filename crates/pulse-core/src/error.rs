//! Error types for Pulse

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Amount overflow: {0}")]
    Overflow(String),
}

pub type Result<T> = std::result::Result<T, Error>;
