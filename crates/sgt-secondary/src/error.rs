//! Error types for the secondary-side model.

use sgt_core::CoreError;
use thiserror::Error;

/// Errors from model construction.
///
/// The per-tick path never fails: numerically hazardous spots are guarded
/// with floors or early-return-zero, and conservation drift surfaces
/// through the diagnostic sink instead of an error return. Everything here
/// is rejected once, at construction.
#[derive(Error, Debug)]
pub enum SecondaryError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Invalid configuration: {message}")]
    Config { message: String },
}

pub type SecondaryResult<T> = Result<T, SecondaryError>;

impl From<CoreError> for SecondaryError {
    fn from(e: CoreError) -> Self {
        SecondaryError::Config {
            message: e.to_string(),
        }
    }
}
