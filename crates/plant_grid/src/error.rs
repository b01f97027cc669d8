//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid grid configuration, an empty planting result, IO, and generic errors.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("no planting positions remain after applying the edge buffer and exclusion zones")]
    EmptyResult,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_string_uses_other_variant() {
        let err: Error = String::from("boom").into();
        assert!(matches!(err, Error::Other(ref msg) if msg == "boom"));
    }

    #[test]
    fn empty_result_message_names_the_cause() {
        let msg = Error::EmptyResult.to_string();
        assert!(msg.contains("edge buffer"));
        assert!(msg.contains("exclusion"));
    }

    #[test]
    fn invalid_config_is_prefixed() {
        let err = Error::InvalidConfig("plant_spacing must be > 0".into());
        assert_eq!(
            err.to_string(),
            "invalid configuration: plant_spacing must be > 0"
        );
    }
}
