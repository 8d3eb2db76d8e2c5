//! Error taxonomy shared by the store, catalog, selector and service.

use thiserror::Error;

/// Error type for trivia operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Client input is missing or malformed; carries the offending field name.
    #[error("invalid or missing field `{0}`")]
    Validation(&'static str),

    /// The requested question, category or page does not exist.
    #[error("resource not found")]
    NotFound,

    /// No unseen questions remain in the quiz candidate pool.
    #[error("no questions left to ask")]
    Exhausted,

    /// A quiz request referenced a category that is not in the catalog.
    #[error("category {0} is not in the catalog")]
    InvalidCategory(i64),

    /// A positional catalog lookup fell outside `[1, count]`.
    #[error("catalog position {index} is out of range (1..={count})")]
    OutOfRange { index: i64, count: usize },

    /// The underlying persistence layer failed.
    #[error("store failure: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Store(err.to_string())
    }
}

impl Error {
    /// Status code used in the client-facing failure envelope.
    pub fn code(&self) -> u16 {
        match self {
            Error::Validation(_) => 400,
            Error::NotFound | Error::OutOfRange { .. } => 404,
            Error::Exhausted | Error::InvalidCategory(_) => 422,
            Error::Store(_) => 500,
        }
    }

    /// Client-facing message. Store details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            Error::Validation(field) => {
                format!("Bad request: invalid or missing field `{}`", field)
            }
            Error::NotFound | Error::OutOfRange { .. } => "Resource not found".to_string(),
            Error::Exhausted | Error::InvalidCategory(_) => "Content unprocessable".to_string(),
            Error::Store(_) => "Internal server error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(Error::Validation("answer").code(), 400);
        assert_eq!(Error::NotFound.code(), 404);
        assert_eq!(Error::OutOfRange { index: 9, count: 6 }.code(), 404);
        assert_eq!(Error::Exhausted.code(), 422);
        assert_eq!(Error::InvalidCategory(42).code(), 422);
        assert_eq!(Error::Store("disk full".into()).code(), 500);
    }

    #[test]
    fn test_store_detail_is_not_public() {
        let err = Error::Store("database is locked".into());
        assert!(!err.public_message().contains("locked"));
        assert!(err.to_string().contains("locked"));
    }

    #[test]
    fn test_validation_message_names_field() {
        let msg = Error::Validation("difficulty").public_message();
        assert!(msg.contains("difficulty"));
    }
}
