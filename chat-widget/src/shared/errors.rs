use thiserror::Error;

use crate::modules::chat::{ApplicationError, RepositoryError, ResponderError};
use crate::modules::config::ConfigError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("Chat error: {0}")]
    ChatError(#[from] ApplicationError),

    #[error("Storage error: {0}")]
    RepositoryError(#[from] RepositoryError),

    #[error("Responder error: {0}")]
    ResponderError(#[from] ResponderError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_convert_and_serialize_as_message() {
        let error: AppError = ResponderError::NetworkError("refused".to_string()).into();
        assert!(matches!(error, AppError::ResponderError(_)));

        let json = serde_json::to_string(&error).unwrap();
        assert_eq!(json, format!("\"{}\"", error));
        assert!(json.contains("refused"));
    }
}
