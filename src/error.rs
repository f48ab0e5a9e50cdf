//! Error types for the upload flow.
//!
//! The `Display` text of every variant is what ends up in the status line,
//! so server-reported messages are passed through untouched.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, UploadError>;

#[derive(Error, Debug)]
pub enum UploadError {
    /// Submit was pressed with nothing picked
    #[error("Please select a PDF file first.")]
    NoFileSelected,

    /// The picked file could not be read from disk
    #[error("Failed to read {name}: {source}")]
    ReadFile {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// Request could not be sent or its body could not be received
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Body was not the JSON shape we expect
    #[error("Unexpected response from server: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    /// The server answered with an `error` field
    #[error("{0}")]
    Server(String),

    #[error("Server response did not include any questions")]
    MissingQuestions,

    /// Background runtime for the network sequence failed to start
    #[error("Failed to start background worker: {0}")]
    Runtime(#[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn server_message_is_shown_verbatim() {
        let err = UploadError::Server("bad file".to_string());
        assert_eq!(err.to_string(), "bad file");
    }

    #[test]
    fn missing_selection_has_fixed_message() {
        let err = UploadError::NoFileSelected;
        assert_eq!(err.to_string(), "Please select a PDF file first.");
    }

    #[test]
    fn invalid_json_mentions_the_parse_failure() {
        let parse = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = UploadError::from(parse);
        assert!(err.to_string().starts_with("Unexpected response from server:"));
    }
}
