use crate::upload::DEFAULT_UPLOAD_FIELD;
use clap::Parser;
use reqwest::Url;
use std::path::PathBuf;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

/// Upload a PDF and show the questions the server generates for it.
#[derive(Debug, Clone, Parser)]
#[command(name = "pdf_quiz_uploader", version, about)]
pub struct Settings {
    /// Base URL of the question server
    #[arg(long, env = "QUIZ_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    pub server_url: Url,

    /// Submit this PDF without opening a window and print the result
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Multipart field the server reads the file from
    #[arg(long, default_value = DEFAULT_UPLOAD_FIELD)]
    pub upload_field: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_point_at_local_server() {
        let settings = Settings::try_parse_from(["pdf_quiz_uploader"]).unwrap();
        assert_eq!(settings.server_url.as_str(), "http://127.0.0.1:5000/");
        assert_eq!(settings.upload_field, "file");
        assert!(settings.file.is_none());
    }

    #[test]
    fn headless_file_and_server_are_parsed() {
        let settings = Settings::try_parse_from([
            "pdf_quiz_uploader",
            "--server-url",
            "http://quiz.example:8080",
            "--file",
            "notes.pdf",
        ])
        .unwrap();
        assert_eq!(settings.server_url.host_str(), Some("quiz.example"));
        assert_eq!(settings.file, Some(PathBuf::from("notes.pdf")));
    }

    #[test]
    fn invalid_server_url_is_rejected() {
        let parsed = Settings::try_parse_from(["pdf_quiz_uploader", "--server-url", "not a url"]);
        assert!(parsed.is_err());
    }
}
