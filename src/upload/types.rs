use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// File currently picked in the file dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
}

impl SelectedFile {
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        Ok(Self {
            name,
            path: path.to_path_buf(),
            size: metadata.len(),
        })
    }
}

/// Reply of `POST /upload`. Only `error` drives behavior; the rest is logged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadReply {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub filename: Option<String>,
}

impl UploadReply {
    pub fn server_error(&self) -> Option<&str> {
        non_empty(self.error.as_deref())
    }
}

/// Reply of `GET /date`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResultsReply {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub questions: Option<QuestionSet>,
}

impl ResultsReply {
    pub fn server_error(&self) -> Option<&str> {
        non_empty(self.error.as_deref())
    }
}

// An empty `error` string is falsy on the page and does not count as a failure.
fn non_empty(error: Option<&str>) -> Option<&str> {
    error.filter(|message| !message.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileQuestions {
    pub filename: String,
    pub questions: Vec<String>,
}

/// Questions per source file, in the order the server listed the files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct QuestionSet {
    files: Vec<FileQuestions>,
}

impl QuestionSet {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn files(&self) -> &[FileQuestions] {
        &self.files
    }

    pub fn question_count(&self) -> usize {
        self.files.iter().map(|file| file.questions.len()).sum()
    }
}

impl TryFrom<Map<String, Value>> for QuestionSet {
    type Error = serde_json::Error;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let files = map
            .into_iter()
            .map(|(filename, value)| {
                Ok(FileQuestions {
                    filename,
                    questions: serde_json::from_value(value)?,
                })
            })
            .collect::<Result<Vec<_>, serde_json::Error>>()?;

        Ok(Self { files })
    }
}

impl<S: Into<String>> FromIterator<(S, Vec<S>)> for QuestionSet {
    fn from_iter<I: IntoIterator<Item = (S, Vec<S>)>>(iter: I) -> Self {
        let files = iter
            .into_iter()
            .map(|(filename, questions)| FileQuestions {
                filename: filename.into(),
                questions: questions.into_iter().map(Into::into).collect(),
            })
            .collect();
        Self { files }
    }
}
