use crate::upload::QuestionSet;
use std::fmt;

pub const FILE_PLACEHOLDER: &str = "Choose a PDF file";
pub const NO_QUESTIONS: &str = "No questions were generated.";
pub const NO_QUESTIONS_FOR_FILE: &str = "No questions were generated for this PDF.";

/// Styling class of the status line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusCategory {
    #[default]
    None,
    Error,
    Success,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub category: StatusCategory,
}

impl StatusMessage {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// One line in the questions container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionEntry {
    Question { number: usize, text: String },
    Notice(String),
}

impl fmt::Display for QuestionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionEntry::Question { number, text } => write!(f, "Q{}: {}", number, text),
            QuestionEntry::Notice(text) => f.write_str(text),
        }
    }
}

/// Lays out a question set the way the questions container shows it.
///
/// Files keep the server's order and numbering restarts for every file.
/// A file without questions contributes a notice at its own position.
pub fn layout_questions(set: &QuestionSet) -> Vec<QuestionEntry> {
    if set.is_empty() {
        return vec![QuestionEntry::Notice(NO_QUESTIONS.to_string())];
    }

    let mut entries = Vec::with_capacity(set.question_count());
    for file in set.files() {
        if file.questions.is_empty() {
            entries.push(QuestionEntry::Notice(NO_QUESTIONS_FOR_FILE.to_string()));
            continue;
        }
        entries.extend(
            file.questions
                .iter()
                .enumerate()
                .map(|(index, text)| QuestionEntry::Question {
                    number: index + 1,
                    text: text.clone(),
                }),
        );
    }
    entries
}

/// Handles to the page elements the controller is allowed to touch.
pub trait PageView {
    fn set_file_label(&mut self, text: &str, size_hint: Option<u64>);
    fn show_status(&mut self, message: &str, category: StatusCategory);
    fn set_loading(&mut self, visible: bool);
    fn clear_questions(&mut self);
    fn append_entry(&mut self, entry: QuestionEntry);
    fn set_submit_enabled(&mut self, enabled: bool);
}

/// Page model drawn by the egui window.
#[derive(Debug, Clone, PartialEq)]
pub struct PageState {
    pub file_label: String,
    pub file_size: Option<u64>,
    pub status: StatusMessage,
    pub loading: bool,
    pub submit_enabled: bool,
    pub entries: Vec<QuestionEntry>,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            file_label: FILE_PLACEHOLDER.to_string(),
            file_size: None,
            status: StatusMessage::default(),
            loading: false,
            submit_enabled: true,
            entries: Vec::new(),
        }
    }
}

impl PageState {
    /// Text content of the questions container, one entry per line.
    pub fn questions_text(&self) -> String {
        self.entries
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn question_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry, QuestionEntry::Question { .. }))
            .count()
    }
}

impl PageView for PageState {
    fn set_file_label(&mut self, text: &str, size_hint: Option<u64>) {
        self.file_label = text.to_string();
        self.file_size = size_hint;
    }

    fn show_status(&mut self, message: &str, category: StatusCategory) {
        self.status = StatusMessage {
            text: message.to_string(),
            category,
        };
    }

    fn set_loading(&mut self, visible: bool) {
        self.loading = visible;
    }

    fn clear_questions(&mut self) {
        self.entries.clear();
    }

    fn append_entry(&mut self, entry: QuestionEntry) {
        self.entries.push(entry);
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = enabled;
    }
}
