mod client;
mod sequence;
mod types;

pub use client::{HttpQuestionApi, QuestionApi, DEFAULT_UPLOAD_FIELD, RESULTS_PATH, UPLOAD_PATH};
pub use sequence::{run_submission, SubmissionEvent, SubmissionPhase};
pub use types::{FileQuestions, QuestionSet, ResultsReply, SelectedFile, UploadReply};

#[cfg(test)]
pub(crate) use sequence::fake;
