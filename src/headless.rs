//! Single submission without a window, for scripts and terminals.

use crate::app::{PageView, Phase, QuestionEntry, StatusCategory, UploadController};
use crate::upload::QuestionApi;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Prints status changes and rendered questions as plain lines.
#[derive(Debug)]
pub struct TerminalView<W> {
    out: W,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            tracing::warn!("Failed to write output: {}", e);
        }
    }
}

impl<W: Write> PageView for TerminalView<W> {
    fn set_file_label(&mut self, _text: &str, _size_hint: Option<u64>) {}

    fn show_status(&mut self, message: &str, category: StatusCategory) {
        match category {
            StatusCategory::Error => self.line(&format!("error: {}", message)),
            StatusCategory::Success => self.line(message),
            StatusCategory::None if message.is_empty() => {}
            StatusCategory::None => self.line(message),
        }
    }

    fn set_loading(&mut self, visible: bool) {
        if visible {
            tracing::info!("Waiting for the server to generate questions");
        }
    }

    fn clear_questions(&mut self) {}

    fn append_entry(&mut self, entry: QuestionEntry) {
        self.line(&entry.to_string());
    }

    fn set_submit_enabled(&mut self, _enabled: bool) {}
}

/// Submits `path` once and returns the terminal phase together with the
/// writer the output went to.
pub fn run_headless<A, W>(api: Arc<A>, path: PathBuf, out: W) -> (Phase, W)
where
    A: QuestionApi + 'static,
    W: Write,
{
    let mut controller = UploadController::new(api, TerminalView::new(out));
    controller.on_path_selected(Some(path));
    controller.on_submit();
    controller.block_until_settled(Duration::MAX);

    let phase = controller.phase();
    (phase, controller.into_view().into_inner())
}
