use super::page::{layout_questions, PageView, StatusCategory, FILE_PLACEHOLDER};
use crate::error::UploadError;
use crate::upload::{
    run_submission, QuestionApi, QuestionSet, SelectedFile, SubmissionEvent, SubmissionPhase,
};
use derivative::Derivative;
use std::path::PathBuf;
use std::sync::mpsc::{self as std_mpsc, Receiver, RecvTimeoutError, TryRecvError};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const SUCCESS_MESSAGE: &str = "Questions generated successfully!";

/// Where the current submission stands. Validation is synchronous and
/// never shows up here except as an immediate `Failed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Uploading,
    AwaitingResults,
    Rendered,
    Failed,
}

impl Phase {
    pub fn is_in_flight(self) -> bool {
        matches!(self, Phase::Uploading | Phase::AwaitingResults)
    }
}

impl From<SubmissionPhase> for Phase {
    fn from(phase: SubmissionPhase) -> Self {
        match phase {
            SubmissionPhase::Uploading => Phase::Uploading,
            SubmissionPhase::AwaitingResults => Phase::AwaitingResults,
        }
    }
}

/// Drives file selection, the upload/results sequence and the page updates.
///
/// Network work runs on a background thread; its events are only applied
/// to the view from [`poll`](Self::poll) or
/// [`block_until_settled`](Self::block_until_settled), so the view is only
/// ever touched from the owning thread.
#[derive(Derivative)]
#[derivative(Debug(bound = "V: std::fmt::Debug"))]
pub struct UploadController<A, V> {
    #[derivative(Debug = "ignore")]
    api: Arc<A>,
    view: V,
    selected: Option<SelectedFile>,
    phase: Phase,
    #[derivative(Debug = "ignore")]
    events: Option<Receiver<SubmissionEvent>>,
}

impl<A, V> UploadController<A, V>
where
    A: QuestionApi + 'static,
    V: PageView,
{
    pub fn new(api: Arc<A>, view: V) -> Self {
        Self {
            api,
            view,
            selected: None,
            phase: Phase::Idle,
            events: None,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.phase.is_in_flight()
    }

    pub fn on_file_selected(&mut self, file: Option<SelectedFile>) {
        match &file {
            Some(file) => {
                tracing::debug!("Selected '{}' ({} bytes)", file.name, file.size);
                self.view.set_file_label(&file.name, Some(file.size));
            }
            None => {
                tracing::debug!("Selection cleared");
                self.view.set_file_label(FILE_PLACEHOLDER, None);
            }
        }
        self.selected = file;
    }

    /// Selection coming from a file dialog or the command line. An
    /// unreadable path counts as no selection and leaves the status alone.
    pub fn on_path_selected(&mut self, path: Option<PathBuf>) {
        let file = match path.as_deref().map(SelectedFile::from_path).transpose() {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!("Cannot use selected file {:?}: {}", path, e);
                None
            }
        };
        self.on_file_selected(file);
    }

    pub fn on_submit(&mut self) {
        if self.is_in_flight() {
            tracing::debug!("Submission already in flight, ignoring submit");
            return;
        }

        let Some(file) = self.selected.clone() else {
            let error = UploadError::NoFileSelected;
            self.phase = Phase::Failed;
            self.show_status(&error.to_string(), StatusCategory::Error);
            return;
        };

        tracing::info!("Submitting '{}'", file.name);

        self.view.clear_questions();
        self.view.set_loading(true);
        self.show_status("", StatusCategory::None);
        self.view.set_submit_enabled(false);
        self.phase = Phase::Uploading;

        let (sender, receiver) = std_mpsc::channel();
        self.events = Some(receiver);
        let api = Arc::clone(&self.api);

        std::thread::spawn(move || {
            match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt.block_on(run_submission(api.as_ref(), &file, &sender)),
                Err(e) => {
                    let _ = sender.send(SubmissionEvent::Finished(Err(UploadError::Runtime(e))));
                }
            }
        });
    }

    /// Applies whatever the background sequence has reported so far.
    /// Returns true when something changed.
    pub fn poll(&mut self) -> bool {
        let mut had_updates = false;

        while let Some(receiver) = &self.events {
            match receiver.try_recv() {
                Ok(event) => {
                    had_updates = true;
                    self.handle_event(event);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    had_updates = true;
                    self.worker_vanished();
                }
            }
        }

        had_updates
    }

    /// Blocks until the current submission finishes or `timeout` passes.
    /// Returns false on timeout. `Duration::MAX` waits without a deadline.
    pub fn block_until_settled(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now().checked_add(timeout);

        while let Some(receiver) = &self.events {
            let received = match deadline {
                Some(deadline) => {
                    receiver.recv_timeout(deadline.saturating_duration_since(Instant::now()))
                }
                None => receiver
                    .recv()
                    .map_err(|_| RecvTimeoutError::Disconnected),
            };
            match received {
                Ok(event) => self.handle_event(event),
                Err(RecvTimeoutError::Timeout) => return false,
                Err(RecvTimeoutError::Disconnected) => self.worker_vanished(),
            }
        }

        true
    }

    pub fn render_questions(&mut self, set: &QuestionSet) {
        self.view.clear_questions();
        for entry in layout_questions(set) {
            self.view.append_entry(entry);
        }
    }

    pub fn show_status(&mut self, message: &str, category: StatusCategory) {
        self.view.show_status(message, category);
    }

    fn handle_event(&mut self, event: SubmissionEvent) {
        match event {
            SubmissionEvent::Phase(phase) => {
                tracing::debug!("Submission phase: {:?}", phase);
                self.phase = phase.into();
            }
            SubmissionEvent::Finished(outcome) => {
                self.events = None;
                self.finish(outcome);
            }
        }
    }

    fn finish(&mut self, outcome: crate::error::Result<QuestionSet>) {
        self.view.set_loading(false);
        self.view.set_submit_enabled(true);

        match outcome {
            Ok(questions) => {
                self.render_questions(&questions);
                self.show_status(SUCCESS_MESSAGE, StatusCategory::Success);
                self.phase = Phase::Rendered;
            }
            Err(e) => {
                self.show_status(&e.to_string(), StatusCategory::Error);
                self.phase = Phase::Failed;
            }
        }
    }

    fn worker_vanished(&mut self) {
        tracing::warn!("Background submission stopped without reporting a result");
        self.events = None;
        self.finish(Err(UploadError::Runtime(std::io::Error::other(
            "submission worker stopped unexpectedly",
        ))));
    }
}
