mod controller;
mod page;
mod ui;

use crate::upload::HttpQuestionApi;
use eframe::App;
use std::sync::Arc;
use std::time::Duration;

pub use controller::{Phase, UploadController, SUCCESS_MESSAGE};
pub use page::{
    layout_questions, PageState, PageView, QuestionEntry, StatusCategory, StatusMessage,
    FILE_PLACEHOLDER, NO_QUESTIONS, NO_QUESTIONS_FOR_FILE,
};

const IN_FLIGHT_REPAINT: Duration = Duration::from_millis(100);

pub struct QuizUploader {
    controller: UploadController<HttpQuestionApi, PageState>,
    server_label: String,
}

impl QuizUploader {
    pub fn new(_cc: &eframe::CreationContext<'_>, api: HttpQuestionApi) -> Self {
        tracing::info!("Initializing PDF quiz uploader");
        let server_label = api.upload_url().origin().ascii_serialization();
        Self {
            controller: UploadController::new(Arc::new(api), PageState::default()),
            server_label,
        }
    }

    pub fn update_state(&mut self, ctx: &egui::Context) {
        if self.controller.poll() {
            ctx.request_repaint();
        }

        // Background work cannot wake the UI, so keep polling while it runs.
        if self.controller.is_in_flight() {
            ctx.request_repaint_after(IN_FLIGHT_REPAINT);
        }
    }
}

impl App for QuizUploader {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state(ctx);
        self.render(ctx);
    }
}
