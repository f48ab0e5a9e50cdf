use anyhow::Context;
use clap::Parser;
use eframe::CreationContext;
use pdf_quiz_uploader::app::{Phase, QuizUploader};
use pdf_quiz_uploader::config::Settings;
use pdf_quiz_uploader::headless::run_headless;
use pdf_quiz_uploader::upload::HttpQuestionApi;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pdf_quiz_uploader=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = Settings::parse();
    let api = HttpQuestionApi::new(&settings.server_url, settings.upload_field.clone())
        .with_context(|| format!("Invalid server URL {}", settings.server_url))?;

    if let Some(path) = settings.file {
        tracing::info!("Running headless against {}", settings.server_url);
        let (phase, _) = run_headless(Arc::new(api), path, std::io::stdout().lock());
        if phase != Phase::Rendered {
            std::process::exit(1);
        }
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([600.0, 700.0])
            .with_min_inner_size([400.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "PDF Question Generator",
        options,
        Box::new(move |cc: &CreationContext| Box::new(QuizUploader::new(cc, api))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to start window: {}", e))
}
