use crate::error::{Result, UploadError};
use crate::upload::client::QuestionApi;
use crate::upload::types::{QuestionSet, SelectedFile};
use std::sync::mpsc::Sender;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    Uploading,
    AwaitingResults,
}

#[derive(Debug)]
pub enum SubmissionEvent {
    Phase(SubmissionPhase),
    Finished(Result<QuestionSet>),
}

/// Uploads `file`, then asks for the generated questions.
///
/// Exactly one `Finished` event is sent. A send failure only means the
/// receiving side is gone, which is not an error for the sequence.
pub async fn run_submission<A: QuestionApi + ?Sized>(
    api: &A,
    file: &SelectedFile,
    events: &Sender<SubmissionEvent>,
) {
    let outcome = upload_then_fetch(api, file, events).await;
    if let Err(e) = &outcome {
        tracing::warn!("Submission of '{}' failed: {}", file.name, e);
    }
    let _ = events.send(SubmissionEvent::Finished(outcome));
}

async fn upload_then_fetch<A: QuestionApi + ?Sized>(
    api: &A,
    file: &SelectedFile,
    events: &Sender<SubmissionEvent>,
) -> Result<QuestionSet> {
    let _ = events.send(SubmissionEvent::Phase(SubmissionPhase::Uploading));

    let reply = api.upload(file).await?;
    if let Some(message) = reply.server_error() {
        return Err(UploadError::Server(message.to_string()));
    }
    tracing::info!(
        "Uploaded '{}' (server stored it as {:?})",
        file.name,
        reply.filename
    );

    let _ = events.send(SubmissionEvent::Phase(SubmissionPhase::AwaitingResults));

    let reply = api.fetch_questions().await?;
    if let Some(message) = reply.server_error() {
        return Err(UploadError::Server(message.to_string()));
    }

    let questions = reply.questions.ok_or(UploadError::MissingQuestions)?;
    tracing::info!(
        "Received {} questions for {} file(s)",
        questions.question_count(),
        questions.len()
    );
    Ok(questions)
}


#[cfg(test)]
mod tests {
    use super::fake::FakeApi;
    use super::*;
    use crate::upload::types::{ResultsReply, UploadReply};
    use std::path::PathBuf;
    use std::sync::mpsc::channel;

    fn sample_file() -> SelectedFile {
        SelectedFile {
            name: "a.pdf".to_string(),
            path: PathBuf::from("a.pdf"),
            size: 0,
        }
    }

    fn drain(rx: std::sync::mpsc::Receiver<SubmissionEvent>) -> Vec<SubmissionEvent> {
        rx.try_iter().collect()
    }

    #[tokio::test]
    async fn upload_error_skips_results_request() {
        let api = FakeApi::answering(
            Ok(UploadReply {
                error: Some("bad file".to_string()),
                ..UploadReply::default()
            }),
            Ok(ResultsReply::default()),
        );
        let (tx, rx) = channel();

        run_submission(&api, &sample_file(), &tx).await;

        assert_eq!(api.upload_calls(), 1);
        assert_eq!(api.results_calls(), 0);
        let events = drain(rx);
        assert!(matches!(
            events.as_slice(),
            [
                SubmissionEvent::Phase(SubmissionPhase::Uploading),
                SubmissionEvent::Finished(Err(UploadError::Server(message))),
            ] if message == "bad file"
        ));
    }

    #[tokio::test]
    async fn successful_sequence_runs_both_steps_in_order() {
        let questions: QuestionSet = [("a.pdf", vec!["What is X?"])].into_iter().collect();
        let api = FakeApi::answering(
            Ok(UploadReply::default()),
            Ok(ResultsReply {
                error: None,
                questions: Some(questions.clone()),
            }),
        );
        let (tx, rx) = channel();

        run_submission(&api, &sample_file(), &tx).await;

        assert_eq!(api.results_calls(), 1);
        let events = drain(rx);
        assert_eq!(events.len(), 3);
        assert!(matches!(
            events[1],
            SubmissionEvent::Phase(SubmissionPhase::AwaitingResults)
        ));
        match &events[2] {
            SubmissionEvent::Finished(Ok(received)) => assert_eq!(received, &questions),
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[tokio::test]
    async fn closed_receiver_does_not_stop_the_sequence() {
        let questions: QuestionSet = [("a.pdf", vec!["What is X?"])].into_iter().collect();
        let api = FakeApi::answering(
            Ok(UploadReply::default()),
            Ok(ResultsReply {
                error: None,
                questions: Some(questions),
            }),
        );
        let (tx, rx) = channel();
        drop(rx);

        run_submission(&api, &sample_file(), &tx).await;

        assert_eq!(api.upload_calls(), 1);
        assert_eq!(api.results_calls(), 1);
    }

    #[tokio::test]
    async fn results_without_questions_fail() {
        let api = FakeApi::answering(Ok(UploadReply::default()), Ok(ResultsReply::default()));
        let (tx, rx) = channel();

        run_submission(&api, &sample_file(), &tx).await;

        let last = drain(rx).pop();
        assert!(matches!(
            last,
            Some(SubmissionEvent::Finished(Err(UploadError::MissingQuestions)))
        ));
    }
}
