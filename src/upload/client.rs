use crate::error::{Result, UploadError};
use crate::upload::types::{ResultsReply, SelectedFile, UploadReply};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

pub const UPLOAD_PATH: &str = "/upload";
pub const RESULTS_PATH: &str = "/date";
pub const DEFAULT_UPLOAD_FIELD: &str = "file";

/// The two server calls a submission is made of.
#[async_trait]
pub trait QuestionApi: Send + Sync {
    async fn upload(&self, file: &SelectedFile) -> Result<UploadReply>;
    async fn fetch_questions(&self) -> Result<ResultsReply>;
}

#[derive(Clone)]
pub struct HttpQuestionApi {
    client: Client,
    upload_url: Url,
    results_url: Url,
    upload_field: String,
}

impl HttpQuestionApi {
    pub fn new(
        server_url: &Url,
        upload_field: impl Into<String>,
    ) -> std::result::Result<Self, url::ParseError> {
        Ok(Self {
            client: Client::new(),
            upload_url: server_url.join(UPLOAD_PATH)?,
            results_url: server_url.join(RESULTS_PATH)?,
            upload_field: upload_field.into(),
        })
    }

    pub fn upload_url(&self) -> &Url {
        &self.upload_url
    }

    pub fn results_url(&self) -> &Url {
        &self.results_url
    }

    // Status codes are not checked: the server reports failures as JSON
    // bodies with 4xx codes, so the body is always what decides.
    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response.bytes().await?;
        tracing::debug!(%status, bytes = body.len(), "Received response");
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl QuestionApi for HttpQuestionApi {
    async fn upload(&self, file: &SelectedFile) -> Result<UploadReply> {
        let content = tokio::fs::read(&file.path)
            .await
            .map_err(|source| UploadError::ReadFile {
                name: file.name.clone(),
                source,
            })?;

        tracing::debug!(
            "Uploading '{}' ({} bytes) to {}",
            file.name,
            content.len(),
            self.upload_url
        );

        let part = Part::bytes(content)
            .file_name(file.name.clone())
            .mime_str("application/pdf")?;
        let form = Form::new().part(self.upload_field.clone(), part);

        let response = self
            .client
            .post(self.upload_url.clone())
            .multipart(form)
            .send()
            .await?;

        Self::read_json(response).await
    }

    async fn fetch_questions(&self) -> Result<ResultsReply> {
        tracing::debug!("Requesting questions from {}", self.results_url);

        let response = self.client.get(self.results_url.clone()).send().await?;

        Self::read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("http://127.0.0.1:5000", "http://127.0.0.1:5000/upload", "http://127.0.0.1:5000/date")]
    #[case("http://quiz.local/app/", "http://quiz.local/upload", "http://quiz.local/date")]
    fn endpoints_are_absolute_paths(
        #[case] server: &str,
        #[case] upload: &str,
        #[case] results: &str,
    ) {
        let server = Url::parse(server).unwrap();
        let api = HttpQuestionApi::new(&server, DEFAULT_UPLOAD_FIELD).unwrap();
        assert_eq!(api.upload_url().as_str(), upload);
        assert_eq!(api.results_url().as_str(), results);
    }
}
