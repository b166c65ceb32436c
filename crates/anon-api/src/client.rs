//! reqwest client for the anonymisation service

use anon_core::{
    Backend, Choice, DownloadFormat, EntityStep, FinalOutput, Level, SaveReceipt, SaveRequest,
};
use async_trait::async_trait;
use reqwest::multipart;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ApiError, Result};
use crate::types::{DetectRequest, ExtractResponse, FinalizeRequest, Reply, SaveResponse};

const USER_AGENT: &str = "anon/0.1 (anonymisation client)";

/// HTTP client bound to one backend base URL
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

impl Client {
    /// No request timeout is set: large documents can take the server a
    /// while, and retries are user-initiated.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check the status, then read the body as either the expected payload
    /// or a server-reported `{ "error": … }`.
    async fn read_reply<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let url = response.url().to_string();
        let body = response.text().await?;

        match serde_json::from_str::<Reply<T>>(&body) {
            Ok(reply) => reply.into_result().map_err(ApiError::Server),
            Err(e) if status.is_success() => Err(e.into()),
            Err(_) => Err(ApiError::Status {
                status: status.as_u16(),
                url,
            }),
        }
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl serde::Serialize,
    ) -> Result<T> {
        let url = self.endpoint(path);
        debug!(%url, "POST");
        let response = self.http.post(&url).json(body).send().await?;
        Self::read_reply(response).await
    }

    /// Fetch a saved record in the given export format
    pub async fn download(&self, record_id: &str, format: DownloadFormat) -> Result<Vec<u8>> {
        let url = Backend::download_url(self, record_id, format);
        debug!(%url, "GET");
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status {
                status: response.status().as_u16(),
                url,
            });
        }
        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl Backend for Client {
    async fn extract(&self, file_name: &str, bytes: Vec<u8>) -> anyhow::Result<String> {
        let part = multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = multipart::Form::new().part("file", part);

        let url = self.endpoint("/upload-file");
        debug!(%url, file_name, "POST multipart");
        let response = self.http.post(&url).multipart(form).send().await?;
        let extracted: ExtractResponse = Self::read_reply(response).await?;
        Ok(extracted.text)
    }

    async fn detect(&self, text: &str, level: Level) -> anyhow::Result<Vec<EntityStep>> {
        let steps = self
            .post_json("/process-text", &DetectRequest { text, level })
            .await?;
        Ok(steps)
    }

    async fn finalize(
        &self,
        original_text: &str,
        choices: &[Choice],
    ) -> anyhow::Result<FinalOutput> {
        let output = self
            .post_json(
                "/anonymize-text",
                &FinalizeRequest::Stepwise {
                    original_text,
                    choices,
                },
            )
            .await?;
        Ok(output)
    }

    async fn finalize_one_shot(
        &self,
        original_text: &str,
        level: Level,
    ) -> anyhow::Result<FinalOutput> {
        let output = self
            .post_json(
                "/anonymize-text",
                &FinalizeRequest::OneShot {
                    original_text,
                    level,
                },
            )
            .await?;
        Ok(output)
    }

    async fn save(&self, report: &SaveRequest) -> anyhow::Result<SaveReceipt> {
        let response: SaveResponse = self.post_json("/save-report", report).await?;
        if !response.success {
            return Err(ApiError::Server(
                response
                    .error
                    .unwrap_or_else(|| "Failed to save report".to_string()),
            )
            .into());
        }
        Ok(SaveReceipt {
            record_id: response.record_id,
            redirect_url: response.redirect_url,
        })
    }

    fn download_url(&self, record_id: &str, format: DownloadFormat) -> String {
        format!("{}/download/{}/{}", self.base_url, record_id, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let client = Client::new("http://localhost:5000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.endpoint("/process-text"), "http://localhost:5000/process-text");
    }

    #[test]
    fn download_urls_are_addressed_by_record_and_format() {
        let client = Client::new("http://localhost:5000").unwrap();
        assert_eq!(
            Backend::download_url(&client, "42", DownloadFormat::Pdf),
            "http://localhost:5000/download/42/pdf"
        );
        assert_eq!(
            Backend::download_url(&client, "42", DownloadFormat::Txt),
            "http://localhost:5000/download/42/txt"
        );
    }
}
