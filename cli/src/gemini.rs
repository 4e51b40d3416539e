//! Blocking Gemini client used as the session's text source.

use std::time::Duration;

use reqwest::Client;
use tokio::runtime::Runtime;

use textgen::api::{extract_text, generate_url, GenerateRequest, TextSource};
use textgen::{Error, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Calls `generateContent` on its own runtime so it can be driven from a
/// plain worker thread.
pub struct GeminiClient {
    client: Client,
    runtime: Runtime,
    url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, base_url: &str, model: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::network(e.to_string()))?;
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;

        Ok(Self {
            client,
            runtime,
            url: generate_url(base_url, model),
            api_key: api_key.into(),
        })
    }

    async fn request(&self, prompt: &str) -> Result<String> {
        log::debug!("POST {}", self.url);
        let response = self
            .client
            .post(&self.url)
            .query(&[("key", self.api_key.as_str())])
            .json(&GenerateRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(|e| Error::network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::network(e.to_string()))?;

        if !status.is_success() {
            return Err(Error::http(status.as_u16(), body));
        }

        extract_text(&body)
    }
}

impl TextSource for GeminiClient {
    fn fetch_generated_text(&self, prompt: &str) -> Result<String> {
        self.runtime.block_on(self.request(prompt))
    }
}
