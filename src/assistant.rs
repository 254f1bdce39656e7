//! Client for the text-completion service behind the skincare assistant.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::config;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("request to the completion service failed: {0}")]
	Transport(reqwest::Error),
	#[error("completion service returned {status}: {body}")]
	Status { status: StatusCode, body: String },
	#[error("unexpected response from the completion service")]
	Malformed,
}

impl From<reqwest::Error> for Error {
	/// Drops the request URL so it never reaches the logs.
	fn from(error: reqwest::Error) -> Self {
		Self::Transport(error.without_url())
	}
}

/// Answers free-text skin concerns.
#[async_trait]
pub trait Assistant: Send + Sync {
	async fn advise(&self, concern: &str) -> Result<String, Error>;
}

/// Builds the prompt sent for a concern.
pub fn prompt(concern: &str) -> String {
	format!(
		"Give a detailed skincare recommendation for: {concern}. \
		Format it properly with headings, bullet points, and spacing for better readability."
	)
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
	#[serde(default)]
	text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
	#[serde(default)]
	parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
	contents: Vec<Content>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
	content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
	#[serde(default)]
	candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
	/// The text of the first part of the first candidate.
	fn into_text(self) -> Option<String> {
		self.candidates
			.into_iter()
			.next()?
			.content?
			.parts
			.into_iter()
			.next()?
			.text
	}
}

/// Extracts the completion text from a raw response body.
fn parse_response(body: &[u8]) -> Result<String, Error> {
	serde_json::from_slice::<GenerateContentResponse>(body)
		.ok()
		.and_then(GenerateContentResponse::into_text)
		.ok_or(Error::Malformed)
}

/// Gemini `generateContent` client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
	http: Client,
	api_key: String,
	endpoint: String,
}

impl GeminiClient {
	pub fn new(config: &config::Assistant) -> Result<Self, Error> {
		let http = Client::builder()
			.timeout(config.timeout)
			.user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
			.build()?;

		Ok(Self {
			http,
			api_key: config.api_key.clone(),
			endpoint: format!(
				"{}/v1beta/models/{}:generateContent",
				config.base_url, config.model
			),
		})
	}
}

#[async_trait]
impl Assistant for GeminiClient {
	async fn advise(&self, concern: &str) -> Result<String, Error> {
		let request = GenerateContentRequest {
			contents: vec![Content {
				parts: vec![Part {
					text: Some(prompt(concern)),
				}],
			}],
		};

		let response = self
			.http
			.post(&self.endpoint)
			.header("x-goog-api-key", &self.api_key)
			.json(&request)
			.send()
			.await?;

		let status = response.status();

		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();

			return Err(Error::Status { status, body });
		}

		let body = response.bytes().await?;
		let text = parse_response(&body)?;

		tracing::debug!(chars = text.len(), "completion service answered");

		Ok(text)
	}
}
