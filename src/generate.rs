//! Text-generation adapter
//!
//! One `generateContent`-style POST per call. Transport failures, non-success
//! statuses, and malformed bodies all degrade to the fixed
//! [`GENERATION_ERROR`] string; retry policy, if any, belongs to the caller.

use crate::{Error, Result};

/// Sentinel returned when a generation call degrades
pub const GENERATION_ERROR: &str = "Error in API response.";

/// Issues a single text-generation request per prompt
pub trait TextGenerator {
    /// Generate text for a prompt, degrading to [`GENERATION_ERROR`] on any
    /// failure
    fn generate(&self, prompt: &str) -> String;
}

#[derive(serde::Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(serde::Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(serde::Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(serde::Deserialize)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(serde::Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(serde::Deserialize)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(serde::Deserialize)]
struct CandidatePart {
    text: String,
}

/// Gemini `generateContent` client
pub struct GeminiClient {
    client: reqwest::blocking::Client,
    url: String,
    api_key: String,
}

impl GeminiClient {
    /// Create a generation client for the given endpoint and key
    #[must_use]
    pub fn new(url: String, api_key: String) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            url,
            api_key,
        }
    }

    /// Issue the generation request and extract the response text
    fn request(&self, prompt: &str) -> Result<String> {
        let payload = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let url = format!("{}?key={}", self.url, self.api_key);

        let response = self.client.post(&url).json(&payload).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Generation(format!("generation API error {status}")));
        }

        extract_text(&response.text()?)
    }
}

impl TextGenerator for GeminiClient {
    fn generate(&self, prompt: &str) -> String {
        self.request(prompt).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "generation degraded");
            GENERATION_ERROR.to_string()
        })
    }
}

/// Pull the response text from `candidates[0].content.parts[0].text`
fn extract_text(body: &str) -> Result<String> {
    let parsed: GenerateResponse = serde_json::from_str(body)?;

    parsed
        .candidates
        .first()
        .and_then(|c| c.content.parts.first())
        .map(|p| p.text.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::Generation("response body has no text".to_string()))
}
