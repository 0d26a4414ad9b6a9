//! Gemini generative-language client.
//!
//! The client is injected behind the `GenerativeModel` trait; its lifecycle
//! is owned by the process's composition root, never by ambient global state.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{AiError, AiResult};

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";

/// A synchronous-per-call text-in/text-out generative model.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Send one prompt and return the model's textual response.
    async fn generate(&self, prompt: &str) -> AiResult<String>;

    fn model_name(&self) -> &str;
}

/// Configuration for the Gemini client.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    /// Endpoint override, used by tests to point at a local mock server.
    pub base_url: Option<String>,
}

/// Gemini `generateContent` HTTP client.
pub struct GeminiClient {
    client: Client,
    model: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiResponseContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> AiResult<Self> {
        if config.api_key.is_empty() {
            return Err(AiError::Configuration(
                "Gemini API key not set. Provide GEMINI_API_KEY.".to_string(),
            ));
        }

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            config
                .api_key
                .parse()
                .map_err(|_| AiError::Configuration("Invalid API key format".to_string()))?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| AiError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| GEMINI_API_URL.to_string());

        Ok(Self {
            client,
            model: config.model,
            base_url,
        })
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(&self, prompt: &str) -> AiResult<String> {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AiError::Request(format!("Gemini API request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AiError::Request(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            let message = serde_json::from_str::<GeminiErrorBody>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| body.clone());
            return Err(AiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let response: GeminiResponse = serde_json::from_str(&body)
            .map_err(|e| AiError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let text: String = response
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| {
                c.parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(AiError::InvalidResponse(
                "Response contained no text candidates".to_string(),
            ));
        }

        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(server: &mockito::ServerGuard) -> GeminiClient {
        GeminiClient::new(GeminiConfig {
            api_key: "test-key".to_string(),
            model: "gemini-2.5-flash".to_string(),
            base_url: Some(server.url()),
        })
        .unwrap()
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let result = GeminiClient::new(GeminiConfig {
            api_key: String::new(),
            model: "gemini-2.5-flash".to_string(),
            base_url: None,
        });
        assert!(matches!(result, Err(AiError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_generate_returns_candidate_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock(
                "POST",
                "/v1beta/models/gemini-2.5-flash:generateContent",
            )
            .match_header("x-goog-api-key", "test-key")
            .with_status(200)
            .with_body(
                r#"{"candidates":[{"content":{"parts":[{"text":"{\"summary\":\"ok\"}"}]}}]}"#,
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let text = client.generate("analyze this").await.unwrap();
        assert_eq!(text, r#"{"summary":"ok"}"#);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_surfaces_api_error_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock(
                "POST",
                "/v1beta/models/gemini-2.5-flash:generateContent",
            )
            .with_status(429)
            .with_body(r#"{"error":{"message":"Resource exhausted"}}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.generate("analyze this").await.unwrap_err();
        match err {
            AiError::Api { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "Resource exhausted");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_generate_rejects_empty_candidates() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock(
                "POST",
                "/v1beta/models/gemini-2.5-flash:generateContent",
            )
            .with_status(200)
            .with_body(r#"{"candidates":[]}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.generate("analyze this").await.unwrap_err();
        assert!(matches!(err, AiError::InvalidResponse(_)));
    }
}
