//! Wire format and HTTP transport for the Gemini `generateContent` API.
//!
//! The transport is a trait so the client can be exercised against a mock
//! without network access; `HttpTransport` is the real implementation.

use crate::credentials::Credential;
use crate::error::AnalysisError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Base URL of the inference service.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used for thumbnail comparison.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

// --- Request types ---

#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

/// One content part: instruction text or an inlined image.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct InlineData {
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub data: String,
}

/// Structured-output declaration attached to every request.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    pub response_mime_type: String,
    #[serde(rename = "responseSchema")]
    pub response_schema: Value,
}

// --- Response types ---

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Executes one analysis call against the inference service.
///
/// Implementations return the raw response text; parsing it against the
/// contract stays with the caller.
#[async_trait]
pub trait AnalysisTransport: Send + Sync {
    async fn execute(
        &self,
        body: &GenerateContentRequest,
        credential: &Credential,
    ) -> Result<String, AnalysisError>;
}

/// Real HTTPS transport over reqwest.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

impl HttpTransport {
    pub fn new(endpoint: &str, model: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT, DEFAULT_MODEL)
    }
}

/// Map a non-success HTTP status to the right error class.
///
/// 401/403, and the service's invalid-key marker on a 400, mean the
/// credential was rejected; everything else is a transport failure.
fn classify_http_error(status: u16, body: String) -> AnalysisError {
    let credential_rejected = matches!(status, 401 | 403)
        || (status == 400 && body.contains("API_KEY_INVALID"))
        || (status == 400 && body.contains("API key not valid"));

    if credential_rejected {
        AnalysisError::Authentication {
            message: body,
            status_code: status,
        }
    } else {
        AnalysisError::Transport {
            message: body,
            status_code: Some(status),
        }
    }
}

#[async_trait]
impl AnalysisTransport for HttpTransport {
    async fn execute(
        &self,
        body: &GenerateContentRequest,
        credential: &Credential,
    ) -> Result<String, AnalysisError> {
        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", credential.expose())
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| AnalysisError::Transport {
                message: format!("Gemini request failed: {e}"),
                status_code: e.status().map(|s| s.as_u16()),
            })?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(classify_http_error(status.as_u16(), text));
        }

        let content_resp: GenerateContentResponse =
            resp.json().await.map_err(|e| AnalysisError::MalformedResponse {
                message: format!("Failed to parse Gemini response envelope: {e}"),
            })?;

        let text = content_resp
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .filter_map(|p| p.text)
            .collect::<Vec<_>>()
            .join("");

        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(AnalysisError::MalformedResponse {
                message: "Gemini returned no text content".to_string(),
            });
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_part_serialization_shapes() {
        let text = serde_json::to_value(Part::Text {
            text: "evaluate".to_string(),
        })
        .unwrap();
        assert_eq!(text, json!({ "text": "evaluate" }));

        let image = serde_json::to_value(Part::InlineData {
            inline_data: InlineData {
                mime_type: "image/png".to_string(),
                data: "QUJD".to_string(),
            },
        })
        .unwrap();
        assert_eq!(
            image,
            json!({ "inlineData": { "mimeType": "image/png", "data": "QUJD" } })
        );
    }

    #[test]
    fn test_generation_config_uses_camel_case_keys() {
        let config = serde_json::to_value(GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: json!({ "type": "OBJECT" }),
        })
        .unwrap();
        assert!(config.get("responseMimeType").is_some());
        assert!(config.get("responseSchema").is_some());
    }

    #[test]
    fn test_classify_401_and_403_as_authentication() {
        for status in [401u16, 403] {
            let err = classify_http_error(status, "denied".to_string());
            assert!(matches!(err, AnalysisError::Authentication { status_code, .. } if status_code == status));
        }
    }

    #[test]
    fn test_classify_invalid_key_400_as_authentication() {
        let body = r#"{"error":{"status":"INVALID_ARGUMENT","reason":"API_KEY_INVALID"}}"#;
        let err = classify_http_error(400, body.to_string());
        assert!(matches!(err, AnalysisError::Authentication { .. }));
    }

    #[test]
    fn test_classify_other_statuses_as_transport() {
        for status in [400u16, 429, 500, 503] {
            let err = classify_http_error(status, "boom".to_string());
            if status == 400 {
                // Plain 400 without the invalid-key marker is transport
                assert!(matches!(err, AnalysisError::Transport { .. }));
            } else {
                assert!(
                    matches!(err, AnalysisError::Transport { status_code: Some(code), .. } if code == status)
                );
            }
        }
    }

    #[test]
    fn test_response_envelope_text_extraction() {
        let envelope = json!({
            "candidates": [
                { "content": { "parts": [ { "text": "{\"scoreA\"" }, { "text": ": 87}" } ] } }
            ]
        });
        let parsed: GenerateContentResponse = serde_json::from_value(envelope).unwrap();
        let text = parsed
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .filter_map(|p| p.text)
            .collect::<Vec<_>>()
            .join("");
        assert_eq!(text, "{\"scoreA\": 87}");
    }
}
