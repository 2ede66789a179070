//! Inference client abstraction
//!
//! Chat completion and zero-shot classification against a hosted inference
//! API (Hugging Face style routes), plus a scripted fake client for tests.
//! No retries: callers fall back to rule-based output on any error.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Sampling temperature for chat completions
const CHAT_TEMPERATURE: f32 = 0.7;

/// Inference API configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub api_token: Option<String>,
    pub chat_model: String,
    pub classification_model: String,
    pub timeout_secs: u64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://api-inference.huggingface.co".to_string(),
            api_token: None,
            chat_model: "meta-llama/Llama-3.2-3B-Instruct".to_string(),
            classification_model: "facebook/bart-large-mnli".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Inference errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InferenceError {
    #[error("Inference is disabled in configuration")]
    Disabled,

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Invalid JSON response: {0}")]
    InvalidJson(String),

    #[error("Request timeout after {0} seconds")]
    Timeout(u64),

    #[error("Model returned empty response")]
    EmptyResponse,
}

/// Chat role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One chat completion message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// One zero-shot classification label with its score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

/// Generic inference client
pub trait InferenceClient: Send + Sync {
    /// Chat completion, returns the generated text
    fn chat(
        &self,
        model: &str,
        messages: &[ChatMessage],
        max_tokens: u32,
    ) -> Result<String, InferenceError>;

    /// Zero-shot classification, labels sorted by score (best first)
    fn classify(
        &self,
        model: &str,
        text: &str,
        labels: &[&str],
    ) -> Result<Vec<LabelScore>, InferenceError>;
}

/// Real client over blocking HTTP
pub struct HttpInferenceClient {
    config: InferenceConfig,
    client: reqwest::blocking::Client,
}

impl HttpInferenceClient {
    pub fn new(config: InferenceConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self { config, client })
    }

    fn post(&self, url: &str, body: &serde_json::Value) -> Result<serde_json::Value, InferenceError> {
        if !self.config.enabled {
            return Err(InferenceError::Disabled);
        }

        let mut request = self.client.post(url).json(body);
        if let Some(token) = &self.config.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().map_err(|e| {
            if e.is_timeout() {
                InferenceError::Timeout(self.config.timeout_secs)
            } else {
                InferenceError::Http(format!("Request failed: {}", e))
            }
        })?;

        if !response.status().is_success() {
            return Err(InferenceError::Http(format!(
                "HTTP {} from inference API",
                response.status()
            )));
        }

        response
            .json()
            .map_err(|e| InferenceError::InvalidJson(format!("Failed to parse response: {}", e)))
    }
}

impl InferenceClient for HttpInferenceClient {
    fn chat(
        &self,
        model: &str,
        messages: &[ChatMessage],
        max_tokens: u32,
    ) -> Result<String, InferenceError> {
        let url = format!(
            "{}/models/{}/v1/chat/completions",
            self.config.endpoint.trim_end_matches('/'),
            model
        );
        tracing::debug!("Calling chat model {}", model);

        let body = serde_json::json!({
            "model": model,
            "messages": messages,
            "max_tokens": max_tokens,
            "temperature": CHAT_TEMPERATURE,
            "stream": false,
        });

        let response = self.post(&url, &body)?;
        parse_chat_response(&response)
    }

    fn classify(
        &self,
        model: &str,
        text: &str,
        labels: &[&str],
    ) -> Result<Vec<LabelScore>, InferenceError> {
        let url = format!(
            "{}/models/{}",
            self.config.endpoint.trim_end_matches('/'),
            model
        );
        tracing::debug!("Calling classification model {}", model);

        let body = serde_json::json!({
            "inputs": text,
            "parameters": { "candidate_labels": labels },
        });

        let response = self.post(&url, &body)?;
        parse_classification(&response)
    }
}

/// Extract the generated text from an OpenAI-style chat completion
pub fn parse_chat_response(response: &serde_json::Value) -> Result<String, InferenceError> {
    let text = response
        .get("choices")
        .and_then(|v| v.get(0))
        .and_then(|v| v.get("message"))
        .and_then(|v| v.get("content"))
        .and_then(|v| v.as_str())
        .ok_or(InferenceError::EmptyResponse)?;

    if text.trim().is_empty() {
        return Err(InferenceError::EmptyResponse);
    }

    Ok(text.to_string())
}

/// Parse a zero-shot classification result.
///
/// Accepts `{"labels": [...], "scores": [...]}` and `[{"label", "score"}]`.
pub fn parse_classification(response: &serde_json::Value) -> Result<Vec<LabelScore>, InferenceError> {
    let mut results: Vec<LabelScore> = if response.is_array() {
        serde_json::from_value(response.clone())
            .map_err(|e| InferenceError::InvalidJson(format!("Unexpected label list: {}", e)))?
    } else {
        let labels: Vec<String> = response
            .get("labels")
            .cloned()
            .map(serde_json::from_value::<Vec<String>>)
            .transpose()
            .map_err(|e| InferenceError::InvalidJson(format!("Bad labels: {}", e)))?
            .ok_or_else(|| InferenceError::InvalidJson("Missing labels".to_string()))?;
        let scores: Vec<f64> = response
            .get("scores")
            .cloned()
            .map(serde_json::from_value::<Vec<f64>>)
            .transpose()
            .map_err(|e| InferenceError::InvalidJson(format!("Bad scores: {}", e)))?
            .ok_or_else(|| InferenceError::InvalidJson("Missing scores".to_string()))?;

        if labels.len() != scores.len() {
            return Err(InferenceError::InvalidJson(format!(
                "{} labels but {} scores",
                labels.len(),
                scores.len()
            )));
        }

        labels
            .into_iter()
            .zip(scores)
            .map(|(label, score)| LabelScore { label, score })
            .collect()
    };

    if results.is_empty() {
        return Err(InferenceError::EmptyResponse);
    }

    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    Ok(results)
}

/// Fake inference client for testing
pub struct FakeInferenceClient {
    chat_responses: Mutex<Vec<Result<String, InferenceError>>>,
    classify_responses: Mutex<Vec<Result<Vec<LabelScore>, InferenceError>>>,
    requests: Mutex<Vec<Vec<ChatMessage>>>,
    call_count: Mutex<usize>,
}

impl FakeInferenceClient {
    /// Create a fake client with scripted responses.
    ///
    /// Multiple responses are returned in order; the last one repeats.
    pub fn new(
        chat_responses: Vec<Result<String, InferenceError>>,
        classify_responses: Vec<Result<Vec<LabelScore>, InferenceError>>,
    ) -> Self {
        Self {
            chat_responses: Mutex::new(chat_responses),
            classify_responses: Mutex::new(classify_responses),
            requests: Mutex::new(Vec::new()),
            call_count: Mutex::new(0),
        }
    }

    /// Chat always answers with `text`
    pub fn always_reply(text: impl Into<String>) -> Self {
        Self::new(vec![Ok(text.into())], Vec::new())
    }

    /// Every call fails with `error`
    pub fn always_error(error: InferenceError) -> Self {
        Self::new(vec![Err(error.clone())], vec![Err(error)])
    }

    /// Classification always answers with `labels`
    pub fn always_classify(labels: Vec<LabelScore>) -> Self {
        Self::new(Vec::new(), vec![Ok(labels)])
    }

    /// Number of calls made (chat and classify)
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Message lists received by `chat`, in call order
    pub fn chat_requests(&self) -> Vec<Vec<ChatMessage>> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn bump(&self) {
        *self.call_count.lock().unwrap_or_else(PoisonError::into_inner) += 1;
    }
}

fn next_scripted<T: Clone>(
    responses: &Mutex<Vec<Result<T, InferenceError>>>,
) -> Result<T, InferenceError> {
    let mut responses = responses.lock().unwrap_or_else(PoisonError::into_inner);
    match responses.len() {
        0 => Err(InferenceError::EmptyResponse),
        1 => responses[0].clone(),
        _ => responses.remove(0),
    }
}

impl InferenceClient for FakeInferenceClient {
    fn chat(
        &self,
        _model: &str,
        messages: &[ChatMessage],
        _max_tokens: u32,
    ) -> Result<String, InferenceError> {
        self.bump();
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(messages.to_vec());
        next_scripted(&self.chat_responses)
    }

    fn classify(
        &self,
        _model: &str,
        _text: &str,
        _labels: &[&str],
    ) -> Result<Vec<LabelScore>, InferenceError> {
        self.bump();
        next_scripted(&self.classify_responses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inference_config_default() {
        let config = InferenceConfig::default();
        assert!(config.enabled);
        assert!(config.api_token.is_none());
        assert_eq!(config.classification_model, "facebook/bart-large-mnli");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_parse_chat_response() {
        let json = serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "Hello!"}}]
        });
        assert_eq!(parse_chat_response(&json).unwrap(), "Hello!");

        let blank = serde_json::json!({"choices": [{"message": {"content": "   "}}]});
        assert_eq!(parse_chat_response(&blank), Err(InferenceError::EmptyResponse));

        let missing = serde_json::json!({"choices": []});
        assert_eq!(parse_chat_response(&missing), Err(InferenceError::EmptyResponse));
    }

    #[test]
    fn test_parse_classification_both_shapes() {
        let columnar = serde_json::json!({
            "sequence": "profile",
            "labels": ["low", "high"],
            "scores": [0.2, 0.8]
        });
        let parsed = parse_classification(&columnar).unwrap();
        assert_eq!(parsed[0].label, "high");
        assert_eq!(parsed[1].label, "low");

        let rows = serde_json::json!([
            {"label": "a", "score": 0.1},
            {"label": "b", "score": 0.9}
        ]);
        let parsed = parse_classification(&rows).unwrap();
        assert_eq!(parsed[0].label, "b");
    }

    #[test]
    fn test_parse_classification_rejects_mismatch() {
        let json = serde_json::json!({"labels": ["a", "b"], "scores": [0.5]});
        assert!(matches!(
            parse_classification(&json),
            Err(InferenceError::InvalidJson(_))
        ));
        assert_eq!(
            parse_classification(&serde_json::json!([])),
            Err(InferenceError::EmptyResponse)
        );
    }

    #[test]
    fn test_disabled_client_does_not_send() {
        let config = InferenceConfig {
            enabled: false,
            endpoint: "http://127.0.0.1:9".to_string(),
            ..Default::default()
        };
        let client = HttpInferenceClient::new(config).unwrap();
        let result = client.chat("model", &[ChatMessage::new(ChatRole::User, "hi")], 10);
        assert_eq!(result, Err(InferenceError::Disabled));
    }

    #[test]
    fn test_fake_client_sequence() {
        let client = FakeInferenceClient::new(
            vec![Ok("one".to_string()), Err(InferenceError::Timeout(30))],
            Vec::new(),
        );
        let msgs = [ChatMessage::new(ChatRole::User, "hi")];

        assert_eq!(client.chat("m", &msgs, 10).unwrap(), "one");
        assert_eq!(client.chat("m", &msgs, 10), Err(InferenceError::Timeout(30)));
        // last response repeats
        assert_eq!(client.chat("m", &msgs, 10), Err(InferenceError::Timeout(30)));
        assert_eq!(client.call_count(), 3);
        assert_eq!(client.chat_requests().len(), 3);
    }

    #[test]
    fn test_fake_client_without_script() {
        let client = FakeInferenceClient::always_reply("hi");
        assert_eq!(
            client.classify("m", "text", &["a"]),
            Err(InferenceError::EmptyResponse)
        );
    }
}
