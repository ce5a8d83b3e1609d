//! Text Client
//!
//! Rewrites source text into a platform-styled post via a schema-constrained
//! generateContent call, and fetches topic seeds as free text.

use serde_json::{json, Value};
use tracing::{debug, warn};

use redraft_core::{Platform, Post, TopicCategory};

use crate::credentials::CredentialStore;
use crate::prompts::{instruction_for, post_response_schema, rewrite_prompt, topic_prompt};
use crate::types::{provider_message, GenAiConfig, GenAiError, GenAiResult};

/// Default generateContent API endpoint
pub(crate) const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Returned when topic generation fails; topic seeding is a convenience, not
/// a critical path, so errors never propagate.
pub const TOPIC_UNAVAILABLE: &str = "Could not fetch trending topics at this time.";

/// Returned when the provider replies with empty text.
pub const TOPIC_EMPTY_REPLY: &str = "Failed to generate topic.";

/// Client for the text-generation endpoint
pub struct TextClient {
    config: GenAiConfig,
    credentials: CredentialStore,
    client: reqwest::Client,
}

impl TextClient {
    /// Create a new client with the given configuration and credential store.
    pub fn new(config: GenAiConfig, credentials: CredentialStore) -> Self {
        Self {
            config,
            credentials,
            client: reqwest::Client::new(),
        }
    }

    fn base_url(&self) -> &str {
        self.config.base_url.as_deref().unwrap_or(GEMINI_API_URL)
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url(), model)
    }

    /// Rewrite `source_text` into a post styled for `platform`.
    ///
    /// Fails with `MissingApiKey` before any request is built, `Provider` on
    /// transport or provider failure, `MalformedResponse` when the structured
    /// payload cannot be parsed. No retries; resubmission is the caller's
    /// policy.
    pub async fn transform(&self, source_text: &str, platform: Platform) -> GenAiResult<Post> {
        let api_key = self.credentials.resolve().ok_or(GenAiError::MissingApiKey)?;
        let body = self.build_rewrite_body(source_text, platform);

        debug!(%platform, "requesting rewrite");
        let envelope = self.send(&api_key, &self.config.text_model, &body).await?;

        let payload = response_text(&envelope).ok_or_else(|| {
            GenAiError::MalformedResponse("response contained no text part".to_string())
        })?;
        parse_post(&payload)
    }

    /// Fetch a topic seed for the given category.
    ///
    /// Never fails: errors are logged and replaced by a fixed fallback
    /// sentence, an empty reply by another.
    pub async fn generate_topic(&self, category: TopicCategory) -> String {
        match self.request_topic(category).await {
            Ok(reply) => {
                let text = reply.trim();
                if text.is_empty() {
                    TOPIC_EMPTY_REPLY.to_string()
                } else {
                    text.to_string()
                }
            }
            Err(err) => {
                warn!(%category, "topic generation failed: {err}");
                TOPIC_UNAVAILABLE.to_string()
            }
        }
    }

    async fn request_topic(&self, category: TopicCategory) -> GenAiResult<String> {
        let api_key = self.credentials.resolve().ok_or(GenAiError::MissingApiKey)?;
        let body = self.build_topic_body(category);
        let envelope = self.send(&api_key, &self.config.text_model, &body).await?;
        Ok(response_text(&envelope).unwrap_or_default())
    }

    /// Build the rewrite request: persona instruction as the system-level
    /// directive, JSON response forced through the schema constraint,
    /// temperature left at the provider default.
    pub(crate) fn build_rewrite_body(&self, source_text: &str, platform: Platform) -> Value {
        json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": rewrite_prompt(source_text, platform) }]
            }],
            "systemInstruction": {
                "parts": [{ "text": instruction_for(platform) }]
            },
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": post_response_schema()
            }
        })
    }

    pub(crate) fn build_topic_body(&self, category: TopicCategory) -> Value {
        json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": topic_prompt(category) }]
            }],
            "generationConfig": {
                "temperature": self.config.topic_temperature
            }
        })
    }

    async fn send(&self, api_key: &str, model: &str, body: &Value) -> GenAiResult<Value> {
        let response = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", api_key)
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| GenAiError::Provider(e.to_string()))?;

        let status = response.status();
        let body_text = response
            .text()
            .await
            .map_err(|e| GenAiError::Provider(e.to_string()))?;

        if !status.is_success() {
            return Err(GenAiError::Provider(provider_message(
                status.as_u16(),
                &body_text,
            )));
        }

        serde_json::from_str(&body_text).map_err(|e| {
            GenAiError::MalformedResponse(format!("invalid response envelope: {}", e))
        })
    }
}

/// Concatenate the text parts of the first candidate, if any.
pub fn response_text(envelope: &Value) -> Option<String> {
    let parts = envelope
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(Value::as_str))
        .collect();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Parse the structured payload into a [`Post`].
///
/// The schema marks `hashtags` required, but providers violate that contract;
/// a missing array defaults to empty rather than failing the whole rewrite.
/// Empty `content` is rejected so callers never see a hollow post.
pub fn parse_post(payload: &str) -> GenAiResult<Post> {
    let mut post: Post = serde_json::from_str(payload)
        .map_err(|e| GenAiError::MalformedResponse(e.to_string()))?;

    if post.content.trim().is_empty() {
        return Err(GenAiError::MalformedResponse(
            "content is empty".to_string(),
        ));
    }

    post.hashtags = post
        .hashtags
        .iter()
        .map(|tag| tag.trim().trim_start_matches('#').trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect();

    Ok(post)
}
