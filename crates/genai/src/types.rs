//! Client Types
//!
//! Configuration and error types for the Gemini generateContent client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for the generateContent client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenAiConfig {
    /// Model used for rewriting and topic generation
    pub text_model: String,
    /// Image-capable model used for illustration synthesis
    pub image_model: String,
    /// Base URL override (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Temperature for topic generation (rewrites use the provider default)
    #[serde(default = "default_topic_temperature")]
    pub topic_temperature: f32,
    /// Temperature for the primary image request variant
    #[serde(default = "default_image_temperature")]
    pub image_temperature: f32,
}

fn default_topic_temperature() -> f32 {
    0.9
}

fn default_image_temperature() -> f32 {
    0.7
}

impl Default for GenAiConfig {
    fn default() -> Self {
        Self {
            text_model: "gemini-3-flash-preview".to_string(),
            image_model: "gemini-2.5-flash-image".to_string(),
            base_url: None,
            topic_temperature: default_topic_temperature(),
            image_temperature: default_image_temperature(),
        }
    }
}

/// Error types for text generation operations
#[derive(Debug, Clone, Error)]
pub enum GenAiError {
    /// No credential could be resolved; blocking until the user supplies one
    #[error("Gemini API key is not set. Please configure it in Settings.")]
    MissingApiKey,
    /// Transport or provider-side failure, message passed through verbatim
    #[error("{0}")]
    Provider(String),
    /// The structured payload could not be parsed into a post
    #[error("Failed to parse the model response: {0}")]
    MalformedResponse(String),
}

/// Result type for text generation operations
pub type GenAiResult<T> = Result<T, GenAiError>;

/// Extract a readable message from a provider error body.
///
/// The API wraps errors as `{"error": {"message": ...}}`; fall back to the
/// raw body when the envelope is something else.
pub(crate) fn provider_message(status: u16, body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    let message = parsed
        .as_ref()
        .and_then(|v| v.get("error"))
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str());
    match message {
        Some(m) => m.to_string(),
        None => format!("HTTP {}: {}", status, body),
    }
}

/// Failure categories for image synthesis, derived from the raw provider
/// error text (the provider does not guarantee a structured code).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageErrorKind {
    QuotaOrBilling,
    ModelUnavailable,
    PermissionDenied,
    Unknown,
}

impl ImageErrorKind {
    /// Classify an error message into a failure category by keyword family.
    pub fn classify(message: &str) -> Self {
        let lower = message.to_lowercase();
        if ["quota", "billing", "payment"].iter().any(|k| lower.contains(k)) {
            ImageErrorKind::QuotaOrBilling
        } else if ["model", "not found", "not available"]
            .iter()
            .any(|k| lower.contains(k))
        {
            ImageErrorKind::ModelUnavailable
        } else if ["permission", "unauthorized"].iter().any(|k| lower.contains(k)) {
            ImageErrorKind::PermissionDenied
        } else {
            ImageErrorKind::Unknown
        }
    }
}

/// Image synthesis failure after every request variant has been exhausted.
///
/// `message` keeps the raw provider text for logging; `Display` renders the
/// actionable message for the user.
#[derive(Debug, Clone)]
pub struct ImageError {
    pub kind: ImageErrorKind,
    pub message: String,
}

impl ImageError {
    /// Classify a raw provider error captured during the variant loop.
    pub fn from_provider(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: ImageErrorKind::classify(&message),
            message,
        }
    }

    /// Every variant produced a response, none carried an image.
    pub fn no_image_data() -> Self {
        Self {
            kind: ImageErrorKind::Unknown,
            message: "The image model returned no image data. Please try again.".to_string(),
        }
    }

    /// No credential could be resolved.
    pub fn missing_key() -> Self {
        Self {
            kind: ImageErrorKind::Unknown,
            message: "Gemini API key is not set. Please configure it in Settings.".to_string(),
        }
    }
}

impl std::fmt::Display for ImageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ImageErrorKind::QuotaOrBilling => write!(
                f,
                "Image generation requires a paid API plan. Please upgrade your Gemini API account."
            ),
            ImageErrorKind::ModelUnavailable => write!(
                f,
                "Image generation model is not available. Please check your API access or try a different model."
            ),
            ImageErrorKind::PermissionDenied => write!(
                f,
                "API key does not have permission to generate images. Please check your API key permissions."
            ),
            ImageErrorKind::Unknown => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ImageError {}

/// A normalized, directly displayable image reference: either a complete
/// `data:` URL or a remote URL, never the raw provider envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference(String);

impl ImageReference {
    /// Wrap inline base64 bytes into a `data:` URL.
    pub fn inline(mime_type: &str, data: &str) -> Self {
        Self(format!("data:{};base64,{}", mime_type, data))
    }

    /// An already-displayable reference: a remote URL or a complete `data:` URL.
    pub fn ready(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Whether the reference embeds the image bytes inline.
    pub fn is_inline(&self) -> bool {
        self.0.starts_with("data:")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ImageReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
