//! Image Client
//!
//! Synthesizes an illustration for a post. The endpoint's request shape has
//! drifted across versions, so the client tries an ordered list of request
//! variants; extraction runs against whichever response arrives first with a
//! usable image. Only when every variant is exhausted does the call fail,
//! classified from the last captured error.

use std::future::Future;

use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::credentials::CredentialStore;
use crate::extract::extract_image;
use crate::text::GEMINI_API_URL;
use crate::types::{provider_message, GenAiConfig, ImageError, ImageReference};

/// One request-body shape, named for logging.
#[derive(Debug, Clone)]
pub struct RequestVariant {
    pub name: &'static str,
    pub body: Value,
}

/// The known request shapes, in the order they are attempted.
pub fn request_variants(prompt: &str, temperature: f32) -> Vec<RequestVariant> {
    vec![
        RequestVariant {
            name: "modal-config",
            body: json!({
                "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
                "generationConfig": {
                    "responseModalities": ["IMAGE"],
                    "temperature": temperature
                }
            }),
        },
        RequestVariant {
            name: "bare-contents",
            body: json!({
                "contents": [{ "parts": [{ "text": prompt }] }],
                "generationConfig": { "responseModalities": ["IMAGE"] }
            }),
        },
        RequestVariant {
            name: "snake-case-config",
            body: json!({
                "contents": [{ "parts": [{ "text": prompt }] }],
                "generation_config": { "response_modalities": ["IMAGE"] }
            }),
        },
    ]
}

/// Ordered fallback over request variants.
///
/// The attempt closure reports `Ok(Some(_))` on a usable image, `Ok(None)`
/// when a response arrived without one (a soft miss: some responses
/// legitimately omit image parts, so the loop moves on rather than aborting),
/// and `Err(message)` when the call itself failed. The last captured error is
/// what gets classified after exhaustion.
pub struct VariantChain {
    variants: Vec<RequestVariant>,
}

impl VariantChain {
    pub fn new(variants: Vec<RequestVariant>) -> Self {
        Self { variants }
    }

    /// Variant names in attempt order.
    pub fn names(&self) -> Vec<&'static str> {
        self.variants.iter().map(|v| v.name).collect()
    }

    /// Try each variant in declared order, returning the first extracted
    /// reference.
    pub async fn run<F, Fut>(&self, mut attempt: F) -> Result<ImageReference, ImageError>
    where
        F: FnMut(&RequestVariant) -> Fut,
        Fut: Future<Output = Result<Option<ImageReference>, String>>,
    {
        let mut last_error: Option<String> = None;

        for variant in &self.variants {
            debug!(variant = variant.name, "attempting image request variant");
            match attempt(variant).await {
                Ok(Some(reference)) => {
                    info!(variant = variant.name, "image variant succeeded");
                    return Ok(reference);
                }
                Ok(None) => {
                    warn!(
                        variant = variant.name,
                        "variant returned a response without image data"
                    );
                }
                Err(message) => {
                    warn!(variant = variant.name, error = %message, "variant call failed");
                    last_error = Some(message);
                }
            }
        }

        Err(exhausted(last_error))
    }

    /// Synchronous twin of [`run`](Self::run) for testing the fallback logic
    /// without a transport.
    pub fn run_sync<F>(&self, mut attempt: F) -> Result<ImageReference, ImageError>
    where
        F: FnMut(&RequestVariant) -> Result<Option<ImageReference>, String>,
    {
        let mut last_error: Option<String> = None;

        for variant in &self.variants {
            match attempt(variant) {
                Ok(Some(reference)) => return Ok(reference),
                Ok(None) => {}
                Err(message) => last_error = Some(message),
            }
        }

        Err(exhausted(last_error))
    }
}

fn exhausted(last_error: Option<String>) -> ImageError {
    match last_error {
        Some(message) => ImageError::from_provider(message),
        None => ImageError::no_image_data(),
    }
}

/// Client for the image-generation endpoint
pub struct ImageClient {
    config: GenAiConfig,
    credentials: CredentialStore,
    client: reqwest::Client,
}

impl ImageClient {
    /// Create a new client with the given configuration and credential store.
    pub fn new(config: GenAiConfig, credentials: CredentialStore) -> Self {
        Self {
            config,
            credentials,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.as_deref().unwrap_or(GEMINI_API_URL),
            self.config.image_model
        )
    }

    /// Synthesize an image for the given prompt.
    ///
    /// Never owns the post: on success the caller merges the reference in,
    /// and a failure must never invalidate an already-produced post.
    pub async fn synthesize(&self, prompt: &str) -> Result<ImageReference, ImageError> {
        let api_key = match self.credentials.resolve() {
            Some(key) => key,
            None => return Err(ImageError::missing_key()),
        };

        let chain = VariantChain::new(request_variants(prompt, self.config.image_temperature));
        let url = self.endpoint();

        chain
            .run(|variant| {
                let request = self
                    .client
                    .post(&url)
                    .header("x-goog-api-key", api_key.as_str())
                    .header("content-type", "application/json")
                    .json(&variant.body);
                async move {
                    let response = request.send().await.map_err(|e| e.to_string())?;
                    let status = response.status();
                    let body = response.text().await.map_err(|e| e.to_string())?;
                    if !status.is_success() {
                        return Err(provider_message(status.as_u16(), &body));
                    }
                    let envelope: Value = serde_json::from_str(&body)
                        .map_err(|e| format!("invalid response envelope: {}", e))?;
                    Ok(extract_image(&envelope))
                }
            })
            .await
    }
}
