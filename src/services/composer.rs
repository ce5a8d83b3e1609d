//! Composer Service
//!
//! Drives the post-generation flow: rewrite first, then illustration. The
//! rewritten post is handed to the caller immediately; the image is patched
//! in afterwards and its failure only ever produces a dismissible warning.

use tracing::{info, warn};

use redraft_core::{Notice, Platform, Post, RewriteRequest, TopicCategory};
use redraft_genai::{
    CredentialStore, GenAiConfig, GenAiError, ImageClient, TextClient,
};

use crate::models::settings::AppConfig;
use crate::utils::error::{AppError, AppResult};

/// Shown when a rewrite fails because the structured payload was unusable.
const TRANSFORM_FAILED: &str = "Failed to transform content. Please try again.";

/// Orchestrates the two clients on behalf of the presentation layer.
pub struct ComposerService {
    text: TextClient,
    image: ImageClient,
    credentials: CredentialStore,
}

impl ComposerService {
    /// Create a service from the app configuration, seeding the session
    /// credential override from the persisted key.
    pub fn new(config: &AppConfig) -> Self {
        Self::with_credentials(config, CredentialStore::new())
    }

    /// Create a service with an explicit credential store.
    pub fn with_credentials(config: &AppConfig, credentials: CredentialStore) -> Self {
        if let Some(key) = &config.api_key {
            credentials.set_override(key.clone());
        }
        let genai = GenAiConfig {
            text_model: config.text_model.clone(),
            image_model: config.image_model.clone(),
            ..GenAiConfig::default()
        };
        Self {
            text: TextClient::new(genai.clone(), credentials.clone()),
            image: ImageClient::new(genai, credentials.clone()),
            credentials,
        }
    }

    /// Whether a credential is currently resolvable.
    pub fn has_credential(&self) -> bool {
        self.credentials.has_credential()
    }

    /// Set the session API key override.
    pub fn set_api_key(&self, key: impl Into<String>) {
        self.credentials.set_override(key);
    }

    /// Clear the session API key override.
    pub fn clear_api_key(&self) {
        self.credentials.clear_override();
    }

    /// Rewrite `source_text` into a post styled for `platform`.
    ///
    /// The returned post should be rendered immediately; call
    /// [`illustrate`](Self::illustrate) afterwards to attach the image.
    pub async fn compose(&self, source_text: &str, platform: Platform) -> AppResult<Post> {
        let request =
            RewriteRequest::new(source_text, platform).map_err(AppError::validation)?;
        if !self.credentials.has_credential() {
            return Err(GenAiError::MissingApiKey.into());
        }

        let post = self
            .text
            .transform(request.source_text.trim(), request.platform)
            .await?;
        info!(%platform, hashtags = post.hashtags.len(), "rewrite complete");
        Ok(post)
    }

    /// Attach an illustration to a composed post, in place.
    ///
    /// Returns `None` when there is nothing to do or the image was attached;
    /// returns a warning notice when synthesis failed. The post itself is
    /// never touched on failure, so the caller can keep showing the text and
    /// offer the stored `image_prompt` as a manual suggestion plus a retry.
    pub async fn illustrate(&self, post: &mut Post) -> Option<Notice> {
        let prompt = post.image_prompt.clone()?;

        match self.image.synthesize(&prompt).await {
            Ok(reference) => {
                post.image_url = Some(reference.into_inner());
                None
            }
            Err(err) => {
                warn!(kind = ?err.kind, "image synthesis failed: {}", err.message);
                Some(Notice::warning(err.to_string()))
            }
        }
    }

    /// Fetch a topic seed; never fails, falls back to a fixed sentence.
    pub async fn fetch_topic(&self, category: TopicCategory) -> String {
        self.text.generate_topic(category).await
    }

    /// Whether a failure message points at a credential problem. Callers
    /// should reopen the credential-configuration surface when this matches,
    /// regardless of which client produced the message.
    pub fn is_credential_error(message: &str) -> bool {
        message.contains("API key")
    }

    /// Map a compose failure to the notice shown to the user.
    pub fn notice_for(error: &AppError) -> Notice {
        match error {
            AppError::Generation(GenAiError::MissingApiKey) => {
                Notice::error(GenAiError::MissingApiKey.to_string())
            }
            AppError::Generation(GenAiError::Provider(message)) => {
                Notice::error(format!("{} Please try again.", message))
            }
            AppError::Generation(GenAiError::MalformedResponse(_)) => {
                Notice::error(TRANSFORM_FAILED)
            }
            other => Notice::error(other.to_string()),
        }
    }
}
