//! Credential Resolution
//!
//! Resolves the provider API key on every call: a session override set by the
//! user takes precedence over environment fallbacks. Nothing is cached across
//! calls, so an override edited between requests takes effect immediately.

use std::sync::{Arc, RwLock};

use tracing::debug;

/// Environment variables consulted when no session override is set, in order.
const ENV_FALLBACKS: &[&str] = &["GEMINI_API_KEY", "GOOGLE_API_KEY", "API_KEY"];

/// Lazily resolved credential source shared by both clients.
///
/// Cloning is cheap; clones share the same session override.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    session_override: Arc<RwLock<Option<String>>>,
    env_vars: Vec<String>,
}

impl CredentialStore {
    /// Create a store with the standard environment fallbacks.
    pub fn new() -> Self {
        Self::with_env_vars(ENV_FALLBACKS.iter().map(|v| v.to_string()))
    }

    /// Create a store consulting the given environment variables after the
    /// session override. An empty list disables the environment fallback.
    pub fn with_env_vars(env_vars: impl IntoIterator<Item = String>) -> Self {
        Self {
            session_override: Arc::new(RwLock::new(None)),
            env_vars: env_vars.into_iter().collect(),
        }
    }

    /// Resolve the credential: session override first, then the environment.
    /// Blank values count as absent. Never fails.
    pub fn resolve(&self) -> Option<String> {
        let guard = self
            .session_override
            .read()
            .expect("credential lock poisoned");
        if let Some(key) = guard.as_ref() {
            if !key.trim().is_empty() {
                return Some(key.clone());
            }
        }
        drop(guard);

        for var in &self.env_vars {
            if let Ok(value) = std::env::var(var) {
                if !value.trim().is_empty() {
                    debug!(source = var.as_str(), "credential resolved from environment");
                    return Some(value);
                }
            }
        }
        None
    }

    /// Whether a credential is currently resolvable.
    pub fn has_credential(&self) -> bool {
        self.resolve().is_some()
    }

    /// Set the session override, replacing any previous value.
    pub fn set_override(&self, key: impl Into<String>) {
        let mut guard = self
            .session_override
            .write()
            .expect("credential lock poisoned");
        *guard = Some(key.into());
    }

    /// Clear the session override; the environment fallback applies again.
    pub fn clear_override(&self) {
        let mut guard = self
            .session_override
            .write()
            .expect("credential lock poisoned");
        *guard = None;
    }
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new()
    }
}
