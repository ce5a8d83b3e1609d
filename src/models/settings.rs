//! Settings Models
//!
//! Application configuration and settings data structures.

use serde::{Deserialize, Serialize};

use redraft_core::Platform;

/// Application configuration stored in config.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// UI theme: "light", "dark", or "system"
    pub theme: String,
    /// UI language code (e.g., "en", "zh-TW")
    pub language: String,
    /// Platform preselected in the style picker
    pub default_platform: String,
    /// Model used for rewriting and topic generation
    pub text_model: String,
    /// Image-capable model used for illustration synthesis
    pub image_model: String,
    /// Persisted API key override; the environment is consulted when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: "system".to_string(),
            language: "en".to_string(),
            default_platform: "xiaohongshu".to_string(),
            text_model: "gemini-3-flash-preview".to_string(),
            image_model: "gemini-2.5-flash-image".to_string(),
            api_key: None,
        }
    }
}

/// Settings update request (partial update)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SettingsUpdate {
    pub theme: Option<String>,
    pub language: Option<String>,
    pub default_platform: Option<String>,
    pub text_model: Option<String>,
    pub image_model: Option<String>,
    /// A blank value clears the stored key
    pub api_key: Option<String>,
}

impl AppConfig {
    /// Apply a partial update to the configuration
    pub fn apply_update(&mut self, update: SettingsUpdate) {
        if let Some(theme) = update.theme {
            self.theme = theme;
        }
        if let Some(language) = update.language {
            self.language = language;
        }
        if let Some(platform) = update.default_platform {
            self.default_platform = platform;
        }
        if let Some(model) = update.text_model {
            self.text_model = model;
        }
        if let Some(model) = update.image_model {
            self.image_model = model;
        }
        if let Some(key) = update.api_key {
            self.api_key = if key.trim().is_empty() {
                None
            } else {
                Some(key)
            };
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !["light", "dark", "system"].contains(&self.theme.as_str()) {
            return Err(format!(
                "Invalid theme: {}. Must be 'light', 'dark', or 'system'",
                self.theme
            ));
        }

        if self.language.len() < 2 || self.language.len() > 5 {
            return Err(format!("Invalid language code: {}", self.language));
        }

        self.default_platform
            .parse::<Platform>()
            .map_err(|e| format!("Invalid default platform: {}", e))?;

        if self.text_model.trim().is_empty() {
            return Err("text_model must not be empty".to_string());
        }
        if self.image_model.trim().is_empty() {
            return Err("image_model must not be empty".to_string());
        }

        Ok(())
    }

    /// The preselected platform as a typed value.
    pub fn platform(&self) -> Platform {
        self.default_platform
            .parse()
            .unwrap_or(Platform::Xiaohongshu)
    }
}
