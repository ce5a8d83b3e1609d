//! Domain Types
//!
//! Target platforms, topic categories, and the generated post entity.

use serde::{Deserialize, Serialize};

/// Supported target platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Xiaohongshu,
    Instagram,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Xiaohongshu => write!(f, "Xiaohongshu"),
            Platform::Instagram => write!(f, "Instagram"),
        }
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xiaohongshu" | "red" | "rednote" => Ok(Platform::Xiaohongshu),
            "instagram" | "ig" => Ok(Platform::Instagram),
            other => Err(format!("Unknown platform: {}", other)),
        }
    }
}

/// Seed categories for topic generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopicCategory {
    Lifestyle,
    Tech,
    Relationships,
    Career,
    Humor,
}

impl TopicCategory {
    /// All categories, in display order.
    pub fn all() -> [TopicCategory; 5] {
        [
            TopicCategory::Lifestyle,
            TopicCategory::Tech,
            TopicCategory::Relationships,
            TopicCategory::Career,
            TopicCategory::Humor,
        ]
    }

    /// Human-readable label shown in the UI and embedded in prompts.
    pub fn label(&self) -> &'static str {
        match self {
            TopicCategory::Lifestyle => "Lifestyle",
            TopicCategory::Tech => "Tech & AI",
            TopicCategory::Relationships => "Relationships",
            TopicCategory::Career => "Career & Growth",
            TopicCategory::Humor => "Humor & Memes",
        }
    }
}

impl std::fmt::Display for TopicCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A single rewrite request: source text plus the target platform.
///
/// Constructed per call and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewriteRequest {
    pub source_text: String,
    pub platform: Platform,
}

impl RewriteRequest {
    /// Create a request, rejecting blank source text.
    pub fn new(source_text: impl Into<String>, platform: Platform) -> Result<Self, String> {
        let source_text = source_text.into();
        if source_text.trim().is_empty() {
            return Err("Source text is empty".to_string());
        }
        Ok(Self {
            source_text,
            platform,
        })
    }
}

/// A generated post.
///
/// `content` and `hashtags` are always present after a successful rewrite.
/// `image_url` stays empty until image synthesis succeeds; its absence is
/// never an error for the post as a whole.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Title (crucial for Xiaohongshu; Instagram posts lead with a hook line instead)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Main body including emojis and formatting
    pub content: String,
    /// Hashtags without a leading `#`
    #[serde(default)]
    pub hashtags: Vec<String>,
    /// Prompt for generating a matching illustration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_prompt: Option<String>,
    /// Displayable image reference: a data URL or a remote URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Post {
    /// Whether an illustration has been attached.
    pub fn has_image(&self) -> bool {
        self.image_url.is_some()
    }

    /// Share-ready plain-text rendering used by the copy affordance:
    /// title, body, then `#`-prefixed hashtags on their own line.
    pub fn clipboard_text(&self) -> String {
        let mut text = String::new();
        if let Some(title) = &self.title {
            text.push_str(title);
            text.push_str("\n\n");
        }
        text.push_str(&self.content);
        if !self.hashtags.is_empty() {
            text.push_str("\n\n");
            let tags: Vec<String> = self.hashtags.iter().map(|t| format!("#{}", t)).collect();
            text.push_str(&tags.join(" "));
        }
        text
    }
}
