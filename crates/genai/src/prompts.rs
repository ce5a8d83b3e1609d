//! Persona Prompt Library
//!
//! Fixed per-platform instruction blocks plus the pure builders for the
//! rewrite and topic-seed prompts. These are opaque configuration strings;
//! the only runtime logic is selection.

use serde_json::{json, Value};

use redraft_core::{Platform, TopicCategory};

/// Persona instruction for Xiaohongshu (Little Red Book) posts.
pub const XIAOHONGSHU_INSTRUCTION: &str = r#"You are a top-tier influencer on Xiaohongshu (Little Red Book).
Your writing style is emotional, engaging, and uses the "Internet wormhole" style.
- You MUST use emojis liberally (e.g., ✨, 💡, 🍓, 😭, 📝).
- Structure: Catchy Headline -> Emotional Hook -> Core Value/Story -> Call to Action -> Tags.
- Tone: "Sisters!", "Family!", explicit sharing of personal experience, helpful tips.
- Use spacing to make it readable on mobile.
- Language: Traditional Chinese (Taiwan/HK style) mixed with trending slang."#;

/// Persona instruction for Instagram posts.
pub const INSTAGRAM_INSTRUCTION: &str = r#"You are a professional Social Media Manager for Instagram.
Your writing style is aesthetic, clean, and value-driven.
- Structure: Hook (first line) -> Line break -> Body (bullet points or short paragraphs) -> CTA (Save this post) -> Tags block.
- Tone: Inspiring, chill, or informative.
- Formatting: Use line breaks effectively. Use bullet points (• or -).
- Language: Traditional Chinese."#;

/// Select the persona instruction for a target platform.
pub fn instruction_for(platform: Platform) -> &'static str {
    match platform {
        Platform::Xiaohongshu => XIAOHONGSHU_INSTRUCTION,
        Platform::Instagram => INSTAGRAM_INSTRUCTION,
    }
}

/// Build the single-shot prompt asking for a trending-topic seed.
/// The reply is expected as raw text, no wrapping.
pub fn topic_prompt(category: TopicCategory) -> String {
    format!(
        "Generate a realistic, viral-worthy discussion topic or \"hot take\" that might appear on Threads right now regarding \"{}\".\n\
         It should be in Traditional Chinese (Taiwan colloquial style).\n\
         It should be raw, conversational, and slightly controversial or very relatable.\n\
         Just return the text of the post, nothing else.",
        category.label()
    )
}

/// Build the rewrite prompt embedding the verbatim source text and the four
/// requirements the structured reply must satisfy.
pub fn rewrite_prompt(source_text: &str, platform: Platform) -> String {
    format!(
        "Rewrite the following source text for {platform}.\n\n\
         Source Text:\n\
         \"\"\"\n\
         {source_text}\n\
         \"\"\"\n\n\
         Requirements:\n\
         1. Extract the core meaning but completely rewrite the format.\n\
         2. If it's Xiaohongshu, create a clickbait title. If Instagram, create a strong hook line.\n\
         3. Generate 10-15 relevant hashtags.\n\
         4. Also suggest a short English prompt for an AI image generator that would fit this post vibe."
    )
}

/// Structured-output constraint for the rewrite call: an object with required
/// `content` and `hashtags`, optional `title` and `imagePrompt`.
pub fn post_response_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "title": {
                "type": "string",
                "description": "Title for the post (crucial for Xiaohongshu)"
            },
            "content": {
                "type": "string",
                "description": "The main body of the post including emojis and formatting"
            },
            "hashtags": {
                "type": "array",
                "items": { "type": "string" },
                "description": "List of hashtags without #"
            },
            "imagePrompt": {
                "type": "string",
                "description": "A prompt to generate an image for this post"
            }
        },
        "required": ["content", "hashtags"]
    })
}
