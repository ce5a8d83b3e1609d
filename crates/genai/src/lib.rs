//! Redraft GenAI
//!
//! Client for the Gemini generateContent API:
//! - Rewriting source text into a platform-styled post (structured output)
//! - Topic seeding (free text, never fails hard)
//! - Image synthesis with request-shape fallback and error classification
//! - Per-call credential resolution (session override, then environment)
//!
//! Both clients resolve the credential lazily on every call; nothing is
//! cached across calls and no retries happen below the caller.

pub mod credentials;
pub mod extract;
pub mod image;
pub mod prompts;
pub mod text;
pub mod types;

// Re-export main types
pub use credentials::CredentialStore;
pub use extract::extract_image;
pub use image::{request_variants, ImageClient, RequestVariant, VariantChain};
pub use text::{parse_post, response_text, TextClient, TOPIC_EMPTY_REPLY, TOPIC_UNAVAILABLE};
pub use types::{
    GenAiConfig, GenAiError, GenAiResult, ImageError, ImageErrorKind, ImageReference,
};
