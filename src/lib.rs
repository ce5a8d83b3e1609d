//! Redraft - Rust Backend Library
//!
//! Caller-side orchestration for the Redraft content-transformation flow:
//! - The composer service driving rewrite, topic seeding, and illustration
//! - Settings model and JSON config persistence
//! - Error-to-notice mapping for the presentation layer
//!
//! The presentation layer itself (forms, clipboard, rendering) lives outside
//! this workspace and calls into [`ComposerService`].

pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

pub use models::settings::{AppConfig, SettingsUpdate};
pub use services::composer::ComposerService;
pub use storage::config::ConfigService;
pub use utils::error::{AppError, AppResult};

// Domain and client types, re-exported for presentation-layer callers
pub use redraft_core::{Notice, Platform, Post, RewriteRequest, Severity, TopicCategory};
pub use redraft_genai::{
    CredentialStore, GenAiConfig, GenAiError, ImageError, ImageErrorKind, ImageReference,
};
