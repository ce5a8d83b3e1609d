//! Storage Layer
//!
//! JSON config persistence. This is the only persisted state: generated
//! content is never cached between sessions.

pub mod config;

pub use config::*;
