//! Services
//!
//! Business logic services called by the presentation layer.

pub mod composer;

pub use composer::ComposerService;
