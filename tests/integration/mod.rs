//! Integration Tests Module
//!
//! End-to-end coverage of the composition flow: credential gating, payload
//! parsing, and the image request-shape fallback chain.

// Rewrite flow and credential gating tests
mod compose_test;

// Image variant chain and extraction tests
mod image_chain_test;
