//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Groq chat-completion client (OpenAI-compatible HTTP API)
//! - Mock completion client for tests and offline runs

pub mod adapter;

pub use adapter::*;
