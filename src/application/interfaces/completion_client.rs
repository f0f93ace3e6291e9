use async_trait::async_trait;

use crate::domain::DomainError;

/// An interface for sending a single prompt to an LLM and receiving the
/// assistant's text response.
///
/// Implementors encapsulate transport, serialization, and vendor-specific
/// API details. Consumers (e.g. [`crate::application::GenerateRecipeUseCase`])
/// remain decoupled from any particular provider or HTTP client library,
/// which also makes them trivially testable against a fake implementation.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send a user-role `prompt` as a one-message conversation and return
    /// the assistant's response text.
    ///
    /// Returns an empty string when the provider responds successfully but
    /// produces no text. Transport and provider failures are errors.
    async fn complete(&self, prompt: &str) -> Result<String, DomainError>;
}
