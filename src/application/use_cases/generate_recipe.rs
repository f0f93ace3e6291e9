use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use crate::application::CompletionClient;
use crate::domain::{DomainError, Recipe, RecipeRequest};

/// Generate a recipe from a [`RecipeRequest`] by sending the built prompt to
/// the injected [`CompletionClient`].
///
/// One invocation performs exactly one completion round trip. There are no
/// retries and no caching of identical requests; every call is independent.
pub struct GenerateRecipeUseCase {
    client: Arc<dyn CompletionClient>,
}

impl GenerateRecipeUseCase {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    pub async fn execute(&self, request: &RecipeRequest) -> Result<Recipe, DomainError> {
        info!(
            "Generating recipe (ingredients: {:?}, cuisine: {:?})",
            request.ingredients(),
            request.cuisine()
        );

        let start_time = Instant::now();
        let prompt = request.prompt();
        let text = self.client.complete(&prompt).await?;

        if text.is_empty() {
            warn!("Completion returned no text; passing through an empty recipe");
        }

        info!(
            "Recipe generated ({} chars in {:.2?})",
            text.len(),
            start_time.elapsed()
        );

        Ok(Recipe::new(text))
    }
}
