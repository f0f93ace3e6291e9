use serde::{Deserialize, Serialize};

/// A single recipe generation request: free-text ingredients and a cuisine
/// preference. Neither field is validated; empty strings are accepted and
/// interpolated into the prompt as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeRequest {
    ingredients: String,
    cuisine: String,
}

impl RecipeRequest {
    pub fn new(ingredients: impl Into<String>, cuisine: impl Into<String>) -> Self {
        Self {
            ingredients: ingredients.into(),
            cuisine: cuisine.into(),
        }
    }

    pub fn ingredients(&self) -> &str {
        &self.ingredients
    }

    pub fn cuisine(&self) -> &str {
        &self.cuisine
    }

    /// Build the user-role prompt sent to the model.
    ///
    /// The wording (including the "nesseccary" misspelling) is frozen: the
    /// prompt text is part of the observable contract and tests pin it
    /// verbatim.
    pub fn prompt(&self) -> String {
        format!(
            "Your task is to generate a recipe of some meal from the next products: {}. \
             Also it's fully nesseccary to offer only {} food. WRITE ONLY IN ENGLISH",
            self.ingredients, self.cuisine
        )
    }
}
