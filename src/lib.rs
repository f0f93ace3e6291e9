pub mod application;
pub mod connector;
pub mod domain;
pub mod tui;

pub use application::{CompletionClient, GenerateRecipeUseCase};

pub use connector::{GroqClient, MockCompletionClient, DEFAULT_BASE_URL, DEFAULT_MODEL};

pub use domain::{DomainError, Recipe, RecipeRequest};
