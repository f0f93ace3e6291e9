//! Integration tests for the recipe generation flow.
//!
//! These drive the use case end to end against the mock completion client,
//! pinning the prompt contract and the result passthrough semantics.

use std::sync::Arc;

use recipegen::{GenerateRecipeUseCase, MockCompletionClient, RecipeRequest};

#[tokio::test]
async fn recipe_text_is_passed_through_unmodified() {
    let client = Arc::new(MockCompletionClient::with_reply("X"));
    let use_case = GenerateRecipeUseCase::new(client);

    let recipe = use_case
        .execute(&RecipeRequest::new("chicken, rice", "Thai"))
        .await
        .expect("generation succeeds");

    // The display text is the model's text exactly, not a quoted literal.
    assert_eq!(recipe.markdown(), "X");
    assert_ne!(recipe.markdown(), "\"X\"");
}

#[tokio::test]
async fn empty_reply_yields_an_empty_recipe() {
    let client = Arc::new(MockCompletionClient::with_reply(""));
    let use_case = GenerateRecipeUseCase::new(client);

    let recipe = use_case
        .execute(&RecipeRequest::new("chicken, rice", "Thai"))
        .await
        .expect("an empty reply is not an error");

    assert!(recipe.is_empty());
}

#[tokio::test]
async fn client_failure_propagates() {
    let client = Arc::new(MockCompletionClient::failing("service unavailable"));
    let use_case = GenerateRecipeUseCase::new(client);

    let err = use_case
        .execute(&RecipeRequest::new("chicken, rice", "Thai"))
        .await
        .expect_err("failure must surface");

    assert!(err.is_completion_error());
    assert!(err.to_string().contains("service unavailable"));
}

#[tokio::test]
async fn prompt_sent_to_the_client_follows_the_template() {
    let client = Arc::new(MockCompletionClient::new());
    let use_case = GenerateRecipeUseCase::new(client.clone());

    use_case
        .execute(&RecipeRequest::new("chicken, rice", "Thai"))
        .await
        .expect("generation succeeds");

    let prompt = client.last_prompt().expect("client saw a prompt");
    assert_eq!(
        prompt,
        "Your task is to generate a recipe of some meal from the next products: \
         chicken, rice. Also it's fully nesseccary to offer only Thai food. \
         WRITE ONLY IN ENGLISH"
    );
}

#[tokio::test]
async fn each_execution_issues_exactly_one_completion_call() {
    let client = Arc::new(MockCompletionClient::new());
    let use_case = GenerateRecipeUseCase::new(client.clone());

    for _ in 0..3 {
        use_case
            .execute(&RecipeRequest::new("eggs", "French"))
            .await
            .expect("generation succeeds");
    }

    assert_eq!(client.call_count(), 3);
}
