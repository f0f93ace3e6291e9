use serde::{Deserialize, Serialize};

/// A generated recipe as returned by the model: Markdown-formatted text.
///
/// An empty recipe is a valid value, not an error. The completion endpoint
/// may legitimately return no choices or a choice without content, and
/// callers cannot distinguish that from a model that chose to say nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    markdown: String,
}

impl Recipe {
    pub fn new(markdown: impl Into<String>) -> Self {
        Self {
            markdown: markdown.into(),
        }
    }

    pub fn markdown(&self) -> &str {
        &self.markdown
    }

    pub fn is_empty(&self) -> bool {
        self.markdown.is_empty()
    }
}
