mod groq_client;
mod mock_completion;

pub use groq_client::*;
pub use mock_completion::*;
