mod recipe;
mod recipe_request;

pub use recipe::*;
pub use recipe_request::*;
