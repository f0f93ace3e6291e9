mod generate_recipe;

pub use generate_recipe::*;
