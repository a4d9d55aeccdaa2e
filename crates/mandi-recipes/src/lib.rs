pub mod client;
pub mod error;
mod retry;
pub mod types;

pub use client::{RecipeClient, RetryPolicy};
pub use error::RecipesError;
pub use types::GeneratedRecipe;
