use serde::{Deserialize, Serialize};

/// What the text-generation collaborator returns for a free-text recipe
/// query: a title, a short description, and the ingredient names to shop
/// for. Prompting and model choice live entirely on the service side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedRecipe {
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
}

/// JSON envelope around every generation response.
#[derive(Debug, Deserialize)]
pub(crate) struct GenerateResponse {
    pub status: String,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub recipe: Option<GeneratedRecipe>,
}
