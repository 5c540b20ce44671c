//! Request body shape and mapping into store types.

use serde::Deserialize;

use cookbook_store::NewRecipe;

/// Recipe-shaped request body.
///
/// Every endpoint that takes a body takes this shape; which fields matter
/// depends on the endpoint. All fields default when absent, which is what
/// the query-by-example dispatch on `/getRecipe` keys off: an absent id
/// decodes to 0, an absent title to `""`, absent tags to `None`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RecipeBody {
    pub id: i64,
    pub title: String,
    pub tags: Option<Vec<String>>,
    pub ingredients: Vec<String>,
    pub amount: Vec<String>,
    pub instructions: String,
    pub likes: i64,
    #[serde(rename = "creatorName")]
    pub creator_name: String,
}

impl RecipeBody {
    /// Reshape into the store's insert type.
    pub fn into_new_recipe(self) -> NewRecipe {
        NewRecipe {
            title: self.title,
            instructions: self.instructions,
            likes: self.likes,
            creator_name: self.creator_name,
            tags: self.tags.unwrap_or_default(),
            ingredients: self.ingredients,
            amounts: self.amount,
        }
    }
}
