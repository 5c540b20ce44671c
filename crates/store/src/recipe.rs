//! Recipe shapes shared by the store and the HTTP layer.

use serde::{Deserialize, Serialize};

/// A fully assembled recipe: the base row plus its tags and its
/// ingredient/amount pairs.
///
/// `ingredients` and `amount` are positionally parallel: `ingredients[i]`
/// and `amount[i]` describe the same line item. Enrichment preserves the
/// order child rows were inserted in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    pub tags: Vec<String>,
    pub ingredients: Vec<String>,
    pub amount: Vec<String>,
    pub instructions: String,
    pub likes: i64,
    #[serde(rename = "creatorName")]
    pub creator_name: String,
}

/// A recipe to be inserted; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub title: String,
    pub instructions: String,
    pub likes: i64,
    pub creator_name: String,
    pub tags: Vec<String>,
    pub ingredients: Vec<String>,
    pub amounts: Vec<String>,
}

impl NewRecipe {
    /// Ingredient/amount pairs to persist.
    ///
    /// Pairs positionally; if the two sequences differ in length the tail
    /// of the longer one is dropped.
    pub fn line_items(&self) -> impl Iterator<Item = (&str, &str)> {
        self.ingredients
            .iter()
            .zip(self.amounts.iter())
            .map(|(i, a)| (i.as_str(), a.as_str()))
    }
}
