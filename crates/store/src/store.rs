//! The [`RecipeStore`] trait and store error type.

use async_trait::async_trait;
use thiserror::Error;

use crate::recipe::{NewRecipe, Recipe};

/// Store operation error.
///
/// These are infrastructure failures (connectivity, SQL, locking). Request
/// validation errors belong to the HTTP layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store lock poisoned")]
    LockPoisoned,
}

/// Storage operations over the recipe collection.
///
/// Every fetch returns recipes already enriched with their tags and
/// ingredient/amount pairs. Any store error aborts the whole batch; no
/// partial results are returned.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Insert the recipe row plus one child row per ingredient/amount pair
    /// and per tag, all-or-nothing. Returns the store-assigned id.
    async fn insert(&self, recipe: &NewRecipe) -> Result<i64, StoreError>;

    /// Every recipe, in id order.
    async fn fetch_all(&self) -> Result<Vec<Recipe>, StoreError>;

    /// The recipe with exactly this id; empty when it does not exist.
    async fn fetch_by_id(&self, id: i64) -> Result<Vec<Recipe>, StoreError>;

    /// Recipes whose title contains `fragment` (case-sensitive).
    async fn fetch_by_title(&self, fragment: &str) -> Result<Vec<Recipe>, StoreError>;

    /// Recipes carrying at least one of the given tags, deduplicated in
    /// first-seen order.
    async fn fetch_by_tags(&self, tags: &[String]) -> Result<Vec<Recipe>, StoreError>;

    /// Increment the like counter by one.
    async fn add_like(&self, id: i64) -> Result<(), StoreError>;

    /// Decrement the like counter by one. No floor: the counter may go
    /// negative.
    async fn remove_like(&self, id: i64) -> Result<(), StoreError>;

    /// Remove the recipe and all of its tag and ingredient rows,
    /// all-or-nothing.
    async fn delete(&self, id: i64) -> Result<(), StoreError>;
}
