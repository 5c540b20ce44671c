//! In-memory recipe store.
//!
//! Mirrors the three Postgres tables with plain row vectors behind an
//! `RwLock`. Intended for tests/dev; not optimized for performance. The
//! observable semantics (insertion order, case-sensitive title match,
//! first-seen dedup on tag search, unclamped likes, cascade delete) match
//! [`PgRecipeStore`](crate::PgRecipeStore).

use std::sync::RwLock;

use crate::recipe::{NewRecipe, Recipe};
use crate::store::{RecipeStore, StoreError};

#[derive(Debug, Clone)]
struct RecipeRow {
    id: i64,
    title: String,
    instructions: String,
    likes: i64,
    creator_name: String,
}

#[derive(Debug, Clone)]
struct IngredientRow {
    recipe_id: i64,
    ingredient: String,
    amount: String,
}

#[derive(Debug, Clone)]
struct TagRow {
    recipe_id: i64,
    tag: String,
}

#[derive(Debug, Default)]
struct Tables {
    next_recipe_id: i64,
    recipes: Vec<RecipeRow>,
    ingredients: Vec<IngredientRow>,
    tags: Vec<TagRow>,
}

/// In-memory [`RecipeStore`].
#[derive(Debug, Default)]
pub struct InMemoryRecipeStore {
    tables: RwLock<Tables>,
}

impl InMemoryRecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn assemble(tables: &Tables, row: &RecipeRow) -> Recipe {
        let tags = tables
            .tags
            .iter()
            .filter(|t| t.recipe_id == row.id)
            .map(|t| t.tag.clone())
            .collect();

        let mut ingredients = Vec::new();
        let mut amount = Vec::new();
        for item in tables.ingredients.iter().filter(|i| i.recipe_id == row.id) {
            ingredients.push(item.ingredient.clone());
            amount.push(item.amount.clone());
        }

        Recipe {
            id: row.id,
            title: row.title.clone(),
            tags,
            ingredients,
            amount,
            instructions: row.instructions.clone(),
            likes: row.likes,
            creator_name: row.creator_name.clone(),
        }
    }
}

#[async_trait::async_trait]
impl RecipeStore for InMemoryRecipeStore {
    async fn insert(&self, recipe: &NewRecipe) -> Result<i64, StoreError> {
        let mut tables = self.tables.write().map_err(|_| StoreError::LockPoisoned)?;

        tables.next_recipe_id += 1;
        let id = tables.next_recipe_id;

        tables.recipes.push(RecipeRow {
            id,
            title: recipe.title.clone(),
            instructions: recipe.instructions.clone(),
            likes: recipe.likes,
            creator_name: recipe.creator_name.clone(),
        });

        for (ingredient, amount) in recipe.line_items() {
            tables.ingredients.push(IngredientRow {
                recipe_id: id,
                ingredient: ingredient.to_string(),
                amount: amount.to_string(),
            });
        }

        for tag in &recipe.tags {
            tables.tags.push(TagRow {
                recipe_id: id,
                tag: tag.clone(),
            });
        }

        Ok(id)
    }

    async fn fetch_all(&self) -> Result<Vec<Recipe>, StoreError> {
        let tables = self.tables.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(tables
            .recipes
            .iter()
            .map(|row| Self::assemble(&tables, row))
            .collect())
    }

    async fn fetch_by_id(&self, id: i64) -> Result<Vec<Recipe>, StoreError> {
        let tables = self.tables.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(tables
            .recipes
            .iter()
            .filter(|row| row.id == id)
            .map(|row| Self::assemble(&tables, row))
            .collect())
    }

    async fn fetch_by_title(&self, fragment: &str) -> Result<Vec<Recipe>, StoreError> {
        let tables = self.tables.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(tables
            .recipes
            .iter()
            .filter(|row| row.title.contains(fragment))
            .map(|row| Self::assemble(&tables, row))
            .collect())
    }

    async fn fetch_by_tags(&self, tags: &[String]) -> Result<Vec<Recipe>, StoreError> {
        let tables = self.tables.read().map_err(|_| StoreError::LockPoisoned)?;

        // Distinct recipe ids, first-seen order.
        let mut ids: Vec<i64> = Vec::new();
        for row in tables.tags.iter().filter(|t| tags.contains(&t.tag)) {
            if !ids.contains(&row.recipe_id) {
                ids.push(row.recipe_id);
            }
        }

        Ok(ids
            .into_iter()
            .filter_map(|id| tables.recipes.iter().find(|row| row.id == id))
            .map(|row| Self::assemble(&tables, row))
            .collect())
    }

    async fn add_like(&self, id: i64) -> Result<(), StoreError> {
        let mut tables = self.tables.write().map_err(|_| StoreError::LockPoisoned)?;
        if let Some(row) = tables.recipes.iter_mut().find(|row| row.id == id) {
            row.likes += 1;
        }
        Ok(())
    }

    async fn remove_like(&self, id: i64) -> Result<(), StoreError> {
        let mut tables = self.tables.write().map_err(|_| StoreError::LockPoisoned)?;
        if let Some(row) = tables.recipes.iter_mut().find(|row| row.id == id) {
            row.likes -= 1;
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut tables = self.tables.write().map_err(|_| StoreError::LockPoisoned)?;
        tables.tags.retain(|row| row.recipe_id != id);
        tables.ingredients.retain(|row| row.recipe_id != id);
        tables.recipes.retain(|row| row.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, tags: &[&str], items: &[(&str, &str)]) -> NewRecipe {
        NewRecipe {
            title: title.to_string(),
            instructions: "mix and bake".to_string(),
            likes: 0,
            creator_name: "alice".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ingredients: items.iter().map(|(i, _)| i.to_string()).collect(),
            amounts: items.iter().map(|(_, a)| a.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn insert_then_fetch_by_id_round_trips() {
        let store = InMemoryRecipeStore::new();
        let id = store
            .insert(&draft(
                "Banana Bread",
                &["dessert", "baking"],
                &[("banana", "3"), ("flour", "300g")],
            ))
            .await
            .unwrap();

        let found = store.fetch_by_id(id).await.unwrap();
        assert_eq!(found.len(), 1);
        let recipe = &found[0];
        assert_eq!(recipe.title, "Banana Bread");
        assert_eq!(recipe.creator_name, "alice");
        assert_eq!(recipe.tags, vec!["dessert", "baking"]);
        assert_eq!(recipe.ingredients, vec!["banana", "flour"]);
        assert_eq!(recipe.amount, vec!["3", "300g"]);
    }

    #[tokio::test]
    async fn fetch_by_missing_id_is_empty() {
        let store = InMemoryRecipeStore::new();
        assert!(store.fetch_by_id(42).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn length_mismatch_drops_the_unpaired_tail() {
        let store = InMemoryRecipeStore::new();
        let mut recipe = draft("Soup", &[], &[("water", "1l")]);
        recipe.ingredients.push("salt".to_string());

        let id = store.insert(&recipe).await.unwrap();
        let found = store.fetch_by_id(id).await.unwrap();
        assert_eq!(found[0].ingredients, vec!["water"]);
        assert_eq!(found[0].amount, vec!["1l"]);
    }

    #[tokio::test]
    async fn title_search_is_case_sensitive_substring() {
        let store = InMemoryRecipeStore::new();
        store.insert(&draft("Banana Bread", &[], &[])).await.unwrap();
        store
            .insert(&draft("banana smoothie", &[], &[]))
            .await
            .unwrap();

        let found = store.fetch_by_title("banana").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "banana smoothie");
    }

    #[tokio::test]
    async fn tag_search_deduplicates_multi_tag_matches() {
        let store = InMemoryRecipeStore::new();
        let id = store
            .insert(&draft("Brownies", &["dessert", "chocolate"], &[]))
            .await
            .unwrap();
        store.insert(&draft("Salad", &["lunch"], &[])).await.unwrap();

        let query = vec!["dessert".to_string(), "chocolate".to_string()];
        let found = store.fetch_by_tags(&query).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, id);
    }

    #[tokio::test]
    async fn likes_go_negative_without_a_floor() {
        let store = InMemoryRecipeStore::new();
        let id = store.insert(&draft("Toast", &[], &[])).await.unwrap();

        store.add_like(id).await.unwrap();
        store.add_like(id).await.unwrap();
        assert_eq!(store.fetch_by_id(id).await.unwrap()[0].likes, 2);

        for _ in 0..3 {
            store.remove_like(id).await.unwrap();
        }
        assert_eq!(store.fetch_by_id(id).await.unwrap()[0].likes, -1);
    }

    #[tokio::test]
    async fn delete_removes_recipe_and_child_rows() {
        let store = InMemoryRecipeStore::new();
        let id = store
            .insert(&draft("Cake", &["dessert"], &[("sugar", "200g")]))
            .await
            .unwrap();

        store.delete(id).await.unwrap();

        assert!(store.fetch_all().await.unwrap().is_empty());
        let by_tag = store.fetch_by_tags(&["dessert".to_string()]).await.unwrap();
        assert!(by_tag.is_empty());
    }
}
