//! Postgres-backed recipe store.
//!
//! Queries go through a shared sqlx connection pool. Placeholders are used
//! for every caller-supplied value, including the tag-membership lookup,
//! which binds the whole tag list as a single array parameter. Multi-row
//! writes (insert with children, cascade delete) run inside a transaction
//! so a mid-sequence failure leaves no partial state behind.

use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use tracing::instrument;

use crate::recipe::{NewRecipe, Recipe};
use crate::store::{RecipeStore, StoreError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS recipes (
    id           BIGSERIAL PRIMARY KEY,
    title        TEXT   NOT NULL,
    instructions TEXT   NOT NULL,
    likes        BIGINT NOT NULL DEFAULT 0,
    creator_name TEXT   NOT NULL
);
CREATE TABLE IF NOT EXISTS ingredients (
    id         BIGSERIAL PRIMARY KEY,
    recipe_id  BIGINT NOT NULL REFERENCES recipes (id),
    ingredient TEXT   NOT NULL,
    amount     TEXT   NOT NULL
);
CREATE TABLE IF NOT EXISTS tags (
    id        BIGSERIAL PRIMARY KEY,
    recipe_id BIGINT NOT NULL REFERENCES recipes (id),
    tag       TEXT   NOT NULL
);
"#;

/// Postgres-backed [`RecipeStore`].
///
/// Cloning is cheap; the pool is internally reference-counted and
/// thread-safe.
#[derive(Debug, Clone)]
pub struct PgRecipeStore {
    pool: PgPool,
}

impl PgRecipeStore {
    /// Wrap an already-connected pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against the given connection URL.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new().max_connections(5).connect(url).await?;
        Ok(Self { pool })
    }

    /// Create the three cookbook tables if they do not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        for statement in SCHEMA.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Close the pool, waiting for in-flight connections to be released.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Attach tags and ingredient/amount pairs to each base recipe, in
    /// child-row insertion order.
    async fn enrich(&self, recipes: &mut [Recipe]) -> Result<(), StoreError> {
        for recipe in recipes.iter_mut() {
            let tag_rows = sqlx::query("SELECT tag FROM tags WHERE recipe_id = $1 ORDER BY id")
                .bind(recipe.id)
                .fetch_all(&self.pool)
                .await?;
            for row in tag_rows {
                recipe.tags.push(row.try_get("tag")?);
            }

            let item_rows = sqlx::query(
                "SELECT ingredient, amount FROM ingredients WHERE recipe_id = $1 ORDER BY id",
            )
            .bind(recipe.id)
            .fetch_all(&self.pool)
            .await?;
            for row in item_rows {
                recipe.ingredients.push(row.try_get("ingredient")?);
                recipe.amount.push(row.try_get("amount")?);
            }
        }
        Ok(())
    }
}

fn base_recipe(row: &PgRow) -> Result<Recipe, sqlx::Error> {
    Ok(Recipe {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        instructions: row.try_get("instructions")?,
        likes: row.try_get("likes")?,
        creator_name: row.try_get("creator_name")?,
        tags: Vec::new(),
        ingredients: Vec::new(),
        amount: Vec::new(),
    })
}

#[async_trait::async_trait]
impl RecipeStore for PgRecipeStore {
    #[instrument(skip(self, recipe), fields(title = %recipe.title), err)]
    async fn insert(&self, recipe: &NewRecipe) -> Result<i64, StoreError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            "INSERT INTO recipes (title, instructions, likes, creator_name) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&recipe.title)
        .bind(&recipe.instructions)
        .bind(recipe.likes)
        .bind(&recipe.creator_name)
        .fetch_one(&mut *tx)
        .await?;
        let id: i64 = row.try_get("id")?;

        for (ingredient, amount) in recipe.line_items() {
            sqlx::query("INSERT INTO ingredients (recipe_id, ingredient, amount) VALUES ($1, $2, $3)")
                .bind(id)
                .bind(ingredient)
                .bind(amount)
                .execute(&mut *tx)
                .await?;
        }

        for tag in &recipe.tags {
            sqlx::query("INSERT INTO tags (recipe_id, tag) VALUES ($1, $2)")
                .bind(id)
                .bind(tag)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(id)
    }

    async fn fetch_all(&self) -> Result<Vec<Recipe>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, title, instructions, likes, creator_name FROM recipes ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut recipes = Vec::with_capacity(rows.len());
        for row in &rows {
            recipes.push(base_recipe(row)?);
        }
        self.enrich(&mut recipes).await?;
        Ok(recipes)
    }

    async fn fetch_by_id(&self, id: i64) -> Result<Vec<Recipe>, StoreError> {
        let row = sqlx::query(
            "SELECT id, title, instructions, likes, creator_name FROM recipes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let mut recipes = match row {
            Some(row) => vec![base_recipe(&row)?],
            None => Vec::new(),
        };
        self.enrich(&mut recipes).await?;
        Ok(recipes)
    }

    async fn fetch_by_title(&self, fragment: &str) -> Result<Vec<Recipe>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, title, instructions, likes, creator_name FROM recipes \
             WHERE title LIKE $1 ORDER BY id",
        )
        .bind(format!("%{fragment}%"))
        .fetch_all(&self.pool)
        .await?;

        let mut recipes = Vec::with_capacity(rows.len());
        for row in &rows {
            recipes.push(base_recipe(row)?);
        }
        self.enrich(&mut recipes).await?;
        Ok(recipes)
    }

    #[instrument(skip(self), err)]
    async fn fetch_by_tags(&self, tags: &[String]) -> Result<Vec<Recipe>, StoreError> {
        let rows = sqlx::query("SELECT recipe_id FROM tags WHERE tag = ANY($1) ORDER BY id")
            .bind(tags)
            .fetch_all(&self.pool)
            .await?;

        // Distinct recipe ids, first-seen order.
        let mut ids: Vec<i64> = Vec::new();
        for row in &rows {
            let id: i64 = row.try_get("recipe_id")?;
            if !ids.contains(&id) {
                ids.push(id);
            }
        }

        let mut recipes = Vec::with_capacity(ids.len());
        for id in ids {
            let row = sqlx::query(
                "SELECT id, title, instructions, likes, creator_name FROM recipes WHERE id = $1",
            )
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
            if let Some(row) = row {
                recipes.push(base_recipe(&row)?);
            }
        }
        self.enrich(&mut recipes).await?;
        Ok(recipes)
    }

    async fn add_like(&self, id: i64) -> Result<(), StoreError> {
        sqlx::query("UPDATE recipes SET likes = likes + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn remove_like(&self, id: i64) -> Result<(), StoreError> {
        sqlx::query("UPDATE recipes SET likes = likes - 1 WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM tags WHERE recipe_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM ingredients WHERE recipe_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
