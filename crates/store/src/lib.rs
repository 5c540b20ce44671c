//! Data-access layer: recipe storage behind the [`RecipeStore`] trait.
//!
//! Two implementations exist: [`PgRecipeStore`] (sqlx/Postgres, the
//! production path) and [`InMemoryRecipeStore`] (tests and local dev).

pub mod in_memory;
pub mod postgres;
pub mod recipe;
pub mod store;

pub use in_memory::InMemoryRecipeStore;
pub use postgres::PgRecipeStore;
pub use recipe::{NewRecipe, Recipe};
pub use store::{RecipeStore, StoreError};
