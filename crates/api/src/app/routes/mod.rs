use axum::routing::{any, get, post};
use axum::Router;

pub mod recipes;
pub mod system;

/// All cookbook routes. Paths are fixed by the public API; each one
/// answers a single method (405 otherwise), except `/ping`.
pub fn router() -> Router {
    Router::new()
        .route("/ping", any(system::ping))
        .route("/writeRecipe", post(recipes::write_recipe))
        .route("/getRecipe", get(recipes::get_recipe))
        .route("/addLike", post(recipes::add_like))
        .route("/removeLike", post(recipes::remove_like))
        .route("/getAllRecipes", get(recipes::get_all_recipes))
        .route("/deleteRecipeById", post(recipes::delete_recipe_by_id))
}
