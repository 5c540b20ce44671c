use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::Extension;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::info;

use cookbook_store::RecipeStore;

use crate::app::dto::RecipeBody;
use crate::app::errors::ApiError;

type SharedStore = Arc<dyn RecipeStore>;

/// Unwrap an extracted body, mapping every decode failure to a 400.
fn decoded(body: Result<Json<RecipeBody>, JsonRejection>) -> Result<RecipeBody, ApiError> {
    match body {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => Err(ApiError::MalformedBody(rejection.body_text())),
    }
}

pub async fn write_recipe(
    Extension(store): Extension<SharedStore>,
    body: Result<Json<RecipeBody>, JsonRejection>,
) -> Result<Response, ApiError> {
    let body = decoded(body)?;
    info!(title = %body.title, "writing recipe");

    store.insert(&body.into_new_recipe()).await?;
    Ok(StatusCode::CREATED.into_response())
}

/// Query-by-example lookup: the first non-empty criterion of id, title,
/// tags (in that priority order) selects the search; with no criterion set
/// the result is an empty array, not an error.
pub async fn get_recipe(
    Extension(store): Extension<SharedStore>,
    body: Result<Json<RecipeBody>, JsonRejection>,
) -> Result<Response, ApiError> {
    let body = decoded(body)?;

    let recipes = if body.id != 0 {
        store.fetch_by_id(body.id).await?
    } else if !body.title.is_empty() {
        store.fetch_by_title(&body.title).await?
    } else if let Some(tags) = body.tags.as_deref().filter(|t| !t.is_empty()) {
        store.fetch_by_tags(tags).await?
    } else {
        Vec::new()
    };

    Ok(Json(recipes).into_response())
}

pub async fn add_like(
    Extension(store): Extension<SharedStore>,
    body: Result<Json<RecipeBody>, JsonRejection>,
) -> Result<Response, ApiError> {
    let body = decoded(body)?;
    store.add_like(body.id).await?;
    Ok(StatusCode::OK.into_response())
}

pub async fn remove_like(
    Extension(store): Extension<SharedStore>,
    body: Result<Json<RecipeBody>, JsonRejection>,
) -> Result<Response, ApiError> {
    let body = decoded(body)?;
    store.remove_like(body.id).await?;
    Ok(StatusCode::OK.into_response())
}

pub async fn get_all_recipes(
    Extension(store): Extension<SharedStore>,
) -> Result<Response, ApiError> {
    let recipes = store.fetch_all().await?;
    Ok(Json(recipes).into_response())
}

pub async fn delete_recipe_by_id(
    Extension(store): Extension<SharedStore>,
    body: Result<Json<RecipeBody>, JsonRejection>,
) -> Result<Response, ApiError> {
    let body = decoded(body)?;
    info!(id = body.id, "deleting recipe");

    store.delete(body.id).await?;
    Ok(StatusCode::OK.into_response())
}
