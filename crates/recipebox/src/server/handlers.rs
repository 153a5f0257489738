//! HTTP handlers for the recipe API.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{error, warn};

use crate::book::RecipeBook;
use crate::recipe::{NewRecipe, Recipe};

/// Plain-text body served at `/`.
pub const WELCOME_MESSAGE: &str = "Welcome to Recipe API 🚀 Use /api/recipes to access recipes.";

/// Message returned alongside a newly created recipe.
pub const CREATED_MESSAGE: &str = "Recipe added successfully";

/// A failed request: a status code and a single `error` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

/// Body of a successful create.
#[derive(Debug, Serialize)]
pub struct Created {
    /// Confirmation text.
    pub message: &'static str,
    /// The stored record, including its assigned id.
    pub recipe: Recipe,
}

impl ApiError {
    /// The create payload did not have the required shape.
    #[must_use]
    pub fn invalid_input() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: "Invalid input format",
        }
    }

    /// The collection could not be read.
    #[must_use]
    pub fn read_failed() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Failed to read data",
        }
    }

    /// The new recipe could not be persisted.
    #[must_use]
    pub fn save_failed() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Failed to save recipe",
        }
    }

    /// HTTP status of this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Client-facing message of this error.
    #[must_use]
    pub fn message(&self) -> &'static str {
        self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// `GET /`
pub async fn welcome() -> &'static str {
    WELCOME_MESSAGE
}

/// `GET /api/recipes`
pub async fn list_recipes(
    State(book): State<RecipeBook>,
) -> Result<Json<Vec<Recipe>>, ApiError> {
    let recipes = book.list().await.map_err(|e| {
        error!("Failed to list recipes: {e}");
        ApiError::read_failed()
    })?;
    Ok(Json(recipes))
}

/// `POST /api/recipes`
///
/// The body is read as raw bytes so that a missing or wrong content type
/// yields the same 400 as a malformed payload.
pub async fn create_recipe(
    State(book): State<RecipeBook>,
    body: Bytes,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let new_recipe = NewRecipe::from_body(&body).map_err(|e| {
        warn!("Rejected recipe: {e}");
        ApiError::invalid_input()
    })?;

    let recipe = book.create(new_recipe).await.map_err(|e| {
        error!("Failed to save recipe: {e}");
        ApiError::save_failed()
    })?;

    Ok((
        StatusCode::CREATED,
        Json(Created {
            message: CREATED_MESSAGE,
            recipe,
        }),
    ))
}
