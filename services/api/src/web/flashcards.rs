//! services/api/src/web/flashcards.rs
//!
//! Read and update endpoints for stored flashcards.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
    Extension,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::ApiError;
use crate::web::protocol::FlashcardResponse;
use crate::web::state::AppState;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRequest {
    /// Desired favorite state; omit to toggle the current one.
    pub is_favorite: Option<bool>,
}

/// List all flashcards for a document, newest batch first.
#[utoipa::path(
    get,
    path = "/flashcards/{document_id}",
    responses(
        (status = 200, description = "Flashcards for the document", body = [FlashcardResponse])
    ),
    params(
        ("document_id" = Uuid, Path, description = "The document to list flashcards for."),
        ("x-user-id" = Uuid, Header, description = "The unique ID of the user.")
    )
)]
pub async fn list_flashcards_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
    Path(document_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let cards = state
        .flashcards
        .list_for_document(user_id, document_id)
        .await?;

    let response: Vec<FlashcardResponse> = cards.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

/// Set or toggle the favorite flag on a single flashcard.
#[utoipa::path(
    patch,
    path = "/flashcards/{id}/favorite",
    request_body = FavoriteRequest,
    responses(
        (status = 200, description = "Updated flashcard", body = FlashcardResponse),
        (status = 404, description = "Flashcard not found")
    ),
    params(
        ("id" = Uuid, Path, description = "The flashcard to update."),
        ("x-user-id" = Uuid, Header, description = "The unique ID of the user.")
    )
)]
pub async fn set_favorite_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
    Path(id): Path<Uuid>,
    Json(req): Json<FavoriteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let card = state
        .flashcards
        .set_favorite(user_id, id, req.is_favorite)
        .await?;

    Ok(Json(FlashcardResponse::from(card)))
}
