//! services/api/src/web/quizzes.rs
//!
//! Read endpoints for stored quizzes.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
    Extension,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::ApiError;
use crate::web::protocol::QuizResponse;
use crate::web::state::AppState;

/// Fetch the most recently generated quiz for a document.
#[utoipa::path(
    get,
    path = "/quizzes/latest/{document_id}",
    responses(
        (status = 200, description = "The latest quiz", body = QuizResponse),
        (status = 404, description = "No quiz exists for this document")
    ),
    params(
        ("document_id" = Uuid, Path, description = "The document to fetch the quiz for."),
        ("x-user-id" = Uuid, Header, description = "The unique ID of the user.")
    )
)]
pub async fn latest_quiz_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
    Path(document_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let quiz = state
        .quizzes
        .find_latest_for_document(user_id, document_id)
        .await?;

    Ok(Json(QuizResponse::from(quiz)))
}
