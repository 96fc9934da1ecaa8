//! services/api/src/web/ai.rs
//!
//! Contains the Axum handlers for the AI generation endpoints: chat,
//! summary, concept explanation, flashcard generation, and quiz generation.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::ApiError;
use crate::web::protocol::{FlashcardResponse, QuizResponse};
use crate::web::state::AppState;

//=========================================================================================
// Request and Response Payload Structs
//=========================================================================================

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub document_id: Uuid,
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct ChatResponse {
    pub answer: String,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    pub document_id: Uuid,
}

#[derive(Serialize, ToSchema)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExplainRequest {
    pub document_id: Uuid,
    pub concept: String,
}

#[derive(Serialize, ToSchema)]
pub struct ExplainResponse {
    pub explanation: String,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardsRequest {
    pub document_id: Uuid,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizRequest {
    pub document_id: Uuid,
    pub question_count: Option<u32>,
}

//=========================================================================================
// AI Generation Handlers
//=========================================================================================

/// Ask a question about a document.
#[utoipa::path(
    post,
    path = "/ai/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Answer generated", body = ChatResponse),
        (status = 400, description = "Document has no extracted text"),
        (status = 404, description = "Document not found"),
        (status = 503, description = "Model credential missing or invalid")
    ),
    params(
        ("x-user-id" = Uuid, Header, description = "The unique ID of the user.")
    )
)]
pub async fn chat_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
    Json(req): Json<ChatRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let answer = state
        .generation
        .chat(user_id, req.document_id, &req.message)
        .await?;
    Ok(Json(ChatResponse { answer }))
}

/// Summarize an entire document.
#[utoipa::path(
    post,
    path = "/ai/summary",
    request_body = SummaryRequest,
    responses(
        (status = 200, description = "Summary generated", body = SummaryResponse),
        (status = 400, description = "Document has no extracted text"),
        (status = 404, description = "Document not found"),
        (status = 503, description = "Model credential missing or invalid")
    ),
    params(
        ("x-user-id" = Uuid, Header, description = "The unique ID of the user.")
    )
)]
pub async fn summary_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
    Json(req): Json<SummaryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let summary = state.generation.summarize(user_id, req.document_id).await?;
    Ok(Json(SummaryResponse { summary }))
}

/// Explain one concept in terms of a document.
#[utoipa::path(
    post,
    path = "/ai/explain",
    request_body = ExplainRequest,
    responses(
        (status = 200, description = "Explanation generated", body = ExplainResponse),
        (status = 400, description = "Document has no extracted text"),
        (status = 404, description = "Document not found"),
        (status = 503, description = "Model credential missing or invalid")
    ),
    params(
        ("x-user-id" = Uuid, Header, description = "The unique ID of the user.")
    )
)]
pub async fn explain_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
    Json(req): Json<ExplainRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let explanation = state
        .generation
        .explain(user_id, req.document_id, &req.concept)
        .await?;
    Ok(Json(ExplainResponse { explanation }))
}

/// Generate a fresh batch of flashcards for a document.
#[utoipa::path(
    post,
    path = "/ai/flashcards",
    request_body = FlashcardsRequest,
    responses(
        (status = 201, description = "Flashcards generated and stored", body = [FlashcardResponse]),
        (status = 400, description = "Document has no extracted text"),
        (status = 404, description = "Document not found"),
        (status = 500, description = "Model output could not be parsed; retry the generation"),
        (status = 503, description = "Model credential missing or invalid")
    ),
    params(
        ("x-user-id" = Uuid, Header, description = "The unique ID of the user.")
    )
)]
pub async fn flashcards_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
    Json(req): Json<FlashcardsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state
        .generation
        .generate_flashcards(user_id, req.document_id)
        .await?;

    let response: Vec<FlashcardResponse> = created.into_iter().map(Into::into).collect();
    Ok((StatusCode::CREATED, Json(response)))
}

/// Generate a new quiz for a document.
#[utoipa::path(
    post,
    path = "/ai/quiz",
    request_body = QuizRequest,
    responses(
        (status = 201, description = "Quiz generated and stored", body = QuizResponse),
        (status = 400, description = "Document has no extracted text"),
        (status = 404, description = "Document not found"),
        (status = 500, description = "Model output could not be parsed; retry the generation"),
        (status = 503, description = "Model credential missing or invalid")
    ),
    params(
        ("x-user-id" = Uuid, Header, description = "The unique ID of the user.")
    )
)]
pub async fn quiz_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
    Json(req): Json<QuizRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let quiz = state
        .generation
        .generate_quiz(user_id, req.document_id, req.question_count)
        .await?;

    Ok((StatusCode::CREATED, Json(QuizResponse::from(quiz))))
}
