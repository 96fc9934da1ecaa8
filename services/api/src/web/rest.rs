//! services/api/src/web/rest.rs
//!
//! The master definition for the OpenAPI specification, aggregating the
//! endpoint handlers and payload schemas of the REST API.

use utoipa::OpenApi;

use crate::web::{ai, flashcards, protocol, quizzes};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        ai::chat_handler,
        ai::summary_handler,
        ai::explain_handler,
        ai::flashcards_handler,
        ai::quiz_handler,
        flashcards::list_flashcards_handler,
        flashcards::set_favorite_handler,
        quizzes::latest_quiz_handler,
    ),
    components(
        schemas(
            ai::ChatRequest,
            ai::ChatResponse,
            ai::SummaryRequest,
            ai::SummaryResponse,
            ai::ExplainRequest,
            ai::ExplainResponse,
            ai::FlashcardsRequest,
            ai::QuizRequest,
            flashcards::FavoriteRequest,
            protocol::FlashcardResponse,
            protocol::QuizQuestionResponse,
            protocol::QuizResponse,
        )
    ),
    tags(
        (name = "Study Assistant API", description = "API endpoints for AI-generated study artifacts.")
    )
)]
pub struct ApiDoc;
