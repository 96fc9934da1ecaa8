//! services/api/src/web/protocol.rs
//!
//! Defines the JSON payload shapes shared by the REST endpoints.
//! All fields are camelCase on the wire.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use study_assistant_core::domain::{Flashcard, Quiz, QuizQuestion};

/// A persisted flashcard as served to the client.
#[derive(Serialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardResponse {
    pub id: Uuid,
    pub document_id: Uuid,
    pub front: String,
    pub back: String,
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Flashcard> for FlashcardResponse {
    fn from(card: Flashcard) -> Self {
        Self {
            id: card.id,
            document_id: card.document_id,
            front: card.front,
            back: card.back,
            is_favorite: card.is_favorite,
            created_at: card.created_at,
            updated_at: card.updated_at,
        }
    }
}

/// One multiple-choice question of a served quiz.
#[derive(Serialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestionResponse {
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl From<QuizQuestion> for QuizQuestionResponse {
    fn from(question: QuizQuestion) -> Self {
        Self {
            question: question.question,
            options: question.options,
            correct_index: question.correct_index,
            explanation: question.explanation,
        }
    }
}

/// A persisted quiz as served to the client.
#[derive(Serialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizResponse {
    pub id: Uuid,
    pub document_id: Uuid,
    pub questions: Vec<QuizQuestionResponse>,
    pub created_at: DateTime<Utc>,
}

impl From<Quiz> for QuizResponse {
    fn from(quiz: Quiz) -> Self {
        Self {
            id: quiz.id,
            document_id: quiz.document_id,
            questions: quiz.questions.into_iter().map(Into::into).collect(),
            created_at: quiz.created_at,
        }
    }
}
