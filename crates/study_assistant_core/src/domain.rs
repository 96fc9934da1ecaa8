//! crates/study_assistant_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database, except that `QuizQuestion`
//! carries serde derives: it is both the shape the model output is validated
//! into and the shape a quiz's questions are stored and served as.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A document uploaded by a user, with the text extracted from it.
///
/// `text_content` is `None` until text extraction has run (or when it
/// produced nothing); generation tasks refuse to run against such documents.
#[derive(Debug, Clone)]
pub struct StudyDocument {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub text_content: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A validated front/back pair produced by the schema validator,
/// not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FlashcardDraft {
    pub front: String,
    pub back: String,
}

/// A persisted flashcard, scoped to one owner and one document.
#[derive(Debug, Clone)]
pub struct Flashcard {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub document_id: Uuid,
    pub front: String,
    pub back: String,
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single multiple-choice question.
///
/// Invariants, enforced by the schema validator before anything is persisted:
/// `options` has exactly 4 entries and `correct_index` indexes into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// A persisted quiz: one record per generation call.
///
/// Old quizzes for a document are never deleted by regeneration; reads pick
/// the most recently created record.
#[derive(Debug, Clone)]
pub struct Quiz {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub document_id: Uuid,
    pub questions: Vec<QuizQuestion>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
