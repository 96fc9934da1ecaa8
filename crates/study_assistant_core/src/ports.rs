//! crates/study_assistant_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like databases or APIs.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Flashcard, FlashcardDraft, Quiz, QuizQuestion, StudyDocument};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// The closed error taxonomy for all port and generation operations.
///
/// Every failure that leaves the core carries one of these kinds; the
/// transport layer maps kinds to protocol status codes in one place.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    /// The record is missing, or exists but belongs to another owner.
    #[error("{0}")]
    NotFound(String),
    /// The record exists but is not in a usable state (e.g. a document with
    /// no extracted text).
    #[error("{0}")]
    InvalidState(String),
    /// The model backend cannot be used: credential missing or invalid.
    #[error("{0}")]
    ServiceUnavailable(String),
    /// The model's output could not be extracted, parsed, or validated into
    /// the expected structure. Retrying the generation is the fix.
    #[error("{0}")]
    GenerationFormat(String),
    /// Any other unexpected failure, including transport errors from the
    /// model backend or the database.
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetches a document by id, filtered by owner. A document owned by
    /// someone else is indistinguishable from a missing one.
    async fn find_owned(&self, owner_id: Uuid, document_id: Uuid) -> PortResult<StudyDocument>;
}

#[async_trait]
pub trait FlashcardStore: Send + Sync {
    /// Inserts one generated batch. Cards are inserted individually, so a
    /// failure partway may leave a partial batch behind.
    async fn insert_batch(
        &self,
        owner_id: Uuid,
        document_id: Uuid,
        cards: &[FlashcardDraft],
    ) -> PortResult<Vec<Flashcard>>;

    /// Lists all flashcards for a document, newest first.
    async fn list_for_document(
        &self,
        owner_id: Uuid,
        document_id: Uuid,
    ) -> PortResult<Vec<Flashcard>>;

    /// Sets the favorite flag on a single card; `None` toggles the current
    /// value.
    async fn set_favorite(
        &self,
        owner_id: Uuid,
        flashcard_id: Uuid,
        is_favorite: Option<bool>,
    ) -> PortResult<Flashcard>;
}

#[async_trait]
pub trait QuizStore: Send + Sync {
    /// Inserts one quiz with its full question list as a single record.
    async fn insert(
        &self,
        owner_id: Uuid,
        document_id: Uuid,
        questions: &[QuizQuestion],
    ) -> PortResult<Quiz>;

    /// Returns the most recently created quiz for a document.
    async fn find_latest_for_document(
        &self,
        owner_id: Uuid,
        document_id: Uuid,
    ) -> PortResult<Quiz>;
}

#[async_trait]
pub trait TextGenerationService: Send + Sync {
    /// Sends a system instruction and a user payload to the generative-text
    /// backend and returns the raw text of its reply, unprocessed.
    ///
    /// Fails with [`PortError::ServiceUnavailable`] when no credential is
    /// configured (checked before any network call) or when the backend
    /// rejects the credential. No retries are attempted.
    async fn generate_text(&self, system_prompt: &str, user_prompt: &str) -> PortResult<String>;
}
