//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the store ports from the `core` crate. It handles all interactions
//! with the PostgreSQL database using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use study_assistant_core::domain::{Flashcard, FlashcardDraft, Quiz, QuizQuestion, StudyDocument};
use study_assistant_core::ports::{
    DocumentStore, FlashcardStore, PortError, PortResult, QuizStore,
};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the document, flashcard, and quiz
/// store ports.
#[derive(Clone)]
pub struct DbAdapter {
    pool: PgPool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

fn unexpected(e: sqlx::Error) -> PortError {
    PortError::Unexpected(e.to_string())
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct DocumentRecord {
    id: Uuid,
    owner_id: Uuid,
    title: String,
    text_content: Option<String>,
    created_at: DateTime<Utc>,
}
impl DocumentRecord {
    fn to_domain(self) -> StudyDocument {
        StudyDocument {
            id: self.id,
            owner_id: self.owner_id,
            title: self.title,
            text_content: self.text_content,
            created_at: self.created_at,
        }
    }
}

#[derive(FromRow)]
struct FlashcardRecord {
    id: Uuid,
    owner_id: Uuid,
    document_id: Uuid,
    front: String,
    back: String,
    is_favorite: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}
impl FlashcardRecord {
    fn to_domain(self) -> Flashcard {
        Flashcard {
            id: self.id,
            owner_id: self.owner_id,
            document_id: self.document_id,
            front: self.front,
            back: self.back,
            is_favorite: self.is_favorite,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(FromRow)]
struct QuizRecord {
    id: Uuid,
    owner_id: Uuid,
    document_id: Uuid,
    questions: serde_json::Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}
impl QuizRecord {
    fn to_domain(self) -> PortResult<Quiz> {
        // Stored questions were validated before insert; a decode failure
        // here means the column was tampered with or the schema drifted.
        let questions = serde_json::from_value(self.questions)
            .map_err(|e| PortError::Unexpected(format!("Corrupt quiz questions column: {e}")))?;
        Ok(Quiz {
            id: self.id,
            owner_id: self.owner_id,
            document_id: self.document_id,
            questions,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

//=========================================================================================
// Store Trait Implementations
//=========================================================================================

#[async_trait]
impl DocumentStore for DbAdapter {
    async fn find_owned(&self, owner_id: Uuid, document_id: Uuid) -> PortResult<StudyDocument> {
        let record = sqlx::query_as::<_, DocumentRecord>(
            "SELECT id, owner_id, title, text_content, created_at \
             FROM documents WHERE id = $1 AND owner_id = $2",
        )
        .bind(document_id)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => PortError::NotFound("Document not found".to_string()),
            _ => unexpected(e),
        })?;
        Ok(record.to_domain())
    }
}

#[async_trait]
impl FlashcardStore for DbAdapter {
    async fn insert_batch(
        &self,
        owner_id: Uuid,
        document_id: Uuid,
        cards: &[FlashcardDraft],
    ) -> PortResult<Vec<Flashcard>> {
        // One INSERT per card, no wrapping transaction: a failure partway
        // leaves the cards inserted so far (at-least-partial semantics).
        let mut inserted = Vec::with_capacity(cards.len());
        for card in cards {
            let record = sqlx::query_as::<_, FlashcardRecord>(
                "INSERT INTO flashcards (id, owner_id, document_id, front, back) \
                 VALUES ($1, $2, $3, $4, $5) \
                 RETURNING id, owner_id, document_id, front, back, is_favorite, created_at, updated_at",
            )
            .bind(Uuid::new_v4())
            .bind(owner_id)
            .bind(document_id)
            .bind(&card.front)
            .bind(&card.back)
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)?;
            inserted.push(record.to_domain());
        }
        Ok(inserted)
    }

    async fn list_for_document(
        &self,
        owner_id: Uuid,
        document_id: Uuid,
    ) -> PortResult<Vec<Flashcard>> {
        let records = sqlx::query_as::<_, FlashcardRecord>(
            "SELECT id, owner_id, document_id, front, back, is_favorite, created_at, updated_at \
             FROM flashcards WHERE owner_id = $1 AND document_id = $2 \
             ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .bind(document_id)
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn set_favorite(
        &self,
        owner_id: Uuid,
        flashcard_id: Uuid,
        is_favorite: Option<bool>,
    ) -> PortResult<Flashcard> {
        let record = match is_favorite {
            Some(value) => {
                sqlx::query_as::<_, FlashcardRecord>(
                    "UPDATE flashcards SET is_favorite = $3, updated_at = now() \
                     WHERE id = $1 AND owner_id = $2 \
                     RETURNING id, owner_id, document_id, front, back, is_favorite, created_at, updated_at",
                )
                .bind(flashcard_id)
                .bind(owner_id)
                .bind(value)
                .fetch_one(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, FlashcardRecord>(
                    "UPDATE flashcards SET is_favorite = NOT is_favorite, updated_at = now() \
                     WHERE id = $1 AND owner_id = $2 \
                     RETURNING id, owner_id, document_id, front, back, is_favorite, created_at, updated_at",
                )
                .bind(flashcard_id)
                .bind(owner_id)
                .fetch_one(&self.pool)
                .await
            }
        }
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => PortError::NotFound("Flashcard not found".to_string()),
            _ => unexpected(e),
        })?;

        Ok(record.to_domain())
    }
}

#[async_trait]
impl QuizStore for DbAdapter {
    async fn insert(
        &self,
        owner_id: Uuid,
        document_id: Uuid,
        questions: &[QuizQuestion],
    ) -> PortResult<Quiz> {
        let questions_json = serde_json::to_value(questions)
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let record = sqlx::query_as::<_, QuizRecord>(
            "INSERT INTO quizzes (id, owner_id, document_id, questions) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, owner_id, document_id, questions, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(owner_id)
        .bind(document_id)
        .bind(questions_json)
        .fetch_one(&self.pool)
        .await
        .map_err(unexpected)?;

        record.to_domain()
    }

    async fn find_latest_for_document(
        &self,
        owner_id: Uuid,
        document_id: Uuid,
    ) -> PortResult<Quiz> {
        let record = sqlx::query_as::<_, QuizRecord>(
            "SELECT id, owner_id, document_id, questions, created_at, updated_at \
             FROM quizzes WHERE owner_id = $1 AND document_id = $2 \
             ORDER BY created_at DESC LIMIT 1",
        )
        .bind(owner_id)
        .bind(document_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => {
                PortError::NotFound("No quiz found for this document".to_string())
            }
            _ => unexpected(e),
        })?;

        record.to_domain()
    }
}
