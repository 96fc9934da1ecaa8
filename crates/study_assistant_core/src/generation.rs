//! crates/study_assistant_core/src/generation.rs
//!
//! The generation orchestrator: turns a document's text plus a task intent
//! into prose artifacts or validated, persisted structured records.

const CHAT_SYSTEM_PROMPT: &str =
    "You are a helpful study assistant. Answer questions using ONLY the document text provided.";

const SUMMARY_SYSTEM_PROMPT: &str = "Summarize the following document into a concise, \
student-friendly study summary with headings and bullet points.";

const EXPLAIN_SYSTEM_PROMPT: &str = "Explain the requested concept in a clear, step-by-step way \
suitable for a student, referencing only the provided document.";

const FLASHCARDS_SYSTEM_PROMPT: &str = r#"You are a JSON API. Extract key concepts from the document and return EXACTLY 15 Q/A flashcards as a JSON array ONLY, no markdown, no prose, no explanations. The JSON format must be: [{ "front": "question", "back": "answer" }]. Do NOT include any other keys, and do NOT include any text before or after the JSON."#;

const QUIZ_SYSTEM_PROMPT: &str = r#"You are a JSON API. Generate a multiple-choice quiz and return JSON ONLY, as an array of objects: { "question": string, "options": string[4], "correctIndex": number, "explanation": string }. Do NOT include any keys other than these, and do NOT include any text before or after the JSON array."#;

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::{Flashcard, Quiz, StudyDocument};
use crate::extract::extract_json_array;
use crate::ports::{
    DocumentStore, FlashcardStore, PortError, PortResult, QuizStore, TextGenerationService,
};
use crate::schema::{parse_flashcards, parse_quiz_questions};

/// Question count used when a quiz request does not specify one.
pub const DEFAULT_QUIZ_QUESTION_COUNT: u32 = 10;

//=========================================================================================
// The Orchestrator
//=========================================================================================

/// Runs generation tasks against a user's documents.
///
/// Every call is a fresh run: fetch the owned document, prompt the model,
/// then (for the structured tasks) extract, validate, and persist. There is
/// no coordination between concurrent calls: two simultaneous flashcard
/// generations for one document both insert a batch, and neither removes
/// earlier batches. Generation history is append-only; reads select the
/// newest records.
#[derive(Clone)]
pub struct GenerationService {
    documents: Arc<dyn DocumentStore>,
    flashcards: Arc<dyn FlashcardStore>,
    quizzes: Arc<dyn QuizStore>,
    llm: Arc<dyn TextGenerationService>,
}

impl GenerationService {
    /// Creates a new `GenerationService` over the given ports.
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        flashcards: Arc<dyn FlashcardStore>,
        quizzes: Arc<dyn QuizStore>,
        llm: Arc<dyn TextGenerationService>,
    ) -> Self {
        Self {
            documents,
            flashcards,
            quizzes,
            llm,
        }
    }

    /// Answers a free-form question using only the document's text.
    pub async fn chat(
        &self,
        owner_id: Uuid,
        document_id: Uuid,
        message: &str,
    ) -> PortResult<String> {
        let (_, text) = self.owned_document_text(owner_id, document_id).await?;

        let user_prompt = format!("Document text:\n{text}\n\nUser question: {message}");
        let answer = self.llm.generate_text(CHAT_SYSTEM_PROMPT, &user_prompt).await?;

        require_prose(answer, "answer")
    }

    /// Produces a study summary of the whole document.
    pub async fn summarize(&self, owner_id: Uuid, document_id: Uuid) -> PortResult<String> {
        let (_, text) = self.owned_document_text(owner_id, document_id).await?;

        let user_prompt = format!("Document text:\n{text}");
        let summary = self
            .llm
            .generate_text(SUMMARY_SYSTEM_PROMPT, &user_prompt)
            .await?;

        require_prose(summary, "summary")
    }

    /// Explains a single concept in terms of the document.
    pub async fn explain(
        &self,
        owner_id: Uuid,
        document_id: Uuid,
        concept: &str,
    ) -> PortResult<String> {
        let (_, text) = self.owned_document_text(owner_id, document_id).await?;

        let user_prompt = format!("Document text:\n{text}\n\nConcept to explain: {concept}");
        let explanation = self
            .llm
            .generate_text(EXPLAIN_SYSTEM_PROMPT, &user_prompt)
            .await?;

        require_prose(explanation, "explanation")
    }

    /// Generates and persists a fresh batch of flashcards for the document.
    ///
    /// The prompt asks for exactly 15 cards, but that is a hint to the model,
    /// not an invariant: whatever count validates is persisted. Existing
    /// cards for the document are left untouched.
    pub async fn generate_flashcards(
        &self,
        owner_id: Uuid,
        document_id: Uuid,
    ) -> PortResult<Vec<Flashcard>> {
        let (document, text) = self.owned_document_text(owner_id, document_id).await?;

        let user_prompt = format!("Document text:\n{text}");
        let raw = self
            .llm
            .generate_text(FLASHCARDS_SYSTEM_PROMPT, &user_prompt)
            .await?;

        let drafts = parse_flashcards(extract_json_array(&raw))?;

        let created = self
            .flashcards
            .insert_batch(owner_id, document.id, &drafts)
            .await?;
        info!(
            "Generated {} flashcards for document {}",
            created.len(),
            document.id
        );

        Ok(created)
    }

    /// Generates and persists a new quiz for the document.
    ///
    /// `question_count` is passed through to the model as a hint; the result
    /// is not trimmed or padded to match it. Earlier quizzes remain stored;
    /// the latest-quiz read picks this one up by creation time.
    pub async fn generate_quiz(
        &self,
        owner_id: Uuid,
        document_id: Uuid,
        question_count: Option<u32>,
    ) -> PortResult<Quiz> {
        let (document, text) = self.owned_document_text(owner_id, document_id).await?;

        let count = question_count.unwrap_or(DEFAULT_QUIZ_QUESTION_COUNT);
        let user_prompt = format!("Question count: {count}\nDocument text:\n{text}");
        let raw = self.llm.generate_text(QUIZ_SYSTEM_PROMPT, &user_prompt).await?;

        let questions = parse_quiz_questions(extract_json_array(&raw))?;

        let quiz = self.quizzes.insert(owner_id, document.id, &questions).await?;
        info!(
            "Generated a quiz with {} questions for document {}",
            quiz.questions.len(),
            document.id
        );

        Ok(quiz)
    }

    /// Fetches the document and its extracted text, enforcing the shared
    /// precondition for every task kind: the document must exist, belong to
    /// the caller, and have a non-empty text body, all before any model
    /// call is made.
    async fn owned_document_text(
        &self,
        owner_id: Uuid,
        document_id: Uuid,
    ) -> PortResult<(StudyDocument, String)> {
        let document = self.documents.find_owned(owner_id, document_id).await?;

        let text = document
            .text_content
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| PortError::InvalidState("Document text not available".to_string()))?
            .to_string();

        Ok((document, text))
    }
}

/// Prose tasks have no schema; the only check is that the model said
/// something at all. An empty reply is a retryable generation failure.
fn require_prose(text: String, task: &str) -> PortResult<String> {
    if text.trim().is_empty() {
        return Err(PortError::GenerationFormat(format!(
            "The AI returned an empty {task}"
        )));
    }
    Ok(text)
}
