//! Integration tests for the generation orchestrator, run against in-memory
//! fakes of the store and model ports. No network or database involved.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use study_assistant_core::domain::{Flashcard, FlashcardDraft, Quiz, QuizQuestion, StudyDocument};
use study_assistant_core::ports::{
    DocumentStore, FlashcardStore, PortError, PortResult, QuizStore, TextGenerationService,
};
use study_assistant_core::GenerationService;

//=========================================================================================
// In-memory fakes
//=========================================================================================

/// A fake model gateway that returns a fixed reply and counts invocations,
/// so tests can assert that invalid requests never reach the model.
struct FakeGateway {
    reply: String,
    calls: AtomicUsize,
}

impl FakeGateway {
    fn new(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerationService for FakeGateway {
    async fn generate_text(&self, _system_prompt: &str, _user_prompt: &str) -> PortResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }
}

struct FakeDocumentStore {
    documents: Vec<StudyDocument>,
}

#[async_trait]
impl DocumentStore for FakeDocumentStore {
    async fn find_owned(&self, owner_id: Uuid, document_id: Uuid) -> PortResult<StudyDocument> {
        self.documents
            .iter()
            .find(|d| d.id == document_id && d.owner_id == owner_id)
            .cloned()
            .ok_or_else(|| PortError::NotFound("Document not found".to_string()))
    }
}

#[derive(Default)]
struct FakeFlashcardStore {
    cards: Mutex<Vec<Flashcard>>,
}

#[async_trait]
impl FlashcardStore for FakeFlashcardStore {
    async fn insert_batch(
        &self,
        owner_id: Uuid,
        document_id: Uuid,
        drafts: &[FlashcardDraft],
    ) -> PortResult<Vec<Flashcard>> {
        let now = Utc::now();
        let inserted: Vec<Flashcard> = drafts
            .iter()
            .map(|draft| Flashcard {
                id: Uuid::new_v4(),
                owner_id,
                document_id,
                front: draft.front.clone(),
                back: draft.back.clone(),
                is_favorite: false,
                created_at: now,
                updated_at: now,
            })
            .collect();
        self.cards.lock().unwrap().extend(inserted.clone());
        Ok(inserted)
    }

    async fn list_for_document(
        &self,
        owner_id: Uuid,
        document_id: Uuid,
    ) -> PortResult<Vec<Flashcard>> {
        Ok(self
            .cards
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.owner_id == owner_id && c.document_id == document_id)
            .cloned()
            .collect())
    }

    async fn set_favorite(
        &self,
        owner_id: Uuid,
        flashcard_id: Uuid,
        is_favorite: Option<bool>,
    ) -> PortResult<Flashcard> {
        let mut cards = self.cards.lock().unwrap();
        let card = cards
            .iter_mut()
            .find(|c| c.id == flashcard_id && c.owner_id == owner_id)
            .ok_or_else(|| PortError::NotFound("Flashcard not found".to_string()))?;
        card.is_favorite = is_favorite.unwrap_or(!card.is_favorite);
        Ok(card.clone())
    }
}

#[derive(Default)]
struct FakeQuizStore {
    quizzes: Mutex<Vec<Quiz>>,
}

#[async_trait]
impl QuizStore for FakeQuizStore {
    async fn insert(
        &self,
        owner_id: Uuid,
        document_id: Uuid,
        questions: &[QuizQuestion],
    ) -> PortResult<Quiz> {
        let now = Utc::now();
        let quiz = Quiz {
            id: Uuid::new_v4(),
            owner_id,
            document_id,
            questions: questions.to_vec(),
            created_at: now,
            updated_at: now,
        };
        self.quizzes.lock().unwrap().push(quiz.clone());
        Ok(quiz)
    }

    async fn find_latest_for_document(
        &self,
        owner_id: Uuid,
        document_id: Uuid,
    ) -> PortResult<Quiz> {
        self.quizzes
            .lock()
            .unwrap()
            .iter()
            .filter(|q| q.owner_id == owner_id && q.document_id == document_id)
            .last()
            .cloned()
            .ok_or_else(|| PortError::NotFound("No quiz found for this document".to_string()))
    }
}

//=========================================================================================
// Test harness
//=========================================================================================

struct Harness {
    service: GenerationService,
    gateway: Arc<FakeGateway>,
    flashcards: Arc<FakeFlashcardStore>,
    quizzes: Arc<FakeQuizStore>,
    owner_id: Uuid,
    document_id: Uuid,
}

fn harness_with_text(reply: &str, text_content: Option<&str>) -> Harness {
    let owner_id = Uuid::new_v4();
    let document_id = Uuid::new_v4();

    let documents = Arc::new(FakeDocumentStore {
        documents: vec![StudyDocument {
            id: document_id,
            owner_id,
            title: "Biology notes".to_string(),
            text_content: text_content.map(str::to_string),
            created_at: Utc::now(),
        }],
    });
    let flashcards = Arc::new(FakeFlashcardStore::default());
    let quizzes = Arc::new(FakeQuizStore::default());
    let gateway = FakeGateway::new(reply);

    let service = GenerationService::new(
        documents,
        flashcards.clone(),
        quizzes.clone(),
        gateway.clone(),
    );

    Harness {
        service,
        gateway,
        flashcards,
        quizzes,
        owner_id,
        document_id,
    }
}

fn harness(reply: &str) -> Harness {
    harness_with_text(reply, Some("Photosynthesis converts light to energy."))
}

//=========================================================================================
// Preconditions: no model call on invalid input
//=========================================================================================

#[tokio::test]
async fn every_task_fails_with_invalid_state_when_text_is_missing() {
    for text in [None, Some(""), Some("   ")] {
        let h = harness_with_text("unused", text);

        let results = vec![
            h.service.chat(h.owner_id, h.document_id, "hi").await.err(),
            h.service.summarize(h.owner_id, h.document_id).await.err(),
            h.service
                .explain(h.owner_id, h.document_id, "osmosis")
                .await
                .err(),
            h.service
                .generate_flashcards(h.owner_id, h.document_id)
                .await
                .err(),
            h.service
                .generate_quiz(h.owner_id, h.document_id, None)
                .await
                .err(),
        ];

        for error in results {
            assert!(matches!(error, Some(PortError::InvalidState(_))));
        }
        assert_eq!(h.gateway.call_count(), 0, "no model call may be attempted");
    }
}

#[tokio::test]
async fn every_task_fails_with_not_found_for_missing_or_unowned_documents() {
    let h = harness("unused");
    let stranger = Uuid::new_v4();
    let unknown_document = Uuid::new_v4();

    // Wrong owner, right document.
    let err = h.service.chat(stranger, h.document_id, "hi").await.err();
    assert!(matches!(err, Some(PortError::NotFound(_))));

    // Right owner, unknown document.
    let err = h.service.summarize(h.owner_id, unknown_document).await.err();
    assert!(matches!(err, Some(PortError::NotFound(_))));

    let err = h
        .service
        .generate_flashcards(stranger, h.document_id)
        .await
        .err();
    assert!(matches!(err, Some(PortError::NotFound(_))));

    let err = h
        .service
        .generate_quiz(h.owner_id, unknown_document, Some(5))
        .await
        .err();
    assert!(matches!(err, Some(PortError::NotFound(_))));

    assert_eq!(h.gateway.call_count(), 0);
}

//=========================================================================================
// Prose tasks
//=========================================================================================

#[tokio::test]
async fn summary_returns_the_model_reply_verbatim() {
    let h = harness("Plants use light to make energy.");

    let summary = h.service.summarize(h.owner_id, h.document_id).await.unwrap();

    assert_eq!(summary, "Plants use light to make energy.");
    assert_eq!(h.gateway.call_count(), 1);
}

#[tokio::test]
async fn chat_rejects_a_blank_answer() {
    let h = harness("   \n");

    let err = h
        .service
        .chat(h.owner_id, h.document_id, "What is photosynthesis?")
        .await
        .err();

    assert!(matches!(err, Some(PortError::GenerationFormat(_))));
}

//=========================================================================================
// Structured tasks
//=========================================================================================

#[tokio::test]
async fn flashcards_survive_a_prose_preamble_and_persist_with_defaults() {
    let h = harness(
        "Here you go:\n[{\"front\":\"Q1\",\"back\":\"A1\"},{\"front\":\"Q2\",\"back\":\"A2\"}]",
    );

    let created = h
        .service
        .generate_flashcards(h.owner_id, h.document_id)
        .await
        .unwrap();

    assert_eq!(created.len(), 2);
    for card in &created {
        assert_eq!(card.owner_id, h.owner_id);
        assert_eq!(card.document_id, h.document_id);
        assert!(!card.is_favorite);
    }
    assert_eq!(created[0].front, "Q1");
    assert_eq!(created[1].back, "A2");

    let stored = h
        .flashcards
        .list_for_document(h.owner_id, h.document_id)
        .await
        .unwrap();
    assert_eq!(stored.len(), 2);
}

#[tokio::test]
async fn malformed_quiz_output_fails_and_persists_nothing() {
    let h = harness("not json");

    let err = h
        .service
        .generate_quiz(h.owner_id, h.document_id, None)
        .await
        .err();

    assert!(matches!(err, Some(PortError::GenerationFormat(_))));
    assert!(h.quizzes.quizzes.lock().unwrap().is_empty());
}

#[tokio::test]
async fn an_invalid_question_rejects_the_whole_quiz() {
    // Second question has only three options.
    let h = harness(
        r#"[
            {"question":"Q1","options":["a","b","c","d"],"correctIndex":0},
            {"question":"Q2","options":["a","b","c"],"correctIndex":0}
        ]"#,
    );

    let err = h
        .service
        .generate_quiz(h.owner_id, h.document_id, None)
        .await
        .err();

    assert!(matches!(err, Some(PortError::GenerationFormat(_))));
    assert!(h.quizzes.quizzes.lock().unwrap().is_empty());
}

#[tokio::test]
async fn regenerating_a_quiz_appends_and_latest_wins() {
    let h = harness(
        r#"[{"question":"Q","options":["a","b","c","d"],"correctIndex":2,"explanation":"why"}]"#,
    );

    let first = h
        .service
        .generate_quiz(h.owner_id, h.document_id, Some(1))
        .await
        .unwrap();
    let second = h
        .service
        .generate_quiz(h.owner_id, h.document_id, Some(1))
        .await
        .unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(h.quizzes.quizzes.lock().unwrap().len(), 2);

    let latest = h
        .quizzes
        .find_latest_for_document(h.owner_id, h.document_id)
        .await
        .unwrap();
    assert_eq!(latest.id, second.id);
    assert_eq!(latest.questions[0].correct_index, 2);
}

#[tokio::test]
async fn flashcard_count_is_not_enforced_to_fifteen() {
    // The prompt asks for 15; a batch of one still validates and persists.
    let h = harness(r#"[{"front":"Only","back":"Card"}]"#);

    let created = h
        .service
        .generate_flashcards(h.owner_id, h.document_id)
        .await
        .unwrap();

    assert_eq!(created.len(), 1);
}
