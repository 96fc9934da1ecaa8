//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use std::sync::Arc;

use crate::config::Config;
use study_assistant_core::ports::{FlashcardStore, QuizStore};
use study_assistant_core::GenerationService;

/// The shared application state, created once at startup and passed to all handlers.
///
/// The generation service owns its own port handles; the store handles here
/// back the plain read/update endpoints (flashcard listing and favoriting,
/// latest-quiz lookup).
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub generation: GenerationService,
    pub flashcards: Arc<dyn FlashcardStore>,
    pub quizzes: Arc<dyn QuizStore>,
}
