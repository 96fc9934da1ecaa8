pub mod domain;
pub mod extract;
pub mod generation;
pub mod ports;
pub mod schema;

pub use domain::{Flashcard, FlashcardDraft, Quiz, QuizQuestion, StudyDocument};
pub use generation::{GenerationService, DEFAULT_QUIZ_QUESTION_COUNT};
pub use ports::{
    DocumentStore, FlashcardStore, PortError, PortResult, QuizStore, TextGenerationService,
};
