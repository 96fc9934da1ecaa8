pub mod ai;
pub mod flashcards;
pub mod middleware;
pub mod protocol;
pub mod quizzes;
pub mod rest;
pub mod state;

// Re-export the handlers and middleware to make them easily accessible
// to the binary that will build the web server router.
pub use ai::{chat_handler, explain_handler, flashcards_handler, quiz_handler, summary_handler};
pub use flashcards::{list_flashcards_handler, set_favorite_handler};
pub use middleware::require_user;
pub use quizzes::latest_quiz_handler;
