//! crates/study_assistant_core/src/schema.rs
//!
//! Parses and validates extracted model output against the shapes the
//! structured tasks expect. Validation is all-or-nothing per batch: one
//! malformed element rejects the whole generation, because a partially
//! generated study set is worse than a clear retry signal.

use crate::domain::{FlashcardDraft, QuizQuestion};
use crate::ports::{PortError, PortResult};

/// Number of answer options every quiz question must carry.
pub const QUIZ_OPTION_COUNT: usize = 4;

/// Parses a JSON array of `{front, back}` objects into flashcard drafts.
///
/// Rejects with [`PortError::GenerationFormat`] when the text is not a JSON
/// array of such objects, or when any element has an empty front or back.
pub fn parse_flashcards(json_text: &str) -> PortResult<Vec<FlashcardDraft>> {
    let drafts: Vec<FlashcardDraft> = serde_json::from_str(json_text)
        .map_err(|_| PortError::GenerationFormat("Failed to parse flashcards from AI".to_string()))?;

    for (index, draft) in drafts.iter().enumerate() {
        if draft.front.trim().is_empty() || draft.back.trim().is_empty() {
            return Err(PortError::GenerationFormat(format!(
                "Failed to parse flashcards from AI: card {} has an empty front or back",
                index + 1
            )));
        }
    }

    Ok(drafts)
}

/// Parses a JSON array of quiz question objects.
///
/// Rejects with [`PortError::GenerationFormat`] when the text does not parse,
/// or when any question has an empty question text, an option count other
/// than [`QUIZ_OPTION_COUNT`], or a `correctIndex` outside its options.
pub fn parse_quiz_questions(json_text: &str) -> PortResult<Vec<QuizQuestion>> {
    let questions: Vec<QuizQuestion> = serde_json::from_str(json_text)
        .map_err(|_| PortError::GenerationFormat("Failed to parse quiz from AI".to_string()))?;

    for (index, question) in questions.iter().enumerate() {
        if question.question.trim().is_empty() {
            return Err(PortError::GenerationFormat(format!(
                "Failed to parse quiz from AI: question {} has empty text",
                index + 1
            )));
        }
        if question.options.len() != QUIZ_OPTION_COUNT {
            return Err(PortError::GenerationFormat(format!(
                "Failed to parse quiz from AI: question {} has {} options instead of {}",
                index + 1,
                question.options.len(),
                QUIZ_OPTION_COUNT
            )));
        }
        if question.correct_index >= question.options.len() {
            return Err(PortError::GenerationFormat(format!(
                "Failed to parse quiz from AI: question {} has correctIndex {} out of range",
                index + 1,
                question.correct_index
            )));
        }
    }

    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_format_error<T: std::fmt::Debug>(result: PortResult<T>) {
        match result {
            Err(PortError::GenerationFormat(_)) => {}
            other => panic!("expected GenerationFormat, got {:?}", other),
        }
    }

    #[test]
    fn accepts_a_full_flashcard_batch() {
        let elements: Vec<String> = (1..=15)
            .map(|i| format!("{{\"front\":\"Q{i}\",\"back\":\"A{i}\"}}"))
            .collect();
        let json = format!("[{}]", elements.join(","));

        let drafts = parse_flashcards(&json).unwrap();
        assert_eq!(drafts.len(), 15);
        assert_eq!(drafts[0].front, "Q1");
        assert_eq!(drafts[14].back, "A15");
    }

    #[test]
    fn rejects_the_whole_batch_when_one_card_is_missing_a_back() {
        let json = r#"[{"front":"Q1","back":"A1"},{"front":"Q2"}]"#;
        assert_format_error(parse_flashcards(json));
    }

    #[test]
    fn rejects_empty_card_faces() {
        let json = r#"[{"front":"Q1","back":"  "}]"#;
        assert_format_error(parse_flashcards(json));
    }

    #[test]
    fn rejects_non_json_input() {
        assert_format_error(parse_flashcards("not json"));
        assert_format_error(parse_quiz_questions("not json"));
    }

    #[test]
    fn accepts_a_valid_quiz_question() {
        let json = r#"[{
            "question": "What does photosynthesis produce?",
            "options": ["Energy", "Sound", "Gravity", "Magnetism"],
            "correctIndex": 0,
            "explanation": "Light is converted into chemical energy."
        }]"#;

        let questions = parse_quiz_questions(json).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].correct_index, 0);
        assert_eq!(questions[0].options.len(), 4);
    }

    #[test]
    fn explanation_is_optional() {
        let json = r#"[{"question":"Q","options":["a","b","c","d"],"correctIndex":3}]"#;
        let questions = parse_quiz_questions(json).unwrap();
        assert_eq!(questions[0].explanation, None);
    }

    #[test]
    fn rejects_a_question_with_three_options() {
        let json = r#"[{"question":"Q","options":["a","b","c"],"correctIndex":0}]"#;
        assert_format_error(parse_quiz_questions(json));
    }

    #[test]
    fn rejects_a_correct_index_equal_to_the_option_count() {
        let json = r#"[{"question":"Q","options":["a","b","c","d"],"correctIndex":4}]"#;
        assert_format_error(parse_quiz_questions(json));
    }

    #[test]
    fn one_bad_question_rejects_the_whole_quiz() {
        let json = r#"[
            {"question":"Q1","options":["a","b","c","d"],"correctIndex":1},
            {"question":"Q2","options":["a","b"],"correctIndex":0}
        ]"#;
        assert_format_error(parse_quiz_questions(json));
    }
}
