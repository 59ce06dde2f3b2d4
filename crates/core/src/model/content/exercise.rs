use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::{
    CategorizeContent, FillBlankContent, MatchingContent, MultipleChoiceContent, OrderingContent,
    SelectorContent,
};

//
// ─── KINDS ─────────────────────────────────────────────────────────────────────
//

/// Discriminant of [`ExerciseContent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    MultipleChoice,
    FillBlank,
    Ordering,
    Matching,
    Categorize,
    Selector,
}

impl ExerciseKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MultipleChoice => "multiple_choice",
            Self::FillBlank => "fill_blank",
            Self::Ordering => "ordering",
            Self::Matching => "matching",
            Self::Categorize => "categorize",
            Self::Selector => "selector",
        }
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Content that cannot back a session. The caller shows a terminal
/// "could not load exercise" state instead of grading anything.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MalformedContent {
    #[error("content payload could not be parsed: {0}")]
    Payload(String),

    #[error("{kind} content has no {field}")]
    Empty {
        kind: ExerciseKind,
        field: &'static str,
    },

    #[error("question {question} has no options")]
    NoOptions { question: usize },

    #[error("question {question} has no correct option")]
    NoCorrectOption { question: usize },

    #[error("question {question} marks option {index} correct but only has {len} options")]
    CorrectOptionOutOfRange {
        question: usize,
        index: usize,
        len: usize,
    },

    #[error("sentence {sentence} has no blanks")]
    NoBlanks { sentence: usize },

    #[error("sentence {sentence} blank {blank} sits at offset {position} past the end of the text")]
    DanglingBlank {
        sentence: usize,
        blank: usize,
        position: usize,
    },

    #[error("sentence {sentence} blank {blank} has no accepted answers")]
    NoAcceptedAnswers { sentence: usize, blank: usize },

    #[error("sentence {sentence} blank {blank} accepts a blank answer at {answer}")]
    BlankAcceptedAnswer {
        sentence: usize,
        blank: usize,
        answer: usize,
    },

    #[error("ordering sentence {sentence} has no segments")]
    NoSegments { sentence: usize },

    #[error("pair {pair} has an empty left value")]
    EmptyLeft { pair: usize },

    #[error("pair {pair} repeats left value {left:?}")]
    DuplicateLeft { pair: usize, left: String },

    #[error("category {category} has an empty name")]
    EmptyCategoryName { category: usize },

    #[error("category name {0:?} is declared twice")]
    DuplicateCategory(String),

    #[error("item {item} references unknown category {category:?}")]
    UnknownCategory { item: usize, category: String },

    #[error("sentence {sentence} word index {word_index} is past the end of the text")]
    WordOutOfRange { sentence: usize, word_index: usize },

    #[error("selectable area {area} has an invalid size")]
    InvalidArea { area: usize },

    #[error("{kind} content has nothing to grade")]
    NoTargets { kind: ExerciseKind },

    #[error("the {variation} variation does not apply to {kind} content")]
    VariationMismatch {
        kind: ExerciseKind,
        variation: &'static str,
    },

    #[error("the {variation} variation needs `{field}`")]
    MissingVariationData {
        variation: &'static str,
        field: &'static str,
    },
}

//
// ─── CONTENT ───────────────────────────────────────────────────────────────────
//

/// One exercise payload, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExerciseContent {
    MultipleChoice(MultipleChoiceContent),
    FillBlank(FillBlankContent),
    Ordering(OrderingContent),
    Matching(MatchingContent),
    Categorize(CategorizeContent),
    Selector(SelectorContent),
}

impl ExerciseContent {
    /// Parse a JSON payload.
    ///
    /// Only the shape is checked here; call [`ExerciseContent::validate`]
    /// (or resolve a variation) before starting a session.
    ///
    /// # Errors
    ///
    /// Returns `MalformedContent::Payload` if the JSON does not describe a known kind.
    pub fn from_json(payload: &str) -> Result<Self, MalformedContent> {
        serde_json::from_str(payload).map_err(|e| MalformedContent::Payload(e.to_string()))
    }

    #[must_use]
    pub fn kind(&self) -> ExerciseKind {
        match self {
            Self::MultipleChoice(_) => ExerciseKind::MultipleChoice,
            Self::FillBlank(_) => ExerciseKind::FillBlank,
            Self::Ordering(_) => ExerciseKind::Ordering,
            Self::Matching(_) => ExerciseKind::Matching,
            Self::Categorize(_) => ExerciseKind::Categorize,
            Self::Selector(_) => ExerciseKind::Selector,
        }
    }

    /// Check the invariants every variation of this kind relies on.
    ///
    /// Variation-specific requirements (which categorize or selector fields
    /// are present) are checked by the resolver once a variation is chosen.
    ///
    /// # Errors
    ///
    /// Returns the first `MalformedContent` found.
    pub fn validate(&self) -> Result<(), MalformedContent> {
        match self {
            Self::MultipleChoice(c) => c.validate(),
            Self::FillBlank(c) => c.validate(),
            Self::Ordering(c) => c.validate(),
            Self::Matching(c) => c.validate(),
            Self::Categorize(c) => c.validate(),
            Self::Selector(c) => c.validate(),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tagged_payload() {
        let content = ExerciseContent::from_json(
            r#"{
                "kind": "multiple_choice",
                "questions": [
                    { "text": "2 + 2?", "options": ["3", "4"], "correctOptionIndices": [1] }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(content.kind(), ExerciseKind::MultipleChoice);
        assert!(content.validate().is_ok());
    }

    #[test]
    fn unknown_kind_is_malformed() {
        let err = ExerciseContent::from_json(r#"{ "kind": "crossword" }"#).unwrap_err();
        assert!(matches!(err, MalformedContent::Payload(_)));
    }

    #[test]
    fn empty_question_list_is_malformed() {
        let content =
            ExerciseContent::from_json(r#"{ "kind": "multiple_choice", "questions": [] }"#)
                .unwrap();
        assert_eq!(
            content.validate().unwrap_err(),
            MalformedContent::Empty {
                kind: ExerciseKind::MultipleChoice,
                field: "questions"
            }
        );
    }
}
