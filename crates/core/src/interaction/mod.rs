//! Per-kind learner state and the mutations that build it up.
//!
//! Every mutation validates its arguments against the content and returns
//! `false`, leaving the state untouched, when they are out of range. Phase
//! gating (no mutation after a check) is the session's job.

mod choice;
mod matching;
mod ordering;
mod selection;
mod sorting;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::model::content::{ExerciseContent, MalformedContent};
use crate::model::Variation;

pub use choice::{BlankState, ChoiceState};
pub use matching::{AnswerChip, QuestionBankState, SideBySideState, ThreesomeState, Triple};
pub use ordering::OrderingState;
pub use selection::SelectionState;
pub use sorting::SortingState;

/// Learner state for one attempt, shaped by the resolved variation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "variation", rename_all = "snake_case")]
pub enum Interaction {
    MultipleChoice(ChoiceState),
    FillBlank(BlankState),
    Ordering(OrderingState),
    SideBySide(SideBySideState),
    QuestionBased(QuestionBankState),
    Threesome(ThreesomeState),
    Categorize(SortingState),
    Selector(SelectionState),
}

impl Interaction {
    /// Build fresh state for `variation`, performing the attempt's shuffle pass.
    ///
    /// `randomize` overrides the content's own flag where one exists
    /// (matching), and otherwise controls shuffling of pools and word banks.
    /// Ordering segments are always shuffled.
    ///
    /// # Errors
    ///
    /// Returns `MalformedContent` if the variation does not belong to the
    /// content's kind or the content lacks what the variation needs.
    pub fn new<R: Rng + ?Sized>(
        content: &ExerciseContent,
        variation: Variation,
        randomize: Option<bool>,
        rng: &mut R,
    ) -> Result<Self, MalformedContent> {
        let mismatch = || MalformedContent::VariationMismatch {
            kind: content.kind(),
            variation: variation.as_tag(),
        };

        let state = match (content, variation) {
            (ExerciseContent::MultipleChoice(c), Variation::MultipleChoice) => {
                Self::MultipleChoice(ChoiceState::new(c))
            }
            (ExerciseContent::FillBlank(c), Variation::FillBlank) => {
                Self::FillBlank(BlankState::new(c))
            }
            (ExerciseContent::Ordering(c), Variation::Ordering) => {
                Self::Ordering(OrderingState::new(c, rng))
            }
            (ExerciseContent::Matching(c), Variation::SideBySide) => {
                let randomize = randomize.unwrap_or(c.randomize);
                Self::SideBySide(SideBySideState::new(c, randomize, rng))
            }
            (ExerciseContent::Matching(c), Variation::QuestionBased { question_side }) => {
                let randomize = randomize.unwrap_or(c.randomize);
                Self::QuestionBased(QuestionBankState::new(c, question_side, randomize, rng))
            }
            (ExerciseContent::Matching(c), Variation::Threesome) => {
                let randomize = randomize.unwrap_or(c.randomize);
                Self::Threesome(ThreesomeState::new(c, randomize, rng))
            }
            (ExerciseContent::Categorize(c), Variation::Categorize(variant)) => {
                let plan = c.plan(variant)?;
                Self::Categorize(SortingState::new(
                    plan,
                    variant,
                    randomize.unwrap_or(true),
                    rng,
                ))
            }
            (ExerciseContent::Selector(c), Variation::SelectorText) => {
                Self::Selector(SelectionState::new(&c.word_targets(), c.sentences.len()))
            }
            (ExerciseContent::Selector(c), Variation::SelectorImage) => {
                Self::Selector(SelectionState::new(&c.area_targets(), 1))
            }
            _ => return Err(mismatch()),
        };
        Ok(state)
    }

    /// Number of navigable units (questions, sentences, pairs, rows, categories).
    #[must_use]
    pub fn unit_count(&self) -> usize {
        match self {
            Self::MultipleChoice(s) => s.question_count(),
            Self::FillBlank(s) => s.sentence_count(),
            Self::Ordering(s) => s.sentence_count(),
            Self::SideBySide(s) => s.pair_count(),
            Self::QuestionBased(s) => s.question_count(),
            Self::Threesome(s) => s.row_count(),
            Self::Categorize(s) => s.plan().categories.len(),
            Self::Selector(s) => s.group_count(),
        }
    }

    /// Whether each unit holds an answer, in unit order.
    #[must_use]
    pub fn answered_units(&self) -> Vec<bool> {
        match self {
            Self::MultipleChoice(s) => s.answered(),
            Self::FillBlank(s) => s.answered(),
            Self::Ordering(s) => s.answered(),
            Self::SideBySide(s) => s.answered(),
            Self::QuestionBased(s) => s.answered(),
            Self::Threesome(s) => s.answered(),
            Self::Categorize(s) => s.answered(),
            Self::Selector(s) => s.answered(),
        }
    }

    /// True when no unit holds an answer.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        !self.answered_units().iter().any(|a| *a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::content::{MultipleChoiceContent, OrderingContent, Question};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn mismatched_variation_is_refused() {
        let content = ExerciseContent::Ordering(OrderingContent {
            sentences: Vec::new(),
        });
        let err = Interaction::new(
            &content,
            Variation::SideBySide,
            None,
            &mut StdRng::seed_from_u64(0),
        )
        .unwrap_err();
        assert!(matches!(err, MalformedContent::VariationMismatch { .. }));
    }

    #[test]
    fn fresh_state_is_blank() {
        let content = ExerciseContent::MultipleChoice(MultipleChoiceContent {
            questions: vec![Question {
                text: "?".into(),
                options: vec!["a".into(), "b".into()],
                correct_option_indices: [0].into(),
                hint: None,
                explanation: None,
            }],
        });
        let state = Interaction::new(
            &content,
            Variation::MultipleChoice,
            None,
            &mut StdRng::seed_from_u64(0),
        )
        .unwrap();
        assert_eq!(state.unit_count(), 1);
        assert!(state.is_blank());
    }
}
