use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::model::content::{FillBlankContent, MultipleChoiceContent};

//
// ─── MULTIPLE CHOICE ───────────────────────────────────────────────────────────
//

/// Selected option indices, one set per question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceState {
    selected: Vec<BTreeSet<usize>>,
}

impl ChoiceState {
    #[must_use]
    pub fn new(content: &MultipleChoiceContent) -> Self {
        Self {
            selected: vec![BTreeSet::new(); content.questions.len()],
        }
    }

    /// Single-answer questions replace the selection; multi-answer questions
    /// toggle the option.
    pub fn select_option(
        &mut self,
        content: &MultipleChoiceContent,
        question: usize,
        option: usize,
    ) -> bool {
        let (Some(q), Some(set)) = (content.questions.get(question), self.selected.get_mut(question))
        else {
            return false;
        };
        if option >= q.options.len() {
            return false;
        }

        if q.is_multi_answer() {
            if !set.remove(&option) {
                set.insert(option);
            }
        } else {
            set.clear();
            set.insert(option);
        }
        true
    }

    #[must_use]
    pub fn selected(&self, question: usize) -> Option<&BTreeSet<usize>> {
        self.selected.get(question)
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.selected.len()
    }

    pub(crate) fn answered(&self) -> Vec<bool> {
        self.selected.iter().map(|s| !s.is_empty()).collect()
    }
}

//
// ─── FILL BLANK ────────────────────────────────────────────────────────────────
//

/// Typed values, indexed by sentence then blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlankState {
    values: Vec<Vec<String>>,
}

impl BlankState {
    #[must_use]
    pub fn new(content: &FillBlankContent) -> Self {
        Self {
            values: content
                .sentences
                .iter()
                .map(|s| vec![String::new(); s.blanks.len()])
                .collect(),
        }
    }

    /// Overwrite the value typed into one blank.
    pub fn set_blank_value(&mut self, sentence: usize, blank: usize, value: impl Into<String>) -> bool {
        match self
            .values
            .get_mut(sentence)
            .and_then(|blanks| blanks.get_mut(blank))
        {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn value(&self, sentence: usize, blank: usize) -> Option<&str> {
        self.values.get(sentence)?.get(blank).map(String::as_str)
    }

    #[must_use]
    pub fn sentence_count(&self) -> usize {
        self.values.len()
    }

    pub(crate) fn answered(&self) -> Vec<bool> {
        self.values
            .iter()
            .map(|blanks| blanks.iter().all(|v| !v.trim().is_empty()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::content::{Blank, BlankSentence, Question};

    fn choice_content() -> MultipleChoiceContent {
        MultipleChoiceContent {
            questions: vec![
                Question {
                    text: "single".into(),
                    options: vec!["a".into(), "b".into(), "c".into()],
                    correct_option_indices: [1].into(),
                    hint: None,
                    explanation: None,
                },
                Question {
                    text: "multi".into(),
                    options: vec!["a".into(), "b".into(), "c".into()],
                    correct_option_indices: [0, 2].into(),
                    hint: None,
                    explanation: None,
                },
            ],
        }
    }

    #[test]
    fn single_answer_replaces_selection() {
        let content = choice_content();
        let mut state = ChoiceState::new(&content);
        assert!(state.select_option(&content, 0, 0));
        assert!(state.select_option(&content, 0, 2));
        assert_eq!(state.selected(0).unwrap(), &BTreeSet::from([2]));
    }

    #[test]
    fn multi_answer_toggles_membership() {
        let content = choice_content();
        let mut state = ChoiceState::new(&content);
        state.select_option(&content, 1, 0);
        state.select_option(&content, 1, 2);
        state.select_option(&content, 1, 0);
        assert_eq!(state.selected(1).unwrap(), &BTreeSet::from([2]));
    }

    #[test]
    fn out_of_range_selection_is_ignored() {
        let content = choice_content();
        let mut state = ChoiceState::new(&content);
        assert!(!state.select_option(&content, 0, 3));
        assert!(!state.select_option(&content, 2, 0));
        assert_eq!(state.answered(), vec![false, false]);
    }

    #[test]
    fn blank_values_overwrite_and_count_as_answered() {
        let content = FillBlankContent {
            sentences: vec![BlankSentence {
                text: "The capital is .".into(),
                blanks: vec![Blank {
                    position: 15,
                    accepted_answers: vec!["Paris".into()],
                    hint: None,
                }],
            }],
        };
        let mut state = BlankState::new(&content);
        assert_eq!(state.answered(), vec![false]);

        assert!(state.set_blank_value(0, 0, "Lyon"));
        assert!(state.set_blank_value(0, 0, "Paris"));
        assert!(!state.set_blank_value(0, 1, "extra"));
        assert_eq!(state.value(0, 0), Some("Paris"));
        assert_eq!(state.answered(), vec![true]);

        state.set_blank_value(0, 0, "   ");
        assert_eq!(state.answered(), vec![false]);
    }
}
