use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{ExerciseKind, MalformedContent};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultipleChoiceContent {
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub text: String,
    pub options: Vec<String>,
    pub correct_option_indices: BTreeSet<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Question {
    /// Multi-answer questions toggle selections instead of replacing them.
    #[must_use]
    pub fn is_multi_answer(&self) -> bool {
        self.correct_option_indices.len() > 1
    }
}

impl MultipleChoiceContent {
    pub(crate) fn validate(&self) -> Result<(), MalformedContent> {
        if self.questions.is_empty() {
            return Err(MalformedContent::Empty {
                kind: ExerciseKind::MultipleChoice,
                field: "questions",
            });
        }

        for (question, q) in self.questions.iter().enumerate() {
            if q.options.is_empty() {
                return Err(MalformedContent::NoOptions { question });
            }
            if q.correct_option_indices.is_empty() {
                return Err(MalformedContent::NoCorrectOption { question });
            }
            if let Some(&index) = q
                .correct_option_indices
                .iter()
                .find(|&&i| i >= q.options.len())
            {
                return Err(MalformedContent::CorrectOptionOutOfRange {
                    question,
                    index,
                    len: q.options.len(),
                });
            }
        }
        Ok(())
    }
}
