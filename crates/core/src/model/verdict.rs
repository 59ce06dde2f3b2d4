use serde::{Deserialize, Serialize};

/// Correctness result computed once per check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    overall_correct: bool,
    per_item_correct: Vec<bool>,
}

impl Verdict {
    #[must_use]
    pub fn new(overall_correct: bool, per_item_correct: Vec<bool>) -> Self {
        Self {
            overall_correct,
            per_item_correct,
        }
    }

    /// Overall correctness is the conjunction of the items; no items is incorrect.
    #[must_use]
    pub fn from_items(per_item_correct: Vec<bool>) -> Self {
        let overall_correct = !per_item_correct.is_empty() && per_item_correct.iter().all(|c| *c);
        Self::new(overall_correct, per_item_correct)
    }

    #[must_use]
    pub fn overall_correct(&self) -> bool {
        self.overall_correct
    }

    #[must_use]
    pub fn per_item_correct(&self) -> &[bool] {
        &self.per_item_correct
    }

    #[must_use]
    pub fn item(&self, index: usize) -> Option<bool> {
        self.per_item_correct.get(index).copied()
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.per_item_correct.iter().filter(|c| **c).count()
    }
}
