use exercise_core::model::Verdict;
use serde::{Deserialize, Serialize};

use super::service::Phase;

/// One navigable unit as seen by a progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEntry {
    pub is_answered: bool,
    /// `None` until the attempt has been checked.
    pub is_correct: Option<bool>,
}

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    /// Every unit holds an answer.
    pub is_complete: bool,
}

impl ProgressSummary {
    #[must_use]
    pub fn from_entries(entries: &[ProgressEntry]) -> Self {
        let total = entries.len();
        let answered = entries.iter().filter(|e| e.is_answered).count();
        Self {
            total,
            answered,
            remaining: total - answered,
            is_complete: total > 0 && answered == total,
        }
    }
}

/// Pair per-unit answered flags with the verdict, if there is one.
pub(crate) fn entries(answered: &[bool], verdict: Option<&Verdict>) -> Vec<ProgressEntry> {
    answered
        .iter()
        .enumerate()
        .map(|(i, &is_answered)| ProgressEntry {
            is_answered,
            is_correct: verdict.map(|v| v.item(i).unwrap_or(false)),
        })
        .collect()
}

/// Free navigation to any unit is only offered once the attempt is checked.
#[must_use]
pub fn can_jump(phase: Phase) -> bool {
    phase == Phase::Checked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correctness_is_hidden_until_checked() {
        let before = entries(&[true, false], None);
        assert!(before.iter().all(|e| e.is_correct.is_none()));

        let verdict = Verdict::from_items(vec![true, false]);
        let after = entries(&[true, false], Some(&verdict));
        assert_eq!(after[0].is_correct, Some(true));
        assert_eq!(after[1].is_correct, Some(false));
    }

    #[test]
    fn summary_counts_answered_units() {
        let summary = ProgressSummary::from_entries(&entries(&[true, false, true], None));
        assert_eq!(
            summary,
            ProgressSummary {
                total: 3,
                answered: 2,
                remaining: 1,
                is_complete: false,
            }
        );
        assert!(ProgressSummary::from_entries(&entries(&[true], None)).is_complete);
        assert!(!ProgressSummary::from_entries(&[]).is_complete);
    }

    #[test]
    fn jumping_needs_a_checked_attempt() {
        assert!(!can_jump(Phase::NotStarted));
        assert!(!can_jump(Phase::InProgress));
        assert!(can_jump(Phase::Checked));
    }
}
