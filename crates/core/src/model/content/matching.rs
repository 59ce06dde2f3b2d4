use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{ExerciseKind, MalformedContent};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingContent {
    pub pairs: Vec<Pair>,
    #[serde(default)]
    pub randomize: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_distractor_answers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pair {
    pub left: String,
    pub right: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// A column of a two-column matching exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSide {
    Left,
    Right,
}

impl MatchSide {
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

impl Pair {
    #[must_use]
    pub fn side(&self, side: MatchSide) -> &str {
        match side {
            MatchSide::Left => &self.left,
            MatchSide::Right => &self.right,
        }
    }
}

impl MatchingContent {
    /// Number of consecutive pair groups `(p[2i], p[2i+1])` where the first
    /// pair's right value is the second pair's left value.
    #[must_use]
    pub fn chain_count(&self) -> usize {
        self.pairs
            .chunks_exact(2)
            .filter(|group| group[0].right == group[1].left)
            .count()
    }

    /// Average character count of one column.
    #[must_use]
    pub fn average_len(&self, side: MatchSide) -> f64 {
        if self.pairs.is_empty() {
            return 0.0;
        }
        let total: usize = self.pairs.iter().map(|p| p.side(side).chars().count()).sum();
        #[allow(clippy::cast_precision_loss)]
        let avg = total as f64 / self.pairs.len() as f64;
        avg
    }

    /// The longest whitespace-delimited word count found on either side.
    #[must_use]
    pub fn max_word_count(&self) -> usize {
        self.pairs
            .iter()
            .flat_map(|p| [p.left.as_str(), p.right.as_str()])
            .map(|s| s.split_whitespace().count())
            .max()
            .unwrap_or(0)
    }

    /// Three-item rows encoded by consecutive pair groups:
    /// `[p[2i].left, p[2i].right, p[2i+1].right]`.
    ///
    /// A trailing odd pair does not form a row.
    #[must_use]
    pub fn threesome_rows(&self) -> Vec<[&str; 3]> {
        self.pairs
            .chunks_exact(2)
            .map(|g| [g[0].left.as_str(), g[0].right.as_str(), g[1].right.as_str()])
            .collect()
    }

    pub(crate) fn validate(&self) -> Result<(), MalformedContent> {
        if self.pairs.is_empty() {
            return Err(MalformedContent::Empty {
                kind: ExerciseKind::Matching,
                field: "pairs",
            });
        }

        let mut seen = HashSet::with_capacity(self.pairs.len());
        for (pair, p) in self.pairs.iter().enumerate() {
            if p.left.trim().is_empty() {
                return Err(MalformedContent::EmptyLeft { pair });
            }
            if !seen.insert(p.left.as_str()) {
                return Err(MalformedContent::DuplicateLeft {
                    pair,
                    left: p.left.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(pairs: &[(&str, &str)]) -> MatchingContent {
        MatchingContent {
            pairs: pairs
                .iter()
                .map(|(l, r)| Pair {
                    left: (*l).into(),
                    right: (*r).into(),
                    hint: None,
                })
                .collect(),
            randomize: false,
            extra_distractor_answers: Vec::new(),
        }
    }

    #[test]
    fn counts_chains_in_consecutive_groups() {
        let c = content(&[("A", "B"), ("B", "C"), ("D", "E"), ("X", "F"), ("G", "H")]);
        assert_eq!(c.chain_count(), 1);
        assert_eq!(c.threesome_rows(), vec![["A", "B", "C"], ["D", "E", "F"]]);
    }

    #[test]
    fn averages_and_word_counts() {
        let c = content(&[("ab", "one two three four"), ("abcd", "x")]);
        assert!((c.average_len(MatchSide::Left) - 3.0).abs() < f64::EPSILON);
        assert_eq!(c.max_word_count(), 4);
    }

    #[test]
    fn duplicate_left_is_malformed() {
        let c = content(&[("A", "1"), ("A", "2")]);
        assert_eq!(
            c.validate().unwrap_err(),
            MalformedContent::DuplicateLeft {
                pair: 1,
                left: "A".into()
            }
        );
    }

    #[test]
    fn empty_left_is_malformed() {
        let c = content(&[("A", "1"), (" ", "2")]);
        assert_eq!(
            c.validate().unwrap_err(),
            MalformedContent::EmptyLeft { pair: 1 }
        );
    }

    #[test]
    fn randomize_defaults_to_false() {
        let c: MatchingContent =
            serde_json::from_str(r#"{ "pairs": [{ "left": "a", "right": "b" }] }"#).unwrap();
        assert!(!c.randomize);
        assert!(c.extra_distractor_answers.is_empty());
    }
}
