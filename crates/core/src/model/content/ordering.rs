use serde::{Deserialize, Serialize};

use super::{ExerciseKind, MalformedContent};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderingContent {
    pub sentences: Vec<OrderingSentence>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderingSentence {
    /// Segments in their canonical order.
    pub segments: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl OrderingSentence {
    /// Segments as displayed for the given arrangement of segment indices:
    /// the first one capitalized, the rest lowercased.
    ///
    /// Out-of-range indices are skipped.
    #[must_use]
    pub fn display(&self, order: &[usize]) -> Vec<String> {
        order
            .iter()
            .filter_map(|&i| self.segments.get(i))
            .enumerate()
            .map(|(pos, s)| {
                if pos == 0 {
                    capitalize(s)
                } else {
                    s.to_lowercase()
                }
            })
            .collect()
    }

    /// The canonical sentence with display casing applied.
    #[must_use]
    pub fn canonical_display(&self) -> Vec<String> {
        let order: Vec<usize> = (0..self.segments.len()).collect();
        self.display(&order)
    }
}

fn capitalize(s: &str) -> String {
    let lower = s.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl OrderingContent {
    pub(crate) fn validate(&self) -> Result<(), MalformedContent> {
        if self.sentences.is_empty() {
            return Err(MalformedContent::Empty {
                kind: ExerciseKind::Ordering,
                field: "sentences",
            });
        }
        for (sentence, s) in self.sentences.iter().enumerate() {
            if s.segments.is_empty() {
                return Err(MalformedContent::NoSegments { sentence });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence(words: &[&str]) -> OrderingSentence {
        OrderingSentence {
            segments: words.iter().map(ToString::to_string).collect(),
            hint: None,
        }
    }

    #[test]
    fn display_capitalizes_first_and_lowercases_rest() {
        let s = sentence(&["The", "Cat", "sat"]);
        assert_eq!(s.display(&[1, 0, 2]), vec!["Cat", "the", "sat"]);
        assert_eq!(s.canonical_display(), vec!["The", "cat", "sat"]);
    }

    #[test]
    fn empty_sentence_is_malformed() {
        let content = OrderingContent {
            sentences: vec![sentence(&["a"]), sentence(&[])],
        };
        assert_eq!(
            content.validate().unwrap_err(),
            MalformedContent::NoSegments { sentence: 1 }
        );
    }
}
