use serde::{Deserialize, Serialize};

use super::{ExerciseKind, MalformedContent};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillBlankContent {
    pub sentences: Vec<BlankSentence>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlankSentence {
    pub text: String,
    pub blanks: Vec<Blank>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blank {
    /// Character offset into the sentence text.
    pub position: usize,
    pub accepted_answers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// A run of display text or an input slot, in reading order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentencePart {
    Text(String),
    /// Index into `BlankSentence::blanks`.
    Blank(usize),
}

/// Normal form used to compare typed answers: trimmed and lowercased.
#[must_use]
pub fn normalize_answer(value: &str) -> String {
    value.trim().to_lowercase()
}

impl Blank {
    /// An empty typed value never matches.
    #[must_use]
    pub fn accepts(&self, value: &str) -> bool {
        let typed = normalize_answer(value);
        if typed.is_empty() {
            return false;
        }
        self.accepted_answers
            .iter()
            .any(|a| normalize_answer(a) == typed)
    }
}

impl BlankSentence {
    /// Split the text at each blank position.
    ///
    /// Blanks sharing a position keep their declared order.
    #[must_use]
    pub fn parts(&self) -> Vec<SentencePart> {
        let mut order: Vec<usize> = (0..self.blanks.len()).collect();
        order.sort_by_key(|&i| self.blanks[i].position);

        let chars: Vec<char> = self.text.chars().collect();
        let mut parts = Vec::with_capacity(order.len() * 2 + 1);
        let mut cursor = 0;
        for blank in order {
            let at = self.blanks[blank].position.min(chars.len());
            if at > cursor {
                parts.push(SentencePart::Text(chars[cursor..at].iter().collect()));
                cursor = at;
            }
            parts.push(SentencePart::Blank(blank));
        }
        if cursor < chars.len() {
            parts.push(SentencePart::Text(chars[cursor..].iter().collect()));
        }
        parts
    }
}

impl FillBlankContent {
    pub(crate) fn validate(&self) -> Result<(), MalformedContent> {
        if self.sentences.is_empty() {
            return Err(MalformedContent::Empty {
                kind: ExerciseKind::FillBlank,
                field: "sentences",
            });
        }

        for (sentence, s) in self.sentences.iter().enumerate() {
            if s.blanks.is_empty() {
                return Err(MalformedContent::NoBlanks { sentence });
            }
            let len = s.text.chars().count();
            for (blank, b) in s.blanks.iter().enumerate() {
                if b.position > len {
                    return Err(MalformedContent::DanglingBlank {
                        sentence,
                        blank,
                        position: b.position,
                    });
                }
                if b.accepted_answers.is_empty() {
                    return Err(MalformedContent::NoAcceptedAnswers { sentence, blank });
                }
                let whitespace = b.accepted_answers.iter().position(|a| a.trim().is_empty());
                if let Some(answer) = whitespace {
                    return Err(MalformedContent::BlankAcceptedAnswer {
                        sentence,
                        blank,
                        answer,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank(position: usize, answers: &[&str]) -> Blank {
        Blank {
            position,
            accepted_answers: answers.iter().map(ToString::to_string).collect(),
            hint: None,
        }
    }

    #[test]
    fn accepts_ignores_case_and_surrounding_space() {
        let b = blank(0, &["paris"]);
        assert!(b.accepts("  Paris "));
        assert!(!b.accepts("pariss"));
    }

    #[test]
    fn parts_split_on_char_offsets() {
        let sentence = BlankSentence {
            text: "Café  is open".into(),
            blanks: vec![blank(13, &["now"]), blank(5, &["au lait"])],
        };
        assert_eq!(
            sentence.parts(),
            vec![
                SentencePart::Text("Café ".into()),
                SentencePart::Blank(1),
                SentencePart::Text(" is open".into()),
                SentencePart::Blank(0),
            ]
        );
    }

    #[test]
    fn dangling_blank_is_malformed() {
        let content = FillBlankContent {
            sentences: vec![BlankSentence {
                text: "short".into(),
                blanks: vec![blank(6, &["x"])],
            }],
        };
        assert_eq!(
            content.validate().unwrap_err(),
            MalformedContent::DanglingBlank {
                sentence: 0,
                blank: 0,
                position: 6
            }
        );
    }

    #[test]
    fn blank_needs_a_non_empty_answer() {
        let content = FillBlankContent {
            sentences: vec![BlankSentence {
                text: "short".into(),
                blanks: vec![blank(0, &[])],
            }],
        };
        assert_eq!(
            content.validate().unwrap_err(),
            MalformedContent::NoAcceptedAnswers {
                sentence: 0,
                blank: 0
            }
        );
    }

    #[test]
    fn whitespace_accepted_answer_is_malformed() {
        let content = FillBlankContent {
            sentences: vec![BlankSentence {
                text: "short".into(),
                blanks: vec![blank(0, &["paris", " "])],
            }],
        };
        assert_eq!(
            content.validate().unwrap_err(),
            MalformedContent::BlankAcceptedAnswer {
                sentence: 0,
                blank: 0,
                answer: 1
            }
        );
    }

    #[test]
    fn empty_value_is_never_accepted() {
        let b = blank(0, &["paris", " "]);
        assert!(!b.accepts(""));
        assert!(!b.accepts("   "));
        assert!(b.accepts("Paris"));
    }
}
