use serde::{Deserialize, Serialize};

use super::{ExerciseKind, MalformedContent};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectorContent {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sentences: Vec<SelectorSentence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<SelectorImage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectorSentence {
    pub text: String,
    pub selectable_words: Vec<SelectableWord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectableWord {
    /// Index into the whitespace-split words of the sentence.
    pub word_index: usize,
    #[serde(default)]
    pub is_target: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectorImage {
    pub url: String,
    pub selectable_areas: Vec<SelectableArea>,
}

/// Rectangle on the image, in the image's own coordinate space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectableArea {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub is_target: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Something the learner can click, with a stable id.
///
/// Word ids number selectable words across all sentences in order; area ids
/// are the area's index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectableTarget {
    pub id: usize,
    /// Sentence the word belongs to; always 0 for image areas.
    pub group: usize,
    pub label: String,
    pub is_target: bool,
}

impl SelectorContent {
    /// Selectable words of the on-text variant, in reading order.
    #[must_use]
    pub fn word_targets(&self) -> Vec<SelectableTarget> {
        let mut out = Vec::new();
        for (group, sentence) in self.sentences.iter().enumerate() {
            let words: Vec<&str> = sentence.text.split_whitespace().collect();
            for word in &sentence.selectable_words {
                out.push(SelectableTarget {
                    id: out.len(),
                    group,
                    label: words
                        .get(word.word_index)
                        .map(|w| (*w).to_owned())
                        .unwrap_or_default(),
                    is_target: word.is_target,
                });
            }
        }
        out
    }

    /// Selectable areas of the image variant.
    #[must_use]
    pub fn area_targets(&self) -> Vec<SelectableTarget> {
        self.image
            .iter()
            .flat_map(|image| image.selectable_areas.iter())
            .enumerate()
            .map(|(id, area)| SelectableTarget {
                id,
                group: 0,
                label: area.label.clone().unwrap_or_default(),
                is_target: area.is_target,
            })
            .collect()
    }

    pub(crate) fn validate_words(&self) -> Result<(), MalformedContent> {
        for (sentence, s) in self.sentences.iter().enumerate() {
            let len = s.text.split_whitespace().count();
            if let Some(word) = s.selectable_words.iter().find(|w| w.word_index >= len) {
                return Err(MalformedContent::WordOutOfRange {
                    sentence,
                    word_index: word.word_index,
                });
            }
        }
        Self::require_targets(&self.word_targets())
    }

    pub(crate) fn validate_areas(&self) -> Result<(), MalformedContent> {
        let image = self
            .image
            .as_ref()
            .ok_or(MalformedContent::MissingVariationData {
                variation: "image",
                field: "image",
            })?;
        if image.url.trim().is_empty() {
            return Err(MalformedContent::MissingVariationData {
                variation: "image",
                field: "image.url",
            });
        }
        for (area, a) in image.selectable_areas.iter().enumerate() {
            let finite = [a.x, a.y, a.width, a.height].iter().all(|v| v.is_finite());
            if !finite || a.width <= 0.0 || a.height <= 0.0 {
                return Err(MalformedContent::InvalidArea { area });
            }
        }
        Self::require_targets(&self.area_targets())
    }

    fn require_targets(targets: &[SelectableTarget]) -> Result<(), MalformedContent> {
        if targets.is_empty() {
            return Err(MalformedContent::NoTargets {
                kind: ExerciseKind::Selector,
            });
        }
        Ok(())
    }

    pub(crate) fn validate(&self) -> Result<(), MalformedContent> {
        match (&self.image, self.sentences.is_empty()) {
            (Some(_), _) => self.validate_areas(),
            (None, false) => self.validate_words(),
            (None, true) => Err(MalformedContent::Empty {
                kind: ExerciseKind::Selector,
                field: "sentences",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(width: f64, is_target: bool) -> SelectableArea {
        SelectableArea {
            x: 0.0,
            y: 0.0,
            width,
            height: 10.0,
            is_target,
            label: Some("roof".into()),
        }
    }

    #[test]
    fn word_targets_number_across_sentences() {
        let content = SelectorContent {
            sentences: vec![
                SelectorSentence {
                    text: "the quick fox".into(),
                    selectable_words: vec![
                        SelectableWord {
                            word_index: 1,
                            is_target: true,
                        },
                        SelectableWord {
                            word_index: 2,
                            is_target: false,
                        },
                    ],
                },
                SelectorSentence {
                    text: "runs away".into(),
                    selectable_words: vec![SelectableWord {
                        word_index: 0,
                        is_target: true,
                    }],
                },
            ],
            image: None,
        };

        let targets = content.word_targets();
        assert_eq!(targets.len(), 3);
        assert_eq!(targets[1].label, "fox");
        assert_eq!(targets[2].id, 2);
        assert_eq!(targets[2].group, 1);
        assert_eq!(targets[2].label, "runs");
        assert!(content.validate().is_ok());
    }

    #[test]
    fn word_index_past_text_is_malformed() {
        let content = SelectorContent {
            sentences: vec![SelectorSentence {
                text: "two words".into(),
                selectable_words: vec![SelectableWord {
                    word_index: 2,
                    is_target: true,
                }],
            }],
            image: None,
        };
        assert_eq!(
            content.validate().unwrap_err(),
            MalformedContent::WordOutOfRange {
                sentence: 0,
                word_index: 2
            }
        );
    }

    #[test]
    fn image_takes_precedence_and_checks_areas() {
        let content = SelectorContent {
            sentences: Vec::new(),
            image: Some(SelectorImage {
                url: "house.png".into(),
                selectable_areas: vec![area(5.0, true), area(0.0, false)],
            }),
        };
        assert_eq!(
            content.validate().unwrap_err(),
            MalformedContent::InvalidArea { area: 1 }
        );
    }

    #[test]
    fn empty_selector_is_malformed() {
        assert!(matches!(
            SelectorContent::default().validate(),
            Err(MalformedContent::Empty { .. })
        ));
    }
}
