use crate::model::content::{
    CategorizeVariant, ExerciseContent, MalformedContent, MatchSide, MatchingContent,
    SelectorContent,
};
use crate::model::{ResolverSettings, Variation};

//
// ─── RESOLVER ──────────────────────────────────────────────────────────────────
//

/// Picks the interaction variation for a content payload.
///
/// An explicit tag recognized for the content's kind always wins. Otherwise
/// the variation is classified from the content itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver {
    settings: ResolverSettings,
}

impl Resolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_settings(settings: ResolverSettings) -> Self {
        Self { settings }
    }

    #[must_use]
    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    /// Validate `content` and pick its variation.
    ///
    /// Unrecognized explicit tags are ignored and the content is classified
    /// as if no tag had been given.
    ///
    /// # Errors
    ///
    /// Returns `MalformedContent` if the content breaks a kind invariant, or if
    /// the chosen variation needs fields the content does not carry.
    pub fn resolve(
        &self,
        content: &ExerciseContent,
        explicit: Option<&str>,
    ) -> Result<Variation, MalformedContent> {
        content.validate()?;

        let tagged = explicit.and_then(|tag| {
            let found = self.from_tag(content, tag);
            if found.is_none() {
                tracing::debug!(kind = %content.kind(), tag, "ignoring unrecognized variation tag");
            }
            found
        });
        let variation = match tagged {
            Some(v) => v,
            None => self.classify(content),
        };

        require_variation_data(content, variation)?;
        tracing::debug!(%variation, explicit = tagged.is_some(), "resolved variation");
        Ok(variation)
    }

    fn from_tag(&self, content: &ExerciseContent, tag: &str) -> Option<Variation> {
        let tag = tag.trim().to_ascii_lowercase().replace('-', "_");
        match content {
            ExerciseContent::MultipleChoice(_) => {
                is_default_tag(&tag, "multiple_choice").then_some(Variation::MultipleChoice)
            }
            ExerciseContent::FillBlank(_) => {
                is_default_tag(&tag, "fill_blank").then_some(Variation::FillBlank)
            }
            ExerciseContent::Ordering(_) => {
                is_default_tag(&tag, "ordering").then_some(Variation::Ordering)
            }
            ExerciseContent::Matching(m) => match tag.as_str() {
                "threesome" => Some(Variation::Threesome),
                "side_by_side" => Some(Variation::SideBySide),
                "question_based" => Some(Variation::QuestionBased {
                    question_side: question_side(m),
                }),
                _ => None,
            },
            ExerciseContent::Categorize(_) => {
                CategorizeVariant::from_tag(&tag).map(Variation::Categorize)
            }
            ExerciseContent::Selector(_) => match tag.as_str() {
                "text" | "on_text" => Some(Variation::SelectorText),
                "image" => Some(Variation::SelectorImage),
                _ => None,
            },
        }
    }

    /// Classify content that declares no (recognized) variation.
    #[must_use]
    pub fn classify(&self, content: &ExerciseContent) -> Variation {
        match content {
            ExerciseContent::MultipleChoice(_) => Variation::MultipleChoice,
            ExerciseContent::FillBlank(_) => Variation::FillBlank,
            ExerciseContent::Ordering(_) => Variation::Ordering,
            ExerciseContent::Matching(m) => self.classify_matching(m),
            ExerciseContent::Categorize(c) => Variation::Categorize(c.declared_variant()),
            ExerciseContent::Selector(s) => classify_selector(s),
        }
    }

    /// Matching is a threesome when chain groups are dense enough; otherwise
    /// long or multi-word items switch to the question-based layout.
    #[must_use]
    pub fn classify_matching(&self, content: &MatchingContent) -> Variation {
        if self.is_threesome(content) {
            return Variation::Threesome;
        }

        let avg_left = content.average_len(MatchSide::Left);
        let avg_right = content.average_len(MatchSide::Right);
        let multi_word = content.max_word_count() > self.settings.multi_word_threshold();
        let wide_gap = (avg_left - avg_right).abs() > self.settings.length_gap();
        let long_items = avg_left.max(avg_right) > self.settings.max_average_length();

        if multi_word || wide_gap || long_items {
            Variation::QuestionBased {
                question_side: question_side(content),
            }
        } else {
            Variation::SideBySide
        }
    }

    #[must_use]
    pub fn is_threesome(&self, content: &MatchingContent) -> bool {
        let chains = content.chain_count();
        #[allow(clippy::cast_precision_loss)]
        let dense = (chains * 2) as f64
            >= content.pairs.len() as f64 * self.settings.threesome_density();
        chains > 0 && dense
    }
}

/// Resolve with the default thresholds.
///
/// # Errors
///
/// See [`Resolver::resolve`].
pub fn resolve_variation(
    content: &ExerciseContent,
    explicit: Option<&str>,
) -> Result<Variation, MalformedContent> {
    Resolver::default().resolve(content, explicit)
}

fn is_default_tag(tag: &str, kind: &str) -> bool {
    tag == "default" || tag == kind
}

/// The longer column (on average) becomes the question; left wins ties.
fn question_side(content: &MatchingContent) -> MatchSide {
    if content.average_len(MatchSide::Right) > content.average_len(MatchSide::Left) {
        MatchSide::Right
    } else {
        MatchSide::Left
    }
}

fn classify_selector(content: &SelectorContent) -> Variation {
    if content.image.is_some() {
        Variation::SelectorImage
    } else {
        Variation::SelectorText
    }
}

fn require_variation_data(
    content: &ExerciseContent,
    variation: Variation,
) -> Result<(), MalformedContent> {
    match (content, variation) {
        (ExerciseContent::Matching(m), Variation::Threesome) if m.threesome_rows().is_empty() => {
            Err(MalformedContent::MissingVariationData {
                variation: "threesome",
                field: "pairs",
            })
        }
        (ExerciseContent::Categorize(c), Variation::Categorize(v)) => c.plan(v).map(|_| ()),
        (ExerciseContent::Selector(s), Variation::SelectorText) => {
            if s.sentences.is_empty() {
                return Err(MalformedContent::MissingVariationData {
                    variation: "text",
                    field: "sentences",
                });
            }
            s.validate_words()
        }
        (ExerciseContent::Selector(s), Variation::SelectorImage) => s.validate_areas(),
        _ => Ok(()),
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::content::{
        CategorizeContent, Category, MultipleChoiceContent, Pair, SelectableArea, SelectorImage,
    };

    fn matching(pairs: &[(&str, &str)]) -> ExerciseContent {
        ExerciseContent::Matching(MatchingContent {
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
        })
    }

    #[test]
    fn chained_pairs_resolve_to_threesome() {
        let content = matching(&[
            ("A", "B"),
            ("B", "C"),
            ("D", "E"),
            ("E", "F"),
            ("G", "H"),
            ("H", "I"),
        ]);
        assert_eq!(
            resolve_variation(&content, None).unwrap(),
            Variation::Threesome
        );
    }

    #[test]
    fn unrelated_pairs_resolve_to_two_column_layout() {
        let content = matching(&[
            ("dog", "chien"),
            ("cat", "chat"),
            ("bird", "oiseau"),
            ("fish", "poisson"),
            ("horse", "cheval"),
            ("cow", "vache"),
        ]);
        assert_eq!(
            resolve_variation(&content, None).unwrap(),
            Variation::SideBySide
        );
    }

    #[test]
    fn sparse_chains_do_not_make_a_threesome() {
        // One chain group covers 2 of 8 pairs: 2 < 8 * 0.5.
        let content = matching(&[
            ("A", "B"),
            ("B", "C"),
            ("d", "1"),
            ("e", "2"),
            ("f", "3"),
            ("g", "4"),
            ("h", "5"),
            ("i", "6"),
        ]);
        assert_eq!(
            resolve_variation(&content, None).unwrap(),
            Variation::SideBySide
        );
    }

    #[test]
    fn multi_word_items_use_question_layout_on_longer_side() {
        let content = matching(&[
            ("run", "to move swiftly on foot"),
            ("eat", "to put food in the mouth"),
        ]);
        assert_eq!(
            resolve_variation(&content, None).unwrap(),
            Variation::QuestionBased {
                question_side: MatchSide::Right
            }
        );
    }

    #[test]
    fn long_averages_use_question_layout() {
        let long = "x".repeat(81);
        let content = matching(&[(long.as_str(), "y".repeat(60).as_str())]);
        assert_eq!(
            resolve_variation(&content, None).unwrap(),
            Variation::QuestionBased {
                question_side: MatchSide::Left
            }
        );

        let wide = "z".repeat(45);
        let content = matching(&[("a", wide.as_str())]);
        assert_eq!(
            resolve_variation(&content, None).unwrap(),
            Variation::QuestionBased {
                question_side: MatchSide::Right
            }
        );
    }

    #[test]
    fn explicit_tag_wins_over_heuristic() {
        let content = matching(&[("A", "B"), ("B", "C")]);
        assert_eq!(
            resolve_variation(&content, Some("Side-By-Side")).unwrap(),
            Variation::SideBySide
        );
        assert_eq!(
            resolve_variation(&content, Some("wobbly")).unwrap(),
            Variation::Threesome
        );
    }

    #[test]
    fn explicit_threesome_needs_two_pairs() {
        let content = matching(&[("A", "B")]);
        assert!(matches!(
            resolve_variation(&content, Some("threesome")),
            Err(MalformedContent::MissingVariationData { .. })
        ));
    }

    #[test]
    fn categorize_uses_declared_variation() {
        let content = ExerciseContent::Categorize(CategorizeContent {
            prefilled_categories: vec![Category {
                name: "Fruit".into(),
                items: vec!["apple".into()],
                hint: None,
            }],
            variation: Some("ordering".into()),
            ..CategorizeContent::default()
        });
        assert_eq!(
            resolve_variation(&content, None).unwrap(),
            Variation::Categorize(CategorizeVariant::Ordering)
        );
        assert!(resolve_variation(&content, Some("lake")).is_err());
    }

    #[test]
    fn selector_dispatches_on_image() {
        let content = ExerciseContent::Selector(SelectorContent {
            sentences: Vec::new(),
            image: Some(SelectorImage {
                url: "map.png".into(),
                selectable_areas: vec![SelectableArea {
                    x: 1.0,
                    y: 1.0,
                    width: 4.0,
                    height: 4.0,
                    is_target: true,
                    label: None,
                }],
            }),
        });
        assert_eq!(
            resolve_variation(&content, None).unwrap(),
            Variation::SelectorImage
        );
        assert!(resolve_variation(&content, Some("text")).is_err());
    }

    #[test]
    fn malformed_content_is_refused() {
        let content = ExerciseContent::MultipleChoice(MultipleChoiceContent {
            questions: Vec::new(),
        });
        assert!(resolve_variation(&content, None).is_err());
    }

    #[test]
    fn custom_settings_change_classification() {
        let settings = ResolverSettings::new(0.5, 1, 40.0, 80.0).unwrap();
        let content = match matching(&[("ice cream", "glace"), ("dog", "chien")]) {
            ExerciseContent::Matching(m) => m,
            _ => unreachable!(),
        };
        assert_eq!(
            Resolver::with_settings(settings).classify_matching(&content),
            Variation::QuestionBased {
                question_side: MatchSide::Left
            }
        );
        assert_eq!(
            Resolver::new().classify_matching(&content),
            Variation::SideBySide
        );
    }
}
