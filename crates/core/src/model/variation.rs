use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::content::{CategorizeVariant, ExerciseKind, MatchSide};

/// Interaction strategy used to present one exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variation {
    MultipleChoice,
    FillBlank,
    Ordering,
    /// Both matching columns shown at once, linked by clicking.
    SideBySide,
    /// One matching column paged as questions, the other as a word bank.
    QuestionBased { question_side: MatchSide },
    /// Matching pairs grouped into three-column chains.
    Threesome,
    Categorize(CategorizeVariant),
    SelectorText,
    SelectorImage,
}

impl Variation {
    #[must_use]
    pub fn kind(&self) -> ExerciseKind {
        match self {
            Self::MultipleChoice => ExerciseKind::MultipleChoice,
            Self::FillBlank => ExerciseKind::FillBlank,
            Self::Ordering => ExerciseKind::Ordering,
            Self::SideBySide | Self::QuestionBased { .. } | Self::Threesome => {
                ExerciseKind::Matching
            }
            Self::Categorize(_) => ExerciseKind::Categorize,
            Self::SelectorText | Self::SelectorImage => ExerciseKind::Selector,
        }
    }

    /// Tag a host would pass to request this variation explicitly.
    #[must_use]
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::MultipleChoice | Self::FillBlank | Self::Ordering => "default",
            Self::SideBySide => "side_by_side",
            Self::QuestionBased { .. } => "question_based",
            Self::Threesome => "threesome",
            Self::Categorize(v) => v.as_str(),
            Self::SelectorText => "text",
            Self::SelectorImage => "image",
        }
    }
}

impl fmt::Display for Variation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind(), self.as_tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_combines_kind_and_tag() {
        assert_eq!(Variation::Threesome.to_string(), "matching:threesome");
        assert_eq!(
            Variation::Categorize(CategorizeVariant::Lake).to_string(),
            "categorize:lake"
        );
        assert_eq!(Variation::FillBlank.to_string(), "fill_blank:default");
    }
}
