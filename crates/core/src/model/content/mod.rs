pub mod blank;
pub mod categorize;
pub mod choice;
pub mod exercise;
pub mod matching;
pub mod ordering;
pub mod selector;

pub use blank::{Blank, BlankSentence, FillBlankContent, SentencePart, normalize_answer};
pub use categorize::{
    CategorizeContent, CategorizeVariant, Category, LakeItem, SortItem, SortingPlan,
};
pub use choice::{MultipleChoiceContent, Question};
pub use exercise::{ExerciseContent, ExerciseKind, MalformedContent};
pub use matching::{MatchSide, MatchingContent, Pair};
pub use ordering::{OrderingContent, OrderingSentence};
pub use selector::{
    SelectableArea, SelectableTarget, SelectableWord, SelectorContent, SelectorImage,
    SelectorSentence,
};
