//! Grading of a frozen interaction against its content.
//!
//! Evaluation is total and pure: unanswered units grade as incorrect and the
//! same inputs always give the same [`Verdict`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::interaction::{
    BlankState, ChoiceState, Interaction, OrderingState, QuestionBankState, SelectionState,
    SideBySideState, SortingState, ThreesomeState,
};
use crate::model::Verdict;
use crate::model::content::{
    CategorizeVariant, ExerciseContent, FillBlankContent, MatchingContent, MultipleChoiceContent,
    OrderingContent,
};

/// Grade `interaction` against `content`.
///
/// An interaction built for a different kind of content grades as incorrect
/// on every unit.
#[must_use]
pub fn evaluate(content: &ExerciseContent, interaction: &Interaction) -> Verdict {
    match (content, interaction) {
        (ExerciseContent::MultipleChoice(c), Interaction::MultipleChoice(s)) => choice(c, s),
        (ExerciseContent::FillBlank(c), Interaction::FillBlank(s)) => blanks(c, s),
        (ExerciseContent::Ordering(c), Interaction::Ordering(s)) => ordering(c, s),
        (ExerciseContent::Matching(c), Interaction::SideBySide(s)) => side_by_side(c, s),
        (ExerciseContent::Matching(c), Interaction::QuestionBased(s)) => question_bank(c, s),
        (ExerciseContent::Matching(c), Interaction::Threesome(s)) => threesome(c, s),
        (ExerciseContent::Categorize(_), Interaction::Categorize(s)) => sorting(s),
        (ExerciseContent::Selector(_), Interaction::Selector(s)) => selection(s),
        _ => {
            tracing::debug!(kind = %content.kind(), "interaction does not belong to content");
            Verdict::new(false, vec![false; interaction.unit_count()])
        }
    }
}

fn choice(content: &MultipleChoiceContent, state: &ChoiceState) -> Verdict {
    Verdict::from_items(
        content
            .questions
            .iter()
            .enumerate()
            .map(|(i, q)| state.selected(i) == Some(&q.correct_option_indices))
            .collect(),
    )
}

fn blanks(content: &FillBlankContent, state: &BlankState) -> Verdict {
    Verdict::from_items(
        content
            .sentences
            .iter()
            .enumerate()
            .map(|(s, sentence)| {
                sentence.blanks.iter().enumerate().all(|(b, blank)| {
                    state.value(s, b).is_some_and(|value| blank.accepts(value))
                })
            })
            .collect(),
    )
}

fn ordering(content: &OrderingContent, state: &OrderingState) -> Verdict {
    Verdict::from_items(
        content
            .sentences
            .iter()
            .enumerate()
            .map(|(s, sentence)| {
                state.arrangement(s).is_some_and(|order| {
                    sentence.display(order) == sentence.canonical_display()
                })
            })
            .collect(),
    )
}

fn side_by_side(content: &MatchingContent, state: &SideBySideState) -> Verdict {
    Verdict::from_items(
        content
            .pairs
            .iter()
            .enumerate()
            .map(|(i, pair)| state.linked_chip(i).is_some_and(|chip| chip.text == pair.right))
            .collect(),
    )
}

fn question_bank(content: &MatchingContent, state: &QuestionBankState) -> Verdict {
    let answer_side = state.question_side().opposite();
    Verdict::from_items(
        content
            .pairs
            .iter()
            .enumerate()
            .map(|(i, pair)| {
                state
                    .assigned(i)
                    .is_some_and(|chip| chip.text == pair.side(answer_side))
            })
            .collect(),
    )
}

fn threesome(content: &MatchingContent, state: &ThreesomeState) -> Verdict {
    let rows = content.threesome_rows().len();
    let per_row: Vec<bool> = (0..rows)
        .map(|row| {
            state
                .triples()
                .iter()
                .filter(|t| t.is_chain() && t.first == row)
                .count()
                == 1
        })
        .collect();
    let overall = rows > 0 && state.triples().len() == rows && per_row.iter().all(|c| *c);
    Verdict::new(overall, per_row)
}

fn sorting(state: &SortingState) -> Verdict {
    let plan = state.plan();
    let per_category: Vec<bool> = (0..plan.categories.len())
        .map(|c| {
            let placed: BTreeSet<usize> = state.items_in(c).collect();
            let declared: BTreeSet<usize> = plan.declared_items(c).collect();
            placed == declared
        })
        .collect();

    let pool_clear = state.variant() != CategorizeVariant::Original || state.pool().next().is_none();
    let overall = pool_clear && !per_category.is_empty() && per_category.iter().all(|c| *c);
    Verdict::new(overall, per_category)
}

fn selection(state: &SelectionState) -> Verdict {
    let per_group: Vec<bool> = (0..state.group_count())
        .map(|g| {
            let in_group = |id: &&usize| state.group_of(**id) == Some(g);
            state
                .selected()
                .iter()
                .filter(in_group)
                .eq(state.targets().iter().filter(in_group))
        })
        .collect();
    Verdict::new(state.selected() == state.targets(), per_group)
}

/// Per-selectable feedback for a selector attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionBreakdown {
    pub true_positives: BTreeSet<usize>,
    pub false_positives: BTreeSet<usize>,
    pub false_negatives: BTreeSet<usize>,
}

impl SelectionBreakdown {
    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.false_positives.is_empty() && self.false_negatives.is_empty()
    }
}

/// Split a selection into hits, wrong picks and missed targets.
///
/// Grading stays strict set equality; this only feeds feedback display.
#[must_use]
pub fn selection_breakdown(state: &SelectionState) -> SelectionBreakdown {
    let selected = state.selected();
    let targets = state.targets();
    SelectionBreakdown {
        true_positives: selected.intersection(targets).copied().collect(),
        false_positives: selected.difference(targets).copied().collect(),
        false_negatives: targets.difference(selected).copied().collect(),
    }
}
