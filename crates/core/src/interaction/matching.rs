use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::model::content::{MatchSide, MatchingContent};
use crate::shuffle::shuffle_with;

/// A clickable answer: one side of a pair or an extra distractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerChip {
    pub text: String,
    /// Pair the chip was taken from; `None` for distractors.
    pub pair: Option<usize>,
}

fn answer_chips<R: Rng + ?Sized>(
    content: &MatchingContent,
    side: MatchSide,
    randomize: bool,
    rng: &mut R,
) -> Vec<AnswerChip> {
    let chips: Vec<AnswerChip> = content
        .pairs
        .iter()
        .enumerate()
        .map(|(i, p)| AnswerChip {
            text: p.side(side).to_owned(),
            pair: Some(i),
        })
        .chain(
            content
                .extra_distractor_answers
                .iter()
                .map(|text| AnswerChip {
                    text: text.clone(),
                    pair: None,
                }),
        )
        .collect();

    if randomize {
        shuffle_with(&chips, rng)
    } else {
        chips
    }
}

//
// ─── SIDE BY SIDE ──────────────────────────────────────────────────────────────
//

/// Two columns linked by clicking one item on each side.
///
/// Lefts are addressed by pair index, rights by chip index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideBySideState {
    chips: Vec<AnswerChip>,
    links: Vec<Option<usize>>,
    armed: Option<(MatchSide, usize)>,
}

impl SideBySideState {
    pub fn new<R: Rng + ?Sized>(content: &MatchingContent, randomize: bool, rng: &mut R) -> Self {
        Self {
            chips: answer_chips(content, MatchSide::Right, randomize, rng),
            links: vec![None; content.pairs.len()],
            armed: None,
        }
    }

    /// Arm an item, or link it with the item armed on the other side.
    ///
    /// Selecting the armed item again disarms it; selecting another item on
    /// the armed side moves the arming there. Linking replaces any earlier
    /// link held by either item.
    pub fn select(&mut self, side: MatchSide, index: usize) -> bool {
        let len = match side {
            MatchSide::Left => self.links.len(),
            MatchSide::Right => self.chips.len(),
        };
        if index >= len {
            return false;
        }

        match self.armed {
            Some(armed) if armed == (side, index) => self.armed = None,
            Some((armed_side, other)) if armed_side != side => {
                let (left, chip) = match side {
                    MatchSide::Left => (index, other),
                    MatchSide::Right => (other, index),
                };
                self.link(left, chip);
                self.armed = None;
            }
            _ => self.armed = Some((side, index)),
        }
        true
    }

    fn link(&mut self, left: usize, chip: usize) {
        for slot in &mut self.links {
            if *slot == Some(chip) {
                *slot = None;
            }
        }
        self.links[left] = Some(chip);
    }

    /// Drop the link held by a left item.
    pub fn unlink(&mut self, left: usize) -> bool {
        match self.links.get_mut(left) {
            Some(slot @ Some(_)) => {
                *slot = None;
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn armed(&self) -> Option<(MatchSide, usize)> {
        self.armed
    }

    #[must_use]
    pub fn linked_chip(&self, left: usize) -> Option<&AnswerChip> {
        let chip = (*self.links.get(left)?)?;
        self.chips.get(chip)
    }

    #[must_use]
    pub fn chips(&self) -> &[AnswerChip] {
        &self.chips
    }

    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.links.len()
    }

    pub(crate) fn answered(&self) -> Vec<bool> {
        self.links.iter().map(Option::is_some).collect()
    }
}

//
// ─── QUESTION BASED ────────────────────────────────────────────────────────────
//

/// One column paged as questions, answered from a word bank built from the
/// other column plus distractors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionBankState {
    question_side: MatchSide,
    bank: Vec<AnswerChip>,
    assignments: Vec<Option<usize>>,
}

impl QuestionBankState {
    pub fn new<R: Rng + ?Sized>(
        content: &MatchingContent,
        question_side: MatchSide,
        randomize: bool,
        rng: &mut R,
    ) -> Self {
        Self {
            question_side,
            bank: answer_chips(content, question_side.opposite(), randomize, rng),
            assignments: vec![None; content.pairs.len()],
        }
    }

    /// Put a bank word into a question slot, taking it out of any other slot.
    pub fn assign_word(&mut self, question: usize, word: usize) -> bool {
        if question >= self.assignments.len() || word >= self.bank.len() {
            return false;
        }
        for slot in &mut self.assignments {
            if *slot == Some(word) {
                *slot = None;
            }
        }
        self.assignments[question] = Some(word);
        true
    }

    pub fn clear_word(&mut self, question: usize) -> bool {
        match self.assignments.get_mut(question) {
            Some(slot @ Some(_)) => {
                *slot = None;
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn question_side(&self) -> MatchSide {
        self.question_side
    }

    #[must_use]
    pub fn assigned(&self, question: usize) -> Option<&AnswerChip> {
        let word = (*self.assignments.get(question)?)?;
        self.bank.get(word)
    }

    #[must_use]
    pub fn bank(&self) -> &[AnswerChip] {
        &self.bank
    }

    /// Bank words not placed in any question.
    pub fn free_words(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.bank.len()).filter(|w| !self.assignments.contains(&Some(*w)))
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.assignments.len()
    }

    pub(crate) fn answered(&self) -> Vec<bool> {
        self.assignments.iter().map(Option::is_some).collect()
    }
}

//
// ─── THREESOME ─────────────────────────────────────────────────────────────────
//

/// Row indices picked from the first, second and third column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triple {
    pub first: usize,
    pub second: usize,
    pub third: usize,
}

impl Triple {
    /// All three items come from the same chain.
    #[must_use]
    pub fn is_chain(&self) -> bool {
        self.first == self.second && self.second == self.third
    }
}

/// Three columns; a triple commits once each column has an armed item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreesomeState {
    /// Display order of each column, as row indices.
    columns: [Vec<usize>; 3],
    /// Armed display position per column.
    armed: [Option<usize>; 3],
    /// Consumed flag per column, by row index.
    used: [Vec<bool>; 3],
    triples: Vec<Triple>,
}

impl ThreesomeState {
    pub fn new<R: Rng + ?Sized>(content: &MatchingContent, randomize: bool, rng: &mut R) -> Self {
        let rows: Vec<usize> = (0..content.threesome_rows().len()).collect();
        let mut column = || {
            if randomize {
                shuffle_with(&rows, &mut *rng)
            } else {
                rows.clone()
            }
        };
        let columns = [column(), column(), column()];
        Self {
            columns,
            armed: [None; 3],
            used: [
                vec![false; rows.len()],
                vec![false; rows.len()],
                vec![false; rows.len()],
            ],
            triples: Vec::new(),
        }
    }

    /// Arm (or disarm) the item at `position` in `column`.
    ///
    /// Consumed items cannot be selected. When the third column gets armed
    /// the triple is committed and all arming is cleared.
    pub fn select_column(&mut self, column: usize, position: usize) -> bool {
        let Some(&row) = self.columns.get(column).and_then(|c| c.get(position)) else {
            return false;
        };
        if self.used[column][row] {
            return false;
        }

        if self.armed[column] == Some(position) {
            self.armed[column] = None;
            return true;
        }
        self.armed[column] = Some(position);

        if let [Some(a), Some(b), Some(c)] = self.armed {
            let triple = Triple {
                first: self.columns[0][a],
                second: self.columns[1][b],
                third: self.columns[2][c],
            };
            self.used[0][triple.first] = true;
            self.used[1][triple.second] = true;
            self.used[2][triple.third] = true;
            self.triples.push(triple);
            self.armed = [None; 3];
        }
        true
    }

    #[must_use]
    pub fn column(&self, column: usize) -> Option<&[usize]> {
        self.columns.get(column).map(Vec::as_slice)
    }

    #[must_use]
    pub fn armed(&self) -> [Option<usize>; 3] {
        self.armed
    }

    /// Whether the item at `position` in `column` can still be picked.
    #[must_use]
    pub fn is_available(&self, column: usize, position: usize) -> bool {
        self.columns
            .get(column)
            .and_then(|c| c.get(position))
            .is_some_and(|&row| !self.used[column][row])
    }

    #[must_use]
    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.columns[0].len()
    }

    /// A row counts as answered once its first-column item is in a triple.
    pub(crate) fn answered(&self) -> Vec<bool> {
        self.used[0].clone()
    }
}
