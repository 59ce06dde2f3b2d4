use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::model::content::OrderingContent;
use crate::shuffle::shuffle_avoiding_by_key;

/// The learner's arrangement of each sentence, as canonical segment indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderingState {
    arrangements: Vec<Vec<usize>>,
    answered: Vec<bool>,
}

impl OrderingState {
    /// Every sentence starts shuffled away from its canonical reading,
    /// unless its segments all read the same.
    ///
    /// A sentence with only one possible reading counts as answered from the
    /// start, since there is nothing to move.
    pub fn new<R: Rng + ?Sized>(content: &OrderingContent, rng: &mut R) -> Self {
        let arrangements: Vec<Vec<usize>> = content
            .sentences
            .iter()
            .map(|sentence| {
                let ids: Vec<usize> = (0..sentence.segments.len()).collect();
                shuffle_avoiding_by_key(&ids, &mut *rng, |&i| sentence.segments[i].to_lowercase())
            })
            .collect();
        let answered = content
            .sentences
            .iter()
            .map(|sentence| {
                let mut keys = sentence.segments.iter().map(|s| s.to_lowercase());
                keys.next().is_none_or(|first| keys.all(|key| key == first))
            })
            .collect();
        Self {
            arrangements,
            answered,
        }
    }

    /// Move the segment at `from` so it ends up at `to`.
    pub fn move_segment(&mut self, sentence: usize, from: usize, to: usize) -> bool {
        let Some(arrangement) = self.arrangements.get_mut(sentence) else {
            return false;
        };
        if from >= arrangement.len() || to >= arrangement.len() || from == to {
            return false;
        }

        let segment = arrangement.remove(from);
        arrangement.insert(to, segment);
        self.answered[sentence] = true;
        true
    }

    #[must_use]
    pub fn arrangement(&self, sentence: usize) -> Option<&[usize]> {
        self.arrangements.get(sentence).map(Vec::as_slice)
    }

    #[must_use]
    pub fn sentence_count(&self) -> usize {
        self.arrangements.len()
    }

    /// A sentence counts as answered once the learner has moved something in
    /// it, or when it has no other reading.
    pub(crate) fn answered(&self) -> Vec<bool> {
        self.answered.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::content::OrderingSentence;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sentence(words: &[&str]) -> OrderingSentence {
        OrderingSentence {
            segments: words.iter().map(ToString::to_string).collect(),
            hint: None,
        }
    }

    fn content(words: &[&str]) -> OrderingContent {
        OrderingContent {
            sentences: vec![sentence(words)],
        }
    }

    #[test]
    fn initial_arrangement_is_never_canonical() {
        let content = content(&["the", "cat", "sat"]);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let state = OrderingState::new(&content, &mut rng);
            let shown = content.sentences[0].display(state.arrangement(0).unwrap());
            assert_ne!(shown, content.sentences[0].canonical_display());
        }
    }

    #[test]
    fn move_segment_reinserts() {
        let content = content(&["a", "b", "c", "d"]);
        let mut state = OrderingState::new(&content, &mut StdRng::seed_from_u64(5));
        let before = state.arrangement(0).unwrap().to_vec();

        assert!(state.move_segment(0, 0, 3));
        let after = state.arrangement(0).unwrap();
        assert_eq!(after[3], before[0]);
        assert_eq!(&after[..3], &before[1..]);
        assert_eq!(state.answered(), vec![true]);
    }

    #[test]
    fn invalid_moves_are_ignored() {
        let content = content(&["a", "b"]);
        let mut state = OrderingState::new(&content, &mut StdRng::seed_from_u64(5));
        assert!(!state.move_segment(0, 0, 2));
        assert!(!state.move_segment(0, 1, 1));
        assert!(!state.move_segment(1, 0, 1));
        assert_eq!(state.answered(), vec![false]);
    }

    #[test]
    fn immovable_sentences_start_answered() {
        let content = OrderingContent {
            sentences: vec![
                sentence(&["hello"]),
                sentence(&["Ha", "ha", "HA"]),
                sentence(&["the", "cat"]),
            ],
        };
        let state = OrderingState::new(&content, &mut StdRng::seed_from_u64(5));
        assert_eq!(state.answered(), vec![true, true, false]);
    }
}
