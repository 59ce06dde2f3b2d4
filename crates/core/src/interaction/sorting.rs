use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::model::content::{CategorizeVariant, SortingPlan};
use crate::shuffle::{shuffle_avoiding_by_key, shuffle_with};

/// Where each item of a [`SortingPlan`] currently sits.
///
/// `placement[item]` is the category index, or `None` while the item is in
/// the pool (or lake).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortingState {
    variant: CategorizeVariant,
    plan: SortingPlan,
    placement: Vec<Option<usize>>,
    /// Display order of the pool, as item indices.
    pool_order: Vec<usize>,
}

impl SortingState {
    /// Original and lake start with everything in the pool. The ordering
    /// variant starts with items dealt into categories, keeping each
    /// category's size but never reproducing the answer.
    pub fn new<R: Rng + ?Sized>(
        plan: SortingPlan,
        variant: CategorizeVariant,
        randomize: bool,
        rng: &mut R,
    ) -> Self {
        let ids: Vec<usize> = (0..plan.items.len()).collect();
        let mut placement = vec![None; plan.items.len()];

        if variant == CategorizeVariant::Ordering {
            let sorted: Vec<usize> = ids
                .iter()
                .copied()
                .filter(|&i| plan.items[i].category.is_some())
                .collect();
            let dealt = shuffle_avoiding_by_key(&sorted, &mut *rng, |&i| plan.items[i].category);
            for (slot, item) in sorted.iter().zip(dealt) {
                placement[item] = plan.items[*slot].category;
            }
        }

        let pool_order = if randomize {
            shuffle_with(&ids, rng)
        } else {
            ids
        };

        Self {
            variant,
            plan,
            placement,
            pool_order,
        }
    }

    /// Move an item into a category, or back to the pool with `None`.
    ///
    /// The ordering variant has no pool, so `None` is refused there.
    pub fn move_item(&mut self, item: usize, target: Option<usize>) -> bool {
        if item >= self.placement.len() {
            return false;
        }
        match target {
            Some(category) if category >= self.plan.categories.len() => return false,
            None if self.variant == CategorizeVariant::Ordering => return false,
            _ => {}
        }
        self.placement[item] = target;
        true
    }

    #[must_use]
    pub fn variant(&self) -> CategorizeVariant {
        self.variant
    }

    #[must_use]
    pub fn plan(&self) -> &SortingPlan {
        &self.plan
    }

    #[must_use]
    pub fn placement(&self, item: usize) -> Option<usize> {
        self.placement.get(item).copied().flatten()
    }

    /// Items currently in `category`, in item order.
    pub fn items_in(&self, category: usize) -> impl Iterator<Item = usize> + '_ {
        self.placement
            .iter()
            .enumerate()
            .filter(move |(_, p)| **p == Some(category))
            .map(|(i, _)| i)
    }

    /// Items still in the pool, in display order.
    pub fn pool(&self) -> impl Iterator<Item = usize> + '_ {
        self.pool_order
            .iter()
            .copied()
            .filter(|&i| self.placement[i].is_none())
    }

    pub(crate) fn answered(&self) -> Vec<bool> {
        (0..self.plan.categories.len())
            .map(|c| self.items_in(c).next().is_some())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::content::SortItem;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn plan() -> SortingPlan {
        let item = |text: &str, category| SortItem {
            text: text.into(),
            category,
        };
        SortingPlan {
            categories: vec!["Fruit".into(), "Veg".into()],
            items: vec![
                item("apple", Some(0)),
                item("pear", Some(0)),
                item("leek", Some(1)),
                item("rock", None),
            ],
        }
    }

    #[test]
    fn original_starts_in_pool() {
        let state = SortingState::new(
            plan(),
            CategorizeVariant::Original,
            false,
            &mut StdRng::seed_from_u64(1),
        );
        assert_eq!(state.pool().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        assert_eq!(state.answered(), vec![false, false]);
    }

    #[test]
    fn ordering_scatters_but_keeps_sizes() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let state = SortingState::new(plan(), CategorizeVariant::Ordering, true, &mut rng);
            assert_eq!(state.items_in(0).count(), 2);
            assert_eq!(state.items_in(1).count(), 1);
            assert_eq!(state.placement(3), None);
            let solved = (0..3).all(|i| state.placement(i) == plan().items[i].category);
            assert!(!solved);
        }
    }

    #[test]
    fn ordering_has_no_pool_to_return_to() {
        let mut state = SortingState::new(
            plan(),
            CategorizeVariant::Ordering,
            false,
            &mut StdRng::seed_from_u64(3),
        );
        assert!(!state.move_item(0, None));
        assert!(state.move_item(0, Some(1)));
        assert_eq!(state.placement(0), Some(1));
    }

    #[test]
    fn move_item_validates_targets() {
        let mut state = SortingState::new(
            plan(),
            CategorizeVariant::Lake,
            false,
            &mut StdRng::seed_from_u64(3),
        );
        assert!(state.move_item(2, Some(1)));
        assert!(!state.move_item(2, Some(2)));
        assert!(!state.move_item(9, Some(0)));
        assert!(state.move_item(2, None));
        assert_eq!(state.pool().count(), 4);
    }
}
