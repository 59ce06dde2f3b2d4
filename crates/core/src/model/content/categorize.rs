use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{ExerciseKind, MalformedContent};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorizeContent {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<Category>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prefilled_categories: Vec<Category>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub all_items: Vec<LakeItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// An item floating in the lake. Items without a category are distractors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LakeItem {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategorizeVariant {
    /// Items start in an unassigned pool.
    Original,
    /// Items start scattered across the wrong categories.
    Ordering,
    /// Items, distractors included, are picked out of a shared lake.
    Lake,
}

impl CategorizeVariant {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Ordering => "ordering",
            Self::Lake => "lake",
        }
    }

    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "original" => Some(Self::Original),
            "ordering" => Some(Self::Ordering),
            "lake" => Some(Self::Lake),
            _ => None,
        }
    }
}

/// Flattened view of a categorize exercise that sessions and the evaluator share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortingPlan {
    pub categories: Vec<String>,
    pub items: Vec<SortItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortItem {
    pub text: String,
    /// Index into `SortingPlan::categories`; `None` for distractors.
    pub category: Option<usize>,
}

impl SortingPlan {
    /// Item indices declared for the given category.
    pub fn declared_items(&self, category: usize) -> impl Iterator<Item = usize> + '_ {
        self.items
            .iter()
            .enumerate()
            .filter(move |(_, item)| item.category == Some(category))
            .map(|(i, _)| i)
    }

    fn from_categories(categories: &[Category]) -> Self {
        let mut items = Vec::new();
        for (index, category) in categories.iter().enumerate() {
            items.extend(category.items.iter().map(|text| SortItem {
                text: text.clone(),
                category: Some(index),
            }));
        }
        Self {
            categories: categories.iter().map(|c| c.name.clone()).collect(),
            items,
        }
    }
}

impl CategorizeContent {
    /// Variant named by the content's own `variation` field.
    ///
    /// Missing or unrecognized values fall back to `Original`.
    #[must_use]
    pub fn declared_variant(&self) -> CategorizeVariant {
        self.variation
            .as_deref()
            .map(|v| v.trim().to_ascii_lowercase())
            .and_then(|v| CategorizeVariant::from_tag(&v))
            .unwrap_or(CategorizeVariant::Original)
    }

    /// Flatten the content for the given variant.
    ///
    /// # Errors
    ///
    /// Returns `MalformedContent` if the fields the variant needs are absent,
    /// or if a lake item references an undeclared category.
    pub fn plan(&self, variant: CategorizeVariant) -> Result<SortingPlan, MalformedContent> {
        let plan = match variant {
            CategorizeVariant::Original | CategorizeVariant::Ordering => {
                let (primary, fallback) = if variant == CategorizeVariant::Original {
                    (&self.categories, &self.prefilled_categories)
                } else {
                    (&self.prefilled_categories, &self.categories)
                };
                let source = if primary.is_empty() { fallback } else { primary };
                if source.is_empty() {
                    return Err(MalformedContent::MissingVariationData {
                        variation: variant.as_str(),
                        field: if variant == CategorizeVariant::Original {
                            "categories"
                        } else {
                            "prefilledCategories"
                        },
                    });
                }
                SortingPlan::from_categories(source)
            }
            CategorizeVariant::Lake => self.lake_plan()?,
        };

        if plan.items.iter().all(|item| item.category.is_none()) {
            return Err(MalformedContent::NoTargets {
                kind: ExerciseKind::Categorize,
            });
        }
        Ok(plan)
    }

    fn lake_plan(&self) -> Result<SortingPlan, MalformedContent> {
        if self.all_items.is_empty() {
            return Err(MalformedContent::MissingVariationData {
                variation: CategorizeVariant::Lake.as_str(),
                field: "allItems",
            });
        }

        let declared = !self.categories.is_empty();
        let mut categories: Vec<String> = self.categories.iter().map(|c| c.name.clone()).collect();
        let mut items = Vec::with_capacity(self.all_items.len());
        for (index, item) in self.all_items.iter().enumerate() {
            let category = match item.category.as_deref() {
                None => None,
                Some(name) => match categories.iter().position(|c| c == name) {
                    Some(pos) => Some(pos),
                    None if declared => {
                        return Err(MalformedContent::UnknownCategory {
                            item: index,
                            category: name.to_owned(),
                        });
                    }
                    None => {
                        categories.push(name.to_owned());
                        Some(categories.len() - 1)
                    }
                },
            };
            items.push(SortItem {
                text: item.text.clone(),
                category,
            });
        }
        Ok(SortingPlan { categories, items })
    }

    pub(crate) fn validate(&self) -> Result<(), MalformedContent> {
        if self.categories.is_empty()
            && self.prefilled_categories.is_empty()
            && self.all_items.is_empty()
        {
            return Err(MalformedContent::Empty {
                kind: ExerciseKind::Categorize,
                field: "categories",
            });
        }

        for list in [&self.categories, &self.prefilled_categories] {
            let mut seen = HashSet::with_capacity(list.len());
            for (category, c) in list.iter().enumerate() {
                if c.name.trim().is_empty() {
                    return Err(MalformedContent::EmptyCategoryName { category });
                }
                if !seen.insert(c.name.as_str()) {
                    return Err(MalformedContent::DuplicateCategory(c.name.clone()));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str, items: &[&str]) -> Category {
        Category {
            name: name.into(),
            items: items.iter().map(ToString::to_string).collect(),
            hint: None,
        }
    }

    fn lake_item(text: &str, category: Option<&str>) -> LakeItem {
        LakeItem {
            text: text.into(),
            category: category.map(Into::into),
        }
    }

    #[test]
    fn declared_variant_defaults_to_original() {
        let mut content = CategorizeContent {
            categories: vec![category("Fruit", &["apple"])],
            ..CategorizeContent::default()
        };
        assert_eq!(content.declared_variant(), CategorizeVariant::Original);

        content.variation = Some(" Lake ".into());
        assert_eq!(content.declared_variant(), CategorizeVariant::Lake);

        content.variation = Some("sideways".into());
        assert_eq!(content.declared_variant(), CategorizeVariant::Original);
    }

    #[test]
    fn original_plan_flattens_categories() {
        let content = CategorizeContent {
            categories: vec![
                category("Fruit", &["apple", "pear"]),
                category("Veg", &["leek"]),
            ],
            ..CategorizeContent::default()
        };
        let plan = content.plan(CategorizeVariant::Original).unwrap();
        assert_eq!(plan.categories, vec!["Fruit", "Veg"]);
        assert_eq!(plan.items.len(), 3);
        assert_eq!(plan.declared_items(0).collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(plan.declared_items(1).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn lake_plan_collects_categories_in_first_seen_order() {
        let content = CategorizeContent {
            all_items: vec![
                lake_item("leek", Some("Veg")),
                lake_item("rock", None),
                lake_item("apple", Some("Fruit")),
            ],
            variation: Some("lake".into()),
            ..CategorizeContent::default()
        };
        let plan = content.plan(CategorizeVariant::Lake).unwrap();
        assert_eq!(plan.categories, vec!["Veg", "Fruit"]);
        assert_eq!(plan.items[1].category, None);
        assert_eq!(plan.items[2].category, Some(1));
    }

    #[test]
    fn lake_item_must_use_declared_category() {
        let content = CategorizeContent {
            categories: vec![category("Fruit", &[])],
            all_items: vec![lake_item("leek", Some("Veg"))],
            ..CategorizeContent::default()
        };
        assert_eq!(
            content.plan(CategorizeVariant::Lake).unwrap_err(),
            MalformedContent::UnknownCategory {
                item: 0,
                category: "Veg".into()
            }
        );
    }

    #[test]
    fn lake_without_items_is_malformed() {
        let content = CategorizeContent {
            categories: vec![category("Fruit", &["apple"])],
            ..CategorizeContent::default()
        };
        assert!(matches!(
            content.plan(CategorizeVariant::Lake),
            Err(MalformedContent::MissingVariationData { .. })
        ));
    }

    #[test]
    fn duplicate_category_is_malformed() {
        let content = CategorizeContent {
            categories: vec![category("Fruit", &["apple"]), category("Fruit", &["pear"])],
            ..CategorizeContent::default()
        };
        assert_eq!(
            content.validate().unwrap_err(),
            MalformedContent::DuplicateCategory("Fruit".into())
        );
    }
}
