use std::collections::BTreeSet;

use crate::localization::{self, Language};
use crate::menu::group::CategoryGroup;
use crate::records::columns;

/// One entry of the category selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOption {
    /// Source-language category, matched against `data-category`.
    pub value: String,
    /// Text shown in the requested language.
    pub label: String,
}

/// Category options in group order.
pub fn category_vocabulary(groups: &[CategoryGroup], lang: Language) -> Vec<CategoryOption> {
    groups
        .iter()
        .map(|g| CategoryOption {
            value: g.category.clone(),
            label: g.label(lang).to_string(),
        })
        .collect()
}

/// Distinct lowercase allergen tokens across the menu, sorted.
pub fn allergen_vocabulary(groups: &[CategoryGroup], lang: Language) -> Vec<String> {
    let tokens: BTreeSet<String> = groups
        .iter()
        .flat_map(|g| &g.items)
        .flat_map(|item| {
            localization::pick(&item.record, columns::ALLERGENS, lang)
                .split(',')
                .map(|token| token.trim().to_lowercase())
                .filter(|token| !token.is_empty())
                .collect::<Vec<_>>()
        })
        .collect();
    tokens.into_iter().collect()
}
