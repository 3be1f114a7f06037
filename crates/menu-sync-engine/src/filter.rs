//! Visibility filtering over already-rendered items.
//!
//! Holds no state of its own: the selection is read from the filter controls
//! inside a display root and the result is written back as the hidden class.

use crate::dom::{DocumentTree, NodeId, markup};
use crate::reconcile::controls::checkbox_in;

/// Current state of a root's filter controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    /// `"all"` or a source-language category name.
    pub category: String,
    pub exclude_allergens: bool,
    /// Lowercase tokens; an item mentioning any of them is hidden while
    /// `exclude_allergens` is on.
    pub excluded_allergens: Vec<String>,
    pub takeaway_only: bool,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self {
            category: markup::ALL_CATEGORIES.to_string(),
            exclude_allergens: false,
            excluded_allergens: Vec::new(),
            takeaway_only: false,
        }
    }
}

impl FilterSelection {
    /// Read the selection from the controls under `root`. Missing controls
    /// count as "no restriction".
    pub fn read(tree: &DocumentTree, root: NodeId) -> Self {
        let control = |name: &str| tree.first_by_attr(root, markup::ATTR_FILTER, name);

        let category = control(markup::FILTER_CATEGORY)
            .and_then(|n| {
                tree.attr(n, markup::ATTR_VALUE)
                    .or_else(|| tree.attr(n, "value"))
            })
            .filter(|v| !v.is_empty())
            .unwrap_or(markup::ALL_CATEGORIES)
            .to_string();

        let exclude_allergens = markup::FILTER_ALLERGENS
            .iter()
            .find_map(|name| control(*name))
            .is_some_and(|n| is_checked(tree, n));

        let takeaway_only = control(markup::FILTER_TAKEAWAY).is_some_and(|n| is_checked(tree, n));

        let excluded_allergens = if exclude_allergens {
            tree.find_by_class(root, markup::ALLERGEN_ITEM)
                .into_iter()
                .filter_map(|item| checkbox_in(tree, item))
                .filter(|cb| is_checked(tree, *cb))
                .flat_map(|cb| {
                    tree.attr(cb, "value")
                        .unwrap_or("")
                        .split(',')
                        .map(|t| t.trim().to_lowercase())
                        .filter(|t| !t.is_empty())
                        .collect::<Vec<_>>()
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            category,
            exclude_allergens,
            excluded_allergens,
            takeaway_only,
        }
    }

    /// Whether an item with these attributes stays visible.
    pub fn shows(&self, category: &str, allergens: &str, takeaway: bool) -> bool {
        if self.category != markup::ALL_CATEGORIES && category != self.category {
            return false;
        }
        if self.takeaway_only && !takeaway {
            return false;
        }
        if self.exclude_allergens && !self.excluded_allergens.is_empty() {
            let allergens = allergens.to_lowercase();
            if self
                .excluded_allergens
                .iter()
                .any(|token| allergens.contains(token.as_str()))
            {
                return false;
            }
        }
        true
    }
}

fn is_checked(tree: &DocumentTree, node: NodeId) -> bool {
    tree.attr(node, "checked").is_some_and(|v| v != "false")
}

/// Counts after a filter pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterSummary {
    pub visible_items: usize,
    pub hidden_items: usize,
    pub visible_categories: usize,
}

/// Read the selection under `root` and apply it.
pub fn apply_filters(tree: &mut DocumentTree, root: NodeId) -> FilterSummary {
    let selection = FilterSelection::read(tree, root);
    apply_selection(tree, root, &selection)
}

/// Toggle the hidden class on every item, then collapse categories, photo
/// grids and text lists without a visible item.
pub fn apply_selection(
    tree: &mut DocumentTree,
    root: NodeId,
    selection: &FilterSelection,
) -> FilterSummary {
    let mut summary = FilterSummary::default();

    let items: Vec<NodeId> = [markup::PHOTO_CARD, markup::TEXT_ITEM]
        .iter()
        .flat_map(|class| tree.find_by_class(root, class))
        .collect();
    for item in items {
        let show = selection.shows(
            tree.attr(item, markup::ATTR_CATEGORY).unwrap_or(""),
            tree.attr(item, markup::ATTR_ALLERGENS).unwrap_or("").trim(),
            tree.attr(item, markup::ATTR_TAKEAWAY) == Some("true"),
        );
        tree.toggle_class(item, markup::HIDDEN, !show);
        if show {
            summary.visible_items += 1;
        } else {
            summary.hidden_items += 1;
        }
    }

    for category in tree.find_by_class(root, markup::CATEGORY) {
        let visible = |tree: &DocumentTree, class: &str| {
            tree.find_by_class(category, class)
                .into_iter()
                .filter(|n| !tree.has_class(*n, markup::HIDDEN))
                .count()
        };
        let photos = visible(&*tree, markup::PHOTO_CARD);
        let texts = visible(&*tree, markup::TEXT_ITEM);

        tree.toggle_class(category, markup::HIDDEN, photos + texts == 0);
        if photos + texts > 0 {
            summary.visible_categories += 1;
        }
        if let Some(grid) = tree.first_by_class(category, markup::PHOTO_GRID) {
            tree.toggle_class(grid, markup::HIDDEN, photos == 0);
        }
        if let Some(list) = tree.first_by_class(category, markup::TEXT_LIST) {
            tree.toggle_class(list, markup::HIDDEN, texts == 0);
        }
    }

    summary
}
