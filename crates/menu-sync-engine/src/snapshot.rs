//! Canonical, order-independent description of what a display root shows.
//!
//! A snapshot can be built from the menu model or by reading the rendered
//! tree back. Both paths must produce the same `LocalizedView` for the same
//! item, so any field added to one builder has to be added to the other.

use std::cmp::Ordering;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::dom::{DocumentTree, NodeId, markup};
use crate::localization::{self, Language};
use crate::menu::{CategoryGroup, TakeawayItems, collate};
use crate::records::columns;

/// One item flattened for a language; the unit of change detection.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct LocalizedView {
    pub category: String,
    pub name: String,
    pub description: String,
    pub allergens: String,
    pub price: String,
    pub takeaway: bool,
    pub sold_out: bool,
    pub has_photo: bool,
    pub image_url: String,
}

/// Which fields take part in the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotFields {
    pub image_url: bool,
}

impl Default for SnapshotFields {
    fn default() -> Self {
        Self { image_url: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Snapshot {
    views: Vec<LocalizedView>,
}

impl Snapshot {
    /// Sort views by category, then name, then every remaining field so
    /// equal content always yields equal snapshots.
    pub fn new(mut views: Vec<LocalizedView>, fields: SnapshotFields) -> Self {
        if !fields.image_url {
            for view in &mut views {
                view.image_url.clear();
            }
        }
        views.sort_by(canonical_order);
        Self { views }
    }

    pub fn from_groups(
        groups: &[CategoryGroup],
        lang: Language,
        takeaway: &TakeawayItems,
        fields: SnapshotFields,
    ) -> Self {
        let views = groups
            .iter()
            .flat_map(|group| {
                group.items.iter().map(move |item| LocalizedView {
                    category: group.category.clone(),
                    name: localization::pick(&item.record, columns::ITEM_NAME, lang).to_string(),
                    description: localization::pick(&item.record, columns::DESCRIPTION, lang)
                        .to_string(),
                    allergens: localization::pick(&item.record, columns::ALLERGENS, lang)
                        .to_string(),
                    price: item.formatted_price(),
                    takeaway: item.is_takeaway(takeaway),
                    sold_out: item.is_sold_out(),
                    has_photo: item.has_photo(),
                    image_url: item.image_url().to_string(),
                })
            })
            .collect();
        Self::new(views, fields)
    }

    /// Read the views back out of a rendered container.
    pub fn from_tree(tree: &DocumentTree, container: NodeId, fields: SnapshotFields) -> Self {
        let mut views = Vec::new();
        for card in tree.find_by_class(container, markup::PHOTO_CARD) {
            views.push(read_item(tree, card, &PHOTO_CARD_PARTS));
        }
        for item in tree.find_by_class(container, markup::TEXT_ITEM) {
            views.push(read_item(tree, item, &TEXT_ITEM_PARTS));
        }
        Self::new(views, fields)
    }

    pub fn views(&self) -> &[LocalizedView] {
        &self.views
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Stable JSON form, handy for logging and external comparison.
    pub fn to_canonical_string(&self) -> String {
        serde_json::to_string(&self.views).unwrap_or_default()
    }
}

fn canonical_order(a: &LocalizedView, b: &LocalizedView) -> Ordering {
    collate::compare(&a.category, &b.category)
        .then_with(|| collate::compare(&a.name, &b.name))
        .then_with(|| a.cmp(b))
}

/// Class names of the parts of one rendered item kind.
struct ItemParts {
    name: &'static str,
    description: &'static str,
    price: &'static str,
    image: Option<&'static str>,
}

const PHOTO_CARD_PARTS: ItemParts = ItemParts {
    name: markup::PHOTO_CARD_NAME,
    description: markup::PHOTO_CARD_DESC,
    price: markup::PHOTO_CARD_PRICE,
    image: Some(markup::PHOTO_CARD_IMAGE),
};

const TEXT_ITEM_PARTS: ItemParts = ItemParts {
    name: markup::TEXT_ITEM_NAME,
    description: markup::TEXT_ITEM_DESC,
    price: markup::TEXT_ITEM_PRICE,
    image: None,
};

fn read_item(tree: &DocumentTree, node: NodeId, parts: &ItemParts) -> LocalizedView {
    let part_text = |class: &str, own: bool| -> String {
        tree.first_by_class(node, class)
            .map(|n| if own { tree.own_text(n) } else { tree.text_content(n) })
            .map(|text| text.trim().to_string())
            .unwrap_or_default()
    };
    let flag = |name: &str| tree.attr(node, name) == Some("true");

    let image_url = parts
        .image
        .and_then(|class| tree.first_by_class(node, class))
        .and_then(|image| match tree.attr(image, markup::ATTR_IMAGE) {
            Some(url) => Some(url.to_string()),
            // Pages saved before the image attribute existed only carry the style.
            None => tree.attr(image, "style").and_then(background_image_url),
        })
        .unwrap_or_default();

    LocalizedView {
        category: read_category(tree, node),
        // The name element may carry a sold-out badge as a child element.
        name: part_text(parts.name, true),
        description: part_text(parts.description, false),
        allergens: tree
            .attr(node, markup::ATTR_ALLERGENS)
            .unwrap_or("")
            .trim()
            .to_string(),
        price: part_text(parts.price, false),
        takeaway: flag(markup::ATTR_TAKEAWAY),
        sold_out: flag(markup::ATTR_SOLDOUT),
        has_photo: parts.image.is_some(),
        image_url,
    }
}

fn read_category(tree: &DocumentTree, node: NodeId) -> String {
    let Some(category) = tree.closest(node, markup::CATEGORY) else {
        return String::new();
    };
    match tree.attr(category, markup::ATTR_CATEGORY) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => tree
            .first_by_class(category, markup::CATEGORY_TITLE)
            .map(|title| tree.text_content(title).trim().to_string())
            .unwrap_or_default(),
    }
}

fn background_image_url(style: &str) -> Option<String> {
    static URL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = URL_REGEX.get_or_init(|| {
        Regex::new(r#"url\(['"]?([^'"]+)['"]?\)"#).expect("Invalid background-image regex")
    });
    regex
        .captures(style)
        .and_then(|c| c.get(1))
        .map(|m| markup::unescape_css_url(m.as_str()))
}
