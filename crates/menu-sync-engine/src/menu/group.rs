use crate::localization::{Language, pick_pair};
use crate::menu::collate;
use crate::menu::item::MenuItem;
use crate::records::{Record, columns};

/// Category used when a row leaves `category` blank.
pub const FALLBACK_CATEGORY: &str = "Annet";
pub const FALLBACK_CATEGORY_EN: &str = "Other";

/// Items sharing a source-language category, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup {
    /// Source-language name; the group's identity.
    pub category: String,
    pub category_en: String,
    pub items: Vec<MenuItem>,
}

impl CategoryGroup {
    pub fn label(&self, lang: Language) -> &str {
        pick_pair(&self.category, &self.category_en, lang)
    }
}

/// Build the ordered category groups from mapped records.
///
/// Records not explicitly available are dropped. Groups appear in the order
/// their category is first seen; items within a group are ordered by sort
/// key, then by name, keeping source order for full ties.
pub fn normalize(records: Vec<Record>) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();

    for record in records {
        if !record.flag(columns::AVAILABLE) {
            continue;
        }

        let category = match record.get(columns::CATEGORY) {
            "" => FALLBACK_CATEGORY,
            name => name,
        }
        .to_string();

        let index = match groups.iter().position(|g| g.category == category) {
            Some(index) => index,
            None => {
                let mut category_en = record.get(columns::CATEGORY_EN).to_string();
                if category == FALLBACK_CATEGORY && category_en.is_empty() {
                    category_en = FALLBACK_CATEGORY_EN.to_string();
                }
                groups.push(CategoryGroup {
                    category,
                    category_en,
                    items: Vec::new(),
                });
                groups.len() - 1
            }
        };

        groups[index].items.push(MenuItem::from_record(record));
    }

    for group in &mut groups {
        // sort_by is stable, which keeps source order for full ties
        group.items.sort_by(|a, b| {
            a.sort_key
                .total_cmp(&b.sort_key)
                .then_with(|| collate::compare(a.name(), b.name()))
        });
    }

    groups
}
