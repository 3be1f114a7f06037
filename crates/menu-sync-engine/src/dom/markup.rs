//! Class and attribute names written by the renderer and read back by the
//! snapshot builder and the filter engine. Changing one side without the
//! other breaks change detection.

pub const ROOT: &str = "menu-root";
pub const DYNAMIC: &str = "menu-dynamic";
pub const STATUS: &str = "menu-status";
pub const HIDDEN: &str = "menu-hidden";

pub const CATEGORY: &str = "menu-category";
pub const CATEGORY_TITLE: &str = "menu-category-title";
pub const CATEGORY_RULE: &str = "menu-category-rule";

pub const PHOTO_GRID: &str = "menu-photo-grid";
pub const PHOTO_CARD: &str = "menu-photo-card";
pub const PHOTO_CARD_IMAGE: &str = "menu-photo-card-image";
pub const PHOTO_CARD_BODY: &str = "menu-photo-card-body";
pub const PHOTO_CARD_NAME: &str = "menu-photo-card-name";
pub const PHOTO_CARD_DESC: &str = "menu-photo-card-desc";
pub const PHOTO_CARD_ALLERGENS: &str = "menu-photo-card-allergens";
pub const PHOTO_CARD_PRICE: &str = "menu-photo-card-price";
pub const PHOTO_CARD_SOLDOUT: &str = "menu-photo-card-soldout-overlay";
pub const ALLERGEN_BADGE: &str = "menu-allergen-badge";

pub const TEXT_LIST: &str = "menu-text-list";
pub const TEXT_ITEM: &str = "menu-text-item";
pub const TEXT_ITEM_CONTENT: &str = "menu-text-item-content";
pub const TEXT_ITEM_HEADER: &str = "menu-text-item-header";
pub const TEXT_ITEM_NAME: &str = "menu-text-item-name";
pub const TEXT_ITEM_SOLDOUT: &str = "menu-text-item-soldout-badge";
pub const TEXT_ITEM_DESC: &str = "menu-text-item-desc";
pub const TEXT_ITEM_ALLERGENS: &str = "menu-text-item-allergens";
pub const TEXT_ITEM_PRICE: &str = "menu-text-item-price";
pub const SOLDOUT: &str = "soldout";

pub const CATEGORY_DROPDOWN_ID: &str = "category-dropdown";
pub const DROPDOWN_MENU: &str = "menu-dropdown-menu";
pub const DROPDOWN_SELECTED: &str = "menu-dropdown-selected";
pub const DROPDOWN_ITEM: &str = "menu-dropdown-item";
pub const SELECTED: &str = "selected";

pub const ALLERGEN_MODAL: &str = "menu-allergen-modal";
pub const ALLERGEN_GRID: &str = "menu-allergen-grid";
pub const ALLERGEN_ITEM: &str = "menu-allergen-item";

pub const ATTR_LANG: &str = "data-lang";
pub const ATTR_CATEGORY: &str = "data-category";
pub const ATTR_ALLERGENS: &str = "data-allergens";
pub const ATTR_TAKEAWAY: &str = "data-takehome";
pub const ATTR_SOLDOUT: &str = "data-soldout";
pub const ATTR_RENDERED: &str = "data-rendered";
pub const ATTR_VALUE: &str = "data-value";
pub const ATTR_FILTER: &str = "data-filter";
/// Raw image URL on the photo card image, read back by the snapshot.
pub const ATTR_IMAGE: &str = "data-image";

pub const FILTER_CATEGORY: &str = "category";
pub const FILTER_ALLERGENS: [&str; 2] = ["allergens", "allergier"];
pub const FILTER_TAKEAWAY: &str = "takehome";

/// Category selector value meaning "no category restriction".
pub const ALL_CATEGORIES: &str = "all";

/// Characters that would end a quoted CSS `url(...)` early, with their
/// percent encodings.
const CSS_URL_ESCAPES: [(char, &str); 4] = [('%', "%25"), ('\'', "%27"), ('"', "%22"), (')', "%29")];

/// `background-image` declaration for `url`, safe to emit whatever the URL
/// contains.
pub fn background_image(url: &str) -> String {
    let mut escaped = String::with_capacity(url.len());
    for ch in url.chars() {
        match CSS_URL_ESCAPES.iter().find(|(c, _)| *c == ch) {
            Some((_, encoded)) => escaped.push_str(encoded),
            None => escaped.push(ch),
        }
    }
    format!("background-image:url('{escaped}');")
}

/// Undo the escaping done by [`background_image`].
pub fn unescape_css_url(url: &str) -> String {
    let mut out = url.to_string();
    // '%' last so "%2527" does not decode twice.
    for (ch, encoded) in CSS_URL_ESCAPES.iter().rev() {
        out = out.replace(encoded, &ch.to_string());
    }
    out
}

/// Boolean attribute encoding on rendered nodes.
pub fn flag(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
