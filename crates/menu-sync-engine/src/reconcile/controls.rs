use std::collections::BTreeSet;

use crate::dom::{DocumentTree, Markup, NodeId, markup};
use crate::menu::CategoryOption;

/// Bring the category dropdown in line with `options`.
///
/// The "all" entry is kept, entries for categories that disappeared are
/// removed, surviving entries get their label refreshed and new categories are
/// appended. Does nothing when the dropdown or one of its parts is missing.
pub fn sync_category_dropdown(
    tree: &mut DocumentTree,
    root: NodeId,
    options: &[CategoryOption],
) {
    let Some(dropdown) = tree.element_by_id(root, markup::CATEGORY_DROPDOWN_ID) else {
        return;
    };
    let Some(menu) = tree.first_by_class(dropdown, markup::DROPDOWN_MENU) else {
        return;
    };
    let Some(selected) = tree.first_by_class(dropdown, markup::DROPDOWN_SELECTED) else {
        return;
    };

    if tree.attr(selected, markup::ATTR_VALUE).is_none_or(str::is_empty) {
        tree.set_attr(selected, markup::ATTR_VALUE, markup::ALL_CATEGORIES);
    }

    let mut present = BTreeSet::new();
    for item in tree.find_by_class(menu, markup::DROPDOWN_ITEM) {
        let value = tree.attr(item, markup::ATTR_VALUE).unwrap_or("").to_string();
        if value == markup::ALL_CATEGORIES {
            present.insert(value);
            continue;
        }
        match options.iter().find(|o| o.value == value) {
            Some(option) => {
                if tree.text_content(item) != option.label {
                    tree.set_text(item, option.label.as_str());
                }
                present.insert(value);
            }
            None => tree.remove(item),
        }
    }

    for option in options.iter().filter(|o| !present.contains(&o.value)) {
        tree.append_markup(
            menu,
            &Markup::element("div")
                .class(markup::DROPDOWN_ITEM)
                .attr(markup::ATTR_VALUE, option.value.as_str())
                .with_text(option.label.as_str()),
        );
    }

    // A selection pointing at a removed category would hide everything.
    let current = tree.attr(selected, markup::ATTR_VALUE).unwrap_or("").to_string();
    if current != markup::ALL_CATEGORIES && !options.iter().any(|o| o.value == current) {
        tree.set_attr(selected, markup::ATTR_VALUE, markup::ALL_CATEGORIES);
        if let Some(all) = tree.first_by_attr(menu, markup::ATTR_VALUE, markup::ALL_CATEGORIES) {
            let label = tree.text_content(all);
            tree.set_text(selected, label);
        }
    }
}

/// Bring the allergen checkbox grid in line with `tokens`.
///
/// Checkboxes for tokens that disappeared are removed and new tokens get a
/// fresh unchecked checkbox; existing ones keep their checked state.
pub fn sync_allergen_grid(tree: &mut DocumentTree, root: NodeId, tokens: &[String]) {
    let Some(modal) = tree.first_by_class(root, markup::ALLERGEN_MODAL) else {
        return;
    };
    let Some(grid) = tree.first_by_class(modal, markup::ALLERGEN_GRID) else {
        return;
    };

    let mut present = BTreeSet::new();
    for item in tree.find_by_class(grid, markup::ALLERGEN_ITEM) {
        let Some(checkbox) = checkbox_in(tree, item) else {
            continue;
        };
        let value = tree.attr(checkbox, "value").unwrap_or("").to_string();
        if tokens.contains(&value) {
            present.insert(value);
        } else {
            tree.remove(item);
        }
    }

    for token in tokens.iter().filter(|t| !present.contains(*t)) {
        let id = format!("allergen-{}", token.split_whitespace().collect::<Vec<_>>().join("-"));
        tree.append_markup(
            grid,
            &Markup::element("div")
                .class(markup::ALLERGEN_ITEM)
                .child(
                    Markup::element("input")
                        .attr("type", "checkbox")
                        .attr("id", id.as_str())
                        .attr("value", token.as_str()),
                )
                .child(
                    Markup::element("label")
                        .attr("for", id.clone())
                        .with_text(capitalize(token)),
                ),
        );
    }
}

/// First checkbox input below `node`.
pub(crate) fn checkbox_in(tree: &DocumentTree, node: NodeId) -> Option<NodeId> {
    tree.descendants(node)
        .into_iter()
        .find(|n| tree.tag(*n) == Some("input") && tree.attr(*n, "type") == Some("checkbox"))
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
