use crate::dom::markup;
use crate::dom::tree::{DocumentTree, Markup};
use crate::localization::{Label, Language};
use crate::reconcile::status::VISIBLE_OPACITY;

/// Default page: one display root per language, each with a status
/// indicator, the three filter controls, an empty allergen grid and an empty
/// dynamic container.
pub fn page_skeleton(languages: &[Language]) -> DocumentTree {
    let body = Markup::element("body").children(languages.iter().map(|lang| root(*lang)));
    DocumentTree::from_markup(&body)
}

fn root(lang: Language) -> Markup {
    let all = Label::AllCategories.text(lang);

    let dropdown = Markup::element("div")
        .class("menu-dropdown")
        .attr("id", markup::CATEGORY_DROPDOWN_ID)
        .child(
            Markup::element("div")
                .class(markup::DROPDOWN_SELECTED)
                .attr(markup::ATTR_FILTER, markup::FILTER_CATEGORY)
                .attr(markup::ATTR_VALUE, markup::ALL_CATEGORIES)
                .with_text(all),
        )
        .child(
            Markup::element("div").class(markup::DROPDOWN_MENU).child(
                Markup::element("div")
                    .class(format!("{} {}", markup::DROPDOWN_ITEM, markup::SELECTED))
                    .attr(markup::ATTR_VALUE, markup::ALL_CATEGORIES)
                    .with_text(all),
            ),
        );

    let toggle = |filter: &str| {
        Markup::element("input")
            .attr("type", "checkbox")
            .attr(markup::ATTR_FILTER, filter)
    };

    Markup::element("div")
        .class(markup::ROOT)
        .attr(markup::ATTR_LANG, lang.tag())
        .child(
            Markup::element("div")
                .class(markup::STATUS)
                .attr("style", format!("opacity: {VISIBLE_OPACITY}"))
                .with_text(Label::Checking.text(lang)),
        )
        .child(
            Markup::element("div")
                .class("menu-filters")
                .child(dropdown)
                .child(toggle(markup::FILTER_ALLERGENS[0]))
                .child(toggle(markup::FILTER_TAKEAWAY)),
        )
        .child(
            Markup::element("div")
                .class(markup::ALLERGEN_MODAL)
                .child(Markup::element("div").class(markup::ALLERGEN_GRID)),
        )
        .child(Markup::element("div").class(markup::DYNAMIC))
}
