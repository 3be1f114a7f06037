use crate::dom::Markup;
use crate::dom::markup;
use crate::localization::{self, Label, Language};
use crate::menu::{CategoryGroup, MenuItem, TakeawayItems};
use crate::records::columns;

/// Display fields of one item, already resolved for a language.
struct ItemFields<'a> {
    category: &'a str,
    name: &'a str,
    description: &'a str,
    allergens: &'a str,
    price: String,
    takeaway: bool,
    sold_out: bool,
}

impl<'a> ItemFields<'a> {
    fn new(
        group: &'a CategoryGroup,
        item: &'a MenuItem,
        lang: Language,
        takeaway: &TakeawayItems,
    ) -> Self {
        Self {
            category: &group.category,
            name: localization::pick(&item.record, columns::ITEM_NAME, lang),
            description: localization::pick(&item.record, columns::DESCRIPTION, lang),
            allergens: localization::pick(&item.record, columns::ALLERGENS, lang),
            price: item.formatted_price(),
            takeaway: item.is_takeaway(takeaway),
            sold_out: item.is_sold_out(),
        }
    }

    /// The machine-readable attributes the filter engine and the snapshot
    /// builder read back.
    fn tag(&self, node: Markup) -> Markup {
        node.attr(markup::ATTR_CATEGORY, self.category)
            .attr(markup::ATTR_ALLERGENS, self.allergens)
            .attr(markup::ATTR_TAKEAWAY, markup::flag(self.takeaway))
            .attr(markup::ATTR_SOLDOUT, markup::flag(self.sold_out))
    }
}

/// Full markup for every category group, in group order.
pub fn render_groups(
    groups: &[CategoryGroup],
    lang: Language,
    takeaway: &TakeawayItems,
) -> Vec<Markup> {
    groups
        .iter()
        .map(|g| render_group(g, lang, takeaway))
        .collect()
}

fn render_group(group: &CategoryGroup, lang: Language, takeaway: &TakeawayItems) -> Markup {
    let mut node = Markup::element("div")
        .class(markup::CATEGORY)
        .attr(markup::ATTR_CATEGORY, &group.category)
        .child(
            Markup::element("div")
                .class(markup::CATEGORY_TITLE)
                .with_text(group.label(lang)),
        )
        .child(Markup::element("hr").class(markup::CATEGORY_RULE));

    let (photo, text): (Vec<&MenuItem>, Vec<&MenuItem>) =
        group.items.iter().partition(|item| item.has_photo());

    if !photo.is_empty() {
        node = node.child(
            Markup::element("div").class(markup::PHOTO_GRID).children(
                photo
                    .into_iter()
                    .map(|item| photo_card(group, item, lang, takeaway)),
            ),
        );
    }
    if !text.is_empty() {
        node = node.child(
            Markup::element("div").class(markup::TEXT_LIST).children(
                text.into_iter()
                    .map(|item| text_item(group, item, lang, takeaway)),
            ),
        );
    }
    node
}

fn allergen_line(class: &str, allergens: &str, lang: Language) -> Markup {
    Markup::element("p").class(class).child(
        Markup::element("em").with_text(format!(
            "{}: {allergens}",
            Label::Allergens.text(lang)
        )),
    )
}

fn photo_card(
    group: &CategoryGroup,
    item: &MenuItem,
    lang: Language,
    takeaway: &TakeawayItems,
) -> Markup {
    let fields = ItemFields::new(group, item, lang, takeaway);

    let mut image = Markup::element("div")
        .class(markup::PHOTO_CARD_IMAGE)
        .attr(markup::ATTR_IMAGE, item.image_url())
        .attr("style", markup::background_image(item.image_url()));
    if !fields.allergens.is_empty() {
        image = image.child(
            Markup::element("div")
                .class(markup::ALLERGEN_BADGE)
                .with_text(Label::Allergens.text(lang)),
        );
    }
    if fields.sold_out {
        image = image.child(
            Markup::element("div")
                .class(markup::PHOTO_CARD_SOLDOUT)
                .with_text(Label::SoldOut.text(lang)),
        );
    }

    let mut body = Markup::element("div").class(markup::PHOTO_CARD_BODY).child(
        Markup::element("div")
            .class(markup::PHOTO_CARD_NAME)
            .with_text(fields.name),
    );
    if !fields.description.is_empty() {
        body = body.child(
            Markup::element("p")
                .class(markup::PHOTO_CARD_DESC)
                .with_text(fields.description),
        );
    }
    if !fields.allergens.is_empty() {
        body = body.child(allergen_line(
            markup::PHOTO_CARD_ALLERGENS,
            fields.allergens,
            lang,
        ));
    }
    if !fields.price.is_empty() {
        body = body.child(
            Markup::element("div")
                .class(markup::PHOTO_CARD_PRICE)
                .with_text(fields.price.as_str()),
        );
    }

    fields
        .tag(Markup::element("div").class(markup::PHOTO_CARD))
        .child(image)
        .child(body)
}

fn text_item(
    group: &CategoryGroup,
    item: &MenuItem,
    lang: Language,
    takeaway: &TakeawayItems,
) -> Markup {
    let fields = ItemFields::new(group, item, lang, takeaway);
    let with_soldout = |class: &str| {
        if fields.sold_out {
            format!("{class} {}", markup::SOLDOUT)
        } else {
            class.to_string()
        }
    };

    let mut name = Markup::element("h3")
        .class(with_soldout(markup::TEXT_ITEM_NAME))
        .with_text(fields.name);
    if fields.sold_out {
        name = name.child(
            Markup::element("span")
                .class(markup::TEXT_ITEM_SOLDOUT)
                .with_text(Label::SoldOut.text(lang)),
        );
    }

    let mut content = Markup::element("div")
        .class(markup::TEXT_ITEM_CONTENT)
        .child(
            Markup::element("div")
                .class(markup::TEXT_ITEM_HEADER)
                .child(name),
        );
    if !fields.description.is_empty() {
        content = content.child(
            Markup::element("p")
                .class(markup::TEXT_ITEM_DESC)
                .with_text(fields.description),
        );
    }
    if !fields.allergens.is_empty() {
        content = content.child(allergen_line(
            markup::TEXT_ITEM_ALLERGENS,
            fields.allergens,
            lang,
        ));
    }

    let mut node = fields
        .tag(Markup::element("div").class(markup::TEXT_ITEM))
        .child(content);
    if !fields.price.is_empty() {
        node = node.child(
            Markup::element("div")
                .class(with_soldout(markup::TEXT_ITEM_PRICE))
                .with_text(fields.price.as_str()),
        );
    }
    node
}
