use std::collections::BTreeSet;

use crate::records::{Record, columns};

/// Source-language item names that are offered for takeaway.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TakeawayItems(BTreeSet<String>);

impl TakeawayItems {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, item_name: &str) -> bool {
        self.0.contains(item_name)
    }
}

/// A record that passed the availability filter, with its derived fields.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub record: Record,
    /// Numeric price, absent when the column is blank or not a number.
    pub price: Option<f64>,
    /// Sort key within the category, 0 when blank.
    pub sort_key: f64,
}

impl MenuItem {
    pub fn from_record(record: Record) -> Self {
        let price = parse_number(record.get(columns::PRICE));
        let sort_key = parse_number(record.get(columns::ORDER)).unwrap_or(0.0);
        Self {
            record,
            price,
            sort_key,
        }
    }

    /// Source-language name, the identity used for sorting and takeaway.
    pub fn name(&self) -> &str {
        self.record.get(columns::ITEM_NAME)
    }

    pub fn image_url(&self) -> &str {
        self.record.get(columns::IMAGE_URL)
    }

    pub fn is_sold_out(&self) -> bool {
        self.record.flag(columns::SOLD_OUT)
    }

    pub fn has_photo(&self) -> bool {
        !self.image_url().trim().is_empty()
    }

    pub fn is_takeaway(&self, takeaway: &TakeawayItems) -> bool {
        takeaway.contains(self.name())
    }

    /// Price as shown on the page, e.g. `89,-`. Empty when there is no price.
    pub fn formatted_price(&self) -> String {
        match self.price {
            Some(price) => format!("{price},-"),
            None => String::new(),
        }
    }
}

fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}
