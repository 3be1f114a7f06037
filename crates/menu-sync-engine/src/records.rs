use std::collections::BTreeMap;

use crate::tabular::Row;

/// Column names the menu model reads. Any other column is carried along
/// untouched.
pub mod columns {
    pub const CATEGORY: &str = "category";
    pub const CATEGORY_EN: &str = "category_en";
    pub const ITEM_NAME: &str = "item_name";
    pub const DESCRIPTION: &str = "description";
    pub const ALLERGENS: &str = "allergens";
    pub const PRICE: &str = "price";
    pub const ORDER: &str = "order";
    pub const AVAILABLE: &str = "available";
    pub const SOLD_OUT: &str = "sold_out";
    pub const IMAGE_URL: &str = "image_url";
}

/// One menu item's trimmed field values keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    /// Value of a column, or the empty string when the column is unknown.
    pub fn get(&self, column: &str) -> &str {
        self.fields.get(column).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), value.into());
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// True when the column holds the literal "true", ignoring case.
    pub fn flag(&self, column: &str) -> bool {
        self.get(column).eq_ignore_ascii_case("true")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::default();
        for (k, v) in iter {
            record.set(k, v);
        }
        record
    }
}

/// Map parsed rows to records using the first row as the header.
///
/// Missing trailing fields become empty strings and fields past the header
/// are dropped. Rows whose fields all trim to empty are skipped. Nothing here
/// fails: a malformed row degrades to a partial record.
pub fn map_records(rows: &[Row]) -> Vec<Record> {
    let Some((header, body)) = rows.split_first() else {
        return Vec::new();
    };
    let headers: Vec<&str> = header.iter().map(|h| h.trim()).collect();

    body.iter()
        .filter(|row| row.iter().any(|field| !field.trim().is_empty()))
        .map(|row| {
            headers
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let value = row.get(i).map(|f| f.trim()).unwrap_or("");
                    (*name, value)
                })
                .collect()
        })
        .collect()
}
