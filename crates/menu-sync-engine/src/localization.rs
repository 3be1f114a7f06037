use std::fmt;

use serde::{Deserialize, Serialize};

use crate::records::Record;

/// Languages a display root can request.
///
/// Norwegian is the source language of the spreadsheet; English is read from
/// the `_en` companion columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "no")]
    Norwegian,
    #[serde(rename = "en")]
    English,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Norwegian, Language::English];

    /// Resolve a `data-lang` attribute. Anything other than "en" is the
    /// default language.
    pub fn from_tag(tag: &str) -> Self {
        if tag.trim().eq_ignore_ascii_case("en") {
            Language::English
        } else {
            Language::Norwegian
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Language::Norwegian => "no",
            Language::English => "en",
        }
    }

    pub fn is_source(self) -> bool {
        self == Language::Norwegian
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Pick the display string for `base` in `lang`, falling back to the other
/// language's column so a missing translation never renders blank.
pub fn pick<'a>(record: &'a Record, base: &str, lang: Language) -> &'a str {
    let source = record.get(base);
    let companion = record.get(&format!("{base}_en"));
    pick_pair(source, companion, lang)
}

/// Same fallback rule for values that are not stored in a record.
pub fn pick_pair<'a>(source: &'a str, companion: &'a str, lang: Language) -> &'a str {
    let (preferred, fallback) = if lang.is_source() {
        (source, companion)
    } else {
        (companion, source)
    };
    if preferred.is_empty() { fallback } else { preferred }
}

/// Fixed interface strings shown by the renderer and the status indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    AllCategories,
    Allergens,
    SoldOut,
    Checking,
    Updating,
    Updated,
}

impl Label {
    pub fn text(self, lang: Language) -> &'static str {
        match (self, lang) {
            (Label::AllCategories, Language::Norwegian) => "Alle",
            (Label::AllCategories, Language::English) => "All",
            (Label::Allergens, Language::Norwegian) => "Allergener",
            (Label::Allergens, Language::English) => "Allergens",
            (Label::SoldOut, Language::Norwegian) => "UTSOLGT",
            (Label::SoldOut, Language::English) => "SOLD OUT",
            (Label::Checking, Language::Norwegian) => "Sjekker om det er endringer...",
            (Label::Checking, Language::English) => "Checking for changes...",
            (Label::Updating, Language::Norwegian) => "Oppdaterer meny...",
            (Label::Updating, Language::English) => "Updating menu...",
            (Label::Updated, Language::Norwegian) => "Meny oppdatert!",
            (Label::Updated, Language::English) => "Menu updated!",
        }
    }
}
