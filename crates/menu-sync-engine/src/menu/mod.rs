//! # Menu Model
//!
//! Turns mapped records into the grouped, sorted model the renderer and the
//! snapshot builder consume.
//!
//! - **`item`**: `MenuItem`, a record plus its derived price and sort key,
//!   and the pure classifications (sold out, photo, takeaway)
//! - **`group`**: availability filter and first-seen category grouping
//! - **`collate`**: the locale-aware string order used for tie breaking
//! - **`vocabulary`**: category and allergen option lists for the filter
//!   controls
//!
//! The model is rebuilt from scratch on every cycle and never mutated
//! afterwards.

pub mod collate;
pub mod group;
pub mod item;
pub mod vocabulary;

pub use group::{CategoryGroup, FALLBACK_CATEGORY, FALLBACK_CATEGORY_EN, normalize};
pub use item::{MenuItem, TakeawayItems};
pub use vocabulary::{CategoryOption, allergen_vocabulary, category_vocabulary};
