//! Shared helpers for unit tests across the engine.

use crate::menu::{CategoryGroup, normalize};
use crate::records::map_records;
use crate::tabular::parse_rows;

/// Run the parse, map and normalize stages over literal CSV text.
pub fn groups_from_csv(csv: &str) -> Vec<CategoryGroup> {
    normalize(map_records(&parse_rows(csv)))
}
