//! # Delimited Text
//!
//! Lexical handling of the spreadsheet export: `parser` turns the raw text
//! into rows of fields, `writer` turns rows back into text with the same
//! quoting rules.
//!
//! Neither side knows anything about columns or menus. Column semantics
//! start in [`crate::records`].

pub mod parser;
pub mod writer;

pub use parser::{Row, parse_rows};
pub use writer::{write_row, write_rows};
