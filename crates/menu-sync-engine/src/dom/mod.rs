//! # Document Tree
//!
//! A small in-memory element tree standing in for the host page. The
//! renderer writes into it, the snapshot builder and the filter engine read
//! back from it, and `html` serializes it for publishing.
//!
//! - **`tree`**: arena-backed `DocumentTree` with attribute, class and text
//!   helpers plus the lookups the pipeline needs (by class, by attribute,
//!   closest ancestor)
//! - **`markup`**: class and attribute names that make up the rendered
//!   markup contract
//! - **`html`**: HTML serialization
//! - **`skeleton`**: the default page used before anything was rendered

pub mod html;
pub mod markup;
pub mod skeleton;
pub mod tree;

pub use html::to_html;
pub use skeleton::page_skeleton;
pub use tree::{DocumentTree, Markup, NodeId};
