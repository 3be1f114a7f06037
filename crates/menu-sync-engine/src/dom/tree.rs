use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Handle to a node inside a [`DocumentTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq)]
enum NodeKind {
    Element {
        tag: String,
        attrs: BTreeMap<String, String>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Owned, nested description of a subtree.
///
/// The renderer builds `Markup` values and the tree mounts them; it is also
/// the persisted form of a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Markup {
    Text(String),
    Element {
        tag: String,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        attrs: BTreeMap<String, String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        children: Vec<Markup>,
    },
}

impl Markup {
    pub fn element(tag: impl Into<String>) -> Self {
        Markup::Element {
            tag: tag.into(),
            attrs: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Markup::Text(text.into())
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let Markup::Element { attrs, .. } = &mut self {
            attrs.insert(name.into(), value.into());
        }
        self
    }

    /// Set the `class` attribute. Pass several names separated by spaces.
    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    pub fn child(mut self, child: Markup) -> Self {
        if let Markup::Element { children, .. } = &mut self {
            children.push(child);
        }
        self
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.child(Markup::text(text))
    }

    pub fn children(mut self, more: impl IntoIterator<Item = Markup>) -> Self {
        if let Markup::Element { children, .. } = &mut self {
            children.extend(more);
        }
        self
    }
}

/// Arena-backed element tree.
///
/// Removed subtrees go on a free list and their slots are reused by later
/// insertions, so a tree reconciled over and over keeps a bounded arena.
/// A `NodeId` of a removed node must not be used afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "Markup", into = "Markup")]
pub struct DocumentTree {
    nodes: Vec<Node>,
    free: Vec<NodeId>,
    root: NodeId,
}

impl Default for DocumentTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentTree {
    /// A tree holding only an empty `body` element.
    pub fn new() -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            free: Vec::new(),
            root: NodeId(0),
        };
        tree.root = tree.create_element("body");
        tree
    }

    pub fn from_markup(markup: &Markup) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            free: Vec::new(),
            root: NodeId(0),
        };
        tree.root = tree.build(markup);
        tree
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        self.push(NodeKind::Element {
            tag: tag.into(),
            attrs: BTreeMap::new(),
        })
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeKind::Text(text.into()))
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let node = Node {
            kind,
            parent: None,
            children: Vec::new(),
        };
        match self.free.pop() {
            Some(id) => {
                self.nodes[id.0] = node;
                id
            }
            None => {
                self.nodes.push(node);
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    /// Return a detached subtree's slots to the free list.
    fn release(&mut self, node: NodeId) {
        let mut stack = vec![node];
        while let Some(next) = stack.pop() {
            let slot = &mut self.nodes[next.0];
            slot.parent = None;
            slot.kind = NodeKind::Text(String::new());
            stack.append(&mut slot.children);
            self.free.push(next);
        }
    }

    /// Number of arena slots, live or free.
    pub fn arena_len(&self) -> usize {
        self.nodes.len()
    }

    fn build(&mut self, markup: &Markup) -> NodeId {
        match markup {
            Markup::Text(text) => self.create_text(text.clone()),
            Markup::Element {
                tag,
                attrs,
                children,
            } => {
                let id = self.push(NodeKind::Element {
                    tag: tag.clone(),
                    attrs: attrs.clone(),
                });
                for child in children {
                    let child = self.build(child);
                    self.append_child(id, child);
                }
                id
            }
        }
    }

    /// Mount `markup` as the last child of `parent`.
    pub fn append_markup(&mut self, parent: NodeId, markup: &Markup) -> NodeId {
        let id = self.build(markup);
        self.append_child(parent, id);
        id
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != node);
        }
    }

    /// Detach `node` and free its whole subtree.
    pub fn remove(&mut self, node: NodeId) {
        self.detach(node);
        self.release(node);
    }

    /// Free every child subtree of `node`.
    pub fn clear_children(&mut self, node: NodeId) {
        let children = std::mem::take(&mut self.nodes[node.0].children);
        for child in children {
            self.release(child);
        }
    }

    /// Drop the current children of `node` and mount `content` in their place.
    pub fn replace_children(&mut self, node: NodeId, content: &[Markup]) {
        self.clear_children(node);
        for markup in content {
            self.append_markup(node, markup);
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        match &self.nodes[node.0].kind {
            NodeKind::Element { tag, .. } => Some(tag),
            NodeKind::Text(_) => None,
        }
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        match &self.nodes[node.0].kind {
            NodeKind::Element { attrs, .. } => attrs.get(name).map(String::as_str),
            NodeKind::Text(_) => None,
        }
    }

    /// Set an attribute. Text nodes have no attributes and are left alone.
    pub fn set_attr(&mut self, node: NodeId, name: &str, value: impl Into<String>) {
        if let NodeKind::Element { attrs, .. } = &mut self.nodes[node.0].kind {
            attrs.insert(name.to_string(), value.into());
        }
    }

    pub fn remove_attr(&mut self, node: NodeId, name: &str) {
        if let NodeKind::Element { attrs, .. } = &mut self.nodes[node.0].kind {
            attrs.remove(name);
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.attr(node, "class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if self.has_class(node, class) || self.tag(node).is_none() {
            return;
        }
        let classes = match self.attr(node, "class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {class}", existing.trim()),
            _ => class.to_string(),
        };
        self.set_attr(node, "class", classes);
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if !self.has_class(node, class) {
            return;
        }
        let remaining: Vec<String> = self
            .attr(node, "class")
            .unwrap_or("")
            .split_whitespace()
            .filter(|c| *c != class)
            .map(str::to_string)
            .collect();
        if remaining.is_empty() {
            self.remove_attr(node, "class");
        } else {
            self.set_attr(node, "class", remaining.join(" "));
        }
    }

    pub fn toggle_class(&mut self, node: NodeId, class: &str, on: bool) {
        if on {
            self.add_class(node, class);
        } else {
            self.remove_class(node, class);
        }
    }

    /// All nodes below `node` in document order, excluding `node` itself.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    pub fn find_by_class(&self, node: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(node)
            .into_iter()
            .filter(|n| self.has_class(*n, class))
            .collect()
    }

    pub fn first_by_class(&self, node: NodeId, class: &str) -> Option<NodeId> {
        self.descendants(node)
            .into_iter()
            .find(|n| self.has_class(*n, class))
    }

    pub fn first_by_attr(&self, node: NodeId, name: &str, value: &str) -> Option<NodeId> {
        self.descendants(node)
            .into_iter()
            .find(|n| self.attr(*n, name) == Some(value))
    }

    pub fn first_by_tag(&self, node: NodeId, tag: &str) -> Option<NodeId> {
        self.descendants(node)
            .into_iter()
            .find(|n| self.tag(*n) == Some(tag))
    }

    pub fn element_by_id(&self, node: NodeId, id: &str) -> Option<NodeId> {
        self.first_by_attr(node, "id", id)
    }

    /// Nearest ancestor-or-self carrying `class`.
    pub fn closest(&self, node: NodeId, class: &str) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(n) = current {
            if self.has_class(n, class) {
                return Some(n);
            }
            current = self.parent(n);
        }
        None
    }

    /// Concatenated text of every text node below `node`.
    pub fn text_content(&self, node: NodeId) -> String {
        if let NodeKind::Text(text) = &self.nodes[node.0].kind {
            return text.clone();
        }
        self.descendants(node)
            .into_iter()
            .filter_map(|n| match &self.nodes[n.0].kind {
                NodeKind::Text(text) => Some(text.as_str()),
                NodeKind::Element { .. } => None,
            })
            .collect()
    }

    /// Text of the direct text children only, skipping nested elements.
    pub fn own_text(&self, node: NodeId) -> String {
        self.children(node)
            .iter()
            .filter_map(|n| match &self.nodes[n.0].kind {
                NodeKind::Text(text) => Some(text.as_str()),
                NodeKind::Element { .. } => None,
            })
            .collect()
    }

    /// Replace every child of `node` with a single text node.
    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) {
        self.clear_children(node);
        let text = text.into();
        if !text.is_empty() {
            let child = self.create_text(text);
            self.append_child(node, child);
        }
    }

    pub fn to_markup(&self, node: NodeId) -> Markup {
        match &self.nodes[node.0].kind {
            NodeKind::Text(text) => Markup::Text(text.clone()),
            NodeKind::Element { tag, attrs } => Markup::Element {
                tag: tag.clone(),
                attrs: attrs.clone(),
                children: self
                    .children(node)
                    .iter()
                    .map(|c| self.to_markup(*c))
                    .collect(),
            },
        }
    }

    pub(crate) fn text_of(&self, node: NodeId) -> Option<&str> {
        match &self.nodes[node.0].kind {
            NodeKind::Text(text) => Some(text),
            NodeKind::Element { .. } => None,
        }
    }

    pub(crate) fn attrs(&self, node: NodeId) -> impl Iterator<Item = (&str, &str)> {
        let attrs = match &self.nodes[node.0].kind {
            NodeKind::Element { attrs, .. } => Some(attrs),
            NodeKind::Text(_) => None,
        };
        attrs
            .into_iter()
            .flat_map(|a| a.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }
}

impl From<Markup> for DocumentTree {
    fn from(markup: Markup) -> Self {
        DocumentTree::from_markup(&markup)
    }
}

impl From<DocumentTree> for Markup {
    fn from(tree: DocumentTree) -> Self {
        tree.to_markup(tree.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> DocumentTree {
        DocumentTree::from_markup(
            &Markup::element("div").class("outer").child(
                Markup::element("h3")
                    .class("name soldout")
                    .with_text("Grøt")
                    .child(Markup::element("span").with_text("UTSOLGT")),
            ),
        )
    }

    #[test]
    fn test_text_content_and_own_text() {
        let tree = sample();
        let h3 = tree.first_by_tag(tree.root(), "h3").unwrap();

        assert_eq!(tree.text_content(h3), "GrøtUTSOLGT");
        assert_eq!(tree.own_text(h3), "Grøt");
    }

    #[test]
    fn test_class_helpers() {
        let mut tree = sample();
        let h3 = tree.first_by_class(tree.root(), "name").unwrap();

        assert!(tree.has_class(h3, "soldout"));
        tree.toggle_class(h3, "soldout", false);
        assert_eq!(tree.attr(h3, "class"), Some("name"));
        tree.toggle_class(h3, "menu-hidden", true);
        tree.toggle_class(h3, "menu-hidden", true);
        assert_eq!(tree.attr(h3, "class"), Some("name menu-hidden"));
        tree.remove_class(h3, "name");
        tree.remove_class(h3, "menu-hidden");
        assert_eq!(tree.attr(h3, "class"), None);
    }

    #[test]
    fn test_closest_walks_up() {
        let tree = sample();
        let span = tree.first_by_tag(tree.root(), "span").unwrap();
        let outer = tree.closest(span, "outer").unwrap();

        assert_eq!(outer, tree.root());
        assert_eq!(tree.closest(span, "missing"), None);
    }

    #[test]
    fn test_remove_detaches_node() {
        let mut tree = sample();
        let span = tree.first_by_tag(tree.root(), "span").unwrap();
        tree.remove(span);

        assert_eq!(tree.first_by_tag(tree.root(), "span"), None);
        assert_eq!(tree.parent(span), None);
    }

    #[test]
    fn test_replace_children() {
        let mut tree = sample();
        let root = tree.root();
        tree.replace_children(root, &[Markup::element("p").with_text("ny")]);

        assert_eq!(tree.descendants(root).len(), 2);
        assert_eq!(tree.text_content(root), "ny");
    }

    #[test]
    fn test_removed_slots_are_reused() {
        let mut tree = sample();
        let root = tree.root();
        let content = [Markup::element("p").with_text("ny")];
        tree.replace_children(root, &content);
        let settled = tree.arena_len();

        for _ in 0..50 {
            tree.replace_children(root, &content);
            let p = tree.first_by_tag(root, "p").unwrap();
            tree.set_text(p, "igjen");
        }

        assert_eq!(tree.arena_len(), settled);
        assert_eq!(tree.text_content(root), "igjen");
    }

    #[test]
    fn test_markup_round_trip_drops_detached_nodes() {
        let mut tree = sample();
        let span = tree.first_by_tag(tree.root(), "span").unwrap();
        tree.remove(span);

        let markup = tree.to_markup(tree.root());
        let rebuilt = DocumentTree::from_markup(&markup);

        assert_eq!(rebuilt.to_markup(rebuilt.root()), markup);
        assert_eq!(rebuilt.descendants(rebuilt.root()).len(), 2);
    }

    #[test]
    fn test_serde_uses_nested_markup() {
        let tree = DocumentTree::from_markup(
            &Markup::element("div").attr("data-lang", "en").with_text("hei"),
        );

        let json = serde_json::to_string(&tree).unwrap();
        assert_eq!(json, r#"{"tag":"div","attrs":{"data-lang":"en"},"children":["hei"]}"#);

        let back: DocumentTree = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to_markup(back.root()), tree.to_markup(tree.root()));
    }
}
