use std::time::Duration;

use crate::dom::{DocumentTree, NodeId, markup};
use crate::localization::{Label, Language};
use crate::reconcile::delay::Delay;

pub const VISIBLE_OPACITY: &str = "0.8";

/// Handle to a root's status indicator. Roots without one simply skip every
/// status update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusIndicator {
    node: NodeId,
}

impl StatusIndicator {
    pub fn find(tree: &DocumentTree, root: NodeId) -> Option<Self> {
        tree.first_by_class(root, markup::STATUS)
            .map(|node| Self { node })
    }

    pub fn show(&self, tree: &mut DocumentTree, label: Label, lang: Language) {
        tree.set_text(self.node, label.text(lang));
        tree.set_attr(self.node, "style", format!("opacity: {VISIBLE_OPACITY}"));
    }

    /// Make the indicator invisible, then empty it. The element itself stays
    /// so the layout does not shift.
    pub fn fade_out(&self, tree: &mut DocumentTree, delay: &mut dyn Delay, clear_after: Duration) {
        tree.set_attr(self.node, "style", "opacity: 0");
        delay.wait(clear_after);
        tree.set_text(self.node, "");
    }

    pub fn text(&self, tree: &DocumentTree) -> String {
        tree.text_content(self.node)
    }

    pub fn is_visible(&self, tree: &DocumentTree) -> bool {
        tree.attr(self.node, "style") != Some("opacity: 0")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::page_skeleton;
    use crate::reconcile::delay::RecordingDelay;

    #[test]
    fn test_show_then_fade() {
        let mut tree = page_skeleton(&[Language::English]);
        let root = tree.first_by_class(tree.root(), markup::ROOT).unwrap();
        let status = StatusIndicator::find(&tree, root).unwrap();
        let mut delay = RecordingDelay::default();

        status.show(&mut tree, Label::Updating, Language::English);
        assert_eq!(status.text(&tree), "Updating menu...");
        assert!(status.is_visible(&tree));

        status.fade_out(&mut tree, &mut delay, Duration::from_millis(300));
        assert_eq!(status.text(&tree), "");
        assert!(!status.is_visible(&tree));
        assert_eq!(delay.waits, vec![Duration::from_millis(300)]);
    }
}
