use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::dom::{DocumentTree, NodeId, markup};
use crate::filter::apply_filters;
use crate::localization::{Label, Language};
use crate::menu::{CategoryGroup, TakeawayItems, allergen_vocabulary, category_vocabulary};
use crate::reconcile::controls::{sync_allergen_grid, sync_category_dropdown};
use crate::reconcile::delay::{Delay, PhaseTiming};
use crate::reconcile::status::StatusIndicator;
use crate::render::render_groups;
use crate::snapshot::{Snapshot, SnapshotFields};

/// Where a root is in its reconciliation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Checking,
    Unchanged,
    Updating,
    Updated,
}

/// How many status messages an update shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusPhases {
    /// Checking, then Updating, then Updated.
    #[default]
    Full,
    /// Checking, then straight to Updated.
    Minimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReconcileOptions {
    pub timing: PhaseTiming,
    pub status_phases: StatusPhases,
    pub fields: SnapshotFields,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Unchanged,
    Updated,
}

/// What one cycle did to one root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub lang: Language,
    pub outcome: Outcome,
    /// Every phase entered, in order, ending with `Idle`.
    pub phases: Vec<Phase>,
}

/// Run one reconciliation cycle for the display root at `root`.
///
/// The rendered content is only replaced when the snapshot of `groups`
/// differs from the snapshot read back from the tree. Filter controls are
/// synced and filters applied either way. Returns `None` when the root has no
/// dynamic container, leaving it untouched.
pub fn reconcile_root(
    tree: &mut DocumentTree,
    root: NodeId,
    groups: &[CategoryGroup],
    takeaway: &TakeawayItems,
    options: &ReconcileOptions,
    delay: &mut dyn Delay,
) -> Option<CycleReport> {
    let lang = tree
        .attr(root, markup::ATTR_LANG)
        .map(Language::from_tag)
        .unwrap_or_default();
    let Some(dynamic) = tree.first_by_class(root, markup::DYNAMIC) else {
        warn!("display root ({lang}) has no dynamic container, skipping");
        return None;
    };

    let status = StatusIndicator::find(tree, root);
    let mut phases = Vec::new();
    enter(&mut phases, Phase::Checking, lang);
    if let Some(status) = &status {
        status.show(tree, Label::Checking, lang);
    }

    let fresh = Snapshot::from_groups(groups, lang, takeaway, options.fields);
    let current = has_previous_render(tree, dynamic)
        .then(|| Snapshot::from_tree(tree, dynamic, options.fields));
    let timing = &options.timing;

    let outcome = if current.as_ref() == Some(&fresh) {
        info!("menu is already up to date ({lang})");
        enter(&mut phases, Phase::Unchanged, lang);
        delay.wait(timing.unchanged_fade);
        if let Some(status) = &status {
            status.fade_out(tree, delay, timing.clear_delay);
        }
        Outcome::Unchanged
    } else {
        info!("menu update detected ({lang})");
        debug!("new snapshot ({lang}): {}", fresh.to_canonical_string());

        if options.status_phases == StatusPhases::Full {
            delay.wait(timing.updating_delay);
            enter(&mut phases, Phase::Updating, lang);
            if let Some(status) = &status {
                status.show(tree, Label::Updating, lang);
            }
        }
        delay.wait(timing.render_delay);

        tree.replace_children(dynamic, &render_groups(groups, lang, takeaway));
        tree.set_attr(dynamic, markup::ATTR_RENDERED, "true");

        enter(&mut phases, Phase::Updated, lang);
        if let Some(status) = &status {
            status.show(tree, Label::Updated, lang);
        }
        delay.wait(timing.updated_fade);
        if let Some(status) = &status {
            status.fade_out(tree, delay, timing.clear_delay);
        }
        Outcome::Updated
    };

    sync_category_dropdown(tree, root, &category_vocabulary(groups, lang));
    sync_allergen_grid(tree, root, &allergen_vocabulary(groups, lang));
    apply_filters(tree, root);

    enter(&mut phases, Phase::Idle, lang);
    Some(CycleReport {
        lang,
        outcome,
        phases,
    })
}

fn enter(phases: &mut Vec<Phase>, phase: Phase, lang: Language) {
    debug!("{lang}: entering {phase:?}");
    phases.push(phase);
}

/// A root counts as rendered once it holds items or has been marked by an
/// earlier cycle, even if that cycle rendered an empty menu.
fn has_previous_render(tree: &DocumentTree, dynamic: NodeId) -> bool {
    tree.attr(dynamic, markup::ATTR_RENDERED).is_some()
        || tree.first_by_class(dynamic, markup::PHOTO_CARD).is_some()
        || tree.first_by_class(dynamic, markup::TEXT_ITEM).is_some()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::dom::{html::inner_html, page_skeleton};
    use crate::reconcile::delay::{NoDelay, RecordingDelay};
    use crate::tests::groups_from_csv;
    use pretty_assertions::assert_eq;

    const MENU: &str = "category,category_en,item_name,item_name_en,price,available\n\
        Mat,Food,Pizza,,129,true\n\
        Drikke,Drinks,Kaffe,Coffee,35,true";

    fn english_root() -> (DocumentTree, NodeId) {
        let tree = page_skeleton(&[Language::English]);
        let root = tree.first_by_class(tree.root(), markup::ROOT).unwrap();
        (tree, root)
    }

    fn ms(values: &[u64]) -> Vec<Duration> {
        values.iter().map(|v| Duration::from_millis(*v)).collect()
    }

    #[test]
    fn test_first_cycle_renders_through_all_phases() {
        let (mut tree, root) = english_root();
        let groups = groups_from_csv(MENU);
        let mut delay = RecordingDelay::default();

        let report = reconcile_root(
            &mut tree,
            root,
            &groups,
            &TakeawayItems::default(),
            &ReconcileOptions::default(),
            &mut delay,
        )
        .unwrap();

        assert_eq!(report.outcome, Outcome::Updated);
        assert_eq!(
            report.phases,
            vec![Phase::Checking, Phase::Updating, Phase::Updated, Phase::Idle]
        );
        assert_eq!(delay.waits, ms(&[800, 600, 1500, 300]));

        let status = StatusIndicator::find(&tree, root).unwrap();
        assert!(!status.is_visible(&tree));
        assert_eq!(status.text(&tree), "");
        assert_eq!(tree.find_by_class(root, markup::CATEGORY).len(), 2);
    }

    #[test]
    fn test_second_cycle_with_same_data_leaves_content_alone() {
        let (mut tree, root) = english_root();
        let groups = groups_from_csv(MENU);
        let takeaway = TakeawayItems::default();
        let options = ReconcileOptions::default();
        reconcile_root(&mut tree, root, &groups, &takeaway, &options, &mut NoDelay);
        let dynamic = tree.first_by_class(root, markup::DYNAMIC).unwrap();
        let before = inner_html(&tree, dynamic);

        let mut delay = RecordingDelay::default();
        let report =
            reconcile_root(&mut tree, root, &groups, &takeaway, &options, &mut delay).unwrap();

        assert_eq!(report.outcome, Outcome::Unchanged);
        assert_eq!(report.phases, vec![Phase::Checking, Phase::Unchanged, Phase::Idle]);
        assert_eq!(delay.waits, ms(&[800, 300]));
        assert_eq!(inner_html(&tree, dynamic), before);
    }

    #[test]
    fn test_minimal_phases_skip_the_updating_message() {
        let (mut tree, root) = english_root();
        let options = ReconcileOptions {
            status_phases: StatusPhases::Minimal,
            ..ReconcileOptions::default()
        };
        let mut delay = RecordingDelay::default();

        let report = reconcile_root(
            &mut tree,
            root,
            &groups_from_csv(MENU),
            &TakeawayItems::default(),
            &options,
            &mut delay,
        )
        .unwrap();

        assert_eq!(report.phases, vec![Phase::Checking, Phase::Updated, Phase::Idle]);
        assert_eq!(delay.waits, ms(&[600, 1500, 300]));
    }

    #[test]
    fn test_empty_menu_is_rendered_once() {
        let (mut tree, root) = english_root();
        let options = ReconcileOptions::default();
        let takeaway = TakeawayItems::default();

        let first = reconcile_root(&mut tree, root, &[], &takeaway, &options, &mut NoDelay).unwrap();
        let second =
            reconcile_root(&mut tree, root, &[], &takeaway, &options, &mut NoDelay).unwrap();

        assert_eq!(first.outcome, Outcome::Updated);
        assert_eq!(second.outcome, Outcome::Unchanged);
    }

    #[test]
    fn test_dropdown_follows_the_menu() {
        let (mut tree, root) = english_root();
        let takeaway = TakeawayItems::default();
        let options = ReconcileOptions::default();
        reconcile_root(&mut tree, root, &groups_from_csv(MENU), &takeaway, &options, &mut NoDelay);

        let labels = |tree: &DocumentTree| {
            tree.find_by_class(root, markup::DROPDOWN_ITEM)
                .into_iter()
                .map(|n| tree.text_content(n))
                .collect::<Vec<_>>()
        };
        assert_eq!(labels(&tree), vec!["All", "Food", "Drinks"]);

        let only_food = "category,category_en,item_name,available\nMat,Food,Pizza,true";
        reconcile_root(&mut tree, root, &groups_from_csv(only_food), &takeaway, &options, &mut NoDelay);
        assert_eq!(labels(&tree), vec!["All", "Food"]);
    }

    #[test]
    fn test_root_without_dynamic_container_is_skipped() {
        let mut tree = DocumentTree::from_markup(
            &crate::dom::Markup::element("body").child(
                crate::dom::Markup::element("div")
                    .class(markup::ROOT)
                    .attr(markup::ATTR_LANG, "no"),
            ),
        );
        let root = tree.first_by_class(tree.root(), markup::ROOT).unwrap();

        let report = reconcile_root(
            &mut tree,
            root,
            &groups_from_csv(MENU),
            &TakeawayItems::default(),
            &ReconcileOptions::default(),
            &mut NoDelay,
        );
        assert_eq!(report, None);
    }
}
