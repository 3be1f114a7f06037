use log::{debug, error, info};

use crate::dom::{DocumentTree, markup};
use crate::io::{MenuSource, SourceError};
use crate::menu::{CategoryGroup, TakeawayItems, normalize};
use crate::reconcile::{
    CycleReport, Delay, PhaseTiming, ReconcileOptions, StatusPhases, reconcile_root,
};
use crate::records::map_records;
use crate::snapshot::SnapshotFields;
use crate::tabular::parse_rows;

#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub takeaway: TakeawayItems,
    pub timing: PhaseTiming,
    pub status_phases: StatusPhases,
    pub snapshot_fields: SnapshotFields,
}

/// Fetch, parse, normalize and reconcile every display root of a page.
#[derive(Debug, Clone, Default)]
pub struct MenuPipeline {
    config: PipelineConfig,
}

impl MenuPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Delimited text to grouped, sorted, available-only menu.
    pub fn build_model(&self, text: &str) -> Vec<CategoryGroup> {
        let rows = parse_rows(text);
        let records = map_records(&rows);
        let record_count = records.len();
        let groups = normalize(records);
        debug!(
            "parsed {} rows into {} records, {} categories",
            rows.len(),
            record_count,
            groups.len()
        );
        groups
    }

    /// Reconcile every `.menu-root` in `tree` against `text`, one root after
    /// the other.
    pub fn render_page(
        &self,
        text: &str,
        tree: &mut DocumentTree,
        delay: &mut dyn Delay,
    ) -> Vec<CycleReport> {
        let groups = self.build_model(text);
        let options = ReconcileOptions {
            timing: self.config.timing,
            status_phases: self.config.status_phases,
            fields: self.config.snapshot_fields,
        };

        let roots = tree.find_by_class(tree.root(), markup::ROOT);
        if roots.is_empty() {
            info!("page has no display roots, nothing to reconcile");
        }
        let mut reports = Vec::with_capacity(roots.len());
        for root in roots {
            if let Some(report) =
                reconcile_root(tree, root, &groups, &self.config.takeaway, &options, delay)
            {
                reports.push(report);
            }
        }
        reports
    }

    /// One full cycle. A fetch failure is logged and returned with the tree
    /// left exactly as it was.
    pub fn run_cycle(
        &self,
        source: &dyn MenuSource,
        tree: &mut DocumentTree,
        delay: &mut dyn Delay,
    ) -> Result<Vec<CycleReport>, SourceError> {
        let text = source.fetch().inspect_err(|e| {
            error!("failed to fetch menu; existing content left as is: {e}");
        })?;
        Ok(self.render_page(&text, tree, delay))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::page_skeleton;
    use crate::io::StaticSource;
    use crate::localization::Language;
    use crate::reconcile::{NoDelay, Outcome};

    struct FailingSource;

    impl MenuSource for FailingSource {
        fn fetch(&self) -> Result<String, SourceError> {
            Err(SourceError::NotFound("/missing/menu.csv".into()))
        }
    }

    #[test]
    fn test_build_model_drops_unavailable_records() {
        let groups = MenuPipeline::default()
            .build_model("category,item_name,available\nMat,Pizza,true\nMat,Taco,false");

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].items.len(), 1);
        assert_eq!(groups[0].items[0].name(), "Pizza");
    }

    #[test]
    fn test_every_root_is_reconciled() {
        let mut tree = page_skeleton(&Language::ALL);
        let source = StaticSource("category,item_name,available\nMat,Pizza,true".into());

        let reports = MenuPipeline::default()
            .run_cycle(&source, &mut tree, &mut NoDelay)
            .unwrap();

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].lang, Language::Norwegian);
        assert_eq!(reports[1].lang, Language::English);
        assert!(reports.iter().all(|r| r.outcome == Outcome::Updated));
    }

    #[test]
    fn test_fetch_failure_leaves_tree_untouched() {
        let mut tree = page_skeleton(&[Language::Norwegian]);
        let before = tree.to_markup(tree.root());

        let result = MenuPipeline::default().run_cycle(&FailingSource, &mut tree, &mut NoDelay);

        assert!(matches!(result, Err(SourceError::NotFound(_))));
        assert_eq!(tree.to_markup(tree.root()), before);
    }
}
