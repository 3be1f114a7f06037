use menu_sync_engine::dom::html::inner_html;
use menu_sync_engine::dom::markup;
use menu_sync_engine::{
    DocumentTree, FileSource, Language, MenuPipeline, NoDelay, NodeId, Outcome, Phase,
    PipelineConfig, RecordingDelay, SourceError, StaticSource, TakeawayItems, page_skeleton,
};
use pretty_assertions::assert_eq;

const SOUP: &str = "category,item_name,price,order,available\nSoup,Tomato,89,1,true\n";

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"))
}

fn root_for(tree: &DocumentTree, lang: Language) -> NodeId {
    tree.find_by_class(tree.root(), markup::ROOT)
        .into_iter()
        .find(|r| tree.attr(*r, markup::ATTR_LANG) == Some(lang.tag()))
        .unwrap()
}

fn dynamic_html(tree: &DocumentTree, lang: Language) -> String {
    let dynamic = tree
        .first_by_class(root_for(tree, lang), markup::DYNAMIC)
        .unwrap();
    inner_html(tree, dynamic)
}

/// Rendered item names of one root, in document order.
fn item_names(tree: &DocumentTree, lang: Language) -> Vec<String> {
    let root = root_for(tree, lang);
    tree.descendants(root)
        .into_iter()
        .filter(|n| {
            tree.has_class(*n, markup::PHOTO_CARD_NAME) || tree.has_class(*n, markup::TEXT_ITEM_NAME)
        })
        .map(|n| tree.own_text(n))
        .collect()
}

#[test]
fn unchanged_cycle_keeps_markup_byte_for_byte() {
    let pipeline = MenuPipeline::default();
    let mut tree = page_skeleton(&[Language::Norwegian]);
    let source = StaticSource(SOUP.to_string());

    let first = pipeline.run_cycle(&source, &mut tree, &mut NoDelay).unwrap();
    assert_eq!(first[0].outcome, Outcome::Updated);
    let rendered = dynamic_html(&tree, Language::Norwegian);
    assert!(rendered.contains("89,-"));

    let second = pipeline.run_cycle(&source, &mut tree, &mut NoDelay).unwrap();
    assert_eq!(second[0].outcome, Outcome::Unchanged);
    assert_eq!(
        second[0].phases,
        vec![Phase::Checking, Phase::Unchanged, Phase::Idle]
    );
    assert_eq!(dynamic_html(&tree, Language::Norwegian), rendered);
}

#[test]
fn image_url_with_quotes_settles_to_unchanged() {
    let text = "category,item_name,image_url,available\n\
        Pizza,Margherita,https://img.example/chef's-pizza.jpg,true\n";
    let pipeline = MenuPipeline::default();
    let mut tree = page_skeleton(&Language::ALL);

    let first = pipeline.render_page(text, &mut tree, &mut NoDelay);
    let second = pipeline.render_page(text, &mut tree, &mut NoDelay);
    let third = pipeline.render_page(text, &mut tree, &mut NoDelay);

    assert!(first.iter().all(|r| r.outcome == Outcome::Updated));
    assert!(second.iter().all(|r| r.outcome == Outcome::Unchanged));
    assert!(third.iter().all(|r| r.outcome == Outcome::Unchanged));
}

#[test]
fn repeated_cycles_keep_the_tree_bounded() {
    let text = std::fs::read_to_string(fixture("lunch.csv")).unwrap();
    let pipeline = MenuPipeline::default();
    let mut tree = page_skeleton(&Language::ALL);
    pipeline.render_page(&text, &mut tree, &mut NoDelay);
    pipeline.render_page(&text, &mut tree, &mut NoDelay);
    let settled = tree.arena_len();

    for _ in 0..200 {
        pipeline.render_page(&text, &mut tree, &mut NoDelay);
    }
    assert_eq!(tree.arena_len(), settled);

    // A real update frees the old content before mounting the new one.
    pipeline.render_page(SOUP, &mut tree, &mut NoDelay);
    pipeline.render_page(&text, &mut tree, &mut NoDelay);
    assert!(tree.arena_len() <= settled + 8);
}

#[test]
fn addition_is_detected_and_ordered_after_the_first_item() {
    let pipeline = MenuPipeline::default();
    let mut tree = page_skeleton(&[Language::Norwegian]);
    pipeline
        .run_cycle(&StaticSource(SOUP.to_string()), &mut tree, &mut NoDelay)
        .unwrap();

    // The new row comes first in the file but has the higher order value.
    let grown = "category,item_name,price,order,available\n\
        Soup,Carrot,79,2,true\n\
        Soup,Tomato,89,1,true\n";
    let mut delay = RecordingDelay::default();
    let reports = pipeline
        .run_cycle(&StaticSource(grown.to_string()), &mut tree, &mut delay)
        .unwrap();

    assert_eq!(reports[0].outcome, Outcome::Updated);
    assert_eq!(
        reports[0].phases,
        vec![Phase::Checking, Phase::Updating, Phase::Updated, Phase::Idle]
    );
    assert_eq!(delay.waits.len(), 4);
    assert_eq!(item_names(&tree, Language::Norwegian), vec!["Tomato", "Carrot"]);
}

#[test]
fn row_order_does_not_change_the_outcome() {
    let text = std::fs::read_to_string(fixture("lunch.csv")).unwrap();
    let mut lines: Vec<&str> = text.lines().collect();
    let header = lines.remove(0);
    lines.reverse();
    let shuffled = format!("{header}\n{}", lines.join("\n"));

    let pipeline = MenuPipeline::default();
    let mut tree = page_skeleton(&Language::ALL);
    pipeline.render_page(&text, &mut tree, &mut NoDelay);
    let reports = pipeline.render_page(&shuffled, &mut tree, &mut NoDelay);

    assert!(reports.iter().all(|r| r.outcome == Outcome::Unchanged));
}

#[test]
fn fetch_failure_leaves_published_content_standing() {
    let pipeline = MenuPipeline::default();
    let mut tree = page_skeleton(&Language::ALL);
    pipeline
        .run_cycle(&StaticSource(SOUP.to_string()), &mut tree, &mut NoDelay)
        .unwrap();
    let before = tree.to_markup(tree.root());

    let missing = FileSource::new(fixture("does-not-exist.csv"));
    let result = pipeline.run_cycle(&missing, &mut tree, &mut NoDelay);

    assert!(matches!(result, Err(SourceError::NotFound(_))));
    assert_eq!(tree.to_markup(tree.root()), before);
}

#[test]
fn unavailable_items_never_render() {
    let pipeline = MenuPipeline::default();
    let mut tree = page_skeleton(&Language::ALL);
    pipeline
        .run_cycle(&FileSource::new(fixture("lunch.csv")), &mut tree, &mut NoDelay)
        .unwrap();

    for lang in Language::ALL {
        assert!(!item_names(&tree, lang).contains(&"Taco".to_string()));
    }
}

#[test]
fn english_root_falls_back_to_norwegian_text() {
    let pipeline = MenuPipeline::default();
    let mut tree = page_skeleton(&Language::ALL);
    pipeline
        .run_cycle(&FileSource::new(fixture("lunch.csv")), &mut tree, &mut NoDelay)
        .unwrap();

    let english = dynamic_html(&tree, Language::English);
    assert!(english.contains("Fish soup"));
    // No English description, so the Norwegian one is shown as is.
    assert!(english.contains("Kremet suppe med laks, torsk og reker"));
    assert!(english.contains("With basil"));
    assert!(english.contains("Other"));

    assert_eq!(
        item_names(&tree, Language::Norwegian),
        vec!["Fiskesuppe", "Tomatsuppe", "Pizza", "Kaffe"]
    );
    assert_eq!(
        item_names(&tree, Language::English),
        vec!["Fish soup", "Tomato soup", "Pizza", "Coffee"]
    );
}

#[test]
fn takeaway_items_come_from_configuration() {
    let pipeline = MenuPipeline::new(PipelineConfig {
        takeaway: TakeawayItems::new(["Pizza"]),
        ..PipelineConfig::default()
    });
    let mut tree = page_skeleton(&[Language::Norwegian]);
    pipeline
        .run_cycle(&FileSource::new(fixture("lunch.csv")), &mut tree, &mut NoDelay)
        .unwrap();

    let root = root_for(&tree, Language::Norwegian);
    let toggle = tree
        .first_by_attr(root, markup::ATTR_FILTER, markup::FILTER_TAKEAWAY)
        .unwrap();
    tree.set_attr(toggle, "checked", "checked");
    let summary = menu_sync_engine::apply_filters(&mut tree, root);

    assert_eq!(summary.visible_items, 1);
    assert_eq!(summary.visible_categories, 1);
}
