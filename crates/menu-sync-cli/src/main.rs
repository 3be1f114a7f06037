use anyhow::Result;
use menu_sync_config::{Config, StatusPhases as StatusPhasesSetting, TimingConfig};
use menu_sync_engine::{
    Delay, DocumentTree, FileSource, Language, MenuPipeline, NoDelay, Outcome, PhaseTiming,
    PipelineConfig, SnapshotFields, StatusPhases, TakeawayItems, ThreadSleep, dom::markup,
    io, page_skeleton, to_html,
};
use std::{
    env,
    path::{Path, PathBuf},
    process,
};

fn pipeline_config(config: &Config) -> PipelineConfig {
    PipelineConfig {
        takeaway: TakeawayItems::new(config.takeaway_items.iter().cloned()),
        timing: phase_timing(&config.timing),
        status_phases: status_phases(config.status_phases),
        snapshot_fields: SnapshotFields {
            image_url: config.compare_image_urls,
        },
    }
}

// The config crate stays independent of the engine, so the two enums are
// mapped here rather than through a `From` impl neither crate can host.
fn status_phases(setting: StatusPhasesSetting) -> StatusPhases {
    match setting {
        StatusPhasesSetting::Full => StatusPhases::Full,
        StatusPhasesSetting::Minimal => StatusPhases::Minimal,
    }
}

fn phase_timing(timing: &TimingConfig) -> PhaseTiming {
    PhaseTiming {
        unchanged_fade: timing.unchanged_fade(),
        updating_delay: timing.updating_delay(),
        render_delay: timing.render_delay(),
        updated_fade: timing.updated_fade(),
        clear_delay: timing.clear_delay(),
    }
}

/// Saved page from the last run, or a fresh skeleton with one root per
/// language.
fn load_page(path: &Path) -> Result<DocumentTree> {
    match io::load_page(path)? {
        Some(tree) => {
            log::info!("loaded page state from {}", path.display());
            Ok(tree)
        }
        None => {
            log::info!("no page state at {}, starting from an empty page", path.display());
            Ok(page_skeleton(&Language::ALL))
        }
    }
}

/// Write one markup file per display root. A failing language is logged and
/// does not stop the others. Returns the number of files written.
fn publish_roots(tree: &DocumentTree, output_dir: &Path) -> usize {
    let mut written = 0;
    for root in tree.find_by_class(tree.root(), markup::ROOT) {
        let lang = tree
            .attr(root, markup::ATTR_LANG)
            .map(Language::from_tag)
            .unwrap_or_default();
        let path = output_dir.join(format!("menu-{}.html", lang.tag()));
        match io::write_file(&path, &to_html(tree, root)) {
            Ok(()) => {
                log::info!("published {lang} menu to {}", path.display());
                written += 1;
            }
            Err(e) => log::error!("failed to publish {lang} menu to {}: {e}", path.display()),
        }
    }
    written
}

fn run(config: &Config) -> Result<()> {
    let pipeline = MenuPipeline::new(pipeline_config(config));
    let mut tree = load_page(&config.page_path)?;
    let source = FileSource::new(&config.source_path);

    let mut sleep = ThreadSleep;
    let mut no_delay = NoDelay;
    let delay: &mut dyn Delay = if config.timing.enabled {
        &mut sleep
    } else {
        &mut no_delay
    };

    let reports = pipeline.run_cycle(&source, &mut tree, delay)?;
    let updated = reports
        .iter()
        .filter(|r| r.outcome == Outcome::Updated)
        .count();
    log::info!(
        "reconciled {} display roots, {updated} updated",
        reports.len()
    );

    io::save_page(&config.page_path, &tree)?;
    publish_roots(&tree, &config.output_dir);
    Ok(())
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // Determine config path from CLI args or the default location
    let args: Vec<String> = env::args().collect();
    let (config_path, loaded) = if args.len() == 2 {
        let path = PathBuf::from(&args[1]);
        let loaded = Config::load_from_path(&path);
        (path, loaded)
    } else if args.len() == 1 {
        (Config::config_path(), Config::load())
    } else {
        eprintln!("Usage: {} [config-file-path]", args[0]);
        process::exit(1);
    };

    let config = match loaded {
        Ok(Some(config)) => config,
        Ok(None) => {
            eprintln!("Error: No config file found at {}", config_path.display());
            eprintln!("Usage: {} [config-file-path]", args[0]);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = run(&config) {
        log::error!("menu sync failed: {e:#}");
        process::exit(1);
    }
}
