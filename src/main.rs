use anyhow::{Context, Result};
use clap::Parser;

use dockyard::cli::{CliArgs, CliCommand};
use dockyard::model::{AnchorRegion, ContainerId, ContentSpec};
use dockyard::persist::LayoutDocument;
use dockyard::{DockEngine, EngineConfig};

fn main() -> Result<()> {
    dockyard::tracing::init();

    let args = CliArgs::parse();
    let config = match &args.config {
        Some(path) => EngineConfig::load_from(path),
        None => EngineConfig::load(),
    };

    match &args.command {
        CliCommand::Validate { path } => {
            let document = LayoutDocument::load_from_file(path)
                .with_context(|| format!("reading {}", path.display()))?;
            document.validate()?;
            println!(
                "{}: ok ({} contents, {} panes, {} floating windows)",
                path.display(),
                document.contents.len(),
                document.panes.len(),
                document.floating_windows.len()
            );
        }
        CliCommand::Inspect { path, .. } => {
            let path = match path {
                Some(path) => path.clone(),
                None => dockyard::config_paths::layout_file()
                    .context("no config directory available")?,
            };
            let document = LayoutDocument::load_from_file(&path)
                .with_context(|| format!("reading {}", path.display()))?;

            let mut engine = DockEngine::new(config);
            if let Some(surface) = args.command.surface() {
                engine.set_surface_bounds(surface);
            }
            let report = engine.load(&document, |key| Some(ContentSpec::new(key)))?;
            print_layout(&engine);
            if !report.unresolved.is_empty() {
                println!("unresolved: {}", report.unresolved.join(", "));
            }
        }
    }
    Ok(())
}

fn print_layout(engine: &DockEngine) {
    let containers = AnchorRegion::ALL
        .iter()
        .map(|region| engine.anchor_region(*region))
        .chain(engine.floating_windows());

    for container in containers {
        if container.is_empty() {
            continue;
        }
        let name = match container.id {
            ContainerId::Anchor(region) => format!("{:?}", region),
            ContainerId::Floating(window) => format!("Floating #{}", window.0),
        };
        let r = container.rect;
        println!("{} ({}, {}, {}x{})", name, r.x, r.y, r.width, r.height);

        for pane_id in container.nested_panes.panes() {
            let Some(pane) = engine.pane(pane_id) else {
                continue;
            };
            let keys: Vec<&str> = pane
                .contents
                .iter()
                .filter_map(|c| engine.content(*c))
                .map(|c| c.persist_key.as_str())
                .collect();
            let r = pane.rect;
            println!(
                "  pane {} {:?} ({}, {}, {}x{}) [{}]",
                pane.id.0,
                pane.dock_state,
                r.x,
                r.y,
                r.width,
                r.height,
                keys.join(", ")
            );
        }
    }
}
