//! Shared helpers for benchmarks

use dockyard::model::{
    Alignment, ContentSpec, DockState, NestedLink, NestedPaneCollection, PaneId, Rect,
};
use dockyard::DockEngine;

pub const SURFACE: Rect = Rect {
    x: 0.0,
    y: 0.0,
    width: 1920.0,
    height: 1080.0,
};

/// Balanced split chain with `len` panes
#[allow(dead_code)]
pub fn make_chain(len: u64) -> NestedPaneCollection {
    let alignments = [Alignment::Right, Alignment::Bottom, Alignment::Left, Alignment::Top];
    let mut chain = NestedPaneCollection::new();
    for i in 0..len {
        let alignment = alignments[i as usize % alignments.len()];
        chain.push(PaneId(i + 1), NestedLink::new(PaneId(i / 2 + 1), alignment, 0.5));
    }
    chain
}

/// Engine with `documents` document panes, a tool pane on every edge and one
/// floating window
#[allow(dead_code)]
pub fn make_engine(documents: usize) -> DockEngine {
    let mut engine = DockEngine::default();
    engine.set_surface_bounds(SURFACE);
    engine.batch(|engine| {
        for i in 0..documents {
            let content = engine.create_content(ContentSpec::new(format!("doc{}", i)));
            let _ = engine.new_pane(content, DockState::Document);
        }
        for (key, state) in [
            ("explorer", DockState::DockLeft),
            ("outline", DockState::DockRight),
            ("toolbar", DockState::DockTop),
            ("output", DockState::AutoHideBottom),
            ("search", DockState::Float),
        ] {
            let content = engine.create_content(ContentSpec::new(key));
            let _ = engine.new_pane(content, state);
        }
    });
    engine.take_commands();
    engine
}
