//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use dockyard::model::{
    AnchorRegion, ContainerId, ContentId, ContentSpec, DockAreas, DockState, PaneId, Rect,
};
use dockyard::DockEngine;

pub const SURFACE: Rect = Rect {
    x: 0.0,
    y: 0.0,
    width: 800.0,
    height: 600.0,
};

pub const DOCUMENT: ContainerId = ContainerId::Anchor(AnchorRegion::Document);
pub const LEFT: ContainerId = ContainerId::Anchor(AnchorRegion::Left);
pub const BOTTOM: ContainerId = ContainerId::Anchor(AnchorRegion::Bottom);

/// Engine laid out on an 800x600 surface
pub fn test_engine() -> DockEngine {
    let mut engine = DockEngine::default();
    engine.set_surface_bounds(SURFACE);
    engine.take_commands();
    engine
}

/// Create a content and put it into a pane of its own
pub fn add_pane(engine: &mut DockEngine, key: &str, state: DockState) -> (ContentId, PaneId) {
    let content = engine.create_content(ContentSpec::new(key));
    let pane = engine.new_pane(content, state).unwrap();
    (content, pane)
}

/// Same as `add_pane` for a tool window that may not enter the document area
pub fn add_tool_pane(engine: &mut DockEngine, key: &str, state: DockState) -> (ContentId, PaneId) {
    let content = engine.create_content(ContentSpec::new(key).with_allowed(DockAreas::TOOL));
    let pane = engine.new_pane(content, state).unwrap();
    (content, pane)
}

/// Resolver that knows every persist key
pub fn resolve_all(key: &str) -> Option<ContentSpec> {
    Some(ContentSpec::new(key))
}

pub fn rect_of(engine: &DockEngine, pane: PaneId) -> Rect {
    engine.pane(pane).unwrap().rect
}

/// Rectangles of every displayed pane of a container
pub fn displayed_rects(engine: &DockEngine, container: ContainerId) -> Vec<Rect> {
    engine
        .container(container)
        .unwrap()
        .nested_panes
        .panes()
        .filter(|p| engine.is_pane_displayed(*p))
        .map(|p| rect_of(engine, p))
        .collect()
}

/// Assert that `rects` cover `area` exactly without overlapping
pub fn assert_tiles(area: Rect, rects: &[Rect]) {
    let total: f32 = rects.iter().map(Rect::area).sum();
    assert_eq!(total, area.area(), "pane areas do not add up to {:?}: {:?}", area, rects);

    for (i, a) in rects.iter().enumerate() {
        assert!(
            a.x >= area.x && a.y >= area.y && a.right() <= area.right() && a.bottom() <= area.bottom(),
            "{:?} escapes {:?}",
            a,
            area
        );
        for b in &rects[i + 1..] {
            assert!(!a.intersects(b), "{:?} overlaps {:?}", a, b);
        }
    }
}
