//! Tests for saving and loading layouts

mod common;

use common::{add_pane, resolve_all, test_engine, DOCUMENT};
use dockyard::model::{Alignment, AnchorRegion, ContentSpec, DockAreas, DockState, Rect};
use dockyard::{DockEngine, DockError, DockRequest, LayoutDocument};
use tempfile::TempDir;

/// Two split documents, a tabbed left pane, an auto-hide bottom pane, two
/// floating windows (one holding a split) plus a hidden and an unassigned content
fn build_layout(engine: &mut DockEngine) {
    let (_, main) = add_pane(engine, "main.rs", DockState::Document);
    let (_, lib) = add_pane(engine, "lib.rs", DockState::Document);
    engine
        .dock(&[lib], DockRequest::split(DOCUMENT, Some(main), Alignment::Bottom).with_proportion(0.35))
        .unwrap();

    let (_, explorer) = add_pane(engine, "explorer", DockState::DockLeft);
    let outline = engine.create_content(ContentSpec::new("outline"));
    engine.show_content(outline, DockState::DockLeft).unwrap();

    let output = engine.create_content(ContentSpec::new("output").with_auto_hide_portion(180.0));
    let output_pane = engine.new_pane(output, DockState::DockBottom).unwrap();
    engine.toggle_auto_hide(output_pane).unwrap();

    let (_, search) = add_pane(engine, "search", DockState::Float);
    let (_, terminal) = add_pane(engine, "terminal", DockState::Float);
    let window = match engine.pane_container(search) {
        Some(dockyard::model::ContainerId::Floating(window)) => window,
        other => panic!("expected a floating window, got {:?}", other),
    };
    engine
        .dock(
            &[terminal],
            DockRequest::split(dockyard::model::ContainerId::Floating(window), Some(search), Alignment::Right)
                .with_proportion(0.4),
        )
        .unwrap();
    add_pane(engine, "problems", DockState::Float);
    engine.bring_to_front(window).unwrap();

    let notes = engine.create_content(ContentSpec::new("notes"));
    engine.show_content(notes, DockState::Document).unwrap();
    engine.set_content_hidden(notes, true).unwrap();
    engine.create_content(ContentSpec::new("scratch"));

    engine.set_active_pane(Some(explorer)).unwrap();
}

/// Pane rectangles in traversal order
fn traversal_rects(engine: &DockEngine) -> Vec<Rect> {
    let anchors = AnchorRegion::ALL
        .iter()
        .flat_map(|region| engine.anchor_region(*region).nested_panes.panes().collect::<Vec<_>>());
    let floating = engine
        .floating_windows()
        .flat_map(|window| window.nested_panes.panes().collect::<Vec<_>>());
    anchors
        .chain(floating)
        .map(|pane| engine.pane(pane).unwrap().rect)
        .collect()
}

// ============================================================================
// Round trip
// ============================================================================

#[test]
fn test_save_load_save_round_trip() {
    let mut original = test_engine();
    build_layout(&mut original);
    let saved = original.save();
    assert!(saved.validate().is_ok());
    assert_eq!(saved.floating_windows.len(), 2);

    let mut restored = test_engine();
    let report = restored.load(&saved, resolve_all).unwrap();
    assert!(report.unresolved.is_empty());
    assert!(report.contents.iter().all(Option::is_some));

    assert_eq!(restored.save(), saved);
    assert_eq!(traversal_rects(&restored), traversal_rects(&original));
    assert_eq!(restored.content_count(), original.content_count());
    assert_eq!(restored.pane_count(), original.pane_count());
}

#[test]
fn test_loaded_fields_come_from_document() {
    let mut original = test_engine();
    build_layout(&mut original);
    let saved = original.save();

    let mut restored = test_engine();
    restored.load(&saved, resolve_all).unwrap();

    let notes = restored.find_content("notes").unwrap();
    assert!(!restored.is_content_visible(notes));
    let output = restored.find_content("output").unwrap();
    assert_eq!(restored.content(output).unwrap().auto_hide_portion, 180.0);
    let terminal = restored.find_content("terminal").unwrap();
    assert!(restored.content(terminal).unwrap().is_floating);
    let scratch = restored.find_content("scratch").unwrap();
    assert_eq!(restored.content(scratch).unwrap().pane, None);

    let active = restored.active_pane().unwrap();
    let explorer = restored.find_content("explorer").unwrap();
    assert!(restored.pane(active).unwrap().contains(explorer));
}

#[test]
fn test_save_inside_batch_skips_emptied_panes() {
    let mut engine = test_engine();
    let (main, _) = add_pane(&mut engine, "main.rs", DockState::Document);
    add_pane(&mut engine, "lib.rs", DockState::Document);

    let token = engine.suspend();
    engine.remove_content(main).unwrap();
    let saved = engine.save();
    engine.resume(token);

    assert!(saved.validate().is_ok());
    assert_eq!(saved.panes.len(), 1);
    assert_eq!(saved.anchor_regions[0].nested_panes[0].previous_pane, -1);

    let mut restored = test_engine();
    let report = restored.load(&saved, resolve_all).unwrap();
    assert_eq!(report.panes.len(), 1);
    let lib = restored.find_content("lib.rs").unwrap();
    let pane = restored.content(lib).unwrap().pane.unwrap();
    assert_eq!(restored.pane(pane).unwrap().rect, Rect::new(0.0, 0.0, 800.0, 600.0));
}

#[test]
fn test_file_round_trip() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("layout.json");

    let mut engine = test_engine();
    build_layout(&mut engine);
    let saved = engine.save();
    saved.save_to_file(&path).unwrap();

    let loaded = LayoutDocument::load_from_file(&path).unwrap();
    assert_eq!(loaded, saved);
}

// ============================================================================
// Placeholders
// ============================================================================

#[test]
fn test_unresolved_contents_are_discarded() {
    let mut original = test_engine();
    build_layout(&mut original);
    let saved = original.save();

    let mut restored = test_engine();
    let report = restored
        .load(&saved, |key| match key {
            "outline" | "output" => None,
            other => Some(ContentSpec::new(other)),
        })
        .unwrap();

    assert_eq!(report.unresolved, vec!["outline".to_string(), "output".to_string()]);
    assert_eq!(report.contents.iter().filter(|c| c.is_none()).count(), 2);
    assert_eq!(report.panes.iter().filter(|p| p.is_none()).count(), 1);
    assert_eq!(restored.content_count(), original.content_count() - 2);
    assert_eq!(restored.pane_count(), original.pane_count() - 1);

    assert!(restored.find_content("output").is_none());
    assert!(restored.anchor_region(AnchorRegion::Bottom).is_empty());
    let explorer = restored.find_content("explorer").unwrap();
    let left = restored.content(explorer).unwrap().pane.unwrap();
    assert_eq!(restored.pane(left).unwrap().contents, vec![explorer]);
    assert!(restored.contents().all(|c| !c.is_placeholder));
}

// ============================================================================
// Rejection
// ============================================================================

#[test]
fn test_load_into_populated_engine_fails() {
    let mut engine = test_engine();
    add_pane(&mut engine, "main.rs", DockState::Document);

    let result = engine.load(&LayoutDocument::default(), resolve_all);
    assert!(matches!(result, Err(DockError::AlreadyInitialized(1))));
}

#[test]
fn test_corrupt_document_leaves_engine_untouched() {
    let mut original = test_engine();
    build_layout(&mut original);
    let mut saved = original.save();
    let document_chain = saved
        .anchor_regions
        .iter_mut()
        .find(|chain| chain.region == AnchorRegion::Document)
        .unwrap();
    document_chain.nested_panes[1].previous_pane = 42;

    let mut engine = test_engine();
    let result = engine.load(&saved, resolve_all);
    assert!(matches!(result, Err(DockError::CorruptLayoutDocument(_))));
    assert_eq!(engine.content_count(), 0);
    assert_eq!(engine.pane_count(), 0);
    assert_eq!(engine.floating_window_count(), 0);
}

#[test]
fn test_disallowed_state_rejects_whole_load() {
    let mut original = test_engine();
    build_layout(&mut original);
    let saved = original.save();

    let mut engine = test_engine();
    let result = engine.load(&saved, |key| {
        let spec = ContentSpec::new(key);
        Some(if key == "main.rs" { spec.with_allowed(DockAreas::TOOL) } else { spec })
    });
    assert!(matches!(
        result,
        Err(DockError::InvalidDockState { state: DockState::Document, .. })
    ));
    assert_eq!(engine.content_count(), 0);
}

#[test]
fn test_incompatible_version() {
    let mut document = LayoutDocument::default();
    document.format_version = 2;
    let json = serde_json::to_string(&document).unwrap();

    assert!(matches!(
        LayoutDocument::from_json(&json),
        Err(DockError::IncompatibleLayoutVersion { found: 2, expected: 1 })
    ));
    assert!(matches!(
        LayoutDocument::from_json("not json"),
        Err(DockError::CorruptLayoutDocument(_))
    ));
}
