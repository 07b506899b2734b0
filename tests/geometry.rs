//! Tests for split-chain geometry and anchor region layout

mod common;

use common::{add_pane, assert_tiles, displayed_rects, rect_of, test_engine, DOCUMENT, LEFT, SURFACE};
use dockyard::engine::compute_nested_layout;
use dockyard::model::{Alignment, AnchorRegion, DockState, NestedLink, NestedPaneCollection, PaneId, Rect};
use dockyard::{DockRequest, EngineConfig};

// ============================================================================
// Worked example
// ============================================================================

#[test]
fn test_document_right_split_example() {
    let mut engine = test_engine();
    let (_, root) = add_pane(&mut engine, "main.rs", DockState::Document);
    let (_, second) = add_pane(&mut engine, "lib.rs", DockState::Document);

    engine
        .dock(
            &[second],
            DockRequest::split(DOCUMENT, Some(root), Alignment::Right).with_proportion(0.3),
        )
        .unwrap();

    assert_eq!(rect_of(&engine, root), Rect::new(0.0, 0.0, 560.0, 600.0));
    assert_eq!(rect_of(&engine, second), Rect::new(560.0, 0.0, 240.0, 600.0));
}

#[test]
fn test_absolute_proportion() {
    let mut engine = test_engine();
    let (_, root) = add_pane(&mut engine, "main.rs", DockState::Document);
    let (_, second) = add_pane(&mut engine, "lib.rs", DockState::Document);

    engine
        .dock(
            &[second],
            DockRequest::split(DOCUMENT, Some(root), Alignment::Bottom).with_proportion(150.0),
        )
        .unwrap();

    assert_eq!(rect_of(&engine, root), Rect::new(0.0, 0.0, 800.0, 450.0));
    assert_eq!(rect_of(&engine, second), Rect::new(0.0, 450.0, 800.0, 150.0));
}

#[test]
fn test_requests_are_clamped_to_min_size() {
    let mut engine = test_engine();
    let (_, root) = add_pane(&mut engine, "main.rs", DockState::Document);
    let (_, second) = add_pane(&mut engine, "lib.rs", DockState::Document);

    engine
        .dock(
            &[second],
            DockRequest::split(DOCUMENT, Some(root), Alignment::Left).with_proportion(5000.0),
        )
        .unwrap();

    let min = engine.config().min_pane_size;
    assert_eq!(rect_of(&engine, second).width, 800.0 - min);
    assert_eq!(rect_of(&engine, root).width, min);
}

// ============================================================================
// Conservation
// ============================================================================

fn tree_chain(len: u64) -> NestedPaneCollection {
    let alignments = [Alignment::Right, Alignment::Bottom, Alignment::Left, Alignment::Top];
    let proportions = [0.3, 0.5, 120.0, 0.25];
    let mut chain = NestedPaneCollection::new();
    for i in 0..len {
        let index = i as usize;
        chain.push(
            PaneId(i + 1),
            NestedLink::new(
                PaneId(i / 2 + 1),
                alignments[index % alignments.len()],
                proportions[index % proportions.len()],
            ),
        );
    }
    chain
}

#[test]
fn test_displayed_panes_tile_the_area() {
    let area = Rect::new(10.0, 20.0, 1000.0, 700.0);
    for len in 1..=7 {
        let chain = tree_chain(len);
        assert!(chain.validate().is_ok());

        let rects: Vec<Rect> = compute_nested_layout(area, &chain, |_| true, 24.0)
            .into_iter()
            .map(|(_, r)| r)
            .collect();
        assert_eq!(rects.len(), len as usize);
        assert_tiles(area, &rects);
        for rect in &rects {
            assert!(rect.width >= 24.0 && rect.height >= 24.0, "{:?} below minimum", rect);
        }
    }
}

#[test]
fn test_hidden_panes_still_tile() {
    let area = Rect::new(0.0, 0.0, 1000.0, 700.0);
    let chain = tree_chain(7);
    for hidden in 1..=7 {
        let rects: Vec<Rect> = compute_nested_layout(area, &chain, |p| p != PaneId(hidden), 24.0)
            .into_iter()
            .map(|(_, r)| r)
            .collect();
        assert_eq!(rects.len(), 6);
        assert_tiles(area, &rects);
    }
}

#[test]
fn test_engine_regions_tile_after_changes() {
    let mut engine = test_engine();
    let (_, a) = add_pane(&mut engine, "a", DockState::Document);
    let (_, b) = add_pane(&mut engine, "b", DockState::Document);
    let (c_content, _) = add_pane(&mut engine, "c", DockState::Document);
    add_pane(&mut engine, "explorer", DockState::DockLeft);
    add_pane(&mut engine, "outline", DockState::DockLeft);

    engine
        .dock(&[b], DockRequest::split(DOCUMENT, Some(a), Alignment::Bottom).with_proportion(0.4))
        .unwrap();
    engine.set_content_hidden(c_content, true).unwrap();

    let document = engine.anchor_region(AnchorRegion::Document).rect;
    assert_tiles(document, &displayed_rects(&engine, DOCUMENT));
    let left = engine.anchor_region(AnchorRegion::Left).rect;
    assert_tiles(left, &displayed_rects(&engine, LEFT));
}

// ============================================================================
// Anchor regions
// ============================================================================

#[test]
fn test_empty_regions_give_document_the_surface() {
    let mut engine = test_engine();
    add_pane(&mut engine, "main.rs", DockState::Document);
    assert_eq!(engine.anchor_region(AnchorRegion::Document).rect, SURFACE);
}

#[test]
fn test_left_region_uses_configured_portion() {
    let mut engine = test_engine();
    let (_, doc) = add_pane(&mut engine, "main.rs", DockState::Document);
    let (_, left) = add_pane(&mut engine, "explorer", DockState::DockLeft);

    assert_eq!(rect_of(&engine, left), Rect::new(0.0, 0.0, 200.0, 600.0));
    assert_eq!(rect_of(&engine, doc), Rect::new(200.0, 0.0, 600.0, 600.0));
}

#[test]
fn test_container_inset_is_symmetric() {
    let config = EngineConfig {
        container_inset: 4.0,
        ..EngineConfig::default()
    };
    let mut engine = dockyard::DockEngine::new(config);
    engine.set_surface_bounds(SURFACE);
    let (_, doc) = add_pane(&mut engine, "main.rs", DockState::Document);

    assert_eq!(rect_of(&engine, doc), Rect::new(4.0, 4.0, 792.0, 592.0));
}

#[test]
fn test_resize_emits_bounds_changes() {
    let mut engine = test_engine();
    let (_, doc) = add_pane(&mut engine, "main.rs", DockState::Document);
    engine.take_commands();

    engine.set_surface_bounds(Rect::new(0.0, 0.0, 1024.0, 768.0));
    let cmds = engine.take_commands();
    assert!(cmds.contains(&dockyard::Cmd::PaneBoundsChanged {
        pane: doc,
        rect: Rect::new(0.0, 0.0, 1024.0, 768.0),
    }));

    engine.set_surface_bounds(Rect::new(0.0, 0.0, 1024.0, 768.0));
    assert!(engine.take_commands().is_empty());
}
