//! Tests for the drag-to-redock protocol

mod common;

use std::time::Instant;

use common::{add_pane, add_tool_pane, rect_of, test_engine, DOCUMENT, LEFT};
use dockyard::engine::{DragOutcome, DragSource, DropTarget};
use dockyard::model::{
    Alignment, ContainerId, ContentSpec, DockAreas, DockState, FloatId, PaneId, Rect,
};
use dockyard::{Cmd, DockEngine, DockError, DockRequest, DockStyle};

const ORIGIN: Rect = Rect {
    x: 120.0,
    y: 80.0,
    width: 260.0,
    height: 180.0,
};

fn window_of(engine: &DockEngine, pane: PaneId) -> FloatId {
    match engine.pane_container(pane) {
        Some(ContainerId::Floating(window)) => window,
        other => panic!("expected a floating window, got {:?}", other),
    }
}

/// Floating window holding two panes split side by side
fn floating_pair(engine: &mut DockEngine) -> (FloatId, PaneId, PaneId) {
    let (_, first) = add_pane(engine, "search", DockState::Float);
    let (_, second) = add_pane(engine, "terminal", DockState::Float);
    let window = window_of(engine, first);
    engine
        .dock(
            &[second],
            DockRequest::split(ContainerId::Floating(window), Some(first), Alignment::Right)
                .with_proportion(0.4),
        )
        .unwrap();
    (window, first, second)
}

#[test]
fn test_commit_fills_target() {
    let mut engine = test_engine();
    let (a, dragged) = add_pane(&mut engine, "main.rs", DockState::Document);
    let (explorer, left) = add_pane(&mut engine, "explorer", DockState::DockLeft);

    engine.begin_drag(DragSource::Pane(dragged), ORIGIN).unwrap();
    assert!(engine.drag_state().is_dragging());

    let target = DropTarget {
        container: LEFT,
        pane: Some(left),
        style: DockStyle::Fill,
    };
    assert!(engine.update_drag(Some(target)).unwrap());
    assert_eq!(engine.commit_drag().unwrap(), DragOutcome::Committed(target));

    assert!(!engine.drag_state().is_dragging());
    assert!(engine.pane(dragged).is_none());
    assert_eq!(engine.pane(left).unwrap().contents, vec![explorer, a]);
}

#[test]
fn test_cancel_floats_pane_at_origin() {
    let mut engine = test_engine();
    let (_, stays) = add_pane(&mut engine, "main.rs", DockState::Document);
    let (_, dragged) = add_pane(&mut engine, "lib.rs", DockState::Document);

    engine.begin_drag(DragSource::Pane(dragged), ORIGIN).unwrap();
    engine.cancel_drag().unwrap();

    assert_eq!(engine.pane(dragged).unwrap().dock_state, DockState::Float);
    let window = window_of(&engine, dragged);
    assert_eq!(engine.container(ContainerId::Floating(window)).unwrap().rect, ORIGIN);
    assert_eq!(rect_of(&engine, dragged), ORIGIN);
    assert_eq!(rect_of(&engine, stays), Rect::new(0.0, 0.0, 800.0, 600.0));
}

#[test]
fn test_cancel_leaves_non_floating_pane_in_place() {
    let mut engine = test_engine();
    let pinned = engine.create_content(ContentSpec::new("main.rs").with_allowed(DockAreas::DOCUMENT));
    let pane = engine.new_pane(pinned, DockState::Document).unwrap();

    engine.begin_drag(DragSource::Pane(pane), ORIGIN).unwrap();
    engine.cancel_drag().unwrap();

    assert!(!engine.drag_state().is_dragging());
    assert_eq!(engine.pane(pane).unwrap().dock_state, DockState::Document);
    assert_eq!(engine.pane_container(pane), Some(DOCUMENT));
    assert_eq!(engine.floating_window_count(), 0);
}

#[test]
fn test_illegal_target_is_dropped_and_commit_cancels() {
    let mut engine = test_engine();
    let (_, doc) = add_pane(&mut engine, "main.rs", DockState::Document);
    let (_, tool) = add_tool_pane(&mut engine, "explorer", DockState::DockLeft);

    engine.begin_drag(DragSource::Pane(tool), ORIGIN).unwrap();
    let target = DropTarget {
        container: DOCUMENT,
        pane: Some(doc),
        style: DockStyle::Right,
    };
    assert!(!engine.can_dock_to(&target));
    assert!(!engine.update_drag(Some(target)).unwrap());

    assert_eq!(engine.commit_drag().unwrap(), DragOutcome::Cancelled);
    assert_eq!(engine.pane(tool).unwrap().dock_state, DockState::Float);
    assert_eq!(rect_of(&engine, tool), ORIGIN);
    assert_eq!(engine.pane_container(doc), Some(DOCUMENT));
}

#[test]
fn test_drag_floating_window_into_document() {
    let mut engine = test_engine();
    let (_, doc) = add_pane(&mut engine, "main.rs", DockState::Document);
    let (window, first, second) = floating_pair(&mut engine);

    engine.begin_drag(DragSource::FloatingWindow(window), ORIGIN).unwrap();
    assert_eq!(engine.drag_state().session().unwrap().panes, vec![first, second]);
    let target = DropTarget {
        container: DOCUMENT,
        pane: Some(doc),
        style: DockStyle::Right,
    };
    assert!(engine.update_drag(Some(target)).unwrap());
    engine.commit_drag().unwrap();

    assert_eq!(engine.pane_container(first), Some(DOCUMENT));
    assert_eq!(engine.pane_container(second), Some(DOCUMENT));
    assert_eq!(engine.nested_link(second).unwrap().previous, Some(first));

    engine.take_commands();
    engine.tick(Instant::now());
    assert!(engine
        .take_commands()
        .contains(&Cmd::DestroyFloatingWindow { window }));
    assert_eq!(engine.floating_window_count(), 0);
}

#[test]
fn test_cancel_moves_floating_window_back() {
    let mut engine = test_engine();
    let (window, first, _) = floating_pair(&mut engine);
    let (_, other) = add_pane(&mut engine, "problems", DockState::Float);
    assert_ne!(window_of(&engine, other), window);

    engine.begin_drag(DragSource::FloatingWindow(window), ORIGIN).unwrap();
    engine.cancel_drag().unwrap();

    assert_eq!(engine.container(ContainerId::Floating(window)).unwrap().rect, ORIGIN);
    assert_eq!(
        engine.floating_windows().next().map(|w| w.id),
        Some(ContainerId::Floating(window))
    );
    assert_eq!(window_of(&engine, first), window);
}

#[test]
fn test_cancel_recreates_vanished_window() {
    let mut engine = test_engine();
    let (_, doc) = add_pane(&mut engine, "main.rs", DockState::Document);
    let (window, first, second) = floating_pair(&mut engine);

    engine.begin_drag(DragSource::FloatingWindow(window), ORIGIN).unwrap();
    engine
        .dock(&[first, second], DockRequest::split(DOCUMENT, Some(doc), Alignment::Right))
        .unwrap();
    engine.tick(Instant::now());
    assert!(engine.container(ContainerId::Floating(window)).is_none());

    engine.cancel_drag().unwrap();

    let recreated = window_of(&engine, first);
    assert_ne!(recreated, window);
    assert_eq!(window_of(&engine, second), recreated);
    assert_eq!(engine.container(ContainerId::Floating(recreated)).unwrap().rect, ORIGIN);
    let link = engine.nested_link(second).unwrap();
    assert_eq!((link.previous, link.alignment, link.proportion), (Some(first), Alignment::Right, 0.4));
}

#[test]
fn test_protocol_errors() {
    let mut engine = test_engine();
    assert!(matches!(engine.commit_drag(), Err(DockError::NoDragInProgress)));
    assert!(matches!(engine.cancel_drag(), Err(DockError::NoDragInProgress)));
    assert!(matches!(engine.update_drag(None), Err(DockError::NoDragInProgress)));
    assert!(matches!(
        engine.begin_drag(DragSource::FloatingWindow(FloatId(7)), ORIGIN),
        Err(DockError::UnknownFloatingWindow(FloatId(7)))
    ));
}
