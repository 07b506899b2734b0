//! Drag-to-redock protocol
//!
//! `Idle -> Dragging -> {Committed, Cancelled} -> Idle`. The host hit-tests
//! captions and tab strips itself and reports a `DropTarget`; the engine only
//! decides whether that target is legal and performs the dock on commit.

use super::dock::{DockRequest, DockStyle};
use super::DockEngine;
use crate::error::{DockError, Result};
use crate::model::{Alignment, ContainerId, DockState, FloatId, PaneId, Rect};

/// What is being dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSource {
    Pane(PaneId),
    FloatingWindow(FloatId),
}

/// Drop location resolved by the host's hit test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropTarget {
    pub container: ContainerId,
    pub pane: Option<PaneId>,
    pub style: DockStyle,
}

impl DropTarget {
    fn request(&self) -> DockRequest {
        DockRequest {
            container: self.container,
            target: self.pane,
            style: self.style,
            proportion: None,
            content_index: None,
        }
    }
}

/// An in-flight drag
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub source: DragSource,
    /// Screen rectangle the source started from
    pub origin: Rect,
    /// Last legal drop target
    pub target: Option<DropTarget>,
    /// Panes carried by the drag, in chain order
    pub panes: Vec<PaneId>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging(_))
    }

    pub fn session(&self) -> Option<&DragSession> {
        match self {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }
}

/// How a drag ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    Committed(DropTarget),
    Cancelled,
}

impl DockEngine {
    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    /// Start dragging a pane or a whole floating window
    pub fn begin_drag(&mut self, source: DragSource, origin: Rect) -> Result<()> {
        if self.drag.is_dragging() {
            return Err(DockError::DragInProgress);
        }
        let panes = match source {
            DragSource::Pane(pane) => {
                self.require_pane(pane)?;
                vec![pane]
            }
            DragSource::FloatingWindow(window) => self
                .floating
                .get(&window)
                .ok_or(DockError::UnknownFloatingWindow(window))?
                .nested_panes
                .panes()
                .collect(),
        };

        tracing::debug!(?source, ?origin, "drag started");
        self.drag = DragState::Dragging(DragSession {
            source,
            origin,
            target: None,
            panes,
        });
        Ok(())
    }

    /// Whether the current drag could be dropped on `target`
    pub fn can_dock_to(&self, target: &DropTarget) -> bool {
        let Some(session) = self.drag.session() else {
            return false;
        };
        if target.pane.is_some_and(|p| session.panes.contains(&p)) {
            return false;
        }
        self.can_dock(&session.panes, &target.request())
    }

    /// Report the host's latest hit-test result.
    ///
    /// Illegal targets are dropped. Returns whether the target was accepted.
    pub fn update_drag(&mut self, hit: Option<DropTarget>) -> Result<bool> {
        if !self.drag.is_dragging() {
            return Err(DockError::NoDragInProgress);
        }
        let accepted = hit.filter(|target| self.can_dock_to(target));
        if let DragState::Dragging(session) = &mut self.drag {
            session.target = accepted;
        }
        Ok(accepted.is_some())
    }

    /// Drop on the last accepted target, or cancel if there is none
    pub fn commit_drag(&mut self) -> Result<DragOutcome> {
        let session = match std::mem::take(&mut self.drag) {
            DragState::Dragging(session) => session,
            DragState::Idle => return Err(DockError::NoDragInProgress),
        };

        let Some(target) = session.target else {
            self.restore_drag_source(&session)?;
            return Ok(DragOutcome::Cancelled);
        };

        match self.dock(&session.panes, target.request()) {
            Ok(()) => {
                tracing::debug!(?target, "drag committed");
                Ok(DragOutcome::Committed(target))
            }
            Err(e) => {
                if let Err(restore) = self.restore_drag_source(&session) {
                    tracing::warn!(source = ?session.source, "could not restore drag source: {}", restore);
                }
                Err(e)
            }
        }
    }

    /// Abandon the drag and put the source back at its origin
    pub fn cancel_drag(&mut self) -> Result<()> {
        match std::mem::take(&mut self.drag) {
            DragState::Dragging(session) => self.restore_drag_source(&session),
            DragState::Idle => Err(DockError::NoDragInProgress),
        }
    }

    /// Float the dragged source at its origin, recreating its window if needed
    fn restore_drag_source(&mut self, session: &DragSession) -> Result<()> {
        tracing::debug!(source = ?session.source, "drag cancelled");
        match session.source {
            DragSource::Pane(pane) => {
                if !self.panes.contains_key(&pane) {
                    return Ok(());
                }
                match self.pane_container(pane) {
                    Some(ContainerId::Floating(window))
                        if self.floating.get(&window).is_some_and(|w| w.nested_panes.len() == 1) =>
                    {
                        self.set_floating_bounds(window, session.origin)
                    }
                    _ => match self.float_pane_at(pane, session.origin) {
                        Err(DockError::InvalidDockState { .. }) => {
                            tracing::warn!(?pane, "pane cannot float, left in place");
                            Ok(())
                        }
                        other => other.map(|_| ()),
                    },
                }
            }
            DragSource::FloatingWindow(window) if self.floating.contains_key(&window) => {
                self.set_floating_bounds(window, session.origin)?;
                self.bring_to_front(window)
            }
            DragSource::FloatingWindow(_) => {
                let survivors: Vec<PaneId> = session
                    .panes
                    .iter()
                    .copied()
                    .filter(|p| self.panes.contains_key(p))
                    .collect();
                if survivors.is_empty() {
                    return Ok(());
                }
                if let Err(e) = self.check_dock_state(&survivors, DockState::Float) {
                    tracing::warn!(?survivors, "drag source cannot float again, left in place: {}", e);
                    return Ok(());
                }
                let window = self.create_floating_window(session.origin);
                self.dock(
                    &survivors,
                    DockRequest::split(ContainerId::Floating(window), None, Alignment::Right),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnchorRegion, ContentSpec};

    #[test]
    fn test_second_begin_is_rejected() {
        let mut engine = DockEngine::default();
        let content = engine.create_content(ContentSpec::new("a"));
        let pane = engine.new_pane(content, DockState::Document).unwrap();

        engine.begin_drag(DragSource::Pane(pane), Rect::ZERO).unwrap();
        assert!(matches!(
            engine.begin_drag(DragSource::Pane(pane), Rect::ZERO),
            Err(DockError::DragInProgress)
        ));
    }

    #[test]
    fn test_target_on_source_is_illegal() {
        let mut engine = DockEngine::default();
        let content = engine.create_content(ContentSpec::new("a"));
        let pane = engine.new_pane(content, DockState::Document).unwrap();

        engine.begin_drag(DragSource::Pane(pane), Rect::ZERO).unwrap();
        let target = DropTarget {
            container: ContainerId::Anchor(AnchorRegion::Document),
            pane: Some(pane),
            style: DockStyle::Fill,
        };
        assert!(!engine.can_dock_to(&target));
        assert!(!engine.update_drag(Some(target)).unwrap());
        assert_eq!(engine.drag_state().session().unwrap().target, None);
    }
}
