//! Auto-hide overlay
//!
//! At most one auto-hide pane is shown at a time. Showing and hiding are
//! reported as `Cmd::AutoHideSlide`; the host animates between the two
//! rectangles. An unpinned overlay arms a debounce deadline that `tick()`
//! checks against the last pointer position.

use std::time::Instant;

use super::layout::carve_edge;
use super::DockEngine;
use crate::commands::Cmd;
use crate::error::{DockError, Result};
use crate::model::{resolve_portion, Alignment, ContentSpec, PaneId, Point, Rect};

/// Edge strips holding the tabs of auto-hide panes
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EdgeStrips {
    pub left: Option<Rect>,
    pub right: Option<Rect>,
    pub top: Option<Rect>,
    pub bottom: Option<Rect>,
}

impl EdgeStrips {
    pub fn get(&self, edge: Alignment) -> Option<Rect> {
        match edge {
            Alignment::Left => self.left,
            Alignment::Right => self.right,
            Alignment::Top => self.top,
            Alignment::Bottom => self.bottom,
        }
    }

    pub fn set(&mut self, edge: Alignment, rect: Rect) {
        let slot = match edge {
            Alignment::Left => &mut self.left,
            Alignment::Right => &mut self.right,
            Alignment::Top => &mut self.top,
            Alignment::Bottom => &mut self.bottom,
        };
        *slot = Some(rect);
    }
}

/// State of the auto-hide overlay
#[derive(Debug, Clone, Default)]
pub struct AutoHideOverlay {
    /// Pane currently slid in
    pub active: Option<PaneId>,
    /// Edge the active pane slid in from
    pub edge: Option<Alignment>,
    /// Rectangle of the active pane while shown
    pub rect: Rect,
    /// Surface minus the edge strips
    pub area: Rect,
    pub strips: EdgeStrips,
    /// Pinned overlays never time out
    pub pinned: bool,
    pub deadline: Option<Instant>,
    /// Last pointer position reported by the host
    pub pointer: Option<Point>,
}

impl AutoHideOverlay {
    /// Whether the pointer rests on the overlay or on the strip it came from
    pub fn pointer_inside(&self) -> bool {
        let Some(pointer) = self.pointer else {
            return false;
        };
        let over_strip = self
            .edge
            .and_then(|edge| self.strips.get(edge))
            .is_some_and(|strip| strip.contains_point(pointer));
        over_strip || self.rect.contains_point(pointer)
    }
}

/// Zero-size rectangle on the `edge` side of `rect`
fn collapsed(rect: Rect, edge: Alignment) -> Rect {
    carve_edge(rect, edge, 0.0).0
}

impl DockEngine {
    pub fn auto_hide_overlay(&self) -> &AutoHideOverlay {
        &self.auto_hide
    }

    /// Pane shown by the auto-hide overlay
    pub fn auto_hide_active(&self) -> Option<PaneId> {
        self.auto_hide.active
    }

    /// Target rectangle of an auto-hide pane when fully slid in
    pub(crate) fn overlay_target_rect(&self, pane: PaneId) -> Rect {
        let Some(edge) = self.display_state(pane).auto_hide_edge() else {
            return Rect::ZERO;
        };
        let portion = self
            .panes
            .get(&pane)
            .and_then(|p| p.active_content)
            .and_then(|c| self.contents.get(&c))
            .map(|c| c.auto_hide_portion)
            .unwrap_or(ContentSpec::DEFAULT_AUTO_HIDE_PORTION);

        let area = self.auto_hide.area;
        let extent = area.extent(edge.axis());
        carve_edge(area, edge, resolve_portion(portion, extent)).0
    }

    /// Show an auto-hide pane, or hide the overlay with `None`.
    ///
    /// The previously shown pane slides out before the new one slides in.
    pub fn set_auto_hide_active(&mut self, pane: Option<PaneId>, now: Instant) -> Result<()> {
        if let Some(pane_id) = pane {
            self.require_pane(pane_id)?;
            if !self.display_state(pane_id).is_auto_hide() {
                tracing::warn!(pane = ?pane_id, "refusing to show a pane that is not auto-hidden");
                return Err(DockError::container_ref(format!(
                    "pane {:?} is not an auto-hide pane",
                    pane_id
                )));
            }
        }

        if pane.is_some() && pane == self.auto_hide.active {
            self.arm_auto_hide(now);
            return Ok(());
        }

        self.batch(|engine| {
            engine.hide_auto_hide_overlay();
            if let Some(pane_id) = pane {
                engine.show_auto_hide_overlay(pane_id, now);
            }
        });
        Ok(())
    }

    fn show_auto_hide_overlay(&mut self, pane: PaneId, now: Instant) {
        let Some(edge) = self.display_state(pane).auto_hide_edge() else {
            return;
        };
        let target = self.overlay_target_rect(pane);
        tracing::debug!(?pane, ?edge, ?target, "auto-hide overlay shown");

        self.auto_hide.active = Some(pane);
        self.auto_hide.edge = Some(edge);
        self.auto_hide.rect = target;
        self.arm_auto_hide(now);
        self.emit(Cmd::AutoHideSlide {
            pane,
            edge,
            from: collapsed(target, edge),
            to: target,
        });
    }

    /// Slide the shown pane out, if any
    pub(crate) fn hide_auto_hide_overlay(&mut self) {
        let Some(pane) = self.auto_hide.active.take() else {
            return;
        };
        let edge = self.auto_hide.edge.take();
        let from = std::mem::replace(&mut self.auto_hide.rect, Rect::ZERO);
        self.auto_hide.deadline = None;
        tracing::debug!(?pane, "auto-hide overlay hidden");

        if let (Some(edge), true) = (edge, self.panes.contains_key(&pane)) {
            self.emit(Cmd::AutoHideSlide {
                pane,
                edge,
                from,
                to: collapsed(from, edge),
            });
        }
    }

    fn arm_auto_hide(&mut self, now: Instant) {
        self.auto_hide.deadline = if self.auto_hide.pinned || self.auto_hide.active.is_none() {
            None
        } else {
            // A debounce past the end of the clock never expires
            now.checked_add(self.config.auto_hide_debounce())
        };
    }

    /// Pin or unpin the overlay; an unpinned overlay starts a fresh debounce
    pub fn set_auto_hide_pinned(&mut self, pinned: bool, now: Instant) {
        self.auto_hide.pinned = pinned;
        self.arm_auto_hide(now);
    }

    /// Record the pointer position used by the debounce check
    pub fn pointer_moved(&mut self, position: Point) {
        self.auto_hide.pointer = Some(position);
    }

    /// Hide the overlay once its deadline passed and nothing holds it open
    pub(crate) fn tick_auto_hide(&mut self, now: Instant) {
        let Some(pane) = self.auto_hide.active else {
            return;
        };
        let Some(deadline) = self.auto_hide.deadline else {
            return;
        };
        if now < deadline {
            return;
        }

        let held = self.drag.is_dragging()
            || self.active_pane == Some(pane)
            || self.auto_hide.pointer_inside();
        if held {
            self.arm_auto_hide(now);
        } else {
            self.batch(|engine| engine.hide_auto_hide_overlay());
        }
    }
}
