//! Content placement, dock-state transitions and floating windows
//!
//! The attach/detach primitives here are shared by `dock`, drag cancellation
//! and layout loading, so every path that edits a split chain repairs it and
//! mirrors links onto panes the same way.

use std::time::Instant;

use super::DockEngine;
use crate::commands::Cmd;
use crate::error::{DockError, Result};
use crate::model::{
    complement_proportion, Alignment, Container, ContainerId, ContentId, ContentSpec, ContentUnit,
    DockState, FloatId, NestedLink, Pane, PaneId, Rect,
};

impl DockEngine {
    // ========================================================================
    // Chain primitives
    // ========================================================================

    /// Copy the collection's links onto the panes it holds
    fn sync_links(&mut self, container: ContainerId) {
        let Some(entries) = self.container(container).map(|c| c.nested_panes.entries().to_vec()) else {
            return;
        };
        for entry in entries {
            if let Some(pane) = self.panes.get_mut(&entry.pane) {
                pane.nested_link = entry.link;
            }
        }
    }

    /// Remove a pane from its container's chain, repairing the chain.
    ///
    /// A floating window left empty is scheduled for disposal on the next tick.
    pub(crate) fn detach_pane(&mut self, pane: PaneId) -> Option<ContainerId> {
        let container = self.panes.get_mut(&pane)?.container.take()?;
        if let Some(c) = self.container_mut(container) {
            c.nested_panes.remove(pane);
        }
        self.sync_links(container);

        if let ContainerId::Floating(window) = container {
            self.schedule_disposal_if_empty(window);
        }
        Some(container)
    }

    /// Append a detached pane to a container's chain
    pub(crate) fn attach_pane(&mut self, pane: PaneId, container: ContainerId, link: NestedLink) {
        if let Some(c) = self.container_mut(container) {
            c.nested_panes.push(pane, link);
        }
        self.finish_attach(pane, container);
    }

    /// Make a detached pane the new root of a container's chain.
    ///
    /// The old root is carved from the new one on the opposite side, sized so
    /// the new root keeps `proportion` of the container.
    pub(crate) fn attach_root(
        &mut self,
        pane: PaneId,
        container: ContainerId,
        alignment: Alignment,
        proportion: f32,
    ) {
        if let Some(c) = self.container_mut(container) {
            let extent = c.rect.extent(alignment.axis());
            let old_root_proportion = complement_proportion(proportion, extent);
            c.nested_panes.push_root(pane, alignment, old_root_proportion);
        }
        self.finish_attach(pane, container);
    }

    fn finish_attach(&mut self, pane: PaneId, container: ContainerId) {
        if let Some(p) = self.panes.get_mut(&pane) {
            p.container = Some(container);
            if let ContainerId::Floating(window) = container {
                p.last_floating_window = Some(window);
            }
        }
        if let ContainerId::Floating(window) = container {
            self.pending_disposal.retain(|w| *w != window);
        }
        self.sync_links(container);
    }

    /// Append a detached pane to the container matching `state`.
    ///
    /// Anchor states stack onto the region's last pane. `Float` reuses the
    /// pane's last floating window when it still exists.
    fn place_pane(&mut self, pane: PaneId, state: DockState) {
        let (container, alignment) = match state.anchor_region() {
            Some(region) => (ContainerId::Anchor(region), region.stacking_alignment()),
            None => {
                let window = self
                    .panes
                    .get(&pane)
                    .and_then(|p| p.last_floating_window)
                    .filter(|w| self.floating.contains_key(w))
                    .unwrap_or_else(|| {
                        let bounds = self.default_float_bounds();
                        self.create_floating_window(bounds)
                    });
                (ContainerId::Floating(window), Alignment::Right)
            }
        };

        let link = match self.container(container).and_then(|c| c.nested_panes.last()) {
            Some(last) => NestedLink::new(last, alignment, self.config.default_proportion),
            None => NestedLink::root(),
        };
        self.attach_pane(pane, container, link);
    }

    /// Change a pane's state label and mirror it onto its contents
    pub(crate) fn set_pane_state(&mut self, pane: PaneId, state: DockState) {
        let Some(p) = self.panes.get_mut(&pane) else {
            return;
        };
        let from = p.dock_state;
        p.dock_state = state;
        let contents = p.contents.clone();
        for content in contents {
            if let Some(c) = self.contents.get_mut(&content) {
                c.is_floating = state.is_floating();
            }
        }
        if from != state {
            tracing::debug!(?pane, ?from, to = ?state, "dock state changed");
            self.emit(Cmd::DockStateChanged {
                pane,
                from,
                to: state,
            });
        }
    }

    /// Detach and drop a pane. Its contents become unassigned.
    pub(crate) fn destroy_pane(&mut self, pane: PaneId) {
        if self.auto_hide.active == Some(pane) {
            self.hide_auto_hide_overlay();
        }
        self.detach_pane(pane);
        if let Some(removed) = self.panes.remove(&pane) {
            for content in removed.contents {
                if let Some(c) = self.contents.get_mut(&content) {
                    c.pane = None;
                }
            }
        }
    }

    /// Move a content unit into a pane at `index` (appended when `None`).
    ///
    /// Returns the index it ended up at.
    pub(crate) fn move_content_into(
        &mut self,
        content: ContentId,
        pane: PaneId,
        index: Option<usize>,
    ) -> usize {
        let previous = self.contents.get(&content).and_then(|c| c.pane);
        if let Some(previous) = previous.filter(|p| *p != pane) {
            if let Some(p) = self.panes.get_mut(&previous) {
                p.remove_content(content);
            }
        }

        let Some(target) = self.panes.get_mut(&pane) else {
            return 0;
        };
        let at = target.insert_content(content, index);
        let floating = target.dock_state.is_floating();
        if let Some(c) = self.contents.get_mut(&content) {
            c.pane = Some(pane);
            c.is_floating = floating;
        }
        at
    }

    // ========================================================================
    // Content operations
    // ========================================================================

    /// Register a content unit. It stays unassigned until shown.
    pub fn create_content(&mut self, spec: ContentSpec) -> ContentId {
        let id = self.next_content_id();
        tracing::debug!(content = ?id, key = %spec.persist_key, "content created");
        self.contents.insert(id, ContentUnit::from_spec(id, spec));
        id
    }

    fn require_state_allowed(&self, content: ContentId, state: DockState) -> Result<()> {
        let unit = self.require_content(content)?;
        if !unit.allows(state) {
            tracing::warn!(?content, ?state, "content does not allow dock state");
            return Err(DockError::InvalidDockState {
                content: Some(content),
                persist_key: unit.persist_key.clone(),
                state,
            });
        }
        Ok(())
    }

    /// Put a content unit into a new pane of its own
    pub fn new_pane(&mut self, content: ContentId, state: DockState) -> Result<PaneId> {
        self.require_state_allowed(content, state)?;
        Ok(self.batch(|engine| engine.new_pane_unchecked(content, state)))
    }

    pub(crate) fn new_pane_unchecked(&mut self, content: ContentId, state: DockState) -> PaneId {
        let id = self.next_pane_id();
        self.panes.insert(id, Pane::new(id, DockState::Unknown));
        self.set_pane_state(id, state);
        self.move_content_into(content, id, None);
        if let Some(pane) = self.panes.get_mut(&id) {
            pane.active_content = Some(content);
        }
        self.place_pane(id, state);
        tracing::debug!(pane = ?id, ?content, ?state, "pane created");
        id
    }

    /// Pane that `show_content` joins for a given state
    fn pane_for_state(&self, state: DockState) -> Option<PaneId> {
        let has_state = |p: &PaneId| self.panes.get(p).is_some_and(|p| p.dock_state == state);
        let region = state.anchor_region()?;

        if state == DockState::Document {
            if let Some(pane) = self.active_document_pane.filter(has_state) {
                return Some(pane);
            }
        }
        if let Some(pane) = self.active_pane.filter(has_state) {
            return Some(pane);
        }
        let chain: Vec<PaneId> = self.anchors.region(region).nested_panes.panes().collect();
        chain.into_iter().rev().find(has_state)
    }

    /// Show a content unit in `state`, joining a matching pane if there is one.
    ///
    /// Floating contents always get a window of their own. The content becomes
    /// the active content of the pane it lands in.
    pub fn show_content(&mut self, content: ContentId, state: DockState) -> Result<PaneId> {
        self.require_state_allowed(content, state)?;

        let current = self.contents.get(&content).and_then(|c| c.pane);
        let joined = current
            .filter(|p| self.panes.get(p).is_some_and(|p| p.dock_state == state))
            .or_else(|| self.pane_for_state(state));

        Ok(self.batch(|engine| {
            if let Some(c) = engine.contents.get_mut(&content) {
                c.is_hidden = false;
            }
            match joined {
                Some(pane) => {
                    if current != Some(pane) {
                        engine.move_content_into(content, pane, None);
                    }
                    engine.set_active_content_unchecked(pane, content);
                    pane
                }
                None => engine.new_pane_unchecked(content, state),
            }
        }))
    }

    /// Remove a content unit from the engine entirely
    pub fn remove_content(&mut self, content: ContentId) -> Result<()> {
        self.require_content(content)?;
        self.batch(|engine| {
            if let Some(unit) = engine.contents.remove(&content) {
                if let Some(pane) = unit.pane.and_then(|p| engine.panes.get_mut(&p)) {
                    pane.remove_content(content);
                }
                tracing::debug!(?content, key = %unit.persist_key, "content removed");
            }
        });
        Ok(())
    }

    /// Hide or show a content unit without removing it from its pane
    pub fn set_content_hidden(&mut self, content: ContentId, hidden: bool) -> Result<()> {
        self.require_content(content)?;
        self.batch(|engine| {
            if let Some(unit) = engine.contents.get_mut(&content) {
                unit.is_hidden = hidden;
            }
        });
        Ok(())
    }

    /// Select the active content of a pane
    pub fn set_active_content(&mut self, pane: PaneId, content: ContentId) -> Result<()> {
        if !self.require_pane(pane)?.contains(content) {
            return Err(DockError::container_ref(format!(
                "content {:?} is not a member of pane {:?}",
                content, pane
            )));
        }
        self.batch(|engine| engine.set_active_content_unchecked(pane, content));
        Ok(())
    }

    fn set_active_content_unchecked(&mut self, pane: PaneId, content: ContentId) {
        let Some(p) = self.panes.get_mut(&pane) else {
            return;
        };
        if p.active_content != Some(content) {
            p.active_content = Some(content);
            self.emit(Cmd::ActiveContentChanged {
                pane,
                content: Some(content),
            });
        }
    }

    /// Select the engine-wide active pane.
    ///
    /// A document pane also becomes the active document pane.
    pub fn set_active_pane(&mut self, pane: Option<PaneId>) -> Result<()> {
        let is_document = match pane {
            Some(p) => self.require_pane(p)?.dock_state == DockState::Document,
            None => false,
        };

        if self.active_pane != pane {
            self.active_pane = pane;
            self.emit(Cmd::ActivePaneChanged { pane });
        }
        if is_document && self.active_document_pane != pane {
            self.active_document_pane = pane;
            self.emit(Cmd::ActiveDocumentPaneChanged { pane });
        }
        Ok(())
    }

    // ========================================================================
    // Dock-state transitions
    // ========================================================================

    /// Move a pane to another dock state.
    ///
    /// Edge states sharing a region (e.g. `DockLeft` and `AutoHideLeft`) only
    /// relabel the pane. Anything else detaches it and appends it to the
    /// matching anchor region or floating window.
    pub fn set_dock_state(&mut self, pane: PaneId, state: DockState) -> Result<()> {
        if !state.is_valid_target() {
            return Err(DockError::InvalidDockState {
                content: None,
                persist_key: String::new(),
                state,
            });
        }
        let current = self.require_pane(pane)?;
        if current.dock_state == state {
            return Ok(());
        }
        let container = current.container;
        self.check_dock_state(&[pane], state)?;

        self.batch(|engine| {
            let same_region = matches!(
                (container, state.anchor_region()),
                (Some(ContainerId::Anchor(from)), Some(to)) if from == to
            );
            if same_region {
                engine.set_pane_state(pane, state);
            } else {
                engine.detach_pane(pane);
                engine.set_pane_state(pane, state);
                engine.place_pane(pane, state);
            }
        });
        Ok(())
    }

    /// Toggle an edge pane between docked and auto-hide
    pub fn toggle_auto_hide(&mut self, pane: PaneId) -> Result<()> {
        let state = self.require_pane(pane)?.dock_state;
        match state.toggle_auto_hide() {
            toggled if toggled != state => self.set_dock_state(pane, toggled),
            _ => Ok(()),
        }
    }

    /// Float a pane in a new window at `bounds`
    pub fn float_pane_at(&mut self, pane: PaneId, bounds: Rect) -> Result<FloatId> {
        self.check_dock_state(&[pane], DockState::Float)?;
        Ok(self.batch(|engine| {
            engine.detach_pane(pane);
            engine.set_pane_state(pane, DockState::Float);
            let window = engine.create_floating_window(bounds);
            engine.attach_pane(pane, ContainerId::Floating(window), NestedLink::root());
            window
        }))
    }

    // ========================================================================
    // Floating windows
    // ========================================================================

    /// Bounds of a floating window created without explicit bounds
    fn default_float_bounds(&self) -> Rect {
        let (width, height) = self.config.default_float_size;
        let x = self.surface.x + ((self.surface.width - width) / 2.0).max(0.0);
        let y = self.surface.y + ((self.surface.height - height) / 2.0).max(0.0);
        Rect::new(x, y, width, height)
    }

    /// Create an empty floating window in front of all others.
    ///
    /// A window that is still empty at the next `tick()` is destroyed.
    pub fn create_floating_window(&mut self, bounds: Rect) -> FloatId {
        let id = self.next_float_id();
        self.floating.insert(id, Container::floating(id, bounds));
        self.z_order.insert(0, id);
        self.pending_disposal.push(id);
        tracing::debug!(window = ?id, ?bounds, "floating window created");
        self.emit(Cmd::CreateFloatingWindow { window: id, bounds });
        id
    }

    fn schedule_disposal_if_empty(&mut self, window: FloatId) {
        let empty = self.floating.get(&window).is_some_and(|c| c.is_empty());
        if empty && !self.pending_disposal.contains(&window) {
            self.pending_disposal.push(window);
        }
    }

    fn destroy_floating_window(&mut self, window: FloatId) {
        if self.floating.remove(&window).is_some() {
            self.z_order.retain(|w| *w != window);
            tracing::debug!(?window, "floating window destroyed");
            self.emit(Cmd::DestroyFloatingWindow { window });
        }
    }

    /// Move or resize a floating window (host-driven)
    pub fn set_floating_bounds(&mut self, window: FloatId, bounds: Rect) -> Result<()> {
        let container = self
            .floating
            .get_mut(&window)
            .ok_or(DockError::UnknownFloatingWindow(window))?;
        if container.rect == bounds {
            return Ok(());
        }
        container.rect = bounds;
        self.emit(Cmd::ContainerBoundsChanged {
            container: ContainerId::Floating(window),
            rect: bounds,
        });
        self.relayout();
        Ok(())
    }

    /// Raise a floating window to the front of the z-order
    pub fn bring_to_front(&mut self, window: FloatId) -> Result<()> {
        let index = self
            .z_order
            .iter()
            .position(|w| *w == window)
            .ok_or(DockError::UnknownFloatingWindow(window))?;
        let id = self.z_order.remove(index);
        self.z_order.insert(0, id);
        Ok(())
    }

    /// Advance timers: destroy floating windows emptied since the last tick and
    /// check the auto-hide debounce
    pub fn tick(&mut self, now: Instant) {
        let pending = std::mem::take(&mut self.pending_disposal);
        for window in pending {
            if self.floating.get(&window).is_some_and(|c| c.is_empty()) {
                self.destroy_floating_window(window);
            }
        }
        self.tick_auto_hide(now);
    }
}
