//! Layout engine - the sole mutator of panes, containers and split chains
//!
//! The engine owns:
//! - content records (host payloads stay with the host)
//! - panes and the five anchor regions plus any floating windows
//! - engine-wide selections (active pane, active document pane)
//! - the auto-hide overlay and drag session
//! - a queue of `Cmd`s for the host, drained with `take_commands()`
//!
//! Structural operations run inside `batch()` so that geometry and
//! active-content validation only ever see a fully applied change.

mod auto_hide;
mod dock;
mod drag;
mod layout;
mod state;
mod suspend;

use std::collections::BTreeMap;

use crate::commands::Cmd;
use crate::config::EngineConfig;
use crate::error::{DockError, Result};
use crate::model::{
    AnchorRegion, AnchorRegions, Container, ContainerId, ContentId, ContentUnit, DockState,
    FloatId, NestedLink, Pane, PaneId, Rect,
};

pub use auto_hide::{AutoHideOverlay, EdgeStrips};
pub use dock::{DockRequest, DockStyle};
pub use drag::{DragOutcome, DragSession, DragSource, DragState, DropTarget};
pub use layout::{compute_anchor_layout, compute_nested_layout, AnchorLayout};
pub use suspend::{LayoutStats, SuspendToken};

/// The docking layout engine
#[derive(Debug)]
pub struct DockEngine {
    pub(crate) config: EngineConfig,

    /// All content units, in creation order
    pub(crate) contents: BTreeMap<ContentId, ContentUnit>,

    /// All panes, in creation order
    pub(crate) panes: BTreeMap<PaneId, Pane>,

    pub(crate) anchors: AnchorRegions,
    pub(crate) floating: BTreeMap<FloatId, Container>,

    /// Floating windows, front to back
    pub(crate) z_order: Vec<FloatId>,

    /// Empty floating windows waiting for the next tick to be destroyed
    pub(crate) pending_disposal: Vec<FloatId>,

    /// Host surface the anchor regions are laid out in
    pub(crate) surface: Rect,

    pub(crate) active_pane: Option<PaneId>,
    pub(crate) active_document_pane: Option<PaneId>,

    pub(crate) auto_hide: AutoHideOverlay,
    pub(crate) drag: DragState,

    pub(crate) suspend_depth: usize,
    pub(crate) stats: LayoutStats,

    commands: Vec<Cmd>,

    next_content_id: u64,
    next_pane_id: u64,
    next_float_id: u64,
}

impl Default for DockEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl DockEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            contents: BTreeMap::new(),
            panes: BTreeMap::new(),
            anchors: AnchorRegions::default(),
            floating: BTreeMap::new(),
            z_order: Vec::new(),
            pending_disposal: Vec::new(),
            surface: Rect::ZERO,
            active_pane: None,
            active_document_pane: None,
            auto_hide: AutoHideOverlay::default(),
            drag: DragState::Idle,
            suspend_depth: 0,
            stats: LayoutStats::default(),
            commands: Vec::new(),
            next_content_id: 1,
            next_pane_id: 1,
            next_float_id: 1,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn surface(&self) -> Rect {
        self.surface
    }

    pub fn content(&self, id: ContentId) -> Option<&ContentUnit> {
        self.contents.get(&id)
    }

    /// All content units in creation order
    pub fn contents(&self) -> impl Iterator<Item = &ContentUnit> {
        self.contents.values()
    }

    pub fn content_count(&self) -> usize {
        self.contents.len()
    }

    /// Find a content unit by its persist key
    pub fn find_content(&self, persist_key: &str) -> Option<ContentId> {
        self.contents
            .values()
            .find(|c| c.persist_key == persist_key)
            .map(|c| c.id)
    }

    pub fn pane(&self, id: PaneId) -> Option<&Pane> {
        self.panes.get(&id)
    }

    /// All panes in creation order
    pub fn panes(&self) -> impl Iterator<Item = &Pane> {
        self.panes.values()
    }

    pub fn pane_count(&self) -> usize {
        self.panes.len()
    }

    pub fn container(&self, id: ContainerId) -> Option<&Container> {
        match id {
            ContainerId::Anchor(region) => Some(self.anchors.region(region)),
            ContainerId::Floating(window) => self.floating.get(&window),
        }
    }

    pub(crate) fn container_mut(&mut self, id: ContainerId) -> Option<&mut Container> {
        match id {
            ContainerId::Anchor(region) => Some(self.anchors.region_mut(region)),
            ContainerId::Floating(window) => self.floating.get_mut(&window),
        }
    }

    pub fn anchor_region(&self, region: AnchorRegion) -> &Container {
        self.anchors.region(region)
    }

    /// Floating windows, front to back
    pub fn floating_windows(&self) -> impl Iterator<Item = &Container> {
        self.z_order.iter().filter_map(|id| self.floating.get(id))
    }

    pub fn floating_window_count(&self) -> usize {
        self.floating.len()
    }

    /// Container holding a pane
    pub fn pane_container(&self, pane: PaneId) -> Option<ContainerId> {
        self.panes.get(&pane).and_then(|p| p.container)
    }

    /// Current split-chain link of a pane
    pub fn nested_link(&self, pane: PaneId) -> Option<NestedLink> {
        let container = self.pane_container(pane)?;
        self.container(container)?.nested_panes.link(pane)
    }

    pub fn active_pane(&self) -> Option<PaneId> {
        self.active_pane
    }

    pub fn active_document_pane(&self) -> Option<PaneId> {
        self.active_document_pane
    }

    /// Active content of the active pane
    pub fn active_content(&self) -> Option<ContentId> {
        self.active_pane
            .and_then(|p| self.panes.get(&p))
            .and_then(|p| p.active_content)
    }

    pub fn stats(&self) -> LayoutStats {
        self.stats
    }

    /// Whether a content unit is shown (not hidden by the host)
    pub fn is_content_visible(&self, content: ContentId) -> bool {
        self.contents
            .get(&content)
            .map(|c| !c.is_hidden)
            .unwrap_or(false)
    }

    /// Whether a pane takes part in its container's static layout.
    ///
    /// The pane must hold at least one visible content and be in the state its
    /// container displays (auto-hide panes are shown by the overlay instead).
    pub fn is_pane_displayed(&self, pane: PaneId) -> bool {
        let Some(pane) = self.panes.get(&pane) else {
            return false;
        };
        let Some(container) = pane.container else {
            return false;
        };
        pane.dock_state == container.dock_state()
            && pane.contents.iter().any(|c| self.is_content_visible(*c))
    }

    /// Dock state as the host should present it (`Hidden` when nothing shows)
    pub fn display_state(&self, pane: PaneId) -> DockState {
        match self.panes.get(&pane) {
            Some(p) if p.contents.iter().any(|c| self.is_content_visible(*c)) => p.dock_state,
            Some(_) => DockState::Hidden,
            None => DockState::Unknown,
        }
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    pub(crate) fn emit(&mut self, cmd: Cmd) {
        self.commands.push(cmd);
    }

    /// Drain the commands produced since the last call
    pub fn take_commands(&mut self) -> Vec<Cmd> {
        std::mem::take(&mut self.commands)
    }

    // ========================================================================
    // Identifier allocation
    // ========================================================================

    pub(crate) fn next_content_id(&mut self) -> ContentId {
        let id = ContentId(self.next_content_id);
        self.next_content_id += 1;
        id
    }

    pub(crate) fn next_pane_id(&mut self) -> PaneId {
        let id = PaneId(self.next_pane_id);
        self.next_pane_id += 1;
        id
    }

    pub(crate) fn next_float_id(&mut self) -> FloatId {
        let id = FloatId(self.next_float_id);
        self.next_float_id += 1;
        id
    }

    // ========================================================================
    // Lookups that fail with typed errors
    // ========================================================================

    pub(crate) fn require_pane(&self, pane: PaneId) -> Result<&Pane> {
        self.panes.get(&pane).ok_or(DockError::UnknownPane(pane))
    }

    pub(crate) fn require_content(&self, content: ContentId) -> Result<&ContentUnit> {
        self.contents
            .get(&content)
            .ok_or(DockError::UnknownContent(content))
    }

    pub(crate) fn require_container(&self, container: ContainerId) -> Result<&Container> {
        self.container(container)
            .ok_or(DockError::UnknownContainer(container))
    }

    /// Check that every content of `panes` allows `state`
    pub(crate) fn check_dock_state(&self, panes: &[PaneId], state: DockState) -> Result<()> {
        for pane_id in panes {
            let pane = self.require_pane(*pane_id)?;
            for content_id in &pane.contents {
                let content = self.require_content(*content_id)?;
                if !content.allows(state) {
                    return Err(DockError::InvalidDockState {
                        content: Some(content.id),
                        persist_key: content.persist_key.clone(),
                        state,
                    });
                }
            }
        }
        Ok(())
    }

    // ========================================================================
    // Debug Invariants
    // ========================================================================

    /// Assert engine invariants (debug builds only)
    ///
    /// This function checks that:
    /// - every split chain is well formed
    /// - every attached pane is non-empty and in a state its container holds
    /// - pane and content back references agree
    /// - active selections point at existing members
    ///
    /// Panics in debug builds if any invariant is violated.
    #[cfg(debug_assertions)]
    pub fn assert_invariants(&self) {
        let containers = AnchorRegion::ALL
            .iter()
            .map(|r| self.anchors.region(*r))
            .chain(self.floating.values());

        for container in containers {
            if let Err(e) = container.nested_panes.validate() {
                panic!("container {:?} has a malformed chain: {}", container.id, e);
            }
            for pane_id in container.nested_panes.panes() {
                let pane = self
                    .panes
                    .get(&pane_id)
                    .unwrap_or_else(|| panic!("chain of {:?} references missing {:?}", container.id, pane_id));
                assert_eq!(pane.container, Some(container.id), "pane {:?} back reference", pane_id);
                assert!(
                    container.id.holds(pane.dock_state),
                    "pane {:?} in state {:?} cannot live in {:?}",
                    pane_id,
                    pane.dock_state,
                    container.id
                );
                assert!(!pane.is_empty(), "pane {:?} is empty but attached", pane_id);
            }
        }

        for (pane_id, pane) in &self.panes {
            assert!(pane.container.is_some(), "pane {:?} is not attached", pane_id);
            if let Some(active) = pane.active_content {
                assert!(pane.contains(active), "pane {:?} active content is not a member", pane_id);
            }
            for content_id in &pane.contents {
                let content = self
                    .contents
                    .get(content_id)
                    .unwrap_or_else(|| panic!("pane {:?} holds missing {:?}", pane_id, content_id));
                assert_eq!(content.pane, Some(*pane_id), "content {:?} back reference", content_id);
                assert!(
                    content.allows(pane.dock_state),
                    "content {:?} does not allow {:?}",
                    content_id,
                    pane.dock_state
                );
            }
        }

        if let Some(active) = self.active_pane {
            assert!(self.panes.contains_key(&active), "active pane {:?} missing", active);
        }
        if let Some(active) = self.active_document_pane {
            assert!(self.panes.contains_key(&active), "active document pane {:?} missing", active);
        }
    }

    /// No-op in release builds
    #[cfg(not(debug_assertions))]
    #[inline]
    pub fn assert_invariants(&self) {}
}
