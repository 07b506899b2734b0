//! Containers: anchor regions and floating windows
//!
//! Every container owns exactly one nested pane collection. The five anchor
//! regions live for as long as the engine does; floating windows come and go.

use serde::{Deserialize, Serialize};

use super::content::DockState;
use super::geometry::{Alignment, Rect};
use super::nested::NestedPaneCollection;

/// Unique identifier for a floating window
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FloatId(pub u64);

/// Fixed docking targets of the host surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AnchorRegion {
    Left,
    Right,
    Top,
    Bottom,
    Document,
}

impl AnchorRegion {
    /// All anchor regions, in persistence order
    pub const ALL: [AnchorRegion; 5] = [
        AnchorRegion::Document,
        AnchorRegion::Left,
        AnchorRegion::Right,
        AnchorRegion::Top,
        AnchorRegion::Bottom,
    ];

    /// Dock state of panes displayed in this region
    pub fn dock_state(&self) -> DockState {
        match self {
            AnchorRegion::Left => DockState::DockLeft,
            AnchorRegion::Right => DockState::DockRight,
            AnchorRegion::Top => DockState::DockTop,
            AnchorRegion::Bottom => DockState::DockBottom,
            AnchorRegion::Document => DockState::Document,
        }
    }

    /// Auto-hide state kept by this region, if it has one
    pub fn auto_hide_state(&self) -> Option<DockState> {
        match self {
            AnchorRegion::Document => None,
            other => Some(other.dock_state().toggle_auto_hide()),
        }
    }

    /// Whether a pane in `state` belongs to this region's collection
    pub fn holds(&self, state: DockState) -> bool {
        state.anchor_region() == Some(*self)
    }

    /// Alignment used to stack a newly added pane onto the region's last pane
    pub fn stacking_alignment(&self) -> Alignment {
        match self {
            AnchorRegion::Left | AnchorRegion::Right => Alignment::Bottom,
            AnchorRegion::Top | AnchorRegion::Bottom | AnchorRegion::Document => Alignment::Right,
        }
    }

    /// Edge of the host surface this region hugs
    pub fn edge(&self) -> Option<Alignment> {
        match self {
            AnchorRegion::Left => Some(Alignment::Left),
            AnchorRegion::Right => Some(Alignment::Right),
            AnchorRegion::Top => Some(Alignment::Top),
            AnchorRegion::Bottom => Some(Alignment::Bottom),
            AnchorRegion::Document => None,
        }
    }
}

/// Identifies a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContainerId {
    Anchor(AnchorRegion),
    Floating(FloatId),
}

impl ContainerId {
    /// Dock state a pane takes when docked into this container
    pub fn dock_state(&self) -> DockState {
        match self {
            ContainerId::Anchor(region) => region.dock_state(),
            ContainerId::Floating(_) => DockState::Float,
        }
    }

    /// Whether a pane in `state` may live in this container
    pub fn holds(&self, state: DockState) -> bool {
        match self {
            ContainerId::Anchor(region) => region.holds(state),
            ContainerId::Floating(_) => state == DockState::Float,
        }
    }

    pub fn is_floating(&self) -> bool {
        matches!(self, ContainerId::Floating(_))
    }
}

/// Kind of container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    AnchorRegion(AnchorRegion),
    FloatingWindow,
}

/// A container owns a nested pane collection and an overall rectangle
#[derive(Debug, Clone)]
pub struct Container {
    pub id: ContainerId,
    pub kind: ContainerKind,
    /// Overall rectangle (computed for anchor regions, host-set for floating windows)
    pub rect: Rect,
    pub nested_panes: NestedPaneCollection,
}

impl Container {
    pub fn anchor(region: AnchorRegion) -> Self {
        Self {
            id: ContainerId::Anchor(region),
            kind: ContainerKind::AnchorRegion(region),
            rect: Rect::ZERO,
            nested_panes: NestedPaneCollection::new(),
        }
    }

    pub fn floating(id: FloatId, bounds: Rect) -> Self {
        Self {
            id: ContainerId::Floating(id),
            kind: ContainerKind::FloatingWindow,
            rect: bounds,
            nested_panes: NestedPaneCollection::new(),
        }
    }

    /// Dock state of the panes this container displays
    pub fn dock_state(&self) -> DockState {
        self.id.dock_state()
    }

    pub fn is_empty(&self) -> bool {
        self.nested_panes.is_empty()
    }
}

/// The five anchor regions of the host surface
#[derive(Debug, Clone)]
pub struct AnchorRegions {
    pub left: Container,
    pub right: Container,
    pub top: Container,
    pub bottom: Container,
    pub document: Container,
}

impl Default for AnchorRegions {
    fn default() -> Self {
        Self {
            left: Container::anchor(AnchorRegion::Left),
            right: Container::anchor(AnchorRegion::Right),
            top: Container::anchor(AnchorRegion::Top),
            bottom: Container::anchor(AnchorRegion::Bottom),
            document: Container::anchor(AnchorRegion::Document),
        }
    }
}

impl AnchorRegions {
    /// Get region by position
    pub fn region(&self, region: AnchorRegion) -> &Container {
        match region {
            AnchorRegion::Left => &self.left,
            AnchorRegion::Right => &self.right,
            AnchorRegion::Top => &self.top,
            AnchorRegion::Bottom => &self.bottom,
            AnchorRegion::Document => &self.document,
        }
    }

    /// Get mutable region by position
    pub fn region_mut(&mut self, region: AnchorRegion) -> &mut Container {
        match region {
            AnchorRegion::Left => &mut self.left,
            AnchorRegion::Right => &mut self.right,
            AnchorRegion::Top => &mut self.top,
            AnchorRegion::Bottom => &mut self.bottom,
            AnchorRegion::Document => &mut self.document,
        }
    }

    /// Find which region's collection holds a pane
    pub fn find_pane(&self, pane: super::pane::PaneId) -> Option<AnchorRegion> {
        AnchorRegion::ALL
            .into_iter()
            .find(|&region| self.region(region).nested_panes.contains(pane))
    }
}
