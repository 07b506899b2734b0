//! Content units and dock states
//!
//! Content units are owned by the host. The engine keeps a record per unit with
//! the fields it needs for layout and persistence, keyed by `ContentId`.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::container::AnchorRegion;
use super::geometry::Alignment;
use super::pane::PaneId;

/// Unique identifier for a content unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContentId(pub u64);

// ============================================================================
// Dock State
// ============================================================================

/// Where a pane (and therefore its contents) is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DockState {
    #[default]
    Unknown,
    Hidden,
    Float,
    DockLeft,
    DockRight,
    DockTop,
    DockBottom,
    Document,
    AutoHideLeft,
    AutoHideRight,
    AutoHideTop,
    AutoHideBottom,
}

impl DockState {
    /// Whether this state can be the target of an explicit dock operation
    pub fn is_valid_target(&self) -> bool {
        !matches!(self, DockState::Unknown | DockState::Hidden)
    }

    pub fn is_auto_hide(&self) -> bool {
        matches!(
            self,
            DockState::AutoHideLeft
                | DockState::AutoHideRight
                | DockState::AutoHideTop
                | DockState::AutoHideBottom
        )
    }

    pub fn is_floating(&self) -> bool {
        *self == DockState::Float
    }

    /// Anchor region that holds panes in this state
    pub fn anchor_region(&self) -> Option<AnchorRegion> {
        match self {
            DockState::DockLeft | DockState::AutoHideLeft => Some(AnchorRegion::Left),
            DockState::DockRight | DockState::AutoHideRight => Some(AnchorRegion::Right),
            DockState::DockTop | DockState::AutoHideTop => Some(AnchorRegion::Top),
            DockState::DockBottom | DockState::AutoHideBottom => Some(AnchorRegion::Bottom),
            DockState::Document => Some(AnchorRegion::Document),
            DockState::Unknown | DockState::Hidden | DockState::Float => None,
        }
    }

    /// Screen edge an auto-hide state slides in from
    pub fn auto_hide_edge(&self) -> Option<Alignment> {
        match self {
            DockState::AutoHideLeft => Some(Alignment::Left),
            DockState::AutoHideRight => Some(Alignment::Right),
            DockState::AutoHideTop => Some(Alignment::Top),
            DockState::AutoHideBottom => Some(Alignment::Bottom),
            _ => None,
        }
    }

    /// Toggle between the docked and auto-hide variant of an edge state
    pub fn toggle_auto_hide(&self) -> DockState {
        match self {
            DockState::DockLeft => DockState::AutoHideLeft,
            DockState::DockRight => DockState::AutoHideRight,
            DockState::DockTop => DockState::AutoHideTop,
            DockState::DockBottom => DockState::AutoHideBottom,
            DockState::AutoHideLeft => DockState::DockLeft,
            DockState::AutoHideRight => DockState::DockRight,
            DockState::AutoHideTop => DockState::DockTop,
            DockState::AutoHideBottom => DockState::DockBottom,
            other => *other,
        }
    }

    /// Capability flag matching this state (empty for Unknown/Hidden)
    pub fn area(&self) -> DockAreas {
        match self {
            DockState::Float => DockAreas::FLOAT,
            DockState::DockLeft | DockState::AutoHideLeft => DockAreas::LEFT,
            DockState::DockRight | DockState::AutoHideRight => DockAreas::RIGHT,
            DockState::DockTop | DockState::AutoHideTop => DockAreas::TOP,
            DockState::DockBottom | DockState::AutoHideBottom => DockAreas::BOTTOM,
            DockState::Document => DockAreas::DOCUMENT,
            DockState::Unknown | DockState::Hidden => DockAreas::empty(),
        }
    }
}

bitflags! {
    /// Dock areas a content unit may occupy.
    ///
    /// Auto-hide states share the flag of their edge.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DockAreas: u8 {
        const FLOAT = 1 << 0;
        const LEFT = 1 << 1;
        const RIGHT = 1 << 2;
        const TOP = 1 << 3;
        const BOTTOM = 1 << 4;
        const DOCUMENT = 1 << 5;
    }
}

impl DockAreas {
    /// Tool windows: every edge plus floating, never the document area
    pub const TOOL: DockAreas = DockAreas::FLOAT
        .union(DockAreas::LEFT)
        .union(DockAreas::RIGHT)
        .union(DockAreas::TOP)
        .union(DockAreas::BOTTOM);

    pub fn allows(&self, state: DockState) -> bool {
        state.is_valid_target() && self.contains(state.area())
    }
}

impl Default for DockAreas {
    fn default() -> Self {
        DockAreas::all()
    }
}

// ============================================================================
// Content Units
// ============================================================================

/// Host-supplied description of a content unit
#[derive(Debug, Clone, PartialEq)]
pub struct ContentSpec {
    /// Opaque key used to find the unit again when a layout is loaded
    pub persist_key: String,
    pub allowed: DockAreas,
    /// Auto-hide size: fraction below 1, absolute size otherwise
    pub auto_hide_portion: f32,
    pub is_hidden: bool,
    pub is_floating: bool,
}

impl ContentSpec {
    pub const DEFAULT_AUTO_HIDE_PORTION: f32 = 0.25;

    pub fn new(persist_key: impl Into<String>) -> Self {
        Self {
            persist_key: persist_key.into(),
            allowed: DockAreas::all(),
            auto_hide_portion: Self::DEFAULT_AUTO_HIDE_PORTION,
            is_hidden: false,
            is_floating: false,
        }
    }

    pub fn with_allowed(mut self, allowed: DockAreas) -> Self {
        self.allowed = allowed;
        self
    }

    pub fn with_auto_hide_portion(mut self, portion: f32) -> Self {
        self.auto_hide_portion = portion;
        self
    }
}

/// Engine-side record of a content unit
#[derive(Debug, Clone)]
pub struct ContentUnit {
    pub id: ContentId,
    pub persist_key: String,
    pub allowed: DockAreas,
    pub auto_hide_portion: f32,
    pub is_hidden: bool,
    pub is_floating: bool,
    /// Pane this unit is assigned to (engine-owned)
    pub pane: Option<PaneId>,
    /// Stand-in created for an unresolved key during load
    pub is_placeholder: bool,
}

impl ContentUnit {
    pub fn from_spec(id: ContentId, spec: ContentSpec) -> Self {
        Self {
            id,
            persist_key: spec.persist_key,
            allowed: spec.allowed,
            auto_hide_portion: spec.auto_hide_portion,
            is_hidden: spec.is_hidden,
            is_floating: spec.is_floating,
            pane: None,
            is_placeholder: false,
        }
    }

    /// Placeholder for a persist key the host could not resolve
    pub fn placeholder(id: ContentId, persist_key: String) -> Self {
        Self {
            is_placeholder: true,
            ..Self::from_spec(id, ContentSpec::new(persist_key))
        }
    }

    pub fn allows(&self, state: DockState) -> bool {
        self.allowed.allows(state)
    }
}
