//! Message types for the Elm-style architecture
//!
//! Everything the host asks of the engine can be expressed as a `Msg` and fed
//! through `update()`. Operations that hand back an id (creating contents,
//! panes or floating windows) are also available as direct engine methods.

use std::time::Instant;

use crate::engine::{DockRequest, DragSource, DropTarget};
use crate::model::{ContentId, DockState, FloatId, PaneId, Point, Rect};

/// Content placement messages
#[derive(Debug, Clone, PartialEq)]
pub enum ContentMsg {
    /// Show a content in a state, joining a matching pane
    Show { content: ContentId, state: DockState },
    /// Move a content into a pane of its own
    NewPane { content: ContentId, state: DockState },
    /// Hide or unhide a content without removing it
    SetHidden { content: ContentId, hidden: bool },
    /// Remove a content from the engine
    Remove(ContentId),
    /// Select a pane's active content (tab click)
    Activate { pane: PaneId, content: ContentId },
}

/// Structural messages
#[derive(Debug, Clone, PartialEq)]
pub enum DockMsg {
    /// Dock panes into a container
    Dock {
        sources: Vec<PaneId>,
        request: DockRequest,
    },
    /// Move a pane to another dock state
    SetState { pane: PaneId, state: DockState },
    /// Toggle an edge pane between docked and auto-hide
    ToggleAutoHide(PaneId),
    /// Float a pane in a new window
    Float { pane: PaneId, bounds: Rect },
    /// Host focus moved to a pane
    ActivatePane(Option<PaneId>),
}

/// Drag-to-redock messages
#[derive(Debug, Clone, PartialEq)]
pub enum DragMsg {
    Begin { source: DragSource, origin: Rect },
    /// Latest hit-test result
    Hover(Option<DropTarget>),
    Commit,
    Cancel,
}

/// Auto-hide overlay messages
#[derive(Debug, Clone, PartialEq)]
pub enum AutoHideMsg {
    /// Slide a pane in (or the overlay out with `None`)
    Show { pane: Option<PaneId>, now: Instant },
    Pin { pinned: bool, now: Instant },
    PointerMoved(Point),
}

/// Host surface and window messages
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceMsg {
    /// Host surface resized
    Resize(Rect),
    /// A floating window was moved or resized by the user
    FloatingBounds { window: FloatId, bounds: Rect },
    BringToFront(FloatId),
    /// Periodic timer
    Tick(Instant),
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Content(ContentMsg),
    Dock(DockMsg),
    Drag(DragMsg),
    AutoHide(AutoHideMsg),
    Surface(SurfaceMsg),
}

// Convenience constructors for common messages
impl Msg {
    pub fn show(content: ContentId, state: DockState) -> Self {
        Msg::Content(ContentMsg::Show { content, state })
    }

    pub fn dock(sources: Vec<PaneId>, request: DockRequest) -> Self {
        Msg::Dock(DockMsg::Dock { sources, request })
    }

    pub fn resize(bounds: Rect) -> Self {
        Msg::Surface(SurfaceMsg::Resize(bounds))
    }

    pub fn tick(now: Instant) -> Self {
        Msg::Surface(SurfaceMsg::Tick(now))
    }
}
