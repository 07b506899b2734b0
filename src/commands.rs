//! Command types for the Elm-style architecture
//!
//! Commands are the engine's requests to the host: geometry to apply, state
//! changes to reflect, and floating surfaces to create or destroy. The engine
//! decides *when*; the host decides *how*.

use crate::model::{Alignment, ContainerId, ContentId, DockState, FloatId, PaneId, Rect};

/// Command returned from update functions
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// A pane's computed rectangle changed
    PaneBoundsChanged { pane: PaneId, rect: Rect },
    /// An anchor region or floating window rectangle changed
    ContainerBoundsChanged { container: ContainerId, rect: Rect },
    /// A pane's active content changed
    ActiveContentChanged {
        pane: PaneId,
        content: Option<ContentId>,
    },
    /// The engine-wide active pane changed
    ActivePaneChanged { pane: Option<PaneId> },
    /// The active document pane changed
    ActiveDocumentPaneChanged { pane: Option<PaneId> },
    /// A pane moved to a different dock state
    DockStateChanged {
        pane: PaneId,
        from: DockState,
        to: DockState,
    },
    /// Realize a new floating window surface
    CreateFloatingWindow { window: FloatId, bounds: Rect },
    /// Tear down a floating window surface
    DestroyFloatingWindow { window: FloatId },
    /// Animate an auto-hide pane between two rectangles
    AutoHideSlide {
        pane: PaneId,
        edge: Alignment,
        from: Rect,
        to: Rect,
    },
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Collapse a list of commands into one
    pub fn from_vec(mut cmds: Vec<Cmd>) -> Option<Cmd> {
        match cmds.len() {
            0 => None,
            1 => cmds.pop(),
            _ => Some(Cmd::Batch(cmds)),
        }
    }

    /// Flatten nested batches into a plain list
    pub fn into_vec(self) -> Vec<Cmd> {
        match self {
            Cmd::None => Vec::new(),
            Cmd::Batch(cmds) => cmds.into_iter().flat_map(Cmd::into_vec).collect(),
            other => vec![other],
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Cmd::None)
    }
}
