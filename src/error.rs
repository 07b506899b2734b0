//! Error taxonomy for engine operations
//!
//! Every mutating operation validates before it mutates, so an `Err` always
//! leaves the engine exactly as it was.

use thiserror::Error;

use crate::model::{ContainerId, ContentId, DockState, FloatId, PaneId};

#[derive(Debug, Error)]
pub enum DockError {
    /// A content unit does not allow the state it would be placed in
    #[error("content {content:?} ({persist_key}) cannot be placed in {state:?}")]
    InvalidDockState {
        content: Option<ContentId>,
        persist_key: String,
        state: DockState,
    },

    /// Dock target is not part of the addressed container, or is the source itself
    #[error("invalid container reference: {0}")]
    InvalidContainerReference(String),

    #[error("layout can only be loaded into an engine without content (found {0})")]
    AlreadyInitialized(usize),

    #[error("corrupt layout document: {0}")]
    CorruptLayoutDocument(String),

    #[error("unsupported layout format version {found} (expected {expected})")]
    IncompatibleLayoutVersion { found: u32, expected: u32 },

    /// Internal bookkeeping bug: a pane without content survived a layout pass
    #[error("pane {0:?} is empty but still attached")]
    EmptyPaneInvariant(PaneId),

    #[error("unknown pane {0:?}")]
    UnknownPane(PaneId),

    #[error("unknown content {0:?}")]
    UnknownContent(ContentId),

    #[error("unknown container {0:?}")]
    UnknownContainer(ContainerId),

    #[error("unknown floating window {0:?}")]
    UnknownFloatingWindow(FloatId),

    #[error("a drag operation is already in progress")]
    DragInProgress,

    #[error("no drag operation in progress")]
    NoDragInProgress,

    #[error("layout file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode layout: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = DockError> = std::result::Result<T, E>;

impl DockError {
    pub(crate) fn corrupt(reason: impl Into<String>) -> Self {
        DockError::CorruptLayoutDocument(reason.into())
    }

    pub(crate) fn container_ref(reason: impl Into<String>) -> Self {
        DockError::InvalidContainerReference(reason.into())
    }
}
