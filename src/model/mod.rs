//! Layout model - panes, containers and their split chains
//!
//! This module contains the plain data types of the docking system. Behaviour
//! that spans several of them lives in `crate::engine`.

pub mod container;
pub mod content;
pub mod geometry;
pub mod nested;
pub mod pane;

pub use container::{AnchorRegion, AnchorRegions, Container, ContainerId, ContainerKind, FloatId};
pub use content::{ContentId, ContentSpec, ContentUnit, DockAreas, DockState};
pub use geometry::{
    clamp_split, complement_proportion, resolve_portion, split_rect, Alignment, Axis, Point, Rect,
};
pub use nested::{ChainError, NestedEntry, NestedPaneCollection};
pub use pane::{NestedLink, Pane, PaneId};
