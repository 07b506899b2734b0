//! Dock update handlers
//!
//! Structural changes: docking, dock-state transitions and pane activation.

use crate::engine::DockEngine;
use crate::error::Result;
use crate::messages::DockMsg;

/// Update function for dock messages
pub fn update_dock(engine: &mut DockEngine, msg: DockMsg) -> Result<()> {
    match msg {
        DockMsg::Dock { sources, request } => engine.dock(&sources, request),
        DockMsg::SetState { pane, state } => engine.set_dock_state(pane, state),
        DockMsg::ToggleAutoHide(pane) => engine.toggle_auto_hide(pane),
        DockMsg::Float { pane, bounds } => engine.float_pane_at(pane, bounds).map(|_| ()),
        DockMsg::ActivatePane(pane) => engine.set_active_pane(pane),
    }
}
