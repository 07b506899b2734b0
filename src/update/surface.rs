//! Host surface, floating window and auto-hide handlers

use crate::engine::DockEngine;
use crate::error::Result;
use crate::messages::{AutoHideMsg, SurfaceMsg};

/// Handle host surface and window messages
pub fn update_surface(engine: &mut DockEngine, msg: SurfaceMsg) -> Result<()> {
    match msg {
        SurfaceMsg::Resize(bounds) => {
            engine.set_surface_bounds(bounds);
            Ok(())
        }
        SurfaceMsg::FloatingBounds { window, bounds } => engine.set_floating_bounds(window, bounds),
        SurfaceMsg::BringToFront(window) => engine.bring_to_front(window),
        SurfaceMsg::Tick(now) => {
            engine.tick(now);
            Ok(())
        }
    }
}

/// Handle auto-hide overlay messages
pub fn update_auto_hide(engine: &mut DockEngine, msg: AutoHideMsg) -> Result<()> {
    match msg {
        AutoHideMsg::Show { pane, now } => engine.set_auto_hide_active(pane, now),
        AutoHideMsg::Pin { pinned, now } => {
            engine.set_auto_hide_pinned(pinned, now);
            Ok(())
        }
        AutoHideMsg::PointerMoved(position) => {
            engine.pointer_moved(position);
            Ok(())
        }
    }
}
