//! Update functions for the Elm-style architecture
//!
//! `update()` applies one message to the engine and hands back the commands it
//! produced, collapsed into a single `Cmd`.

mod content;
mod dock;
mod drag;
mod surface;

use crate::commands::Cmd;
use crate::engine::DockEngine;
use crate::error::Result;
use crate::messages::Msg;

#[cfg(debug_assertions)]
use crate::tracing::LayoutSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use content::update_content;
pub use dock::update_dock;
pub use drag::update_drag;
pub use surface::{update_auto_hide, update_surface};

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(engine: &mut DockEngine, msg: Msg) -> Result<Option<Cmd>> {
    #[cfg(debug_assertions)]
    {
        update_traced(engine, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(engine, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(engine: &mut DockEngine, msg: Msg) -> Result<Option<Cmd>> {
    match msg {
        Msg::Content(m) => content::update_content(engine, m)?,
        Msg::Dock(m) => dock::update_dock(engine, m)?,
        Msg::Drag(m) => drag::update_drag(engine, m)?,
        Msg::AutoHide(m) => surface::update_auto_hide(engine, m)?,
        Msg::Surface(m) => surface::update_surface(engine, m)?,
    }
    Ok(Cmd::from_vec(engine.take_commands()))
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after layout shape and logs the diff. Periodic ticks and
/// pointer moves are not logged.
#[cfg(debug_assertions)]
fn update_traced(engine: &mut DockEngine, msg: Msg) -> Result<Option<Cmd>> {
    use crate::messages::{AutoHideMsg, SurfaceMsg};

    let is_noisy = matches!(
        &msg,
        Msg::Surface(SurfaceMsg::Tick(_)) | Msg::AutoHide(AutoHideMsg::PointerMoved(_))
    );

    let msg_name = msg_type_name(&msg);
    let _span = if is_noisy {
        None
    } else {
        Some(span!(Level::DEBUG, "update", msg = %msg_name).entered())
    };

    let before = LayoutSnapshot::from_engine(engine);
    if !is_noisy {
        debug!(target: "message", msg = %msg_name, "processing");
    }

    let result = update_inner(engine, msg);

    let after = LayoutSnapshot::from_engine(engine);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "layout", %diff, "state changed");
    }
    if !engine.is_suspended() {
        engine.assert_invariants();
    }

    result
}

/// Get a display name for a message type
///
/// Example outputs:
/// - `Content::Show { content: ContentId(3), state: Document }`
/// - `Surface::Resize(Rect { .. })`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    match msg {
        Msg::Content(m) => format!("Content::{:?}", m),
        Msg::Dock(m) => format!("Dock::{:?}", m),
        Msg::Drag(m) => format!("Drag::{:?}", m),
        Msg::AutoHide(m) => format!("AutoHide::{:?}", m),
        Msg::Surface(m) => format!("Surface::{:?}", m),
    }
}
