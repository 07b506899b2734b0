//! Drag-to-redock handlers

use crate::engine::DockEngine;
use crate::error::Result;
use crate::messages::DragMsg;

/// Handle drag messages.
///
/// A rejected hover target is not an error; it simply leaves the drag without
/// a drop target.
pub fn update_drag(engine: &mut DockEngine, msg: DragMsg) -> Result<()> {
    match msg {
        DragMsg::Begin { source, origin } => engine.begin_drag(source, origin),
        DragMsg::Hover(hit) => {
            if !engine.update_drag(hit)? {
                tracing::trace!(?hit, "drop target rejected");
            }
            Ok(())
        }
        DragMsg::Commit => engine.commit_drag().map(|outcome| {
            tracing::debug!(?outcome, "drag finished");
        }),
        DragMsg::Cancel => engine.cancel_drag(),
    }
}
