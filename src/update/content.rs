//! Content placement handlers

use crate::engine::DockEngine;
use crate::error::Result;
use crate::messages::ContentMsg;

/// Handle content messages
pub fn update_content(engine: &mut DockEngine, msg: ContentMsg) -> Result<()> {
    match msg {
        ContentMsg::Show { content, state } => engine.show_content(content, state).map(|_| ()),
        ContentMsg::NewPane { content, state } => engine.new_pane(content, state).map(|_| ()),
        ContentMsg::SetHidden { content, hidden } => engine.set_content_hidden(content, hidden),
        ContentMsg::Remove(content) => engine.remove_content(content),
        ContentMsg::Activate { pane, content } => engine.set_active_content(pane, content),
    }
}
