//! Layout document: the serializable snapshot of an arrangement
//!
//! Every cross reference is a position in one of the document's arrays. `-1`
//! stands for "none". Positions are only meaningful within one document.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DockError, Result};
use crate::model::{Alignment, AnchorRegion, DockState, Rect};

/// Version written by `save()` and required by `load()`
pub const LAYOUT_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub persist_key: String,
    pub auto_hide_portion: f32,
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(default)]
    pub is_floating: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaneRecord {
    pub dock_state: DockState,
    /// Index into this pane's `contents`, or -1
    pub active_content: i32,
    /// Indices into the document's contents, in tab order
    pub contents: Vec<usize>,
}

/// One entry of a split chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestedPaneRecord {
    /// Index into the document's panes
    pub pane: usize,
    /// Index into the document's panes, or -1 for the root
    pub previous_pane: i32,
    pub alignment: Alignment,
    pub proportion: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorChainRecord {
    pub region: AnchorRegion,
    pub nested_panes: Vec<NestedPaneRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatingWindowRecord {
    pub bounds: Rect,
    /// Position in the front-to-back order (0 is frontmost)
    pub z_index: usize,
    pub nested_panes: Vec<NestedPaneRecord>,
}

/// Full snapshot of the engine's arrangement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutDocument {
    pub format_version: u32,
    pub contents: Vec<ContentRecord>,
    pub panes: Vec<PaneRecord>,
    pub anchor_regions: Vec<AnchorChainRecord>,
    pub floating_windows: Vec<FloatingWindowRecord>,
    /// Index into panes, or -1
    pub active_pane: i32,
    /// Index into panes, or -1
    pub active_document_pane: i32,
}

impl Default for LayoutDocument {
    fn default() -> Self {
        Self {
            format_version: LAYOUT_FORMAT_VERSION,
            contents: Vec::new(),
            panes: Vec::new(),
            anchor_regions: Vec::new(),
            floating_windows: Vec::new(),
            active_pane: -1,
            active_document_pane: -1,
        }
    }
}

/// Resolve an optional index (`-1` for none) against a length
fn optional_index(value: i32, len: usize, what: &str) -> Result<Option<usize>> {
    match value {
        -1 => Ok(None),
        v if v >= 0 && (v as usize) < len => Ok(Some(v as usize)),
        v => Err(DockError::corrupt(format!("{} index {} out of range", what, v))),
    }
}

impl LayoutDocument {
    /// Check the whole document before any of it is applied
    pub fn validate(&self) -> Result<()> {
        if self.format_version != LAYOUT_FORMAT_VERSION {
            return Err(DockError::IncompatibleLayoutVersion {
                found: self.format_version,
                expected: LAYOUT_FORMAT_VERSION,
            });
        }

        for (index, content) in self.contents.iter().enumerate() {
            if !content.auto_hide_portion.is_finite() || content.auto_hide_portion < 0.0 {
                return Err(DockError::corrupt(format!(
                    "content {} has an invalid auto-hide portion",
                    index
                )));
            }
        }

        let mut owner: Vec<Option<usize>> = vec![None; self.contents.len()];
        for (pane_index, pane) in self.panes.iter().enumerate() {
            if pane.contents.is_empty() {
                return Err(DockError::corrupt(format!("pane {} has no contents", pane_index)));
            }
            if !pane.dock_state.is_valid_target() {
                return Err(DockError::corrupt(format!(
                    "pane {} has dock state {:?}",
                    pane_index, pane.dock_state
                )));
            }
            for content in &pane.contents {
                let slot = owner.get_mut(*content).ok_or_else(|| {
                    DockError::corrupt(format!("pane {} references content {}", pane_index, content))
                })?;
                if let Some(other) = slot.replace(pane_index) {
                    return Err(DockError::corrupt(format!(
                        "content {} belongs to panes {} and {}",
                        content, other, pane_index
                    )));
                }
            }
            optional_index(pane.active_content, pane.contents.len(), "active content")?;
        }

        let mut placed: Vec<bool> = vec![false; self.panes.len()];
        let mut regions = HashSet::new();
        for chain in &self.anchor_regions {
            if !regions.insert(chain.region) {
                return Err(DockError::corrupt(format!("region {:?} appears twice", chain.region)));
            }
            self.validate_chain(&chain.nested_panes, &mut placed, |state| chain.region.holds(state))?;
        }

        let mut z_seen = vec![false; self.floating_windows.len()];
        for window in &self.floating_windows {
            let Some(seen) = z_seen.get_mut(window.z_index).filter(|seen| !**seen) else {
                return Err(DockError::corrupt(format!("z-index {} is invalid", window.z_index)));
            };
            *seen = true;
            let bounds = window.bounds;
            if ![bounds.x, bounds.y, bounds.width, bounds.height]
                .iter()
                .all(|v| v.is_finite())
            {
                return Err(DockError::corrupt("floating window bounds are not finite"));
            }
            self.validate_chain(&window.nested_panes, &mut placed, |state| state == DockState::Float)?;
        }

        if let Some(unplaced) = placed.iter().position(|p| !p) {
            return Err(DockError::corrupt(format!("pane {} is not in any container", unplaced)));
        }

        optional_index(self.active_pane, self.panes.len(), "active pane")?;
        if let Some(pane) = optional_index(self.active_document_pane, self.panes.len(), "active document pane")? {
            if self.panes[pane].dock_state != DockState::Document {
                return Err(DockError::corrupt("active document pane is not a document pane"));
            }
        }
        Ok(())
    }

    fn validate_chain(
        &self,
        chain: &[NestedPaneRecord],
        placed: &mut [bool],
        holds: impl Fn(DockState) -> bool,
    ) -> Result<()> {
        for (position, entry) in chain.iter().enumerate() {
            let pane = self.panes.get(entry.pane).ok_or_else(|| {
                DockError::corrupt(format!("chain references pane {}", entry.pane))
            })?;
            if std::mem::replace(&mut placed[entry.pane], true) {
                return Err(DockError::corrupt(format!("pane {} is placed twice", entry.pane)));
            }
            if !holds(pane.dock_state) {
                return Err(DockError::corrupt(format!(
                    "pane {} in state {:?} is in the wrong container",
                    entry.pane, pane.dock_state
                )));
            }
            if !entry.proportion.is_finite() || entry.proportion < 0.0 {
                return Err(DockError::corrupt(format!("pane {} has an invalid proportion", entry.pane)));
            }

            let previous = optional_index(entry.previous_pane, self.panes.len(), "previous pane")?;
            match (position, previous) {
                (0, None) => {}
                (0, Some(_)) => {
                    return Err(DockError::corrupt(format!("root pane {} has a previous pane", entry.pane)))
                }
                (_, None) => {
                    return Err(DockError::corrupt(format!("pane {} has no previous pane", entry.pane)))
                }
                (_, Some(previous)) => {
                    if !chain[..position].iter().any(|e| e.pane == previous) {
                        return Err(DockError::corrupt(format!(
                            "pane {} references pane {} which is not earlier in its chain",
                            entry.pane, previous
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    // ========================================================================
    // JSON
    // ========================================================================

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a document, checking the format version before the schema
    pub fn from_json(text: &str) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| DockError::corrupt(e.to_string()))?;

        let found = value
            .get("format_version")
            .and_then(serde_json::Value::as_u64)
            .ok_or_else(|| DockError::corrupt("missing format_version"))?;
        if found != u64::from(LAYOUT_FORMAT_VERSION) {
            return Err(DockError::IncompatibleLayoutVersion {
                found: u32::try_from(found).unwrap_or(u32::MAX),
                expected: LAYOUT_FORMAT_VERSION,
            });
        }

        serde_json::from_value(value).map_err(|e| DockError::corrupt(e.to_string()))
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        tracing::info!("Saved layout to {}", path.display());
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}
