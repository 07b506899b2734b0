//! Layout persistence
//!
//! `save()` snapshots the engine into a `LayoutDocument`; `load()` rebuilds an
//! empty engine from one. Loading resolves contents through a host callback,
//! validates everything up front and replays split chains with the same attach
//! primitive `dock` uses, so the geometry pass reproduces the saved layout.

mod document;

pub use document::{
    AnchorChainRecord, ContentRecord, FloatingWindowRecord, LayoutDocument, NestedPaneRecord,
    PaneRecord, LAYOUT_FORMAT_VERSION,
};

use std::collections::HashMap;

use crate::engine::DockEngine;
use crate::error::{DockError, Result};
use crate::model::{
    AnchorRegion, ContainerId, ContentId, ContentSpec, ContentUnit, DockState, FloatId,
    NestedLink, NestedPaneCollection, Pane, PaneId, Rect,
};

/// Outcome of a successful `load()`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Engine id of every document content, `None` where a placeholder was discarded
    pub contents: Vec<Option<ContentId>>,
    /// Engine id of every document pane that survived placeholder removal
    pub panes: Vec<Option<PaneId>>,
    /// Persist keys the resolver did not know
    pub unresolved: Vec<String>,
}

fn index_of(value: Option<usize>) -> i32 {
    value.map(|v| v as i32).unwrap_or(-1)
}

impl DockEngine {
    /// Snapshot the current arrangement.
    ///
    /// Panes are numbered in traversal order: anchor regions first, then
    /// floating windows front to back.
    pub fn save(&self) -> LayoutDocument {
        let content_index: HashMap<ContentId, usize> = self
            .contents
            .keys()
            .enumerate()
            .map(|(index, id)| (*id, index))
            .collect();

        // Panes emptied inside an open batch are left out, with their chain
        // entries repaired away the same way the layout pass would.
        let saved_chain = |chain: &NestedPaneCollection| {
            let mut chain = chain.clone();
            chain.retain(|pane| self.panes.get(&pane).is_some_and(|p| !p.is_empty()));
            chain
        };
        let regions: Vec<(AnchorRegion, NestedPaneCollection)> = AnchorRegion::ALL
            .iter()
            .map(|region| (*region, saved_chain(&self.anchors.region(*region).nested_panes)))
            .filter(|(_, chain)| !chain.is_empty())
            .collect();
        let windows: Vec<(Rect, NestedPaneCollection)> = self
            .floating_windows()
            .map(|window| (window.rect, saved_chain(&window.nested_panes)))
            .filter(|(_, chain)| !chain.is_empty())
            .collect();

        let pane_order: Vec<PaneId> = regions
            .iter()
            .map(|(_, chain)| chain)
            .chain(windows.iter().map(|(_, chain)| chain))
            .flat_map(|chain| chain.panes())
            .collect();
        let pane_index: HashMap<PaneId, usize> = pane_order
            .iter()
            .enumerate()
            .map(|(index, id)| (*id, index))
            .collect();

        let chain_record = |chain: &NestedPaneCollection| -> Vec<NestedPaneRecord> {
            chain
                .entries()
                .iter()
                .map(|entry| NestedPaneRecord {
                    pane: pane_index[&entry.pane],
                    previous_pane: index_of(entry.link.previous.map(|p| pane_index[&p])),
                    alignment: entry.link.alignment,
                    proportion: entry.link.proportion,
                })
                .collect()
        };

        let document = LayoutDocument {
            format_version: LAYOUT_FORMAT_VERSION,
            contents: self
                .contents
                .values()
                .map(|c| ContentRecord {
                    persist_key: c.persist_key.clone(),
                    auto_hide_portion: c.auto_hide_portion,
                    is_hidden: c.is_hidden,
                    is_floating: c.is_floating,
                })
                .collect(),
            panes: pane_order
                .iter()
                .filter_map(|id| self.panes.get(id))
                .map(|pane| PaneRecord {
                    dock_state: pane.dock_state,
                    active_content: index_of(pane.active_content.and_then(|c| pane.index_of(c))),
                    contents: pane.contents.iter().map(|c| content_index[c]).collect(),
                })
                .collect(),
            anchor_regions: regions
                .iter()
                .map(|(region, chain)| AnchorChainRecord {
                    region: *region,
                    nested_panes: chain_record(chain),
                })
                .collect(),
            floating_windows: windows
                .iter()
                .enumerate()
                .map(|(z_index, (bounds, chain))| FloatingWindowRecord {
                    bounds: *bounds,
                    z_index,
                    nested_panes: chain_record(chain),
                })
                .collect(),
            active_pane: index_of(self.active_pane.and_then(|p| pane_index.get(&p).copied())),
            active_document_pane: index_of(
                self.active_document_pane
                    .and_then(|p| pane_index.get(&p).copied()),
            ),
        };

        tracing::info!(
            contents = document.contents.len(),
            panes = document.panes.len(),
            floating = document.floating_windows.len(),
            "layout saved"
        );
        document
    }

    /// Rebuild the arrangement from a document.
    ///
    /// The engine must not hold any content yet. `resolve` maps a persist key
    /// to a content description; unknown keys get placeholder contents that are
    /// discarded once the whole layout has been rebuilt. Nothing is mutated
    /// unless the document is valid and every resolved content allows the
    /// state it is saved in.
    pub fn load(
        &mut self,
        document: &LayoutDocument,
        mut resolve: impl FnMut(&str) -> Option<ContentSpec>,
    ) -> Result<LoadReport> {
        if !self.contents.is_empty() {
            return Err(DockError::AlreadyInitialized(self.contents.len()));
        }
        document.validate().map_err(|e| {
            tracing::warn!("rejected layout document: {}", e);
            e
        })?;

        let specs: Vec<Option<ContentSpec>> = document
            .contents
            .iter()
            .map(|record| {
                resolve(&record.persist_key).map(|mut spec| {
                    spec.persist_key = record.persist_key.clone();
                    spec.auto_hide_portion = record.auto_hide_portion;
                    spec.is_hidden = record.is_hidden;
                    spec.is_floating = record.is_floating;
                    spec
                })
            })
            .collect();

        for pane in &document.panes {
            for content in &pane.contents {
                if let Some(spec) = &specs[*content] {
                    if !spec.allowed.allows(pane.dock_state) {
                        return Err(DockError::InvalidDockState {
                            content: None,
                            persist_key: spec.persist_key.clone(),
                            state: pane.dock_state,
                        });
                    }
                }
            }
        }

        let report = self.batch(|engine| engine.apply_document(document, specs));
        tracing::info!(
            contents = self.contents.len(),
            panes = self.panes.len(),
            unresolved = report.unresolved.len(),
            "layout loaded"
        );
        Ok(report)
    }

    fn apply_document(
        &mut self,
        document: &LayoutDocument,
        specs: Vec<Option<ContentSpec>>,
    ) -> LoadReport {
        let mut report = LoadReport::default();

        let mut content_ids = Vec::with_capacity(specs.len());
        let mut placeholders = Vec::new();
        for (record, spec) in document.contents.iter().zip(specs) {
            let id = self.next_content_id();
            let unit = match spec {
                Some(spec) => ContentUnit::from_spec(id, spec),
                None => {
                    tracing::debug!(key = %record.persist_key, "unresolved content, using placeholder");
                    report.unresolved.push(record.persist_key.clone());
                    placeholders.push(id);
                    ContentUnit {
                        auto_hide_portion: record.auto_hide_portion,
                        is_hidden: record.is_hidden,
                        is_floating: record.is_floating,
                        ..ContentUnit::placeholder(id, record.persist_key.clone())
                    }
                }
            };
            self.contents.insert(id, unit);
            content_ids.push(id);
        }

        let mut pane_ids = Vec::with_capacity(document.panes.len());
        for record in &document.panes {
            let id = self.next_pane_id();
            self.panes.insert(id, Pane::new(id, DockState::Unknown));
            self.set_pane_state(id, record.dock_state);
            for content in &record.contents {
                self.move_content_into(content_ids[*content], id, None);
            }
            if record.active_content >= 0 {
                let active = content_ids[record.contents[record.active_content as usize]];
                if let Some(pane) = self.panes.get_mut(&id) {
                    pane.active_content = Some(active);
                }
            }
            pane_ids.push(id);
        }

        let link_for = |entry: &NestedPaneRecord| NestedLink {
            previous: (entry.previous_pane >= 0).then(|| pane_ids[entry.previous_pane as usize]),
            alignment: entry.alignment,
            proportion: entry.proportion,
        };

        for chain in &document.anchor_regions {
            for entry in &chain.nested_panes {
                self.attach_pane(pane_ids[entry.pane], ContainerId::Anchor(chain.region), link_for(entry));
            }
        }

        let mut windows: Vec<(usize, FloatId)> = Vec::new();
        for record in &document.floating_windows {
            let window = self.create_floating_window(record.bounds);
            for entry in &record.nested_panes {
                self.attach_pane(pane_ids[entry.pane], ContainerId::Floating(window), link_for(entry));
            }
            windows.push((record.z_index, window));
        }
        windows.sort_by_key(|(z_index, _)| *z_index);
        let restored: Vec<_> = windows.into_iter().map(|(_, window)| window).collect();
        self.z_order.retain(|w| !restored.contains(w));
        self.z_order.splice(0..0, restored);

        let pane_at = |index: i32| (index >= 0).then(|| pane_ids[index as usize]);
        self.active_pane = pane_at(document.active_pane);
        self.active_document_pane = pane_at(document.active_document_pane);

        for placeholder in placeholders {
            if let Some(unit) = self.contents.remove(&placeholder) {
                if let Some(pane) = unit.pane.and_then(|p| self.panes.get_mut(&p)) {
                    pane.remove_content(placeholder);
                }
            }
        }

        report.contents = content_ids
            .iter()
            .map(|id| self.contents.contains_key(id).then_some(*id))
            .collect();
        report.panes = pane_ids
            .iter()
            .map(|id| {
                self.panes
                    .get(id)
                    .filter(|p| !p.is_empty())
                    .map(|p| p.id)
            })
            .collect();
        report
    }
}
