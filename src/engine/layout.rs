//! Geometry and validation passes
//!
//! `compute_nested_layout` and `compute_anchor_layout` are pure; the engine
//! feeds them its current state in `recompute_geometry` and applies the result,
//! queueing a `Cmd` for every rectangle that changed.

use std::collections::{HashMap, HashSet};

use super::auto_hide::EdgeStrips;
use super::DockEngine;
use crate::commands::Cmd;
use crate::config::EngineConfig;
use crate::model::{
    split_rect, Alignment, AnchorRegion, ContainerId, ContentId, DockState, NestedPaneCollection,
    PaneId, Rect,
};

/// Compute the rectangle of every displayed pane in a split chain.
///
/// The root takes `area`; each later pane is carved from its previous pane's
/// current rectangle. Panes for which `is_displayed` is false are removed from
/// a scratch copy of the chain first, using the same repair rule as a real
/// removal, so the displayed panes always tile `area`.
pub fn compute_nested_layout(
    area: Rect,
    chain: &NestedPaneCollection,
    is_displayed: impl Fn(PaneId) -> bool,
    min_size: f32,
) -> Vec<(PaneId, Rect)> {
    let mut displayed = chain.clone();
    displayed.retain(|pane| is_displayed(pane));

    let mut rects: Vec<(PaneId, Rect)> = Vec::with_capacity(displayed.len());
    for entry in displayed.entries() {
        let previous = entry
            .link
            .previous
            .and_then(|prev| rects.iter().position(|(pane, _)| *pane == prev));

        match previous {
            Some(index) => {
                let (carved, rest) = split_rect(
                    rects[index].1,
                    entry.link.alignment,
                    entry.link.proportion,
                    min_size,
                );
                rects[index].1 = rest;
                rects.push((entry.pane, carved));
            }
            None if rects.is_empty() => rects.push((entry.pane, area)),
            None => {
                tracing::warn!(pane = ?entry.pane, "pane links outside its chain, not laid out");
                rects.push((entry.pane, Rect::ZERO));
            }
        }
    }
    rects
}

/// Rectangles of the anchor regions within the host surface
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnchorLayout {
    pub left: Rect,
    pub right: Rect,
    pub top: Rect,
    pub bottom: Rect,
    pub document: Rect,
    /// Edge strips holding auto-hide tabs
    pub strips: EdgeStrips,
    /// Surface minus the strips; auto-hide overlays slide over this area
    pub overlay_area: Rect,
}

impl AnchorLayout {
    pub fn region(&self, region: AnchorRegion) -> Rect {
        match region {
            AnchorRegion::Left => self.left,
            AnchorRegion::Right => self.right,
            AnchorRegion::Top => self.top,
            AnchorRegion::Bottom => self.bottom,
            AnchorRegion::Document => self.document,
        }
    }
}

/// Take a fixed-size strip off one edge of `rect`
pub(crate) fn carve_edge(rect: Rect, edge: Alignment, size: f32) -> (Rect, Rect) {
    let size = size.max(0.0).min(rect.extent(edge.axis()));
    match edge {
        Alignment::Left => (
            Rect::new(rect.x, rect.y, size, rect.height),
            Rect::new(rect.x + size, rect.y, rect.width - size, rect.height),
        ),
        Alignment::Right => (
            Rect::new(rect.right() - size, rect.y, size, rect.height),
            Rect::new(rect.x, rect.y, rect.width - size, rect.height),
        ),
        Alignment::Top => (
            Rect::new(rect.x, rect.y, rect.width, size),
            Rect::new(rect.x, rect.y + size, rect.width, rect.height - size),
        ),
        Alignment::Bottom => (
            Rect::new(rect.x, rect.bottom() - size, rect.width, size),
            Rect::new(rect.x, rect.y, rect.width, rect.height - size),
        ),
    }
}

/// Lay out the anchor regions on the host surface.
///
/// Auto-hide strips are reserved first. Top and bottom regions then span the
/// full remaining width, left and right the height between them, and the
/// document region takes what is left. Regions without displayed panes take
/// no space.
pub fn compute_anchor_layout(
    surface: Rect,
    occupied: impl Fn(AnchorRegion) -> bool,
    auto_hide_edges: impl Fn(Alignment) -> bool,
    config: &EngineConfig,
) -> AnchorLayout {
    let mut layout = AnchorLayout::default();
    let mut area = surface;

    for edge in Alignment::ALL {
        if auto_hide_edges(edge) {
            let (strip, rest) = carve_edge(area, edge, config.auto_hide_strip);
            layout.strips.set(edge, strip);
            area = rest;
        }
    }
    layout.overlay_area = area;

    let portions = config.anchor_portions;
    let order = [
        (AnchorRegion::Top, Alignment::Top, portions.top),
        (AnchorRegion::Bottom, Alignment::Bottom, portions.bottom),
        (AnchorRegion::Left, Alignment::Left, portions.left),
        (AnchorRegion::Right, Alignment::Right, portions.right),
    ];
    for (region, edge, portion) in order {
        let rect = if occupied(region) {
            let (carved, rest) = split_rect(area, edge, portion, config.min_pane_size);
            area = rest;
            carved
        } else {
            carve_edge(area, edge, 0.0).0
        };
        match region {
            AnchorRegion::Top => layout.top = rect,
            AnchorRegion::Bottom => layout.bottom = rect,
            AnchorRegion::Left => layout.left = rect,
            AnchorRegion::Right => layout.right = rect,
            AnchorRegion::Document => {}
        }
    }
    layout.document = area;
    layout
}

impl DockEngine {
    /// One validation pass followed by one geometry pass
    pub(crate) fn perform_layout(&mut self) {
        self.validate_active_contents();
        self.recompute_geometry();
    }

    /// Set the host surface the anchor regions are laid out in
    pub fn set_surface_bounds(&mut self, bounds: Rect) {
        if self.surface != bounds {
            tracing::debug!(?bounds, "surface resized");
            self.surface = bounds;
            self.relayout();
        }
    }

    /// Whether any pane of an anchor region is displayed
    fn region_is_occupied(&self, region: AnchorRegion) -> bool {
        self.anchors
            .region(region)
            .nested_panes
            .panes()
            .any(|pane| self.is_pane_displayed(pane))
    }

    /// Whether an edge holds at least one auto-hide pane with visible content
    pub(crate) fn edge_has_auto_hide(&self, edge: Alignment) -> bool {
        self.auto_hide_panes(edge).next().is_some()
    }

    /// Auto-hide panes on an edge, in chain order
    pub fn auto_hide_panes(&self, edge: Alignment) -> impl Iterator<Item = PaneId> + '_ {
        let region = match edge {
            Alignment::Left => AnchorRegion::Left,
            Alignment::Right => AnchorRegion::Right,
            Alignment::Top => AnchorRegion::Top,
            Alignment::Bottom => AnchorRegion::Bottom,
        };
        self.anchors
            .region(region)
            .nested_panes
            .panes()
            .filter(move |pane| {
                self.display_state(*pane).auto_hide_edge() == Some(edge)
            })
    }

    /// Remove empty panes, re-validate active contents and engine selections
    fn validate_active_contents(&mut self) {
        self.stats.validation_passes += 1;

        let empty: Vec<PaneId> = self
            .panes
            .values()
            .filter(|p| p.is_empty())
            .map(|p| p.id)
            .collect();
        for pane in empty {
            tracing::debug!(?pane, "removing empty pane");
            self.destroy_pane(pane);
        }

        let hidden: HashSet<ContentId> = self
            .contents
            .values()
            .filter(|c| c.is_hidden)
            .map(|c| c.id)
            .collect();
        let mut changed = Vec::new();
        for pane in self.panes.values_mut() {
            if pane.validate_active_content(|c| !hidden.contains(&c)) {
                changed.push(Cmd::ActiveContentChanged {
                    pane: pane.id,
                    content: pane.active_content,
                });
            }
        }
        for cmd in changed {
            self.emit(cmd);
        }

        if let Some(active) = self.active_pane {
            if !self.panes.contains_key(&active) {
                self.active_pane = None;
                self.emit(Cmd::ActivePaneChanged { pane: None });
            }
        }

        let document_pane_valid = self
            .active_document_pane
            .and_then(|p| self.panes.get(&p))
            .is_some_and(|p| p.dock_state == DockState::Document);
        if !document_pane_valid {
            let fallback = self
                .anchors
                .document
                .nested_panes
                .panes()
                .find(|p| self.panes.get(p).is_some_and(|p| p.dock_state == DockState::Document));
            if fallback != self.active_document_pane {
                self.active_document_pane = fallback;
                self.emit(Cmd::ActiveDocumentPaneChanged { pane: fallback });
            }
        }

        if let Some(shown) = self.auto_hide.active {
            let still_auto_hide = self.display_state(shown).is_auto_hide();
            if !still_auto_hide {
                self.hide_auto_hide_overlay();
            }
        }
    }

    /// Recompute every container and pane rectangle
    fn recompute_geometry(&mut self) {
        self.stats.geometry_passes += 1;

        let anchor_layout = compute_anchor_layout(
            self.surface,
            |region| self.region_is_occupied(region),
            |edge| self.edge_has_auto_hide(edge),
            &self.config,
        );
        self.auto_hide.strips = anchor_layout.strips;
        self.auto_hide.area = anchor_layout.overlay_area;
        if let Some(shown) = self.auto_hide.active {
            self.auto_hide.rect = self.overlay_target_rect(shown);
        }

        let inset = self.config.container_inset;
        let min_size = self.config.min_pane_size;
        let mut pane_rects: HashMap<PaneId, Rect> = HashMap::new();

        for region in AnchorRegion::ALL {
            let area = anchor_layout.region(region).inset(inset);
            let rects = compute_nested_layout(
                area,
                &self.anchors.region(region).nested_panes,
                |pane| self.is_pane_displayed(pane),
                min_size,
            );
            pane_rects.extend(rects);
        }
        for window in self.floating.values() {
            let rects = compute_nested_layout(
                window.rect.inset(inset),
                &window.nested_panes,
                |pane| self.is_pane_displayed(pane),
                min_size,
            );
            pane_rects.extend(rects);
        }
        if let Some(shown) = self.auto_hide.active {
            pane_rects.insert(shown, self.auto_hide.rect);
        }

        let mut cmds = Vec::new();
        for region in AnchorRegion::ALL {
            let rect = anchor_layout.region(region);
            let container = self.anchors.region_mut(region);
            if container.rect != rect {
                container.rect = rect;
                cmds.push(Cmd::ContainerBoundsChanged {
                    container: ContainerId::Anchor(region),
                    rect,
                });
            }
        }
        for pane in self.panes.values_mut() {
            let rect = pane_rects.get(&pane.id).copied().unwrap_or(Rect::ZERO);
            if pane.rect != rect {
                pane.rect = rect;
                cmds.push(Cmd::PaneBoundsChanged {
                    pane: pane.id,
                    rect,
                });
            }
        }
        for cmd in cmds {
            self.emit(cmd);
        }
    }
}
