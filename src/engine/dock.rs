//! Dock and merge operations
//!
//! A dock request is validated in full by `plan_dock` before anything moves;
//! the plan is then applied inside one batch.

use serde::{Deserialize, Serialize};

use super::DockEngine;
use crate::commands::Cmd;
use crate::error::{DockError, Result};
use crate::model::{Alignment, ContainerId, ContentId, DockState, NestedLink, PaneId};

/// How source panes join the destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DockStyle {
    /// Merge the contents into the target pane as tabs
    Fill,
    Left,
    Right,
    Top,
    Bottom,
}

impl DockStyle {
    /// Split alignment, `None` for `Fill`
    pub fn alignment(&self) -> Option<Alignment> {
        match self {
            DockStyle::Fill => None,
            DockStyle::Left => Some(Alignment::Left),
            DockStyle::Right => Some(Alignment::Right),
            DockStyle::Top => Some(Alignment::Top),
            DockStyle::Bottom => Some(Alignment::Bottom),
        }
    }
}

impl From<Alignment> for DockStyle {
    fn from(alignment: Alignment) -> Self {
        match alignment {
            Alignment::Left => DockStyle::Left,
            Alignment::Right => DockStyle::Right,
            Alignment::Top => DockStyle::Top,
            Alignment::Bottom => DockStyle::Bottom,
        }
    }
}

/// Destination of a dock operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DockRequest {
    pub container: ContainerId,
    /// Pane to fill or split; `None` docks against the container edge
    pub target: Option<PaneId>,
    pub style: DockStyle,
    /// Size of the first docked pane; the configured default when `None`
    pub proportion: Option<f32>,
    /// Insert position for `Fill`; appended when `None`
    pub content_index: Option<usize>,
}

impl DockRequest {
    /// Merge into `target` as tabs
    pub fn fill(container: ContainerId, target: PaneId) -> Self {
        Self {
            container,
            target: Some(target),
            style: DockStyle::Fill,
            proportion: None,
            content_index: None,
        }
    }

    /// Split `target` (or the container edge) on the `alignment` side
    pub fn split(container: ContainerId, target: Option<PaneId>, alignment: Alignment) -> Self {
        Self {
            container,
            target,
            style: alignment.into(),
            proportion: None,
            content_index: None,
        }
    }

    pub fn with_proportion(mut self, proportion: f32) -> Self {
        self.proportion = Some(proportion);
        self
    }

    pub fn at_index(mut self, index: usize) -> Self {
        self.content_index = Some(index);
        self
    }
}

/// Validated dock request, ready to apply
#[derive(Debug)]
enum DockPlan {
    Noop,
    Fill {
        target: PaneId,
        sources: Vec<PaneId>,
        index: Option<usize>,
    },
    Split {
        container: ContainerId,
        target: Option<PaneId>,
        alignment: Alignment,
        proportion: f32,
        state: DockState,
        /// Sources in attach order with their links local to the group
        group: Vec<(PaneId, NestedLink)>,
    },
}

impl DockEngine {
    /// Dock `sources` as described by `request`.
    ///
    /// Fails without mutating anything when a target is not in the addressed
    /// container, a directional target is one of the sources, or any source
    /// content disallows the destination state.
    pub fn dock(&mut self, sources: &[PaneId], request: DockRequest) -> Result<()> {
        let plan = self.plan_dock(sources, &request).map_err(|e| {
            tracing::warn!(?sources, ?request, "dock rejected: {}", e);
            e
        })?;
        tracing::debug!(?sources, ?request, "dock");

        match plan {
            DockPlan::Noop => {}
            DockPlan::Fill {
                target,
                sources,
                index,
            } => self.batch(|engine| engine.apply_fill(target, &sources, index)),
            DockPlan::Split {
                container,
                target,
                alignment,
                proportion,
                state,
                group,
            } => self.batch(|engine| {
                engine.apply_split(container, target, alignment, proportion, state, &group)
            }),
        }
        Ok(())
    }

    /// Whether `dock` would accept the request
    pub fn can_dock(&self, sources: &[PaneId], request: &DockRequest) -> bool {
        self.plan_dock(sources, request).is_ok()
    }

    fn plan_dock(&self, sources: &[PaneId], request: &DockRequest) -> Result<DockPlan> {
        let mut unique: Vec<PaneId> = Vec::with_capacity(sources.len());
        for source in sources {
            if self.require_pane(*source)?.is_empty() {
                return Err(DockError::EmptyPaneInvariant(*source));
            }
            if !unique.contains(source) {
                unique.push(*source);
            }
        }

        let container = self.require_container(request.container)?;
        if let Some(target) = request.target {
            self.require_pane(target)?;
            if !container.nested_panes.contains(target) {
                return Err(DockError::container_ref(format!(
                    "pane {:?} is not in container {:?}",
                    target, request.container
                )));
            }
        }

        let Some(alignment) = request.style.alignment() else {
            let Some(target) = request.target else {
                return Err(DockError::container_ref("fill needs a target pane"));
            };
            let sources: Vec<PaneId> = unique.into_iter().filter(|p| *p != target).collect();
            if sources.is_empty() {
                return Ok(DockPlan::Noop);
            }
            let state = self.require_pane(target)?.dock_state;
            self.check_dock_state(&sources, state)?;
            return Ok(DockPlan::Fill {
                target,
                sources,
                index: request.content_index,
            });
        };

        if unique.is_empty() {
            return Ok(DockPlan::Noop);
        }
        if let Some(target) = request.target.filter(|t| unique.contains(t)) {
            return Err(DockError::container_ref(format!(
                "pane {:?} cannot be docked against itself",
                target
            )));
        }

        let state = match request.target {
            Some(target) => self.require_pane(target)?.dock_state,
            None => request.container.dock_state(),
        };
        self.check_dock_state(&unique, state)?;

        Ok(DockPlan::Split {
            container: request.container,
            target: request.target,
            alignment,
            proportion: request.proportion.unwrap_or(self.config.default_proportion),
            state,
            group: self.capture_group(&unique),
        })
    }

    /// Local chain of the sources.
    ///
    /// Sources sharing a container keep the links they have among themselves,
    /// computed on a scratch copy of that container's chain with every other
    /// pane removed.
    fn capture_group(&self, sources: &[PaneId]) -> Vec<(PaneId, NestedLink)> {
        let mut group = Vec::with_capacity(sources.len());
        let mut seen: Vec<Option<ContainerId>> = Vec::new();

        for source in sources {
            let container = self.pane_container(*source);
            if seen.contains(&container) {
                continue;
            }
            seen.push(container);

            let scratch = container.and_then(|c| self.container(c)).map(|c| {
                let mut chain = c.nested_panes.clone();
                chain.retain(|p| sources.contains(&p));
                chain
            });
            match scratch {
                Some(chain) => group.extend(chain.entries().iter().map(|e| (e.pane, e.link))),
                None => group.push((*source, NestedLink::root())),
            }
        }
        group
    }

    fn apply_fill(&mut self, target: PaneId, sources: &[PaneId], index: Option<usize>) {
        let mut index = index;
        let mut new_active: Option<ContentId> = None;

        for source in sources {
            let Some(pane) = self.panes.get(source) else {
                continue;
            };
            let (contents, active) = (pane.contents.clone(), pane.active_content);
            for content in contents {
                let at = self.move_content_into(content, target, index);
                index = index.map(|_| at + 1);
                if active == Some(content) && new_active.is_none() {
                    new_active = Some(content);
                }
            }
            self.destroy_pane(*source);
        }

        if let Some(content) = new_active {
            if let Some(pane) = self.panes.get_mut(&target) {
                pane.active_content = Some(content);
            }
            self.emit(Cmd::ActiveContentChanged {
                pane: target,
                content: Some(content),
            });
        }
        if self.active_pane.is_some_and(|p| sources.contains(&p)) {
            self.active_pane = Some(target);
            self.emit(Cmd::ActivePaneChanged { pane: Some(target) });
        }
    }

    fn apply_split(
        &mut self,
        container: ContainerId,
        target: Option<PaneId>,
        alignment: Alignment,
        proportion: f32,
        state: DockState,
        group: &[(PaneId, NestedLink)],
    ) {
        for (pane, _) in group {
            self.detach_pane(*pane);
        }

        let mut attached: Vec<PaneId> = Vec::with_capacity(group.len());
        for (pane, local) in group {
            self.set_pane_state(*pane, state);

            // Group-internal links are kept; group roots hang off the target
            // (or the previously attached group) with the requested split.
            let anchor = attached.last().copied().or(target);
            let link = local
                .previous
                .filter(|p| attached.contains(p))
                .map(|previous| NestedLink::new(previous, local.alignment, local.proportion))
                .or_else(|| anchor.map(|previous| NestedLink::new(previous, alignment, proportion)));

            match link {
                Some(link) => self.attach_pane(*pane, container, link),
                None if self.container(container).is_some_and(|c| c.is_empty()) => {
                    self.attach_pane(*pane, container, NestedLink::root())
                }
                None => self.attach_root(*pane, container, alignment, proportion),
            }
            attached.push(*pane);
        }
    }
}
