//! Panes: tab groups of content units sharing one rectangle

use super::content::{ContentId, DockState};
use super::container::{ContainerId, FloatId};
use super::geometry::{Alignment, Rect};

/// Unique identifier for a pane
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PaneId(pub u64);

/// Position of a pane in its container's split chain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NestedLink {
    /// Pane this one is carved from (`None` for the root)
    pub previous: Option<PaneId>,
    pub alignment: Alignment,
    /// Fraction below 1, absolute size otherwise
    pub proportion: f32,
}

impl NestedLink {
    pub fn root() -> Self {
        Self {
            previous: None,
            alignment: Alignment::Left,
            proportion: 0.5,
        }
    }

    pub fn new(previous: PaneId, alignment: Alignment, proportion: f32) -> Self {
        Self {
            previous: Some(previous),
            alignment,
            proportion,
        }
    }
}

impl Default for NestedLink {
    fn default() -> Self {
        Self::root()
    }
}

/// A pane holds tabs for one or more content units and displays one at a time
#[derive(Debug, Clone)]
pub struct Pane {
    pub id: PaneId,
    pub contents: Vec<ContentId>,
    pub active_content: Option<ContentId>,
    pub dock_state: DockState,
    pub nested_link: NestedLink,
    /// Container whose nested collection holds this pane
    pub container: Option<ContainerId>,
    /// Floating window this pane last lived in, reused when it floats again
    pub last_floating_window: Option<FloatId>,
    /// Layout info (set by the engine during layout computation)
    pub rect: Rect,
    /// Tab order at the moment the active content was removed, used to pick
    /// a neighbour during the next validation pass
    pub(crate) removed_active: Option<RemovedActive>,
}

/// Tab order captured when the active content left the pane
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RemovedActive {
    order: Vec<ContentId>,
    index: usize,
}

impl Pane {
    pub fn new(id: PaneId, dock_state: DockState) -> Self {
        Self {
            id,
            contents: Vec::new(),
            active_content: None,
            dock_state,
            nested_link: NestedLink::root(),
            container: None,
            last_floating_window: None,
            rect: Rect::ZERO,
            removed_active: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    pub fn contains(&self, content: ContentId) -> bool {
        self.contents.contains(&content)
    }

    pub fn index_of(&self, content: ContentId) -> Option<usize> {
        self.contents.iter().position(|c| *c == content)
    }

    /// Insert a content unit, keeping membership unique.
    ///
    /// A content that is already a member is moved to `index`. Returns the
    /// index it ended up at.
    pub fn insert_content(&mut self, content: ContentId, index: Option<usize>) -> usize {
        if let Some(existing) = self.index_of(content) {
            self.contents.remove(existing);
        }
        let index = index.unwrap_or(self.contents.len()).min(self.contents.len());
        self.contents.insert(index, content);
        index
    }

    /// Remove a content unit. Returns whether it was a member.
    pub fn remove_content(&mut self, content: ContentId) -> bool {
        let Some(index) = self.index_of(content) else {
            return false;
        };
        if self.active_content == Some(content) {
            self.active_content = None;
            self.removed_active = Some(RemovedActive {
                order: self.contents.clone(),
                index,
            });
        }
        self.contents.remove(index);
        true
    }

    /// Pick the active content after membership changed.
    ///
    /// Keeps the current active content if it is still a visible member.
    /// Otherwise prefers the nearest visible content before the original
    /// position, then the nearest one after it. Returns true when the active
    /// content changed.
    pub fn validate_active_content(&mut self, is_visible: impl Fn(ContentId) -> bool) -> bool {
        let before = self.active_content;
        let removed = self.removed_active.take();

        if let Some(active) = self.active_content {
            if self.contains(active) && is_visible(active) {
                return false;
            }
        }

        // Neighbours are looked up in the order the tabs had when the active
        // content left, so later removals do not shift the origin.
        let (order, origin): (&[ContentId], usize) =
            match (before.and_then(|active| self.index_of(active)), &removed) {
                (Some(index), _) => (&self.contents, index),
                (None, Some(removed)) => (&removed.order, removed.index),
                (None, None) => (&self.contents, 0),
            };
        let origin = origin.min(order.len());
        let candidate = |c: &ContentId| Some(*c) != before && self.contains(*c) && is_visible(*c);

        let next = order[..origin]
            .iter()
            .rev()
            .find(|c| candidate(*c))
            .or_else(|| order[origin..].iter().find(|c| candidate(*c)))
            .or_else(|| self.contents.iter().find(|c| candidate(*c)))
            .copied();

        self.active_content = next;
        self.active_content != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pane_with(ids: &[u64]) -> Pane {
        let mut pane = Pane::new(PaneId(1), DockState::Document);
        for id in ids {
            pane.insert_content(ContentId(*id), None);
        }
        pane
    }

    #[test]
    fn test_insert_keeps_membership_unique() {
        let mut pane = pane_with(&[1, 2, 3]);
        let index = pane.insert_content(ContentId(1), Some(2));
        assert_eq!(index, 2);
        assert_eq!(pane.contents, vec![ContentId(2), ContentId(3), ContentId(1)]);
    }

    #[test]
    fn test_removed_active_prefers_earlier_neighbour() {
        let mut pane = pane_with(&[1, 2, 3]);
        pane.active_content = Some(ContentId(2));

        assert!(pane.remove_content(ContentId(2)));
        assert!(pane.validate_active_content(|_| true));
        assert_eq!(pane.active_content, Some(ContentId(1)));
    }

    #[test]
    fn test_removed_first_active_falls_back_to_later() {
        let mut pane = pane_with(&[1, 2, 3]);
        pane.active_content = Some(ContentId(1));

        pane.remove_content(ContentId(1));
        pane.validate_active_content(|_| true);
        assert_eq!(pane.active_content, Some(ContentId(2)));
    }

    #[test]
    fn test_hidden_active_is_replaced() {
        let mut pane = pane_with(&[1, 2, 3]);
        pane.active_content = Some(ContentId(3));

        pane.validate_active_content(|c| c != ContentId(3));
        assert_eq!(pane.active_content, Some(ContentId(2)));
    }

    #[test]
    fn test_empty_pane_has_no_active_content() {
        let mut pane = pane_with(&[1]);
        pane.active_content = Some(ContentId(1));

        pane.remove_content(ContentId(1));
        pane.validate_active_content(|_| true);
        assert!(pane.is_empty());
        assert_eq!(pane.active_content, None);
    }

    #[test]
    fn test_removed_active_origin_survives_earlier_removal() {
        let mut pane = pane_with(&[1, 2, 3, 4]);
        pane.active_content = Some(ContentId(3));

        pane.remove_content(ContentId(3));
        pane.remove_content(ContentId(1));
        pane.validate_active_content(|_| true);
        assert_eq!(pane.contents, vec![ContentId(2), ContentId(4)]);
        assert_eq!(pane.active_content, Some(ContentId(2)));
    }

    #[test]
    fn test_removed_active_ignores_inserted_tabs_when_neighbour_survives() {
        let mut pane = pane_with(&[1, 2, 3]);
        pane.active_content = Some(ContentId(2));

        pane.remove_content(ContentId(2));
        pane.insert_content(ContentId(9), Some(0));
        pane.validate_active_content(|_| true);
        assert_eq!(pane.active_content, Some(ContentId(1)));
    }

    #[test]
    fn test_removed_active_falls_back_to_new_tab() {
        let mut pane = pane_with(&[1, 2]);
        pane.active_content = Some(ContentId(2));

        pane.remove_content(ContentId(2));
        pane.remove_content(ContentId(1));
        pane.insert_content(ContentId(7), None);
        pane.validate_active_content(|_| true);
        assert_eq!(pane.active_content, Some(ContentId(7)));
    }

    #[test]
    fn test_validation_is_stable() {
        let mut pane = pane_with(&[1, 2]);
        pane.active_content = Some(ContentId(2));
        assert!(!pane.validate_active_content(|_| true));
        assert_eq!(pane.active_content, Some(ContentId(2)));
    }
}
