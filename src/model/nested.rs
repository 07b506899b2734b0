//! Nested pane collections: the split chain of one container
//!
//! The collection is an ordered list of panes plus each pane's link. The first
//! entry is the root; every later entry is carved from an earlier one. The
//! links are stored here rather than read from the pane map so that geometry
//! can run on a scratch copy of the chain.

use super::geometry::Alignment;
use super::pane::{NestedLink, PaneId};

/// One entry of a split chain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NestedEntry {
    pub pane: PaneId,
    pub link: NestedLink,
}

/// Reasons a split chain is malformed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// The root entry links to another pane
    RootHasPrevious(PaneId),
    /// A non-root entry has no previous pane
    MissingPrevious(PaneId),
    /// An entry links to itself
    SelfReference(PaneId),
    /// An entry links to a pane that is not an earlier member
    DanglingPrevious { pane: PaneId, previous: PaneId },
    /// A pane appears twice
    Duplicate(PaneId),
}

impl std::fmt::Display for ChainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChainError::RootHasPrevious(p) => write!(f, "root pane {:?} has a previous pane", p),
            ChainError::MissingPrevious(p) => write!(f, "pane {:?} has no previous pane", p),
            ChainError::SelfReference(p) => write!(f, "pane {:?} references itself", p),
            ChainError::DanglingPrevious { pane, previous } => write!(
                f,
                "pane {:?} references {:?} which is not an earlier member",
                pane, previous
            ),
            ChainError::Duplicate(p) => write!(f, "pane {:?} appears twice", p),
        }
    }
}

/// Ordered split chain owned by exactly one container
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NestedPaneCollection {
    entries: Vec<NestedEntry>,
}

impl NestedPaneCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[NestedEntry] {
        &self.entries
    }

    pub fn panes(&self) -> impl Iterator<Item = PaneId> + '_ {
        self.entries.iter().map(|e| e.pane)
    }

    pub fn root(&self) -> Option<PaneId> {
        self.entries.first().map(|e| e.pane)
    }

    pub fn last(&self) -> Option<PaneId> {
        self.entries.last().map(|e| e.pane)
    }

    pub fn contains(&self, pane: PaneId) -> bool {
        self.index_of(pane).is_some()
    }

    pub fn index_of(&self, pane: PaneId) -> Option<usize> {
        self.entries.iter().position(|e| e.pane == pane)
    }

    pub fn link(&self, pane: PaneId) -> Option<NestedLink> {
        self.entries.iter().find(|e| e.pane == pane).map(|e| e.link)
    }

    /// Append a pane with the given link.
    ///
    /// The first pane in an empty collection always becomes the root.
    pub fn push(&mut self, pane: PaneId, link: NestedLink) {
        let link = if self.entries.is_empty() {
            NestedLink { previous: None, ..link }
        } else {
            link
        };
        self.entries.push(NestedEntry { pane, link });
    }

    /// Make `pane` the new root, re-linking the old root to it.
    ///
    /// The old root is carved from the new one on the opposite side of
    /// `alignment` with `old_root_proportion`.
    pub fn push_root(&mut self, pane: PaneId, alignment: Alignment, old_root_proportion: f32) {
        if let Some(old_root) = self.entries.first_mut() {
            old_root.link = NestedLink::new(pane, alignment.opposite(), old_root_proportion);
        }
        self.entries.insert(
            0,
            NestedEntry {
                pane,
                link: NestedLink::root(),
            },
        );
    }

    /// Remove a pane, repairing the chain.
    ///
    /// The last pane that was carved from the removed pane takes over its slot
    /// and its link; other panes carved from it are re-pointed at the pane that
    /// took over. Returns false if the pane was not a member.
    pub fn remove(&mut self, pane: PaneId) -> bool {
        let Some(index) = self.index_of(pane) else {
            return false;
        };
        let removed_link = self.entries[index].link;

        let successor = self
            .entries
            .iter()
            .rposition(|e| e.link.previous == Some(pane));

        match successor {
            Some(successor_index) => {
                let mut promoted = self.entries.remove(successor_index);
                promoted.link = removed_link;
                let promoted_pane = promoted.pane;
                self.entries[index] = promoted;
                for entry in &mut self.entries {
                    if entry.link.previous == Some(pane) {
                        entry.link.previous = Some(promoted_pane);
                    }
                }
            }
            None => {
                self.entries.remove(index);
            }
        }
        true
    }

    /// Remove every pane for which `keep` returns false, repairing the chain
    /// after each removal.
    pub fn retain(&mut self, mut keep: impl FnMut(PaneId) -> bool) {
        let doomed: Vec<PaneId> = self.panes().filter(|p| !keep(*p)).collect();
        for pane in doomed {
            self.remove(pane);
        }
    }

    /// Replace the link of a member pane
    pub fn set_link(&mut self, pane: PaneId, link: NestedLink) -> bool {
        match self.entries.iter_mut().find(|e| e.pane == pane) {
            Some(entry) => {
                entry.link = link;
                true
            }
            None => false,
        }
    }

    /// Check the chain invariants
    pub fn validate(&self) -> Result<(), ChainError> {
        for (index, entry) in self.entries.iter().enumerate() {
            if self.entries[..index].iter().any(|e| e.pane == entry.pane) {
                return Err(ChainError::Duplicate(entry.pane));
            }
            match (index, entry.link.previous) {
                (0, Some(_)) => return Err(ChainError::RootHasPrevious(entry.pane)),
                (0, None) => {}
                (_, None) => return Err(ChainError::MissingPrevious(entry.pane)),
                (_, Some(previous)) if previous == entry.pane => {
                    return Err(ChainError::SelfReference(entry.pane))
                }
                (_, Some(previous)) => {
                    if !self.entries[..index].iter().any(|e| e.pane == previous) {
                        return Err(ChainError::DanglingPrevious {
                            pane: entry.pane,
                            previous,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}
