//! Suspend/resume batching of layout passes
//!
//! `suspend()` hands out a `SuspendToken`; `resume()` consumes it. Tokens are
//! neither `Clone` nor `Copy`, so the depth can only return to zero by
//! resuming every suspension exactly once. When it does, one layout pass runs.

use super::DockEngine;

/// Proof of an outstanding `suspend()`, consumed by `resume()`
#[must_use = "a suspended layout must be resumed"]
#[derive(Debug)]
pub struct SuspendToken {
    depth: usize,
}

impl SuspendToken {
    /// Nesting depth this token was issued at (1 for the outermost)
    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// Counters for layout passes, exposed for hosts and tests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutStats {
    pub geometry_passes: u64,
    pub validation_passes: u64,
}

impl DockEngine {
    /// Defer layout until the matching `resume()`
    pub fn suspend(&mut self) -> SuspendToken {
        self.suspend_depth += 1;
        SuspendToken {
            depth: self.suspend_depth,
        }
    }

    /// Release a suspension; the outermost resume runs one layout pass
    pub fn resume(&mut self, token: SuspendToken) {
        if token.depth != self.suspend_depth {
            tracing::warn!(
                token = token.depth,
                depth = self.suspend_depth,
                "layout resumed out of order"
            );
        }
        self.suspend_depth = self.suspend_depth.saturating_sub(1);
        if self.suspend_depth == 0 {
            self.perform_layout();
        }
    }

    pub fn is_suspended(&self) -> bool {
        self.suspend_depth > 0
    }

    /// Run `f` with layout suspended
    pub fn batch<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let token = self.suspend();
        let result = f(self);
        self.resume(token);
        result
    }

    /// Run a layout pass now (or at the end of the current batch)
    pub fn relayout(&mut self) {
        self.batch(|_| ());
    }
}
