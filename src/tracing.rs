//! Debug tracing infrastructure for development diagnostics
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=dockyard::engine=debug` - engine operations only
//! - `RUST_LOG=layout=debug` - snapshot diffs from `update()` (debug builds)
//!
//! # Log Files
//!
//! Logs are written to `~/.config/dockyard/logs/dockyard.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::engine::DockEngine;
use crate::model::PaneId;

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG (default `warn`). File logging writes to
/// `~/.config/dockyard/logs/dockyard.log` with daily rotation.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "dockyard.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of the engine's shape for diffing
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSnapshot {
    pub content_count: usize,
    pub pane_count: usize,
    pub floating_window_count: usize,
    pub active_pane: Option<PaneId>,
    pub auto_hide_active: Option<PaneId>,
    pub dragging: bool,
}

impl LayoutSnapshot {
    pub fn from_engine(engine: &DockEngine) -> Self {
        Self {
            content_count: engine.content_count(),
            pane_count: engine.pane_count(),
            floating_window_count: engine.floating_window_count(),
            active_pane: engine.active_pane(),
            auto_hide_active: engine.auto_hide_active(),
            dragging: engine.drag_state().is_dragging(),
        }
    }

    /// Describe what changed between two snapshots
    pub fn diff(&self, other: &LayoutSnapshot) -> Option<String> {
        let mut changes = Vec::new();
        if self.content_count != other.content_count {
            changes.push(format!("contents: {} → {}", self.content_count, other.content_count));
        }
        if self.pane_count != other.pane_count {
            changes.push(format!("panes: {} → {}", self.pane_count, other.pane_count));
        }
        if self.floating_window_count != other.floating_window_count {
            changes.push(format!(
                "floating: {} → {}",
                self.floating_window_count, other.floating_window_count
            ));
        }
        if self.active_pane != other.active_pane {
            changes.push(format!("active pane: {:?} → {:?}", self.active_pane, other.active_pane));
        }
        if self.auto_hide_active != other.auto_hide_active {
            changes.push(format!(
                "auto-hide: {:?} → {:?}",
                self.auto_hide_active, other.auto_hide_active
            ));
        }
        if self.dragging != other.dragging {
            let status = if other.dragging { "started" } else { "ended" };
            changes.push(format!("drag {}", status));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_diff() {
        let before = LayoutSnapshot {
            content_count: 1,
            pane_count: 1,
            floating_window_count: 0,
            active_pane: None,
            auto_hide_active: None,
            dragging: false,
        };
        assert_eq!(before.diff(&before.clone()), None);

        let after = LayoutSnapshot {
            pane_count: 2,
            dragging: true,
            ..before.clone()
        };
        assert_eq!(before.diff(&after).as_deref(), Some("panes: 1 → 2; drag started"));
    }
}
