//! Engine configuration persistence
//!
//! Stores layout tuning in `~/.config/dockyard/config.yaml`

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Debounce used by the auto-hide overlay when the host hover interval is unknown
pub const DEFAULT_AUTO_HIDE_DEBOUNCE: Duration = Duration::from_millis(400);

/// Size of each anchor region (fraction below 1, absolute size otherwise)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorPortions {
    #[serde(default = "default_side_portion")]
    pub left: f32,
    #[serde(default = "default_side_portion")]
    pub right: f32,
    #[serde(default = "default_side_portion")]
    pub top: f32,
    #[serde(default = "default_side_portion")]
    pub bottom: f32,
}

fn default_side_portion() -> f32 {
    0.25
}

impl Default for AnchorPortions {
    fn default() -> Self {
        Self {
            left: default_side_portion(),
            right: default_side_portion(),
            top: default_side_portion(),
            bottom: default_side_portion(),
        }
    }
}

/// Layout engine configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Smallest width/height a split may leave on either side
    #[serde(default = "default_min_pane_size")]
    pub min_pane_size: f32,

    /// Border inset applied on every side of a container before splitting
    #[serde(default)]
    pub container_inset: f32,

    /// Proportion used when a dock request does not specify one
    #[serde(default = "default_proportion")]
    pub default_proportion: f32,

    /// Width of the edge strip holding auto-hide tabs
    #[serde(default = "default_auto_hide_strip")]
    pub auto_hide_strip: f32,

    /// Host hover-detection interval; the overlay debounce is twice this
    #[serde(default)]
    pub hover_interval_ms: Option<u64>,

    #[serde(default)]
    pub anchor_portions: AnchorPortions,

    /// Size of a floating window created without explicit bounds
    #[serde(default = "default_float_size")]
    pub default_float_size: (f32, f32),
}

fn default_min_pane_size() -> f32 {
    24.0
}

fn default_proportion() -> f32 {
    0.5
}

fn default_auto_hide_strip() -> f32 {
    22.0
}

fn default_float_size() -> (f32, f32) {
    (300.0, 300.0)
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_pane_size: default_min_pane_size(),
            container_inset: 0.0,
            default_proportion: default_proportion(),
            auto_hide_strip: default_auto_hide_strip(),
            hover_interval_ms: None,
            anchor_portions: AnchorPortions::default(),
            default_float_size: default_float_size(),
        }
    }
}

impl EngineConfig {
    /// Debounce before an unattended auto-hide overlay slides back out
    pub fn auto_hide_debounce(&self) -> Duration {
        match self.hover_interval_ms {
            Some(ms) => Duration::from_millis(ms.saturating_mul(2)),
            None => DEFAULT_AUTO_HIDE_DEBOUNCE,
        }
    }

    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, falling back to defaults on any error
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to a specific file
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}
