//! User configuration: interaction tunables, log level and keybindings.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ANNOTATION_Y_MAX, DEFAULT_ANNOTATION_Y_MIN, MIN_VISIBLE_SPAN,
    MINIMUM_NEW_AREA_WIDTH_PX, NUDGE_STEP, ZOOM_STEP_SCALE,
};
use crate::keybindings::KeyBindings;
use crate::model::GrabMargin;

/// How much the annotator logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    /// Gesture results and file loads
    #[default]
    Info,
    /// State transitions
    Debug,
    /// Every input event
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
            LogLevel::Trace => Self::Trace,
        }
    }
}

/// Config files written with a newer format version are refused.
pub const CONFIG_VERSION: u32 = 1;

/// How gestures feel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Pixel tolerance for grabbing an edge
    pub edge_grab_margin_px: GrabMargin,
    /// New or resized ranges narrower than this on release are dropped
    pub min_new_area_width_px: f32,
    /// Fraction of the distance to the pointer removed per scroll step
    pub zoom_step_scale: f64,
    /// Data units moved by one nudge
    pub nudge_step: f64,
    /// Nudges stop at neighboring ranges and data bounds
    pub nudge_respects_neighbors: bool,
    /// Vertical extent of new ranges (display only)
    pub annotation_y_extent: (f64, f64),
    /// Narrowest visible window, in data units
    pub min_visible_span: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            edge_grab_margin_px: GrabMargin::default(),
            min_new_area_width_px: MINIMUM_NEW_AREA_WIDTH_PX,
            zoom_step_scale: ZOOM_STEP_SCALE,
            nudge_step: NUDGE_STEP,
            nudge_respects_neighbors: true,
            annotation_y_extent: (DEFAULT_ANNOTATION_Y_MIN, DEFAULT_ANNOTATION_Y_MAX),
            min_visible_span: MIN_VISIBLE_SPAN,
        }
    }
}

/// Everything a user can tune, stored as one JSON file.
///
/// Missing sections fall back to their defaults, so a file only needs the
/// values it changes (plus `version`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatorConfig {
    pub version: u32,
    #[serde(default)]
    pub interaction: InteractionConfig,
    #[serde(default)]
    pub log_level: LogLevel,
    #[serde(default)]
    pub keybindings: KeyBindings,
}

impl AnnotatorConfig {
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            interaction: InteractionConfig::default(),
            log_level: LogLevel::Info,
            keybindings: KeyBindings::default(),
        }
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a config, refusing versions this build does not know.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: config.version,
                supported: CONFIG_VERSION,
            });
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::from_json(&std::fs::read_to_string(path)?)?;
        log::info!("Config loaded from {:?}", path);
        Ok(config)
    }

    /// Write the config, creating missing parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, self.to_json()?)?;
        log::info!("Config written to {:?}", path);
        Ok(())
    }

    pub fn file_name() -> &'static str {
        "wavemark-config.json"
    }

    /// `<config dir>/wavemark/wavemark-config.json`, with `~/.config` as the
    /// config dir on platforms that have none.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn user_path() -> Option<PathBuf> {
        dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .map(|dir| dir.join("wavemark").join(Self::file_name()))
    }

    /// The user's config, or `None` if there is none or it is unreadable.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_user() -> Option<Self> {
        let path = Self::user_path()?;
        if !path.is_file() {
            log::debug!("No user config at {:?}", path);
            return None;
        }
        Self::load(&path)
            .map_err(|e| log::warn!("Ignoring user config {:?}: {}", path, e))
            .ok()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_user(&self) -> Result<(), ConfigError> {
        let path = Self::user_path().ok_or(ConfigError::NoConfigDir)?;
        self.save(&path)
    }
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors from reading or writing a config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Config format version {found} is not supported (newest known: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("No config directory on this platform")]
    NoConfigDir,

    #[error("Config I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
