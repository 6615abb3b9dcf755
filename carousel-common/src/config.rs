//! Carousel configuration
//!
//! Configuration is fixed for the lifetime of an engine instance. A host that
//! wants different timing or wrap behaviour builds a new engine.
//!
//! # Sources
//!
//! 1. Built-in defaults (`CarouselConfig::default()`)
//! 2. TOML file or string (`TomlConfig::load`, `TomlConfig::from_toml_str`)
//!
//! ```toml
//! [carousel]
//! wrap = true
//! transition_duration_ms = 600
//! default_interval_ms = 5000
//! auto_play = true
//!
//! [logging]
//! level = "debug"
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Visual transition effect requested by the host
///
/// The engine runs the same phase sequence for both; the renderer decides
/// how each phase looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionStyle {
    /// Horizontal slide
    #[default]
    Slide,
    /// Cross-fade
    Fade,
}

/// Engine configuration for one carousel instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    /// Whether `next`/`previous` cycle past the ends
    ///
    /// Default: true
    pub wrap: bool,

    /// Length of the sliding motion phase
    ///
    /// Default: 600 ms
    pub transition_duration_ms: u64,

    /// Auto-play interval for slides without an override
    ///
    /// Valid range: > 0
    /// Default: 5000 ms
    pub default_interval_ms: u64,

    /// Pause between positioning the incoming slide and starting the motion
    /// (one paint frame for the renderer). Zero skips the pause.
    ///
    /// Default: 20 ms
    pub settle_delay_ms: u64,

    /// Start auto-play when mounting completes
    ///
    /// Default: false
    pub auto_play: bool,

    /// Pointer enter/leave pauses and resumes auto-play
    ///
    /// Default: true
    pub pause_on_hover: bool,

    /// Arrow keys navigate
    ///
    /// Default: true
    pub enable_keyboard: bool,

    /// Active slide of a freshly built engine
    ///
    /// Default: 0
    pub initial_active_index: usize,

    /// Effect passed through to the renderer
    pub transition_style: TransitionStyle,

    /// Event bus buffer size (events kept for slow subscribers)
    ///
    /// Valid range: > 0
    /// Default: 100
    pub event_capacity: usize,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            wrap: true,
            transition_duration_ms: 600,
            default_interval_ms: 5000,
            settle_delay_ms: 20,
            auto_play: false,
            pause_on_hover: true,
            enable_keyboard: true,
            initial_active_index: 0,
            transition_style: TransitionStyle::Slide,
            event_capacity: 100,
        }
    }
}

impl CarouselConfig {
    /// Length of the sliding motion phase
    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_duration_ms)
    }

    /// Auto-play interval for slides without an override
    pub fn default_interval(&self) -> Duration {
        Duration::from_millis(self.default_interval_ms)
    }

    /// Pause before the motion phase starts
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Check values that would make the engine misbehave
    ///
    /// A zero interval would spin the auto-play loop; a zero-capacity
    /// broadcast channel cannot be created.
    pub fn validate(&self) -> Result<()> {
        if self.default_interval_ms == 0 {
            return Err(Error::Config(
                "default_interval_ms must be greater than 0".to_string(),
            ));
        }
        if self.event_capacity == 0 {
            return Err(Error::Config(
                "event_capacity must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level or filter directive (trace, debug, info, warn, error)
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Configuration file layout
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TomlConfig {
    /// `[carousel]` table
    pub carousel: CarouselConfig,

    /// `[logging]` table
    pub logging: LoggingConfig,
}

impl TomlConfig {
    /// Parse and validate configuration from TOML text
    ///
    /// Missing keys take their defaults; unknown keys are rejected.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TomlConfig = toml::from_str(content)?;
        config.carousel.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    ///
    /// A missing file is an `Error::Io`; callers that want graceful
    /// degradation fall back to `TomlConfig::default()`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }
}
