//! # Carousel Common Library
//!
//! Shared code for the carousel engine and its hosts:
//! - Error types
//! - Configuration loading (TOML)
//! - Event types and the EventBus
//! - Logging setup

pub mod config;
pub mod error;
pub mod events;
pub mod logging;

pub use config::{CarouselConfig, LoggingConfig, TomlConfig, TransitionStyle};
pub use error::{Error, Result};
pub use events::{CarouselEvent, Direction, EventBus};
