//! Slide and carousel state types
//!
//! Everything here is plain data. Mutation happens in the registry and the
//! transition controller; the renderer only ever sees `CarouselSnapshot`.

use carousel_common::config::TransitionStyle;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Opaque slide identity handed to the host at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlideId(Uuid);

impl SlideId {
    pub(crate) fn generate() -> Self {
        SlideId(Uuid::new_v4())
    }

    /// Underlying UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for SlideId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// What the host supplies when mounting a slide
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideDescriptor {
    /// Auto-play interval for this slide, overriding the carousel default
    pub interval_override_ms: Option<u64>,
}

impl SlideDescriptor {
    /// Slide with a custom auto-play interval
    pub fn with_interval_ms(interval_ms: u64) -> Self {
        Self {
            interval_override_ms: Some(interval_ms),
        }
    }
}

/// Role of a slide at one point of a transition
///
/// Idle pattern: only `is_active` may be set.
/// - `is_next` / `is_prev`: incoming slide parked off-screen on that side
/// - `is_start` / `is_end`: both slides moving (forward / backward)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionFlags {
    pub is_active: bool,
    pub is_next: bool,
    pub is_prev: bool,
    pub is_start: bool,
    pub is_end: bool,
}

impl TransitionFlags {
    /// Flags of a slide with no transition in flight
    pub fn idle(is_active: bool) -> Self {
        Self {
            is_active,
            ..Self::default()
        }
    }

    /// Whether any transient (mid-transition) flag is set
    pub fn is_transient(&self) -> bool {
        self.is_next || self.is_prev || self.is_start || self.is_end
    }

    pub(crate) fn clear_transient(&mut self) {
        self.is_next = false;
        self.is_prev = false;
        self.is_start = false;
        self.is_end = false;
    }
}

/// One carousel panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    pub(crate) id: SlideId,
    pub(crate) index: usize,
    pub(crate) interval_override: Option<Duration>,
    pub(crate) flags: TransitionFlags,
}

impl Slide {
    pub(crate) fn new(descriptor: &SlideDescriptor, index: usize) -> Self {
        Self {
            id: SlideId::generate(),
            index,
            interval_override: descriptor.interval_override_ms.map(Duration::from_millis),
            flags: TransitionFlags::default(),
        }
    }

    pub fn id(&self) -> SlideId {
        self.id
    }

    /// Current 0-based position
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn interval_override(&self) -> Option<Duration> {
        self.interval_override
    }

    pub fn flags(&self) -> TransitionFlags {
        self.flags
    }

    pub(crate) fn snapshot(&self) -> SlideSnapshot {
        SlideSnapshot {
            id: self.id,
            index: self.index,
            interval_override_ms: self.interval_override.map(|d| d.as_millis() as u64),
            flags: self.flags,
        }
    }
}

/// Renderer view of one slide
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideSnapshot {
    pub id: SlideId,
    pub index: usize,
    pub interval_override_ms: Option<u64>,
    pub flags: TransitionFlags,
}

/// Read-only copy of the carousel state for the renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselSnapshot {
    pub active_index: usize,
    pub slide_count: usize,
    pub is_transitioning: bool,
    pub is_paused: bool,
    pub transition_style: TransitionStyle,
    pub slides: Vec<SlideSnapshot>,
}

impl CarouselSnapshot {
    /// Slide at `index`, if any
    pub fn slide(&self, index: usize) -> Option<&SlideSnapshot> {
        self.slides.get(index)
    }

    /// Index of the slide flagged active, if exactly one is
    pub fn flagged_active(&self) -> Option<usize> {
        let mut active = self.slides.iter().filter(|s| s.flags.is_active);
        match (active.next(), active.next()) {
            (Some(slide), None) => Some(slide.index),
            _ => None,
        }
    }
}
