//! Event types for the carousel event system
//!
//! Provides the `CarouselEvent` enum and the `EventBus` the engine publishes on.
//! Renderers subscribe to re-render; other subscribers (analytics, tests)
//! observe the same ordered stream.

mod transition_types;

pub use transition_types::Direction;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Carousel event types
///
/// Per accepted transition the engine emits, in order:
/// `TransitionStarted`, one or more `StateChanged`, `ActiveIndexChanged`,
/// `TransitionEnded`, `StateChanged`. Rejected requests emit nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CarouselEvent {
    /// A transition was accepted and is about to move slides
    TransitionStarted {
        /// Active index when the transition began
        from_index: usize,
        /// Index becoming active
        to_index: usize,
        /// Animation direction
        direction: Direction,
        /// When the transition started
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// The active index changed at the end of a transition
    ActiveIndexChanged {
        /// New active index
        index: usize,
        /// When the index changed
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A transition completed
    TransitionEnded {
        /// Active index after the transition
        index: usize,
        /// When the transition ended
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Slide flags or the slide list changed; the renderer should re-read
    /// the snapshot
    StateChanged {
        /// When the state changed
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

impl CarouselEvent {
    /// Build a `TransitionStarted` event stamped now
    pub fn transition_started(from_index: usize, to_index: usize, direction: Direction) -> Self {
        CarouselEvent::TransitionStarted {
            from_index,
            to_index,
            direction,
            timestamp: chrono::Utc::now(),
        }
    }

    /// Build an `ActiveIndexChanged` event stamped now
    pub fn active_index_changed(index: usize) -> Self {
        CarouselEvent::ActiveIndexChanged {
            index,
            timestamp: chrono::Utc::now(),
        }
    }

    /// Build a `TransitionEnded` event stamped now
    pub fn transition_ended(index: usize) -> Self {
        CarouselEvent::TransitionEnded {
            index,
            timestamp: chrono::Utc::now(),
        }
    }

    /// Build a `StateChanged` event stamped now
    pub fn state_changed() -> Self {
        CarouselEvent::StateChanged {
            timestamp: chrono::Utc::now(),
        }
    }

    /// Short event name, matching the serialized `type` tag
    pub fn event_type(&self) -> &'static str {
        match self {
            CarouselEvent::TransitionStarted { .. } => "TransitionStarted",
            CarouselEvent::ActiveIndexChanged { .. } => "ActiveIndexChanged",
            CarouselEvent::TransitionEnded { .. } => "TransitionEnded",
            CarouselEvent::StateChanged { .. } => "StateChanged",
        }
    }

    /// Whether this is one of the three transition lifecycle events
    pub fn is_lifecycle(&self) -> bool {
        !matches!(self, CarouselEvent::StateChanged { .. })
    }
}

// ========================================
// EventBus Implementation
// ========================================

/// Event distribution bus for one carousel
///
/// Uses tokio::broadcast internally, providing:
/// - Non-blocking publish (slow subscribers don't block the engine)
/// - Multiple concurrent subscribers
/// - Lagged message detection for slow subscribers
///
/// # Examples
///
/// ```
/// use carousel_common::events::{CarouselEvent, EventBus};
///
/// let event_bus = EventBus::new(100);
/// let mut rx = event_bus.subscribe();
///
/// event_bus.emit_lossy(CarouselEvent::active_index_changed(1));
///
/// match rx.try_recv() {
///     Ok(CarouselEvent::ActiveIndexChanged { index, .. }) => assert_eq!(index, 1),
///     other => panic!("unexpected: {:?}", other),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<CarouselEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus with specified channel capacity
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0 (see `CarouselConfig::validate`).
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    ///
    /// Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<CarouselEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Returns `Ok(subscriber_count)` if at least one subscriber exists.
    /// Returns `Err` if no subscribers are listening.
    #[allow(clippy::result_large_err)]
    pub fn emit(
        &self,
        event: CarouselEvent,
    ) -> Result<usize, broadcast::error::SendError<CarouselEvent>> {
        self.tx.send(event)
    }

    /// Emit an event, ignoring if no subscribers are listening
    pub fn emit_lossy(&self, event: CarouselEvent) {
        let _ = self.tx.send(event);
    }

    /// Get the current number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Get the configured channel capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
