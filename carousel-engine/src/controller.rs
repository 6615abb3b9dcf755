//! Transition state machine
//!
//! `TransitionController` is the only component that changes the active index
//! or the `is_transitioning` flag. Navigation requests that cannot be honoured
//! (already transitioning, out of range, nothing to move to) are silent no-ops.
//!
//! # Transition protocol
//!
//! ```text
//! accept (guard + resolve slides, is_transitioning = true)
//!     ↓
//! TransitionStarted
//!     ↓
//! target.is_next | target.is_prev          → StateChanged
//!     ↓  settle_delay
//! both.is_start | both.is_end              → StateChanged
//!     ↓  transition_duration
//! flags cleared, active moved, is_transitioning = false
//!     ↓
//! ActiveIndexChanged → TransitionEnded     → StateChanged
//! ```
//!
//! An accepted transition runs on its own tokio task. The caller awaits it,
//! but dropping the caller's future does not stop it: a started transition
//! always completes.

use crate::registry::SlideRegistry;
use crate::state::{CarouselSnapshot, SlideDescriptor, SlideId};
use carousel_common::config::CarouselConfig;
use carousel_common::events::{CarouselEvent, Direction, EventBus};
use carousel_common::Result;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::sync::{broadcast, watch};
use tracing::{debug, error};

/// Mutable engine state, guarded by the controller's mutex
///
/// The lock is never held across an await point.
#[derive(Debug)]
pub(crate) struct CarouselState {
    registry: SlideRegistry,
    active_index: usize,
    is_transitioning: bool,
    is_paused: bool,
}

#[derive(Debug)]
struct ControllerInner {
    config: CarouselConfig,
    state: Mutex<CarouselState>,
    events: EventBus,
    active_index_tx: watch::Sender<usize>,
}

/// Slides taking part in one accepted transition
#[derive(Debug, Clone, Copy)]
struct TransitionPlan {
    current: SlideId,
    target: SlideId,
    from_index: usize,
    to_index: usize,
    direction: Direction,
}

/// Handle to one carousel's transition state machine
///
/// Cloning is cheap and every clone drives the same carousel.
#[derive(Debug, Clone)]
pub struct TransitionController {
    inner: Arc<ControllerInner>,
}

/// Non-owning controller reference (see `TransitionController::downgrade`)
#[derive(Debug, Clone)]
pub struct WeakController {
    inner: Weak<ControllerInner>,
}

impl WeakController {
    /// Upgrade to a usable controller, or `None` once the carousel is gone
    pub fn upgrade(&self) -> Option<TransitionController> {
        self.inner.upgrade().map(|inner| TransitionController { inner })
    }
}

impl TransitionController {
    /// Create a controller with an empty slide list
    ///
    /// Fails with `Error::Config` if the configuration does not validate.
    pub fn new(config: CarouselConfig) -> Result<Self> {
        config.validate()?;

        let active_index = config.initial_active_index;
        let (active_index_tx, _) = watch::channel(active_index);
        let state = CarouselState {
            registry: SlideRegistry::new(),
            active_index,
            is_transitioning: false,
            is_paused: false,
        };

        Ok(Self {
            inner: Arc::new(ControllerInner {
                events: EventBus::new(config.event_capacity),
                config,
                state: Mutex::new(state),
                active_index_tx,
            }),
        })
    }

    pub fn downgrade(&self) -> WeakController {
        WeakController {
            inner: Arc::downgrade(&self.inner),
        }
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.inner.config
    }

    // ------------------------------------------------------------------
    // Slide registration
    // ------------------------------------------------------------------

    /// Append a slide (host mounted a slide element)
    pub fn register_slide(&self, descriptor: SlideDescriptor) -> SlideId {
        let (id, count) = {
            let mut state = self.inner.lock_state();
            let active_index = state.active_index;
            let id = state.registry.add(&descriptor, active_index);
            (id, state.registry.count())
        };
        debug!(slide = %id, count, "Slide registered");
        self.inner.events.emit_lossy(CarouselEvent::state_changed());
        id
    }

    /// Remove a slide (host unmounted a slide element)
    ///
    /// Returns false if the slide was not registered. Never starts, stops or
    /// announces a transition.
    pub fn unregister_slide(&self, id: SlideId) -> bool {
        let (active_index, count) = {
            let mut state = self.inner.lock_state();
            let current = state.active_index;
            let Some(active_index) = state.registry.remove(id, current) else {
                return false;
            };
            state.active_index = active_index;
            (active_index, state.registry.count())
        };
        debug!(slide = %id, count, active_index, "Slide unregistered");
        self.inner.publish_active_index(active_index);
        self.inner.events.emit_lossy(CarouselEvent::state_changed());
        true
    }

    /// Rewrite all slide flags to the idle pattern
    ///
    /// The active index is clamped into range first. Ignored while a
    /// transition is in flight.
    pub fn reset_slide_states(&self) {
        let active_index = {
            let mut state = self.inner.lock_state();
            if state.is_transitioning {
                return;
            }
            let count = state.registry.count();
            if count > 0 && state.active_index >= count {
                state.active_index = count - 1;
            }
            let active_index = state.active_index;
            state.registry.reset_flags(active_index);
            active_index
        };
        self.inner.publish_active_index(active_index);
        self.inner.events.emit_lossy(CarouselEvent::state_changed());
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Move to the following slide, wrapping past the end when configured
    ///
    /// Returns true if a transition ran, false for a no-op.
    pub async fn next(&self) -> bool {
        let wrap = self.inner.config.wrap;
        self.request(|state| {
            let count = state.registry.count();
            if count <= 1 {
                return None;
            }
            match state.active_index + 1 {
                target if target < count => Some((target, Direction::Forward)),
                _ if wrap => Some((0, Direction::Forward)),
                _ => None,
            }
        })
        .await
    }

    /// Move to the preceding slide, wrapping past the start when configured
    pub async fn previous(&self) -> bool {
        let wrap = self.inner.config.wrap;
        self.request(|state| {
            let count = state.registry.count();
            if count <= 1 {
                return None;
            }
            match state.active_index.checked_sub(1) {
                Some(target) => Some((target, Direction::Backward)),
                None if wrap => Some((count - 1, Direction::Backward)),
                None => None,
            }
        })
        .await
    }

    /// Move directly to `index`
    ///
    /// Direction is forward when `index` is above the active index, backward
    /// otherwise; wrap-around distance is not considered.
    pub async fn go_to(&self, index: usize) -> bool {
        self.request(|state| {
            if index >= state.registry.count() || index == state.active_index {
                return None;
            }
            let direction = if index > state.active_index {
                Direction::Forward
            } else {
                Direction::Backward
            };
            Some((index, direction))
        })
        .await
    }

    /// Suspend auto-play advancement (idempotent)
    pub fn pause(&self) {
        self.inner.lock_state().is_paused = true;
    }

    /// Resume auto-play advancement (idempotent)
    pub fn resume(&self) {
        self.inner.lock_state().is_paused = false;
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    pub fn active_index(&self) -> usize {
        self.inner.lock_state().active_index
    }

    pub fn slide_count(&self) -> usize {
        self.inner.lock_state().registry.count()
    }

    pub fn is_transitioning(&self) -> bool {
        self.inner.lock_state().is_transitioning
    }

    pub fn is_paused(&self) -> bool {
        self.inner.lock_state().is_paused
    }

    /// Auto-play wait for the active slide: its override, else the default
    pub fn current_interval(&self) -> Duration {
        let state = self.inner.lock_state();
        state
            .registry
            .get(state.active_index)
            .and_then(|slide| slide.interval_override())
            .unwrap_or_else(|| self.inner.config.default_interval())
    }

    /// Copy of the full state for rendering
    pub fn snapshot(&self) -> CarouselSnapshot {
        let state = self.inner.lock_state();
        CarouselSnapshot {
            active_index: state.active_index,
            slide_count: state.registry.count(),
            is_transitioning: state.is_transitioning,
            is_paused: state.is_paused,
            transition_style: self.inner.config.transition_style,
            slides: state.registry.iter().map(|slide| slide.snapshot()).collect(),
        }
    }

    pub fn events(&self) -> &EventBus {
        &self.inner.events
    }

    /// Subscribe to this carousel's events
    pub fn subscribe(&self) -> broadcast::Receiver<CarouselEvent> {
        self.inner.events.subscribe()
    }

    /// Receiver that observes every change of the active index
    pub fn watch_active_index(&self) -> watch::Receiver<usize> {
        self.inner.active_index_tx.subscribe()
    }

    // ------------------------------------------------------------------
    // Protocol
    // ------------------------------------------------------------------

    async fn request<F>(&self, resolve: F) -> bool
    where
        F: FnOnce(&CarouselState) -> Option<(usize, Direction)>,
    {
        let Some(plan) = self.inner.try_begin(resolve) else {
            return false;
        };

        let inner = Arc::clone(&self.inner);
        match tokio::spawn(async move { inner.run_transition(plan).await }).await {
            Ok(()) => true,
            Err(e) => {
                error!(
                    from = plan.from_index,
                    to = plan.to_index,
                    "Transition task failed: {}",
                    e
                );
                self.inner.recover_from_failed_transition();
                false
            }
        }
    }
}

impl ControllerInner {
    fn lock_state(&self) -> MutexGuard<'_, CarouselState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish_active_index(&self, index: usize) {
        self.active_index_tx.send_if_modified(|current| {
            if *current == index {
                false
            } else {
                *current = index;
                true
            }
        });
    }

    /// Check the guard and claim the transition slot in one critical section
    fn try_begin<F>(&self, resolve: F) -> Option<TransitionPlan>
    where
        F: FnOnce(&CarouselState) -> Option<(usize, Direction)>,
    {
        let mut state = self.lock_state();
        if state.is_transitioning {
            return None;
        }
        let (to_index, direction) = resolve(&*state)?;
        let current = state.registry.get(state.active_index)?.id();
        let target = state.registry.get(to_index)?.id();
        state.is_transitioning = true;

        Some(TransitionPlan {
            current,
            target,
            from_index: state.active_index,
            to_index,
            direction,
        })
    }

    async fn run_transition(&self, plan: TransitionPlan) {
        debug!(
            from = plan.from_index,
            to = plan.to_index,
            direction = %plan.direction,
            "Transition started"
        );
        self.events.emit_lossy(CarouselEvent::transition_started(
            plan.from_index,
            plan.to_index,
            plan.direction,
        ));

        // Incoming slide parked off-screen on its entry side
        self.with_registry(|registry| {
            if let Some(target) = registry.by_id_mut(plan.target) {
                match plan.direction {
                    Direction::Forward => target.flags.is_next = true,
                    Direction::Backward => target.flags.is_prev = true,
                }
            }
        });
        self.events.emit_lossy(CarouselEvent::state_changed());

        sleep_nonzero(self.config.settle_delay()).await;

        // Motion
        self.with_registry(|registry| {
            for id in [plan.current, plan.target] {
                if let Some(slide) = registry.by_id_mut(id) {
                    match plan.direction {
                        Direction::Forward => slide.flags.is_start = true,
                        Direction::Backward => slide.flags.is_end = true,
                    }
                }
            }
        });
        self.events.emit_lossy(CarouselEvent::state_changed());

        sleep_nonzero(self.config.transition_duration()).await;

        let index = self.finish(&plan);
        self.publish_active_index(index);

        self.events.emit_lossy(CarouselEvent::active_index_changed(index));
        self.events.emit_lossy(CarouselEvent::transition_ended(index));
        self.events.emit_lossy(CarouselEvent::state_changed());
        debug!(index, "Transition completed");
    }

    fn with_registry(&self, update: impl FnOnce(&mut SlideRegistry)) {
        let mut state = self.lock_state();
        update(&mut state.registry);
    }

    /// Settle flags and release the transition slot; returns the new active index
    ///
    /// If the target slide was unregistered mid-transition, the planned index
    /// is clamped to what is left.
    fn finish(&self, plan: &TransitionPlan) -> usize {
        let mut state = self.lock_state();

        if let Some(current) = state.registry.by_id_mut(plan.current) {
            current.flags.clear_transient();
            current.flags.is_active = false;
        }

        let target_index = state.registry.by_id_mut(plan.target).map(|target| {
            target.flags.clear_transient();
            target.flags.is_active = true;
            target.index()
        });

        let index = match target_index {
            Some(index) => index,
            None => {
                let index = plan.to_index.min(state.registry.count().saturating_sub(1));
                state.registry.reset_flags(index);
                index
            }
        };

        state.active_index = index;
        state.is_transitioning = false;
        index
    }

    /// Put the state back to idle after a transition task died
    fn recover_from_failed_transition(&self) {
        let active_index = {
            let mut state = self.lock_state();
            let count = state.registry.count();
            if count > 0 && state.active_index >= count {
                state.active_index = count - 1;
            }
            let active_index = state.active_index;
            state.registry.reset_flags(active_index);
            state.is_transitioning = false;
            active_index
        };
        self.publish_active_index(active_index);
        self.events.emit_lossy(CarouselEvent::state_changed());
    }
}

async fn sleep_nonzero(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}
