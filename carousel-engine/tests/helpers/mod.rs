//! Test helpers for carousel engine integration tests
//!
//! Provides reusable test infrastructure components:
//! - Config presets with short delays
//! - Controllers pre-populated with slides
//! - Event stream draining

#![allow(dead_code)]

use carousel_common::config::CarouselConfig;
use carousel_common::events::CarouselEvent;
use carousel_engine::{SlideDescriptor, SlideId, TransitionController};
use tokio::sync::broadcast;

/// No settle delay, 10 ms motion, wrap on
pub fn fast_config() -> CarouselConfig {
    CarouselConfig {
        settle_delay_ms: 0,
        transition_duration_ms: 10,
        ..Default::default()
    }
}

/// Controller with `n` plain slides
pub fn controller_with(n: usize, config: CarouselConfig) -> (TransitionController, Vec<SlideId>) {
    let descriptors = vec![SlideDescriptor::default(); n];
    controller_with_slides(descriptors, config)
}

pub fn controller_with_slides(
    descriptors: Vec<SlideDescriptor>,
    config: CarouselConfig,
) -> (TransitionController, Vec<SlideId>) {
    let controller = TransitionController::new(config).unwrap();
    let ids = descriptors
        .into_iter()
        .map(|descriptor| controller.register_slide(descriptor))
        .collect();
    (controller, ids)
}

/// Everything currently buffered on the receiver
pub fn drain(rx: &mut broadcast::Receiver<CarouselEvent>) -> Vec<CarouselEvent> {
    std::iter::from_fn(|| rx.try_recv().ok()).collect()
}

/// Event type names currently buffered on the receiver
pub fn drain_types(rx: &mut broadcast::Receiver<CarouselEvent>) -> Vec<&'static str> {
    drain(rx).iter().map(|e| e.event_type()).collect()
}

/// Lifecycle event type names (StateChanged filtered out)
pub fn drain_lifecycle(rx: &mut broadcast::Receiver<CarouselEvent>) -> Vec<&'static str> {
    drain(rx)
        .iter()
        .filter(|e| e.is_lifecycle())
        .map(|e| e.event_type())
        .collect()
}
