//! Auto-play scheduler integration tests
//!
//! Timing assertions rely on tokio's paused clock: the runtime jumps straight
//! to the next pending timer whenever every task is idle, so elapsed times are
//! exact.

mod helpers;

use carousel_common::config::CarouselConfig;
use carousel_engine::{AutoPlayScheduler, SlideDescriptor};
use helpers::{controller_with, controller_with_slides};
use std::time::Duration;
use tokio::time::{sleep, Instant};

fn autoplay_config(interval_ms: u64) -> CarouselConfig {
    CarouselConfig {
        default_interval_ms: interval_ms,
        settle_delay_ms: 0,
        transition_duration_ms: 10,
        ..Default::default()
    }
}

#[tokio::test(start_paused = true)]
async fn test_advances_after_interval() {
    let (controller, _) = controller_with(3, autoplay_config(50));
    let mut scheduler = AutoPlayScheduler::new(&controller);
    scheduler.start().unwrap();

    sleep(Duration::from_millis(40)).await;
    assert_eq!(controller.active_index(), 0);

    // Fires at 50 ms, transition done at 60 ms
    sleep(Duration::from_millis(60)).await;
    assert_eq!(controller.active_index(), 1);

    // Next cycle: 60 + 50 + 10
    sleep(Duration::from_millis(30)).await;
    assert_eq!(controller.active_index(), 2);

    scheduler.dispose().await;
}

#[tokio::test(start_paused = true)]
async fn test_pause_suppresses_advance_without_stopping_loop() {
    let config = CarouselConfig {
        wrap: false,
        ..autoplay_config(50)
    };
    let (controller, _) = controller_with(2, config);
    let mut scheduler = AutoPlayScheduler::new(&controller);
    scheduler.start().unwrap();
    controller.pause();

    sleep(Duration::from_millis(200)).await;
    assert_eq!(controller.active_index(), 0);
    assert!(scheduler.is_running());

    controller.resume();
    sleep(Duration::from_millis(100)).await;
    assert_eq!(controller.active_index(), 1);

    scheduler.dispose().await;
}

#[tokio::test(start_paused = true)]
async fn test_single_slide_paused_stays_put() {
    let (controller, _) = controller_with(1, autoplay_config(50));
    let mut rx = controller.subscribe();
    let mut scheduler = AutoPlayScheduler::new(&controller);
    scheduler.start().unwrap();
    controller.pause();

    sleep(Duration::from_millis(200)).await;
    assert_eq!(controller.active_index(), 0);
    assert!(helpers::drain_lifecycle(&mut rx).is_empty());

    scheduler.dispose().await;
}

#[tokio::test(start_paused = true)]
async fn test_interval_override_applies_after_manual_navigation() {
    let slides = vec![
        SlideDescriptor::default(),
        SlideDescriptor::with_interval_ms(10),
        SlideDescriptor::default(),
    ];
    let (controller, _) = controller_with_slides(slides, autoplay_config(1000));
    let mut scheduler = AutoPlayScheduler::new(&controller);
    scheduler.start().unwrap();

    // Manual move to slide 1 (done at 10 ms)
    assert!(controller.next().await);
    assert_eq!(controller.active_index(), 1);
    let reached = Instant::now();

    // Slide 1's 10 ms interval, then a 10 ms transition
    sleep(Duration::from_millis(25)).await;
    assert_eq!(controller.active_index(), 2);
    assert!(reached.elapsed() < Duration::from_millis(1000));

    scheduler.dispose().await;
}

#[tokio::test(start_paused = true)]
async fn test_interval_override_on_first_slide() {
    let slides = vec![
        SlideDescriptor::with_interval_ms(10),
        SlideDescriptor::default(),
        SlideDescriptor::default(),
    ];
    let (controller, _) = controller_with_slides(slides, autoplay_config(1000));
    let mut scheduler = AutoPlayScheduler::new(&controller);
    scheduler.start().unwrap();

    // 10 ms wait plus 10 ms transition
    sleep(Duration::from_millis(25)).await;
    assert_eq!(controller.active_index(), 1);
    assert_eq!(controller.current_interval(), Duration::from_millis(1000));

    // Slide 1 uses the default
    sleep(Duration::from_millis(500)).await;
    assert_eq!(controller.active_index(), 1);

    scheduler.dispose().await;
}

#[tokio::test(start_paused = true)]
async fn test_restart_replaces_previous_loop() {
    let config = CarouselConfig {
        wrap: false,
        ..autoplay_config(50)
    };
    let (controller, _) = controller_with(5, config);
    let mut scheduler = AutoPlayScheduler::new(&controller);

    scheduler.start().unwrap();
    sleep(Duration::from_millis(30)).await;
    scheduler.start().unwrap();

    // First loop would have fired at 50 ms; it was cancelled at 30 ms
    sleep(Duration::from_millis(45)).await;
    assert_eq!(controller.active_index(), 0);

    // New loop fires at 80 ms, done at 90 ms
    sleep(Duration::from_millis(20)).await;
    assert_eq!(controller.active_index(), 1);

    scheduler.dispose().await;
}

#[tokio::test(start_paused = true)]
async fn test_stop_prevents_further_advances() {
    let (controller, _) = controller_with(3, autoplay_config(50));
    let mut scheduler = AutoPlayScheduler::new(&controller);
    scheduler.start().unwrap();

    sleep(Duration::from_millis(20)).await;
    scheduler.stop();
    assert!(!scheduler.is_running());

    sleep(Duration::from_millis(500)).await;
    assert_eq!(controller.active_index(), 0);

    // Restart after stop works
    scheduler.start().unwrap();
    sleep(Duration::from_millis(70)).await;
    assert_eq!(controller.active_index(), 1);

    scheduler.dispose().await;
}

#[tokio::test(start_paused = true)]
async fn test_dropping_scheduler_cancels_loop() {
    let (controller, _) = controller_with(3, autoplay_config(50));
    let mut scheduler = AutoPlayScheduler::new(&controller);
    scheduler.start().unwrap();
    drop(scheduler);

    sleep(Duration::from_millis(300)).await;
    assert_eq!(controller.active_index(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_skips_cycle_while_manual_transition_in_flight() {
    let config = CarouselConfig {
        default_interval_ms: 50,
        settle_delay_ms: 0,
        transition_duration_ms: 100,
        ..Default::default()
    };
    let (controller, _) = controller_with(4, config);
    let mut scheduler = AutoPlayScheduler::new(&controller);
    scheduler.start().unwrap();

    // Manual transition 40 ms → 140 ms covers the 50 ms and 100 ms timers
    sleep(Duration::from_millis(40)).await;
    let manual = controller.clone();
    let in_flight = tokio::spawn(async move { manual.next().await });

    sleep(Duration::from_millis(110)).await;
    assert!(in_flight.await.unwrap());
    // Only the manual move happened; nothing was queued
    assert_eq!(controller.active_index(), 1);
    assert!(!controller.is_transitioning());

    scheduler.dispose().await;
}
