//! Auto-play scheduler
//!
//! Background loop that asks the controller for `next()` once per interval.
//!
//! **Loop cycle:**
//! 1. Wait for the active slide's interval (override or carousel default)
//! 2. Unless paused or mid-transition, call `controller.next()` and await it
//! 3. Repeat until cancelled
//!
//! The wait restarts whenever the active index changes by other means
//! (manual navigation, slide removal), so the new slide's interval counts from
//! the moment it became active. Pausing only skips the advance; the loop keeps
//! running.
//!
//! Each `start()` owns a fresh `CancellationToken`. A restarted loop waits for
//! its predecessor to exit before its first cycle, so two loops never run at
//! the same time.

use crate::controller::{TransitionController, WeakController};
use carousel_common::{Error, Result};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Drives automatic advancement for one controller
///
/// Holds only a weak controller reference: the loop ends on its own once the
/// controller is dropped. Dropping the scheduler cancels the loop.
#[derive(Debug)]
pub struct AutoPlayScheduler {
    controller: WeakController,
    cancel_token: Option<CancellationToken>,
    handle: Option<JoinHandle<()>>,
}

impl AutoPlayScheduler {
    pub fn new(controller: &TransitionController) -> Self {
        Self {
            controller: controller.downgrade(),
            cancel_token: None,
            handle: None,
        }
    }

    /// Start (or restart) the loop
    ///
    /// Fails with `Error::Runtime` outside a tokio runtime.
    pub fn start(&mut self) -> Result<()> {
        let runtime = Handle::try_current()
            .map_err(|e| Error::Runtime(format!("auto-play needs a tokio runtime: {}", e)))?;

        if let Some(previous_token) = self.cancel_token.take() {
            previous_token.cancel();
        }
        let previous_loop = self.handle.take();

        let cancel_token = CancellationToken::new();
        self.handle = Some(runtime.spawn(run_loop(
            self.controller.clone(),
            cancel_token.clone(),
            previous_loop,
        )));
        self.cancel_token = Some(cancel_token);

        debug!("Auto-play started");
        Ok(())
    }

    /// Cancel the loop; an in-flight wait unwinds without advancing
    ///
    /// A transition the loop already requested still completes.
    pub fn stop(&mut self) {
        if let Some(cancel_token) = self.cancel_token.take() {
            cancel_token.cancel();
            debug!("Auto-play stopped");
        }
    }

    /// Stop the loop and wait until it has exited
    pub async fn dispose(&mut self) {
        self.stop();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }

    /// Whether a loop is active and not cancelled
    pub fn is_running(&self) -> bool {
        let live_token = self
            .cancel_token
            .as_ref()
            .is_some_and(|token| !token.is_cancelled());
        let live_task = self
            .handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished());
        live_token && live_task
    }
}

impl Drop for AutoPlayScheduler {
    fn drop(&mut self) {
        if let Some(cancel_token) = self.cancel_token.take() {
            cancel_token.cancel();
        }
    }
}

async fn run_loop(
    controller: WeakController,
    cancel_token: CancellationToken,
    previous_loop: Option<JoinHandle<()>>,
) {
    if let Some(previous_loop) = previous_loop {
        let _ = previous_loop.await;
    }

    let Some(mut active_index_rx) = controller
        .upgrade()
        .map(|controller| controller.watch_active_index())
    else {
        return;
    };

    loop {
        let Some(interval) = controller
            .upgrade()
            .map(|controller| controller.current_interval())
        else {
            break;
        };
        active_index_rx.borrow_and_update();

        match wait_for_cycle(&cancel_token, &mut active_index_rx, interval).await {
            Cycle::Cancelled => break,
            Cycle::Rearm => continue,
            Cycle::Elapsed => {}
        }

        let Some(carousel) = controller.upgrade() else {
            break;
        };
        if !carousel.is_paused() && !carousel.is_transitioning() {
            carousel.next().await;
        }

        if cancel_token.is_cancelled() {
            break;
        }
    }

    debug!("Auto-play loop exited");
}

enum Cycle {
    Elapsed,
    Rearm,
    Cancelled,
}

async fn wait_for_cycle(
    cancel_token: &CancellationToken,
    active_index_rx: &mut watch::Receiver<usize>,
    interval: std::time::Duration,
) -> Cycle {
    tokio::select! {
        biased;
        _ = cancel_token.cancelled() => Cycle::Cancelled,
        changed = active_index_rx.changed() => match changed {
            Ok(()) => Cycle::Rearm,
            // Controller dropped
            Err(_) => Cycle::Cancelled,
        },
        _ = tokio::time::sleep(interval) => Cycle::Elapsed,
    }
}
