//! Host-facing carousel
//!
//! Bundles a `TransitionController` with its `AutoPlayScheduler` and maps
//! renderer gestures onto engine calls:
//!
//! | Gesture              | Engine call                       |
//! |----------------------|-----------------------------------|
//! | next button          | `next()`                          |
//! | previous button      | `previous()`                      |
//! | indicator `i`        | `go_to(i)`                        |
//! | pointer enter/leave  | `pause()` / `resume()` (hover on) |
//! | ArrowLeft/ArrowRight | `previous()` / `next()` (keys on) |

use crate::controller::TransitionController;
use crate::scheduler::AutoPlayScheduler;
use crate::state::{CarouselSnapshot, SlideDescriptor, SlideId};
use carousel_common::config::CarouselConfig;
use carousel_common::events::CarouselEvent;
use carousel_common::Result;
use tokio::sync::broadcast;

#[derive(Debug)]
pub struct Carousel {
    controller: TransitionController,
    auto_play: AutoPlayScheduler,
}

impl Carousel {
    pub fn new(config: CarouselConfig) -> Result<Self> {
        let controller = TransitionController::new(config)?;
        let auto_play = AutoPlayScheduler::new(&controller);
        Ok(Self {
            controller,
            auto_play,
        })
    }

    pub fn controller(&self) -> &TransitionController {
        &self.controller
    }

    pub fn config(&self) -> &CarouselConfig {
        self.controller.config()
    }

    pub fn register_slide(&self, descriptor: SlideDescriptor) -> SlideId {
        self.controller.register_slide(descriptor)
    }

    pub fn unregister_slide(&self, id: SlideId) -> bool {
        self.controller.unregister_slide(id)
    }

    /// First render finished: settle slide flags and start auto-play if
    /// configured
    pub fn mount_complete(&mut self) -> Result<()> {
        self.controller.reset_slide_states();
        if self.config().auto_play {
            self.auto_play.start()?;
        }
        Ok(())
    }

    pub fn start_auto_play(&mut self) -> Result<()> {
        self.auto_play.start()
    }

    pub fn stop_auto_play(&mut self) {
        self.auto_play.stop();
    }

    pub fn is_auto_playing(&self) -> bool {
        self.auto_play.is_running()
    }

    /// Cancel auto-play and wait for its loop to exit
    pub async fn dispose(&mut self) {
        self.auto_play.dispose().await;
    }

    pub fn snapshot(&self) -> CarouselSnapshot {
        self.controller.snapshot()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CarouselEvent> {
        self.controller.subscribe()
    }

    // Gestures

    pub async fn on_next_clicked(&self) -> bool {
        self.controller.next().await
    }

    pub async fn on_previous_clicked(&self) -> bool {
        self.controller.previous().await
    }

    pub async fn on_indicator_clicked(&self, index: usize) -> bool {
        self.controller.go_to(index).await
    }

    pub fn on_pointer_enter(&self) {
        if self.hover_pauses() {
            self.controller.pause();
        }
    }

    pub fn on_pointer_leave(&self) {
        if self.hover_pauses() {
            self.controller.resume();
        }
    }

    pub async fn on_arrow_left_key(&self) -> bool {
        if !self.config().enable_keyboard {
            return false;
        }
        self.controller.previous().await
    }

    pub async fn on_arrow_right_key(&self) -> bool {
        if !self.config().enable_keyboard {
            return false;
        }
        self.controller.next().await
    }

    /// Dispatch a key name as reported by the renderer; unknown keys are ignored
    pub async fn on_key_down(&self, key: &str) -> bool {
        match key {
            "ArrowLeft" => self.on_arrow_left_key().await,
            "ArrowRight" => self.on_arrow_right_key().await,
            _ => false,
        }
    }

    fn hover_pauses(&self) -> bool {
        let config = self.config();
        config.pause_on_hover && config.auto_play
    }
}
