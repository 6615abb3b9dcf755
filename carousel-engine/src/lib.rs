//! # Carousel Engine
//!
//! Slide-transition state machine for a carousel component.
//!
//! **Purpose:** Keep an ordered slide list, move the active slide through a
//! phased transition (park, settle, slide, finalize), and drive automatic
//! advancement with pause/resume. The engine produces state and events only;
//! rendering is the host's job.
//!
//! **Architecture:**
//! - `SlideRegistry` — ordered slides, contiguous indices
//! - `TransitionController` — owns the state, runs transitions, emits events
//! - `AutoPlayScheduler` — cancelable tokio loop calling `next()`
//! - `Carousel` — host facade bundling the above with gesture handling
//!
//! ```no_run
//! use carousel_engine::{Carousel, SlideDescriptor};
//! use carousel_common::CarouselConfig;
//!
//! # async fn demo() -> carousel_common::Result<()> {
//! let mut carousel = Carousel::new(CarouselConfig::default())?;
//! carousel.register_slide(SlideDescriptor::default());
//! carousel.register_slide(SlideDescriptor::with_interval_ms(2000));
//! carousel.mount_complete()?;
//!
//! carousel.on_next_clicked().await;
//! assert_eq!(carousel.snapshot().active_index, 1);
//! # Ok(())
//! # }
//! ```

pub mod carousel;
pub mod controller;
pub mod registry;
pub mod scheduler;
pub mod state;

pub use carousel::Carousel;
pub use controller::{TransitionController, WeakController};
pub use registry::SlideRegistry;
pub use scheduler::AutoPlayScheduler;
pub use state::{CarouselSnapshot, Slide, SlideDescriptor, SlideId, SlideSnapshot, TransitionFlags};
