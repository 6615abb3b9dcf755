//! Ordered slide collection
//!
//! Slides live in a `Vec` in mount order; `Slide::index` always equals the
//! slide's position in that vector (0-based, contiguous). The registry does not
//! own the active index: callers pass it in and receive the adjusted value.

use crate::state::{Slide, SlideDescriptor, SlideId, TransitionFlags};

#[derive(Debug, Default)]
pub struct SlideRegistry {
    slides: Vec<Slide>,
}

impl SlideRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a slide
    ///
    /// The slide is flagged active when its index equals `active_index`
    /// (the first slide under the default active index 0).
    pub fn add(&mut self, descriptor: &SlideDescriptor, active_index: usize) -> SlideId {
        let index = self.slides.len();
        let mut slide = Slide::new(descriptor, index);
        slide.flags.is_active = index == active_index;
        let id = slide.id;
        self.slides.push(slide);
        id
    }

    /// Remove a slide by identity and re-index the rest
    ///
    /// Returns the active index after removal, or `None` if `id` is not
    /// registered. Removing a slide before the active one shifts the active
    /// index down with it; removing the active slide keeps the position,
    /// clamped to the new range. The slide at the returned index is flagged
    /// active; flags of slides caught mid-transition are left alone.
    pub fn remove(&mut self, id: SlideId, active_index: usize) -> Option<usize> {
        let position = self.position_of(id)?;
        self.slides.remove(position);
        self.reindex();

        let mut active = if position < active_index {
            active_index - 1
        } else {
            active_index
        };
        if active >= self.slides.len() && !self.slides.is_empty() {
            active = self.slides.len() - 1;
        }

        for slide in &mut self.slides {
            if !slide.flags.is_transient() {
                slide.flags.is_active = slide.index == active;
            }
        }

        Some(active)
    }

    pub fn count(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Slide> {
        self.slides.get_mut(index)
    }

    pub fn position_of(&self, id: SlideId) -> Option<usize> {
        self.slides.iter().position(|s| s.id == id)
    }

    pub(crate) fn by_id_mut(&mut self, id: SlideId) -> Option<&mut Slide> {
        self.slides.iter_mut().find(|s| s.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slide> {
        self.slides.iter()
    }

    /// Rewrite every slide to the idle pattern for `active_index`
    pub(crate) fn reset_flags(&mut self, active_index: usize) {
        for slide in &mut self.slides {
            slide.flags = TransitionFlags::idle(slide.index == active_index);
        }
    }

    fn reindex(&mut self) {
        for (i, slide) in self.slides.iter_mut().enumerate() {
            slide.index = i;
        }
    }
}
