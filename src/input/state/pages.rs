use crate::draw::{BackgroundPattern, ElementId, ElementKind, ImageElement, Page, Point};
use crate::input::notify::ChangeReason;
use log::{debug, info};

use super::{CanvasEngine, EngineError, NoOpReason};

/// Direction for relative page navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Previous,
    Next,
}

impl CanvasEngine {
    /// Reverses the most recent edit on the active page.
    ///
    /// An in-progress element is unaffected.
    pub fn undo(&mut self) -> Result<(), EngineError> {
        let entry = self.pages[self.active].undo()?;
        debug!("Undid {} on page {}", entry.label(), self.active);
        self.dirty_tracker.mark_full();
        self.emit_scene_changed(ChangeReason::Undo);
        Ok(())
    }

    /// Reapplies the most recently undone edit on the active page.
    pub fn redo(&mut self) -> Result<(), EngineError> {
        let entry = self.pages[self.active].redo()?;
        debug!("Redid {} on page {}", entry.label(), self.active);
        self.dirty_tracker.mark_full();
        self.emit_scene_changed(ChangeReason::Redo);
        Ok(())
    }

    /// Snapshots and empties the active page (undoable).
    pub fn clear_active_page(&mut self) -> Result<(), EngineError> {
        if !self.pages[self.active].clear() {
            return Err(EngineError::NoOp(NoOpReason::PageEmpty));
        }
        info!("Cleared page {}", self.active + 1);
        self.dirty_tracker.mark_full();
        self.emit_scene_changed(ChangeReason::Cleared);
        Ok(())
    }

    /// Changes the active page's background. Not recorded in history.
    pub fn set_background(&mut self, pattern: BackgroundPattern) -> Result<(), EngineError> {
        let page = &mut self.pages[self.active];
        if page.background() == pattern {
            return Err(EngineError::NoOp(NoOpReason::Unchanged));
        }
        page.set_background(pattern);
        info!("Page {} background: {}", self.active + 1, pattern);
        self.dirty_tracker.mark_full();
        self.emit_scene_changed(ChangeReason::BackgroundChanged);
        Ok(())
    }

    /// Appends an empty page and makes it active. Returns its index.
    ///
    /// The page gets the default background, or the active page's background
    /// when `inherit_background` is set.
    pub fn new_page(&mut self) -> usize {
        self.discard_session();
        let background = if self.settings.inherit_background {
            self.active_page().background()
        } else {
            self.settings.default_background
        };
        self.pages
            .push(Page::new(background, self.settings.history_capacity));
        self.active = self.pages.len() - 1;
        info!("Created page {} of {}", self.active + 1, self.pages.len());
        self.dirty_tracker.mark_full();
        self.emit_scene_changed(ChangeReason::PageAdded);
        self.active
    }

    /// Moves one page back or forward. Does not wrap around.
    pub fn switch_page(&mut self, direction: PageDirection) -> Result<(), EngineError> {
        let target = match direction {
            PageDirection::Previous => self
                .active
                .checked_sub(1)
                .ok_or(EngineError::NoOp(NoOpReason::AtFirstPage))?,
            PageDirection::Next => {
                let next = self.active + 1;
                if next >= self.pages.len() {
                    return Err(EngineError::NoOp(NoOpReason::AtLastPage));
                }
                next
            }
        };
        self.activate_page(target);
        Ok(())
    }

    /// Jumps directly to the page at `index` (0-based).
    pub fn go_to_page(&mut self, index: usize) -> Result<(), EngineError> {
        if index >= self.pages.len() {
            return Err(EngineError::NoOp(NoOpReason::PageOutOfRange(index)));
        }
        if index == self.active {
            return Err(EngineError::NoOp(NoOpReason::AlreadyOnPage));
        }
        self.activate_page(index);
        Ok(())
    }

    /// Deletes the active page along with its history.
    ///
    /// The following page becomes active, or the new last page when the
    /// removed page was last. The only remaining page cannot be removed.
    pub fn remove_active_page(&mut self) -> Result<(), EngineError> {
        if self.pages.len() <= 1 {
            return Err(EngineError::NoOp(NoOpReason::OnlyPage));
        }
        self.discard_session();
        let removed = self.pages.remove(self.active);
        self.active = self.active.min(self.pages.len() - 1);
        info!(
            "Removed page with {} elements; {} pages remain",
            removed.len(),
            self.pages.len()
        );
        self.dirty_tracker.mark_full();
        self.emit_scene_changed(ChangeReason::PageRemoved);
        Ok(())
    }

    /// Places an already-decoded image on the active page (undoable).
    ///
    /// `source` is whatever reference the image manager understands.
    ///
    /// # Errors
    /// - `InvalidGeometry` for a non-finite position or non-positive size
    /// - `ElementLimit` when the page is full
    pub fn insert_image(
        &mut self,
        source: impl Into<String>,
        position: Point,
        width: f64,
        height: f64,
    ) -> Result<ElementId, EngineError> {
        let image = ImageElement {
            position,
            source: source.into(),
            width,
            height,
        };
        if !image.is_valid() {
            debug!(
                "Rejecting image {} at ({}, {}) size {}x{}",
                image.source, position.x, position.y, width, height
            );
            return Err(EngineError::InvalidGeometry {
                x: position.x,
                y: position.y,
            });
        }
        self.commit_element(ElementKind::Image(image))
    }

    fn activate_page(&mut self, index: usize) {
        debug_assert!(index < self.pages.len());
        self.discard_session();
        self.active = index;
        debug!("Switched to page {} of {}", index + 1, self.pages.len());
        self.dirty_tracker.mark_full();
        self.emit_scene_changed(ChangeReason::PageSwitched);
    }
}
