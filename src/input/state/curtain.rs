use crate::draw::Point;
use crate::input::curtain::{Curtain, CurtainMode};
use crate::input::notify::EngineEvent;
use crate::util::Rect;

use super::{CanvasEngine, EngineError, NoOpReason};

impl CanvasEngine {
    pub fn curtain(&self) -> &Curtain {
        &self.curtain
    }

    /// Advances the curtain to its next mode and returns it.
    pub fn toggle_curtain(&mut self) -> CurtainMode {
        let mode = self.curtain.mode().next();
        self.apply_curtain_mode(mode);
        mode
    }

    pub fn set_curtain_mode(&mut self, mode: CurtainMode) -> Result<(), EngineError> {
        if mode == self.curtain.mode() {
            return Err(EngineError::NoOp(NoOpReason::Unchanged));
        }
        self.apply_curtain_mode(mode);
        Ok(())
    }

    fn apply_curtain_mode(&mut self, mode: CurtainMode) {
        self.curtain.set_mode(
            mode,
            f64::from(self.surface_width),
            f64::from(self.surface_height),
        );
        log::info!("Curtain: {}", mode);
        self.dirty_tracker.mark_full();
        self.listeners.emit(&EngineEvent::CurtainChanged(mode));
    }

    /// Grows or shrinks the spotlight by `delta` pixels. Returns the new radius.
    ///
    /// # Errors
    /// - `NoOp(NoSpotlight)` unless the spotlight is up
    /// - `NoOp(Unchanged)` when already at the clamp limit
    /// - `InvalidRadius` for a non-finite delta
    pub fn adjust_spotlight_radius(&mut self, delta: f64) -> Result<f64, EngineError> {
        if self.curtain.mode() != CurtainMode::Spotlight {
            return Err(EngineError::NoOp(NoOpReason::NoSpotlight));
        }
        if !delta.is_finite() {
            return Err(EngineError::InvalidRadius(delta));
        }
        let before = self.curtain.spotlight_bounds();
        let radius = self.curtain.spotlight_radius();
        if self.curtain.adjust_radius(delta) == radius {
            return Err(EngineError::NoOp(NoOpReason::Unchanged));
        }
        self.mark_spotlight_moved(before);
        self.listeners
            .emit(&EngineEvent::CurtainChanged(CurtainMode::Spotlight));
        Ok(self.curtain.spotlight_radius())
    }

    /// Starts an edge drag if `point` lands on a reveal edge. Returns true if grabbed.
    pub(super) fn grab_curtain_edge(&mut self, point: Point) -> bool {
        match self.curtain.grab_edge(point) {
            Some(edge) => {
                log::debug!("Dragging curtain {:?} edge", edge);
                true
            }
            None => false,
        }
    }

    /// Feeds pointer motion to an edge drag or the spotlight. Returns true if
    /// the curtain changed.
    pub(super) fn move_curtain(&mut self, point: Point) -> bool {
        if self.curtain.dragging_edge().is_some() {
            if !self.curtain.drag_to(point) {
                return false;
            }
            self.dirty_tracker.mark_full();
        } else {
            let before = self.curtain.spotlight_bounds();
            if !self.curtain.follow(point) {
                return false;
            }
            self.mark_spotlight_moved(before);
        }
        self.listeners
            .emit(&EngineEvent::CurtainChanged(self.curtain.mode()));
        true
    }

    fn mark_spotlight_moved(&mut self, before: Option<Rect>) {
        self.dirty_tracker.mark_optional_rect(before);
        self.dirty_tracker
            .mark_optional_rect(self.curtain.spotlight_bounds());
    }
}
