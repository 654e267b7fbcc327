use crate::draw::{ElementId, Point, ShapeBuilder, StrokeBuilder};
use crate::input::{events::MouseButton, tool::ToolKind};
use log::debug;

use super::core::log_outcome;
use super::{CanvasEngine, DrawingState, EngineError, InProgress, NoOpReason};

impl CanvasEngine {
    /// Begins a stroke or shape with the active tool, seeded at `point`.
    ///
    /// A press on an edge of the full curtain's reveal area grabs that edge
    /// instead and starts no session.
    ///
    /// # Errors
    /// - `NoOp(PassThrough)` in pass-through mode
    /// - `NoOp(SessionActive)` if a session is already in progress
    /// - `InvalidGeometry` for non-finite coordinates
    pub fn pointer_down(&mut self, point: Point) -> Result<(), EngineError> {
        if !self.mode.accepts_pointer() {
            return Err(EngineError::NoOp(NoOpReason::PassThrough));
        }
        if self.is_drawing() {
            return Err(EngineError::NoOp(NoOpReason::SessionActive));
        }
        if !point.is_finite() {
            debug!("Dropping non-finite pointer-down ({}, {})", point.x, point.y);
            return Err(EngineError::InvalidGeometry {
                x: point.x,
                y: point.y,
            });
        }
        if self.grab_curtain_edge(point) {
            return Ok(());
        }

        let in_progress = match self.tool.kind() {
            ToolKind::Stroke(stroke_tool) => InProgress::Stroke(StrokeBuilder::new(
                stroke_tool,
                point,
                self.color,
                self.thickness,
                self.settings.opacity_for(stroke_tool),
                self.settings.sampling,
            )),
            ToolKind::Shape(kind) => InProgress::Shape(ShapeBuilder::new(
                kind,
                point,
                self.color,
                self.thickness,
                self.settings.arrow,
            )),
        };
        self.state = DrawingState::Drawing(in_progress);

        let damage = self.update_preview_dirty();
        self.emit_preview_changed(damage);
        Ok(())
    }

    /// Extends the in-progress stroke or moves the shape's end anchor.
    ///
    /// Emits a preview notification only when the preview actually changed
    /// (samples within the minimum distance are dropped silently). Motion also
    /// drags a grabbed curtain edge or moves the spotlight; without a session
    /// that is all it does.
    pub fn pointer_move(&mut self, point: Point) -> Result<(), EngineError> {
        if !self.mode.accepts_pointer() {
            return Err(EngineError::NoOp(NoOpReason::PassThrough));
        }
        if !self.is_drawing() && !self.curtain.tracks_pointer() {
            return Err(EngineError::NoOp(NoOpReason::NoSession));
        }
        if !point.is_finite() {
            debug!("Dropping non-finite pointer sample ({}, {})", point.x, point.y);
            return Err(EngineError::InvalidGeometry {
                x: point.x,
                y: point.y,
            });
        }

        let curtain_changed = self.move_curtain(point);
        let DrawingState::Drawing(in_progress) = &mut self.state else {
            return if curtain_changed {
                Ok(())
            } else {
                Err(EngineError::NoOp(NoOpReason::Unchanged))
            };
        };

        let changed = match in_progress {
            InProgress::Stroke(builder) => {
                let before = builder.points().len();
                builder.append_point(point) != before
            }
            InProgress::Shape(builder) => {
                let before = builder.preview().end;
                builder.update_preview(point);
                before != point
            }
        };

        if changed {
            let damage = self.update_preview_dirty();
            self.emit_preview_changed(damage);
        }
        Ok(())
    }

    /// Finalizes and commits the in-progress element.
    ///
    /// The session always ends, even when the commit is rejected by the
    /// per-page element limit. A curtain edge drag is released here too, but
    /// with no session the result is still `NoOp(NoSession)`.
    pub fn pointer_up(&mut self) -> Result<ElementId, EngineError> {
        if !self.mode.accepts_pointer() {
            return Err(EngineError::NoOp(NoOpReason::PassThrough));
        }
        if self.curtain.release_edge() {
            debug!("Released curtain edge");
        }
        let DrawingState::Drawing(in_progress) = std::mem::take(&mut self.state) else {
            return Err(EngineError::NoOp(NoOpReason::NoSession));
        };

        let damage = self.clear_preview_dirty();
        let result = self.commit_element(in_progress.finalize());
        if result.is_err() {
            self.emit_preview_changed(damage);
        }
        result
    }

    /// Discards the in-progress element without touching history.
    pub fn cancel(&mut self) -> Result<(), EngineError> {
        if !self.is_drawing() {
            return Err(EngineError::NoOp(NoOpReason::NoSession));
        }
        self.state = DrawingState::Idle;
        let damage = self.clear_preview_dirty();
        debug!("Cancelled pointer session");
        self.emit_preview_changed(damage);
        Ok(())
    }

    /// Processes a mouse button press.
    ///
    /// - Left: starts a session with the active tool
    /// - Right: cancels the current session
    pub fn on_mouse_press(&mut self, button: MouseButton, point: Point) {
        match button {
            MouseButton::Left => log_outcome("pointer down", self.pointer_down(point)),
            MouseButton::Right => log_outcome("cancel", self.cancel()),
            MouseButton::Middle => {}
        }
    }

    /// Processes pointer motion; ignored unless a session is active or the
    /// curtain follows the pointer.
    pub fn on_mouse_motion(&mut self, point: Point) {
        if self.is_drawing() || self.curtain.tracks_pointer() {
            log_outcome("pointer move", self.pointer_move(point));
        }
    }

    /// Processes a mouse button release at `point`.
    ///
    /// The release position is fed in as a final sample before committing.
    pub fn on_mouse_release(&mut self, button: MouseButton, point: Point) {
        if button != MouseButton::Left {
            return;
        }
        if !self.is_drawing() {
            if self.curtain.dragging_edge().is_some() {
                log_outcome("curtain drag", self.pointer_move(point));
                self.curtain.release_edge();
            }
            return;
        }
        log_outcome("pointer move", self.pointer_move(point));
        log_outcome("pointer up", self.pointer_up());
    }
}
