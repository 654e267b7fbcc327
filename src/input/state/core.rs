//! Canvas engine state: pages, active style, and the pointer-session machine.

use super::error::{EngineError, NoOpReason};
use crate::config::{Action, ColorSpec, Config, KeyBinding, KeybindingsConfig, ToolsConfig};
use crate::draw::{
    ArrowHead, BackgroundPattern, Color, DirtyTracker, Element, ElementId, ElementKind, Page,
    Preview, Sampling, Scene, ShapeBuilder, StrokeBuilder, StrokeTool, scene::SHAPE_PREVIEW_ALPHA,
};
use crate::input::{
    curtain::Curtain,
    mode::InteractionMode,
    modifiers::Modifiers,
    notify::{ChangeReason, EngineEvent, ListenerId, Listeners},
    tool::Tool,
};
use crate::util::Rect;
use anyhow::Context;
use std::collections::HashMap;

/// Engine parameters resolved from [`Config`].
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub default_color: Color,
    pub default_tool: Tool,
    pub default_thickness: f64,
    pub min_thickness: f64,
    pub max_thickness: f64,
    /// Thickness change for the increase/decrease actions
    pub thickness_step: f64,
    pub sampling: Sampling,
    /// Colors selectable with number keys 1-9
    pub palette: Vec<Color>,
    pub tools: ToolsConfig,
    pub arrow: ArrowHead,
    /// Undo depth per page (0 = unbounded)
    pub history_capacity: usize,
    pub default_background: BackgroundPattern,
    pub inherit_background: bool,
    /// 0 = unlimited
    pub max_elements_per_page: usize,
    pub curtain_opacity: f64,
    /// Spotlight radius when the engine starts
    pub spotlight_radius: f64,
}

impl EngineSettings {
    /// Resolves settings from a validated copy of `config`.
    ///
    /// Out-of-range values are clamped (with a warning) rather than trusted, so
    /// a config built with [`Config::from_toml`] is safe to pass directly.
    pub fn from_config(config: &Config) -> Self {
        let mut config = config.clone();
        config.validate_and_clamp();
        let drawing = &config.drawing;
        Self {
            default_color: drawing.default_color.to_color(),
            default_tool: config.tools.default_tool,
            default_thickness: drawing.default_thickness,
            min_thickness: drawing.min_thickness,
            max_thickness: drawing.max_thickness,
            thickness_step: drawing.thickness_step,
            sampling: Sampling {
                min_distance: drawing.min_point_distance,
                smoothing: drawing.smoothing,
            },
            palette: drawing.palette.iter().map(ColorSpec::to_color).collect(),
            tools: config.tools.clone(),
            arrow: ArrowHead {
                length: config.arrow.length,
                angle_degrees: config.arrow.angle_degrees,
            },
            history_capacity: config.history.capacity,
            default_background: config.pages.default_background,
            inherit_background: config.pages.inherit_background,
            max_elements_per_page: config.pages.max_elements_per_page,
            curtain_opacity: config.curtain.opacity,
            spotlight_radius: config.curtain.spotlight_radius,
        }
    }

    /// Thickness applied when `tool` is selected.
    pub fn width_for(&self, tool: Tool) -> f64 {
        match tool {
            Tool::Pen => self.tools.pen_width,
            Tool::Highlighter => self.tools.highlighter_width,
            Tool::DashedPen => self.tools.dashed_width,
            Tool::Eraser => self.tools.eraser_width,
            Tool::Line | Tool::Rectangle | Tool::Ellipse | Tool::Arrow => self.tools.shape_width,
        }
    }

    /// Opacity baked into strokes drawn with `tool`.
    pub fn opacity_for(&self, tool: StrokeTool) -> f64 {
        match tool {
            StrokeTool::Highlighter => self.tools.highlighter_opacity,
            StrokeTool::DashedPen => self.tools.dashed_opacity,
            StrokeTool::Pen | StrokeTool::Eraser => 1.0,
        }
    }

    /// Clamps to the configured range. An inverted range resolves to its minimum.
    pub fn clamp_thickness(&self, thickness: f64) -> f64 {
        thickness.min(self.max_thickness).max(self.min_thickness)
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// The element under construction during a pointer session.
#[derive(Debug, Clone, PartialEq)]
pub enum InProgress {
    Stroke(StrokeBuilder),
    Shape(ShapeBuilder),
}

impl InProgress {
    /// The element as the renderer should draw it right now.
    pub fn preview(&self) -> Preview {
        match self {
            InProgress::Stroke(builder) => Preview {
                kind: ElementKind::Stroke(builder.preview()),
                alpha_scale: 1.0,
            },
            InProgress::Shape(builder) => Preview {
                kind: ElementKind::Shape(builder.preview().clone()),
                alpha_scale: SHAPE_PREVIEW_ALPHA,
            },
        }
    }

    pub fn bounding_box(&self) -> Option<Rect> {
        match self {
            InProgress::Stroke(builder) => builder.bounding_box(),
            InProgress::Shape(builder) => builder.preview().bounding_box(),
        }
    }

    pub(super) fn finalize(self) -> ElementKind {
        match self {
            InProgress::Stroke(builder) => ElementKind::Stroke(builder.finalize()),
            InProgress::Shape(builder) => ElementKind::Shape(builder.finalize()),
        }
    }
}

/// Pointer-session state machine.
///
/// `Idle -> Drawing -> Idle`. Pointer-up always returns to Idle, whether or
/// not the element could be committed; cancel discards the element.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DrawingState {
    /// No pointer session
    #[default]
    Idle,
    /// Pointer is down; the payload accumulates on move events
    Drawing(InProgress),
}

/// Owns every page and all drawing state for one overlay.
///
/// Commands arrive one at a time from the toolbar and input collaborators.
/// Each successful mutation of committed state emits exactly one
/// [`EngineEvent::SceneChanged`]; style and preview updates emit their own
/// events. Renderers should draw from [`CanvasEngine::scene`], which is an
/// owned snapshot and never exposes a half-committed element.
#[derive(Debug)]
pub struct CanvasEngine {
    pub(super) pages: Vec<Page>,
    pub(super) active: usize,
    pub(super) tool: Tool,
    pub(super) color: Color,
    pub(super) thickness: f64,
    pub(super) mode: InteractionMode,
    pub(super) curtain: Curtain,
    pub(super) state: DrawingState,
    pub(super) modifiers: Modifiers,
    pub(super) settings: EngineSettings,
    next_id: u64,
    /// Keybinding action map for efficient lookup
    action_map: HashMap<KeyBinding, Action>,
    /// Tracks dirty regions between renders
    pub(super) dirty_tracker: DirtyTracker,
    /// Cached bounds for the current preview (if any)
    last_preview_bounds: Option<Rect>,
    pub(super) listeners: Listeners,
    pub(super) surface_width: u32,
    pub(super) surface_height: u32,
}

impl Default for CanvasEngine {
    fn default() -> Self {
        let action_map = KeybindingsConfig::default()
            .build_action_map()
            .unwrap_or_default();
        Self::new(EngineSettings::default(), action_map)
    }
}

impl CanvasEngine {
    /// Creates an engine with one empty page.
    pub fn new(settings: EngineSettings, action_map: HashMap<KeyBinding, Action>) -> Self {
        let first_page = Page::new(settings.default_background, settings.history_capacity);
        Self {
            pages: vec![first_page],
            active: 0,
            tool: settings.default_tool,
            color: settings.default_color,
            thickness: settings.clamp_thickness(settings.default_thickness),
            mode: InteractionMode::Draw,
            curtain: Curtain::new(settings.curtain_opacity, settings.spotlight_radius),
            state: DrawingState::Idle,
            modifiers: Modifiers::new(),
            next_id: 1,
            action_map,
            dirty_tracker: DirtyTracker::new(),
            last_preview_bounds: None,
            listeners: Listeners::default(),
            surface_width: 0,
            surface_height: 0,
            settings,
        }
    }

    /// Builds an engine from a loaded config.
    ///
    /// # Errors
    /// Fails if a keybinding string is invalid or bound twice.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let action_map = config
            .keybindings
            .build_action_map()
            .map_err(anyhow::Error::msg)
            .context("Invalid keybindings")?;
        Ok(Self::new(EngineSettings::from_config(config), action_map))
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn state(&self) -> &DrawingState {
        &self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, DrawingState::Drawing(_))
    }

    pub fn in_progress(&self) -> Option<&InProgress> {
        match &self.state {
            DrawingState::Drawing(in_progress) => Some(in_progress),
            DrawingState::Idle => None,
        }
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn active_page_index(&self) -> usize {
        self.active
    }

    pub fn active_page(&self) -> &Page {
        debug_assert!(self.active < self.pages.len());
        &self.pages[self.active]
    }

    pub fn can_undo(&self) -> bool {
        self.active_page().can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.active_page().can_redo()
    }

    /// Owned snapshot of the active page plus the live preview.
    pub fn scene(&self) -> Scene {
        let page = self.active_page();
        Scene {
            page_index: self.active,
            page_count: self.pages.len(),
            background: page.background(),
            elements: page.elements().to_vec(),
            preview: self.in_progress().map(InProgress::preview),
            can_undo: page.can_undo(),
            can_redo: page.can_redo(),
            curtain: self.curtain.clone(),
        }
    }

    // ------------------------------------------------------------------
    // Listeners
    // ------------------------------------------------------------------

    /// Registers a listener for engine notifications.
    pub fn subscribe(&mut self, listener: impl FnMut(&EngineEvent) + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    pub(super) fn emit_scene_changed(&mut self, reason: ChangeReason) {
        let page = self.active_page();
        let event = EngineEvent::SceneChanged {
            reason,
            page_index: self.active,
            page_count: self.pages.len(),
            can_undo: page.can_undo(),
            can_redo: page.can_redo(),
        };
        self.listeners.emit(&event);
    }

    pub(super) fn emit_preview_changed(&mut self, damage: Option<Rect>) {
        self.listeners.emit(&EngineEvent::PreviewChanged { damage });
    }

    fn emit_style_changed(&mut self) {
        let event = EngineEvent::StyleChanged {
            tool: self.tool,
            color: self.color,
            thickness: self.thickness,
        };
        self.listeners.emit(&event);
    }

    // ------------------------------------------------------------------
    // Dirty regions
    // ------------------------------------------------------------------

    /// Updates the surface size used for full-surface damage.
    pub fn set_surface_size(&mut self, width: u32, height: u32) {
        self.surface_width = width;
        self.surface_height = height;
        self.dirty_tracker.mark_full();
    }

    /// Drains pending dirty rectangles for the current surface size.
    pub fn take_dirty_regions(&mut self) -> Vec<Rect> {
        let width = self.surface_width.min(i32::MAX as u32) as i32;
        let height = self.surface_height.min(i32::MAX as u32) as i32;
        self.dirty_tracker.take_regions(width, height)
    }

    /// Re-marks the preview area; returns the union of old and new bounds.
    pub(super) fn update_preview_dirty(&mut self) -> Option<Rect> {
        let new_bounds = self.in_progress().and_then(InProgress::bounding_box);
        let previous = self.last_preview_bounds;

        if new_bounds != previous {
            self.dirty_tracker.mark_optional_rect(previous);
        }
        self.dirty_tracker.mark_optional_rect(new_bounds);
        self.last_preview_bounds = new_bounds;

        match (previous, new_bounds) {
            (Some(old), Some(new)) => Some(old.union(new)),
            (old, new) => old.or(new),
        }
    }

    /// Forgets the cached preview bounds and marks them for repaint.
    pub(super) fn clear_preview_dirty(&mut self) -> Option<Rect> {
        let previous = self.last_preview_bounds.take();
        self.dirty_tracker.mark_optional_rect(previous);
        previous
    }

    /// Drops the in-progress element without notifying. Returns true if one existed.
    pub(super) fn discard_session(&mut self) -> bool {
        if !self.is_drawing() {
            return false;
        }
        self.state = DrawingState::Idle;
        self.clear_preview_dirty();
        log::debug!("Discarded in-progress element");
        true
    }

    // ------------------------------------------------------------------
    // Style
    // ------------------------------------------------------------------

    /// Selects a tool and applies its default thickness.
    ///
    /// An active session keeps the tool it started with.
    pub fn select_tool(&mut self, tool: Tool) {
        self.tool = tool;
        self.thickness = self.settings.clamp_thickness(self.settings.width_for(tool));
        log::debug!("Selected {} ({:.1}px)", tool, self.thickness);
        self.emit_style_changed();
    }

    pub fn set_color(&mut self, color: Color) {
        debug_assert!(color.is_valid(), "color components must be in 0.0..=1.0");
        self.color = color;
        self.emit_style_changed();
    }

    /// Sets the thickness, clamped to the configured range.
    ///
    /// Returns the applied value.
    ///
    /// # Errors
    /// [`EngineError::InvalidThickness`] for non-finite or non-positive input.
    pub fn set_thickness(&mut self, thickness: f64) -> Result<f64, EngineError> {
        if !thickness.is_finite() || thickness <= 0.0 {
            return Err(EngineError::InvalidThickness(thickness));
        }
        self.thickness = self.settings.clamp_thickness(thickness);
        log::debug!("Thickness set to {:.1}px", self.thickness);
        self.emit_style_changed();
        Ok(self.thickness)
    }

    /// Changes the thickness by `delta`, clamping at the configured range.
    pub fn adjust_thickness(&mut self, delta: f64) -> Result<f64, EngineError> {
        if !delta.is_finite() {
            return Err(EngineError::InvalidThickness(delta));
        }
        let target = self.settings.clamp_thickness(self.thickness + delta);
        if target == self.thickness {
            return Err(EngineError::NoOp(NoOpReason::Unchanged));
        }
        self.set_thickness(target)
    }

    /// Selects the palette entry at `index` (0-based).
    pub fn select_palette(&mut self, index: usize) -> Result<Color, EngineError> {
        let color = *self
            .settings
            .palette
            .get(index)
            .ok_or(EngineError::NoOp(NoOpReason::PaletteIndex(index)))?;
        self.set_color(color);
        Ok(color)
    }

    // ------------------------------------------------------------------
    // Interaction mode
    // ------------------------------------------------------------------

    /// Switches between draw and pass-through.
    ///
    /// Entering pass-through discards any in-progress element.
    pub fn set_mode(&mut self, mode: InteractionMode) -> Result<(), EngineError> {
        if mode == self.mode {
            return Err(EngineError::NoOp(NoOpReason::Unchanged));
        }
        self.apply_mode(mode);
        Ok(())
    }

    /// Flips the interaction mode and returns the new one.
    pub fn toggle_mode(&mut self) -> InteractionMode {
        let mode = self.mode.toggled();
        self.apply_mode(mode);
        mode
    }

    fn apply_mode(&mut self, mode: InteractionMode) {
        if !mode.accepts_pointer() && self.is_drawing() {
            self.state = DrawingState::Idle;
            let damage = self.clear_preview_dirty();
            self.emit_preview_changed(damage);
        }
        if !mode.accepts_pointer() {
            self.curtain.release_edge();
        }
        self.mode = mode;
        log::info!("Interaction mode: {}", mode);
        self.listeners.emit(&EngineEvent::ModeChanged(mode));
    }

    // ------------------------------------------------------------------
    // Commit path
    // ------------------------------------------------------------------

    /// Assigns an id and records `kind` on the active page.
    pub(super) fn commit_element(&mut self, kind: ElementKind) -> Result<ElementId, EngineError> {
        let limit = self.settings.max_elements_per_page;
        if limit > 0 && self.active_page().len() >= limit {
            log::warn!(
                "Element limit ({}) reached; discarding new {}",
                limit,
                kind.label()
            );
            return Err(EngineError::ElementLimit(limit));
        }

        let id = ElementId(self.next_id);
        self.next_id += 1;

        self.dirty_tracker.mark_element(&kind);
        log::debug!("Committed {} {} on page {}", kind.label(), id, self.active);
        self.pages[self.active].add_element(Element::new(id, kind));
        self.emit_scene_changed(ChangeReason::Committed);
        Ok(id)
    }

    /// Look up an action for the given key and the current modifiers.
    ///
    /// Shifted symbol keys fall back to their unshifted binding so "+" works
    /// on layouts where it needs Shift.
    pub(super) fn find_action(&self, key_str: &str) -> Option<Action> {
        let lookup = |shift: bool| {
            self.action_map.iter().find_map(|(binding, action)| {
                binding
                    .matches(key_str, self.modifiers.ctrl, shift, self.modifiers.alt)
                    .then_some(*action)
            })
        };

        lookup(self.modifiers.shift).or_else(|| {
            let symbol = key_str.chars().count() == 1
                && !key_str.chars().all(char::is_alphanumeric);
            if self.modifiers.shift && symbol {
                lookup(false)
            } else {
                None
            }
        })
    }
}

/// Logs a swallowed command result. NoOps are routine and stay at trace.
pub(super) fn log_outcome<T>(context: &str, result: Result<T, EngineError>) {
    match result {
        Ok(_) => {}
        Err(err) if err.is_noop() => log::trace!("{context}: {err}"),
        Err(err) => log::debug!("{context}: {err}"),
    }
}
