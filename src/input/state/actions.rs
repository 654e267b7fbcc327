use crate::config::{Action, KeyBinding};
use crate::input::{
    curtain::{CurtainMode, SCROLL_UNITS_PER_RADIUS_PIXEL},
    events::Key,
    modifiers::Modifiers,
    tool::Tool,
};

use super::core::log_outcome;
use super::{CanvasEngine, PageDirection};

/// Scroll units per pixel of thickness change (one wheel notch is 120 units).
pub const SCROLL_UNITS_PER_PIXEL: f64 = 60.0;

impl CanvasEngine {
    /// Processes a key press event.
    ///
    /// Modifier keys update the tracked modifier state. Other keys are looked
    /// up in the configured keybindings; unbound digits 1-9 select palette
    /// colors.
    pub fn on_key_press(&mut self, key: Key) {
        if self.modifiers.update(key, true) {
            return;
        }

        let Some(key_str) = key.binding_name() else {
            return;
        };

        if let Some(action) = self.find_action(&key_str) {
            self.handle_action(action);
            return;
        }

        if let Key::Char(c @ '1'..='9') = key {
            if !self.modifiers.command_held() {
                let index = c as usize - '1' as usize;
                log_outcome("palette", self.select_palette(index));
            }
        }
    }

    /// Processes a key release event.
    ///
    /// Only modifier releases matter.
    pub fn on_key_release(&mut self, key: Key) {
        self.modifiers.update(key, false);
    }

    /// Presses and releases a full chord such as `Ctrl+Shift+Z`.
    ///
    /// The tracked modifier state is restored afterwards.
    pub fn press_chord(&mut self, binding: &KeyBinding) {
        let saved = self.modifiers;
        self.modifiers = Modifiers {
            shift: binding.shift,
            ctrl: binding.ctrl,
            alt: binding.alt,
        };
        let key = Key::from_name(&binding.key);
        self.on_key_press(key);
        self.on_key_release(key);
        self.modifiers = saved;
    }

    /// Adjusts thickness from a scroll-wheel delta (positive grows).
    ///
    /// While the spotlight is up the wheel resizes the spotlight instead.
    pub fn on_scroll(&mut self, delta: f64) {
        if self.curtain.mode() == CurtainMode::Spotlight {
            log_outcome(
                "spotlight radius",
                self.adjust_spotlight_radius(delta / SCROLL_UNITS_PER_RADIUS_PIXEL),
            );
            return;
        }
        log_outcome(
            "scroll",
            self.adjust_thickness(delta / SCROLL_UNITS_PER_PIXEL),
        );
    }

    /// Handle an action triggered by a keybinding.
    ///
    /// NoOp outcomes are swallowed; the UI reflects availability through
    /// `can_undo`/`can_redo` instead.
    pub fn handle_action(&mut self, action: Action) {
        log::trace!("Action {:?}", action);
        match action {
            Action::Cancel => log_outcome("cancel", self.cancel()),
            Action::ToggleMode => {
                self.toggle_mode();
            }
            Action::ToggleCurtain => {
                self.toggle_curtain();
            }
            Action::Undo => log_outcome("undo", self.undo()),
            Action::Redo => log_outcome("redo", self.redo()),
            Action::ClearPage => log_outcome("clear page", self.clear_active_page()),
            Action::NewPage => {
                self.new_page();
            }
            Action::PreviousPage => {
                log_outcome("previous page", self.switch_page(PageDirection::Previous))
            }
            Action::NextPage => log_outcome("next page", self.switch_page(PageDirection::Next)),
            Action::RemovePage => log_outcome("remove page", self.remove_active_page()),
            Action::IncreaseThickness => {
                let step = self.settings.thickness_step;
                log_outcome("thickness", self.adjust_thickness(step));
            }
            Action::DecreaseThickness => {
                let step = self.settings.thickness_step;
                log_outcome("thickness", self.adjust_thickness(-step));
            }
            Action::SelectPen => self.select_tool(Tool::Pen),
            Action::SelectHighlighter => self.select_tool(Tool::Highlighter),
            Action::SelectDashedPen => self.select_tool(Tool::DashedPen),
            Action::SelectEraser => self.select_tool(Tool::Eraser),
            Action::SelectLine => self.select_tool(Tool::Line),
            Action::SelectRectangle => self.select_tool(Tool::Rectangle),
            Action::SelectEllipse => self.select_tool(Tool::Ellipse),
            Action::SelectArrow => self.select_tool(Tool::Arrow),
        }
    }
}
