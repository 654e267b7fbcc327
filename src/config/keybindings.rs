//! Keybinding configuration types and parsing.
//!
//! This module defines the configurable keybinding system that maps keyboard
//! shortcuts onto engine commands. Number keys 1-9 select palette colors and
//! are handled by the engine directly.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All possible actions that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // Session control
    Cancel,
    ToggleMode,
    /// Cycle the screen curtain: off, full, spotlight
    ToggleCurtain,

    // History
    Undo,
    Redo,
    ClearPage,

    // Pages
    NewPage,
    PreviousPage,
    NextPage,
    RemovePage,

    // Thickness controls
    IncreaseThickness,
    DecreaseThickness,

    // Tool selection
    SelectPen,
    SelectHighlighter,
    SelectDashedPen,
    SelectEraser,
    SelectLine,
    SelectRectangle,
    SelectEllipse,
    SelectArrow,
}

/// A single keybinding: a key character with optional modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyBinding {
    /// Parse a keybinding string like "Ctrl+Shift+Z" or "Escape".
    /// Modifiers can appear in any order and spaces around '+' are ignored.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty keybinding string".to_string());
        }

        let s_normalized = s.replace(" + ", "+").replace("+ ", "+").replace(" +", "+");
        let parts: Vec<&str> = s_normalized.split('+').collect();

        let mut ctrl = false;
        let mut shift = false;
        let mut alt = false;
        let mut key_parts = Vec::new();

        for part in parts {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => ctrl = true,
                "shift" => shift = true,
                "alt" => alt = true,
                _ => key_parts.push(part),
            }
        }

        if key_parts.is_empty() {
            return Err(format!("No key specified in: {}", s));
        }

        // "Ctrl++" splits into trailing empty parts; the key is '+'
        let key = key_parts.join("+");
        let key = if key.is_empty() { "+".to_string() } else { key };

        Ok(Self {
            key,
            ctrl,
            shift,
            alt,
        })
    }

    /// Check if this keybinding matches the current input state.
    pub fn matches(&self, key: &str, ctrl: bool, shift: bool, alt: bool) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.ctrl == ctrl
            && self.shift == shift
            && self.alt == alt
    }
}

/// Configuration for all keybindings.
///
/// Each action can have multiple keybindings. Users specify them in config.toml as:
/// ```toml
/// [keybindings]
/// undo = ["Ctrl+Z"]
/// redo = ["Ctrl+Y", "Ctrl+Shift+Z"]
/// clear_page = ["Ctrl+Delete"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KeybindingsConfig {
    #[serde(default = "default_cancel")]
    pub cancel: Vec<String>,

    #[serde(default = "default_toggle_mode")]
    pub toggle_mode: Vec<String>,

    #[serde(default = "default_toggle_curtain")]
    pub toggle_curtain: Vec<String>,

    #[serde(default = "default_undo")]
    pub undo: Vec<String>,

    #[serde(default = "default_redo")]
    pub redo: Vec<String>,

    #[serde(default = "default_clear_page")]
    pub clear_page: Vec<String>,

    #[serde(default = "default_new_page")]
    pub new_page: Vec<String>,

    #[serde(default = "default_previous_page")]
    pub previous_page: Vec<String>,

    #[serde(default = "default_next_page")]
    pub next_page: Vec<String>,

    #[serde(default = "default_remove_page")]
    pub remove_page: Vec<String>,

    #[serde(default = "default_increase_thickness")]
    pub increase_thickness: Vec<String>,

    #[serde(default = "default_decrease_thickness")]
    pub decrease_thickness: Vec<String>,

    #[serde(default = "default_select_pen")]
    pub select_pen: Vec<String>,

    #[serde(default = "default_select_highlighter")]
    pub select_highlighter: Vec<String>,

    #[serde(default = "default_select_dashed_pen")]
    pub select_dashed_pen: Vec<String>,

    #[serde(default = "default_select_eraser")]
    pub select_eraser: Vec<String>,

    #[serde(default = "default_select_line")]
    pub select_line: Vec<String>,

    #[serde(default = "default_select_rectangle")]
    pub select_rectangle: Vec<String>,

    #[serde(default = "default_select_ellipse")]
    pub select_ellipse: Vec<String>,

    #[serde(default = "default_select_arrow")]
    pub select_arrow: Vec<String>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            cancel: default_cancel(),
            toggle_mode: default_toggle_mode(),
            toggle_curtain: default_toggle_curtain(),
            undo: default_undo(),
            redo: default_redo(),
            clear_page: default_clear_page(),
            new_page: default_new_page(),
            previous_page: default_previous_page(),
            next_page: default_next_page(),
            remove_page: default_remove_page(),
            increase_thickness: default_increase_thickness(),
            decrease_thickness: default_decrease_thickness(),
            select_pen: default_select_pen(),
            select_highlighter: default_select_highlighter(),
            select_dashed_pen: default_select_dashed_pen(),
            select_eraser: default_select_eraser(),
            select_line: default_select_line(),
            select_rectangle: default_select_rectangle(),
            select_ellipse: default_select_ellipse(),
            select_arrow: default_select_arrow(),
        }
    }
}

impl KeybindingsConfig {
    /// Build a lookup map from keybindings to actions for efficient matching.
    /// Returns an error if any keybinding string is invalid or if duplicates are detected.
    pub fn build_action_map(&self) -> Result<HashMap<KeyBinding, Action>, String> {
        let mut map = HashMap::new();

        let groups: [(&[String], Action); 20] = [
            (&self.cancel, Action::Cancel),
            (&self.toggle_mode, Action::ToggleMode),
            (&self.toggle_curtain, Action::ToggleCurtain),
            (&self.undo, Action::Undo),
            (&self.redo, Action::Redo),
            (&self.clear_page, Action::ClearPage),
            (&self.new_page, Action::NewPage),
            (&self.previous_page, Action::PreviousPage),
            (&self.next_page, Action::NextPage),
            (&self.remove_page, Action::RemovePage),
            (&self.increase_thickness, Action::IncreaseThickness),
            (&self.decrease_thickness, Action::DecreaseThickness),
            (&self.select_pen, Action::SelectPen),
            (&self.select_highlighter, Action::SelectHighlighter),
            (&self.select_dashed_pen, Action::SelectDashedPen),
            (&self.select_eraser, Action::SelectEraser),
            (&self.select_line, Action::SelectLine),
            (&self.select_rectangle, Action::SelectRectangle),
            (&self.select_ellipse, Action::SelectEllipse),
            (&self.select_arrow, Action::SelectArrow),
        ];

        for (bindings, action) in groups {
            for binding_str in bindings {
                let binding = KeyBinding::parse(binding_str)?;
                if let Some(existing_action) = map.insert(binding, action) {
                    return Err(format!(
                        "Duplicate keybinding '{}' assigned to both {:?} and {:?}",
                        binding_str, existing_action, action
                    ));
                }
            }
        }

        Ok(map)
    }
}

// =============================================================================
// Default keybinding functions
// =============================================================================

fn default_cancel() -> Vec<String> {
    vec!["Escape".to_string()]
}

fn default_toggle_mode() -> Vec<String> {
    vec!["F2".to_string()]
}

fn default_toggle_curtain() -> Vec<String> {
    vec!["F5".to_string()]
}

fn default_undo() -> Vec<String> {
    vec!["Ctrl+Z".to_string()]
}

fn default_redo() -> Vec<String> {
    vec!["Ctrl+Y".to_string(), "Ctrl+Shift+Z".to_string()]
}

fn default_clear_page() -> Vec<String> {
    vec!["Ctrl+Delete".to_string(), "Ctrl+Backspace".to_string()]
}

fn default_new_page() -> Vec<String> {
    vec!["Ctrl+N".to_string()]
}

fn default_previous_page() -> Vec<String> {
    vec!["PageUp".to_string()]
}

fn default_next_page() -> Vec<String> {
    vec!["PageDown".to_string()]
}

fn default_remove_page() -> Vec<String> {
    vec!["Ctrl+Shift+Delete".to_string()]
}

fn default_increase_thickness() -> Vec<String> {
    vec!["+".to_string(), "=".to_string()]
}

fn default_decrease_thickness() -> Vec<String> {
    vec!["-".to_string(), "_".to_string()]
}

fn default_select_pen() -> Vec<String> {
    vec!["P".to_string()]
}

fn default_select_highlighter() -> Vec<String> {
    vec!["H".to_string()]
}

fn default_select_dashed_pen() -> Vec<String> {
    vec!["D".to_string()]
}

fn default_select_eraser() -> Vec<String> {
    vec!["E".to_string()]
}

fn default_select_line() -> Vec<String> {
    vec!["L".to_string()]
}

fn default_select_rectangle() -> Vec<String> {
    vec!["R".to_string()]
}

fn default_select_ellipse() -> Vec<String> {
    vec!["O".to_string()]
}

fn default_select_arrow() -> Vec<String> {
    vec!["A".to_string()]
}
