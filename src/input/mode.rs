//! Draw vs. pass-through interaction mode.

use serde::Serialize;

/// Whether the overlay captures pointer input.
///
/// In pass-through the overlay stays visible but pointer events belong to
/// the applications underneath, so the engine ignores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InteractionMode {
    #[default]
    Draw,
    PassThrough,
}

impl InteractionMode {
    pub fn toggled(self) -> Self {
        match self {
            InteractionMode::Draw => InteractionMode::PassThrough,
            InteractionMode::PassThrough => InteractionMode::Draw,
        }
    }

    pub fn accepts_pointer(self) -> bool {
        self == InteractionMode::Draw
    }

    pub fn as_str(self) -> &'static str {
        match self {
            InteractionMode::Draw => "draw",
            InteractionMode::PassThrough => "pass-through",
        }
    }
}

impl std::fmt::Display for InteractionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
