//! Canvas engine and input handling.
//!
//! This module owns the drawing session: pages, the active tool and style,
//! the pointer-session state machine, and the translation of backend keyboard
//! and mouse events into engine commands. State changes are reported to
//! registered listeners (see [`notify`]).

pub mod curtain;
pub mod events;
pub mod mode;
pub mod modifiers;
pub mod notify;
pub mod state;
pub mod tool;

// Re-export commonly used types at module level
pub use curtain::{Curtain, CurtainEdge, CurtainMode, RevealArea};
pub use events::{Key, MouseButton};
pub use mode::InteractionMode;
pub use modifiers::Modifiers;
pub use notify::{ChangeReason, EngineEvent, ListenerId};
pub use state::{
    CanvasEngine, DrawingState, EngineError, EngineSettings, InProgress, NoOpReason,
    PageDirection,
};
pub use tool::{Tool, ToolKind};
