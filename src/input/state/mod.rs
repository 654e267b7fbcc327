mod actions;
mod core;
mod curtain;
mod error;
mod pages;
mod pointer;

pub use actions::SCROLL_UNITS_PER_PIXEL;
pub use self::core::{CanvasEngine, DrawingState, EngineSettings, InProgress};
pub use error::{EngineError, NoOpReason};
pub use pages::PageDirection;
