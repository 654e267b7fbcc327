//! Drawing engine for transparent screen-overlay annotation.
//!
//! The engine turns pointer, keyboard and scroll input into vector elements
//! on a stack of pages with bounded per-page undo history. Rendering and the
//! overlay surface live outside this crate; they subscribe to engine events
//! and pull [`draw::Scene`] snapshots plus dirty regions.

pub mod config;
pub mod draw;
pub mod input;
pub mod script;
pub mod util;

pub use config::Config;
pub use input::CanvasEngine;
