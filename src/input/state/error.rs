use crate::draw::{HistoryDirection, HistoryError};
use thiserror::Error;

/// Expected boundary conditions that leave the engine untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoOpReason {
    /// pointer-down while a session is already in progress
    SessionActive,
    /// pointer-move/up or cancel with no session
    NoSession,
    /// pointer event while in pass-through mode
    PassThrough,
    NothingToUndo,
    NothingToRedo,
    AtFirstPage,
    AtLastPage,
    PageOutOfRange(usize),
    AlreadyOnPage,
    OnlyPage,
    PageEmpty,
    PaletteIndex(usize),
    /// spotlight command while the curtain is not in spotlight mode
    NoSpotlight,
    /// Requested value equals the current one
    Unchanged,
}

impl std::fmt::Display for NoOpReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoOpReason::SessionActive => f.write_str("a pointer session is already active"),
            NoOpReason::NoSession => f.write_str("no pointer session is active"),
            NoOpReason::PassThrough => f.write_str("pointer input is passed through"),
            NoOpReason::NothingToUndo => f.write_str("nothing to undo"),
            NoOpReason::NothingToRedo => f.write_str("nothing to redo"),
            NoOpReason::AtFirstPage => f.write_str("already on the first page"),
            NoOpReason::AtLastPage => f.write_str("already on the last page"),
            NoOpReason::PageOutOfRange(index) => write!(f, "page {index} does not exist"),
            NoOpReason::AlreadyOnPage => f.write_str("page is already active"),
            NoOpReason::OnlyPage => f.write_str("cannot remove the only page"),
            NoOpReason::PageEmpty => f.write_str("page is already empty"),
            NoOpReason::PaletteIndex(index) => write!(f, "palette has no entry {index}"),
            NoOpReason::NoSpotlight => f.write_str("spotlight is not active"),
            NoOpReason::Unchanged => f.write_str("value unchanged"),
        }
    }
}

/// Errors returned by engine commands.
///
/// Only [`EngineError::NoOp`] is routine; input dispatch swallows it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("no-op: {0}")]
    NoOp(NoOpReason),

    /// A coordinate or size was not finite (or not positive, for images).
    /// The event is dropped; any active session continues.
    #[error("invalid geometry at ({x}, {y})")]
    InvalidGeometry { x: f64, y: f64 },

    #[error("invalid thickness {0}")]
    InvalidThickness(f64),

    #[error("invalid spotlight radius change {0}")]
    InvalidRadius(f64),

    /// The active page already holds the maximum number of elements.
    #[error("page element limit ({0}) reached")]
    ElementLimit(usize),
}

impl EngineError {
    pub fn is_noop(&self) -> bool {
        matches!(self, EngineError::NoOp(_))
    }
}

impl From<HistoryError> for EngineError {
    fn from(err: HistoryError) -> Self {
        match err {
            HistoryError::NoOp(HistoryDirection::Undo) => {
                EngineError::NoOp(NoOpReason::NothingToUndo)
            }
            HistoryError::NoOp(HistoryDirection::Redo) => {
                EngineError::NoOp(NoOpReason::NothingToRedo)
            }
        }
    }
}
