//! Per-page undo/redo history.
//!
//! Every reversible edit is recorded as a [`HistoryEntry`] that carries enough
//! data to compute its own inverse. [`History`] keeps two linear stacks; a
//! fresh commit discards the redo stack (no branching).
//!
//! With a bounded capacity the oldest entry is evicted on overflow. Its effect
//! is folded into a baseline so that the visible element sequence always
//! equals the baseline with every remaining undo entry replayed on top.

use super::element::{Element, ElementId};
use std::collections::VecDeque;
use thiserror::Error;

/// Failure modes for undo/redo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HistoryError {
    /// The relevant stack is empty
    #[error("nothing to {0}")]
    NoOp(HistoryDirection),
}

/// Which way through history an operation moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryDirection {
    Undo,
    Redo,
}

impl std::fmt::Display for HistoryDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryDirection::Undo => f.write_str("undo"),
            HistoryDirection::Redo => f.write_str("redo"),
        }
    }
}

/// A reversible edit to a page's element sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryEntry {
    /// An element was appended on top
    Add(Element),
    /// The page was emptied; holds the elements that were visible before
    Clear(Vec<Element>),
}

impl HistoryEntry {
    /// Applies the forward effect of this entry.
    pub fn apply(&self, elements: &mut Vec<Element>) {
        match self {
            HistoryEntry::Add(element) => elements.push(element.clone()),
            HistoryEntry::Clear(_) => elements.clear(),
        }
    }

    /// Applies the inverse of this entry.
    ///
    /// Only valid when this entry is the most recent one applied to
    /// `elements`.
    pub fn revert(&self, elements: &mut Vec<Element>) {
        match self {
            HistoryEntry::Add(element) => {
                let removed = remove_by_id(elements, element.id);
                debug_assert!(removed, "reverted element {} is not on the page", element.id);
            }
            HistoryEntry::Clear(snapshot) => {
                debug_assert!(elements.is_empty(), "clear reverted onto a non-empty page");
                *elements = snapshot.clone();
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HistoryEntry::Add(_) => "add",
            HistoryEntry::Clear(_) => "clear",
        }
    }
}

fn remove_by_id(elements: &mut Vec<Element>, id: ElementId) -> bool {
    match elements.iter().rposition(|element| element.id == id) {
        Some(index) => {
            elements.remove(index);
            true
        }
        None => false,
    }
}

/// Bounded pair of undo/redo stacks for a single page.
#[derive(Debug, Clone, Default)]
pub struct History {
    /// Most recent entry last
    undo: VecDeque<HistoryEntry>,
    /// Most recently undone entry last
    redo: Vec<HistoryEntry>,
    /// Elements made permanent by eviction
    baseline: Vec<Element>,
    /// Maximum undo depth (0 = unbounded)
    capacity: usize,
}

impl History {
    /// Creates an empty history holding at most `capacity` undo entries.
    ///
    /// A capacity of 0 means unbounded.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Records an entry whose effect has already been applied.
    ///
    /// Clears the redo stack. On overflow the oldest undo entry is dropped
    /// silently and its effect becomes permanent.
    pub fn commit(&mut self, entry: HistoryEntry) {
        self.redo.clear();
        self.undo.push_back(entry);

        if self.capacity > 0 {
            while self.undo.len() > self.capacity {
                if let Some(evicted) = self.undo.pop_front() {
                    log::trace!("History full; making oldest {} permanent", evicted.label());
                    evicted.apply(&mut self.baseline);
                }
            }
        }
    }

    /// Reverses the most recent entry on `elements`.
    pub fn undo(&mut self, elements: &mut Vec<Element>) -> Result<&HistoryEntry, HistoryError> {
        let entry = self
            .undo
            .pop_back()
            .ok_or(HistoryError::NoOp(HistoryDirection::Undo))?;
        entry.revert(elements);
        self.redo.push(entry);
        Ok(&self.redo[self.redo.len() - 1])
    }

    /// Re-applies the most recently undone entry on `elements`.
    pub fn redo(&mut self, elements: &mut Vec<Element>) -> Result<&HistoryEntry, HistoryError> {
        let entry = self
            .redo
            .pop()
            .ok_or(HistoryError::NoOp(HistoryDirection::Redo))?;
        entry.apply(elements);
        self.undo.push_back(entry);
        Ok(&self.undo[self.undo.len() - 1])
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Rebuilds the element sequence from the baseline and the undo stack.
    pub fn replay(&self) -> Vec<Element> {
        let mut elements = self.baseline.clone();
        for entry in &self.undo {
            entry.apply(&mut elements);
        }
        elements
    }
}
