//! A single annotation page: elements, background, and undo history.

use super::background::BackgroundPattern;
use super::element::Element;
use super::history::{History, HistoryEntry, HistoryError};

/// An independent canvas with its own elements, background, and history.
///
/// Elements are stored in draw order (first = bottom layer, last = top layer).
/// Every change to the element sequence goes through [`History`], so the
/// sequence can always be rebuilt by replaying it.
#[derive(Debug, Clone)]
pub struct Page {
    elements: Vec<Element>,
    background: BackgroundPattern,
    history: History,
}

impl Default for Page {
    fn default() -> Self {
        Self::new(BackgroundPattern::default(), 0)
    }
}

impl Page {
    /// Creates an empty page. `history_capacity` of 0 means unbounded undo.
    pub fn new(background: BackgroundPattern, history_capacity: usize) -> Self {
        Self {
            elements: Vec::new(),
            background,
            history: History::new(history_capacity),
        }
    }

    /// Appends an element on top and records it in history.
    pub fn add_element(&mut self, element: Element) {
        let entry = HistoryEntry::Add(element);
        entry.apply(&mut self.elements);
        self.history.commit(entry);
    }

    /// Snapshots and removes all elements.
    ///
    /// Returns false (recording nothing) when the page is already empty.
    pub fn clear(&mut self) -> bool {
        if self.elements.is_empty() {
            return false;
        }
        let entry = HistoryEntry::Clear(self.elements.clone());
        entry.apply(&mut self.elements);
        self.history.commit(entry);
        true
    }

    /// Changes the background pattern. Not recorded in history.
    pub fn set_background(&mut self, pattern: BackgroundPattern) {
        self.background = pattern;
    }

    /// Reverses the most recent edit.
    pub fn undo(&mut self) -> Result<&HistoryEntry, HistoryError> {
        self.history.undo(&mut self.elements)
    }

    /// Re-applies the most recently undone edit.
    pub fn redo(&mut self) -> Result<&HistoryEntry, HistoryError> {
        self.history.redo(&mut self.elements)
    }

    /// Elements in draw order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn background(&self) -> BackgroundPattern {
        self.background
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}
