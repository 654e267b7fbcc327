//! State-change notifications fanned out to registered listeners.
//!
//! Listeners run synchronously, in registration order, on the thread that
//! issued the command. A listener must not call back into the engine.

use super::curtain::CurtainMode;
use super::mode::InteractionMode;
use super::tool::Tool;
use crate::draw::Color;
use crate::util::Rect;

/// Why the committed scene changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeReason {
    Committed,
    Undo,
    Redo,
    Cleared,
    PageAdded,
    PageSwitched,
    PageRemoved,
    BackgroundChanged,
}

/// Notification emitted by the engine after a command is processed.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// The in-progress element moved, started, or was discarded.
    PreviewChanged {
        /// Area to repaint (old and new preview bounds), if known
        damage: Option<Rect>,
    },
    /// Committed state changed; emitted exactly once per successful mutation.
    SceneChanged {
        reason: ChangeReason,
        page_index: usize,
        page_count: usize,
        can_undo: bool,
        can_redo: bool,
    },
    /// Tool, color, or thickness changed.
    StyleChanged {
        tool: Tool,
        color: Color,
        thickness: f64,
    },
    ModeChanged(InteractionMode),
    /// Curtain mode, reveal area, or spotlight changed.
    CurtainChanged(CurtainMode),
}

/// Handle returned by [`Listeners::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&EngineEvent)>;

/// Ordered observer registry.
#[derive(Default)]
pub struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Listener)>,
}

impl Listeners {
    pub fn subscribe(&mut self, listener: impl FnMut(&EngineEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener; returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn emit(&mut self, event: &EngineEvent) {
        log::trace!("emit {:?}", event);
        for (_, listener) in &mut self.entries {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn listeners_run_in_registration_order_until_unsubscribed() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::default();

        let first = {
            let seen = Rc::clone(&seen);
            listeners.subscribe(move |_| seen.borrow_mut().push("first"))
        };
        {
            let seen = Rc::clone(&seen);
            listeners.subscribe(move |_| seen.borrow_mut().push("second"));
        }

        let event = EngineEvent::ModeChanged(InteractionMode::Draw);
        listeners.emit(&event);
        assert!(listeners.unsubscribe(first));
        assert!(!listeners.unsubscribe(first));
        listeners.emit(&event);

        assert_eq!(*seen.borrow(), vec!["first", "second", "second"]);
        assert_eq!(listeners.len(), 1);
    }
}
