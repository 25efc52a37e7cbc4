//! Highlight state machine
//!
//! Hovering a path highlights it, leaving removes the highlight again, and a click
//! pins a path so the highlight survives leaving. At most one path is pinned; a
//! different path may be hovered while one is pinned.

use std::mem;

use crate::identify::PathIdentifier;

/// Pointer interaction with a rendered path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerEvent {
    Enter(PathIdentifier),
    Leave(PathIdentifier),
    Click(PathIdentifier),
}

/// Current highlight of a workspace
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HighlightState {
    #[default]
    Idle,
    Hovering(PathIdentifier),
    Pinned {
        id: PathIdentifier,
        /// Another path under the pointer while `id` is pinned
        hovering: Option<PathIdentifier>,
    },
}

/// Identifiers whose highlight changed in a transition
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HighlightChange {
    pub added: Vec<PathIdentifier>,
    pub removed: Vec<PathIdentifier>,
}

impl HighlightChange {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

impl HighlightState {
    /// Identifiers currently highlighted, pinned first
    pub fn highlighted(&self) -> Vec<&PathIdentifier> {
        match self {
            HighlightState::Idle => vec![],
            HighlightState::Hovering(id) => vec![id],
            HighlightState::Pinned { id, hovering } => {
                std::iter::once(id).chain(hovering.iter()).collect()
            }
        }
    }

    pub fn is_highlighted(&self, id: &PathIdentifier) -> bool {
        self.highlighted().contains(&id)
    }

    pub fn pinned(&self) -> Option<&PathIdentifier> {
        match self {
            HighlightState::Pinned { id, .. } => Some(id),
            _ => None,
        }
    }

    /// Apply a pointer event and report what changed
    pub fn apply(&mut self, event: PointerEvent) -> HighlightChange {
        let before: Vec<PathIdentifier> = self.highlighted().into_iter().cloned().collect();
        *self = transition(mem::take(self), event);
        let after: Vec<PathIdentifier> = self.highlighted().into_iter().cloned().collect();

        HighlightChange {
            added: after.iter().filter(|id| !before.contains(id)).cloned().collect(),
            removed: before.into_iter().filter(|id| !after.contains(id)).collect(),
        }
    }

    pub fn enter(&mut self, id: PathIdentifier) -> HighlightChange {
        self.apply(PointerEvent::Enter(id))
    }

    pub fn leave(&mut self, id: PathIdentifier) -> HighlightChange {
        self.apply(PointerEvent::Leave(id))
    }

    pub fn click(&mut self, id: PathIdentifier) -> HighlightChange {
        self.apply(PointerEvent::Click(id))
    }

    /// Drop every highlight, pinned or not
    pub fn reset(&mut self) -> HighlightChange {
        let removed = self.highlighted().into_iter().cloned().collect();
        *self = HighlightState::Idle;
        HighlightChange {
            added: vec![],
            removed,
        }
    }
}

fn transition(state: HighlightState, event: PointerEvent) -> HighlightState {
    use HighlightState::*;
    use PointerEvent::*;

    match (state, event) {
        (Idle, Enter(x)) => Hovering(x),
        (Idle, Leave(_)) => Idle,
        (Idle | Hovering(_), Click(x)) => Pinned {
            id: x,
            hovering: None,
        },
        (Hovering(_), Enter(x)) => Hovering(x),
        (Hovering(h), Leave(x)) if h == x => Idle,
        (Hovering(h), Leave(_)) => Hovering(h),
        (Pinned { id, .. }, Enter(x)) if id == x => Pinned { id, hovering: None },
        (Pinned { id, .. }, Enter(x)) => Pinned {
            id,
            hovering: Some(x),
        },
        (Pinned { id, hovering }, Leave(x)) => Pinned {
            id,
            hovering: hovering.filter(|h| *h != x),
        },
        // Clicking the pinned path unpins it and clears its highlight
        (Pinned { id, .. }, Click(x)) if id == x => Idle,
        (Pinned { .. }, Click(x)) => Pinned {
            id: x,
            hovering: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn id(s: &str) -> PathIdentifier {
        PathIdentifier::from(s)
    }

    fn ids(state: &HighlightState) -> Vec<&str> {
        state.highlighted().into_iter().map(|i| i.as_str()).collect()
    }

    #[test]
    fn test_hover_and_leave() {
        let mut state = HighlightState::default();
        let change = state.enter(id("a"));
        assert_eq!(change.added, vec![id("a")]);
        assert_eq!(state, HighlightState::Hovering(id("a")));

        let change = state.leave(id("a"));
        assert_eq!(change.removed, vec![id("a")]);
        assert_eq!(state, HighlightState::Idle);
    }

    #[test]
    fn test_leave_of_other_path_keeps_hover() {
        let mut state = HighlightState::Hovering(id("a"));
        assert!(state.leave(id("b")).is_empty());
        assert_eq!(ids(&state), vec!["a"]);
    }

    #[test]
    fn test_pinned_survives_leave() {
        let mut state = HighlightState::default();
        state.enter(id("a"));
        let change = state.click(id("a"));
        assert!(change.is_empty());
        assert!(state.leave(id("a")).is_empty());
        assert_eq!(state.pinned(), Some(&id("a")));
        assert!(state.is_highlighted(&id("a")));
    }

    #[test]
    fn test_click_pinned_unpins() {
        let mut state = HighlightState::default();
        state.click(id("a"));
        let change = state.click(id("a"));
        assert_eq!(change.removed, vec![id("a")]);
        assert_eq!(state, HighlightState::Idle);
    }

    #[test]
    fn test_click_other_repins_and_clears_previous() {
        let mut state = HighlightState::default();
        state.click(id("a"));
        state.enter(id("b"));
        assert_eq!(ids(&state), vec!["a", "b"]);

        let change = state.click(id("b"));
        assert_eq!(change.removed, vec![id("a")]);
        assert!(change.added.is_empty());
        assert_eq!(state.pinned(), Some(&id("b")));
        assert_eq!(ids(&state), vec!["b"]);
    }

    #[test]
    fn test_hover_while_pinned() {
        let mut state = HighlightState::default();
        state.click(id("a"));
        assert_eq!(state.enter(id("b")).added, vec![id("b")]);
        assert_eq!(state.leave(id("b")).removed, vec![id("b")]);
        assert_eq!(ids(&state), vec!["a"]);
    }

    #[test]
    fn test_reenter_pinned_does_not_duplicate() {
        let mut state = HighlightState::default();
        state.click(id("a"));
        assert!(state.enter(id("a")).is_empty());
        assert_eq!(ids(&state), vec!["a"]);
    }

    #[test]
    fn test_reset_clears_pin() {
        let mut state = HighlightState::default();
        state.click(id("a"));
        state.enter(id("b"));
        let change = state.reset();
        assert_eq!(change.removed, vec![id("a"), id("b")]);
        assert_eq!(state.pinned(), None);
        assert!(state.highlighted().is_empty());
    }
}
