//! Keyboard input tracking
//!
//! Browser key events arrive between frames. Movement keys are level
//! triggered (held), reset is edge triggered (went down since the last
//! frame). Key auto-repeat never produces a second edge.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::sim::TickInput;

/// Logical game inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Reset,
}

/// Key names (as reported by `KeyboardEvent.key`, lowercased) per action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub reset: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: vec!["a".into(), "arrowleft".into()],
            right: vec!["d".into(), "arrowright".into()],
            reset: vec!["r".into()],
        }
    }
}

impl KeyBindings {
    pub fn action_for(&self, key: &str) -> Option<Action> {
        let key = normalize_key(key);
        let bound = |keys: &[String]| keys.iter().any(|k| normalize_key(k) == key);
        if bound(&self.left[..]) {
            Some(Action::MoveLeft)
        } else if bound(&self.right[..]) {
            Some(Action::MoveRight)
        } else if bound(&self.reset[..]) {
            Some(Action::Reset)
        } else {
            None
        }
    }

    /// Same bindings with every key name in held-set form
    pub fn normalized(&self) -> Self {
        let norm = |keys: &[String]| keys.iter().map(|k| normalize_key(k)).collect();
        Self {
            left: norm(&self.left[..]),
            right: norm(&self.right[..]),
            reset: norm(&self.reset[..]),
        }
    }
}

/// Shift changes "a" into "A"; both must release the same key
fn normalize_key(key: &str) -> String {
    key.to_lowercase()
}

/// Held keys plus edges since the last frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    bindings: KeyBindings,
    held: HashSet<String>,
    reset_pressed: bool,
}

impl InputState {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings: bindings.normalized(),
            held: HashSet::new(),
            reset_pressed: false,
        }
    }

    /// Record a key going down. Returns the bound action, if any.
    pub fn key_down(&mut self, key: &str) -> Option<Action> {
        let action = self.bindings.action_for(key)?;
        let newly_down = self.held.insert(normalize_key(key));
        if newly_down && action == Action::Reset {
            self.reset_pressed = true;
        }
        Some(action)
    }

    /// Record a key going up. Returns the bound action, if any.
    pub fn key_up(&mut self, key: &str) -> Option<Action> {
        let action = self.bindings.action_for(key)?;
        self.held.remove(&normalize_key(key));
        Some(action)
    }

    /// Forget held keys (window lost focus; key-ups will never arrive)
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    pub fn is_held(&self, action: Action) -> bool {
        let keys = match action {
            Action::MoveLeft => &self.bindings.left,
            Action::MoveRight => &self.bindings.right,
            Action::Reset => &self.bindings.reset,
        };
        keys.iter().any(|k| self.held.contains(k))
    }

    /// Input for this frame's tick
    pub fn snapshot(&self) -> TickInput {
        TickInput {
            left: self.is_held(Action::MoveLeft),
            right: self.is_held(Action::MoveRight),
            reset: self.reset_pressed,
        }
    }

    /// Clear one-shot inputs after the frame's tick has consumed them
    pub fn end_frame(&mut self) {
        self.reset_pressed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_is_level_triggered() {
        let mut input = InputState::default();
        assert_eq!(input.key_down("a"), Some(Action::MoveLeft));

        for _ in 0..3 {
            assert!(input.snapshot().left);
            input.end_frame();
        }

        input.key_up("a");
        assert!(!input.snapshot().left);
    }

    #[test]
    fn test_reset_is_edge_triggered() {
        let mut input = InputState::default();
        input.key_down("r");
        assert!(input.snapshot().reset);
        input.end_frame();

        // Still held, and auto-repeat keydowns arrive: no new edge
        input.key_down("r");
        assert!(!input.snapshot().reset);

        input.key_up("r");
        input.key_down("r");
        assert!(input.snapshot().reset);
    }

    #[test]
    fn test_alternate_keys_and_case() {
        let mut input = InputState::default();
        input.key_down("ArrowRight");
        input.key_down("D");
        input.key_up("d");
        // ArrowRight still down
        assert!(input.snapshot().right);

        input.key_up("ArrowRight");
        assert!(!input.snapshot().right);
    }

    #[test]
    fn test_custom_bindings_match_any_case() {
        let bindings = KeyBindings {
            left: vec!["ArrowLeft".into()],
            right: vec!["L".into()],
            reset: vec!["Backspace".into()],
        };
        assert_eq!(bindings.action_for("arrowleft"), Some(Action::MoveLeft));

        let mut input = InputState::new(bindings);
        input.key_down("ArrowLeft");
        input.key_down("l");
        input.key_down("Backspace");
        let snap = input.snapshot();
        assert!(snap.left && snap.right && snap.reset);

        input.key_up("ARROWLEFT");
        assert!(!input.is_held(Action::MoveLeft));
    }

    #[test]
    fn test_unbound_keys_ignored() {
        let mut input = InputState::default();
        assert_eq!(input.key_down("q"), None);
        assert_eq!(input.snapshot(), TickInput::default());
    }

    #[test]
    fn test_release_all() {
        let mut input = InputState::default();
        input.key_down("a");
        input.key_down("d");
        input.release_all();
        let snap = input.snapshot();
        assert!(!snap.left && !snap.right);
    }
}
