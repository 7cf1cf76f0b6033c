//! Customizable keybindings for keyboard actions on the active range.

use std::fmt;

use serde::{Deserialize, Serialize};
use wavemark_input::{Key, Modifiers};

/// What a bound key does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Shift the active ranges left by the nudge step
    NudgeLeft,
    /// Shift the active ranges right by the nudge step
    NudgeRight,
    /// Remove the active ranges
    Delete,
    /// Play the samples under the active ranges
    Play,
    /// Center the view on the active range
    CenterView,
    /// Show the whole signal
    ResetView,
}

impl KeyAction {
    /// Get the display name for this action.
    pub fn name(&self) -> &'static str {
        match self {
            KeyAction::NudgeLeft => "Nudge left",
            KeyAction::NudgeRight => "Nudge right",
            KeyAction::Delete => "Delete",
            KeyAction::Play => "Play",
            KeyAction::CenterView => "Center view",
            KeyAction::ResetView => "Reset view",
        }
    }

    /// Get all actions.
    pub fn all() -> &'static [KeyAction] {
        &[
            KeyAction::NudgeLeft,
            KeyAction::NudgeRight,
            KeyAction::Delete,
            KeyAction::Play,
            KeyAction::CenterView,
            KeyAction::ResetView,
        ]
    }
}

/// A key plus whether shift must be held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding {
    pub key: Key,
    #[serde(default)]
    pub shift: bool,
}

impl KeyBinding {
    pub fn plain(key: Key) -> Self {
        Self { key, shift: false }
    }

    pub fn shifted(key: Key) -> Self {
        Self { key, shift: true }
    }

    /// Exact match: same key, same shift state, no other modifier held.
    pub fn matches(&self, key: Key, modifiers: Modifiers) -> bool {
        self.key == key
            && self.shift == modifiers.shift
            && !(modifiers.ctrl || modifiers.alt || modifiers.meta)
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.shift {
            write!(f, "Shift+{}", self.key)
        } else {
            write!(f, "{}", self.key)
        }
    }
}

/// Keybinding configuration for the annotator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub nudge_left: KeyBinding,
    pub nudge_right: KeyBinding,
    pub delete: KeyBinding,
    pub play: KeyBinding,
    pub center_view: KeyBinding,
    pub reset_view: KeyBinding,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            nudge_left: KeyBinding::shifted(Key::Left),
            nudge_right: KeyBinding::shifted(Key::Right),
            delete: KeyBinding::plain(Key::Delete),
            play: KeyBinding::plain(Key::Space),
            center_view: KeyBinding::plain(Key::Char('c')),
            reset_view: KeyBinding::plain(Key::Home),
        }
    }
}

impl KeyBindings {
    /// Create new keybindings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the action that corresponds to a key press, if any.
    pub fn action_for(&self, key: Key, modifiers: Modifiers) -> Option<KeyAction> {
        KeyAction::all()
            .iter()
            .copied()
            .find(|&action| self.binding_for(action).matches(key, modifiers))
    }

    /// Get the binding for an action.
    pub fn binding_for(&self, action: KeyAction) -> KeyBinding {
        match action {
            KeyAction::NudgeLeft => self.nudge_left,
            KeyAction::NudgeRight => self.nudge_right,
            KeyAction::Delete => self.delete,
            KeyAction::Play => self.play,
            KeyAction::CenterView => self.center_view,
            KeyAction::ResetView => self.reset_view,
        }
    }

    /// Rebind an action.
    pub fn set_binding(&mut self, action: KeyAction, binding: KeyBinding) {
        match action {
            KeyAction::NudgeLeft => self.nudge_left = binding,
            KeyAction::NudgeRight => self.nudge_right = binding,
            KeyAction::Delete => self.delete = binding,
            KeyAction::Play => self.play = binding,
            KeyAction::CenterView => self.center_view = binding,
            KeyAction::ResetView => self.reset_view = binding,
        }
    }

    /// Check if a binding is already used by another action.
    pub fn key_conflict(&self, binding: KeyBinding, exclude: Option<KeyAction>) -> Option<KeyAction> {
        KeyAction::all()
            .iter()
            .copied()
            .filter(|&action| Some(action) != exclude)
            .find(|&action| self.binding_for(action) == binding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let kb = KeyBindings::new();
        assert_eq!(
            kb.action_for(Key::Left, Modifiers::SHIFT),
            Some(KeyAction::NudgeLeft)
        );
        assert_eq!(
            kb.action_for(Key::Right, Modifiers::SHIFT),
            Some(KeyAction::NudgeRight)
        );
        assert_eq!(kb.action_for(Key::Delete, Modifiers::NONE), Some(KeyAction::Delete));
        assert_eq!(kb.action_for(Key::Space, Modifiers::NONE), Some(KeyAction::Play));
        assert_eq!(kb.action_for(Key::Home, Modifiers::NONE), Some(KeyAction::ResetView));
    }

    #[test]
    fn test_plain_arrows_are_unbound() {
        let kb = KeyBindings::new();
        assert_eq!(kb.action_for(Key::Left, Modifiers::NONE), None);
        assert_eq!(kb.action_for(Key::Right, Modifiers::NONE), None);
    }

    #[test]
    fn test_extra_modifiers_do_not_match() {
        let kb = KeyBindings::new();
        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        };
        assert_eq!(kb.action_for(Key::Delete, ctrl), None);
    }

    #[test]
    fn test_rebind_and_conflict() {
        let mut kb = KeyBindings::new();
        kb.set_binding(KeyAction::Delete, KeyBinding::plain(Key::Backspace));
        assert_eq!(kb.action_for(Key::Backspace, Modifiers::NONE), Some(KeyAction::Delete));
        assert_eq!(kb.action_for(Key::Delete, Modifiers::NONE), None);

        assert_eq!(
            kb.key_conflict(KeyBinding::plain(Key::Space), None),
            Some(KeyAction::Play)
        );
        assert_eq!(
            kb.key_conflict(KeyBinding::plain(Key::Space), Some(KeyAction::Play)),
            None
        );
    }

    #[test]
    fn test_binding_display() {
        assert_eq!(KeyBinding::shifted(Key::Left).to_string(), "Shift+Left");
        assert_eq!(KeyBinding::plain(Key::Char('c')).to_string(), "C");
    }
}
