//! Key bindings shared by the frontends.
//!
//! Keys are named the way `KeyboardEvent.key` names them; the native shell
//! translates winit keys into the same strings.

use crate::shape::ShapeKind;

/// What a key press asks the app to do.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum KeyAction {
    SelectShape(ShapeKind),
    /// Add to the expansion target (clamped downstream).
    NudgeExpansion(f32),
    ToggleAudio,
    ToggleOverlay,
    ToggleAutoRotate,
    Regenerate,
    ResetCamera,
}

/// Map a `KeyboardEvent.key` value to an action. `step` is the expansion
/// change for the arrow keys.
#[inline]
pub fn action_for_key(key: &str, step: f32) -> Option<KeyAction> {
    if let [digit @ b'1'..=b'9'] = key.as_bytes() {
        return ShapeKind::from_hotkey(digit - b'0').map(KeyAction::SelectShape);
    }
    match key {
        "ArrowUp" | "ArrowRight" | "+" | "=" => Some(KeyAction::NudgeExpansion(step)),
        "ArrowDown" | "ArrowLeft" | "-" | "_" => Some(KeyAction::NudgeExpansion(-step)),
        "m" | "M" => Some(KeyAction::ToggleAudio),
        "h" | "H" => Some(KeyAction::ToggleOverlay),
        " " => Some(KeyAction::ToggleAutoRotate),
        "r" | "R" => Some(KeyAction::Regenerate),
        "c" | "C" => Some(KeyAction::ResetCamera),
        _ => None,
    }
}

/// Expansion target after applying a nudge to `current`.
#[inline]
pub fn nudged(current: f32, delta: f32) -> f32 {
    (current + delta).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_select_shapes_in_order() {
        for (i, kind) in ShapeKind::ALL.iter().enumerate() {
            let key = (i + 1).to_string();
            assert_eq!(action_for_key(&key, 0.1), Some(KeyAction::SelectShape(*kind)));
        }
        assert_eq!(action_for_key("0", 0.1), None);
        assert_eq!(action_for_key("10", 0.1), None);
    }

    #[test]
    fn arrows_nudge_expansion_both_ways() {
        assert_eq!(action_for_key("ArrowUp", 0.1), Some(KeyAction::NudgeExpansion(0.1)));
        assert_eq!(
            action_for_key("ArrowRight", 0.25),
            Some(KeyAction::NudgeExpansion(0.25))
        );
        assert_eq!(action_for_key("ArrowDown", 0.1), Some(KeyAction::NudgeExpansion(-0.1)));
        assert_eq!(action_for_key("-", 0.1), Some(KeyAction::NudgeExpansion(-0.1)));
    }

    #[test]
    fn letter_keys_are_case_insensitive() {
        for (lower, upper, action) in [
            ("m", "M", KeyAction::ToggleAudio),
            ("h", "H", KeyAction::ToggleOverlay),
            ("r", "R", KeyAction::Regenerate),
            ("c", "C", KeyAction::ResetCamera),
        ] {
            assert_eq!(action_for_key(lower, 0.1), Some(action));
            assert_eq!(action_for_key(upper, 0.1), Some(action));
        }
        assert_eq!(action_for_key(" ", 0.1), Some(KeyAction::ToggleAutoRotate));
        assert_eq!(action_for_key("q", 0.1), None);
        assert_eq!(action_for_key("", 0.1), None);
    }

    #[test]
    fn nudged_stays_in_unit_range() {
        assert!((nudged(0.5, 0.1) - 0.6).abs() < 1e-6);
        assert_eq!(nudged(0.95, 0.1), 1.0);
        assert_eq!(nudged(0.05, -0.1), 0.0);
    }
}
