use winit::event::MouseScrollDelta;
use winit::keyboard::{Key, NamedKey};

/// Pixels per wheel line, matching the web build's line-mode conversion.
const WHEEL_LINE_PX: f32 = 16.0;

/// Name a winit key the way `KeyboardEvent.key` would, so both frontends
/// share one binding table.
pub fn dom_key_name(key: &Key) -> Option<&str> {
    match key {
        Key::Character(s) => Some(s.as_str()),
        Key::Named(NamedKey::ArrowUp) => Some("ArrowUp"),
        Key::Named(NamedKey::ArrowDown) => Some("ArrowDown"),
        Key::Named(NamedKey::ArrowLeft) => Some("ArrowLeft"),
        Key::Named(NamedKey::ArrowRight) => Some("ArrowRight"),
        Key::Named(NamedKey::Space) => Some(" "),
        _ => None,
    }
}

/// Wheel movement in pixels, positive away from the scene.
pub fn wheel_delta_px(delta: MouseScrollDelta) -> f32 {
    match delta {
        // winit reports scrolling up as positive
        MouseScrollDelta::LineDelta(_, y) => -y * WHEEL_LINE_PX,
        MouseScrollDelta::PixelDelta(p) => -p.y as f32,
    }
}

/// Left-button drag tracking in window pixels.
#[derive(Debug, Default)]
pub struct Drag {
    pressed: bool,
    last: Option<(f64, f64)>,
}

impl Drag {
    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }

    /// Record the cursor and return the movement since the last move while
    /// the button is held.
    pub fn cursor_moved(&mut self, x: f64, y: f64) -> Option<(f32, f32)> {
        let previous = self.last.replace((x, y));
        match (self.pressed, previous) {
            (true, Some((px, py))) => Some(((x - px) as f32, (y - py) as f32)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn keys_translate_to_dom_names() {
        assert_eq!(dom_key_name(&Key::Character("3".into())), Some("3"));
        assert_eq!(dom_key_name(&Key::Named(NamedKey::ArrowUp)), Some("ArrowUp"));
        assert_eq!(dom_key_name(&Key::Named(NamedKey::Space)), Some(" "));
        assert_eq!(dom_key_name(&Key::Named(NamedKey::Escape)), None);
    }

    #[test]
    fn wheel_up_zooms_in() {
        assert_eq!(wheel_delta_px(MouseScrollDelta::LineDelta(0.0, 1.0)), -16.0);
        assert_eq!(
            wheel_delta_px(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -40.0))),
            40.0
        );
    }

    #[test]
    fn drag_reports_deltas_only_while_pressed() {
        let mut drag = Drag::default();
        assert_eq!(drag.cursor_moved(10.0, 10.0), None);
        drag.set_pressed(true);
        assert_eq!(drag.cursor_moved(15.0, 8.0), Some((5.0, -2.0)));
        drag.set_pressed(false);
        assert_eq!(drag.cursor_moved(30.0, 30.0), None);
    }
}
