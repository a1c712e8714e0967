use glam::Vec2;

/// Pointer drag tracking for camera orbit. Pure so it can be tested on host.
#[derive(Default, Clone, Copy, Debug)]
pub struct DragState {
    pub active: bool,
    pub pointer_id: i32,
    pub last: Vec2,
}

impl DragState {
    pub fn begin(&mut self, pointer_id: i32, at: Vec2) {
        self.active = true;
        self.pointer_id = pointer_id;
        self.last = at;
    }

    /// Pixel delta since the previous move of the dragging pointer.
    pub fn move_to(&mut self, pointer_id: i32, at: Vec2) -> Option<Vec2> {
        if !self.active || pointer_id != self.pointer_id {
            return None;
        }
        let delta = at - self.last;
        self.last = at;
        Some(delta)
    }

    pub fn end(&mut self, pointer_id: i32) -> bool {
        if self.active && pointer_id == self.pointer_id {
            self.active = false;
            return true;
        }
        false
    }
}

/// Convert a `WheelEvent` delta to pixels. `mode` is `deltaMode`
/// (0 pixel, 1 line, 2 page).
#[inline]
pub fn wheel_delta_px(delta_y: f64, mode: u32, line_px: f32, page_px: f32) -> f32 {
    let d = delta_y as f32;
    match mode {
        1 => d * line_px,
        2 => d * page_px,
        _ => d,
    }
}

/// Width over height with a floor on the height.
#[inline]
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}

/// Expansion as the whole-percent "tension" shown in the HUD.
#[inline]
pub fn tension_percent(expansion: f32) -> u32 {
    (expansion.clamp(0.0, 1.0) * 100.0).round() as u32
}
