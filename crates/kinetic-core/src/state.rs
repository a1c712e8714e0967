//! Viewer-side state shared by the web and native frontends.
//!
//! Nothing here touches a platform API; frontends feed pointer deltas and
//! frame times in and read matrices out.

use crate::constants::*;
use glam::{Mat4, Vec3};
use std::f32::consts::TAU;

/// Orbit camera around the origin: drag to rotate, scroll to zoom, no pan.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
    /// Spins the view slowly while no external controller is driving it.
    pub auto_rotate: bool,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: CAMERA_DISTANCE,
            aspect: 16.0 / 9.0,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
            auto_rotate: true,
        }
    }
}

impl OrbitCamera {
    pub fn new(aspect: f32) -> Self {
        let mut camera = Self::default();
        camera.set_aspect(aspect);
        camera
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// Eye position in world space. Yaw 0 and pitch 0 sit on +Z.
    pub fn eye(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(sy * cp, sp, cy * cp) * self.distance
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), Vec3::ZERO, Vec3::Y)
    }

    /// Rotate by a pointer drag in pixels.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * ORBIT_RADIANS_PER_PIXEL;
        let limit = CAMERA_MAX_PITCH_DEG.to_radians();
        self.pitch = (self.pitch + dy * ORBIT_RADIANS_PER_PIXEL).clamp(-limit, limit);
    }

    /// Positive `delta` (wheel down) moves away from the origin.
    pub fn zoom(&mut self, delta: f32) {
        if !delta.is_finite() {
            return;
        }
        let factor = (1.0 + delta * ZOOM_PER_WHEEL_UNIT).max(0.1);
        self.distance = (self.distance * factor).clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
    }

    /// Advance auto-rotation by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        if self.auto_rotate && dt > 0.0 {
            self.yaw += auto_rotate_rate() * dt;
        }
    }

    pub fn reset(&mut self) {
        let aspect = self.aspect;
        let auto_rotate = self.auto_rotate;
        *self = Self {
            aspect,
            auto_rotate,
            ..Self::default()
        };
    }
}

/// Radians per second for [`AUTO_ROTATE_SPEED`] (1.0 is one orbit a minute).
#[inline]
pub fn auto_rotate_rate() -> f32 {
    AUTO_ROTATE_SPEED * TAU / 60.0
}
