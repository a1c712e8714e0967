use glam::Vec3;

// Shared tuning constants used by the core and both frontends.

// Particle budget
pub const PARTICLE_COUNT: usize = 4000;
pub const MAX_PARTICLE_COUNT: usize = 100_000;

// Expansion smoothing (fraction of the remaining distance covered per tick)
pub const EXPANSION_SMOOTHING_GAIN: f32 = 0.1;

// Audio level smoothing and normalization
pub const AUDIO_SMOOTHING_GAIN: f32 = 0.2;
pub const AUDIO_BYTE_NORMALIZER: f32 = 128.0; // mean byte bin / this ~= 0..1
pub const ANALYSER_FFT_SIZE: usize = 256;
pub const ANALYSER_SMOOTHING: f32 = 0.8; // WebAudio smoothingTimeConstant
pub const ANALYSER_MIN_DB: f32 = -100.0;
pub const ANALYSER_MAX_DB: f32 = -30.0;

// Per-frame animation
pub const ORIGIN_EPSILON: f32 = 0.001; // guards the radial direction at the origin
pub const EXPANSION_SCALE: f32 = 2.5;
pub const AUDIO_SCALE: f32 = 1.5;
pub const BREATHE_RATE: f32 = 2.0;
pub const BREATHE_AMPLITUDE: f32 = 0.1;
pub const CHAOS_CALM: f32 = 0.5;
pub const CHAOS_EXPLOSIVE: f32 = 5.0; // FIREWORKS only
pub const AUDIO_JITTER: f32 = 0.2;

// Whole-cloud rotation
pub const SPIN_BASE: f32 = 0.1;
pub const SPIN_BOOST: f32 = 0.2; // GALAXY and BLACKHOLE
pub const SPIN_AUDIO: f32 = 0.5;
pub const DNA_WOBBLE_RATE: f32 = 0.5;
pub const DNA_WOBBLE_AMPLITUDE: f32 = 0.2;

// Scene
pub const CAMERA_DISTANCE: f32 = 6.0;
pub const CAMERA_FOVY_DEG: f32 = 60.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;
pub const CAMERA_MIN_DISTANCE: f32 = 2.0;
pub const CAMERA_MAX_DISTANCE: f32 = 40.0;
pub const CAMERA_MAX_PITCH_DEG: f32 = 85.0;
pub const ORBIT_RADIANS_PER_PIXEL: f32 = 0.005;
pub const ZOOM_PER_WHEEL_UNIT: f32 = 0.001; // fractional distance change per wheel delta
pub const AUTO_ROTATE_SPEED: f32 = 0.5; // 1.0 = one orbit per minute

pub const POINT_SIZE: f32 = 0.06; // world units
pub const POINT_OPACITY: f32 = 0.85;
pub const STAR_COUNT: usize = 5000;
pub const STAR_RADIUS: f32 = 100.0;
pub const STAR_DEPTH: f32 = 50.0;
pub const STAR_SIZE: f32 = 0.35;
pub const STAR_OPACITY: f32 = 0.7;

pub const BACKGROUND_RGB: [f32; 3] = [0.02, 0.02, 0.02]; // #050505
pub const INITIAL_COLOR_HEX: &str = "#4f46e5"; // indigo-600

#[inline]
pub fn camera_home() -> Vec3 {
    Vec3::new(0.0, 0.0, CAMERA_DISTANCE)
}
