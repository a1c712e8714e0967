pub mod animator;
pub mod audio;
pub mod cloud;
pub mod color;
pub mod config;
pub mod constants;
pub mod controls;
pub mod engine;
pub mod error;
pub mod gpu;
#[cfg(feature = "render")]
pub mod render;
pub mod sampler;
pub mod shape;
pub mod smoother;
pub mod state;

pub static PARTICLES_WGSL: &str = include_str!("../shaders/particles.wgsl");

pub use animator::{animate, CloudRotation, FrameInputs, PositionSink};
pub use audio::{AudioLevel, AudioMeter, ByteSpectrum};
pub use cloud::{starfield, PointCloud};
pub use color::Rgb;
pub use config::EngineParams;
pub use constants::*;
pub use engine::{FrameReport, LoopControl, ParticleEngine};
pub use error::KineticError;
pub use gpu::{model_matrix, ParticleInstance, SceneUniforms};
#[cfg(feature = "render")]
pub use render::PointRenderer;
pub use shape::ShapeKind;
pub use smoother::{ExpansionHandle, ExpansionSmoother, SharedScalar};
pub use state::OrbitCamera;
