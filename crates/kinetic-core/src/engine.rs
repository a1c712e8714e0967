//! The particle engine ties the pieces together: one cloud, one smoother, an
//! optional audio level and a seeded generator, advanced once per frame.

use crate::animator::{self, CloudRotation, FrameInputs, PositionSink};
use crate::audio::AudioLevel;
use crate::cloud::PointCloud;
use crate::color::Rgb;
use crate::config::EngineParams;
use crate::shape::ShapeKind;
use crate::smoother::{ExpansionHandle, ExpansionSmoother};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// What a frame used and produced, besides the positions.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameReport {
    pub rotation: CloudRotation,
    pub expansion: f32,
    /// 0 when no audio source is attached.
    pub audio: f32,
}

pub struct ParticleEngine {
    shape: ShapeKind,
    count: usize,
    cloud: PointCloud,
    smoother: ExpansionSmoother,
    audio: Option<AudioLevel>,
    color: Rgb,
    rng: StdRng,
}

impl ParticleEngine {
    pub fn new(params: &EngineParams) -> Self {
        let mut rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let shape = params.initial_shape;
        let count = params.particle_count;
        let cloud = PointCloud::generate(shape, count, &mut rng);
        log::info!("[engine] {} particles, starting as {}", count, shape.label());
        Self {
            shape,
            count,
            cloud,
            smoother: ExpansionSmoother::new(params.smoothing_gain),
            audio: None,
            color: params.color,
            rng,
        }
    }

    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    pub fn cloud(&self) -> &PointCloud {
        &self.cloud
    }

    pub fn particle_count(&self) -> usize {
        self.count
    }

    /// Switch to `kind`, regenerating the cloud. Returns `false` and keeps
    /// the current cloud when `kind` is already active.
    pub fn set_shape(&mut self, kind: ShapeKind) -> bool {
        if kind == self.shape {
            return false;
        }
        self.shape = kind;
        self.regenerate();
        true
    }

    /// Draw a fresh cloud for the current shape.
    pub fn regenerate(&mut self) {
        self.cloud = PointCloud::generate(self.shape, self.count, &mut self.rng);
    }

    pub fn expansion_handle(&self) -> ExpansionHandle {
        self.smoother.handle()
    }

    pub fn set_expansion_target(&self, value: f32) {
        self.smoother.set_target(value);
    }

    pub fn expansion(&self) -> f32 {
        self.smoother.current()
    }

    pub fn attach_audio(&mut self, level: AudioLevel) {
        self.audio = Some(level);
    }

    pub fn detach_audio(&mut self) {
        self.audio = None;
    }

    pub fn has_audio(&self) -> bool {
        self.audio.is_some()
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Advance one frame: tick the smoother once, sample the audio level and
    /// write every particle into `sink`.
    pub fn frame<S: PositionSink + ?Sized>(&mut self, time: f32, sink: &mut S) -> FrameReport {
        let expansion = self.smoother.tick();
        let audio = self.audio.as_ref().map(AudioLevel::get);
        let inputs = FrameInputs {
            time,
            expansion,
            audio,
        };
        let rotation = animator::animate(&self.cloud, &inputs, sink);
        FrameReport {
            rotation,
            expansion,
            audio: inputs.audio_level(),
        }
    }
}

/// Shared run flag for a host render loop.
#[derive(Clone, Debug)]
pub struct LoopControl(Arc<AtomicBool>);

impl Default for LoopControl {
    fn default() -> Self {
        Self::new()
    }
}

impl LoopControl {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    /// Ask the loop to stop; it issues no further frames once it sees this.
    pub fn stop(&self) {
        if self.0.swap(false, Ordering::AcqRel) {
            log::info!("[loop] stop requested");
        }
    }

    pub fn is_running(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn seeded(shape: ShapeKind) -> ParticleEngine {
        let params = EngineParams {
            particle_count: 64,
            seed: Some(7),
            initial_shape: shape,
            ..Default::default()
        };
        ParticleEngine::new(&params)
    }

    #[test]
    fn frame_ticks_smoother_once() {
        let mut engine = seeded(ShapeKind::Heart);
        engine.set_expansion_target(1.0);
        let mut out = vec![Vec3::ZERO; 64];
        let r = engine.frame(0.0, out.as_mut_slice());
        assert!((r.expansion - 0.1).abs() < 1e-6);
        let r = engine.frame(0.016, out.as_mut_slice());
        assert!((r.expansion - 0.19).abs() < 1e-6);
    }

    #[test]
    fn audio_is_zero_until_attached() {
        let mut engine = seeded(ShapeKind::Cube);
        let mut out: Vec<Vec3> = Vec::new();
        assert!(!engine.has_audio());
        assert_eq!(engine.frame(1.0, &mut out).audio, 0.0);
        assert_eq!(out.len(), 64);

        let level = AudioLevel::new();
        let mut meter = crate::audio::AudioMeter::new(level.clone());
        meter.update_from_bytes(&[255; 16]);
        engine.attach_audio(level);
        assert!(engine.has_audio());
        assert!(engine.frame(1.0, &mut out).audio > 0.0);
        engine.detach_audio();
        assert!(!engine.has_audio());
        assert_eq!(engine.frame(1.0, &mut out).audio, 0.0);
    }

    #[test]
    fn growable_sinks_fill_to_the_particle_count() {
        let mut engine = seeded(ShapeKind::Dna);
        assert_eq!(engine.particle_count(), 64);

        let mut points: Vec<Vec3> = Vec::new();
        engine.frame(0.5, &mut points);
        assert_eq!(points.len(), engine.particle_count());

        let mut instances: Vec<crate::gpu::ParticleInstance> = Vec::new();
        engine.frame(0.5, &mut instances);
        assert_eq!(instances.len(), engine.particle_count());
        assert!(instances.iter().all(|p| p.position.iter().all(|c| c.is_finite())));
    }

    #[test]
    fn loop_control_is_shared_between_clones() {
        let control = LoopControl::new();
        let other = control.clone();
        assert!(other.is_running());
        control.stop();
        control.stop();
        assert!(!other.is_running());
    }
}
