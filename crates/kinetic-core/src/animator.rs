//! Per-frame particle deformation.
//!
//! Every displayed position is a pure function of the cloud, the particle
//! index and this frame's scalar inputs. Nothing carries over between frames.

use crate::cloud::PointCloud;
use crate::constants::*;
use crate::shape::ShapeKind;
use glam::Vec3;

/// Live scalar inputs for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInputs {
    /// Seconds since the animation started.
    pub time: f32,
    /// Smoothed expansion in \[0, 1\].
    pub expansion: f32,
    /// Audio energy, `None` when no audio source is wired in.
    pub audio: Option<f32>,
}

impl FrameInputs {
    #[inline]
    pub fn audio_level(&self) -> f32 {
        self.audio.unwrap_or(0.0)
    }
}

/// Rotation of the whole cloud, in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CloudRotation {
    pub y: f32,
    pub z: f32,
}

/// Receives the positions computed for a frame.
pub trait PositionSink {
    fn write_position(&mut self, index: usize, position: Vec3);
}

impl PositionSink for [Vec3] {
    #[inline]
    fn write_position(&mut self, index: usize, position: Vec3) {
        if let Some(slot) = self.get_mut(index) {
            *slot = position;
        }
    }
}

impl PositionSink for Vec<Vec3> {
    #[inline]
    fn write_position(&mut self, index: usize, position: Vec3) {
        if index >= self.len() {
            self.resize(index + 1, Vec3::ZERO);
        }
        self[index] = position;
    }
}

/// Flat `xyzxyz...` buffer, the layout of a GPU position attribute.
impl PositionSink for [f32] {
    #[inline]
    fn write_position(&mut self, index: usize, position: Vec3) {
        let base = index * 3;
        if let Some(slot) = self.get_mut(base..base + 3) {
            slot.copy_from_slice(&position.to_array());
        }
    }
}

#[inline]
pub fn radial_scale(expansion: f32, audio: f32) -> f32 {
    1.0 + expansion * EXPANSION_SCALE + audio * AUDIO_SCALE
}

/// Per-particle idle oscillation; the index offsets the phase.
#[inline]
pub fn breathe(time: f32, index: usize) -> f32 {
    (time * BREATHE_RATE + index as f32).sin() * BREATHE_AMPLITUDE
}

#[inline]
pub fn chaos(kind: ShapeKind, expansion: f32) -> f32 {
    expansion * kind.chaos_gain()
}

#[inline]
pub fn jitter(audio: f32) -> f32 {
    audio * AUDIO_JITTER
}

/// Displayed position of particle `index` for this frame.
pub fn particle_position(
    kind: ShapeKind,
    target: Vec3,
    drift: Vec3,
    index: usize,
    inputs: &FrameInputs,
) -> Vec3 {
    let audio = inputs.audio_level();
    let dist = target.length() + ORIGIN_EPSILON;
    let dir = target / dist;
    let scale = radial_scale(inputs.expansion, audio);
    let noise = chaos(kind, inputs.expansion) + jitter(audio);
    target * scale + drift * noise + dir * breathe(inputs.time, index)
}

pub fn rotation(kind: ShapeKind, inputs: &FrameInputs) -> CloudRotation {
    let speed = SPIN_BASE + kind.spin_boost() + inputs.audio_level() * SPIN_AUDIO;
    let y = inputs.time * speed * (1.0 + inputs.expansion);
    let z = match kind {
        ShapeKind::Dna => (inputs.time * DNA_WOBBLE_RATE).sin() * DNA_WOBBLE_AMPLITUDE,
        _ => 0.0,
    };
    CloudRotation { y, z }
}

/// Write every particle of `cloud` into `sink` and return the cloud rotation.
pub fn animate<S: PositionSink + ?Sized>(
    cloud: &PointCloud,
    inputs: &FrameInputs,
    sink: &mut S,
) -> CloudRotation {
    let kind = cloud.kind();
    for (i, (target, drift)) in cloud.targets().iter().zip(cloud.drifts()).enumerate() {
        sink.write_position(i, particle_position(kind, *target, *drift, i, inputs));
    }
    rotation(kind, inputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn silence_and_rest_leave_only_breathing() {
        let target = Vec3::new(1.0, 2.0, -0.5);
        let drift = Vec3::new(0.4, -0.3, 0.2);
        let inputs = FrameInputs::default();
        for i in [0usize, 1, 7, 3999] {
            let dir = target / (target.length() + ORIGIN_EPSILON);
            let expected = target + dir * ((i as f32).sin() * 0.1);
            let got = particle_position(ShapeKind::Saturn, target, drift, i, &inputs);
            assert!(approx(got, expected), "i={i}: {got:?} vs {expected:?}");
        }
    }

    #[test]
    fn origin_target_does_not_produce_nan() {
        let inputs = FrameInputs {
            time: 3.0,
            expansion: 1.0,
            audio: Some(1.0),
        };
        let p = particle_position(ShapeKind::Fireworks, Vec3::ZERO, Vec3::splat(0.5), 4, &inputs);
        assert!(p.is_finite());
    }

    #[test]
    fn missing_audio_matches_zero_audio() {
        let target = Vec3::new(-1.0, 0.3, 2.0);
        let drift = Vec3::new(0.1, 0.2, -0.4);
        let silent = FrameInputs {
            time: 1.25,
            expansion: 0.4,
            audio: Some(0.0),
        };
        let absent = FrameInputs {
            audio: None,
            ..silent
        };
        assert_eq!(
            particle_position(ShapeKind::Galaxy, target, drift, 11, &silent),
            particle_position(ShapeKind::Galaxy, target, drift, 11, &absent)
        );
    }

    #[test]
    fn audio_inflates_and_jitters_along_drift() {
        let target = Vec3::new(0.0, 2.0, 0.0);
        let drift = Vec3::new(0.5, 0.0, 0.0);
        let inputs = FrameInputs {
            time: 0.0,
            expansion: 0.0,
            audio: Some(1.0),
        };
        let p = particle_position(ShapeKind::Heart, target, drift, 0, &inputs);
        // scale 2.5, jitter 0.2 along x, breathe sin(0) = 0
        assert!(approx(p, Vec3::new(0.1, 5.0, 0.0)), "{p:?}");
    }

    #[test]
    fn galaxy_rotation_is_exact() {
        let inputs = FrameInputs {
            time: 10.0,
            expansion: 0.5,
            audio: Some(0.0),
        };
        let r = rotation(ShapeKind::Galaxy, &inputs);
        assert!((r.y - 4.5).abs() < 1e-5, "{}", r.y);
        assert_eq!(r.z, 0.0);
    }

    #[test]
    fn only_dna_wobbles() {
        let inputs = FrameInputs {
            time: 2.0,
            ..Default::default()
        };
        let dna = rotation(ShapeKind::Dna, &inputs);
        assert!((dna.z - (1.0f32).sin() * 0.2).abs() < 1e-6);
        for kind in ShapeKind::ALL.into_iter().filter(|k| *k != ShapeKind::Dna) {
            assert_eq!(rotation(kind, &inputs).z, 0.0);
        }
    }

    #[test]
    fn flat_sink_writes_xyz_triplets() {
        let mut buf = vec![0.0f32; 6];
        buf.as_mut_slice()
            .write_position(1, Vec3::new(1.0, 2.0, 3.0));
        buf.as_mut_slice().write_position(2, Vec3::ONE);
        assert_eq!(buf, vec![0.0, 0.0, 0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn vec_sink_grows_on_demand() {
        let mut out: Vec<Vec3> = Vec::new();
        out.write_position(2, Vec3::X);
        assert_eq!(out, vec![Vec3::ZERO, Vec3::ZERO, Vec3::X]);
    }
}
