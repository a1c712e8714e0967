use crate::constants::{STAR_DEPTH, STAR_RADIUS};
use crate::sampler;
use crate::shape::ShapeKind;
use glam::Vec3;
use rand::Rng;

/// Base positions and noise axes for one shape-generation epoch.
///
/// `targets` and `drifts` are parallel arrays; index `i` is particle `i`.
/// A cloud is never edited in place: changing shape builds a new one.
#[derive(Clone, Debug)]
pub struct PointCloud {
    kind: ShapeKind,
    targets: Vec<Vec3>,
    drifts: Vec<Vec3>,
}

impl PointCloud {
    pub fn generate<R: Rng + ?Sized>(kind: ShapeKind, count: usize, rng: &mut R) -> Self {
        let mut targets = Vec::with_capacity(count);
        let mut drifts = Vec::with_capacity(count);
        for _ in 0..count {
            targets.push(sampler::sample(kind, rng));
            drifts.push(Vec3::new(
                rng.gen::<f32>() - 0.5,
                rng.gen::<f32>() - 0.5,
                rng.gen::<f32>() - 0.5,
            ));
        }
        log::debug!("[cloud] generated {} points for {}", count, kind);
        Self {
            kind,
            targets,
            drifts,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn targets(&self) -> &[Vec3] {
        &self.targets
    }

    pub fn drifts(&self) -> &[Vec3] {
        &self.drifts
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Background stars on a thick shell `[STAR_RADIUS, STAR_RADIUS + STAR_DEPTH)`.
pub fn starfield<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Vec3> {
    (0..count)
        .map(|_| {
            let r = STAR_RADIUS + rng.gen::<f32>() * STAR_DEPTH;
            sampler::sphere_shell(rng, r)
        })
        .collect()
}
