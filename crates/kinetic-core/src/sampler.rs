//! Per-shape point distributions.
//!
//! Every function draws uniforms from the supplied generator and returns one
//! point of the shape's characteristic distribution. Constants are tuning
//! values chosen for a camera sitting 6 units from the origin.

use crate::shape::ShapeKind;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::{PI, TAU};

const SPHERE_RADIUS: f32 = 2.0;

const HEART_THICKNESS: f32 = 4.0;
const HEART_SCALE: f32 = 0.1;

const ROSE_PETALS: f32 = 4.0;
const ROSE_DEPTH: f32 = 0.5;
const ROSE_SCALE: f32 = 2.5;

const SATURN_PLANET_PROBABILITY: f32 = 0.6;
const SATURN_PLANET_SCALE: f32 = 0.8;
const SATURN_RING_INNER: f32 = 2.5;
const SATURN_RING_WIDTH: f32 = 1.5;
const SATURN_RING_THICKNESS: f32 = 0.1;

const MEDITATE_BODY_PROBABILITY: f32 = 0.7;
const MEDITATE_BODY_HEIGHT: f32 = 2.0;
const MEDITATE_BODY_TAPER: f32 = 0.8;
const MEDITATE_BODY_BASE_Y: f32 = -1.5;
const MEDITATE_HEAD_RADIUS: f32 = 0.6;
const MEDITATE_HEAD_Y: f32 = 0.8;

const GALAXY_ARMS: u32 = 3;
const GALAXY_RADIUS: f32 = 4.0;
const GALAXY_WINDING: f32 = 3.0;
const GALAXY_NOISE: f32 = 0.15;

const BLACKHOLE_CORE_PROBABILITY: f32 = 0.03;
const BLACKHOLE_CORE_RADIUS: f32 = 0.4;
const BLACKHOLE_HORIZON: f32 = 1.2;
const BLACKHOLE_DISK_SPAN: f32 = 3.5;
const BLACKHOLE_FLARE: f32 = 0.1;

const DNA_HEIGHT: f32 = 8.0;
const DNA_RADIUS: f32 = 1.2;
const DNA_TWIST: f32 = 1.0;
const DNA_RUNG_PROBABILITY: f32 = 0.3;

const CUBE_HALF_SIZE: f32 = 1.5;

/// Draw one point for `kind`.
pub fn sample<R: Rng + ?Sized>(kind: ShapeKind, rng: &mut R) -> Vec3 {
    match kind {
        ShapeKind::Heart => heart(rng),
        ShapeKind::Flower => rose(rng),
        ShapeKind::Saturn => saturn(rng),
        ShapeKind::Meditate => meditate(rng),
        ShapeKind::Fireworks => solid_ball(rng),
        ShapeKind::Galaxy => galaxy(rng),
        ShapeKind::BlackHole => black_hole(rng),
        ShapeKind::Dna => dna(rng),
        ShapeKind::Cube => cube(rng),
    }
}

#[inline]
fn unit<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen::<f32>()
}

#[inline]
fn centered<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen::<f32>() - 0.5
}

/// Uniform direction on a sphere of the given radius.
pub fn sphere_shell<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
    let theta = unit(rng) * TAU;
    let phi = (2.0 * unit(rng) - 1.0).clamp(-1.0, 1.0).acos();
    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.sin() * theta.sin(),
        radius * phi.cos(),
    )
}

/// Flat heart outline with a thin random depth.
pub fn heart<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let t = unit(rng) * TAU;
    let p = centered(rng);
    let x = 16.0 * t.sin().powi(3);
    let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
    Vec3::new(x, y, p * HEART_THICKNESS) * HEART_SCALE
}

/// Polar rose `r = cos(4θ)`.
pub fn rose<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let theta = unit(rng) * TAU;
    let r = (ROSE_PETALS * theta).cos();
    let z = centered(rng) * ROSE_DEPTH;
    Vec3::new(r * theta.cos(), r * theta.sin(), z) * ROSE_SCALE
}

pub fn saturn<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    if unit(rng) < SATURN_PLANET_PROBABILITY {
        sphere_shell(rng, SPHERE_RADIUS) * SATURN_PLANET_SCALE
    } else {
        let theta = unit(rng) * TAU;
        let r = SATURN_RING_INNER + unit(rng) * SATURN_RING_WIDTH;
        let y = centered(rng) * SATURN_RING_THICKNESS;
        Vec3::new(r * theta.cos(), y, r * theta.sin())
    }
}

/// Cone-like seated body with a spherical head above it.
pub fn meditate<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    if unit(rng) < MEDITATE_BODY_PROBABILITY {
        let h = unit(rng) * MEDITATE_BODY_HEIGHT;
        let r = (MEDITATE_BODY_HEIGHT - h) * MEDITATE_BODY_TAPER;
        let theta = unit(rng) * TAU;
        Vec3::new(r * theta.cos(), h + MEDITATE_BODY_BASE_Y, r * theta.sin())
    } else {
        sphere_shell(rng, MEDITATE_HEAD_RADIUS) + Vec3::new(0.0, MEDITATE_HEAD_Y, 0.0)
    }
}

/// Sphere direction scaled by an independent uniform: a filled ball.
pub fn solid_ball<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let dir = sphere_shell(rng, SPHERE_RADIUS);
    dir * unit(rng)
}

pub fn galaxy<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    // sqrt pulls mass toward the core
    let s = unit(rng).sqrt();
    let r = s * GALAXY_RADIUS;
    let arm = rng.gen_range(0..GALAXY_ARMS) as f32;
    let theta = (arm / GALAXY_ARMS as f32) * TAU + r * GALAXY_WINDING;
    let y = centered(rng) * (1.0 - s);
    let noise = Vec3::new(centered(rng), centered(rng), centered(rng)) * GALAXY_NOISE;
    Vec3::new(r * theta.cos(), y, r * theta.sin()) + noise
}

pub fn black_hole<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    if unit(rng) < BLACKHOLE_CORE_PROBABILITY {
        return sphere_shell(rng, BLACKHOLE_CORE_RADIUS);
    }
    let angle = unit(rng) * TAU;
    // product of two uniforms crowds the disk against the horizon
    let r = BLACKHOLE_HORIZON + unit(rng) * unit(rng) * BLACKHOLE_DISK_SPAN;
    let y = centered(rng) * BLACKHOLE_FLARE * r;
    Vec3::new(r * angle.cos(), y, r * angle.sin())
}

/// Double helix; a share of the points fill the rungs between the strands.
pub fn dna<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let t = centered(rng) * DNA_HEIGHT;
    let twist = t * DNA_TWIST;
    let strand_a = Vec3::new(DNA_RADIUS * twist.cos(), t, DNA_RADIUS * twist.sin());
    let strand_b = Vec3::new(
        DNA_RADIUS * (twist + PI).cos(),
        t,
        DNA_RADIUS * (twist + PI).sin(),
    );
    let on_strand = if rng.gen_bool(0.5) { strand_a } else { strand_b };
    if unit(rng) < DNA_RUNG_PROBABILITY {
        strand_a.lerp(strand_b, unit(rng))
    } else {
        on_strand
    }
}

/// Hollow cube: one of six faces, uniform over the face.
pub fn cube<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let s = CUBE_HALF_SIZE;
    let face = rng.gen_range(0..6);
    let u = centered(rng) * 2.0 * s;
    let v = centered(rng) * 2.0 * s;
    match face {
        0 => Vec3::new(s, u, v),
        1 => Vec3::new(-s, u, v),
        2 => Vec3::new(u, s, v),
        3 => Vec3::new(u, -s, v),
        4 => Vec3::new(u, v, s),
        _ => Vec3::new(u, v, -s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn shell_points_sit_on_the_radius() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            let p = sphere_shell(&mut rng, 2.0);
            assert!((p.length() - 2.0).abs() < 1e-4);
        }
    }

    #[test]
    fn heart_is_thin_in_depth() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..1000 {
            let p = heart(&mut rng);
            assert!(p.z.abs() <= 0.2 + 1e-6);
            assert!(p.x.abs() <= 1.6 + 1e-4);
        }
    }

    #[test]
    fn cube_points_lie_on_a_face() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let p = cube(&mut rng);
            let on_face = [p.x, p.y, p.z]
                .iter()
                .any(|c| (c.abs() - CUBE_HALF_SIZE).abs() < 1e-6);
            assert!(on_face, "{p:?} is not on a face");
            assert!(p.abs().max_element() <= CUBE_HALF_SIZE + 1e-6);
        }
    }

    #[test]
    fn solid_ball_fills_the_interior() {
        let mut rng = StdRng::seed_from_u64(4);
        let inner = (0..2000)
            .map(|_| solid_ball(&mut rng).length())
            .filter(|r| *r < 1.0)
            .count();
        // radius = 2U, so half the draws land inside radius 1
        assert!(inner > 850 && inner < 1150, "inner = {inner}");
    }
}
