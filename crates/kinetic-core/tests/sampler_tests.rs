use glam::Vec3;
use kinetic_core::sampler::{black_hole, dna, galaxy, meditate, rose, sample, saturn};
use kinetic_core::{PointCloud, ShapeKind};
use rand::rngs::StdRng;
use rand::SeedableRng;

const DRAWS: usize = 10_000;

fn planar(p: Vec3) -> f32 {
    Vec3::new(p.x, 0.0, p.z).length()
}

fn mean(values: &[f32]) -> f32 {
    values.iter().sum::<f32>() / values.len().max(1) as f32
}

#[test]
fn every_shape_samples_finite_points() {
    let mut rng = StdRng::seed_from_u64(2024);
    for kind in ShapeKind::ALL {
        for _ in 0..DRAWS {
            let p = sample(kind, &mut rng);
            assert!(p.is_finite(), "{kind} produced {p:?}");
        }
    }
}

#[test]
fn saturn_splits_sixty_forty_between_planet_and_ring() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut planet = 0;
    for _ in 0..DRAWS {
        let p = saturn(&mut rng);
        let r = p.length();
        if (r - 1.6).abs() < 1e-3 {
            planet += 1;
        } else {
            let ring = Vec3::new(p.x, 0.0, p.z).length();
            assert!((2.5 - 1e-4..4.0 + 1e-4).contains(&ring), "stray point {p:?}");
            assert!(p.y.abs() <= 0.05 + 1e-6);
        }
    }
    let share = planet as f32 / DRAWS as f32;
    assert!((share - 0.6).abs() <= 0.05, "planet share {share}");
}

#[test]
fn meditate_splits_seventy_thirty_between_body_and_head() {
    let mut rng = StdRng::seed_from_u64(12);
    let head_centre = Vec3::new(0.0, 0.8, 0.0);
    let head = (0..DRAWS)
        .map(|_| meditate(&mut rng))
        .filter(|p| (p.distance(head_centre) - 0.6).abs() < 1e-4)
        .count();
    let share = head as f32 / DRAWS as f32;
    assert!((share - 0.3).abs() <= 0.05, "head share {share}");
}

#[test]
fn black_hole_is_mostly_accretion_disk() {
    let mut rng = StdRng::seed_from_u64(13);
    let mut core = 0;
    for _ in 0..DRAWS {
        let p = sample(ShapeKind::BlackHole, &mut rng);
        let planar = Vec3::new(p.x, 0.0, p.z).length();
        if planar < 1.2 - 1e-4 {
            core += 1;
            assert!((p.length() - 0.4).abs() < 1e-4);
        } else {
            assert!(planar <= 4.7 + 1e-4);
        }
    }
    assert!(core > 200 && core < 420, "core count {core}");
}

#[test]
fn dna_strands_stay_on_the_helix_radius() {
    let mut rng = StdRng::seed_from_u64(14);
    for _ in 0..DRAWS {
        let p = sample(ShapeKind::Dna, &mut rng);
        assert!(p.y.abs() <= 4.0 + 1e-5);
        assert!(Vec3::new(p.x, 0.0, p.z).length() <= 1.2 + 1e-4);
    }
}

#[test]
fn regeneration_is_fresh_but_statistically_alike() {
    let mut rng = StdRng::seed_from_u64(15);
    let a = PointCloud::generate(ShapeKind::Saturn, DRAWS, &mut rng);
    let b = PointCloud::generate(ShapeKind::Saturn, DRAWS, &mut rng);
    assert_ne!(a.targets(), b.targets());

    let ring_mean = |cloud: &PointCloud| {
        let radii: Vec<f32> = cloud
            .targets()
            .iter()
            .map(|p| Vec3::new(p.x, 0.0, p.z).length())
            .filter(|r| *r > 2.0)
            .collect();
        radii.iter().sum::<f32>() / radii.len() as f32
    };
    let (ma, mb) = (ring_mean(&a), ring_mean(&b));
    assert!((ma - 3.25).abs() < 0.05, "{ma}");
    assert!((ma - mb).abs() < 0.05, "{ma} vs {mb}");
}

#[test]
fn same_seed_same_cloud() {
    let a = PointCloud::generate(ShapeKind::Galaxy, 500, &mut StdRng::seed_from_u64(99));
    let b = PointCloud::generate(ShapeKind::Galaxy, 500, &mut StdRng::seed_from_u64(99));
    assert_eq!(a.targets(), b.targets());
    assert_eq!(a.drifts(), b.drifts());
}

#[test]
fn rose_points_follow_the_four_petal_curve() {
    let mut rng = StdRng::seed_from_u64(16);
    for _ in 0..DRAWS {
        let p = rose(&mut rng);
        let rho = p.truncate().length();
        assert!(rho <= 2.5 + 1e-4, "{p:?}");
        assert!(p.z.abs() <= 0.625 + 1e-6, "{p:?}");
        if rho > 1e-3 {
            // a negative radius lands on the opposite side, where |cos 4φ| is unchanged
            let phi = p.y.atan2(p.x);
            assert!((rho / 2.5 - (4.0 * phi).cos().abs()).abs() < 1e-3, "{p:?}");
        }
    }
}

#[test]
fn meditate_body_is_a_tapered_cone_below_the_head() {
    let mut rng = StdRng::seed_from_u64(17);
    let head_centre = Vec3::new(0.0, 0.8, 0.0);
    let mut body = 0;
    for _ in 0..DRAWS {
        let p = meditate(&mut rng);
        let on_cone = (-1.5 - 1e-5..0.5).contains(&p.y)
            && (planar(p) - (0.5 - p.y) * 0.8).abs() < 1e-4;
        if on_cone {
            body += 1;
        } else {
            assert!((p.distance(head_centre) - 0.6).abs() < 1e-4, "stray point {p:?}");
        }
    }
    let share = body as f32 / DRAWS as f32;
    assert!((share - 0.7).abs() <= 0.05, "body share {share}");
}

#[test]
fn galaxy_arms_stay_inside_the_disk_with_bounded_noise() {
    let mut rng = StdRng::seed_from_u64(18);
    let noise = 0.075 * std::f32::consts::SQRT_2;
    let (mut inner_y, mut outer_y) = (Vec::new(), Vec::new());
    for _ in 0..2_000 {
        let p = galaxy(&mut rng);
        let rp = planar(p);
        assert!(rp <= 4.0 + noise + 1e-4, "{p:?}");

        // vertical spread shrinks with (1 - s), s = r / 4
        let s_min = ((rp - noise) / 4.0).clamp(0.0, 1.0);
        assert!(p.y.abs() <= 0.5 * (1.0 - s_min) + 0.075 + 1e-4, "{p:?}");

        // some arm point lies within the planar noise box
        let mut nearest = f32::MAX;
        let mut r = (rp - noise - 0.01).max(0.0);
        while r <= (rp + noise + 0.01).min(4.0) {
            for arm in 0..3 {
                let theta = arm as f32 / 3.0 * std::f32::consts::TAU + 3.0 * r;
                let dx = p.x - r * theta.cos();
                let dz = p.z - r * theta.sin();
                nearest = nearest.min((dx * dx + dz * dz).sqrt());
            }
            r += 0.0005;
        }
        assert!(nearest <= noise + 0.01, "{p:?} is {nearest} off every arm");

        if rp < 1.0 {
            inner_y.push(p.y.abs());
        } else if rp > 3.0 {
            outer_y.push(p.y.abs());
        }
    }
    assert!(mean(&inner_y) > 2.0 * mean(&outer_y), "{} vs {}", mean(&inner_y), mean(&outer_y));
}

#[test]
fn dna_rungs_take_thirty_percent_and_cross_the_axis() {
    let mut rng = StdRng::seed_from_u64(19);
    let mut rungs = 0;
    for _ in 0..DRAWS {
        let p = dna(&mut rng);
        let twist = p.y;
        if planar(p) < 1.2 - 1e-3 {
            rungs += 1;
            // rung points lie on the diameter joining the two strands
            assert!((p.x * twist.sin() - p.z * twist.cos()).abs() < 1e-4, "{p:?}");
        } else {
            assert!((planar(p) - 1.2).abs() < 1e-3, "{p:?}");
        }
    }
    let share = rungs as f32 / DRAWS as f32;
    assert!((share - 0.3).abs() <= 0.03, "rung share {share}");
}

#[test]
fn black_hole_disk_flares_with_radius() {
    let mut rng = StdRng::seed_from_u64(20);
    let (mut near, mut far) = (Vec::new(), Vec::new());
    for _ in 0..DRAWS {
        let p = black_hole(&mut rng);
        let r = planar(p);
        if r < 1.2 - 1e-4 {
            continue;
        }
        assert!(p.y.abs() <= 0.05 * r + 1e-5, "{p:?}");
        if r < 2.0 {
            near.push(p.y.abs());
        } else if r > 3.5 {
            far.push(p.y.abs());
        }
    }
    assert!(!far.is_empty());
    assert!(mean(&far) > 1.5 * mean(&near), "{} vs {}", mean(&far), mean(&near));
}
