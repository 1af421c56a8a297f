// Host-side tests for the sphere and cone point samplers.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tree_core::{cone_radius_at, sample_cone_surface, sample_sphere_volume};

#[test]
fn sphere_samples_stay_inside_radius() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..10_000 {
        let p = sample_sphere_volume(&mut rng, 3.0);
        assert!(p.length() <= 3.0 + 1e-4, "point {p:?} escaped the sphere");
    }
}

#[test]
fn sphere_inner_half_radius_holds_one_eighth_of_samples() {
    let mut rng = StdRng::seed_from_u64(7);
    let radius = 10.0;
    let n = 100_000;
    let inner = (0..n)
        .filter(|_| sample_sphere_volume(&mut rng, radius).length() < radius * 0.5)
        .count();
    let frac = inner as f64 / n as f64;
    // Uniform-in-r would give 0.5 here.
    assert!((frac - 0.125).abs() < 0.005, "inner fraction {frac}");
}

#[test]
fn sphere_radial_histogram_follows_r_squared_density() {
    let mut rng = StdRng::seed_from_u64(11);
    let n = 100_000;
    let bins = 4;
    let mut counts = vec![0usize; bins];
    for _ in 0..n {
        let r = sample_sphere_volume(&mut rng, 1.0).length();
        let b = ((r * bins as f32) as usize).min(bins - 1);
        counts[b] += 1;
    }
    for (b, &count) in counts.iter().enumerate() {
        let lo = b as f64 / bins as f64;
        let hi = (b + 1) as f64 / bins as f64;
        let expected = hi.powi(3) - lo.powi(3);
        let got = count as f64 / n as f64;
        assert!(
            (got - expected).abs() < 0.01,
            "shell {b}: got {got:.4}, expected {expected:.4}"
        );
    }
}

#[test]
fn sphere_directions_do_not_cluster_at_poles() {
    let mut rng = StdRng::seed_from_u64(3);
    let n = 50_000;
    let mut upper = 0usize;
    let mut equatorial_band = 0usize;
    for _ in 0..n {
        let p = sample_sphere_volume(&mut rng, 1.0);
        if p.y > 0.0 {
            upper += 1;
        }
        let len = p.length();
        if len > 1e-6 && (p.y / len).abs() < 0.5 {
            equatorial_band += 1;
        }
    }
    let upper = upper as f64 / n as f64;
    let band = equatorial_band as f64 / n as f64;
    assert!((upper - 0.5).abs() < 0.01, "upper hemisphere fraction {upper}");
    // Uniform cos(polar) puts half the directions within |cos| < 0.5.
    assert!((band - 0.5).abs() < 0.01, "equatorial band fraction {band}");
}

#[test]
fn cone_samples_respect_silhouette_plus_jitter() {
    let mut rng = StdRng::seed_from_u64(5);
    let (height, base, jitter) = (12.0, 4.8, 0.075);
    for _ in 0..20_000 {
        let p = sample_cone_surface(&mut rng, height, base, jitter);
        let y = p.y + height * 0.5;
        assert!((-1e-4..=height + 1e-4).contains(&y), "height {y} out of range");
        let r = (p.x * p.x + p.z * p.z).sqrt();
        let bound = cone_radius_at(height, base, y) + jitter + 1e-3;
        assert!(r <= bound, "radius {r} above bound {bound} at y={y}");
    }
}

#[test]
fn cone_heights_are_uniform_and_centred() {
    let mut rng = StdRng::seed_from_u64(9);
    let height = 10.0;
    let n = 50_000;
    let bins = 10;
    let mut counts = vec![0usize; bins];
    let mut sum_y = 0.0f64;
    for _ in 0..n {
        let p = sample_cone_surface(&mut rng, height, 3.0, 0.075);
        sum_y += p.y as f64;
        let u = (p.y + height * 0.5) / height;
        let b = ((u * bins as f32) as usize).min(bins - 1);
        counts[b] += 1;
    }
    for (b, &c) in counts.iter().enumerate() {
        let frac = c as f64 / n as f64;
        assert!((frac - 0.1).abs() < 0.01, "bin {b} fraction {frac}");
    }
    let mean = sum_y / n as f64;
    assert!(mean.abs() < 0.1, "vertical mean {mean} should sit near the origin");
}

#[test]
fn cone_without_jitter_lies_on_the_surface() {
    let mut rng = StdRng::seed_from_u64(13);
    let (height, base) = (8.0, 2.0);
    for _ in 0..1_000 {
        let p = sample_cone_surface(&mut rng, height, base, 0.0);
        let y = p.y + height * 0.5;
        let r = (p.x * p.x + p.z * p.z).sqrt();
        assert!((r - cone_radius_at(height, base, y)).abs() < 1e-3);
    }
}
