//! Random point samplers for the two scene shapes.
//!
//! Both samplers are deterministic only in distribution: every call draws
//! fresh values from the supplied RNG. Pass a seeded `StdRng` for
//! reproducible layouts.

use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// Uniform-by-volume point inside a sphere of `radius` centred on the origin.
///
/// Azimuth and cos(polar) are drawn uniformly so the poles are not
/// over-populated, and the radius is `radius * cbrt(u)` so the centre is not
/// either.
pub fn sample_sphere_volume<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
    let theta = rng.gen_range(0.0..TAU);
    let cos_phi: f32 = rng.gen_range(-1.0..=1.0);
    let sin_phi = (1.0 - cos_phi * cos_phi).max(0.0).sqrt();
    let r = radius * rng.gen::<f32>().cbrt();
    Vec3::new(
        r * sin_phi * theta.cos(),
        r * cos_phi,
        r * sin_phi * theta.sin(),
    )
}

/// Point on the lateral surface of an upright cone (the tree silhouette).
///
/// Height is uniform in `[0, height]`, the radius shrinks linearly from
/// `base_radius` at the bottom to zero at the tip, and a symmetric radial
/// jitter in `[-jitter, jitter]` roughens the surface. The result is shifted
/// down by `height / 2` so the cone is vertically centred on the origin.
pub fn sample_cone_surface<R: Rng + ?Sized>(
    rng: &mut R,
    height: f32,
    base_radius: f32,
    jitter: f32,
) -> Vec3 {
    let y = rng.gen_range(0.0..=height);
    let jitter = jitter.abs();
    let radius = base_radius * (1.0 - y / height) + rng.gen_range(-jitter..=jitter);
    let theta = rng.gen_range(0.0..TAU);
    Vec3::new(radius * theta.cos(), y - height * 0.5, radius * theta.sin())
}

/// Radius of the silhouette at an un-centred height `y` (no jitter).
#[inline]
pub fn cone_radius_at(height: f32, base_radius: f32, y: f32) -> f32 {
    base_radius * (1.0 - (y / height).clamp(0.0, 1.0))
}
