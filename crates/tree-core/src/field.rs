//! The diffuse sprite field: scattered in a sphere, gathered onto the cone.

use crate::config::{FieldConfig, TreeShape};
use crate::constants::MAX_PARTICLES;
use crate::error::ConfigError;
use crate::sampling::{sample_cone_surface, sample_sphere_volume};
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// Per-sprite GPU instance: xyz position + size, then rgba.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpriteInstance {
    pub pos_size: [f32; 4],
    pub color: [f32; 4],
}

/// Fixed-size particle collection stored as parallel arrays.
///
/// Chaos/target positions and phases never change after generation; only
/// the `instances` display buffer is rewritten, in place, every frame.
pub struct ParticleField {
    chaos: Vec<Vec3>,
    target: Vec<Vec3>,
    phase: Vec<f32>,
    instances: Vec<SpriteInstance>,
    shimmer_amplitude: f32,
    shimmer_speed: f32,
}

impl ParticleField {
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        tree: &TreeShape,
        cfg: &FieldConfig,
    ) -> Result<Self, ConfigError> {
        if cfg.count == 0 {
            return Err(ConfigError::EmptyField);
        }
        if cfg.count > MAX_PARTICLES {
            return Err(ConfigError::TooManyParticles {
                count: cfg.count,
                max: MAX_PARTICLES,
            });
        }
        let n = cfg.count;
        let mut chaos = Vec::with_capacity(n);
        let mut target = Vec::with_capacity(n);
        let mut phase = Vec::with_capacity(n);
        let mut instances = Vec::with_capacity(n);
        let color_a = Vec3::from(cfg.color_a);
        let color_b = Vec3::from(cfg.color_b);
        for _ in 0..n {
            let c = sample_sphere_volume(rng, tree.chaos_radius);
            let t = sample_cone_surface(rng, tree.height, tree.base_radius, tree.jitter);
            let p: f32 = rng.gen();
            let size = cfg.min_size + (cfg.max_size - cfg.min_size) * p;
            let color = color_a.lerp(color_b, p);
            chaos.push(c);
            target.push(t);
            phase.push(p);
            instances.push(SpriteInstance {
                pos_size: [c.x, c.y, c.z, size],
                color: [color.x, color.y, color.z, 1.0],
            });
        }
        Ok(Self {
            chaos,
            target,
            phase,
            instances,
            shimmer_amplitude: cfg.shimmer_amplitude,
            shimmer_speed: cfg.shimmer_speed,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.chaos.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chaos.is_empty()
    }

    pub fn chaos(&self) -> &[Vec3] {
        &self.chaos
    }

    pub fn target(&self) -> &[Vec3] {
        &self.target
    }

    pub fn phase(&self) -> &[f32] {
        &self.phase
    }

    /// Position on the chaos→target segment, without shimmer.
    #[inline]
    pub fn blended_position(&self, index: usize, progress: f32) -> Vec3 {
        self.chaos[index].lerp(self.target[index], progress.clamp(0.0, 1.0))
    }

    /// Rewrite every display instance for `progress` at wall time `time_sec`.
    pub fn update(&mut self, progress: f32, time_sec: f32) {
        let progress = progress.clamp(0.0, 1.0);
        let amp = self.shimmer_amplitude;
        let speed = self.shimmer_speed;
        for (i, inst) in self.instances.iter_mut().enumerate() {
            let base = self.chaos[i].lerp(self.target[i], progress);
            let wobble = (time_sec * speed + self.phase[i] * TAU).sin() * amp;
            let p = base + base.normalize_or_zero() * wobble;
            inst.pos_size[0] = p.x;
            inst.pos_size[1] = p.y;
            inst.pos_size[2] = p.z;
        }
    }

    pub fn instances(&self) -> &[SpriteInstance] {
        &self.instances
    }
}
