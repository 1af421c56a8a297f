//! Instanced solid ornaments with per-group staggered arrival.

use crate::config::{OrnamentSpec, TreeShape};
use crate::error::ConfigError;
use crate::morph::weighted_blend;
use crate::sampling::{sample_cone_surface, sample_sphere_volume};
use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use rand::Rng;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OrnamentShape {
    Cube,
    Sphere,
    Polyhedron,
}

/// Per-ornament GPU instance: column-major model matrix, then rgba.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct OrnamentInstance {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

pub struct OrnamentGroup {
    name: &'static str,
    shape: OrnamentShape,
    chaos: Vec<Vec3>,
    target: Vec<Vec3>,
    base_rotation: Vec<Quat>,
    weight: f32,
    base_scale: f32,
    spin: Vec2,
    settle: f32,
    blend: f32,
    instances: Vec<OrnamentInstance>,
}

impl OrnamentGroup {
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        spec: &OrnamentSpec,
        tree: &TreeShape,
    ) -> Result<Self, ConfigError> {
        spec.validate()?;
        let n = spec.count;
        let mut chaos = Vec::with_capacity(n);
        let mut target = Vec::with_capacity(n);
        let mut base_rotation = Vec::with_capacity(n);
        let mut instances = Vec::with_capacity(n);
        for i in 0..n {
            let c = sample_sphere_volume(rng, tree.chaos_radius);
            let on_cone = sample_cone_surface(rng, tree.height, tree.base_radius, tree.jitter);
            let outward = Vec3::new(on_cone.x, 0.0, on_cone.z).normalize_or_zero();
            let t = on_cone + outward * spec.surface_offset;
            let rot = Quat::from_euler(
                EulerRot::XYZ,
                rng.gen_range(0.0..TAU),
                rng.gen_range(0.0..TAU),
                rng.gen_range(0.0..TAU),
            );
            let rgb = spec.palette[i % spec.palette.len()];
            chaos.push(c);
            target.push(t);
            base_rotation.push(rot);
            instances.push(OrnamentInstance {
                model: Mat4::from_scale_rotation_translation(
                    Vec3::splat(spec.base_scale),
                    rot,
                    c,
                )
                .to_cols_array_2d(),
                color: [rgb[0], rgb[1], rgb[2], 1.0],
            });
        }
        Ok(Self {
            name: spec.name,
            shape: spec.shape,
            chaos,
            target,
            base_rotation,
            weight: spec.weight,
            base_scale: spec.base_scale,
            spin: Vec2::from(spec.spin),
            settle: spec.settle,
            blend: 0.0,
            instances,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn shape(&self) -> OrnamentShape {
        self.shape
    }

    pub fn weight(&self) -> f32 {
        self.weight
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

    /// Group-local blend factor `t` for a global morph progress.
    #[inline]
    pub fn blend_factor(&self, progress: f32) -> f32 {
        weighted_blend(progress, self.weight)
    }

    /// `t` used by the most recent [`OrnamentGroup::update`].
    pub fn current_blend(&self) -> f32 {
        self.blend
    }

    /// Uniform scale for blend factor `t`; shrinks as the ornament settles.
    #[inline]
    pub fn scale_at(&self, t: f32) -> f32 {
        self.base_scale * (1.0 - self.settle * t)
    }

    /// Rotation added on top of each member's resting orientation; linear in
    /// `t` about x and y.
    #[inline]
    pub fn spin_at(&self, t: f32) -> Quat {
        Quat::from_euler(EulerRot::XYZ, t * self.spin.x, t * self.spin.y, 0.0)
    }

    pub fn update(&mut self, progress: f32) {
        let t = self.blend_factor(progress);
        self.blend = t;
        let scale = Vec3::splat(self.scale_at(t));
        let spin = self.spin_at(t);
        for (i, inst) in self.instances.iter_mut().enumerate() {
            let pos = self.chaos[i].lerp(self.target[i], t);
            let rot = spin * self.base_rotation[i];
            inst.model = Mat4::from_scale_rotation_translation(scale, rot, pos).to_cols_array_2d();
        }
    }

    pub fn instances(&self) -> &[OrnamentInstance] {
        &self.instances
    }
}
