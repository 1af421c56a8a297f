//! Procedural indexed meshes for the ornament shapes and the ground plane.
//!
//! All solids are unit-sized (fit in a cube of side 1) and wound
//! counter-clockwise when seen from outside.

use crate::ornaments::OrnamentShape;
use glam::Vec3;
use std::f32::consts::{PI, TAU};

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl MeshVertex {
    #[inline]
    fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u16>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

pub fn for_shape(shape: OrnamentShape) -> MeshData {
    match shape {
        OrnamentShape::Cube => cube(),
        OrnamentShape::Sphere => uv_sphere(20, 12),
        OrnamentShape::Polyhedron => octahedron(),
    }
}

/// Unit cube with flat per-face normals.
pub fn cube() -> MeshData {
    // (normal, u); v = normal x u so that u x v = normal.
    let faces = [
        (Vec3::X, Vec3::Y),
        (Vec3::NEG_X, Vec3::Y),
        (Vec3::Y, Vec3::Z),
        (Vec3::NEG_Y, Vec3::Z),
        (Vec3::Z, Vec3::X),
        (Vec3::NEG_Z, Vec3::X),
    ];
    let mut mesh = MeshData::default();
    for (n, u) in faces {
        let v = n.cross(u);
        let base = mesh.vertices.len() as u16;
        for corner in [n - u - v, n + u - v, n + u + v, n - u + v] {
            mesh.vertices.push(MeshVertex::new(corner * 0.5, n));
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}

/// Latitude/longitude sphere of diameter 1 with smooth normals.
pub fn uv_sphere(segments: u32, rings: u32) -> MeshData {
    let segments = segments.max(3);
    let rings = rings.max(2);
    let mut mesh = MeshData::default();
    for r in 0..=rings {
        let phi = PI * r as f32 / rings as f32;
        for s in 0..=segments {
            let theta = TAU * s as f32 / segments as f32;
            let n = Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
            mesh.vertices.push(MeshVertex::new(n * 0.5, n));
        }
    }
    let stride = (segments + 1) as u16;
    for r in 0..rings as u16 {
        for s in 0..segments as u16 {
            let a = r * stride + s;
            let b = a + stride;
            mesh.indices.extend_from_slice(&[a, a + 1, b, a + 1, b + 1, b]);
        }
    }
    mesh
}

/// Regular octahedron with flat faces.
pub fn octahedron() -> MeshData {
    let mut mesh = MeshData::default();
    for sx in [1.0f32, -1.0] {
        for sy in [1.0f32, -1.0] {
            for sz in [1.0f32, -1.0] {
                let a = Vec3::X * sx * 0.5;
                let mut b = Vec3::Y * sy * 0.5;
                let mut c = Vec3::Z * sz * 0.5;
                // An odd number of negative axes mirrors the face.
                if sx * sy * sz < 0.0 {
                    std::mem::swap(&mut b, &mut c);
                }
                let n = Vec3::new(sx, sy, sz).normalize();
                let base = mesh.vertices.len() as u16;
                for p in [a, b, c] {
                    mesh.vertices.push(MeshVertex::new(p, n));
                }
                mesh.indices.extend_from_slice(&[base, base + 1, base + 2]);
            }
        }
    }
    mesh
}

/// Square on the plane `y`, facing +Y.
pub fn ground_quad(half_extent: f32, y: f32) -> MeshData {
    let e = half_extent;
    let corners = [
        Vec3::new(-e, y, -e),
        Vec3::new(-e, y, e),
        Vec3::new(e, y, e),
        Vec3::new(e, y, -e),
    ];
    MeshData {
        vertices: corners
            .into_iter()
            .map(|p| MeshVertex::new(p, Vec3::Y))
            .collect(),
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}
