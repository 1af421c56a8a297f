// Host-side tests for procedural meshes and the orbit camera.

use glam::Vec3;
use tree_core::mesh::{self, MeshData};
use tree_core::*;

fn triangles(m: &MeshData) -> impl Iterator<Item = [Vec3; 3]> + '_ {
    m.indices.chunks_exact(3).map(move |tri| {
        [
            Vec3::from(m.vertices[tri[0] as usize].position),
            Vec3::from(m.vertices[tri[1] as usize].position),
            Vec3::from(m.vertices[tri[2] as usize].position),
        ]
    })
}

fn assert_closed_solid_faces_outward(m: &MeshData) {
    for [a, b, c] in triangles(m) {
        let n = (b - a).cross(c - a);
        if n.length() < 1e-6 {
            // Pole caps on the UV sphere are degenerate.
            continue;
        }
        let centroid = (a + b + c) / 3.0;
        assert!(n.dot(centroid) > 0.0, "inward face {a:?} {b:?} {c:?}");
    }
}

fn assert_well_formed(m: &MeshData) {
    assert_eq!(m.indices.len() % 3, 0);
    assert!(m.indices.iter().all(|&i| (i as usize) < m.vertices.len()));
    for v in &m.vertices {
        let n = Vec3::from(v.normal);
        assert!((n.length() - 1.0).abs() < 1e-4);
        assert!(Vec3::from(v.position).abs().max_element() <= 0.5 + 1e-5);
    }
}

#[test]
fn cube_has_six_flat_faces() {
    let m = mesh::cube();
    assert_eq!(m.vertices.len(), 24);
    assert_eq!(m.triangle_count(), 12);
    assert_well_formed(&m);
    assert_closed_solid_faces_outward(&m);
}

#[test]
fn octahedron_has_eight_faces() {
    let m = mesh::octahedron();
    assert_eq!(m.triangle_count(), 8);
    assert_well_formed(&m);
    assert_closed_solid_faces_outward(&m);
}

#[test]
fn sphere_normals_point_along_positions() {
    let m = mesh::uv_sphere(16, 8);
    assert_eq!(m.vertices.len(), 17 * 9);
    assert_eq!(m.triangle_count(), 16 * 8 * 2);
    assert_well_formed(&m);
    assert_closed_solid_faces_outward(&m);
    for v in &m.vertices {
        let p = Vec3::from(v.position);
        assert!((p.length() - 0.5).abs() < 1e-4);
        assert!(p.normalize().dot(Vec3::from(v.normal)) > 0.999);
    }
}

#[test]
fn every_ornament_shape_has_a_mesh() {
    for shape in [
        OrnamentShape::Cube,
        OrnamentShape::Sphere,
        OrnamentShape::Polyhedron,
    ] {
        let m = mesh::for_shape(shape);
        assert!(m.triangle_count() > 0);
        assert!(m.vertices.len() < u16::MAX as usize);
    }
}

#[test]
fn ground_quad_faces_up() {
    let m = mesh::ground_quad(10.0, -6.0);
    for [a, b, c] in triangles(&m) {
        let n = (b - a).cross(c - a).normalize();
        assert!(n.abs_diff_eq(Vec3::Y, 1e-6));
        assert_eq!(a.y, -6.0);
    }
}

#[test]
fn camera_eye_sits_at_orbit_distance() {
    let mut cam = OrbitCamera::default();
    for _ in 0..10 {
        cam.orbit(37.0, -12.0);
        assert!((cam.eye().distance(cam.target) - cam.distance).abs() < 1e-3);
    }
}

#[test]
fn camera_pitch_and_distance_are_clamped() {
    let mut cam = OrbitCamera::default();
    cam.orbit(0.0, 1e6);
    assert!(cam.pitch <= CAMERA_PITCH_LIMIT);
    cam.orbit(0.0, -1e6);
    assert!(cam.pitch >= -CAMERA_PITCH_LIMIT);
    for _ in 0..100 {
        cam.zoom(1.0);
    }
    assert_eq!(cam.distance, CAMERA_MAX_DISTANCE);
    for _ in 0..100 {
        cam.zoom(-1.0);
    }
    assert_eq!(cam.distance, CAMERA_MIN_DISTANCE);
}

#[test]
fn billboard_axes_are_orthonormal_and_face_the_camera() {
    let mut cam = OrbitCamera::default();
    cam.orbit(120.0, 40.0);
    let (right, up) = cam.billboard_axes();
    let forward = (cam.target - cam.eye()).normalize();
    assert!((right.length() - 1.0).abs() < 1e-4);
    assert!((up.length() - 1.0).abs() < 1e-4);
    assert!(right.dot(up).abs() < 1e-4);
    assert!(right.dot(forward).abs() < 1e-4);
    assert!(up.dot(forward).abs() < 1e-4);
}

#[test]
fn auto_rotate_pauses_while_interacting() {
    let mut cam = OrbitCamera::default();
    let yaw = cam.yaw;
    cam.update(1.0, true);
    assert_eq!(cam.yaw, yaw);
    cam.update(1.0, false);
    assert!(cam.yaw > yaw);
}

#[test]
fn reset_restores_defaults_but_keeps_viewport() {
    let mut cam = OrbitCamera::default();
    cam.set_viewport(800, 400);
    cam.orbit(300.0, 90.0);
    cam.zoom(3.0);
    cam.reset();
    assert_eq!(cam.aspect, 2.0);
    assert_eq!(cam.distance, CAMERA_DISTANCE);
    assert_eq!(cam.pitch, CAMERA_PITCH);
}

#[test]
fn view_proj_puts_the_target_in_front_of_the_camera() {
    let cam = OrbitCamera::default();
    let clip = cam.view_proj() * cam.target.extend(1.0);
    let ndc = clip.truncate() / clip.w;
    assert!(clip.w > 0.0);
    assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4);
    assert!((0.0..=1.0).contains(&ndc.z));
}
