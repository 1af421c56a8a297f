// Host-side tests for the particle field and ornament groups.

use glam::{Mat4, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use smallvec::smallvec;
use tree_core::*;

fn still_field(count: usize) -> ParticleField {
    let cfg = FieldConfig {
        count,
        shimmer_amplitude: 0.0,
        ..FieldConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(42);
    ParticleField::generate(&mut rng, &TreeShape::default(), &cfg).expect("valid field")
}

fn spec(name: &'static str, weight: f32) -> OrnamentSpec {
    OrnamentSpec {
        name,
        shape: OrnamentShape::Sphere,
        count: 10,
        weight,
        palette: smallvec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        base_scale: 0.5,
        spin: [1.0, 2.0],
        settle: 0.2,
        surface_offset: 0.1,
    }
}

fn group(weight: f32) -> OrnamentGroup {
    let mut rng = StdRng::seed_from_u64(3);
    OrnamentGroup::generate(&mut rng, &spec("test", weight), &TreeShape::default())
        .expect("valid group")
}

fn position(inst: &SpriteInstance) -> Vec3 {
    Vec3::new(inst.pos_size[0], inst.pos_size[1], inst.pos_size[2])
}

#[test]
fn field_has_requested_size_and_phases_in_unit_range() {
    let field = still_field(500);
    assert_eq!(field.len(), 500);
    assert_eq!(field.instances().len(), 500);
    assert!(field.phase().iter().all(|p| (0.0..1.0).contains(p)));
}

#[test]
fn field_endpoints_match_chaos_and_target() {
    let mut field = still_field(200);
    field.update(0.0, 3.0);
    for (i, inst) in field.instances().iter().enumerate() {
        assert!(position(inst).distance(field.chaos()[i]) < 1e-5);
    }
    field.update(1.0, 3.0);
    for (i, inst) in field.instances().iter().enumerate() {
        assert!(position(inst).distance(field.target()[i]) < 1e-5);
    }
}

#[test]
fn blended_positions_stay_on_segment() {
    let field = still_field(300);
    for step in 0..=10 {
        let progress = step as f32 / 10.0;
        for i in 0..field.len() {
            let c = field.chaos()[i];
            let t = field.target()[i];
            let p = field.blended_position(i, progress);
            let detour = c.distance(p) + p.distance(t) - c.distance(t);
            assert!(detour.abs() < 1e-3, "particle {i} left its segment");
        }
    }
}

#[test]
fn shimmer_is_bounded_by_amplitude() {
    let cfg = FieldConfig {
        count: 300,
        shimmer_amplitude: 0.06,
        ..FieldConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(8);
    let mut field = ParticleField::generate(&mut rng, &TreeShape::default(), &cfg).unwrap();
    for frame in 0..30 {
        let time = frame as f32 * 0.1;
        field.update(0.7, time);
        for (i, inst) in field.instances().iter().enumerate() {
            let offset = position(inst).distance(field.blended_position(i, 0.7));
            assert!(offset <= 0.06 + 1e-4);
        }
    }
}

#[test]
fn size_and_color_come_from_phase_and_never_change() {
    let cfg = FieldConfig {
        count: 100,
        ..FieldConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(21);
    let mut field = ParticleField::generate(&mut rng, &TreeShape::default(), &cfg).unwrap();
    let before: Vec<([f32; 4], f32)> = field
        .instances()
        .iter()
        .map(|i| (i.color, i.pos_size[3]))
        .collect();
    for (i, (_, size)) in before.iter().enumerate() {
        let expected = cfg.min_size + (cfg.max_size - cfg.min_size) * field.phase()[i];
        assert!((size - expected).abs() < 1e-6);
    }
    field.update(0.3, 1.0);
    field.update(0.9, 2.0);
    let after: Vec<([f32; 4], f32)> = field
        .instances()
        .iter()
        .map(|i| (i.color, i.pos_size[3]))
        .collect();
    assert_eq!(before, after);
}

#[test]
fn updates_reuse_the_display_buffer() {
    let mut field = still_field(1_000);
    let ptr = field.instances().as_ptr();
    for frame in 0..120 {
        field.update(frame as f32 / 120.0, frame as f32 / 60.0);
    }
    assert_eq!(ptr, field.instances().as_ptr());
}

#[test]
fn empty_field_is_rejected() {
    let cfg = FieldConfig {
        count: 0,
        ..FieldConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(0);
    let err = ParticleField::generate(&mut rng, &TreeShape::default(), &cfg).err();
    assert_eq!(err, Some(ConfigError::EmptyField));
}

#[test]
fn ornament_colors_cycle_through_palette() {
    let g = group(1.0);
    let palette = spec("test", 1.0).palette;
    for (i, inst) in g.instances().iter().enumerate() {
        let rgb = palette[i % palette.len()];
        assert_eq!(inst.color, [rgb[0], rgb[1], rgb[2], 1.0]);
    }
}

#[test]
fn ornament_weights_stagger_blend_factor() {
    let light = group(1.0);
    let heavy = group(2.0);
    for i in 0..=10 {
        let p = i as f32 / 10.0;
        let t1 = light.blend_factor(p);
        let t2 = heavy.blend_factor(p);
        assert!((t2 - t1 * t1).abs() < 1e-6);
    }
}

#[test]
fn ornaments_land_on_targets_and_settle_smaller() {
    let mut g = group(1.3);
    g.update(0.0);
    let scale_chaos = decompose(&g, 0).0;
    for (i, inst) in g.instances().iter().enumerate() {
        let (_, _, pos) = Mat4::from_cols_array_2d(&inst.model).to_scale_rotation_translation();
        assert!(pos.distance(g.chaos()[i]) < 1e-4);
    }
    g.update(1.0);
    assert_eq!(g.current_blend(), 1.0);
    let scale_formed = decompose(&g, 0).0;
    for (i, inst) in g.instances().iter().enumerate() {
        let (_, _, pos) = Mat4::from_cols_array_2d(&inst.model).to_scale_rotation_translation();
        assert!(pos.distance(g.target()[i]) < 1e-4);
    }
    assert!((scale_chaos - 0.5).abs() < 1e-4);
    assert!((scale_formed - 0.5 * 0.8).abs() < 1e-4);
}

#[test]
fn ornament_spin_grows_with_blend() {
    let g = group(1.0);
    assert!(g.spin_at(0.0).abs_diff_eq(glam::Quat::IDENTITY, 1e-6));
    let half = g.spin_at(0.5).to_euler(glam::EulerRot::XYZ);
    assert!((half.0 - 0.5).abs() < 1e-4);
    assert!((half.1 - 1.0).abs() < 1e-4);
    assert!(g.scale_at(0.5) > g.scale_at(1.0));
}

#[test]
fn ornament_targets_sit_outside_the_silhouette() {
    let g = group(1.0);
    let tree = TreeShape::default();
    for t in g.target() {
        let y = t.y + tree.height * 0.5;
        let r = (t.x * t.x + t.z * t.z).sqrt();
        let bound = cone_radius_at(tree.height, tree.base_radius, y) + tree.jitter + 0.1 + 1e-3;
        assert!(r <= bound);
    }
}

#[test]
fn invalid_ornament_specs_are_rejected() {
    let mut rng = StdRng::seed_from_u64(1);
    let tree = TreeShape::default();
    let zero = OrnamentGroup::generate(&mut rng, &spec("zero", 0.0), &tree).err();
    assert_eq!(
        zero,
        Some(ConfigError::NonPositiveWeight {
            group: "zero".into(),
            weight: 0.0
        })
    );
    let mut empty = spec("empty", 1.0);
    empty.palette.clear();
    let err = OrnamentGroup::generate(&mut rng, &empty, &tree).err();
    assert_eq!(err, Some(ConfigError::EmptyPalette("empty".into())));
}

fn decompose(g: &OrnamentGroup, i: usize) -> (f32, Vec3) {
    let (scale, _, pos) =
        Mat4::from_cols_array_2d(&g.instances()[i].model).to_scale_rotation_translation();
    (scale.x, pos)
}

#[test]
fn ornament_positions_stay_on_segment_at_blend_factor() {
    for weight in [0.5, 1.0, 1.6, 3.0] {
        let mut g = group(weight);
        for step in 1..20 {
            let p = step as f32 / 20.0;
            g.update(p);
            let t = g.blend_factor(p);
            assert!((0.0..=1.0).contains(&t));
            assert_eq!(g.current_blend(), t);
            for i in 0..g.len() {
                let (_, pos) = decompose(&g, i);
                let (a, b) = (g.chaos()[i], g.target()[i]);
                let seg = b - a;
                let len2 = seg.length_squared();
                if len2 < 1e-8 {
                    continue;
                }
                let along = (pos - a).dot(seg) / len2;
                let closest = a + seg * along;
                assert!(pos.distance(closest) < 1e-3, "member {} left its segment", i);
                assert!((-1e-4..=1.0 + 1e-4).contains(&along));
                assert!((along - t).abs() < 1e-3, "weight {} p {}: {} vs {}", weight, p, along, t);
            }
        }
    }
}

#[test]
fn ornament_updates_reuse_the_display_buffer() {
    let mut g = group(1.6);
    let ptr = g.instances().as_ptr();
    let len = g.instances().len();
    for frame in 0..120 {
        g.update(frame as f32 / 120.0);
    }
    assert_eq!(ptr, g.instances().as_ptr());
    assert_eq!(len, g.instances().len());
}
