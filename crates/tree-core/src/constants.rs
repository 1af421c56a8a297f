use std::f32::consts::PI;

// Shared scene tuning constants. Cosmetic values here are defaults for
// `SceneConfig`, not invariants; URL overrides and tests may change them.

// Tree silhouette (world units)
pub const TREE_HEIGHT: f32 = 12.0;
pub const TREE_BASE_RADIUS: f32 = 4.8;
pub const CONE_JITTER: f32 = 0.075; // symmetric radial jitter on the cone surface
pub const CHAOS_RADIUS: f32 = 15.0; // scatter sphere for the chaos state

// Particle field
pub const PARTICLE_COUNT: usize = 12_000;
pub const MAX_PARTICLES: usize = 200_000; // keeps the sprite buffer well under GPU buffer limits
pub const SPRITE_MIN_SIZE: f32 = 0.035;
pub const SPRITE_MAX_SIZE: f32 = 0.11;
pub const PARTICLE_COLOR_A: [f32; 3] = [1.0, 0.78, 0.32]; // warm gold
pub const PARTICLE_COLOR_B: [f32; 3] = [0.22, 0.95, 0.55]; // emerald
pub const SHIMMER_AMPLITUDE: f32 = 0.06;
pub const SHIMMER_SPEED: f32 = 2.2; // radians per second

// Morph timing
pub const DAMPING_RATE: f32 = 1.6; // 1/s; ~95% of the way in under 2 s
pub const AUTO_SHIFT_INTERVAL_MS: u64 = 6_500;

// Bloom
pub const BLOOM_STRENGTH: f32 = 1.1;
pub const BLOOM_THRESHOLD: f32 = 0.7;

// Ornament palettes
pub const GIFT_PALETTE: [[f32; 3]; 3] = [
    [0.85, 0.08, 0.12], // ribbon red
    [0.95, 0.75, 0.25], // gold
    [0.92, 0.92, 0.95], // snow white
];
pub const BAUBLE_PALETTE: [[f32; 3]; 4] = [
    [0.9, 0.1, 0.15],
    [1.0, 0.8, 0.3],
    [0.75, 0.78, 0.82], // silver
    [0.1, 0.25, 0.8],   // deep blue
];
pub const GEM_PALETTE: [[f32; 3]; 3] = [
    [0.3, 0.95, 1.0],
    [1.0, 1.0, 1.0],
    [1.0, 0.45, 0.75],
];

// Ornament motion
pub const ORNAMENT_SPIN: [f32; 2] = [PI * 2.0, PI * 1.5]; // full-morph rotation about x and y
pub const ORNAMENT_SETTLE: f32 = 0.25; // fraction of scale lost when fully formed
pub const ORNAMENT_SURFACE_OFFSET: f32 = 0.22; // push targets just outside the silhouette

// Orbit camera
pub const CAMERA_DISTANCE: f32 = 24.0;
pub const CAMERA_MIN_DISTANCE: f32 = 8.0;
pub const CAMERA_MAX_DISTANCE: f32 = 60.0;
pub const CAMERA_PITCH: f32 = 0.18;
pub const CAMERA_PITCH_LIMIT: f32 = 1.35; // stay clear of the poles
pub const CAMERA_FOVY: f32 = PI / 4.0;
pub const CAMERA_AUTO_ROTATE: f32 = 0.12; // radians per second
pub const ORBIT_SENSITIVITY: f32 = 0.005; // radians per pixel
pub const ZOOM_SENSITIVITY: f32 = 0.12;

// Scene layout
pub const GROUND_MARGIN: f32 = 0.05; // gap between the tree base and the ground plane
pub const GROUND_HALF_EXTENT: f32 = 40.0;
pub const LIGHT_DIR: [f32; 3] = [0.45, 0.8, 0.35];
pub const LIGHT_INTENSITY: f32 = 1.4;
