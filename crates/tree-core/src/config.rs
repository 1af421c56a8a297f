//! Scene configuration with defaults from [`crate::constants`].
//!
//! The front-end starts from [`SceneConfig::default`], applies URL query
//! overrides with [`SceneConfig::apply_query`], then validates.

use crate::constants::*;
use crate::error::ConfigError;
use crate::mode::Mode;
use crate::ornaments::OrnamentShape;
use smallvec::SmallVec;
use std::time::Duration;

/// Silhouette and scatter dimensions.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeShape {
    pub height: f32,
    pub base_radius: f32,
    pub jitter: f32,
    pub chaos_radius: f32,
}

impl TreeShape {
    /// World-space y of the cone base after recentering.
    #[inline]
    pub fn base_y(&self) -> f32 {
        -self.height * 0.5
    }
}

impl Default for TreeShape {
    fn default() -> Self {
        Self {
            height: TREE_HEIGHT,
            base_radius: TREE_BASE_RADIUS,
            jitter: CONE_JITTER,
            chaos_radius: CHAOS_RADIUS,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub count: usize,
    pub min_size: f32,
    pub max_size: f32,
    pub color_a: [f32; 3],
    pub color_b: [f32; 3],
    pub shimmer_amplitude: f32,
    pub shimmer_speed: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: PARTICLE_COUNT,
            min_size: SPRITE_MIN_SIZE,
            max_size: SPRITE_MAX_SIZE,
            color_a: PARTICLE_COLOR_A,
            color_b: PARTICLE_COLOR_B,
            shimmer_amplitude: SHIMMER_AMPLITUDE,
            shimmer_speed: SHIMMER_SPEED,
        }
    }
}

pub type Palette = SmallVec<[[f32; 3]; 4]>;

/// One class of instanced ornament.
#[derive(Clone, Debug, PartialEq)]
pub struct OrnamentSpec {
    pub name: &'static str,
    pub shape: OrnamentShape,
    pub count: usize,
    /// Convergence weight; exponent applied to the eased progress.
    pub weight: f32,
    pub palette: Palette,
    pub base_scale: f32,
    pub spin: [f32; 2],
    pub settle: f32,
    pub surface_offset: f32,
}

impl OrnamentSpec {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.weight.is_finite() && self.weight > 0.0) {
            return Err(ConfigError::NonPositiveWeight {
                group: self.name.to_string(),
                weight: self.weight,
            });
        }
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette(self.name.to_string()));
        }
        Ok(())
    }
}

/// Gift boxes, baubles and gems; heavy gifts land last, gems first.
pub fn default_ornaments() -> Vec<OrnamentSpec> {
    vec![
        OrnamentSpec {
            name: "gifts",
            shape: OrnamentShape::Cube,
            count: 48,
            weight: 1.6,
            palette: SmallVec::from_slice(&GIFT_PALETTE),
            base_scale: 0.34,
            spin: ORNAMENT_SPIN,
            settle: ORNAMENT_SETTLE,
            surface_offset: ORNAMENT_SURFACE_OFFSET + 0.1,
        },
        OrnamentSpec {
            name: "baubles",
            shape: OrnamentShape::Sphere,
            count: 160,
            weight: 1.0,
            palette: SmallVec::from_slice(&BAUBLE_PALETTE),
            base_scale: 0.24,
            spin: ORNAMENT_SPIN,
            settle: ORNAMENT_SETTLE,
            surface_offset: ORNAMENT_SURFACE_OFFSET,
        },
        OrnamentSpec {
            name: "gems",
            shape: OrnamentShape::Polyhedron,
            count: 72,
            weight: 0.6,
            palette: SmallVec::from_slice(&GEM_PALETTE),
            base_scale: 0.2,
            spin: [ORNAMENT_SPIN[0] * 1.5, ORNAMENT_SPIN[1] * 2.0],
            settle: ORNAMENT_SETTLE,
            surface_offset: ORNAMENT_SURFACE_OFFSET,
        },
    ]
}

#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub tree: TreeShape,
    pub field: FieldConfig,
    pub ornaments: Vec<OrnamentSpec>,
    pub damping_rate: f32,
    pub auto_shift_interval: Duration,
    pub initial_mode: Mode,
    pub auto_shift: bool,
    pub bloom_strength: f32,
    pub bloom_threshold: f32,
    /// Fixed RNG seed; `None` draws one from the platform.
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            tree: TreeShape::default(),
            field: FieldConfig::default(),
            ornaments: default_ornaments(),
            damping_rate: DAMPING_RATE,
            auto_shift_interval: Duration::from_millis(AUTO_SHIFT_INTERVAL_MS),
            initial_mode: Mode::Formed,
            auto_shift: true,
            bloom_strength: BLOOM_STRENGTH,
            bloom_threshold: BLOOM_THRESHOLD,
            seed: None,
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.tree;
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !(positive(t.height) && positive(t.base_radius) && positive(t.chaos_radius)) {
            return Err(ConfigError::InvalidTreeShape {
                height: t.height,
                base_radius: t.base_radius,
                chaos_radius: t.chaos_radius,
            });
        }
        if self.field.count == 0 {
            return Err(ConfigError::EmptyField);
        }
        if self.field.count > MAX_PARTICLES {
            return Err(ConfigError::TooManyParticles {
                count: self.field.count,
                max: MAX_PARTICLES,
            });
        }
        let f = &self.field;
        if !(positive(f.min_size) && f.max_size.is_finite() && f.min_size <= f.max_size) {
            return Err(ConfigError::InvalidSpriteSize {
                min: f.min_size,
                max: f.max_size,
            });
        }
        finite("tree.jitter", t.jitter)?;
        finite("field.shimmer_amplitude", f.shimmer_amplitude)?;
        finite("field.shimmer_speed", f.shimmer_speed)?;
        finite("bloom_strength", self.bloom_strength)?;
        finite("bloom_threshold", self.bloom_threshold)?;
        for spec in &self.ornaments {
            spec.validate()?;
        }
        if !(self.damping_rate.is_finite() && self.damping_rate > 0.0) {
            return Err(ConfigError::InvalidDampingRate(self.damping_rate));
        }
        if self.auto_shift_interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(())
    }

    /// Apply `key=value` overrides from a URL query string (leading `?`
    /// optional). Unknown keys and unparsable values are logged and skipped.
    /// Returns the number of overrides applied.
    pub fn apply_query(&mut self, query: &str) -> usize {
        let mut applied = 0;
        for pair in query.trim_start_matches('?').split('&') {
            if pair.is_empty() {
                continue;
            }
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let ok = match key {
                "seed" => value.parse().map(|v| self.seed = Some(v)).is_ok(),
                "particles" => value
                    .parse::<usize>()
                    .map(|v| self.field.count = v)
                    .is_ok(),
                "auto" => parse_flag(value).map(|v| self.auto_shift = v).is_some(),
                "mode" => value
                    .parse::<Mode>()
                    .map(|v| self.initial_mode = v)
                    .is_ok(),
                "interval" => value
                    .parse::<u64>()
                    .map(|ms| self.auto_shift_interval = Duration::from_millis(ms))
                    .is_ok(),
                "damping" => value
                    .parse::<f32>()
                    .map(|v| self.damping_rate = v)
                    .is_ok(),
                "bloom" => value
                    .parse::<f32>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .map(|v| self.bloom_strength = v.max(0.0))
                    .is_some(),
                _ => {
                    log::warn!("[config] unknown query key `{key}`");
                    continue;
                }
            };
            if ok {
                applied += 1;
            } else {
                log::warn!("[config] ignoring `{key}={value}`");
            }
        }
        applied
    }
}

fn finite(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { name, value })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
