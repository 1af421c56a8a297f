use thiserror::Error;

/// Rejected scene configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("particle field must contain at least one particle")]
    EmptyField,
    #[error("particle count {count} exceeds the maximum of {max}")]
    TooManyParticles { count: usize, max: usize },
    #[error("`{name}` must be finite, got {value}")]
    NonFinite { name: &'static str, value: f32 },
    #[error("sprite sizes must satisfy 0 < min <= max (min {min}, max {max})")]
    InvalidSpriteSize { min: f32, max: f32 },
    #[error(
        "tree dimensions must be positive (height {height}, base radius {base_radius}, chaos radius {chaos_radius})"
    )]
    InvalidTreeShape {
        height: f32,
        base_radius: f32,
        chaos_radius: f32,
    },
    #[error("ornament group `{group}` has non-positive convergence weight {weight}")]
    NonPositiveWeight { group: String, weight: f32 },
    #[error("ornament group `{0}` has an empty palette")]
    EmptyPalette(String),
    #[error("damping rate must be positive and finite, got {0}")]
    InvalidDampingRate(f32),
    #[error("auto-shift interval must be non-zero")]
    ZeroInterval,
}
