pub mod camera;
pub mod config;
pub mod constants;
pub mod error;
pub mod field;
pub mod mesh;
pub mod mode;
pub mod morph;
pub mod ornaments;
pub mod sampling;
pub mod session;

pub use camera::*;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use field::*;
pub use mode::*;
pub use morph::*;
pub use ornaments::*;
pub use sampling::*;
pub use session::*;

// Shaders bundled as string constants
pub static SPRITES_WGSL: &str = include_str!("../shaders/sprites.wgsl");
pub static ORNAMENTS_WGSL: &str = include_str!("../shaders/ornaments.wgsl");
pub static GROUND_WGSL: &str = include_str!("../shaders/ground.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");
