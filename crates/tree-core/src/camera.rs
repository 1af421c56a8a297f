//! Orbit camera shared with the web frontend.
//!
//! Platform-free: the frontend feeds pointer deltas and wheel steps in, and
//! reads matrices and billboard axes out.

use crate::constants::*;
use glam::{Mat4, Vec3};

/// Right-handed perspective camera orbiting `target`.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
    pub auto_rotate_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            yaw: 0.0,
            pitch: CAMERA_PITCH,
            distance: CAMERA_DISTANCE,
            aspect: 16.0 / 9.0,
            fovy_radians: CAMERA_FOVY,
            znear: 0.1,
            zfar: 200.0,
            auto_rotate_speed: CAMERA_AUTO_ROTATE,
            min_distance: CAMERA_MIN_DISTANCE,
            max_distance: CAMERA_MAX_DISTANCE,
        }
    }
}

impl OrbitCamera {
    pub fn eye(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + Vec3::new(cp * sy, sp, cp * cy) * self.distance
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space camera right and up axes, for screen-facing sprites.
    pub fn billboard_axes(&self) -> (Vec3, Vec3) {
        let v = self.view_matrix();
        let right = Vec3::new(v.x_axis.x, v.y_axis.x, v.z_axis.x);
        let up = Vec3::new(v.x_axis.y, v.y_axis.y, v.z_axis.y);
        (right, up)
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    /// Pointer drag in pixels.
    pub fn orbit(&mut self, dx_px: f32, dy_px: f32) {
        self.yaw -= dx_px * ORBIT_SENSITIVITY;
        self.pitch = (self.pitch + dy_px * ORBIT_SENSITIVITY)
            .clamp(-CAMERA_PITCH_LIMIT, CAMERA_PITCH_LIMIT);
    }

    /// Positive `delta` moves away.
    pub fn zoom(&mut self, delta: f32) {
        let factor = (1.0 + delta * ZOOM_SENSITIVITY).max(0.1);
        self.distance = (self.distance * factor).clamp(self.min_distance, self.max_distance);
    }

    /// Slow idle rotation, suspended while the user is dragging.
    pub fn update(&mut self, dt_sec: f32, interacting: bool) {
        if !interacting && dt_sec.is_finite() && dt_sec > 0.0 {
            self.yaw = (self.yaw + self.auto_rotate_speed * dt_sec) % std::f32::consts::TAU;
        }
    }

    pub fn reset(&mut self) {
        let aspect = self.aspect;
        *self = Self {
            aspect,
            ..Self::default()
        };
    }
}
