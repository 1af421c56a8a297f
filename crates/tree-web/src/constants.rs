// Front-end wiring and frame tuning constants

// DOM hooks expected in index.html
pub const CANVAS_ID: &str = "tree-canvas";
pub const TOGGLE_MODE_ID: &str = "toggle-mode";
pub const TOGGLE_AUTO_ID: &str = "toggle-auto";
pub const HINT_ID: &str = "hint";

// Longest frame step fed to the morph; avoids a jump after a hidden tab resumes
pub const MAX_FRAME_DT_SEC: f32 = 0.1;

// Wheel normalisation (pixels per line / page for non-pixel delta modes)
pub const WHEEL_LINE_PX: f64 = 16.0;
pub const WHEEL_PAGE_PX: f64 = 400.0;
pub const WHEEL_PX_PER_STEP: f64 = 100.0;

// Minimum pointer travel (px) before a press counts as an orbit drag
pub const DRAG_DEADZONE_PX: f32 = 2.0;

// HDR clear color: deep night blue
pub const CLEAR_COLOR: [f64; 3] = [0.004, 0.007, 0.018];
pub const EXPOSURE: f32 = 1.0;
