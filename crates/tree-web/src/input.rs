// Pure input helpers; no DOM types so host tests can include this file.
use crate::constants::{WHEEL_LINE_PX, WHEEL_PAGE_PX, WHEEL_PX_PER_STEP};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    ToggleMode,
    ToggleAutoShift,
    ToggleHint,
    ResetCamera,
}

#[inline]
pub fn key_action(key: &str) -> Option<KeyAction> {
    match key {
        " " | "Spacebar" | "m" | "M" => Some(KeyAction::ToggleMode),
        "a" | "A" => Some(KeyAction::ToggleAutoShift),
        "h" | "H" => Some(KeyAction::ToggleHint),
        "r" | "R" => Some(KeyAction::ResetCamera),
        _ => None,
    }
}

/// Pointer drag tracking for camera orbiting.
#[derive(Default, Clone, Copy, Debug)]
pub struct DragState {
    pub active: bool,
    pub moved: bool,
    pub last_x: f32,
    pub last_y: f32,
    pub travel: f32,
}

impl DragState {
    pub fn begin(&mut self, x: f32, y: f32) {
        *self = Self {
            active: true,
            moved: false,
            last_x: x,
            last_y: y,
            travel: 0.0,
        };
    }

    /// Returns the pixel delta since the last move while a drag is active.
    /// Movement inside `deadzone_px` of the press point is swallowed.
    pub fn move_to(&mut self, x: f32, y: f32, deadzone_px: f32) -> Option<(f32, f32)> {
        if !self.active {
            return None;
        }
        let dx = x - self.last_x;
        let dy = y - self.last_y;
        self.last_x = x;
        self.last_y = y;
        self.travel += (dx * dx + dy * dy).sqrt();
        if !self.moved && self.travel < deadzone_px {
            return None;
        }
        self.moved = true;
        Some((dx, dy))
    }

    pub fn end(&mut self) {
        self.active = false;
    }
}

/// Map a wheel event to camera zoom steps; positive zooms out.
#[inline]
pub fn wheel_zoom_delta(delta_y: f64, delta_mode: u32) -> f32 {
    let px = match delta_mode {
        1 => delta_y * WHEEL_LINE_PX,
        2 => delta_y * WHEEL_PAGE_PX,
        _ => delta_y,
    };
    ((px / WHEEL_PX_PER_STEP) as f32).clamp(-1.0, 1.0)
}

#[inline]
pub fn auto_shift_label(enabled: bool) -> &'static str {
    if enabled {
        "Auto-shift: on"
    } else {
        "Auto-shift: off"
    }
}

/// What a `pagehide` means for the running scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageHide {
    /// Entering the back/forward cache; animation frames and timers resume on restore.
    Frozen,
    /// The document is going away for good.
    Unloading,
}

#[inline]
pub fn page_hide_kind(persisted: bool) -> PageHide {
    if persisted {
        PageHide::Frozen
    } else {
        PageHide::Unloading
    }
}
