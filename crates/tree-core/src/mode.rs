use std::fmt;
use std::str::FromStr;

/// Which arrangement the scene is heading toward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    Chaos,
    #[default]
    Formed,
}

impl Mode {
    /// Morph progress value this mode pulls toward.
    #[inline]
    pub fn target(self) -> f32 {
        match self {
            Mode::Chaos => 0.0,
            Mode::Formed => 1.0,
        }
    }

    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            Mode::Chaos => Mode::Formed,
            Mode::Formed => Mode::Chaos,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Chaos => "chaos",
            Mode::Formed => "formed",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chaos" | "0" => Ok(Mode::Chaos),
            "formed" | "tree" | "1" => Ok(Mode::Formed),
            other => Err(format!("unknown mode `{other}`")),
        }
    }
}

/// Current mode plus the auto-shift flag.
///
/// The interval itself belongs to whatever wall-clock timer the front-end
/// runs; that timer calls [`ModeDriver::on_interval_tick`] and the frame loop
/// only ever reads [`ModeDriver::mode`].
#[derive(Clone, Debug)]
pub struct ModeDriver {
    mode: Mode,
    auto_shift: bool,
    flips: u64,
}

impl ModeDriver {
    pub fn new(mode: Mode, auto_shift: bool) -> Self {
        Self {
            mode,
            auto_shift,
            flips: 0,
        }
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn auto_shift(&self) -> bool {
        self.auto_shift
    }

    /// Total number of mode changes, manual and timer-driven.
    pub fn flip_count(&self) -> u64 {
        self.flips
    }

    /// Manual flip; applies whether or not auto-shift is on.
    pub fn toggle_mode(&mut self) -> Mode {
        self.flip();
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if mode != self.mode {
            self.flip();
        }
    }

    pub fn set_auto_shift(&mut self, enabled: bool) {
        if self.auto_shift != enabled {
            log::debug!("[mode] auto-shift {}", if enabled { "on" } else { "off" });
        }
        self.auto_shift = enabled;
    }

    pub fn toggle_auto_shift(&mut self) -> bool {
        self.set_auto_shift(!self.auto_shift);
        self.auto_shift
    }

    /// One firing of the auto-shift interval. Returns whether the mode flipped.
    pub fn on_interval_tick(&mut self) -> bool {
        if !self.auto_shift {
            return false;
        }
        self.flip();
        true
    }

    fn flip(&mut self) {
        self.mode = self.mode.toggled();
        self.flips += 1;
        log::debug!("[mode] -> {}", self.mode);
    }
}

impl Default for ModeDriver {
    fn default() -> Self {
        Self::new(Mode::Formed, true)
    }
}
