//! The scene's composition root state.
//!
//! One `TreeSession` per mounted scene. The frame callback calls
//! [`TreeSession::frame`]; the auto-shift timer only touches the mode driver.

use crate::config::SceneConfig;
use crate::error::ConfigError;
use crate::field::ParticleField;
use crate::mode::{Mode, ModeDriver};
use crate::morph::MorphController;
use crate::ornaments::OrnamentGroup;
use rand::Rng;

pub struct TreeSession {
    config: SceneConfig,
    field: ParticleField,
    groups: Vec<OrnamentGroup>,
    morph: MorphController,
    driver: ModeDriver,
    time_sec: f32,
    frames: u64,
}

impl TreeSession {
    pub fn new<R: Rng + ?Sized>(config: SceneConfig, rng: &mut R) -> Result<Self, ConfigError> {
        config.validate()?;
        let field = ParticleField::generate(rng, &config.tree, &config.field)?;
        let groups = config
            .ornaments
            .iter()
            .map(|spec| OrnamentGroup::generate(rng, spec, &config.tree))
            .collect::<Result<Vec<_>, _>>()?;
        let morph = MorphController::new(config.initial_mode, config.damping_rate);
        let driver = ModeDriver::new(config.initial_mode, config.auto_shift);
        log::info!(
            "[session] particles={} ornaments={} mode={} auto_shift={}",
            field.len(),
            groups.iter().map(|g| g.len()).sum::<usize>(),
            config.initial_mode,
            config.auto_shift
        );
        let mut session = Self {
            config,
            field,
            groups,
            morph,
            driver,
            time_sec: 0.0,
            frames: 0,
        };
        session.refresh_buffers();
        Ok(session)
    }

    /// Per-frame work: advance progress, then rebuild every display buffer.
    pub fn frame(&mut self, dt_sec: f32, time_sec: f32) {
        self.morph.step(dt_sec, self.driver.mode());
        self.time_sec = time_sec;
        self.frames += 1;
        self.refresh_buffers();
    }

    fn refresh_buffers(&mut self) {
        let progress = self.morph.progress();
        self.field.update(progress, self.time_sec);
        for group in &mut self.groups {
            group.update(progress);
        }
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        self.morph.progress()
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.driver.mode()
    }

    pub fn auto_shift(&self) -> bool {
        self.driver.auto_shift()
    }

    pub fn toggle_mode(&mut self) -> Mode {
        self.driver.toggle_mode()
    }

    pub fn toggle_auto_shift(&mut self) -> bool {
        self.driver.toggle_auto_shift()
    }

    pub fn on_interval_tick(&mut self) -> bool {
        self.driver.on_interval_tick()
    }

    pub fn driver(&self) -> &ModeDriver {
        &self.driver
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn groups(&self) -> &[OrnamentGroup] {
        &self.groups
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn time_sec(&self) -> f32 {
        self.time_sec
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}
