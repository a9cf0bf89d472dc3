use log::info;

use super::{Chip8, Chip8Error, CycleStatus, DisplaySurface};
use crate::u4;

pub const DEFAULT_CPU_HZ: f32 = 700.0;
pub const DEFAULT_TIMER_HZ: f32 = 60.0;

/// Clock rates for [`Chip8Runner`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunnerConfig {
    /// Instructions executed per second.
    pub cpu_hz: f32,
    /// Timer ticks per second.
    pub timer_hz: f32,
}

impl RunnerConfig {
    /// Both rates must be finite and above zero.
    pub fn validate(&self) -> Result<(), Chip8Error> {
        for (clock, hz) in [("cpu", self.cpu_hz), ("timer", self.timer_hz)] {
            if !(hz.is_finite() && hz > 0.0) {
                return Err(Chip8Error::InvalidClockRate { clock, hz });
            }
        }
        Ok(())
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            cpu_hz: DEFAULT_CPU_HZ,
            timer_hz: DEFAULT_TIMER_HZ,
        }
    }
}

/// What happened during one call to [`Chip8Runner::update`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameSummary {
    pub cycles: u32,
    pub ticks: u32,
    /// The sound timer reached zero during this update.
    pub sound_stopped: bool,
    /// The program is waiting for a key press.
    pub blocked: bool,
    /// The program ran into the end-of-program sentinel.
    pub halted: bool,
}

/// High-level emulator runner that manages timing internally.
///
/// The host calls `update` once per frame with the elapsed time; the runner
/// turns that into CPU cycles and 60Hz timer ticks on two independent clocks.
pub struct Chip8Runner<D: DisplaySurface> {
    chip8: Chip8<D>,
    cpu_time_step: f32,
    timer_time_step: f32,
    cpu_dt_accumulator: f32,
    timer_dt_accumulator: f32,
    beeping: bool,
}

impl<D: DisplaySurface> Chip8Runner<D> {
    pub fn new(chip8: Chip8<D>) -> Self {
        Self::build(chip8, RunnerConfig::default())
    }

    /// Fails if either clock rate is zero, negative or not finite.
    pub fn with_config(chip8: Chip8<D>, config: RunnerConfig) -> Result<Self, Chip8Error> {
        config.validate()?;
        Ok(Self::build(chip8, config))
    }

    fn build(chip8: Chip8<D>, config: RunnerConfig) -> Self {
        Self {
            chip8,
            cpu_time_step: 1.0 / config.cpu_hz,
            timer_time_step: 1.0 / config.timer_hz,
            cpu_dt_accumulator: 0.0,
            timer_dt_accumulator: 0.0,
            beeping: false,
        }
    }

    /// Update emulator by delta time, handles both CPU and timer cycles.
    ///
    /// Runs as many CPU cycles and timer updates as needed based on the elapsed time `dt`.
    /// Returns early if a frame has to be rendered before the next CPU cycle.
    /// Engine faults stop the update and are returned to the caller.
    pub fn update(&mut self, dt: f32) -> Result<FrameSummary, Chip8Error> {
        let mut summary = FrameSummary::default();

        self.cpu_dt_accumulator += dt;
        self.timer_dt_accumulator += dt;

        while self.timer_dt_accumulator >= self.timer_time_step {
            self.timer_dt_accumulator -= self.timer_time_step;
            summary.ticks += 1;
            summary.sound_stopped |= self.chip8.tick();
        }

        while self.cpu_dt_accumulator >= self.cpu_time_step {
            self.cpu_dt_accumulator -= self.cpu_time_step;
            summary.cycles += 1;

            match self.chip8.cycle()? {
                CycleStatus::Continue => continue,
                CycleStatus::Blocked => summary.blocked = true,
                CycleStatus::Halted => summary.halted = true,
                CycleStatus::Drew => {}
            }

            // If we need to wait for the next frame we stop executing cycles.
            // We clear the accumulator to avoid "catching up" in the next frame.
            self.cpu_dt_accumulator = 0.0;
            break;
        }

        self.track_sound();
        Ok(summary)
    }

    fn track_sound(&mut self) {
        let beeping = self.chip8.should_beep();
        if beeping != self.beeping {
            info!("sound {}", if beeping { "on" } else { "off" });
            self.beeping = beeping;
        }
    }

    /// Returns true if the sound timer is active, indicating a beep should be played.
    pub fn should_beep(&self) -> bool {
        self.chip8.should_beep()
    }

    /// Set the state of a key on the keypad.
    pub fn set_key(&mut self, key: u4, pressed: bool) {
        self.chip8.set_key(key, pressed)
    }

    /// Flushes the display to the screen, once per host frame.
    pub fn present(&mut self) -> Result<(), D::Error> {
        self.chip8.present()
    }

    pub fn chip8_ref(&self) -> &Chip8<D> {
        &self.chip8
    }

    pub fn chip8_mut(&mut self) -> &mut Chip8<D> {
        &mut self.chip8
    }
}
