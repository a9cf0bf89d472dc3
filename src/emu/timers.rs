/// Delay and sound timers. Both count down towards zero on every `tick`,
/// which the host calls at 60Hz independently of the CPU cycle rate.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Timers {
    /// Delay timer: decrements at 60Hz until it reaches 0
    pub delay: u8,
    /// Sound timer: decrements at 60Hz, beeps while non-zero
    pub sound: u8,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decrements both timers if non-zero.
    ///
    /// Returns true when the sound timer went from non-zero to zero on this tick,
    /// i.e. the host should stop any sound it is playing.
    pub fn tick(&mut self) -> bool {
        self.delay = self.delay.saturating_sub(1);

        let was_sounding = self.sound > 0;
        self.sound = self.sound.saturating_sub(1);
        was_sounding && self.sound == 0
    }

    pub fn should_beep(&self) -> bool {
        self.sound > 0
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_decrements_independently() {
        let mut timers = Timers { delay: 2, sound: 0 };
        assert!(!timers.tick());
        assert_eq!(timers, Timers { delay: 1, sound: 0 });
        timers.tick();
        timers.tick();
        assert_eq!(timers, Timers::default());
    }

    #[test]
    fn sound_stop_reported_once() {
        let mut timers = Timers { delay: 0, sound: 2 };
        assert!(timers.should_beep());
        assert!(!timers.tick());
        assert!(timers.tick());
        assert!(!timers.should_beep());
        assert!(!timers.tick());
    }
}
