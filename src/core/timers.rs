/// Delay and sound countdowns, ticked by the host at `consts::TIMER_HZ`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Timers {
    delay: u8,
    sound: u8,
    beep: bool,
}

impl Timers {
    pub fn tick(&mut self) {
        self.beep = self.sound == 1;
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }

    /// True only for the tick that took the sound timer from 1 to 0.
    pub fn beep_pending(&self) -> bool {
        self.beep
    }

    pub fn delay(&self) -> u8 {
        self.delay
    }

    pub fn sound(&self) -> u8 {
        self.sound
    }

    pub fn set_delay(&mut self, value: u8) {
        self.delay = value;
    }

    pub fn set_sound(&mut self, value: u8) {
        self.sound = value;
    }
}
