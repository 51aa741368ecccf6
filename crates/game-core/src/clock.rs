use std::f32::consts::PI;

/// Fraction of a day that passes each tick.
pub const TIME_SPEED: f32 = 0.0001;

/// Time of day in `[0, 1)`, 0 being midnight.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DayClock {
    time: f32,
}

impl DayClock {
    pub fn new(time: f32) -> Self {
        Self {
            time: time.rem_euclid(1.0),
        }
    }

    pub fn tick(&mut self) {
        self.time += TIME_SPEED;
        if self.time > 1.0 {
            self.time = 0.0;
        }
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// 0 at midnight, 1 at noon.
    pub fn brightness(&self) -> f32 {
        (self.time * PI).sin()
    }

    /// Hour on a 24 hour clock, for the HUD.
    pub fn hour(&self) -> u32 {
        ((self.time * 24.0) as u32).min(23)
    }
}
