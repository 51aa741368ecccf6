use common::Entity;

pub const METER_WIDTH: i32 = 50;
pub const METER_HEIGHT: i32 = 200;
pub const METER_BORDER: i32 = 5;
/// Charge gained per tick while the button is held.
pub const CHARGE_SPEED: f32 = 0.05;
/// Charge level that gives a perfect cast.
pub const OPTIMAL_CHARGE: f32 = 0.9;

/// Oscillating cast-strength gauge shown while charging.
#[derive(Clone, Debug)]
pub struct ChargeMeter {
    pub body: Entity,
    pub border: i32,
    charge: f32,
    speed: f32,
    optimal: f32,
}

impl ChargeMeter {
    /// Places the meter against the right edge of `player`.
    pub fn beside(player: &Entity) -> Self {
        Self::new(
            Entity::new(player.right(), player.y, METER_WIDTH, METER_HEIGHT),
            CHARGE_SPEED,
            OPTIMAL_CHARGE,
        )
    }

    pub fn new(body: Entity, speed: f32, optimal: f32) -> Self {
        Self {
            body,
            border: METER_BORDER,
            charge: 0.0,
            speed,
            optimal: optimal.clamp(0.0, 1.0),
        }
    }

    /// Moves the charge one step, bouncing off 0 and 1.
    pub fn increase_charge(&mut self) {
        self.charge += self.speed;
        if self.charge > 1.0 || self.charge < 0.0 {
            self.speed = -self.speed;
            self.charge = self.charge.clamp(0.0, 1.0);
        }
    }

    pub fn charge(&self) -> f32 {
        self.charge
    }

    pub fn optimal(&self) -> f32 {
        self.optimal
    }

    /// `1` at the optimal charge, falling off linearly either side.
    pub fn accuracy(&self) -> f32 {
        1.0 - (self.optimal - self.charge).abs()
    }

    /// Height of the filled part of the gauge in world units.
    pub fn fill_height(&self) -> i32 {
        (self.body.h as f32 * self.charge).round() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meter() -> ChargeMeter {
        ChargeMeter::beside(&Entity::new(100, 200, 96, 144))
    }

    #[test]
    fn sits_beside_player() {
        let m = meter();
        assert_eq!((m.body.x, m.body.y), (196, 200));
        assert_eq!((m.body.w, m.body.h), (METER_WIDTH, METER_HEIGHT));
    }

    #[test]
    fn perfect_at_optimal() {
        let mut m = meter();
        m.charge = OPTIMAL_CHARGE;
        assert_eq!(m.accuracy(), 1.0);
    }

    #[test]
    fn accuracy_is_symmetric() {
        let mut m = meter();
        m.charge = 0.7;
        let below = m.accuracy();
        m.optimal = 0.5;
        m.charge = 0.3;
        let mirrored = m.accuracy();
        assert!((below - 0.8).abs() < 1e-6);
        assert!((mirrored - 0.8).abs() < 1e-6);
    }

    #[test]
    fn charge_bounces_within_bounds() {
        let mut m = meter();
        let mut rising = true;
        let mut last = m.charge();
        let mut reversals = 0;
        for _ in 0..200 {
            m.increase_charge();
            let c = m.charge();
            assert!((0.0..=1.0).contains(&c));
            assert!(m.accuracy() >= 0.0);
            if (c > last) != rising {
                rising = !rising;
                reversals += 1;
            }
            last = c;
        }
        assert!(reversals >= 4);
    }

    #[test]
    fn fill_tracks_charge() {
        let mut m = meter();
        assert_eq!(m.fill_height(), 0);
        m.charge = 0.5;
        assert_eq!(m.fill_height(), 100);
    }
}
