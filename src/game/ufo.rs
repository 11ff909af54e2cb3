use rand::Rng;

use crate::game::combat::{self, Projectile};
use crate::geometry::Rect;

pub const UFO_WIDTH: f32 = 5.0;
pub const UFO_HEIGHT: f32 = 1.5;
const UFO_Y: f32 = 0.2;
const UFO_SPEED: f32 = 0.3;
pub const UFO_BONUS: u32 = 200;
// Spawn countdown interval, in ticks (~5-15 s at 60 Hz)
const SPAWN_TICKS_MIN: u32 = 300;
const SPAWN_TICKS_MAX: u32 = 900;

/// The bonus saucer that crosses the top of the playfield. Idle most of the
/// time; a countdown re-armed on every despawn decides when it next appears,
/// entering from a random edge and flying straight across.
pub struct Ufo {
    pub x: f32,
    pub y: f32,
    pub active: bool,
    direction: f32,
    spawn_timer: u32,
}

impl Ufo {
    pub fn new(rng: &mut impl Rng) -> Self {
        Ufo {
            x: 0.0,
            y: UFO_Y,
            active: false,
            direction: 1.0,
            spawn_timer: Self::draw_timer(rng),
        }
    }

    fn draw_timer(rng: &mut impl Rng) -> u32 {
        rng.gen_range(SPAWN_TICKS_MIN..=SPAWN_TICKS_MAX)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, UFO_WIDTH, UFO_HEIGHT)
    }

    /// One controller tick. Returns the bonus awarded if the saucer was shot
    /// down this tick.
    pub fn update(
        &mut self,
        field_width: f32,
        projectiles: &mut [Projectile],
        rng: &mut impl Rng,
    ) -> u32 {
        if !self.active {
            self.spawn_timer = self.spawn_timer.saturating_sub(1);
            if self.spawn_timer == 0 {
                self.active = true;
                if rng.gen_bool(0.5) {
                    self.direction = 1.0;
                    self.x = -UFO_WIDTH;
                } else {
                    self.direction = -1.0;
                    self.x = field_width;
                }
            }
            return 0;
        }

        self.x += UFO_SPEED * self.direction;

        if combat::resolve_hit(&self.rect(), projectiles) {
            self.despawn(rng);
            return UFO_BONUS;
        }
        // Flew off the far side: no score.
        if self.x > field_width || self.x + UFO_WIDTH < 0.0 {
            self.despawn(rng);
        }
        0
    }

    fn despawn(&mut self, rng: &mut impl Rng) {
        self.active = false;
        self.spawn_timer = Self::draw_timer(rng);
    }

    #[cfg(test)]
    pub(crate) fn set_spawn_timer(&mut self, ticks: u32) {
        self.spawn_timer = ticks;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const FIELD_WIDTH: f32 = 80.0;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    // Scenario C: countdown of one tick leaves the saucer active at an edge,
    // heading into the playfield.
    #[test]
    fn spawns_at_an_edge_heading_inward() {
        let mut rng = rng();
        let mut ufo = Ufo::new(&mut rng);
        ufo.set_spawn_timer(1);
        let mut projectiles = Vec::new();
        ufo.update(FIELD_WIDTH, &mut projectiles, &mut rng);
        assert!(ufo.active);
        if ufo.direction > 0.0 {
            assert_eq!(ufo.x, -UFO_WIDTH);
        } else {
            assert_eq!(ufo.x, FIELD_WIDTH);
        }
    }

    #[test]
    fn spawn_timer_counts_down_while_idle() {
        let mut rng = rng();
        let mut ufo = Ufo::new(&mut rng);
        ufo.set_spawn_timer(5);
        let mut projectiles = Vec::new();
        for _ in 0..4 {
            ufo.update(FIELD_WIDTH, &mut projectiles, &mut rng);
            assert!(!ufo.active);
        }
        ufo.update(FIELD_WIDTH, &mut projectiles, &mut rng);
        assert!(ufo.active);
    }

    #[test]
    fn crossing_without_a_hit_scores_nothing() {
        let mut rng = rng();
        let mut ufo = Ufo::new(&mut rng);
        ufo.set_spawn_timer(1);
        let mut projectiles = Vec::new();
        let mut total = 0;
        // More than enough ticks to cross the whole field.
        for _ in 0..((FIELD_WIDTH / UFO_SPEED) as usize * 2 + 20) {
            total += ufo.update(FIELD_WIDTH, &mut projectiles, &mut rng);
            if !ufo.active {
                break;
            }
        }
        assert_eq!(total, 0);
        assert!(!ufo.active);
    }

    #[test]
    fn shot_awards_bonus_and_rearms() {
        let mut rng = rng();
        let mut ufo = Ufo::new(&mut rng);
        ufo.set_spawn_timer(1);
        let mut projectiles = Vec::new();
        ufo.update(FIELD_WIDTH, &mut projectiles, &mut rng);
        assert!(ufo.active);
        // Park a projectile where the saucer will be next tick.
        let mut projectiles = vec![Projectile {
            x: ufo.x + UFO_SPEED * ufo.direction + 1.0,
            y: ufo.y + 0.5,
            dir: -1.0,
            active: true,
        }];
        let bonus = ufo.update(FIELD_WIDTH, &mut projectiles, &mut rng);
        assert_eq!(bonus, UFO_BONUS);
        assert!(!ufo.active);
        assert!(!projectiles[0].active);
        assert!(ufo.spawn_timer >= SPAWN_TICKS_MIN);
    }
}
