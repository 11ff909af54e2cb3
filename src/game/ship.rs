use crate::geometry::{clamp, Rect};
use crate::input::{Button, Controls};

pub const SHIP_WIDTH: f32 = 4.0;
pub const SHIP_HEIGHT: f32 = 1.5;
const SHIP_MAX_SPEED: f32 = 0.5;
// How far above the playfield floor the cannon sits
const SHIP_FLOOR_OFFSET: f32 = 3.0;

/// The player's cannon. One instance per run; never destroyed, only
/// recentered when a wave is cleared.
pub struct Ship {
    pub x: f32,
    pub y: f32,
    pub velocity_x: f32,
}

impl Ship {
    pub fn new(field_width: f32, field_height: f32) -> Self {
        Ship {
            x: field_width * 0.5 - SHIP_WIDTH * 0.5,
            y: field_height - SHIP_FLOOR_OFFSET,
            velocity_x: 0.0,
        }
    }

    pub fn recenter(&mut self, field_width: f32) {
        self.x = field_width * 0.5 - SHIP_WIDTH * 0.5;
        self.velocity_x = 0.0;
    }

    /// Held-key acceleration rule: full speed while a direction is held,
    /// stop dead otherwise. Position is clamped to the playfield.
    pub fn update(&mut self, input: &Controls, field_width: f32) {
        self.velocity_x = if input.is_held(Button::Left) {
            -SHIP_MAX_SPEED
        } else if input.is_held(Button::Right) {
            SHIP_MAX_SPEED
        } else {
            0.0
        };
        self.x = clamp(self.x + self.velocity_x, 0.0, field_width - SHIP_WIDTH);
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, SHIP_WIDTH, SHIP_HEIGHT)
    }

    pub fn muzzle_x(&self) -> f32 {
        self.x + SHIP_WIDTH * 0.5
    }
}
