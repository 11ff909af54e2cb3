use crate::game::combat::{self, Projectile};
use crate::geometry::Rect;

pub const INVADER_WIDTH: f32 = 4.0;
pub const INVADER_HEIGHT: f32 = 1.5;
const INVADER_PADDING: f32 = 2.0;
pub const FORMATION_ROWS: usize = 4;
const GRID_MARGIN: f32 = 4.0;
const TOP_ROW_Y: f32 = 2.0;
const ROW_GAP: f32 = 1.0;
const BASE_SPEED: f32 = 0.12;
const SPEED_PER_WAVE: f32 = 0.04;
// Moving ticks per sweep half-period before a scheduled reversal
const MOVE_STEPS: u32 = 50;
const DROP_DISTANCE: f32 = INVADER_HEIGHT;
// Drop-in staging: how far above the resting rows a wave starts, and how
// fast it descends per tick
const STAGING_OFFSET: f32 = 8.0;
const STAGING_SPEED: f32 = 0.4;

/// Points per row, top row first. Back rows pay the most.
pub const ROW_SCORES: [u32; FORMATION_ROWS] = [40, 30, 20, 10];

#[derive(Clone, Debug)]
pub struct Invader {
    pub x: f32,
    pub y: f32,
    pub target_y: f32,
    pub row: usize,
    pub active: bool,
}

impl Invader {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, INVADER_WIDTH, INVADER_HEIGHT)
    }

    fn arrived(&self) -> bool {
        self.y >= self.target_y
    }
}

/// The full invader grid plus its shared sweep-and-descend motion state.
/// Invaders are deactivated in place when hit; the collection is only
/// replaced wholesale when the next wave is built.
pub struct Formation {
    pub invaders: Vec<Invader>,
    speed: f32,
    direction: f32,
    steps: u32,
    drop_pending: bool,
}

impl Formation {
    /// Builds the grid for `wave` (1-based). The wave starts staged above
    /// its resting rows and drops in before the sweep begins. Speed scales
    /// with the wave number.
    pub fn build(wave: u32, field_width: f32) -> Self {
        let columns = Self::columns_for(field_width);
        let mut invaders = Vec::with_capacity(FORMATION_ROWS * columns);
        for row in 0..FORMATION_ROWS {
            let resting_y = TOP_ROW_Y + row as f32 * (INVADER_HEIGHT + ROW_GAP);
            for col in 0..columns {
                invaders.push(Invader {
                    x: GRID_MARGIN + col as f32 * (INVADER_WIDTH + INVADER_PADDING),
                    y: resting_y - STAGING_OFFSET,
                    target_y: resting_y,
                    row,
                    active: true,
                });
            }
        }
        Formation {
            invaders,
            speed: BASE_SPEED + SPEED_PER_WAVE * wave.saturating_sub(1) as f32,
            direction: 1.0,
            steps: 0,
            drop_pending: false,
        }
    }

    /// Columns that fit the playfield at the fixed cell size and padding,
    /// never less than one.
    pub fn columns_for(field_width: f32) -> usize {
        let usable = field_width - 2.0 * GRID_MARGIN + INVADER_PADDING;
        let count = (usable / (INVADER_WIDTH + INVADER_PADDING)).floor() as isize;
        count.max(1) as usize
    }

    pub fn direction(&self) -> f32 {
        self.direction
    }

    pub fn active_count(&self) -> usize {
        self.invaders.iter().filter(|i| i.active).count()
    }

    pub fn cleared(&self) -> bool {
        self.invaders.iter().all(|i| !i.active)
    }

    /// Lower edge of the deepest active invader, if any survive.
    pub fn lowest_edge(&self) -> Option<f32> {
        self.invaders
            .iter()
            .filter(|i| i.active)
            .map(|i| i.y + INVADER_HEIGHT)
            .fold(None, |acc, edge| Some(acc.map_or(edge, |a: f32| a.max(edge))))
    }

    pub fn staging(&self) -> bool {
        self.invaders.iter().any(|i| i.active && !i.arrived())
    }

    /// One tick of formation motion. Returns the points scored by
    /// projectiles that connected this tick.
    ///
    /// While staging, invaders only descend toward their resting rows and
    /// the sweep is gated. Once settled: a reversal tick (step budget spent,
    /// or the next horizontal delta would push an active invader out of
    /// bounds) flips the direction, schedules a one-row drop, and moves
    /// nothing; every other tick translates the whole grid.
    pub fn advance(&mut self, field_width: f32, projectiles: &mut [Projectile]) -> u32 {
        if self.staging() {
            for inv in self.invaders.iter_mut().filter(|i| i.active) {
                if !inv.arrived() {
                    inv.y = (inv.y + STAGING_SPEED).min(inv.target_y);
                }
            }
            return self.resolve_hits(projectiles);
        }

        let dx = self.speed * self.direction;
        if self.steps >= MOVE_STEPS || self.would_exit(dx, field_width) {
            self.steps = 0;
            self.direction = -self.direction;
            self.drop_pending = true;
            return self.resolve_hits(projectiles);
        }

        self.steps += 1;
        let dx = self.speed * self.direction;
        let dy = if self.drop_pending {
            self.drop_pending = false;
            DROP_DISTANCE
        } else {
            0.0
        };
        for inv in self.invaders.iter_mut().filter(|i| i.active) {
            inv.x += dx;
            inv.y += dy;
        }
        self.resolve_hits(projectiles)
    }

    fn would_exit(&self, dx: f32, field_width: f32) -> bool {
        self.invaders.iter().any(|i| {
            if !i.active {
                return false;
            }
            let next_x = i.x + dx;
            next_x < 0.0 || next_x + INVADER_WIDTH > field_width
        })
    }

    fn resolve_hits(&mut self, projectiles: &mut [Projectile]) -> u32 {
        let mut points = 0;
        for inv in self.invaders.iter_mut() {
            if inv.active && combat::resolve_hit(&inv.rect(), projectiles) {
                inv.active = false;
                points += ROW_SCORES[inv.row];
            }
        }
        points
    }

    #[cfg(test)]
    pub(crate) fn finish_staging(&mut self) {
        for inv in self.invaders.iter_mut() {
            inv.y = inv.target_y;
        }
    }
}
