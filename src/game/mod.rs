pub mod combat;
pub mod formation;
pub mod ship;
pub mod ufo;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::input::{Button, Controls};
use crate::scores::HighScore;

use combat::Projectile;
use formation::Formation;
use ship::Ship;
use ufo::Ufo;

pub const MENU_ITEMS: [&str; 2] = ["Play", "High Scores"];

const MIN_FIELD_WIDTH: f32 = 40.0;
const MIN_FIELD_HEIGHT: f32 = 24.0;

/// Playfield dimensions, fixed for the lifetime of the process.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Bounds {
            width: width.max(MIN_FIELD_WIDTH),
            height: height.max(MIN_FIELD_HEIGHT),
        }
    }

    /// Derived once at startup from the terminal, leaving room for the
    /// border and HUD chrome.
    pub fn from_terminal(cols: u16, rows: u16) -> Self {
        Self::new(cols.saturating_sub(4) as f32, rows.saturating_sub(6) as f32)
    }
}

/// Everything alive during a round. Owned by `Phase::Play` and dropped
/// wholesale when the round ends.
pub struct World {
    pub ship: Ship,
    pub projectiles: Vec<Projectile>,
    pub formation: Formation,
    pub ufo: Ufo,
    pub score: u32,
    pub wave: u32,
    pub tick: u64,
    cooldown: i32,
    rng: StdRng,
}

impl World {
    pub fn new(bounds: Bounds) -> Self {
        Self::with_rng(bounds, StdRng::from_entropy())
    }

    pub fn with_rng(bounds: Bounds, mut rng: StdRng) -> Self {
        World {
            ship: Ship::new(bounds.width, bounds.height),
            projectiles: Vec::new(),
            formation: Formation::build(1, bounds.width),
            ufo: Ufo::new(&mut rng),
            score: 0,
            wave: 1,
            tick: 0,
            cooldown: 0,
            rng,
        }
    }

    /// One play tick. The order is a contract: ship (and its shot) first, so
    /// a projectile fired this tick can hit an invader that also moves this
    /// tick; then projectiles, formation, bonus target, and finally the
    /// wave-clear and game-over checks. Returns true when the round is over.
    pub fn update(&mut self, input: &Controls, bounds: Bounds) -> bool {
        self.tick += 1;
        self.ship.update(input, bounds.width);
        self.cooldown -= 1;
        if input.is_held(Button::Fire) {
            if let Some(p) = combat::fire(&self.ship, &mut self.cooldown) {
                self.projectiles.push(p);
            }
        }
        combat::integrate(&mut self.projectiles);
        self.score += self.formation.advance(bounds.width, &mut self.projectiles);
        self.score += self.ufo.update(bounds.width, &mut self.projectiles, &mut self.rng);

        if self.formation.cleared() {
            self.wave += 1;
            self.formation = Formation::build(self.wave, bounds.width);
            self.ship.recenter(bounds.width);
        }

        self.invaders_reached_ship()
    }

    fn invaders_reached_ship(&self) -> bool {
        self.formation
            .lowest_edge()
            .map_or(false, |edge| edge >= self.ship.y)
    }
}

pub enum Phase {
    Menu {
        selected: usize,
        showing_high_score: bool,
    },
    Play(World),
    GameOver {
        score: u32,
        wave: u32,
    },
}

impl Phase {
    fn menu() -> Self {
        Phase::Menu {
            selected: 0,
            showing_high_score: false,
        }
    }
}

/// Top-level state: the current phase plus everything that outlives a round.
pub struct GameState {
    pub phase: Phase,
    pub high_score: HighScore,
    pub bounds: Bounds,
    pub should_quit: bool,
}

impl GameState {
    pub fn new(bounds: Bounds) -> Self {
        GameState {
            phase: Phase::menu(),
            high_score: HighScore::load(),
            bounds,
            should_quit: false,
        }
    }

    /// Advances whichever phase is active by one tick. Confirm is
    /// edge-triggered everywhere so a held key crosses at most one phase
    /// boundary.
    pub fn update(&mut self, input: &Controls) {
        let next = match &mut self.phase {
            Phase::Menu {
                selected,
                showing_high_score,
            } => {
                if *showing_high_score {
                    if input.just_pressed(Button::Fire) {
                        *showing_high_score = false;
                    }
                    None
                } else {
                    if input.just_pressed(Button::Up) && *selected > 0 {
                        *selected -= 1;
                    }
                    if input.just_pressed(Button::Down) && *selected + 1 < MENU_ITEMS.len() {
                        *selected += 1;
                    }
                    if input.just_pressed(Button::Fire) {
                        match *selected {
                            0 => Some(Phase::Play(World::new(self.bounds))),
                            _ => {
                                *showing_high_score = true;
                                None
                            }
                        }
                    } else {
                        None
                    }
                }
            }
            Phase::Play(world) => {
                if world.update(input, self.bounds) {
                    self.high_score.commit(world.score);
                    Some(Phase::GameOver {
                        score: world.score,
                        wave: world.wave,
                    })
                } else {
                    None
                }
            }
            Phase::GameOver { .. } => {
                if input.just_pressed(Button::Fire) {
                    Some(Phase::menu())
                } else {
                    None
                }
            }
        };
        if let Some(phase) = next {
            self.phase = phase;
        }
    }

    /// Esc from play or the game-over screen. An aborted run still counts
    /// toward the high score.
    pub fn abort_to_menu(&mut self) {
        if let Phase::Play(world) = &self.phase {
            self.high_score.commit(world.score);
        }
        self.phase = Phase::menu();
    }

    pub fn in_menu(&self) -> bool {
        matches!(self.phase, Phase::Menu { .. })
    }
}
