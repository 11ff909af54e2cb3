use crossterm::event::KeyCode;

/// How many ticks a press stays "held" without a refresh when the terminal
/// cannot report key releases. Terminal autorepeat keeps refreshing it.
const HOLD_DECAY_TICKS: u8 = 12;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    Fire,
}

const BUTTON_COUNT: usize = 5;

impl Button {
    fn idx(self) -> usize {
        match self {
            Button::Up => 0,
            Button::Down => 1,
            Button::Left => 2,
            Button::Right => 3,
            Button::Fire => 4,
        }
    }

    /// Maps a terminal key to a logical button. Space fires and confirms,
    /// like the arcade original; Enter is accepted as an alias.
    pub fn from_key(code: KeyCode) -> Option<Button> {
        match code {
            KeyCode::Up => Some(Button::Up),
            KeyCode::Down => Some(Button::Down),
            KeyCode::Left => Some(Button::Left),
            KeyCode::Right => Some(Button::Right),
            KeyCode::Char(' ') | KeyCode::Enter => Some(Button::Fire),
            _ => None,
        }
    }
}

/// Per-tick input snapshot with edge detection.
///
/// The driver feeds raw press/release events in; the simulation reads
/// `is_held` for continuous actions and `just_pressed` for edge-triggered
/// ones. `just_pressed` compares against the previous tick's held state, so
/// a held key fires its edge exactly once no matter how many ticks it spans.
pub struct Controls {
    held: [bool; BUTTON_COUNT],
    prev: [bool; BUTTON_COUNT],
    decay: [u8; BUTTON_COUNT],
    release_events: bool,
}

impl Controls {
    /// `release_events` is whether the terminal reports key releases; when it
    /// does not, held state decays after [`HOLD_DECAY_TICKS`].
    pub fn new(release_events: bool) -> Self {
        Controls {
            held: [false; BUTTON_COUNT],
            prev: [false; BUTTON_COUNT],
            decay: [0; BUTTON_COUNT],
            release_events,
        }
    }

    pub fn press(&mut self, button: Button) {
        let i = button.idx();
        self.held[i] = true;
        self.decay[i] = HOLD_DECAY_TICKS;
    }

    pub fn release(&mut self, button: Button) {
        let i = button.idx();
        self.held[i] = false;
        self.decay[i] = 0;
    }

    pub fn is_held(&self, button: Button) -> bool {
        self.held[button.idx()]
    }

    pub fn just_pressed(&self, button: Button) -> bool {
        let i = button.idx();
        self.held[i] && !self.prev[i]
    }

    /// Called once after each simulation tick has consumed the snapshot.
    pub fn end_tick(&mut self) {
        self.prev = self.held;
        if self.release_events {
            return;
        }
        for i in 0..BUTTON_COUNT {
            if self.held[i] {
                self.decay[i] = self.decay[i].saturating_sub(1);
                if self.decay[i] == 0 {
                    self.held[i] = false;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_fires_once_per_press() {
        let mut c = Controls::new(true);
        c.press(Button::Fire);
        assert!(c.just_pressed(Button::Fire));
        c.end_tick();
        // Still held on later ticks, but no longer an edge.
        for _ in 0..5 {
            assert!(c.is_held(Button::Fire));
            assert!(!c.just_pressed(Button::Fire));
            c.end_tick();
        }
    }

    #[test]
    fn release_rearms_the_edge() {
        let mut c = Controls::new(true);
        c.press(Button::Fire);
        c.end_tick();
        c.release(Button::Fire);
        c.end_tick();
        c.press(Button::Fire);
        assert!(c.just_pressed(Button::Fire));
    }

    #[test]
    fn held_decays_without_release_events() {
        let mut c = Controls::new(false);
        c.press(Button::Left);
        for _ in 0..HOLD_DECAY_TICKS {
            assert!(c.is_held(Button::Left));
            c.end_tick();
        }
        assert!(!c.is_held(Button::Left));
    }

    #[test]
    fn repeat_refreshes_decay() {
        let mut c = Controls::new(false);
        c.press(Button::Right);
        for _ in 0..(HOLD_DECAY_TICKS - 2) {
            c.end_tick();
        }
        c.press(Button::Right); // autorepeat
        for _ in 0..(HOLD_DECAY_TICKS - 2) {
            c.end_tick();
            assert!(c.is_held(Button::Right));
        }
    }

    #[test]
    fn no_decay_with_release_events() {
        let mut c = Controls::new(true);
        c.press(Button::Left);
        for _ in 0..(HOLD_DECAY_TICKS as usize * 3) {
            c.end_tick();
        }
        assert!(c.is_held(Button::Left));
    }

    #[test]
    fn key_mapping() {
        assert_eq!(Button::from_key(KeyCode::Char(' ')), Some(Button::Fire));
        assert_eq!(Button::from_key(KeyCode::Enter), Some(Button::Fire));
        assert_eq!(Button::from_key(KeyCode::Left), Some(Button::Left));
        assert_eq!(Button::from_key(KeyCode::Char('x')), None);
    }
}
