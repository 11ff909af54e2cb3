mod event;
mod game;
mod geometry;
mod input;
mod scores;
mod ui;

use std::io;

use crossterm::{
    event::{
        KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use event::{Event, EventHandler};
use game::{Bounds, GameState};
use input::{Button, Controls};

fn main() -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    // Key releases are only reported under the kitty keyboard protocol;
    // without it the input snapshot falls back to hold decay.
    let release_events = supports_keyboard_enhancement().unwrap_or(false);
    if release_events {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Playfield bounds are fixed at startup from the terminal size.
    let size = terminal.size()?;
    let mut game = GameState::new(Bounds::from_terminal(size.width, size.height));
    let mut controls = Controls::new(release_events);
    let event_handler = EventHandler::new(16); // ~60 FPS

    // Main loop
    loop {
        terminal.draw(|frame| ui::render(frame, &game))?;

        match event_handler.next()? {
            Event::Tick => {
                game.update(&controls);
                controls.end_tick();
            }
            Event::Key(key) => on_key(&mut game, &mut controls, key),
        }

        if game.should_quit {
            break;
        }
    }

    // Restore terminal
    if release_events {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

fn on_key(game: &mut GameState, controls: &mut Controls, key: KeyEvent) {
    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        game.should_quit = true;
        return;
    }

    match key.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => {
            match key.code {
                KeyCode::Esc => {
                    if game.in_menu() {
                        game.should_quit = true;
                    } else {
                        game.abort_to_menu();
                    }
                    return;
                }
                KeyCode::Char('q') | KeyCode::Char('Q') if game.in_menu() => {
                    game.should_quit = true;
                    return;
                }
                _ => {}
            }
            if let Some(button) = Button::from_key(key.code) {
                controls.press(button);
            }
        }
        KeyEventKind::Release => {
            if let Some(button) = Button::from_key(key.code) {
                controls.release(button);
            }
        }
    }
}
