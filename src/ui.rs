use ratatui::prelude::*;
use ratatui::widgets::*;

use std::collections::HashMap;

use crate::game::formation::Invader;
use crate::game::{GameState, Phase, World, MENU_ITEMS};

const TITLE: &str = " SPACE INVADERS — SE ";

const ROW_COLORS: [Color; 4] = [
    Color::Rgb(200, 80, 255), // purple
    Color::Rgb(255, 80, 80),  // red
    Color::Rgb(80, 220, 255), // cyan
    Color::Rgb(255, 220, 80), // yellow
];

pub fn render(frame: &mut Frame, game: &GameState) {
    match &game.phase {
        Phase::Menu {
            selected,
            showing_high_score,
        } => render_menu(frame, *selected, *showing_high_score, game.high_score.value()),
        Phase::Play(world) => render_play(frame, world, game),
        Phase::GameOver { score, wave } => {
            render_game_over(frame, *score, *wave, game.high_score.value())
        }
    }
}

// ── Menu ───────────────────────────────────────────────────────────────

fn render_menu(frame: &mut Frame, selected: usize, showing_high_score: bool, high_score: u32) {
    let area = frame.area();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(80, 255, 80)))
        .title(TITLE)
        .title_style(
            Style::default()
                .fg(Color::Rgb(100, 255, 100))
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = vec![
        Line::from(""),
        Line::from(Span::styled(
            "▄▖▄▖▄▖▄▖▄▖  ▄▖▖▖▖▖▄▖▄▖▄▖▄▖▄▖",
            Style::default().fg(Color::Rgb(80, 255, 80)),
        )),
        Line::from(Span::styled(
            "▌ ▙▌▟▌▌ ▙▖  ▐ ▛▖▌▌▌▟▌▌▌▙▖▙▘▚",
            Style::default().fg(Color::Rgb(80, 255, 80)),
        )),
        Line::from(Span::styled(
            "▄▌▌ ▌▌▙▖▙▖  ▟▖▌▝▌▚▘▌▌▙▘▙▖▌▌▄▌",
            Style::default().fg(Color::Rgb(80, 255, 80)),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "second edition",
            Style::default()
                .fg(Color::Rgb(120, 120, 140))
                .add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
        Line::from(""),
    ];

    for (i, item) in MENU_ITEMS.iter().enumerate() {
        let line = if i == selected {
            Line::from(Span::styled(
                format!("* {} *", item),
                Style::default()
                    .fg(Color::Rgb(255, 220, 80))
                    .add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(Span::styled(
                item.to_string(),
                Style::default().fg(Color::Rgb(180, 180, 200)),
            ))
        };
        lines.push(line);
        lines.push(Line::from(""));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("↑↓", Style::default().fg(Color::Rgb(80, 200, 255))),
        Span::styled(" select   ", Style::default().fg(Color::DarkGray)),
        Span::styled("Space", Style::default().fg(Color::Rgb(80, 200, 255))),
        Span::styled(" confirm   ", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Rgb(80, 200, 255))),
        Span::styled(" quit", Style::default().fg(Color::DarkGray)),
    ]));

    let menu = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(menu, inner);

    if showing_high_score {
        render_high_score_overlay(frame, area, high_score);
    }
}

fn render_high_score_overlay(frame: &mut Frame, area: Rect, high_score: u32) {
    let overlay_w = 34u16.min(area.width.saturating_sub(4));
    let overlay_h = 8u16.min(area.height.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(overlay_w)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_h)) / 2;
    let overlay_area = Rect::new(x, y, overlay_w, overlay_h);

    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Rgb(255, 220, 80)))
        .title(" 🏆 High Score ")
        .title_style(
            Style::default()
                .fg(Color::Rgb(255, 220, 80))
                .add_modifier(Modifier::BOLD),
        )
        .style(Style::default().bg(Color::Rgb(15, 15, 25)));
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Best: {}", high_score),
            Style::default()
                .fg(Color::Rgb(255, 215, 0))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press SPACE to return",
            Style::default().fg(Color::Rgb(120, 120, 140)),
        )),
    ];
    let p = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().bg(Color::Rgb(15, 15, 25)));
    frame.render_widget(p, inner);
}

// ── Play ───────────────────────────────────────────────────────────────

fn render_play(frame: &mut Frame, world: &World, game: &GameState) {
    let area = frame.area();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(80, 255, 80)))
        .title(TITLE)
        .title_style(
            Style::default()
                .fg(Color::Rgb(100, 255, 100))
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(inner);

    let status = Line::from(vec![
        Span::styled(" 👾 ", Style::default()),
        Span::styled(
            format!("Score: {} ", world.score),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("High: {} ", game.high_score.value().max(world.score)),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Wave: {} ", world.wave),
            Style::default().fg(Color::Green),
        ),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Invaders: {} ", world.formation.active_count()),
            Style::default().fg(Color::Rgb(255, 80, 80)),
        ),
    ]);
    frame.render_widget(Paragraph::new(status), chunks[0]);

    let fw = chunks[1].width as usize;
    let fh = chunks[1].height as usize;
    if fw > 0 && fh > 0 {
        let lines = render_field(world, game, fw, fh);
        frame.render_widget(Paragraph::new(lines), chunks[1]);
    }

    let help = Paragraph::new(Line::from(vec![
        Span::styled(" ←→ Move ", Style::default().fg(Color::DarkGray)),
        Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
        Span::styled(
            "Space Shoot ",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
        Span::styled("Esc Menu", Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(help, chunks[2]);
}

// ── Braille field ──────────────────────────────────────────────────────

fn braille_bit(sub_x: usize, sub_y: usize) -> u8 {
    match (sub_x, sub_y) {
        (0, 0) => 0x01,
        (0, 1) => 0x02,
        (0, 2) => 0x04,
        (0, 3) => 0x40,
        (1, 0) => 0x08,
        (1, 1) => 0x10,
        (1, 2) => 0x20,
        (1, 3) => 0x80,
        _ => 0,
    }
}

fn set_dot(map: &mut HashMap<(usize, usize), u8>, bx: i32, by: i32, bw: i32, bh: i32) {
    if bx < 0 || by < 0 || bx >= bw || by >= bh {
        return;
    }
    let cx = bx as usize / 2;
    let cy = by as usize / 4;
    let sx = bx as usize % 2;
    let sy = by as usize % 4;
    *map.entry((cx, cy)).or_insert(0) |= braille_bit(sx, sy);
}

fn write_layer(
    grid: &mut [Vec<(char, Style)>],
    map: &HashMap<(usize, usize), u8>,
    w: usize,
    h: usize,
    color: Color,
    bg: Color,
    bold: bool,
) {
    for (&(cx, cy), &bits) in map {
        if cx < w && cy < h && bits != 0 {
            let ch = char::from_u32(0x2800 + bits as u32).unwrap_or(' ');
            let mut style = Style::default().fg(color).bg(bg);
            if bold {
                style = style.add_modifier(Modifier::BOLD);
            }
            grid[cy][cx] = (ch, style);
        }
    }
}

fn blit(map: &mut HashMap<(usize, usize), u8>, cx: i32, cy: i32, pixels: &[(i32, i32)], bw: i32, bh: i32) {
    for &(dx, dy) in pixels {
        set_dot(map, cx + dx, cy + dy, bw, bh);
    }
}

/// Two-frame sprite for an invader row tier, on a small braille-pixel grid
/// centered at the origin.
fn invader_sprite(row: usize, frame: bool) -> &'static [(i32, i32)] {
    match row {
        // Back row: squid
        0 => {
            if frame {
                &[
                    (0, -2),
                    (-1, -1), (0, -1), (1, -1),
                    (-2, 0), (-1, 0), (0, 0), (1, 0), (2, 0),
                    (-2, 1), (2, 1),
                    (-1, 2), (1, 2),
                ]
            } else {
                &[
                    (0, -2),
                    (-1, -1), (0, -1), (1, -1),
                    (-2, 0), (-1, 0), (0, 0), (1, 0), (2, 0),
                    (-2, 1), (2, 1),
                    (-2, 2), (2, 2),
                ]
            }
        }
        // Middle rows: crab
        1 | 2 => {
            if frame {
                &[
                    (-2, -2), (2, -2),
                    (-2, -1), (-1, -1), (0, -1), (1, -1), (2, -1),
                    (-3, 0), (-1, 0), (0, 0), (1, 0), (3, 0),
                    (-3, 1), (-2, 1), (2, 1), (3, 1),
                    (-1, 2), (1, 2),
                ]
            } else {
                &[
                    (-2, -2), (2, -2),
                    (-2, -1), (-1, -1), (0, -1), (1, -1), (2, -1),
                    (-3, 0), (-1, 0), (0, 0), (1, 0), (3, 0),
                    (-3, 1), (-2, 1), (2, 1), (3, 1),
                    (-2, 2), (2, 2),
                ]
            }
        }
        // Front row: octopus
        _ => {
            if frame {
                &[
                    (-1, -2), (0, -2), (1, -2),
                    (-2, -1), (-1, -1), (0, -1), (1, -1), (2, -1),
                    (-2, 0), (0, 0), (2, 0),
                    (-2, 1), (-1, 1), (1, 1), (2, 1),
                    (-2, 2), (2, 2),
                ]
            } else {
                &[
                    (-1, -2), (0, -2), (1, -2),
                    (-2, -1), (-1, -1), (0, -1), (1, -1), (2, -1),
                    (-2, 0), (0, 0), (2, 0),
                    (-2, 1), (-1, 1), (1, 1), (2, 1),
                    (-1, 2), (1, 2),
                ]
            }
        }
    }
}

const UFO_SPRITE: &[(i32, i32)] = &[
    (-1, -1), (0, -1), (1, -1),
    (-3, 0), (-2, 0), (-1, 0), (0, 0), (1, 0), (2, 0), (3, 0),
    (-2, 1), (0, 1), (2, 1),
];

const SHIP_SPRITE: &[(i32, i32)] = &[
    (0, -2),
    (-1, -1), (0, -1), (1, -1),
    (-3, 0), (-2, 0), (-1, 0), (0, 0), (1, 0), (2, 0), (3, 0),
    (-3, 1), (-2, 1), (-1, 1), (0, 1), (1, 1), (2, 1), (3, 1),
];

fn render_field(world: &World, game: &GameState, width: usize, height: usize) -> Vec<Line<'static>> {
    let w = width;
    let h = height;
    let bw = (w * 2) as i32;
    let bh = (h * 4) as i32;
    let bsx = bw as f32 / game.bounds.width;
    let bsy = bh as f32 / game.bounds.height;

    let bg = Color::Rgb(0, 0, 5);
    let mut grid: Vec<Vec<(char, Style)>> = vec![vec![(' ', Style::default().bg(bg)); w]; h];

    let anim_frame = (world.tick / 20) % 2 == 0;

    for invader in world.formation.invaders.iter().filter(|i| i.active) {
        let mut map: HashMap<(usize, usize), u8> = HashMap::new();
        let (cx, cy) = center_of(invader, bsx, bsy);
        blit(&mut map, cx, cy, invader_sprite(invader.row, anim_frame), bw, bh);
        write_layer(&mut grid, &map, w, h, ROW_COLORS[invader.row % ROW_COLORS.len()], bg, false);
    }

    if world.ufo.active {
        let mut map: HashMap<(usize, usize), u8> = HashMap::new();
        let cx = ((world.ufo.x + crate::game::ufo::UFO_WIDTH * 0.5) * bsx) as i32;
        let cy = ((world.ufo.y + crate::game::ufo::UFO_HEIGHT * 0.5) * bsy) as i32;
        blit(&mut map, cx, cy, UFO_SPRITE, bw, bh);
        write_layer(&mut grid, &map, w, h, Color::Rgb(200, 200, 210), bg, true);
    }

    for projectile in world.projectiles.iter().filter(|p| p.active) {
        let mut map: HashMap<(usize, usize), u8> = HashMap::new();
        let bx = (projectile.x * bsx) as i32;
        let by = (projectile.y * bsy) as i32;
        for dy in 0..3 {
            set_dot(&mut map, bx, by + dy, bw, bh);
        }
        write_layer(&mut grid, &map, w, h, Color::Rgb(255, 255, 200), bg, true);
    }

    {
        let mut map: HashMap<(usize, usize), u8> = HashMap::new();
        let cx = (world.ship.muzzle_x() * bsx) as i32;
        let cy = ((world.ship.y + 0.75) * bsy) as i32;
        blit(&mut map, cx, cy, SHIP_SPRITE, bw, bh);
        write_layer(&mut grid, &map, w, h, Color::Rgb(80, 255, 80), bg, true);
    }

    grid.into_iter()
        .map(|row| {
            let spans: Vec<Span<'static>> = row
                .into_iter()
                .map(|(ch, style)| Span::styled(String::from(ch), style))
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn center_of(invader: &Invader, bsx: f32, bsy: f32) -> (i32, i32) {
    use crate::game::formation::{INVADER_HEIGHT, INVADER_WIDTH};
    let cx = ((invader.x + INVADER_WIDTH * 0.5) * bsx) as i32;
    let cy = ((invader.y + INVADER_HEIGHT * 0.5) * bsy) as i32;
    (cx, cy)
}

// ── Game over ──────────────────────────────────────────────────────────

fn render_game_over(frame: &mut Frame, score: u32, wave: u32, high_score: u32) {
    let area = frame.area();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(255, 80, 80)))
        .title(TITLE)
        .title_style(
            Style::default()
                .fg(Color::Rgb(255, 100, 100))
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let pad = (inner.height.saturating_sub(9) / 2) as usize;
    let mut lines: Vec<Line> = std::iter::repeat(Line::from(""))
        .take(pad)
        .collect();
    lines.push(Line::from(Span::styled(
        "GAME OVER",
        Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Score: {}", score),
        Style::default().fg(Color::Yellow),
    )));
    lines.push(Line::from(Span::styled(
        format!("High Score: {}", high_score),
        Style::default().fg(Color::Cyan),
    )));
    lines.push(Line::from(Span::styled(
        format!("Wave reached: {}", wave),
        Style::default().fg(Color::Green),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press SPACE to return to menu",
        Style::default().fg(Color::Rgb(120, 120, 140)),
    )));

    let p = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(p, inner);
}
