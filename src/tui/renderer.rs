use crate::engine::world::{Mode, World};
use crate::map::tile::Tile;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub fn render(f: &mut Frame, world: &World) {
    let size = f.size();
    f.render_widget(Clear, size);

    if size.width < 30 || size.height < 14 {
        let msg = Paragraph::new("Terminal too small — resize to play.")
            .block(Block::default().borders(Borders::ALL).title("Gridfall"))
            .wrap(Wrap { trim: true });
        f.render_widget(msg, size);
        return;
    }

    let log_h = (size.height / 4).clamp(4, 8);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(log_h)])
        .split(size);

    let top = vertical[0];
    let bottom = vertical[1];

    let sidebar_w = (top.width / 3).clamp(22, 36);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(sidebar_w)])
        .split(top);

    draw_level(f, horizontal[0], world);
    draw_sidebar(f, horizontal[1], world);
    draw_logs(f, bottom, world);

    if world.level_text_open {
        draw_level_text(f, size, world);
    }
}

fn draw_level(f: &mut Frame, area: Rect, world: &World) {
    f.render_widget(Clear, area);

    let map = &world.map;
    let inner_w = (area.width as usize).saturating_sub(2);
    let inner_h = (area.height as usize).saturating_sub(2);

    let mut lines: Vec<Line> = Vec::with_capacity(map.height.min(inner_h));

    for y in 0..map.height.min(inner_h) {
        let mut spans: Vec<Span> = Vec::with_capacity(map.width.min(inner_w));

        for x in 0..map.width.min(inner_w) {
            let (cx, cy) = (x as i32, y as i32);

            // Cursor and player glyphs sit on top of whatever tile is there.
            if world.mode == Mode::Edit && (cx, cy) == world.cursor {
                spans.push(Span::styled(
                    "!",
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ));
                continue;
            }
            if world.mode == Mode::Play && (cx, cy) == (world.player.x, world.player.y) {
                spans.push(Span::styled(
                    "@",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ));
                continue;
            }

            let tile = map.get(x, y);
            let (ch, style) = match tile {
                Tile::Empty => (" ", Style::default()),
                Tile::Solid => ("#", Style::default().fg(Color::DarkGray)),
                Tile::Spike => ("^", Style::default().fg(Color::Red)),
                Tile::Goal => (
                    "G",
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
            };
            spans.push(Span::styled(ch, style));
        }

        lines.push(Line::from(spans));
    }

    let title = match world.mode {
        Mode::Play => "Level",
        Mode::Edit => "Level (editing)",
    };

    let border_style = match world.mode {
        Mode::Play => Style::default(),
        Mode::Edit => Style::default().fg(Color::Magenta),
    };

    let level_widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(border_style),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(level_widget, area);
}

fn draw_sidebar(f: &mut Frame, area: Rect, world: &World) {
    f.render_widget(Clear, area);

    let mode_label = match world.mode {
        Mode::Play => Span::styled("Play", Style::default().fg(Color::Yellow)),
        Mode::Edit => Span::styled("Edit", Style::default().fg(Color::Magenta)),
    };

    let mut text: Vec<Line> = vec![
        Line::from(vec![Span::raw("Mode: "), mode_label]),
        Line::from(format!(
            "Player: ({}, {})",
            world.player.x, world.player.y
        )),
        Line::from(format!("Cursor: ({}, {})", world.cursor.0, world.cursor.1)),
        Line::from(""),
    ];

    if let Some(msg) = &world.win_message {
        text.push(Line::from(Span::styled(
            msg.clone(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )));
        text.push(Line::from(""));
    }

    text.push(Line::from(Span::styled(
        "Controls",
        Style::default().fg(Color::Cyan),
    )));
    match world.mode {
        Mode::Play => {
            text.push(Line::from("A/D or arrows: move"));
            text.push(Line::from("W/Up/Space: jump"));
            text.push(Line::from("R: reset"));
            text.push(Line::from("N: random level"));
        }
        Mode::Edit => {
            text.push(Line::from("Arrows: move cursor"));
            text.push(Line::from("Space: erase"));
            text.push(Line::from("A: solid  S: spike"));
            text.push(Line::from("D: goal"));
        }
    }
    text.push(Line::from("]: toggle editor"));
    text.push(Line::from("T: level as text"));
    text.push(Line::from("Ctrl+C: quit"));

    let sidebar = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Gridfall"))
        .wrap(Wrap { trim: true });

    f.render_widget(sidebar, area);
}

fn draw_logs(f: &mut Frame, area: Rect, world: &World) {
    f.render_widget(Clear, area);

    let mut lines: Vec<Line> = Vec::new();
    for msg in world.logs.iter() {
        lines.push(Line::from(msg.clone()));
    }

    let logs = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Log"))
        .wrap(Wrap { trim: true });

    f.render_widget(logs, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

fn draw_level_text(f: &mut Frame, size: Rect, world: &World) {
    let area = centered_rect(70, 70, size);
    f.render_widget(Clear, area);

    let mut lines: Vec<Line> = world
        .level_text
        .split('\n')
        .map(|row| Line::from(row.to_string()))
        .collect();

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter: load   Shift+Enter: new row   Esc: cancel",
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )));

    let overlay = Paragraph::new(lines)
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::ALL).title("Level text"))
        .wrap(Wrap { trim: false });

    f.render_widget(overlay, area);
}
