use crate::engine::action::Action;
use crate::engine::world::{Mode, World};
use crate::map::tile::Tile;
use crate::tui::{
    input::{is_press, is_quit},
    renderer::render,
};

use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};

use ratatui::{Terminal, backend::CrosstermBackend};

use std::{
    io,
    time::{Duration, Instant},
};

/// Physics cadence: gravity and jump steps advance every 150 ms.
const TICK_MS: u64 = 150;
/// Terminal auto-repeat fires faster than the physics tick, so walking gets
/// the same cooldown treatment as the tick itself.
const MOVE_COOLDOWN_MS: u64 = 90;

fn action_for_overlay(code: KeyCode, modifiers: KeyModifiers) -> Action {
    match code {
        KeyCode::Enter if modifiers.contains(KeyModifiers::SHIFT) => Action::Newline,
        KeyCode::Enter => Action::LoadLevel,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Esc => Action::ToggleLevelText,
        KeyCode::Char(c) => Action::TypeChar(c),
        _ => Action::None,
    }
}

fn action_for_edit(code: KeyCode) -> Action {
    match code {
        KeyCode::Char(']') => Action::ToggleEdit,
        KeyCode::Char('t') | KeyCode::Char('T') => Action::ToggleLevelText,
        KeyCode::Char('r') | KeyCode::Char('R') => Action::Reset,

        KeyCode::Left => Action::Move(-1, 0),
        KeyCode::Right => Action::Move(1, 0),
        KeyCode::Up => Action::Move(0, -1),
        KeyCode::Down => Action::Move(0, 1),

        KeyCode::Char(' ') => Action::Paint(Tile::Empty),
        KeyCode::Char('a') | KeyCode::Char('A') => Action::Paint(Tile::Solid),
        KeyCode::Char('s') | KeyCode::Char('S') => Action::Paint(Tile::Spike),
        KeyCode::Char('d') | KeyCode::Char('D') => Action::Paint(Tile::Goal),

        _ => Action::None,
    }
}

fn action_for_play(code: KeyCode) -> Action {
    match code {
        KeyCode::Char(']') => Action::ToggleEdit,
        KeyCode::Char('t') | KeyCode::Char('T') => Action::ToggleLevelText,
        KeyCode::Char('r') | KeyCode::Char('R') => Action::Reset,
        KeyCode::Char('n') | KeyCode::Char('N') => Action::NewRandomLevel,

        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Action::Move(-1, 0),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Action::Move(1, 0),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Char(' ') => Action::Jump,

        _ => Action::None,
    }
}

pub fn run() -> std::io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut world = World::new();

    let tick_rate = Duration::from_millis(TICK_MS);
    let mut last_tick = Instant::now();
    let mut last_move_time = Instant::now() - Duration::from_millis(MOVE_COOLDOWN_MS);

    let mut running = true;
    while running {
        if terminal.draw(|f| render(f, &world)).is_err() {
            terminal.autoresize()?;
            terminal.clear()?;
            continue;
        }

        let budget = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(budget)? {
            match event::read()? {
                Event::Resize(_, _) => {
                    terminal.autoresize()?;
                    terminal.clear()?;
                }

                Event::Key(key) => {
                    if !is_press(&key) {
                        continue;
                    }

                    if is_quit(&key) {
                        running = world.apply_action(Action::Quit);
                        continue;
                    }

                    let mut action = if world.level_text_open {
                        action_for_overlay(key.code, key.modifiers)
                    } else {
                        match world.mode {
                            Mode::Edit => action_for_edit(key.code),
                            Mode::Play => action_for_play(key.code),
                        }
                    };

                    // Walking only; the edit cursor is free to repeat.
                    if matches!(action, Action::Move(_, _)) && world.mode == Mode::Play {
                        let now = Instant::now();
                        if now.duration_since(last_move_time)
                            < Duration::from_millis(MOVE_COOLDOWN_MS)
                        {
                            action = Action::None;
                        } else {
                            last_move_time = now;
                        }
                    }

                    running = world.apply_action(action);
                }

                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            world.tick();
            last_tick = Instant::now();
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
