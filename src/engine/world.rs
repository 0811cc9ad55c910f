use crate::engine::action::Action;
use crate::engine::player::Player;
use crate::map::{Map, generator::generate_platform_level, tile::Tile};

use std::collections::VecDeque;

const START_X: i32 = 2;
const START_Y: i32 = 8;

const GENERATED_W: usize = 30;
const GENERATED_H: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Play,
    Edit,
}

pub struct World {
    pub map: Map,
    pub player: Player,
    pub spawn: (i32, i32),

    pub cursor: (i32, i32),
    pub mode: Mode,

    pub level_text_open: bool,
    pub level_text: String,

    pub win_message: Option<String>,
    pub logs: VecDeque<String>,
}

impl World {
    pub fn new() -> Self {
        let mut world = Self::with_map(Map::default_level());
        world.push_log("Welcome to Gridfall.");
        world.push_log("Move with A/D or arrows, jump with W/Up/Space.");
        world.push_log("Press ] to toggle the level editor.");
        world.push_log("Press T to edit the level as text.");
        world.push_log("Press N for a random level, R to reset.");
        world
    }

    pub fn with_map(map: Map) -> Self {
        let spawn = Self::spawn_for(&map);
        Self {
            player: Player::new(spawn.0, spawn.1),
            map,
            spawn,
            cursor: (0, 0),
            mode: Mode::Play,
            level_text_open: false,
            level_text: String::new(),
            win_message: None,
            logs: VecDeque::new(),
        }
    }

    /// The classic start cell if it is open, otherwise the first empty cell
    /// scanning from the top-left.
    fn spawn_for(map: &Map) -> (i32, i32) {
        let x = START_X.clamp(0, map.width as i32 - 1);
        let y = START_Y.clamp(0, map.height as i32 - 1);
        if map.is_walkable(x, y) {
            return (x, y);
        }
        match map.find_first_empty() {
            Some((fx, fy)) => (fx as i32, fy as i32),
            None => (0, 0),
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > 6 {
            self.logs.pop_front();
        }
    }

    /// The player is recreated wholesale; death, win and manual reset all go
    /// through here.
    fn reset_player(&mut self) {
        self.player = Player::new(self.spawn.0, self.spawn.1);
        self.win_message = None;
    }

    fn install_map(&mut self, map: Map) {
        self.map = map;
        self.spawn = Self::spawn_for(&self.map);
        self.cursor = (0, 0);
        self.reset_player();
    }

    fn load_level_text(&mut self) {
        match Map::parse(&self.level_text) {
            Some(map) => {
                self.install_map(map);
                self.level_text_open = false;
                self.push_log("Level loaded.");
            }
            None => self.push_log("Level text is blank; keeping the old level."),
        }
    }

    pub fn load_generated(&mut self, seed: u64) {
        self.install_map(generate_platform_level(GENERATED_W, GENERATED_H, seed));
        self.push_log(format!("Generated a level from seed {seed}."));
    }

    fn current_tile(&self) -> Tile {
        if self.map.in_bounds(self.player.x, self.player.y) {
            self.map.get(self.player.x as usize, self.player.y as usize)
        } else {
            Tile::Empty
        }
    }

    fn check_goal(&mut self) {
        if self.win_message.is_none() && self.current_tile() == Tile::Goal {
            self.win_message = Some("You won! Press R to restart.".to_string());
            self.push_log("Goal reached!");
        }
    }

    fn post_move_checks(&mut self) {
        if self.current_tile() == Tile::Spike {
            self.push_log("Impaled on a spike. Back to the start.");
            self.reset_player();
        }
        if self.player.y >= self.map.height as i32 {
            self.push_log("You fell out of the level.");
            self.reset_player();
        }
        self.check_goal();
    }

    /// One fixed-timestep physics step. Jump consumes its counter first; only
    /// a non-jumping player falls. Paused while editing or typing level text.
    pub fn tick(&mut self) {
        if self.mode != Mode::Play || self.level_text_open {
            return;
        }

        if self.player.jumping {
            let above = self.player.y - 1;
            if self.player.jump_progress > 0 && self.map.is_walkable(self.player.x, above) {
                self.player.y = above;
                self.player.jump_progress -= 1;
            } else {
                self.player.jumping = false;
            }
        } else {
            let below = self.player.y + 1;
            if self.map.is_walkable(self.player.x, below) {
                self.player.y = below;
            }
        }

        self.post_move_checks();
    }

    /// Returns false when the game should quit.
    pub fn apply_action(&mut self, action: Action) -> bool {
        if self.level_text_open {
            match action {
                Action::TypeChar(c) => self.level_text.push(c),
                Action::Newline => self.level_text.push('\n'),
                Action::Backspace => {
                    self.level_text.pop();
                }
                Action::LoadLevel => self.load_level_text(),
                Action::ToggleLevelText => self.level_text_open = false,
                Action::Quit => return false,
                _ => {}
            }
            return true;
        }

        match action {
            Action::ToggleLevelText => {
                self.level_text = self.map.to_text();
                self.level_text_open = true;
            }
            Action::ToggleEdit => {
                self.mode = match self.mode {
                    Mode::Play => Mode::Edit,
                    Mode::Edit => Mode::Play,
                };
                if self.mode == Mode::Edit {
                    self.push_log("Edit mode. Arrows move the cursor; Space/A/S/D paint.");
                } else {
                    self.push_log("Play mode.");
                }
            }
            Action::Reset => {
                self.reset_player();
                self.push_log("Player reset.");
            }
            Action::NewRandomLevel => self.load_generated(rand::random()),
            Action::Quit => return false,
            _ => match self.mode {
                Mode::Play => self.apply_play_action(action),
                Mode::Edit => self.apply_edit_action(action),
            },
        }
        true
    }

    fn apply_play_action(&mut self, action: Action) {
        match action {
            Action::Move(dx, _) if dx != 0 => {
                self.player.try_move(dx, &self.map);
                self.post_move_checks();
            }
            Action::Jump => self.player.start_jump(&self.map),
            _ => {}
        }
    }

    fn apply_edit_action(&mut self, action: Action) {
        match action {
            Action::Move(dx, dy) => {
                self.cursor.0 = (self.cursor.0 + dx).clamp(0, self.map.width as i32 - 1);
                self.cursor.1 = (self.cursor.1 + dy).clamp(0, self.map.height as i32 - 1);
            }
            Action::Paint(tile) => {
                self.map
                    .set(self.cursor.0 as usize, self.cursor.1 as usize, tile);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_from(text: &str) -> World {
        World::with_map(Map::parse(text).unwrap())
    }

    fn place(world: &mut World, x: i32, y: i32) {
        world.player = Player::new(x, y);
        world.spawn = (x, y);
    }

    #[test]
    fn moving_into_solid_is_rejected() {
        let mut world = world_from("  #\n###");
        place(&mut world, 1, 0);
        world.apply_action(Action::Move(1, 0));
        assert_eq!((world.player.x, world.player.y), (1, 0));
        world.apply_action(Action::Move(-1, 0));
        assert_eq!((world.player.x, world.player.y), (0, 0));
    }

    #[test]
    fn spike_resets_player_to_spawn() {
        let mut world = world_from("     \n  ^  \n#####");
        place(&mut world, 0, 1);
        world.player.x = 1;
        world.apply_action(Action::Move(1, 0));
        assert_eq!((world.player.x, world.player.y), (0, 1));
        assert!(!world.player.jumping);
    }

    #[test]
    fn falling_onto_spike_resets() {
        let mut world = world_from("  ^  \n#####");
        place(&mut world, 0, 0);
        world.player.x = 2;
        world.player.y = -1;
        world.tick(); // gravity drops onto the spike
        assert_eq!((world.player.x, world.player.y), (0, 0));
    }

    #[test]
    fn goal_win_message_is_one_time() {
        let mut world = world_from(" G \n###");
        place(&mut world, 0, 0);
        world.apply_action(Action::Move(1, 0));
        let msg = world.win_message.clone();
        assert!(msg.is_some());

        // Walking off and back on does not rewrite the message.
        world.apply_action(Action::Move(1, 0));
        world.apply_action(Action::Move(-1, 0));
        assert_eq!(world.win_message, msg);

        world.apply_action(Action::Reset);
        assert!(world.win_message.is_none());
        assert_eq!((world.player.x, world.player.y), (0, 0));
    }

    #[test]
    fn jump_counter_runs_out_then_gravity_resumes() {
        let mut world = world_from("   \n   \n   \n###");
        place(&mut world, 1, 2);

        world.apply_action(Action::Jump);
        assert!(world.player.jumping);
        assert_eq!(world.player.jump_progress, 2);

        world.tick();
        assert_eq!(world.player.y, 1);
        assert_eq!(world.player.jump_progress, 1);

        world.tick();
        assert_eq!(world.player.y, 0);
        assert_eq!(world.player.jump_progress, 0);

        // Counter exhausted: this tick only clears the jump flag.
        world.tick();
        assert_eq!(world.player.y, 0);
        assert!(!world.player.jumping);

        world.tick();
        assert_eq!(world.player.y, 1);
    }

    #[test]
    fn jump_needs_solid_footing() {
        let mut world = world_from("   \n   \n###");
        place(&mut world, 1, 0); // mid-air
        world.apply_action(Action::Jump);
        assert!(!world.player.jumping);
    }

    #[test]
    fn jump_stops_against_ceiling() {
        let mut world = world_from("###\n   \n###");
        place(&mut world, 1, 1);
        world.apply_action(Action::Jump);
        world.tick();
        assert_eq!(world.player.y, 1);
        assert!(!world.player.jumping);
    }

    #[test]
    fn toggling_edit_mode_does_not_move_player() {
        let mut world = world_from("   \n###");
        place(&mut world, 1, 0);
        world.apply_action(Action::ToggleEdit);
        assert_eq!(world.mode, Mode::Edit);
        assert_eq!((world.player.x, world.player.y), (1, 0));

        // Physics and movement keys drive the cursor, not the player.
        world.tick();
        world.apply_action(Action::Move(1, 1));
        assert_eq!((world.player.x, world.player.y), (1, 0));
        assert_eq!(world.cursor, (1, 1));
    }

    #[test]
    fn cursor_is_clamped_to_bounds() {
        let mut world = world_from("  \n##");
        world.apply_action(Action::ToggleEdit);
        world.apply_action(Action::Move(-1, -1));
        assert_eq!(world.cursor, (0, 0));
        for _ in 0..5 {
            world.apply_action(Action::Move(1, 1));
        }
        assert_eq!(world.cursor, (1, 1));
    }

    #[test]
    fn painting_writes_the_tile_under_the_cursor() {
        let mut world = world_from("   \n###");
        world.apply_action(Action::ToggleEdit);
        world.apply_action(Action::Move(1, 0));
        world.apply_action(Action::Paint(Tile::Spike));
        assert_eq!(world.map.get(1, 0), Tile::Spike);
        world.apply_action(Action::Paint(Tile::Empty));
        assert_eq!(world.map.get(1, 0), Tile::Empty);
    }

    #[test]
    fn level_text_load_replaces_map_and_resets() {
        let mut world = world_from("   \n###");
        world.apply_action(Action::ToggleEdit);
        world.apply_action(Action::Move(1, 1));
        world.apply_action(Action::ToggleEdit);

        world.apply_action(Action::ToggleLevelText);
        assert!(world.level_text_open);
        assert_eq!(world.level_text, world.map.to_text());

        world.level_text = " G  \n####".to_string();
        world.apply_action(Action::LoadLevel);
        assert!(!world.level_text_open);
        assert_eq!(world.map.width, 4);
        assert_eq!(world.cursor, (0, 0));
        assert_eq!((world.player.x, world.player.y), world.spawn);
    }

    #[test]
    fn blank_level_text_keeps_old_level() {
        let mut world = world_from(" ^ \n###");
        let before = world.map.to_text();
        world.apply_action(Action::ToggleLevelText);
        world.level_text = "  \n ".to_string();
        world.apply_action(Action::LoadLevel);
        assert_eq!(world.map.to_text(), before);
        assert!(world.level_text_open);
    }

    #[test]
    fn overlay_captures_typing() {
        let mut world = world_from("#");
        world.apply_action(Action::ToggleLevelText);
        world.level_text.clear();
        world.apply_action(Action::TypeChar('#'));
        world.apply_action(Action::Newline);
        world.apply_action(Action::TypeChar('G'));
        world.apply_action(Action::Backspace);
        world.apply_action(Action::TypeChar('^'));
        assert_eq!(world.level_text, "#\n^");
    }

    #[test]
    fn generated_level_is_playable() {
        let mut world = world_from("#");
        world.load_generated(42);
        assert!(world.map.is_walkable(world.player.x, world.player.y));
        assert!(!world.level_text_open);
        assert_eq!(world.win_message, None);
    }
}
