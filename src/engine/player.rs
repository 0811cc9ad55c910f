use crate::map::{Map, tile::Tile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub x: i32,
    pub y: i32,

    pub jumping: bool,
    pub jump_height: u8,
    pub jump_progress: u8,
}

impl Player {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            jumping: false,
            jump_height: 2,
            jump_progress: 0,
        }
    }

    /// Horizontal step, rejected when the target tile is solid or out of bounds.
    pub fn try_move(&mut self, dx: i32, map: &Map) {
        let nx = self.x + dx;
        if map.is_walkable(nx, self.y) {
            self.x = nx;
        }
    }

    /// Standing directly on a solid tile. Spikes and the goal don't count as
    /// footing, matching how the jump check treats them.
    pub fn on_ground(&self, map: &Map) -> bool {
        let below = self.y + 1;
        map.in_bounds(self.x, below) && map.get(self.x as usize, below as usize) == Tile::Solid
    }

    /// Begin a jump if grounded and not already mid-jump.
    pub fn start_jump(&mut self, map: &Map) {
        if !self.jumping && self.on_ground(map) {
            self.jumping = true;
            self.jump_progress = self.jump_height;
        }
    }
}
