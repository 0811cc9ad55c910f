#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty,
    Solid,
    Spike,
    Goal,
}

impl Tile {
    /// '0' is a legacy alias for empty; any other unknown char is empty too.
    pub fn from_char(c: char) -> Self {
        match c {
            '#' => Tile::Solid,
            '^' => Tile::Spike,
            'G' => Tile::Goal,
            _ => Tile::Empty,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Tile::Empty => ' ',
            Tile::Solid => '#',
            Tile::Spike => '^',
            Tile::Goal => 'G',
        }
    }

    /// Only solid tiles block movement; spikes and the goal are stepped onto.
    pub fn is_walkable(self) -> bool {
        !matches!(self, Tile::Solid)
    }
}
