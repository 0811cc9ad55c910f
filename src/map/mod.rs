pub mod generator;
pub mod tile;

use tile::Tile;

/// Built-in starter level: ground row, two floating platforms, one spike,
/// goal perched on the higher platform.
const DEFAULT_LEVEL: &str = concat!(
    "                    \n",
    "                    \n",
    "                    \n",
    "                    \n",
    "                    \n",
    "          ###       \n",
    "               G    \n",
    "              ###   \n",
    "          ^         \n",
    "####################",
);

#[derive(Clone, PartialEq, Eq)]
pub struct Map {
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<Tile>,
}

impl Map {
    pub fn new(width: usize, height: usize, fill: Tile) -> Self {
        Self {
            width,
            height,
            tiles: vec![fill; width * height],
        }
    }

    pub fn default_level() -> Self {
        // The embedded text is well-formed, so parse cannot fail.
        Self::parse(DEFAULT_LEVEL).unwrap_or_else(|| Self::new(20, 10, Tile::Empty))
    }

    /// Parse a newline-delimited level. Rows are right-trimmed and short rows
    /// are padded with empty tiles so every row ends up the same length.
    /// Returns `None` when the text contains no tiles at all.
    pub fn parse(text: &str) -> Option<Self> {
        let mut rows: Vec<&str> = text.lines().map(|l| l.trim_end()).collect();
        while rows.last().is_some_and(|l| l.is_empty()) {
            rows.pop();
        }
        let width = rows.iter().map(|l| l.chars().count()).max()?;
        if width == 0 {
            return None;
        }

        let mut map = Self::new(width, rows.len(), Tile::Empty);
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                map.set(x, y, Tile::from_char(c));
            }
        }
        Some(map)
    }

    /// Canonical text form, one full-width row per line.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for y in 0..self.height {
            if y > 0 {
                out.push('\n');
            }
            for x in 0..self.width {
                out.push(self.get(x, y).glyph());
            }
        }
        out
    }

    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn get(&self, x: usize, y: usize) -> Tile {
        self.tiles[self.idx(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, t: Tile) {
        let i = self.idx(x, y);
        self.tiles[i] = t;
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Out-of-bounds cells are not walkable.
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && self.get(x as usize, y as usize).is_walkable()
    }

    pub fn find_first_empty(&self) -> Option<(usize, usize)> {
        for y in 0..self.height {
            for x in 0..self.width {
                if self.get(x, y) == Tile::Empty {
                    return Some((x, y));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_pads_ragged_rows() {
        let map = Map::parse("#\n###").unwrap();
        assert_eq!(map.width, 3);
        assert_eq!(map.height, 2);
        assert_eq!(map.get(0, 0), Tile::Solid);
        assert_eq!(map.get(1, 0), Tile::Empty);
        assert_eq!(map.get(2, 1), Tile::Solid);
    }

    #[test]
    fn parse_rejects_blank_input() {
        assert!(Map::parse("").is_none());
        assert!(Map::parse("   \n  \n").is_none());
    }

    #[test]
    fn parse_keeps_leading_spaces_and_blank_rows() {
        let map = Map::parse("\n  ^\n###").unwrap();
        assert_eq!(map.height, 3);
        assert_eq!(map.get(2, 1), Tile::Spike);
        assert_eq!(map.get(0, 1), Tile::Empty);
    }

    #[test]
    fn legacy_zero_is_empty() {
        let map = Map::parse("0#").unwrap();
        assert_eq!(map.get(0, 0), Tile::Empty);
        assert_eq!(map.get(1, 0), Tile::Solid);
    }

    #[test]
    fn to_text_round_trips() {
        let map = Map::parse(" G \n^ ^\n###").unwrap();
        let again = Map::parse(&map.to_text()).unwrap();
        assert!(map == again);
    }

    #[test]
    fn walkability() {
        let map = Map::parse("^G\n##").unwrap();
        assert!(map.is_walkable(0, 0)); // spike
        assert!(map.is_walkable(1, 0)); // goal
        assert!(!map.is_walkable(0, 1)); // solid
        assert!(!map.is_walkable(-1, 0));
        assert!(!map.is_walkable(0, 2));
    }

    #[test]
    fn default_level_shape() {
        let map = Map::default_level();
        assert_eq!(map.width, 20);
        assert_eq!(map.height, 10);
        for x in 0..map.width {
            assert_eq!(map.get(x, 9), Tile::Solid);
        }
        assert_eq!(map.get(10, 8), Tile::Spike);
        assert_eq!(map.get(15, 6), Tile::Goal);
    }
}
