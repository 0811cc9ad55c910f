use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::map::{Map, tile::Tile};

/// Column the engine spawns the player in; the generator keeps it clear of
/// spikes so a fresh level never kills on tick one.
pub const SPAWN_CLEARANCE: usize = 4;

/// Generate a random platform level: a full ground row, a few floating
/// platforms, spikes scattered on the ground, and one goal on the last
/// platform. Deterministic for a given seed.
pub fn generate_platform_level(width: usize, height: usize, seed: u64) -> Map {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut map = Map::new(width, height, Tile::Empty);

    for x in 0..width {
        map.set(x, height - 1, Tile::Solid);
    }

    let mut platforms: Vec<(usize, usize)> = Vec::new();
    if width >= 10 && height >= 6 {
        let count = rng.gen_range(3..=5);
        for _ in 0..count {
            let len = rng.gen_range(3..=6);
            if width <= len + 2 {
                continue;
            }
            let x = rng.gen_range(1..width - len - 1);
            // Rows 0..3 stay open so there is headroom to jump over everything.
            let y = rng.gen_range(3..height - 2);
            for dx in 0..len {
                map.set(x + dx, y, Tile::Solid);
            }
            platforms.push((x, y));
        }

        let spikes = rng.gen_range(2..=4);
        for _ in 0..spikes {
            let x = rng.gen_range(SPAWN_CLEARANCE..width - 1);
            map.set(x, height - 2, Tile::Spike);
        }
    }

    match platforms.last() {
        Some(&(x, y)) => map.set(x, y - 1, Tile::Goal),
        None => map.set(width - 2, height - 2, Tile::Goal),
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_for_a_seed() {
        let a = generate_platform_level(30, 12, 7);
        let b = generate_platform_level(30, 12, 7);
        assert_eq!(a.to_text(), b.to_text());
    }

    #[test]
    fn ground_row_is_solid() {
        let map = generate_platform_level(30, 12, 99);
        for x in 0..map.width {
            assert_eq!(map.get(x, map.height - 1), Tile::Solid);
        }
    }

    #[test]
    fn exactly_one_goal() {
        for seed in 0..20 {
            let map = generate_platform_level(30, 12, seed);
            let goals = map.tiles.iter().filter(|&&t| t == Tile::Goal).count();
            assert_eq!(goals, 1, "seed {seed}");
        }
    }

    #[test]
    fn spawn_column_is_safe() {
        for seed in 0..20 {
            let map = generate_platform_level(30, 12, seed);
            let y = map.height as i32 - 2;
            assert!(map.is_walkable(2, y), "seed {seed}");
            assert_ne!(map.get(2, y as usize), Tile::Spike, "seed {seed}");
        }
    }
}
