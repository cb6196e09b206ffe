//! Rooms

use serde::{Deserialize, Serialize};

use crate::rng::GameRng;

/// Rectangle representing a room interior; walls lie one cell outside it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// X coordinate of room interior (left edge)
    pub x: usize,
    /// Y coordinate of room interior (top edge)
    pub y: usize,
    /// Width of room interior
    pub width: usize,
    /// Height of room interior
    pub height: usize,
}

impl Room {
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check whether two interiors come closer than `margin` cells
    pub fn overlaps(&self, other: &Room, margin: usize) -> bool {
        self.x < other.x + other.width + margin
            && other.x < self.x + self.width + margin
            && self.y < other.y + other.height + margin
            && other.y < self.y + self.height + margin
    }

    /// Center of the interior
    pub fn center(&self) -> (usize, usize) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Check if (x, y) is inside the interior
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// Check if (x, y) is inside the interior or on its walls
    pub fn contains_with_walls(&self, x: usize, y: usize) -> bool {
        x + 1 >= self.x && x <= self.x + self.width && y + 1 >= self.y && y <= self.y + self.height
    }

    /// Random interior point
    pub fn random_point(&self, rng: &mut GameRng) -> (usize, usize) {
        (
            self.x + rng.range(0, self.width),
            self.y + rng.range(0, self.height),
        )
    }

    /// All interior points, row by row
    pub fn points(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (self.y..self.y + self.height).flat_map(move |y| (self.x..self.x + self.width).map(move |x| (x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_margin() {
        let a = Room::new(2, 2, 4, 3);
        // interiors 4 apart: wall, two stone cells, wall
        let b = Room::new(10, 2, 4, 3);
        assert!(!a.overlaps(&b, 4));
        assert!(a.overlaps(&b, 5));
        assert!(a.overlaps(&a, 0));
    }

    #[test]
    fn test_contains_with_walls() {
        let room = Room::new(5, 5, 3, 2);
        assert!(room.contains(5, 5));
        assert!(!room.contains(4, 5));
        assert!(room.contains_with_walls(4, 4));
        assert!(room.contains_with_walls(8, 7));
        assert!(!room.contains_with_walls(9, 7));
        assert!(!room.contains_with_walls(3, 5));
    }

    #[test]
    fn test_random_point_inside() {
        let room = Room::new(3, 4, 5, 2);
        let mut rng = GameRng::new(9);
        for _ in 0..100 {
            let (x, y) = room.random_point(&mut rng);
            assert!(room.contains(x, y));
        }
        assert_eq!(room.points().count(), 10);
    }
}
