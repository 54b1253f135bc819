//! Hexagonal cell arena with cylindrical wrapping.
//!
//! Cells live in a flat row-major `Vec`; neighbours are stored as indices so
//! stages can read one cell while mutating another without borrow cycles.
//!
//! Topology: the grid wraps horizontally (east of the last column is the first
//! column) and is clamped vertically. Cells on the top row have no NW/NE
//! neighbours and cells on the bottom row have no SE/SW neighbours.

use crate::cell::{Cell, NEIGHBOUR_SLOTS};
use crate::error::{Result, WorldError};

/// The six hex directions, in neighbour slot order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    East = 0,
    SouthEast = 1,
    SouthWest = 2,
    West = 3,
    NorthWest = 4,
    NorthEast = 5,
}

impl Direction {
    pub const ALL: [Direction; NEIGHBOUR_SLOTS] = [
        Direction::East,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
        Direction::NorthEast,
    ];

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % NEIGHBOUR_SLOTS]
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Snap an angle in degrees to the nearest direction (`round(deg / 60) mod 6`).
    ///
    /// Halfway angles round to the even step, so 270 is NW and 90 is SW.
    pub fn from_degrees(degrees: f32) -> Self {
        let step = (degrees / 60.0).round_ties_even() as i64;
        Self::from_index(step.rem_euclid(NEIGHBOUR_SLOTS as i64) as usize)
    }

    pub fn degrees(self) -> f32 {
        self.index() as f32 * 60.0
    }

    pub fn opposite(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// True for identical or hex-adjacent directions.
    pub fn is_parallel(self, other: Direction) -> bool {
        let diff = (self.index() as i32 - other.index() as i32).abs();
        diff == 0 || diff == 1 || diff == 5
    }

    /// Column/row offset for this direction: `(dx, dy)`.
    fn offset(self) -> (i32, i32) {
        match self {
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (0, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
            Direction::NorthEast => (0, -1),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::East => write!(f, "E"),
            Direction::SouthEast => write!(f, "SE"),
            Direction::SouthWest => write!(f, "SW"),
            Direction::West => write!(f, "W"),
            Direction::NorthWest => write!(f, "NW"),
            Direction::NorthEast => write!(f, "NE"),
        }
    }
}

/// A `width x height` grid of hex cells with resolved adjacency.
#[derive(Clone, Debug)]
pub struct HexGrid {
    pub width: usize,
    pub height: usize,
    cells: Vec<Cell>,
}

impl HexGrid {
    /// Build a grid where every cell starts at `altitude`.
    pub fn new(width: usize, height: usize, altitude: f32) -> Result<Self> {
        Self::from_fn(width, height, |_, _| altitude)
    }

    /// Build a grid with per-cell starting altitude and resolve neighbours once.
    pub fn from_fn(
        width: usize,
        height: usize,
        mut altitude: impl FnMut(usize, usize) -> f32,
    ) -> Result<Self> {
        if width < 3 || height == 0 {
            return Err(WorldError::InvalidDimensions { width, height });
        }

        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(Cell::new(x, y, altitude(x, y)));
            }
        }

        let mut grid = Self { width, height, cells };
        grid.resolve_neighbours();
        Ok(grid)
    }

    fn resolve_neighbours(&mut self) {
        for idx in 0..self.cells.len() {
            let (x, y) = self.coords(idx);
            let mut slots = [None; NEIGHBOUR_SLOTS];
            for dir in Direction::ALL {
                let (dx, dy) = dir.offset();
                let ny = y as i32 + dy;
                if ny < 0 || ny >= self.height as i32 {
                    continue;
                }
                let nx = (x as i32 + dx).rem_euclid(self.width as i32) as usize;
                slots[dir.index()] = Some(self.index(nx, ny as usize));
            }
            self.cells[idx].neighbours = slots;
        }
    }

    /// Arena index for `(x, y)`, wrapping x horizontally.
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        let x = x % self.width;
        y * self.width + x
    }

    #[inline]
    pub fn coords(&self, idx: usize) -> (usize, usize) {
        (idx % self.width, idx / self.width)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn checked_index(&self, x: usize, y: usize) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(WorldError::OutOfBounds { x, y });
        }
        Ok(self.index(x, y))
    }

    /// Cell at `(x, y)`, wrapping x.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`. Use [`HexGrid::checked_index`] for untrusted
    /// coordinates.
    pub fn get(&self, x: usize, y: usize) -> &Cell {
        &self.cells[self.index(x, y)]
    }

    /// Mutable cell at `(x, y)`, wrapping x.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut Cell {
        let idx = self.index(x, y);
        &mut self.cells[idx]
    }

    #[inline]
    pub fn cell(&self, idx: usize) -> &Cell {
        &self.cells[idx]
    }

    #[inline]
    pub fn cell_mut(&mut self, idx: usize) -> &mut Cell {
        &mut self.cells[idx]
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Neighbour index in `dir`, if the slot is populated.
    #[inline]
    pub fn neighbour(&self, idx: usize, dir: Direction) -> Option<usize> {
        self.cells[idx].neighbours[dir.index()]
    }

    /// Populated neighbours of `idx` with their direction.
    pub fn neighbours(&self, idx: usize) -> impl Iterator<Item = (Direction, usize)> + '_ {
        self.cells[idx]
            .neighbours
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.map(|n| (Direction::from_index(i), n)))
    }

    /// Direction from `from` to an adjacent cell `to`, if they are neighbours.
    pub fn direction_to(&self, from: usize, to: usize) -> Option<Direction> {
        self.cells[from]
            .neighbours
            .iter()
            .position(|n| *n == Some(to))
            .map(Direction::from_index)
    }

    /// Cell indices ordered by altitude, highest first. Ties keep row-major order.
    pub fn indices_by_altitude_desc(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.cells.len()).collect();
        order.sort_by(|&a, &b| self.cells[b].altitude.total_cmp(&self.cells[a].altitude));
        order
    }

    /// Cell indices ordered by altitude, lowest first. Ties keep row-major order.
    pub fn indices_by_altitude_asc(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.cells.len()).collect();
        order.sort_by(|&a, &b| self.cells[a].altitude.total_cmp(&self.cells[b].altitude));
        order
    }

    /// Report the first cell that lacks any neighbour slot.
    pub fn validate_full_connectivity(&self) -> Result<()> {
        for cell in &self.cells {
            let missing = cell.neighbours.iter().filter(|n| n.is_none()).count();
            if missing > 0 {
                return Err(WorldError::DegenerateTopology {
                    x: cell.x,
                    y: cell.y,
                    missing,
                });
            }
        }
        Ok(())
    }

    /// Drop every drainage link whose target is no longer strictly lower.
    ///
    /// Stages and edits that move altitude call this before returning.
    /// Returns the number of links removed.
    pub fn prune_uphill_drainage(&mut self) -> usize {
        let mut pruned = 0;
        for idx in 0..self.cells.len() {
            if let Some(low) = self.cells[idx].lowest_neighbour {
                if self.cells[low].altitude >= self.cells[idx].altitude {
                    self.cells[idx].lowest_neighbour = None;
                    pruned += 1;
                }
            }
        }
        pruned
    }

    pub fn total_altitude(&self) -> f64 {
        self.cells.iter().map(|c| c.altitude as f64).sum()
    }

    pub fn mean_altitude(&self) -> f32 {
        (self.total_altitude() / self.cells.len() as f64) as f32
    }

    /// Fraction of cells strictly above `sea_level`.
    pub fn land_fraction(&self, sea_level: f32) -> f32 {
        let land = self.cells.iter().filter(|c| c.altitude > sea_level).count();
        land as f32 / self.cells.len() as f32
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Cell)> {
        self.cells.iter().map(|c| (c.x, c.y, c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_degrees() {
        assert_eq!(Direction::from_degrees(0.0), Direction::East);
        assert_eq!(Direction::from_degrees(60.0), Direction::SouthEast);
        assert_eq!(Direction::from_degrees(180.0), Direction::West);
        assert_eq!(Direction::from_degrees(270.0), Direction::NorthWest);
        assert_eq!(Direction::from_degrees(360.0), Direction::East);
        assert_eq!(Direction::from_degrees(-60.0), Direction::NorthEast);
        // Halfway steps go to the even index
        assert_eq!(Direction::from_degrees(90.0), Direction::SouthWest);
        assert_eq!(Direction::from_degrees(150.0), Direction::SouthWest);
        assert_eq!(Direction::from_degrees(210.0), Direction::NorthWest);
        assert_eq!(Direction::from_degrees(330.0), Direction::East);
        assert_eq!(Direction::West.opposite(), Direction::East);
        assert_eq!(Direction::NorthEast.opposite(), Direction::SouthWest);
    }

    #[test]
    fn test_parallel_directions() {
        assert!(Direction::East.is_parallel(Direction::East));
        assert!(Direction::East.is_parallel(Direction::SouthEast));
        assert!(Direction::East.is_parallel(Direction::NorthEast));
        assert!(!Direction::East.is_parallel(Direction::SouthWest));
        assert!(!Direction::East.is_parallel(Direction::West));
    }

    #[test]
    fn test_horizontal_wrap_and_vertical_clamp() {
        let grid = HexGrid::new(5, 4, 10000.0).unwrap();
        let corner = grid.index(4, 0);

        // East of the last column wraps to column 0
        assert_eq!(grid.neighbour(corner, Direction::East), Some(grid.index(0, 0)));
        // Top row has no northern neighbours
        assert_eq!(grid.neighbour(corner, Direction::NorthWest), None);
        assert_eq!(grid.neighbour(corner, Direction::NorthEast), None);
        assert_eq!(grid.neighbour(corner, Direction::SouthEast), Some(grid.index(0, 1)));

        let bottom = grid.index(0, 3);
        assert_eq!(grid.neighbour(bottom, Direction::SouthEast), None);
        assert_eq!(grid.neighbour(bottom, Direction::SouthWest), None);
        assert_eq!(grid.neighbour(bottom, Direction::West), Some(grid.index(4, 3)));
        assert_eq!(grid.neighbour(bottom, Direction::NorthWest), Some(grid.index(4, 2)));
    }

    #[test]
    fn test_adjacency_is_symmetric() {
        let grid = HexGrid::new(6, 5, 10000.0).unwrap();
        for idx in 0..grid.len() {
            for (dir, n) in grid.neighbours(idx) {
                assert_eq!(grid.neighbour(n, dir.opposite()), Some(idx));
            }
        }
    }

    #[test]
    fn test_interior_cells_are_fully_connected() {
        let grid = HexGrid::new(6, 5, 10000.0).unwrap();
        for y in 1..4 {
            for x in 0..6 {
                assert_eq!(grid.neighbours(grid.index(x, y)).count(), 6);
            }
        }
        assert!(matches!(
            grid.validate_full_connectivity(),
            Err(WorldError::DegenerateTopology { y: 0, missing: 2, .. })
        ));
    }

    #[test]
    fn test_rejects_degenerate_dimensions() {
        assert!(HexGrid::new(2, 5, 0.0).is_err());
        assert!(HexGrid::new(5, 0, 0.0).is_err());
    }

    #[test]
    fn test_altitude_ordering_is_stable() {
        let grid = HexGrid::from_fn(4, 1, |x, _| if x == 2 { 5.0 } else { 1.0 }).unwrap();
        assert_eq!(grid.indices_by_altitude_desc(), vec![2, 0, 1, 3]);
        assert_eq!(grid.indices_by_altitude_asc(), vec![0, 1, 3, 2]);
    }

    #[test]
    fn test_prune_uphill_drainage() {
        let mut grid = HexGrid::new(5, 3, 10000.0).unwrap();
        let high = grid.index(1, 1);
        let low = grid.index(2, 1);
        let level = grid.index(3, 1);
        grid.cell_mut(high).altitude = 10500.0;
        grid.cell_mut(high).lowest_neighbour = Some(low);
        grid.cell_mut(low).lowest_neighbour = Some(level);

        assert_eq!(grid.prune_uphill_drainage(), 1);
        assert_eq!(grid.cell(high).lowest_neighbour, Some(low));
        assert_eq!(grid.cell(low).lowest_neighbour, None);
    }

    #[test]
    #[should_panic]
    fn test_get_panics_below_last_row() {
        let grid = HexGrid::new(4, 3, 10000.0).unwrap();
        let _ = grid.get(1, 3);
    }
}
