//! Edge guard keeping an open ocean channel along the east and west borders.
//!
//! Tectonics and erosion can raise land right up to the wrap seam. After any
//! altitude-changing stage the three outermost columns on each side are
//! capped with a stepped maximum so ships can always sail around the map.

use crate::hexgrid::HexGrid;

/// Altitude caps from the outermost column inwards.
pub const EDGE_CAPS: [f32; 3] = [9600.0, 9800.0, 9900.0];

/// Cap for column `x`, if it lies in the guarded band.
pub fn edge_cap(x: usize, width: usize) -> Option<f32> {
    let from_east = width.saturating_sub(x + 1);
    EDGE_CAPS.get(x.min(from_east)).copied()
}

/// Clamp the guarded columns. Returns how many hexes were lowered.
pub fn edge_guard(grid: &mut HexGrid) -> usize {
    let width = grid.width;
    let mut clamped = 0;

    for cell in grid.cells_mut() {
        if let Some(cap) = edge_cap(cell.x, width) {
            if cell.altitude > cap {
                cell.altitude = cap;
                clamped += 1;
            }
        }
    }

    let pruned = grid.prune_uphill_drainage();

    log::debug!(
        "EdgeGuard: lowered {} border hexes, {} drainage links dropped",
        clamped,
        pruned
    );
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caps_step_inwards_on_both_sides() {
        let mut grid = HexGrid::new(10, 4, 12000.0).unwrap();
        let clamped = edge_guard(&mut grid);
        assert_eq!(clamped, 6 * 4);

        for y in 0..4 {
            assert_eq!(grid.get(0, y).altitude, 9600.0);
            assert_eq!(grid.get(1, y).altitude, 9800.0);
            assert_eq!(grid.get(2, y).altitude, 9900.0);
            assert_eq!(grid.get(3, y).altitude, 12000.0);
            assert_eq!(grid.get(6, y).altitude, 12000.0);
            assert_eq!(grid.get(7, y).altitude, 9900.0);
            assert_eq!(grid.get(8, y).altitude, 9800.0);
            assert_eq!(grid.get(9, y).altitude, 9600.0);
        }
    }

    #[test]
    fn test_low_border_is_left_alone() {
        let mut grid = HexGrid::new(8, 3, 9000.0).unwrap();
        assert_eq!(edge_guard(&mut grid), 0);
        assert!(grid.cells().iter().all(|c| c.altitude == 9000.0));
    }

    #[test]
    fn test_narrow_grid_uses_tightest_cap() {
        // Column 2 of a 5-wide grid is third from the west and third from the east
        assert_eq!(edge_cap(2, 5), Some(9900.0));
        assert_eq!(edge_cap(3, 5), Some(9800.0));
        assert_eq!(edge_cap(0, 3), Some(9600.0));
        assert_eq!(edge_cap(1, 3), Some(9800.0));
        assert_eq!(edge_cap(5, 12), None);
    }

    #[test]
    fn test_clamped_border_drops_uphill_drainage() {
        let mut grid = HexGrid::new(8, 3, 10000.0).unwrap();
        let outer = grid.index(0, 1);
        let second = grid.index(1, 1);
        let inner = grid.index(2, 1);
        grid.cell_mut(second).altitude = 12000.0;
        grid.cell_mut(inner).altitude = 9850.0;
        grid.cell_mut(second).lowest_neighbour = Some(inner);
        grid.cell_mut(outer).lowest_neighbour = Some(grid.index(7, 1));
        grid.cell_mut(grid.index(7, 1)).altitude = 9000.0;

        edge_guard(&mut grid);

        // 12000 clamped to 9800 is now below its 9850 target
        assert_eq!(grid.cell(second).altitude, 9800.0);
        assert_eq!(grid.cell(second).lowest_neighbour, None);
        // 9600 still drains into 9000
        assert_eq!(grid.cell(outer).lowest_neighbour, Some(grid.index(7, 1)));
    }
}
