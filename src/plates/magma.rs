//! Per-tick tectonic uplift: every cell pushes altitude along its magma vector.

use crate::hexgrid::{Direction, HexGrid};

/// Altitude gained per point of volcanic activity each tick.
const VOLCANIC_UPLIFT: f32 = 10.0;
/// Activity lost per tick.
const VOLCANIC_DECAY: f32 = 10.0;

#[derive(Clone, Debug, Default)]
pub struct MagmaStats {
    /// Altitude added by volcanoes this tick (the only non-conserved term)
    pub volcanic_injection: f64,
    /// Net altitude not moved because one side of a push fell off a pole row
    pub edge_imbalance: f64,
    pub active_volcanoes: usize,
}

/// Apply one magma tick.
///
/// First records `altitude_delta` against the previous tick for every cell.
/// Then each cell raises the neighbour its magma points at by its intensity and
/// lowers the opposite neighbour by the same amount. A missing pole neighbour
/// skips its half of the push, which is tallied in `edge_imbalance`. Volcanic
/// cells add `10 x activity` to themselves and cool by 10. Drainage links that
/// end up level or uphill are dropped.
pub fn magma_impact(grid: &mut HexGrid) -> MagmaStats {
    for cell in grid.cells_mut() {
        cell.altitude_delta = cell.altitude - cell.previous_altitude;
        cell.previous_altitude = cell.altitude;
    }

    let mut stats = MagmaStats::default();

    for idx in 0..grid.len() {
        let (direction, intensity) = {
            let cell = grid.cell(idx);
            (Direction::from_degrees(cell.magma_direction), cell.magma_intensity)
        };

        match grid.neighbour(idx, direction) {
            Some(towards) => grid.cell_mut(towards).altitude += intensity,
            None => stats.edge_imbalance -= intensity as f64,
        }
        match grid.neighbour(idx, direction.opposite()) {
            Some(away) => grid.cell_mut(away).altitude -= intensity,
            None => stats.edge_imbalance += intensity as f64,
        }

        let cell = grid.cell_mut(idx);
        if cell.volcanic_activity > 0.0 {
            let uplift = cell.volcanic_activity * VOLCANIC_UPLIFT;
            cell.altitude += uplift;
            cell.volcanic_activity = (cell.volcanic_activity - VOLCANIC_DECAY).max(0.0);
            stats.volcanic_injection += uplift as f64;
            stats.active_volcanoes += 1;
        }
    }

    grid.prune_uphill_drainage();

    log::debug!(
        "MagmaImpact: {} active volcanoes injected {:.0} units, pole imbalance {:.0}",
        stats.active_volcanoes,
        stats.volcanic_injection,
        stats.edge_imbalance
    );

    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn still_grid(width: usize, height: usize) -> HexGrid {
        let mut grid = HexGrid::new(width, height, 10000.0).unwrap();
        for cell in grid.cells_mut() {
            cell.magma_intensity = 0.0;
        }
        grid
    }

    #[test]
    fn test_single_cell_pushes_east_and_pulls_west() {
        let mut grid = still_grid(10, 10);
        let centre = grid.index(5, 5);
        grid.cell_mut(centre).magma_intensity = 50.0;
        grid.cell_mut(centre).magma_direction = 0.0;

        magma_impact(&mut grid);

        assert_eq!(grid.get(6, 5).altitude, 10050.0);
        assert_eq!(grid.get(4, 5).altitude, 9950.0);
        assert_eq!(grid.get(5, 5).altitude, 10000.0);
        assert_eq!(grid.get(5, 4).altitude, 10000.0);
    }

    #[test]
    fn test_missing_neighbour_is_skipped() {
        let mut grid = still_grid(6, 4);
        let top = grid.index(2, 0);
        grid.cell_mut(top).magma_intensity = 30.0;
        // Pointing NE off the top edge; the SW neighbour still loses
        grid.cell_mut(top).magma_direction = 300.0;

        let stats = magma_impact(&mut grid);

        assert_eq!(stats.edge_imbalance, -30.0);
        assert_eq!(grid.get(2, 1).altitude, 9970.0);
        assert!((grid.total_altitude() - 6.0 * 4.0 * 10000.0 + 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_pole_row_imbalance_is_reported() {
        let mut grid = still_grid(8, 5);
        for x in 0..8 {
            let idx = grid.index(x, 0);
            grid.cell_mut(idx).magma_intensity = 20.0;
            // NW has no neighbour on the top row
            grid.cell_mut(idx).magma_direction = 270.0;
        }
        let before = grid.total_altitude();

        let stats = magma_impact(&mut grid);

        assert_eq!(stats.edge_imbalance, -160.0);
        let change = grid.total_altitude() - before;
        assert!((change - stats.volcanic_injection - stats.edge_imbalance).abs() < 1e-3);
    }

    #[test]
    fn test_raised_target_drops_drainage_link() {
        let mut grid = still_grid(10, 10);
        let source = grid.index(4, 5);
        let target = grid.index(5, 5);
        grid.cell_mut(source).altitude = 10010.0;
        grid.cell_mut(source).lowest_neighbour = Some(target);
        grid.cell_mut(source).magma_intensity = 50.0;
        grid.cell_mut(source).magma_direction = 0.0;

        magma_impact(&mut grid);

        assert_eq!(grid.cell(target).altitude, 10050.0);
        assert_eq!(grid.cell(source).lowest_neighbour, None);
    }

    #[test]
    fn test_whole_grid_plate_conserves_altitude() {
        let mut grid = HexGrid::new(10, 10, 10000.0).unwrap();
        for cell in grid.cells_mut() {
            cell.magma_intensity = 50.0;
            cell.magma_direction = 0.0;
        }
        let before = grid.total_altitude();

        magma_impact(&mut grid);

        // Each cell gains 50 from its western neighbour and loses 50 to its eastern one
        for cell in grid.cells() {
            assert_eq!(cell.altitude, 10000.0);
        }
        assert_eq!(grid.total_altitude(), before);
    }

    #[test]
    fn test_volcanic_injection_and_decay() {
        let mut grid = still_grid(6, 6);
        let idx = grid.index(3, 3);
        grid.cell_mut(idx).volcanic_activity = 25.0;
        let before = grid.total_altitude();

        let stats = magma_impact(&mut grid);
        assert_eq!(grid.cell(idx).altitude, 10250.0);
        assert_eq!(grid.cell(idx).volcanic_activity, 15.0);
        assert_eq!(stats.active_volcanoes, 1);
        assert!((grid.total_altitude() - before - stats.volcanic_injection).abs() < 1e-3);

        magma_impact(&mut grid);
        magma_impact(&mut grid);
        assert_eq!(grid.cell(idx).volcanic_activity, 0.0);
    }

    #[test]
    fn test_altitude_delta_tracks_previous_tick() {
        let mut grid = still_grid(6, 6);
        let idx = grid.index(1, 1);
        grid.cell_mut(idx).volcanic_activity = 10.0;

        magma_impact(&mut grid);
        magma_impact(&mut grid);
        assert_eq!(grid.cell(idx).altitude_delta, 100.0);
        assert_eq!(grid.cell(idx).previous_altitude, 10100.0);
    }
}
