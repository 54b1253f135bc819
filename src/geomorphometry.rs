//! Terrain roughness and quartile classification.
//!
//! Roughness is the mean absolute altitude difference to a hex's neighbours.
//! Hexes are then bucketed by their rank across the whole grid into quartiles
//! 1 (flat) to 4 (mountainous), which the biome rules key on.

use crate::hexgrid::HexGrid;

/// Results from a terrain analysis pass
#[derive(Debug, Clone, Default)]
pub struct TerrainAnalysis {
    /// Roughness values at n/4, n/2 and 3n/4 of the sorted list
    pub thresholds: [f32; 3],
    /// Number of hexes in each quartile (index 0 = quartile 1)
    pub quartile_counts: [usize; 4],
    pub mean_roughness: f32,
    pub max_roughness: f32,
}

impl TerrainAnalysis {
    /// Print the quartile breakdown.
    pub fn print_summary(&self) {
        println!(
            "Terrain quartile thresholds: Q1 {:.2}, Q2 {:.2}, Q3 {:.2}",
            self.thresholds[0], self.thresholds[1], self.thresholds[2]
        );
        println!(
            "  Flat: {}, Rolling: {}, Hilly: {}, Mountainous: {}",
            self.quartile_counts[0],
            self.quartile_counts[1],
            self.quartile_counts[2],
            self.quartile_counts[3]
        );
        println!(
            "  Roughness: mean {:.1}, max {:.1}",
            self.mean_roughness, self.max_roughness
        );
    }
}

/// Mean absolute altitude difference between `idx` and its existing neighbours.
pub fn roughness(grid: &HexGrid, idx: usize) -> f32 {
    let altitude = grid.cell(idx).altitude;
    let mut total = 0.0;
    let mut count = 0;
    for (_, n) in grid.neighbours(idx) {
        total += (grid.cell(n).altitude - altitude).abs();
        count += 1;
    }
    if count == 0 {
        0.0
    } else {
        total / count as f32
    }
}

/// Quartile for `value` given the three thresholds.
pub fn quartile(value: f32, thresholds: &[f32; 3]) -> u8 {
    if value <= thresholds[0] {
        1
    } else if value <= thresholds[1] {
        2
    } else if value <= thresholds[2] {
        3
    } else {
        4
    }
}

/// Compute roughness and quartile for every hex.
///
/// Returns `None` (and leaves the grid untouched) for an empty grid.
pub fn analyze_terrain(grid: &mut HexGrid) -> Option<TerrainAnalysis> {
    if grid.is_empty() {
        log::warn!("TerrainAnalysis: no hexes to classify");
        return None;
    }

    let values: Vec<f32> = (0..grid.len()).map(|idx| roughness(grid, idx)).collect();

    let mut sorted = values.clone();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len();
    let thresholds = [sorted[n / 4], sorted[n / 2], sorted[(3 * n) / 4]];

    let mut results = TerrainAnalysis {
        thresholds,
        mean_roughness: values.iter().sum::<f32>() / n as f32,
        max_roughness: sorted[n - 1],
        ..Default::default()
    };

    for (cell, &value) in grid.cells_mut().iter_mut().zip(&values) {
        let q = quartile(value, &thresholds);
        cell.terrain_roughness = value;
        cell.terrain_quartile = q;
        results.quartile_counts[(q - 1) as usize] += 1;
    }

    log::debug!(
        "TerrainAnalysis: thresholds {:.2}/{:.2}/{:.2}, flat {} rolling {} hilly {} mountainous {}",
        thresholds[0],
        thresholds[1],
        thresholds[2],
        results.quartile_counts[0],
        results.quartile_counts[1],
        results.quartile_counts[2],
        results.quartile_counts[3]
    );

    Some(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_grid_is_all_quartile_one() {
        let mut grid = HexGrid::new(6, 4, 10000.0).unwrap();
        let results = analyze_terrain(&mut grid).unwrap();
        assert_eq!(results.quartile_counts, [24, 0, 0, 0]);
        assert!(grid.cells().iter().all(|c| c.terrain_roughness == 0.0));
    }

    #[test]
    fn test_isolated_peak_is_mountainous() {
        let mut grid = HexGrid::new(8, 8, 10000.0).unwrap();
        let peak = grid.index(4, 4);
        grid.cell_mut(peak).altitude = 13000.0;

        analyze_terrain(&mut grid).unwrap();

        let cell = grid.cell(peak);
        assert_eq!(cell.terrain_roughness, 3000.0);
        assert_eq!(cell.terrain_quartile, 4);
        // Ring cells see one 3000 step out of six
        let east = grid.get(5, 4);
        assert!((east.terrain_roughness - 500.0).abs() < 1e-3);
    }

    #[test]
    fn test_edge_roughness_uses_existing_neighbours_only() {
        let mut grid = HexGrid::new(4, 3, 10000.0).unwrap();
        grid.get_mut(1, 1).altitude = 10400.0;
        // (1, 0) has four neighbours, one of which is (1, 1) via SW
        assert!((roughness(&grid, grid.index(1, 0)) - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_quartile_boundaries_are_inclusive() {
        let thresholds = [1.0, 2.0, 3.0];
        assert_eq!(quartile(1.0, &thresholds), 1);
        assert_eq!(quartile(1.5, &thresholds), 2);
        assert_eq!(quartile(3.0, &thresholds), 3);
        assert_eq!(quartile(3.1, &thresholds), 4);
    }
}
