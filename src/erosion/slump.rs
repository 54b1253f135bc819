//! Gravity-driven diffusive erosion between adjacent hexes.

use crate::hexgrid::HexGrid;

/// Fraction of a pairwise altitude difference moved downhill per pass.
pub const SLUMP_RATE: f32 = 0.025;

/// Run one slump pass.
///
/// Cells are visited from highest to lowest. Every transfer is computed
/// against the altitude snapshot taken before the pass and written into
/// `altitude_new`, so each adjacent pair moves material exactly once (from its
/// higher to its lower member). The buffer is committed at the end.
///
/// Returns the largest single transfer.
pub fn slump(grid: &mut HexGrid) -> f32 {
    let order = grid.indices_by_altitude_desc();

    for cell in grid.cells_mut() {
        cell.altitude_new = cell.altitude;
    }

    let mut max_transfer = 0.0f32;

    for &idx in &order {
        let altitude = grid.cell(idx).altitude;
        for slot in 0..grid.cell(idx).neighbours.len() {
            let Some(n) = grid.cell(idx).neighbours[slot] else {
                continue;
            };
            let difference = altitude - grid.cell(n).altitude;
            if difference <= 0.0 {
                continue;
            }
            let transfer = difference * SLUMP_RATE;
            grid.cell_mut(idx).altitude_new -= transfer;
            grid.cell_mut(n).altitude_new += transfer;
            max_transfer = max_transfer.max(transfer);
        }
    }

    for cell in grid.cells_mut() {
        cell.altitude = cell.altitude_new;
    }
    let pruned = grid.prune_uphill_drainage();

    log::debug!(
        "Slump: max transfer {:.2}, {} drainage links levelled",
        max_transfer,
        pruned
    );
    max_transfer
}
