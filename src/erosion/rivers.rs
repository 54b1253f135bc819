//! Rainfall drainage and river erosion on the hex grid.
//!
//! Each round runs three phases:
//! 1. Drainage mapping (highest to lowest): rainfall is computed from the wind
//!    fields and every cell picks its steepest-descent neighbour
//! 2. Confluence merge (lowest to highest): tributaries running alongside or
//!    into a lower river are redirected into it and hand over most of their width
//! 3. Erosion and sedimentation: rivers cut into their source hex, deposit part
//!    of the material downstream and move water along the drainage link
//!
//! Altitude and surface water are double-buffered; live state only changes in
//! the commit at the end of phase 3.

use crate::hexgrid::{Direction, HexGrid};

use super::ErosionStats;

/// Parameters for the river flow stage
#[derive(Clone, Debug)]
pub struct RiverFlowParams {
    /// Drainage/merge/erosion rounds per invocation
    pub rounds: usize,
    /// Minimum river width for a neighbour to count as a tributary
    pub min_confluence_width: f32,
    /// Erosion per unit of river width
    pub erosion_rate: f32,
    /// Erosion per unit of river width on frozen ground
    pub glacial_erosion_rate: f32,
    /// Temperature below which the glacial rate applies
    pub glacial_temperature: f32,
    /// Fraction of eroded material deposited on the downstream hex
    pub deposition_rate: f32,
    /// Gradient factor bounds (altitude difference / 100 is clamped into these)
    pub min_gradient: f32,
    pub max_gradient: f32,
    /// Erosion cap as a fraction of the source hex's altitude
    pub max_erosion_fraction: f32,
    /// Water a land hex can accept from upstream per round
    pub land_capacity: f32,
    /// Share of a tributary's width handed to the main river on merge
    pub confluence_transfer: f32,
}

impl Default for RiverFlowParams {
    fn default() -> Self {
        Self {
            rounds: 3,
            min_confluence_width: 15.0,
            erosion_rate: 0.5,
            glacial_erosion_rate: 1.0,
            glacial_temperature: -5.0,
            deposition_rate: 0.3,
            min_gradient: 0.1,
            max_gradient: 2.0,
            max_erosion_fraction: 0.05,
            land_capacity: 300.0,
            confluence_transfer: 0.8,
        }
    }
}

/// Run the river flow stage for `params.rounds` rounds.
pub fn river_flow(grid: &mut HexGrid, sea_level: f32, params: &RiverFlowParams) -> ErosionStats {
    let mut stats = ErosionStats::default();

    for _ in 0..params.rounds {
        map_drainage(grid, sea_level);
        let confluences = merge_confluences(grid, params);
        let mut round = erode_and_deposit(grid, sea_level, params);
        round.confluences = confluences;
        stats.absorb(&round);
    }

    log::debug!(
        "RiverFlow: {} rounds, eroded {:.1}, deposited {:.1}, max {:.2}, {} confluences, {} draining cells",
        stats.rounds,
        stats.total_eroded,
        stats.total_deposited,
        stats.max_erosion,
        stats.confluences,
        stats.drained_cells
    );

    stats
}

/// Rainfall from the cell's own wind fields, the climb from the upwind hex,
/// the eastern neighbour's moisture, and a penalty for depth below sea level.
/// Never negative.
fn rainfall(grid: &HexGrid, idx: usize, sea_level: f32) -> f32 {
    let cell = grid.cell(idx);

    let upwind = Direction::from_degrees((cell.wind_direction + 180.0) % 360.0);
    let climb = grid
        .neighbour(idx, upwind)
        .map(|n| {
            cell.height_above_sea_level(sea_level) - grid.cell(n).height_above_sea_level(sea_level)
        })
        .unwrap_or(0.0);

    let east_moisture = grid
        .neighbour(idx, Direction::East)
        .map(|n| {
            let east = grid.cell(n);
            (east.water_vapour + east.wind_intensity) / 2.0
        })
        .unwrap_or(0.0);

    let depth = cell.altitude_vs_sea_level(sea_level).min(0.0);

    let rain = (cell.water_vapour
        + cell.wind_intensity
        + climb.max(0.0) / 10.0
        + east_moisture
        + depth / 10.0)
        / 8.0;
    rain.max(0.0)
}

/// Strictly lower neighbour with the lowest river-width-biased altitude.
/// Ties keep the first slot in direction order.
fn steepest_descent(grid: &HexGrid, idx: usize) -> Option<usize> {
    let altitude = grid.cell(idx).altitude;
    let mut best: Option<(usize, f32)> = None;
    for (_, n) in grid.neighbours(idx) {
        let neighbour = grid.cell(n);
        if neighbour.altitude >= altitude {
            continue;
        }
        let biased = neighbour.altitude_with_river_width();
        if best.map_or(true, |(_, b)| biased < b) {
            best = Some((n, biased));
        }
    }
    best.map(|(n, _)| n)
}

/// Phase 1: rainfall, drainage targets and initial river widths.
fn map_drainage(grid: &mut HexGrid, sea_level: f32) {
    let order = grid.indices_by_altitude_desc();

    for cell in grid.cells_mut() {
        cell.altitude_new = cell.altitude;
        cell.surface_water_new = 0.0;
        cell.river_width = 0.0;
    }

    for &idx in &order {
        let rain = rainfall(grid, idx, sea_level);
        let lowest = steepest_descent(grid, idx);

        let cell = grid.cell_mut(idx);
        cell.rainfall = rain;
        cell.surface_water_new += rain;
        cell.lowest_neighbour = lowest;
        cell.river_width = cell.surface_water_new;
    }
}

/// Direction a cell drains towards, if it drains at all.
fn flow_direction(grid: &HexGrid, idx: usize) -> Option<Direction> {
    grid.cell(idx)
        .lowest_neighbour
        .and_then(|low| grid.direction_to(idx, low))
}

/// Higher, unprocessed neighbours wide enough to merge that either run
/// parallel to `idx` or already drain into it.
fn find_tributaries(
    grid: &HexGrid,
    idx: usize,
    processed: &[bool],
    params: &RiverFlowParams,
) -> Vec<usize> {
    let cell = grid.cell(idx);
    let main_flow = flow_direction(grid, idx);
    let mut tributaries = Vec::new();

    for (_, n) in grid.neighbours(idx) {
        let neighbour = grid.cell(n);
        if processed[n]
            || neighbour.altitude <= cell.altitude
            || neighbour.river_width < params.min_confluence_width
        {
            continue;
        }

        let parallel = match (main_flow, flow_direction(grid, n)) {
            (Some(a), Some(b)) => a.is_parallel(b),
            _ => false,
        };
        let drains_here = neighbour.lowest_neighbour == Some(idx);

        if (parallel || drains_here) && !tributaries.contains(&n) {
            tributaries.push(n);
        }
    }

    tributaries
}

/// Phase 2: merge tributaries bottom-up. Returns the number of merges.
fn merge_confluences(grid: &mut HexGrid, params: &RiverFlowParams) -> usize {
    let order: Vec<usize> = grid
        .indices_by_altitude_asc()
        .into_iter()
        .filter(|&idx| grid.cell(idx).river_width > 0.0)
        .collect();

    let mut processed = vec![false; grid.len()];
    let mut merges = 0;

    for idx in order {
        if processed[idx] {
            continue;
        }

        let tributaries = find_tributaries(grid, idx, &processed, params);
        if tributaries.is_empty() {
            continue;
        }

        for &t in &tributaries {
            let transferred = grid.cell(t).river_width * params.confluence_transfer;
            let tributary = grid.cell_mut(t);
            tributary.lowest_neighbour = Some(idx);
            tributary.river_width -= transferred;
            grid.cell_mut(idx).river_width += transferred;
            processed[t] = true;
            merges += 1;
        }
        processed[idx] = true;
    }

    merges
}

/// Phase 3: erosion, deposition and water transfer, then commit.
fn erode_and_deposit(grid: &mut HexGrid, sea_level: f32, params: &RiverFlowParams) -> ErosionStats {
    let mut stats = ErosionStats::default();

    for idx in 0..grid.len() {
        let (low, altitude, width, temperature, water) = {
            let cell = grid.cell(idx);
            match cell.lowest_neighbour {
                Some(low) if cell.river_width > 0.0 => (
                    low,
                    cell.altitude,
                    cell.river_width,
                    cell.temperature,
                    cell.surface_water_new,
                ),
                _ => continue,
            }
        };
        let low_altitude = grid.cell(low).altitude;

        let rate = if temperature < params.glacial_temperature {
            params.glacial_erosion_rate
        } else {
            params.erosion_rate
        };
        let gradient =
            ((altitude - low_altitude) / 100.0).clamp(params.min_gradient, params.max_gradient);
        let erosion = (width * rate * gradient)
            .min(altitude * params.max_erosion_fraction)
            .max(0.0);
        let deposit = erosion * params.deposition_rate;

        let capacity = if low_altitude <= sea_level {
            f32::MAX
        } else {
            params.land_capacity
        };
        let flow = water.min(capacity);

        let source = grid.cell_mut(idx);
        source.altitude_new -= erosion;
        source.surface_water_new -= flow;
        source.river_width = flow;

        let downstream = grid.cell_mut(low);
        downstream.altitude_new += deposit;
        downstream.surface_water_new += flow;

        stats.total_eroded += erosion as f64;
        stats.total_deposited += deposit as f64;
        stats.max_erosion = stats.max_erosion.max(erosion);
    }

    for cell in grid.cells_mut() {
        cell.altitude = cell.altitude_new;
        cell.surface_water = cell.surface_water_new;
    }

    // Erosion can level a drainage link
    grid.prune_uphill_drainage();

    stats.drained_cells = grid
        .cells()
        .iter()
        .filter(|c| c.lowest_neighbour.is_some())
        .count();
    stats
}
