//! Prevailing wind, altitude cooling and moisture transport.
//!
//! Wind blows west by default and turns aside (SW/W/NW, whichever is lowest)
//! when the western hex is a ridge more than 1000 higher. Every hex registers
//! itself as a source of the hex it blows into; intensity and water vapour are
//! then accumulated by walking that source graph upwind within a window of
//! rows below the current one.

use crate::error::{Result, WorldError};
use crate::hexgrid::{Direction, HexGrid};

/// Tunables for the wind stage
#[derive(Clone, Debug)]
pub struct WindParams {
    /// Intensity every hex starts from before accumulation
    pub base_intensity: f32,
    /// Starting intensity on the fierce eastern ocean
    pub fierce_intensity: f32,
    pub ocean_evaporation: f32,
    pub fierce_evaporation: f32,
    pub land_evaporation: f32,
    /// Number of eastern columns whose ocean counts as fierce
    pub fierce_columns: usize,
    /// Height a western ridge must exceed before the wind turns
    pub ridge_threshold: f32,
    /// Scale applied to wind change picked up from land sources
    pub land_friction: f32,
    /// Rows below the current one that still contribute
    pub row_window: usize,
    /// Wind change over open water next to a western sea
    pub sea_wind_change: f32,
    /// Wind change forced on the fierce eastern ocean
    pub fierce_wind_change: f32,
    /// Land colder than this gets katabatic wind
    pub glacial_temperature: f32,
    pub glacial_wind_bonus: f32,
}

impl Default for WindParams {
    fn default() -> Self {
        Self {
            base_intensity: 25.0,
            fierce_intensity: 75.0,
            ocean_evaporation: 10.0,
            fierce_evaporation: 60.0,
            land_evaporation: 2.0,
            fierce_columns: 3,
            ridge_threshold: 1000.0,
            land_friction: 0.8,
            row_window: 5,
            sea_wind_change: 2.0,
            fierce_wind_change: 4.0,
            glacial_temperature: -10.0,
            glacial_wind_bonus: 1.0,
        }
    }
}

/// Summary of one wind pass
#[derive(Clone, Debug, Default)]
pub struct WindStats {
    /// Grid mean of the wind-adjusted temperature, rounded to one decimal
    pub average_temperature: f32,
    pub mean_intensity: f32,
    pub mean_vapour: f32,
    /// Hexes whose wind turned to avoid a western ridge
    pub deflected: usize,
    /// Registrations lost because the downwind hex had no free source slot
    pub dropped_sources: usize,
    /// Largest number of sources reached from a single hex
    pub longest_walk: usize,
}

/// Directions the wind may take when turning away from a ridge.
const DEFLECTIONS: [Direction; 3] = [Direction::SouthWest, Direction::West, Direction::NorthWest];

fn is_fierce_ocean(grid: &HexGrid, idx: usize, sea_level: f32, params: &WindParams) -> bool {
    let cell = grid.cell(idx);
    cell.altitude <= sea_level && cell.x + params.fierce_columns >= grid.width
}

/// Run the wind stage.
///
/// Fails with [`WorldError::DegenerateTopology`] before touching any state if a
/// hex lacks the east/west neighbours the prevailing wind needs.
pub fn wind_effect(grid: &mut HexGrid, sea_level: f32, params: &WindParams) -> Result<WindStats> {
    for cell in grid.cells() {
        let missing = [Direction::East, Direction::West]
            .iter()
            .filter(|dir| cell.neighbours[dir.index()].is_none())
            .count();
        if missing > 0 {
            return Err(WorldError::DegenerateTopology {
                x: cell.x,
                y: cell.y,
                missing,
            });
        }
    }

    let mut stats = WindStats::default();

    reset(grid, sea_level, params);
    resolve_directions(grid, sea_level, params, &mut stats);
    accumulate(grid, sea_level, params, &mut stats);

    let n = grid.len() as f32;
    let mean_temperature = grid.cells().iter().map(|c| c.temperature).sum::<f32>() / n;
    stats.average_temperature = (mean_temperature * 10.0).round() / 10.0;
    stats.mean_intensity = grid.cells().iter().map(|c| c.wind_intensity).sum::<f32>() / n;
    stats.mean_vapour = grid.cells().iter().map(|c| c.water_vapour).sum::<f32>() / n;

    log::debug!(
        "WindEffect: avg temperature {:.1}, mean wind {:.1}, mean vapour {:.1}, {} deflected, longest walk {}",
        stats.average_temperature,
        stats.mean_intensity,
        stats.mean_vapour,
        stats.deflected,
        stats.longest_walk
    );
    if stats.dropped_sources > 0 {
        log::warn!("WindEffect: {} wind sources dropped (slots full)", stats.dropped_sources);
    }

    Ok(stats)
}

fn reset(grid: &mut HexGrid, sea_level: f32, params: &WindParams) {
    for idx in 0..grid.len() {
        let fierce = is_fierce_ocean(grid, idx, sea_level, params);
        let cell = grid.cell_mut(idx);
        cell.clear_wind_sources();
        cell.wind_direction = Direction::West.degrees();
        cell.wind_intensity = if fierce {
            params.fierce_intensity
        } else {
            params.base_intensity
        };
        cell.evaporation = if fierce {
            params.fierce_evaporation
        } else if cell.altitude <= sea_level {
            params.ocean_evaporation
        } else {
            params.land_evaporation
        };
    }
}

/// Pick the wind direction, register sources, derive wind change and
/// altitude-cooled temperature.
fn resolve_directions(grid: &mut HexGrid, sea_level: f32, params: &WindParams, stats: &mut WindStats) {
    for idx in 0..grid.len() {
        let height = grid.cell(idx).height_above_sea_level(sea_level);
        let west = grid.neighbour(idx, Direction::West);

        let mut direction = Direction::West;
        if let Some(w) = west {
            let ridge = grid.cell(w);
            if ridge.altitude > sea_level
                && ridge.height_above_sea_level(sea_level) - height > params.ridge_threshold
            {
                let mut lowest = ridge.altitude;
                for dir in DEFLECTIONS {
                    if let Some(n) = grid.neighbour(idx, dir) {
                        if grid.cell(n).altitude < lowest {
                            lowest = grid.cell(n).altitude;
                            direction = dir;
                        }
                    }
                }
                if direction != Direction::West {
                    stats.deflected += 1;
                }
            }
        }

        if let Some(downwind) = grid.neighbour(idx, direction) {
            if !grid.cell_mut(downwind).push_wind_source(idx) {
                stats.dropped_sources += 1;
            }
        }

        let west_is_sea = west.map_or(false, |w| grid.cell(w).altitude <= sea_level);
        let climb = grid
            .neighbour(idx, direction.opposite())
            .map(|away| grid.cell(away).height_above_sea_level(sea_level) - height)
            .unwrap_or(0.0);
        let fierce = is_fierce_ocean(grid, idx, sea_level, params);

        let cell = grid.cell_mut(idx);
        cell.wind_direction = direction.degrees();

        if west_is_sea {
            cell.wind_change = params.sea_wind_change;
        } else {
            cell.wind_change = if climb > 0.0 { climb / 100.0 } else { climb / 50.0 };
            cell.temperature_no_wind -= 4.0 * 2f32.powf(height / 1000.0 - 1.0);
        }

        if fierce {
            cell.wind_change = params.fierce_wind_change;
        } else if cell.altitude > sea_level && cell.temperature_no_wind < params.glacial_temperature {
            cell.wind_change += params.glacial_wind_bonus;
        }

        cell.temperature = cell.temperature_no_wind.clamp(-50.0, 50.0);
    }
}

/// Sum wind change and evaporation over every source reachable upwind of
/// each hex, staying within `[y, y + row_window]`.
fn accumulate(grid: &mut HexGrid, sea_level: f32, params: &WindParams, stats: &mut WindStats) {
    let mut visited = vec![false; grid.len()];
    let mut touched: Vec<usize> = Vec::new();
    let mut stack: Vec<usize> = Vec::new();
    let last_row = grid.height - 1;

    for idx in 0..grid.len() {
        let y_start = grid.cell(idx).y;
        let y_limit = (y_start + params.row_window).min(last_row);

        let mut wind = 0.0f32;
        let mut vapour = 0.0f32;

        stack.push(idx);
        while let Some(node) = stack.pop() {
            for source in grid.cell(node).wind_sources() {
                let src = grid.cell(source);
                if src.y < y_start || src.y > y_limit || visited[source] {
                    continue;
                }
                visited[source] = true;
                touched.push(source);

                let friction = if src.altitude > sea_level {
                    params.land_friction
                } else {
                    1.0
                };
                wind += src.wind_change * friction;
                vapour += src.evaporation;
                stack.push(source);
            }
        }

        stats.longest_walk = stats.longest_walk.max(touched.len());
        for t in touched.drain(..) {
            visited[t] = false;
        }

        let fierce = is_fierce_ocean(grid, idx, sea_level, params);
        let cell = grid.cell_mut(idx);
        if fierce {
            cell.wind_intensity = 100.0;
            cell.water_vapour = 100.0;
        } else {
            cell.wind_intensity = wind.clamp(0.0, 100.0);
            cell.water_vapour = vapour.clamp(0.0, 100.0);
        }
    }
}
