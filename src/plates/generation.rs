use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::error::{Result, WorldError};
use crate::hexgrid::{Direction, HexGrid};

use super::types::{PlateId, TectonicPlate, MAX_PLATES};

/// Chance that an eligible neighbour is pushed onto the growth frontier.
const SPREAD_PROBABILITY: f64 = 0.5;

/// Generate `count` plates (capped at [`MAX_PLATES`]) on an unclaimed grid.
///
/// Each plate gets a minimum size of `cells / count` so that, on average,
/// the plates together cover most of the map.
pub fn generate_plates(
    grid: &mut HexGrid,
    count: usize,
    max_seed_attempts: usize,
    rng: &mut ChaCha8Rng,
) -> Result<Vec<TectonicPlate>> {
    let count = count.clamp(1, MAX_PLATES);
    let min_size = grid.len() / count;
    let mut plates = Vec::with_capacity(count);

    for _ in 0..count {
        match generate_plate(grid, &mut plates, min_size, None, max_seed_attempts, rng) {
            Ok(_) => {}
            // Earlier plates already cover the map
            Err(WorldError::ExhaustedGrid { .. }) if !plates.is_empty() => {
                log::warn!(
                    "Grid fully claimed after {} of {} plates",
                    plates.len(),
                    count
                );
                break;
            }
            Err(e) => return Err(e),
        }
    }

    let claimed = grid.cells().iter().filter(|c| c.plate.is_some()).count();
    log::debug!(
        "Generated {} plates covering {:.1}% of the grid",
        plates.len(),
        100.0 * claimed as f32 / grid.len() as f32
    );

    Ok(plates)
}

/// Grow one plate by randomized region flood fill and append it to `plates`.
///
/// Without `seed_cell` the start is a uniformly random unclaimed cell and the
/// fill only spreads into unclaimed cells. With `seed_cell` the plate is an
/// override: it may start anywhere and overwrite existing membership.
pub fn generate_plate(
    grid: &mut HexGrid,
    plates: &mut Vec<TectonicPlate>,
    min_size: usize,
    seed_cell: Option<usize>,
    max_seed_attempts: usize,
    rng: &mut ChaCha8Rng,
) -> Result<PlateId> {
    if plates.len() >= MAX_PLATES {
        return Err(WorldError::PlateLimit { limit: MAX_PLATES });
    }

    let overriding = seed_cell.is_some();
    let start = match seed_cell {
        Some(idx) => idx,
        None => pick_unclaimed_cell(grid, max_seed_attempts, rng)?,
    };

    let plate = TectonicPlate::random(PlateId::nth(plates.len()), min_size, rng);
    let size = flood_fill(grid, &plate, start, overriding, rng);

    log::debug!(
        "Plate {} dir {:.0} intensity {:.0}: {} / {} hexes",
        plate.id,
        plate.direction,
        plate.intensity,
        size,
        plate.max_size
    );

    let id = plate.id;
    plates.push(plate);
    Ok(id)
}

/// Rejection-sample an unclaimed cell, then fall back to an exhaustive scan so
/// a nearly full grid still terminates.
fn pick_unclaimed_cell(
    grid: &HexGrid,
    max_attempts: usize,
    rng: &mut ChaCha8Rng,
) -> Result<usize> {
    for _ in 0..max_attempts {
        let idx = rng.gen_range(0..grid.len());
        if grid.cell(idx).plate.is_none() {
            return Ok(idx);
        }
    }

    let unclaimed: Vec<usize> = (0..grid.len())
        .filter(|&idx| grid.cell(idx).plate.is_none())
        .collect();
    if unclaimed.is_empty() {
        return Err(WorldError::ExhaustedGrid { attempts: max_attempts });
    }
    Ok(unclaimed[rng.gen_range(0..unclaimed.len())])
}

fn flood_fill(
    grid: &mut HexGrid,
    plate: &TectonicPlate,
    start: usize,
    overriding: bool,
    rng: &mut ChaCha8Rng,
) -> usize {
    let mut in_plate = vec![false; grid.len()];
    let mut frontier = vec![start];
    let mut size = 0;

    while !frontier.is_empty() && size < plate.max_size {
        let pick = rng.gen_range(0..frontier.len());
        let idx = frontier.swap_remove(pick);
        if in_plate[idx] {
            continue;
        }
        in_plate[idx] = true;

        let cell = grid.cell_mut(idx);
        cell.plate = Some(plate.id);
        cell.magma_direction = plate.direction;
        cell.magma_intensity = plate.intensity;
        cell.plate_selected = overriding;
        size += 1;

        for dir in Direction::ALL {
            let Some(n) = grid.neighbour(idx, dir) else {
                continue;
            };
            if in_plate[n] {
                continue;
            }
            let eligible = overriding || grid.cell(n).plate.is_none();
            if eligible && rng.gen_bool(SPREAD_PROBABILITY) {
                frontier.push(n);
            }
        }
    }

    size
}
