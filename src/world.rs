//! World container
//!
//! Bundles the hex grid, the plate registry and the scalar globals every
//! stage reads, so the whole simulation can be passed around as one value.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::climate::{ClimateState, Pole};
use crate::error::Result;
use crate::hexgrid::HexGrid;
use crate::params::WorldParams;
use crate::plates::{self, PlateId, TectonicPlate};
use crate::sea_level::BASELINE_SEA_LEVEL;
use crate::seeds::WorldSeeds;

/// Altitude removed by a sinkhole on a hex already at or below zero.
const SINKHOLE_DEPTH: f32 = 2000.0;
/// Activity given to a hand-placed volcano.
const VOLCANO_ACTIVITY: f32 = 100.0;

/// Scalar globals shared by the stages
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldState {
    pub sea_level: f32,
    /// Mean wind-adjusted temperature from the last wind pass
    pub average_temperature: f32,
    /// Completed eras since genesis
    pub era: u64,
    pub climate: ClimateState,
}

impl Default for WorldState {
    fn default() -> Self {
        Self {
            sea_level: BASELINE_SEA_LEVEL,
            average_temperature: 0.0,
            era: 0,
            climate: ClimateState::default(),
        }
    }
}

/// The grid, its plates and the globals, plus the parameters they were built from
pub struct World {
    pub grid: HexGrid,
    pub plates: Vec<TectonicPlate>,
    pub state: WorldState,
    pub params: WorldParams,
    pub seeds: WorldSeeds,
    /// Randomness for plates added after genesis
    edit_rng: ChaCha8Rng,
}

impl World {
    /// Build the grid with seeded altitudes and pick the arctic pole.
    ///
    /// No plates are grown yet; see [`World::generate_plates`].
    pub fn new(params: WorldParams, seeds: WorldSeeds) -> Result<Self> {
        let mut altitude_rng = seeds.altitude_rng();
        let (low, high) = (params.min_initial_altitude, params.max_initial_altitude);
        let grid = HexGrid::from_fn(params.width, params.height, |_, _| {
            if high > low {
                altitude_rng.gen_range(low..=high)
            } else {
                low
            }
        })?;

        let mut climate_rng = seeds.climate_rng();
        let arctic_pole = if climate_rng.gen_bool(0.5) {
            Pole::North
        } else {
            Pole::South
        };

        let state = WorldState {
            climate: ClimateState {
                arctic_pole,
                ..Default::default()
            },
            ..Default::default()
        };

        Ok(Self {
            grid,
            plates: Vec::new(),
            state,
            edit_rng: seeds.edits_rng(),
            params,
            seeds,
        })
    }

    /// Grow the configured number of plates on the unclaimed grid.
    pub fn generate_plates(&mut self) -> Result<usize> {
        let mut rng = self.seeds.tectonics_rng();
        self.plates = plates::generate_plates(
            &mut self.grid,
            self.params.plate_count,
            self.params.max_seed_attempts,
            &mut rng,
        )?;
        Ok(self.plates.len())
    }

    pub fn sea_level(&self) -> f32 {
        self.state.sea_level
    }

    /// Collapse the hex at `(x, y)`: positive altitude drops to zero, anything
    /// already at or below zero sinks another 2000.
    pub fn create_sinkhole(&mut self, x: usize, y: usize) -> Result<()> {
        let idx = self.grid.checked_index(x, y)?;
        let cell = self.grid.cell_mut(idx);
        cell.altitude = if cell.altitude > 0.0 {
            0.0
        } else {
            cell.altitude - SINKHOLE_DEPTH
        };
        let altitude = cell.altitude;
        self.grid.prune_uphill_drainage();
        log::info!("Sinkhole at ({}, {}): altitude now {:.0}", x, y, altitude);
        Ok(())
    }

    /// Set the hex at `(x, y)` erupting at full activity.
    pub fn create_volcano(&mut self, x: usize, y: usize) -> Result<()> {
        let idx = self.grid.checked_index(x, y)?;
        self.grid.cell_mut(idx).volcanic_activity = VOLCANO_ACTIVITY;
        log::info!("Volcano at ({}, {})", x, y);
        Ok(())
    }

    /// Grow an override plate from `(x, y)`, taking hexes from existing plates.
    pub fn generate_plate_at(&mut self, x: usize, y: usize) -> Result<PlateId> {
        let idx = self.grid.checked_index(x, y)?;
        let min_size = self.params.min_plate_size();
        let id = plates::generate_plate(
            &mut self.grid,
            &mut self.plates,
            min_size,
            Some(idx),
            self.params.max_seed_attempts,
            &mut self.edit_rng,
        )?;
        log::info!("Plate {} grown from ({}, {})", id, x, y);
        Ok(id)
    }

    /// Headline numbers for the current world.
    pub fn report(&self) -> GenesisReport {
        GenesisReport {
            seed: self.seeds.master,
            width: self.grid.width,
            height: self.grid.height,
            plate_count: self.plates.len(),
            land_fraction: self.grid.land_fraction(self.state.sea_level),
            sea_level: self.state.sea_level,
            average_temperature: self.state.average_temperature,
            era: self.state.era,
        }
    }
}

/// Summary of a freshly generated (or advanced) world
#[derive(Clone, Debug, PartialEq)]
pub struct GenesisReport {
    pub seed: u64,
    pub width: usize,
    pub height: usize,
    pub plate_count: usize,
    /// Fraction of hexes strictly above sea level
    pub land_fraction: f32,
    pub sea_level: f32,
    pub average_temperature: f32,
    pub era: u64,
}

impl GenesisReport {
    pub fn print_summary(&self) {
        println!("World {}x{} (seed {})", self.width, self.height, self.seed);
        println!("  Era: {}", self.era);
        println!("  Plates: {}", self.plate_count);
        println!(
            "  Sea level: {:.0} ({:.1}% land)",
            self.sea_level,
            self.land_fraction * 100.0
        );
        println!("  Average temperature: {:.1}", self.average_temperature);
    }
}
