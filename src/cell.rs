//! Per-hex simulation record.
//!
//! Every stage reads and writes fields on [`Cell`]; neighbour and drainage
//! links are arena indices into the owning [`HexGrid`](crate::hexgrid::HexGrid).

use crate::biomes::BiomeId;
use crate::plates::PlateId;

/// Number of neighbour (and wind source) slots on every cell.
pub const NEIGHBOUR_SLOTS: usize = 6;

/// One hexagon of the world grid.
#[derive(Clone, Debug)]
pub struct Cell {
    pub x: usize,
    pub y: usize,

    // Physical state
    pub altitude: f32,
    /// Scratch buffer written by double-buffered stages before their commit loop
    pub altitude_new: f32,
    /// Altitude recorded by the previous magma tick
    pub previous_altitude: f32,
    pub altitude_delta: f32,
    pub magma_intensity: f32,
    /// Degrees, 0 = East, increasing clockwise through SE, SW, W, NW, NE
    pub magma_direction: f32,
    pub volcanic_activity: f32,
    pub plate: Option<PlateId>,
    /// Set when the cell was claimed by a user-seeded (override) plate
    pub plate_selected: bool,

    // Atmosphere
    pub wind_direction: f32,
    pub wind_intensity: f32,
    pub wind_change: f32,
    pub evaporation: f32,
    pub water_vapour: f32,
    pub rainfall: f32,
    pub solar_intensity: f32,
    pub temperature_no_wind: f32,
    pub temperature: f32,

    // Hydrology
    pub surface_water: f32,
    pub surface_water_new: f32,
    pub river_width: f32,
    /// Drainage target; always strictly lower than this cell when set
    pub lowest_neighbour: Option<usize>,

    // Habitability
    pub fertility: f32,
    pub human_comfort: f32,
    pub terrain_roughness: f32,
    /// 1 (flat) to 4 (mountainous)
    pub terrain_quartile: u8,

    pub biome: Option<BiomeId>,

    /// Cells registered as blowing into this one
    pub wind_sources: [Option<usize>; NEIGHBOUR_SLOTS],
    /// Indexed by [`Direction`](crate::hexgrid::Direction)
    pub neighbours: [Option<usize>; NEIGHBOUR_SLOTS],
}

impl Cell {
    pub fn new(x: usize, y: usize, altitude: f32) -> Self {
        Self {
            x,
            y,
            altitude,
            altitude_new: altitude,
            previous_altitude: altitude,
            altitude_delta: 0.0,
            magma_intensity: 25.0,
            magma_direction: 270.0,
            volcanic_activity: 0.0,
            plate: None,
            plate_selected: false,
            wind_direction: 90.0,
            wind_intensity: 25.0,
            wind_change: 0.0,
            evaporation: 0.0,
            water_vapour: 0.0,
            rainfall: 0.0,
            solar_intensity: 0.0,
            temperature_no_wind: 0.0,
            temperature: 0.0,
            surface_water: 0.0,
            surface_water_new: 0.0,
            river_width: 0.0,
            lowest_neighbour: None,
            fertility: 0.0,
            human_comfort: 0.0,
            terrain_roughness: 0.0,
            terrain_quartile: 1,
            biome: None,
            wind_sources: [None; NEIGHBOUR_SLOTS],
            neighbours: [None; NEIGHBOUR_SLOTS],
        }
    }

    /// Signed altitude relative to sea level (negative = underwater).
    #[inline]
    pub fn altitude_vs_sea_level(&self, sea_level: f32) -> f32 {
        self.altitude - sea_level
    }

    /// Altitude above sea level, floored at zero.
    #[inline]
    pub fn height_above_sea_level(&self, sea_level: f32) -> f32 {
        self.altitude_vs_sea_level(sea_level).max(0.0)
    }

    /// Altitude lowered by a tenth of the river width, used to bias drainage
    /// towards established channels.
    #[inline]
    pub fn altitude_with_river_width(&self) -> f32 {
        self.altitude - self.river_width / 10.0
    }

    #[inline]
    pub fn is_underwater(&self, sea_level: f32) -> bool {
        self.altitude < sea_level
    }

    /// Register `source` in the first free wind source slot.
    /// Returns false when all slots are taken.
    pub fn push_wind_source(&mut self, source: usize) -> bool {
        match self.wind_sources.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(source);
                true
            }
            None => false,
        }
    }

    pub fn clear_wind_sources(&mut self) {
        self.wind_sources = [None; NEIGHBOUR_SLOTS];
    }

    /// Wind sources in registration order, stopping at the first empty slot.
    pub fn wind_sources(&self) -> impl Iterator<Item = usize> + '_ {
        self.wind_sources.iter().map_while(|slot| *slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sea_level_accessors() {
        let cell = Cell::new(0, 0, 9800.0);
        assert_eq!(cell.altitude_vs_sea_level(10000.0), -200.0);
        assert_eq!(cell.height_above_sea_level(10000.0), 0.0);
        assert!(cell.is_underwater(10000.0));

        let peak = Cell::new(0, 0, 12500.0);
        assert_eq!(peak.height_above_sea_level(10000.0), 2500.0);
    }

    #[test]
    fn test_wind_source_slots_are_bounded() {
        let mut cell = Cell::new(0, 0, 10000.0);
        for i in 0..NEIGHBOUR_SLOTS {
            assert!(cell.push_wind_source(i));
        }
        assert!(!cell.push_wind_source(99));
        assert_eq!(cell.wind_sources().count(), NEIGHBOUR_SLOTS);

        cell.clear_wind_sources();
        assert_eq!(cell.wind_sources().count(), 0);
    }
}
