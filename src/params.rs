//! World generation parameters and presets

use crate::climate::{ClimateMode, TemperatureModel, WindParams};
use crate::erosion::RiverFlowParams;
use crate::habitability::FertilityPolicy;
use crate::sea_level::SeaLevelPolicy;

/// World size preset
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum WorldPreset {
    /// Quick test map
    Small,
    /// Balanced map for normal play
    #[default]
    Standard,
    /// Large map with many plates
    Large,
}

impl WorldPreset {
    pub fn all() -> &'static [Self] {
        &[Self::Small, Self::Standard, Self::Large]
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Small => "32x20 hexes, 6 plates",
            Self::Standard => "80x50 hexes, 12 plates",
            Self::Large => "160x100 hexes, 24 plates",
        }
    }

    pub fn params(&self) -> WorldParams {
        WorldParams::from_preset(*self)
    }
}

impl std::fmt::Display for WorldPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Small => write!(f, "small"),
            Self::Standard => write!(f, "standard"),
            Self::Large => write!(f, "large"),
        }
    }
}

/// Everything needed to build and evolve a world
#[derive(Clone, Debug)]
pub struct WorldParams {
    /// Hexes per row (at least 3)
    pub width: usize,
    /// Rows (at least 1)
    pub height: usize,

    /// Plates grown at genesis, capped at 24
    pub plate_count: usize,
    /// Tries per plate to find an unclaimed seed hex before giving up
    pub max_seed_attempts: usize,

    /// Initial altitude is uniform in this range
    pub min_initial_altitude: f32,
    pub max_initial_altitude: f32,

    // Policies fixed for the life of the world
    pub sea_level: SeaLevelPolicy,
    pub climate_mode: ClimateMode,
    pub temperature_model: TemperatureModel,
    pub fertility_policy: FertilityPolicy,

    pub rivers: RiverFlowParams,
    pub wind: WindParams,
}

impl Default for WorldParams {
    fn default() -> Self {
        Self {
            width: 80,
            height: 50,
            plate_count: 12,
            max_seed_attempts: 10_000,
            min_initial_altitude: 9500.0,
            max_initial_altitude: 10500.0,
            sea_level: SeaLevelPolicy::default(),
            climate_mode: ClimateMode::default(),
            temperature_model: TemperatureModel::default(),
            fertility_policy: FertilityPolicy::default(),
            rivers: RiverFlowParams::default(),
            wind: WindParams::default(),
        }
    }
}

impl WorldParams {
    pub fn from_preset(preset: WorldPreset) -> Self {
        match preset {
            WorldPreset::Small => Self {
                width: 32,
                height: 20,
                plate_count: 6,
                ..Default::default()
            },
            WorldPreset::Standard => Self::default(),
            WorldPreset::Large => Self {
                width: 160,
                height: 100,
                plate_count: 24,
                ..Default::default()
            },
        }
    }

    /// Same parameters at a different size.
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Minimum plate size so that the plates together roughly cover the map.
    pub fn min_plate_size(&self) -> usize {
        (self.width * self.height) / self.plate_count.max(1)
    }
}
