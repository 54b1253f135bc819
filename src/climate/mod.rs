//! Climate: baseline temperature and prevailing wind.
//!
//! Temperature is assigned first from latitude (or a linear arctic-to-desert
//! gradient); the wind stage then cools it with altitude and carries moisture
//! across the map.

pub mod temperature;
pub mod wind;

pub use temperature::apply_climate_temperature;
pub use wind::{wind_effect, WindParams, WindStats};

// =============================================================================
// CLIMATE CONFIGURATION
// =============================================================================

/// Global climate trend, applied to the equator's solar intensity every era
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ClimateMode {
    /// Equator loses 0.5 intensity per era
    Cooling,
    /// No drift
    #[default]
    Stable,
    /// Equator gains 0.5 intensity per era
    Warming,
}

impl ClimateMode {
    pub fn all() -> &'static [Self] {
        &[Self::Cooling, Self::Stable, Self::Warming]
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Cooling => "Ice age (equator cools each era)",
            Self::Stable => "Constant solar input",
            Self::Warming => "Hothouse (equator warms each era)",
        }
    }

    /// Per-era shift applied to the equator's solar intensity.
    pub fn solar_shift(&self) -> f32 {
        match self {
            Self::Cooling => -0.5,
            Self::Stable => 0.0,
            Self::Warming => 0.5,
        }
    }
}

impl std::fmt::Display for ClimateMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cooling => write!(f, "cooling"),
            Self::Stable => write!(f, "stable"),
            Self::Warming => write!(f, "warming"),
        }
    }
}

/// How the pre-wind temperature baseline is laid out
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TemperatureModel {
    /// Linear gradient from the arctic row (-5) to the opposite row (40)
    #[default]
    LinearGradient,
    /// Symmetric sin-power falloff from the equator to both poles
    SolarCurve,
}

impl TemperatureModel {
    pub fn all() -> &'static [Self] {
        &[Self::LinearGradient, Self::SolarCurve]
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::LinearGradient => "Continental gradient (arctic to desert)",
            Self::SolarCurve => "Planetary latitude curve",
        }
    }
}

impl std::fmt::Display for TemperatureModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LinearGradient => write!(f, "gradient"),
            Self::SolarCurve => write!(f, "solar"),
        }
    }
}

/// Which edge row is the arctic one in the linear gradient model
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Pole {
    /// Row 0
    #[default]
    North,
    /// Last row
    South,
}

impl Pole {
    /// Rows between `y` and the arctic row.
    pub fn distance(&self, y: usize, height: usize) -> usize {
        match self {
            Self::North => y,
            Self::South => height.saturating_sub(1).saturating_sub(y),
        }
    }
}

/// Climate scalars that persist across eras
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClimateState {
    /// Solar intensity at the equator; drifts with the climate mode
    pub equator_solar_intensity: f32,
    /// Intensity lost between equator and pole
    pub equator_to_pole_difference: f32,
    /// Fixed at genesis for the life of the world
    pub arctic_pole: Pole,
}

impl Default for ClimateState {
    fn default() -> Self {
        Self {
            equator_solar_intensity: 30.0,
            equator_to_pole_difference: 40.0,
            arctic_pole: Pole::North,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pole_distance() {
        assert_eq!(Pole::North.distance(0, 10), 0);
        assert_eq!(Pole::North.distance(9, 10), 9);
        assert_eq!(Pole::South.distance(9, 10), 0);
        assert_eq!(Pole::South.distance(0, 10), 9);
    }

    #[test]
    fn test_mode_shift() {
        assert_eq!(ClimateMode::Cooling.solar_shift(), -0.5);
        assert_eq!(ClimateMode::Warming.solar_shift(), 0.5);
        assert_eq!(ClimateMode::default(), ClimateMode::Stable);
        assert_eq!(ClimateMode::all().len(), 3);
    }
}
