//! Global sea level.
//!
//! The policy is chosen once per world and held for the whole run; the
//! coastline caps assume a fixed 10000 baseline, so the variable policy is
//! offered for experimentation only.

use crate::hexgrid::HexGrid;

/// Baseline altitude that separates land from sea in the fixed policy.
pub const BASELINE_SEA_LEVEL: f32 = 10000.0;

/// How sea level is derived each era
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SeaLevelPolicy {
    /// Constant level (continental model)
    Fixed(f32),
    /// `mean(altitude) + sea_per_hex + average_temperature * 10`
    Variable { sea_per_hex: f32 },
}

impl Default for SeaLevelPolicy {
    fn default() -> Self {
        Self::Fixed(BASELINE_SEA_LEVEL)
    }
}

impl std::fmt::Display for SeaLevelPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed(level) => write!(f, "fixed ({:.0})", level),
            Self::Variable { sea_per_hex } => write!(f, "variable (+{:.0})", sea_per_hex),
        }
    }
}

/// Compute the sea level for the current grid under `policy`.
pub fn update_sea_level(grid: &HexGrid, policy: SeaLevelPolicy, average_temperature: f32) -> f32 {
    let level = match policy {
        SeaLevelPolicy::Fixed(level) => level,
        SeaLevelPolicy::Variable { sea_per_hex } => {
            grid.mean_altitude() + sea_per_hex + average_temperature * 10.0
        }
    };

    log::debug!(
        "SeaLevel: {:.1} ({}), land {:.1}%",
        level,
        policy,
        grid.land_fraction(level) * 100.0
    );

    level
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_policy_ignores_terrain() {
        let grid = HexGrid::from_fn(4, 4, |x, _| 9000.0 + x as f32 * 1000.0).unwrap();
        assert_eq!(update_sea_level(&grid, SeaLevelPolicy::default(), 35.0), 10000.0);
        assert_eq!(update_sea_level(&grid, SeaLevelPolicy::Fixed(9500.0), 0.0), 9500.0);
    }

    #[test]
    fn test_variable_policy_tracks_mean_and_temperature() {
        // Mean altitude is 10500
        let grid = HexGrid::from_fn(4, 4, |x, _| 9000.0 + x as f32 * 1000.0).unwrap();
        let policy = SeaLevelPolicy::Variable { sea_per_hex: -200.0 };

        assert!((update_sea_level(&grid, policy, 0.0) - 10300.0).abs() < 1e-3);
        assert!((update_sea_level(&grid, policy, 12.5) - 10425.0).abs() < 1e-3);
    }
}
