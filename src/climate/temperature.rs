//! Pre-wind temperature baseline.

use std::f32::consts::PI;

use crate::hexgrid::HexGrid;

use super::{ClimateMode, ClimateState, TemperatureModel};

/// Temperature on the arctic row in the linear model.
pub const ARCTIC_TEMPERATURE: f32 = -5.0;
/// Temperature on the row opposite the arctic one.
pub const DESERT_TEMPERATURE: f32 = 40.0;
/// Exponent of the sin falloff in the solar curve.
const SOLAR_POWER: f32 = 0.6;

/// Latitude in [-1, 1] for row `y` (0 on the equator row).
pub fn latitude(y: usize, height: usize) -> f32 {
    if height <= 1 {
        return 0.0;
    }
    (2.0 * y as f32 / (height - 1) as f32 - 1.0).clamp(-1.0, 1.0)
}

/// Solar intensity at `latitude` for the given equator intensity.
pub fn solar_intensity(latitude: f32, equator: f32, difference: f32) -> f32 {
    let sin = ((latitude + 1.0) * PI / 2.0).sin();
    (equator - difference) + difference * sin.abs().powf(SOLAR_POWER)
}

/// Linear arctic-to-desert temperature for a cell `distance` rows from the arctic row.
pub fn gradient_temperature(distance: usize, height: usize) -> f32 {
    if height <= 1 {
        return ARCTIC_TEMPERATURE;
    }
    let t = distance as f32 / (height - 1) as f32;
    ARCTIC_TEMPERATURE + (DESERT_TEMPERATURE - ARCTIC_TEMPERATURE) * t
}

/// Write `solar_intensity` and `temperature_no_wind` for every cell.
///
/// Under the solar curve the equator intensity first drifts by the climate
/// mode's shift; the drift accumulates in `climate` across eras. The linear
/// model is anchored to the arctic pole picked at genesis.
pub fn apply_climate_temperature(
    grid: &mut HexGrid,
    model: TemperatureModel,
    mode: ClimateMode,
    climate: &mut ClimateState,
) {
    let height = grid.height;

    match model {
        TemperatureModel::SolarCurve => {
            climate.equator_solar_intensity += mode.solar_shift();
            let equator = climate.equator_solar_intensity;
            let difference = climate.equator_to_pole_difference;
            for cell in grid.cells_mut() {
                let intensity = solar_intensity(latitude(cell.y, height), equator, difference);
                cell.solar_intensity = intensity;
                cell.temperature_no_wind = intensity;
            }
        }
        TemperatureModel::LinearGradient => {
            let pole = climate.arctic_pole;
            for cell in grid.cells_mut() {
                let temperature = gradient_temperature(pole.distance(cell.y, height), height);
                cell.solar_intensity = temperature;
                cell.temperature_no_wind = temperature;
            }
        }
    }

    let mean = grid.cells().iter().map(|c| c.temperature_no_wind).sum::<f32>() / grid.len() as f32;
    log::debug!(
        "ClimateTemperature: {} model, {} mode, mean baseline {:.1}",
        model,
        mode,
        mean
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::climate::Pole;

    #[test]
    fn test_solar_curve_peaks_at_equator() {
        let difference = 40.0;
        let equator = solar_intensity(0.0, 30.0, difference);
        let pole = solar_intensity(1.0, 30.0, difference);
        assert!((equator - 30.0).abs() < 1e-4);
        assert!((pole - (-10.0)).abs() < 1e-2);
        // Symmetric about the equator
        assert!((solar_intensity(0.5, 30.0, difference) - solar_intensity(-0.5, 30.0, difference)).abs() < 1e-4);
    }

    #[test]
    fn test_latitude_spans_grid() {
        assert_eq!(latitude(0, 11), -1.0);
        assert_eq!(latitude(5, 11), 0.0);
        assert_eq!(latitude(10, 11), 1.0);
        assert_eq!(latitude(0, 1), 0.0);
    }

    #[test]
    fn test_linear_gradient_from_arctic_pole() {
        let mut grid = HexGrid::new(4, 10, 10000.0).unwrap();
        let mut climate = ClimateState {
            arctic_pole: Pole::South,
            ..Default::default()
        };

        apply_climate_temperature(&mut grid, TemperatureModel::LinearGradient, ClimateMode::Warming, &mut climate);

        assert!((grid.get(0, 9).temperature_no_wind - ARCTIC_TEMPERATURE).abs() < 1e-4);
        assert!((grid.get(0, 0).temperature_no_wind - DESERT_TEMPERATURE).abs() < 1e-4);
        assert!((grid.get(2, 3).temperature_no_wind - 25.0).abs() < 1e-3);
        // The gradient model does not drift with the climate mode
        assert_eq!(climate.equator_solar_intensity, 30.0);
    }

    #[test]
    fn test_climate_mode_accumulates() {
        let mut grid = HexGrid::new(4, 5, 10000.0).unwrap();
        let mut climate = ClimateState::default();

        for _ in 0..4 {
            apply_climate_temperature(&mut grid, TemperatureModel::SolarCurve, ClimateMode::Cooling, &mut climate);
        }

        assert!((climate.equator_solar_intensity - 28.0).abs() < 1e-4);
        assert!((grid.get(1, 2).solar_intensity - 28.0).abs() < 1e-3);
        assert_eq!(grid.get(1, 2).temperature_no_wind, grid.get(1, 2).solar_intensity);
    }
}
