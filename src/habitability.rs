//! Fertility and human comfort scoring.
//!
//! Both scores are built from sweet-spot factors: a value inside its ideal
//! range scores 10, and outside it the score falls off with the logarithm of
//! the distance to the nearest bound.

use crate::hexgrid::HexGrid;

/// Ideal range for one factor and the log base of its falloff
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweetSpot {
    pub min: f32,
    pub max: f32,
    pub log_base: f32,
}

impl SweetSpot {
    pub const fn new(min: f32, max: f32, log_base: f32) -> Self {
        Self { min, max, log_base }
    }

    pub fn score(&self, value: f32) -> f32 {
        sweet_spot_score(value, self.min, self.max, self.log_base)
    }
}

/// 10 inside `[min, max]`, otherwise `min(10, 10 / log_base(distance + 1))`.
///
/// Always positive; saturates at 10 just outside the range.
pub fn sweet_spot_score(value: f32, min: f32, max: f32, log_base: f32) -> f32 {
    if value >= min && value <= max {
        return 10.0;
    }
    let distance = (value - min).abs().min((value - max).abs());
    (10.0 / (distance + 1.0).log(log_base)).min(10.0)
}

// Fertility sweet spots
const FERTILE_TEMPERATURE: SweetSpot = SweetSpot::new(10.0, 30.0, 10.0);
const FERTILE_ALTITUDE: SweetSpot = SweetSpot::new(0.0, 2000.0, 10.0);
const FERTILE_RAINFALL: SweetSpot = SweetSpot::new(20.0, 40.0, 2.0);
const FERTILE_RIVER: SweetSpot = SweetSpot::new(50.0, 300.0, 2.0);

// Human comfort sweet spots
const COMFORT_TEMPERATURE: SweetSpot = SweetSpot::new(15.0, 25.0, 10.0);
const COMFORT_ALTITUDE: SweetSpot = SweetSpot::new(5.0, 1000.0, 10.0);
const COMFORT_RAINFALL: SweetSpot = SweetSpot::new(15.0, 30.0, 2.0);
const COMFORT_RIVER: SweetSpot = SweetSpot::new(100.0, 250.0, 2.0);
const COMFORT_WIND: SweetSpot = SweetSpot::new(0.0, 50.0, 2.0);

/// How the fertility factors are combined
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FertilityPolicy {
    /// `(rain*4 + temperature*3 + river*2 + altitude*1) / 100 * 10`
    Additive,
    /// `10 * t/10 * a/10 * max(rain, river)/10`; any bad factor sinks the score
    #[default]
    Multiplicative,
}

impl FertilityPolicy {
    pub fn all() -> &'static [Self] {
        &[Self::Additive, Self::Multiplicative]
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Additive => "Weighted sum (lenient)",
            Self::Multiplicative => "Product of factors (strict)",
        }
    }
}

impl std::fmt::Display for FertilityPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Additive => write!(f, "additive"),
            Self::Multiplicative => write!(f, "multiplicative"),
        }
    }
}

/// Min/max/mean/median of one attribute across the grid
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttributeStats {
    pub min: f32,
    pub max: f32,
    pub mean: f32,
    pub median: f32,
}

impl AttributeStats {
    /// `None` for an empty input. The median is the lower middle value.
    pub fn from_values(values: impl IntoIterator<Item = f32>) -> Option<Self> {
        let mut values: Vec<f32> = values.into_iter().collect();
        if values.is_empty() {
            return None;
        }
        values.sort_by(|a, b| a.total_cmp(b));
        let n = values.len();
        Some(Self {
            min: values[0],
            max: values[n - 1],
            mean: values.iter().sum::<f32>() / n as f32,
            median: values[(n - 1) / 2],
        })
    }
}

impl std::fmt::Display for AttributeStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "min {:.1}, max {:.1}, mean {:.1}, median {:.1}",
            self.min, self.max, self.mean, self.median
        )
    }
}

/// Fertility for one set of factor inputs (land only).
pub fn fertility_score(
    temperature: f32,
    height_above_sea: f32,
    rainfall: f32,
    river_width: f32,
    policy: FertilityPolicy,
) -> f32 {
    let t = FERTILE_TEMPERATURE.score(temperature);
    let a = FERTILE_ALTITUDE.score(height_above_sea);
    let rain = FERTILE_RAINFALL.score(rainfall);
    let river = FERTILE_RIVER.score(river_width);

    let score = match policy {
        FertilityPolicy::Additive => {
            (rain * 4.0 + t * 3.0 + river * 2.0 + a * 1.0) / 100.0 * 10.0
        }
        FertilityPolicy::Multiplicative => 10.0 * (t / 10.0) * (a / 10.0) * (rain.max(river) / 10.0),
    };
    score.clamp(0.0, 10.0)
}

/// Assign fertility to every hex. Underwater hexes always score 0.
pub fn assess_fertility(grid: &mut HexGrid, sea_level: f32, policy: FertilityPolicy) -> f32 {
    for cell in grid.cells_mut() {
        cell.fertility = if cell.altitude_vs_sea_level(sea_level) < 0.0 {
            0.0
        } else {
            fertility_score(
                cell.temperature,
                cell.height_above_sea_level(sea_level),
                cell.rainfall,
                cell.river_width,
                policy,
            )
        };
    }

    let mean = grid.cells().iter().map(|c| c.fertility).sum::<f32>() / grid.len() as f32;
    log::debug!("Fertility ({}): mean {:.2}", policy, mean);
    mean
}

/// Inputs to the comfort index for one hex
#[derive(Clone, Copy, Debug, Default)]
pub struct ComfortInputs {
    pub temperature: f32,
    pub height_above_sea: f32,
    pub rainfall: f32,
    pub river_width: f32,
    pub wind_intensity: f32,
    pub surface_water: f32,
    pub volcanic_activity: f32,
}

/// Human comfort index in [0, 100].
///
/// Hexes outside the habitable envelope (underwater or above 4000, flooded,
/// volcanic, or outside -15..35 degrees) score 0.
pub fn comfort_index(inputs: &ComfortInputs) -> f32 {
    let habitable = inputs.height_above_sea > 0.0
        && inputs.height_above_sea < 4000.0
        && inputs.surface_water < 100.0
        && inputs.volcanic_activity == 0.0
        && inputs.temperature > -15.0
        && inputs.temperature < 35.0;
    if !habitable {
        return 0.0;
    }

    let t = COMFORT_TEMPERATURE.score(inputs.temperature);
    let a = COMFORT_ALTITUDE.score(inputs.height_above_sea);
    let water = if inputs.temperature < -5.0 {
        0.0
    } else {
        COMFORT_RAINFALL
            .score(inputs.rainfall)
            .max(COMFORT_RIVER.score(inputs.river_width))
    };
    let wind = COMFORT_WIND.score(inputs.wind_intensity);

    let raw = (t * 5.0 + a * 3.0 + water * 3.0 + wind).clamp(0.0, 120.0);
    (raw.round() - 20.0).max(0.0)
}

/// Assign the human comfort index to every hex and log the input ranges.
pub fn assess_human_comfort(grid: &mut HexGrid, sea_level: f32) -> f32 {
    log_attribute("Temperature", grid.cells().iter().map(|c| c.temperature));
    log_attribute(
        "HeightAboveSeaLevel",
        grid.cells()
            .iter()
            .map(|c| c.height_above_sea_level(sea_level))
            .filter(|h| *h != 0.0),
    );
    log_attribute("Rainfall", grid.cells().iter().map(|c| c.rainfall));
    log_attribute("RiverWidth", grid.cells().iter().map(|c| c.river_width));
    log_attribute("WindIntensity", grid.cells().iter().map(|c| c.wind_intensity));

    for cell in grid.cells_mut() {
        let inputs = ComfortInputs {
            temperature: cell.temperature,
            height_above_sea: cell.height_above_sea_level(sea_level),
            rainfall: cell.rainfall,
            river_width: cell.river_width,
            wind_intensity: cell.wind_intensity,
            surface_water: cell.surface_water,
            volcanic_activity: cell.volcanic_activity,
        };
        cell.human_comfort = comfort_index(&inputs);
    }

    let habitable = grid.cells().iter().filter(|c| c.human_comfort > 0.0).count();
    let mean = grid.cells().iter().map(|c| c.human_comfort).sum::<f32>() / grid.len() as f32;
    log::debug!("HumanComfort: mean {:.1}, {} habitable hexes", mean, habitable);
    mean
}

fn log_attribute(name: &str, values: impl Iterator<Item = f32>) {
    match AttributeStats::from_values(values) {
        Some(stats) => log::debug!("{}: {}", name, stats),
        None => log::debug!("{}: no values", name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweet_spot_bounds_and_symmetry() {
        assert_eq!(sweet_spot_score(10.0, 10.0, 30.0, 10.0), 10.0);
        assert_eq!(sweet_spot_score(30.0, 10.0, 30.0, 10.0), 10.0);
        for eps in [0.5, 3.0, 25.0, 400.0] {
            let below = sweet_spot_score(10.0 - eps, 10.0, 30.0, 2.0);
            let above = sweet_spot_score(30.0 + eps, 10.0, 30.0, 2.0);
            assert!((below - above).abs() < 1e-5);
            assert!(below > 0.0 && below <= 10.0);
        }
        // Distance 9 with base 10 gives 10 / log10(10) = 10
        assert!((sweet_spot_score(1.0, 10.0, 30.0, 10.0) - 10.0).abs() < 1e-4);
        // Distance 99 gives 10 / 2
        assert!((sweet_spot_score(129.0, 10.0, 30.0, 10.0) - 5.0).abs() < 1e-3);
        // Base 2, distance 3 gives 10 / 2
        assert!((sweet_spot_score(17.0, 20.0, 40.0, 2.0) - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_fertility_policies() {
        // Everything ideal
        let ideal = fertility_score(20.0, 500.0, 30.0, 100.0, FertilityPolicy::Multiplicative);
        assert!((ideal - 10.0).abs() < 1e-4);
        let additive = fertility_score(20.0, 500.0, 30.0, 100.0, FertilityPolicy::Additive);
        assert!((additive - 10.0).abs() < 1e-4);

        // Dry hex: rainfall 17 (score 5), no river (score 10 / log2(51))
        let river = 10.0 / 51f32.log2();
        let strict = fertility_score(20.0, 500.0, 17.0, 0.0, FertilityPolicy::Multiplicative);
        assert!((strict - 5.0).abs() < 1e-3);
        let lenient = fertility_score(20.0, 500.0, 17.0, 0.0, FertilityPolicy::Additive);
        let expected = (5.0 * 4.0 + 30.0 + river * 2.0 + 10.0) / 10.0;
        assert!((lenient - expected).abs() < 1e-3);
    }

    #[test]
    fn test_underwater_hexes_are_barren() {
        let mut grid = HexGrid::from_fn(6, 3, |x, _| if x < 3 { 9900.0 } else { 10300.0 }).unwrap();
        for cell in grid.cells_mut() {
            cell.temperature = 20.0;
            cell.rainfall = 30.0;
        }
        assess_fertility(&mut grid, 10000.0, FertilityPolicy::default());
        for cell in grid.cells() {
            if cell.x < 3 {
                assert_eq!(cell.fertility, 0.0);
            } else {
                assert!((cell.fertility - 10.0).abs() < 1e-4);
            }
            assert!((0.0..=10.0).contains(&cell.fertility));
        }
    }

    #[test]
    fn test_comfort_gate() {
        let pleasant = ComfortInputs {
            temperature: 20.0,
            height_above_sea: 300.0,
            rainfall: 20.0,
            river_width: 0.0,
            wind_intensity: 10.0,
            surface_water: 5.0,
            volcanic_activity: 0.0,
        };
        // 10*5 + 10*3 + 10*3 + 10 - 20
        assert_eq!(comfort_index(&pleasant), 100.0);

        let volcanic = ComfortInputs { volcanic_activity: 10.0, ..pleasant };
        assert_eq!(comfort_index(&volcanic), 0.0);
        let flooded = ComfortInputs { surface_water: 150.0, ..pleasant };
        assert_eq!(comfort_index(&flooded), 0.0);
        let sea = ComfortInputs { height_above_sea: 0.0, ..pleasant };
        assert_eq!(comfort_index(&sea), 0.0);
        let scorching = ComfortInputs { temperature: 36.0, ..pleasant };
        assert_eq!(comfort_index(&scorching), 0.0);
    }

    #[test]
    fn test_frozen_hexes_get_no_water_credit() {
        let cold = ComfortInputs {
            temperature: -10.0,
            height_above_sea: 300.0,
            rainfall: 20.0,
            river_width: 150.0,
            wind_intensity: 10.0,
            surface_water: 0.0,
            volcanic_activity: 0.0,
        };
        let t = sweet_spot_score(-10.0, 15.0, 25.0, 10.0);
        let expected = ((t * 5.0 + 30.0 + 10.0).round() - 20.0).max(0.0);
        assert_eq!(comfort_index(&cold), expected);
    }

    #[test]
    fn test_attribute_stats() {
        let stats = AttributeStats::from_values([4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 4.0);
        assert_eq!(stats.mean, 2.5);
        assert_eq!(stats.median, 2.0);
        assert!(AttributeStats::from_values(std::iter::empty()).is_none());
    }
}
