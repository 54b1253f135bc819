//! Biome classification
//!
//! Biomes come from a read-only [`BiomeCatalog`] and declare acceptance
//! ranges per attribute. Every hex is classified by an ordered rule table
//! (ocean, ice, volcanic, swamp, mountain, desert, coast) whose named
//! candidates must still pass their full range check, with a scored
//! nearest-match fallback for everything else.

pub mod catalog;
pub mod rules;

pub use catalog::BiomeCatalog;
pub use rules::{classify, BiomeRule, LAND_RULES, MARINE_RULES};

use serde::{Deserialize, Serialize};

use crate::error::{Result, WorldError};
use crate::hexgrid::HexGrid;

/// Index of a biome inside its catalog
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BiomeId(pub u16);

impl BiomeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Inclusive acceptance range for one attribute
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AttributeRange {
    pub min: f32,
    pub max: f32,
}

impl AttributeRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// 1 inside the range, decaying linearly with distance relative to the
    /// range width outside it. A zero-width range scores 1 only on its point.
    pub fn fit(&self, value: f32) -> f32 {
        if self.contains(value) {
            return 1.0;
        }
        let distance = if value < self.min {
            self.min - value
        } else {
            value - self.max
        };
        let width = self.max - self.min;
        if width <= 0.0 {
            return if value == self.min { 1.0 } else { 0.0 };
        }
        (1.0 - distance / width).max(0.0)
    }
}

/// Missing ranges accept everything.
fn in_range(range: &Option<AttributeRange>, value: f32) -> bool {
    range.map_or(true, |r| r.contains(value))
}

fn range_fit(range: &Option<AttributeRange>, value: f32) -> f32 {
    range.map_or(1.0, |r| r.fit(value))
}

/// A catalog entry. Display metadata is carried but unused by the core.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Biome {
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub colour: String,
    #[serde(default)]
    pub height_above_sea_level: Option<AttributeRange>,
    #[serde(default)]
    pub temperature: Option<AttributeRange>,
    #[serde(default)]
    pub rainfall: Option<AttributeRange>,
    #[serde(default)]
    pub surface_water: Option<AttributeRange>,
    /// Terrain quartile 1 to 4
    #[serde(default)]
    pub terrain: Option<AttributeRange>,
    #[serde(default)]
    pub volcanic_activity: Option<AttributeRange>,
    #[serde(default)]
    pub wind_intensity: Option<AttributeRange>,
    #[serde(default)]
    pub near_ocean: bool,
}

impl Biome {
    /// True when the biome only accepts hexes at or below sea level.
    pub fn is_marine(&self) -> bool {
        self.height_above_sea_level.map_or(false, |r| r.max <= 0.0)
    }

    /// Full range check over every attribute the biome declares.
    pub fn matches(&self, ctx: &BiomeContext) -> bool {
        in_range(&self.height_above_sea_level, ctx.height)
            && in_range(&self.temperature, ctx.temperature)
            && in_range(&self.rainfall, ctx.rainfall)
            && in_range(&self.surface_water, ctx.surface_water)
            && in_range(&self.terrain, ctx.terrain_quartile as f32)
            && in_range(&self.volcanic_activity, ctx.volcanic_activity)
            && in_range(&self.wind_intensity, ctx.wind_intensity)
            && (!self.near_ocean || ctx.near_ocean)
    }

    /// Rules out land biomes at sea and marine biomes on land.
    pub fn is_compatible(&self, ctx: &BiomeContext) -> bool {
        match self.height_above_sea_level {
            Some(r) if ctx.height <= 0.0 && r.min > 0.0 => false,
            Some(r) if ctx.height > 0.0 && r.max <= 0.0 => false,
            _ => true,
        }
    }

    /// Mean range fit over the four core attributes plus every optional
    /// attribute the biome declares, in [0, 1].
    pub fn score(&self, ctx: &BiomeContext) -> f32 {
        let mut total = range_fit(&self.height_above_sea_level, ctx.height)
            + range_fit(&self.temperature, ctx.temperature)
            + range_fit(&self.rainfall, ctx.rainfall)
            + range_fit(&self.surface_water, ctx.surface_water);
        let mut count = 4;

        let optional = [
            (self.terrain, ctx.terrain_quartile as f32),
            (self.volcanic_activity, ctx.volcanic_activity),
            (self.wind_intensity, ctx.wind_intensity),
        ];
        for (range, value) in optional {
            if let Some(r) = range {
                total += r.fit(value);
                count += 1;
            }
        }
        if self.near_ocean {
            total += if ctx.near_ocean { 1.0 } else { 0.0 };
            count += 1;
        }

        total / count as f32
    }
}

/// Snapshot of the attributes the classifier looks at for one hex
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BiomeContext {
    /// Signed altitude relative to sea level
    pub height: f32,
    pub temperature: f32,
    pub rainfall: f32,
    pub surface_water: f32,
    pub terrain_quartile: u8,
    pub volcanic_activity: f32,
    pub wind_intensity: f32,
    /// Any neighbour strictly below sea level
    pub near_ocean: bool,
}

impl BiomeContext {
    pub fn from_grid(grid: &HexGrid, idx: usize, sea_level: f32) -> Self {
        let cell = grid.cell(idx);
        Self {
            height: cell.altitude_vs_sea_level(sea_level),
            temperature: cell.temperature,
            rainfall: cell.rainfall,
            surface_water: cell.surface_water,
            terrain_quartile: cell.terrain_quartile,
            volcanic_activity: cell.volcanic_activity,
            wind_intensity: cell.wind_intensity,
            near_ocean: grid
                .neighbours(idx)
                .any(|(_, n)| grid.cell(n).altitude_vs_sea_level(sea_level) < 0.0),
        }
    }

    /// Land hex holding enough standing water to count as a lake.
    pub fn is_lake(&self) -> bool {
        self.height > 0.0 && self.surface_water >= 100.0
    }
}

/// Biome counts after a classification pass, most common first
#[derive(Clone, Debug, Default)]
pub struct BiomeDistribution {
    pub total: usize,
    pub lakes: usize,
    /// (name, count), sorted by count descending then name
    pub counts: Vec<(String, usize)>,
}

impl BiomeDistribution {
    pub fn top(&self, n: usize) -> &[(String, usize)] {
        &self.counts[..n.min(self.counts.len())]
    }

    pub fn count(&self, name: &str) -> usize {
        self.counts
            .iter()
            .find(|(n, _)| n == name)
            .map_or(0, |(_, c)| *c)
    }

    pub fn print_summary(&self) {
        println!("Top biomes ({} hexes, {} lakes):", self.total, self.lakes);
        for (name, count) in self.top(10) {
            println!(
                "  {}: {} hexes ({:.1}%)",
                name,
                count,
                *count as f32 / self.total.max(1) as f32 * 100.0
            );
        }
    }
}

/// Classify every hex.
///
/// Lakes get `None`; every other hex gets a biome. Fails without touching the
/// grid when the catalog is empty.
pub fn set_biomes(grid: &mut HexGrid, catalog: &BiomeCatalog, sea_level: f32) -> Result<BiomeDistribution> {
    if catalog.is_empty() {
        return Err(WorldError::InvalidBiomeCatalog("catalog has no biomes".to_string()));
    }
    if let Err(e) = catalog.validate() {
        log::warn!("SetBiomes: {}; using fallback classification", e);
    }

    let assignments: Vec<Option<BiomeId>> = (0..grid.len())
        .map(|idx| {
            let ctx = BiomeContext::from_grid(grid, idx, sea_level);
            if ctx.is_lake() {
                None
            } else {
                classify(catalog, &ctx)
            }
        })
        .collect();

    let mut tally = vec![0usize; catalog.len()];
    let mut lakes = 0;
    for (cell, biome) in grid.cells_mut().iter_mut().zip(&assignments) {
        cell.biome = *biome;
        match biome {
            Some(id) => tally[id.index()] += 1,
            None => lakes += 1,
        }
    }

    let mut counts: Vec<(String, usize)> = catalog
        .iter()
        .zip(&tally)
        .filter(|(_, &count)| count > 0)
        .map(|((_, biome), &count)| (biome.name.clone(), count))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let distribution = BiomeDistribution {
        total: grid.len(),
        lakes,
        counts,
    };

    log::debug!("SetBiomes: top biomes across {} hexes ({} lakes)", distribution.total, lakes);
    for (name, count) in distribution.top(10) {
        log::debug!(
            "  {}: {} hexes ({:.1}%)",
            name,
            count,
            *count as f32 / distribution.total as f32 * 100.0
        );
    }

    Ok(distribution)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_fit() {
        let r = AttributeRange::new(10.0, 20.0);
        assert_eq!(r.fit(15.0), 1.0);
        assert_eq!(r.fit(10.0), 1.0);
        assert!((r.fit(5.0) - 0.5).abs() < 1e-6);
        assert!((r.fit(22.0) - 0.8).abs() < 1e-6);
        assert_eq!(r.fit(40.0), 0.0);

        let point = AttributeRange::new(4.0, 4.0);
        assert_eq!(point.fit(4.0), 1.0);
        assert_eq!(point.fit(3.0), 0.0);
    }

    #[test]
    fn test_optional_ranges_accept_everything() {
        let biome = Biome {
            name: "Anything".to_string(),
            image: String::new(),
            colour: String::new(),
            height_above_sea_level: None,
            temperature: None,
            rainfall: None,
            surface_water: None,
            terrain: None,
            volcanic_activity: None,
            wind_intensity: None,
            near_ocean: false,
        };
        let ctx = BiomeContext {
            height: 123.0,
            temperature: -40.0,
            ..Default::default()
        };
        assert!(biome.matches(&ctx));
        assert_eq!(biome.score(&ctx), 1.0);
    }

    #[test]
    fn test_near_ocean_requirement() {
        let catalog = BiomeCatalog::builtin().unwrap();
        let shore = catalog.get(catalog.find("Rocky Shore").unwrap()).unwrap();
        let mut ctx = BiomeContext {
            height: 20.0,
            temperature: 12.0,
            rainfall: 30.0,
            surface_water: 10.0,
            terrain_quartile: 2,
            ..Default::default()
        };
        assert!(!shore.matches(&ctx));
        ctx.near_ocean = true;
        assert!(shore.matches(&ctx));
    }

    #[test]
    fn test_lakes_have_no_biome_and_ocean_is_marine() {
        let catalog = BiomeCatalog::builtin().unwrap();
        let mut grid = HexGrid::from_fn(6, 4, |x, _| if x < 2 { 9000.0 } else { 10400.0 }).unwrap();
        for cell in grid.cells_mut() {
            cell.temperature = 15.0;
            cell.rainfall = 30.0;
        }
        let lake = grid.index(4, 2);
        grid.cell_mut(lake).surface_water = 120.0;

        let distribution = set_biomes(&mut grid, &catalog, 10000.0).unwrap();

        assert_eq!(grid.cell(lake).biome, None);
        assert_eq!(distribution.lakes, 1);
        for cell in grid.cells() {
            if cell.x < 2 {
                let biome = catalog.get(cell.biome.unwrap()).unwrap();
                assert!(biome.is_marine());
            } else if cell.surface_water < 100.0 {
                assert!(cell.biome.is_some());
            }
        }
        let classified: usize = distribution.counts.iter().map(|(_, c)| c).sum();
        assert_eq!(classified + distribution.lakes, grid.len());
    }

    #[test]
    fn test_empty_catalog_is_rejected_without_mutation() {
        let catalog = BiomeCatalog::from_json_str(r#"{"biomes": []}"#).unwrap();
        let mut grid = HexGrid::new(4, 4, 10500.0).unwrap();
        let result = set_biomes(&mut grid, &catalog, 10000.0);
        assert!(matches!(result, Err(WorldError::InvalidBiomeCatalog(_))));
        assert!(grid.cells().iter().all(|c| c.biome.is_none()));
    }
}
