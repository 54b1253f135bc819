//! Biome catalog loading.
//!
//! The JSON layout is `{"biomes": [{"Name": ..., "HeightAboveSeaLevel": {"Min": .., "Max": ..}, ...}]}`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Biome, BiomeId};
use crate::error::{Result, WorldError};

/// Name of the biome every hex at or below sea level falls back to.
pub const OCEAN: &str = "Ocean";
/// Name of the land biome used when nothing else scores.
pub const SHRUBLAND: &str = "Shrubland";

const BUILTIN_JSON: &str = include_str!("../../assets/biomes.json");

/// Read-only list of biomes, indexed by [`BiomeId`]
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BiomeCatalog {
    biomes: Vec<Biome>,
}

impl BiomeCatalog {
    pub fn new(biomes: Vec<Biome>) -> Self {
        Self { biomes }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let catalog: BiomeCatalog = serde_json::from_str(json)?;
        if catalog.biomes.len() > u16::MAX as usize {
            return Err(WorldError::InvalidBiomeCatalog(format!(
                "{} biomes exceed the catalog limit",
                catalog.biomes.len()
            )));
        }
        Ok(catalog)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let catalog = Self::from_json_str(&json)?;
        log::info!(
            "Loaded {} biomes from {}",
            catalog.len(),
            path.as_ref().display()
        );
        Ok(catalog)
    }

    /// The catalog shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_JSON)
    }

    pub fn len(&self) -> usize {
        self.biomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.biomes.is_empty()
    }

    pub fn get(&self, id: BiomeId) -> Option<&Biome> {
        self.biomes.get(id.index())
    }

    pub fn name(&self, id: BiomeId) -> Option<&str> {
        self.get(id).map(|b| b.name.as_str())
    }

    /// First biome with this exact name.
    pub fn find(&self, name: &str) -> Option<BiomeId> {
        self.biomes
            .iter()
            .position(|b| b.name == name)
            .map(|i| BiomeId(i as u16))
    }

    pub fn iter(&self) -> impl Iterator<Item = (BiomeId, &Biome)> {
        self.biomes
            .iter()
            .enumerate()
            .map(|(i, b)| (BiomeId(i as u16), b))
    }

    /// Shrubland, else the first entry.
    pub fn fallback(&self) -> Option<BiomeId> {
        self.find(SHRUBLAND)
            .or_else(|| (!self.biomes.is_empty()).then_some(BiomeId(0)))
    }

    /// Check that the biomes the classifier cannot do without are present.
    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(WorldError::InvalidBiomeCatalog("catalog has no biomes".to_string()));
        }
        let missing: Vec<&str> = [OCEAN, SHRUBLAND]
            .into_iter()
            .filter(|name| self.find(name).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(WorldError::InvalidBiomeCatalog(format!(
                "missing required biome(s): {}",
                missing.join(", ")
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biomes::rules::{LAND_RULES, MARINE_RULES};

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = BiomeCatalog::builtin().unwrap();
        assert!(catalog.validate().is_ok());
        assert!(catalog.get(catalog.find(OCEAN).unwrap()).unwrap().is_marine());
    }

    #[test]
    fn test_builtin_catalog_covers_every_rule_candidate() {
        let catalog = BiomeCatalog::builtin().unwrap();
        for rule in MARINE_RULES.iter().chain(LAND_RULES.iter()) {
            for name in rule.candidates {
                assert!(catalog.find(name).is_some(), "missing {}", name);
            }
        }
    }

    #[test]
    fn test_parse_optional_fields() {
        let json = r#"{
            "biomes": [
                {
                    "Name": "Meadow",
                    "HeightAboveSeaLevel": {"Min": 1, "Max": 800},
                    "Temperature": {"Min": 5, "Max": 25},
                    "Terrain": {"Min": 1, "Max": 2}
                }
            ]
        }"#;
        let catalog = BiomeCatalog::from_json_str(json).unwrap();
        let meadow = catalog.get(BiomeId(0)).unwrap();
        assert_eq!(meadow.name, "Meadow");
        assert_eq!(meadow.terrain.unwrap().max, 2.0);
        assert!(meadow.rainfall.is_none());
        assert!(!meadow.near_ocean);
        assert_eq!(catalog.fallback(), Some(BiomeId(0)));
        assert!(matches!(
            catalog.validate(),
            Err(WorldError::InvalidBiomeCatalog(_))
        ));
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let result = BiomeCatalog::from_json_str("{\"biomes\": [ {\"Colour\": 3 } ]}");
        assert!(matches!(result, Err(WorldError::CatalogParse(_))));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let result = BiomeCatalog::load("/nonexistent/biomes.json");
        assert!(matches!(result, Err(WorldError::CatalogIo(_))));
    }
}
