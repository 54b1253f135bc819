//! Priority rule table and scored fallback.

use super::catalog::{BiomeCatalog, OCEAN};
use super::{BiomeContext, BiomeId};

/// One step of the priority cascade: when `applies` holds, each candidate is
/// tried in order and the first one whose ranges all match wins.
#[derive(Clone, Copy)]
pub struct BiomeRule {
    pub name: &'static str,
    pub applies: fn(&BiomeContext) -> bool,
    pub candidates: &'static [&'static str],
}

impl std::fmt::Debug for BiomeRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BiomeRule")
            .field("name", &self.name)
            .field("candidates", &self.candidates)
            .finish()
    }
}

impl BiomeRule {
    /// First candidate present in the catalog that fully matches `ctx`.
    pub fn select(&self, catalog: &BiomeCatalog, ctx: &BiomeContext) -> Option<BiomeId> {
        if !(self.applies)(ctx) {
            return None;
        }
        self.candidates.iter().find_map(|name| {
            let id = catalog.find(name)?;
            let biome = catalog.get(id)?;
            biome.matches(ctx).then_some(id)
        })
    }
}

/// Tried before plain ocean for hexes at or below sea level.
pub const MARINE_RULES: &[BiomeRule] = &[BiomeRule {
    name: "kelp",
    applies: |c| c.height > -300.0 && c.height < 0.0 && c.terrain_quartile <= 2,
    candidates: &["Kelp Forest"],
}];

/// Land cascade, highest priority first.
pub const LAND_RULES: &[BiomeRule] = &[
    BiomeRule {
        name: "ice",
        applies: |c| c.temperature < -10.0,
        candidates: &["Ice Sheet"],
    },
    BiomeRule {
        name: "volcanic active",
        applies: |c| c.volcanic_activity > 70.0,
        candidates: &["Volcanic Active"],
    },
    BiomeRule {
        name: "volcanic dormant",
        applies: |c| c.volcanic_activity > 20.0 && c.volcanic_activity <= 70.0,
        candidates: &["Volcanic Dormant"],
    },
    BiomeRule {
        name: "swamp",
        applies: |c| c.surface_water > 150.0 && c.height < 50.0,
        candidates: &["Swamp"],
    },
    BiomeRule {
        name: "mountain",
        applies: |c| c.height > 2000.0 && c.terrain_quartile == 4,
        candidates: &[
            "Alpine Tundra",
            "Snowy Mountains",
            "Rocky Mountains",
            "Forested Mountains",
        ],
    },
    BiomeRule {
        name: "desert",
        applies: |c| c.rainfall < 15.0,
        candidates: &["Sandy Desert", "Cold Desert", "Cactus Scrubland"],
    },
    BiomeRule {
        name: "coast",
        applies: |c| c.near_ocean,
        candidates: &["Rocky Shore"],
    },
];

/// Highest-scoring compatible non-ocean biome. Ties keep catalog order.
///
/// A biome whose every range misses the hex scores zero and is never chosen.
pub fn best_match(catalog: &BiomeCatalog, ctx: &BiomeContext) -> Option<BiomeId> {
    let mut best: Option<(BiomeId, f32)> = None;
    for (id, biome) in catalog.iter() {
        if biome.name == OCEAN || !biome.is_compatible(ctx) {
            continue;
        }
        let score = biome.score(ctx);
        if score > 0.0 && best.map_or(true, |(_, s)| score > s) {
            best = Some((id, score));
        }
    }
    best.map(|(id, _)| id)
}

/// Classify one hex. `None` only for an empty catalog.
pub fn classify(catalog: &BiomeCatalog, ctx: &BiomeContext) -> Option<BiomeId> {
    if ctx.height <= 0.0 {
        if let Some(id) = MARINE_RULES.iter().find_map(|r| r.select(catalog, ctx)) {
            return Some(id);
        }
        return catalog.find(OCEAN).or_else(|| catalog.fallback());
    }

    LAND_RULES
        .iter()
        .find_map(|r| r.select(catalog, ctx))
        .or_else(|| best_match(catalog, ctx))
        .or_else(|| catalog.fallback())
}
