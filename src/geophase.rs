//! Stage orchestration.
//!
//! Each stage can be run on its own through the `execute_*` methods, which
//! report their own results and errors. [`GeoPhase::execute`] is the
//! pipeline entry: a stage that cannot proceed logs a warning and leaves the
//! grid untouched so the stages after it still run.

use crate::biomes::{self, BiomeCatalog, BiomeDistribution};
use crate::climate::{self, WindStats};
use crate::coastline;
use crate::erosion::{self, ErosionStats};
use crate::error::Result;
use crate::geomorphometry::{self, TerrainAnalysis};
use crate::habitability;
use crate::params::WorldParams;
use crate::plates::{self, MagmaStats};
use crate::sea_level;
use crate::seeds::WorldSeeds;
use crate::world::{GenesisReport, World};

/// One step of the simulation pipeline
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    MagmaImpact,
    Slump,
    EdgeGuard,
    SeaLevel,
    ClimateTemperature,
    Wind,
    RiverFlow,
    TerrainAnalysis,
    Fertility,
    HumanComfort,
    SetBiomes,
}

impl Stage {
    pub fn all() -> &'static [Self] {
        &[
            Self::MagmaImpact,
            Self::Slump,
            Self::EdgeGuard,
            Self::SeaLevel,
            Self::ClimateTemperature,
            Self::Wind,
            Self::RiverFlow,
            Self::TerrainAnalysis,
            Self::Fertility,
            Self::HumanComfort,
            Self::SetBiomes,
        ]
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::MagmaImpact => "Move altitude along plate magma vectors",
            Self::Slump => "Diffuse altitude downhill",
            Self::EdgeGuard => "Keep the east and west borders navigable",
            Self::SeaLevel => "Recompute the global sea level",
            Self::ClimateTemperature => "Lay out the pre-wind temperature baseline",
            Self::Wind => "Prevailing wind, cooling and moisture transport",
            Self::RiverFlow => "Rainfall drainage, confluences and erosion",
            Self::TerrainAnalysis => "Terrain roughness quartiles",
            Self::Fertility => "Fertility scores",
            Self::HumanComfort => "Human comfort index",
            Self::SetBiomes => "Classify biomes",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::MagmaImpact => "magma-impact",
            Self::Slump => "slump",
            Self::EdgeGuard => "edge-guard",
            Self::SeaLevel => "sea-level",
            Self::ClimateTemperature => "climate-temperature",
            Self::Wind => "wind",
            Self::RiverFlow => "river-flow",
            Self::TerrainAnalysis => "terrain-analysis",
            Self::Fertility => "fertility",
            Self::HumanComfort => "human-comfort",
            Self::SetBiomes => "set-biomes",
        };
        write!(f, "{}", name)
    }
}

/// Stage order run once after the grid and plates exist.
pub const GENESIS_STAGES: &[Stage] = &[
    Stage::SeaLevel,
    Stage::ClimateTemperature,
    Stage::MagmaImpact,
    Stage::Slump,
    Stage::EdgeGuard,
    Stage::Wind,
    Stage::RiverFlow,
    Stage::EdgeGuard,
    Stage::TerrainAnalysis,
    Stage::Fertility,
    Stage::HumanComfort,
    Stage::SetBiomes,
];

/// Stage order for every era after genesis.
pub const ERA_STAGES: &[Stage] = &[
    Stage::MagmaImpact,
    Stage::Slump,
    Stage::EdgeGuard,
    Stage::SeaLevel,
    Stage::ClimateTemperature,
    Stage::Wind,
    Stage::RiverFlow,
    Stage::EdgeGuard,
    Stage::TerrainAnalysis,
    Stage::Fertility,
    Stage::HumanComfort,
    Stage::SetBiomes,
];

/// What happened during one era
#[derive(Clone, Debug, Default)]
pub struct EraReport {
    pub era: u64,
    pub sea_level: f32,
    pub average_temperature: f32,
    pub volcanic_injection: f64,
    pub erosion: ErosionStats,
    pub mean_fertility: f32,
    pub mean_comfort: f32,
    /// Stages that could not run this era
    pub skipped: Vec<Stage>,
}

impl EraReport {
    pub fn print_summary(&self) {
        println!(
            "Era {}: sea level {:.0}, avg temp {:.1}, fertility {:.2}, comfort {:.2}",
            self.era, self.sea_level, self.average_temperature, self.mean_fertility, self.mean_comfort
        );
        println!(
            "  Eroded {:.1}, deposited {:.1}, volcanic uplift {:.0}",
            self.erosion.total_eroded, self.erosion.total_deposited, self.volcanic_injection
        );
        if !self.skipped.is_empty() {
            let names: Vec<String> = self.skipped.iter().map(|s| s.to_string()).collect();
            println!("  Skipped: {}", names.join(", "));
        }
    }
}

/// Runs the simulation stages over one world with one biome catalog
pub struct GeoPhase {
    pub world: World,
    catalog: BiomeCatalog,
    /// Filled in by the stages as they run; reset each era
    report: EraReport,
}

impl GeoPhase {
    pub fn new(world: World, catalog: BiomeCatalog) -> Self {
        Self {
            world,
            catalog,
            report: EraReport::default(),
        }
    }

    /// Build a world from scratch and run the genesis stages.
    ///
    /// Grid and plate failures abort genesis; stage failures after that are
    /// logged and skipped like in any other era.
    pub fn genesis(params: WorldParams, seeds: WorldSeeds, catalog: BiomeCatalog) -> Result<Self> {
        log::info!(
            "Genesis: {}x{} hexes, {} plates, seed {}",
            params.width,
            params.height,
            params.plate_count,
            seeds.master
        );

        let mut world = World::new(params, seeds)?;
        world.generate_plates()?;

        let mut phase = Self::new(world, catalog);
        phase.run(GENESIS_STAGES);

        let report = phase.world.report();
        log::info!(
            "Genesis complete: {} plates, sea level {:.0}, {:.1}% land, avg temp {:.1}",
            report.plate_count,
            report.sea_level,
            report.land_fraction * 100.0,
            report.average_temperature
        );
        Ok(phase)
    }

    /// Run one era of the pipeline and advance the era counter.
    pub fn advance_era(&mut self) -> EraReport {
        self.run(ERA_STAGES);
        self.world.state.era += 1;

        let mut report = std::mem::take(&mut self.report);
        report.era = self.world.state.era;
        report.sea_level = self.world.state.sea_level;
        report.average_temperature = self.world.state.average_temperature;

        log::info!(
            "Era {} complete: sea level {:.0}, avg temp {:.1}{}",
            report.era,
            report.sea_level,
            report.average_temperature,
            if report.skipped.is_empty() {
                String::new()
            } else {
                format!(", {} stage(s) skipped", report.skipped.len())
            }
        );
        report
    }

    pub fn catalog(&self) -> &BiomeCatalog {
        &self.catalog
    }

    /// Swap in a different catalog; takes effect at the next biome pass.
    pub fn set_catalog(&mut self, catalog: BiomeCatalog) {
        self.catalog = catalog;
    }

    pub fn report(&self) -> GenesisReport {
        self.world.report()
    }

    fn run(&mut self, stages: &[Stage]) {
        self.report = EraReport::default();
        for &stage in stages {
            self.execute(stage);
        }
    }

    /// Run one stage. Returns false (after logging why) if it could not run.
    pub fn execute(&mut self, stage: Stage) -> bool {
        let outcome = match stage {
            Stage::MagmaImpact => {
                let stats = self.execute_magma_impact();
                self.report.volcanic_injection += stats.volcanic_injection;
                Ok(())
            }
            Stage::Slump => {
                self.execute_slump();
                Ok(())
            }
            Stage::EdgeGuard => {
                self.execute_edge_guard();
                Ok(())
            }
            Stage::SeaLevel => {
                self.execute_sea_level();
                Ok(())
            }
            Stage::ClimateTemperature => {
                self.execute_climate_temperature();
                Ok(())
            }
            Stage::Wind => self.execute_wind().map(|_| ()),
            Stage::RiverFlow => {
                let stats = self.execute_river_flow();
                self.report.erosion.absorb(&stats);
                Ok(())
            }
            Stage::TerrainAnalysis => {
                self.execute_terrain_analysis();
                Ok(())
            }
            Stage::Fertility => {
                self.report.mean_fertility = self.execute_fertility();
                Ok(())
            }
            Stage::HumanComfort => {
                self.report.mean_comfort = self.execute_human_comfort();
                Ok(())
            }
            Stage::SetBiomes => self.execute_set_biomes().map(|_| ()),
        };

        match outcome {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Stage {} skipped: {}", stage, e);
                self.report.skipped.push(stage);
                false
            }
        }
    }

    pub fn execute_magma_impact(&mut self) -> MagmaStats {
        plates::magma_impact(&mut self.world.grid)
    }

    /// Returns the largest single transfer.
    pub fn execute_slump(&mut self) -> f32 {
        erosion::slump(&mut self.world.grid)
    }

    /// Returns how many border hexes were lowered.
    pub fn execute_edge_guard(&mut self) -> usize {
        coastline::edge_guard(&mut self.world.grid)
    }

    pub fn execute_sea_level(&mut self) -> f32 {
        let level = sea_level::update_sea_level(
            &self.world.grid,
            self.world.params.sea_level,
            self.world.state.average_temperature,
        );
        self.world.state.sea_level = level;
        level
    }

    pub fn execute_climate_temperature(&mut self) {
        let world = &mut self.world;
        climate::apply_climate_temperature(
            &mut world.grid,
            world.params.temperature_model,
            world.params.climate_mode,
            &mut world.state.climate,
        );
    }

    /// Runs the wind pass and records the new average temperature.
    pub fn execute_wind(&mut self) -> Result<WindStats> {
        let world = &mut self.world;
        let stats = climate::wind_effect(&mut world.grid, world.state.sea_level, &world.params.wind)?;
        world.state.average_temperature = stats.average_temperature;
        Ok(stats)
    }

    pub fn execute_river_flow(&mut self) -> ErosionStats {
        let world = &mut self.world;
        erosion::river_flow(&mut world.grid, world.state.sea_level, &world.params.rivers)
    }

    pub fn execute_terrain_analysis(&mut self) -> Option<TerrainAnalysis> {
        geomorphometry::analyze_terrain(&mut self.world.grid)
    }

    /// Returns the grid mean.
    pub fn execute_fertility(&mut self) -> f32 {
        let world = &mut self.world;
        habitability::assess_fertility(
            &mut world.grid,
            world.state.sea_level,
            world.params.fertility_policy,
        )
    }

    /// Returns the grid mean.
    pub fn execute_human_comfort(&mut self) -> f32 {
        let world = &mut self.world;
        habitability::assess_human_comfort(&mut world.grid, world.state.sea_level)
    }

    pub fn execute_set_biomes(&mut self) -> Result<BiomeDistribution> {
        biomes::set_biomes(&mut self.world.grid, &self.catalog, self.world.state.sea_level)
    }
}
