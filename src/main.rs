use clap::{Parser, ValueEnum};

use hexworld::climate::{ClimateMode, TemperatureModel};
use hexworld::sea_level::{SeaLevelPolicy, BASELINE_SEA_LEVEL};
use hexworld::{BiomeCatalog, GeoPhase, WorldPreset, WorldSeeds};

#[derive(Parser, Debug)]
#[command(name = "hexworld")]
#[command(about = "Generate and evolve a hex-grid planet")]
struct Args {
    /// World size preset
    #[arg(long, value_enum, default_value = "standard")]
    preset: PresetArg,

    /// Width in hexes (overrides the preset)
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Height in hexes (overrides the preset)
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of tectonic plates, at most 24 (overrides the preset)
    #[arg(short = 'p', long)]
    plates: Option<usize>,

    /// Eras to simulate after genesis
    #[arg(long, default_value = "10")]
    eras: u64,

    /// Global climate trend
    #[arg(long, value_enum, default_value = "stable")]
    climate: ClimateArg,

    /// Pre-wind temperature layout
    #[arg(long, value_enum, default_value = "gradient")]
    temperature: TemperatureArg,

    /// Biome catalog JSON (uses the built-in catalog if not specified)
    #[arg(long)]
    biomes: Option<String>,

    /// Sea level policy
    #[arg(long, value_enum, default_value = "fixed")]
    sea_level: SeaLevelArg,

    /// Offset added to mean altitude under the variable sea level policy
    #[arg(long, default_value = "0")]
    sea_per_hex: f32,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PresetArg {
    Small,
    Standard,
    Large,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ClimateArg {
    Cooling,
    Stable,
    Warming,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TemperatureArg {
    /// Linear arctic-to-desert gradient
    Gradient,
    /// Sine-shaped solar curve
    Solar,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SeaLevelArg {
    /// Constant 10000 baseline
    Fixed,
    /// Follows mean altitude and temperature
    Variable,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let preset = match args.preset {
        PresetArg::Small => WorldPreset::Small,
        PresetArg::Standard => WorldPreset::Standard,
        PresetArg::Large => WorldPreset::Large,
    };
    let mut params = preset.params();
    if let Some(width) = args.width {
        params.width = width;
    }
    if let Some(height) = args.height {
        params.height = height;
    }
    if let Some(plates) = args.plates {
        params.plate_count = plates;
    }
    params.climate_mode = match args.climate {
        ClimateArg::Cooling => ClimateMode::Cooling,
        ClimateArg::Stable => ClimateMode::Stable,
        ClimateArg::Warming => ClimateMode::Warming,
    };
    params.temperature_model = match args.temperature {
        TemperatureArg::Gradient => TemperatureModel::LinearGradient,
        TemperatureArg::Solar => TemperatureModel::SolarCurve,
    };
    params.sea_level = match args.sea_level {
        SeaLevelArg::Fixed => SeaLevelPolicy::Fixed(BASELINE_SEA_LEVEL),
        SeaLevelArg::Variable => SeaLevelPolicy::Variable {
            sea_per_hex: args.sea_per_hex,
        },
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    let seeds = WorldSeeds::from_master(seed);

    let catalog = match &args.biomes {
        Some(path) => BiomeCatalog::load(path),
        None => BiomeCatalog::builtin(),
    };
    let catalog = match catalog {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Failed to load biome catalog: {}", e);
            std::process::exit(1);
        }
    };

    println!("Generating world with seed: {}", seed);
    println!("Preset: {} ({})", preset, preset.description());
    println!("Map size: {}x{}", params.width, params.height);
    println!(
        "Climate: {}, temperature model: {}, sea level: {}",
        params.climate_mode, params.temperature_model, params.sea_level
    );
    println!("Biomes: {} in catalog", catalog.len());

    let mut phase = match GeoPhase::genesis(params, seeds, catalog) {
        Ok(phase) => phase,
        Err(e) => {
            eprintln!("Genesis failed: {}", e);
            std::process::exit(1);
        }
    };
    phase.report().print_summary();

    for _ in 0..args.eras {
        phase.advance_era().print_summary();
    }

    println!();
    phase.report().print_summary();
    if let Some(terrain) = phase.execute_terrain_analysis() {
        terrain.print_summary();
    }
    match phase.execute_set_biomes() {
        Ok(distribution) => distribution.print_summary(),
        Err(e) => eprintln!("Biome classification skipped: {}", e),
    }
}
