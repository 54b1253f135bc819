//! Profiling tool: times every pipeline stage across a run of eras

use std::collections::HashMap;
use std::time::{Duration, Instant};

use hexworld::geophase::ERA_STAGES;
use hexworld::{BiomeCatalog, GeoPhase, Stage, WorldPreset, WorldSeeds};

fn main() {
    env_logger::init();

    let seed = 1337u64;
    let eras = 20;
    let params = WorldPreset::Large.params();

    println!("=== Era Profiling ===");
    println!(
        "Map size: {}x{} ({} hexes), {} plates",
        params.width,
        params.height,
        params.width * params.height,
        params.plate_count
    );
    println!();

    let catalog = match BiomeCatalog::builtin() {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Built-in biome catalog is broken: {}", e);
            std::process::exit(1);
        }
    };

    let start = Instant::now();
    let mut phase = match GeoPhase::genesis(params, WorldSeeds::from_master(seed), catalog) {
        Ok(phase) => phase,
        Err(e) => {
            eprintln!("Genesis failed: {}", e);
            std::process::exit(1);
        }
    };
    let genesis_time = start.elapsed();
    println!("Genesis: {:?}", genesis_time);

    let mut timings: HashMap<Stage, Duration> = HashMap::new();
    let start = Instant::now();
    for _ in 0..eras {
        for &stage in ERA_STAGES {
            let stage_start = Instant::now();
            phase.execute(stage);
            *timings.entry(stage).or_default() += stage_start.elapsed();
        }
        phase.world.state.era += 1;
    }
    let total = start.elapsed();

    println!("{} eras: {:?} ({:?} per era)", eras, total, total / eras);
    println!("\n=== Per stage ===");
    for stage in Stage::all() {
        let time = timings.get(stage).copied().unwrap_or_default();
        println!(
            "{:<20} {:>8.2}% ({:?})",
            stage.to_string(),
            100.0 * time.as_secs_f64() / total.as_secs_f64(),
            time
        );
    }
    println!();
    phase.report().print_summary();
}
