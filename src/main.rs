//! Selfing/dispersal CLI - Run replicate worlds from JSON configuration.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use selfing_dispersal::{Experiment, ExperimentConfig, StopReason};

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <experiment.json> [output_dir]", args[0]);
        eprintln!();
        eprintln!("Run selfing/dispersal worlds from JSON configuration.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  experiment.json  Path to experiment configuration file");
        eprintln!("  output_dir       Directory for report files (default: output)");
        eprintln!();
        eprintln!("Example configuration is generated with --example flag.");
        std::process::exit(1);
    }

    if args[1] == "--example" {
        print_example_config();
        return;
    }

    let config_path = PathBuf::from(&args[1]);
    let output_dir = args
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("output"));

    // Load configuration
    let config_str = fs::read_to_string(&config_path).unwrap_or_else(|e| {
        eprintln!("Error reading config file: {}", e);
        std::process::exit(1);
    });

    let config: ExperimentConfig = serde_json::from_str(&config_str).unwrap_or_else(|e| {
        eprintln!("Error parsing config: {}", e);
        std::process::exit(1);
    });

    println!("Selfing/Dispersal Simulation");
    println!("============================");
    println!("Worlds: {}", config.worlds);
    println!("Patches: {}", config.world.patches);
    println!(
        "Inbreeding depression: {}, dispersal cost: {}",
        config.world.inbreeding_depression, config.world.dispersal_cost
    );
    println!("Generations: {}", config.world.generations);
    println!("Output: {}", output_dir.display());
    println!();

    let experiment = Experiment::new(config).unwrap_or_else(|e| {
        eprintln!("Error in config: {}", e);
        std::process::exit(1);
    });

    let experiment = experiment.with_output_dir(&output_dir).unwrap_or_else(|e| {
        eprintln!("Error creating output directory: {}", e);
        std::process::exit(1);
    });

    let start = Instant::now();
    let summaries = experiment.run().unwrap_or_else(|e| {
        eprintln!("Error running experiment: {}", e);
        std::process::exit(1);
    });
    let elapsed = start.elapsed();

    println!();
    println!("Results:");
    for summary in &summaries {
        let reason = match summary.stop_reason {
            StopReason::MaxGenerations => "budget",
            StopReason::Converged => "converged",
        };
        println!(
            "  World {:>3} (seed {}): {} generations ({}), {} patches converged, mean s={:.3}, mean d={:.3}",
            summary.world,
            summary.seed,
            summary.generations,
            reason,
            summary.converged_patches,
            summary.mean_selfing,
            summary.mean_dispersal
        );
    }
    println!();
    println!("Time: {:.2}s", elapsed.as_secs_f32());
}

fn print_example_config() {
    let config = ExperimentConfig::default();

    match serde_json::to_string_pretty(&config) {
        Ok(json) => {
            println!("Example configuration (experiment.json):");
            println!("{}", json);
        }
        Err(e) => {
            eprintln!("Error serializing example config: {}", e);
            std::process::exit(1);
        }
    }
}
