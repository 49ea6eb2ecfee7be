//! Flee CLI - greedy flee-path planner driver.
//!
//! - `flee run` - plan one flee path for a scene and print it
//! - `flee check` - validate a scene file

mod config;
mod report;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use flee_core::GridQuery;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::SceneConfig;
use crate::report::run_scene;

#[derive(Parser)]
#[command(name = "flee")]
#[command(about = "Greedy flee-path planner", version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan a flee path from the scene's cursor
    Run {
        /// Scene file (YAML)
        #[arg(long)]
        scene: PathBuf,

        /// Override the cursor x position (world units)
        #[arg(long, requires = "y", allow_negative_numbers = true)]
        x: Option<f32>,

        /// Override the cursor y position (world units)
        #[arg(long, requires = "x", allow_negative_numbers = true)]
        y: Option<f32>,

        /// Override the planner step cap
        #[arg(long)]
        steps: Option<usize>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a scene and show where the cursor lands
    Check {
        /// Scene file (YAML)
        #[arg(long)]
        scene: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            scene,
            x,
            y,
            steps,
            json,
        } => run(&scene, x.zip(y), steps, json),
        Commands::Check { scene } => check(&scene),
    }
}

fn run(path: &Path, cursor: Option<(f32, f32)>, steps: Option<usize>, json: bool) -> Result<()> {
    let mut scene = SceneConfig::load(path)?;
    if let Some((x, y)) = cursor {
        scene.cursor = flee_core::Vec2::new(x, y);
    }
    if let Some(steps) = steps {
        scene.planner = scene.planner.with_max_steps(steps);
    }
    tracing::info!(scene = %path.display(), "Planning flee path");

    let report = run_scene(&scene)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}

fn check(path: &Path) -> Result<()> {
    let scene = SceneConfig::load(path)?;
    let map = scene.build_map()?;

    println!("Scene: {}", path.display());
    println!(
        "Map:   {}x{} tiles, {} units per tile",
        map.width(),
        map.height(),
        map.tile_size()
    );
    println!(
        "Plan:  up to {} steps, accepted from {}",
        scene.planner.max_steps,
        scene.planner.threshold()
    );
    match map.resolve_cell(scene.cursor) {
        Some(cell) => println!("Start: {cell}"),
        None => {
            tracing::warn!(
                x = scene.cursor.x,
                y = scene.cursor.y,
                "cursor is outside the map"
            );
            println!("Start: none (cursor off the map)");
        }
    }
    Ok(())
}
