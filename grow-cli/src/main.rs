//! Command-line driver that grows one tree of a registered species.
//!
//! All growth logic lives in `grow-core`; this binary only parses
//! arguments, seeds the RNG, runs the pulses and reports the shape.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use glam::IVec3;
use grow_core::{
    config::GrowthParams,
    phases::{self, PulseOutcome},
    registry::SpeciesRegistry,
    species::{ClimateTag, Species},
    tree::Tree,
};
use rand::{SeedableRng, rngs::StdRng};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Grow a voxel tree and report its shape.
#[derive(Parser, Debug)]
#[command(name = "grow", author, version, about, long_about = None)]
struct Cli {
    /// Species id or name.
    #[arg(short, long, default_value = "spruce")]
    species: String,

    /// Number of growth ticks to run.
    #[arg(short, long, default_value = "200")]
    pulses: u32,

    /// Random seed for reproducible growth.
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Total world age in ticks; shifts the per-month height jitter.
    #[arg(long, default_value = "0")]
    world_time: u64,

    /// Climate tags at the planting site (repeatable).
    #[arg(short, long, value_enum, ignore_case = true)]
    climate: Vec<ClimateArg>,

    /// Tree base position as x,y,z.
    #[arg(long, default_value = "0,64,0", value_parser = parse_pos)]
    pos: IVec3,

    /// JSON file overriding the species' growth parameters.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
}

/// Climate tag of the planting site.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ClimateArg {
    Hot,
    Cold,
    Dry,
    Wet,
    Coniferous,
    Forest,
    Plains,
}

impl From<ClimateArg> for ClimateTag {
    fn from(arg: ClimateArg) -> Self {
        match arg {
            ClimateArg::Hot => ClimateTag::Hot,
            ClimateArg::Cold => ClimateTag::Cold,
            ClimateArg::Dry => ClimateTag::Dry,
            ClimateArg::Wet => ClimateTag::Wet,
            ClimateArg::Coniferous => ClimateTag::Coniferous,
            ClimateArg::Forest => ClimateTag::Forest,
            ClimateArg::Plains => ClimateTag::Plains,
        }
    }
}

#[derive(Debug, Default, Serialize)]
struct Report {
    species: String,
    energy: f32,
    ticks: u32,
    grew: u32,
    exhausted: u32,
    blocked: u32,
    collided: u32,
    nodes: usize,
    height: u32,
    base_radius: u32,
    ends: Vec<IVec3>,
}

fn parse_pos(s: &str) -> Result<IVec3, String> {
    let parts: Vec<i32> = s
        .split(',')
        .map(|p| p.trim().parse::<i32>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("invalid position '{s}': {e}"))?;
    match parts.as_slice() {
        [x, y, z] => Ok(IVec3::new(*x, *y, *z)),
        _ => Err(format!("position '{s}' must have three components")),
    }
}

fn load_species(cli: &Cli) -> Result<Species> {
    let registry = SpeciesRegistry::with_defaults()?;
    let mut species = (*registry.require(&cli.species)?).clone();

    if let Some(path) = &cli.params {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading parameters from {}", path.display()))?;
        species.params = GrowthParams::from_json_str(&text)
            .with_context(|| format!("parsing parameters in {}", path.display()))?;
        info!(path = %path.display(), "loaded growth parameters");
    }
    Ok(species)
}

fn run(cli: &Cli) -> Result<Report> {
    let species = load_species(cli)?;
    let climate: Vec<ClimateTag> = cli.climate.iter().copied().map(ClimateTag::from).collect();
    let energy = species.energy(cli.pos, cli.world_time, &climate);
    info!(species = %species.id, energy, pulses = cli.pulses, seed = cli.seed, "growing");

    let mut rng = StdRng::seed_from_u64(cli.seed);
    let mut tree = Tree::new(cli.pos, 0.0);
    tree.update_radii(species.params.tapering);

    let mut report = Report {
        species: species.id.to_string(),
        energy,
        ticks: cli.pulses,
        ..Default::default()
    };

    for _ in 0..cli.pulses {
        match phases::grow_tick(&mut tree, &species, energy, &mut rng) {
            Some(PulseOutcome::Grew { .. }) => report.grew += 1,
            Some(PulseOutcome::Exhausted { .. }) => report.exhausted += 1,
            Some(PulseOutcome::Blocked { .. }) => report.blocked += 1,
            Some(PulseOutcome::Collided { .. }) => report.collided += 1,
            None => {}
        }
    }

    report.nodes = tree.nodes.len();
    report.height = tree.height();
    report.base_radius = tree.int_radius(0, species.params.max_radius);
    report.ends = phases::post_grow(&tree, &species);
    Ok(report)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let report = run(&cli)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("species:     {}", report.species);
        println!("energy:      {:.2}", report.energy);
        println!(
            "pulses:      {} grew, {} exhausted, {} blocked, {} collided ({} ticks)",
            report.grew, report.exhausted, report.blocked, report.collided, report.ticks
        );
        println!("nodes:       {}", report.nodes);
        println!("height:      {}", report.height);
        println!("base radius: {}", report.base_radius);
        println!("branch ends: {}", report.ends.len());
    }
    Ok(())
}
