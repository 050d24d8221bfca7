//! Command-line front end: generate a map, route across it, print JSON.

use std::collections::BTreeMap;
use std::fs;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use terrapath_core::{
    find_path, Cell, GeneratedTerrain, GenerationParams, PathResult, TerrainCategory, TerrainGenerator,
};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "terrapath", about = "Generate terrain and find least-cost routes across it")]
struct Args {
    /// JSON file with generation params; flags below override its fields.
    #[arg(short, long)]
    params: Option<String>,

    /// Map width in cells.
    #[arg(long)]
    width: Option<usize>,

    /// Map height in cells.
    #[arg(long)]
    height: Option<usize>,

    /// Seed for a reproducible map (fresh seed per run if omitted).
    #[arg(short, long)]
    seed: Option<u32>,

    /// Categories to hide, comma separated (e.g. water,snow).
    #[arg(long, value_delimiter = ',')]
    hide: Vec<String>,

    /// Route start as "x,y".
    #[arg(long, value_parser = parse_cell, requires = "to")]
    from: Option<Cell>,

    /// Route goal as "x,y".
    #[arg(long, value_parser = parse_cell, requires = "from")]
    to: Option<Cell>,

    /// Run this many random searches over the map and report a summary.
    #[arg(long)]
    batch: Option<usize>,

    /// Log generation and search details to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn parse_cell(s: &str) -> std::result::Result<Cell, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"x,y\", got {s:?}"))?;
    let x = x.trim().parse::<i32>().map_err(|e| format!("bad x in {s:?}: {e}"))?;
    let y = y.trim().parse::<i32>().map_err(|e| format!("bad y in {s:?}: {e}"))?;
    Ok(Cell::new(x, y))
}

/// Merge the optional params file with command-line overrides.
fn resolve_params(args: &Args) -> Result<GenerationParams> {
    let mut params = match &args.params {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?
        }
        None => GenerationParams::default(),
    };
    if let Some(w) = args.width {
        params.width = w;
    }
    if let Some(h) = args.height {
        params.height = h;
    }
    if args.seed.is_some() {
        params.seed = args.seed;
    }
    if !args.hide.is_empty() {
        let visibility = params.visibility.get_or_insert_with(BTreeMap::new);
        for name in &args.hide {
            if name.parse::<TerrainCategory>().is_err() {
                bail!("unknown category {name:?}; expected one of water, sand, land, hills, mountain, snow");
            }
            visibility.insert(name.trim().to_ascii_lowercase(), false);
        }
    }
    Ok(params)
}

// ── Output types ──────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct MapSummary {
    seed: u32,
    width: usize,
    height: usize,
    categories: BTreeMap<&'static str, usize>,
}

impl MapSummary {
    fn of(terrain: &GeneratedTerrain) -> Self {
        let counts = terrain.grid.category_counts();
        Self {
            seed: terrain.seed,
            width: terrain.grid.width,
            height: terrain.grid.height,
            categories: TerrainCategory::ALL.iter().map(|c| (c.name(), counts[c.index()])).collect(),
        }
    }
}

#[derive(Serialize)]
struct BatchSummary {
    queries: usize,
    succeeded: usize,
    mean_distance: Option<f64>,
    mean_nodes_expanded: f64,
    elapsed_ms: f64,
}

#[derive(Serialize)]
struct Report {
    map: MapSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    route: Option<PathResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    batch: Option<BatchSummary>,
}

// ── Batch ─────────────────────────────────────────────────────────────────────

/// Random endpoint pairs, reproducible from the map seed.
fn random_queries(terrain: &GeneratedTerrain, n: usize) -> Vec<(Cell, Cell)> {
    let mut rng = StdRng::seed_from_u64(terrain.seed as u64);
    let (w, h) = (terrain.grid.width as i32, terrain.grid.height as i32);
    let mut cell = move || Cell::new(rng.gen_range(0..w), rng.gen_range(0..h));
    (0..n).map(|_| (cell(), cell())).collect()
}

fn run_batch(terrain: &GeneratedTerrain, n: usize) -> BatchSummary {
    let queries = random_queries(terrain, n);
    let t0 = Instant::now();

    #[cfg(feature = "threading")]
    let results = terrapath_core::find_paths_parallel(&terrain.grid, &queries);
    #[cfg(not(feature = "threading"))]
    let results: Vec<PathResult> = queries.iter().map(|&(s, g)| find_path(&terrain.grid, s, g)).collect();

    let elapsed_ms = t0.elapsed().as_secs_f64() * 1000.0;
    let found: Vec<&PathResult> = results.iter().filter(|r| r.success).collect();
    let mean_distance = (!found.is_empty())
        .then(|| found.iter().map(|r| r.distance).sum::<f64>() / found.len() as f64);
    let mean_nodes_expanded = if results.is_empty() {
        0.0
    } else {
        results.iter().map(|r| r.nodes_expanded as f64).sum::<f64>() / results.len() as f64
    };

    BatchSummary { queries: n, succeeded: found.len(), mean_distance, mean_nodes_expanded, elapsed_ms }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    let params = resolve_params(&args)?;
    let terrain = TerrainGenerator::new()
        .generate(&params)
        .context("terrain generation failed")?;
    info!(seed = terrain.seed, "map ready");

    let route = match (args.from, args.to) {
        (Some(start), Some(goal)) => {
            let t0 = Instant::now();
            let mut result = find_path(&terrain.grid, start, goal);
            result.elapsed_ms = Some(t0.elapsed().as_secs_f64() * 1000.0);
            Some(result)
        }
        _ => None,
    };
    let batch = args.batch.map(|n| run_batch(&terrain, n));

    let report = Report { map: MapSummary::of(&terrain), route, batch };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
