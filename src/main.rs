mod config;
mod logging;

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use rayon::prelude::*;

use mapdig_blocks::{BlockRegistry, StateLookup};
use mapdig_chunk::ChunkView;
use mapdig_io::{AnvilStorage, ChunkDecoder};
use mapdig_runtime::{BlockDigger, NoLiveWorld, WorldChunk};
use mapdig_world::{ChunkCoord, TileCoord, ZoomShift};

use crate::config::{Config, DEFAULT_CONFIG};

#[derive(Parser)]
#[command(name = "mapdig", about = "Probe and read terrain from a world's saved region files")]
struct Cli {
    /// Config file
    #[arg(long, short, default_value = DEFAULT_CONFIG)]
    config: PathBuf,
    /// World save directory (overrides the config)
    #[arg(long, short)]
    world: Option<PathBuf>,
    /// Log level (overrides the config)
    #[arg(long)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Does a tile contain generated terrain?
    Probe {
        #[arg(allow_hyphen_values = true)]
        tx: i32,
        #[arg(allow_hyphen_values = true)]
        tz: i32,
        /// Zoom shift: 1 is one region per tile, -4 one chunk per tile
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        zoom: i32,
    },
    /// Decode one chunk and print its surface
    View {
        #[arg(allow_hyphen_values = true)]
        cx: i32,
        #[arg(allow_hyphen_values = true)]
        cz: i32,
    },
    /// Probe every tile in a rectangle in parallel
    Scan {
        /// Minimum corner (tile X and Z)
        #[arg(long, required = true, num_args = 2, value_names = ["TX", "TZ"], allow_hyphen_values = true)]
        min: Vec<i32>,
        /// Maximum corner, inclusive
        #[arg(long, required = true, num_args = 2, value_names = ["TX", "TZ"], allow_hyphen_values = true)]
        max: Vec<i32>,
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        zoom: i32,
    },
}

fn load_registry(cfg: &Config) -> Result<BlockRegistry, Box<dyn Error>> {
    match &cfg.registry {
        Some(path) => BlockRegistry::load_from_path(path),
        None => BlockRegistry::vanilla(),
    }
}

fn build_digger(cfg: &Config, reg: Arc<BlockRegistry>) -> BlockDigger {
    let storage = AnvilStorage::with_extension(cfg.region_path(), cfg.region_extension.clone());
    log::info!("Reading regions from {}", storage.dir().display());
    BlockDigger::new(
        Arc::new(storage),
        Arc::new(NoLiveWorld),
        ChunkDecoder::new(cfg.height, reg),
    )
}

fn print_view(reg: &BlockRegistry, chunk: &WorldChunk) {
    let coord = chunk.coord();
    println!("chunk [{}, {}] status {}", coord.cx, coord.cz, chunk.status());
    if let Some(view) = chunk.as_snapshot() {
        let filled = view.sections().iter().filter(|s| s.as_ref().is_some_and(|s| !s.is_empty()));
        println!(
            "generation {:?}, {} populated sections",
            view.snapshot().generation(),
            filled.count()
        );
        for diag in view.diagnostics() {
            println!("  recovered: {diag}");
        }
    }
    println!("surface heights (rows z, columns x):");
    for z in 0..16 {
        let row: Vec<String> = (0..16)
            .map(|x| format!("{:4}", chunk.sample_heightmap(x, z)))
            .collect();
        println!("{}", row.join(""));
    }
    let (x, z) = (8, 8);
    let y = chunk.sample_heightmap(x, z);
    let top = chunk.block_state(x, y, z);
    let name = reg.get(top.id).map(|ty| ty.name.as_str()).unwrap_or("?");
    let biome = chunk
        .biome(x, y, z)
        .and_then(|b| reg.biome_name(b))
        .unwrap_or("?");
    println!("center column: {name} at y={y}, biome {biome}");
    if !reg.fluid_state(top).is_empty() {
        println!("center column is covered by fluid");
    }
}

fn run(cli: Cli) -> Result<bool, Box<dyn Error>> {
    let mut cfg = Config::load(&cli.config)?;
    if let Some(world) = cli.world {
        cfg.world = world;
    }
    if let Some(level) = cli.log_level {
        cfg.log.level = level;
    }
    logging::init(&cfg.log)?;

    let reg = Arc::new(load_registry(&cfg)?);
    let digger = build_digger(&cfg, reg.clone());

    match cli.command {
        Command::Probe { tx, tz, zoom } => {
            let found = digger
                .session()
                .probe_exists(TileCoord::new(tx, tz), ZoomShift(zoom));
            println!("tile [{tx}, {tz}] at zoom {zoom}: {}", if found { "terrain" } else { "empty" });
            Ok(found)
        }
        Command::View { cx, cz } => match digger.session().get_view(ChunkCoord::new(cx, cz)) {
            Some(chunk) => {
                print_view(&reg, &chunk);
                Ok(true)
            }
            None => {
                println!("chunk [{cx}, {cz}] has no generated terrain");
                Ok(false)
            }
        },
        Command::Scan { min, max, zoom } => {
            let (&[x0, z0], &[x1, z1]) = (min.as_slice(), max.as_slice()) else {
                return Err("scan: --min and --max each take one TX TZ pair".into());
            };
            if x1 < x0 || z1 < z0 {
                return Err("scan: max must not be below min".into());
            }
            let tiles: Vec<TileCoord> = (x0..=x1)
                .flat_map(|tx| (z0..=z1).map(move |tz| TileCoord::new(tx, tz)))
                .collect();
            let mut found: Vec<TileCoord> = tiles
                .par_iter()
                .filter(|&&tile| digger.session().probe_exists(tile, ZoomShift(zoom)))
                .copied()
                .collect();
            found.sort_by_key(|t| (t.tx, t.tz));
            for tile in &found {
                println!("{} {}", tile.tx, tile.tz);
            }
            let stats = digger.regions().stats();
            log::info!(
                "{} of {} tiles have terrain; {} regions validated ({} set hits)",
                found.len(),
                tiles.len(),
                stats.entries,
                stats.hits
            );
            Ok(!found.is_empty())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("mapdig: {e}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_requires_both_corners() {
        assert!(Cli::try_parse_from(["mapdig", "scan", "--max", "3", "3"]).is_err());
        assert!(Cli::try_parse_from(["mapdig", "scan", "--min", "0", "0"]).is_err());
        assert!(Cli::try_parse_from(["mapdig", "scan"]).is_err());
    }

    #[test]
    fn scan_accepts_negative_corners() {
        let cli = Cli::try_parse_from(["mapdig", "scan", "--min", "-2", "-3", "--max", "1", "4"]).unwrap();
        let Command::Scan { min, max, zoom } = cli.command else {
            panic!("expected scan");
        };
        assert_eq!(min, vec![-2, -3]);
        assert_eq!(max, vec![1, 4]);
        assert_eq!(zoom, 0);
    }
}
