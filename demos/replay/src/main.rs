//! replay — load a map and its routes, replay them tick by tick, write CSV.
//!
//! ```text
//! replay                                   embedded 40×22 lobby scenario
//! replay MAP.json ROUTES.json [CONFIG.json] documents from disk
//! replay --scatter N SEED                  N random persons, straight-line routes
//! ```
//!
//! Flags: `--pace` sleeps `tick_interval_ms` between ticks, `--out DIR`
//! chooses the output directory (default `output/replay`).  Log verbosity
//! follows `RUST_LOG`.

use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cr_core::{Direction, Point, ReplayConfig};
use cr_grid::{scatter_persons, Grid};
use cr_output::{CsvWriter, ReplayOutputObserver};
use cr_replay::{Replay, ReplayBuilder, ReplayObserver, RoutePlan};
use cr_transport::{load_grid_reader, load_routes_reader, read_map_path, read_statistics_path};

// ── Embedded scenario ─────────────────────────────────────────────────────────

const MAP_JSON: &str = r#"{
    "up_right_point":  {"x": 40, "y": 22},
    "down_left_point": {"x": 0,  "y": 0},
    "borders": [
        {"first": {"x": 20, "y": 0},  "second": {"x": 20, "y": 9}},
        {"first": {"x": 20, "y": 13}, "second": {"x": 20, "y": 22}},
        {"first": {"x": 5,  "y": 18}, "second": {"x": 15, "y": 18}}
    ],
    "persons": [
        {"id": 0, "position": {"x": 15, "y": 15}, "goal": {"x": 18, "y": 15}},
        {"id": 1, "position": {"x": 15, "y": 15}, "goal": {"x": 16, "y": 16}},
        {"id": 2, "position": {"x": 10, "y": 10}, "goal": {"x": 24, "y": 11}},
        {"id": 3, "position": {"x": 3,  "y": 2},  "goal": {"x": 7,  "y": 6}}
    ],
    "name": "lobby"
}"#;

const ROUTES_JSON: &str = r#"{
    "ideal":  {"value": 4.2, "problematic": 0},
    "valid":  {"value": 5.0, "problematic": 0},
    "routes": [
        {"id": 0, "route": ["RIGHT", "RIGHT", "RIGHT"]},
        {"id": 1, "route": ["RIGHT_UP"]},
        {"id": 2, "route": ["RIGHT", "RIGHT", "RIGHT", "RIGHT", "RIGHT", "RIGHT", "RIGHT",
                            "RIGHT", "RIGHT", "RIGHT_UP", "RIGHT", "RIGHT", "RIGHT", "RIGHT"]},
        {"id": 3, "route": ["RIGHT_UP", "RIGHT_UP", "WAIT", "RIGHT_UP", "RIGHT_UP"]}
    ]
}"#;

const DEFAULT_OUT: &str = "output/replay";

// ── Command line ──────────────────────────────────────────────────────────────

enum Source {
    Embedded,
    Files { map: PathBuf, routes: PathBuf, config: Option<PathBuf> },
    Scatter { count: usize, seed: u64 },
}

struct Args {
    source: Source,
    pace:   bool,
    out:    PathBuf,
}

fn parse_args() -> Result<Args> {
    let mut pace = false;
    let mut out = PathBuf::from(DEFAULT_OUT);
    let mut positional = Vec::new();
    let mut scatter = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--pace" => pace = true,
            "--out" => out = args.next().context("--out needs a directory")?.into(),
            "--scatter" => {
                let count = args.next().context("--scatter needs N")?.parse()?;
                let seed = args.next().context("--scatter needs SEED")?.parse()?;
                scatter = Some((count, seed));
            }
            _ => positional.push(PathBuf::from(arg)),
        }
    }

    let source = match (scatter, positional.as_slice()) {
        (Some((count, seed)), []) => Source::Scatter { count, seed },
        (None, []) => Source::Embedded,
        (None, [map, routes]) => Source::Files { map: map.clone(), routes: routes.clone(), config: None },
        (None, [map, routes, config]) => Source::Files {
            map:    map.clone(),
            routes: routes.clone(),
            config: Some(config.clone()),
        },
        _ => bail!("usage: replay [MAP.json ROUTES.json [CONFIG.json]] | --scatter N SEED [--pace] [--out DIR]"),
    };
    Ok(Args { source, pace, out })
}

fn load_config(path: &Path) -> Result<ReplayConfig> {
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
}

// ── Scatter scenario ──────────────────────────────────────────────────────────

/// Greedy route: diagonal while both axes differ, then orthogonal.
/// Ignores walls; good enough to exercise the replay.
fn straight_line_route(from: Point, to: Point) -> Vec<Direction> {
    let mut route = Vec::new();
    let mut at = from;
    while at != to {
        let dx = (to.x - at.x).signum();
        let dy = (to.y - at.y).signum();
        let direction = match (dx, dy) {
            (1, 1)   => Direction::RightUp,
            (1, -1)  => Direction::RightDown,
            (-1, 1)  => Direction::LeftUp,
            (-1, -1) => Direction::LeftDown,
            (1, 0)   => Direction::Right,
            (-1, 0)  => Direction::Left,
            (0, 1)   => Direction::Up,
            _        => Direction::Down,
        };
        at = at.offset(direction.delta());
        route.push(direction);
    }
    route
}

fn scatter_scenario(count: usize, seed: u64) -> Result<(Grid, RoutePlan)> {
    let mut grid = Grid::new(40, 22)?;
    grid.add_wall_between(Point::new(20, 0), Point::new(20, 9))?;
    grid.add_wall_between(Point::new(20, 13), Point::new(20, 22))?;
    let placed = scatter_persons(&mut grid, count, seed);
    if placed.len() < count {
        warn!(requested = count, placed = placed.len(), "grid too crowded");
    }
    let routes = grid
        .persons()
        .map(|p| (p.id, straight_line_route(p.position, p.goal)))
        .collect();
    Ok((grid, routes))
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Top row first: `#` wall, `G` goal, `@` person, `*` person at goal, `2`…`9`
/// co-located persons.
fn render(grid: &Grid) -> String {
    let occupancy = grid.occupancy();
    let mut out = String::new();
    for y in (0..grid.height()).rev() {
        for x in 0..grid.width() {
            let point = Point::new(x, y);
            let here = occupancy.get(point);
            let ch = match (here.len(), grid.cell(point)) {
                (0, Some(c)) if c.is_wall => '#',
                (0, Some(c)) if c.goal    => 'G',
                (0, _) => '.',
                (1, _) => match grid.person(here[0]) {
                    Some(p) if p.reached_goal => '*',
                    _ => '@',
                },
                (n, _) => char::from_digit(n.min(9) as u32, 10).unwrap_or('+'),
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

// ── main ──────────────────────────────────────────────────────────────────────

fn run_paced<O: ReplayObserver>(replay: &mut Replay, observer: &mut O) {
    let interval = Duration::from_millis(replay.config.tick_interval_ms);
    while replay.step(observer) {
        println!("{}\n{}", replay.clock, render(replay.current()));
        thread::sleep(interval);
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let args = parse_args()?;

    // 1. Grid, routes and config.
    let (grid, routes, config) = match &args.source {
        Source::Embedded => {
            let grid = load_grid_reader(MAP_JSON.as_bytes())?;
            let (routes, stats) = load_routes_reader(ROUTES_JSON.as_bytes())?;
            info!(ideal = ?stats.ideal.value, valid = ?stats.valid.value, "embedded scenario");
            (grid, routes, ReplayConfig::default())
        }
        Source::Files { map, routes, config } => {
            let grid = cr_transport::load_grid(&read_map_path(map)?)?;
            let (routes, stats) = cr_transport::load_routes(&read_statistics_path(routes)?)?;
            info!(
                ideal_s     = ?stats.ideal.value,
                valid_s     = ?stats.valid.value,
                problematic = stats.valid.problematic,
                "statistics"
            );
            let config = match config {
                Some(path) => load_config(path)?,
                None => ReplayConfig::default(),
            };
            (grid, routes, config)
        }
        Source::Scatter { count, seed } => {
            let (grid, routes) = scatter_scenario(*count, *seed)?;
            (grid, routes, ReplayConfig::default())
        }
    };

    println!("=== replay ===");
    println!(
        "Grid {}x{}  |  walls {}  |  persons {}  |  routes {}  |  bound {} ticks",
        grid.width(),
        grid.height(),
        grid.walls().len(),
        grid.person_count(),
        routes.len(),
        routes.longest_cost(),
    );
    println!("{}", render(&grid));

    // 2. Replay.
    let mut replay = ReplayBuilder::new(grid).config(config).routes(routes).build()?;

    // 3. Output.
    std::fs::create_dir_all(&args.out)?;
    let writer = CsvWriter::new(&args.out)?;
    let mut obs = ReplayOutputObserver::new(writer, &replay.config);
    obs.record_initial(replay.initial());

    // 4. Run.
    let t0 = Instant::now();
    if args.pace {
        run_paced(&mut replay, &mut obs);
    } else {
        replay.run(&mut obs)?;
    }
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }

    // 5. Summary.
    let terminal = replay.current();
    let reached = terminal.persons().filter(|p| p.reached_goal).count();
    println!("Replay complete in {:.3} s: {}", elapsed.as_secs_f64(), replay.clock);
    println!("  reached goal : {reached} / {}", terminal.person_count());
    println!("  max visits   : {}", terminal.max_ticks());
    println!("  output       : {}", args.out.display());
    println!();
    println!("{}", render(terminal));

    Ok(())
}
