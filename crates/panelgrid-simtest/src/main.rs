//! panelgrid Headless Tiling Harness
//!
//! Replays the scenario pack and sweeps seeded random layouts through the
//! tiling engine. Runs entirely in-process: no host, no rendering.
//!
//! Usage:
//!   cargo run -p panelgrid-simtest
//!   cargo run -p panelgrid-simtest -- --verbose
//!   cargo run -p panelgrid-simtest -- --seed 7 --config tiling.json

use panelgrid_core::prelude::*;
use panelgrid_logic::assignment::form_group;
use panelgrid_logic::config::validate_config;
use panelgrid_logic::orientation::{column_axis, row_axis, Orientation};
use panelgrid_logic::partition::partition;
use panelgrid_logic::store::MemoryStore;
use panelgrid_logic::validate::check_group_sizes;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use std::collections::HashMap;
use std::convert::Infallible;
use tracing_subscriber::filter::LevelFilter;

// ── Scenario pack ───────────────────────────────────────────────────────
const SCENARIOS_JSON: &str = include_str!("../../../data/scenarios.json");

#[derive(Debug, Deserialize)]
struct Scenario {
    name: String,
    orientation: Orientation,
    /// Cells placed one by one before the steps, as (col, row).
    #[serde(default)]
    setup: Vec<[i32; 2]>,
    /// Fill a cols × rows block before the steps.
    #[serde(default)]
    setup_rect: Option<[i32; 2]>,
    steps: Vec<Step>,
    #[serde(default)]
    expect: Vec<Expectation>,
    #[serde(default)]
    skip_validation: bool,
}

#[derive(Debug, Deserialize)]
struct Step {
    #[serde(default)]
    place: Option<[i32; 2]>,
    #[serde(default)]
    remove: Option<[i32; 2]>,
    #[serde(default)]
    expect_scanned: Option<usize>,
    #[serde(default)]
    expect_truncated: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct Expectation {
    cell: [i32; 2],
    master: [i32; 2],
    width: u32,
    height: u32,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

struct Options {
    verbose: bool,
    seed: u64,
    config: TilingConfig,
}

fn main() {
    let options = match parse_args() {
        Ok(o) => o,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    };

    let _ = tracing_subscriber::fmt()
        .with_max_level(log_level(options.verbose))
        .with_target(false)
        .try_init();

    println!("=== panelgrid Tiling Harness ===\n");
    log::info!(
        "seed={} max_size={}",
        options.seed,
        options.config.max_size
    );

    let mut results = Vec::new();

    // 1. Orientation table
    results.extend(validate_orientation_table(&options));

    // 2. Scenario pack replay
    results.extend(validate_scenarios(&options));

    // 3. Idempotence
    results.extend(validate_idempotence(&options));

    // 4. Random edit sweep
    results.extend(validate_random_edits(&options));

    // 5. Size cap on large sheets
    results.extend(validate_size_cap(&options));

    // 6. Post-removal disjointness
    results.extend(validate_removal_disjointness(&options));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || options.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

/// Retile summaries with `--verbose`, cap warnings otherwise.
fn log_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    }
}

fn parse_args() -> Result<Options, String> {
    let mut options = Options {
        verbose: false,
        seed: 42,
        config: TilingConfig::default(),
    };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--verbose" | "-v" => options.verbose = true,
            "--seed" => {
                let value = args.next().ok_or("--seed needs a value")?;
                options.seed = value
                    .parse()
                    .map_err(|e| format!("bad --seed {}: {}", value, e))?;
            }
            "--config" => {
                let path = args.next().ok_or("--config needs a path")?;
                let text = std::fs::read_to_string(&path)
                    .map_err(|e| format!("cannot read {}: {}", path, e))?;
                options.config = serde_json::from_str(&text)
                    .map_err(|e| format!("cannot parse {}: {}", path, e))?;
            }
            other => return Err(format!("unknown argument {}", other)),
        }
    }
    let errors = validate_config(&options.config);
    if !errors.is_empty() {
        let listed: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        return Err(format!("invalid config: {}", listed.join("; ")));
    }
    Ok(options)
}

fn ok<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(v) => v,
        Err(never) => match never {},
    }
}

/// (col, row) in `o`'s display plane.
fn at(o: Orientation, col: i32, row: i32) -> LatticePos {
    LatticePos::ORIGIN.offset(column_axis(o), col).with_y(row)
}

fn engine_for(options: &Options) -> Result<TilingEngine, String> {
    TilingEngine::with_config(options.config.clone()).map_err(|e| e.to_string())
}

// ── 1. Orientation table ────────────────────────────────────────────────

fn validate_orientation_table(_options: &Options) -> Vec<TestResult> {
    println!("--- Orientation Table ---");
    let mut results = Vec::new();

    for o in Orientation::ALL {
        let col = column_axis(o);
        let perpendicular = col.axis() != o.facing().axis() && col.axis() != row_axis(o).axis();
        results.push(TestResult {
            name: format!("column_axis_{:?}", o).to_lowercase(),
            passed: perpendicular,
            detail: format!("{:?} → right is {:?}", o, col),
        });
    }

    let mirrored = column_axis(Orientation::North) == column_axis(Orientation::South).opposite()
        && column_axis(Orientation::East) == column_axis(Orientation::West).opposite();
    results.push(TestResult {
        name: "column_axis_opposites".into(),
        passed: mirrored,
        detail: "opposite facings have opposite column axes".into(),
    });

    results
}

// ── 2. Scenario pack ────────────────────────────────────────────────────

fn validate_scenarios(options: &Options) -> Vec<TestResult> {
    println!("--- Scenario Pack ---");
    let mut results = Vec::new();

    let scenarios: Vec<Scenario> = match serde_json::from_str(SCENARIOS_JSON) {
        Ok(s) => s,
        Err(e) => {
            results.push(TestResult {
                name: "scenarios_parse".into(),
                passed: false,
                detail: format!("JSON parse error: {}", e),
            });
            return results;
        }
    };

    for scenario in &scenarios {
        let outcome = run_scenario(scenario, options);
        results.push(TestResult {
            name: format!("scenario_{}", scenario.name),
            passed: outcome.is_ok(),
            detail: match outcome {
                Ok(summary) => summary,
                Err(e) => e,
            },
        });
    }

    results
}

fn run_scenario(scenario: &Scenario, options: &Options) -> Result<String, String> {
    let o = scenario.orientation;
    let mut engine = engine_for(options)?;

    let mut setup: Vec<[i32; 2]> = scenario.setup.clone();
    if let Some([cols, rows]) = scenario.setup_rect {
        for row in 0..rows {
            for col in 0..cols {
                setup.push([col, row]);
            }
        }
    }
    for [col, row] in setup {
        engine
            .place(at(o, col, row), o)
            .map_err(|e| format!("setup ({}, {}): {}", col, row, e))?;
    }

    for (i, step) in scenario.steps.iter().enumerate() {
        let report = match (step.place, step.remove) {
            (Some([col, row]), None) => engine
                .place(at(o, col, row), o)
                .map_err(|e| format!("step {}: {}", i, e))?,
            (None, Some([col, row])) => engine
                .remove(at(o, col, row))
                .map_err(|e| format!("step {}: {}", i, e))?
                .ok_or_else(|| format!("step {}: nothing at ({}, {})", i, col, row))?,
            _ => return Err(format!("step {}: needs exactly one of place/remove", i)),
        };
        if let Some(expected) = step.expect_scanned {
            if report.scanned != expected {
                return Err(format!(
                    "step {}: scanned {} cells, expected {}",
                    i, report.scanned, expected
                ));
            }
        }
        if let Some(expected) = step.expect_truncated {
            if report.truncated != expected {
                return Err(format!(
                    "step {}: truncated={}, expected {}",
                    i, report.truncated, expected
                ));
            }
        }
    }

    for e in &scenario.expect {
        let [col, row] = e.cell;
        let pos = at(o, col, row);
        let [mc, mr] = e.master;
        let want = TileGroup::new(at(o, mc, mr), e.width, e.height);
        match engine.group_at(pos) {
            Some(got) if got == want => {}
            got => {
                return Err(format!(
                    "cell ({}, {}): got {:?}, expected {:?}",
                    col, row, got, want
                ))
            }
        }
    }

    if !scenario.skip_validation {
        let errors = engine.validate();
        if let Some(first) = errors.first() {
            return Err(format!("{} invariant error(s): {}", errors.len(), first.message));
        }
    }

    Ok(format!(
        "{} cells, {} tiles",
        engine.cell_count(),
        engine.tile_count()
    ))
}

// ── 3. Idempotence ──────────────────────────────────────────────────────

fn validate_idempotence(options: &Options) -> Vec<TestResult> {
    println!("--- Idempotence ---");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(options.seed);

    let mut stable = 0;
    let rounds = 50;
    for _ in 0..rounds {
        let o = Orientation::ALL[rng.gen_range(0..4)];
        let mut store = MemoryStore::new();
        for col in 0..10 {
            for row in 0..10 {
                if rng.gen_bool(0.6) {
                    store.insert(at(o, col, row), o);
                }
            }
        }
        let seed_pos = at(o, rng.gen_range(0..10), rng.gen_range(0..10));
        store.insert(seed_pos, o);

        let first = ok(form_group(&mut store, seed_pos, o, &options.config));
        let snapshot = store.records();
        let second = ok(form_group(&mut store, seed_pos, o, &options.config));
        if first == second && snapshot == store.records() {
            stable += 1;
        }
    }

    results.push(TestResult {
        name: "form_group_idempotent".into(),
        passed: stable == rounds,
        detail: format!("{}/{} random layouts stable on repeat", stable, rounds),
    });

    results
}

// ── 4. Random edits ─────────────────────────────────────────────────────

fn validate_random_edits(options: &Options) -> Vec<TestResult> {
    println!("--- Random Edit Sweep ---");
    let mut results = Vec::new();
    let window = options.config.max_size as i32;

    for o in Orientation::ALL {
        let mut rng = StdRng::seed_from_u64(options.seed ^ (o as u64 + 1) * 0x9E37);
        let mut engine = match engine_for(options) {
            Ok(e) => e,
            Err(e) => {
                results.push(TestResult {
                    name: "random_edits_engine".into(),
                    passed: false,
                    detail: e,
                });
                return results;
            }
        };

        let mut edits = 0;
        let mut failure = None;
        for _ in 0..1000 {
            // A max_size × max_size window keeps every region within the scan cap.
            let pos = at(o, rng.gen_range(0..window), rng.gen_range(0..window));
            let outcome = if engine.world.contains(pos) {
                engine.remove(pos).map(|_| ())
            } else {
                engine.place(pos, o).map(|_| ())
            };
            if let Err(e) = outcome {
                failure = Some(e.to_string());
                break;
            }
            edits += 1;
        }

        let errors = engine.validate();
        let passed = failure.is_none() && errors.is_empty();
        let detail = match (failure, errors.first()) {
            (Some(e), _) => format!("engine error after {} edits: {}", edits, e),
            (None, Some(first)) => {
                format!("{} invariant error(s): {}", errors.len(), first.message)
            }
            (None, None) => format!(
                "{} edits, {} cells in {} tiles",
                edits,
                engine.cell_count(),
                engine.tile_count()
            ),
        };
        results.push(TestResult {
            name: format!("random_edits_{:?}", o).to_lowercase(),
            passed,
            detail,
        });
    }

    results
}

// ── 5. Size cap ─────────────────────────────────────────────────────────

fn validate_size_cap(options: &Options) -> Vec<TestResult> {
    println!("--- Size Cap ---");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(options.seed.wrapping_add(400));
    let side = 2 * options.config.max_size as i32;
    let o = Orientation::South;

    let mut cells: Vec<LatticePos> = (0..side)
        .flat_map(|col| (0..side).map(move |row| at(o, col, row)))
        .collect();
    for i in (1..cells.len()).rev() {
        let j = rng.gen_range(0..=i);
        cells.swap(i, j);
    }

    let mut store = MemoryStore::new();
    let mut largest = 0;
    for pos in &cells {
        store.insert(*pos, o);
        let report = ok(form_group(&mut store, *pos, o, &options.config));
        for tile in &report.tiles {
            largest = largest.max(tile.group.width.max(tile.group.height));
        }
    }

    let errors = check_group_sizes(&store.records(), &options.config);
    results.push(TestResult {
        name: "size_cap_respected".into(),
        passed: errors.is_empty() && largest <= options.config.max_size,
        detail: format!(
            "{} cells placed, largest edge {} (limit {})",
            cells.len(),
            largest,
            options.config.max_size
        ),
    });

    results
}

// ── 6. Removal disjointness ─────────────────────────────────────────────

fn validate_removal_disjointness(options: &Options) -> Vec<TestResult> {
    println!("--- Removal Disjointness ---");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(options.seed.wrapping_mul(31));
    let o = Orientation::East;

    let mut checked = 0;
    let mut violations = 0;
    for _ in 0..40 {
        let mut engine = match engine_for(options) {
            Ok(e) => e,
            Err(_) => break,
        };
        let mut placed = Vec::new();
        for col in 0..8 {
            for row in 0..8 {
                if rng.gen_bool(0.65) {
                    let pos = at(o, col, row);
                    if engine.place(pos, o).is_ok() {
                        placed.push(pos);
                    }
                }
            }
        }
        if placed.is_empty() {
            continue;
        }
        let victim = placed[rng.gen_range(0..placed.len())];
        if engine.remove(victim).is_err() {
            violations += 1;
            continue;
        }
        placed.retain(|&p| p != victim);

        let mut owner: HashMap<LatticePos, usize> = HashMap::new();
        for (i, component) in partition(&placed, o).iter().enumerate() {
            for &cell in component {
                let Some(master) = engine.master_of(cell) else {
                    violations += 1;
                    continue;
                };
                if let Some(prev) = owner.insert(master, i) {
                    if prev != i {
                        violations += 1;
                    }
                }
            }
        }
        checked += 1;
    }

    results.push(TestResult {
        name: "removal_components_disjoint".into(),
        passed: violations == 0 && checked > 0,
        detail: format!("{} removals checked, {} violations", checked, violations),
    });

    results
}
