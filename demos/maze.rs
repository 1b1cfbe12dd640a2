//! Terminal maze demo: scatter barriers and terrain on a grid, run the
//! search and print the explored/path state as ASCII.
//!
//! Usage: `maze [manhattan|euclidean|octile]` (default: octile).

use std::ops::ControlFlow;
use std::process::ExitCode;

use gridway_core::{Grid, Point, Role};
use gridway_paths::{Heuristic, SearchResult, is_reachable, search};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

const SIDE: i32 = 20;
const SEED: u64 = 7;

fn render(grid: &Grid) -> String {
    let mut out = String::new();
    for (p, cell) in grid.iter() {
        let ch = match cell.role {
            Role::Barrier => '#',
            Role::Start => 'S',
            Role::End => 'E',
            Role::Path => '*',
            Role::Frontier => '+',
            Role::Visited => '.',
            Role::Free if cell.terrain > 0.0 => {
                char::from_digit(cell.terrain as u32, 10).unwrap_or('?')
            }
            Role::Free => ' ',
        };
        out.push(ch);
        if p.x == grid.side() - 1 {
            out.push('\n');
        }
    }
    out
}

fn build_grid(rng: &mut StdRng) -> Grid {
    let mut grid = Grid::new(SIDE);
    for y in 0..SIDE {
        for x in 0..SIDE {
            let p = Point::new(x, y);
            if rng.random_bool(0.22) {
                grid.toggle_barrier(p).unwrap();
            } else if rng.random_bool(0.15) {
                grid.set_terrain(p, rng.random_range(1..5)).unwrap();
            }
        }
    }
    let start = Point::new(0, 0);
    let end = Point::new(SIDE - 1, SIDE - 1);
    for p in [start, end] {
        if !grid.is_passable(p) {
            grid.toggle_barrier(p).unwrap();
        }
    }
    grid.set_start(start).unwrap();
    grid.set_end(end).unwrap();
    grid
}

fn main() -> ExitCode {
    let kind = match std::env::args().nth(1).as_deref() {
        None | Some("octile") => Heuristic::Octile,
        Some("euclidean") => Heuristic::Euclidean,
        Some("manhattan") => Heuristic::Manhattan,
        Some(other) => {
            eprintln!("unknown heuristic {other:?}; try manhattan, euclidean or octile");
            return ExitCode::FAILURE;
        }
    };

    let mut rng = StdRng::seed_from_u64(SEED);
    let mut grid = build_grid(&mut rng);
    let (start, end) = (grid.start().unwrap(), grid.end().unwrap());

    if !is_reachable(&grid, start, end, kind.connectivity()) {
        println!("{}", render(&grid));
        println!("{start} -> {end} is walled off; not searching");
        return ExitCode::SUCCESS;
    }

    let report = match search(&mut grid, start, end, kind, |_| ControlFlow::Continue(())) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("search rejected: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!("{}", render(&grid));
    match report.result {
        SearchResult::Found { cost, explored, path, .. } => {
            println!(
                "{kind:?}: cost {cost:.3}, {} path cells, {explored} explored",
                path.len()
            );
        }
        SearchResult::NotFound { explored } => {
            println!("{kind:?}: no path ({explored} explored)");
        }
    }
    if !report.diagnostics.is_clean() {
        println!("heuristic warnings: {:?}", report.diagnostics);
    }
    ExitCode::SUCCESS
}
