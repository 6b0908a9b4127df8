use dijkstra::{lowest_total_risk, RouteError};
use grid::{Cell, Grid};

pub mod dijkstra;
pub mod grid;

/// Part 2 tiles the cave this many times in each direction.
pub const EXPANSION_FACTOR: usize = 5;

pub fn solve_part1(risks: &Grid) -> Result<u64, RouteError<Cell>> {
    lowest_total_risk(risks, Cell::ORIGIN, risks.last_cell())
}

pub fn solve_part2(risks: &Grid) -> Result<u64, RouteError<Cell>> {
    let risks = risks.expand(EXPANSION_FACTOR);
    lowest_total_risk(&risks, Cell::ORIGIN, risks.last_cell())
}
