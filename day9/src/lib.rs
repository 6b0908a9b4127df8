use heightmap::HeightMap;
use itertools::Itertools;

pub mod heightmap;

/// Part 2 multiplies the sizes of this many of the largest basins.
pub const LARGEST_BASINS: usize = 3;

pub fn solve_part1(map: &HeightMap) -> u64 {
    map.low_points().map(|point| map.risk_level(point)).sum()
}

pub fn solve_part2(map: &HeightMap) -> usize {
    map.basin_sizes()
        .into_iter()
        .sorted_unstable_by(|a, b| b.cmp(a))
        .take(LARGEST_BASINS)
        .product()
}
