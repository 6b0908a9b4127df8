use std::{
    collections::{HashSet, VecDeque},
    str::FromStr,
};

use itertools::Itertools;
use thiserror::Error;

const NEIGHBOR_OFFSETS: [(i64, i64); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

/// Height 9 points do not belong to any basin.
pub const RIDGE_HEIGHT: u8 = 9;

pub type Point = (usize, usize);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeightMapError {
    #[error("height map has no points")]
    Empty,

    #[error("row {row} has {found} columns but the first row has {expected}")]
    NotRectangular {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}, column {column}: {found:?} is not a height")]
    InvalidHeight {
        line: usize,
        column: usize,
        found: char,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeightMap {
    heights: Vec<Vec<u8>>,
}

impl HeightMap {
    pub fn height(&self, point: Point) -> Option<u8> {
        self.heights.get(point.0)?.get(point.1).copied()
    }

    pub fn points(&self) -> impl Iterator<Item = Point> {
        (0..self.heights.len()).cartesian_product(0..self.heights[0].len())
    }

    pub fn neighbors(&self, point: Point) -> impl Iterator<Item = Point> + '_ {
        let (x, y) = point;

        NEIGHBOR_OFFSETS.iter().filter_map(move |(dx, dy)| {
            let nx = x as i64 + dx;
            let ny = y as i64 + dy;
            if nx < 0 || ny < 0 {
                return None;
            }

            let next = (nx as usize, ny as usize);
            self.height(next).map(|_| next)
        })
    }

    /// Points strictly lower than every one of their neighbors.
    pub fn low_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.points().filter(move |point| {
            let height = self.heights[point.0][point.1];
            self.neighbors(*point)
                .all(|neighbor| self.heights[neighbor.0][neighbor.1] > height)
        })
    }

    pub fn risk_level(&self, point: Point) -> u64 {
        self.height(point).map_or(0, |height| u64::from(height) + 1)
    }

    /// Number of points reachable from `start` without crossing a ridge.
    pub fn basin_size(&self, start: Point) -> usize {
        let mut explored: HashSet<Point> = Default::default();
        let mut queue: VecDeque<Point> = VecDeque::from([start]);

        while let Some(next) = queue.pop_front() {
            if explored.insert(next) {
                queue.extend(self.neighbors(next).filter(|neighbor| {
                    self.heights[neighbor.0][neighbor.1] != RIDGE_HEIGHT
                        && !explored.contains(neighbor)
                }));
            }
        }

        tracing::trace!(?start, size = explored.len(), "explored basin");
        explored.len()
    }

    pub fn basin_sizes(&self) -> Vec<usize> {
        self.low_points()
            .map(|low_point| self.basin_size(low_point))
            .collect()
    }
}

impl FromStr for HeightMap {
    type Err = HeightMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let heights: Vec<Vec<u8>> = s
            .trim_end()
            .lines()
            .enumerate()
            .map(|(line, text)| {
                text.chars()
                    .enumerate()
                    .map(|(column, c)| {
                        c.to_digit(10)
                            .map(|digit| digit as u8)
                            .ok_or(HeightMapError::InvalidHeight {
                                line: line + 1,
                                column: column + 1,
                                found: c,
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<_, _>>()?;

        let expected = heights.first().map_or(0, Vec::len);
        if expected == 0 {
            return Err(HeightMapError::Empty);
        }
        if let Some((row, found)) = heights
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != expected)
        {
            return Err(HeightMapError::NotRectangular {
                row,
                expected,
                found,
            });
        }

        Ok(Self { heights })
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use proptest::prelude::*;

    use super::{HeightMap, HeightMapError};

    const EXAMPLE: &str = include_str!("../example.txt");

    #[test]
    fn test_low_points() {
        let map: HeightMap = EXAMPLE.parse().unwrap();
        let low_points = map.low_points().collect_vec();
        assert_eq!(low_points, vec![(0, 1), (0, 9), (2, 2), (4, 6)]);
    }

    #[test]
    fn test_basin_sizes() {
        let map: HeightMap = EXAMPLE.parse().unwrap();
        assert_eq!(map.basin_sizes(), vec![3, 9, 14, 9]);
    }

    #[test]
    fn test_plateau_is_not_a_low_point() {
        let map: HeightMap = "515\n515".parse().unwrap();
        assert_eq!(map.low_points().count(), 0);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<HeightMap>(), Err(HeightMapError::Empty));
        assert_eq!(
            "12\n345".parse::<HeightMap>(),
            Err(HeightMapError::NotRectangular {
                row: 1,
                expected: 2,
                found: 3
            })
        );
        assert_eq!(
            "1-".parse::<HeightMap>(),
            Err(HeightMapError::InvalidHeight {
                line: 1,
                column: 2,
                found: '-'
            })
        );
    }

    proptest! {
        #[test]
        fn ridge_free_maps_are_one_basin(
            rows in prop::collection::vec(prop::collection::vec(1u8..9, 4), 1..6)
        ) {
            // A single 0 in the corner guarantees at least one low point.
            let text = rows
                .iter()
                .enumerate()
                .map(|(i, row)| {
                    let digits = row.iter().join("");
                    if i == 0 { format!("0{}", &digits[1..]) } else { digits }
                })
                .join("\n");
            let map: HeightMap = text.parse().unwrap();
            let total = rows.len() * 4;

            let sizes = map.basin_sizes();
            prop_assert!(!sizes.is_empty());
            prop_assert!(map.low_points().any(|point| point == (0, 0)));
            for size in sizes {
                prop_assert_eq!(size, total);
            }
        }
    }
}
