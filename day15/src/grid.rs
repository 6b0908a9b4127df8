use std::{fmt::Display, ops::Index, str::FromStr};

use itertools::Itertools;
use thiserror::Error;

/// Up, right, down, left. No diagonals.
const NEIGHBOR_OFFSETS: [(i64, i64); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

/// Values at or above this wrap back around to 1 when a grid is expanded.
const WRAP_LIMIT: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub column: usize,
}

impl Cell {
    pub const ORIGIN: Cell = Cell { row: 0, column: 0 };

    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid has no cells")]
    Empty,

    #[error("row {row} has {found} columns but the first row has {expected}")]
    NotRectangular {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}, column {column}: {found:?} is not a decimal digit")]
    InvalidDigit {
        line: usize,
        column: usize,
        found: char,
    },
}

/// A rectangular, row-major matrix of non-negative values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cols: usize,
    values: Vec<u64>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<u64>>) -> Result<Self, GridError> {
        let cols = rows.first().map(Vec::len).ok_or(GridError::Empty)?;
        if cols == 0 {
            return Err(GridError::Empty);
        }

        let mut values = Vec::with_capacity(rows.len() * cols);
        for (row, data) in rows.into_iter().enumerate() {
            if data.len() != cols {
                return Err(GridError::NotRectangular {
                    row,
                    expected: cols,
                    found: data.len(),
                });
            }
            values.extend(data);
        }

        Ok(Self { cols, values })
    }

    pub fn rows(&self) -> usize {
        self.values.len() / self.cols
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_count(&self) -> usize {
        self.values.len()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows() && cell.column < self.cols
    }

    pub fn get(&self, cell: Cell) -> Option<u64> {
        if self.contains(cell) {
            Some(self.values[self.position(cell)])
        } else {
            None
        }
    }

    /// Row-major position of `cell`. Only meaningful for cells inside the grid.
    pub fn position(&self, cell: Cell) -> usize {
        cell.row * self.cols + cell.column
    }

    pub fn last_cell(&self) -> Cell {
        Cell::new(self.rows() - 1, self.cols - 1)
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        (0..self.rows())
            .cartesian_product(0..self.cols)
            .map(|(row, column)| Cell::new(row, column))
    }

    /// In-bounds orthogonal neighbors of `cell`; anything past an edge is skipped.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        let max_row = self.rows() as i64;
        let max_column = self.cols as i64;

        NEIGHBOR_OFFSETS.iter().filter_map(move |(dr, dc)| {
            let next_row = cell.row as i64 + dr;
            let next_column = cell.column as i64 + dc;

            if next_row < 0 || next_column < 0 || next_row >= max_row || next_column >= max_column {
                None
            } else {
                Some(Cell::new(next_row as usize, next_column as usize))
            }
        })
    }

    /// Tiles the grid `times` times in both directions. Each tile step away from
    /// the top-left tile adds one to every value, wrapping 10 back to 1.
    pub fn expand(&self, times: usize) -> Grid {
        assert!(times > 0, "cannot expand a grid zero times");

        let rows = self.rows();
        let cols = self.cols;
        let values = (0..rows * times)
            .cartesian_product(0..cols * times)
            .map(|(row, column)| {
                let reference = self[Cell::new(row % rows, column % cols)];
                let increment = (row / rows + column / cols) as u64;
                wrap(reference + increment)
            })
            .collect();

        Grid {
            cols: cols * times,
            values,
        }
    }
}

fn wrap(mut value: u64) -> u64 {
    while value >= WRAP_LIMIT {
        value -= WRAP_LIMIT - 1;
    }
    value
}

impl Index<Cell> for Grid {
    type Output = u64;

    fn index(&self, cell: Cell) -> &Self::Output {
        assert!(self.contains(cell), "{:?} is outside the grid", cell);
        &self.values[self.position(cell)]
    }
}

impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .trim_end()
            .lines()
            .enumerate()
            .map(|(line, text)| {
                text.chars()
                    .enumerate()
                    .map(|(column, c)| {
                        c.to_digit(10).map(u64::from).ok_or(GridError::InvalidDigit {
                            line: line + 1,
                            column: column + 1,
                            found: c,
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Grid::new(rows)
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.values.chunks(self.cols) {
            writeln!(f, "{}", row.iter().join(""))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use proptest::prelude::*;

    use super::{wrap, Cell, Grid, GridError};

    const EXAMPLE: &str = include_str!("../example.txt");

    fn arb_grid(values: std::ops::RangeInclusive<u64>) -> impl Strategy<Value = Grid> {
        (1usize..8, 1usize..8).prop_flat_map(move |(rows, cols)| {
            prop::collection::vec(prop::collection::vec(values.clone(), cols), rows)
                .prop_map(|rows| Grid::new(rows).unwrap())
        })
    }

    #[test]
    fn test_parse_example() {
        let grid: Grid = EXAMPLE.parse().unwrap();
        assert_eq!(grid.rows(), 10);
        assert_eq!(grid.cols(), 10);
        assert_eq!(grid[Cell::ORIGIN], 1);
        assert_eq!(grid[Cell::new(0, 2)], 6);
        assert_eq!(grid[grid.last_cell()], 1);
        assert_eq!(grid.to_string(), EXAMPLE);
    }

    #[test]
    fn test_rejects_malformed_grids() {
        assert_eq!("".parse::<Grid>(), Err(GridError::Empty));
        assert_eq!(
            "123\n45\n".parse::<Grid>(),
            Err(GridError::NotRectangular {
                row: 1,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            "12\n3x\n".parse::<Grid>(),
            Err(GridError::InvalidDigit {
                line: 2,
                column: 2,
                found: 'x'
            })
        );
    }

    #[test]
    fn test_neighbors_are_bounded() {
        let grid: Grid = "123\n456\n789".parse().unwrap();

        let corner = grid.neighbors(Cell::ORIGIN).sorted().collect_vec();
        assert_eq!(corner, vec![Cell::new(0, 1), Cell::new(1, 0)]);

        let edge = grid.neighbors(Cell::new(2, 1)).sorted().collect_vec();
        assert_eq!(edge, vec![Cell::new(1, 1), Cell::new(2, 0), Cell::new(2, 2)]);

        let center = grid.neighbors(Cell::new(1, 1)).count();
        assert_eq!(center, 4);

        assert_eq!(grid.get(Cell::new(3, 0)), None);
        assert_eq!(grid.get(Cell::new(0, 3)), None);
    }

    #[test]
    fn test_wrap_is_not_modulo() {
        assert_eq!(wrap(9), 9);
        assert_eq!(wrap(10), 1);
        assert_eq!(wrap(17), 8);
        assert_eq!(wrap(18), 9);
        assert_eq!(wrap(19), 1);
    }

    #[test]
    fn test_expand_example() {
        let grid: Grid = EXAMPLE.parse().unwrap();
        let expanded = grid.expand(5);

        assert_eq!(expanded.rows(), 50);
        assert_eq!(expanded.cols(), 50);

        let rendered = expanded.to_string();
        let first_row = rendered.lines().next().unwrap();
        assert_eq!(first_row, "11637517422274862853338597396444961841755517295286");

        let last_row = rendered.lines().last().unwrap();
        assert_eq!(last_row, "67554889357866599146897761125791887223681299833479");
    }

    proptest! {
        #[test]
        fn expand_once_is_identity(grid in arb_grid(0..=9)) {
            prop_assert_eq!(grid.expand(1), grid);
        }

        #[test]
        fn expanded_values_stay_in_range(grid in arb_grid(1..=9)) {
            let expanded = grid.expand(5);
            prop_assert_eq!(expanded.rows(), grid.rows() * 5);
            prop_assert_eq!(expanded.cols(), grid.cols() * 5);
            for cell in expanded.cells() {
                prop_assert!((1..=9).contains(&expanded[cell]), "{:?} = {}", cell, expanded[cell]);
            }
        }
    }
}
