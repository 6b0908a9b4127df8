use reduction::{final_sum, largest_pairwise_magnitude};
use snailfish::{ParseError, SnailfishNumber};
use thiserror::Error;

pub mod reduction;
pub mod snailfish;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid snailfish number on line {line}")]
pub struct HomeworkError {
    pub line: usize,
    pub source: ParseError,
}

/// One snailfish number per non-blank line.
pub fn parse_homework(content: &str) -> Result<Vec<SnailfishNumber>, HomeworkError> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            line.parse::<SnailfishNumber>().map_err(|source| HomeworkError {
                line: index + 1,
                source,
            })
        })
        .collect()
}

pub fn solve_part1(numbers: &[SnailfishNumber]) -> Option<u64> {
    final_sum(numbers.iter().cloned()).map(|sum| sum.magnitude())
}

pub fn solve_part2(numbers: &[SnailfishNumber]) -> Option<u64> {
    largest_pairwise_magnitude(numbers)
}

#[cfg(test)]
mod tests {
    use crate::snailfish::ParseError;

    use super::{parse_homework, solve_part1, solve_part2, HomeworkError};

    const EXAMPLE: &str = include_str!("../example.txt");

    #[test]
    fn test_example() {
        let numbers = parse_homework(EXAMPLE).unwrap();
        assert_eq!(numbers.len(), 10);
        assert_eq!(solve_part1(&numbers), Some(4140));
        assert_eq!(solve_part2(&numbers), Some(3993));
    }

    #[test]
    fn test_reports_bad_line() {
        let error = parse_homework("[1,2]\n\n[3,4]]\n").unwrap_err();
        assert_eq!(
            error,
            HomeworkError {
                line: 3,
                source: ParseError::TrailingInput {
                    remaining: "]".to_string()
                }
            }
        );
    }
}
