use std::{fmt::Display, str::FromStr};

use nom::{
    branch::alt,
    character::complete::{char, digit1},
    combinator::{map, map_res},
    sequence::{delimited, separated_pair},
    IResult,
};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SnailfishNumber {
    Regular(u64),
    Pair(Box<(SnailfishNumber, SnailfishNumber)>),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("malformed snailfish number {input:?}, stopped at {remaining:?}")]
    Malformed { input: String, remaining: String },

    #[error("unexpected {remaining:?} after the snailfish number")]
    TrailingInput { remaining: String },
}

fn snailfish_number(input: &str) -> IResult<&str, SnailfishNumber> {
    alt((regular_number, pair_number))(input)
}

fn regular_number(input: &str) -> IResult<&str, SnailfishNumber> {
    map(
        map_res(digit1, |digits: &str| digits.parse::<u64>()),
        SnailfishNumber::Regular,
    )(input)
}

fn pair_number(input: &str) -> IResult<&str, SnailfishNumber> {
    map(
        delimited(
            char('['),
            separated_pair(snailfish_number, char(','), snailfish_number),
            char(']'),
        ),
        |pair| SnailfishNumber::Pair(Box::new(pair)),
    )(input)
}

impl FromStr for SnailfishNumber {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        match snailfish_number(input) {
            Ok(("", parsed)) => Ok(parsed),
            Ok((remainder, _)) => Err(ParseError::TrailingInput {
                remaining: remainder.to_string(),
            }),
            Err(nom::Err::Error(e) | nom::Err::Failure(e)) => Err(ParseError::Malformed {
                input: input.to_string(),
                remaining: e.input.to_string(),
            }),
            Err(nom::Err::Incomplete(_)) => Err(ParseError::Malformed {
                input: input.to_string(),
                remaining: String::new(),
            }),
        }
    }
}

impl Display for SnailfishNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnailfishNumber::Regular(value) => value.fmt(f),
            SnailfishNumber::Pair(pair) => {
                write!(f, "[{},{}]", pair.0, pair.1)
            }
        }
    }
}

impl SnailfishNumber {
    /// Joins two numbers into a pair as-is, without reducing the result.
    pub fn pair(left: SnailfishNumber, right: SnailfishNumber) -> Self {
        SnailfishNumber::Pair(Box::new((left, right)))
    }

    /// Magnitude of a reduced number. Unreduced numbers can nest deep enough to
    /// overflow; use [`SnailfishNumber::checked_magnitude`] for those.
    pub fn magnitude(&self) -> u64 {
        match self {
            SnailfishNumber::Regular(value) => *value,
            SnailfishNumber::Pair(pair) => 3 * pair.0.magnitude() + 2 * pair.1.magnitude(),
        }
    }

    /// Magnitude, or `None` if it does not fit in a `u64`.
    pub fn checked_magnitude(&self) -> Option<u64> {
        match self {
            SnailfishNumber::Regular(value) => Some(*value),
            SnailfishNumber::Pair(pair) => {
                let left = pair.0.checked_magnitude()?.checked_mul(3)?;
                let right = pair.1.checked_magnitude()?.checked_mul(2)?;
                left.checked_add(right)
            }
        }
    }

    /// Mutable handles to every regular number, in left-to-right reading order.
    pub fn regulars_mut(&mut self) -> Vec<&mut u64> {
        let mut regulars = Vec::new();
        self.collect_regulars(&mut regulars);
        regulars
    }

    fn collect_regulars<'a>(&'a mut self, regulars: &mut Vec<&'a mut u64>) {
        match self {
            SnailfishNumber::Regular(value) => regulars.push(value),
            SnailfishNumber::Pair(pair) => {
                let (left, right) = &mut **pair;
                left.collect_regulars(regulars);
                right.collect_regulars(regulars);
            }
        }
    }
}
