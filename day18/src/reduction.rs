//! Reduction rules for snailfish numbers.
//!
//! A number is reduced by repeatedly applying the first rule that matches,
//! then starting over from the top:
//!
//! 1. the leftmost pair nested inside more than [`EXPLODE_DEPTH`] pairs whose
//!    children are both regular numbers explodes;
//! 2. otherwise the leftmost regular number above [`SPLIT_THRESHOLD`] splits.
//!
//! Once neither rule matches the number is reduced.

use std::ops::Add;

use itertools::Itertools;

use crate::snailfish::SnailfishNumber;

/// Pairs nested deeper than this explode. The outermost pair is at depth 1.
pub const EXPLODE_DEPTH: usize = 4;

/// Regular numbers above this split.
pub const SPLIT_THRESHOLD: u64 = 9;

/// What a single reduction step did.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    NotTaken,
    Exploded,
    Split,
}

/// Values thrown out of an exploding pair. `position` is the reading-order
/// index of the pair's left value, which is also where the replacement `0` ends up.
#[derive(Debug, Clone, Copy)]
struct Shrapnel {
    position: usize,
    left: u64,
    right: u64,
}

impl SnailfishNumber {
    /// Applies at most one explode or split.
    pub fn reduce_step(&mut self) -> Action {
        if self.explode_leftmost() {
            Action::Exploded
        } else if self.split_leftmost() {
            Action::Split
        } else {
            Action::NotTaken
        }
    }

    /// Reduces in place and returns how many steps it took.
    pub fn reduce(&mut self) -> usize {
        let mut steps = 0;
        loop {
            let action = self.reduce_step();
            if action == Action::NotTaken {
                break;
            }

            steps += 1;
            tracing::trace!(?action, number = %self, "reduction step");
        }

        tracing::debug!(steps, "reduced");
        steps
    }

    pub fn reduced(mut self) -> Self {
        self.reduce();
        self
    }

    pub fn is_reduced(&self) -> bool {
        !self.can_explode(1) && !self.can_split()
    }

    fn can_explode(&self, depth: usize) -> bool {
        match self {
            SnailfishNumber::Regular(_) => false,
            SnailfishNumber::Pair(pair) => {
                (depth > EXPLODE_DEPTH && is_regular_pair(pair))
                    || pair.0.can_explode(depth + 1)
                    || pair.1.can_explode(depth + 1)
            }
        }
    }

    fn can_split(&self) -> bool {
        match self {
            SnailfishNumber::Regular(value) => *value > SPLIT_THRESHOLD,
            SnailfishNumber::Pair(pair) => pair.0.can_split() || pair.1.can_split(),
        }
    }

    fn explode_leftmost(&mut self) -> bool {
        let mut regulars_seen = 0;
        let Some(shrapnel) = self.detonate(1, &mut regulars_seen) else {
            return false;
        };

        let mut regulars = self.regulars_mut();
        if let Some(previous) = shrapnel.position.checked_sub(1) {
            *regulars[previous] += shrapnel.left;
        }
        if let Some(next) = regulars.get_mut(shrapnel.position + 1) {
            **next += shrapnel.right;
        }

        true
    }

    /// Replaces the leftmost explodable pair with `0`, stopping as soon as one is found.
    /// `regulars_seen` counts the regular numbers passed on the way there.
    fn detonate(&mut self, depth: usize, regulars_seen: &mut usize) -> Option<Shrapnel> {
        match self {
            SnailfishNumber::Regular(_) => {
                *regulars_seen += 1;
                None
            }
            SnailfishNumber::Pair(pair) => {
                if depth > EXPLODE_DEPTH {
                    if let (SnailfishNumber::Regular(left), SnailfishNumber::Regular(right)) =
                        &**pair
                    {
                        // BOOM!
                        let shrapnel = Shrapnel {
                            position: *regulars_seen,
                            left: *left,
                            right: *right,
                        };
                        *self = SnailfishNumber::Regular(0);
                        return Some(shrapnel);
                    }
                }

                let (left, right) = &mut **pair;
                if let Some(shrapnel) = left.detonate(depth + 1, regulars_seen) {
                    return Some(shrapnel);
                }
                right.detonate(depth + 1, regulars_seen)
            }
        }
    }

    fn split_leftmost(&mut self) -> bool {
        match self {
            SnailfishNumber::Regular(value) => {
                if *value > SPLIT_THRESHOLD {
                    let value = *value;
                    *self = SnailfishNumber::pair(
                        SnailfishNumber::Regular(value / 2),
                        SnailfishNumber::Regular(value - value / 2),
                    );
                    true
                } else {
                    false
                }
            }
            SnailfishNumber::Pair(pair) => pair.0.split_leftmost() || pair.1.split_leftmost(),
        }
    }
}

fn is_regular_pair(pair: &(SnailfishNumber, SnailfishNumber)) -> bool {
    matches!(
        pair,
        (SnailfishNumber::Regular(_), SnailfishNumber::Regular(_))
    )
}

/// Snailfish addition: pair the operands up, then reduce.
impl Add for SnailfishNumber {
    type Output = SnailfishNumber;

    fn add(self, rhs: Self) -> Self::Output {
        SnailfishNumber::pair(self, rhs).reduced()
    }
}

/// Adds up all the numbers in order. `None` if there are none.
pub fn final_sum<I>(numbers: I) -> Option<SnailfishNumber>
where
    I: IntoIterator<Item = SnailfishNumber>,
{
    numbers.into_iter().reduce(|acc, number| acc + number)
}

/// Largest magnitude of `a + b` over distinct `a` and `b`, trying both orders
/// of every pair since addition does not commute. `None` with fewer than two numbers.
pub fn largest_pairwise_magnitude(numbers: &[SnailfishNumber]) -> Option<u64> {
    numbers
        .iter()
        .permutations(2)
        .map(|pair| (pair[0].clone() + pair[1].clone()).magnitude())
        .max()
}
