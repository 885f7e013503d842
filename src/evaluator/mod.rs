//! Hand evaluators for high, lowball, Badugi and split games.
//!
//! Every evaluator produces an [`Evaluation`] where a **lower** `primary` is better, so
//! [`compare_evaluations`] orders hands of any single kind: larger `size` first, then lower
//! `primary`, then lower `ranks` elementwise.

pub(crate) mod badugi;
pub(crate) mod combinations;
pub(crate) mod hand_analysis;
pub(crate) mod high;
pub(crate) mod low;
pub(crate) mod rank_groups;
pub(crate) mod split;
pub(crate) mod straight_info;
pub(crate) mod suit_info;

pub use badugi::{evaluate_badugi, BadugiMode};
pub use combinations::combinations;
pub use high::evaluate_high;
pub use low::{evaluate_low, LowType};
pub use split::{evaluate_badacey, evaluate_badeucey, evaluate_hi_lo_eight, evaluate_split};

use crate::cards::Card;
use core::cmp::Ordering;
use serde::{Deserialize, Serialize};

/// Five-card category from weakest to strongest (in high poker).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[repr(u8)]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

/// Packed category + five tiebreak values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct HandValue(u64);

impl HandValue {
    /// Exclusive upper bound of any packed value.
    pub(crate) const CEILING: u64 = 1 << 56;

    pub(crate) const fn raw(self) -> u64 {
        self.0
    }

    /// Layout (most significant -> least):
    /// [ category (8 bits) | v0 (6) | v1 (6) | v2 (6) | v3 (6) | v4 (6) | 10 zero bits ]
    pub(crate) fn from_parts(category: Category, values: &[u8; 5]) -> Self {
        const CAT_SHIFT: u32 = 48;
        const STRIDE: u32 = 6;
        let mut v: u64 = (category as u64) << CAT_SHIFT;
        for (i, r) in values.iter().enumerate() {
            let offset = CAT_SHIFT - STRIDE * (i as u32 + 1);
            v |= (*r as u64) << offset;
        }
        HandValue(v)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum EvalKind {
    High,
    Low27,
    LowA5,
    BadugiLow,
    BadugiHigh,
    Split,
}

/// Result of evaluating a card set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Evaluation {
    pub kind: EvalKind,
    /// Five-card category for high/low hands; `None` for Badugi.
    pub category: Option<Category>,
    /// Number of cards that play. Dominates ordering (Badugi 4-card beats any 3-card).
    pub size: usize,
    /// Lower is better.
    pub primary: u64,
    /// Tiebreak values under the evaluator's ace rule, in comparison order.
    pub ranks: Vec<u8>,
    pub active: Vec<Card>,
    pub dead: Vec<Card>,
    /// Low half of a split evaluation.
    pub low: Option<Box<Evaluation>>,
    /// For a low hand with a qualifier, or a split hand's low half: whether it is good enough.
    pub qualifies: bool,
}

impl Evaluation {
    /// The qualifying low half of a split hand, if any.
    pub fn qualifying_low(&self) -> Option<&Evaluation> {
        self.low.as_deref().filter(|l| l.qualifies)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    #[error("not enough cards to evaluate: need {needed}, got {got}")]
    NotEnoughCards { needed: usize, got: usize },
    #[error("no evaluator available for an empty tag chain")]
    NoEvaluator,
}

/// Total order over evaluations of the same kind. `Ordering::Less` means `a` is the better hand.
///
/// ```
/// use badugi_engine::cards::parse_cards;
/// use badugi_engine::evaluator::{compare_evaluations, evaluate_badugi, BadugiMode};
/// use std::cmp::Ordering;
///
/// let four = evaluate_badugi(&parse_cards("2C 4D 6H 8S").unwrap(), BadugiMode::Low).unwrap();
/// let three = evaluate_badugi(&parse_cards("AS 2H 3C").unwrap(), BadugiMode::Low).unwrap();
/// assert_eq!(compare_evaluations(&four, &three), Ordering::Less);
/// ```
pub fn compare_evaluations(a: &Evaluation, b: &Evaluation) -> Ordering {
    b.size
        .cmp(&a.size)
        .then(a.primary.cmp(&b.primary))
        .then_with(|| compare_rank_lists(&a.ranks, &b.ranks))
}

fn compare_rank_lists(a: &[u8], b: &[u8]) -> Ordering {
    let len = a.len().max(b.len());
    for i in 0..len {
        let va = a.get(i).copied().unwrap_or(u8::MAX);
        let vb = b.get(i).copied().unwrap_or(u8::MAX);
        if va != vb {
            return va.cmp(&vb);
        }
    }
    Ordering::Equal
}

/// Cards of `all` not in `used`, in their original order.
pub(crate) fn remaining(all: &[Card], used: &[Card]) -> Vec<Card> {
    all.iter().filter(|c| !used.contains(c)).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(size: usize, primary: u64, ranks: &[u8]) -> Evaluation {
        Evaluation {
            kind: EvalKind::BadugiLow,
            category: None,
            size,
            primary,
            ranks: ranks.to_vec(),
            active: Vec::new(),
            dead: Vec::new(),
            low: None,
            qualifies: true,
        }
    }

    #[test]
    fn size_dominates_primary() {
        let big = eval(4, 999, &[13, 12, 11, 10]);
        let small = eval(3, 1, &[3, 2, 1]);
        assert_eq!(compare_evaluations(&big, &small), Ordering::Less);
        assert_eq!(compare_evaluations(&small, &big), Ordering::Greater);
    }

    #[test]
    fn lower_primary_wins_then_ranks() {
        assert_eq!(compare_evaluations(&eval(4, 5, &[]), &eval(4, 6, &[])), Ordering::Less);
        assert_eq!(compare_evaluations(&eval(4, 5, &[4, 2]), &eval(4, 5, &[4, 3])), Ordering::Less);
        assert_eq!(compare_evaluations(&eval(4, 5, &[4, 2]), &eval(4, 5, &[4, 2])), Ordering::Equal);
    }

    #[test]
    fn missing_rank_entries_compare_worst() {
        assert_eq!(compare_evaluations(&eval(2, 0, &[4, 2]), &eval(2, 0, &[4])), Ordering::Less);
    }

    #[test]
    fn packing_orders_category_before_values() {
        let pair = HandValue::from_parts(Category::Pair, &[2, 4, 3, 1, 0]);
        let high = HandValue::from_parts(Category::HighCard, &[14, 13, 12, 11, 9]);
        assert!(pair > high);
        assert!(pair.raw() < HandValue::CEILING);
    }
}
