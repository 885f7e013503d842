use super::combinations::Combinations;
use super::{EvalError, EvalKind, Evaluation};
use crate::cards::Card;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BadugiMode {
    /// Standard Badugi: lowest hand wins.
    #[default]
    Low,
    /// Reverse Badugi: highest hand wins (still ace low).
    High,
}

/// Largest all-distinct (rank and suit) subset of up to four cards, Ace counting as 1.
///
/// Among subsets of the same size, `Low` keeps the one with the lowest descending rank
/// sequence and `High` the highest. Cards outside the subset are returned as `dead`.
///
/// ```
/// use badugi_engine::cards::parse_cards;
/// use badugi_engine::evaluator::{evaluate_badugi, BadugiMode};
///
/// let e = evaluate_badugi(&parse_cards("AS 2D 3D 4H").unwrap(), BadugiMode::Low).unwrap();
/// assert_eq!(e.active, parse_cards("AS 2D 4H").unwrap());
/// assert_eq!(e.dead, parse_cards("3D").unwrap());
/// ```
pub fn evaluate_badugi(cards: &[Card], mode: BadugiMode) -> Result<Evaluation, EvalError> {
    if cards.is_empty() {
        return Err(EvalError::NotEnoughCards { needed: 1, got: 0 });
    }

    let max_size = cards.len().min(4);
    for size in (1..=max_size).rev() {
        let mut best: Option<(Vec<u8>, Vec<usize>)> = None;
        for idx in Combinations::new(cards.len(), size) {
            let Some(values) = distinct_values(cards, &idx) else { continue };
            let better = match (&best, mode) {
                (None, _) => true,
                (Some((b, _)), BadugiMode::Low) => values < *b,
                (Some((b, _)), BadugiMode::High) => values > *b,
            };
            if better {
                best = Some((values, idx));
            }
        }

        if let Some((values, idx)) = best {
            let active: Vec<Card> = idx.iter().map(|&i| cards[i]).collect();
            let dead: Vec<Card> = (0..cards.len())
                .filter(|i| !idx.contains(i))
                .map(|i| cards[i])
                .collect();
            let key = pack(&values);
            return Ok(Evaluation {
                kind: match mode {
                    BadugiMode::Low => EvalKind::BadugiLow,
                    BadugiMode::High => EvalKind::BadugiHigh,
                },
                category: None,
                size,
                primary: match mode {
                    BadugiMode::Low => key,
                    BadugiMode::High => MAX_KEY - key,
                },
                ranks: match mode {
                    BadugiMode::Low => values,
                    BadugiMode::High => values.iter().map(|v| 14 - v).collect(),
                },
                active,
                dead,
                low: None,
                qualifies: true,
            });
        }
    }

    // Any single card is a one-card Badugi, so the loop always returns.
    Err(EvalError::NotEnoughCards { needed: 1, got: cards.len() })
}

const MAX_KEY: u64 = 0xFFFF;

/// Descending ace-low values, or `None` when a rank or suit repeats.
fn distinct_values(cards: &[Card], idx: &[usize]) -> Option<Vec<u8>> {
    let mut ranks_seen = 0u16;
    let mut suits_seen = 0u8;
    let mut values = Vec::with_capacity(idx.len());
    for &i in idx {
        let card = cards[i];
        let rank_bit = 1u16 << card.rank().low_value();
        let suit_bit = 1u8 << (card.suit() as u8);
        if ranks_seen & rank_bit != 0 || suits_seen & suit_bit != 0 {
            return None;
        }
        ranks_seen |= rank_bit;
        suits_seen |= suit_bit;
        values.push(card.rank().low_value());
    }
    values.sort_unstable_by(|a, b| b.cmp(a));
    Some(values)
}

/// Four 4-bit digits, most significant first. Only compared between equal sizes.
fn pack(values: &[u8]) -> u64 {
    (0..4).fold(0u64, |acc, i| (acc << 4) | values.get(i).copied().unwrap_or(0) as u64)
}
