use super::combinations::Combinations;
use super::hand_analysis::{AcePolicy, HandAnalysis};
use super::{remaining, Category, EvalError, EvalKind, Evaluation, HandValue};
use crate::cards::Card;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LowType {
    /// Ace always high; straights and flushes count against the hand.
    DeuceSeven,
    /// Ace is low; straights and flushes are ignored.
    AceFive,
}

/// Best five-card low hand from five or more cards.
///
/// `qualifier` (e.g. `Some(8)` for eight-or-better) marks the result as non-qualifying when the
/// best low holds a pair or its highest card exceeds the threshold.
///
/// ```
/// use badugi_engine::cards::parse_cards;
/// use badugi_engine::evaluator::{evaluate_low, LowType};
///
/// let wheel = evaluate_low(&parse_cards("AC 2D 3H 4S 5C").unwrap(), LowType::AceFive, Some(8)).unwrap();
/// assert!(wheel.qualifies);
/// assert_eq!(wheel.ranks, vec![5, 4, 3, 2, 1]);
/// ```
pub fn evaluate_low(
    cards: &[Card],
    low_type: LowType,
    qualifier: Option<u8>,
) -> Result<Evaluation, EvalError> {
    if cards.len() < 5 {
        return Err(EvalError::NotEnoughCards { needed: 5, got: cards.len() });
    }
    let policy = match low_type {
        LowType::DeuceSeven => AcePolicy::HighNoWheel,
        LowType::AceFive => AcePolicy::Low,
    };

    let mut best: Option<(HandValue, Category, [u8; 5], HandAnalysis)> = None;
    for idx in Combinations::new(cards.len(), 5) {
        let hand = [cards[idx[0]], cards[idx[1]], cards[idx[2]], cards[idx[3]], cards[idx[4]]];
        let analysis = HandAnalysis::new(&hand, policy);
        let category = analysis.category();
        // Straights rank by every card in lowball, so use the plain group order
        let tiebreak = analysis.rank_groups.tiebreak();
        let value = HandValue::from_parts(category, &tiebreak);

        if best.as_ref().map_or(true, |(b, _, _, _)| value < *b) {
            best = Some((value, category, tiebreak, analysis));
        }
    }

    let (value, category, tiebreak, analysis) =
        best.ok_or(EvalError::NotEnoughCards { needed: 5, got: cards.len() })?;
    let qualifies = match qualifier {
        Some(limit) => category == Category::HighCard && analysis.values[0] <= limit,
        None => true,
    };
    let active = analysis.sorted_cards.to_vec();
    Ok(Evaluation {
        kind: match low_type {
            LowType::DeuceSeven => EvalKind::Low27,
            LowType::AceFive => EvalKind::LowA5,
        },
        category: Some(category),
        size: 5,
        primary: value.raw(),
        ranks: tiebreak.iter().copied().filter(|&v| v > 0).collect(),
        dead: remaining(cards, &active),
        active,
        low: None,
        qualifies,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use crate::evaluator::compare_evaluations;
    use std::cmp::Ordering;

    fn low(s: &str, t: LowType) -> Evaluation {
        evaluate_low(&parse_cards(s).unwrap(), t, None).unwrap()
    }

    #[test]
    fn seven_five_is_the_nuts_in_deuce_seven() {
        let nuts = low("7C 5D 4H 3S 2C", LowType::DeuceSeven);
        let eight = low("8C 5D 4H 3S 2C", LowType::DeuceSeven);
        assert_eq!(nuts.category, Some(Category::HighCard));
        assert_eq!(compare_evaluations(&nuts, &eight), Ordering::Less);
    }

    #[test]
    fn deuce_seven_penalizes_straights_flushes_and_aces() {
        let straight = low("6C 5D 4H 3S 2C", LowType::DeuceSeven);
        let flush = low("7H 5H 4H 3H 2H", LowType::DeuceSeven);
        let king_high = low("KC 5D 4H 3S 2C", LowType::DeuceSeven);
        let wheel = low("AC 2D 3H 4S 5C", LowType::DeuceSeven);
        assert_eq!(straight.category, Some(Category::Straight));
        assert_eq!(flush.category, Some(Category::Flush));
        assert_eq!(compare_evaluations(&king_high, &straight), Ordering::Less);
        assert_eq!(compare_evaluations(&king_high, &flush), Ordering::Less);
        // A-2-3-4-5 is ace high, not a straight, and loses to king high
        assert_eq!(wheel.category, Some(Category::HighCard));
        assert_eq!(compare_evaluations(&king_high, &wheel), Ordering::Less);
    }

    #[test]
    fn ace_five_ignores_straights_and_flushes() {
        let wheel = low("AC 2D 3H 4S 5C", LowType::AceFive);
        let suited = low("AH 2H 3H 4H 6H", LowType::AceFive);
        assert_eq!(wheel.category, Some(Category::HighCard));
        assert_eq!(suited.category, Some(Category::HighCard));
        assert_eq!(compare_evaluations(&wheel, &suited), Ordering::Less);
    }

    #[test]
    fn pairs_lose_to_any_no_pair_hand() {
        let pair = low("AC AD 2H 3S 4C", LowType::AceFive);
        let queen = low("QC JD 9H 8S 7C", LowType::AceFive);
        assert_eq!(pair.category, Some(Category::Pair));
        assert_eq!(compare_evaluations(&queen, &pair), Ordering::Less);
    }

    #[test]
    fn eight_qualifier() {
        let cards = parse_cards("8C 6D 4H 3S 2C").unwrap();
        assert!(evaluate_low(&cards, LowType::AceFive, Some(8)).unwrap().qualifies);
        let nine = parse_cards("9C 6D 4H 3S 2C").unwrap();
        assert!(!evaluate_low(&nine, LowType::AceFive, Some(8)).unwrap().qualifies);
        let paired = parse_cards("AC AD 2H 3S 4C").unwrap();
        assert!(!evaluate_low(&paired, LowType::AceFive, Some(8)).unwrap().qualifies);
    }

    #[test]
    fn best_low_from_seven_cards() {
        let e = low("KC QD AH 2S 3C 4D 5H", LowType::AceFive);
        assert_eq!(e.ranks, vec![5, 4, 3, 2, 1]);
        assert_eq!(e.dead.len(), 2);
    }

    #[test]
    fn needs_five_cards() {
        let err = evaluate_low(&parse_cards("2C 3D 4H 5S").unwrap(), LowType::DeuceSeven, None);
        assert_eq!(err.unwrap_err(), EvalError::NotEnoughCards { needed: 5, got: 4 });
    }
}
