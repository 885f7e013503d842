use super::combinations::Combinations;
use super::hand_analysis::{AcePolicy, HandAnalysis};
use super::{remaining, EvalError, EvalKind, Evaluation, HandValue};
use crate::cards::Card;

/// Best five-card high hand from five or more cards.
///
/// `primary` is the packed value inverted against [`HandValue::CEILING`] so that, as for every
/// other evaluator, lower is better.
pub fn evaluate_high(cards: &[Card]) -> Result<Evaluation, EvalError> {
    if cards.len() < 5 {
        return Err(EvalError::NotEnoughCards { needed: 5, got: cards.len() });
    }

    let mut best: Option<(HandValue, [u8; 5], HandAnalysis)> = None;
    for idx in Combinations::new(cards.len(), 5) {
        let hand = [cards[idx[0]], cards[idx[1]], cards[idx[2]], cards[idx[3]], cards[idx[4]]];
        let analysis = HandAnalysis::new(&hand, AcePolicy::High);
        let category = analysis.category();
        let tiebreak = analysis.tiebreak(category);
        let value = HandValue::from_parts(category, &tiebreak);

        if best.as_ref().map_or(true, |(b, _, _)| value > *b) {
            best = Some((value, tiebreak, analysis));
        }
    }

    let (value, tiebreak, analysis) =
        best.ok_or(EvalError::NotEnoughCards { needed: 5, got: cards.len() })?;
    let active = analysis.sorted_cards.to_vec();
    Ok(Evaluation {
        kind: EvalKind::High,
        category: Some(analysis.category()),
        size: 5,
        primary: HandValue::CEILING - value.raw(),
        ranks: tiebreak.iter().copied().filter(|&v| v > 0).collect(),
        dead: remaining(cards, &active),
        active,
        low: None,
        qualifies: true,
    })
}
