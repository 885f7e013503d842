use super::badugi::{evaluate_badugi, BadugiMode};
use super::high::evaluate_high;
use super::low::{evaluate_low, LowType};
use super::{EvalError, EvalKind, Evaluation};
use crate::cards::Card;

/// Pair a high-side evaluation with a low side. The result orders like `high` and carries the
/// low half in `low`; `qualifies` mirrors the low half.
pub fn evaluate_split(high: Evaluation, low: Evaluation) -> Evaluation {
    let qualifies = low.qualifies;
    Evaluation { kind: EvalKind::Split, low: Some(Box::new(low)), qualifies, ..high }
}

/// Badugi / 2-7 split (Badeucey). Needs five cards for the low half.
pub fn evaluate_badeucey(cards: &[Card]) -> Result<Evaluation, EvalError> {
    let badugi = evaluate_badugi(cards, BadugiMode::Low)?;
    let low = evaluate_low(cards, LowType::DeuceSeven, None)?;
    Ok(evaluate_split(badugi, low))
}

/// Badugi / A-5 split (Badacey).
pub fn evaluate_badacey(cards: &[Card]) -> Result<Evaluation, EvalError> {
    let badugi = evaluate_badugi(cards, BadugiMode::Low)?;
    let low = evaluate_low(cards, LowType::AceFive, None)?;
    Ok(evaluate_split(badugi, low))
}

/// High / A-5 eight-or-better.
pub fn evaluate_hi_lo_eight(cards: &[Card]) -> Result<Evaluation, EvalError> {
    let high = evaluate_high(cards)?;
    let low = evaluate_low(cards, LowType::AceFive, Some(8))?;
    Ok(evaluate_split(high, low))
}
