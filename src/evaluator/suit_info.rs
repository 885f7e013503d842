use crate::cards::Card;

/// Suit properties of a card set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuitInfo {
    pub is_flush: bool,
}

impl SuitInfo {
    /// A flush needs at least five cards, all of one suit.
    pub fn detect(cards: &[Card]) -> Self {
        let is_flush = match cards.first() {
            Some(first) => cards.len() >= 5 && cards.iter().all(|c| c.suit() == first.suit()),
            None => false,
        };
        SuitInfo { is_flush }
    }
}
