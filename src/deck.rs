use crate::cards::Card;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    /// Not enough cards even after recycling the discard and burn piles.
    #[error("deck exhausted: requested {requested}, only {available} available after recycling")]
    Exhausted { requested: usize, available: usize },
}

/// A 52-card deck with discard and burn piles. The top of the deck is the end of `live`.
#[derive(Debug, Clone)]
pub struct Deck {
    live: Vec<Card>,
    discard: Vec<Card>,
    burn: Vec<Card>,
    rng: ChaCha8Rng,
}

impl Deck {
    /// Fresh shuffled deck. The same seed always yields the same deal order.
    ///
    /// ```
    /// use badugi_engine::deck::Deck;
    ///
    /// let deck = Deck::new(7);
    /// assert_eq!(deck.len(), 52);
    /// ```
    pub fn new(seed: u64) -> Self {
        let mut deck = Self {
            live: Vec::with_capacity(52),
            discard: Vec::new(),
            burn: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        };
        deck.reset();
        deck
    }

    /// Deck seeded from the thread RNG.
    pub fn unseeded() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    /// Deck in a fixed order; the last card is dealt first. Used to stack hands in tests.
    pub fn from_cards(cards: Vec<Card>, seed: u64) -> Self {
        Self { live: cards, discard: Vec::new(), burn: Vec::new(), rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Full deck whose first cards dealt are `top`, in order; the rest follow shuffled.
    ///
    /// ```
    /// use badugi_engine::cards::parse_cards;
    /// use badugi_engine::deck::Deck;
    ///
    /// let top = parse_cards("AS 2D").unwrap();
    /// let mut deck = Deck::stacked(&top, 1);
    /// assert_eq!(deck.draw(2, &[]).unwrap(), top);
    /// assert_eq!(deck.len(), 50);
    /// ```
    pub fn stacked(top: &[Card], seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut live: Vec<Card> = Card::all().into_iter().filter(|c| !top.contains(c)).collect();
        live.shuffle(&mut rng);
        live.extend(top.iter().rev());
        Self { live, discard: Vec::new(), burn: Vec::new(), rng }
    }

    /// Rebuild all 52 cards, clear discard and burn, and reshuffle.
    pub fn reset(&mut self) {
        self.live = Card::all();
        self.discard.clear();
        self.burn.clear();
        self.live.shuffle(&mut self.rng);
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn discard_len(&self) -> usize {
        self.discard.len()
    }

    pub fn burn_len(&self) -> usize {
        self.burn.len()
    }

    /// Every card the deck still tracks: live, then discard, then burn.
    pub fn cards_in_play(&self) -> impl Iterator<Item = &Card> + '_ {
        self.live.iter().chain(self.discard.iter()).chain(self.burn.iter())
    }

    /// Draw `n` cards from the top. On shortage the discard and burn piles, minus any card in
    /// `active`, are shuffled back in first. Fails without touching the deck if still short.
    pub fn draw(&mut self, n: usize, active: &[Card]) -> Result<Vec<Card>, DeckError> {
        if self.live.len() < n {
            let recyclable = self
                .discard
                .iter()
                .chain(self.burn.iter())
                .filter(|c| !active.contains(c))
                .count();
            let available = self.live.len() + recyclable;
            if available < n {
                return Err(DeckError::Exhausted { requested: n, available });
            }
            self.recycle(active);
        }
        let split = self.live.len() - n;
        let mut drawn = self.live.split_off(split);
        drawn.reverse();
        Ok(drawn)
    }

    fn recycle(&mut self, active: &[Card]) {
        let (mut returned, held): (Vec<Card>, Vec<Card>) =
            self.discard.drain(..).chain(self.burn.drain(..)).partition(|c| !active.contains(c));
        // a live-hand card must never re-enter the deck
        self.discard = held;
        log::debug!("recycling {} cards into the deck", returned.len());
        returned.shuffle(&mut self.rng);
        // recycled cards go underneath what is left of the live pile
        returned.append(&mut self.live);
        self.live = returned;
    }

    pub fn discard(&mut self, cards: &[Card]) {
        self.discard.extend_from_slice(cards);
    }

    /// Move up to `n` cards from the top to the burn pile.
    pub fn burn(&mut self, n: usize) {
        let keep = self.live.len().saturating_sub(n);
        let burned = self.live.split_off(keep);
        self.burn.extend(burned);
    }
}
