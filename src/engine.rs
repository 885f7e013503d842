// Engine API boundary. Drivers (the session, bots, test harnesses) talk to a table only
// through this trait, passing a `HandState` in and getting a new one back.

use crate::betting::{self, is_round_complete, Action, ActionType};
use crate::cards::Card;
use crate::config::HandContext;
use crate::deck::Deck;
use crate::draw;
use crate::error::{EngineError, IllegalAction, IllegalReason};
use crate::lifecycle::{self, BlindSchedule, BlindState, NextHand};
use crate::observation::{observe, Observation};
use crate::registry::Variant;
use crate::showdown::{self, ShowdownResult};
use crate::table::{HandState, Street};
use log::{info, warn};

/// Where the hand went after a betting round closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advance {
    pub state: HandState,
    pub street: Street,
    pub draw_round_index: usize,
    pub acting_player_index: Option<usize>,
    /// Set when the round led straight to the showdown; `state` is then already settled.
    pub showdown: Option<ShowdownResult>,
}

pub trait GameEngine {
    fn variant(&self) -> Variant;

    // Hand lifecycle
    fn init_hand(&mut self, ctx: &HandContext) -> Result<HandState, EngineError>;
    fn apply_forced_bets(&self, state: &HandState) -> Result<HandState, EngineError>;

    // Actions
    fn apply_player_action(
        &mut self,
        state: &HandState,
        action: &Action,
    ) -> Result<HandState, EngineError>;
    fn advance_after_bet(&self, state: &HandState) -> Result<Advance, EngineError>;
    fn resolve_showdown(&self, state: &HandState) -> Result<ShowdownResult, EngineError>;

    // Queries
    fn observation(&self, state: &HandState, seat: usize) -> Observation;
}

/// Rules engine for one draw variant, owning the deck.
#[derive(Debug, Clone)]
pub struct DrawEngine {
    variant: Variant,
    max_draws: usize,
    deck: Deck,
}

impl DrawEngine {
    pub fn new(variant: Variant, seed: Option<u64>) -> Self {
        let deck = match seed {
            Some(s) => Deck::new(s),
            None => Deck::unseeded(),
        };
        Self::with_deck(variant, deck)
    }

    /// Engine over a prepared deck. Hands are dealt from it as is, without a reshuffle.
    pub fn with_deck(variant: Variant, deck: Deck) -> Self {
        Self { variant, max_draws: variant.max_draws(), deck }
    }

    /// Limit the number of draws. Values above the variant's own cap are clamped to it.
    pub fn with_max_draws(mut self, max_draws: usize) -> Self {
        self.max_draws = max_draws.min(self.variant.max_draws());
        self
    }

    pub fn max_draws(&self) -> usize {
        self.max_draws
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Replace the deck; the next hand is dealt from it without a reshuffle.
    pub fn set_deck(&mut self, deck: Deck) {
        self.deck = deck;
    }

    /// Shuffle a fresh deck and deal the hand after `prev`.
    pub fn next_hand(
        &mut self,
        prev: &HandState,
        schedule: &BlindSchedule,
        blinds: BlindState,
    ) -> Result<NextHand, EngineError> {
        self.deck.reset();
        let size = self.variant.hand_size();
        let deck = &mut self.deck;
        let mut deal = |_seat: usize| deck.draw(size, &[]);
        let next = lifecycle::build_next_hand(prev, schedule, blinds, &mut deal)?;
        self.check_cards(&next.state)?;
        Ok(next)
    }

    /// Every card is in exactly one place: a hand or the deck's piles.
    pub fn check_cards(&self, state: &HandState) -> Result<(), EngineError> {
        check_cards_with(state, &self.deck)
    }
}

fn check_cards_with(state: &HandState, deck: &Deck) -> Result<(), EngineError> {
    let mut all: Vec<Card> = state.live_cards();
    all.extend(deck.cards_in_play().copied());
    let total = all.len();
    all.sort_unstable();
    all.dedup();
    if total != 52 || all.len() != 52 {
        warn!("card count mismatch: {total} tracked, {} distinct", all.len());
        return Err(EngineError::Invariant(format!(
            "card count mismatch: {total} tracked, {} distinct",
            all.len()
        )));
    }
    Ok(())
}

impl GameEngine for DrawEngine {
    fn variant(&self) -> Variant {
        self.variant
    }

    /// Seat a fresh table and deal. A full deck is dealt as it lies, so a stacked deck set
    /// beforehand is honored; a partly dealt one is reshuffled first. Blinds are not posted.
    fn init_hand(&mut self, ctx: &HandContext) -> Result<HandState, EngineError> {
        if self.deck.cards_in_play().count() != 52 {
            self.deck.reset();
        }
        let mut state = lifecycle::fresh_table(ctx);
        let size = self.variant.hand_size();
        let deck = &mut self.deck;
        let mut deal = |_seat: usize| deck.draw(size, &[]);
        lifecycle::deal_hands(&mut state, &mut deal)?;
        self.check_cards(&state)?;
        info!("{} table seated: {} seats, dealer {}", self.variant, ctx.num_seats, ctx.dealer_index);
        Ok(state)
    }

    fn apply_forced_bets(&self, state: &HandState) -> Result<HandState, EngineError> {
        Ok(betting::apply_forced_bets(state)?)
    }

    fn apply_player_action(
        &mut self,
        state: &HandState,
        action: &Action,
    ) -> Result<HandState, EngineError> {
        if action.kind != ActionType::Draw {
            return betting::apply_betting_action(state, action);
        }
        let (next, deck) = draw::apply_draw(state, action, self.variant, &self.deck)?;
        check_cards_with(&next, &deck)?;
        self.deck = deck;
        Ok(next)
    }

    /// Close a finished betting round: settle bets into pots, then either open the next draw
    /// or, after the last draw or once one seat is left, resolve the showdown.
    fn advance_after_bet(&self, state: &HandState) -> Result<Advance, EngineError> {
        let illegal = |reason| IllegalAction::new(None, None, reason);
        if state.hand_over {
            return Err(illegal(IllegalReason::HandOver).into());
        }
        if state.street != Street::Bet {
            return Err(illegal(IllegalReason::WrongStreet { street: state.street }).into());
        }
        if !is_round_complete(state) {
            return Err(illegal(IllegalReason::RoundIncomplete).into());
        }

        let settled = showdown::settle_street(state);
        let last_round = settled.draw_round_index >= self.max_draws;
        if last_round || settled.contenders().len() <= 1 {
            let result = self.resolve_showdown(&settled)?;
            return Ok(Advance {
                street: Street::Showdown,
                draw_round_index: result.state.draw_round_index,
                acting_player_index: None,
                state: result.state.clone(),
                showdown: Some(result),
            });
        }

        let next = draw::begin_draw_round(&settled);
        Ok(Advance {
            street: next.street,
            draw_round_index: next.draw_round_index,
            acting_player_index: next.acting_player_index,
            state: next,
            showdown: None,
        })
    }

    fn resolve_showdown(&self, state: &HandState) -> Result<ShowdownResult, EngineError> {
        let result = showdown::resolve_showdown(state, self.variant)?;
        info!("hand {} settled: {} chips awarded", result.state.hand_number, result.total_pot);
        Ok(result)
    }

    fn observation(&self, state: &HandState, seat: usize) -> Observation {
        observe(state, seat)
    }
}
