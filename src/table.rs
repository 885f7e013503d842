//! Hand state: seats, pots and street bookkeeping. All of it is plain data; transitions in
//! `betting`, `draw` and `showdown` take a `&HandState` and return a new one.

use crate::cards::Card;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Street {
    Bet,
    Draw,
    Showdown,
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Street::Bet => "BET",
            Street::Draw => "DRAW",
            Street::Showdown => "SHOWDOWN",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub id: String,
    pub seat_index: usize,
    pub stack: u64,
    pub bet_this_round: u64,
    pub total_invested: u64,
    pub hand: Vec<Card>,
    pub folded: bool,
    pub all_in: bool,
    pub seat_out: bool,
    pub busted: bool,
    pub has_drawn: bool,
    pub has_acted_this_round: bool,
    pub last_action: Option<String>,
    pub last_draw_count: usize,
    pub shown: bool,
}

impl Seat {
    pub fn new(seat_index: usize, stack: u64) -> Self {
        Self {
            id: format!("P{}", seat_index + 1),
            seat_index,
            stack,
            bet_this_round: 0,
            total_invested: 0,
            hand: Vec::new(),
            folded: false,
            all_in: false,
            seat_out: false,
            busted: false,
            has_drawn: false,
            has_acted_this_round: false,
            last_action: None,
            last_draw_count: 0,
            shown: false,
        }
    }

    /// Can still bet: not folded, not sitting out, not all-in.
    pub fn is_alive(&self) -> bool {
        !self.folded && !self.seat_out && !self.all_in
    }

    /// Still has a claim on the pot (all-in seats included).
    pub fn is_contender(&self) -> bool {
        !self.folded && !self.seat_out
    }

    /// Takes part in the deal: seated and not busted.
    pub fn is_dealt_in(&self) -> bool {
        !self.seat_out && !self.busted
    }

    /// Move up to `amount` from stack into the current bet. Returns what was paid.
    pub(crate) fn pay(&mut self, amount: u64) -> u64 {
        let paid = self.stack.min(amount);
        self.stack -= paid;
        self.bet_this_round += paid;
        self.total_invested += paid;
        if self.stack == 0 && paid > 0 {
            self.all_in = true;
            self.has_acted_this_round = true;
        }
        paid
    }
}

/// A pot and the seats that can win it, ascending by seat index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pot {
    pub amount: u64,
    pub eligible: Vec<usize>,
}

impl Pot {
    pub fn new(amount: u64, mut eligible: Vec<usize>) -> Self {
        eligible.sort_unstable();
        eligible.dedup();
        Self { amount, eligible }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetMetadata {
    /// Highest `bet_this_round` on the table.
    pub current_bet: u64,
    /// Seat that set the current bet.
    pub bet_head: Option<usize>,
    /// Sum of `bet_this_round` across seats.
    pub total_committed: u64,
    pub forced_bets_posted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandState {
    pub players: Vec<Seat>,
    pub dealer_index: usize,
    pub small_blind: u64,
    pub big_blind: u64,
    pub ante: u64,
    pub street: Street,
    pub draw_round_index: usize,
    pub acting_player_index: Option<usize>,
    pub last_aggressor_index: Option<usize>,
    pub pots: Vec<Pot>,
    pub metadata: BetMetadata,
    pub hand_number: u64,
    /// Set once the showdown has paid out.
    pub hand_over: bool,
}

impl HandState {
    /// Empty table at the first betting street; no cards dealt, no blinds posted.
    pub fn new(stacks: &[u64], dealer_index: usize, small_blind: u64, big_blind: u64, ante: u64) -> Self {
        let players = stacks.iter().enumerate().map(|(i, &s)| Seat::new(i, s)).collect();
        Self {
            players,
            dealer_index,
            small_blind,
            big_blind,
            ante,
            street: Street::Bet,
            draw_round_index: 0,
            acting_player_index: None,
            last_aggressor_index: None,
            pots: Vec::new(),
            metadata: BetMetadata::default(),
            hand_number: 0,
            hand_over: false,
        }
    }

    pub fn num_seats(&self) -> usize {
        self.players.len()
    }

    pub fn seat(&self, index: usize) -> Option<&Seat> {
        self.players.get(index)
    }

    pub fn max_bet(&self) -> u64 {
        self.players.iter().map(|p| p.bet_this_round).max().unwrap_or(0)
    }

    pub fn to_call(&self, seat: usize) -> u64 {
        self.players
            .get(seat)
            .map(|p| self.max_bet().saturating_sub(p.bet_this_round))
            .unwrap_or(0)
    }

    /// Chips in pots plus outstanding bets.
    pub fn pot_total(&self) -> u64 {
        self.pots.iter().map(|p| p.amount).sum::<u64>()
            + self.players.iter().map(|p| p.bet_this_round).sum::<u64>()
    }

    /// Stacks plus everything committed; constant within a hand.
    pub fn chips_in_play(&self) -> u64 {
        self.players.iter().map(|p| p.stack).sum::<u64>() + self.pot_total()
    }

    pub fn contenders(&self) -> Vec<usize> {
        self.players.iter().filter(|p| p.is_contender()).map(|p| p.seat_index).collect()
    }

    pub fn alive_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_alive()).count()
    }

    /// Every card currently held in a hand.
    pub fn live_cards(&self) -> Vec<Card> {
        self.players.iter().flat_map(|p| p.hand.iter().copied()).collect()
    }

    /// First seat at or after `start` (clockwise) matching `pred`.
    pub fn first_seat_from(&self, start: usize, pred: impl Fn(&Seat) -> bool) -> Option<usize> {
        let n = self.players.len();
        if n == 0 {
            return None;
        }
        (0..n).map(|step| (start + step) % n).find(|&i| pred(&self.players[i]))
    }

    /// First seat strictly after `from` (clockwise) matching `pred`; `from` itself is checked last.
    pub fn next_seat_after(&self, from: usize, pred: impl Fn(&Seat) -> bool) -> Option<usize> {
        self.first_seat_from(from + 1, pred)
    }

    pub(crate) fn refresh_metadata(&mut self) {
        self.metadata.current_bet = self.max_bet();
        self.metadata.total_committed = self.players.iter().map(|p| p.bet_this_round).sum();
    }
}
