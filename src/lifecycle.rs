//! Hand-to-hand progression: blind levels, dealer rotation, busting out and dealing.

use crate::betting::{apply_forced_bets, is_round_complete};
use crate::cards::Card;
use crate::config::{ConfigError, HandContext};
use crate::deck::DeckError;
use crate::error::{EngineError, IllegalAction, IllegalReason};
use crate::table::{HandState, Seat};
use log::info;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlindLevel {
    pub small_blind: u64,
    pub big_blind: u64,
    #[serde(default)]
    pub ante: u64,
    /// Hands played at this level before moving up; `None` holds the level forever.
    #[serde(default)]
    pub hands: Option<u32>,
}

/// Non-empty list of blind levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<BlindLevel>", into = "Vec<BlindLevel>")]
pub struct BlindSchedule {
    levels: Vec<BlindLevel>,
}

impl BlindSchedule {
    pub fn new(levels: Vec<BlindLevel>) -> Result<Self, ConfigError> {
        if levels.is_empty() {
            return Err(ConfigError::Invalid("blind schedule is empty".into()));
        }
        for (i, l) in levels.iter().enumerate() {
            if l.big_blind == 0 {
                return Err(ConfigError::Invalid(format!("level {i}: big blind must be positive")));
            }
            if l.small_blind > l.big_blind {
                return Err(ConfigError::Invalid(format!(
                    "level {i}: small blind {} exceeds big blind {}",
                    l.small_blind, l.big_blind
                )));
            }
            if l.hands == Some(0) {
                return Err(ConfigError::Invalid(format!("level {i}: hands must be positive")));
            }
        }
        Ok(Self { levels })
    }

    /// Level at `index`, or the last level past the end.
    pub fn level(&self, index: usize) -> BlindLevel {
        let last = self.levels.len() - 1;
        self.levels[index.min(last)]
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn levels(&self) -> &[BlindLevel] {
        &self.levels
    }
}

impl TryFrom<Vec<BlindLevel>> for BlindSchedule {
    type Error = ConfigError;
    fn try_from(levels: Vec<BlindLevel>) -> Result<Self, Self::Error> {
        Self::new(levels)
    }
}

impl From<BlindSchedule> for Vec<BlindLevel> {
    fn from(s: BlindSchedule) -> Self {
        s.levels
    }
}

/// Position in a blind schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlindState {
    pub level_index: usize,
    /// Hands played at the current level, counting the one in progress.
    pub hands_in_level: u32,
}

/// Blind position for the next hand.
///
/// A fresh start begins level 0 with one hand played. Otherwise the hand count grows and the
/// level moves up once it passes that level's allowance; the last level never ends.
///
/// ```
/// use badugi_engine::lifecycle::{compute_next_blind_level, BlindLevel, BlindSchedule, BlindState};
///
/// let schedule = BlindSchedule::new(vec![
///     BlindLevel { small_blind: 5, big_blind: 10, ante: 0, hands: Some(2) },
///     BlindLevel { small_blind: 10, big_blind: 20, ante: 0, hands: None },
/// ]).unwrap();
/// let first = compute_next_blind_level(None, &schedule);
/// let second = compute_next_blind_level(Some(first), &schedule);
/// let third = compute_next_blind_level(Some(second), &schedule);
/// assert_eq!(second, BlindState { level_index: 0, hands_in_level: 2 });
/// assert_eq!(third, BlindState { level_index: 1, hands_in_level: 1 });
/// ```
pub fn compute_next_blind_level(
    previous: Option<BlindState>,
    schedule: &BlindSchedule,
) -> BlindState {
    let Some(prev) = previous else {
        return BlindState { level_index: 0, hands_in_level: 1 };
    };
    let hands = prev.hands_in_level + 1;
    let is_last = prev.level_index + 1 >= schedule.len();
    match schedule.level(prev.level_index).hands {
        Some(cap) if hands > cap && !is_last => {
            BlindState { level_index: prev.level_index + 1, hands_in_level: 1 }
        }
        _ => BlindState { level_index: prev.level_index, hands_in_level: hands },
    }
}

fn in_game(p: &Seat) -> bool {
    p.is_dealt_in() && p.stack > 0
}

/// Next seat after `current` that is seated and still has chips.
pub fn next_dealer(players: &[Seat], current: usize) -> usize {
    let n = players.len();
    (1..=n).map(|step| (current + step) % n).find(|&i| in_game(&players[i])).unwrap_or(current)
}

/// Seats for a new table, nothing dealt or posted.
pub fn fresh_table(ctx: &HandContext) -> HandState {
    let stacks = vec![ctx.starting_stack; ctx.num_seats];
    HandState::new(&stacks, ctx.dealer_index, ctx.small_blind, ctx.big_blind, ctx.ante)
}

/// Give every seat still in the game a hand from `deal`. Seats without chips sit out.
pub fn deal_hands(
    state: &mut HandState,
    deal: &mut dyn FnMut(usize) -> Result<Vec<Card>, DeckError>,
) -> Result<(), DeckError> {
    for p in &mut state.players {
        if p.stack == 0 {
            p.seat_out = true;
            p.busted = true;
            p.folded = true;
        }
        p.hand = if p.is_dealt_in() { deal(p.seat_index)? } else { Vec::new() };
    }
    Ok(())
}

/// Opening actor once blinds are in: the first seat able to act at or after three left of the
/// dealer, or `None` when the blinds already closed the round.
pub fn first_to_act(state: &HandState) -> Option<usize> {
    if is_round_complete(state) {
        None
    } else {
        state.first_seat_from(state.dealer_index + 3, Seat::is_alive)
    }
}

/// A dealt hand together with the blind position it was dealt at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextHand {
    pub state: HandState,
    pub blinds: BlindState,
    pub level: BlindLevel,
}

/// Carry stacks over from a finished hand and deal the next one.
///
/// Busted seats sit out. The button moves to the next funded seat, blinds follow the schedule
/// and are posted, and the first seat able to act at or after three left of the dealer acts.
pub fn build_next_hand(
    prev: &HandState,
    schedule: &BlindSchedule,
    blinds: BlindState,
    deal: &mut dyn FnMut(usize) -> Result<Vec<Card>, DeckError>,
) -> Result<NextHand, EngineError> {
    if !prev.hand_over {
        return Err(IllegalAction::new(None, None, IllegalReason::HandInProgress).into());
    }
    let funded = prev.players.iter().filter(|p| in_game(p)).count();
    if funded < 2 {
        let reason = IllegalReason::NotEnoughPlayers { funded };
        return Err(IllegalAction::new(None, None, reason).into());
    }

    let blinds = compute_next_blind_level(Some(blinds), schedule);
    let level = schedule.level(blinds.level_index);
    let dealer = next_dealer(&prev.players, prev.dealer_index);
    let stacks: Vec<u64> = prev.players.iter().map(|p| p.stack).collect();
    let mut state = HandState::new(&stacks, dealer, level.small_blind, level.big_blind, level.ante);
    state.hand_number = prev.hand_number + 1;
    for (seat, old) in state.players.iter_mut().zip(&prev.players) {
        seat.id.clone_from(&old.id);
        seat.seat_out = old.seat_out;
    }
    deal_hands(&mut state, deal)?;

    let mut state = apply_forced_bets(&state)?;
    state.acting_player_index = first_to_act(&state);
    info!(
        "hand {} dealt: dealer {dealer}, blinds {}/{} ante {} (level {})",
        state.hand_number, level.small_blind, level.big_blind, level.ante, blinds.level_index
    );
    Ok(NextHand { state, blinds, level })
}
