//! Fixed-limit betting: forced bets, action validation and round completion.

use crate::error::{EngineError, IllegalAction, IllegalReason};
use crate::table::{HandState, Seat, Street};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActionType {
    Fold,
    Check,
    Call,
    Raise,
    Draw,
    Show,
}

impl ActionType {
    pub const ALL: [ActionType; 6] = [
        ActionType::Fold,
        ActionType::Check,
        ActionType::Call,
        ActionType::Raise,
        ActionType::Draw,
        ActionType::Show,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ActionType::Fold => "FOLD",
            ActionType::Check => "CHECK",
            ActionType::Call => "CALL",
            ActionType::Raise => "RAISE",
            ActionType::Draw => "DRAW",
            ActionType::Show => "SHOW",
        }
    }

    /// Street on which this action type is accepted.
    pub const fn street(self) -> Street {
        match self {
            ActionType::Fold | ActionType::Check | ActionType::Call | ActionType::Raise => Street::Bet,
            ActionType::Draw => Street::Draw,
            ActionType::Show => Street::Showdown,
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ActionType {
    type Err = IllegalAction;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim().to_ascii_uppercase();
        ActionType::ALL.iter().copied().find(|a| a.label() == t).ok_or_else(|| {
            IllegalAction::new(None, None, IllegalReason::UnsupportedAction(s.to_string()))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub seat_index: usize,
    pub kind: ActionType,
    /// Hand positions to replace on a draw. `None` lets the engine choose.
    #[serde(default)]
    pub discards: Option<Vec<usize>>,
}

impl Action {
    pub fn new(seat_index: usize, kind: ActionType) -> Self {
        Self { seat_index, kind, discards: None }
    }

    pub fn fold(seat_index: usize) -> Self {
        Self::new(seat_index, ActionType::Fold)
    }

    pub fn check(seat_index: usize) -> Self {
        Self::new(seat_index, ActionType::Check)
    }

    pub fn call(seat_index: usize) -> Self {
        Self::new(seat_index, ActionType::Call)
    }

    pub fn raise(seat_index: usize) -> Self {
        Self::new(seat_index, ActionType::Raise)
    }

    pub fn draw(seat_index: usize, discards: Vec<usize>) -> Self {
        Self { seat_index, kind: ActionType::Draw, discards: Some(discards) }
    }

    /// Draw with engine-chosen discards.
    pub fn auto_draw(seat_index: usize) -> Self {
        Self::new(seat_index, ActionType::Draw)
    }

    pub fn stand_pat(seat_index: usize) -> Self {
        Self::draw(seat_index, Vec::new())
    }

    pub fn show(seat_index: usize) -> Self {
        Self::new(seat_index, ActionType::Show)
    }
}

/// Fixed bet unit: the big blind before the first draw, double after.
///
/// ```
/// use badugi_engine::betting::bet_size;
/// assert_eq!(bet_size(20, 0), 20);
/// assert_eq!(bet_size(20, 2), 40);
/// ```
pub fn bet_size(big_blind: u64, draw_round_index: usize) -> u64 {
    if draw_round_index == 0 { big_blind } else { big_blind.saturating_mul(2) }
}

/// Post antes and blinds on a freshly dealt hand.
///
/// Every seat that is seated and not busted posts the ante. The small blind is the first such
/// seat after the dealer and the big blind the next. The first seat able to act after the big
/// blind is to act, and the big blind counts as the aggressor.
pub fn apply_forced_bets(state: &HandState) -> Result<HandState, IllegalAction> {
    if state.metadata.forced_bets_posted {
        return Err(IllegalAction::new(None, None, IllegalReason::ForcedBetsPosted));
    }
    let funded = state.players.iter().filter(|p| p.is_dealt_in() && p.stack > 0).count();
    if funded < 2 {
        return Err(IllegalAction::new(None, None, IllegalReason::NotEnoughPlayers { funded }));
    }

    let mut next = state.clone();
    let eligible = |p: &Seat| p.is_dealt_in() && p.stack > 0;

    if next.ante > 0 {
        let ante = next.ante;
        for p in next.players.iter_mut().filter(|p| eligible(p)) {
            let v = p.pay(ante);
            p.last_action = Some(format!("Ante {v}"));
        }
    }

    // Antes can put a seat all-in, so blind positions use the pre-ante eligibility
    let sb = state.next_seat_after(state.dealer_index, eligible);
    let bb = sb.and_then(|sb| state.next_seat_after(sb, |p| eligible(p) && p.seat_index != sb));
    for (pos, amount, label) in [(sb, next.small_blind, "SB"), (bb, next.big_blind, "BB")] {
        if let Some(i) = pos {
            let v = next.players[i].pay(amount);
            next.players[i].last_action = Some(format!("{label} {v}"));
        }
    }

    let anchor = bb.or(sb).unwrap_or(state.dealer_index);
    next.last_aggressor_index = bb;
    next.metadata.bet_head = bb;
    next.metadata.forced_bets_posted = true;
    next.street = Street::Bet;
    next.refresh_metadata();
    next.acting_player_index =
        if is_round_complete(&next) { None } else { next.next_seat_after(anchor, Seat::is_alive) };
    debug!(
        "forced bets posted: sb={:?} bb={:?} ante={} acting={:?}",
        sb, bb, next.ante, next.acting_player_index
    );
    Ok(next)
}

/// A betting round is over once at most one seat still contests the pot, or when no seat
/// able to act still owes chips or a decision.
pub fn is_round_complete(state: &HandState) -> bool {
    if state.players.iter().filter(|p| p.is_contender()).count() <= 1 {
        return true;
    }
    let max = state.max_bet();
    let alive: Vec<&Seat> = state.players.iter().filter(|p| p.is_alive()).collect();
    match alive.as_slice() {
        [] => true,
        [only] => only.bet_this_round >= max,
        _ => alive.iter().all(|p| p.has_acted_this_round && p.bet_this_round == max),
    }
}

/// Seat whose action closes the round: the last aggressor, or the next seat able to act after it.
pub fn closing_seat(state: &HandState) -> Option<usize> {
    let aggressor = state.last_aggressor_index?;
    if state.seat(aggressor).is_some_and(Seat::is_alive) {
        Some(aggressor)
    } else {
        state.next_seat_after(aggressor, Seat::is_alive)
    }
}

/// Check seat, street, seat status and turn for `action`, in that order.
pub fn validate_action(state: &HandState, action: &Action) -> Result<(), IllegalAction> {
    let illegal = |reason| IllegalAction::new(Some(action.seat_index), Some(action.kind), reason);
    let seat = state
        .seat(action.seat_index)
        .ok_or_else(|| illegal(IllegalReason::InvalidSeat { seats: state.num_seats() }))?;

    if action.kind != ActionType::Show && state.hand_over {
        return Err(illegal(IllegalReason::HandOver));
    }
    if state.street != action.kind.street() {
        return Err(illegal(IllegalReason::WrongStreet { street: state.street }));
    }
    if seat.seat_out {
        return Err(illegal(IllegalReason::SeatOut));
    }
    if seat.folded {
        return Err(illegal(IllegalReason::SeatFolded));
    }
    if action.kind == ActionType::Show {
        return Ok(());
    }
    if seat.all_in && action.kind != ActionType::Draw {
        return Err(illegal(IllegalReason::SeatAllIn));
    }
    if state.acting_player_index != Some(action.seat_index) {
        return Err(illegal(IllegalReason::OutOfTurn { acting: state.acting_player_index }));
    }
    match action.kind {
        ActionType::Check => {
            let to_call = state.to_call(action.seat_index);
            if to_call > 0 {
                return Err(illegal(IllegalReason::CannotCheck { to_call }));
            }
        }
        ActionType::Draw if seat.has_drawn => return Err(illegal(IllegalReason::AlreadyDrawn)),
        _ => {}
    }
    Ok(())
}

/// Actions `seat` may take right now.
pub fn legal_actions(state: &HandState, seat: usize) -> Vec<ActionType> {
    ActionType::ALL
        .iter()
        .copied()
        .filter(|&kind| validate_action(state, &Action::new(seat, kind)).is_ok())
        .collect()
}

/// Apply a FOLD, CHECK, CALL, RAISE or SHOW. Draws go through [`crate::draw::apply_draw`].
pub fn apply_betting_action(state: &HandState, action: &Action) -> Result<HandState, EngineError> {
    validate_action(state, action)?;
    let seat = action.seat_index;
    let mut next = state.clone();
    let max = state.max_bet();
    let to_call = state.to_call(seat);

    match action.kind {
        ActionType::Fold => {
            let p = &mut next.players[seat];
            p.folded = true;
            p.has_acted_this_round = true;
            p.last_action = Some("Fold".into());
            if next.last_aggressor_index == Some(seat) {
                let moved = next.next_seat_after(seat, Seat::is_alive);
                next.last_aggressor_index = moved;
                next.metadata.bet_head = moved;
            }
        }
        ActionType::Check => {
            let p = &mut next.players[seat];
            p.has_acted_this_round = true;
            p.last_action = Some("Check".into());
        }
        ActionType::Call => {
            let p = &mut next.players[seat];
            p.has_acted_this_round = true;
            if to_call == 0 {
                p.last_action = Some("Check".into());
            } else {
                let paid = p.pay(to_call);
                p.last_action = Some(format!("Call {paid}"));
            }
        }
        ActionType::Raise => {
            let unit = bet_size(state.big_blind, state.draw_round_index);
            let p = &mut next.players[seat];
            let paid = p.pay(to_call.saturating_add(unit));
            p.has_acted_this_round = true;
            p.last_action = Some(if p.all_in {
                format!("Raise {paid} (all-in)")
            } else {
                format!("Raise {paid}")
            });
            if p.bet_this_round > max {
                next.last_aggressor_index = Some(seat);
                next.metadata.bet_head = Some(seat);
                for other in next.players.iter_mut().filter(|o| o.seat_index != seat && o.is_alive()) {
                    other.has_acted_this_round = false;
                }
            }
        }
        ActionType::Show => {
            let p = &mut next.players[seat];
            p.shown = true;
            p.last_action = Some("Show".into());
            debug!("seat {seat} shows");
            return Ok(next);
        }
        ActionType::Draw => {
            return Err(EngineError::Invariant("draw routed to the betting handler".into()));
        }
    }

    next.refresh_metadata();
    next.acting_player_index = next_to_act(&next, seat);
    debug!(
        "seat {seat} {}: bet={} stack={} acting={:?}",
        action.kind,
        next.players[seat].bet_this_round,
        next.players[seat].stack,
        next.acting_player_index
    );
    Ok(next)
}

fn next_to_act(state: &HandState, from: usize) -> Option<usize> {
    if is_round_complete(state) {
        return None;
    }
    let max = state.max_bet();
    state.next_seat_after(from, |p| {
        p.is_alive() && (!p.has_acted_this_round || p.bet_this_round < max)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(stacks: &[u64]) -> HandState {
        apply_forced_bets(&HandState::new(stacks, 0, 10, 20, 0)).unwrap()
    }

    #[test]
    fn blinds_follow_the_dealer() {
        let st = table(&[1000, 1000, 1000, 1000]);
        assert_eq!(st.players[1].bet_this_round, 10);
        assert_eq!(st.players[2].bet_this_round, 20);
        assert_eq!(st.acting_player_index, Some(3));
        assert_eq!(st.last_aggressor_index, Some(2));
        assert_eq!(st.metadata.current_bet, 20);
        assert_eq!(st.metadata.total_committed, 30);
    }

    #[test]
    fn forced_bets_post_once() {
        let st = table(&[1000, 1000]);
        let err = apply_forced_bets(&st).unwrap_err();
        assert_eq!(err.reason, IllegalReason::ForcedBetsPosted);
    }

    #[test]
    fn antes_count_toward_investment() {
        let st = apply_forced_bets(&HandState::new(&[100, 100, 100], 0, 10, 20, 5)).unwrap();
        assert_eq!(st.players[0].total_invested, 5);
        assert_eq!(st.players[1].total_invested, 15);
        assert_eq!(st.players[2].total_invested, 25);
        assert_eq!(st.chips_in_play(), 300);
    }

    #[test]
    fn call_with_nothing_owed_checks() {
        let mut st = table(&[1000, 1000, 1000]);
        // dealer calls, small blind completes
        st = apply_betting_action(&st, &Action::call(0)).unwrap();
        st = apply_betting_action(&st, &Action::call(1)).unwrap();
        assert_eq!(st.acting_player_index, Some(2));
        st = apply_betting_action(&st, &Action::call(2)).unwrap();
        assert_eq!(st.players[2].last_action.as_deref(), Some("Check"));
        assert_eq!(st.players[2].bet_this_round, 20);
        assert!(is_round_complete(&st));
        assert_eq!(st.acting_player_index, None);
    }

    #[test]
    fn raise_reopens_action() {
        let mut st = table(&[1000, 1000, 1000]);
        st = apply_betting_action(&st, &Action::call(0)).unwrap();
        st = apply_betting_action(&st, &Action::raise(1)).unwrap();
        assert_eq!(st.players[1].bet_this_round, 40);
        assert_eq!(st.last_aggressor_index, Some(1));
        assert!(!st.players[0].has_acted_this_round);
        assert_eq!(st.acting_player_index, Some(2));
        assert_eq!(closing_seat(&st), Some(1));
    }

    #[test]
    fn raise_is_capped_by_stack() {
        let mut st = table(&[1000, 1000, 25]);
        st = apply_betting_action(&st, &Action::call(0)).unwrap();
        st = apply_betting_action(&st, &Action::call(1)).unwrap();
        st = apply_betting_action(&st, &Action::raise(2)).unwrap();
        assert!(st.players[2].all_in);
        assert_eq!(st.players[2].bet_this_round, 25);
        assert_eq!(st.acting_player_index, Some(0));
    }

    #[test]
    fn aggressor_fold_moves_closing_seat() {
        let mut st = table(&[1000, 1000, 1000]);
        st = apply_betting_action(&st, &Action::call(0)).unwrap();
        st = apply_betting_action(&st, &Action::call(1)).unwrap();
        // big blind folds its option
        st = apply_betting_action(&st, &Action::fold(2)).unwrap();
        assert_eq!(st.last_aggressor_index, Some(0));
        assert_eq!(st.metadata.bet_head, Some(0));
        assert!(is_round_complete(&st));
    }

    #[test]
    fn illegal_actions_are_reported_in_gate_order() {
        let st = table(&[1000, 1000, 1000]);
        let reason = |a: Action| apply_betting_action(&st, &a).unwrap_err().illegal_reason().cloned();
        assert_eq!(reason(Action::call(9)), Some(IllegalReason::InvalidSeat { seats: 3 }));
        assert_eq!(reason(Action::auto_draw(0)), Some(IllegalReason::WrongStreet { street: Street::Bet }));
        assert_eq!(reason(Action::call(1)), Some(IllegalReason::OutOfTurn { acting: Some(0) }));
        assert_eq!(reason(Action::check(0)), Some(IllegalReason::CannotCheck { to_call: 20 }));
    }

    #[test]
    fn lone_seat_facing_all_in_must_still_act() {
        let mut st = table(&[1000, 1000, 1000]);
        st = apply_betting_action(&st, &Action::raise(0)).unwrap();
        st = apply_betting_action(&st, &Action::fold(1)).unwrap();
        assert!(!is_round_complete(&st));
        assert_eq!(st.acting_player_index, Some(2));
        st.players[0].all_in = true;
        assert!(!is_round_complete(&st));
        st = apply_betting_action(&st, &Action::call(2)).unwrap();
        assert!(is_round_complete(&st));
    }

    #[test]
    fn action_type_parses_case_insensitively() {
        assert_eq!("raise".parse::<ActionType>().unwrap(), ActionType::Raise);
        let err = "bet".parse::<ActionType>().unwrap_err();
        assert_eq!(err.reason, IllegalReason::UnsupportedAction("bet".into()));
    }

    #[test]
    fn legal_actions_depend_on_price() {
        let st = table(&[1000, 1000, 1000]);
        assert_eq!(
            legal_actions(&st, 0),
            vec![ActionType::Fold, ActionType::Call, ActionType::Raise]
        );
        assert!(legal_actions(&st, 1).is_empty());
    }
}
