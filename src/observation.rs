//! Per-seat views of a hand with hidden information removed.

use crate::cards::Card;
use crate::table::{HandState, Street};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatView {
    pub seat_index: usize,
    pub id: String,
    pub stack: u64,
    pub bet_this_round: u64,
    pub total_invested: u64,
    pub folded: bool,
    pub all_in: bool,
    pub seat_out: bool,
    pub has_drawn: bool,
    pub last_action: Option<String>,
    pub last_draw_count: usize,
    pub card_count: usize,
    /// `None` when the viewer may not see this hand.
    pub cards: Option<Vec<Card>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub viewer: usize,
    pub street: Street,
    pub draw_round_index: usize,
    pub acting_player_index: Option<usize>,
    pub pot_total: u64,
    pub current_bet: u64,
    pub to_call: u64,
    pub hand_over: bool,
    pub seats: Vec<SeatView>,
}

impl Observation {
    pub fn own_cards(&self) -> Option<&[Card]> {
        self.seats.get(self.viewer).and_then(|s| s.cards.as_deref())
    }

    pub fn is_my_turn(&self) -> bool {
        self.acting_player_index == Some(self.viewer)
    }
}

/// What `viewer` can see of `state`.
///
/// Other seats' cards stay hidden unless that seat has shown or the hand has reached a
/// showdown between two or more remaining seats.
pub fn observe(state: &HandState, viewer: usize) -> Observation {
    let contested = state.players.iter().filter(|p| p.is_contender()).count() > 1;
    let seats = state
        .players
        .iter()
        .map(|p| {
            let visible = p.seat_index == viewer
                || p.shown
                || (state.street == Street::Showdown && contested && p.is_contender());
            SeatView {
                seat_index: p.seat_index,
                id: p.id.clone(),
                stack: p.stack,
                bet_this_round: p.bet_this_round,
                total_invested: p.total_invested,
                folded: p.folded,
                all_in: p.all_in,
                seat_out: p.seat_out,
                has_drawn: p.has_drawn,
                last_action: p.last_action.clone(),
                last_draw_count: p.last_draw_count,
                card_count: p.hand.len(),
                cards: visible.then(|| p.hand.clone()),
            }
        })
        .collect();

    Observation {
        viewer,
        street: state.street,
        draw_round_index: state.draw_round_index,
        acting_player_index: state.acting_player_index,
        pot_total: state.pot_total(),
        current_bet: state.max_bet(),
        to_call: state.to_call(viewer),
        hand_over: state.hand_over,
        seats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn dealt() -> HandState {
        let mut st = HandState::new(&[100, 100, 100], 0, 5, 10, 0);
        st.players[0].hand = parse_cards("AS 2D 3H 4C").unwrap();
        st.players[1].hand = parse_cards("5S 6D 7H 8C").unwrap();
        st.players[2].hand = parse_cards("9S TD JH QC").unwrap();
        st.players[1].pay(10);
        st
    }

    #[test]
    fn only_own_cards_are_visible_mid_hand() {
        let obs = observe(&dealt(), 0);
        assert_eq!(obs.own_cards().map(<[Card]>::len), Some(4));
        assert!(obs.seats[1].cards.is_none());
        assert_eq!(obs.seats[1].card_count, 4);
        assert_eq!(obs.to_call, 10);
        assert_eq!(obs.pot_total, 10);
    }

    #[test]
    fn shown_hands_are_public() {
        let mut st = dealt();
        st.players[2].shown = true;
        let obs = observe(&st, 0);
        assert_eq!(obs.seats[2].cards.as_deref(), Some(&st.players[2].hand[..]));
    }

    #[test]
    fn showdown_reveals_remaining_seats_but_not_folded_ones() {
        let mut st = dealt();
        st.players[2].folded = true;
        st.street = Street::Showdown;
        let obs = observe(&st, 0);
        assert!(obs.seats[1].cards.is_some());
        assert!(obs.seats[2].cards.is_none());
    }

    #[test]
    fn uncontested_win_stays_hidden() {
        let mut st = dealt();
        st.players[0].folded = true;
        st.players[2].folded = true;
        st.street = Street::Showdown;
        let obs = observe(&st, 0);
        assert!(obs.seats[1].cards.is_none());
    }
}
