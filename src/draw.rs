//! Draw streets: turn order, discard selection and card replacement.

use crate::betting::{is_round_complete, validate_action, Action};
use crate::cards::{Card, Rank};
use crate::deck::Deck;
use crate::error::{EngineError, IllegalAction, IllegalReason};
use crate::evaluator::{evaluate_badugi, BadugiMode};
use crate::registry::Variant;
use crate::table::{HandState, Seat, Street};
use log::{debug, info};

/// Most cards the automatic policy will replace in one draw.
pub const MAX_AUTO_DISCARDS: usize = 3;

fn can_draw(p: &Seat) -> bool {
    p.is_contender() && !p.has_drawn
}

/// Seats still to draw this round, in turn order starting left of the dealer.
pub fn draw_order(state: &HandState) -> Vec<usize> {
    let n = state.num_seats();
    (1..=n)
        .map(|step| (state.dealer_index + step) % n)
        .filter(|&i| can_draw(&state.players[i]))
        .collect()
}

/// Open a draw street after a completed betting round. Bets must already be settled into pots.
pub fn begin_draw_round(state: &HandState) -> HandState {
    let mut next = state.clone();
    next.street = Street::Draw;
    next.draw_round_index += 1;
    for p in &mut next.players {
        p.has_drawn = false;
        p.last_draw_count = 0;
    }
    next.acting_player_index = next.next_seat_after(next.dealer_index, can_draw);
    info!("draw {} begins, first to draw {:?}", next.draw_round_index, next.acting_player_index);
    next
}

/// Positions the automatic policy would discard from `hand`.
///
/// Cards outside the best made hand are replaced, worst first: a duplicated rank weighs more
/// than a duplicated suit, and higher cards go before lower ones. At most
/// [`MAX_AUTO_DISCARDS`] are returned, ascending by position.
pub fn choose_discards(hand: &[Card], variant: Variant) -> Vec<usize> {
    let ace_low = !matches!(variant, Variant::DeuceSevenTripleDraw);
    let value = |c: &Card| if ace_low { c.rank().low_value() } else { c.rank().value() };

    let dead: Vec<usize> = match variant {
        Variant::Badugi | Variant::Badeucey | Variant::Badacey => {
            match evaluate_badugi(hand, BadugiMode::Low) {
                Ok(e) => {
                    let mut taken = vec![false; hand.len()];
                    e.dead
                        .iter()
                        .filter_map(|d| {
                            let pos = (0..hand.len()).find(|&i| !taken[i] && hand[i] == *d)?;
                            taken[pos] = true;
                            Some(pos)
                        })
                        .collect()
                }
                Err(_) => Vec::new(),
            }
        }
        _ => {
            let mut seen_ranks: Vec<Rank> = Vec::new();
            (0..hand.len())
                .filter(|&i| {
                    let rank = hand[i].rank();
                    let paired = seen_ranks.contains(&rank);
                    seen_ranks.push(rank);
                    paired || value(&hand[i]) > 8
                })
                .collect()
        }
    };

    let score = |i: usize| -> u32 {
        let card = hand[i];
        let dup_rank = hand.iter().enumerate().any(|(j, c)| j != i && c.rank() == card.rank());
        let dup_suit = hand.iter().enumerate().any(|(j, c)| j != i && c.suit() == card.suit());
        (u32::from(dup_rank) * 2 + u32::from(dup_suit)) * 100 + u32::from(value(&card))
    };

    let mut ranked = dead;
    ranked.sort_by_key(|&i| std::cmp::Reverse((score(i), i)));
    ranked.truncate(MAX_AUTO_DISCARDS);
    ranked.sort_unstable();
    ranked
}

fn check_discards(hand_len: usize, discards: &[usize]) -> Result<(), String> {
    if discards.len() > hand_len {
        return Err(format!("{} discards from a {hand_len}-card hand", discards.len()));
    }
    for (k, &i) in discards.iter().enumerate() {
        if i >= hand_len {
            return Err(format!("position {i} out of range"));
        }
        if discards[..k].contains(&i) {
            return Err(format!("position {i} listed twice"));
        }
    }
    Ok(())
}

/// Apply a DRAW: replace the chosen positions with fresh cards and pass the turn.
///
/// Returns the new state with the deck it was drawn from; `deck` itself is never touched, so
/// the caller commits both together. When the last seat has drawn the hand returns to a
/// betting street with the first live seat left of the dealer to act.
pub fn apply_draw(
    state: &HandState,
    action: &Action,
    variant: Variant,
    deck: &Deck,
) -> Result<(HandState, Deck), EngineError> {
    validate_action(state, action)?;
    let seat = action.seat_index;
    let hand = &state.players[seat].hand;

    let discards = match &action.discards {
        Some(d) => {
            check_discards(hand.len(), d).map_err(|msg| {
                IllegalAction::new(Some(seat), Some(action.kind), IllegalReason::InvalidDiscard(msg))
            })?;
            d.clone()
        }
        None => choose_discards(hand, variant),
    };

    let mut working = deck.clone();
    let replacements = working.draw(discards.len(), &state.live_cards())?;
    let mut next = state.clone();
    let p = &mut next.players[seat];
    let mut replaced = Vec::with_capacity(discards.len());
    for (&pos, card) in discards.iter().zip(replacements) {
        replaced.push(std::mem::replace(&mut p.hand[pos], card));
    }
    working.discard(&replaced);
    p.has_drawn = true;
    p.last_draw_count = discards.len();
    p.last_action = Some(if discards.is_empty() {
        "Stand pat".to_string()
    } else {
        format!("Draw {}", discards.len())
    });
    debug!("seat {seat} draws {} (positions {:?})", discards.len(), discards);

    next.acting_player_index = next.next_seat_after(seat, can_draw);
    if next.acting_player_index.is_none() {
        finish_draw_round(&mut next);
    }
    Ok((next, working))
}

fn finish_draw_round(state: &mut HandState) {
    state.street = Street::Bet;
    state.last_aggressor_index = None;
    state.metadata.bet_head = None;
    for p in &mut state.players {
        p.has_acted_this_round = p.all_in;
    }
    state.refresh_metadata();
    state.acting_player_index = if is_round_complete(state) {
        None
    } else {
        state.next_seat_after(state.dealer_index, Seat::is_alive)
    };
    info!(
        "betting after draw {} begins, first to act {:?}",
        state.draw_round_index, state.acting_player_index
    );
}
