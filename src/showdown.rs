//! Pot construction and showdown settlement.

use crate::error::EngineError;
use crate::evaluator::{compare_evaluations, Evaluation};
use crate::registry::Variant;
use crate::table::{HandState, Pot, Seat, Street};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub seat_index: usize,
    pub payout: u64,
    pub stack_before: u64,
    pub stack_after: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotSummary {
    pub pot_index: usize,
    pub pot_amount: u64,
    pub payouts: Vec<Payout>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowdownResult {
    pub state: HandState,
    pub summary: Vec<PotSummary>,
    pub total_pot: u64,
}

impl ShowdownResult {
    /// Total each seat won across all pots.
    pub fn winnings(&self) -> BTreeMap<usize, u64> {
        let mut won = BTreeMap::new();
        for payout in self.summary.iter().flat_map(|s| &s.payouts) {
            *won.entry(payout.seat_index).or_insert(0) += payout.payout;
        }
        won
    }
}

/// Main pot and side pots from each seat's `total_invested`.
///
/// Each distinct contribution level forms a layer paid by every seat that reached it; the
/// layer is winnable by the non-folded seats among them. Consecutive layers with the same
/// eligible seats merge. A layer nobody can win (only folded seats reached it) joins the pot
/// below it.
///
/// ```
/// use badugi_engine::showdown::build_side_pots;
/// use badugi_engine::table::{HandState, Pot};
///
/// let mut st = HandState::new(&[0, 0, 0], 0, 0, 0, 0);
/// for (seat, chips) in [100, 300, 300].into_iter().enumerate() {
///     st.players[seat].total_invested = chips;
/// }
/// assert_eq!(
///     build_side_pots(&st.players),
///     vec![Pot::new(300, vec![0, 1, 2]), Pot::new(400, vec![1, 2])]
/// );
/// ```
pub fn build_side_pots(players: &[Seat]) -> Vec<Pot> {
    let mut levels: Vec<u64> =
        players.iter().map(|p| p.total_invested).filter(|&c| c > 0).collect();
    levels.sort_unstable();
    levels.dedup();

    let mut pots: Vec<Pot> = Vec::new();
    let mut carried = 0u64;
    let mut prev = 0u64;
    for lvl in levels {
        let contributors = players.iter().filter(|p| p.total_invested >= lvl).count() as u64;
        let amount = (lvl - prev) * contributors;
        prev = lvl;
        let eligible: Vec<usize> = players
            .iter()
            .filter(|p| p.total_invested >= lvl && p.is_contender())
            .map(|p| p.seat_index)
            .collect();

        if eligible.is_empty() {
            match pots.last_mut() {
                Some(last) => last.amount += amount,
                None => carried += amount,
            }
            continue;
        }
        match pots.last_mut() {
            Some(last) if last.eligible == eligible => last.amount += amount,
            _ => pots.push(Pot::new(amount + std::mem::take(&mut carried), eligible)),
        }
    }
    if carried > 0 {
        pots.push(Pot::new(carried, Vec::new()));
    }
    pots
}

/// Fold outstanding bets into the pots and clear them for the next street.
pub fn settle_street(state: &HandState) -> HandState {
    let mut next = state.clone();
    next.pots = build_side_pots(&next.players);
    for p in &mut next.players {
        p.bet_this_round = 0;
        p.has_acted_this_round = false;
    }
    next.last_aggressor_index = None;
    next.metadata.bet_head = None;
    next.refresh_metadata();
    next
}

/// Split `amount` evenly between `winners`; leftover chips go one each by ascending seat.
pub fn split_amount(amount: u64, winners: &[usize]) -> Vec<(usize, u64)> {
    if winners.is_empty() {
        return Vec::new();
    }
    let mut seats = winners.to_vec();
    seats.sort_unstable();
    let n = seats.len() as u64;
    let share = amount / n;
    let remainder = (amount % n) as usize;
    seats.into_iter().enumerate().map(|(k, s)| (s, share + u64::from(k < remainder))).collect()
}

fn best_seats<'a>(
    seats: &[usize],
    eval: impl Fn(usize) -> Option<&'a Evaluation>,
) -> Vec<usize> {
    let mut best: Vec<usize> = Vec::new();
    let mut best_eval: Option<&Evaluation> = None;
    for &s in seats {
        let Some(e) = eval(s) else { continue };
        match best_eval.map(|b| compare_evaluations(e, b)) {
            None | Some(Ordering::Less) => {
                best_eval = Some(e);
                best = vec![s];
            }
            Some(Ordering::Equal) => best.push(s),
            Some(Ordering::Greater) => {}
        }
    }
    best
}

/// Award every pot and close the hand.
///
/// Outstanding bets are settled first. A pot with one eligible contender goes to that seat
/// without any hand being evaluated. Split variants give the low half (rounded down) to the best
/// qualifying low and the rest to the best Badugi; with no qualifying low the Badugi takes
/// the whole pot.
pub fn resolve_showdown(state: &HandState, variant: Variant) -> Result<ShowdownResult, EngineError> {
    let unsettled = state.players.iter().any(|p| p.bet_this_round > 0);
    let mut next =
        if state.pots.is_empty() || unsettled { settle_street(state) } else { state.clone() };
    let pots = std::mem::take(&mut next.pots);
    let total_pot: u64 = pots.iter().map(|p| p.amount).sum();
    let contenders = next.contenders();

    let mut evaluations: BTreeMap<usize, Evaluation> = BTreeMap::new();
    if contenders.len() > 1 {
        for &s in &contenders {
            evaluations.insert(s, variant.evaluate(&next.players[s].hand)?);
        }
    }

    let mut summary = Vec::with_capacity(pots.len());
    for (pot_index, pot) in pots.iter().enumerate() {
        let in_pot: Vec<usize> =
            pot.eligible.iter().copied().filter(|s| contenders.contains(s)).collect();
        let shares = match in_pot.as_slice() {
            [] if pot.amount == 0 => {
                summary.push(PotSummary { pot_index, pot_amount: 0, payouts: Vec::new() });
                continue;
            }
            [] => {
                warn!("pot {pot_index} of {} has no eligible contender", pot.amount);
                return Err(EngineError::Invariant(format!(
                    "pot {pot_index} ({} chips) has no eligible contender",
                    pot.amount
                )));
            }
            [only] => vec![(*only, pot.amount)],
            _ => pot_shares(pot.amount, &in_pot, &evaluations, variant.is_split()),
        };

        let mut payouts = Vec::with_capacity(shares.len());
        for (seat_index, payout) in shares {
            let p = &mut next.players[seat_index];
            let stack_before = p.stack;
            p.stack += payout;
            payouts.push(Payout { seat_index, payout, stack_before, stack_after: p.stack });
        }
        info!(
            "pot {pot_index} ({}) -> {:?}",
            pot.amount,
            payouts.iter().map(|p| (p.seat_index, p.payout)).collect::<Vec<_>>()
        );
        summary.push(PotSummary { pot_index, pot_amount: pot.amount, payouts });
    }

    for p in &mut next.players {
        p.bet_this_round = 0;
        p.busted = p.stack == 0;
    }
    next.street = Street::Showdown;
    next.acting_player_index = None;
    next.last_aggressor_index = None;
    next.metadata.bet_head = None;
    next.refresh_metadata();
    next.hand_over = true;
    Ok(ShowdownResult { state: next, summary, total_pot })
}

fn pot_shares(
    amount: u64,
    seats: &[usize],
    evaluations: &BTreeMap<usize, Evaluation>,
    split: bool,
) -> Vec<(usize, u64)> {
    let high = best_seats(seats, |s| evaluations.get(&s));
    if !split {
        return split_amount(amount, &high);
    }
    let low = best_seats(seats, |s| evaluations.get(&s).and_then(Evaluation::qualifying_low));
    if low.is_empty() {
        return split_amount(amount, &high);
    }

    let low_half = amount / 2;
    let mut merged: BTreeMap<usize, u64> = BTreeMap::new();
    let high_side = split_amount(amount - low_half, &high);
    for (s, v) in high_side.into_iter().chain(split_amount(low_half, &low)) {
        *merged.entry(s).or_insert(0) += v;
    }
    merged.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invested(amounts: &[u64]) -> Vec<Seat> {
        amounts
            .iter()
            .enumerate()
            .map(|(i, &a)| {
                let mut s = Seat::new(i, 0);
                s.total_invested = a;
                s
            })
            .collect()
    }

    #[test]
    fn one_all_in_makes_a_side_pot() {
        let players = invested(&[100, 300, 300, 0, 0, 0]);
        let pots = build_side_pots(&players);
        assert_eq!(pots, vec![Pot::new(300, vec![0, 1, 2]), Pot::new(400, vec![1, 2])]);
    }

    #[test]
    fn folded_contributions_stay_in_the_pot() {
        let mut players = invested(&[50, 100, 100]);
        players[2].folded = true;
        let pots = build_side_pots(&players);
        assert_eq!(pots, vec![Pot::new(150, vec![0, 1]), Pot::new(100, vec![1])]);
        assert_eq!(pots.iter().map(|p| p.amount).sum::<u64>(), 250);
    }

    #[test]
    fn layer_reached_only_by_folders_joins_the_pot_below() {
        let mut players = invested(&[30, 50, 100]);
        players[2].folded = true;
        let pots = build_side_pots(&players);
        assert_eq!(pots, vec![Pot::new(90, vec![0, 1]), Pot::new(90, vec![1])]);
    }

    #[test]
    fn equal_levels_merge() {
        let players = invested(&[40, 40, 40]);
        assert_eq!(build_side_pots(&players), vec![Pot::new(120, vec![0, 1, 2])]);
    }

    #[test]
    fn odd_chips_go_to_lowest_seats() {
        assert_eq!(split_amount(10, &[4, 1, 2]), vec![(1, 4), (2, 3), (4, 3)]);
        assert_eq!(split_amount(9, &[3]), vec![(3, 9)]);
        assert!(split_amount(9, &[]).is_empty());
    }
}
