//! A table played hand after hand: owns the engine, the blind clock and the current state,
//! and moves the hand along between betting rounds on its own.

use crate::betting::{legal_actions, Action, ActionType};
use crate::config::{HandContext, TableConfig};
use crate::engine::{DrawEngine, GameEngine};
use crate::error::{EngineError, IllegalAction, IllegalReason};
use crate::lifecycle::{
    compute_next_blind_level, first_to_act, BlindLevel, BlindSchedule, BlindState,
};
use crate::observation::Observation;
use crate::showdown::{PotSummary, ShowdownResult};
use crate::table::{HandState, Street};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhaseEvent {
    HandStarted { hand_number: u64, dealer_index: usize, level: BlindLevel },
    StreetChanged { street: Street, draw_round_index: usize },
    Showdown { hand_number: u64, total_pot: u64, summary: Vec<PotSummary> },
}

pub type PhaseCallback = Box<dyn FnMut(&PhaseEvent)>;

pub struct Session {
    config: TableConfig,
    engine: DrawEngine,
    schedule: BlindSchedule,
    blinds: BlindState,
    state: Option<HandState>,
    history: Vec<HandState>,
    last_showdown: Option<ShowdownResult>,
    on_phase: Option<PhaseCallback>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("blinds", &self.blinds)
            .field("hand", &self.state.as_ref().map(|s| s.hand_number))
            .field("history", &self.history.len())
            .finish_non_exhaustive()
    }
}

impl Session {
    pub fn new(config: TableConfig) -> Result<Self, EngineError> {
        let engine =
            DrawEngine::new(config.variant, config.seed).with_max_draws(config.max_draws());
        Self::with_engine(config, engine)
    }

    /// Session over a prepared engine, e.g. one holding a stacked deck.
    pub fn with_engine(config: TableConfig, engine: DrawEngine) -> Result<Self, EngineError> {
        config.validate()?;
        let schedule = config.schedule()?;
        Ok(Self {
            config,
            engine,
            schedule,
            blinds: BlindState::default(),
            state: None,
            history: Vec::new(),
            last_showdown: None,
            on_phase: None,
        })
    }

    /// Register a listener for hand starts, street changes and showdowns.
    pub fn on_phase(&mut self, callback: impl FnMut(&PhaseEvent) + 'static) {
        self.on_phase = Some(Box::new(callback));
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn engine(&self) -> &DrawEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut DrawEngine {
        &mut self.engine
    }

    pub fn state(&self) -> Option<&HandState> {
        self.state.as_ref()
    }

    /// Every state of the current hand, oldest first.
    pub fn history(&self) -> &[HandState] {
        &self.history
    }

    pub fn blinds(&self) -> BlindState {
        self.blinds
    }

    pub fn last_showdown(&self) -> Option<&ShowdownResult> {
        self.last_showdown.as_ref()
    }

    pub fn observation(&self, seat: usize) -> Option<Observation> {
        self.state.as_ref().map(|s| self.engine.observation(s, seat))
    }

    pub fn legal_actions(&self, seat: usize) -> Vec<ActionType> {
        self.state.as_ref().map(|s| legal_actions(s, seat)).unwrap_or_default()
    }

    /// True once the last hand is settled and fewer than two seats have chips.
    pub fn is_finished(&self) -> bool {
        self.state.as_ref().is_some_and(|s| {
            s.hand_over && s.players.iter().filter(|p| !p.seat_out && p.stack > 0).count() < 2
        })
    }

    /// Deal the next hand with blinds posted. The first hand seats a fresh table.
    pub fn new_hand(&mut self) -> Result<&HandState, EngineError> {
        let (state, blinds, level) = match &self.state {
            None => {
                let blinds = compute_next_blind_level(None, &self.schedule);
                let level = self.schedule.level(blinds.level_index);
                let ctx = HandContext::at_level(
                    self.config.num_seats,
                    self.config.starting_stack,
                    self.config.dealer_index,
                    level,
                );
                let seated = self.engine.init_hand(&ctx)?;
                let mut state = self.engine.apply_forced_bets(&seated)?;
                state.hand_number = 1;
                state.acting_player_index = first_to_act(&state);
                (state, blinds, level)
            }
            Some(prev) => {
                let next = self.engine.next_hand(prev, &self.schedule, self.blinds)?;
                (next.state, next.blinds, next.level)
            }
        };

        self.blinds = blinds;
        self.last_showdown = None;
        self.history.clear();
        self.emit(PhaseEvent::HandStarted {
            hand_number: state.hand_number,
            dealer_index: state.dealer_index,
            level,
        });
        self.commit(state);
        self.auto_advance()?;
        self.current()
    }

    /// Apply one action, then run any betting-round transitions it triggers.
    pub fn act(&mut self, action: Action) -> Result<&HandState, EngineError> {
        let current = self.state.as_ref().ok_or_else(no_hand)?;
        let street = current.street;
        let next = self.engine.apply_player_action(current, &action)?;
        let changed = next.street != street;
        let (street, draw_round_index) = (next.street, next.draw_round_index);
        self.commit(next);
        if changed {
            self.emit(PhaseEvent::StreetChanged { street, draw_round_index });
        }
        self.auto_advance()?;
        self.current()
    }

    fn current(&self) -> Result<&HandState, EngineError> {
        self.state.as_ref().ok_or_else(no_hand)
    }

    fn commit(&mut self, state: HandState) {
        self.history.push(state.clone());
        self.state = Some(state);
    }

    fn emit(&mut self, event: PhaseEvent) {
        if let Some(cb) = self.on_phase.as_mut() {
            cb(&event);
        }
    }

    fn auto_advance(&mut self) -> Result<(), EngineError> {
        loop {
            let st = self.current()?;
            if st.hand_over || st.street != Street::Bet || st.acting_player_index.is_some() {
                return Ok(());
            }
            let advance = self.engine.advance_after_bet(st)?;
            let street = advance.street;
            let draw_round_index = advance.draw_round_index;
            self.commit(advance.state);
            self.emit(PhaseEvent::StreetChanged { street, draw_round_index });
            if let Some(result) = advance.showdown {
                self.emit(PhaseEvent::Showdown {
                    hand_number: result.state.hand_number,
                    total_pot: result.total_pot,
                    summary: result.summary.clone(),
                });
                self.last_showdown = Some(result);
                return Ok(());
            }
        }
    }
}

fn no_hand() -> EngineError {
    IllegalAction::new(None, None, IllegalReason::NoHand).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn config() -> TableConfig {
        TableConfig { num_seats: 3, seed: Some(21), ..TableConfig::default() }
    }

    #[test]
    fn act_before_deal_is_refused() {
        let mut s = Session::new(config()).unwrap();
        let err = s.act(Action::call(0)).unwrap_err();
        assert_eq!(err.illegal_reason(), Some(&IllegalReason::NoHand));
    }

    #[test]
    fn events_follow_the_hand() {
        let mut s = Session::new(config()).unwrap();
        let seen: Rc<RefCell<Vec<PhaseEvent>>> = Rc::default();
        let sink = Rc::clone(&seen);
        s.on_phase(move |e| sink.borrow_mut().push(e.clone()));

        s.new_hand().unwrap();
        s.act(Action::fold(0)).unwrap();
        s.act(Action::fold(1)).unwrap();

        let events = seen.borrow();
        assert!(matches!(events[0], PhaseEvent::HandStarted { hand_number: 1, .. }));
        assert!(matches!(
            events[1],
            PhaseEvent::StreetChanged { street: Street::Showdown, .. }
        ));
        assert!(matches!(events[2], PhaseEvent::Showdown { total_pot: 30, .. }));
        assert_eq!(s.last_showdown().unwrap().winnings().get(&2), Some(&30));
    }

    #[test]
    fn second_hand_needs_the_first_settled() {
        let mut s = Session::new(config()).unwrap();
        s.new_hand().unwrap();
        let err = s.new_hand().unwrap_err();
        assert_eq!(err.illegal_reason(), Some(&IllegalReason::HandInProgress));
    }

    #[test]
    fn history_keeps_every_state() {
        let mut s = Session::new(config()).unwrap();
        s.new_hand().unwrap();
        s.act(Action::call(0)).unwrap();
        assert_eq!(s.history().len(), 2);
        assert_eq!(s.history()[0].acting_player_index, Some(0));
        assert_eq!(s.history()[1].acting_player_index, Some(1));
    }
}
