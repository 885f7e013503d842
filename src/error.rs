use crate::betting::ActionType;
use crate::config::ConfigError;
use crate::deck::DeckError;
use crate::evaluator::EvalError;
use crate::table::Street;
use std::fmt;

/// Why an action was refused. The state that was passed in is never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IllegalReason {
    UnsupportedAction(String),
    InvalidSeat { seats: usize },
    OutOfTurn { acting: Option<usize> },
    SeatFolded,
    SeatAllIn,
    SeatOut,
    WrongStreet { street: Street },
    CannotCheck { to_call: u64 },
    AlreadyDrawn,
    InvalidDiscard(String),
    RoundIncomplete,
    HandOver,
    HandInProgress,
    NoHand,
    ForcedBetsPosted,
    NotEnoughPlayers { funded: usize },
}

impl fmt::Display for IllegalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IllegalReason::UnsupportedAction(name) => write!(f, "unsupported action type '{name}'"),
            IllegalReason::InvalidSeat { seats } => {
                write!(f, "seat index out of range ({seats} seats)")
            }
            IllegalReason::OutOfTurn { acting: Some(s) } => write!(f, "out of turn (seat {s} to act)"),
            IllegalReason::OutOfTurn { acting: None } => write!(f, "out of turn (no seat to act)"),
            IllegalReason::SeatFolded => write!(f, "seat has folded"),
            IllegalReason::SeatAllIn => write!(f, "seat is all-in"),
            IllegalReason::SeatOut => write!(f, "seat is sitting out"),
            IllegalReason::WrongStreet { street } => write!(f, "not allowed during {street}"),
            IllegalReason::CannotCheck { to_call } => write!(f, "cannot check facing {to_call}"),
            IllegalReason::AlreadyDrawn => write!(f, "seat already drew this round"),
            IllegalReason::InvalidDiscard(msg) => write!(f, "invalid discard: {msg}"),
            IllegalReason::RoundIncomplete => write!(f, "betting round is not complete"),
            IllegalReason::HandOver => write!(f, "hand is already settled"),
            IllegalReason::HandInProgress => write!(f, "current hand has not been settled"),
            IllegalReason::NoHand => write!(f, "no hand has been dealt"),
            IllegalReason::ForcedBetsPosted => write!(f, "forced bets already posted"),
            IllegalReason::NotEnoughPlayers { funded } => {
                write!(f, "need at least two funded seats, have {funded}")
            }
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("illegal action{}{}: {reason}", fmt_seat(.seat), fmt_action(.action))]
pub struct IllegalAction {
    pub seat: Option<usize>,
    pub action: Option<ActionType>,
    pub reason: IllegalReason,
}

fn fmt_seat(seat: &Option<usize>) -> String {
    seat.map(|s| format!(" by seat {s}")).unwrap_or_default()
}

fn fmt_action(action: &Option<ActionType>) -> String {
    action.map(|a| format!(" ({a})")).unwrap_or_default()
}

impl IllegalAction {
    pub fn new(seat: Option<usize>, action: Option<ActionType>, reason: IllegalReason) -> Self {
        Self { seat, action, reason }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EngineError {
    #[error(transparent)]
    IllegalAction(#[from] IllegalAction),
    /// Data or programming defect; the hand must be aborted.
    #[error("engine invariant violated: {0}")]
    Invariant(String),
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl EngineError {
    pub fn is_illegal_action(&self) -> bool {
        matches!(self, EngineError::IllegalAction(_))
    }

    /// The refusal reason, when this is an illegal-action error.
    pub fn illegal_reason(&self) -> Option<&IllegalReason> {
        match self {
            EngineError::IllegalAction(e) => Some(&e.reason),
            _ => None,
        }
    }
}
