//! badugi-engine: rules engine for Badugi and triple-draw lowball.
//!
//! Goals:
//! - Deterministic play from a seeded deck
//! - Value-style state: every transition takes a `HandState` and returns a new one
//! - No panics for invalid input; illegal actions come back as `Err` with the state untouched
//!
//! ## Quick start: compare two Badugi hands
//! ```
//! use badugi_engine::cards::parse_cards;
//! use badugi_engine::evaluator::compare_evaluations;
//! use badugi_engine::registry::Variant;
//! use std::cmp::Ordering;
//!
//! let four = Variant::Badugi.evaluate(&parse_cards("KC QD JH TS").unwrap()).unwrap();
//! let three = Variant::Badugi.evaluate(&parse_cards("AC 2D 3H 4H").unwrap()).unwrap();
//! assert_eq!(four.size, 4);
//! assert_eq!(compare_evaluations(&four, &three), Ordering::Less);
//! ```
//!
//! ## Playing a hand
//! ```
//! use badugi_engine::betting::Action;
//! use badugi_engine::config::TableConfig;
//! use badugi_engine::session::Session;
//!
//! let cfg = TableConfig { num_seats: 3, seed: Some(7), ..TableConfig::default() };
//! let mut session = Session::new(cfg).unwrap();
//! session.new_hand().unwrap();
//! session.act(Action::fold(0)).unwrap();
//! let state = session.act(Action::fold(1)).unwrap();
//! assert!(state.hand_over);
//! assert_eq!(state.players[2].stack, 1010);
//! ```
//!
//! ## Headless runner
//! ```sh
//! cargo run --bin badugi -- --config table.json --hands 100
//! ```

pub mod betting;
pub mod cards;
pub mod config;
pub mod deck;
pub mod draw;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod lifecycle;
pub mod observation;
pub mod registry;
pub mod session;
pub mod showdown;
pub mod table;

pub use error::{EngineError, IllegalAction, IllegalReason};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
