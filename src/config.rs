//! Table configuration, loadable from JSON.

use crate::lifecycle::{BlindLevel, BlindSchedule};
use crate::registry::Variant;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const MIN_SEATS: usize = 2;
pub const MAX_SEATS: usize = 8;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(String),
    #[error("malformed config: {0}")]
    Parse(String),
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error("max_draws {requested} exceeds the variant's {max} draws")]
    TooManyDraws { requested: usize, max: usize },
}

/// Everything needed to seat a table and run hands on it.
///
/// ```
/// use badugi_engine::config::TableConfig;
/// use badugi_engine::registry::Variant;
///
/// let cfg = TableConfig::from_json_str(r#"{ "variant": "badeucey", "num_seats": 4 }"#).unwrap();
/// assert_eq!(cfg.variant, Variant::Badeucey);
/// assert_eq!(cfg.starting_stack, 1000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub variant: Variant,
    pub num_seats: usize,
    pub starting_stack: u64,
    pub blinds: Vec<BlindLevel>,
    /// Deck seed; `None` seeds from the thread RNG.
    pub seed: Option<u64>,
    /// Fewer draws than the variant deals; never more.
    pub max_draws: Option<usize>,
    pub dealer_index: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Badugi,
            num_seats: 6,
            starting_stack: 1000,
            blinds: vec![BlindLevel { small_blind: 10, big_blind: 20, ante: 0, hands: None }],
            seed: None,
            max_draws: None,
            dealer_index: 0,
        }
    }
}

impl TableConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: TableConfig =
            serde_json::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_SEATS..=MAX_SEATS).contains(&self.num_seats) {
            return Err(ConfigError::Invalid(format!(
                "num_seats must be {MIN_SEATS}..={MAX_SEATS}, got {}",
                self.num_seats
            )));
        }
        if self.starting_stack == 0 {
            return Err(ConfigError::Invalid("starting_stack must be positive".into()));
        }
        if self.dealer_index >= self.num_seats {
            return Err(ConfigError::Invalid(format!(
                "dealer_index {} out of range for {} seats",
                self.dealer_index, self.num_seats
            )));
        }
        if self.num_seats * self.variant.hand_size() > 52 {
            return Err(ConfigError::Invalid("not enough cards for every seat".into()));
        }
        let max = self.variant.max_draws();
        if let Some(requested) = self.max_draws.filter(|&n| n > max) {
            return Err(ConfigError::TooManyDraws { requested, max });
        }
        BlindSchedule::new(self.blinds.clone()).map(|_| ())
    }

    pub fn schedule(&self) -> Result<BlindSchedule, ConfigError> {
        BlindSchedule::new(self.blinds.clone())
    }

    pub fn max_draws(&self) -> usize {
        let max = self.variant.max_draws();
        self.max_draws.map_or(max, |n| n.min(max))
    }

    /// Context for the first hand, at the first blind level.
    pub fn first_hand(&self) -> Result<HandContext, ConfigError> {
        let schedule = self.schedule()?;
        let level = schedule.level(0);
        Ok(HandContext::at_level(self.num_seats, self.starting_stack, self.dealer_index, level))
    }
}

/// Parameters for dealing one hand on a fresh table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandContext {
    pub num_seats: usize,
    pub starting_stack: u64,
    pub small_blind: u64,
    pub big_blind: u64,
    pub ante: u64,
    pub dealer_index: usize,
}

impl HandContext {
    pub fn at_level(
        num_seats: usize,
        starting_stack: u64,
        dealer_index: usize,
        level: BlindLevel,
    ) -> Self {
        Self {
            num_seats,
            starting_stack,
            small_blind: level.small_blind,
            big_blind: level.big_blind,
            ante: level.ante,
            dealer_index,
        }
    }
}
