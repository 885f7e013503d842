//! Variant and evaluator-tag dispatch.

use crate::cards::Card;
use crate::evaluator::{
    evaluate_badacey, evaluate_badeucey, evaluate_badugi, evaluate_hi_lo_eight, evaluate_high,
    evaluate_low, BadugiMode, EvalError, Evaluation, LowType,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum EvaluatorTag {
    High,
    #[serde(rename = "low-27")]
    Low27,
    #[serde(rename = "low-a5")]
    LowA5,
    BadugiLow,
    BadugiHigh,
    #[serde(rename = "split-badugi-27")]
    SplitBadugi27,
    #[serde(rename = "split-badugi-a5")]
    SplitBadugiA5,
    #[serde(rename = "hi-lo-8-split")]
    HiLoEight,
}

impl EvaluatorTag {
    pub const ALL: [EvaluatorTag; 8] = [
        EvaluatorTag::High,
        EvaluatorTag::Low27,
        EvaluatorTag::LowA5,
        EvaluatorTag::BadugiLow,
        EvaluatorTag::BadugiHigh,
        EvaluatorTag::SplitBadugi27,
        EvaluatorTag::SplitBadugiA5,
        EvaluatorTag::HiLoEight,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            EvaluatorTag::High => "high",
            EvaluatorTag::Low27 => "low-27",
            EvaluatorTag::LowA5 => "low-a5",
            EvaluatorTag::BadugiLow => "badugi-low",
            EvaluatorTag::BadugiHigh => "badugi-high",
            EvaluatorTag::SplitBadugi27 => "split-badugi-27",
            EvaluatorTag::SplitBadugiA5 => "split-badugi-a5",
            EvaluatorTag::HiLoEight => "hi-lo-8-split",
        }
    }

    /// Evaluate `cards` with this tag's handler.
    pub fn evaluate(self, cards: &[Card]) -> Result<Evaluation, EvalError> {
        match self {
            EvaluatorTag::High => evaluate_high(cards),
            EvaluatorTag::Low27 => evaluate_low(cards, LowType::DeuceSeven, None),
            EvaluatorTag::LowA5 => evaluate_low(cards, LowType::AceFive, None),
            EvaluatorTag::BadugiLow => evaluate_badugi(cards, BadugiMode::Low),
            EvaluatorTag::BadugiHigh => evaluate_badugi(cards, BadugiMode::High),
            EvaluatorTag::SplitBadugi27 => evaluate_badeucey(cards),
            EvaluatorTag::SplitBadugiA5 => evaluate_badacey(cards),
            EvaluatorTag::HiLoEight => evaluate_hi_lo_eight(cards),
        }
    }
}

impl fmt::Display for EvaluatorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RegistryParseError {
    #[error("unknown evaluator tag: '{0}'")]
    Tag(String),
    #[error("unknown variant: '{0}'")]
    Variant(String),
}

impl FromStr for EvaluatorTag {
    type Err = RegistryParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim().to_ascii_lowercase();
        EvaluatorTag::ALL
            .iter()
            .copied()
            .find(|tag| tag.name() == t)
            .ok_or_else(|| RegistryParseError::Tag(s.to_string()))
    }
}

/// Dispatch to the first tag of the chain.
///
/// ```
/// use badugi_engine::cards::parse_cards;
/// use badugi_engine::registry::{evaluate_hand, Variant};
///
/// let e = evaluate_hand(&parse_cards("AS 2D 3H 4C").unwrap(), Variant::Badugi.tags()).unwrap();
/// assert_eq!(e.size, 4);
/// ```
pub fn evaluate_hand(cards: &[Card], tags: &[EvaluatorTag]) -> Result<Evaluation, EvalError> {
    let primary = tags.first().ok_or(EvalError::NoEvaluator)?;
    primary.evaluate(cards)
}

/// Supported draw games. Each is a fixed-limit game with up to three draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum Variant {
    #[default]
    Badugi,
    Badeucey,
    Badacey,
    #[serde(rename = "2-7-triple-draw")]
    DeuceSevenTripleDraw,
    #[serde(rename = "a-5-triple-draw")]
    AceFiveTripleDraw,
}

impl Variant {
    pub const ALL: [Variant; 5] = [
        Variant::Badugi,
        Variant::Badeucey,
        Variant::Badacey,
        Variant::DeuceSevenTripleDraw,
        Variant::AceFiveTripleDraw,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Variant::Badugi => "badugi",
            Variant::Badeucey => "badeucey",
            Variant::Badacey => "badacey",
            Variant::DeuceSevenTripleDraw => "2-7-triple-draw",
            Variant::AceFiveTripleDraw => "a-5-triple-draw",
        }
    }

    /// Ordered evaluator chain; the first tag decides showdowns.
    pub const fn tags(self) -> &'static [EvaluatorTag] {
        match self {
            Variant::Badugi => &[EvaluatorTag::BadugiLow],
            Variant::Badeucey => {
                &[EvaluatorTag::SplitBadugi27, EvaluatorTag::BadugiLow, EvaluatorTag::Low27]
            }
            Variant::Badacey => {
                &[EvaluatorTag::SplitBadugiA5, EvaluatorTag::BadugiLow, EvaluatorTag::LowA5]
            }
            Variant::DeuceSevenTripleDraw => &[EvaluatorTag::Low27],
            Variant::AceFiveTripleDraw => &[EvaluatorTag::LowA5],
        }
    }

    pub const fn hand_size(self) -> usize {
        match self {
            Variant::Badugi => 4,
            _ => 5,
        }
    }

    pub const fn max_draws(self) -> usize {
        3
    }

    /// Whether each pot is split between a high (Badugi) half and a low half.
    pub fn is_split(self) -> bool {
        matches!(
            self.tags().first(),
            Some(EvaluatorTag::SplitBadugi27 | EvaluatorTag::SplitBadugiA5 | EvaluatorTag::HiLoEight)
        )
    }

    pub fn evaluate(self, cards: &[Card]) -> Result<Evaluation, EvalError> {
        evaluate_hand(cards, self.tags())
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = RegistryParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim().to_ascii_lowercase();
        Variant::ALL
            .iter()
            .copied()
            .find(|v| v.name() == t)
            .ok_or_else(|| RegistryParseError::Variant(s.to_string()))
    }
}
