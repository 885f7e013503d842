use super::rank_groups::RankGroups;
use super::straight_info::{StraightInfo, Wheel};
use super::suit_info::SuitInfo;
use super::Category;
use crate::cards::Card;

/// How a game values the Ace and whether straights/flushes exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcePolicy {
    /// High poker: Ace high, wheel allowed.
    High,
    /// 2-7 lowball: Ace high only, no wheel.
    HighNoWheel,
    /// A-5 lowball: Ace is 1, straights and flushes do not exist.
    Low,
}

/// Pre-computed analysis of a 5-card hand.
/// Built once per combination and read by the high and low evaluators.
#[derive(Debug, Clone)]
pub struct HandAnalysis {
    pub sorted_cards: [Card; 5],
    /// Values under the policy's ace rule, descending.
    pub values: [u8; 5],
    pub rank_groups: RankGroups,
    pub suit_info: SuitInfo,
    pub straight_info: StraightInfo,
    policy: AcePolicy,
}

impl HandAnalysis {
    pub fn new(cards: &[Card; 5], policy: AcePolicy) -> Self {
        let value_of = |c: &Card| match policy {
            AcePolicy::Low => c.rank().low_value(),
            AcePolicy::High | AcePolicy::HighNoWheel => c.rank().value(),
        };

        let mut sorted_cards = *cards;
        sorted_cards.sort_by(|a, b| value_of(b).cmp(&value_of(a)).then(b.suit().cmp(&a.suit())));

        let mut values = [0u8; 5];
        for (v, c) in values.iter_mut().zip(sorted_cards.iter()) {
            *v = value_of(c);
        }

        let rank_groups = RankGroups::from_values(&values);
        let suit_info = SuitInfo::detect(&sorted_cards);
        let straight_info = match policy {
            AcePolicy::High => StraightInfo::detect(&values, Wheel::Allowed),
            AcePolicy::HighNoWheel => StraightInfo::detect(&values, Wheel::Excluded),
            AcePolicy::Low => StraightInfo { is_straight: false, top: None },
        };

        Self { sorted_cards, values, rank_groups, suit_info, straight_info, policy }
    }

    /// Category in priority order (highest to lowest). Flushes never count under `AcePolicy::Low`.
    pub fn category(&self) -> Category {
        let flush = self.suit_info.is_flush && self.policy != AcePolicy::Low;
        let straight = self.straight_info.is_straight;
        let g = &self.rank_groups;

        if flush && straight {
            Category::StraightFlush
        } else if g.quad().is_some() {
            Category::FourOfAKind
        } else if g.has_full_house() {
            Category::FullHouse
        } else if flush {
            Category::Flush
        } else if straight {
            Category::Straight
        } else if g.trips().is_some() {
            Category::ThreeOfAKind
        } else if g.pairs().len() == 2 {
            Category::TwoPair
        } else if g.pairs().len() == 1 {
            Category::Pair
        } else {
            Category::HighCard
        }
    }

    /// Tiebreak values for a category: straights compare by top card only.
    pub fn tiebreak(&self, category: Category) -> [u8; 5] {
        match (category, self.straight_info.top) {
            (Category::Straight | Category::StraightFlush, Some(top)) => [top, 0, 0, 0, 0],
            _ => self.rank_groups.tiebreak(),
        }
    }
}
