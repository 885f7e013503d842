/// Groups rank values by frequency, sorted by (count desc, value desc).
///
/// Values are whatever scale the caller uses (ace-high 2..=14 or ace-low 1..=13).
/// Example: AAAKQ groups as [(14, 3), (13, 1), (12, 1)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankGroups {
    groups: Vec<(u8, u8)>,
}

impl RankGroups {
    pub fn from_values(values: &[u8]) -> Self {
        let mut counts = [0u8; 15];
        for &v in values {
            counts[v as usize] += 1;
        }

        let mut groups: Vec<(u8, u8)> = counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(v, &c)| (v as u8, c))
            .collect();

        // Sort by count (descending), then by value (descending)
        groups.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));

        Self { groups }
    }

    pub fn quad(&self) -> Option<u8> {
        self.groups.iter().find(|(_, count)| *count == 4).map(|(v, _)| *v)
    }

    pub fn trips(&self) -> Option<u8> {
        self.groups.iter().find(|(_, count)| *count == 3).map(|(v, _)| *v)
    }

    /// Pair values, highest first.
    pub fn pairs(&self) -> Vec<u8> {
        self.groups.iter().filter(|(_, count)| *count == 2).map(|(v, _)| *v).collect()
    }

    pub fn has_full_house(&self) -> bool {
        self.trips().is_some() && !self.pairs().is_empty()
    }

    /// Distinct values in group order, zero-padded to five. This is the tiebreak sequence for
    /// every category except straights.
    pub fn tiebreak(&self) -> [u8; 5] {
        let mut out = [0u8; 5];
        for (slot, (v, _)) in out.iter_mut().zip(self.groups.iter()) {
            *slot = *v;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quads() {
        let g = RankGroups::from_values(&[14, 14, 14, 14, 13]);
        assert_eq!(g.quad(), Some(14));
        assert_eq!(g.trips(), None);
        assert_eq!(g.tiebreak(), [14, 13, 0, 0, 0]);
    }

    #[test]
    fn full_house() {
        let g = RankGroups::from_values(&[14, 14, 14, 13, 13]);
        assert!(g.has_full_house());
        assert_eq!(g.trips(), Some(14));
        assert_eq!(g.pairs(), vec![13]);
    }

    #[test]
    fn two_pair_orders_pairs_then_kicker() {
        let g = RankGroups::from_values(&[10, 14, 13, 14, 13]);
        assert_eq!(g.pairs(), vec![14, 13]);
        assert_eq!(g.tiebreak(), [14, 13, 10, 0, 0]);
    }

    #[test]
    fn ace_low_values() {
        let g = RankGroups::from_values(&[1, 2, 3, 4, 1]);
        assert_eq!(g.pairs(), vec![1]);
        assert_eq!(g.tiebreak(), [1, 4, 3, 2, 0]);
    }

    #[test]
    fn high_card_sorted_descending() {
        let g = RankGroups::from_values(&[5, 14, 10, 7, 2]);
        assert_eq!(g.tiebreak(), [14, 10, 7, 5, 2]);
    }
}
