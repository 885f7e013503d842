/// Whether five rank values form a straight, and its top value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StraightInfo {
    pub is_straight: bool,
    pub top: Option<u8>,
}

/// How the wheel (A-2-3-4-5) is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wheel {
    /// Ace may play low; the wheel is a five-high straight.
    Allowed,
    /// Ace is strictly high (2-7 lowball); A-2-3-4-5 is not a straight.
    Excluded,
}

impl StraightInfo {
    /// Detect a straight from ace-high values (2..=14), in any order.
    pub fn detect(values: &[u8; 5], wheel: Wheel) -> Self {
        let mut sorted = *values;
        sorted.sort_unstable_by(|a, b| b.cmp(a));

        let is_consecutive = (0..4).all(|i| sorted[i] == sorted[i + 1] + 1);
        if is_consecutive {
            return StraightInfo { is_straight: true, top: Some(sorted[0]) };
        }

        if wheel == Wheel::Allowed && sorted == [14, 5, 4, 3, 2] {
            return StraightInfo { is_straight: true, top: Some(5) };
        }

        StraightInfo { is_straight: false, top: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_straight() {
        let info = StraightInfo::detect(&[13, 12, 11, 10, 9], Wheel::Allowed);
        assert!(info.is_straight);
        assert_eq!(info.top, Some(13));
    }

    #[test]
    fn unsorted_input() {
        let info = StraightInfo::detect(&[9, 13, 10, 11, 12], Wheel::Excluded);
        assert!(info.is_straight);
        assert_eq!(info.top, Some(13));
    }

    #[test]
    fn wheel_is_five_high_when_allowed() {
        let info = StraightInfo::detect(&[14, 2, 3, 4, 5], Wheel::Allowed);
        assert!(info.is_straight);
        assert_eq!(info.top, Some(5));
    }

    #[test]
    fn wheel_is_not_a_straight_in_deuce_to_seven() {
        let info = StraightInfo::detect(&[14, 2, 3, 4, 5], Wheel::Excluded);
        assert!(!info.is_straight);
        assert_eq!(info.top, None);
    }

    #[test]
    fn pair_is_not_a_straight() {
        let info = StraightInfo::detect(&[14, 14, 13, 12, 11], Wheel::Allowed);
        assert!(!info.is_straight);
    }
}
