//! Volume scaling
//!
//! The module's volume runs from 0 to 30 (0x1E). The driver exposes
//! percent and converts with round-half-up integer arithmetic.

/// Module volume ceiling
pub const MAX_VOLUME_UNITS: u8 = 0x1E;

/// Clamp a requested volume to 0-100 percent
pub fn clamp_percent(percent: i32) -> u8 {
    percent.clamp(0, 100) as u8
}

/// Convert percent to module units: round(percent * 30 / 100)
///
/// Out-of-range percentages are clamped first.
pub fn percent_to_units(percent: i32) -> u8 {
    let percent = u32::from(clamp_percent(percent));
    let max = u32::from(MAX_VOLUME_UNITS);
    ((percent * max + 50) / 100) as u8
}

/// Convert module units to percent: round(units * 100 / 30)
///
/// Values above the module ceiling saturate at 100.
pub fn units_to_percent(units: u16) -> u8 {
    let max = u32::from(MAX_VOLUME_UNITS);
    let units = u32::from(units).min(max);
    ((units * 100 + max / 2) / max) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_percent_to_units() {
        assert_eq!(percent_to_units(0), 0);
        assert_eq!(percent_to_units(5), 2); // 1.5 rounds up
        assert_eq!(percent_to_units(50), 15);
        assert_eq!(percent_to_units(100), 30);
    }

    #[test]
    fn test_percent_clamping() {
        assert_eq!(percent_to_units(-20), percent_to_units(0));
        assert_eq!(percent_to_units(101), percent_to_units(100));
        assert_eq!(percent_to_units(i32::MIN), 0);
        assert_eq!(percent_to_units(i32::MAX), 30);
    }

    #[test]
    fn test_units_to_percent() {
        assert_eq!(units_to_percent(0), 0);
        assert_eq!(units_to_percent(1), 3);
        assert_eq!(units_to_percent(15), 50);
        assert_eq!(units_to_percent(30), 100);
        assert_eq!(units_to_percent(0x00FF), 100);
    }

    #[test]
    fn test_units_survive_round_trip() {
        for units in 0..=MAX_VOLUME_UNITS {
            let percent = units_to_percent(u16::from(units));
            assert_eq!(percent_to_units(i32::from(percent)), units);
        }
    }

    proptest! {
        #[test]
        fn percent_round_trip_within_one_step(percent in 0i32..=100) {
            let back = units_to_percent(u16::from(percent_to_units(percent)));
            // One unit is 3.33%, so rounding both ways lands within 2%
            prop_assert!((i32::from(back) - percent).abs() <= 2);
        }

        #[test]
        fn out_of_range_percent_clamps(percent in any::<i32>()) {
            let expected = if percent < 0 { 0 } else if percent > 100 { 30 } else { percent_to_units(percent) };
            prop_assert_eq!(percent_to_units(percent), expected);
        }
    }
}
