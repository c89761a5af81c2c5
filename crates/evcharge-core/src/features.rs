//! Input-to-feature encoding.
//!
//! The forest was trained on `(hour, day_of_week, is_weekend, month)` in that
//! order. [`FEATURE_NAMES`] is the schema the artifact must declare; the
//! loader rejects anything else.

use serde::Serialize;

use crate::input::RawInput;

/// Feature names in model column order.
pub const FEATURE_NAMES: [&str; 4] = ["hour", "day_of_week", "is_weekend", "month"];

/// Fixed-order numeric features for one prediction request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FeatureVector {
    pub hour: u8,
    pub day_of_week: u8,
    pub is_weekend: u8,
    pub month: u8,
}

impl FeatureVector {
    /// Number of model inputs.
    pub const LEN: usize = FEATURE_NAMES.len();

    /// Columns in training order.
    #[must_use]
    pub fn as_array(&self) -> [f64; Self::LEN] {
        [
            f64::from(self.hour),
            f64::from(self.day_of_week),
            f64::from(self.is_weekend),
            f64::from(self.month),
        ]
    }

    #[must_use]
    pub const fn is_weekend(&self) -> bool {
        self.is_weekend == 1
    }
}

/// Encode a form snapshot.
///
/// Pure and total: weekday names become 0..=6 starting Monday, `Weekend`
/// becomes 1 (anything else 0), hour and month pass through untouched.
#[must_use]
pub fn encode(input: &RawInput) -> FeatureVector {
    FeatureVector {
        hour: input.hour.get(),
        day_of_week: input.day_of_week.index(),
        is_weekend: u8::from(input.day_type.is_weekend()),
        month: input.month.get(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{DayOfWeek, DayType, Hour, Month};

    fn input(hour: i64, day: DayOfWeek, month: i64, day_type: DayType) -> RawInput {
        RawInput::new(
            Hour::new(hour).expect("hour"),
            day,
            Month::new(month).expect("month"),
            day_type,
        )
    }

    #[test]
    fn weekdays_map_to_calendar_indices() {
        for (expected, day) in DayOfWeek::ALL.into_iter().enumerate() {
            let fv = encode(&input(12, day, 6, DayType::Weekday));
            assert_eq!(usize::from(fv.day_of_week), expected, "{day}");
        }
    }

    #[test]
    fn weekend_flag_follows_day_type_only() {
        let weekend = encode(&input(12, DayOfWeek::Tuesday, 6, DayType::Weekend));
        let weekday = encode(&input(12, DayOfWeek::Sunday, 6, DayType::Weekday));
        assert_eq!(weekend.is_weekend, 1);
        assert_eq!(weekday.is_weekend, 0);
    }

    #[test]
    fn commute_morning_scenario() {
        let fv = encode(&input(8, DayOfWeek::Monday, 3, DayType::Weekday));
        assert_eq!(fv.as_array(), [8.0, 0.0, 0.0, 3.0]);
        assert!(!fv.is_weekend());
    }

    #[test]
    fn weekend_afternoon_scenario() {
        let fv = encode(&input(13, DayOfWeek::Saturday, 12, DayType::Weekend));
        assert_eq!(fv.as_array(), [13.0, 5.0, 1.0, 12.0]);
        assert!(fv.is_weekend());
    }

    #[test]
    fn boundaries_pass_through() {
        let low = encode(&input(0, DayOfWeek::Monday, 1, DayType::Weekday));
        let high = encode(&input(23, DayOfWeek::Monday, 12, DayType::Weekday));
        assert_eq!((low.hour, low.month), (0, 1));
        assert_eq!((high.hour, high.month), (23, 12));
    }
}
