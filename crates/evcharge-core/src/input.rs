//! Raw form inputs.
//!
//! Hour and month are range-checked when constructed; everything downstream
//! of [`RawInput`] trusts them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Hour of day, `0..=23`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Hour(u8);

impl Hour {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(23);

    pub fn new(hour: i64) -> Result<Self, InputError> {
        match u8::try_from(hour) {
            Ok(h) if h <= Self::MAX.0 => Ok(Self(h)),
            _ => Err(InputError::HourOutOfRange(hour)),
        }
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// One hour later, clamped at 23.
    #[must_use]
    pub const fn saturating_next(self) -> Self {
        if self.0 >= Self::MAX.0 { self } else { Self(self.0 + 1) }
    }

    /// One hour earlier, clamped at 0.
    #[must_use]
    pub const fn saturating_prev(self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}

impl Default for Hour {
    fn default() -> Self {
        Self(12)
    }
}

impl TryFrom<i64> for Hour {
    type Error = InputError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Hour> for u8 {
    fn from(hour: Hour) -> Self {
        hour.0
    }
}

impl fmt::Display for Hour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}

/// Calendar month, `1..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Month(u8);

impl Month {
    pub const JANUARY: Self = Self(1);
    pub const DECEMBER: Self = Self(12);

    pub fn new(month: i64) -> Result<Self, InputError> {
        match u8::try_from(month) {
            Ok(m) if (Self::JANUARY.0..=Self::DECEMBER.0).contains(&m) => Ok(Self(m)),
            _ => Err(InputError::MonthOutOfRange(month)),
        }
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn saturating_next(self) -> Self {
        if self.0 >= Self::DECEMBER.0 { self } else { Self(self.0 + 1) }
    }

    #[must_use]
    pub const fn saturating_prev(self) -> Self {
        if self.0 <= Self::JANUARY.0 { self } else { Self(self.0 - 1) }
    }
}

impl Default for Month {
    fn default() -> Self {
        Self::JANUARY
    }
}

impl TryFrom<i64> for Month {
    type Error = InputError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Day of week in calendar order starting Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DayOfWeek {
    #[default]
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Training-time code: Monday=0 through Sunday=6.
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::Monday => 0,
            Self::Tuesday => 1,
            Self::Wednesday => 2,
            Self::Thursday => 3,
            Self::Friday => 4,
            Self::Saturday => 5,
            Self::Sunday => 6,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }

    #[must_use]
    pub const fn saturating_next(self) -> Self {
        let idx = self.index() as usize;
        if idx + 1 < Self::ALL.len() { Self::ALL[idx + 1] } else { self }
    }

    #[must_use]
    pub const fn saturating_prev(self) -> Self {
        let idx = self.index() as usize;
        if idx > 0 { Self::ALL[idx - 1] } else { self }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DayOfWeek {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|day| day.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| InputError::UnknownDay(s.to_string()))
    }
}

/// Weekday/weekend flag chosen independently of the day of week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DayType {
    #[default]
    Weekday,
    Weekend,
}

impl DayType {
    pub const ALL: [Self; 2] = [Self::Weekday, Self::Weekend];

    #[must_use]
    pub const fn is_weekend(self) -> bool {
        matches!(self, Self::Weekend)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Weekday => "Weekday",
            Self::Weekend => "Weekend",
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DayType {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| InputError::UnknownDayType(s.to_string()))
    }
}

/// One snapshot of the four form controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RawInput {
    pub hour: Hour,
    pub day_of_week: DayOfWeek,
    pub month: Month,
    pub day_type: DayType,
}

impl RawInput {
    #[must_use]
    pub const fn new(hour: Hour, day_of_week: DayOfWeek, month: Month, day_type: DayType) -> Self {
        Self {
            hour,
            day_of_week,
            month,
            day_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hour_accepts_full_range_and_rejects_outside() {
        assert_eq!(Hour::new(0).map(Hour::get), Ok(0));
        assert_eq!(Hour::new(23).map(Hour::get), Ok(23));
        assert_eq!(Hour::new(24), Err(InputError::HourOutOfRange(24)));
        assert_eq!(Hour::new(-1), Err(InputError::HourOutOfRange(-1)));
    }

    #[test]
    fn month_accepts_full_range_and_rejects_outside() {
        assert_eq!(Month::new(1).map(Month::get), Ok(1));
        assert_eq!(Month::new(12).map(Month::get), Ok(12));
        assert_eq!(Month::new(0), Err(InputError::MonthOutOfRange(0)));
        assert_eq!(Month::new(13), Err(InputError::MonthOutOfRange(13)));
    }

    #[test]
    fn form_defaults_match_controls() {
        let input = RawInput::default();
        assert_eq!(input.hour.get(), 12);
        assert_eq!(input.day_of_week, DayOfWeek::Monday);
        assert_eq!(input.month.get(), 1);
        assert_eq!(input.day_type, DayType::Weekday);
    }

    #[test]
    fn stepping_saturates_at_both_ends() {
        assert_eq!(Hour::MAX.saturating_next(), Hour::MAX);
        assert_eq!(Hour::MIN.saturating_prev(), Hour::MIN);
        assert_eq!(Month::DECEMBER.saturating_next(), Month::DECEMBER);
        assert_eq!(Month::JANUARY.saturating_prev(), Month::JANUARY);
        assert_eq!(DayOfWeek::Sunday.saturating_next(), DayOfWeek::Sunday);
        assert_eq!(DayOfWeek::Monday.saturating_prev(), DayOfWeek::Monday);
        assert_eq!(DayOfWeek::Friday.saturating_next(), DayOfWeek::Saturday);
    }

    #[test]
    fn day_names_parse_case_insensitively() {
        assert_eq!("saturday".parse::<DayOfWeek>(), Ok(DayOfWeek::Saturday));
        assert_eq!(" Monday ".parse::<DayOfWeek>(), Ok(DayOfWeek::Monday));
        assert_eq!(
            "Funday".parse::<DayOfWeek>(),
            Err(InputError::UnknownDay("Funday".into()))
        );
        assert_eq!("WEEKEND".parse::<DayType>(), Ok(DayType::Weekend));
        assert!("holiday".parse::<DayType>().is_err());
    }

    #[test]
    fn hour_deserialization_enforces_range() {
        let ok: Hour = serde_json::from_str("7").expect("valid hour");
        assert_eq!(ok.get(), 7);
        assert!(serde_json::from_str::<Hour>("31").is_err());
    }
}
