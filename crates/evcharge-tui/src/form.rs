#![forbid(unsafe_code)]

//! Form state behind the four input controls.
//!
//! The controls only ever hold in-range values, so [`FormState::snapshot`]
//! always yields a valid [`RawInput`].

use evcharge_core::{DayOfWeek, DayType, Hour, Month, RawInput};

/// Input controls in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Hour,
    DayOfWeek,
    Month,
    DayType,
}

impl Field {
    pub const ALL: [Self; 4] = [Self::Hour, Self::DayOfWeek, Self::Month, Self::DayType];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hour => "Hour of Day",
            Self::DayOfWeek => "Day of Week",
            Self::Month => "Month",
            Self::DayType => "Day Type",
        }
    }

    const fn position(self) -> usize {
        match self {
            Self::Hour => 0,
            Self::DayOfWeek => 1,
            Self::Month => 2,
            Self::DayType => 3,
        }
    }

    /// Next control, wrapping to the first.
    #[must_use]
    pub const fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    /// Previous control, wrapping to the last.
    #[must_use]
    pub const fn prev(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    input: RawInput,
    focus: Field,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(Hour::default())
    }
}

impl FormState {
    #[must_use]
    pub fn new(default_hour: Hour) -> Self {
        Self {
            input: RawInput {
                hour: default_hour,
                ..RawInput::default()
            },
            focus: Field::Hour,
        }
    }

    #[must_use]
    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Current control values as a fresh input.
    #[must_use]
    pub fn snapshot(&self) -> RawInput {
        self.input
    }

    /// Step the focused control forward. Returns whether the value changed.
    pub fn increment(&mut self) -> bool {
        let before = self.input;
        match self.focus {
            Field::Hour => self.input.hour = self.input.hour.saturating_next(),
            Field::DayOfWeek => self.input.day_of_week = self.input.day_of_week.saturating_next(),
            Field::Month => self.input.month = self.input.month.saturating_next(),
            Field::DayType => self.input.day_type = DayType::Weekend,
        }
        before != self.input
    }

    /// Step the focused control back. Returns whether the value changed.
    pub fn decrement(&mut self) -> bool {
        let before = self.input;
        match self.focus {
            Field::Hour => self.input.hour = self.input.hour.saturating_prev(),
            Field::DayOfWeek => self.input.day_of_week = self.input.day_of_week.saturating_prev(),
            Field::Month => self.input.month = self.input.month.saturating_prev(),
            Field::DayType => self.input.day_type = DayType::Weekday,
        }
        before != self.input
    }

    /// Jump the focused control to its first option.
    pub fn jump_first(&mut self) -> bool {
        let before = self.input;
        match self.focus {
            Field::Hour => self.input.hour = Hour::MIN,
            Field::DayOfWeek => self.input.day_of_week = DayOfWeek::Monday,
            Field::Month => self.input.month = Month::JANUARY,
            Field::DayType => self.input.day_type = DayType::Weekday,
        }
        before != self.input
    }

    /// Jump the focused control to its last option.
    pub fn jump_last(&mut self) -> bool {
        let before = self.input;
        match self.focus {
            Field::Hour => self.input.hour = Hour::MAX,
            Field::DayOfWeek => self.input.day_of_week = DayOfWeek::Sunday,
            Field::Month => self.input.month = Month::DECEMBER,
            Field::DayType => self.input.day_type = DayType::Weekend,
        }
        before != self.input
    }

    /// Display text for one control's current value.
    #[must_use]
    pub fn value_text(&self, field: Field) -> String {
        match field {
            Field::Hour => format!("{:>2}  {}", self.input.hour.get(), slider_track(self.input.hour)),
            Field::DayOfWeek => self.input.day_of_week.name().to_string(),
            Field::Month => self.input.month.to_string(),
            Field::DayType => DayType::ALL
                .iter()
                .map(|kind| {
                    if *kind == self.input.day_type {
                        format!("(*) {kind}")
                    } else {
                        format!("( ) {kind}")
                    }
                })
                .collect::<Vec<_>>()
                .join("  "),
        }
    }
}

/// `[-----|------------------]` with the knob at the hour's position.
fn slider_track(hour: Hour) -> String {
    let knob = usize::from(hour.get());
    let mut track = String::with_capacity(26);
    track.push('[');
    for pos in 0..=usize::from(Hour::MAX.get()) {
        track.push(if pos == knob { '|' } else { '-' });
    }
    track.push(']');
    track
}
