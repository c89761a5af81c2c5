//! Static behavioral notes shown next to a prediction.
//!
//! The note depends only on the weekend flag, never on the predicted value.

use serde::Serialize;

/// Which canned note accompanies a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Narrative {
    Weekday,
    Weekend,
}

struct NarrativeText {
    title: &'static str,
    body: &'static str,
}

const TABLE: [(Narrative, NarrativeText); 2] = [
    (
        Narrative::Weekday,
        NarrativeText {
            title: "Weekday behavior",
            body: "Charging demand peaks during commute hours \
                   (07:00-09:00 & 18:00-20:00) due to office travel patterns.",
        },
    ),
    (
        Narrative::Weekend,
        NarrativeText {
            title: "Weekend behavior",
            body: "Charging demand shifts to flexible hours \
                   (11:00-15:00 & 18:00-22:00), with approximately 15-25% higher \
                   residential charging compared to weekdays.",
        },
    ),
];

impl Narrative {
    #[must_use]
    pub const fn for_weekend_flag(is_weekend: bool) -> Self {
        if is_weekend { Self::Weekend } else { Self::Weekday }
    }

    fn entry(self) -> &'static NarrativeText {
        let idx = match self {
            Self::Weekday => 0,
            Self::Weekend => 1,
        };
        debug_assert!(TABLE[idx].0 == self);
        &TABLE[idx].1
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        self.entry().title
    }

    #[must_use]
    pub fn body(self) -> &'static str {
        self.entry().body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_selects_matching_entry() {
        assert_eq!(Narrative::for_weekend_flag(true), Narrative::Weekend);
        assert_eq!(Narrative::for_weekend_flag(false), Narrative::Weekday);
    }

    #[test]
    fn weekend_text_names_flexible_hours() {
        let body = Narrative::Weekend.body();
        assert!(body.contains("11:00-15:00"));
        assert!(body.contains("18:00-22:00"));
        assert!(body.contains("15-25%"));
        assert_eq!(Narrative::Weekend.title(), "Weekend behavior");
    }

    #[test]
    fn weekday_text_names_commute_peaks() {
        let body = Narrative::Weekday.body();
        assert!(body.contains("07:00-09:00"));
        assert!(body.contains("18:00-20:00"));
        assert!(body.contains("commute"));
    }

    #[test]
    fn table_rows_are_in_variant_order() {
        assert_eq!(TABLE[0].0, Narrative::Weekday);
        assert_eq!(TABLE[1].0, Narrative::Weekend);
    }
}
