//! Composable shift-preference scoring.
//!
//! An employee's taste in shifts is a tree of [`Preference`] values; scoring
//! a candidate shift walks the tree and returns a real number. Scoring is
//! pure: no IO, no randomness, no user-supplied code. The only predicates
//! available to the `Mixin` variant are the members of the closed [`Tag`]
//! library.

use chrono::{Datelike, NaiveTime};
use serde::{Deserialize, Serialize};

use super::timespan::{ClockSpan, Timespan};

fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("static clock constant")
}

/// The fixed library of named shift predicates.
///
/// Tag names in the preferences table are matched case-insensitively;
/// anything outside this list is rejected at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Morning,
    Afternoon,
    Evening,
    Night,
    Closing,
    NoClosing,
    Opening,
    NoOpening,
    Weekend,
    NoWeekend,
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Tag {
    /// Every recognized tag, in table order.
    pub const ALL: [Tag; 16] = [
        Tag::Morning,
        Tag::Afternoon,
        Tag::Evening,
        Tag::Night,
        Tag::Closing,
        Tag::NoClosing,
        Tag::Opening,
        Tag::NoOpening,
        Tag::Weekend,
        Tag::NoWeekend,
        Tag::Sunday,
        Tag::Monday,
        Tag::Tuesday,
        Tag::Wednesday,
        Tag::Thursday,
        Tag::Friday,
    ];

    /// Canonical lowercase name, as written in the `Tags` column.
    pub fn name(&self) -> &'static str {
        match self {
            Tag::Morning => "morning",
            Tag::Afternoon => "afternoon",
            Tag::Evening => "evening",
            Tag::Night => "night",
            Tag::Closing => "closing",
            Tag::NoClosing => "noclosing",
            Tag::Opening => "opening",
            Tag::NoOpening => "noopening",
            Tag::Weekend => "weekend",
            Tag::NoWeekend => "noweekend",
            Tag::Sunday => "sunday",
            Tag::Monday => "monday",
            Tag::Tuesday => "tuesday",
            Tag::Wednesday => "wednesday",
            Tag::Thursday => "thursday",
            Tag::Friday => "friday",
        }
    }

    /// Looks a tag up by its case-insensitive name.
    pub fn parse(name: &str) -> Option<Tag> {
        let wanted = name.trim().to_ascii_lowercase();
        Tag::ALL.into_iter().find(|tag| tag.name() == wanted)
    }

    /// Evaluates the tag's predicate against a shift.
    pub fn applies_to(&self, shift: &Timespan) -> bool {
        let start = shift.start.time();
        let end = shift.end.time();
        // Monday = 0 .. Sunday = 6
        let weekday = shift.start.date().weekday().num_days_from_monday();
        match self {
            Tag::Morning => end < hm(12, 0),
            Tag::Afternoon => start >= hm(12, 0) && end <= hm(18, 0),
            Tag::Evening => start >= hm(17, 0) && end <= hm(21, 0),
            Tag::Night => start >= hm(20, 0) || end <= hm(6, 0),
            Tag::Closing => end >= hm(20, 0),
            Tag::NoClosing => end < hm(20, 0),
            Tag::Opening => start < hm(9, 0),
            Tag::NoOpening => start >= hm(9, 0),
            Tag::Weekend => weekday >= 5,
            Tag::NoWeekend => weekday < 5,
            Tag::Sunday => weekday == 6,
            Tag::Monday => weekday == 0,
            Tag::Tuesday => weekday == 1,
            Tag::Wednesday => weekday == 2,
            Tag::Thursday => weekday == 3,
            Tag::Friday => weekday == 4,
        }
    }
}

/// A node in an employee's preference tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Preference {
    /// 1.0 iff the shift lies entirely within one of the listed windows.
    SpecificTod { windows: Vec<ClockSpan> },
    /// A distribution over the four times of day, scored by the shift's
    /// start: morning < 12:00, afternoon < 17:00, evening < 20:00, night
    /// otherwise.
    RelativeTod {
        morning: f64,
        afternoon: f64,
        evening: f64,
        night: f64,
    },
    /// 1.0 iff the referenced [`Tag`] predicate holds for the shift.
    Mixin { tag: Tag },
    /// Arithmetic mean of the children's scores; 0.0 when empty.
    Average { children: Vec<Preference> },
    /// Maximum of the children's scores, scaled by `gain`; 0.0 when empty.
    Max { children: Vec<Preference>, gain: f64 },
}

impl Preference {
    /// Builds a [`Preference::RelativeTod`] from raw shift counts, normalized
    /// to a distribution. All-zero counts normalize to the uniform
    /// distribution.
    pub fn relative_tod_from_counts(
        morning: u32,
        afternoon: u32,
        evening: u32,
        night: u32,
    ) -> Preference {
        let total = (morning + afternoon + evening + night) as f64;
        if total == 0.0 {
            return Preference::RelativeTod {
                morning: 0.25,
                afternoon: 0.25,
                evening: 0.25,
                night: 0.25,
            };
        }
        Preference::RelativeTod {
            morning: morning as f64 / total,
            afternoon: afternoon as f64 / total,
            evening: evening as f64 / total,
            night: night as f64 / total,
        }
    }

    /// Scores a candidate shift.
    pub fn score(&self, shift: &Timespan) -> f64 {
        match self {
            Preference::SpecificTod { windows } => {
                if windows.iter().any(|w| w.contains_dated(shift)) {
                    1.0
                } else {
                    0.0
                }
            }
            Preference::RelativeTod {
                morning,
                afternoon,
                evening,
                night,
            } => {
                let start = shift.start.time();
                if start < hm(12, 0) {
                    *morning
                } else if start < hm(17, 0) {
                    *afternoon
                } else if start < hm(20, 0) {
                    *evening
                } else {
                    *night
                }
            }
            Preference::Mixin { tag } => {
                if tag.applies_to(shift) {
                    1.0
                } else {
                    0.0
                }
            }
            Preference::Average { children } => {
                if children.is_empty() {
                    return 0.0;
                }
                let total: f64 = children.iter().map(|c| c.score(shift)).sum();
                total / children.len() as f64
            }
            Preference::Max { children, gain } => {
                let best = children
                    .iter()
                    .map(|c| c.score(shift))
                    .fold(f64::NEG_INFINITY, f64::max);
                if best.is_finite() {
                    best * gain
                } else {
                    0.0
                }
            }
        }
    }
}
