//! Free-form time window parsing.
//!
//! Availability cells look like `"8:00am - 11:30am, 2pm - 10pm"`, or the
//! literal `"all day"`, or are blank. End times of `"midnight"`, `"12am"`,
//! and `"12:00am"` are pinned to 23:59 of the same day, since spans never
//! cross midnight. Anything unparseable is dropped with a diagnostic and
//! parsing continues.

use chrono::{NaiveDate, NaiveTime};
use log::warn;

use crate::models::Timespan;

/// Formats the tolerant clock-time parser accepts, tried in order against
/// the lowercased, whitespace-stripped fragment.
const CLOCK_FORMATS: &[&str] = &[
    "%I:%M:%S%P",
    "%I:%M%P",
    "%I%P",
    "%H:%M:%S",
    "%H:%M",
];

/// End-time spellings that mean "the last posted minute of the day".
const MIDNIGHT_END_ALIASES: &[&str] = &["midnight", "12am", "12:00am"];

/// Date formats accepted for availability column headers and to-fill dates.
const DAY_FORMATS: &[&str] = &["%B %d, %Y", "%b %d, %Y"];

/// Last representable instant of a day, the end bound of an `"all day"` cell.
fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999).expect("static clock constant")
}

/// Parses a single free-form clock time.
///
/// Accepts `8`, `8am`, `8:30`, `8:30pm`, `08:30 PM`, `23:15`, `noon`, and
/// `midnight` (midnight as a *start* time; as an end time callers pin it to
/// 23:59 before reaching this function).
pub fn parse_clock_time(raw: &str) -> Option<NaiveTime> {
    let cleaned: String = raw.trim().to_ascii_lowercase().replace(' ', "");
    if cleaned.is_empty() {
        return None;
    }
    match cleaned.as_str() {
        "noon" => return NaiveTime::from_hms_opt(12, 0, 0),
        "midnight" => return NaiveTime::from_hms_opt(0, 0, 0),
        _ => {}
    }
    for format in CLOCK_FORMATS {
        if let Ok(t) = NaiveTime::parse_from_str(&cleaned, format) {
            return Some(t);
        }
    }
    // A bare hour like "8" or "17"
    if let Ok(hour) = cleaned.parse::<u32>() {
        if hour <= 23 {
            return NaiveTime::from_hms_opt(hour, 0, 0);
        }
    }
    None
}

/// Parses an availability-style cell into dated windows on `day`.
///
/// Returns the windows that parsed; malformed fragments and reversed windows
/// are dropped with a warning. An empty cell yields no windows.
pub fn parse_cell(day: NaiveDate, cell: &str) -> Vec<Timespan> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    if trimmed.eq_ignore_ascii_case("all day") {
        return vec![Timespan::new(
            day.and_time(NaiveTime::MIN),
            day.and_time(end_of_day()),
        )];
    }

    let mut windows = Vec::new();
    for fragment in trimmed.split(',') {
        if !fragment.contains('-') {
            continue;
        }
        let (start_str, end_str) = match fragment.split_once('-') {
            Some(parts) => parts,
            None => continue,
        };

        let end_key = end_str.trim().to_ascii_lowercase();
        let end = if MIDNIGHT_END_ALIASES.contains(&end_key.as_str()) {
            NaiveTime::from_hms_opt(23, 59, 0)
        } else {
            parse_clock_time(end_str)
        };
        let start = parse_clock_time(start_str);

        match (start, end) {
            (Some(start), Some(end)) if start <= end => {
                windows.push(Timespan::new(day.and_time(start), day.and_time(end)));
            }
            (Some(start), Some(end)) => {
                warn!(
                    "dropping reversed window '{}' ({} > {}); windows cannot cross midnight",
                    fragment.trim(),
                    start,
                    end
                );
            }
            _ => {
                warn!("dropping unparseable window '{}'", fragment.trim());
            }
        }
    }
    windows
}

/// Parses a calendar date such as `"June 03, 2024"` or `"Jun 3, 2024"`.
pub fn parse_day_header(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    DAY_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}

/// Renders windows back into the canonical cell format, e.g.
/// `"8:00am - 11:30am, 2:00pm - 10:00pm"`.
pub fn render_windows(windows: &[Timespan]) -> String {
    windows
        .iter()
        .map(|w| {
            format!(
                "{} - {}",
                w.start.time().format("%-I:%M%P"),
                w.end.time().format("%-I:%M%P")
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
    }

    #[test]
    fn clock_times_in_many_spellings() {
        assert_eq!(parse_clock_time("8"), Some(t(8, 0)));
        assert_eq!(parse_clock_time("8am"), Some(t(8, 0)));
        assert_eq!(parse_clock_time("8:30"), Some(t(8, 30)));
        assert_eq!(parse_clock_time("8:30pm"), Some(t(20, 30)));
        assert_eq!(parse_clock_time("08:30 PM"), Some(t(20, 30)));
        assert_eq!(parse_clock_time("23:15"), Some(t(23, 15)));
        assert_eq!(parse_clock_time("12am"), Some(t(0, 0)));
        assert_eq!(parse_clock_time("12pm"), Some(t(12, 0)));
        assert_eq!(parse_clock_time("noon"), Some(t(12, 0)));
        assert_eq!(parse_clock_time("midnight"), Some(t(0, 0)));
    }

    #[test]
    fn nonsense_clock_times_are_rejected()  {
        assert_eq!(parse_clock_time(""), None);
        assert_eq!(parse_clock_time("late"), None);
        assert_eq!(parse_clock_time("25"), None);
        assert_eq!(parse_clock_time("13pm"), None);
    }

    #[test]
    fn simple_cell_with_two_windows() {
        let windows = parse_cell(day(), "8:00am - 11:30am, 2pm - 10pm");
        assert_eq!(windows.len(), 2);
        assert_eq!(windows[0].start.time(), t(8, 0));
        assert_eq!(windows[0].end.time(), t(11, 30));
        assert_eq!(windows[1].start.time(), t(14, 0));
        assert_eq!(windows[1].end.time(), t(22, 0));
        assert!(windows.iter().all(|w| w.start.date() == day()));
    }

    #[test]
    fn all_day_spans_the_whole_date() {
        for spelling in ["all day", "All Day", "ALL DAY"] {
            let windows = parse_cell(day(), spelling);
            assert_eq!(windows.len(), 1);
            assert_eq!(windows[0].start.time(), NaiveTime::MIN);
            assert_eq!(
                windows[0].end.time(),
                NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999).unwrap()
            );
        }
    }

    #[test]
    fn empty_cell_has_no_windows() {
        assert!(parse_cell(day(), "").is_empty());
        assert!(parse_cell(day(), "   ").is_empty());
    }

    #[test]
    fn midnight_ends_are_pinned_to_last_minute() {
        for cell in ["9am - midnight", "9am - 12am", "9am - 12:00am"] {
            let windows = parse_cell(day(), cell);
            assert_eq!(windows.len(), 1, "cell {:?}", cell);
            assert_eq!(windows[0].start.time(), t(9, 0));
            assert_eq!(windows[0].end.time(), t(23, 59));
        }
    }

    #[test]
    fn midnight_as_a_start_is_plain_midnight() {
        let windows = parse_cell(day(), "midnight - 4am");
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].start.time(), t(0, 0));
        assert_eq!(windows[0].end.time(), t(4, 0));
    }

    #[test]
    fn bad_fragments_are_dropped_without_losing_good_ones() {
        let windows = parse_cell(day(), "whenever, 9am - 11am, 6pm - banana");
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].start.time(), t(9, 0));
        assert_eq!(windows[0].end.time(), t(11, 0));
    }

    #[test]
    fn reversed_windows_are_dropped() {
        assert!(parse_cell(day(), "10pm - 2am").is_empty());
    }

    #[test]
    fn day_headers_in_both_month_styles() {
        let expected = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        assert_eq!(parse_day_header("June 03, 2024"), Some(expected));
        assert_eq!(parse_day_header("Jun 03, 2024"), Some(expected));
        assert_eq!(parse_day_header("Jun 3, 2024"), Some(expected));
        assert_eq!(parse_day_header("Employee"), None);
        assert_eq!(parse_day_header("2024-06-03"), None);
    }

    #[test]
    fn rendering_then_reparsing_is_stable() {
        let windows = parse_cell(day(), "8:00am - 11:30am, 2pm - 10pm");
        let rendered = render_windows(&windows);
        assert_eq!(rendered, "8:00am - 11:30am, 2:00pm - 10:00pm");
        assert_eq!(parse_cell(day(), &rendered), windows);
    }
}
