// src/academic/mod.rs

use chrono::{Datelike, NaiveDate, Utc};
use serde::Serialize;
use tracing::warn;

mod parse;

pub use parse::{parse_leading_int, YearInput};

/// Month the academic year starts in (September).
const START_MONTH: u32 = 9;

/// Boundaries and display labels for the academic year starting in `year`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicYearInfo {
    #[serde(skip)]
    year: i32,
    #[serde(skip)]
    start_date: NaiveDate,
    #[serde(skip)]
    end_date: NaiveDate,
    /// September 1 of the start year, `YYYY-MM-DD`. Years past 9999 carry a
    /// leading `+` (`+12345-09-01`).
    pub start: String,
    /// August 31 of the following year, `YYYY-MM-DD`.
    pub end: String,
    /// `2025-2026`
    pub range_full: String,
    /// `25-26`
    pub range_short: String,
    /// `2526`
    pub range_compact: String,
    /// `2025-26`
    pub range_mixed: String,
    /// `2025–2026`, en-dash, for display.
    pub label: String,
}

impl AcademicYearInfo {
    /// Returns `None` when either boundary falls outside chrono's date range.
    pub fn for_year(year: i32) -> Option<Self> {
        let next = year.checked_add(1)?;
        let start = NaiveDate::from_ymd_opt(year, START_MONTH, 1)?;
        let end = NaiveDate::from_ymd_opt(next, 8, 31)?;

        let (full, next_full) = (year.to_string(), next.to_string());
        let (short, next_short) = (last_two(&full), last_two(&next_full));

        Some(Self {
            year,
            start_date: start,
            end_date: end,
            start: start.format("%Y-%m-%d").to_string(),
            end: end.format("%Y-%m-%d").to_string(),
            range_full: format!("{}-{}", full, next_full),
            range_short: format!("{}-{}", short, next_short),
            range_compact: format!("{}{}", short, next_short),
            range_mixed: format!("{}-{}", full, next_short),
            label: format!("{}\u{2013}{}", full, next_full),
        })
    }

    /// Starting calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Both boundaries are inclusive.
    pub fn contains(&self, date: NaiveDate) -> bool {
        (self.start_date..=self.end_date).contains(&date)
    }
}

/// Last two characters of the decimal form (whole string if shorter).
fn last_two(s: &str) -> &str {
    &s[s.len().saturating_sub(2)..]
}

/// Compute the academic year info for a year given as text or number.
///
/// Text is read with leading-prefix integer parsing, so `"2025"`,
/// `"2025-26"` and `2025` all give the same result. Returns `None` (and logs
/// a warning) when no year can be read or the year is out of calendar range.
pub fn academic_year(input: impl Into<YearInput>) -> Option<AcademicYearInfo> {
    let input = input.into();
    let Some(parsed) = input.parse() else {
        warn!(input = %input, "invalid academic year input");
        return None;
    };
    let Ok(year) = i32::try_from(parsed) else {
        warn!(input = %input, year = parsed, "academic year out of range");
        return None;
    };
    let info = AcademicYearInfo::for_year(year);
    if info.is_none() {
        warn!(input = %input, year, "academic year out of calendar range");
    }
    info
}

/// Academic year that `date` falls in: September onwards belongs to the
/// calendar year, January through August to the previous one.
pub fn academic_year_of(date: NaiveDate) -> i32 {
    if date.month() < START_MONTH {
        date.year() - 1
    } else {
        date.year()
    }
}

/// Academic year for today's UTC date.
pub fn current_academic_year() -> i32 {
    academic_year_of(Utc::now().date_naive())
}

pub fn current_academic_year_info() -> Option<AcademicYearInfo> {
    AcademicYearInfo::for_year(current_academic_year())
}
