//! Week labels: "Week N", optionally with a date or a date range.

use std::env;

use chrono::{Datelike, Duration, NaiveDate};

use crate::config;
use crate::i18n::{label, Label, Language};

const ARABIC_MONTHS: [&str; 12] = [
    "يناير", "فبراير", "مارس", "أبريل", "مايو", "يونيو",
    "يوليو", "أغسطس", "سبتمبر", "أكتوبر", "نوفمبر", "ديسمبر",
];

// ---------------------------------------------------------------------------
// WeekCalendar
// ---------------------------------------------------------------------------

/// Start date of each reporting week, if the publisher configured them.
///
/// Entry `n - 1` is the first day of week `n`; an entry that is not an ISO
/// date (`YYYY-MM-DD`) leaves that week without a range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekCalendar {
    starts: Vec<Option<NaiveDate>>,
}

impl WeekCalendar {
    /// Parse a comma-separated list such as `2026-02-08,2026-02-15`. Blank
    /// entries are skipped.
    pub fn parse(raw: &str) -> Self {
        let starts = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
            .collect();
        Self { starts }
    }

    /// Read the list from the `WEEK_STARTS` environment variable; empty
    /// when unset.
    pub fn from_env() -> Self {
        env::var(config::WEEK_STARTS_ENV)
            .map(|raw| Self::parse(&raw))
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Number of configured weeks, including unparseable entries.
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    /// First and last day (start + 6) of `week`.
    pub fn range(&self, week: u32) -> Option<(NaiveDate, NaiveDate)> {
        let idx = usize::try_from(week.checked_sub(1)?).ok()?;
        let start = (*self.starts.get(idx)?)?;
        Some((start, start + Duration::days(6)))
    }

    /// Localized `start - end` text for `week`, e.g. `Feb 08 - Feb 14`.
    pub fn range_label(&self, week: u32, language: Language) -> Option<String> {
        let (start, end) = self.range(week)?;
        Some(format!(
            "{} - {}",
            short_date(start, language),
            short_date(end, language)
        ))
    }
}

fn short_date(date: NaiveDate, language: Language) -> String {
    match language {
        Language::English => date.format("%b %d").to_string(),
        Language::Arabic => format!(
            "{:02} {}",
            date.day(),
            ARABIC_MONTHS[date.month0() as usize]
        ),
    }
}

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

/// `Week N`, followed by the published date label in parentheses when
/// there is one, else by the calendar range when configured.
pub fn format_week_label(
    week: u32,
    language: Language,
    week_date: Option<&str>,
    calendar: &WeekCalendar,
) -> String {
    let base = format!("{} {}", label(language, Label::Week), week);

    if let Some(explicit) = week_date.map(str::trim).filter(|s| !s.is_empty()) {
        return format!("{} ({})", base, explicit);
    }
    match calendar.range_label(week, language) {
        Some(range) => format!("{} ({})", base, range),
        None => base,
    }
}

/// Weeks offered by the week selector.
pub fn week_options() -> impl Iterator<Item = u32> {
    1..=config::WEEK_OPTIONS
}
