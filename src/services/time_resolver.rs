//! Turns the spoken "preferred time" phrase into a concrete weekday slot.
//!
//! This is a small heuristic, not a general natural-language date parser.
//! Phrases are matched against [`RULES`] in order; the first rule whose
//! matcher accepts the lowercased text resolves it. A rule that cannot
//! produce a valid local time degrades to the default slot instead of
//! failing the booking.

use std::sync::LazyLock;

use chrono::{
    DateTime, Datelike, Days, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike,
    Utc, Weekday,
};
use chrono_tz::Tz;
use regex::{Captures, Regex};

use crate::models::{BookingPolicy, ResolvedSlot, SlotRule};

const DEFAULT_HOUR: i64 = 10;
const TOMORROW_DEFAULT_HOUR: i64 = 14;
const NEXT_OFFSET_DAYS: u64 = 7;

// The hour may follow a letter ("at3pm") but not another digit.
static CLOCK_TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|\D)(\d{1,2})(?::(\d{2}))?\s*(am|pm)\b").expect("Invalid clock time regex")
});

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %I:%M %p",
    "%B %d, %Y %I:%M %p",
    "%B %d %Y %I:%M %p",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%B %d, %Y", "%B %d %Y", "%m/%d/%Y"];

pub struct TimeRule {
    pub kind: SlotRule,
    matches: fn(&str) -> bool,
    resolve: fn(&str, DateTime<Tz>) -> Option<NaiveDateTime>,
}

/// Ordered rule table. Matching is by substring so phrases like
/// "I'd love to come in tomorrow afternoon" hit the tomorrow rule.
pub const RULES: &[TimeRule] = &[
    TimeRule {
        kind: SlotRule::Tomorrow,
        matches: mentions_tomorrow,
        resolve: resolve_tomorrow,
    },
    // Weekday names after "next" are not parsed; "next Monday" is a flat
    // seven-day offset.
    TimeRule {
        kind: SlotRule::Next,
        matches: mentions_next,
        resolve: resolve_next,
    },
    TimeRule {
        kind: SlotRule::Absolute,
        matches: always,
        resolve: resolve_absolute,
    },
];

pub fn resolve_slot(
    preferred_time: Option<&str>,
    now: DateTime<Utc>,
    policy: &BookingPolicy,
) -> ResolvedSlot {
    let tz = policy.timezone;
    let now_local = now.with_timezone(&tz);
    let fallback = default_slot(now_local.naive_local());

    let text = preferred_time.map(str::trim).filter(|t| !t.is_empty());
    let resolved = text.and_then(|text| {
        let lowered = text.to_lowercase();
        let rule = RULES.iter().find(|rule| (rule.matches)(&lowered))?;
        let naive = (rule.resolve)(text, now_local);
        if naive.is_none() {
            tracing::debug!(rule = rule.kind.as_str(), "preferred time not understood, using default slot");
        }
        let start = localize(tz, skip_weekend(naive?))?;
        Some((rule.kind, start))
    });

    let (rule, start) = resolved.unwrap_or_else(|| {
        let naive = skip_weekend(fallback);
        let start = localize(tz, naive).unwrap_or_else(|| tz.from_utc_datetime(&naive));
        (SlotRule::Default, start)
    });

    ResolvedSlot {
        start,
        end: start + policy.duration(),
        timezone: tz.name().to_string(),
        rule,
    }
}

/// Next calendar day at 10:00, before weekend normalization.
fn default_slot(now: NaiveDateTime) -> NaiveDateTime {
    at_hour(now.date() + Duration::days(1), DEFAULT_HOUR)
}

fn at_hour(date: NaiveDate, hour: i64) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN) + Duration::hours(hour)
}

/// Saturday and Sunday move to the following Monday.
pub fn skip_weekend(dt: NaiveDateTime) -> NaiveDateTime {
    match dt.weekday() {
        Weekday::Sat => dt + Duration::days(2),
        Weekday::Sun => dt + Duration::days(1),
        _ => dt,
    }
}

fn localize(tz: Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(&naive).earliest()
}

fn mentions_tomorrow(text: &str) -> bool {
    text.contains("tomorrow")
}

fn mentions_next(text: &str) -> bool {
    text.contains("next")
}

fn always(_: &str) -> bool {
    true
}

fn resolve_tomorrow(text: &str, now: DateTime<Tz>) -> Option<NaiveDateTime> {
    let date = now.date_naive().succ_opt()?;
    let time = match CLOCK_TIME_RE.captures(text) {
        Some(caps) => clock_time(&caps)?,
        None => NaiveTime::MIN + Duration::hours(TOMORROW_DEFAULT_HOUR),
    };
    Some(date.and_time(time))
}

fn resolve_next(_: &str, now: DateTime<Tz>) -> Option<NaiveDateTime> {
    let date = now.date_naive().checked_add_days(Days::new(NEXT_OFFSET_DAYS))?;
    Some(at_hour(date, DEFAULT_HOUR))
}

fn resolve_absolute(text: &str, now: DateTime<Tz>) -> Option<NaiveDateTime> {
    let parsed = match DateTime::parse_from_rfc3339(text) {
        Ok(dt) => Some(dt.with_timezone(&now.timezone()).naive_local()),
        Err(_) => parse_naive(text),
    };
    parsed.and_then(|dt| dt.date().and_hms_opt(dt.hour(), dt.minute(), 0))
}

fn parse_naive(text: &str) -> Option<NaiveDateTime> {
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                .map(|date| at_hour(date, DEFAULT_HOUR))
        })
}

/// Converts `<h>[:<mm>] am|pm` captures to a 24-hour time.
fn clock_time(caps: &Captures) -> Option<NaiveTime> {
    let hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    let pm = caps[3].eq_ignore_ascii_case("pm");
    let hour = match (hour, pm) {
        (12, true) => 12,
        (12, false) => 0,
        (h, true) => h + 12,
        (h, false) => h,
    };
    NaiveTime::from_hms_opt(hour, minute, 0)
}
