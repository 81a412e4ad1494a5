use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveTime};
use regex::{Captures, Regex};
use tracing::{debug, warn};

use crate::event::ScheduleEvent;

/// Marker phrase for an explicitly cancelled slot.
const CANCELLED_MARKER: &str = "Kein Unterricht";

/// `DD.MM.YYYY` tokens anchor entries in the document text.
fn date_token() -> &'static Regex {
    static DATE_TOKEN: OnceLock<Regex> = OnceLock::new();
    DATE_TOKEN.get_or_init(|| Regex::new(r"\d{2}\.\d{2}\.\d{4}").expect("valid date pattern"))
}

/// Time range inside an entry span: `H[H].MM - H[H].MM Uhr <annotation>`.
///
/// The document prints a dot between hour and minute; a colon is accepted
/// as well. The range separator may be a hyphen or an en-dash.
fn time_range() -> &'static Regex {
    static TIME_RANGE: OnceLock<Regex> = OnceLock::new();
    TIME_RANGE.get_or_init(|| {
        Regex::new(r"(\d{1,2})[.:](\d{2})\s*[-–]\s*(\d{1,2})[.:](\d{2})\s*Uhr\s*(.*)")
            .expect("valid time range pattern")
    })
}

/// Scan document text for date-anchored schedule entries.
///
/// Each entry's span runs from its date token to the next line break, the
/// next date token, or the end of text, whichever comes first. Cancelled
/// slots, entries without a parseable time range and entries with invalid
/// date or clock values are dropped individually; one malformed entry
/// never aborts the parse. Output is in source-text order, not sorted.
pub fn parse_events(text: &str) -> Vec<ScheduleEvent> {
    if text.is_empty() {
        return Vec::new();
    }

    let tokens: Vec<_> = date_token().find_iter(text).collect();
    let mut events = Vec::with_capacity(tokens.len());

    for (i, token) in tokens.iter().enumerate() {
        let span_end = tokens.get(i + 1).map_or(text.len(), |next| next.start());
        let mut span = &text[token.end()..span_end];
        // An entry never crosses a line break.
        if let Some(pos) = span.find('\n') {
            span = &span[..pos];
        }
        let span = span.trim();

        if span.contains(CANCELLED_MARKER) {
            debug!(date = token.as_str(), "Skipping cancelled slot");
            continue;
        }

        let Some(caps) = time_range().captures(span) else {
            debug!(date = token.as_str(), "Entry has no time range, skipping");
            continue;
        };

        if let Some(event) = build_event(token.as_str(), &caps) {
            events.push(event);
        }
    }

    debug!(count = events.len(), "Parsed schedule entries");
    events
}

/// Assemble one event from a date token and a time-range match.
///
/// Returns `None` (after a warning) when the date or a clock value is
/// invalid; the caller drops only this entry.
fn build_event(date_str: &str, caps: &Captures<'_>) -> Option<ScheduleEvent> {
    let date = match NaiveDate::parse_from_str(date_str, "%d.%m.%Y") {
        Ok(date) => date,
        Err(e) => {
            warn!(date = date_str, error = %e, "Could not parse date, dropping entry");
            return None;
        }
    };

    let start_time = clock_value(&caps[1], &caps[2]);
    let end_time = clock_value(&caps[3], &caps[4]);
    let (Some(start_time), Some(end_time)) = (start_time, end_time) else {
        warn!(
            date = date_str,
            range = &caps[0],
            "Invalid clock values in time range, dropping entry"
        );
        return None;
    };

    let annotation = caps
        .get(5)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();

    Some(ScheduleEvent {
        date,
        start_time,
        end_time,
        annotation,
    })
}

fn clock_value(hour: &str, minute: &str) -> Option<NaiveTime> {
    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}
