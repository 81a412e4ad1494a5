use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::event::ScheduleEvent;

/// Outcome of a refresh cycle, serialized verbatim into the published state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshStatus {
    /// No cycle has completed yet.
    Initializing,
    /// The schedule document could not be located, fetched or decoded.
    ErrorPdfDownload,
    /// The document text contained no parseable entries.
    NoDatesFound,
    /// Valid entries exist but none are upcoming.
    NoFutureDates,
    Ok,
}

impl RefreshStatus {
    /// Wire form of the status, also used as a metrics label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initializing => "initializing",
            Self::ErrorPdfDownload => "error_pdf_download",
            Self::NoDatesFound => "no_dates_found",
            Self::NoFutureDates => "no_future_dates",
            Self::Ok => "ok",
        }
    }
}

/// The next upcoming session with its display attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextEvent {
    /// Combined start instant (naive wall clock).
    pub start_at: NaiveDateTime,
    /// `DD.MM.YYYY von HH:MM - HH:MM Uhr`.
    pub description: String,
    /// `HH:MM`.
    pub start_time: String,
    /// `HH:MM`.
    pub end_time: String,
    /// Annotation of the entry, possibly empty.
    pub info: String,
    /// Whole days between the reference date and the event date.
    pub days_until: i64,
}

/// One lookahead row of the published state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcomingEntry {
    /// `DD.MM.YYYY`.
    pub date: String,
    /// `HH:MM - HH:MM`.
    pub time: String,
    /// Annotation, possibly empty.
    pub info: String,
}

/// Everything the host sees.
///
/// Replaced wholesale after every cycle; readers never observe a mix of two
/// cycles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedState {
    pub status: RefreshStatus,
    pub next_event: Option<NextEvent>,
    /// Ascending by (date, start time); at most ten entries.
    pub upcoming: Vec<UpcomingEntry>,
}

impl PublishedState {
    fn empty(status: RefreshStatus) -> Self {
        PublishedState {
            status,
            next_event: None,
            upcoming: Vec::new(),
        }
    }

    /// State before the first cycle completes.
    pub fn initializing() -> Self {
        Self::empty(RefreshStatus::Initializing)
    }

    /// The document could not be located, fetched or decoded this cycle.
    /// The previous next event is not carried over.
    pub fn download_error() -> Self {
        Self::empty(RefreshStatus::ErrorPdfDownload)
    }

    /// The document text parsed to zero entries.
    pub fn no_dates() -> Self {
        Self::empty(RefreshStatus::NoDatesFound)
    }

    /// Entries were parsed but all lie in the past.
    pub fn no_future() -> Self {
        Self::empty(RefreshStatus::NoFutureDates)
    }

    /// Build the success state from the selected next event and lookahead.
    pub fn from_selection(
        next: &ScheduleEvent,
        upcoming: &[ScheduleEvent],
        today: NaiveDate,
    ) -> Self {
        let next_event = NextEvent {
            start_at: next.start_at(),
            description: format!("{} von {} Uhr", next.format_date(), next.format_time_range()),
            start_time: next.start_time.format("%H:%M").to_string(),
            end_time: next.end_time.format("%H:%M").to_string(),
            info: next.annotation.clone(),
            days_until: (next.date - today).num_days(),
        };

        let upcoming = upcoming
            .iter()
            .map(|e| UpcomingEntry {
                date: e.format_date(),
                time: e.format_time_range(),
                info: e.annotation.clone(),
            })
            .collect();

        PublishedState {
            status: RefreshStatus::Ok,
            next_event: Some(next_event),
            upcoming,
        }
    }
}
