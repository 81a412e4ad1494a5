use std::time::Instant;

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::ScheduleResult;
use crate::extract;
use crate::fetcher::DocumentFetcher;
use crate::locator::DocumentLocator;
use crate::metrics;
use crate::parser;
use crate::selector;
use crate::state::PublishedState;

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Composes the pipeline and produces one complete state per cycle.
///
/// `refresh` never fails: every pipeline error is folded into the status
/// of the returned state, and the caller replaces the shared state
/// wholesale with the result.
#[derive(Debug)]
pub struct RefreshOrchestrator {
    locator: DocumentLocator,
    fetcher: DocumentFetcher,
    clock: fn() -> NaiveDateTime,
}

impl RefreshOrchestrator {
    pub fn new(config: &Config) -> ScheduleResult<Self> {
        Ok(Self {
            locator: DocumentLocator::new(&config.source)?,
            fetcher: DocumentFetcher::new(&config.source)?,
            clock: local_now,
        })
    }

    /// Replace the clock supplying the reference instant. Tests pin it.
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    /// Run one refresh cycle and return the complete new state.
    pub async fn refresh(&self) -> PublishedState {
        let started = Instant::now();
        let state = self.run_cycle().await;

        metrics::record_cycle(state.status.as_str(), started.elapsed().as_secs_f64());
        info!(
            status = state.status.as_str(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Refresh cycle finished"
        );
        state
    }

    async fn run_cycle(&self) -> PublishedState {
        let text = match self.fetch_document_text().await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Schedule document unavailable this cycle");
                return PublishedState::download_error();
            }
        };

        self.publish_from_text(&text, (self.clock)())
    }

    /// Locator → fetcher → extractor. Any failure means no document this
    /// cycle; a missing link skips the document fetch entirely.
    async fn fetch_document_text(&self) -> ScheduleResult<String> {
        let url = self.locator.discover().await?;
        let bytes = self.fetcher.fetch(&url).await?;
        extract::extract_text(&bytes)
    }

    /// Parser → selector → state. Pure given the text and the reference
    /// instant.
    pub fn publish_from_text(&self, text: &str, now: NaiveDateTime) -> PublishedState {
        let events = parser::parse_events(text);
        if events.is_empty() {
            warn!("Document text contained no schedule entries");
            metrics::record_events(0, 0);
            return PublishedState::no_dates();
        }

        let upcoming = selector::upcoming(&events, now, selector::UPCOMING_LIMIT);
        metrics::record_events(events.len(), upcoming.len());

        let Some(next) = upcoming.first() else {
            debug!(parsed = events.len(), "All schedule entries are in the past");
            return PublishedState::no_future();
        };

        PublishedState::from_selection(next, &upcoming, now.date())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::RefreshStatus;
    use chrono::NaiveDate;

    fn orchestrator() -> RefreshOrchestrator {
        RefreshOrchestrator::new(&Config::default()).unwrap()
    }

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_empty_text_publishes_no_dates_found() {
        let state = orchestrator().publish_from_text("", at(2099, 1, 1));
        assert_eq!(state.status, RefreshStatus::NoDatesFound);
        assert!(state.next_event.is_none());
    }

    #[test]
    fn test_prose_only_text_publishes_no_dates_found() {
        let state =
            orchestrator().publish_from_text("Liebe Eltern, der Plan folgt.", at(2099, 1, 1));
        assert_eq!(state.status, RefreshStatus::NoDatesFound);
    }

    #[test]
    fn test_past_only_entries_publish_no_future_dates() {
        let text = "01.01.2020  8.00 - 8.45 Uhr Gruppe 1";
        let state = orchestrator().publish_from_text(text, at(2024, 6, 1));
        assert_eq!(state.status, RefreshStatus::NoFutureDates);
        assert!(state.next_event.is_none());
        assert!(state.upcoming.is_empty());
    }

    #[test]
    fn test_successful_cycle_publishes_next_and_upcoming() {
        let text = "\
Kursplan Babyschwimmen
07.03.2099  9.15 - 10.00 Uhr Gruppe 2
14.03.2099  Kein Unterricht
21.03.2099  9.15 - 10.00 Uhr Gruppe 2
";
        let state = orchestrator().publish_from_text(text, at(2099, 3, 5));
        assert_eq!(state.status, RefreshStatus::Ok);

        let next = state.next_event.unwrap();
        assert_eq!(next.description, "07.03.2099 von 09:15 - 10:00 Uhr");
        assert_eq!(next.days_until, 2);

        assert_eq!(state.upcoming.len(), 2);
        assert_eq!(state.upcoming[0].date, "07.03.2099");
        assert_eq!(state.upcoming[1].date, "21.03.2099");
    }

    #[test]
    fn test_next_event_matches_upcoming_head() {
        let text = "\
21.03.2099  9.15 - 10.00 Uhr Gruppe 2
07.03.2099  8.00 - 8.45 Uhr Gruppe 1
";
        let state = orchestrator().publish_from_text(text, at(2099, 1, 1));
        let next = state.next_event.unwrap();
        assert_eq!(next.start_time, "08:00");
        assert_eq!(state.upcoming[0].date, "07.03.2099");
        assert_eq!(state.upcoming[0].time, "08:00 - 08:45");
    }
}
