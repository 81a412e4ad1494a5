use chrono::NaiveDateTime;

use crate::event::ScheduleEvent;

/// Maximum number of lookahead events in the published state.
pub const UPCOMING_LIMIT: usize = 10;

/// Events at or after `now`, ascending by combined start instant,
/// truncated to `limit`.
///
/// The sort is stable: events with an identical instant keep their source
/// order.
pub fn upcoming(events: &[ScheduleEvent], now: NaiveDateTime, limit: usize) -> Vec<ScheduleEvent> {
    let mut future: Vec<ScheduleEvent> = events
        .iter()
        .filter(|e| e.start_at() >= now)
        .cloned()
        .collect();
    future.sort_by_key(ScheduleEvent::start_at);
    future.truncate(limit);
    future
}

/// The soonest event at or after `now`, if any.
///
/// Defined as the head of [`upcoming`], so the two views can never
/// disagree.
pub fn next_event(events: &[ScheduleEvent], now: NaiveDateTime) -> Option<ScheduleEvent> {
    upcoming(events, now, 1).into_iter().next()
}
