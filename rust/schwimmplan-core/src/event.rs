use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// A single parsed schedule entry.
///
/// Built by the parser, consumed by the selector; never mutated after
/// construction. Times are wall clock in the timezone of the publishing
/// school.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEvent {
    /// Calendar date of the session.
    pub date: NaiveDate,
    /// Start of the session.
    pub start_time: NaiveTime,
    /// End of the session.
    pub end_time: NaiveTime,
    /// Free-text annotation, empty when the entry has none.
    pub annotation: String,
}

impl ScheduleEvent {
    /// Combined start instant, used for ordering and future filtering.
    pub fn start_at(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time)
    }

    /// Date formatted the way the source document prints it.
    pub fn format_date(&self) -> String {
        self.date.format("%d.%m.%Y").to_string()
    }

    /// Time range as `HH:MM - HH:MM`, zero-padded.
    pub fn format_time_range(&self) -> String {
        format!(
            "{} - {}",
            self.start_time.format("%H:%M"),
            self.end_time.format("%H:%M")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(h: u32, m: u32) -> ScheduleEvent {
        ScheduleEvent {
            date: NaiveDate::from_ymd_opt(2099, 1, 5).unwrap(),
            start_time: NaiveTime::from_hms_opt(h, m, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(h, m + 45, 0).unwrap(),
            annotation: "Gruppe 1".to_string(),
        }
    }

    #[test]
    fn test_start_at_combines_date_and_start_time() {
        let e = event(8, 0);
        assert_eq!(
            e.start_at(),
            NaiveDate::from_ymd_opt(2099, 1, 5)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_formatting_is_zero_padded() {
        let e = event(8, 0);
        assert_eq!(e.format_date(), "05.01.2099");
        assert_eq!(e.format_time_range(), "08:00 - 08:45");
    }
}
