//! Display-ready rows built from a [`Classification`].

use chrono::TimeZone;
use serde::{Deserialize, Serialize};

use crate::classify::{Capacity, Classification};
use crate::event::Event;
use crate::time::format_range_compact;

/// One display row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// `HH:MM～HH:MM`.
    pub range_label: String,
    /// The event label.
    pub action: String,
}

impl Row {
    pub fn from_event<Tz: TimeZone>(event: &Event, tz: &Tz) -> Self {
        Self {
            range_label: format_range_compact(event.start, event.stop, tz),
            action: event.label.to_string(),
        }
    }
}

/// Rows for both display regions plus the "N more" count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projection {
    pub ongoing: Vec<Row>,
    pub upcoming: Vec<Row>,
    /// Upcoming events beyond the upcoming capacity.
    pub overflow: usize,
}

/// Builds the rows for `classification`.
///
/// Ongoing events beyond the cap produce neither rows nor an indicator.
pub fn build_projection<Tz: TimeZone>(
    classification: &Classification<'_>,
    capacity: Capacity,
    tz: &Tz,
) -> Projection {
    let rows = |events: &[&Event], cap: usize| -> Vec<Row> {
        events
            .iter()
            .take(cap)
            .map(|event| Row::from_event(event, tz))
            .collect()
    };

    Projection {
        ongoing: rows(&classification.ongoing, capacity.ongoing),
        upcoming: rows(&classification.upcoming, capacity.upcoming),
        overflow: classification
            .upcoming_total
            .saturating_sub(capacity.upcoming),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::classify::classify;
    use crate::time::parse_instant;
    use crate::types::{Instant, Label};

    fn at(s: &str) -> Instant {
        parse_instant(s, &Utc).unwrap()
    }

    fn event(start: &str, stop: &str, label: &str) -> Event {
        Event::new(at(start), at(stop), Label::new(label).unwrap())
    }

    fn project(events: &[Event], now: &str) -> Projection {
        let capacity = Capacity::default();
        build_projection(&classify(events, at(now), capacity), capacity, &Utc)
    }

    #[test]
    fn ongoing_row_for_meeting() {
        let events = [event("2025/6/8 9:00", "2025/6/8 10:00", "会議")];
        let projection = project(&events, "2025/6/8 9:30");

        assert_eq!(
            projection.ongoing,
            vec![Row {
                range_label: "09:00～10:00".to_string(),
                action: "会議".to_string(),
            }]
        );
        assert!(projection.upcoming.is_empty());
        assert_eq!(projection.overflow, 0);
    }

    #[test]
    fn ended_meeting_produces_no_rows() {
        let events = [event("2025/6/8 9:00", "2025/6/8 10:00", "会議")];
        assert_eq!(project(&events, "2025/6/8 10:00"), Projection::default());
    }

    #[test]
    fn six_upcoming_events_show_four_and_overflow_two() {
        let events: Vec<Event> = (11..17)
            .map(|h| {
                event(
                    &format!("2025/6/8 {h}:00"),
                    &format!("2025/6/8 {h}:30"),
                    &format!("task {h}"),
                )
            })
            .collect();
        let projection = project(&events, "2025/6/8 9:00");

        let actions: Vec<&str> = projection
            .upcoming
            .iter()
            .map(|r| r.action.as_str())
            .collect();
        assert_eq!(actions, vec!["task 11", "task 12", "task 13", "task 14"]);
        assert_eq!(projection.upcoming[0].range_label, "11:00～11:30");
        assert_eq!(projection.overflow, 2);
    }

    #[test]
    fn overflow_is_zero_at_exact_capacity() {
        let events: Vec<Event> = (11..15)
            .map(|h| event(&format!("2025/6/8 {h}:00"), "2025/6/8 20:00", "x"))
            .collect();
        assert_eq!(project(&events, "2025/6/8 9:00").overflow, 0);
    }

    #[test]
    fn projection_serializes_for_renderers() {
        let events = [event("2025/6/8 9:00", "2025/6/8 10:00", "会議")];
        let json = serde_json::to_string(&project(&events, "2025/6/8 8:00")).unwrap();
        assert_eq!(
            json,
            r#"{"ongoing":[],"upcoming":[{"range_label":"09:00～10:00","action":"会議"}],"overflow":0}"#
        );
    }
}
