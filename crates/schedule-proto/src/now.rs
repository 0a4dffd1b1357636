//! "What is playing now", evaluated against the wall clock of the station's
//! timezone rather than the viewer's.

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

use crate::model::{ScheduleDocument, Weekday};
use crate::time::to_minutes;

/// Calendar weekday and minute of day in a fixed timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallClock {
    pub weekday: Weekday,
    pub minute_of_day: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NowPlaying {
    pub show: String,
    /// Raw start time as listed in the feed.
    pub start_time: String,
}

pub fn current_weekday_and_minute(now: DateTime<Utc>, tz: Tz) -> WallClock {
    let local = tz.from_utc_datetime(&now.naive_utc());
    WallClock {
        weekday: local.weekday().into(),
        minute_of_day: local.hour() * 60 + local.minute(),
    }
}

/// Most recently started show on `weekday`.
///
/// Slots are scanned in source order and the last one starting at or before
/// `minute_of_day` wins. The feed is trusted to list slots chronologically;
/// an out-of-order feed resolves by listing order, not by time.
pub fn find_current_show(
    doc: &ScheduleDocument,
    weekday: Weekday,
    minute_of_day: u32,
) -> Option<NowPlaying> {
    let day = doc.day(weekday)?;
    let mut current = None;
    for slot in &day.slots {
        if to_minutes(&slot.time) <= minute_of_day {
            current = Some(slot);
        }
    }
    current.map(|slot| NowPlaying {
        show: slot.show.clone(),
        start_time: slot.time.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DaySchedule, Slot};

    fn monday(slots: Vec<Slot>) -> ScheduleDocument {
        ScheduleDocument {
            schedule: vec![DaySchedule::new(Weekday::Monday, slots)],
            ..Default::default()
        }
    }

    #[test]
    fn test_wall_clock_uses_station_timezone() {
        // 2025-01-06 03:30 UTC is Sunday 22:30 in New York (EST, UTC-5).
        let now = Utc.with_ymd_and_hms(2025, 1, 6, 3, 30, 0).unwrap();
        let clock = current_weekday_and_minute(now, chrono_tz::America::New_York);
        assert_eq!(clock.weekday, Weekday::Sunday);
        assert_eq!(clock.minute_of_day, 22 * 60 + 30);

        let clock = current_weekday_and_minute(now, chrono_tz::UTC);
        assert_eq!(clock.weekday, Weekday::Monday);
        assert_eq!(clock.minute_of_day, 210);
    }

    #[test]
    fn test_wall_clock_follows_daylight_saving() {
        // July: EDT, UTC-4.
        let now = Utc.with_ymd_and_hms(2025, 7, 1, 16, 0, 0).unwrap();
        let clock = current_weekday_and_minute(now, chrono_tz::America::New_York);
        assert_eq!(clock.weekday, Weekday::Tuesday);
        assert_eq!(clock.minute_of_day, 12 * 60);
    }

    #[test]
    fn test_find_current_show_picks_latest_started() {
        let doc = monday(vec![Slot::new("9:00 AM", "A"), Slot::new("11:00 AM", "B")]);
        assert_eq!(
            find_current_show(&doc, Weekday::Monday, 600),
            Some(NowPlaying {
                show: "A".into(),
                start_time: "9:00 AM".into()
            })
        );
        assert_eq!(
            find_current_show(&doc, Weekday::Monday, 660).map(|n| n.show),
            Some("B".into())
        );
    }

    #[test]
    fn test_find_current_show_nothing_started() {
        let doc = monday(vec![Slot::new("9:00 AM", "A")]);
        assert_eq!(find_current_show(&doc, Weekday::Monday, 539), None);
        assert_eq!(find_current_show(&doc, Weekday::Tuesday, 600), None);
    }

    #[test]
    fn test_find_current_show_follows_listing_order() {
        let doc = monday(vec![Slot::new("11:00 AM", "B"), Slot::new("9:00 AM", "A")]);
        assert_eq!(
            find_current_show(&doc, Weekday::Monday, 720).map(|n| n.show),
            Some("A".into())
        );
    }
}
