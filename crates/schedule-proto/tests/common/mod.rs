//! Shared fixtures: a producer-shaped week with mixed time spellings.

#![allow(dead_code)]

use schedule_proto::model::ScheduleDocument;

pub const WEEK_JSON: &str = r#"{
  "week_start": "2025-01-05",
  "week_end": "2025-01-11",
  "last_updated": "2025-01-05T06:00:12.345678Z",
  "schedule": [
    {"day": "Sunday", "date": "", "slots": [
      {"time": "12 AM", "show": "Lights Out", "episode": ""},
      {"time": "9 AM", "show": "Jazz Nocturne", "episode": "Ep. 12"},
      {"time": "1 PM", "show": "Gunsmoke", "episode": ""}
    ]},
    {"day": "Monday", "date": "", "slots": [
      {"time": "9:00 AM", "show": "A", "episode": ""},
      {"time": "11:00 AM", "show": "B", "episode": ""}
    ]},
    {"day": "Tuesday", "date": "", "slots": [
      {"time": "9 am", "show": "The Jazz Singer", "episode": ""},
      {"time": "1:30 PM", "show": "Suspense", "episode": ""}
    ]},
    {"day": "Wednesday", "date": "", "slots": []},
    {"day": "Thursday", "date": "", "slots": [
      {"time": "11 AM", "show": "Dragnet", "episode": ""}
    ]},
    {"day": "Friday", "date": "", "slots": [
      {"time": "1 PM", "show": "", "episode": ""}
    ]},
    {"day": "Saturday", "date": "", "slots": [
      {"time": "12:00 PM", "show": "Fibber McGee & Molly", "episode": ""}
    ]}
  ]
}"#;

pub fn week() -> ScheduleDocument {
    serde_json::from_str(WEEK_JSON).expect("fixture parses")
}
