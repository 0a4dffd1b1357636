use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize};

/// Days in the order the grid shows them. The broadcast week starts on Sunday.
pub const WEEK: [Weekday; 7] = [
    Weekday::Sunday,
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub fn name(self) -> &'static str {
        match self {
            Self::Sunday => "Sunday",
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
        }
    }

    /// Exact long English name, as the feed writes it.
    pub fn from_name(name: &str) -> Option<Self> {
        WEEK.iter().copied().find(|d| d.name() == name)
    }

    /// Column position, Sunday = 0.
    pub fn index(self) -> usize {
        match self {
            Self::Sunday => 0,
            Self::Monday => 1,
            Self::Tuesday => 2,
            Self::Wednesday => 3,
            Self::Thursday => 4,
            Self::Friday => 5,
            Self::Saturday => 6,
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        WEEK[day.num_days_from_sunday() as usize]
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One week of programming as published in `schedule.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ScheduleDocument {
    #[serde(default, deserialize_with = "lenient_string")]
    pub week_start: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub week_end: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub last_updated: String,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub error: Option<String>,
    #[serde(default, deserialize_with = "lenient_days")]
    pub schedule: Vec<DaySchedule>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DaySchedule {
    #[serde(default, deserialize_with = "lenient_string")]
    pub day: String,
    /// Usually empty; the grid derives the date from `week_start`.
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_slots")]
    pub slots: Vec<Slot>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Slot {
    #[serde(default, deserialize_with = "lenient_string")]
    pub time: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub show: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub episode: String,
}

impl Slot {
    pub fn new(time: impl Into<String>, show: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            show: show.into(),
            episode: String::new(),
        }
    }
}

impl DaySchedule {
    pub fn new(day: Weekday, slots: Vec<Slot>) -> Self {
        Self {
            day: day.name().to_string(),
            date: String::new(),
            slots,
        }
    }

    pub fn weekday(&self) -> Option<Weekday> {
        Weekday::from_name(&self.day)
    }
}

impl ScheduleDocument {
    /// The producer's own error message, if it reported one.
    pub fn reported_error(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.trim().is_empty())
    }

    /// First listing for `day`, scanning in source order.
    pub fn day(&self, day: Weekday) -> Option<&DaySchedule> {
        self.schedule.iter().find(|d| d.day == day.name())
    }

    /// "Jan 5 – Jan 11, 2025", or `None` when either bound is not a date.
    pub fn week_label(&self) -> Option<String> {
        let start = NaiveDate::parse_from_str(self.week_start.trim(), "%Y-%m-%d").ok()?;
        let end = NaiveDate::parse_from_str(self.week_end.trim(), "%Y-%m-%d").ok()?;
        Some(format!(
            "{} – {}",
            start.format("%b %-d"),
            end.format("%b %-d, %Y")
        ))
    }

    /// `last_updated` shown in `tz` when it is RFC 3339, otherwise verbatim.
    pub fn last_updated_in(&self, tz: Tz) -> Option<String> {
        let raw = self.last_updated.trim();
        if raw.is_empty() {
            return None;
        }
        Some(match DateTime::parse_from_rfc3339(raw) {
            Ok(ts) => ts
                .with_timezone(&tz)
                .format("%a %b %-d, %-I:%M %p %Z")
                .to_string(),
            Err(_) => raw.to_string(),
        })
    }
}

// ── Lenient field decoding ────────────────────────────────────────────────────
//
// Partial data renders partially: nulls, numbers and wrong shapes collapse to
// empty values instead of failing the whole document.

fn value_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(value_to_string(serde_json::Value::deserialize(d)?))
}

fn lenient_opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let s = value_to_string(serde_json::Value::deserialize(d)?);
    Ok(if s.is_empty() { None } else { Some(s) })
}

fn lenient_vec<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> Vec<T> {
    match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    }
}

fn lenient_days<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<DaySchedule>, D::Error> {
    Ok(lenient_vec(serde_json::Value::deserialize(d)?))
}

fn lenient_slots<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Slot>, D::Error> {
    Ok(lenient_vec(serde_json::Value::deserialize(d)?))
}
