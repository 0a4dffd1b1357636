//! Free-form time strings ("9:00 AM", "9 am", "12:30 PM") reduced to a
//! canonical equality key and a minutes-since-midnight ordering value.

/// Last minute of the day; `to_minutes` never returns more than this.
pub const MAX_MINUTE: u32 = 24 * 60 - 1;

/// Equality key for a time string: uppercased, whitespace runs collapsed,
/// trimmed, and every literal `":00"` removed. Not meant for display.
pub fn normalize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    raw.to_uppercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace(":00", "")
}

/// Minutes since midnight for ordering.
///
/// AM/PM is detected by substring. Without either marker the hour is used
/// as-is (no 12-hour conversion). Unparseable parts count as zero.
pub fn to_minutes(raw: &str) -> u32 {
    if raw.is_empty() {
        return 0;
    }
    let upper = raw.to_uppercase();
    let is_pm = upper.contains("PM");
    let is_am = upper.contains("AM");
    let bare = upper.replace("AM", "").replace("PM", "");

    let mut parts = bare.trim().split(':');
    let mut hour = parts.next().map(leading_number).unwrap_or(0);
    let minute = parts.next().map(leading_number).unwrap_or(0);

    if is_pm && hour != 12 {
        hour = hour.saturating_add(12);
    } else if is_am && hour == 12 {
        hour = 0;
    }

    hour.saturating_mul(60).saturating_add(minute).min(MAX_MINUTE)
}

/// Leading decimal digits of `s` after trimming, 0 if there are none.
fn leading_number(s: &str) -> u32 {
    let digits: String = s.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}
