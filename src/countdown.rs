//! Countdown and D-Day urgency math.
//!
//! Both computations are pure functions of the target and "now" so they can
//! be recomputed on every render; nothing here is persisted.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Snapshot of the time remaining until one D-Day target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    Remaining {
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
    },
    /// The target instant has passed.
    Reached,
}

impl Countdown {
    /// Decompose a millisecond difference into display units.
    ///
    /// All units divide the same difference so they can never drift apart
    /// within a tick.
    pub fn from_millis(diff_ms: i64) -> Self {
        if diff_ms <= 0 {
            return Countdown::Reached;
        }
        let secs = diff_ms / 1000;
        Countdown::Remaining {
            days: secs / 86_400,
            hours: (secs / 3_600) % 24,
            minutes: (secs / 60) % 60,
            seconds: secs % 60,
        }
    }

    pub fn until(target: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self::from_millis(target.timestamp_millis() - now.timestamp_millis())
    }
}

/// Parse a stored D-Day timestamp.
///
/// Timestamps written by the edit flow carry an offset (RFC 3339); older
/// hand-entered ones are bare local time, matching how the legacy data was
/// interpreted.
pub fn parse_dday_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").ok()?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// How loudly a goal item's target date should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    /// Today or within 3 days.
    Critical,
    /// 4 to 7 days out.
    Warning,
    /// More than a week out.
    Neutral,
    /// Already behind us; de-emphasized regardless of how far past.
    Passed,
}

/// Rendered badge for a goal item with a target date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DdayBadge {
    pub label: String,
    pub urgency: Urgency,
}

/// Classify a target date against today, comparing calendar days only.
pub fn classify(target: NaiveDate, today: NaiveDate) -> DdayBadge {
    let days = (target - today).num_days();
    if days == 0 {
        return DdayBadge {
            label: "D-Day".to_string(),
            urgency: Urgency::Critical,
        };
    }
    if days < 0 {
        return DdayBadge {
            label: format!("D+{}", -days),
            urgency: Urgency::Passed,
        };
    }
    let urgency = match days {
        1..=3 => Urgency::Critical,
        4..=7 => Urgency::Warning,
        _ => Urgency::Neutral,
    };
    DdayBadge {
        label: format!("D-{days}"),
        urgency,
    }
}
