//! Relative timestamps

use chrono::{DateTime, SecondsFormat, Utc};

use super::Component;

/// "3 days ago" with the exact UTC time as a tooltip
#[derive(Debug, Clone, Copy)]
pub struct RelativeTime {
    pub time: DateTime<Utc>,
    pub now: DateTime<Utc>,
}

impl RelativeTime {
    /// Relative to the current time
    pub fn new(time: DateTime<Utc>) -> Self {
        Self::at(time, Utc::now())
    }

    pub fn at(time: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self { time, now }
    }

    /// The visible phrase, e.g. `2 hours ago` or `in 5 minutes`
    pub fn phrase(&self) -> String {
        let delta = self.now.signed_duration_since(self.time);
        let seconds = delta.num_seconds();
        if seconds.abs() < 60 {
            return "just now".to_string();
        }

        let (amount, unit) = magnitude(seconds.unsigned_abs());
        let plural = if amount == 1 { "" } else { "s" };
        if seconds > 0 {
            format!("{amount} {unit}{plural} ago")
        } else {
            format!("in {amount} {unit}{plural}")
        }
    }

    /// RFC 3339 in UTC, second precision
    pub fn exact(&self) -> String {
        self.time.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

fn magnitude(seconds: u64) -> (u64, &'static str) {
    const MINUTE: u64 = 60;
    const HOUR: u64 = 60 * MINUTE;
    const DAY: u64 = 24 * HOUR;

    match seconds {
        s if s < HOUR => (s / MINUTE, "minute"),
        s if s < DAY => (s / HOUR, "hour"),
        s if s < 7 * DAY => (s / DAY, "day"),
        s if s < 30 * DAY => (s / (7 * DAY), "week"),
        s if s < 365 * DAY => (s / (30 * DAY), "month"),
        s => (s / (365 * DAY), "year"),
    }
}

impl Component for RelativeTime {
    fn render(&self) -> String {
        format!(
            r#"<abbr title="{}">{}</abbr>"#,
            self.exact(),
            self.phrase()
        )
    }
}
