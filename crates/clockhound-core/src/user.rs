//! Users, their hounding settings, and local-time helpers.
//!
//! The user directory owns and mutates these records; the decision engine
//! only reads them and writes back `settings.last_message`.

use chrono::{DateTime, Duration, FixedOffset, NaiveTime, Offset, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::punch::{AttendanceState, Punch};

/// Bookkeeping for the last channel activity seen for a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastMessage {
    pub time: DateTime<Utc>,
    pub channel: String,
}

/// Per-user hounding policy.
///
/// `hound_frequency` is in hours; `-1` is the disabled sentinel. Any
/// non-positive frequency never triggers a reminder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Settings {
    pub should_hound: bool,
    pub should_reset_hound: bool,
    pub hound_frequency: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_ping: Option<DateTime<Utc>>,
    // Kept last so TOML emits this table after the plain values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message: Option<LastMessage>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            should_hound: true,
            should_reset_hound: true,
            hound_frequency: -1.0,
            last_message: None,
            last_ping: None,
        }
    }
}

impl Settings {
    /// Enabled settings at the given cadence.
    pub fn with_frequency(hours: f64) -> Self {
        Self {
            hound_frequency: hours,
            ..Self::default()
        }
    }

    /// Whether hounding can fire at all under these settings.
    pub fn hounding_enabled(&self) -> bool {
        self.should_hound && self.hound_frequency > 0.0
    }
}

/// An employee known to the organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Chat handle, the primary lookup key
    pub handle: String,

    /// Real/display name
    pub display_name: String,

    /// Salaried users are exempt from shift-length cadence checks
    pub salaried: bool,

    /// Timezone as a fixed offset from UTC, in minutes
    pub tz_offset_minutes: i32,

    /// Expected working window, in the user's local time
    pub active_hours: (NaiveTime, NaiveTime),

    /// Ordered punch history, oldest first
    #[serde(default)]
    pub punches: Vec<Punch>,

    #[serde(default)]
    pub settings: Settings,
}

impl User {
    /// Attendance state derived from the most recent punch.
    pub fn last_punch(&self) -> AttendanceState {
        AttendanceState::from_last_punch(&self.punches)
    }

    /// The user's fixed UTC offset.
    pub fn tz_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.tz_offset_minutes * 60).unwrap_or_else(|| Utc.fix())
    }

    /// `now` in the user's local timezone.
    pub fn local_now(&self, now: DateTime<Utc>) -> DateTime<FixedOffset> {
        now.with_timezone(&self.tz_offset())
    }

    /// Today's active-hours window as UTC instants, anchored on the user's
    /// local date at `now`.
    pub fn active_window_on(&self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        let offset = Duration::minutes(self.tz_offset_minutes as i64);
        let local_date = self.local_now(now).date_naive();
        let start = Utc
            .from_utc_datetime(&(local_date.and_time(self.active_hours.0) - offset));
        let end = Utc.from_utc_datetime(&(local_date.and_time(self.active_hours.1) - offset));
        (start, end)
    }

    /// Whether `now` falls outside the user's active hours.
    pub fn is_inactive(&self, now: DateTime<Utc>) -> bool {
        let (start, end) = self.active_window_on(now);
        now < start || now > end
    }
}

/// Signed hours from `earlier` to `later`.
pub fn hours_between(later: DateTime<Utc>, earlier: DateTime<Utc>) -> f64 {
    (later - earlier).num_milliseconds() as f64 / 3_600_000.0
}

/// Round to two decimal places, matching the precision the signals are
/// logged and compared at.
pub fn round2(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}
