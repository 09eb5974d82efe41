//! Organization-wide hounding policy and user directory.
//!
//! One `Organization` is constructed by the application entry point once its
//! backing store has synced, and is passed by reference into the decision
//! engine and the command processor. `ready` flips true exactly once per
//! sync; events arriving before that are dropped by the callers.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::ValidationError;
use crate::user::User;

/// A chat channel as the engine sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub name: String,
    /// Direct message or private group
    pub private: bool,
}

impl Channel {
    pub fn new(name: impl Into<String>, private: bool) -> Self {
        Self {
            name: name.into(),
            private,
        }
    }

    /// The anonymous channel used by the periodic sweep: not private, never
    /// in the exempt set.
    pub fn none() -> Self {
        Self {
            name: String::new(),
            private: false,
        }
    }
}

/// A named calendar event (holiday, all-hands, payday).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub date: NaiveDate,
    pub name: String,
}

/// Organization-wide policy and user directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub name: String,

    /// Flips true once the backing store has finished loading
    #[serde(default)]
    pub ready: bool,

    /// Default hound cadence in hours, used when a user (re-)enables hounding
    pub hound_frequency: f64,

    pub should_hound: bool,
    pub should_reset_hound: bool,

    /// Channels excluded from hounding regardless of activity
    #[serde(default)]
    pub exempt_channels: BTreeSet<String>,

    #[serde(default)]
    pub users: Vec<User>,

    #[serde(default)]
    pub events: Vec<CalendarEvent>,
}

impl Organization {
    pub fn new(name: impl Into<String>, hound_frequency: f64) -> Self {
        Self {
            name: name.into(),
            ready: false,
            hound_frequency,
            should_hound: true,
            should_reset_hound: true,
            exempt_channels: BTreeSet::new(),
            users: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Look up a user by chat handle.
    pub fn user_by_handle(&self, handle: &str) -> Option<&User> {
        let found = self.users.iter().find(|u| u.handle == handle);
        if found.is_none() {
            tracing::debug!(handle, "user could not be found");
        }
        found
    }

    pub fn user_by_handle_mut(&mut self, handle: &str) -> Option<&mut User> {
        let found = self.users.iter_mut().find(|u| u.handle == handle);
        if found.is_none() {
            tracing::debug!(handle, "user could not be found");
        }
        found
    }

    /// Look up a user by real/display name.
    pub fn user_by_name(&self, name: &str) -> Option<&User> {
        let found = self.users.iter().find(|u| u.display_name == name);
        if found.is_none() {
            tracing::debug!(name, "person could not be found");
        }
        found
    }

    /// Morning reset: re-enable hounding for every user who opted into the
    /// reset cycle. Returns the number of users actually mutated.
    pub fn reset_hounding(&mut self) -> usize {
        let mut count = 0;
        for user in &mut self.users {
            if user.settings.should_reset_hound {
                user.settings.should_hound = true;
                count += 1;
            }
        }
        count
    }

    /// Set the shared default cadence and propagate it to every user.
    /// Returns the number of users updated.
    pub fn set_hound_frequency(&mut self, hours: f64) -> usize {
        self.hound_frequency = hours;
        for user in &mut self.users {
            user.settings.hound_frequency = hours;
        }
        self.users.len()
    }

    /// Propagate an organization-wide enable/disable to every user.
    /// Returns the number of users updated.
    pub fn set_should_hound(&mut self, should: bool) -> usize {
        for user in &mut self.users {
            user.settings.should_hound = should;
        }
        self.users.len()
    }

    /// Record a calendar event. Dates arrive as `MM/DD/YYYY` strings from
    /// chat commands; bad input is reported back, not swallowed.
    pub fn add_event(
        &mut self,
        date: &str,
        name: &str,
    ) -> Result<CalendarEvent, ValidationError> {
        let date = NaiveDate::parse_from_str(date, "%m/%d/%Y").map_err(|_| {
            ValidationError::InvalidDate {
                given: date.to_string(),
            }
        })?;
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName {
                operation: "add_event",
            });
        }
        let event = CalendarEvent {
            date,
            name: name.trim().to_string(),
        };
        tracing::debug!(%date, name = %event.name, org = %self.name, "calendar event added");
        self.events.push(event.clone());
        Ok(event)
    }

    /// Calendar events on or after today.
    pub fn upcoming_events(&self) -> Vec<&CalendarEvent> {
        let today = Utc::now().date_naive();
        self.events.iter().filter(|e| e.date >= today).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::Settings;
    use chrono::NaiveTime;

    fn make_user(handle: &str, should_reset: bool) -> User {
        User {
            handle: handle.to_string(),
            display_name: format!("User {}", handle),
            salaried: true,
            tz_offset_minutes: 0,
            active_hours: (
                NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            ),
            punches: Vec::new(),
            settings: Settings {
                should_hound: false,
                should_reset_hound: should_reset,
                ..Settings::with_frequency(8.0)
            },
        }
    }

    #[test]
    fn test_reset_hounding_counts_only_mutated() {
        let mut org = Organization::new("acme", 8.0);
        org.users.push(make_user("a", true));
        org.users.push(make_user("b", false));
        org.users.push(make_user("c", true));

        let count = org.reset_hounding();

        assert_eq!(count, 2);
        assert!(org.user_by_handle("a").unwrap().settings.should_hound);
        assert!(!org.user_by_handle("b").unwrap().settings.should_hound);
        assert!(org.user_by_handle("c").unwrap().settings.should_hound);
    }

    #[test]
    fn test_set_hound_frequency_propagates() {
        let mut org = Organization::new("acme", 8.0);
        org.users.push(make_user("a", true));
        org.users.push(make_user("b", true));

        let count = org.set_hound_frequency(4.0);

        assert_eq!(count, 2);
        assert_eq!(org.hound_frequency, 4.0);
        for user in &org.users {
            assert_eq!(user.settings.hound_frequency, 4.0);
        }
    }

    #[test]
    fn test_add_event_rejects_bad_date() {
        let mut org = Organization::new("acme", 8.0);
        let err = org.add_event("13/45/2024", "Launch").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDate { .. }));
        assert!(org.events.is_empty());
    }

    #[test]
    fn test_add_event_rejects_empty_name() {
        let mut org = Organization::new("acme", 8.0);
        let err = org.add_event("03/11/2024", "  ").unwrap_err();
        assert!(matches!(err, ValidationError::EmptyName { .. }));
    }

    #[test]
    fn test_add_event_accepts_valid_input() {
        let mut org = Organization::new("acme", 8.0);
        let event = org.add_event("03/11/2024", "Launch day").unwrap();
        assert_eq!(event.name, "Launch day");
        assert_eq!(
            event.date,
            NaiveDate::from_ymd_opt(2024, 3, 11).unwrap()
        );
    }

    #[test]
    fn test_unknown_handle_is_none() {
        let org = Organization::new("acme", 8.0);
        assert!(org.user_by_handle("ghost").is_none());
        assert!(org.user_by_name("Ghost").is_none());
    }
}
