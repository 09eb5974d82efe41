//! The hounding decision engine.
//!
//! `evaluate` is a pure decision function over (user, channel, trigger mode,
//! now): state in, optional reminder out. The only state it writes back is
//! the user's `last_message` bookkeeping and the `last_ping` cooldown stamp
//! when a reminder actually fires. Delivery belongs to the trigger layer.

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand_pcg::Mcg128Xsl64;

use crate::org::{Channel, Organization};
use crate::punch::AttendanceState;
use crate::user::{hours_between, round2, LastMessage};

use super::phrases::{Direction, PhraseBook};

/// A reminder the engine decided to send.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    /// Chat handle of the recipient
    pub handle: String,
    pub direction: Direction,
    pub text: String,
}

/// Decision engine for clock-in/clock-out reminders.
pub struct HoundEngine {
    /// The bot's own chat identity; never hound the hound
    bot_handle: String,
    phrases: PhraseBook,
    rng: Mcg128Xsl64,
}

impl HoundEngine {
    /// Create an engine with the default phrase pools and an entropy seed.
    pub fn new(bot_handle: impl Into<String>) -> Self {
        Self {
            bot_handle: bot_handle.into(),
            phrases: PhraseBook::default(),
            rng: Mcg128Xsl64::from_entropy(),
        }
    }

    /// Create an engine with a fixed seed, for deterministic phrasing.
    pub fn with_seed(bot_handle: impl Into<String>, seed: u64) -> Self {
        Self {
            bot_handle: bot_handle.into(),
            phrases: PhraseBook::default(),
            rng: Mcg128Xsl64::seed_from_u64(seed),
        }
    }

    /// Replace the phrase pools.
    pub fn with_phrases(mut self, phrases: PhraseBook) -> Self {
        self.phrases = phrases;
        self
    }

    /// Decide whether `handle` should be hounded at `now`.
    ///
    /// `force_hound` marks calls from outside the normal chat-event path
    /// (the periodic sweep); it does not change the gate logic. `passive`
    /// suppresses the nudges that only make sense in response to visible
    /// activity.
    ///
    /// Background callers treat every precondition failure as a quiet
    /// no-op; this function logs and returns `None` rather than erroring.
    pub fn evaluate(
        &mut self,
        org: &mut Organization,
        handle: &str,
        channel: &Channel,
        now: DateTime<Utc>,
        force_hound: bool,
        passive: bool,
    ) -> Option<Reminder> {
        if handle == self.bot_handle {
            tracing::debug!("caught myself, don't hound the hound");
            return None;
        }
        if !org.ready {
            tracing::debug!(org = %org.name, "don't hound, organization isn't ready yet");
            return None;
        }
        let exempt = channel.private || org.exempt_channels.contains(&channel.name);
        let user = org.user_by_handle_mut(handle)?;
        if !user.settings.hounding_enabled() {
            tracing::debug!(handle, "hounding disabled for user");
            return None;
        }
        if exempt {
            tracing::debug!(channel = %channel.name, "not an appropriate hounding channel");
            return None;
        }

        let state = user.last_punch();
        let (start, end) = user.active_window_on(now);
        let inactive = user.is_inactive(now);
        let salaried = user.salaried;
        let freq = user.settings.hound_frequency;

        let time_since_start = round2(hours_between(now, start).abs());
        let time_since_end = round2(hours_between(now, end).abs());
        let last_punch_age = state.last_time().map(|t| hours_between(now, t));
        let time_since_last_punch = last_punch_age.unwrap_or(0.0);
        let last_ping = user.settings.last_ping.unwrap_or(now);
        let time_since_last_ping = round2(hours_between(now, last_ping).abs());

        // Bookkeeping only; recorded before any branch is considered.
        let previous = user.settings.last_message.take();
        user.settings.last_message = Some(LastMessage {
            time: now,
            channel: channel.name.clone(),
        });
        let time_since_last_message = previous
            .map(|m| round2(hours_between(now, m.time)))
            .unwrap_or(0.0);

        tracing::debug!(
            handle,
            salaried,
            force_hound,
            passive,
            %now,
            time_since_start,
            time_since_end,
            time_since_last_punch,
            time_since_last_message,
            time_since_last_ping,
            hound_frequency = freq,
            "hound signals"
        );

        // Cadence gate: only consider hounding outside the cooldown and the
        // just-punched quiet period. The quiet period only applies when a
        // punch exists; a user with no punch at all is what branch (a) is for.
        let cadence_open = time_since_last_ping == 0.0 || time_since_last_ping >= freq;
        let outside_quiet_period = last_punch_age.map_or(true, |age| age > 0.25);
        if !(cadence_open && outside_quiet_period) {
            tracing::debug!(handle, "within cooldown, not hounding");
            return None;
        }

        let direction = if matches!(state, AttendanceState::NoPunch) && !inactive && !passive {
            tracing::debug!(handle, "considering hound: no punch during active period");
            if now > start && time_since_start >= 0.5 {
                Some(Direction::In)
            } else if now > end && time_since_end >= 0.5 {
                Some(Direction::Out)
            } else {
                None
            }
        } else if matches!(state, AttendanceState::PunchedIn { .. }) && inactive {
            tracing::debug!(handle, "considering hound: punched in outside active period");
            if now > end && time_since_end >= 0.5 {
                Some(Direction::Out)
            } else {
                None
            }
        } else if matches!(state, AttendanceState::PunchedOut { .. }) && !passive {
            tracing::debug!(handle, "considering hound: punched out during active period");
            if !inactive && time_since_start >= 0.5 {
                Some(Direction::In)
            } else {
                None
            }
        } else if let AttendanceState::OnLeave { window, .. } = state {
            tracing::debug!(handle, "considering hound: on leave");
            if !passive && !window.contains(now) {
                Some(Direction::In)
            } else {
                None
            }
        } else if salaried && time_since_last_punch <= 0.25 {
            tracing::debug!(
                handle,
                hours_ago = time_since_last_punch,
                "safe from hounding, punched recently"
            );
            None
        } else if !salaried
            && matches!(state, AttendanceState::PunchedIn { .. })
            && time_since_last_punch > freq
        {
            // Hourly users get pinged when a shift outlasts their cadence.
            Some(Direction::Out)
        } else {
            tracing::debug!(
                handle,
                hours_left = freq - time_since_last_ping,
                "safe from hounding for now"
            );
            None
        };

        let direction = direction?;
        user.settings.last_ping = Some(now);
        let text = self.phrases.pick(direction, &mut self.rng);
        Some(Reminder {
            handle: handle.to_string(),
            direction,
            text,
        })
    }
}
