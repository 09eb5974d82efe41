//! Trigger entry points: chat-activity events, the periodic sweep, and the
//! daily reset.
//!
//! These are the seams the host runtime's timers and chat events call into.
//! Delivery is fire-and-forget: a failed send is logged, never retried.
//! Events arriving before the organization is ready are dropped, not queued.

use chrono::{DateTime, Utc};

use crate::command::{self, CommandOutcome, ReactionTag};
use crate::error::DeliveryError;
use crate::hound::HoundEngine;
use crate::org::{Channel, Organization};

/// Chat delivery capability supplied by the host.
pub trait Messaging {
    /// Send a direct message to a user.
    fn direct_message(&mut self, handle: &str, text: &str) -> Result<(), DeliveryError>;

    /// Attach a reaction-style acknowledgment to the triggering event.
    fn annotate(&mut self, handle: &str, tag: ReactionTag) -> Result<(), DeliveryError>;
}

fn deliver(messenger: &mut dyn Messaging, handle: &str, text: &str) -> bool {
    match messenger.direct_message(handle, text) {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(handle, %err, "reminder delivery failed");
            false
        }
    }
}

/// Chat-activity trigger (typing and similar visible events).
pub fn on_activity(
    engine: &mut HoundEngine,
    org: &mut Organization,
    messenger: &mut dyn Messaging,
    handle: &str,
    channel: &Channel,
    now: DateTime<Utc>,
) {
    if let Some(reminder) = engine.evaluate(org, handle, channel, now, false, false) {
        deliver(messenger, &reminder.handle, &reminder.text);
    }
}

/// Presence-change trigger; passive, so only the always-on nudges fire.
pub fn on_presence(
    engine: &mut HoundEngine,
    org: &mut Organization,
    messenger: &mut dyn Messaging,
    handle: &str,
    now: DateTime<Utc>,
) {
    if let Some(reminder) = engine.evaluate(org, handle, &Channel::none(), now, false, true) {
        deliver(messenger, &reminder.handle, &reminder.text);
    }
}

/// Periodic sweep over every user (the five-minute job).
///
/// Returns the number of reminders delivered. Skipped entirely when the
/// organization isn't ready.
pub fn sweep(
    engine: &mut HoundEngine,
    org: &mut Organization,
    messenger: &mut dyn Messaging,
    now: DateTime<Utc>,
) -> usize {
    if !org.ready {
        tracing::warn!(org = %org.name, "don't sweep, organization isn't ready yet");
        return 0;
    }
    let handles: Vec<String> = org.users.iter().map(|u| u.handle.clone()).collect();
    let mut delivered = 0;
    for handle in handles {
        if let Some(reminder) = engine.evaluate(org, &handle, &Channel::none(), now, true, true) {
            if deliver(messenger, &reminder.handle, &reminder.text) {
                delivered += 1;
            }
        }
    }
    delivered
}

/// Morning reset job. Returns `None` when the organization wasn't ready
/// (run dropped), otherwise the number of users whose hounding was
/// re-enabled.
pub fn daily_reset(org: &mut Organization) -> Option<usize> {
    if !org.ready {
        tracing::warn!(org = %org.name, "don't run scheduled reset, organization isn't ready yet");
        return None;
    }
    let count = org.reset_hounding();
    tracing::info!(count, org = %org.name, "reset hound status for the morning");
    Some(count)
}

/// Settings-command trigger. Always replies, even on failure; the only
/// silent path is an invoker the directory doesn't know.
pub fn handle_command(
    org: &mut Organization,
    messenger: &mut dyn Messaging,
    invoker: &str,
    raw: &str,
) -> Option<CommandOutcome> {
    if org.user_by_handle(invoker).is_none() {
        tracing::debug!(invoker, "ignoring settings command from unknown user");
        return None;
    }
    let outcome = command::process(raw, invoker, org);
    deliver(messenger, invoker, &outcome.reply);
    if let Err(err) = messenger.annotate(invoker, outcome.reaction) {
        tracing::warn!(invoker, %err, "reaction annotation failed");
    }
    Some(outcome)
}
