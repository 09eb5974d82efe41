//! Settings command processor.
//!
//! Parses a hound policy-change command string into a mutation of per-user
//! or organization-wide settings, plus a reply and a reaction tag. Command
//! paths always produce a reply, even on failure; unparseable input falls
//! through to the usage help with no mutation.

use serde::{Deserialize, Serialize};

use crate::org::Organization;

const USAGE: &str = "I couldn't understand you. Try something like \
`hound (self/org) (on/off/pause/reset/status/X hours)`";

/// Reaction-style acknowledgment attached to the command reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionTag {
    Ack,
    Nack,
}

impl ReactionTag {
    /// Emoji short-name the chat layer attaches.
    pub fn emoji(self) -> &'static str {
        match self {
            ReactionTag::Ack => "dog2",
            ReactionTag::Nack => "x",
        }
    }
}

/// Who a settings command applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Me,
    Org,
}

/// Parsed settings action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Set the hound cadence to this many hours
    Frequency(f64),
    Start,
    Stop,
    Pause,
    Reset,
    Status,
    Unknown,
}

/// Result of processing a settings command.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutcome {
    pub reply: String,
    pub reaction: ReactionTag,
    /// Whether any settings were changed; callers persist when true
    pub mutated: bool,
}

impl CommandOutcome {
    fn ack(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            reaction: ReactionTag::Ack,
            mutated: true,
        }
    }

    fn reject(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            reaction: ReactionTag::Nack,
            mutated: false,
        }
    }

    fn info(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            reaction: ReactionTag::Ack,
            mutated: false,
        }
    }
}

/// Parse an hours-expression like `0.5 hours`, `1 hour`, `15.25 hours`.
///
/// Returns the number of hours, or `None` for anything malformed. Negative,
/// NaN, and infinite values are rejected explicitly.
pub fn parse_hours(input: &str) -> Option<f64> {
    let mut tokens = input.split_whitespace();
    let number = tokens.next()?;
    let unit = tokens.next()?;
    if tokens.next().is_some() {
        return None;
    }
    if !matches!(unit.to_ascii_lowercase().as_str(), "hour" | "hours") {
        return None;
    }
    let hours: f64 = number.parse().ok()?;
    if !hours.is_finite() || hours < 0.0 {
        return None;
    }
    Some(hours)
}

/// Resolve the command's scope selector and the remaining action string.
fn resolve_scope(raw: &str, invoker: &str, org_name: &str) -> (Scope, String) {
    let tokens: Vec<&str> = raw.split_whitespace().collect();
    let Some(&first) = tokens.first() else {
        return (Scope::Me, String::new());
    };
    if first == org_name || first.eq_ignore_ascii_case("org") {
        return (Scope::Org, tokens[1..].join(" "));
    }
    if first == invoker || first.eq_ignore_ascii_case("self") {
        return (Scope::Me, tokens[1..].join(" "));
    }
    // A leading number followed by hour/hours is an hours-expression for the
    // invoking user; so is anything longer than two tokens once the first
    // token is dropped.
    let numeric_hours = tokens.len() >= 2
        && tokens[0].parse::<f64>().is_ok()
        && matches!(tokens[1].to_ascii_lowercase().as_str(), "hour" | "hours");
    if numeric_hours {
        (Scope::Me, tokens.join(" "))
    } else if tokens.len() > 2 {
        (Scope::Me, tokens[1..].join(" "))
    } else {
        (Scope::Me, first.to_string())
    }
}

fn parse_action(action: &str) -> Action {
    if let Some(hours) = parse_hours(action) {
        return Action::Frequency(hours);
    }
    match action.to_ascii_lowercase().as_str() {
        "start" | "on" | "enable" => Action::Start,
        "stop" | "off" | "disable" => Action::Stop,
        "pause" => Action::Pause,
        "reset" => Action::Reset,
        "status" | "info" => Action::Status,
        _ => Action::Unknown,
    }
}

/// Composed on/off/disabled status line shared by both scopes.
fn compose_status(should_hound: bool, should_reset: bool, frequency: f64) -> String {
    let mut status = if should_hound { "on" } else { "off" }.to_string();
    if !should_reset {
        status = "disabled".to_string();
    }
    if status == "on" {
        status.push_str(&format!(
            ", and is set to ping every *{} hours* while active",
            frequency
        ));
    }
    status
}

/// Process a raw hound settings command from `invoker`.
///
/// Mutations are applied directly to `org`; `CommandOutcome::mutated` tells
/// the caller whether anything needs persisting.
pub fn process(raw: &str, invoker: &str, org: &mut Organization) -> CommandOutcome {
    let raw = raw.trim();
    if raw.is_empty() {
        return CommandOutcome::info(USAGE);
    }
    let (scope, action_str) = resolve_scope(raw, invoker, &org.name);
    let action = parse_action(&action_str);

    match scope {
        Scope::Me => process_self(action, invoker, org),
        Scope::Org => process_org(action, raw, org),
    }
}

fn process_self(action: Action, invoker: &str, org: &mut Organization) -> CommandOutcome {
    let default_frequency = org.hound_frequency;
    let Some(user) = org.user_by_handle_mut(invoker) else {
        return CommandOutcome::reject(format!("I don't know who {} is.", invoker));
    };
    let settings = &mut user.settings;

    match action {
        Action::Frequency(hours) => {
            settings.should_hound = true;
            settings.should_reset_hound = true;
            settings.hound_frequency = hours;
            CommandOutcome::ack(format!(
                "Hounding frequency set to be every {} hours during your active hours.",
                hours
            ))
        }
        Action::Start => {
            settings.should_hound = true;
            settings.should_reset_hound = true;
            if settings.hound_frequency <= -1.0 {
                settings.hound_frequency = default_frequency;
            }
            CommandOutcome::ack("Hounding is now *on*.")
        }
        Action::Stop => {
            settings.should_hound = false;
            settings.should_reset_hound = false;
            settings.hound_frequency = -1.0;
            CommandOutcome::ack(
                "Hounding is now *off*. You will not be hounded until you turn \
                 this setting back on.",
            )
        }
        Action::Pause => {
            if settings.hound_frequency > -1.0 && settings.should_hound {
                settings.should_hound = false;
                settings.should_reset_hound = true;
                CommandOutcome::ack("Hounding is now *paused*. Hounding will resume tomorrow.")
            } else {
                CommandOutcome::reject("Hounding is not enabled, so you cannot pause it.")
            }
        }
        Action::Reset => {
            settings.should_hound = true;
            settings.should_reset_hound = false;
            settings.hound_frequency = default_frequency;
            CommandOutcome::ack(format!(
                "Reset your hounding status to organization defaults *({} hours)*.",
                default_frequency
            ))
        }
        Action::Status => {
            let status = compose_status(
                settings.should_hound,
                settings.should_reset_hound,
                settings.hound_frequency,
            );
            CommandOutcome::info(format!("Hounding is {}.", status))
        }
        Action::Unknown => CommandOutcome::reject(USAGE),
    }
}

fn process_org(action: Action, raw: &str, org: &mut Organization) -> CommandOutcome {
    if !org.ready {
        return CommandOutcome::reject("Organization is not ready.");
    }

    match action {
        Action::Frequency(hours) => {
            org.set_hound_frequency(hours);
            CommandOutcome::ack(format!(
                "Hounding frequency set to every {} hours for {}.",
                hours, org.name
            ))
        }
        Action::Start => {
            org.should_hound = true;
            org.should_reset_hound = true;
            org.set_should_hound(true);
            CommandOutcome::ack("Hounding is now *on* for the organization.")
        }
        Action::Stop => {
            org.should_hound = false;
            org.should_reset_hound = false;
            org.set_should_hound(false);
            CommandOutcome::ack(
                "Hounding is now *off* for the organization. Hounding status \
                 will not reset until it is reactivated.",
            )
        }
        Action::Pause => {
            if org.should_hound {
                org.should_hound = false;
                org.should_reset_hound = true;
                org.set_should_hound(false);
                CommandOutcome::ack(
                    "Hounding is now *paused* for the organization. Hounding \
                     will resume tomorrow.",
                )
            } else {
                CommandOutcome::reject("Hounding is not enabled, so you cannot pause it.")
            }
        }
        Action::Reset => {
            let count = org.reset_hounding();
            CommandOutcome::ack(format!(
                "Reset hounding status for {} {} employees.",
                count, org.name
            ))
        }
        Action::Status => {
            let status =
                compose_status(org.should_hound, org.should_reset_hound, org.hound_frequency);
            CommandOutcome::info(format!("Hounding is {}.", status))
        }
        Action::Unknown => {
            tracing::debug!(command = raw, "hound could not parse command");
            CommandOutcome::reject(USAGE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::{Settings, User};
    use chrono::NaiveTime;
    use proptest::prelude::*;

    fn make_org() -> Organization {
        let mut org = Organization::new("acme", 8.0);
        org.ready = true;
        org.users.push(User {
            handle: "ann".to_string(),
            display_name: "Ann Oakes".to_string(),
            salaried: true,
            tz_offset_minutes: 0,
            active_hours: (
                NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            ),
            punches: Vec::new(),
            settings: Settings::with_frequency(8.0),
        });
        org
    }

    #[test]
    fn test_parse_hours_accepted_forms() {
        assert_eq!(parse_hours("0.5 hours"), Some(0.5));
        assert_eq!(parse_hours("1 hour"), Some(1.0));
        assert_eq!(parse_hours("2 hours"), Some(2.0));
        assert_eq!(parse_hours("15.25 hours"), Some(15.25));
        assert_eq!(parse_hours("3 HOURS"), Some(3.0));
    }

    #[test]
    fn test_parse_hours_rejects_malformed() {
        assert_eq!(parse_hours(""), None);
        assert_eq!(parse_hours("hours"), None);
        assert_eq!(parse_hours("two hours"), None);
        assert_eq!(parse_hours("2 minutes"), None);
        assert_eq!(parse_hours("-1 hours"), None);
        assert_eq!(parse_hours("NaN hours"), None);
        assert_eq!(parse_hours("inf hours"), None);
        assert_eq!(parse_hours("2 hours please"), None);
    }

    #[test]
    fn test_scope_org_name_match() {
        let (scope, action) = resolve_scope("acme 4 hours", "ann", "acme");
        assert_eq!(scope, Scope::Org);
        assert_eq!(action, "4 hours");
    }

    #[test]
    fn test_scope_self_handle_match() {
        let (scope, action) = resolve_scope("ann pause", "ann", "acme");
        assert_eq!(scope, Scope::Me);
        assert_eq!(action, "pause");
    }

    #[test]
    fn test_scope_bare_hours_expression() {
        let (scope, action) = resolve_scope("2 hours", "ann", "acme");
        assert_eq!(scope, Scope::Me);
        assert_eq!(action, "2 hours");
    }

    #[test]
    fn test_scope_bare_single_token() {
        let (scope, action) = resolve_scope("status", "ann", "acme");
        assert_eq!(scope, Scope::Me);
        assert_eq!(action, "status");
    }

    #[test]
    fn test_set_own_frequency() {
        let mut org = make_org();
        let outcome = process("2.5 hours", "ann", &mut org);
        assert_eq!(outcome.reaction, ReactionTag::Ack);
        assert!(outcome.mutated);
        let settings = &org.user_by_handle("ann").unwrap().settings;
        assert_eq!(settings.hound_frequency, 2.5);
        assert!(settings.should_hound);
        assert!(settings.should_reset_hound);
    }

    #[test]
    fn test_stop_disables_with_sentinel() {
        let mut org = make_org();
        let outcome = process("off", "ann", &mut org);
        assert!(outcome.mutated);
        let settings = &org.user_by_handle("ann").unwrap().settings;
        assert!(!settings.should_hound);
        assert!(!settings.should_reset_hound);
        assert_eq!(settings.hound_frequency, -1.0);
    }

    #[test]
    fn test_start_restores_org_default_after_stop() {
        let mut org = make_org();
        process("off", "ann", &mut org);
        let outcome = process("start", "ann", &mut org);
        assert_eq!(outcome.reaction, ReactionTag::Ack);
        let settings = &org.user_by_handle("ann").unwrap().settings;
        assert!(settings.should_hound);
        assert_eq!(settings.hound_frequency, 8.0);
    }

    #[test]
    fn test_pause_then_pause_again_rejected() {
        let mut org = make_org();
        let first = process("pause", "ann", &mut org);
        assert_eq!(first.reaction, ReactionTag::Ack);
        {
            let settings = &org.user_by_handle("ann").unwrap().settings;
            assert!(!settings.should_hound);
            assert!(settings.should_reset_hound);
        }
        let second = process("pause", "ann", &mut org);
        assert_eq!(second.reaction, ReactionTag::Nack);
        assert!(!second.mutated);
    }

    #[test]
    fn test_reset_self_uses_org_default() {
        let mut org = make_org();
        process("2 hours", "ann", &mut org);
        let outcome = process("reset", "ann", &mut org);
        assert!(outcome.mutated);
        let settings = &org.user_by_handle("ann").unwrap().settings;
        assert_eq!(settings.hound_frequency, 8.0);
        assert!(settings.should_hound);
        assert!(!settings.should_reset_hound);
    }

    #[test]
    fn test_status_reports_composed_state() {
        let mut org = make_org();
        let on = process("status", "ann", &mut org);
        assert!(on.reply.contains("on"));
        assert!(on.reply.contains("8 hours"));
        assert!(!on.mutated);

        process("off", "ann", &mut org);
        let off = process("status", "ann", &mut org);
        assert!(off.reply.contains("disabled"));
    }

    #[test]
    fn test_unknown_action_gets_usage_help() {
        let mut org = make_org();
        let outcome = process("bark", "ann", &mut org);
        assert_eq!(outcome.reaction, ReactionTag::Nack);
        assert!(!outcome.mutated);
        assert!(outcome.reply.contains("hound"));
    }

    #[test]
    fn test_empty_command_gets_usage_help() {
        let mut org = make_org();
        let outcome = process("   ", "ann", &mut org);
        assert_eq!(outcome.reaction, ReactionTag::Ack);
        assert!(!outcome.mutated);
    }

    #[test]
    fn test_org_scope_by_registered_name_sets_default() {
        let mut org = make_org();
        let outcome = process("acme 4 hours", "ann", &mut org);
        assert_eq!(outcome.reaction, ReactionTag::Ack);
        assert!(outcome.mutated);
        assert_eq!(org.hound_frequency, 4.0);
        // Propagates to every user as well as the shared default.
        assert_eq!(org.user_by_handle("ann").unwrap().settings.hound_frequency, 4.0);
    }

    #[test]
    fn test_org_commands_require_readiness() {
        let mut org = make_org();
        org.ready = false;
        let outcome = process("acme reset", "ann", &mut org);
        assert_eq!(outcome.reaction, ReactionTag::Nack);
        assert!(!outcome.mutated);
    }

    #[test]
    fn test_org_status_reports_state_not_help() {
        let mut org = make_org();
        let outcome = process("acme status", "ann", &mut org);
        assert!(outcome.reply.starts_with("Hounding is"));
        assert!(!outcome.reply.contains("couldn't understand"));
    }

    #[test]
    fn test_org_reset_reports_count() {
        let mut org = make_org();
        process("pause", "ann", &mut org);
        let outcome = process("acme reset", "ann", &mut org);
        assert!(outcome.reply.contains("1 acme employees"));
        assert!(org.user_by_handle("ann").unwrap().settings.should_hound);
    }

    proptest! {
        #[test]
        fn prop_parse_hours_round_trips_decimals(hours in 0.0f64..1000.0) {
            let formatted = format!("{} hours", hours);
            prop_assert_eq!(parse_hours(&formatted), Some(hours));
        }

        #[test]
        fn prop_parse_hours_never_panics(input in "\\PC*") {
            let _ = parse_hours(&input);
        }

        #[test]
        fn prop_garbage_commands_never_mutate(input in "[a-z]{1,8}") {
            let known = [
                "start", "on", "enable", "stop", "off", "disable", "pause",
                "reset", "status", "info", "self", "org", "acme", "ann",
            ];
            prop_assume!(!known.contains(&input.as_str()));
            let mut org = make_org();
            let before = org.user_by_handle("ann").unwrap().settings.clone();
            let outcome = process(&input, "ann", &mut org);
            prop_assert!(!outcome.mutated);
            prop_assert_eq!(&org.user_by_handle("ann").unwrap().settings, &before);
        }
    }
}
