//! Reminder phrase pools.
//!
//! Reminders pick uniformly from the pool for the requested direction, with
//! a 1-in-6 chance of the fixed nagging suffix. The random source is
//! supplied by the caller so tests can pin the outcome.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Which way the reminder nudges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Nudge the user to clock in
    In,
    /// Nudge the user to clock out
    Out,
}

/// Configurable phrase pools for reminder messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhraseBook {
    pub punch_in: Vec<String>,
    pub punch_out: Vec<String>,
    /// Appended with probability 1/6
    pub annoying: String,
}

impl Default for PhraseBook {
    fn default() -> Self {
        Self {
            punch_in: vec![
                "Check in if you're on the clock~".to_string(),
                "Are you working? Clock in!".to_string(),
                "Looks like you're active. Don't forget to punch in.".to_string(),
            ],
            punch_out: vec![
                "Don't forget to check out~".to_string(),
                "Still on the clock? Punch out if you're done.".to_string(),
                "Your shift looks over. Remember to clock out.".to_string(),
            ],
            annoying: " (◕ᴥ◕)".to_string(),
        }
    }
}

impl PhraseBook {
    /// Pick a phrase for `direction` uniformly at random.
    pub fn pick<R: Rng>(&self, direction: Direction, rng: &mut R) -> String {
        let pool = match direction {
            Direction::In => &self.punch_in,
            Direction::Out => &self.punch_out,
        };
        let mut message = if pool.is_empty() {
            String::new()
        } else {
            pool[rng.gen_range(0..pool.len())].clone()
        };
        if rng.gen_range(0..6) == 0 {
            message.push_str(&self.annoying);
        }
        message
    }
}
