//! Hounding decision engine.
//!
//! Decides, for a point in time and a user's attendance state, whether a
//! clock-in/clock-out reminder should be sent and which phrasing to use.

mod engine;
mod phrases;

pub use engine::{HoundEngine, Reminder};
pub use phrases::{Direction, PhraseBook};
