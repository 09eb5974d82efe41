//! # Clockhound Core Library
//!
//! Core business logic for Clockhound, a chat-bot that nudges employees to
//! clock in or out based on their punch history, configured working hours,
//! and organization-wide policy. Chat delivery, command parsing, spreadsheet
//! persistence, and scheduling live in the host application; this crate is
//! the decision core it calls into.
//!
//! ## Key Components
//!
//! - [`HoundEngine`]: decides whether a reminder fires and which variant
//! - [`command::process`]: settings-command processor for per-user and
//!   organization-wide hounding policy
//! - [`Organization`] / [`User`] / [`Punch`]: the attendance data model
//! - [`triggers`]: entry points for chat events, the periodic sweep, and
//!   the daily reset, over an abstract [`triggers::Messaging`] capability

pub mod command;
pub mod error;
pub mod hound;
pub mod org;
pub mod punch;
pub mod triggers;
pub mod user;

pub use command::{CommandOutcome, ReactionTag};
pub use error::{CoreError, DeliveryError, ValidationError};
pub use hound::{Direction, HoundEngine, PhraseBook, Reminder};
pub use org::{CalendarEvent, Channel, Organization};
pub use punch::{AttendanceState, LeaveWindow, Punch, PunchKind};
pub use user::{LastMessage, Settings, User};
