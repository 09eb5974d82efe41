//! Hound settings command passthrough.
//!
//! Runs a raw command string through the settings processor as the given
//! user and persists any mutation back to the organization file.

use std::path::Path;

use clockhound_core::triggers;

use crate::common::{load_org, save_org, StdoutMessenger};

pub fn run(file: &Path, user: &str, command: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut org = load_org(file)?;
    let mut messenger = StdoutMessenger;

    let Some(outcome) = triggers::handle_command(&mut org, &mut messenger, user, command) else {
        return Err(format!("unknown user: {user}").into());
    };

    if outcome.mutated {
        save_org(file, &org)?;
        println!("saved: {}", file.display());
    }
    Ok(())
}
