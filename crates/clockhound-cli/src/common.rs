//! Shared helpers for the CLI commands: organization-file persistence and a
//! stdout-backed messenger.

use std::fs;
use std::path::Path;

use clockhound_core::error::DeliveryError;
use clockhound_core::triggers::Messaging;
use clockhound_core::{Organization, ReactionTag};

/// Load the organization from a TOML file.
pub fn load_org(path: &Path) -> Result<Organization, Box<dyn std::error::Error>> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("could not read {}: {}", path.display(), e))?;
    let org = toml::from_str(&text)?;
    Ok(org)
}

/// Save the organization back to its TOML file.
pub fn save_org(path: &Path, org: &Organization) -> Result<(), Box<dyn std::error::Error>> {
    let text = toml::to_string_pretty(org)?;
    fs::write(path, text)?;
    Ok(())
}

/// Messenger that prints deliveries instead of talking to a chat platform.
#[derive(Default)]
pub struct StdoutMessenger;

impl Messaging for StdoutMessenger {
    fn direct_message(&mut self, handle: &str, text: &str) -> Result<(), DeliveryError> {
        println!("DM @{handle}: {text}");
        Ok(())
    }

    fn annotate(&mut self, handle: &str, tag: ReactionTag) -> Result<(), DeliveryError> {
        println!("react :{}: -> @{handle}", tag.emoji());
        Ok(())
    }
}
