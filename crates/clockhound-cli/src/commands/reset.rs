//! Morning hound-status reset.

use std::path::Path;

use clockhound_core::triggers;

use crate::common::{load_org, save_org};

pub fn run(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut org = load_org(file)?;
    match triggers::daily_reset(&mut org) {
        Some(count) => {
            let noun = if count == 1 { "person's" } else { "peoples'" };
            println!("Reset {count} {noun} hound status for the morning");
            save_org(file, &org)?;
            Ok(())
        }
        None => Err("organization is not ready; reset dropped".into()),
    }
}
