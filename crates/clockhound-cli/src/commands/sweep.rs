//! Periodic reminder sweep.

use std::path::Path;

use chrono::{DateTime, Utc};
use clockhound_core::{triggers, HoundEngine};

use crate::common::{load_org, save_org, StdoutMessenger};

pub fn run(
    file: &Path,
    at: Option<&str>,
    seed: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let now = match at {
        Some(s) => DateTime::parse_from_rfc3339(s)
            .map_err(|e| format!("invalid --at instant: {e}"))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };
    let mut engine = match seed {
        Some(seed) => HoundEngine::with_seed("clockhound", seed),
        None => HoundEngine::new("clockhound"),
    };
    let mut org = load_org(file)?;
    let mut messenger = StdoutMessenger;

    let delivered = triggers::sweep(&mut engine, &mut org, &mut messenger, now);
    println!("delivered {delivered} reminders");

    // last_message/last_ping bookkeeping changed even when nothing fired.
    save_org(file, &org)?;
    Ok(())
}
