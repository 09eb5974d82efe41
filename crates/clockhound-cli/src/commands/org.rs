//! Organization file management.

use std::path::PathBuf;

use chrono::NaiveTime;
use clap::Subcommand;
use clockhound_core::{Organization, Punch, PunchKind, Settings, User};

use crate::common::{load_org, save_org};

#[derive(Subcommand)]
pub enum OrgAction {
    /// Write a sample organization file
    Init {
        /// Output file path
        #[arg(short, long, default_value = "clockhound.toml")]
        file: PathBuf,
        /// Organization name
        #[arg(long, default_value = "acme")]
        name: String,
        /// Default hound frequency in hours
        #[arg(long, default_value_t = 8.0)]
        frequency: f64,
    },
    /// Show organization policy and per-user hound status
    Status {
        #[arg(short, long, default_value = "clockhound.toml")]
        file: PathBuf,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Mark the organization as synced and ready
    Ready {
        #[arg(short, long, default_value = "clockhound.toml")]
        file: PathBuf,
    },
    /// Add a calendar event (MM/DD/YYYY)
    AddEvent {
        #[arg(short, long, default_value = "clockhound.toml")]
        file: PathBuf,
        date: String,
        name: Vec<String>,
    },
}

pub fn run(action: OrgAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        OrgAction::Init {
            file,
            name,
            frequency,
        } => init(file, name, frequency),
        OrgAction::Status { file, json } => status(file, json),
        OrgAction::Ready { file } => ready(file),
        OrgAction::AddEvent { file, date, name } => add_event(file, date, name.join(" ")),
    }
}

fn init(file: PathBuf, name: String, frequency: f64) -> Result<(), Box<dyn std::error::Error>> {
    let mut org = Organization::new(name, frequency);
    org.ready = true;
    org.users.push(sample_user("ann", "Ann Oakes", true, frequency));
    org.users.push(sample_user("bob", "Bob Reyes", false, frequency));
    save_org(&file, &org)?;
    println!("Wrote sample organization to {}", file.display());
    Ok(())
}

fn sample_user(handle: &str, display_name: &str, salaried: bool, frequency: f64) -> User {
    User {
        handle: handle.to_string(),
        display_name: display_name.to_string(),
        salaried,
        tz_offset_minutes: 0,
        active_hours: (
            NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
            NaiveTime::from_hms_opt(17, 0, 0).unwrap_or_default(),
        ),
        punches: vec![Punch::worked(PunchKind::In, chrono::Utc::now())],
        settings: Settings::with_frequency(frequency),
    }
}

fn status(file: PathBuf, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let org = load_org(&file)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&org)?);
        return Ok(());
    }
    println!("Organization: {}", org.name);
    println!("Ready: {}", org.ready);
    println!("Default frequency: {} hours", org.hound_frequency);
    println!(
        "Hounding: {}",
        if org.should_hound { "on" } else { "off" }
    );
    if !org.exempt_channels.is_empty() {
        let channels: Vec<&str> = org.exempt_channels.iter().map(String::as_str).collect();
        println!("Exempt channels: {}", channels.join(", "));
    }
    println!("Users:");
    for user in &org.users {
        let state = if user.settings.hounding_enabled() {
            format!("every {} hours", user.settings.hound_frequency)
        } else {
            "off".to_string()
        };
        println!(
            "  @{} ({}) - {}, hounding {}",
            user.handle,
            user.display_name,
            if user.salaried { "salaried" } else { "hourly" },
            state
        );
    }
    let upcoming = org.upcoming_events();
    if !upcoming.is_empty() {
        println!("Upcoming events:");
        for event in upcoming {
            println!("  {} - {}", event.date, event.name);
        }
    }
    Ok(())
}

fn ready(file: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let mut org = load_org(&file)?;
    org.ready = true;
    save_org(&file, &org)?;
    println!("Organization {} is ready", org.name);
    Ok(())
}

fn add_event(file: PathBuf, date: String, name: String) -> Result<(), Box<dyn std::error::Error>> {
    let mut org = load_org(&file)?;
    let event = org.add_event(&date, &name)?;
    println!("Added event '{}' on {}", event.name, event.date);
    save_org(&file, &org)?;
    Ok(())
}
