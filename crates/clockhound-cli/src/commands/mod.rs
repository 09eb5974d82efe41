pub mod org;
pub mod reset;
pub mod settings;
pub mod sweep;
