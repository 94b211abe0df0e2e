//! Shared data model for the check-in notifier workspace.

pub mod models;

pub use models::{CheckinInfo, Entries, Event, Guest, RegistrationAnswer};
