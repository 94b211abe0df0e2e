use serde::{Deserialize, Serialize};

/// List envelope the upstream API wraps every collection response in.
///
/// Both the events and guests endpoints return `{"entries": [...]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entries<T> {
    #[serde(default = "Vec::new")]
    pub entries: Vec<T>,
}

/// An event as returned by the upstream events endpoint.
///
/// Fetched fresh every run and never persisted. Timestamps are kept as the
/// raw upstream strings; nothing in this system needs them as instants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub api_id: String,
    pub name: String,
    #[serde(default)]
    pub is_live: bool,
    #[serde(default)]
    pub start_at: Option<String>,
    #[serde(default)]
    pub end_at: Option<String>,
}

/// A guest registered to an event, with its current check-in state embedded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guest {
    #[serde(default)]
    pub api_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub ticket_type: Option<String>,
    #[serde(default)]
    pub checkin_info: Option<CheckinInfo>,
    #[serde(default)]
    pub registration_answers: Vec<RegistrationAnswer>,
}

impl Guest {
    /// Raw check-in timestamp, if the guest has checked in.
    ///
    /// The upstream sometimes sends an empty `checkin_info` object for
    /// guests that have not checked in, so both levels are optional.
    pub fn checked_in_at(&self) -> Option<&str> {
        self.checkin_info
            .as_ref()
            .and_then(|c| c.checked_in_at.as_deref())
    }
}

/// Check-in record nested inside a guest. Carries no identity of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckinInfo {
    #[serde(default)]
    pub checked_in_at: Option<String>,
}

/// One answer from the event registration form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationAnswer {
    #[serde(default)]
    pub label: String,
    #[serde(default, alias = "value")]
    pub answer: String,
}
