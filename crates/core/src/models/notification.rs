use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How urgent a notification is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
    Alert,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "Info"),
            Severity::Warning => write!(f, "Warning"),
            Severity::Alert => write!(f, "Alert"),
        }
    }
}

/// An entry in the notification history. The log is kept newest-first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationEntry {
    pub date: NaiveDate,

    /// Written as `type` in snapshot documents.
    #[serde(rename = "type")]
    pub severity: Severity,

    pub message: String,
}

impl NotificationEntry {
    pub fn new(date: NaiveDate, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            date,
            severity,
            message: message.into(),
        }
    }
}
