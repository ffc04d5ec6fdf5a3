//! The static list of launchd services this server monitors.

/// One monitored service: the launchd label plus a human-readable name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescriptor {
    pub label: String,
    pub display_name: String,
}

impl ServiceDescriptor {
    pub fn new(label: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            display_name: display_name.into(),
        }
    }
}

/// The monitored services, in the order they appear in `/status` responses.
/// Fixed for the process lifetime.
pub fn default_registry() -> Vec<ServiceDescriptor> {
    vec![
        ServiceDescriptor::new("dev.fjorn.bbctl-imessage", "iMessage Bridge"),
        ServiceDescriptor::new("dev.fjorn.ollama", "Ollama"),
    ]
}
