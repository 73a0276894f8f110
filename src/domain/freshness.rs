// "Last updated" text derived from the newest chart label
use super::chart::ChartHandle;
use chrono::NaiveDateTime;

pub const LABEL_FORMAT: &str = "%d/%m/%Y %H:%M";
pub const UNKNOWN: &str = "unknown";

/// Parse a `dd/mm/yyyy HH:mm` label. Only the zero-padded form is accepted.
pub fn parse_label(label: &str) -> Option<NaiveDateTime> {
    // chrono accepts unpadded fields, the fixed width pins the format down
    if label.len() != 16 {
        return None;
    }
    NaiveDateTime::parse_from_str(label, LABEL_FORMAT).ok()
}

pub fn format_label(at: &NaiveDateTime) -> String {
    at.format(LABEL_FORMAT).to_string()
}

/// Render the freshness of a label, or `"unknown"` if it is not a valid
/// `dd/mm/yyyy HH:mm` timestamp.
pub fn describe_label(label: &str) -> String {
    match parse_label(label) {
        Some(at) => format_label(&at),
        None => {
            tracing::warn!(label, "unparseable chart label, freshness unknown");
            UNKNOWN.to_string()
        }
    }
}

/// Freshness of a rendered chart, taken from its most recent label.
pub fn last_updated(handle: &ChartHandle) -> String {
    match handle.chart().last_label() {
        Some(label) => describe_label(label),
        None => UNKNOWN.to_string(),
    }
}
