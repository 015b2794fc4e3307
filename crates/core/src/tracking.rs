//! Normalized result of one tracking query.

use serde::{Deserialize, Serialize};

/// Normalized status marking a shipment as delivered.
pub const DELIVERED: &str = "DELIVERED";

/// A successful provider response, with every missing leaf defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingResult {
    /// Provider-level status code (200 on success)
    pub status_code: u16,

    /// Provider message, empty when absent
    pub message: String,

    /// Shipment summary
    pub summary: Summary,

    /// History entries, newest first
    pub history: Vec<HistoryEntry>,
}

impl TrackingResult {
    /// Most recent history entry, if the provider sent any.
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.history.first()
    }

    /// Whether the summary status is delivered.
    pub fn is_delivered(&self) -> bool {
        self.summary.is_delivered()
    }
}

/// Courier and status as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Courier name as reported, may be empty
    pub courier: String,

    /// Free-text status, `-` when absent
    pub status: String,
}

impl Default for Summary {
    fn default() -> Self {
        Self {
            courier: String::new(),
            status: "-".to_string(),
        }
    }
}

impl Summary {
    /// Status trimmed and uppercased for comparison.
    pub fn normalized_status(&self) -> String {
        self.status.trim().to_uppercase()
    }

    /// True iff the normalized status equals [`DELIVERED`].
    pub fn is_delivered(&self) -> bool {
        self.normalized_status() == DELIVERED
    }
}

/// One dated step of a shipment's journey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Provider date string, `-` when absent
    pub date: String,

    /// Event description, `-` when absent
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with_status(status: &str) -> TrackingResult {
        TrackingResult {
            status_code: 200,
            message: String::new(),
            summary: Summary {
                courier: "SPX".to_string(),
                status: status.to_string(),
            },
            history: vec![],
        }
    }

    #[test]
    fn test_delivered_is_case_insensitive() {
        assert!(result_with_status("delivered").is_delivered());
        assert!(result_with_status(" Delivered ").is_delivered());
        assert!(!result_with_status("ON PROCESS").is_delivered());
        assert!(!result_with_status("-").is_delivered());
    }

    #[test]
    fn test_latest_is_first_entry() {
        let mut result = result_with_status("IN_TRANSIT");
        assert!(result.latest().is_none());

        result.history = vec![
            HistoryEntry { date: "2024-01-02".into(), description: "Out for delivery".into() },
            HistoryEntry { date: "2024-01-01".into(), description: "Picked up".into() },
        ];
        assert_eq!(result.latest().map(|h| h.description.as_str()), Some("Out for delivery"));
    }
}
