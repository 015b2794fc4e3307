//! Reports returned by the engine.
//!
//! Both reports render to plain text through `Display` and serialize to JSON;
//! richer presentation belongs to whatever front end consumes them.

use chrono::{DateTime, Utc};
use parcelwatch_core::{HistoryEntry, Shipment, TrackingResult};
use serde::Serialize;
use std::fmt;

const NO_HISTORY: &str = "no tracking history yet";

/// Result of tracking a single shipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackReport {
    /// Display label
    pub alias: String,

    /// Tracking number, uppercase
    pub tracking_number: String,

    /// Courier as reported by the provider, else the requested code
    pub courier: String,

    /// Normalized status
    pub status: String,

    /// Most recent history entries, newest first
    pub history: Vec<HistoryEntry>,

    /// Whether the shipment stays on the watchlist
    pub watching: bool,
}

impl TrackReport {
    /// Build a report keeping at most `history_limit` history entries.
    pub fn from_result(shipment: &Shipment, result: &TrackingResult, history_limit: usize) -> Self {
        let courier = if result.summary.courier.trim().is_empty() {
            shipment.courier.clone()
        } else {
            result.summary.courier.trim().to_string()
        };

        Self {
            alias: shipment.alias.clone(),
            tracking_number: shipment.tracking_number.clone(),
            courier,
            status: result.summary.normalized_status(),
            history: result.history.iter().take(history_limit).cloned().collect(),
            watching: !result.is_delivered(),
        }
    }
}

impl fmt::Display for TrackReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SHIPMENT FOUND")?;
        writeln!(f, "Package : {}", self.alias)?;
        writeln!(f, "Courier : {}", self.courier.to_uppercase())?;
        writeln!(f, "AWB     : {}", self.tracking_number)?;
        writeln!(f, "Status  : {}", self.status)?;
        writeln!(f)?;
        writeln!(f, "Latest history:")?;
        if self.history.is_empty() {
            writeln!(f, "  ({})", NO_HISTORY)?;
        }
        for entry in &self.history {
            writeln!(f, "  - {}", entry.date)?;
            writeln!(f, "    {}", entry.description)?;
        }
        Ok(())
    }
}

/// Outcome for one watched shipment during a refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RefreshEntry {
    /// Still in flight; stays on the watchlist
    Active {
        /// Display label
        alias: String,
        /// Tracking number
        tracking_number: String,
        /// Courier code
        courier: String,
        /// Normalized status
        status: String,
        /// Latest history description, if any
        last_position: Option<String>,
    },

    /// Delivered; removed from the watchlist
    Retired {
        /// Display label
        alias: String,
        /// Tracking number
        tracking_number: String,
    },

    /// Query failed; stays on the watchlist unchanged
    Failed {
        /// Display label
        alias: String,
        /// Tracking number
        tracking_number: String,
        /// Failure description
        reason: String,
    },
}

impl fmt::Display for RefreshEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefreshEntry::Active { alias, tracking_number, courier, status, last_position } => {
                writeln!(f, "{}", alias)?;
                writeln!(f, "  {} - {}", courier.to_uppercase(), tracking_number)?;
                writeln!(f, "  {}", status)?;
                writeln!(f, "  {}", last_position.as_deref().unwrap_or(NO_HISTORY))
            }
            RefreshEntry::Retired { alias, tracking_number } => {
                writeln!(f, "{}", alias)?;
                writeln!(f, "  {} (delivered, removed from watchlist)", tracking_number)
            }
            RefreshEntry::Failed { alias, tracking_number, reason } => {
                writeln!(f, "{}", alias)?;
                writeln!(f, "  {} (failed to update: {})", tracking_number, reason)
            }
        }
    }
}

/// Per-outcome tallies of a refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RefreshCounts {
    /// Still in flight
    pub active: usize,
    /// Delivered and removed
    pub retired: usize,
    /// Query failed
    pub failed: usize,
}

/// Result of refreshing the whole watchlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshReport {
    /// When the refresh ran
    pub generated_at: DateTime<Utc>,

    /// One entry per watched shipment, in watchlist order
    pub entries: Vec<RefreshEntry>,
}

impl RefreshReport {
    /// An empty report stamped now.
    pub fn new() -> Self {
        Self {
            generated_at: Utc::now(),
            entries: Vec::new(),
        }
    }

    /// True when the watchlist had nothing to refresh.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tally entries by outcome.
    pub fn counts(&self) -> RefreshCounts {
        self.entries
            .iter()
            .fold(RefreshCounts::default(), |mut counts, entry| {
                match entry {
                    RefreshEntry::Active { .. } => counts.active += 1,
                    RefreshEntry::Retired { .. } => counts.retired += 1,
                    RefreshEntry::Failed { .. } => counts.failed += 1,
                }
                counts
            })
    }
}

impl Default for RefreshReport {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RefreshReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No shipments are being watched.");
        }

        writeln!(f, "ACTIVE PACKAGES")?;
        for entry in &self.entries {
            writeln!(f)?;
            write!(f, "{}", entry)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parcelwatch_core::Summary;

    fn result(courier: &str, status: &str, history: usize) -> TrackingResult {
        TrackingResult {
            status_code: 200,
            message: String::new(),
            summary: Summary {
                courier: courier.to_string(),
                status: status.to_string(),
            },
            history: (0..history)
                .map(|i| HistoryEntry {
                    date: format!("2024-01-0{}", history - i),
                    description: format!("step {}", history - i),
                })
                .collect(),
        }
    }

    #[test]
    fn test_track_report_caps_history() {
        let shipment = Shipment::new("spx", "SPX1", "Shoes");
        let report = TrackReport::from_result(&shipment, &result("SPX", "in_transit", 4), 2);

        assert_eq!(report.status, "IN_TRANSIT");
        assert_eq!(report.history.len(), 2);
        assert_eq!(report.history[0].description, "step 4");
        assert!(report.watching);
    }

    #[test]
    fn test_track_report_courier_fallback() {
        let shipment = Shipment::new("jne", "0123456789", "Books");
        let report = TrackReport::from_result(&shipment, &result("", "DELIVERED", 0), 2);

        assert_eq!(report.courier, "jne");
        assert!(!report.watching);
        let text = report.to_string();
        assert!(text.contains("Courier : JNE"));
        assert!(text.contains(NO_HISTORY));
    }

    #[test]
    fn test_refresh_report_rendering() {
        let mut report = RefreshReport::new();
        assert!(report.to_string().contains("No shipments"));

        report.entries = vec![
            RefreshEntry::Active {
                alias: "Shoes".into(),
                tracking_number: "SPX1".into(),
                courier: "spx".into(),
                status: "IN_TRANSIT".into(),
                last_position: None,
            },
            RefreshEntry::Retired { alias: "Books".into(), tracking_number: "0123456789".into() },
            RefreshEntry::Failed {
                alias: "Lamp".into(),
                tracking_number: "JD1".into(),
                reason: "network error: timed out".into(),
            },
        ];

        let text = report.to_string();
        assert!(text.starts_with("ACTIVE PACKAGES"));
        assert!(text.contains("SPX - SPX1"));
        assert!(text.contains(NO_HISTORY));
        assert!(text.contains("0123456789 (delivered, removed from watchlist)"));
        assert!(text.contains("JD1 (failed to update: network error: timed out)"));
        assert_eq!(report.counts(), RefreshCounts { active: 1, retired: 1, failed: 1 });
    }

    #[test]
    fn test_refresh_entry_serializes_outcome_tag() {
        let entry = RefreshEntry::Retired { alias: "Books".into(), tracking_number: "0123456789".into() };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["outcome"], "retired");
        assert_eq!(json["tracking_number"], "0123456789");
    }
}
