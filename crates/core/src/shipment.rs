//! Shipment model - one row of the watchlist.

use serde::{Deserialize, Serialize};

/// Alias used when the caller does not name a package.
pub const DEFAULT_ALIAS: &str = "Unnamed package";

/// A shipment being watched until it is delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    /// Tracking number (AWB), uppercase. Identity key.
    pub tracking_number: String,

    /// Courier code, lowercase
    pub courier: String,

    /// Display label
    pub alias: String,
}

impl Shipment {
    /// Create a shipment, normalizing the key fields.
    ///
    /// A blank alias falls back to [`DEFAULT_ALIAS`].
    pub fn new(
        courier: impl AsRef<str>,
        tracking_number: impl AsRef<str>,
        alias: impl Into<String>,
    ) -> Self {
        let alias = alias.into();
        let alias = if alias.trim().is_empty() {
            DEFAULT_ALIAS.to_string()
        } else {
            alias.trim().to_string()
        };

        Self {
            tracking_number: tracking_number.as_ref().trim().to_uppercase(),
            courier: courier.as_ref().trim().to_lowercase(),
            alias,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_keys() {
        let s = Shipment::new(" SPX ", "spx999 ", "My Shoes");
        assert_eq!(s.courier, "spx");
        assert_eq!(s.tracking_number, "SPX999");
        assert_eq!(s.alias, "My Shoes");
    }

    #[test]
    fn test_blank_alias_defaults() {
        let s = Shipment::new("jne", "0123456789", "  ");
        assert_eq!(s.alias, DEFAULT_ALIAS);
    }
}
