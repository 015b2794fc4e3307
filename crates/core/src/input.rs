//! Parsing of the single free-text line a user sends into tracking fields.
//!
//! Two shapes are accepted:
//!
//! ```text
//! <awb> [alias...]                 auto-detected courier
//! [cek|check] <courier> <awb> [alias...]   explicit courier
//! ```

use crate::shipment::DEFAULT_ALIAS;

/// Errors from parsing manual-entry input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// A required field was not present
    #[error("missing {0}; expected: cek <courier> <awb> [name]")]
    MissingField(&'static str),
}

/// Tracking number plus alias, courier left to detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackInput {
    /// Uppercased first token; empty for blank input
    pub tracking_number: String,

    /// Remainder of the line, or [`DEFAULT_ALIAS`]
    pub alias: String,
}

impl TrackInput {
    /// Split `raw` into the first token and the remainder.
    pub fn parse(raw: &str) -> Self {
        let (head, rest) = split_first(raw.trim());
        Self {
            tracking_number: head.to_uppercase(),
            alias: alias_or_default(rest),
        }
    }
}

/// Courier, tracking number and alias supplied explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualInput {
    /// Lowercased courier code (not validated)
    pub courier: String,

    /// Uppercased tracking number
    pub tracking_number: String,

    /// Remainder of the line, or [`DEFAULT_ALIAS`]
    pub alias: String,
}

impl ManualInput {
    /// Parse `[cek|check] <courier> <awb> [alias...]`.
    pub fn parse(raw: &str) -> Result<Self, InputError> {
        let (first, rest) = split_first(raw.trim());
        let line = if first.eq_ignore_ascii_case("cek") || first.eq_ignore_ascii_case("check") {
            rest
        } else {
            raw.trim()
        };

        let (courier, rest) = split_first(line);
        if courier.is_empty() {
            return Err(InputError::MissingField("courier"));
        }
        let (awb, alias) = split_first(rest);
        if awb.is_empty() {
            return Err(InputError::MissingField("tracking number"));
        }

        Ok(Self {
            courier: courier.to_lowercase(),
            tracking_number: awb.to_uppercase(),
            alias: alias_or_default(alias),
        })
    }
}

fn split_first(s: &str) -> (&str, &str) {
    match s.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (s, ""),
    }
}

fn alias_or_default(s: &str) -> String {
    if s.is_empty() {
        DEFAULT_ALIAS.to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_input_with_alias() {
        let input = TrackInput::parse("spx999999 My Shoes");
        assert_eq!(input.tracking_number, "SPX999999");
        assert_eq!(input.alias, "My Shoes");
    }

    #[test]
    fn test_track_input_without_alias() {
        let input = TrackInput::parse("  JD0001  ");
        assert_eq!(input.tracking_number, "JD0001");
        assert_eq!(input.alias, DEFAULT_ALIAS);
    }

    #[test]
    fn test_track_input_blank() {
        let input = TrackInput::parse("   ");
        assert_eq!(input.tracking_number, "");
        assert_eq!(input.alias, DEFAULT_ALIAS);
    }

    #[test]
    fn test_manual_input_with_keyword() {
        let input = ManualInput::parse("cek SPX spx123 Sepatu Baru").unwrap();
        assert_eq!(input.courier, "spx");
        assert_eq!(input.tracking_number, "SPX123");
        assert_eq!(input.alias, "Sepatu Baru");
    }

    #[test]
    fn test_manual_input_without_keyword() {
        let input = ManualInput::parse("anteraja 10000123").unwrap();
        assert_eq!(input.courier, "anteraja");
        assert_eq!(input.tracking_number, "10000123");
        assert_eq!(input.alias, DEFAULT_ALIAS);
    }

    #[test]
    fn test_manual_input_missing_fields() {
        assert_eq!(ManualInput::parse("cek"), Err(InputError::MissingField("courier")));
        assert_eq!(ManualInput::parse(""), Err(InputError::MissingField("courier")));
        assert_eq!(
            ManualInput::parse("cek jne"),
            Err(InputError::MissingField("tracking number"))
        );
    }
}
