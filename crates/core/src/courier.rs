//! Courier codes and tracking-number classification.

use serde::{Deserialize, Serialize};

/// Carrier identifier understood by the tracking provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourierCode {
    /// Shopee Express
    Spx,
    /// J&T Express
    Jnt,
    /// J&T Cargo
    JntCargo,
    /// SiCepat
    Sicepat,
    /// JNE
    Jne,
}

impl CourierCode {
    /// Provider-side code string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CourierCode::Spx => "spx",
            CourierCode::Jnt => "jnt",
            CourierCode::JntCargo => "jnt_cargo",
            CourierCode::Sicepat => "sicepat",
            CourierCode::Jne => "jne",
        }
    }
}

impl std::fmt::Display for CourierCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Infer the courier from the shape of a tracking number.
///
/// Rules are evaluated in order and the first match wins. An all-digit number
/// of length 12 matches the SiCepat rule before the JNE rule is reached, so
/// JNE is only ever returned for 10-digit numbers. Keep this order: changing
/// it would reclassify existing 12-digit numbers.
pub fn detect(tracking_number: &str) -> Option<CourierCode> {
    let awb = tracking_number.trim().to_uppercase();
    let all_digits = !awb.is_empty() && awb.bytes().all(|b| b.is_ascii_digit());

    if awb.starts_with("SPX") {
        Some(CourierCode::Spx)
    } else if awb.starts_with("JD") || awb.starts_with("JP") {
        Some(CourierCode::Jnt)
    } else if awb.starts_with("JZ") {
        Some(CourierCode::JntCargo)
    } else if all_digits && awb.len() >= 12 {
        Some(CourierCode::Sicepat)
    } else if all_digits && (awb.len() == 10 || awb.len() == 12) {
        Some(CourierCode::Jne)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spx_prefix_any_case() {
        for awb in ["SPX999999", "spx123", "SpX", "  spxID0001  "] {
            assert_eq!(detect(awb), Some(CourierCode::Spx), "{awb}");
        }
    }

    #[test]
    fn test_jnt_prefixes() {
        assert_eq!(detect("JD0123456789"), Some(CourierCode::Jnt));
        assert_eq!(detect("jp9988"), Some(CourierCode::Jnt));
        assert_eq!(detect("JZ12345"), Some(CourierCode::JntCargo));
    }

    #[test]
    fn test_long_digits_are_sicepat() {
        for len in [12, 13, 15, 20] {
            let awb = "7".repeat(len);
            assert_eq!(detect(&awb), Some(CourierCode::Sicepat), "len {len}");
        }
    }

    #[test]
    fn test_ten_digits_are_jne() {
        assert_eq!(detect("0123456789"), Some(CourierCode::Jne));
    }

    #[test]
    fn test_no_match() {
        for awb in ["", "   ", "123", "12345678901", "ABC123", "12345X789012", "J"] {
            assert_eq!(detect(awb), None, "{awb:?}");
        }
    }

    #[test]
    fn test_display_uses_provider_codes() {
        assert_eq!(CourierCode::JntCargo.to_string(), "jnt_cargo");
        assert_eq!(detect("JZ1").map(|c| c.to_string()), Some("jnt_cargo".to_string()));
    }
}
