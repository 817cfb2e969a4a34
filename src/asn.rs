//! Autonomous System Number validation

use std::fmt;
use std::str::FromStr;

/// Error type for ASN validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AsnParseError {
    /// Input does not match `AS` followed by 1-6 decimal digits
    #[error("invalid ASN {0:?}: must be 2/4-byte AS, e.g. AS13238")]
    InvalidFormat(String),
}

/// A validated Autonomous System Number in its textual form
/// (`AS` followed by 1-6 decimal digits).
///
/// The digit string is kept exactly as entered so the registry query
/// carries what the user typed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Asn(String);

impl Asn {
    /// The validated textual form, e.g. `"AS13238"`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The numeric AS number.
    pub fn number(&self) -> u32 {
        // Validated on construction: at most 6 digits, always fits u32.
        self.0[2..].parse().unwrap_or(0)
    }
}

impl FromStr for Asn {
    type Err = AsnParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("AS")
            .ok_or_else(|| AsnParseError::InvalidFormat(s.to_string()))?;

        if digits.is_empty()
            || digits.len() > 6
            || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(AsnParseError::InvalidFormat(s.to_string()));
        }

        Ok(Asn(s.to_string()))
    }
}

impl fmt::Display for Asn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_asn() {
        let asn: Asn = "AS13238".parse().unwrap();
        assert_eq!(asn.as_str(), "AS13238");
        assert_eq!(asn.number(), 13238);
    }

    #[test]
    fn test_missing_prefix() {
        assert!("13238".parse::<Asn>().is_err());
    }

    #[test]
    fn test_too_many_digits() {
        assert!("AS999999999".parse::<Asn>().is_err());
    }

    #[test]
    fn test_empty_digits() {
        assert!("AS".parse::<Asn>().is_err());
    }

    #[test]
    fn test_lowercase_prefix_rejected() {
        assert!("as13238".parse::<Asn>().is_err());
    }

    #[test]
    fn test_trailing_garbage_rejected() {
        assert!("AS13238x".parse::<Asn>().is_err());
        assert!("AS13 238".parse::<Asn>().is_err());
    }

    #[test]
    fn test_single_digit() {
        let asn: Asn = "AS0".parse().unwrap();
        assert_eq!(asn.number(), 0);
    }

    #[test]
    fn test_leading_zeros_preserved() {
        let asn: Asn = "AS007".parse().unwrap();
        assert_eq!(asn.as_str(), "AS007");
        assert_eq!(asn.number(), 7);
    }

    #[test]
    fn test_display_roundtrip() {
        let asn: Asn = "AS64512".parse().unwrap();
        assert_eq!(asn.to_string(), "AS64512");
    }
}
