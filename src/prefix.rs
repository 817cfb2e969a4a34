//! Prefix parsing: textual CIDR (or bare address) into [`ipnet::IpNet`]

use ipnet::IpNet;
use std::net::IpAddr;

/// Error type for prefix parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrefixParseError {
    /// Input is neither valid CIDR notation nor a bare IP address
    #[error("invalid prefix {0:?}")]
    Invalid(String),
}

/// Parse a textual prefix into an [`IpNet`].
///
/// Accepts IPv4 and IPv6 CIDR notation (`10.0.0.0/8`, `2a02:6b8::/29`).
/// A bare address is treated as a host route (/32 for v4, /128 for v6).
/// Malformed octets/hextets, out-of-range prefix lengths and trailing
/// garbage are rejected.
pub fn parse_prefix(text: &str) -> Result<IpNet, PrefixParseError> {
    let text = text.trim();

    if let Ok(net) = text.parse::<IpNet>() {
        return Ok(net);
    }

    // Bare address without a prefix length: host route.
    if let Ok(addr) = text.parse::<IpAddr>() {
        return Ok(IpNet::from(addr));
    }

    Err(PrefixParseError::Invalid(text.to_string()))
}
