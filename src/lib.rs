//! ripe-routes - Show all route objects of an AS from the RIPE database
//!
//! This library provides the core functionality: ASN validation, prefix
//! parsing, CIDR aggregation, and the query orchestration over a
//! pluggable route source. The registry HTTP access sits behind the
//! [`registry::RouteSource`] trait so everything else is testable
//! without network access.

pub mod aggregate;
pub mod asn;
pub mod prefix;
pub mod query;
pub mod registry;

// Re-export core types for library users
pub use aggregate::{aggregate, aggregate_strings, AggregateError};
pub use asn::{Asn, AsnParseError};
pub use prefix::{parse_prefix, PrefixParseError};
pub use query::{run, QueryError, QueryOptions};
pub use registry::{RegistryError, RipeClient, RouteSource};
