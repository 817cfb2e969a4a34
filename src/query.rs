//! Query orchestration: validate what was asked for, fetch route
//! objects, optionally aggregate, and produce the display lines.

use crate::aggregate::{aggregate_strings, AggregateError};
use crate::asn::Asn;
use crate::registry::{RegistryError, RouteSource};

/// What to fetch and how to render it
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryOptions {
    /// Include `route` (IPv4) objects
    pub want_v4: bool,
    /// Include `route6` (IPv6) objects
    pub want_v6: bool,
    /// Merge the result into minimal covering CIDR blocks
    pub aggregate: bool,
}

/// Error type for a route query
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// Neither address family was requested
    #[error("at least one of [--ipv4|--ipv6] is required")]
    NoFamilySelected,

    /// The registry lookup failed
    #[error(transparent)]
    Lookup(#[from] RegistryError),

    /// A retrieved prefix could not be parsed or aggregated
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
}

/// Run one lookup against `source` and return the lines to print, in
/// final output order.
///
/// With `aggregate` unset the registry's raw strings pass through
/// unchanged, in response order. With it set every string is parsed and
/// the minimal covering set is returned as canonical CIDR text (v4
/// first, then v6). Any failure is terminal; no partial output.
pub async fn run<S: RouteSource + ?Sized>(
    source: &S,
    asn: &Asn,
    options: QueryOptions,
) -> Result<Vec<String>, QueryError> {
    if !options.want_v4 && !options.want_v6 {
        return Err(QueryError::NoFamilySelected);
    }

    let routes = source
        .lookup_routes(asn, options.want_v4, options.want_v6)
        .await?;

    if options.aggregate {
        Ok(aggregate_strings(&routes)?)
    } else {
        Ok(routes)
    }
}
