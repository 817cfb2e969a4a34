//! CIDR aggregation: merge a set of prefixes into the minimal
//! non-overlapping set covering the same address space.

use crate::prefix::{parse_prefix, PrefixParseError};
use ipnet::IpNet;

/// Error type for aggregation over raw prefix strings
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AggregateError {
    /// An input entry could not be parsed as a prefix
    #[error("cannot aggregate {input:?}: {source}")]
    BadEntry {
        /// The offending input string
        input: String,
        /// The underlying parse failure
        #[source]
        source: PrefixParseError,
    },
}

/// Aggregate a collection of prefixes into the minimal equivalent set.
///
/// IPv4 and IPv6 prefixes occupy disjoint numeric spaces and are
/// aggregated independently; the result lists v4 prefixes first, then
/// v6, each family sorted by base address. Input order, duplicates and
/// non-canonical host bits do not affect the result. Empty input yields
/// empty output.
pub fn aggregate(routes: &[IpNet]) -> Vec<IpNet> {
    let mut v4: Vec<IpNet> = Vec::new();
    let mut v6: Vec<IpNet> = Vec::new();
    for net in routes {
        let net = net.trunc();
        match net {
            IpNet::V4(_) => v4.push(net),
            IpNet::V6(_) => v6.push(net),
        }
    }

    let mut merged = merge_family(v4);
    merged.extend(merge_family(v6));
    merged
}

/// Aggregate raw prefix strings, rendering the result back to canonical
/// CIDR text. Fails on the first unparseable entry; no partial result.
pub fn aggregate_strings(routes: &[String]) -> Result<Vec<String>, AggregateError> {
    let mut nets = Vec::with_capacity(routes.len());
    for raw in routes {
        let net = parse_prefix(raw).map_err(|source| AggregateError::BadEntry {
            input: raw.clone(),
            source,
        })?;
        nets.push(net);
    }

    Ok(aggregate(&nets).iter().map(IpNet::to_string).collect())
}

/// Merge normalized prefixes of a single address family.
fn merge_family(mut nets: Vec<IpNet>) -> Vec<IpNet> {
    // Shorter (covering) prefixes must come before the prefixes they
    // contain, hence the (address, length) sort key.
    nets.sort_by_key(|n| (n.network(), n.prefix_len()));

    let mut out: Vec<IpNet> = Vec::with_capacity(nets.len());
    for net in nets {
        if let Some(last) = out.last() {
            // Covered (or equal): redundant.
            if last.contains(&net) {
                continue;
            }
        }
        out.push(net);

        // Merging two siblings can make the parent itself mergeable with
        // its own sibling, so keep folding the tail until it settles.
        while out.len() >= 2 {
            let a = out[out.len() - 2];
            let b = out[out.len() - 1];
            match merge_siblings(&a, &b) {
                Some(parent) => {
                    out.truncate(out.len() - 2);
                    out.push(parent);
                }
                None => break,
            }
        }
    }
    out
}

/// If `a` and `b` are the two halves of the same parent prefix, return
/// that parent. `a` must sort before `b` and both must be normalized.
fn merge_siblings(a: &IpNet, b: &IpNet) -> Option<IpNet> {
    if a.prefix_len() != b.prefix_len() {
        return None;
    }
    match (a.supernet(), b.supernet()) {
        (Some(pa), Some(pb)) if pa == pb => Some(pa),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nets(input: &[&str]) -> Vec<IpNet> {
        input.iter().map(|s| parse_prefix(s).unwrap()).collect()
    }

    fn strings(input: &[&str]) -> Vec<String> {
        input.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn test_single_prefix_normalized() {
        let out = aggregate(&nets(&["10.0.0.1/24"]));
        assert_eq!(out, nets(&["10.0.0.0/24"]));
    }

    #[test]
    fn test_duplicates_collapse() {
        let out = aggregate(&nets(&["192.0.2.0/24", "192.0.2.0/24"]));
        assert_eq!(out, nets(&["192.0.2.0/24"]));
    }

    #[test]
    fn test_subset_discarded() {
        let out = aggregate(&nets(&["10.0.0.0/8", "10.1.0.0/16", "10.2.3.0/24"]));
        assert_eq!(out, nets(&["10.0.0.0/8"]));
    }

    #[test]
    fn test_adjacent_siblings_merge() {
        let out = aggregate(&nets(&["5.45.192.0/19", "5.45.224.0/19"]));
        assert_eq!(out, nets(&["5.45.192.0/18"]));
    }

    #[test]
    fn test_adjacent_but_not_siblings_do_not_merge() {
        // 10.0.1.0/24 and 10.0.2.0/24 are adjacent but have different
        // parents, so no /23 covers exactly their union.
        let out = aggregate(&nets(&["10.0.1.0/24", "10.0.2.0/24"]));
        assert_eq!(out, nets(&["10.0.1.0/24", "10.0.2.0/24"]));
    }

    #[test]
    fn test_cascading_merge() {
        let out = aggregate(&nets(&[
            "192.168.0.0/24",
            "192.168.1.0/24",
            "192.168.2.0/24",
            "192.168.3.0/24",
        ]));
        assert_eq!(out, nets(&["192.168.0.0/22"]));
    }

    #[test]
    fn test_cascade_across_lengths() {
        // The two /25s fold into 10.0.0.0/24, which must then merge
        // with 10.0.1.0/24 into a /23.
        let out = aggregate(&nets(&["10.0.0.0/25", "10.0.0.128/25", "10.0.1.0/24"]));
        assert_eq!(out, nets(&["10.0.0.0/23"]));
    }

    #[test]
    fn test_input_order_irrelevant() {
        let forward = aggregate(&nets(&["192.168.0.0/24", "192.168.1.0/24"]));
        let reverse = aggregate(&nets(&["192.168.1.0/24", "192.168.0.0/24"]));
        assert_eq!(forward, reverse);
        assert_eq!(forward, nets(&["192.168.0.0/23"]));
    }

    #[test]
    fn test_idempotent() {
        let input = nets(&[
            "10.0.0.0/25",
            "10.0.0.128/25",
            "10.0.1.0/24",
            "172.16.0.0/16",
        ]);
        let once = aggregate(&input);
        let twice = aggregate(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_families_never_merge() {
        let out = aggregate(&nets(&["2a02:6b8::/29", "5.45.192.0/19"]));
        // v4 first, then v6.
        assert_eq!(out, nets(&["5.45.192.0/19", "2a02:6b8::/29"]));
    }

    #[test]
    fn test_ipv6_siblings_merge() {
        let out = aggregate(&nets(&["2001:db8::/33", "2001:db8:8000::/33"]));
        assert_eq!(out, nets(&["2001:db8::/32"]));
    }

    #[test]
    fn test_union_preserved() {
        let input = nets(&["10.0.0.0/25", "10.0.0.128/25", "10.0.2.0/24"]);
        let out = aggregate(&input);
        assert_eq!(out, nets(&["10.0.0.0/24", "10.0.2.0/24"]));
        // Every input address stays covered and nothing new appears.
        for net in &input {
            assert!(out.iter().any(|o| o.contains(net)));
        }
        for o in &out {
            assert!(input.iter().any(|n| o.contains(n) || n.contains(o)));
        }
    }

    #[test]
    fn test_host_routes_merge() {
        let out = aggregate(&nets(&["192.0.2.0", "192.0.2.1"]));
        assert_eq!(out, nets(&["192.0.2.0/31"]));
    }

    #[test]
    fn test_aggregate_strings_renders_canonical() {
        let out = aggregate_strings(&strings(&["5.45.224.0/19", "5.45.192.0/19"])).unwrap();
        assert_eq!(out, vec!["5.45.192.0/18"]);
    }

    #[test]
    fn test_aggregate_strings_reports_offending_entry() {
        let err = aggregate_strings(&strings(&["10.0.0.0/24", "bogus"])).unwrap_err();
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn test_aggregate_strings_empty() {
        let out = aggregate_strings(&[]).unwrap();
        assert!(out.is_empty());
    }
}
