//! Prefix aggregation.
//!
//! Collapses a list of prefixes into the smallest list covering exactly the
//! same addresses: contained prefixes are dropped and sibling prefixes are
//! merged into their parent, cascading upwards.

use crate::bits::{get_bit, set_bit};
use crate::error::PrefixError;
use crate::models::{cmp_prefix, AddressFamily, Prefix};

fn check_family(a: &Prefix, b: &Prefix) -> Result<(), PrefixError> {
    if a.family() != b.family() {
        return Err(PrefixError::FamilyMismatch {
            left: a.family(),
            right: b.family(),
        });
    }
    Ok(())
}

/// Split prefixes by family, keeping input order. Returns `(ipv4, ipv6)`.
pub fn group_by_family(prefixes: Vec<Prefix>) -> (Vec<Prefix>, Vec<Prefix>) {
    prefixes
        .into_iter()
        .partition(|p| p.family() == AddressFamily::V4)
}

/// Check whether `p` fully covers `o`.
///
/// True when `p` is no longer than `o` and both agree on the first `p.len()` bits.
///
/// # Examples
/// ```
/// use cidr_aggregate::models::Prefix;
/// use cidr_aggregate::processing::contains;
/// let p = Prefix::new("192.168.0.0/22").unwrap();
/// let o = Prefix::new("192.168.2.0/23").unwrap();
/// assert!(contains(&p, &o).unwrap());
/// assert!(!contains(&o, &p).unwrap());
/// ```
pub fn contains(p: &Prefix, o: &Prefix) -> Result<bool, PrefixError> {
    check_family(p, o)?;
    if p.len() > o.len() {
        return Ok(false);
    }
    let p_bytes = p.octets();
    let o_bytes = o.octets();
    for i in 0..usize::from(p.len()) {
        if get_bit(&p_bytes, i)? != get_bit(&o_bytes, i)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Merge two sibling prefixes into their parent.
///
/// Returns `None` unless both have the same non-zero length and differ only
/// in the last bit of that length. Overlapping prefixes are not merged here.
pub fn merge_adjacent(a: &Prefix, b: &Prefix) -> Result<Option<Prefix>, PrefixError> {
    check_family(a, b)?;
    if a.len() != b.len() || a.is_empty() {
        return Ok(None);
    }

    let bit = usize::from(a.len()) - 1;
    let mut a_bytes = a.octets();
    let mut b_bytes = b.octets();
    match (get_bit(&a_bytes, bit)?, get_bit(&b_bytes, bit)?) {
        (0, 1) => set_bit(&mut a_bytes, bit, 1)?,
        (1, 0) => set_bit(&mut b_bytes, bit, 1)?,
        _ => return Ok(None),
    }
    if a_bytes != b_bytes {
        return Ok(None);
    }

    // a_bytes now has the sibling bit set; clear it and everything after
    for i in bit..usize::from(a.family().bit_len()) {
        set_bit(&mut a_bytes, i, 0)?;
    }
    Ok(Some(a.with_octets(&a_bytes, a.len() - 1)))
}

/// Aggregate prefixes that all belong to one address family.
///
/// The result is sorted by [`cmp_prefix`]. Mixed families fail with
/// [`PrefixError::FamilyMismatch`]; use [`aggregate`] for mixed input.
pub fn aggregate_single_family(mut prefixes: Vec<Prefix>) -> Result<Vec<Prefix>, PrefixError> {
    if prefixes.len() <= 1 {
        return Ok(prefixes);
    }

    let input_count = prefixes.len();
    prefixes.sort_by(cmp_prefix);

    let mut rv: Vec<Prefix> = Vec::with_capacity(input_count);
    for p in prefixes {
        if let Some(last) = rv.last() {
            if contains(last, &p)? {
                log::trace!("drop {p}, covered by {last}");
                continue;
            }
        }
        rv.push(p);

        // Only the tail can become mergeable after a push
        while rv.len() >= 2 {
            let n = rv.len();
            let Some(parent) = merge_adjacent(&rv[n - 2], &rv[n - 1])? else {
                break;
            };
            log::trace!("merge {} + {} -> {parent}", rv[n - 2], rv[n - 1]);
            rv.truncate(n - 2);
            rv.push(parent);
        }
    }

    log::debug!("aggregated {} prefixes into {}", input_count, rv.len());
    Ok(rv)
}

/// Aggregate a mixed list of prefixes.
///
/// IPv4 results come first, then IPv6, each sorted.
///
/// # Examples
/// ```
/// use cidr_aggregate::models::Prefix;
/// use cidr_aggregate::processing::aggregate;
/// let input: Vec<Prefix> = ["192.168.0.0/32", "192.168.0.1/32"]
///     .iter()
///     .map(|s| Prefix::new(s).unwrap())
///     .collect();
/// let out = aggregate(input).unwrap();
/// assert_eq!(out, vec![Prefix::new("192.168.0.0/31").unwrap()]);
/// ```
pub fn aggregate(prefixes: Vec<Prefix>) -> Result<Vec<Prefix>, PrefixError> {
    let (v4, v6) = group_by_family(prefixes);
    log::debug!("aggregate: {} IPv4, {} IPv6 prefixes", v4.len(), v6.len());
    let mut rv = aggregate_single_family(v4)?;
    rv.extend(aggregate_single_family(v6)?);
    Ok(rv)
}
