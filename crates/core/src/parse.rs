//! Assembles scanned `key=value` pairs into the comma-delimited hop groups
//! of an RFC 7239 `Forwarded` header value.

use crate::chain::Hop;
use crate::scan::read_pair;

/// Reads one comma-delimited group of pairs from the front of `x`.
///
/// Returns the assembled hop (`None` when the group held no pairs, so empty
/// groups are never emitted) and the remainder after the group's closing
/// comma, if one was found.
fn read_hop(x: &str) -> (Option<Hop>, &str) {
    let Some(first) = x.find(|c: char| !c.is_whitespace()) else {
        return (None, "");
    };

    let mut pos = first;
    let mut hop: Option<Hop> = None;
    loop {
        let (pair, used) = read_pair(&x[pos..]);
        if let Some((key, value)) = pair {
            hop.get_or_insert_with(Hop::new).insert(key, value);
        }
        if used == 0 {
            // A scan that cannot advance ends the group.
            return (hop, "");
        }
        pos += used;
        match x.as_bytes().get(pos).copied() {
            None => return (hop, ""),
            Some(b',') => return (hop, &x[pos + 1..]),
            Some(b';') => {
                pos += 1;
                if pos >= x.len() {
                    return (hop, "");
                }
            }
            // Any other stray byte folds into the next key.
            Some(_) => {}
        }
    }
}

/// Parses one `Forwarded` header value into its ordered list of hops.
///
/// A hop is a `;`-joined group of `key=value` pairs; `,` starts the next
/// hop. The first hop is the client nearest the origin. Malformed pieces
/// are dropped silently and never abort the rest of the value.
pub fn parse_forwarded(header_value: &str) -> Vec<Hop> {
    let mut hops = Vec::new();
    let mut rest = header_value;
    while !rest.is_empty() {
        let (hop, rem) = read_hop(rest);
        if let Some(hop) = hop {
            hops.push(hop);
        }
        rest = rem;
    }
    hops
}
