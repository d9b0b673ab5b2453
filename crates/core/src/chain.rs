//! Hop and chain types shared by the parser and its consumers.

use std::fmt;

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// One proxy's reported parameters within a forwarding chain.
///
/// Keys keep the casing they had on the wire and stay in discovery order.
/// Typical keys are `for`, `by`, `host`, and `proto`, but any pair the
/// header carried is kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hop {
    params: Vec<(String, String)>,
}

impl Hop {
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Inserts a parameter. A repeated key keeps its original position but
    /// takes the new value.
    pub fn insert(&mut self, key: &str, value: &str) {
        if let Some(slot) = self.params.iter_mut().find(|(k, _)| k == key) {
            slot.1 = value.to_string();
        } else {
            self.params.push((key.to_string(), value.to_string()));
        }
    }

    /// Looks up a parameter by exact key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Looks up a parameter ignoring ASCII case, e.g. `for` vs `For`.
    /// Hops are small, so this is a plain linear scan.
    pub fn get_ignore_case(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Parameters in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for Hop {
    /// Renders `key=value` pairs joined by `;`. Values that are not plain
    /// tokens are double-quoted, with `"` and `\` backslash-escaped.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            if is_token(value) {
                write!(f, "{key}={value}")?;
            } else {
                write!(f, "{key}=\"")?;
                for c in value.chars() {
                    if matches!(c, '"' | '\\') {
                        write!(f, "\\")?;
                    }
                    write!(f, "{c}")?;
                }
                write!(f, "\"")?;
            }
        }
        Ok(())
    }
}

impl Serialize for Hop {
    /// A hop serializes as a map, keys in discovery order.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.params.len()))?;
        for (key, value) in &self.params {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// RFC 7230 `tchar`: characters allowed in an unquoted token.
fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "!#$%&'*+-.^_`|~".contains(c)
}

fn is_token(value: &str) -> bool {
    !value.is_empty() && value.chars().all(is_token_char)
}

/// The ordered chain of hops parsed from a request's forwarding headers.
///
/// The first hop is the client nearest the origin (leftmost in the header).
/// A chain may be empty; an empty chain is also what absent headers yield.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chain {
    hops: Vec<Hop>,
}

impl Chain {
    pub fn new() -> Self {
        Self { hops: Vec::new() }
    }

    pub fn push(&mut self, hop: Hop) {
        self.hops.push(hop);
    }

    pub fn hops(&self) -> &[Hop] {
        &self.hops
    }

    pub fn len(&self) -> usize {
        self.hops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Hop> {
        self.hops.iter()
    }

    /// The `for` value of the first hop, however the key was cased.
    /// This is the originating client when the nearest proxy reported one.
    pub fn first_for(&self) -> Option<&str> {
        self.hops.first().and_then(|hop| hop.get_ignore_case("for"))
    }
}

impl From<Vec<Hop>> for Chain {
    fn from(hops: Vec<Hop>) -> Self {
        Self { hops }
    }
}

impl<'a> IntoIterator for &'a Chain {
    type Item = &'a Hop;
    type IntoIter = std::slice::Iter<'a, Hop>;

    fn into_iter(self) -> Self::IntoIter {
        self.hops.iter()
    }
}

impl fmt::Display for Chain {
    /// Renders hops joined by `, `, ready to be re-emitted as a
    /// `Forwarded` header value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, hop) in self.hops.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{hop}")?;
        }
        Ok(())
    }
}

impl Serialize for Chain {
    /// A chain serializes as a sequence of hop maps.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.hops.len()))?;
        for hop in &self.hops {
            seq.serialize_element(hop)?;
        }
        seq.end()
    }
}
