//! Picks the forwarding header to trust and builds the chain from it.

use axum::http::HeaderMap;
use axum::http::header::{FORWARDED, HeaderName};

use crate::chain::{Chain, Hop};
use crate::parse::parse_forwarded;

/// The de-facto predecessor of the RFC 7239 `Forwarded` header.
pub const X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");

/// Builds the forwarding chain for a request's headers.
///
/// When any `Forwarded` header is present it wins, however malformed, and
/// every occurrence is parsed and concatenated in order. Otherwise each
/// `X-Forwarded-For` value is split on commas into one single-key `for` hop
/// per piece, whitespace trimmed, empty pieces kept. Absent headers yield
/// an empty chain; there is no error case.
pub fn parse_headers(headers: &HeaderMap) -> Chain {
    let mut chain = Chain::new();

    let mut rfc_header_present = false;
    for value in headers.get_all(FORWARDED) {
        rfc_header_present = true;
        match value.to_str() {
            Ok(value) => {
                for hop in parse_forwarded(value) {
                    chain.push(hop);
                }
            }
            Err(_) => tracing::debug!("skipping undecodable Forwarded header value"),
        }
    }
    if rfc_header_present {
        return chain;
    }

    for value in headers.get_all(X_FORWARDED_FOR) {
        let Ok(value) = value.to_str() else {
            tracing::debug!("skipping undecodable X-Forwarded-For header value");
            continue;
        };
        for piece in value.split(',') {
            let mut hop = Hop::new();
            hop.insert("for", piece.trim());
            chain.push(hop);
        }
    }
    chain
}
