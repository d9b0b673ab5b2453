//! Client-identity and proxy-chain extraction from the RFC 7239
//! `Forwarded` header and the legacy `X-Forwarded-For` header.
//!
//! `hopchain-core` holds the parser and the [`Chain`]/[`Hop`] data model;
//! `hopchain-axum` injects the parsed chain into requests as a
//! [`ForwardedContext`] extension. This crate re-exports both.

pub use hopchain_axum::middleware::forwarded_context_middleware;
pub use hopchain_core::chain::{Chain, Hop};
pub use hopchain_core::context::ForwardedContext;
pub use hopchain_core::headers::{X_FORWARDED_FOR, parse_headers};
pub use hopchain_core::parse::parse_forwarded;
