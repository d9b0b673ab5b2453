use axum::{extract::Request, middleware::Next, response::Response};
use hopchain_core::context::ForwardedContext;
use hopchain_core::headers::parse_headers;

/// Middleware that parses the forwarding headers once per request and
/// injects the result as a `ForwardedContext` axum Extension.
pub async fn forwarded_context_middleware(mut request: Request, next: Next) -> Response {
    let ctx = ForwardedContext::new(parse_headers(request.headers()));
    if let Some(client) = ctx.client() {
        tracing::debug!(client = %client, "resolved forwarded client");
    }
    request.extensions_mut().insert(ctx);
    next.run(request).await
}
