//! services/api/src/web/middleware.rs
//!
//! Request-identity middleware for the API routes.
//!
//! Session management lives in the fronting auth service; by the time a
//! request reaches this API the caller's identity arrives as an `x-user-id`
//! header. Every store query downstream filters by this id.

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// Middleware that extracts the caller's user id from the `x-user-id` header.
///
/// If present and a valid UUID, inserts the user id into request extensions
/// for handlers to use. If missing or malformed, returns 401 Unauthorized.
pub async fn require_user(mut req: Request, next: Next) -> Result<Response, StatusCode> {
    let user_id = req
        .headers()
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| Uuid::parse_str(v).ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    req.extensions_mut().insert(user_id);

    Ok(next.run(req).await)
}
