use crate::error::RouterError;

/// Checks the `Authorization` header against the configured shared secret.
///
/// With no secret configured every request passes. Otherwise the header must
/// equal `Bearer <secret>` exactly.
pub fn authorize(expected: Option<&str>, header: Option<&str>) -> Result<(), RouterError> {
    let Some(secret) = expected else {
        return Ok(());
    };

    match header.and_then(|h| h.strip_prefix("Bearer ")) {
        Some(token) if token == secret => Ok(()),
        _ => Err(RouterError::Unauthorized),
    }
}
