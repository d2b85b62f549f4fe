//! Logging helpers.
//!
//! Response bodies can carry whole record sets and the login response
//! carries the session token; both are trimmed or masked before they
//! reach the logs.

/// Maximum number of bytes of a response body included in debug logs.
const BODY_LOG_LIMIT: usize = 512;

/// Number of leading characters of a token kept visible when masking.
const TOKEN_VISIBLE_CHARS: usize = 4;

/// Largest char boundary at or below `index`.
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncates a response body for debug logging, appending the total size
/// when anything was cut off.
pub fn truncate_body(body: &str) -> String {
    if body.len() <= BODY_LOG_LIMIT {
        body.to_string()
    } else {
        format!(
            "{}... ({} bytes total)",
            &body[..floor_char_boundary(body, BODY_LOG_LIMIT)],
            body.len()
        )
    }
}

/// Masks a secret token, keeping only a short recognizable prefix.
///
/// Tokens shorter than twice the visible prefix are masked entirely.
pub fn mask_token(token: &str) -> String {
    if token.chars().count() < TOKEN_VISIBLE_CHARS * 2 {
        "***".to_string()
    } else {
        let prefix: String = token.chars().take(TOKEN_VISIBLE_CHARS).collect();
        format!("{prefix}***")
    }
}
