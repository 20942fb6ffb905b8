//! CSRF token issue, verification, and rotation.

use anyhow::Result;
use rand::RngCore;
use sha2::{Digest, Sha256};
use tower_sessions::Session;

/// Session key for storing CSRF tokens.
const CSRF_SESSION_KEY: &str = "csrf_tokens";

/// Maximum number of outstanding tokens per session.
const MAX_TOKENS: usize = 10;

/// Token validity period in seconds (1 hour).
const TOKEN_VALIDITY_SECS: i64 = 3600;

/// Issue a CSRF token and store it in the session.
///
/// Every page load and every completed submission attempt fetches a fresh
/// token, so a session accumulates tokens; the list is pruned to the
/// `MAX_TOKENS` most recent.
pub async fn issue_token(session: &Session) -> Result<String> {
    let mut random_bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut random_bytes);

    let timestamp = chrono::Utc::now().timestamp();

    let mut hasher = Sha256::new();
    hasher.update(random_bytes);
    hasher.update(timestamp.to_le_bytes());
    let token = hex::encode(hasher.finalize());

    // Store as "token:issued-at"
    let token_data = format!("{token}:{timestamp}");

    let mut tokens: Vec<String> = session
        .get(CSRF_SESSION_KEY)
        .await
        .unwrap_or(None)
        .unwrap_or_default();

    tokens.push(token_data);

    if tokens.len() > MAX_TOKENS {
        let skip = tokens.len() - MAX_TOKENS;
        tokens = tokens.into_iter().skip(skip).collect();
    }

    session
        .insert(CSRF_SESSION_KEY, tokens)
        .await
        .map_err(|e| anyhow::anyhow!("failed to store CSRF token: {}", e))?;

    Ok(token)
}

/// Verify a CSRF token against the session and consume it.
///
/// Tokens are single-use and time-limited: a successful verification removes
/// the token, so replaying the same submission is rejected.
pub async fn verify_token(session: &Session, submitted: &str) -> Result<bool> {
    if submitted.is_empty() {
        return Ok(false);
    }

    let mut tokens: Vec<String> = session
        .get(CSRF_SESSION_KEY)
        .await
        .unwrap_or(None)
        .unwrap_or_default();

    if tokens.is_empty() {
        return Ok(false);
    }

    let now = chrono::Utc::now().timestamp();

    let mut found_index = None;
    for (i, token_data) in tokens.iter().enumerate() {
        let Some((token, issued)) = token_data.split_once(':') else {
            continue;
        };

        let issued: i64 = match issued.parse() {
            Ok(ts) => ts,
            Err(_) => continue,
        };

        if token == submitted && now - issued <= TOKEN_VALIDITY_SECS {
            found_index = Some(i);
            break;
        }
    }

    if let Some(index) = found_index {
        tokens.remove(index);

        // Drop expired tokens while the list is in hand
        tokens.retain(|token_data| {
            let Some((_, issued)) = token_data.split_once(':') else {
                return false;
            };
            let issued: i64 = issued.parse().unwrap_or(0);
            now - issued <= TOKEN_VALIDITY_SECS
        });

        session
            .insert(CSRF_SESSION_KEY, tokens)
            .await
            .map_err(|e| anyhow::anyhow!("failed to update CSRF tokens: {}", e))?;

        return Ok(true);
    }

    Ok(false)
}

/// Clear all CSRF tokens from the session.
pub async fn clear_tokens(session: &Session) -> Result<()> {
    session
        .remove::<Vec<String>>(CSRF_SESSION_KEY)
        .await
        .map_err(|e| anyhow::anyhow!("failed to clear CSRF tokens: {}", e))?;
    Ok(())
}
