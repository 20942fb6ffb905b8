//! Session management.
//!
//! The only session-scoped state this service keeps is the visitor's CSRF
//! token list, so sessions live in the process-local memory store and expire
//! on inactivity.

use tower_sessions::cookie::SameSite;
use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

/// Session expiry on inactivity (2 hours, comfortably past token validity).
pub const SESSION_EXPIRY_HOURS: i64 = 2;

/// Create the session layer backed by the in-memory store.
pub fn create_session_layer(same_site: SameSite) -> SessionManagerLayer<MemoryStore> {
    let store = MemoryStore::default();

    SessionManagerLayer::new(store)
        .with_secure(false) // TLS terminates at the fronting proxy
        .with_http_only(true) // Cookie not accessible via JavaScript
        .with_same_site(same_site)
        .with_expiry(Expiry::OnInactivity(Duration::hours(SESSION_EXPIRY_HOURS)))
}
