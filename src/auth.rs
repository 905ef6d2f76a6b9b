//! Advisory bearer-token handling

use async_trait::async_trait;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;

use stp_core::UserProfile;

/// Resolves a bearer token to a stored user profile.
///
/// Auth is advisory for every endpoint: a missing or unknown token yields a
/// guest profile, never a rejection. Token issuance and user storage are
/// owned by the external auth subsystem.
#[async_trait]
pub trait ProfileResolver: Send + Sync {
    async fn resolve(&self, token: &str) -> Option<UserProfile>;
}

/// Default resolver: every caller is a guest.
pub struct GuestProfiles;

#[async_trait]
impl ProfileResolver for GuestProfiles {
    async fn resolve(&self, _token: &str) -> Option<UserProfile> {
        None
    }
}

/// Extract the bearer token from the Authorization header, if present.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Resolve the caller's profile, falling back to guest.
pub async fn profile_or_guest(resolver: &dyn ProfileResolver, headers: &HeaderMap) -> UserProfile {
    match bearer_token(headers) {
        Some(token) => resolver
            .resolve(token)
            .await
            .unwrap_or_else(UserProfile::guest),
        None => UserProfile::guest(),
    }
}
