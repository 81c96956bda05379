//! Short-lived bearer token.

use chrono::{DateTime, TimeDelta, Utc};
use std::fmt;

/// Bearer token minted for one submission call.
///
/// Held only while that call runs; never cached or persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    value: String,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn new(value: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            value: value.into(),
            expires_at,
        }
    }

    /// Builds a token from an OAuth `expires_in` (seconds from now).
    ///
    /// Returns `None` when the expiry is not representable.
    pub fn expiring_in(value: impl Into<String>, expires_in_secs: i64) -> Option<Self> {
        let lifetime = TimeDelta::try_seconds(expires_in_secs)?;
        let expires_at = Utc::now().checked_add_signed(lifetime)?;
        Some(Self::new(value, expires_at))
    }

    pub fn secret(&self) -> &str {
        &self.value
    }

}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
