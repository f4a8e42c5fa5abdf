// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Token Provider Interface
//!
//! Bearer tokens for the AAS repository are obtained through an explicit
//! provider owned by the repository client. Refresh happens lazily, when
//! `acquire` finds the cached token expired.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::fmt;

use crate::domain::error::MapperError;

#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub value: String,
    /// `None` means the token never expires
    pub expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    pub fn new(value: impl Into<String>, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            value: value.into(),
            expires_at,
        }
    }

    /// Expired, or expiring within `skew`
    pub fn is_expired_at(&self, now: DateTime<Utc>, skew: Duration) -> bool {
        match self.expires_at {
            Some(expires_at) => now + skew >= expires_at,
            None => false,
        }
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"***")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Current token, refreshed first if expired. `None` when the repository
    /// is used without authentication.
    async fn acquire(&self) -> Result<Option<AccessToken>, MapperError>;

    /// Replace `rejected`, the token the repository just turned down. When a
    /// concurrent caller already replaced it, the cached token is returned
    /// without another request to the token endpoint.
    async fn refresh(&self, rejected: Option<&AccessToken>) -> Result<Option<AccessToken>, MapperError>;

    fn is_expired(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_with_skew() {
        let now = Utc::now();
        let token = AccessToken::new("t", Some(now + Duration::seconds(20)));

        assert!(!token.is_expired_at(now, Duration::seconds(0)));
        assert!(token.is_expired_at(now, Duration::seconds(30)));
        assert!(!AccessToken::new("t", None).is_expired_at(now, Duration::days(365)));
    }

    #[test]
    fn test_debug_hides_value() {
        let token = AccessToken::new("secret-value", None);
        assert!(!format!("{:?}", token).contains("secret-value"));
    }
}
