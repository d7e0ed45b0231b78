//! Session context handed to every controller at construction.

use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

pub const DEFAULT_PUBLIC_USERNAME: &str = "rikkejuliane";

/// The two persisted keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SessionKey {
    AccessToken,
    Username,
}

impl SessionKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionKey::AccessToken => "accessToken",
            SessionKey::Username => "username",
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session store io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("session store is corrupt: {0}")]
    Corrupt(String),
    #[error("session store lock poisoned")]
    Poisoned,
}

/// Synchronous key/value persistence for the session keys.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: SessionKey) -> Result<Option<String>, StoreError>;
    fn set(&self, key: SessionKey, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: SessionKey) -> Result<(), StoreError>;
}

/// Username used to scope a query plus the token to send with it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
    pub token: Option<String>,
}

impl Identity {
    pub fn bearer(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

/// A complete login: required by every write call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub token: String,
}

#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
    public_username: String,
}

impl Session {
    pub fn new(store: Arc<dyn SessionStore>, public_username: impl Into<String>) -> Self {
        Self {
            store,
            public_username: public_username.into(),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.read(SessionKey::AccessToken)
    }

    pub fn username(&self) -> Option<String> {
        self.read(SessionKey::Username)
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials().is_some()
    }

    pub fn public_username(&self) -> &str {
        &self.public_username
    }

    /// Logged-in username, or the public fallback for anonymous viewers.
    pub fn identity(&self) -> Identity {
        Identity {
            username: self
                .username()
                .unwrap_or_else(|| self.public_username.clone()),
            token: self.token(),
        }
    }

    pub fn credentials(&self) -> Option<Credentials> {
        Some(Credentials {
            username: self.username()?,
            token: self.token()?,
        })
    }

    pub fn sign_in(&self, token: &str, username: &str) -> Result<(), StoreError> {
        self.store.set(SessionKey::AccessToken, token)?;
        self.store.set(SessionKey::Username, username)
    }

    pub fn remember_username(&self, username: &str) -> Result<(), StoreError> {
        self.store.set(SessionKey::Username, username)
    }

    pub fn sign_out(&self) -> Result<(), StoreError> {
        self.store.remove(SessionKey::AccessToken)?;
        self.store.remove(SessionKey::Username)
    }

    fn read(&self, key: SessionKey) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value.filter(|value| !value.trim().is_empty()),
            Err(err) => {
                warn!(key = key.as_str(), error = %err, "failed to read session key");
                None
            }
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("public_username", &self.public_username)
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::storage::MemorySessionStore;

    fn session() -> Session {
        Session::new(Arc::new(MemorySessionStore::default()), "public")
    }

    #[test]
    fn anonymous_session_uses_public_identity() {
        let session = session();
        assert!(!session.is_authenticated());
        assert_eq!(
            session.identity(),
            Identity {
                username: "public".into(),
                token: None
            }
        );
    }

    #[test]
    fn sign_in_and_out_round_trip() {
        let session = session();
        session.sign_in("tok", "rikke").expect("sign in");
        assert!(session.is_authenticated());
        assert_eq!(session.identity().bearer(), Some("tok"));
        assert_eq!(
            session.credentials(),
            Some(Credentials {
                username: "rikke".into(),
                token: "tok".into()
            })
        );

        session.sign_out().expect("sign out");
        assert_eq!(session.token(), None);
        assert_eq!(session.username(), None);
    }

    #[test]
    fn username_without_token_is_not_authenticated() {
        let session = session();
        session.remember_username("rikke").expect("remember");
        assert!(!session.is_authenticated());
        assert_eq!(session.identity().username, "rikke");
        assert_eq!(session.identity().token, None);
    }

    #[test]
    fn blank_values_count_as_absent() {
        let session = session();
        session.sign_in("  ", "rikke").expect("sign in");
        assert_eq!(session.token(), None);
        assert!(!session.is_authenticated());
    }
}
