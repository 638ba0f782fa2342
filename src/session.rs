use std::env;
use std::sync::{PoisonError, RwLock};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
}

/// Holds the current session, if any. Mutation paths check this before
/// touching the network.
#[derive(Debug, Default)]
pub struct SessionStore {
    current: RwLock<Option<Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store from `HAEYA_ACCESS_TOKEN` when set and non-empty.
    pub fn from_env() -> Self {
        let store = Self::new();
        if let Ok(token) = env::var("HAEYA_ACCESS_TOKEN")
            && !token.is_empty()
        {
            store.sign_in(Session {
                access_token: token,
            });
        }
        store
    }

    pub fn sign_in(&self, session: Session) {
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(session);
    }

    pub fn sign_out(&self) {
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn current(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
