//! Session state: the single source of truth for "is a user logged in".
//!
//! `Session` is derived, not independently stored: a token in the
//! store means `Authenticated`, no token means `Anonymous`. The
//! invariant is that the in-memory session and the token store never
//! diverge, which is why `SessionState` owns the store and performs
//! both sides of every transition under one write lock.
//!
//! # Thread Safety
//!
//! `SessionState` is `Clone`; all clones share the same underlying
//! state through `Arc<RwLock<_>>`. Reads are concurrent, mutations are
//! serialized by the write lock.

use crate::api::ApiClient;
use crate::error::api::ApiError;
use crate::error::session::SessionError;
use crate::token_store::TokenStore;

use common::RedactedToken;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info, warn};
use tokio::sync::RwLock;

/// Client-side authentication status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    Anonymous,
    Authenticated(RedactedToken),
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }

    pub fn token(&self) -> Option<&RedactedToken> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated(token) => Some(token),
        }
    }
}

/// Shared, mutable session handle.
///
/// The only paths that change the session are `initialize`, `login`,
/// and `logout`; leaf components read it, they never write it.
#[derive(Clone)]
pub struct SessionState {
    store: Arc<TokenStore>,
    session: Arc<RwLock<Session>>,
    initialized: Arc<AtomicBool>,
}

impl SessionState {
    pub fn new(store: TokenStore) -> Self {
        Self {
            store: Arc::new(store),
            session: Arc::new(RwLock::new(Session::Anonymous)),
            initialized: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Restore the session from the token store.
    ///
    /// Runs exactly once per process; a second call logs a warning and
    /// leaves the state untouched.
    pub async fn initialize(&self) -> Result<(), SessionError> {
        if self.initialized.swap(true, Ordering::SeqCst) {
            warn!("Session already initialized");
            return Ok(());
        }

        let mut session = self.session.write().await;
        match self.store.get()? {
            Some(token) => {
                info!("Restored session from token store ({} chars)", token.len());
                *session = Session::Authenticated(token);
            }
            None => {
                debug!("No stored token, starting anonymous");
                *session = Session::Anonymous;
            }
        }

        Ok(())
    }

    /// Transition to `Authenticated` with a token returned by a
    /// successful backend auth call.
    ///
    /// Writes the store first; if persistence fails the in-memory
    /// session is left unchanged, so the two can never diverge.
    ///
    /// # Errors
    /// Returns [`SessionError::EmptyToken`] for an empty token and
    /// propagates token store failures.
    pub async fn login(&self, token: RedactedToken) -> Result<(), SessionError> {
        if token.is_empty() {
            return Err(SessionError::empty_token());
        }

        let mut session = self.session.write().await;
        self.store.set(&token)?;
        *session = Session::Authenticated(token);
        info!("Logged in");

        Ok(())
    }

    /// Transition to `Anonymous`, clearing the stored token.
    ///
    /// Local-only invalidation: the backend is not asked to revoke the
    /// token server-side.
    pub async fn logout(&self) -> Result<(), SessionError> {
        let mut session = self.session.write().await;
        self.store.clear()?;

        if session.is_authenticated() {
            info!("Logged out");
        } else {
            debug!("Logout requested while already anonymous");
        }
        *session = Session::Anonymous;

        Ok(())
    }

    /// Snapshot of the current session.
    pub async fn current(&self) -> Session {
        self.session.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_authenticated()
    }

    /// Build a request pipeline bound to the current session.
    ///
    /// Constructed fresh per call so a client is always a function of
    /// the session at call time; a token rotated by login/logout is
    /// never reused through a stale instance.
    pub async fn client(&self, base_url: &str) -> Result<ApiClient, ApiError> {
        let session = self.session.read().await;
        ApiClient::for_session(base_url, &session)
    }
}
