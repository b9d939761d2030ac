//! Interactive upload sessions
//!
//! A `load` command opens a short-lived session for the caller that remembers
//! the denomination while the codes arrive in later messages. Sessions are
//! keyed by caller and expire after a period of inactivity.

use crate::types::Denomination;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Default inactivity timeout for an upload session
pub const DEFAULT_SESSION_TIMEOUT: Duration = Duration::from_secs(300);

/// How a session collects its codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// The next message holds all codes and closes the session (chat transports)
    NextMessage,
    /// One raw code per message until the `done` sentinel (console)
    UntilSentinel,
}

/// A pending upload for one caller
#[derive(Debug, Clone, PartialEq)]
pub struct UploadSession {
    pub amount: Denomination,
    pub mode: SessionMode,
    /// Codes collected so far (`UntilSentinel` only)
    pub collected: Vec<String>,
    last_activity: Instant,
}

impl UploadSession {
    fn new(amount: Denomination, mode: SessionMode, now: Instant) -> Self {
        UploadSession {
            amount,
            mode,
            collected: Vec::new(),
            last_activity: now,
        }
    }

    /// Record activity so the session does not expire
    pub fn touch(&mut self, now: Instant) {
        self.last_activity = now;
    }

    pub fn is_expired(&self, now: Instant, timeout: Duration) -> bool {
        now.saturating_duration_since(self.last_activity) >= timeout
    }
}

/// Pending upload sessions keyed by caller
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: HashMap<String, UploadSession>,
    timeout: Duration,
}

impl SessionRegistry {
    pub fn new(timeout: Duration) -> Self {
        SessionRegistry {
            sessions: HashMap::new(),
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Open a session for `caller`, replacing any previous one
    ///
    /// # Returns
    ///
    /// The replaced session, if there was one
    pub fn open(
        &mut self,
        caller: &str,
        amount: Denomination,
        mode: SessionMode,
        now: Instant,
    ) -> Option<UploadSession> {
        self.sessions
            .insert(caller.to_string(), UploadSession::new(amount, mode, now))
    }

    /// The caller's live session
    ///
    /// An expired session is dropped and `None` is returned.
    pub fn active(&mut self, caller: &str, now: Instant) -> Option<&mut UploadSession> {
        if self
            .sessions
            .get(caller)
            .is_some_and(|session| session.is_expired(now, self.timeout))
        {
            tracing::info!(caller, "Upload session expired");
            self.sessions.remove(caller);
        }
        self.sessions.get_mut(caller)
    }

    /// Whether the caller has a live session, without dropping expired ones
    pub fn is_active(&self, caller: &str, now: Instant) -> bool {
        self.sessions
            .get(caller)
            .is_some_and(|session| !session.is_expired(now, self.timeout))
    }

    /// Remove and return the caller's session
    pub fn close(&mut self, caller: &str) -> Option<UploadSession> {
        self.sessions.remove(caller)
    }

    /// Remove every expired session
    ///
    /// # Returns
    ///
    /// The removed sessions with their callers, so codes they collected can
    /// still be saved
    pub fn purge_expired(&mut self, now: Instant) -> Vec<(String, UploadSession)> {
        let timeout = self.timeout;
        let expired: Vec<String> = self
            .sessions
            .iter()
            .filter(|(_, session)| session.is_expired(now, timeout))
            .map(|(caller, _)| caller.clone())
            .collect();

        expired
            .into_iter()
            .filter_map(|caller| {
                let session = self.sessions.remove(&caller)?;
                Some((caller, session))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_TIMEOUT)
    }
}
