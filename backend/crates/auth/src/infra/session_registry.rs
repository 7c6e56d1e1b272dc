//! In-memory Session Registry
//!
//! Token → session map behind one mutex. Every operation, lookups
//! included, slides or removes state, so all of them take the lock
//! exclusively. Operations on one token are linearized; different tokens
//! interleave freely.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::domain::entity::session::Session;
use crate::domain::value_object::session_token::SessionToken;
use crate::error::{AuthError, AuthResult};

/// Outcome of a conditional lookup
#[derive(Debug, Clone)]
pub enum Lookup {
    /// Absent, or present but already expired (and now removed)
    NotFound,
    /// Live, predicate failed; expiry untouched
    Denied(Session),
    /// Live, predicate passed; expiry extended
    Touched(Session),
}

#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<SessionToken, Session>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store under `session.token`. Refuses to replace a live entry.
    pub fn insert(&self, session: Session) -> AuthResult<()> {
        let mut sessions = self.sessions.lock();
        if sessions.contains_key(&session.token) {
            return Err(AuthError::DuplicateToken);
        }
        sessions.insert(session.token.clone(), session);
        Ok(())
    }

    /// Look up a live session and slide its expiry
    pub fn touch_and_get(&self, token: &str) -> Option<Session> {
        match self.touch_and_get_if(token, |_| true) {
            Lookup::Touched(session) => Some(session),
            Lookup::NotFound | Lookup::Denied(_) => None,
        }
    }

    /// Look up a live session; slide its expiry only if `allow` passes.
    ///
    /// Lookup, check and extension happen in one critical section.
    pub fn touch_and_get_if<F>(&self, token: &str, allow: F) -> Lookup
    where
        F: FnOnce(&Session) -> bool,
    {
        let now = Utc::now();
        let mut sessions = self.sessions.lock();

        let Some(session) = sessions.get_mut(token) else {
            return Lookup::NotFound;
        };

        if session.is_expired_at(now) {
            sessions.remove(token);
            return Lookup::NotFound;
        }

        if !allow(session) {
            return Lookup::Denied(session.clone());
        }

        session.extend_from(now);
        Lookup::Touched(session.clone())
    }

    /// Remove unconditionally. Returns whether anything was removed.
    pub fn delete(&self, token: &str) -> bool {
        self.sessions.lock().remove(token).is_some()
    }

    /// Drop every session whose expiry is strictly before `now`
    pub fn remove_expired(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.lock();
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired_at(now));
        before - sessions.len()
    }

    /// Copy of every entry; nothing shared with the live map
    pub fn snapshot(&self) -> Vec<(SessionToken, Session)> {
        self.sessions
            .lock()
            .iter()
            .map(|(token, session)| (token.clone(), session.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::fixtures::session_with;
    use chrono::TimeDelta;
    use std::sync::Arc;

    #[test]
    fn test_insert_rejects_duplicate_token() {
        let registry = SessionRegistry::new();
        let session = session_with("/orders", TimeDelta::minutes(30));

        registry.insert(session.clone()).unwrap();
        assert!(matches!(
            registry.insert(session),
            Err(AuthError::DuplicateToken)
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_touch_extends_expiry() {
        let registry = SessionRegistry::new();
        let session = session_with("/orders", TimeDelta::minutes(30));
        let before = session.expires_at;
        let token = session.token.clone();
        registry.insert(session).unwrap();

        std::thread::sleep(std::time::Duration::from_millis(5));
        let touched = registry.touch_and_get(token.as_str()).unwrap();

        assert!(touched.expires_at > before);
    }

    #[test]
    fn test_denied_lookup_keeps_expiry() {
        let registry = SessionRegistry::new();
        let session = session_with("/orders", TimeDelta::minutes(30));
        let before = session.expires_at;
        let token = session.token.clone();
        registry.insert(session).unwrap();

        std::thread::sleep(std::time::Duration::from_millis(5));
        let lookup = registry.touch_and_get_if(token.as_str(), |s| s.permits("/billing"));

        assert!(matches!(lookup, Lookup::Denied(ref s) if s.expires_at == before));
        let (_, stored) = registry.snapshot().pop().unwrap();
        assert_eq!(stored.expires_at, before);
    }

    #[test]
    fn test_expired_entry_is_not_found_and_removed() {
        let registry = SessionRegistry::new();
        let session = session_with("/orders", TimeDelta::minutes(-1));
        let token = session.token.clone();
        registry.insert(session).unwrap();

        assert!(registry.touch_and_get(token.as_str()).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unknown_token() {
        let registry = SessionRegistry::new();
        assert!(matches!(
            registry.touch_and_get_if("bogus-token", |_| true),
            Lookup::NotFound
        ));
    }

    #[test]
    fn test_delete_is_idempotent() {
        let registry = SessionRegistry::new();
        let session = session_with("/orders", TimeDelta::minutes(30));
        let token = session.token.clone();
        registry.insert(session).unwrap();

        assert!(registry.delete(token.as_str()));
        assert!(!registry.delete(token.as_str()));
        assert!(!registry.delete("never-issued"));
    }

    #[test]
    fn test_remove_expired_only_drops_stale() {
        let registry = SessionRegistry::new();
        registry
            .insert(session_with("/a", TimeDelta::minutes(-5)))
            .unwrap();
        registry
            .insert(session_with("/b", TimeDelta::minutes(-1)))
            .unwrap();
        let live = session_with("/c", TimeDelta::minutes(30));
        let live_token = live.token.clone();
        registry.insert(live).unwrap();

        assert_eq!(registry.remove_expired(Utc::now()), 2);
        let remaining: Vec<SessionToken> =
            registry.snapshot().into_iter().map(|(t, _)| t).collect();
        assert_eq!(remaining, vec![live_token]);
    }

    #[test]
    fn test_concurrent_inserts_and_touches() {
        let registry = Arc::new(SessionRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        let session = session_with("/orders", TimeDelta::minutes(30));
                        let token = session.token.clone();
                        registry.insert(session).unwrap();
                        assert!(registry.touch_and_get(token.as_str()).is_some());
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(registry.len(), 800);
    }
}
