//! # Session State
//!
//! The signed-in shopper, if any. Lives in memory only; restarting the
//! storefront signs everyone out.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use santos_core::User;

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    user: Arc<Mutex<Option<User>>>,
}

impl SessionState {
    pub fn new() -> Self {
        SessionState::default()
    }

    pub fn current(&self) -> Option<User> {
        self.lock().clone()
    }

    pub fn sign_in(&self, user: User) {
        *self.lock() = Some(user);
    }

    /// Clears the session. Returns the user who was signed in.
    pub fn sign_out(&self) -> Option<User> {
        self.lock().take()
    }

    fn lock(&self) -> MutexGuard<'_, Option<User>> {
        self.user.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_and_out() {
        let session = SessionState::new();
        assert!(session.current().is_none());

        session.sign_in(User {
            id: "u1".into(),
            name: "Sophia".into(),
            email: "sophia@santos.studio".into(),
        });
        assert_eq!(session.current().map(|u| u.name), Some("Sophia".to_string()));

        assert!(session.sign_out().is_some());
        assert!(session.current().is_none());
        assert!(session.sign_out().is_none());
    }
}
