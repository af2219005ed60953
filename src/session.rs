//! Identity of the signed-in user, as reported by the external auth service.

use crate::domain::UserId;
use crate::errors::{FinanceError, Result};

/// Nullable "current user" handle. Authentication itself happens elsewhere;
/// this only records who, if anyone, the store should be scoped to.
#[derive(Debug, Clone, Default)]
pub struct Session {
    current_user: Option<UserId>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(user: UserId) -> Self {
        Self {
            current_user: Some(user),
        }
    }

    pub fn sign_in(&mut self, user: UserId) {
        tracing::info!(user = %user, "user signed in");
        self.current_user = Some(user);
    }

    /// Clears the current user, returning who was signed in.
    pub fn sign_out(&mut self) -> Option<UserId> {
        let previous = self.current_user.take();
        if let Some(user) = &previous {
            tracing::info!(user = %user, "user signed out");
        }
        previous
    }

    pub fn current_user(&self) -> Option<&UserId> {
        self.current_user.as_ref()
    }

    pub fn require_user(&self) -> Result<&UserId> {
        self.current_user.as_ref().ok_or(FinanceError::NotSignedIn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_user_fails_when_signed_out() {
        let session = Session::new();
        assert!(matches!(
            session.require_user(),
            Err(FinanceError::NotSignedIn)
        ));
    }

    #[test]
    fn sign_in_and_out() {
        let mut session = Session::new();
        session.sign_in(UserId::new("u-1"));
        assert_eq!(session.require_user().unwrap().as_str(), "u-1");
        assert_eq!(session.sign_out(), Some(UserId::new("u-1")));
        assert!(session.current_user().is_none());
        assert_eq!(session.sign_out(), None);
    }
}
