use std::sync::Arc;

use realmkit_core::OrgId;

/// Account data the realm reads during authentication.
pub trait SystemUser: Send + Sync {
    fn login_name(&self) -> &str;

    /// Stored credential hash, as produced by the configured matcher.
    fn password_hash(&self) -> &str;

    /// Per-user salt. `None` or a blank string means the hash was computed
    /// without a salt.
    fn password_salt(&self) -> Option<&str>;
}

/// Identity produced by a successful authentication.
///
/// Principals are immutable and are handed back to the realm for every
/// authorization lookup, so they must be able to yield the user they wrap.
pub trait RealmPrincipal: Clone + Send + Sync {
    type User: SystemUser;

    fn system_user(&self) -> &Self::User;
}

/// Default principal: one shared user plus the organisation it acts within.
#[derive(Debug)]
pub struct BasePrincipal<U> {
    user: Arc<U>,
    org_id: Option<OrgId>,
}

impl<U: SystemUser> BasePrincipal<U> {
    /// Principal without an organisational context.
    pub fn new(user: U) -> Self {
        Self {
            user: Arc::new(user),
            org_id: None,
        }
    }

    /// Same identity, scoped to `org_id`.
    pub fn with_org(&self, org_id: OrgId) -> Self {
        Self {
            user: Arc::clone(&self.user),
            org_id: Some(org_id),
        }
    }

    pub fn org_id(&self) -> Option<OrgId> {
        self.org_id
    }

    pub fn login_name(&self) -> &str {
        self.user.login_name()
    }
}

// Manual impl: cloning shares the user, so `U: Clone` is not required.
impl<U> Clone for BasePrincipal<U> {
    fn clone(&self) -> Self {
        Self {
            user: Arc::clone(&self.user),
            org_id: self.org_id,
        }
    }
}

impl<U: SystemUser> RealmPrincipal for BasePrincipal<U> {
    type User = U;

    fn system_user(&self) -> &U {
        &self.user
    }
}

/// `true` when `salt` should be treated as absent.
pub(crate) fn is_blank(salt: Option<&str>) -> bool {
    salt.is_none_or(|s| s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Account {
        login: &'static str,
        salt: Option<&'static str>,
    }

    impl SystemUser for Account {
        fn login_name(&self) -> &str {
            self.login
        }

        fn password_hash(&self) -> &str {
            "h"
        }

        fn password_salt(&self) -> Option<&str> {
            self.salt
        }
    }

    #[test]
    fn with_org_keeps_the_same_user() {
        let base = BasePrincipal::new(Account { login: "alice", salt: None });
        let org = OrgId::new();
        let scoped = base.with_org(org);

        assert_eq!(base.org_id(), None);
        assert_eq!(scoped.org_id(), Some(org));
        assert!(std::ptr::eq(base.system_user(), scoped.system_user()));
        assert_eq!(scoped.login_name(), "alice");
    }

    #[test]
    fn blank_salts() {
        assert!(is_blank(None));
        assert!(is_blank(Some("")));
        assert!(is_blank(Some(" \t")));
        assert!(!is_blank(Some(" s1 ")));
    }

    #[test]
    fn clone_does_not_require_clone_user() {
        let principal = BasePrincipal::new(Account { login: "bob", salt: Some("s") });
        let copy = principal.clone();
        assert_eq!(copy.system_user().password_salt(), Some("s"));
    }
}
