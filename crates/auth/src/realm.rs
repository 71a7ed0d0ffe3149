//! Realm adapter: binds an application's account data to the login pipeline.
//!
//! Authentication and authorization are two separate calls. Authentication
//! resolves a login name into an [`AuthenticationInfo`] (the stored credential
//! plus a principal); a [`CredentialsMatcher`] then decides whether the
//! submitted password fits it. Authorization later turns that principal back
//! into the set of roles and permissions it holds.

use std::borrow::Cow;

use thiserror::Error;
use tracing::{debug, warn};

use realmkit_core::DescribableEnum;

use crate::matcher::{CredentialsMatcher, HashedCredentialsMatcher, MatcherError};
use crate::principal::{RealmPrincipal, SystemUser, is_blank};
use crate::{AuthorizationInfo, PermissionInfo, Role, UsernamePasswordToken};

/// Data access a realm needs from the embedding application.
///
/// Every method is a plain synchronous call; errors are genuine storage
/// failures and reach the caller untouched. Not-found is expressed through
/// `Ok(None)` / empty vectors, never through `Err`.
pub trait RealmSource: Send + Sync {
    type User: SystemUser;
    /// Organisational context (tenant, department, ...).
    type Org;
    type Role: DescribableEnum<Value: Into<Cow<'static, str>>>;
    type Principal: RealmPrincipal<User = Self::User>;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Name stamped into every [`AuthenticationInfo`] this realm produces.
    fn realm_name(&self) -> Cow<'static, str> {
        Cow::Borrowed(std::any::type_name::<Self>())
    }

    /// Wrap a user into a principal. Must not perform I/O.
    fn create_principal(&self, user: Self::User) -> Self::Principal;

    /// Hash algorithm identifier, e.g. `"SHA-256"`.
    fn hash_algorithm(&self) -> &str;

    /// Configured iteration count; `<= 0` means the default (1024).
    fn hash_iterations(&self) -> i32;

    /// Organisation the principal acts within, if any.
    fn system_org(&self, principal: &Self::Principal) -> Result<Option<Self::Org>, Self::Error>;

    /// Exact login-name lookup.
    fn user_by_login_name(&self, login_name: &str) -> Result<Option<Self::User>, Self::Error>;

    /// Roles granted to `user` within `org` (`None`: context-free grants).
    fn user_roles(
        &self,
        user: &Self::User,
        org: Option<&Self::Org>,
    ) -> Result<Vec<Self::Role>, Self::Error>;

    /// Permissions granted to `user` within `org` (`None`: context-free grants).
    fn user_permissions(
        &self,
        user: &Self::User,
        org: Option<&Self::Org>,
    ) -> Result<Vec<PermissionInfo>, Self::Error>;
}

/// Stored credential of an account, ready for matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationInfo<P> {
    pub principal: P,
    /// Stored password hash, verbatim.
    pub credentials: String,
    /// Salt bytes, byte-for-byte as stored. `None` when the account has no salt.
    pub credentials_salt: Option<Vec<u8>>,
    pub realm_name: String,
}

/// Failure of the full login step.
///
/// Both credential failures render as the same message so that surfacing
/// `to_string()` does not reveal whether the account exists. Match on the
/// variant when the distinction matters internally.
#[derive(Debug, Error)]
pub enum AuthenticationError<E>
where
    E: std::error::Error + 'static,
{
    #[error("authentication failed")]
    UnknownAccount,

    #[error("authentication failed")]
    IncorrectCredentials,

    #[error(transparent)]
    Source(E),
}

impl<E> AuthenticationError<E>
where
    E: std::error::Error + 'static,
{
    /// `true` for unknown accounts and wrong passwords, `false` for storage errors.
    pub fn is_credential_failure(&self) -> bool {
        matches!(self, Self::UnknownAccount | Self::IncorrectCredentials)
    }
}

/// Realm over a [`RealmSource`].
///
/// The matcher is configured once, when the adapter is built, and is read-only
/// afterwards. Share the adapter behind an `Arc` to serve concurrent logins.
#[derive(Debug)]
pub struct RealmAdapter<S, M = HashedCredentialsMatcher> {
    source: S,
    matcher: M,
    name: Cow<'static, str>,
}

impl<S: RealmSource> RealmAdapter<S> {
    /// Build the adapter, configuring a [`HashedCredentialsMatcher`] from the
    /// source's `hash_algorithm()` / `hash_iterations()`.
    pub fn new(source: S) -> Result<Self, MatcherError> {
        let matcher =
            HashedCredentialsMatcher::from_id(source.hash_algorithm(), source.hash_iterations())?;
        debug!(
            algorithm = matcher.algorithm().value(),
            iterations = matcher.iterations(),
            "configured credentials matcher"
        );
        Ok(Self::with_matcher(source, matcher))
    }
}

impl<S, M> RealmAdapter<S, M>
where
    S: RealmSource,
    M: CredentialsMatcher,
{
    pub fn with_matcher(source: S, matcher: M) -> Self {
        let name = source.realm_name();
        Self {
            source,
            matcher,
            name,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn matcher(&self) -> &M {
        &self.matcher
    }

    /// Resolve the stored credential for `token`'s login name.
    ///
    /// Returns `Ok(None)` for unknown login names. Does not look at the
    /// submitted password.
    pub fn authentication_info(
        &self,
        token: &UsernamePasswordToken,
    ) -> Result<Option<AuthenticationInfo<S::Principal>>, S::Error> {
        let Some(user) = self.source.user_by_login_name(token.username())? else {
            debug!(realm = %self.name, "no account for login name");
            return Ok(None);
        };

        let credentials = user.password_hash().to_string();
        let salt = user.password_salt();
        let credentials_salt = if is_blank(salt) {
            None
        } else {
            salt.map(|s| s.as_bytes().to_vec())
        };
        let principal = self.source.create_principal(user);

        Ok(Some(AuthenticationInfo {
            principal,
            credentials,
            credentials_salt,
            realm_name: self.name.to_string(),
        }))
    }

    /// Resolve the account and verify the submitted password against it.
    pub fn authenticate(
        &self,
        token: &UsernamePasswordToken,
    ) -> Result<AuthenticationInfo<S::Principal>, AuthenticationError<S::Error>> {
        let info = self
            .authentication_info(token)
            .map_err(AuthenticationError::Source)?
            .ok_or(AuthenticationError::UnknownAccount)?;

        if self.matcher.matches(
            token.password(),
            &info.credentials,
            info.credentials_salt.as_deref(),
        ) {
            Ok(info)
        } else {
            warn!(realm = %self.name, "submitted credentials did not match");
            Err(AuthenticationError::IncorrectCredentials)
        }
    }

    /// Aggregate the roles and permissions of an authenticated principal.
    ///
    /// The organisation is resolved on every call.
    pub fn authorization_info(
        &self,
        principal: &S::Principal,
    ) -> Result<AuthorizationInfo, S::Error> {
        let user = principal.system_user();
        let org = self.source.system_org(principal)?;

        let mut info = AuthorizationInfo::new();
        for role in self.source.user_roles(user, org.as_ref())? {
            info.add_role(Role::from_describable(&role));
        }
        for permission in self.source.user_permissions(user, org.as_ref())? {
            info.add_permission(permission);
        }

        debug!(
            realm = %self.name,
            org_scoped = org.is_some(),
            roles = info.roles.len(),
            permissions = info.permissions.len(),
            "resolved authorization info"
        );
        Ok(info)
    }
}
