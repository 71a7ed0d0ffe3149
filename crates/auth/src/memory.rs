//! In-memory [`RealmSource`] for tests and local development.
//!
//! Not optimized for performance; everything sits behind one `RwLock`.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;

use realmkit_core::{DescribableEnum, DomainError, Entity, OrgId, UserId};

use crate::config::HashSettings;
use crate::principal::{BasePrincipal, SystemUser};
use crate::realm::RealmSource;
use crate::PermissionInfo;

/// Account record held by [`InMemoryRealmSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryUser {
    pub id: UserId,
    pub login_name: String,
    pub password_hash: String,
    pub password_salt: Option<String>,
}

impl MemoryUser {
    pub fn new(login_name: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            login_name: login_name.into(),
            password_hash: password_hash.into(),
            password_salt: None,
        }
    }

    pub fn with_salt(mut self, salt: impl Into<String>) -> Self {
        self.password_salt = Some(salt.into());
        self
    }
}

impl Entity for MemoryUser {
    type Id = UserId;

    fn id(&self) -> &UserId {
        &self.id
    }
}

impl SystemUser for MemoryUser {
    fn login_name(&self) -> &str {
        &self.login_name
    }

    fn password_hash(&self) -> &str {
        &self.password_hash
    }

    fn password_salt(&self) -> Option<&str> {
        self.password_salt.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryOrg {
    pub id: OrgId,
    pub name: String,
}

impl MemoryOrg {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: OrgId::new(),
            name: name.into(),
        }
    }
}

impl Entity for MemoryOrg {
    type Id = OrgId;

    fn id(&self) -> &OrgId {
        &self.id
    }
}

#[derive(Debug, Error)]
pub enum MemorySourceError {
    #[error("lock poisoned")]
    LockPoisoned,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Grants are keyed by user and (optional) organisation.
type GrantKey = (UserId, Option<OrgId>);

#[derive(Debug)]
struct State<R> {
    users: HashMap<String, MemoryUser>,
    orgs: HashMap<OrgId, MemoryOrg>,
    roles: HashMap<GrantKey, Vec<R>>,
    permissions: HashMap<GrantKey, Vec<PermissionInfo>>,
}

impl<R> Default for State<R> {
    fn default() -> Self {
        Self {
            users: HashMap::new(),
            orgs: HashMap::new(),
            roles: HashMap::new(),
            permissions: HashMap::new(),
        }
    }
}

impl<R> State<R> {
    fn ensure_grantable(&self, user_id: UserId, org_id: Option<OrgId>) -> Result<(), DomainError> {
        if !self.users.values().any(|u| *u.id() == user_id) {
            return Err(DomainError::not_found(format!("user {user_id}")));
        }
        match org_id {
            Some(org_id) if !self.orgs.contains_key(&org_id) => {
                Err(DomainError::not_found(format!("org {org_id}")))
            }
            _ => Ok(()),
        }
    }
}

/// Thread-safe realm source keeping users, orgs and grants in memory.
///
/// Principals start without an organisation; scope them with
/// [`BasePrincipal::with_org`] to read org-specific grants.
#[derive(Debug)]
pub struct InMemoryRealmSource<R> {
    settings: HashSettings,
    state: RwLock<State<R>>,
}

impl<R> InMemoryRealmSource<R>
where
    R: Clone,
{
    pub fn new(settings: HashSettings) -> Self {
        Self {
            settings,
            state: RwLock::new(State::default()),
        }
    }

    pub fn settings(&self) -> &HashSettings {
        &self.settings
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, State<R>>, MemorySourceError> {
        self.state.read().map_err(|_| MemorySourceError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, State<R>>, MemorySourceError> {
        self.state.write().map_err(|_| MemorySourceError::LockPoisoned)
    }

    /// Register an account. Login names are unique.
    pub fn add_user(&self, user: MemoryUser) -> Result<UserId, MemorySourceError> {
        let mut state = self.write()?;
        if state.users.contains_key(&user.login_name) {
            let msg = format!("login name '{}' is taken", user.login_name);
            return Err(DomainError::conflict(msg).into());
        }
        let id = user.id;
        state.users.insert(user.login_name.clone(), user);
        Ok(id)
    }

    pub fn add_org(&self, org: MemoryOrg) -> Result<OrgId, MemorySourceError> {
        let mut state = self.write()?;
        let id = org.id;
        if state.orgs.insert(id, org).is_some() {
            return Err(DomainError::conflict(format!("org {id} already registered")).into());
        }
        Ok(id)
    }

    /// Grant `role` to `user_id` within `org_id` (`None`: context-free).
    pub fn grant_role(
        &self,
        user_id: UserId,
        org_id: Option<OrgId>,
        role: R,
    ) -> Result<(), MemorySourceError> {
        let mut state = self.write()?;
        state.ensure_grantable(user_id, org_id)?;
        state.roles.entry((user_id, org_id)).or_default().push(role);
        Ok(())
    }

    /// Grant `permission` to `user_id` within `org_id` (`None`: context-free).
    pub fn grant_permission(
        &self,
        user_id: UserId,
        org_id: Option<OrgId>,
        permission: PermissionInfo,
    ) -> Result<(), MemorySourceError> {
        let mut state = self.write()?;
        state.ensure_grantable(user_id, org_id)?;
        state
            .permissions
            .entry((user_id, org_id))
            .or_default()
            .push(permission);
        Ok(())
    }
}

impl<R> RealmSource for InMemoryRealmSource<R>
where
    R: DescribableEnum<Value: Into<Cow<'static, str>>> + Clone + Send + Sync,
{
    type User = MemoryUser;
    type Org = MemoryOrg;
    type Role = R;
    type Principal = BasePrincipal<MemoryUser>;
    type Error = MemorySourceError;

    fn realm_name(&self) -> Cow<'static, str> {
        Cow::Borrowed("memory")
    }

    fn create_principal(&self, user: MemoryUser) -> Self::Principal {
        BasePrincipal::new(user)
    }

    fn hash_algorithm(&self) -> &str {
        &self.settings.algorithm
    }

    fn hash_iterations(&self) -> i32 {
        self.settings.iterations
    }

    fn system_org(
        &self,
        principal: &Self::Principal,
    ) -> Result<Option<MemoryOrg>, MemorySourceError> {
        let Some(org_id) = principal.org_id() else {
            return Ok(None);
        };
        let state = self.read()?;
        match state.orgs.get(&org_id) {
            Some(org) => Ok(Some(org.clone())),
            None => Err(DomainError::not_found(format!("org {org_id}")).into()),
        }
    }

    fn user_by_login_name(
        &self,
        login_name: &str,
    ) -> Result<Option<MemoryUser>, MemorySourceError> {
        Ok(self.read()?.users.get(login_name).cloned())
    }

    fn user_roles(
        &self,
        user: &MemoryUser,
        org: Option<&MemoryOrg>,
    ) -> Result<Vec<R>, MemorySourceError> {
        let key = (user.id, org.map(|o| o.id));
        Ok(self.read()?.roles.get(&key).cloned().unwrap_or_default())
    }

    fn user_permissions(
        &self,
        user: &MemoryUser,
        org: Option<&MemoryOrg>,
    ) -> Result<Vec<PermissionInfo>, MemorySourceError> {
        let key = (user.id, org.map(|o| o.id));
        Ok(self.read()?.permissions.get(&key).cloned().unwrap_or_default())
    }
}
