//! `realmkit-auth` — realm-based authentication/authorization adapter.
//!
//! Decoupled from HTTP and storage: the embedding application supplies its
//! account data through [`RealmSource`], and this crate turns login tokens into
//! verified principals and principals into role/permission sets.

pub mod authorize;
pub mod config;
pub mod matcher;
pub mod memory;
pub mod permissions;
pub mod principal;
pub mod realm;
pub mod roles;
pub mod token;

pub use authorize::{AuthorizationInfo, AuthzError, check_permission, check_role};
pub use config::{
    DEFAULT_HASH_ALGORITHM, DEFAULT_HASH_ITERATIONS, HashSettings, effective_iterations,
};
pub use matcher::{CredentialsMatcher, HashAlgorithm, HashedCredentialsMatcher, MatcherError};
pub use memory::{InMemoryRealmSource, MemoryOrg, MemorySourceError, MemoryUser};
pub use permissions::PermissionInfo;
pub use principal::{BasePrincipal, RealmPrincipal, SystemUser};
pub use realm::{AuthenticationError, AuthenticationInfo, RealmAdapter, RealmSource};
pub use roles::Role;
pub use token::UsernamePasswordToken;
