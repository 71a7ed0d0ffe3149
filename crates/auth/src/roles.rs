use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use realmkit_core::{DescribableEnum, ValueObject};

/// Role name as recorded in an [`AuthorizationInfo`](crate::AuthorizationInfo).
///
/// Applications model their roles as [`DescribableEnum`]s; the realm keeps only
/// the machine-readable value, so at this layer a role is an opaque string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Role carrying the value of a describable enumerant.
    pub fn from_describable<R>(role: &R) -> Self
    where
        R: DescribableEnum<Value: Into<Cow<'static, str>>>,
    {
        Self(role.value().into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Role {}

impl From<&'static str> for Role {
    fn from(value: &'static str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
