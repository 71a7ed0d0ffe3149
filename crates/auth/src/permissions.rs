use std::borrow::Cow;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use realmkit_core::ValueObject;

const PART_DIVIDER: char = ':';
const SUBPART_DIVIDER: char = ',';
const WILDCARD: &str = "*";

/// String-encoded permission grant, compared by value.
///
/// Grants use the `resource:action[:instance]` form. Each part may list
/// alternatives separated by `,` and `*` stands for "any", so
/// `"doc:read,write"` and `"doc:*"` are both valid grants. Matching is
/// case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionInfo(Cow<'static, str>);

impl PermissionInfo {
    pub fn new(value: impl Into<Cow<'static, str>>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `"*"`: implies every permission.
    pub fn is_wildcard(&self) -> bool {
        self.as_str().trim() == WILDCARD
    }

    /// Does holding `self` grant `required`?
    ///
    /// A grant with fewer parts is more general: `"doc"` implies
    /// `"doc:read:42"`. Trailing parts the grant has beyond `required` must be
    /// wildcards. Blank permissions imply nothing and are implied by nothing.
    pub fn implies(&self, required: &PermissionInfo) -> bool {
        let (Some(granted), Some(required)) = (parts(self.as_str()), parts(required.as_str()))
        else {
            return false;
        };

        for (idx, wanted) in required.iter().enumerate() {
            let Some(held) = granted.get(idx) else {
                return true;
            };
            if !held.contains(WILDCARD) && !wanted.is_subset(held) {
                return false;
            }
        }

        granted
            .iter()
            .skip(required.len())
            .all(|held| held.contains(WILDCARD))
    }
}

fn parts(permission: &str) -> Option<Vec<BTreeSet<String>>> {
    if permission.trim().is_empty() {
        return None;
    }

    permission
        .split(PART_DIVIDER)
        .map(|part| {
            let subparts: BTreeSet<String> = part
                .split(SUBPART_DIVIDER)
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect();
            (!subparts.is_empty()).then_some(subparts)
        })
        .collect()
}

impl ValueObject for PermissionInfo {}

impl From<&'static str> for PermissionInfo {
    fn from(value: &'static str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PermissionInfo {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl core::fmt::Display for PermissionInfo {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
