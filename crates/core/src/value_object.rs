//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values. Role
/// names and permission grants are value objects: two grants with the same
/// string are the same grant.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct PermissionInfo(String);
///
/// impl ValueObject for PermissionInfo {}
///
/// assert_eq!(PermissionInfo("doc:read".into()), PermissionInfo("doc:read".into()));
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
