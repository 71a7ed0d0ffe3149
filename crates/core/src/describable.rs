//! Self-describing enumerations.
//!
//! Enumerations that cross a boundary (roles, statuses, algorithm identifiers)
//! carry two pieces of static data per variant: a machine-readable value and a
//! human-readable description.

/// Capability of an enumerated type that exposes a typed value and a description.
///
/// ## Invariants
///
/// - `value()` is stable and uniquely identifies the variant within its type.
/// - `description()` is for presentation only and must never be parsed.
pub trait DescribableEnum {
    /// Machine-readable value type (commonly `&'static str` or an integer).
    type Value;

    /// Stable value identifying this variant.
    fn value(&self) -> Self::Value;

    /// Human-readable description of this variant.
    fn description(&self) -> &'static str;
}

/// Declare a fieldless enum implementing [`DescribableEnum`].
///
/// Each variant is given its value and description as static data:
///
/// ```ignore
/// describable_enum! {
///     /// Account status.
///     #[derive(Serialize, Deserialize)]
///     pub enum AccountStatus: &'static str {
///         Active => ("ACTIVE", "Account can sign in"),
///         Locked => ("LOCKED", "Account is locked"),
///     }
/// }
///
/// assert_eq!(AccountStatus::Locked.value(), "LOCKED");
/// assert_eq!(AccountStatus::from_value("ACTIVE")?, AccountStatus::Active);
/// ```
///
/// The generated type also gets `variants()`, `from_value()` (unknown values
/// are a [`DomainError::Validation`](crate::DomainError::Validation)) and a
/// `Display` impl printing the description.
#[macro_export]
macro_rules! describable_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $value_ty:ty {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => ($value:expr, $description:expr)
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )+
        }

        impl $name {
            /// All variants, in declaration order.
            pub const fn variants() -> &'static [$name] {
                &[$($name::$variant),+]
            }

            /// Look up the variant carrying `value`.
            pub fn from_value<V>(value: V) -> $crate::DomainResult<Self>
            where
                $value_ty: PartialEq<V>,
                V: core::fmt::Debug,
            {
                Self::variants()
                    .iter()
                    .copied()
                    .find(|v| $crate::DescribableEnum::value(v) == value)
                    .ok_or_else(|| {
                        $crate::DomainError::validation(format!(
                            "unknown {} value: {:?}",
                            stringify!($name),
                            value
                        ))
                    })
            }
        }

        impl $crate::DescribableEnum for $name {
            type Value = $value_ty;

            fn value(&self) -> Self::Value {
                match self {
                    $($name::$variant => $value,)+
                }
            }

            fn description(&self) -> &'static str {
                match self {
                    $($name::$variant => $description,)+
                }
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str($crate::DescribableEnum::description(self))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{DescribableEnum, DomainError};

    describable_enum! {
        /// Publication state used only by these tests.
        pub enum DocState: &'static str {
            Draft => ("DRAFT", "Draft document"),
            Published => ("PUBLISHED", "Visible to readers"),
        }
    }

    describable_enum! {
        enum Priority: u8 {
            Low => (1, "Low priority"),
            High => (9, "High priority"),
        }
    }

    #[test]
    fn value_and_description_are_per_variant() {
        assert_eq!(DocState::Draft.value(), "DRAFT");
        assert_eq!(DocState::Published.description(), "Visible to readers");
        assert_eq!(Priority::High.value(), 9);
    }

    #[test]
    fn from_value_finds_variant() {
        assert_eq!(DocState::from_value("PUBLISHED").unwrap(), DocState::Published);
        let owned = String::from("DRAFT");
        assert_eq!(DocState::from_value(owned.as_str()).unwrap(), DocState::Draft);
        assert_eq!(Priority::from_value(1u8).unwrap(), Priority::Low);
    }

    #[test]
    fn from_value_rejects_unknown() {
        let err = DocState::from_value("ARCHIVED").unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("DocState")));
    }

    #[test]
    fn values_are_unique_within_type() {
        let mut values: Vec<_> = DocState::variants().iter().map(|v| v.value()).collect();
        values.sort();
        values.dedup();
        assert_eq!(values.len(), DocState::variants().len());
    }

    #[test]
    fn display_prints_description() {
        assert_eq!(Priority::Low.to_string(), "Low priority");
    }
}
