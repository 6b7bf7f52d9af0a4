//! Helper macros shared by the key modules

/// Declare a closed, densely indexed key set.
///
/// Generates the enum together with `ALL`, `COUNT`, `index()`, `name()` and a
/// `Display` impl. Variants are numbered from zero in declaration order, which
/// is what the memo bit-sets index by.
///
/// # Example
/// ```ignore
/// define_keys! {
///     pub enum Capability {
///         Compute,
///         MultiSample,
///     }
/// }
/// ```
#[macro_export]
macro_rules! define_keys {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )+
        }

        impl $name {
            /// Every key, in index order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Number of keys.
            pub const COUNT: usize = Self::ALL.len();

            /// Dense index of this key.
            pub const fn index(self) -> usize {
                self as usize
            }

            /// Variant name, used in reports and logs.
            pub const fn name(self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant),)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}
