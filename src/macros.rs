//! Macros to reduce boilerplate in the codebase

/// Macro to generate label/slug accessors, Display and FromStr for closed enums
///
/// Each variant carries a machine slug (used on the command line and in config)
/// and a human label (shown in the form and sent on the wire). Parsing accepts
/// either, case-insensitively.
///
/// # Usage
///
/// ```rust,ignore
/// use crate::error::SupportError;
///
/// labeled_enum!(
///     MyEnum,
///     SupportError::Other,
///     {
///         Variant1 => ("variant-1", "Variant One"),
///         Variant2 => ("variant-2", "Variant Two"),
///     }
/// );
/// ```
#[macro_export]
macro_rules! labeled_enum {
    (
        $enum_name:ident,
        $error_variant:path,
        { $($variant:ident => ($slug:expr, $label:expr)),+ $(,)? }
    ) => {
        impl $enum_name {
            /// Every variant, in display order
            pub const ALL: &'static [$enum_name] = &[$($enum_name::$variant),+];

            /// Human-readable label
            pub fn label(&self) -> &'static str {
                match self {
                    $($enum_name::$variant => $label,)+
                }
            }

            /// Command-line friendly identifier
            pub fn slug(&self) -> &'static str {
                match self {
                    $($enum_name::$variant => $slug,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = $crate::error::SupportError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                let needle = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| {
                        v.slug().eq_ignore_ascii_case(needle)
                            || v.label().eq_ignore_ascii_case(needle)
                    })
                    .ok_or_else(|| $error_variant(s.to_string()))
            }
        }
    };
}
