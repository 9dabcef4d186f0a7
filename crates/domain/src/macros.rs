//! Macro for implementing Display and FromStr for tag enums
//!
//! Domain tags (clock event kinds, failure kinds, notification severities)
//! are written to storage and accepted from the CLI as lowercase strings.
//! This macro keeps the string form in one place per enum.
//!
//! # Example
//!
//! ```rust
//! use hoursguard_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum ShiftKind {
//!     Regular,
//!     Overtime,
//! }
//!
//! impl_domain_status_conversions!(ShiftKind {
//!     Regular => "regular",
//!     Overtime => "overtime",
//! });
//!
//! assert_eq!(ShiftKind::Overtime.to_string(), "overtime");
//! assert_eq!("REGULAR".parse::<ShiftKind>(), Ok(ShiftKind::Regular));
//! ```

/// Implements Display and FromStr traits for tag enums
///
/// - Display: writes the mapped lowercase string
/// - FromStr: case-insensitive parse, error names the enum
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl ::std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl ::std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
