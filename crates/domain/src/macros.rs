//! Macro for implementing Display and FromStr for closed string enums
//!
//! Region and environment selectors arrive as free text from configuration
//! files and environment variables. This macro gives them one case-insensitive
//! parser and one canonical lowercase spelling.
//!
//! # Example
//!
//! ```rust
//! use spgate_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Stage {
//!     Draft,
//!     Live,
//! }
//!
//! impl_domain_status_conversions!(Stage {
//!     Draft => "draft",
//!     Live => "live",
//! });
//!
//! assert_eq!("LIVE".parse::<Stage>().unwrap(), Stage::Live);
//! ```

/// Implements Display and FromStr traits for closed string enums
///
/// This macro generates:
/// - Display trait: converts enum variants to lowercase strings
/// - FromStr trait: parses case-insensitive, whitespace-trimmed strings
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their string
///   representations
///
/// # Features
///
/// - Case-insensitive parsing (e.g., "PENDING", "pending", "Pending" all work)
/// - Consistent lowercase string output
/// - Descriptive error messages with enum name
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => write!(f, $str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Zone {
        North,
        South,
    }

    impl_domain_status_conversions!(Zone {
        North => "north",
        South => "south",
    });

    #[test]
    fn test_display_is_lowercase() {
        assert_eq!(Zone::North.to_string(), "north");
        assert_eq!(Zone::South.to_string(), "south");
    }

    #[test]
    fn test_fromstr_ignores_case_and_padding() {
        assert_eq!(Zone::from_str("NORTH").unwrap(), Zone::North);
        assert_eq!(Zone::from_str(" South ").unwrap(), Zone::South);
    }

    #[test]
    fn test_fromstr_rejects_unknown() {
        let err = Zone::from_str("east").unwrap_err();
        assert!(err.contains("Invalid Zone: east"));
        assert!(Zone::from_str("").is_err());
    }
}
