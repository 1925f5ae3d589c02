#![forbid(unsafe_code)]

// ***************************************************************************
//                                Constants
// ***************************************************************************
// Substituted whenever the caller supplies no usable name.
pub const DEFAULT_NAME : &str = "World";

// ***************************************************************************
//                             Public Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// normalize:
// ---------------------------------------------------------------------------
/** Trim leading and trailing whitespace from the name.  An absent, empty or
 * whitespace-only name is replaced with DEFAULT_NAME.  Whitespace is the
 * Unicode White_Space set, so NBSP trims but control characters don't.
 */
pub fn normalize(name: Option<&str>) -> &str {
    match name.map(str::trim) {
        Some(n) if !n.is_empty() => n,
        _ => DEFAULT_NAME,
    }
}

// ---------------------------------------------------------------------------
// greet:
// ---------------------------------------------------------------------------
/** Format the greeting for the normalized name. */
pub fn greet(name: Option<&str>) -> String {
    format!("Hello, {}!", normalize(name))
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn greet_defaults_to_world_when_blank() {
        assert_eq!(greet(None), "Hello, World!");
        assert_eq!(greet(Some("")), "Hello, World!");
        assert_eq!(greet(Some("   ")), "Hello, World!");
        assert_eq!(greet(Some("\t\n ")), "Hello, World!");
    }

    #[test]
    fn greet_trims_and_inserts_name() {
        assert_eq!(greet(Some(" Alice ")), "Hello, Alice!");
        assert_eq!(greet(Some("Bob")), "Hello, Bob!");
    }

    #[test]
    fn normalize_keeps_inner_whitespace() {
        assert_eq!(normalize(Some("  Mary Ann ")), "Mary Ann");
    }

    #[test]
    fn normalize_trims_unicode_whitespace_only() {
        assert_eq!(normalize(Some("\u{a0}\u{2003}")), DEFAULT_NAME);
        assert_eq!(normalize(Some("\u{a0}Zoë\u{3000}")), "Zoë");
        assert_eq!(normalize(Some("\u{1}")), "\u{1}");
        assert_eq!(greet(Some(" \u{1} ")), "Hello, \u{1}!");
    }

    proptest! {
        #[test]
        fn blank_names_greet_the_world(s in "[ \t\r\n]*") {
            prop_assert_eq!(greet(Some(&s)), "Hello, World!");
        }

        #[test]
        fn non_blank_names_are_trimmed(s in ".*[^ \t\r\n].*") {
            prop_assume!(!s.trim().is_empty());
            prop_assert_eq!(greet(Some(&s)), format!("Hello, {}!", s.trim()));
        }

        #[test]
        fn message_is_never_empty(s in proptest::option::of(".*")) {
            prop_assert!(!normalize(s.as_deref()).is_empty());
        }
    }
}
