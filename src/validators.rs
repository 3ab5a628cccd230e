//! Raw string validators
//!
//! These checks are deliberately permissive and match the documented
//! behavior of the callers that depend on them. The weak spots are called
//! out on each function rather than silently preserved; none of these is a
//! substitute for real input hardening.

use crate::error::{StashError, StashResult};

/// Check that `email` looks like an email address.
///
/// True iff the string contains at least one `@`. There is no domain or
/// structural check, so `"@"` alone passes. Known weak validator.
pub fn validate_email(email: &str) -> bool {
    email.contains('@')
}

/// Parse `age` as a signed integer.
///
/// Surrounding whitespace is ignored. Negative and arbitrarily large values
/// (within `i64`) are accepted; there is no range clamp. Fails with
/// [`StashError::InvalidAge`] on non-numeric input.
pub fn validate_age(age: &str) -> StashResult<i64> {
    age.trim()
        .parse::<i64>()
        .map_err(|source| StashError::InvalidAge {
            input: age.to_string(),
            source,
        })
}

/// Pass `user_input` through unchanged.
///
/// WARNING: this performs no escaping or stripping of markup. It only marks
/// the call sites where sanitization belongs; rendering its output as HTML
/// is unsafe until a real sanitizer is wired in.
pub fn sanitize_html(user_input: &str) -> String {
    user_input.to_string()
}

/// Check that `password` is acceptable.
///
/// True iff the string is non-empty. No length, character-class, or
/// dictionary checks. Known weak validator.
pub fn check_password(password: &str) -> bool {
    !password.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email_accepts_at_sign() {
        assert!(validate_email("a@b.com"));
        assert!(validate_email("@"));
    }

    #[test]
    fn test_validate_email_rejects_plain_text() {
        assert!(!validate_email("abc"));
        assert!(!validate_email(""));
    }

    #[test]
    fn test_validate_age_parses_integers() {
        assert_eq!(validate_age("25").unwrap(), 25);
        assert_eq!(validate_age("-5").unwrap(), -5);
        assert_eq!(validate_age(" 42 ").unwrap(), 42);
    }

    #[test]
    fn test_validate_age_rejects_non_numeric() {
        let err = validate_age("abc").unwrap_err();
        match err {
            StashError::InvalidAge { input, .. } => assert_eq!(input, "abc"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_sanitize_html_is_passthrough() {
        assert_eq!(sanitize_html("<script>x</script>"), "<script>x</script>");
        assert_eq!(sanitize_html("plain"), "plain");
    }

    #[test]
    fn test_check_password_rejects_empty_only() {
        assert!(!check_password(""));
        assert!(check_password("a"));
    }
}
