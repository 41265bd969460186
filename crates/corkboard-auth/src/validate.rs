//! Validity policies applied to credentials before any storage access.

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 32;
pub const PASSWORD_MIN_LEN: usize = 8;

/// A username is valid iff it is 3–32 characters of ASCII alphanumerics,
/// `_`, or `-`. The character policy means valid usernames never need
/// HTML escaping.
pub fn is_username_valid(input: &str) -> bool {
    let len = input.chars().count();
    (USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len)
        && input
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// A password is valid iff it is at least 8 bytes. No upper bound; the
/// hash output is fixed-size regardless.
pub fn is_password_valid(input: &str) -> bool {
    input.len() >= PASSWORD_MIN_LEN
}
