/// Credential utilities: validity policies for usernames and passwords,
/// and Argon2id hashing/verification of passwords.
///
/// Hashing is deliberately CPU-expensive; callers on an async runtime
/// should wrap these in `spawn_blocking`.
pub mod password;
pub mod validate;
