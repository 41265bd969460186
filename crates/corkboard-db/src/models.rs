/// Database row types — these map directly to SQLite rows.
/// Distinct from the corkboard-types API models so the wire format can
/// stay free of the password column.

pub struct UserRow {
    pub id: String,
    pub username: String,
    pub password: String,
    pub created_at: String,
}

pub struct MessageRow {
    pub id: String,
    pub username: String,
    pub value: String,
    pub created_at: String,
}

/// Outcome of the atomic create-user insert. A taken username is an
/// expected result, not an error.
#[derive(Debug, PartialEq, Eq)]
pub enum CreateUserOutcome {
    Created,
    UsernameTaken,
}
