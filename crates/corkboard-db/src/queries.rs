use crate::Database;
use crate::models::{CreateUserOutcome, MessageRow, UserRow};
use anyhow::Result;
use rusqlite::Connection;

impl Database {
    // -- Users --

    /// Atomic compare-and-insert: the UNIQUE constraint on `username` is
    /// the uniqueness check, so two concurrent signups for the same name
    /// cannot both succeed.
    pub fn create_user(
        &self,
        id: &str,
        username: &str,
        password_hash: &str,
    ) -> Result<CreateUserOutcome> {
        self.with_conn(|conn| {
            let inserted = conn.execute(
                "INSERT OR IGNORE INTO users (id, username, password) VALUES (?1, ?2, ?3)",
                (id, username, password_hash),
            )?;
            if inserted == 1 {
                Ok(CreateUserOutcome::Created)
            } else {
                Ok(CreateUserOutcome::UsernameTaken)
            }
        })
    }

    /// `Ok(None)` means the user does not exist — the expected miss.
    /// `Err` means the stored row is unreadable, which callers must treat
    /// as a hard failure rather than an absent user.
    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_username(conn, username))
    }

    // -- Messages --

    pub fn insert_message(&self, id: &str, username: &str, value: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO messages (id, username, value) VALUES (?1, ?2, ?3)",
                (id, username, value),
            )?;
            Ok(())
        })
    }

    /// Full snapshot in creation order, oldest first. rowid breaks ties
    /// between rows created within the same second.
    pub fn get_messages(&self) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, username, value, created_at FROM messages
                 ORDER BY created_at ASC, rowid ASC",
            )?;

            let rows = stmt
                .query_map([], |row| {
                    Ok(MessageRow {
                        id: row.get(0)?,
                        username: row.get(1)?,
                        value: row.get(2)?,
                        created_at: row.get(3)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    pub fn get_message(&self, id: &str) -> Result<Option<MessageRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare("SELECT id, username, value, created_at FROM messages WHERE id = ?1")?;

            let row = stmt
                .query_row([id], |row| {
                    Ok(MessageRow {
                        id: row.get(0)?,
                        username: row.get(1)?,
                        value: row.get(2)?,
                        created_at: row.get(3)?,
                    })
                })
                .optional()?;

            Ok(row)
        })
    }

    /// Delete the message matching `id` AND `username` in one statement,
    /// so the owner guard cannot race with the row lookup. `Ok(false)`
    /// means nothing matched.
    pub fn delete_message(&self, id: &str, username: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let deleted = conn.execute(
                "DELETE FROM messages WHERE id = ?1 AND username = ?2",
                (id, username),
            )?;
            Ok(deleted == 1)
        })
    }
}

fn query_user_by_username(conn: &Connection, username: &str) -> Result<Option<UserRow>> {
    let mut stmt =
        conn.prepare("SELECT id, username, password, created_at FROM users WHERE username = ?1")?;

    let row = stmt
        .query_row([username], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                username: row.get(1)?,
                password: row.get(2)?,
                created_at: row.get(3)?,
            })
        })
        .optional()?;

    Ok(row)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_test_db() -> (Database, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(&dir.path().join("test.db")).unwrap();
        (db, dir)
    }

    #[test]
    fn user_lookup_miss_is_none() {
        let (db, _dir) = open_test_db();
        assert!(db.get_user_by_username("nobody").unwrap().is_none());
    }

    #[test]
    fn create_user_then_fetch() {
        let (db, _dir) = open_test_db();
        let outcome = db.create_user("u1", "alice", "$argon2id$fake").unwrap();
        assert_eq!(outcome, CreateUserOutcome::Created);

        let user = db.get_user_by_username("alice").unwrap().unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(user.password, "$argon2id$fake");
        assert!(!user.created_at.is_empty());
    }

    #[test]
    fn duplicate_username_is_rejected_without_overwrite() {
        let (db, _dir) = open_test_db();
        db.create_user("u1", "alice", "hash-one").unwrap();

        let outcome = db.create_user("u2", "alice", "hash-two").unwrap();
        assert_eq!(outcome, CreateUserOutcome::UsernameTaken);

        let user = db.get_user_by_username("alice").unwrap().unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(user.password, "hash-one");
    }

    #[test]
    fn corrupt_user_row_is_an_error_not_a_miss() {
        let (db, _dir) = open_test_db();
        // A password column holding an integer is unreadable as TEXT.
        db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (id, username, password) VALUES ('u1', 'mallory', 42)",
                [],
            )?;
            Ok(())
        })
        .unwrap();

        assert!(db.get_user_by_username("mallory").is_err());
        assert!(db.get_user_by_username("nobody").unwrap().is_none());
    }

    #[test]
    fn messages_come_back_in_creation_order() {
        let (db, _dir) = open_test_db();
        db.insert_message("m1", "alice", "first").unwrap();
        db.insert_message("m2", "bob", "second").unwrap();
        db.insert_message("m3", "alice", "third").unwrap();

        let rows = db.get_messages().unwrap();
        let values: Vec<&str> = rows.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, vec!["first", "second", "third"]);
    }

    #[test]
    fn delete_requires_matching_owner() {
        let (db, _dir) = open_test_db();
        db.insert_message("m1", "alice", "hers").unwrap();

        assert!(!db.delete_message("m1", "bob").unwrap());
        assert_eq!(db.get_messages().unwrap().len(), 1);

        assert!(db.delete_message("m1", "alice").unwrap());
        assert!(db.get_messages().unwrap().is_empty());
    }

    #[test]
    fn delete_unknown_key_is_false() {
        let (db, _dir) = open_test_db();
        assert!(!db.delete_message("missing", "alice").unwrap());
    }

    #[test]
    fn get_message_by_key() {
        let (db, _dir) = open_test_db();
        db.insert_message("m1", "alice", "hello").unwrap();

        let row = db.get_message("m1").unwrap().unwrap();
        assert_eq!(row.username, "alice");
        assert_eq!(row.value, "hello");
        assert!(db.get_message("m2").unwrap().is_none());
    }
}
