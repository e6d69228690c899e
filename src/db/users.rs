//! User identity operations

use crate::db::{name_key, parse_datetime, Database, DbError};
use crate::db::models::User;

impl Database {
    /// Create a user, or refresh an existing one matched by normalized name.
    ///
    /// Re-entry under the same name overwrites `career`/`level` and bumps
    /// `last_login`; `user_id` and `created_at` survive from the first visit.
    pub fn upsert_user(&self, name: &str, career: &str, level: &str) -> Result<User, DbError> {
        let key = name_key(name);

        self.with_conn(|conn| {
            let now = chrono::Utc::now();
            let existing = Self::query_user(conn, &key)?;

            match existing {
                Some(user) => {
                    conn.execute(
                        "UPDATE users SET career = ?, level = ?, last_login = ? WHERE name_key = ?",
                        rusqlite::params![career, level, now.to_rfc3339(), key],
                    )?;

                    Ok(User {
                        career: career.to_string(),
                        level: level.to_string(),
                        last_login: now,
                        ..user
                    })
                }
                None => {
                    let user_id = uuid::Uuid::new_v4().to_string();
                    conn.execute(
                        r#"INSERT INTO users
                           (user_id, name, name_key, career, level, created_at, last_login)
                           VALUES (?, ?, ?, ?, ?, ?, ?)"#,
                        rusqlite::params![
                            user_id,
                            name.trim(),
                            key,
                            career,
                            level,
                            now.to_rfc3339(),
                            now.to_rfc3339(),
                        ],
                    )?;

                    Ok(User {
                        user_id,
                        name: name.trim().to_string(),
                        name_key: key,
                        career: career.to_string(),
                        level: level.to_string(),
                        created_at: now,
                        last_login: now,
                    })
                }
            }
        })
    }

    /// Look up a user by display name (normalized internally).
    pub fn get_user(&self, name: &str) -> Result<Option<User>, DbError> {
        let key = name_key(name);
        self.with_conn(|conn| Self::query_user(conn, &key))
    }

    pub(crate) fn query_user(conn: &rusqlite::Connection, key: &str) -> Result<Option<User>, DbError> {
        let mut stmt = conn.prepare(
            r#"SELECT user_id, name, name_key, career, level, created_at, last_login
               FROM users WHERE name_key = ?"#,
        )?;

        let result = stmt.query_row([key], |row| {
            Ok(User {
                user_id: row.get(0)?,
                name: row.get(1)?,
                name_key: row.get(2)?,
                career: row.get(3)?,
                level: row.get(4)?,
                created_at: parse_datetime(row.get(5)?),
                last_login: parse_datetime(row.get(6)?),
            })
        });

        match result {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DbError::Sqlite(e)),
        }
    }
}
