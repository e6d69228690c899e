//! Roadmap document storage

use serde_json::Value;

use crate::db::{name_key, parse_datetime, Database, DbError};
use crate::db::models::{RoadmapRecord, SavedRoadmap};

/// Assign derived ids and a fresh completion flag to every task.
///
/// Ids are positional within a day (`"{date}_task_{index}"`), so they stay
/// stable across reads until the document is re-saved. Days missing a `date`
/// string or a `tasks` array are left untouched.
fn assign_task_ids(roadmap: &mut Value) {
    let Some(days) = roadmap.get_mut("daily_tasks").and_then(Value::as_array_mut) else {
        return;
    };

    for day in days {
        let Some(date) = day.get("date").and_then(Value::as_str).map(String::from) else {
            continue;
        };
        let Some(tasks) = day.get_mut("tasks").and_then(Value::as_array_mut) else {
            continue;
        };

        for (i, task) in tasks.iter_mut().enumerate() {
            if let Some(obj) = task.as_object_mut() {
                obj.insert("id".to_string(), Value::String(format!("{}_task_{}", date, i)));
                obj.insert("completed".to_string(), Value::Bool(false));
            }
        }
    }
}

impl Database {
    /// Save (or fully replace) the roadmap document for a user.
    ///
    /// The user must already exist. A re-save replaces the whole `roadmap`
    /// field, so completion flags from the previous document are lost;
    /// `created_at` and the row id are kept from the first insert.
    pub fn save_roadmap(&self, name: &str, mut roadmap: Value) -> Result<SavedRoadmap, DbError> {
        let key = name_key(name);

        self.with_conn(|conn| {
            let user = Self::query_user(conn, &key)?
                .ok_or_else(|| DbError::UserNotFound(name.trim().to_string()))?;

            assign_task_ids(&mut roadmap);

            let now = chrono::Utc::now().to_rfc3339();
            let roadmap_json = serde_json::to_string(&roadmap)
                .map_err(|e| DbError::Validation(format!("Roadmap is not serializable: {}", e)))?;

            conn.execute(
                r#"INSERT INTO roadmaps
                   (id, user_id, user_name, name_key, roadmap_json, created_at, updated_at)
                   VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
                   ON CONFLICT(name_key) DO UPDATE
                   SET user_id = excluded.user_id,
                       user_name = excluded.user_name,
                       roadmap_json = excluded.roadmap_json,
                       updated_at = excluded.updated_at"#,
                rusqlite::params![
                    uuid::Uuid::new_v4().to_string(),
                    user.user_id,
                    user.name,
                    key,
                    roadmap_json,
                    now,
                ],
            )?;

            let roadmap_id: String = conn.query_row(
                "SELECT id FROM roadmaps WHERE name_key = ?",
                [&key],
                |row| row.get(0),
            )?;

            tracing::debug!("Saved roadmap {} for user {}", roadmap_id, user.user_id);
            Ok(SavedRoadmap { roadmap_id })
        })
    }

    /// Fetch the stored roadmap document for a user, if any.
    pub fn get_roadmap(&self, name: &str) -> Result<Option<RoadmapRecord>, DbError> {
        let key = name_key(name);
        self.with_conn(|conn| Self::query_roadmap(conn, &key))
    }

    pub(crate) fn query_roadmap(
        conn: &rusqlite::Connection,
        key: &str,
    ) -> Result<Option<RoadmapRecord>, DbError> {
        let mut stmt = conn.prepare(
            r#"SELECT id, user_id, user_name, name_key, roadmap_json, created_at, updated_at
               FROM roadmaps WHERE name_key = ?"#,
        )?;

        let result = stmt.query_row([key], |row| {
            let roadmap_json: String = row.get(4)?;
            Ok(RoadmapRecord {
                roadmap_id: row.get(0)?,
                user_id: row.get(1)?,
                user_name: row.get(2)?,
                name_key: row.get(3)?,
                roadmap: serde_json::from_str(&roadmap_json)
                    .unwrap_or(Value::Object(serde_json::Map::new())),
                created_at: parse_datetime(row.get(5)?),
                updated_at: parse_datetime(row.get(6)?),
            })
        });

        match result {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DbError::Sqlite(e)),
        }
    }
}
