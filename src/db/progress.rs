//! Task completion updates and progress statistics

use chrono::NaiveDate;
use serde_json::Value;

use crate::db::{name_key, Database, DbError};
use crate::db::models::Statistics;

impl Database {
    /// Set the `completed` flag of one task, addressed by `(date, task_id)`.
    ///
    /// The match is scoped: the task id must be found inside the day entry
    /// whose `date` matches, so an id colliding across days cannot flip the
    /// wrong task. Returns `false` when nothing matched (unknown user, day,
    /// or task) -- a no-op, not an error.
    ///
    /// The read-modify-write runs under the connection mutex, so two racing
    /// updates for different tasks of the same document cannot lose writes.
    pub fn update_task_completion(
        &self,
        name: &str,
        date: &str,
        task_id: &str,
        completed: bool,
    ) -> Result<bool, DbError> {
        let key = name_key(name);

        self.with_conn(|conn| {
            let Some(mut record) = Self::query_roadmap(conn, &key)? else {
                return Ok(false);
            };

            if !set_task_completed(&mut record.roadmap, date, task_id, completed) {
                return Ok(false);
            }

            let roadmap_json = serde_json::to_string(&record.roadmap)
                .map_err(|e| DbError::Validation(format!("Roadmap is not serializable: {}", e)))?;

            conn.execute(
                "UPDATE roadmaps SET roadmap_json = ?, updated_at = ? WHERE name_key = ?",
                rusqlite::params![roadmap_json, chrono::Utc::now().to_rfc3339(), key],
            )?;

            tracing::debug!("Task {} on {} set completed={}", task_id, date, completed);
            Ok(true)
        })
    }

    /// Recompute progress aggregates from the stored document.
    ///
    /// A user without a roadmap gets the all-zero result rather than an
    /// error; absence is normal on the read path.
    pub fn get_statistics(&self, name: &str) -> Result<Statistics, DbError> {
        let record = self.get_roadmap(name)?;

        let Some(record) = record else {
            return Ok(Statistics::default());
        };

        let (total, completed) = count_tasks(&record.roadmap);
        let completion_percentage = if total > 0 {
            ((completed as f64 / total as f64) * 1000.0).round() / 10.0
        } else {
            0.0
        };

        Ok(Statistics {
            total_tasks: total,
            completed_tasks: completed,
            completion_percentage,
            current_streak: compute_streak(&record.roadmap, chrono::Utc::now().date_naive()),
        })
    }
}

fn set_task_completed(roadmap: &mut Value, date: &str, task_id: &str, completed: bool) -> bool {
    let Some(days) = roadmap.get_mut("daily_tasks").and_then(Value::as_array_mut) else {
        return false;
    };

    for day in days {
        if day.get("date").and_then(Value::as_str) != Some(date) {
            continue;
        }
        let Some(tasks) = day.get_mut("tasks").and_then(Value::as_array_mut) else {
            continue;
        };
        for task in tasks {
            if task.get("id").and_then(Value::as_str) == Some(task_id) {
                if let Some(obj) = task.as_object_mut() {
                    obj.insert("completed".to_string(), Value::Bool(completed));
                    return true;
                }
            }
        }
    }

    false
}

fn count_tasks(roadmap: &Value) -> (u32, u32) {
    let mut total = 0;
    let mut completed = 0;

    if let Some(days) = roadmap.get("daily_tasks").and_then(Value::as_array) {
        for day in days {
            if let Some(tasks) = day.get("tasks").and_then(Value::as_array) {
                for task in tasks {
                    total += 1;
                    if task.get("completed").and_then(Value::as_bool).unwrap_or(false) {
                        completed += 1;
                    }
                }
            }
        }
    }

    (total, completed)
}

/// Consecutive fully-completed days, walking backwards from the most recent
/// day that is not in the future. Days without tasks neither extend nor break
/// the streak.
fn compute_streak(roadmap: &Value, today: NaiveDate) -> u32 {
    let Some(days) = roadmap.get("daily_tasks").and_then(Value::as_array) else {
        return 0;
    };

    let mut streak = 0;
    for day in days.iter().rev() {
        let Some(date) = day
            .get("date")
            .and_then(Value::as_str)
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        else {
            continue;
        };
        if date > today {
            continue;
        }

        let tasks = day.get("tasks").and_then(Value::as_array);
        let Some(tasks) = tasks.filter(|t| !t.is_empty()) else {
            continue;
        };

        let all_done = tasks
            .iter()
            .all(|t| t.get("completed").and_then(Value::as_bool).unwrap_or(false));
        if all_done {
            streak += 1;
        } else {
            break;
        }
    }

    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_test_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn day(date: &str, titles: &[&str]) -> Value {
        json!({
            "date": date,
            "day_name": "Day",
            "tasks": titles.iter().map(|t| json!({
                "title": t,
                "description": "desc",
                "duration": "1 hour",
                "priority": "medium"
            })).collect::<Vec<_>>()
        })
    }

    fn setup_with_roadmap(db: &Database, days: Vec<Value>) {
        db.upsert_user("Ann", "web", "beginner").unwrap();
        db.save_roadmap("Ann", json!({"daily_tasks": days})).unwrap();
    }

    #[test]
    fn update_flips_exactly_one_task() {
        let db = create_test_db();
        setup_with_roadmap(
            &db,
            vec![day("2026-02-04", &["a", "b"]), day("2026-02-05", &["c"])],
        );

        let matched = db
            .update_task_completion("ann", "2026-02-04", "2026-02-04_task_0", true)
            .unwrap();
        assert!(matched);

        let record = db.get_roadmap("Ann").unwrap().unwrap();
        let days = record.roadmap["daily_tasks"].as_array().unwrap();
        assert_eq!(days[0]["tasks"][0]["completed"], true);
        assert_eq!(days[0]["tasks"][1]["completed"], false);
        assert_eq!(days[1]["tasks"][0]["completed"], false);
    }

    #[test]
    fn update_unknown_task_is_noop() {
        let db = create_test_db();
        setup_with_roadmap(&db, vec![day("2026-02-04", &["a"])]);

        let matched = db
            .update_task_completion("Ann", "2026-02-04", "2026-02-04_task_9", true)
            .unwrap();
        assert!(!matched);

        let matched = db
            .update_task_completion("Ann", "2026-02-09", "2026-02-04_task_0", true)
            .unwrap();
        assert!(!matched);
    }

    #[test]
    fn update_requires_date_and_id_in_same_day() {
        let db = create_test_db();
        setup_with_roadmap(&db, vec![day("2026-02-04", &["a"]), day("2026-02-05", &["b"])]);

        // Valid task id, but scoped to the wrong day entry
        let matched = db
            .update_task_completion("Ann", "2026-02-05", "2026-02-04_task_0", true)
            .unwrap();
        assert!(!matched);
    }

    #[test]
    fn update_without_roadmap_is_noop() {
        let db = create_test_db();
        let matched = db
            .update_task_completion("ghost", "2026-02-04", "2026-02-04_task_0", true)
            .unwrap();
        assert!(!matched);
    }

    #[test]
    fn update_can_clear_completion() {
        let db = create_test_db();
        setup_with_roadmap(&db, vec![day("2026-02-04", &["a"])]);

        db.update_task_completion("Ann", "2026-02-04", "2026-02-04_task_0", true)
            .unwrap();
        db.update_task_completion("Ann", "2026-02-04", "2026-02-04_task_0", false)
            .unwrap();

        let record = db.get_roadmap("Ann").unwrap().unwrap();
        assert_eq!(record.roadmap["daily_tasks"][0]["tasks"][0]["completed"], false);
    }

    #[test]
    fn statistics_counts_and_rounds() {
        let db = create_test_db();
        let days: Vec<Value> = (0..5)
            .map(|i| day(&format!("2026-02-{:02}", i + 4), &["a", "b"]))
            .collect();
        setup_with_roadmap(&db, days);

        for (date, id) in [
            ("2026-02-04", "2026-02-04_task_0"),
            ("2026-02-04", "2026-02-04_task_1"),
            ("2026-02-05", "2026-02-05_task_0"),
        ] {
            assert!(db.update_task_completion("Ann", date, id, true).unwrap());
        }

        let stats = db.get_statistics("Ann").unwrap();
        assert_eq!(stats.total_tasks, 10);
        assert_eq!(stats.completed_tasks, 3);
        assert_eq!(stats.completion_percentage, 30.0);
    }

    #[test]
    fn statistics_without_roadmap_are_zeroed() {
        let db = create_test_db();

        let stats = db.get_statistics("nobody").unwrap();
        assert_eq!(stats, Statistics::default());
    }

    #[test]
    fn statistics_with_empty_document_are_zeroed() {
        let db = create_test_db();
        setup_with_roadmap(&db, vec![]);

        let stats = db.get_statistics("Ann").unwrap();
        assert_eq!(stats.total_tasks, 0);
        assert_eq!(stats.completion_percentage, 0.0);
    }

    mod streak_tests {
        use super::*;

        fn done_day(date: &str) -> Value {
            let mut d = day(date, &["a"]);
            d["tasks"][0]["completed"] = json!(true);
            d
        }

        #[test]
        fn counts_trailing_completed_days() {
            let roadmap = json!({"daily_tasks": [
                day("2026-02-01", &["a"]),
                done_day("2026-02-02"),
                done_day("2026-02-03"),
            ]});
            let today = NaiveDate::from_ymd_opt(2026, 2, 3).unwrap();
            assert_eq!(compute_streak(&roadmap, today), 2);
        }

        #[test]
        fn incomplete_day_ends_streak() {
            let roadmap = json!({"daily_tasks": [
                done_day("2026-02-01"),
                day("2026-02-02", &["a"]),
                done_day("2026-02-03"),
            ]});
            let today = NaiveDate::from_ymd_opt(2026, 2, 3).unwrap();
            assert_eq!(compute_streak(&roadmap, today), 1);
        }

        #[test]
        fn future_days_are_ignored() {
            let roadmap = json!({"daily_tasks": [
                done_day("2026-02-01"),
                day("2026-02-02", &["a"]),
            ]});
            let today = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
            assert_eq!(compute_streak(&roadmap, today), 1);
        }

        #[test]
        fn empty_days_do_not_break_streak() {
            let roadmap = json!({"daily_tasks": [
                done_day("2026-02-01"),
                {"date": "2026-02-02", "day_name": "Rest", "tasks": []},
                done_day("2026-02-03"),
            ]});
            let today = NaiveDate::from_ymd_opt(2026, 2, 3).unwrap();
            assert_eq!(compute_streak(&roadmap, today), 2);
        }

        #[test]
        fn no_completed_days_is_zero() {
            let roadmap = json!({"daily_tasks": [day("2026-02-01", &["a"])]});
            let today = NaiveDate::from_ymd_opt(2026, 2, 3).unwrap();
            assert_eq!(compute_streak(&roadmap, today), 0);
        }
    }
}
