use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub name: String,
    pub name_key: String,
    pub career: String,
    pub level: String,
    pub created_at: DateTime<Utc>,
    pub last_login: DateTime<Utc>,
}

/// A stored roadmap document. The row id never leaves the server;
/// clients address roadmaps by user name.
#[derive(Debug, Clone, Serialize)]
pub struct RoadmapRecord {
    #[serde(skip_serializing)]
    pub roadmap_id: String,
    pub user_id: String,
    pub user_name: String,
    #[serde(skip_serializing)]
    pub name_key: String,
    pub roadmap: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SavedRoadmap {
    pub roadmap_id: String,
}

/// Progress aggregates, recomputed from the stored document on demand.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Statistics {
    pub total_tasks: u32,
    pub completed_tasks: u32,
    pub completion_percentage: f64,
    pub current_streak: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::High => "high",
            TaskPriority::Medium => "medium",
            TaskPriority::Low => "low",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "high" => Some(TaskPriority::High),
            "medium" => Some(TaskPriority::Medium),
            "low" => Some(TaskPriority::Low),
            _ => None,
        }
    }
}
