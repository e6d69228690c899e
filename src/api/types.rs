use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ai::prompts::QaPair;

// ===== User Types =====

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub career: String,
    #[serde(default)]
    pub level: String,
}

#[derive(Debug, Serialize)]
pub struct CreateUserResponse {
    pub success: bool,
    pub user_id: String,
    pub name: String,
    pub career: String,
    pub level: String,
}

// ===== Question Flow Types =====

#[derive(Debug, Deserialize)]
pub struct StartRequest {
    #[serde(default = "default_start_name")]
    pub name: String,
    #[serde(default)]
    pub career: String,
}

fn default_start_name() -> String {
    "there".to_string()
}

#[derive(Debug, Deserialize)]
pub struct NextQuestionRequest {
    #[serde(default)]
    pub messages: Vec<QaPair>,
    #[serde(default)]
    pub user_answer: String,
}

// ===== Roadmap Types =====

#[derive(Debug, Deserialize)]
pub struct GenerateRoadmapRequest {
    #[serde(default)]
    pub messages: Vec<QaPair>,
    #[serde(default = "default_user_name")]
    pub name: String,
    #[serde(default = "default_career_path")]
    pub career: String,
}

fn default_user_name() -> String {
    "User".to_string()
}

fn default_career_path() -> String {
    "your chosen path".to_string()
}

#[derive(Debug, Deserialize)]
pub struct SaveRoadmapRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub roadmap: Value,
}

#[derive(Debug, Serialize)]
pub struct SaveRoadmapResponse {
    pub success: bool,
    pub roadmap_id: String,
}

// ===== Task Update Types =====

#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub task_id: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Serialize)]
pub struct UpdateTaskResponse {
    pub success: bool,
}

// ===== Misc =====

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}
