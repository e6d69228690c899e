use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use super::error::{ApiResult, AppError};
use super::state::AppState;
use super::types::*;
use crate::ai::prompts::{format_history, next_question_prompt, roadmap_prompt};
use crate::ai::{parse_question_flow, validate_roadmap_shape, FlowStatus, QuestionFlow};
use crate::db::{RoadmapRecord, Statistics};

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "Backend is running",
    })
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<Json<CreateUserResponse>> {
    if req.name.trim().is_empty() {
        return Err(AppError::validation("Name is required"));
    }

    let user = state.db.upsert_user(&req.name, &req.career, &req.level)?;

    Ok(Json(CreateUserResponse {
        success: true,
        user_id: user.user_id,
        name: user.name,
        career: user.career,
        level: user.level,
    }))
}

/// First question of the flow. Fixed server-side; the model only takes over
/// from the second question onwards.
pub async fn start_session(Json(req): Json<StartRequest>) -> Json<QuestionFlow> {
    Json(QuestionFlow {
        question: format!(
            "Great choice, {}! What is your current experience level in {}?",
            req.name, req.career
        ),
        options: vec![
            "Complete Beginner".to_string(),
            "Some Basic Knowledge".to_string(),
            "Intermediate Level".to_string(),
            "Advanced Looking to Specialize".to_string(),
        ],
        status: FlowStatus::Continue,
    })
}

pub async fn next_question(
    State(state): State<AppState>,
    Json(req): Json<NextQuestionRequest>,
) -> ApiResult<Json<QuestionFlow>> {
    if req.user_answer.trim().is_empty() {
        return Err(AppError::validation("user_answer is required"));
    }

    let history = format_history(&req.messages);
    let prompt = next_question_prompt(&history, &req.user_answer);
    let reply = state.ai.complete(&prompt).await?;

    let flow = parse_question_flow(&reply)?;
    Ok(Json(flow))
}

pub async fn generate_roadmap(
    State(state): State<AppState>,
    Json(req): Json<GenerateRoadmapRequest>,
) -> ApiResult<Json<Value>> {
    if req.messages.is_empty() {
        return Err(AppError::validation("No messages provided"));
    }

    let history = format_history(&req.messages);
    let prompt = roadmap_prompt(&history, chrono::Utc::now().date_naive());

    tracing::info!("Generating roadmap for {}", req.name);
    let mut roadmap = state.ai.complete(&prompt).await?;
    validate_roadmap_shape(&roadmap)?;

    if let Some(obj) = roadmap.as_object_mut() {
        obj.insert("user_name".to_string(), Value::String(req.name));
        obj.insert("career_path".to_string(), Value::String(req.career));
    }

    Ok(Json(roadmap))
}

pub async fn save_roadmap(
    State(state): State<AppState>,
    Json(req): Json<SaveRoadmapRequest>,
) -> ApiResult<Json<SaveRoadmapResponse>> {
    if req.name.trim().is_empty() {
        return Err(AppError::validation("Name is required"));
    }
    let is_empty = match &req.roadmap {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    };
    if is_empty {
        return Err(AppError::validation("Roadmap data is required"));
    }

    let saved = state.db.save_roadmap(&req.name, req.roadmap)?;

    Ok(Json(SaveRoadmapResponse {
        success: true,
        roadmap_id: saved.roadmap_id,
    }))
}

pub async fn get_roadmap(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<RoadmapRecord>> {
    let record = state
        .db
        .get_roadmap(&name)?
        .ok_or_else(|| AppError::not_found("Roadmap"))?;

    Ok(Json(record))
}

pub async fn update_task(
    State(state): State<AppState>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<UpdateTaskResponse>> {
    if req.name.trim().is_empty() {
        return Err(AppError::validation("Name is required"));
    }
    if req.date.is_empty() || req.task_id.is_empty() {
        return Err(AppError::validation("Date and task_id are required"));
    }

    let success = state
        .db
        .update_task_completion(&req.name, &req.date, &req.task_id, req.completed)?;

    Ok(Json(UpdateTaskResponse { success }))
}

pub async fn get_statistics(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<Statistics>> {
    let stats = state.db.get_statistics(&name)?;
    Ok(Json(stats))
}
