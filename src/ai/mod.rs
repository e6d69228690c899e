pub mod client;
pub mod prompts;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use client::CompletionClient;

use crate::db::models::TaskPriority;

#[derive(Error, Debug)]
pub enum AiError {
    #[error("failed to initialize completion client: {0}")]
    Init(String),

    #[error("completion request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("completion API returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("completion reply carried no content")]
    MissingContent,

    #[error("model output is not valid JSON: {0}")]
    MalformedOutput(#[from] serde_json::Error),

    #[error("model output did not match the requested shape: {0}")]
    UnexpectedShape(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FlowStatus {
    Continue,
    Finish,
}

/// One step of the question flow, as requested from the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionFlow {
    pub question: String,
    pub options: Vec<String>,
    pub status: FlowStatus,
}

/// Number of answer options every question must carry.
pub const OPTION_COUNT: usize = 4;

/// Deserialize and sanity-check a next-question reply.
///
/// The gateway itself passes model output through unvalidated; callers go
/// through here before trusting it.
pub fn parse_question_flow(value: &Value) -> Result<QuestionFlow, AiError> {
    let flow: QuestionFlow = serde_json::from_value(value.clone())?;

    if flow.options.len() != OPTION_COUNT {
        return Err(AiError::UnexpectedShape(format!(
            "expected {} options, got {}",
            OPTION_COUNT,
            flow.options.len()
        )));
    }
    if flow.question.trim().is_empty() {
        return Err(AiError::UnexpectedShape("question is empty".to_string()));
    }

    Ok(flow)
}

/// Sanity-check a generated roadmap before handing it to clients.
///
/// Only the fields the rest of the system depends on are enforced; extra
/// fields the model adds are allowed through untouched.
pub fn validate_roadmap_shape(value: &Value) -> Result<(), AiError> {
    let Some(root) = value.as_object() else {
        return Err(AiError::UnexpectedShape("roadmap is not a JSON object".to_string()));
    };

    let days = root
        .get("daily_tasks")
        .and_then(Value::as_array)
        .filter(|d| !d.is_empty())
        .ok_or_else(|| {
            AiError::UnexpectedShape("daily_tasks is missing or empty".to_string())
        })?;

    for (i, d) in days.iter().enumerate() {
        let date = d.get("date").and_then(Value::as_str);
        if date.is_none() {
            return Err(AiError::UnexpectedShape(format!("day {} has no date", i)));
        }
        let tasks = d
            .get("tasks")
            .and_then(Value::as_array)
            .ok_or_else(|| AiError::UnexpectedShape(format!("day {} has no tasks", i)))?;

        for (j, task) in tasks.iter().enumerate() {
            for field in ["title", "description", "duration"] {
                if task.get(field).and_then(Value::as_str).is_none() {
                    return Err(AiError::UnexpectedShape(format!(
                        "task {} of day {} is missing {}",
                        j, i, field
                    )));
                }
            }
            let priority = task.get("priority").and_then(Value::as_str).unwrap_or("");
            if TaskPriority::parse(priority).is_none() {
                return Err(AiError::UnexpectedShape(format!(
                    "task {} of day {} has invalid priority '{}'",
                    j, i, priority
                )));
            }
        }
    }

    Ok(())
}
