use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use super::handlers::*;
use super::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/user/create", post(create_user))
        // Question flow
        .route("/api/start", post(start_session))
        .route("/api/next-question", post(next_question))
        // Roadmap lifecycle
        .route("/api/generate-roadmap", post(generate_roadmap))
        .route("/api/save-roadmap", post(save_roadmap))
        .route("/api/roadmap/:name", get(get_roadmap))
        // Progress tracking
        .route("/api/update-task", patch(update_task))
        .route("/api/statistics/:name", get(get_statistics))
        .with_state(state);

    // The browser frontend is served from a different origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    app.layer(cors)
}
