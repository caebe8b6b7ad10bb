pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/industries", get(handlers::handle_list_industries))
        // Resume analysis
        .route("/api/v1/resumes", get(handlers::handle_list_resumes))
        .route("/api/v1/resumes/analyze", post(handlers::handle_analyze))
        .route(
            "/api/v1/resumes/:id",
            get(handlers::handle_get_resume)
                .patch(handlers::handle_update_resume)
                .delete(handlers::handle_delete_resume),
        )
        .route(
            "/api/v1/resumes/:id/optimize",
            post(handlers::handle_optimize),
        )
        .route("/api/v1/stats", get(handlers::handle_get_stats))
        .with_state(state)
}
