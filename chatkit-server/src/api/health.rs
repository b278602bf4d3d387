use axum::{extract::State, response::Json};
use chatkit_types::HealthReport;

use crate::state::AppState;

/// Reports which optional collaborators were configured at startup.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthReport> {
    Json(state.health_report())
}
