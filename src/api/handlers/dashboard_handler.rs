//! Admin dashboard handlers.

use axum::{extract::State, response::Json, routing::get, Extension, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::errors::AppResult;
use crate::services::PlatformStats;

/// Stats envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct StatsResponse {
    pub stats: PlatformStats,
}

/// Create dashboard routes
pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/stats", get(stats))
}

/// Platform-wide counts for the admin dashboard
#[utoipa::path(
    get,
    path = "/dashboard/stats",
    tag = "Dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Platform statistics", body = StatsResponse),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn stats(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<StatsResponse>> {
    require_admin(&current_user)?;

    let stats = state.stats_service.platform_stats().await?;
    Ok(Json(StatsResponse { stats }))
}
