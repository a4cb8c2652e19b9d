use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use simulation::DancePreferences;
use tracing::error;

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /dance-preferences`
pub async fn get_dance_preferences(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DancePreferences>, ApiError> {
    let Some(store) = &state.store else {
        error!("Error fetching dance preferences: no database configured");
        return Err(ApiError::Preferences);
    };

    let usage = store.style_usage().await.map_err(|e| {
        error!("Error fetching dance preferences: {}", e);
        ApiError::Preferences
    })?;

    Ok(Json(DancePreferences::from_usage(usage)))
}
