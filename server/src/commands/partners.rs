use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use simulation::{calculate_average_partners, DanceParticipants};
use tracing::info;

use crate::error::ApiError;
use crate::state::{AppState, PartnersResponse};

/// `POST /calculate-partners`
pub async fn calculate_partners(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DanceParticipants>, JsonRejection>,
) -> Result<Json<PartnersResponse>, ApiError> {
    let Json(participants) = payload?;
    info!(
        leaders = participants.total_leaders,
        followers = participants.total_followers,
        minutes = participants.dance_duration_minutes,
        "Calculating dance partners"
    );

    let mut rng = state.rng();
    let outcome = calculate_average_partners(&participants, &mut rng, state.sink()).await;

    Ok(Json(PartnersResponse::from(outcome.average_partners())))
}
