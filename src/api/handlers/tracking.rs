//! Order tracking endpoints under `/api/track`.

use axum::{extract::State, http::StatusCode};
use std::sync::Arc;
use tracing::debug;

use crate::{
    api::{
        AppState,
        error::{AppJson, AppQuery},
        models::{AddTrackingRequest, TrackingHistoryResponse, TrackingQuery, TrackingResponse},
    },
    core::tracking,
    errors::{Error, Result},
};

/// `GET /api/track?orderId=` - public, no ownership check
pub async fn get_tracking(
    State(state): State<Arc<AppState>>,
    AppQuery(query): AppQuery<TrackingQuery>,
) -> Result<AppJson<TrackingHistoryResponse>> {
    let order_id = query
        .order_id
        .ok_or_else(|| Error::validation("OrderId diperlukan"))?;
    debug!("Tracking lookup for order {}", order_id);

    let history = tracking::get_tracking_history(&state.db, order_id).await?;
    Ok(AppJson(TrackingHistoryResponse {
        order: history.order,
        tracks: history.events,
    }))
}

/// `POST /api/track` (admin)
pub async fn add_tracking(
    State(state): State<Arc<AppState>>,
    AppJson(body): AppJson<AddTrackingRequest>,
) -> Result<(StatusCode, AppJson<TrackingResponse>)> {
    let (Some(order_id), Some(status)) = (body.order_id, body.status) else {
        return Err(Error::validation("Status track wajib diisi"));
    };

    let event = tracking::add_tracking(&state.db, order_id, status).await?;
    Ok((
        StatusCode::CREATED,
        AppJson(TrackingResponse {
            message: "Tracking ditambahkan".to_string(),
            tracking: event,
        }),
    ))
}
