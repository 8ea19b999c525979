//! Package catalog endpoints.

use axum::{extract::State, http::StatusCode};
use std::sync::Arc;
use tracing::debug;

use crate::{
    api::{
        AppState,
        error::{AppJson, AppPath},
        models::{CreatePackageRequest, MessageResponse, PackageList},
    },
    core::package,
    entities::PackageModel,
    errors::{Error, Result},
};

/// `GET /api/packages` and `GET /api/admin/packages`
pub async fn list_packages(State(state): State<Arc<AppState>>) -> Result<AppJson<PackageList>> {
    debug!("Listing packages");
    let packages = package::get_all_packages(&state.db).await?;
    Ok(AppJson(packages))
}

/// `POST /api/packages` and `POST /api/admin/packages` (admin)
pub async fn create_package(
    State(state): State<Arc<AppState>>,
    AppJson(body): AppJson<CreatePackageRequest>,
) -> Result<(StatusCode, AppJson<PackageModel>)> {
    let (Some(service_type), Some(price)) = (body.service_type, body.price) else {
        return Err(Error::validation("Data tidak lengkap"));
    };

    let created = package::create_package(&state.db, body.label, service_type, price).await?;
    Ok((StatusCode::CREATED, AppJson(created)))
}

/// `DELETE /api/admin/packages/{id}` (admin)
pub async fn delete_package(
    State(state): State<Arc<AppState>>,
    AppPath(id): AppPath<i64>,
) -> Result<AppJson<MessageResponse>> {
    package::delete_package(&state.db, id).await?;
    Ok(AppJson(MessageResponse::new("Paket dihapus")))
}
