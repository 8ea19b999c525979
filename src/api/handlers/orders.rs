//! Customer order endpoints under `/api/order`.
//!
//! Admins may call these too; the core functions decide what each role can do.

use axum::{Extension, extract::State, http::StatusCode};
use std::sync::Arc;
use tracing::debug;

use crate::{
    api::{
        AppState,
        error::{AppJson, AppPath},
        models::{CreateOrderRequest, MessageResponse, OrderList, OrderResponse, UpdateOrderRequest},
    },
    auth::Identity,
    core::order::{self, NewOrder, OrderEdit},
    errors::{Error, Result},
};

/// `GET /api/order` - own orders for customers, every order for admins
pub async fn list_orders(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> Result<AppJson<OrderList>> {
    debug!("Listing orders for {:?}", identity);

    let orders = if identity.is_admin() {
        order::get_all_orders(&state.db)
            .await?
            .into_iter()
            .map(|(order, _)| order)
            .collect()
    } else {
        order::get_orders_for_user(&state.db, identity.id).await?
    };

    Ok(AppJson(OrderList { orders }))
}

/// `POST /api/order`
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    AppJson(body): AppJson<CreateOrderRequest>,
) -> Result<(StatusCode, AppJson<OrderResponse>)> {
    let (Some(package_id), Some(weight)) = (body.package_id, body.weight) else {
        return Err(Error::validation("Data wajib belum lengkap"));
    };

    let created = order::create_order(
        &state.db,
        &identity,
        NewOrder {
            name: body.name,
            phone: body.phone,
            address: body.address,
            package_id,
            weight,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        AppJson(OrderResponse {
            message: Some("Order dibuat".to_string()),
            order: created,
        }),
    ))
}

/// `GET /api/order/{id}` - owner or admin
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    AppPath(id): AppPath<i64>,
) -> Result<AppJson<OrderResponse>> {
    let order = order::get_order_for(&state.db, &identity, id).await?;
    Ok(AppJson(OrderResponse {
        message: None,
        order,
    }))
}

/// `PUT /api/order/{id}`
pub async fn update_order(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    AppPath(id): AppPath<i64>,
    AppJson(body): AppJson<UpdateOrderRequest>,
) -> Result<AppJson<OrderResponse>> {
    debug!("Updating order {} for {:?}", id, identity);

    let updated = order::update_order(
        &state.db,
        &identity,
        id,
        OrderEdit {
            name: body.name,
            phone: body.phone,
            address: body.address,
            weight: body.weight,
            package_id: body.package_id,
        },
    )
    .await?;

    Ok(AppJson(OrderResponse {
        message: Some("Order diperbarui".to_string()),
        order: updated,
    }))
}

/// `DELETE /api/order/{id}`
pub async fn delete_order(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    AppPath(id): AppPath<i64>,
) -> Result<AppJson<MessageResponse>> {
    order::delete_order(&state.db, &identity, id).await?;
    Ok(AppJson(MessageResponse::new("Order dihapus")))
}
