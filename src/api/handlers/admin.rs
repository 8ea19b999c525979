//! Back-office endpoints under `/api/admin`.
//!
//! Everything except `login` sits behind the admin gate.

use axum::{Extension, extract::State};
use std::sync::Arc;
use tracing::{debug, info};

use crate::{
    api::{
        AppState,
        error::{AppJson, AppPath},
        models::{
            AdminLoginRequest, AdminOrder, AdminOrderDetailResponse, AdminOrderList,
            ChangeAdminPasswordRequest, CustomerList, CustomerResponse, LoginResponse,
            MessageResponse, OrderOwner, OrderResponse, UpdateStatusRequest,
        },
    },
    auth::Identity,
    core::{
        admin,
        dashboard::{self, DashboardSummary},
        order::{self, StatusUpdate},
        user,
    },
    errors::Result,
};

/// `POST /api/admin/login`
pub async fn login(
    State(state): State<Arc<AppState>>,
    AppJson(body): AppJson<AdminLoginRequest>,
) -> Result<AppJson<LoginResponse>> {
    let admin = admin::authenticate_admin(&state.db, &body.username, &body.password).await?;
    let token = state.tokens.issue(Identity::admin(admin.id))?;

    info!("Admin {} logged in", admin.username);
    Ok(AppJson(LoginResponse {
        message: "Login berhasil".to_string(),
        token,
    }))
}

/// `GET /api/admin/dashboard`
pub async fn dashboard(State(state): State<Arc<AppState>>) -> Result<AppJson<DashboardSummary>> {
    debug!("Building dashboard");
    let summary = dashboard::generate_dashboard(&state.db).await?;
    Ok(AppJson(summary))
}

/// `GET /api/admin/orders`
pub async fn list_orders(State(state): State<Arc<AppState>>) -> Result<AppJson<AdminOrderList>> {
    let orders = order::get_all_orders(&state.db)
        .await?
        .into_iter()
        .map(|(order, customer)| AdminOrder {
            order,
            user: customer.map(OrderOwner::from),
        })
        .collect();

    Ok(AppJson(AdminOrderList { orders }))
}

/// `GET /api/admin/orders/{id}` - order with owner and tracking history
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    AppPath(id): AppPath<i64>,
) -> Result<AppJson<AdminOrderDetailResponse>> {
    let detail = order::get_order_detail(&state.db, id).await?;
    Ok(AppJson(AdminOrderDetailResponse {
        order: detail.into(),
    }))
}

/// `PATCH /api/admin/orders/{id}` - status and/or payment flag
pub async fn update_order_status(
    State(state): State<Arc<AppState>>,
    AppPath(id): AppPath<i64>,
    AppJson(body): AppJson<UpdateStatusRequest>,
) -> Result<AppJson<OrderResponse>> {
    debug!("Status update for order {}: {:?}", id, body);

    let updated = order::set_order_status(
        &state.db,
        id,
        StatusUpdate {
            status: body.status,
            is_paid: body.is_paid,
        },
    )
    .await?;

    Ok(AppJson(OrderResponse {
        message: Some("Status updated".to_string()),
        order: updated,
    }))
}

/// `GET /api/admin/users` - customers with their order counts
pub async fn list_users(State(state): State<Arc<AppState>>) -> Result<AppJson<CustomerList>> {
    let users = user::list_customers(&state.db)
        .await?
        .into_iter()
        .map(CustomerResponse::from)
        .collect();

    Ok(AppJson(CustomerList { users }))
}

/// `PUT /api/admin/settings` - change the caller's password
pub async fn change_password(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    AppJson(body): AppJson<ChangeAdminPasswordRequest>,
) -> Result<AppJson<MessageResponse>> {
    admin::change_admin_password(
        &state.db,
        identity.id,
        &body.current_password,
        &body.new_password,
    )
    .await?;

    Ok(AppJson(MessageResponse::new("Password berhasil diperbarui")))
}
