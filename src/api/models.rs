//! Request and response bodies.
//!
//! Field names are camelCase on the wire; enums use their upper-case names.

use serde::{Deserialize, Serialize};

use crate::{
    core::{order::OrderDetail, user::CustomerSummary},
    entities::{OrderModel, OrderStatus, PackageModel, ServiceType, TrackingModel, UserModel},
};

/// Body of every error and of plain acknowledgements
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

// Accounts

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UserLoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub user: UserModel,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub old_password: Option<String>,
    pub new_password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub new_password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeAdminPasswordRequest {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
}

/// Customer row of the admin user list
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    #[serde(flatten)]
    pub user: UserModel,
    pub order_count: u64,
}

impl From<CustomerSummary> for CustomerResponse {
    fn from(summary: CustomerSummary) -> Self {
        Self {
            user: summary.user,
            order_count: summary.order_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CustomerList {
    pub users: Vec<CustomerResponse>,
}

// Orders

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    pub package_id: Option<i64>,
    pub weight: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub weight: Option<f64>,
    pub package_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status: Option<OrderStatus>,
    pub is_paid: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub order: OrderModel,
}

#[derive(Debug, Serialize)]
pub struct OrderList {
    pub orders: Vec<OrderModel>,
}

/// Owner fields shown next to an order in admin views
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderOwner {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<UserModel> for OrderOwner {
    fn from(user: UserModel) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AdminOrder {
    #[serde(flatten)]
    pub order: OrderModel,
    pub user: Option<OrderOwner>,
}

#[derive(Debug, Serialize)]
pub struct AdminOrderList {
    pub orders: Vec<AdminOrder>,
}

#[derive(Debug, Serialize)]
pub struct AdminOrderDetail {
    #[serde(flatten)]
    pub order: OrderModel,
    pub user: Option<OrderOwner>,
    pub tracking: Vec<TrackingModel>,
}

impl From<OrderDetail> for AdminOrderDetail {
    fn from(detail: OrderDetail) -> Self {
        Self {
            order: detail.order,
            user: detail.customer.map(OrderOwner::from),
            tracking: detail.tracking,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AdminOrderDetailResponse {
    pub order: AdminOrderDetail,
}

// Packages

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePackageRequest {
    #[serde(default)]
    pub label: String,
    pub service_type: Option<ServiceType>,
    pub price: Option<f64>,
}

pub type PackageList = Vec<PackageModel>;

// Tracking

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingQuery {
    pub order_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTrackingRequest {
    pub order_id: Option<i64>,
    pub status: Option<OrderStatus>,
}

#[derive(Debug, Serialize)]
pub struct TrackingResponse {
    pub message: String,
    pub tracking: TrackingModel,
}

#[derive(Debug, Serialize)]
pub struct TrackingHistoryResponse {
    pub order: OrderModel,
    pub tracks: Vec<TrackingModel>,
}
