//! HTTP rendering of [`Error`] and extractors that reject through it.
//!
//! Every failure leaves the service as `{"message": "..."}` with a status that
//! depends on the variant. Internal errors are logged and replaced by a
//! generic message.

use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use super::models::MessageResponse;
use crate::errors::Error;

impl Error {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. }
            | Self::InvalidAmount { .. }
            | Self::InvalidPackage { .. }
            | Self::InvalidResetToken => StatusCode::BAD_REQUEST,

            Self::Unauthorized | Self::WrongPassword | Self::WrongCurrentPassword => {
                StatusCode::UNAUTHORIZED
            }

            Self::AdminOnly
            | Self::CustomerOnly
            | Self::NotOrderOwner { .. }
            | Self::OrderAlreadyProcessed { .. }
            | Self::OrderPaidLocked { .. }
            | Self::OrderPaidUndeletable { .. } => StatusCode::FORBIDDEN,

            Self::OrderNotFound { .. }
            | Self::PackageNotFound { .. }
            | Self::UserNotFound
            | Self::EmailNotRegistered
            | Self::AdminNotFound => StatusCode::NOT_FOUND,

            Self::EmailTaken { .. } | Self::DuplicateUnpaidOrder { .. } => StatusCode::CONFLICT,

            Self::Config { .. }
            | Self::PasswordHash { .. }
            | Self::Database(_)
            | Self::Token(_)
            | Self::Io(_)
            | Self::EnvVar(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if self.is_internal() {
            error!("Request failed: {}", self);
            "Terjadi kesalahan server".to_string()
        } else {
            self.to_string()
        };

        (status, Json(MessageResponse { message })).into_response()
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation(format!("Body tidak valid: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for Error {
    fn from(_: PathRejection) -> Self {
        Self::validation("ID tidak valid")
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Self::validation(format!("Parameter tidak valid: {}", rejection.body_text()))
    }
}

/// `Json` whose rejection is an [`Error`]
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct AppJson<T>(pub T);

impl<T: Serialize> IntoResponse for AppJson<T> {
    fn into_response(self) -> Response {
        Json(self.0).into_response()
    }
}

/// `Path` whose rejection is an [`Error`]
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(Error))]
pub struct AppPath<T>(pub T);

/// `Query` whose rejection is an [`Error`]
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(Error))]
pub struct AppQuery<T>(pub T);
