//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every domain error maps to a fixed status: validation,
//! duplicate-membership, and role-conflict failures are 400s,
//! a bad admin secret is a 403, a missing record a 404. Bodies are
//! `{"error": {"kind", "message", ...identifiers}}` — enough structure for
//! a client to render a specific message (e.g. the conflicting holder's
//! name) without parsing prose.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use sevak_core::Error;
use thiserror::Error as ThisError;

/// An error returned by an API handler.
#[derive(Debug, ThisError)]
#[error(transparent)]
pub struct ApiError(#[from] pub Error);

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let err = self.0;
    let (status, body) = match &err {
      Error::Validation { fields } => (
        StatusCode::BAD_REQUEST,
        json!({
          "kind": "validation",
          "message": err.to_string(),
          "fields": fields,
        }),
      ),
      Error::InvalidRole(role) => (
        StatusCode::BAD_REQUEST,
        json!({
          "kind": "invalid_role",
          "message": err.to_string(),
          "role": role,
        }),
      ),
      Error::DuplicateMembership { membership_number, .. } => (
        StatusCode::BAD_REQUEST,
        json!({
          "kind": "duplicate_membership",
          "message": err.to_string(),
          "membership_number": membership_number,
        }),
      ),
      Error::Unauthorized => (
        StatusCode::FORBIDDEN,
        json!({
          "kind": "unauthorized",
          "message": err.to_string(),
        }),
      ),
      Error::NotFound(id) => (
        StatusCode::NOT_FOUND,
        json!({
          "kind": "not_found",
          "message": err.to_string(),
          "volunteer_id": id,
        }),
      ),
      Error::RoleConflict { area, role, holder_id, holder_name } => (
        StatusCode::BAD_REQUEST,
        json!({
          "kind": "role_conflict",
          "message": err.to_string(),
          "area": area,
          "role": role,
          "holder_id": holder_id,
          "holder_name": holder_name,
        }),
      ),
      Error::Storage(detail) => {
        tracing::error!(%detail, "storage failure");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          json!({
            "kind": "storage",
            "message": "internal storage error",
          }),
        )
      }
    };
    (status, Json(json!({ "error": body }))).into_response()
  }
}
