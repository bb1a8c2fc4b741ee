//! Credential-gated admin handlers.
//!
//! Both endpoints check the shared admin secret through the
//! [`Authorizer`](sevak_core::auth::Authorizer) seam before touching the
//! store. The check order on role assignment is fixed: authorization, then
//! role validity, then existence and the conflict gate inside the store.

use axum::{
  Json,
  extract::{Path, Query, State},
};
use serde::Deserialize;
use sevak_core::{
  image::ImageStore,
  store::VolunteerStore,
  volunteer::{AssignmentOverview, Role, Volunteer},
};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

// ─── Role assignment ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AssignRoleBody {
  /// Requested role as its wire spelling; parsed by [`Role::from_str`]
  /// so an unknown value is a 400, not a deserialization failure.
  #[serde(default)]
  pub role:         String,
  #[serde(default)]
  pub admin_secret: String,
}

/// `PUT /volunteers/{id}/role` — body: `{"role": "...", "admin_secret": "..."}`
pub async fn assign_role<S, I>(
  State(state): State<AppState<S, I>>,
  Path(id): Path<Uuid>,
  Json(body): Json<AssignRoleBody>,
) -> Result<Json<Volunteer>, ApiError>
where
  S: VolunteerStore,
  I: ImageStore,
{
  state.auth.authorize(&body.admin_secret)?;
  let role: Role = body.role.parse()?;
  Ok(Json(state.store.assign_role(id, role).await?))
}

// ─── Assignment overview ─────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AdminQuery {
  #[serde(default)]
  pub admin_secret: String,
}

/// `GET /volunteers/admin/assignments?admin_secret=...`
pub async fn assignments<S, I>(
  State(state): State<AppState<S, I>>,
  Query(query): Query<AdminQuery>,
) -> Result<Json<AssignmentOverview>, ApiError>
where
  S: VolunteerStore,
  I: ImageStore,
{
  state.auth.authorize(&query.admin_secret)?;
  Ok(Json(state.store.assignment_overview().await?))
}
