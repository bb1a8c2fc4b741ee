//! Handlers for the public `/volunteers` endpoints.
//!
//! | Method   | Path                      | Notes |
//! |----------|---------------------------|-------|
//! | `POST`   | `/volunteers`             | Register; 201 with the record |
//! | `GET`    | `/volunteers`             | All, ordered area/role/name |
//! | `GET`    | `/volunteers/area/{area}` | Case-insensitive substring match |
//! | `GET`    | `/volunteers/areas/stats` | Per-area role counts |
//! | `GET`    | `/volunteers/{id}`        | 404 if not found |
//! | `DELETE` | `/volunteers/{id}`        | Releases the record's image |
//! | `GET`    | `/volunteers/health`      | Liveness probe |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::Utc;
use serde_json::json;
use sevak_core::{
  image::ImageStore,
  store::VolunteerStore,
  volunteer::{AreaStats, NewVolunteer, Volunteer},
};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

// ─── Register ────────────────────────────────────────────────────────────────

/// `POST /volunteers` — body: [`NewVolunteer`] JSON.
///
/// The image (if any) was uploaded to the external host before this call;
/// if registration then fails, the upload is orphaned and gets released
/// here before the error goes back out.
pub async fn register<S, I>(
  State(state): State<AppState<S, I>>,
  Json(body): Json<NewVolunteer>,
) -> Result<impl IntoResponse, ApiError>
where
  S: VolunteerStore,
  I: ImageStore,
{
  let uploaded = body.image_url.clone();

  match state.store.register(body).await {
    Ok(volunteer) => Ok((StatusCode::CREATED, Json(volunteer))),
    Err(err) => {
      if let Some(url) = uploaded.filter(|u| !u.is_empty()) {
        if let Err(cleanup) = state.images.delete(&url).await {
          tracing::warn!(%url, error = %cleanup, "failed to release orphaned image");
        }
      }
      Err(err.into())
    }
  }
}

// ─── Reads ───────────────────────────────────────────────────────────────────

/// `GET /volunteers`
pub async fn list<S, I>(
  State(state): State<AppState<S, I>>,
) -> Result<Json<Vec<Volunteer>>, ApiError>
where
  S: VolunteerStore,
  I: ImageStore,
{
  Ok(Json(state.store.list_all().await?))
}

/// `GET /volunteers/area/{area}`
pub async fn by_area<S, I>(
  State(state): State<AppState<S, I>>,
  Path(area): Path<String>,
) -> Result<Json<Vec<Volunteer>>, ApiError>
where
  S: VolunteerStore,
  I: ImageStore,
{
  Ok(Json(state.store.list_by_area(&area).await?))
}

/// `GET /volunteers/areas/stats`
pub async fn area_stats<S, I>(
  State(state): State<AppState<S, I>>,
) -> Result<Json<Vec<AreaStats>>, ApiError>
where
  S: VolunteerStore,
  I: ImageStore,
{
  Ok(Json(state.store.area_statistics().await?))
}

/// `GET /volunteers/{id}`
pub async fn get_one<S, I>(
  State(state): State<AppState<S, I>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Volunteer>, ApiError>
where
  S: VolunteerStore,
  I: ImageStore,
{
  let volunteer = state
    .store
    .get(id)
    .await?
    .ok_or(ApiError(sevak_core::Error::NotFound(id)))?;
  Ok(Json(volunteer))
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// `DELETE /volunteers/{id}`
///
/// Removes the record, then releases its image from the external host.
/// A failed release is logged, not surfaced; the record is already gone.
pub async fn delete<S, I>(
  State(state): State<AppState<S, I>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: VolunteerStore,
  I: ImageStore,
{
  let deleted = state.store.delete(id).await?;

  if !deleted.image_url.is_empty() {
    if let Err(cleanup) = state.images.delete(&deleted.image_url).await {
      tracing::warn!(
        url = %deleted.image_url,
        error = %cleanup,
        "failed to release image of deleted volunteer"
      );
    }
  }

  Ok(StatusCode::NO_CONTENT)
}

// ─── Health ──────────────────────────────────────────────────────────────────

/// `GET /volunteers/health`
pub async fn health() -> impl IntoResponse {
  Json(json!({
    "status": "ok",
    "timestamp": Utc::now(),
  }))
}
