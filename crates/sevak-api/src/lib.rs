//! JSON REST API for the Sevak volunteer registry.
//!
//! Exposes an axum [`Router`] backed by any
//! [`sevak_core::store::VolunteerStore`] and
//! [`sevak_core::image::ImageStore`]. TLS and transport concerns are the
//! caller's responsibility.

pub mod admin;
pub mod error;
pub mod volunteers;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post, put},
};
use sevak_core::{auth::Authorizer, image::ImageStore, store::VolunteerStore};

pub use error::ApiError;

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S, I> {
  pub store:  Arc<S>,
  pub images: Arc<I>,
  pub auth:   Arc<dyn Authorizer>,
}

// Manual impl: `Arc` fields clone regardless of `S: Clone` / `I: Clone`.
impl<S, I> Clone for AppState<S, I> {
  fn clone(&self) -> Self {
    Self {
      store:  self.store.clone(),
      images: self.images.clone(),
      auth:   self.auth.clone(),
    }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router
/// regardless of its own state type.
pub fn router<S, I>(state: AppState<S, I>) -> Router
where
  S: VolunteerStore + 'static,
  I: ImageStore + 'static,
{
  Router::new()
    .route(
      "/volunteers",
      post(volunteers::register::<S, I>).get(volunteers::list::<S, I>),
    )
    .route("/volunteers/health", get(volunteers::health))
    .route("/volunteers/area/{area}", get(volunteers::by_area::<S, I>))
    .route("/volunteers/areas/stats", get(volunteers::area_stats::<S, I>))
    .route(
      "/volunteers/admin/assignments",
      get(admin::assignments::<S, I>),
    )
    .route(
      "/volunteers/{id}",
      get(volunteers::get_one::<S, I>).delete(volunteers::delete::<S, I>),
    )
    .route("/volunteers/{id}/role", put(admin::assign_role::<S, I>))
    .with_state(state)
}

// ─── Integration tests ───────────────────────────────────────────────────────
