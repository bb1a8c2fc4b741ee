//! The `VolunteerStore` trait.
//!
//! Implemented by storage backends (e.g. `sevak-store-sqlite`). Higher
//! layers (`sevak-api`, `sevak-server`) depend on this abstraction, not on
//! any concrete backend.
//!
//! The two write paths (`register`, `assign_role`) carry the registry's
//! invariants and must serialize their read-modify-write sections per
//! store: concurrent registrations must never receive the same sequential
//! ID, and concurrent assignments contending for the same officer slot in
//! the same area must not both succeed. Backends are expected to enforce
//! membership-number and officer-slot uniqueness with store-level
//! constraints as the final authority; application-level pre-checks exist
//! only for fast, specific error messages.

use std::future::Future;

use uuid::Uuid;

use crate::{
  Error,
  volunteer::{AreaStats, AssignmentOverview, NewVolunteer, Role, Volunteer},
};

/// Abstraction over a volunteer-registry storage backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`). Errors are the
/// domain [`Error`]; backend failures ride in [`Error::Storage`].
pub trait VolunteerStore: Send + Sync {
  // ── Writes ────────────────────────────────────────────────────────────

  /// Register a new volunteer.
  ///
  /// Validates the input, rejects duplicate membership numbers, assigns
  /// the next sequential ID, and persists the record with `role = member`
  /// and `appointed_by = "system"`. Either the full record is written or
  /// nothing is.
  fn register(
    &self,
    input: NewVolunteer,
  ) -> impl Future<Output = Result<Volunteer, Error>> + Send + '_;

  /// Change a volunteer's role.
  ///
  /// For officer roles, fails with [`Error::RoleConflict`] if another
  /// volunteer in the same area already holds `new_role`; the volunteer
  /// being updated is excluded from the check so re-assigning a current
  /// holder to their own role succeeds. Demotion to member is always
  /// permitted. On success `appointed_by` becomes `"admin"` and
  /// `appointment_date` is set.
  ///
  /// Credential checking is not the store's job; see
  /// [`Authorizer`](crate::auth::Authorizer).
  fn assign_role(
    &self,
    id: Uuid,
    new_role: Role,
  ) -> impl Future<Output = Result<Volunteer, Error>> + Send + '_;

  /// Delete a volunteer, returning the removed record so the caller can
  /// release its `image_url` from the external image store.
  fn delete(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Volunteer, Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Fetch a single volunteer. `None` if not found.
  fn get(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Volunteer>, Error>> + Send + '_;

  /// All volunteers, ordered by `(area, role, name)` — the stable listing
  /// order the admin and gallery views rely on.
  fn list_all(
    &self,
  ) -> impl Future<Output = Result<Vec<Volunteer>, Error>> + Send + '_;

  /// Volunteers whose area contains `fragment`, case-insensitively,
  /// ordered by `(role, name)`.
  fn list_by_area<'a>(
    &'a self,
    fragment: &'a str,
  ) -> impl Future<Output = Result<Vec<Volunteer>, Error>> + Send + 'a;

  /// Per-area role counts, sorted by area name.
  fn area_statistics(
    &self,
  ) -> impl Future<Output = Result<Vec<AreaStats>, Error>> + Send + '_;

  /// The admin assignment view: all volunteers ordered `(area, name)`
  /// plus per-area officer-slot availability.
  fn assignment_overview(
    &self,
  ) -> impl Future<Output = Result<AssignmentOverview, Error>> + Send + '_;
}
