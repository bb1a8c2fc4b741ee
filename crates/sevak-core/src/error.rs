//! Error types for `sevak-core`.
//!
//! Every failure a write path can produce is a distinct variant carrying the
//! identifiers a caller needs to render a specific message. No operation
//! leaves a partial write behind any of these.

use thiserror::Error;
use uuid::Uuid;

use crate::volunteer::Role;

#[derive(Debug, Error)]
pub enum Error {
  /// One or more required registration fields are missing or malformed.
  #[error("missing or invalid fields: {}", fields.join(", "))]
  Validation { fields: Vec<String> },

  /// The membership number is already registered.
  ///
  /// Carries the input's image URL (when one was uploaded before
  /// registration) so the caller can release the orphaned image.
  #[error("membership number {membership_number:?} is already registered")]
  DuplicateMembership {
    membership_number: String,
    image_url:         Option<String>,
  },

  /// A role string outside {member, president, vice-president}.
  #[error("invalid role {0:?}: must be member, president, or vice-president")]
  InvalidRole(String),

  /// Bad or missing admin credential. Deliberately detail-free.
  #[error("admin access required")]
  Unauthorized,

  #[error("volunteer not found: {0}")]
  NotFound(Uuid),

  /// The area already has a holder of the requested officer role.
  #[error("area {area:?} already has a {role}: {holder_name}")]
  RoleConflict {
    area:        String,
    role:        Role,
    holder_id:   Uuid,
    holder_name: String,
  },

  /// Storage-backend failure. Domain invariants are never reported here.
  #[error("storage error: {0}")]
  Storage(String),
}

impl Error {
  /// Wrap a backend failure. Used by store implementations, which cannot
  /// add `From` impls for their driver errors onto this type.
  pub fn storage(err: impl std::fmt::Display) -> Self {
    Error::Storage(err.to_string())
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
