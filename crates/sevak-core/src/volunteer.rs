//! Volunteer — the sole entity of the registry.
//!
//! A volunteer is created once via registration and mutated only through the
//! admin role-assignment path; everything else about the record is immutable
//! apart from `last_updated`.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Role ────────────────────────────────────────────────────────────────────

/// The closed set of roles a volunteer can hold.
///
/// `President` and `VicePresident` are the officer roles: each is limited to
/// one holder per area. `Member` is unconstrained.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
  #[default]
  Member,
  President,
  VicePresident,
}

impl Role {
  /// Stable wire/storage spelling of the variant.
  pub fn as_str(self) -> &'static str {
    match self {
      Role::Member => "member",
      Role::President => "president",
      Role::VicePresident => "vice-president",
    }
  }

  /// Whether this role is subject to the one-per-area constraint.
  pub fn is_officer(self) -> bool {
    !matches!(self, Role::Member)
  }
}

impl fmt::Display for Role {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Role {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "member" => Ok(Role::Member),
      "president" => Ok(Role::President),
      "vice-president" => Ok(Role::VicePresident),
      other => Err(Error::InvalidRole(other.to_string())),
    }
  }
}

// ─── Volunteer ───────────────────────────────────────────────────────────────

/// Provenance marker for the last role change: `"system"` at creation,
/// `"admin"` after an admin assignment.
pub const APPOINTED_BY_SYSTEM: &str = "system";
pub const APPOINTED_BY_ADMIN: &str = "admin";

/// A fully persisted volunteer record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Volunteer {
  /// Store-assigned opaque identifier; immutable.
  pub volunteer_id:      Uuid,
  /// Monotonically increasing integer, unique across all volunteers,
  /// assigned at creation.
  pub sequential_id:     i64,
  pub name:              String,
  /// Externally issued unique identifier (the "AAK number").
  pub membership_number: String,
  pub mobile_number:     String,
  pub address:           String,
  /// Free-text grouping label; the scope of officer-role uniqueness.
  pub area:              String,
  pub role:              Role,
  pub appointed_by:      String,
  /// Absent until the first admin role change.
  pub appointment_date:  Option<DateTime<Utc>>,
  /// Empty string when no image is attached.
  pub image_url:         String,
  pub join_date:         DateTime<Utc>,
  pub last_updated:      DateTime<Utc>,
  /// Soft-delete/visibility flag; persisted but not toggled by any
  /// in-scope write path.
  pub is_active:         bool,
}

// ─── Registration input ──────────────────────────────────────────────────────

/// Caller-supplied fields for [`register`](crate::store::VolunteerStore::register).
///
/// Any image upload happens before registration, against the external
/// [`ImageStore`](crate::image::ImageStore); only the resulting URL is
/// passed here.
///
/// Every field defaults on deserialization so an absent key arrives as an
/// empty string and is reported by [`validate`](NewVolunteer::validate)
/// alongside the other offending fields, rather than failing in the
/// deserializer.
#[derive(Debug, Clone, Deserialize)]
pub struct NewVolunteer {
  #[serde(default)]
  pub name:              String,
  #[serde(default)]
  pub membership_number: String,
  #[serde(default)]
  pub mobile_number:     String,
  #[serde(default)]
  pub address:           String,
  #[serde(default)]
  pub area:              String,
  #[serde(default)]
  pub image_url:         Option<String>,
}

impl NewVolunteer {
  /// Validate required fields, returning every offending field name.
  ///
  /// All five fields must be non-empty after trimming; `area` must be at
  /// least two characters after trimming.
  pub fn validate(&self) -> Result<()> {
    let mut fields = Vec::new();

    if self.name.trim().is_empty() {
      fields.push("name".to_string());
    }
    if self.membership_number.trim().is_empty() {
      fields.push("membership_number".to_string());
    }
    if self.mobile_number.trim().is_empty() {
      fields.push("mobile_number".to_string());
    }
    if self.address.trim().is_empty() {
      fields.push("address".to_string());
    }
    if self.area.trim().len() < 2 {
      fields.push("area".to_string());
    }

    if fields.is_empty() {
      Ok(())
    } else {
      Err(Error::Validation { fields })
    }
  }
}

// ─── Aggregates ──────────────────────────────────────────────────────────────

/// Per-area role counts, one entry per distinct area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaStats {
  pub area:                 String,
  pub total:                i64,
  pub president_count:      i64,
  pub vice_president_count: i64,
  pub member_count:         i64,
}

/// Per-area officer-slot availability, for the admin assignment view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaAvailability {
  pub area:               String,
  pub has_president:      bool,
  pub has_vice_president: bool,
}

/// The admin role-assignment view: every volunteer plus which officer
/// slots are already taken per area.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentOverview {
  pub volunteers: Vec<Volunteer>,
  pub area_stats: Vec<AreaAvailability>,
}
