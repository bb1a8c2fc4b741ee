//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, UUIDs as hyphenated lowercase
//! strings, roles under their wire spelling ([`Role::as_str`]).

use chrono::{DateTime, Utc};
use sevak_core::{
  Error, Result,
  volunteer::{Role, Volunteer},
};
use uuid::Uuid;

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String {
  id.hyphenated().to_string()
}

pub fn decode_uuid(s: &str) -> Result<Uuid> {
  Uuid::parse_str(s).map_err(|e| Error::storage(format!("uuid parse error: {e}")))
}

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339()
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::storage(format!("date/time parse error: {e}")))
}

// ─── Role ────────────────────────────────────────────────────────────────────

pub fn decode_role(s: &str) -> Result<Role> {
  s.parse()
    .map_err(|_| Error::storage(format!("unknown role in store: {s:?}")))
}

// ─── Row type ────────────────────────────────────────────────────────────────

/// Column list shared by every `SELECT` over `volunteers`; order matches
/// [`RawVolunteer::from_row`].
pub const VOLUNTEER_COLUMNS: &str = "volunteer_id, sequential_id, name, \
   membership_number, mobile_number, address, area, role, appointed_by, \
   appointment_date, image_url, join_date, last_updated, is_active";

/// Raw strings read directly from a `volunteers` row.
pub struct RawVolunteer {
  pub volunteer_id:      String,
  pub sequential_id:     i64,
  pub name:              String,
  pub membership_number: String,
  pub mobile_number:     String,
  pub address:           String,
  pub area:              String,
  pub role:              String,
  pub appointed_by:      String,
  pub appointment_date:  Option<String>,
  pub image_url:         String,
  pub join_date:         String,
  pub last_updated:      String,
  pub is_active:         bool,
}

impl RawVolunteer {
  /// Read one row, in [`VOLUNTEER_COLUMNS`] order.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawVolunteer {
      volunteer_id:      row.get(0)?,
      sequential_id:     row.get(1)?,
      name:              row.get(2)?,
      membership_number: row.get(3)?,
      mobile_number:     row.get(4)?,
      address:           row.get(5)?,
      area:              row.get(6)?,
      role:              row.get(7)?,
      appointed_by:      row.get(8)?,
      appointment_date:  row.get(9)?,
      image_url:         row.get(10)?,
      join_date:         row.get(11)?,
      last_updated:      row.get(12)?,
      is_active:         row.get(13)?,
    })
  }

  pub fn into_volunteer(self) -> Result<Volunteer> {
    Ok(Volunteer {
      volunteer_id:      decode_uuid(&self.volunteer_id)?,
      sequential_id:     self.sequential_id,
      name:              self.name,
      membership_number: self.membership_number,
      mobile_number:     self.mobile_number,
      address:           self.address,
      area:              self.area,
      role:              decode_role(&self.role)?,
      appointed_by:      self.appointed_by,
      appointment_date:  self
        .appointment_date
        .as_deref()
        .map(decode_dt)
        .transpose()?,
      image_url:         self.image_url,
      join_date:         decode_dt(&self.join_date)?,
      last_updated:      decode_dt(&self.last_updated)?,
      is_active:         self.is_active,
    })
  }
}
