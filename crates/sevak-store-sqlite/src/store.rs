//! [`SqliteStore`] — the SQLite implementation of [`VolunteerStore`].
//!
//! Every multi-step write runs inside a single [`tokio_rusqlite`] call
//! closure under an `IMMEDIATE` transaction. The connection executes
//! closures one at a time on a dedicated thread, so the duplicate
//! pre-check, the max-sequential-ID read, and the officer-slot conflict
//! check are each atomic with the write they guard. The schema's unique
//! constraints back the same rules for anything else holding the file.

use std::path::Path;

use chrono::Utc;
use rusqlite::{OptionalExtension as _, TransactionBehavior};
use uuid::Uuid;

use sevak_core::{
  Error, Result,
  store::VolunteerStore,
  volunteer::{
    APPOINTED_BY_ADMIN, APPOINTED_BY_SYSTEM, AreaAvailability, AreaStats,
    AssignmentOverview, NewVolunteer, Role, Volunteer,
  },
};

use crate::{
  encode::{RawVolunteer, VOLUNTEER_COLUMNS, decode_uuid, encode_dt, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A volunteer store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

/// Result of the registration insert, resolved inside the transaction.
enum InsertOutcome {
  Duplicate,
  Inserted(i64),
}

/// Result of the role-assignment transaction.
enum AssignOutcome {
  NotFound,
  Conflict {
    area:        String,
    holder_id:   String,
    holder_name: String,
  },
  Updated(RawVolunteer),
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path)
      .await
      .map_err(Error::storage)?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory()
      .await
      .map_err(Error::storage)?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await
      .map_err(Error::storage)
  }
}

/// Whether `err` is a UNIQUE-constraint violation whose message mentions
/// `needle` (a column or index name).
fn unique_violation(err: &rusqlite::Error, needle: &str) -> bool {
  match err {
    rusqlite::Error::SqliteFailure(e, Some(msg)) => {
      e.code == rusqlite::ErrorCode::ConstraintViolation && msg.contains(needle)
    }
    _ => false,
  }
}

// ─── VolunteerStore impl ─────────────────────────────────────────────────────

impl VolunteerStore for SqliteStore {
  // ── Writes ────────────────────────────────────────────────────────────────

  async fn register(&self, input: NewVolunteer) -> Result<Volunteer> {
    input.validate()?;

    let now = Utc::now();
    let mut record = Volunteer {
      volunteer_id:      Uuid::new_v4(),
      sequential_id:     0, // assigned inside the transaction
      name:              input.name.trim().to_string(),
      membership_number: input.membership_number.trim().to_string(),
      mobile_number:     input.mobile_number.trim().to_string(),
      address:           input.address.trim().to_string(),
      area:              input.area.trim().to_string(),
      role:              Role::Member,
      appointed_by:      APPOINTED_BY_SYSTEM.to_string(),
      appointment_date:  None,
      image_url:         input.image_url.unwrap_or_default(),
      join_date:         now,
      last_updated:      now,
      is_active:         true,
    };

    let id_str            = encode_uuid(record.volunteer_id);
    let name              = record.name.clone();
    let membership_number = record.membership_number.clone();
    let mobile_number     = record.mobile_number.clone();
    let address           = record.address.clone();
    let area              = record.area.clone();
    let image_url         = record.image_url.clone();
    let join_str          = encode_dt(record.join_date);
    let updated_str       = encode_dt(record.last_updated);

    let outcome: InsertOutcome = self
      .conn
      .call(move |conn| {
        let tx =
          conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        // Advisory fast path; the UNIQUE column is the real guard.
        let taken: Option<i64> = tx
          .query_row(
            "SELECT 1 FROM volunteers WHERE membership_number = ?1",
            rusqlite::params![membership_number],
            |r| r.get(0),
          )
          .optional()?;
        if taken.is_some() {
          return Ok(InsertOutcome::Duplicate);
        }

        // Serialized read-increment-write; see the module docs.
        let next: i64 = tx.query_row(
          "SELECT COALESCE(MAX(sequential_id), 0) + 1 FROM volunteers",
          [],
          |r| r.get(0),
        )?;

        let inserted = tx.execute(
          "INSERT INTO volunteers (
             volunteer_id, sequential_id, name, membership_number,
             mobile_number, address, area, role, appointed_by,
             appointment_date, image_url, join_date, last_updated, is_active
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 'member', 'system',
                     NULL, ?8, ?9, ?10, 1)",
          rusqlite::params![
            id_str,
            next,
            name,
            membership_number,
            mobile_number,
            address,
            area,
            image_url,
            join_str,
            updated_str,
          ],
        );
        match inserted {
          Ok(_) => {}
          Err(e) if unique_violation(&e, "membership_number") => {
            return Ok(InsertOutcome::Duplicate);
          }
          Err(e) => return Err(e.into()),
        }

        tx.commit()?;
        Ok(InsertOutcome::Inserted(next))
      })
      .await
      .map_err(Error::storage)?;

    match outcome {
      InsertOutcome::Duplicate => Err(Error::DuplicateMembership {
        membership_number: record.membership_number,
        image_url:         if record.image_url.is_empty() {
          None
        } else {
          Some(record.image_url)
        },
      }),
      InsertOutcome::Inserted(seq) => {
        record.sequential_id = seq;
        Ok(record)
      }
    }
  }

  async fn assign_role(&self, id: Uuid, new_role: Role) -> Result<Volunteer> {
    let id_str   = encode_uuid(id);
    let now_str  = encode_dt(Utc::now());
    let role_str = new_role.as_str();
    let officer  = new_role.is_officer();

    let outcome: AssignOutcome = self
      .conn
      .call(move |conn| {
        let tx =
          conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let area: Option<String> = tx
          .query_row(
            "SELECT area FROM volunteers WHERE volunteer_id = ?1",
            rusqlite::params![id_str],
            |r| r.get(0),
          )
          .optional()?;
        let Some(area) = area else {
          return Ok(AssignOutcome::NotFound);
        };

        // Per-area uniqueness gate, entered only for officer roles. The
        // target volunteer is excluded so re-assigning a current holder
        // to their own role passes.
        if officer {
          let holder: Option<(String, String)> = tx
            .query_row(
              "SELECT volunteer_id, name FROM volunteers
               WHERE area = ?1 AND role = ?2 AND volunteer_id != ?3",
              rusqlite::params![area, role_str, id_str],
              |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .optional()?;
          if let Some((holder_id, holder_name)) = holder {
            return Ok(AssignOutcome::Conflict {
              area,
              holder_id,
              holder_name,
            });
          }
        }

        let updated = tx.execute(
          "UPDATE volunteers
           SET role = ?1, appointed_by = ?2, appointment_date = ?3,
               last_updated = ?3
           WHERE volunteer_id = ?4",
          rusqlite::params![role_str, APPOINTED_BY_ADMIN, now_str, id_str],
        );
        match updated {
          Ok(_) => {}
          // A writer outside this connection took the slot; the index is
          // the authority. Name the holder it saw.
          Err(e) if unique_violation(&e, "volunteers_officer_slot_idx") => {
            let (holder_id, holder_name): (String, String) = tx.query_row(
              "SELECT volunteer_id, name FROM volunteers
               WHERE area = ?1 AND role = ?2 AND volunteer_id != ?3",
              rusqlite::params![area, role_str, id_str],
              |r| Ok((r.get(0)?, r.get(1)?)),
            )?;
            return Ok(AssignOutcome::Conflict {
              area,
              holder_id,
              holder_name,
            });
          }
          Err(e) => return Err(e.into()),
        }

        let raw = tx.query_row(
          &format!(
            "SELECT {VOLUNTEER_COLUMNS} FROM volunteers WHERE volunteer_id = ?1"
          ),
          rusqlite::params![id_str],
          RawVolunteer::from_row,
        )?;

        tx.commit()?;
        Ok(AssignOutcome::Updated(raw))
      })
      .await
      .map_err(Error::storage)?;

    match outcome {
      AssignOutcome::NotFound => Err(Error::NotFound(id)),
      AssignOutcome::Conflict { area, holder_id, holder_name } => {
        Err(Error::RoleConflict {
          area,
          role: new_role,
          holder_id: decode_uuid(&holder_id)?,
          holder_name,
        })
      }
      AssignOutcome::Updated(raw) => raw.into_volunteer(),
    }
  }

  async fn delete(&self, id: Uuid) -> Result<Volunteer> {
    let id_str = encode_uuid(id);

    let raw: Option<RawVolunteer> = self
      .conn
      .call(move |conn| {
        let tx =
          conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let raw = tx
          .query_row(
            &format!(
              "SELECT {VOLUNTEER_COLUMNS} FROM volunteers WHERE volunteer_id = ?1"
            ),
            rusqlite::params![id_str],
            RawVolunteer::from_row,
          )
          .optional()?;
        if raw.is_some() {
          tx.execute(
            "DELETE FROM volunteers WHERE volunteer_id = ?1",
            rusqlite::params![id_str],
          )?;
        }

        tx.commit()?;
        Ok(raw)
      })
      .await
      .map_err(Error::storage)?;

    match raw {
      Some(raw) => raw.into_volunteer(),
      None => Err(Error::NotFound(id)),
    }
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn get(&self, id: Uuid) -> Result<Option<Volunteer>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawVolunteer> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {VOLUNTEER_COLUMNS} FROM volunteers WHERE volunteer_id = ?1"
              ),
              rusqlite::params![id_str],
              RawVolunteer::from_row,
            )
            .optional()?,
        )
      })
      .await
      .map_err(Error::storage)?;

    raw.map(RawVolunteer::into_volunteer).transpose()
  }

  async fn list_all(&self) -> Result<Vec<Volunteer>> {
    let raws: Vec<RawVolunteer> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {VOLUNTEER_COLUMNS} FROM volunteers
           ORDER BY area, role, name"
        ))?;
        let rows = stmt
          .query_map([], RawVolunteer::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(Error::storage)?;

    raws.into_iter().map(RawVolunteer::into_volunteer).collect()
  }

  async fn list_by_area(&self, fragment: &str) -> Result<Vec<Volunteer>> {
    // SQLite's LIKE (and its lower()) fold ASCII only, so the
    // case-insensitive substring match happens here instead.
    let needle = fragment.trim().to_lowercase();

    let raws: Vec<RawVolunteer> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {VOLUNTEER_COLUMNS} FROM volunteers
           ORDER BY role, name"
        ))?;
        let rows = stmt
          .query_map([], RawVolunteer::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(Error::storage)?;

    let mut volunteers: Vec<Volunteer> = raws
      .into_iter()
      .map(RawVolunteer::into_volunteer)
      .collect::<Result<_>>()?;
    volunteers.retain(|v| v.area.to_lowercase().contains(&needle));
    Ok(volunteers)
  }

  async fn area_statistics(&self) -> Result<Vec<AreaStats>> {
    self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT area,
                  COUNT(*),
                  SUM(role = 'president'),
                  SUM(role = 'vice-president'),
                  SUM(role = 'member')
           FROM volunteers
           GROUP BY area
           ORDER BY area",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(AreaStats {
              area:                 row.get(0)?,
              total:                row.get(1)?,
              president_count:      row.get(2)?,
              vice_president_count: row.get(3)?,
              member_count:         row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(Error::storage)
  }

  async fn assignment_overview(&self) -> Result<AssignmentOverview> {
    let (raws, stats): (Vec<RawVolunteer>, Vec<AreaAvailability>) = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {VOLUNTEER_COLUMNS} FROM volunteers
           ORDER BY area, name"
        ))?;
        let raws = stmt
          .query_map([], RawVolunteer::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut stmt = conn.prepare(
          "SELECT area,
                  MAX(role = 'president'),
                  MAX(role = 'vice-president')
           FROM volunteers
           GROUP BY area
           ORDER BY area",
        )?;
        let stats = stmt
          .query_map([], |row| {
            Ok(AreaAvailability {
              area:               row.get(0)?,
              has_president:      row.get(1)?,
              has_vice_president: row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok((raws, stats))
      })
      .await
      .map_err(Error::storage)?;

    Ok(AssignmentOverview {
      volunteers: raws
        .into_iter()
        .map(RawVolunteer::into_volunteer)
        .collect::<Result<_>>()?,
      area_stats: stats,
    })
  }
}
