//! Integration tests for `SqliteStore` against an in-memory database.

use sevak_core::{
  Error,
  store::VolunteerStore,
  volunteer::{NewVolunteer, Role},
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn input(name: &str, membership: &str, area: &str) -> NewVolunteer {
  NewVolunteer {
    name:              name.to_string(),
    membership_number: membership.to_string(),
    mobile_number:     "9000000001".to_string(),
    address:           "12 Temple St".to_string(),
    area:              area.to_string(),
    image_url:         None,
  }
}

// ─── Registration ────────────────────────────────────────────────────────────

#[tokio::test]
async fn first_registration_gets_sequential_id_one() {
  let s = store().await;
  let v = s.register(input("Asha", "AAK0001", "North")).await.unwrap();

  assert_eq!(v.sequential_id, 1);
  assert_eq!(v.role, Role::Member);
  assert_eq!(v.appointed_by, "system");
  assert!(v.appointment_date.is_none());
  assert!(v.is_active);
  assert_eq!(v.join_date, v.last_updated);
}

#[tokio::test]
async fn sequential_ids_increase_by_one() {
  let s = store().await;
  for (i, membership) in ["AAK0001", "AAK0002", "AAK0003"].iter().enumerate() {
    let v = s.register(input("V", membership, "North")).await.unwrap();
    assert_eq!(v.sequential_id, i as i64 + 1);
  }
}

#[tokio::test]
async fn sequential_id_continues_past_deleted_max() {
  let s = store().await;
  s.register(input("A", "AAK0001", "North")).await.unwrap();
  let b = s.register(input("B", "AAK0002", "North")).await.unwrap();
  s.delete(b.volunteer_id).await.unwrap();

  // Max drops back to 1, so the next assignment reuses 2. Uniqueness
  // among live records is what the invariant demands.
  let c = s.register(input("C", "AAK0003", "North")).await.unwrap();
  assert_eq!(c.sequential_id, 2);
}

#[tokio::test]
async fn required_fields_are_trimmed() {
  let s = store().await;
  let mut reg = input("  Asha Rao  ", " AAK0001 ", "  North  ");
  reg.mobile_number = " 9000000001 ".to_string();
  reg.address = " 12 Temple St ".to_string();

  let v = s.register(reg).await.unwrap();
  assert_eq!(v.name, "Asha Rao");
  assert_eq!(v.membership_number, "AAK0001");
  assert_eq!(v.mobile_number, "9000000001");
  assert_eq!(v.address, "12 Temple St");
  assert_eq!(v.area, "North");
}

#[tokio::test]
async fn missing_fields_are_listed() {
  let s = store().await;
  let mut bad = input("", "AAK0001", "N");
  bad.mobile_number = "  ".to_string();

  match s.register(bad).await {
    Err(Error::Validation { fields }) => {
      assert_eq!(fields, ["name", "mobile_number", "area"].map(String::from));
    }
    other => panic!("expected validation error, got {other:?}"),
  }
}

#[tokio::test]
async fn duplicate_membership_is_rejected() {
  let s = store().await;
  s.register(input("Asha", "AAK0001", "North")).await.unwrap();

  let mut dup = input("Binu", "AAK0001", "South");
  dup.image_url = Some("https://img.example/binu.jpg".to_string());

  match s.register(dup).await {
    Err(Error::DuplicateMembership { membership_number, image_url }) => {
      assert_eq!(membership_number, "AAK0001");
      // The orphaned upload rides on the error for caller-side cleanup.
      assert_eq!(image_url.as_deref(), Some("https://img.example/binu.jpg"));
    }
    other => panic!("expected duplicate error, got {other:?}"),
  }
}

#[tokio::test]
async fn concurrent_duplicate_registration_admits_exactly_one() {
  let s = store().await;
  let (a, b) = tokio::join!(
    s.register(input("Asha", "AAK0001", "North")),
    s.register(input("Binu", "AAK0001", "South")),
  );

  let oks = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
  assert_eq!(oks, 1, "exactly one registration must win");
  let loser = if a.is_ok() { b } else { a };
  assert!(matches!(loser, Err(Error::DuplicateMembership { .. })));
}

#[tokio::test]
async fn concurrent_registrations_get_distinct_sequential_ids() {
  let s = store().await;
  let (a, b, c) = tokio::join!(
    s.register(input("A", "AAK0001", "North")),
    s.register(input("B", "AAK0002", "North")),
    s.register(input("C", "AAK0003", "North")),
  );

  let mut ids =
    vec![a.unwrap().sequential_id, b.unwrap().sequential_id, c.unwrap().sequential_id];
  ids.sort_unstable();
  assert_eq!(ids, vec![1, 2, 3]);
}

// ─── Reads ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  assert!(s.get(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn list_all_orders_by_area_role_name() {
  let s = store().await;
  let b = s.register(input("Binu", "AAK0002", "South")).await.unwrap();
  s.register(input("Asha", "AAK0001", "North")).await.unwrap();
  s.register(input("Charu", "AAK0003", "North")).await.unwrap();
  s.assign_role(b.volunteer_id, Role::President).await.unwrap();

  let all = s.list_all().await.unwrap();
  let keys: Vec<(&str, Role, &str)> = all
    .iter()
    .map(|v| (v.area.as_str(), v.role, v.name.as_str()))
    .collect();
  // "member" sorts before "president", so within an area plain members
  // come first and the order is deterministic.
  assert_eq!(keys, vec![
    ("North", Role::Member, "Asha"),
    ("North", Role::Member, "Charu"),
    ("South", Role::President, "Binu"),
  ]);
}

#[tokio::test]
async fn list_by_area_matches_case_insensitive_fragments() {
  let s = store().await;
  s.register(input("Asha", "AAK0001", "North Zone")).await.unwrap();
  s.register(input("Binu", "AAK0002", "south")).await.unwrap();

  let north = s.list_by_area("north").await.unwrap();
  assert_eq!(north.len(), 1);
  assert_eq!(north[0].name, "Asha");

  let partial = s.list_by_area("ORTH").await.unwrap();
  assert_eq!(partial.len(), 1);

  assert!(s.list_by_area("east").await.unwrap().is_empty());
}

#[tokio::test]
async fn list_by_area_folds_case_beyond_ascii() {
  let s = store().await;
  s.register(input("Asha", "AAK0001", "Ödåkra Norr")).await.unwrap();
  s.register(input("Binu", "AAK0002", "South")).await.unwrap();

  let hits = s.list_by_area("ÖDÅKRA").await.unwrap();
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].name, "Asha");

  let lower = s.list_by_area("ödåkra norr").await.unwrap();
  assert_eq!(lower.len(), 1);
}

#[tokio::test]
async fn area_statistics_count_roles_per_area() {
  let s = store().await;
  let a = s.register(input("Asha", "AAK0001", "North")).await.unwrap();
  let b = s.register(input("Binu", "AAK0002", "North")).await.unwrap();
  s.register(input("Charu", "AAK0003", "South")).await.unwrap();
  s.assign_role(a.volunteer_id, Role::President).await.unwrap();
  s.assign_role(b.volunteer_id, Role::VicePresident).await.unwrap();

  let stats = s.area_statistics().await.unwrap();
  assert_eq!(stats.len(), 2);

  assert_eq!(stats[0].area, "North");
  assert_eq!(stats[0].total, 2);
  assert_eq!(stats[0].president_count, 1);
  assert_eq!(stats[0].vice_president_count, 1);
  assert_eq!(stats[0].member_count, 0);

  assert_eq!(stats[1].area, "South");
  assert_eq!(stats[1].total, 1);
  assert_eq!(stats[1].member_count, 1);
}

#[tokio::test]
async fn assignment_overview_reports_slot_availability() {
  let s = store().await;
  let a = s.register(input("Asha", "AAK0001", "North")).await.unwrap();
  s.register(input("Binu", "AAK0002", "South")).await.unwrap();
  s.assign_role(a.volunteer_id, Role::President).await.unwrap();

  let overview = s.assignment_overview().await.unwrap();
  assert_eq!(overview.volunteers.len(), 2);
  assert_eq!(overview.area_stats.len(), 2);

  let north = &overview.area_stats[0];
  assert_eq!(north.area, "North");
  assert!(north.has_president);
  assert!(!north.has_vice_president);

  let south = &overview.area_stats[1];
  assert_eq!(south.area, "South");
  assert!(!south.has_president);
}

// ─── Role assignment ─────────────────────────────────────────────────────────

#[tokio::test]
async fn promotion_sets_appointment_fields() {
  let s = store().await;
  let v = s.register(input("Asha", "AAK0001", "North")).await.unwrap();

  let promoted = s.assign_role(v.volunteer_id, Role::President).await.unwrap();
  assert_eq!(promoted.role, Role::President);
  assert_eq!(promoted.appointed_by, "admin");
  assert!(promoted.appointment_date.is_some());
  assert!(promoted.last_updated >= v.last_updated);
}

#[tokio::test]
async fn assigning_unknown_volunteer_is_not_found() {
  let s = store().await;
  let id = Uuid::new_v4();
  assert!(matches!(
    s.assign_role(id, Role::Member).await,
    Err(Error::NotFound(e)) if e == id
  ));
}

#[tokio::test]
async fn second_president_in_area_conflicts_and_names_holder() {
  let s = store().await;
  let a = s.register(input("Asha", "AAK0001", "North")).await.unwrap();
  let b = s.register(input("Binu", "AAK0002", "North")).await.unwrap();
  s.assign_role(a.volunteer_id, Role::President).await.unwrap();

  match s.assign_role(b.volunteer_id, Role::President).await {
    Err(Error::RoleConflict { area, role, holder_id, holder_name }) => {
      assert_eq!(area, "North");
      assert_eq!(role, Role::President);
      assert_eq!(holder_id, a.volunteer_id);
      assert_eq!(holder_name, "Asha");
    }
    other => panic!("expected role conflict, got {other:?}"),
  }
}

#[tokio::test]
async fn president_and_vice_president_slots_are_independent() {
  let s = store().await;
  let a = s.register(input("Asha", "AAK0001", "North")).await.unwrap();
  let b = s.register(input("Binu", "AAK0002", "North")).await.unwrap();

  s.assign_role(a.volunteer_id, Role::President).await.unwrap();
  let vp = s
    .assign_role(b.volunteer_id, Role::VicePresident)
    .await
    .unwrap();
  assert_eq!(vp.role, Role::VicePresident);
}

#[tokio::test]
async fn same_role_in_other_area_is_allowed() {
  let s = store().await;
  let a = s.register(input("Asha", "AAK0001", "North")).await.unwrap();
  let b = s.register(input("Binu", "AAK0002", "South")).await.unwrap();

  s.assign_role(a.volunteer_id, Role::President).await.unwrap();
  assert!(s.assign_role(b.volunteer_id, Role::President).await.is_ok());
}

#[tokio::test]
async fn reassigning_current_holder_to_own_role_passes() {
  let s = store().await;
  let a = s.register(input("Asha", "AAK0001", "North")).await.unwrap();
  s.assign_role(a.volunteer_id, Role::President).await.unwrap();

  // Self is excluded from the conflict scan, so this is a no-op pass.
  let again = s.assign_role(a.volunteer_id, Role::President).await.unwrap();
  assert_eq!(again.role, Role::President);
}

#[tokio::test]
async fn demotion_frees_the_slot() {
  let s = store().await;
  let a = s.register(input("Asha", "AAK0001", "North")).await.unwrap();
  let b = s.register(input("Binu", "AAK0002", "North")).await.unwrap();
  s.assign_role(a.volunteer_id, Role::President).await.unwrap();

  let demoted = s.assign_role(a.volunteer_id, Role::Member).await.unwrap();
  assert_eq!(demoted.role, Role::Member);

  let promoted = s.assign_role(b.volunteer_id, Role::President).await.unwrap();
  assert_eq!(promoted.role, Role::President);
}

#[tokio::test]
async fn concurrent_president_assignments_admit_at_most_one() {
  let s = store().await;
  let a = s.register(input("Asha", "AAK0001", "North")).await.unwrap();
  let b = s.register(input("Binu", "AAK0002", "North")).await.unwrap();

  let (ra, rb) = tokio::join!(
    s.assign_role(a.volunteer_id, Role::President),
    s.assign_role(b.volunteer_id, Role::President),
  );

  let oks = [ra.is_ok(), rb.is_ok()].iter().filter(|ok| **ok).count();
  assert_eq!(oks, 1, "the officer slot must admit exactly one");
  let loser = if ra.is_ok() { rb } else { ra };
  assert!(matches!(loser, Err(Error::RoleConflict { .. })));
}

// ─── End-to-end scenario ─────────────────────────────────────────────────────

#[tokio::test]
async fn end_to_end_promotion_scenario() {
  let s = store().await;

  let a = s.register(input("A", "AAK0001", "North")).await.unwrap();
  assert_eq!(a.sequential_id, 1);
  assert_eq!(a.role, Role::Member);

  let b = s.register(input("B", "AAK0002", "North")).await.unwrap();
  assert_eq!(b.sequential_id, 2);

  let a = s.assign_role(a.volunteer_id, Role::President).await.unwrap();
  assert_eq!(a.role, Role::President);

  match s.assign_role(b.volunteer_id, Role::President).await {
    Err(Error::RoleConflict { holder_name, .. }) => {
      assert_eq!(holder_name, "A");
    }
    other => panic!("expected role conflict, got {other:?}"),
  }

  s.assign_role(a.volunteer_id, Role::Member).await.unwrap();
  let b = s.assign_role(b.volunteer_id, Role::President).await.unwrap();
  assert_eq!(b.role, Role::President);
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_returns_the_record_and_removes_it() {
  let s = store().await;
  let mut reg = input("Asha", "AAK0001", "North");
  reg.image_url = Some("https://img.example/asha.jpg".to_string());
  let v = s.register(reg).await.unwrap();

  let deleted = s.delete(v.volunteer_id).await.unwrap();
  assert_eq!(deleted.image_url, "https://img.example/asha.jpg");
  assert!(s.get(v.volunteer_id).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_missing_is_not_found() {
  let s = store().await;
  assert!(matches!(
    s.delete(Uuid::new_v4()).await,
    Err(Error::NotFound(_))
  ));
}

#[tokio::test]
async fn deleting_a_president_frees_the_slot() {
  let s = store().await;
  let a = s.register(input("Asha", "AAK0001", "North")).await.unwrap();
  let b = s.register(input("Binu", "AAK0002", "North")).await.unwrap();
  s.assign_role(a.volunteer_id, Role::President).await.unwrap();

  s.delete(a.volunteer_id).await.unwrap();
  assert!(s.assign_role(b.volunteer_id, Role::President).await.is_ok());
}
