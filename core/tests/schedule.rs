// SPDX-FileCopyrightText: 2026 Rota contributors
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end scenarios against a real database file: draft → save →
//! read-back, the clear-schedule flow, and the restrict-on-delete rules.

use rota_core::{
    Config, EventDraft, Location, Obligation, Rota, SaveOutcome, Subject, Teacher, Weekday,
};
use tempfile::TempDir;

async fn open_rota() -> (Rota, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = Config {
        state_dir: Some(dir.path().to_path_buf()),
    };
    let rota = Rota::new(config).await.expect("Failed to open Rota");
    (rota, dir)
}

fn monday_morning_draft() -> EventDraft {
    EventDraft {
        subject: Subject::new("CS101", "Introduction to Programming"),
        teacher: Teacher::new("Dr. Johnson"),
        location: Location::new("A101"),
        obligation: Obligation::Mandatory,
        day: Weekday::Monday,
        start_hour: 8,
        end_hour: 10,
        ..EventDraft::default()
    }
}

#[tokio::test]
async fn new_store_is_seeded_with_predefined_rows() {
    let (rota, _dir) = open_rota().await;

    let teachers: Vec<_> = rota
        .list_teachers()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.teacher_name)
        .collect();
    assert_eq!(teachers, vec!["Dr. Garcia", "Dr. Johnson", "Prof. Smith"]);

    let rooms: Vec<_> = rota
        .list_locations()
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.room_code)
        .collect();
    assert_eq!(rooms, vec!["A101", "B205", "C310"]);

    let subjects = rota.list_subjects().await.unwrap();
    assert_eq!(subjects.len(), 3);
    assert!(subjects.iter().any(|s| s.shortened_code == "PHYS101"
        && s.full_display_name == "Physics Fundamentals"));
}

#[tokio::test]
async fn reopening_the_store_does_not_duplicate_seed_rows() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        state_dir: Some(dir.path().to_path_buf()),
    };

    let rota = Rota::new(config.clone()).await.unwrap();
    rota.close().await.unwrap();

    let rota = Rota::new(config).await.unwrap();
    assert_eq!(rota.list_teachers().await.unwrap().len(), 3);
}

#[tokio::test]
async fn saving_a_valid_draft_creates_one_event_with_matching_fields() {
    let (rota, _dir) = open_rota().await;

    let outcome = rota.save_new_event(&monday_morning_draft()).await.unwrap();
    let SaveOutcome::Saved(id) = outcome else {
        panic!("expected the draft to be saved");
    };

    let all = rota.list_full_events().await.unwrap();
    assert_eq!(all.len(), 1);

    let full = &all[0];
    assert_eq!(full.event.id, id);
    assert_eq!(full.event.day, Weekday::Monday);
    assert_eq!((full.event.start_hour, full.event.end_hour), (8, 10));
    assert_eq!(full.event.obligation, Obligation::Mandatory);
    assert_eq!(full.subject.shortened_code, "CS101");
    assert_eq!(full.teacher.teacher_name, "Dr. Johnson");
    assert_eq!(full.location.room_code, "A101");
}

#[tokio::test]
async fn saving_with_a_new_teacher_creates_the_teacher_row_once() {
    let (rota, _dir) = open_rota().await;

    let mut draft = monday_morning_draft();
    draft.teacher = Teacher::new("Dr. Nováková");
    rota.save_new_event(&draft).await.unwrap();

    draft.day = Weekday::Tuesday;
    rota.save_new_event(&draft).await.unwrap();

    let count = rota
        .list_teachers()
        .await
        .unwrap()
        .into_iter()
        .filter(|t| t.teacher_name == "Dr. Nováková")
        .count();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn saving_a_custom_subject_derives_its_code() {
    let (rota, _dir) = open_rota().await;

    let mut draft = monday_morning_draft();
    draft.subject = Subject::custom("Calculus II");
    draft.is_custom_subject = true;

    let outcome = rota.save_new_event(&draft).await.unwrap();
    let SaveOutcome::Saved(id) = outcome else {
        panic!("expected the draft to be saved");
    };

    let full = rota.get_full_event(id).await.unwrap();
    assert_eq!(full.subject.shortened_code, "CAL");
    assert_eq!(full.subject.full_display_name, "Calculus II");
}

#[tokio::test]
async fn invalid_draft_is_rejected_and_nothing_is_written() {
    let (rota, _dir) = open_rota().await;

    let mut draft = monday_morning_draft();
    draft.teacher = Teacher::new("  ");

    let outcome = rota.save_new_event(&draft).await.unwrap();
    assert_eq!(outcome, SaveOutcome::Invalid);
    assert!(rota.list_full_events().await.unwrap().is_empty());

    let mut draft = monday_morning_draft();
    draft.start_hour = 10;
    draft.end_hour = 8;
    let outcome = rota.save_new_event(&draft).await.unwrap();
    assert_eq!(outcome, SaveOutcome::Invalid);
    assert!(rota.list_full_events().await.unwrap().is_empty());
}

#[tokio::test]
async fn edit_flow_loads_updates_and_persists() {
    let (rota, _dir) = open_rota().await;
    let SaveOutcome::Saved(id) = rota.save_new_event(&monday_morning_draft()).await.unwrap()
    else {
        panic!("expected the draft to be saved");
    };

    let full = rota.get_full_event(id).await.unwrap();
    let mut draft = EventDraft::from_full_event(&full);
    assert_eq!(draft.id, id);
    assert!(!draft.is_custom_subject);

    draft.day = Weekday::Friday;
    draft.start_hour = 13;
    draft.end_hour = 15;
    draft.obligation = Obligation::Optional;

    let outcome = rota.save_event_edits(&draft).await.unwrap();
    assert_eq!(outcome, SaveOutcome::Saved(id));

    let all = rota.list_full_events().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].event.day, Weekday::Friday);
    assert_eq!(all[0].event.obligation, Obligation::Optional);
}

#[tokio::test]
async fn get_full_event_errors_for_missing_id() {
    let (rota, _dir) = open_rota().await;

    let result = rota.get_full_event(4242).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn removing_an_event_deletes_only_that_event() {
    let (rota, _dir) = open_rota().await;
    let SaveOutcome::Saved(first) = rota.save_new_event(&monday_morning_draft()).await.unwrap()
    else {
        panic!("expected the draft to be saved");
    };

    let mut other = monday_morning_draft();
    other.day = Weekday::Wednesday;
    rota.save_new_event(&other).await.unwrap();

    rota.delete_event(first).await.unwrap();

    let all = rota.list_full_events().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].event.day, Weekday::Wednesday);
}

#[tokio::test]
async fn clear_schedule_empties_events_but_keeps_catalog() {
    let (rota, _dir) = open_rota().await;
    rota.save_new_event(&monday_morning_draft()).await.unwrap();

    let mut other = monday_morning_draft();
    other.day = Weekday::Thursday;
    rota.save_new_event(&other).await.unwrap();

    rota.clear_events().await.unwrap();

    assert!(rota.list_full_events().await.unwrap().is_empty());
    assert_eq!(rota.list_teachers().await.unwrap().len(), 3);
    assert_eq!(rota.list_locations().await.unwrap().len(), 3);
    assert_eq!(rota.list_subjects().await.unwrap().len(), 3);
}

#[tokio::test]
async fn deleting_a_referenced_teacher_fails_and_keeps_the_row() {
    let (rota, _dir) = open_rota().await;
    rota.save_new_event(&monday_morning_draft()).await.unwrap();

    let result = rota.delete_teacher("Dr. Johnson").await;
    assert!(result.is_err());

    assert!(
        rota.list_teachers()
            .await
            .unwrap()
            .iter()
            .any(|t| t.teacher_name == "Dr. Johnson")
    );
}

#[tokio::test]
async fn deleting_an_unreferenced_location_succeeds() {
    let (rota, _dir) = open_rota().await;

    rota.delete_location("B205").await.unwrap();

    let rooms: Vec<_> = rota
        .list_locations()
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.room_code)
        .collect();
    assert_eq!(rooms, vec!["A101", "C310"]);
}

#[tokio::test]
async fn event_writes_notify_watchers() {
    let (rota, _dir) = open_rota().await;
    let mut rx = rota.watch_events();

    rota.save_new_event(&monday_morning_draft()).await.unwrap();
    rx.changed().await.expect("feed alive");

    rota.clear_events().await.unwrap();
    rx.changed().await.expect("feed alive");
}
