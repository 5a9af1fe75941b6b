//! End-to-end tests for the CLI commands, without the argument parser.

use std::fs;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use rxqa_cli::cli::{BadgesArgs, FormArgs, SessionArgs, SubmitArgs, TokenArgs};
use rxqa_cli::commands::{
    run_badges, run_check, run_reset, run_submit, run_token_encode, run_token_status,
};
use rxqa_model::FieldName;
use tempfile::tempdir;

fn today() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(2026, 10, 19)
}

fn paracetamol_form() -> FormArgs {
    FormArgs {
        medication: "paracetamol".to_string(),
        date_of_birth: "1990-05-15".to_string(),
        weight: "70".to_string(),
        dosage: "700".to_string(),
        frequency: "2".to_string(),
        today: today(),
    }
}

fn submit_args(path: &Path, form: FormArgs, enter: bool) -> SubmitArgs {
    SubmitArgs {
        form,
        session: SessionArgs {
            session_file: path.to_path_buf(),
        },
        enter,
    }
}

fn badges_args(path: &Path, export: bool) -> BadgesArgs {
    BadgesArgs {
        session: SessionArgs {
            session_file: path.to_path_buf(),
        },
        export,
    }
}

#[test]
fn check_reports_errors_per_field() {
    let report = run_check(&FormArgs {
        today: today(),
        ..FormArgs::default()
    })
    .expect("check");

    assert!(report.has_errors());
    assert_eq!(report.fields.len(), FieldName::ALL.len());
    let weight = report
        .fields
        .iter()
        .find(|field| field.field == FieldName::Weight)
        .expect("weight");
    assert_eq!(weight.messages, vec!["Weight is required".to_string()]);
    assert_eq!(weight.tags[0].as_str(), "empty_value");
}

#[test]
fn nominal_check_has_form_tags() {
    let report = run_check(&paracetamol_form()).expect("check");
    assert!(!report.has_errors());
    let tags: Vec<&str> = report.form_tags.iter().map(|tag| tag.as_str()).collect();
    assert_eq!(tags, vec!["nominal_form", "nominal_form_paracetamol"]);
}

#[test]
fn submissions_accumulate_in_the_session_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("session.json");

    let first = run_submit(&submit_args(&path, paracetamol_form(), true)).expect("first");
    assert_eq!(first.revision, 1);
    assert!(!first.signals.any());
    assert!(first.new_form_tags.contains("enter_submit"));

    let second = run_submit(&submit_args(&path, paracetamol_form(), true)).expect("second");
    assert_eq!(second.revision, 2);
    assert!(second.new_form_tags.is_empty());
    assert_eq!(second.total_badges, first.total_badges);

    let export = run_badges(&badges_args(&path, true)).expect("badges");
    let exported = rxqa_badges::format_for_submission(
        export.session.accomplishments(),
        export.session.form_accomplishments(),
    );
    assert!(exported.contains("weight_paracetamol_nominal"));
    assert!(exported.ends_with("form_nominal_form_paracetamol"));
}

#[test]
fn edited_session_file_earns_storage_tampering() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("session.json");
    run_submit(&submit_args(&path, paracetamol_form(), false)).expect("submit");

    let edited = fs::read_to_string(&path)
        .expect("read")
        .replace("paracetamol_nominal", "naproxen_nominal");
    fs::write(&path, edited).expect("write");

    let badges = run_badges(&badges_args(&path, false)).expect("badges");
    assert!(badges.signals.tampered);
    assert!(badges.session.pending().storage_tampering);
    assert!(badges.session.accomplishments()[&FieldName::Weight].contains("paracetamol_nominal"));

    let next = run_submit(&submit_args(&path, FormArgs::default(), false)).expect("submit");
    assert!(!next.signals.any());
    assert!(next.new_form_tags.contains("storage_tampering"));
}

#[test]
fn reset_removes_the_session() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("session.json");
    run_submit(&submit_args(&path, paracetamol_form(), false)).expect("submit");

    run_reset(&SessionArgs {
        session_file: path.clone(),
    })
    .expect("reset");

    let badges = run_badges(&badges_args(&path, false)).expect("badges");
    assert_eq!(badges.session.total(), 0);
    assert!(!badges.signals.any());
}

#[test]
fn token_round_trip_and_status() {
    let token = run_token_encode(&TokenArgs {
        email: "tester@example.com".to_string(),
        date: "2026-10-19".to_string(),
        time: "14:30".to_string(),
        duration: "3h".to_string(),
        base_url: None,
    })
    .expect("encode");

    let now = NaiveDateTime::parse_from_str("2026-10-19T15:00:00", "%Y-%m-%dT%H:%M:%S")
        .expect("datetime");
    let (decoded, status) = run_token_status(&token, Some(now)).expect("status");
    assert_eq!(decoded.email, "tester@example.com");
    assert!(status.is_open());
    insta::assert_snapshot!(status.to_string(), @"Access valid. Time remaining: 150 minute(s).");
}

#[test]
fn token_with_bad_window_is_refused() {
    let result = run_token_encode(&TokenArgs {
        email: "tester@example.com".to_string(),
        date: "2026-10-19".to_string(),
        time: "14:30".to_string(),
        duration: "three hours".to_string(),
        base_url: None,
    });
    assert!(result.is_err());
}
