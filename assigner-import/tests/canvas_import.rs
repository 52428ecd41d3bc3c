//! Canvas import driver: credential gating, partial failures, enrichment.

use std::cell::Cell;

use assigner_core::{Config, SecondaryId};
use assigner_import::{
    canvas::import_course, CanvasCredentials, CanvasStudent, CourseRoster, ImportError,
    LookupError, UserDirectory,
};

struct FixedCourse(Vec<CanvasStudent>);

impl CourseRoster for FixedCourse {
    fn course_students(&self, _course_id: &str) -> Result<Vec<CanvasStudent>, ImportError> {
        Ok(self.0.clone())
    }
}

struct FailingCourse;

impl CourseRoster for FailingCourse {
    fn course_students(&self, course_id: &str) -> Result<Vec<CanvasStudent>, ImportError> {
        Err(ImportError::Http {
            url: format!("https://canvas.test/api/v1/courses/{course_id}/users"),
            message: "HTTP 401 Unauthorized".into(),
        })
    }
}

/// Knows only the usernames it was built with; ids are 100, 101, ...
struct KnownUsers(Vec<&'static str>);

impl UserDirectory for KnownUsers {
    fn user_id(&self, username: &str) -> Result<SecondaryId, LookupError> {
        self.0
            .iter()
            .position(|u| *u == username)
            .map(|i| SecondaryId::Number(100 + i as i64))
            .ok_or_else(|| LookupError::MissingSecondaryAccount {
                username: username.to_owned(),
            })
    }
}

fn student(sortable_name: &str, sis: Option<&str>) -> CanvasStudent {
    CanvasStudent {
        name: sortable_name.to_owned(),
        sortable_name: sortable_name.to_owned(),
        sis_user_id: sis.map(str::to_owned),
    }
}

fn configured() -> Config {
    Config {
        canvas_token: Some("canvas-secret".into()),
        canvas_host: Some("canvas.test".into()),
        ..Config::default()
    }
}

#[test]
fn missing_token_aborts_before_connecting() {
    let mut config = Config::default();
    config.roster.add("Doe, Jane", "jdoe", "A", false).unwrap();
    let before = config.clone();
    let connected = Cell::new(false);

    let err = import_course(
        &mut config,
        "42",
        "A",
        false,
        |_| {
            connected.set(true);
            FixedCourse(vec![student("Roe, Rick", Some("rroe"))])
        },
        None,
    )
    .unwrap_err();

    assert!(matches!(err, ImportError::MissingCredential { .. }), "got: {err}");
    assert!(!connected.get(), "no client may be built without a token");
    assert_eq!(config, before);
}

#[test]
fn connect_receives_configured_credentials() {
    let mut config = configured();
    let seen = Cell::new(None::<CanvasCredentials>);

    import_course(
        &mut config,
        "42",
        "A",
        false,
        |creds| {
            seen.set(Some(creds));
            FixedCourse(vec![])
        },
        None,
    )
    .unwrap();

    let creds = seen.take().expect("connect called");
    assert_eq!(creds.token, "canvas-secret");
    assert_eq!(creds.host, "canvas.test");
}

#[test]
fn reported_count_is_api_results_not_insertions() {
    let mut config = configured();
    let summary = import_course(
        &mut config,
        "42",
        "A",
        false,
        |_| {
            FixedCourse(vec![
                student("Doe, Jane", Some("jdoe")),
                student("Nameless, N", None),
            ])
        },
        None,
    )
    .unwrap();

    assert_eq!(summary.reported, 2);
    assert_eq!(summary.inserted, 1);
    assert_eq!(config.roster.len(), 1);
}

#[test]
fn unmatched_gitlab_account_keeps_the_record() {
    let mut config = configured();
    let directory = KnownUsers(vec!["jdoe"]);

    let summary = import_course(
        &mut config,
        "42",
        "Lab-1",
        false,
        |_| {
            FixedCourse(vec![
                student("Doe, Jane", Some("jdoe")),
                student("Roe, Rick", Some("rroe")),
            ])
        },
        Some(&directory),
    )
    .unwrap();

    assert_eq!(summary.inserted, 2);
    assert_eq!(summary.unmatched_accounts, 1);

    let records: Vec<_> = config.roster.iter().collect();
    assert_eq!(records[0].secondary_id, Some(SecondaryId::Number(100)));
    assert_eq!(records[1].username, "rroe");
    assert_eq!(records[1].secondary_id, None);
}

#[test]
fn fetch_failure_leaves_roster_untouched() {
    let mut config = configured();
    config.roster.add("Doe, Jane", "jdoe", "A", false).unwrap();
    let before = config.roster.clone();

    let err = import_course(&mut config, "42", "A", false, |_| FailingCourse, None).unwrap_err();
    assert!(matches!(err, ImportError::Http { .. }));
    assert_eq!(config.roster, before);
}

#[test]
fn duplicates_within_one_course_are_collapsed() {
    let mut config = configured();
    let summary = import_course(
        &mut config,
        "42",
        "A",
        false,
        |_| {
            FixedCourse(vec![
                student("Doe, Jane", Some("jdoe")),
                student("Doe, Jane", Some("jdoe")),
            ])
        },
        None,
    )
    .unwrap();

    assert_eq!(summary.reported, 2);
    assert_eq!(summary.duplicates, 1);
    assert_eq!(config.roster.len(), 1);
}
