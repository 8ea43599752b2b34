use std::fs;
use std::path::{Path, PathBuf};

use rating_ledger::config::{AppConfig, Roster};
use rating_ledger::errors::InputError;
use rating_ledger::ledger::Table;
use rating_ledger::services::{ProcessingService, RunOutcome};

struct Workspace {
    dir: tempfile::TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn service(&self) -> ProcessingService {
        let mut config = AppConfig {
            roster: Roster::new(["A", "B", "C", "D", "E"]),
            ..AppConfig::default()
        };
        config.ledger.delta_ledger_path = self.path("delta.csv");
        config.ledger.rating_ledger_path = self.path("rating.csv");
        ProcessingService::new(config)
    }

    fn write_session(&self, body: &str) -> PathBuf {
        let path = self.path("session.csv");
        fs::write(&path, format!("\u{feff}{body}")).unwrap();
        path
    }
}

fn read(path: &Path) -> Table {
    Table::read(path).unwrap()
}

#[test]
fn first_run_creates_both_ledgers() {
    let ws = Workspace::new();
    let input = ws.write_session("日付,半荘,A,B,C,D,E\n2024-03-05,1,1,2,3,4,\n");

    let outcome = ws.service().run(&input).unwrap();

    let RunOutcome::Updated(summary) = outcome else {
        panic!("expected ledgers to be written");
    };
    assert_eq!(summary.scored_matches, 1);
    assert_eq!(summary.games_played[0], ("A".to_string(), 1));
    assert_eq!(summary.games_played[4], ("E".to_string(), 0));

    let delta = fs::read_to_string(ws.path("delta.csv")).unwrap();
    assert_eq!(
        delta,
        "\u{feff}日付,半荘,平均Rt.,A,B,C,D,E\r\n2024/3/5,1,1500.0,30.0,10.0,-10.0,-30.0,0\r\n"
    );
    let rating = fs::read_to_string(ws.path("rating.csv")).unwrap();
    assert_eq!(
        rating,
        "\u{feff}日付,半荘,A,B,C,D,E\r\n2024/3/5,1,1530.0,1510.0,1490.0,1470.0,1500.0\r\n"
    );
}

#[test]
fn second_run_with_same_input_changes_nothing() {
    let ws = Workspace::new();
    let input = ws.write_session(
        "日付,半荘,A,B,C,D,E\n2024/3/5,1,1,2,3,4,\n2024/3/5,2,,4,1,2,3\n2024/3/6,1,2,1,4,,3\n",
    );
    let service = ws.service();

    assert!(matches!(service.run(&input).unwrap(), RunOutcome::Updated(_)));
    let delta_before = fs::read(ws.path("delta.csv")).unwrap();
    let rating_before = fs::read(ws.path("rating.csv")).unwrap();

    assert_eq!(service.run(&input).unwrap(), RunOutcome::NoNewMatches);
    assert_eq!(fs::read(ws.path("delta.csv")).unwrap(), delta_before);
    assert_eq!(fs::read(ws.path("rating.csv")).unwrap(), rating_before);
}

#[test]
fn processed_match_is_skipped_across_date_formats() {
    let ws = Workspace::new();
    fs::write(
        ws.path("delta.csv"),
        "日付,半荘,平均Rt.,A,B,C,D,E\n2024/3/5,1,1500.0,30.0,10.0,-10.0,-30.0,0\n",
    )
    .unwrap();
    fs::write(
        ws.path("rating.csv"),
        "日付,半荘,A,B,C,D,E\n2024/3/5,1,1530.0,1510.0,1490.0,1470.0,1500.0\n",
    )
    .unwrap();
    let input = ws.write_session(
        "Date,game,A,B,C,D,E\n2024-03-05,1,1,2,3,4,\n2024-03-05,2,1,2,3,4,\n",
    );

    let outcome = ws.service().run(&input).unwrap();

    assert!(matches!(outcome, RunOutcome::Updated(ref s) if s.scored_matches == 1));
    let delta = read(&ws.path("delta.csv"));
    assert_eq!(delta.len(), 2);
    assert_eq!(delta.rows[1].get("半荘"), Some("2"));

    // A has one prior game and sits 30 above the table average of 1500.
    // 0.998 * (30 + (1500 - 1530) / 40) = 29.19
    assert_eq!(delta.rows[1].get("A"), Some("29.19"));
    let rating = read(&ws.path("rating.csv"));
    assert_eq!(rating.rows[1].get("A"), Some("1559.19"));
    assert_eq!(rating.rows[1].get("E"), Some("1500.0"));
}

#[test]
fn no_new_matches_leaves_missing_ledgers_missing() {
    let ws = Workspace::new();
    let input = ws.write_session("日付,半荘,A,B,C,D,E\n2024/3/5,1,,,,,\n");

    assert_eq!(ws.service().run(&input).unwrap(), RunOutcome::NoNewMatches);
    assert!(!ws.path("delta.csv").exists());
    assert!(!ws.path("rating.csv").exists());
}

#[test]
fn missing_input_aborts_before_writing() {
    let ws = Workspace::new();
    fs::write(ws.path("delta.csv"), "untouched").unwrap();

    let err = ws.service().run(&ws.path("absent.csv")).unwrap_err();

    assert!(matches!(err.downcast_ref::<InputError>(), Some(InputError::Missing(_))));
    assert_eq!(fs::read_to_string(ws.path("delta.csv")).unwrap(), "untouched");
}

#[test]
fn legacy_ledgers_are_rewritten_in_canonical_schema() {
    let ws = Workspace::new();
    fs::write(
        ws.path("delta.csv"),
        "Date.,game,A,B\n1999/1/1,0,0,0\n2024/3/4,1,12.5,-12.5\n",
    )
    .unwrap();
    fs::write(
        ws.path("rating.csv"),
        "Date.,game,A,B\n1999/1/1,0,1500,1500\n2024/3/4,1,1512.5,1487.5\n",
    )
    .unwrap();
    let input = ws.write_session("日付,半荘,A,B\n2024/3/5,1,1,2\n");

    ws.service().run(&input).unwrap();

    let delta = read(&ws.path("delta.csv"));
    assert_eq!(delta.headers, ["日付", "半荘", "平均Rt.", "A", "B", "C", "D", "E"]);
    assert_eq!(delta.len(), 3);
    assert_eq!(delta.rows[0].get("日付"), Some("1999/1/1"));
    assert_eq!(delta.rows[1].get("C"), Some("0"));
    assert_eq!(delta.rows[2].get("平均Rt."), Some("1500.0"));

    let rating = read(&ws.path("rating.csv"));
    assert_eq!(rating.rows[1].get("E"), Some("1500.0"));
    assert_eq!(rating.rows[2].get("C"), Some("1500.0"));
}

#[test]
fn unreadable_ledger_falls_back_to_empty_history() {
    let ws = Workspace::new();
    fs::write(ws.path("delta.csv"), [0xff, 0xfe, 0x00, 0xc3, 0x28]).unwrap();
    let input = ws.write_session("日付,半荘,A,B,C,D,E\n2024/3/5,1,1,2,3,4,\n");

    let outcome = ws.service().run(&input).unwrap();

    assert!(matches!(outcome, RunOutcome::Updated(ref s) if s.scored_matches == 1));
    let delta = read(&ws.path("delta.csv"));
    assert_eq!(delta.len(), 1);
    assert_eq!(delta.rows[0].get("A"), Some("30.0"));
    assert_eq!(delta.rows[0].get("平均Rt."), Some("1500.0"));
}

#[test]
fn unreadable_input_aborts_before_writing() {
    let ws = Workspace::new();
    fs::write(ws.path("delta.csv"), "untouched delta").unwrap();
    fs::write(ws.path("rating.csv"), "untouched rating").unwrap();
    let input = ws.path("session.csv");
    fs::write(&input, [0x41, 0x2c, 0xff, 0xfe, 0x0a]).unwrap();

    let err = ws.service().run(&input).unwrap_err();

    assert!(matches!(err.downcast_ref::<InputError>(), Some(InputError::Io { .. })));
    assert_eq!(fs::read_to_string(ws.path("delta.csv")).unwrap(), "untouched delta");
    assert_eq!(fs::read_to_string(ws.path("rating.csv")).unwrap(), "untouched rating");
}
