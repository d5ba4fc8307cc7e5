use chrono::{TimeZone, Utc};
use rps_arena::error::RpsError;
use rps_arena::results::*;
use rps_arena::session::Scoreboard;

fn result(team: &str, player: u32, ai: u32, hour: u32) -> GameResult {
    let board = Scoreboard {
        player_wins: player,
        opponent_wins: ai,
        draws: 30 - player - ai,
        ..Scoreboard::default()
    };
    let ts = Utc.with_ymd_and_hms(2025, 6, 2, hour, 0, 0).unwrap();
    GameResult::from_scoreboard(team, &board, ts)
}

#[test]
fn test_save_and_load_sorted() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonDirStore::new(dir.path().join("results"));

    let late = result("b2", 8, 12, 14);
    let early = result("a1", 15, 10, 9);
    let path = store.save(&late).unwrap();
    assert!(path.ends_with("B2_20250602T140000.000000.json"));
    store.save(&early).unwrap();

    let loaded = store.load_all().unwrap();
    assert_eq!(loaded, vec![early, late]);
    assert!(loaded[0].win);
    assert!(!loaded[1].win);
}

#[test]
fn test_load_skips_foreign_and_broken_files() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonDirStore::new(dir.path());
    store.save(&result("t1", 10, 10, 10)).unwrap();
    std::fs::write(dir.path().join("notes.txt"), "not a result").unwrap();
    std::fs::write(dir.path().join("broken.json"), "{ \"team_code\": ").unwrap();

    let loaded = store.load_all().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].team_code, "T1");
    assert!(!loaded[0].win, "a tie is not a win");
}

#[test]
fn test_missing_dir_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonDirStore::new(dir.path().join("nothing-here"));
    assert!(store.load_all().unwrap().is_empty());
}

#[test]
fn test_minimal_record_loads() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("X_1.json"),
        r#"{ "team_code": "X", "win": true, "timestamp": "2025-01-01T00:00:00Z" }"#,
    )
    .unwrap();
    let loaded = JsonDirStore::new(dir.path()).load_all().unwrap();
    assert_eq!(loaded.len(), 1);
    assert!(loaded[0].win);
    assert_eq!(loaded[0].player_wins, 0);
}

#[test]
fn test_save_rejects_empty_team() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonDirStore::new(dir.path());
    let mut bad = result("ok", 1, 0, 1);
    bad.team_code = "  ".to_string();
    assert!(matches!(store.save(&bad), Err(RpsError::InvalidTeamCode(_))));
}

#[test]
fn test_save_into_file_path_fails() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();
    let store = JsonDirStore::new(&blocker);
    assert!(matches!(store.save(&result("t9", 1, 0, 1)), Err(RpsError::Io(_))));
}

#[test]
fn test_load_skips_unreadable_json_entries() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonDirStore::new(dir.path());
    store.save(&result("t2", 12, 9, 11)).unwrap();
    std::fs::write(dir.path().join("bad.json"), [0xff, 0xfe, 0x00]).unwrap();
    std::fs::create_dir(dir.path().join("archive.json")).unwrap();

    let loaded = store.load_all().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].team_code, "T2");
}

#[test]
fn test_same_second_saves_are_kept() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonDirStore::new(dir.path());
    let first = result("dup", 10, 5, 12);
    let second = result("dup", 4, 11, 12);
    assert_eq!(first.file_name(), second.file_name());

    let a = store.save(&first).unwrap();
    let b = store.save(&second).unwrap();
    assert_ne!(a, b);
    assert!(b.ends_with("DUP_20250602T120000.000000-1.json"));

    let loaded = store.load_all().unwrap();
    assert_eq!(loaded.len(), 2);
    assert!(loaded.contains(&first));
    assert!(loaded.contains(&second));
}

#[test]
fn test_team_code_with_spaces_is_saved() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonDirStore::new(dir.path());
    let path = store.save(&result(" team a ", 9, 3, 8)).unwrap();
    assert!(path.ends_with("TEAM_A_20250602T080000.000000.json"));

    let loaded = store.load_all().unwrap();
    assert_eq!(loaded[0].team_code, "TEAM A");
}
