use rps_arena::config::GameConfig;
use rps_arena::play::run_interactive_session;
use rps_arena::random::ScriptedDraws;
use rps_arena::results::{JsonDirStore, ResultStore};
use rps_arena::session::Session;

fn short_game(rounds: u32) -> Session<ScriptedDraws> {
    let config = GameConfig {
        round_limit: Some(rounds),
        time_limit_secs: None,
        ..GameConfig::classic()
    };
    Session::new(config, ScriptedDraws::constant(0.5))
}

fn run(session: &mut Session<ScriptedDraws>, team: Option<&str>, store: Option<&dyn ResultStore>, input: &[u8]) -> String {
    let mut reader = input;
    let mut output = Vec::new();
    run_interactive_session(session, team.map(String::from), store, &mut reader, &mut output);
    String::from_utf8(output).unwrap()
}

#[test]
fn test_quit_at_team_prompt() {
    let mut session = short_game(3);
    let out = run(&mut session, None, None, b"q\n");
    assert!(out.contains("RPS Arena: can you outsmart the AI?"));
    assert!(out.is_ascii(), "banner and prompts stay plain ASCII");
    assert!(out.contains("Thanks for playing"));
    assert!(session.history().is_empty());
}

#[test]
fn test_full_game_saves_result() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonDirStore::new(dir.path());
    let mut session = short_game(3);
    let out = run(&mut session, Some("T7"), Some(&store), b"r\npaper\nS\nn\n");

    assert!(out.contains("Game Over"));
    assert!(out.contains("Result saved"));
    assert_eq!(session.history().len(), 3);

    let saved = store.load_all().unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].team_code, "T7");
    let board = session.scoreboard();
    assert_eq!(saved[0].player_wins, board.player_wins);
    assert_eq!(saved[0].win, board.player_won());
}

#[test]
fn test_team_prompt_validates() {
    let mut session = short_game(1);
    let out = run(&mut session, None, None, b"   \nteam a\nr\nn\n");
    assert!(out.contains("Invalid team code"));
    assert!(out.contains("Game Over"));
}

#[test]
fn test_bad_move_and_stats() {
    let mut session = short_game(2);
    let out = run(&mut session, Some("X"), None, b"lizard\nstats\nr\nr\nn\n");
    assert!(out.contains("Invalid move"));
    assert!(out.contains("Best Streak"));
    assert_eq!(session.history().len(), 2);
}

#[test]
fn test_quit_mid_game_does_not_save() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonDirStore::new(dir.path());
    let mut session = short_game(5);
    let out = run(&mut session, Some("X"), Some(&store), b"r\nq\n");
    assert!(!out.contains("Game Over"));
    assert_eq!(session.history().len(), 1);
    assert!(store.load_all().unwrap().is_empty());
}

#[test]
fn test_play_again_starts_fresh() {
    let mut session = short_game(2);
    let out = run(&mut session, Some("X"), None, b"r\nr\ny\np\np\nn\n");
    assert_eq!(out.matches("Game Over").count(), 2);
    let history: Vec<_> = session.history().iter().map(|r| r.player_move.name()).collect();
    assert_eq!(history, vec!["Paper", "Paper"]);
}

#[test]
fn test_failed_save_is_a_warning() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();
    let store = JsonDirStore::new(&blocker);
    let mut session = short_game(1);
    let out = run(&mut session, Some("X"), Some(&store), b"s\nn\n");
    assert!(out.contains("Could not save result"));
    assert!(out.contains("Thanks for playing"));
    assert_eq!(session.scoreboard().rounds(), 1);
}
