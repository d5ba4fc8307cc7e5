use std::io::{self, BufRead, Write};
use std::time::Instant;

use chrono::Utc;
use colored::Colorize;

use crate::display::{history_table, move_display, rate_bar, scoreboard_table, styled_outcome};
use crate::moves::parse_move;
use crate::random::RandomSource;
use crate::results::{validate_team_code, ResultStore};
use crate::session::Session;

// ---------------------------------------------------------------------------
// Input helpers
// ---------------------------------------------------------------------------

fn prompt(message: &str, default: Option<&str>, reader: &mut dyn BufRead, writer: &mut dyn Write) -> String {
    if let Some(d) = default {
        write!(writer, "{} [{}]: ", message, d).ok();
    } else {
        write!(writer, "{}: ", message).ok();
    }
    writer.flush().ok();

    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) => "q".to_string(),
        Ok(_) => {
            let trimmed = line.trim().to_string();
            if trimmed.is_empty() {
                default.unwrap_or("").to_string()
            } else {
                trimmed
            }
        }
        Err(_) => "q".to_string(),
    }
}

fn prompt_yn(message: &str, default: &str, reader: &mut dyn BufRead, writer: &mut dyn Write) -> Option<bool> {
    let answer = prompt(&format!("{} (y/n)", message), Some(default), reader, writer);
    if answer.to_lowercase() == "q" {
        return None;
    }
    Some(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
}

fn is_quit(input: &str) -> bool {
    matches!(input.to_lowercase().as_str(), "q" | "quit" | "exit")
}

// ---------------------------------------------------------------------------
// Interactive session
// ---------------------------------------------------------------------------

struct QuitSession;

pub fn play_command<R: RandomSource>(
    session: &mut Session<R>,
    team: Option<String>,
    store: Option<&dyn ResultStore>,
) {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut reader = stdin.lock();
    let mut writer = stdout.lock();
    run_interactive_session(session, team, store, &mut reader, &mut writer);
}

pub fn run_interactive_session<R: RandomSource>(
    session: &mut Session<R>,
    team: Option<String>,
    store: Option<&dyn ResultStore>,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) {
    writeln!(writer).ok();
    writeln!(writer, "{}", "RPS Arena: can you outsmart the AI?".cyan().bold()).ok();
    writeln!(
        writer,
        "Moves: {} / {} / {}. Type {} for the scoreboard, {} to quit.\n",
        "r".bold(),
        "p".bold(),
        "s".bold(),
        "'stats'".bold(),
        "'q'".bold()
    )
    .ok();

    let team = match team {
        Some(code) => code,
        None => match ask_team_code(reader, writer) {
            Ok(code) => code,
            Err(QuitSession) => {
                writeln!(writer, "\n{}\n", "Thanks for playing.".cyan().bold()).ok();
                return;
            }
        },
    };

    loop {
        session.reset();
        match play_one_game(session, reader, writer) {
            Ok(()) => finish_game(session, &team, store, writer),
            Err(QuitSession) => {
                writeln!(writer, "\n{}\n", "Thanks for playing.".cyan().bold()).ok();
                return;
            }
        }

        match prompt_yn("\nPlay again?", "n", reader, writer) {
            Some(true) => continue,
            _ => {
                writeln!(writer, "\n{}\n", "Thanks for playing.".cyan().bold()).ok();
                return;
            }
        }
    }
}

fn ask_team_code(reader: &mut dyn BufRead, writer: &mut dyn Write) -> Result<String, QuitSession> {
    loop {
        let input = prompt("  Team code", None, reader, writer);
        if is_quit(&input) {
            return Err(QuitSession);
        }
        match validate_team_code(&input) {
            Ok(code) => return Ok(code),
            Err(e) => {
                writeln!(writer, "  {}", e.to_string().red()).ok();
            }
        }
    }
}

fn round_banner<R: RandomSource>(session: &Session<R>, now: Instant) -> String {
    let mut parts = vec![format!("Round {}", session.round())];
    if let Some(limit) = session.config().round_limit {
        parts.push(format!("of {}", limit));
    }
    let mut banner = parts.join(" ");
    if let Some(remaining) = session.remaining_time_at(now) {
        banner.push_str(&format!("  |  {}s left", remaining.as_secs()));
    }
    banner
}

fn play_one_game<R: RandomSource>(
    session: &mut Session<R>,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> Result<(), QuitSession> {
    loop {
        let now = Instant::now();
        if session.is_over_at(now) {
            return Ok(());
        }

        writeln!(writer, "\n{}", format!("--- {} ---", round_banner(session, now)).cyan().bold()).ok();
        let input = prompt("  Your move (r/p/s)", None, reader, writer);
        if is_quit(&input) {
            return Err(QuitSession);
        }
        if input.eq_ignore_ascii_case("stats") {
            writeln!(writer, "{}", scoreboard_table(session.scoreboard())).ok();
            continue;
        }
        let player_move = match parse_move(&input) {
            Ok(m) => m,
            Err(e) => {
                writeln!(writer, "  {}", e.to_string().red()).ok();
                continue;
            }
        };

        let record = match session.play_round(player_move) {
            Some(record) => record,
            None => {
                writeln!(writer, "\n  {}", "Time's up! That move came too late.".yellow().bold()).ok();
                return Ok(());
            }
        };

        writeln!(writer, "  AI:     {}", move_display(record.opponent_move)).ok();
        writeln!(writer, "  You:    {}", move_display(record.player_move)).ok();
        writeln!(writer, "  Result: {}", styled_outcome(record.outcome)).ok();

        let board = session.scoreboard();
        writeln!(
            writer,
            "  {}",
            format!(
                "You {}  AI {}  Draws {}",
                board.player_wins, board.opponent_wins, board.draws
            )
            .dimmed()
        )
        .ok();
    }
}

fn finish_game<R: RandomSource>(
    session: &Session<R>,
    team: &str,
    store: Option<&dyn ResultStore>,
    writer: &mut dyn Write,
) {
    let board = session.scoreboard();
    writeln!(writer, "\n{}", "--- Game Over ---".cyan().bold()).ok();
    writeln!(writer, "{}", scoreboard_table(board)).ok();
    if !session.history().is_empty() {
        writeln!(writer, "{}", history_table(session.history())).ok();
    }

    let verdict = if board.player_won() {
        "You beat the AI!".green().bold().to_string()
    } else if board.player_wins == board.opponent_wins {
        "Dead even.".yellow().bold().to_string()
    } else {
        "The AI read you this time.".red().bold().to_string()
    };
    writeln!(writer, "\n  {}", verdict).ok();
    writeln!(writer, "  AI win rate: {}", rate_bar(board.opponent_win_rate(), 20)).ok();
    log::info!(
        "team {} finished: {}-{}-{}",
        team,
        board.player_wins,
        board.opponent_wins,
        board.draws
    );

    if let Some(store) = store {
        let result = session.result(team, Utc::now());
        match store.save(&result) {
            Ok(path) => {
                writeln!(writer, "  {} Result saved to {}", "\u{2713}".green(), path.display()).ok();
            }
            Err(e) => {
                log::warn!("could not save result for {}: {}", team, e);
                writeln!(writer, "  {} Could not save result: {}", "\u{2717}".yellow(), e).ok();
            }
        }
    }
}
