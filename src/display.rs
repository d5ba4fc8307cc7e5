use colored::Colorize;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use crate::moves::{Move, Outcome};
use crate::results::GameResult;
use crate::session::{RoundRecord, Scoreboard};
use crate::simulate::{PlayerPattern, SimulationSummary};

pub fn move_display(m: Move) -> String {
    let text = format!("{} {}", m.symbol(), m.name());
    match m {
        Move::Rock => text.yellow().bold().to_string(),
        Move::Paper => text.cyan().bold().to_string(),
        Move::Scissors => text.magenta().bold().to_string(),
    }
}

pub fn styled_outcome(outcome: Outcome) -> String {
    let text = outcome.to_string();
    match outcome {
        Outcome::PlayerWin => text.green().bold().to_string(),
        Outcome::OpponentWin => text.red().bold().to_string(),
        Outcome::Draw => text.dimmed().bold().to_string(),
    }
}

pub fn rate_bar(rate: f64, width: usize) -> String {
    let rate = rate.clamp(0.0, 1.0);
    let filled = (rate * width as f64) as usize;
    let bar: String = "\u{2588}".repeat(filled) + &"\u{2591}".repeat(width - filled);
    let pct = format!("{:.1}%", rate * 100.0);

    if rate >= 0.5 {
        format!("{} {}", bar.green(), pct)
    } else if rate >= 0.33 {
        format!("{} {}", bar.yellow(), pct)
    } else {
        format!("{} {}", bar.red(), pct)
    }
}

pub fn scoreboard_table(board: &Scoreboard) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("").set_alignment(CellAlignment::Left),
        Cell::new("Wins").set_alignment(CellAlignment::Right),
        Cell::new("Streak").set_alignment(CellAlignment::Right),
        Cell::new("Best Streak").set_alignment(CellAlignment::Right),
    ]);

    table.add_row(vec![
        Cell::new("You".bold().to_string()),
        Cell::new(board.player_wins).set_alignment(CellAlignment::Right),
        Cell::new(board.player_streak).set_alignment(CellAlignment::Right),
        Cell::new(board.max_player_streak).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("AI".bold().to_string()),
        Cell::new(board.opponent_wins).set_alignment(CellAlignment::Right),
        Cell::new(board.opponent_streak).set_alignment(CellAlignment::Right),
        Cell::new(board.max_opponent_streak).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Draws".bold().to_string()),
        Cell::new(board.draws).set_alignment(CellAlignment::Right),
        Cell::new(""),
        Cell::new(""),
    ]);

    table.to_string()
}

pub fn history_table(history: &[RoundRecord]) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Round"),
        Cell::new("You"),
        Cell::new("AI"),
        Cell::new("Result"),
        Cell::new("AI read"),
    ]);

    for record in history {
        table.add_row(vec![
            Cell::new(record.round).set_alignment(CellAlignment::Right),
            Cell::new(record.player_move.name()),
            Cell::new(record.opponent_move.name()),
            Cell::new(styled_outcome(record.outcome)),
            Cell::new(format!("{} ({})", record.predicted.name(), record.rule).dimmed().to_string()),
        ]);
    }

    table.to_string()
}

pub fn results_table(results: &[GameResult]) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Team"),
        Cell::new("Won"),
        Cell::new("You"),
        Cell::new("AI"),
        Cell::new("Draws"),
        Cell::new("Finished (UTC)"),
    ]);

    for result in results {
        let won = if result.win {
            "yes".green().bold().to_string()
        } else {
            "no".dimmed().to_string()
        };
        table.add_row(vec![
            Cell::new(&result.team_code),
            Cell::new(won),
            Cell::new(result.player_wins).set_alignment(CellAlignment::Right),
            Cell::new(result.opponent_wins).set_alignment(CellAlignment::Right),
            Cell::new(result.draws).set_alignment(CellAlignment::Right),
            Cell::new(result.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()),
        ]);
    }

    table.to_string()
}

pub fn simulation_table(pattern: PlayerPattern, summary: &SimulationSummary) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new(format!("vs {}", pattern)),
        Cell::new("Rate"),
    ]);

    table.add_row(vec![
        Cell::new("AI wins".bold().to_string()),
        Cell::new(rate_bar(summary.opponent_win_rate(), 20)),
    ]);
    table.add_row(vec![
        Cell::new("Player wins".bold().to_string()),
        Cell::new(format!("{:.1}%", summary.player_win_rate() * 100.0)),
    ]);
    table.add_row(vec![
        Cell::new("Draws".bold().to_string()),
        Cell::new(format!("{:.1}%", summary.draw_rate() * 100.0)),
    ]);
    table.add_row(vec![
        Cell::new("Games won by AI".bold().to_string()),
        Cell::new(format!("{} / {}", summary.opponent_game_wins, summary.games)),
    ]);

    table.to_string()
}

pub fn print_section(title: &str, content: &str) {
    println!("\n{}", title.cyan().bold());
    println!("  {}", content);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "Error:".red().bold(), msg);
}

pub fn print_success(msg: &str) {
    println!("{}", msg.green().bold());
}
