use std::fmt::Write;

use crate::game::Game;
use crate::state::{GameResult, GameStatus, RoundReport};

/// Customize standings rendering for CLI output.
#[derive(Clone, Copy, Debug)]
pub struct VisualOptions {
    pub show_eliminated: bool,
    pub show_next_card: bool,
}

impl Default for VisualOptions {
    fn default() -> Self {
        Self {
            show_eliminated: true,
            show_next_card: false,
        }
    }
}

pub fn render_standings(game: &Game) -> String {
    render_standings_with_options(game, VisualOptions::default())
}

pub fn render_standings_with_options(game: &Game, options: VisualOptions) -> String {
    let mut out = String::new();
    let status = match game.status() {
        GameStatus::Ongoing => String::from("Ongoing"),
        GameStatus::Finished { winner } => format!("Finished (winner: {})", player_name(game, winner)),
        GameStatus::NoWinner => String::from("Finished (no winner)"),
        GameStatus::Aborted => String::from("Aborted (round limit)"),
    };
    let _ = writeln!(out, "Game status: {status}");
    let _ = writeln!(out, "Rounds played: {}", game.round_count());
    if game.forfeited_cards() > 0 {
        let _ = writeln!(out, "Forfeited cards: {}", game.forfeited_cards());
    }
    let _ = writeln!(out, "Players:");
    let players = game.players();
    for summary in game.standings() {
        if !summary.active && !options.show_eliminated {
            continue;
        }
        let tag = if summary.active { "" } else { " (out)" };
        let _ = write!(out, "  {}{} - {} cards", summary.name, tag, summary.hand_size);
        if options.show_next_card {
            let next = players[summary.id]
                .hand()
                .front()
                .map(|card| card.to_string())
                .unwrap_or_else(|| String::from("--"));
            let _ = write!(out, " (next: {next})");
        }
        let _ = writeln!(out);
    }
    out
}

pub fn describe_round(game: &Game, report: &RoundReport) -> String {
    let mut out = format!("Round {}: ", report.round);
    match report.winner {
        Some(winner) => {
            let _ = write!(
                out,
                "{} collects {} cards",
                player_name(game, winner),
                report.pile_size
            );
        }
        None => {
            let _ = write!(out, "nobody collects the {} cards", report.pile_size);
        }
    }
    if report.batailles > 0 {
        let _ = write!(out, " after {} bataille(s)", report.batailles);
    }
    if !report.eliminated.is_empty() {
        let names: Vec<&str> = report
            .eliminated
            .iter()
            .map(|&id| player_name(game, id))
            .collect();
        let _ = write!(out, "; out: {}", names.join(", "));
    }
    out
}

/// One-line verdict for a finished game.
pub fn describe_result(result: &GameResult) -> String {
    match (&result.winner_name, result.status) {
        (Some(name), _) => format!("Winner is {name} in {} rounds", result.round_count),
        (None, GameStatus::Aborted) => {
            format!("Game aborted after {} rounds", result.round_count)
        }
        (None, _) => format!("No winner in {} rounds", result.round_count),
    }
}

fn player_name(game: &Game, id: usize) -> &str {
    game.players()
        .get(id)
        .map(|player| player.name())
        .unwrap_or("?")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Card;
    use crate::error::GameError;

    #[test]
    fn render_and_describe_include_expected_phrases() -> Result<(), GameError> {
        let mut game = Game::builder(2)?
            .with_hands(vec![vec![Card(3)], vec![Card(1)]])
            .build()?;
        let text = render_standings_with_options(
            &game,
            VisualOptions {
                show_eliminated: true,
                show_next_card: true,
            },
        );
        assert!(text.contains("Game status: Ongoing"));
        assert!(text.contains("Player 0 - 1 cards (next: 3)"));

        let report = game.play_round()?;
        let line = describe_round(&game, &report);
        assert_eq!(line, "Round 1: Player 0 collects 2 cards; out: Player 1");

        let text = render_standings(&game);
        assert!(text.contains("Finished (winner: Player 0)"));
        assert!(text.contains("Player 1 (out) - 0 cards"));
        assert_eq!(describe_result(&game.result()), "Winner is Player 0 in 1 rounds");
        Ok(())
    }

    #[test]
    fn describes_games_without_winner() {
        let result = GameResult {
            winner: None,
            winner_name: None,
            round_count: 1,
            status: GameStatus::NoWinner,
        };
        assert_eq!(describe_result(&result), "No winner in 1 rounds");
        let aborted = GameResult {
            status: GameStatus::Aborted,
            ..result
        };
        assert_eq!(describe_result(&aborted), "Game aborted after 1 rounds");
    }
}
