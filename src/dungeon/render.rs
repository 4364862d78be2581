//! Plain-text rendering of game outcomes for the terminal front end.

use std::fmt::Write as _;
use std::time::Duration;

use super::combat::{CombatEvent, CombatStatus, TurnReport};
use super::errors::DungeonError;
use super::game::{CommandOutcome, FinalScore, RoomView, StatusReport};
use super::types::{Enemy, Item, Score};
use crate::logutil::format_duration;

pub fn render_room(room: &RoomView) -> String {
    let mut out = format!("{}\n{}", room.name, room.description);
    if let Some(note) = &room.note {
        let _ = write!(out, "\n{}", note);
    }
    if room.exits.is_empty() {
        out.push_str("\nThere are no exits.");
    } else {
        let _ = write!(out, "\nExits: {}", room.exits.join(", "));
    }
    if room.items.is_empty() {
        out.push_str("\nThe room is empty.");
    } else {
        out.push_str("\nItems here:");
        for item in &room.items {
            let _ = write!(out, "\n  {} - {}", item.name, item.description);
        }
    }
    out
}

fn render_items(items: &[Item]) -> String {
    items
        .iter()
        .map(|item| format!("  {} ({} pts) - {}", item.name, item.value, item.description))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_ambush(enemy: &Enemy) -> String {
    format!(
        "A {} appears! (HP {}, ATK {})\nChoose: 1) attack  2) potion  3) run",
        enemy.name, enemy.health, enemy.attack_power
    )
}

pub fn render_turn(report: &TurnReport) -> String {
    let mut lines: Vec<String> = report
        .events
        .iter()
        .map(|event| match event {
            CombatEvent::PlayerHit { damage } => {
                format!("You hit the {} for {} damage.", report.enemy_name, damage)
            }
            CombatEvent::EnemyHit { damage } => {
                format!("The {} hits you for {} damage.", report.enemy_name, damage)
            }
            CombatEvent::PotionUsed { healed } => format!("You drink a potion and heal {} HP.", healed),
            CombatEvent::NoPotion => "You have no potion!".to_string(),
            CombatEvent::EscapeFailed => "You failed to escape!".to_string(),
            CombatEvent::Escaped => "You escaped!".to_string(),
        })
        .collect();

    match &report.status {
        CombatStatus::Ongoing => lines.push(format!(
            "You: {} HP | {}: {} HP",
            report.player_health, report.enemy_name, report.enemy_health
        )),
        CombatStatus::EnemyDefeated { loot } => {
            lines.push(format!("You defeated the {}!", report.enemy_name));
            if let Some(item) = loot {
                lines.push(format!("You found: {} (+{} pts)", item.name, item.value));
            }
        }
        CombatStatus::PlayerDefeated => lines.push("You have been defeated!".to_string()),
        CombatStatus::Escaped => {}
    }
    lines.join("\n")
}

pub fn render_status(status: &StatusReport, remaining: Duration) -> String {
    let mut out = String::from("=== Game Status ===");
    let _ = write!(
        out,
        "\nItems collected: {}/{}\nPuzzles solved: {}/{}\nScore: {}\nHealth: {}/{}\nTime remaining: {}",
        status.required_items_held,
        status.required_items_total,
        status.puzzles_solved,
        status.puzzles_total,
        status.score,
        status.health,
        status.max_health,
        format_duration(remaining)
    );
    if status.inventory.is_empty() {
        out.push_str("\nInventory: empty");
    } else {
        let _ = write!(
            out,
            "\nInventory (total value {}):\n{}",
            status.inventory_value,
            render_items(&status.inventory)
        );
    }
    if !status.unsolved.is_empty() {
        let _ = write!(out, "\nRemaining puzzles: {}", status.unsolved.join(", "));
    }
    if let Some(question) = &status.current_question {
        let _ = write!(out, "\nCurrent puzzle: {}", question);
    }
    out
}

pub fn render_scores(scores: &[Score]) -> String {
    if scores.is_empty() {
        return "No high scores yet!".to_string();
    }
    let mut out = String::from("=== High Scores ===");
    for (rank, score) in scores.iter().enumerate() {
        let _ = write!(
            out,
            "\n{:>2}. {} - {} points ({})",
            rank + 1,
            score.player_name,
            score.score,
            format_duration(Duration::from_secs(score.time_taken_secs))
        );
    }
    out
}

pub fn render_final(final_score: &FinalScore) -> String {
    let mut out = format!(
        "Congratulations, {}! You've won the game!\nTime taken: {}\nFinal score: {}\nTime bonus: {}\nTotal: {}",
        final_score.player_name,
        format_duration(Duration::from_secs(final_score.time_taken_secs)),
        final_score.base,
        final_score.time_bonus,
        final_score.total
    );
    match final_score.rank {
        Some(rank) => {
            let _ = write!(out, "\nNew high score! You ranked #{}.", rank + 1);
        }
        None => out.push_str("\nNot quite enough for the high-score table."),
    }
    out
}

/// `remaining` is only used by the status view.
pub fn render_outcome(outcome: &CommandOutcome, remaining: Duration) -> String {
    match outcome {
        CommandOutcome::Moved { room, encounter } => {
            let mut out = render_room(room);
            if let Some(enemy) = encounter {
                let _ = write!(out, "\n\n{}", render_ambush(enemy));
            }
            out
        }
        CommandOutcome::Retraced { direction, room } => {
            format!("You went {} to the {}.\n{}", direction, room.name, render_room(room))
        }
        CommandOutcome::Taken { item, score } => {
            format!("Taken: {} (+{} pts, score {})", item.name, item.value, score)
        }
        CommandOutcome::Dropped { item } => format!("Dropped: {}", item.name),
        CommandOutcome::Solved { puzzle, score } => {
            let mut out = format!(
                "Correct! You solved the {} puzzle. +{} points (score {})",
                puzzle.kind, puzzle.points, score
            );
            if puzzle.via_alternative {
                out.push_str("\nYour items resonated with an alternative solution!");
            }
            out
        }
        CommandOutcome::Hint {
            kind,
            question,
            hint,
        } => format!("Puzzle ({}): {}\nHint: {}", kind, question, hint),
        CommandOutcome::SearchResults { min, max, items } => {
            if items.is_empty() {
                format!("No items found between {} and {} points.", min, max)
            } else {
                format!(
                    "Items worth {} to {} points:\n{}",
                    min,
                    max,
                    render_items(items)
                )
            }
        }
        CommandOutcome::Status(status) => render_status(status, remaining),
        CommandOutcome::Look(room) => render_room(room),
        CommandOutcome::Inventory { items, total_value } => {
            if items.is_empty() {
                "Your inventory is empty.".to_string()
            } else {
                format!(
                    "Inventory (total value {}):\n{}",
                    total_value,
                    render_items(items)
                )
            }
        }
        CommandOutcome::Scores(scores) => render_scores(scores),
        CommandOutcome::Combat(report) => render_turn(report),
    }
}

pub fn render_error(err: &DungeonError) -> String {
    match err {
        DungeonError::InsufficientValue {
            current,
            required,
            shortfall,
        } => format!(
            "Your items aren't powerful enough!\nCurrent combined value: {}\nRequired value: {}\nYou need {} more points.",
            current, required, shortfall
        ),
        DungeonError::WrongAnswer => "Incorrect. Try again later!".to_string(),
        DungeonError::InCombat => "You're in combat! Choose: 1) attack  2) potion  3) run".to_string(),
        other => {
            let mut text = other.to_string();
            if let Some(first) = text.get_mut(0..1) {
                first.make_ascii_uppercase();
            }
            format!("{}.", text)
        }
    }
}
