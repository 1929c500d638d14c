//! Text views over the session and catalogue. Pure functions, no decisions.

use opening_core::model::{FamousGame, Opening, OpeningSummary};
use opening_core::notation::{extract_moves, format_line};
use shakmaty::{Color, File, Position as _, Rank, Square};

use crate::oracle::Position;
use crate::session::{Mode, Session};

/// Board from White's side, rank 8 first.
pub fn render_board(position: &Position) -> String {
    let chess = position.board();
    let mut out = String::new();

    for rank in (0..8u32).rev() {
        out.push_str(&format!("{} ", rank + 1));
        for file in 0..8u32 {
            let sq = Square::from_coords(File::new(file), Rank::new(rank));
            let c = chess.board().piece_at(sq).map_or('.', |p| p.char());
            out.push(' ');
            out.push(c);
        }
        out.push('\n');
    }
    out.push_str("   a b c d e f g h\n");

    let to_move = match chess.turn() {
        Color::White => "White",
        Color::Black => "Black",
    };
    out.push_str(&format!("{to_move} to move"));
    out
}

pub fn render_status(session: &Session) -> String {
    let mut lines = Vec::new();

    match session.mode() {
        Mode::FreePlay => lines.push(Mode::FreePlay.to_string()),
        Mode::Practicing => {
            let name = session.variation_name().unwrap_or("?");
            let id = session.opening_id().map_or_else(String::new, |id| format!(" (#{id})"));
            lines.push(format!(
                "Practicing {name}{id}: {}/{} moves",
                session.progress_index(),
                session.moves().len()
            ));
            let played = &session.moves()[..session.progress_index()];
            if !played.is_empty() {
                lines.push(format_line(played));
            }
        }
    }

    if session.wrong_move_flag() {
        lines.push("Wrong move pending. `undo` returns to your last correct move.".to_string());
    }
    if !session.feedback().is_empty() {
        lines.push(session.feedback().to_string());
    }
    lines.join("\n")
}

pub fn render_openings(openings: &[OpeningSummary]) -> String {
    if openings.is_empty() {
        return "No openings available.".to_string();
    }

    openings
        .iter()
        .map(|o| {
            format!(
                "{:>3}  {} [{}]\n       {}",
                o.id,
                o.opening_name,
                o.eco_code,
                o.variation_names.join(" | ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_detail(opening: &Opening) -> String {
    let mut out = format!("{} [{}]\n", opening.opening_name, opening.eco_code);
    if !opening.description.is_empty() {
        out.push_str(&format!("{}\n", opening.description));
    }
    push_ideas(&mut out, &opening.strategic_ideas, "");
    push_games(&mut out, &opening.famous_games, "");

    out.push_str("Variations:\n");
    for v in &opening.variations {
        out.push_str(&format!("  {} ({} moves)\n", v.variation_name, v.moves.len()));
        if !v.description.is_empty() {
            out.push_str(&format!("    {}\n", v.description));
        }
        push_ideas(&mut out, &v.strategic_ideas, "    ");
        push_games(&mut out, &v.famous_games, "    ");
    }
    out.trim_end().to_string()
}

fn push_ideas(out: &mut String, ideas: &[String], indent: &str) {
    for idea in ideas {
        out.push_str(&format!("{indent}  * {idea}\n"));
    }
}

fn push_games(out: &mut String, games: &[FamousGame], indent: &str) {
    if games.is_empty() {
        return;
    }
    out.push_str(&format!("{indent}Famous games:\n"));
    for game in games {
        let year = game.year.as_ref().map_or_else(String::new, |y| format!(", {y}"));
        out.push_str(&format!("{indent}  {} ({}{})\n", game.game, game.event, year));
        let moves = extract_moves(&game.moves);
        if !moves.is_empty() {
            out.push_str(&format!("{indent}    {}\n", format_line(&moves)));
        }
    }
}
