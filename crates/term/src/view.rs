//! BoardView: maps session state into a queue of terminal commands.
//!
//! Encoding targets any `Vec<u8>`, so the view can be exercised in unit
//! tests without a terminal attached.

use anyhow::Result;
use crossterm::{
    cursor,
    style::{Attribute, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal, QueueableCommand,
};
use crossterm::style::Color;

use tui_fifteen_core::Board;
use tui_fifteen_types::{Pos, SessionStatus, BOARD_SIDE};

/// Everything the view needs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct ViewState<'a> {
    pub board: &'a Board,
    pub cursor: Pos,
    pub status: SessionStatus,
    pub move_count: u32,
    pub elapsed_seconds: u32,
    pub resumed: bool,
    /// None until solved; Some(false) shows the "stats not saved" marker.
    pub stats_saved: Option<bool>,
    pub move_in_flight: bool,
}

const ORIGIN_X: u16 = 2;
const ORIGIN_Y: u16 = 1;
/// Interior width of one cell in terminal columns.
const CELL_W: usize = 4;

/// Encode a full frame into `out`.
pub fn encode_into(state: &ViewState, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut y = ORIGIN_Y;
    put_line(out, y, &header_line(state))?;
    y += 2;

    put_line(out, y, &rule_line('┌', '┬', '┐'))?;
    y += 1;
    for row in 0..BOARD_SIDE {
        encode_tile_row(state, row, y, out)?;
        y += 1;
        let rule = if row + 1 < BOARD_SIDE {
            rule_line('├', '┼', '┤')
        } else {
            rule_line('└', '┴', '┘')
        };
        put_line(out, y, &rule)?;
        y += 1;
    }

    y += 1;
    put_line(out, y, &status_line(state))?;
    if let Some(banner) = banner_line(state) {
        y += 1;
        put_line(out, y, &banner)?;
    }
    y += 2;
    put_line(
        out,
        y,
        "arrows/hjkl move   enter/space push   n new   q save+quit   esc quit",
    )?;

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn encode_tile_row(state: &ViewState, row: u8, y: u16, out: &mut Vec<u8>) -> Result<()> {
    out.queue(cursor::MoveTo(ORIGIN_X, y))?;
    out.queue(Print('│'))?;
    for col in 0..BOARD_SIDE {
        let pos = Pos::new(row, col);
        let tile = state.board.tile(pos);
        let text = if tile == 0 {
            " ".repeat(CELL_W)
        } else {
            format!("{:^width$}", tile, width = CELL_W)
        };

        let selected = state.status == SessionStatus::Playing && pos == state.cursor;
        if selected {
            out.queue(SetAttribute(Attribute::Reverse))?;
        }
        if state.board.is_solved() {
            out.queue(SetForegroundColor(Color::Green))?;
        }
        out.queue(Print(text))?;
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
        out.queue(Print('│'))?;
    }
    Ok(())
}

fn put_line(out: &mut Vec<u8>, y: u16, text: &str) -> Result<()> {
    out.queue(cursor::MoveTo(ORIGIN_X, y))?;
    out.queue(Print(text))?;
    Ok(())
}

fn rule_line(left: char, mid: char, right: char) -> String {
    let seg = "─".repeat(CELL_W);
    let mut line = String::new();
    line.push(left);
    for col in 0..BOARD_SIDE {
        line.push_str(&seg);
        line.push(if col + 1 < BOARD_SIDE { mid } else { right });
    }
    line
}

fn header_line(state: &ViewState) -> String {
    let mut line = String::from("FIFTEEN");
    if state.resumed {
        line.push_str("  (resumed)");
    }
    line
}

fn status_line(state: &ViewState) -> String {
    let mut line = format!(
        "moves {:<5} time {}",
        state.move_count,
        format_clock(state.elapsed_seconds)
    );
    if state.move_in_flight {
        line.push_str("  ~");
    }
    line
}

fn banner_line(state: &ViewState) -> Option<String> {
    match state.status {
        SessionStatus::Solved => {
            let mut line = format!(
                "SOLVED in {} moves, {}",
                state.move_count,
                format_clock(state.elapsed_seconds)
            );
            if state.stats_saved == Some(false) {
                line.push_str("  [stats not saved]");
            }
            Some(line)
        }
        SessionStatus::Idle => Some("press n to start".to_owned()),
        SessionStatus::Playing => None,
    }
}

/// mm:ss, minutes unbounded.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(board: &Board) -> ViewState<'_> {
        ViewState {
            board,
            cursor: Pos::new(0, 0),
            status: SessionStatus::Playing,
            move_count: 12,
            elapsed_seconds: 75,
            resumed: false,
            stats_saved: None,
            move_in_flight: false,
        }
    }

    fn rendered(state: &ViewState) -> String {
        let mut out = Vec::new();
        encode_into(state, &mut out).unwrap();
        String::from_utf8_lossy(&out).into_owned()
    }

    #[test]
    fn test_frame_contains_every_tile() {
        let board = Board::solved();
        let text = rendered(&state(&board));
        for tile in 1..=15 {
            assert!(text.contains(&tile.to_string()), "missing tile {tile}");
        }
        assert!(text.contains("moves 12"));
        assert!(text.contains("01:15"));
    }

    #[test]
    fn test_solved_banner_and_unsaved_marker() {
        let board = Board::solved();
        let mut s = state(&board);
        s.status = SessionStatus::Solved;
        s.stats_saved = Some(false);
        let text = rendered(&s);
        assert!(text.contains("SOLVED in 12 moves"));
        assert!(text.contains("[stats not saved]"));

        s.stats_saved = Some(true);
        assert!(!rendered(&s).contains("[stats not saved]"));
    }

    #[test]
    fn test_resumed_indicator() {
        let board = Board::solved();
        let mut s = state(&board);
        s.resumed = true;
        assert!(rendered(&s).contains("(resumed)"));
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(75), "01:15");
        assert_eq!(format_clock(3600), "60:00");
    }
}
