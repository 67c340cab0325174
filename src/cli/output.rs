//! Output formatting for CLI

use crate::tictactoe::{Board, SIZE};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(40));
    println!("{title}");
    println!("{}", "=".repeat(40));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:16} {}", format!("{}:", key), value);
}

/// Format a number with thousands separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Render a board with row and column indices
pub fn render_board(board: &Board) -> String {
    let mut out = String::from("    0 1 2\n");
    for (r, row) in board.cells().iter().enumerate() {
        out.push_str(&format!("  {r}"));
        for cell in row {
            out.push(' ');
            out.push(cell.to_char());
        }
        if r < SIZE - 1 {
            out.push('\n');
        }
    }
    out
}
