use colored::Colorize;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use crate::cards::{Card, Suit};
use crate::classify::classify;
use crate::error::SquaresResult;
use crate::scoring::PointSystem;
use crate::state::GRID_SIZE;

pub fn card_text(card: Option<Card>) -> String {
    match card {
        None => "--".dimmed().to_string(),
        Some(c) => {
            let text = c.pretty();
            match c.suit {
                Suit::Hearts | Suit::Diamonds => text.red().to_string(),
                Suit::Spades | Suit::Clubs => text.bold().to_string(),
            }
        }
    }
}

fn line_score(points: &PointSystem, line: &[Option<Card>; 5]) -> SquaresResult<String> {
    if line.iter().flatten().count() == 5 {
        Ok(format!("{} ({})", points.score_line(line)?, classify(line)?))
    } else {
        Ok(String::new())
    }
}

/// Render a (possibly partial) grid with per-row and per-column hand scores
/// where the line is complete, and the grid total when the whole grid is.
pub fn grid_display(grid: &[Option<Card>; 25], points: &PointSystem) -> SquaresResult<String> {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    for row in 0..GRID_SIZE {
        let mut line = [None; GRID_SIZE];
        let mut cells: Vec<Cell> = Vec::with_capacity(GRID_SIZE + 1);
        for col in 0..GRID_SIZE {
            line[col] = grid[row * GRID_SIZE + col];
            cells.push(Cell::new(card_text(line[col])).set_alignment(CellAlignment::Center));
        }
        cells.push(Cell::new(line_score(points, &line)?));
        table.add_row(cells);
    }

    let mut footer: Vec<Cell> = Vec::with_capacity(GRID_SIZE + 1);
    for col in 0..GRID_SIZE {
        let mut line = [None; GRID_SIZE];
        for row in 0..GRID_SIZE {
            line[row] = grid[row * GRID_SIZE + col];
        }
        footer.push(Cell::new(line_score(points, &line)?).set_alignment(CellAlignment::Center));
    }
    let total = if grid.iter().flatten().count() == 25 {
        format!("{}", points.score_grid(grid)?).green().bold().to_string()
    } else {
        String::new()
    };
    footer.push(Cell::new(total));
    table.add_row(footer);

    Ok(table.to_string())
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "Error:".red().bold(), msg);
}

pub fn print_success(msg: &str) {
    println!("{} {}", "\u{2713}".green().bold(), msg);
}
