//! Static scoring of positions the search does not expand further
//!
//! A position is scored by counting runs of a player's tiles along every row,
//! column and diagonal. Runs of the winning length weigh the most and each
//! shorter run length is worth a tenth of the one above it. The opponent's runs
//! are counted the same way, with slightly smaller weights, and subtracted.

use crate::{
    board::{Board, Cell},
    player::Player,
    WINDOW,
};

/// Weight of a full-length run for the evaluated player
pub const PLAYER_WEIGHT: f64 = 9050.0;

/// Weight of a full-length run for the opponent
pub const OPPONENT_WEIGHT: f64 = 9000.0;

/// Shortest run that contributes to the score
pub const MIN_RUN: usize = 2;

/// Every line of the board a run can lie on: rows, columns, and the diagonals
/// in both directions that are long enough to hold a winning line
pub fn lines(board: &Board) -> Vec<Vec<Cell>> {
    let (rows, cols) = (board.rows(), board.cols());
    let mut lines = Vec::with_capacity(rows + cols + 2 * (rows + cols));

    for row in 0..rows {
        lines.push((0..cols).map(|c| board.cell(row, c)).collect());
    }
    for column in 0..cols {
        lines.push((0..rows).map(|r| board.cell(r, column)).collect());
    }

    // diagonal `offset` holds the cells where column - row == offset, the
    // mirrored pass reads the columns right-to-left for the other direction
    for &mirrored in [false, true].iter() {
        for offset in -(rows as i64 - 1)..cols as i64 {
            let diagonal: Vec<Cell> = (0..rows as i64)
                .filter_map(|row| {
                    let column = row + offset;
                    if column < 0 || column >= cols as i64 {
                        return None;
                    }
                    let column = if mirrored {
                        cols - 1 - column as usize
                    } else {
                        column as usize
                    };
                    Some(board.cell(row as usize, column))
                })
                .collect();
            if diagonal.len() >= WINDOW {
                lines.push(diagonal);
            }
        }
    }
    lines
}

/// Number of non-overlapping runs of `length` tiles owned by `player` in a line,
/// matched left to right
fn count_in_line(line: &[Cell], player: Player, length: usize) -> usize {
    let tile = Cell::Occupied(player);
    let mut count = 0;
    let mut i = 0;
    while i + length <= line.len() {
        if line[i..i + length].iter().all(|&cell| cell == tile) {
            count += 1;
            i += length;
        } else {
            i += 1;
        }
    }
    count
}

fn weighted_runs(lines: &[Vec<Cell>], player: Player, mut weight: f64) -> f64 {
    let mut score = 0.0;
    for length in (MIN_RUN..=WINDOW).rev() {
        let count: usize = lines
            .iter()
            .map(|line| count_in_line(line, player, length))
            .sum();
        score += count as f64 * weight;
        weight /= 10.0;
    }
    score
}

/// Scores `board` from the point of view of `player`, higher is better
///
/// A completed line outweighs every shorter run, so won positions sit at the
/// extremes of the scale without special casing.
pub fn evaluate(board: &Board, player: Player) -> f64 {
    let lines = lines(board);
    weighted_runs(&lines, player, PLAYER_WEIGHT)
        - weighted_runs(&lines, player.opponent(), OPPONENT_WEIGHT)
}

/// Bonus per remaining ply for completing a line, larger than any difference
/// in heuristic score
pub const WIN_SCORE: f64 = 1.0e7;

/// Scores a position where `winner` has just completed a line with
/// `plies_left` plies of lookahead unused
///
/// Faster wins score higher and slower losses score less negatively.
pub fn terminal_score(board: &Board, player: Player, winner: Player, plies_left: u32) -> f64 {
    let bonus = WIN_SCORE * (plies_left + 1) as f64;
    if winner == player {
        evaluate(board, player) + bonus
    } else {
        evaluate(board, player) - bonus
    }
}
