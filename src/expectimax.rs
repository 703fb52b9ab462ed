//! Depth-limited expectimax search against an opponent playing uniformly at random

use crate::{
    board::Board,
    config::SearchConfig,
    evaluation::{evaluate, terminal_score},
    player::Player,
    Error, Result,
};

/// Expectimax search.
///
/// Max nodes take the best child for the searching player. The opponent's
/// nodes are chance nodes scored by the mean of their children, as every legal
/// reply is assumed equally likely. Chance nodes have no bound to prune on, so
/// the whole tree down to `max_ply_stochastic` half-moves is visited.
#[derive(Clone, Debug)]
pub struct Expectimax {
    max_ply: u32,

    /// The number of nodes visited by the last search (for diagnostics only)
    pub node_count: usize,
}

impl Expectimax {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            max_ply: config.max_ply_stochastic,
            node_count: 0,
        }
    }

    pub fn max_ply(&self) -> u32 {
        self.max_ply
    }

    /// The column `player` should play next
    pub fn best_move(&mut self, board: &mut Board, player: Player) -> Result<usize> {
        self.search(board, player).map(|(_, column)| column)
    }

    /// Returns the expected score of the best move and the move itself. Ties go
    /// to the lowest column.
    pub fn search(&mut self, board: &mut Board, player: Player) -> Result<(f64, usize)> {
        let scores = self.root_scores(board, player)?;

        let mut best: Option<(f64, usize)> = None;
        for (column, score) in scores {
            log::trace!("expectimax: column {} scored {}", column, score);
            if best.map_or(true, |(best_score, _)| score > best_score) {
                best = Some((score, column));
            }
        }

        let (score, column) = best.ok_or(Error::NoLegalMove)?;
        log::debug!(
            "expectimax (depth {}): column {}, score {}, {} nodes",
            self.max_ply,
            column,
            score,
            self.node_count
        );
        Ok((score, column))
    }

    /// The expected score of every legal move for `player`
    pub fn root_scores(&mut self, board: &mut Board, player: Player) -> Result<Vec<(usize, f64)>> {
        self.node_count = 0;
        let remaining = self.max_ply.saturating_sub(1);
        let mut scores = Vec::new();
        for column in board.legal_moves() {
            let score = self.play(board, column, player, player, remaining)?;
            scores.push((column, score));
        }
        Ok(scores)
    }

    /// Plays `column` for `mover`, scores the resulting position with
    /// `remaining` plies left to search and takes the move back
    fn play(
        &mut self,
        board: &mut Board,
        column: usize,
        mover: Player,
        ai: Player,
        remaining: u32,
    ) -> Result<f64> {
        let wins = board.is_winning_move(column, mover);
        board.apply_move(column, mover)?;

        let score = if wins {
            self.node_count += 1;
            Ok(terminal_score(board, ai, mover, remaining))
        } else if mover == ai {
            self.expected_value(board, ai, remaining)
        } else {
            self.max_value(board, ai, remaining)
        };

        board.undo_move(column)?;
        score
    }

    fn max_value(&mut self, board: &mut Board, ai: Player, remaining: u32) -> Result<f64> {
        self.node_count += 1;
        if remaining == 0 || board.is_full() {
            return Ok(evaluate(board, ai));
        }

        let mut value = f64::NEG_INFINITY;
        for column in board.legal_moves() {
            let score = self.play(board, column, ai, ai, remaining - 1)?;
            if score > value {
                value = score;
            }
        }
        Ok(value)
    }

    fn expected_value(&mut self, board: &mut Board, ai: Player, remaining: u32) -> Result<f64> {
        self.node_count += 1;
        let moves = board.legal_moves();
        // no replies left, nothing to average over
        if remaining == 0 || moves.is_empty() {
            return Ok(evaluate(board, ai));
        }

        let opponent = ai.opponent();
        let mut total = 0.0;
        for &column in moves.iter() {
            total += self.play(board, column, opponent, ai, remaining - 1)?;
        }
        Ok(total / moves.len() as f64)
    }
}

impl Default for Expectimax {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}
