//! Depth-limited minimax search with alpha-beta pruning

use crate::{
    board::Board,
    config::SearchConfig,
    evaluation::{evaluate, terminal_score},
    player::Player,
    Error, Result,
};

/// An agent to search Connect 4 positions against a perfect opponent
///
/// # Notes
/// The search alternates between max nodes, where the searching player picks
/// the move with the highest score, and min nodes, where the opponent picks the
/// lowest. After `max_ply_adversarial` half-moves, or when the board is full,
/// positions are scored with [`evaluate`]. A move that completes a line ends
/// its branch immediately.
///
/// Hypothetical moves are played on the caller's board and undone on the way
/// back up, so the board is unchanged once a search returns.
#[derive(Clone, Debug)]
pub struct Minimax {
    max_ply: u32,
    pruning: bool,

    /// The number of nodes visited by the last search (for diagnostics only)
    pub node_count: usize,
}

impl Minimax {
    /// Creates a new `Minimax` searching `config.max_ply_adversarial` plies deep
    pub fn new(config: SearchConfig) -> Self {
        Self {
            max_ply: config.max_ply_adversarial,
            pruning: true,
            node_count: 0,
        }
    }

    /// Disables alpha-beta pruning, visiting the full tree
    pub fn without_pruning(mut self) -> Self {
        self.pruning = false;
        self
    }

    pub fn max_ply(&self) -> u32 {
        self.max_ply
    }

    /// The column `player` should play next
    pub fn best_move(&mut self, board: &mut Board, player: Player) -> Result<usize> {
        self.search(board, player).map(|(_, column)| column)
    }

    /// Performs a top-level search
    ///
    /// Returns the score of the best move and the move itself. Ties go to the
    /// lowest column.
    pub fn search(&mut self, board: &mut Board, player: Player) -> Result<(f64, usize)> {
        self.node_count = 0;

        let mut alpha = f64::NEG_INFINITY;
        let beta = f64::INFINITY;
        let mut best: Option<(f64, usize)> = None;

        for column in board.legal_moves() {
            let score = self.play(board, column, player, player, 1, alpha, beta)?;
            log::trace!("alpha-beta: column {} scored {}", column, score);

            // a pruned sibling returns a bound no better than alpha, which is
            // never strictly better than the best move so far
            if best.map_or(true, |(best_score, _)| score > best_score) {
                best = Some((score, column));
            }
            if self.pruning && score > alpha {
                alpha = score;
            }
        }

        let (score, column) = best.ok_or(Error::NoLegalMove)?;
        log::debug!(
            "alpha-beta (depth {}): column {}, score {}, {} nodes",
            self.max_ply,
            column,
            score,
            self.node_count
        );
        Ok((score, column))
    }

    /// The exact minimax score of every legal move for `player`
    pub fn root_scores(&mut self, board: &mut Board, player: Player) -> Result<Vec<(usize, f64)>> {
        self.node_count = 0;
        let mut scores = Vec::new();
        for column in board.legal_moves() {
            let score = self.play(
                board,
                column,
                player,
                player,
                1,
                f64::NEG_INFINITY,
                f64::INFINITY,
            )?;
            scores.push((column, score));
        }
        Ok(scores)
    }

    /// Plays `column` for `mover`, scores the resulting position and takes the
    /// move back
    #[allow(clippy::too_many_arguments)]
    fn play(
        &mut self,
        board: &mut Board,
        column: usize,
        mover: Player,
        ai: Player,
        depth: u32,
        alpha: f64,
        beta: f64,
    ) -> Result<f64> {
        let wins = board.is_winning_move(column, mover);
        board.apply_move(column, mover)?;

        let score = if wins {
            self.node_count += 1;
            Ok(terminal_score(board, ai, mover, self.max_ply.saturating_sub(depth)))
        } else if mover == ai {
            self.min_value(board, ai, depth, alpha, beta)
        } else {
            self.max_value(board, ai, depth, alpha, beta)
        };

        board.undo_move(column)?;
        score
    }

    fn max_value(
        &mut self,
        board: &mut Board,
        ai: Player,
        depth: u32,
        mut alpha: f64,
        beta: f64,
    ) -> Result<f64> {
        self.node_count += 1;
        if depth >= self.max_ply || board.is_full() {
            return Ok(evaluate(board, ai));
        }

        let mut value = f64::NEG_INFINITY;
        for column in board.legal_moves() {
            let score = self.play(board, column, ai, ai, depth + 1, alpha, beta)?;
            if score > value {
                value = score;
            }
            if self.pruning {
                // the minimizing parent already has a better option
                if value >= beta {
                    return Ok(value);
                }
                if value > alpha {
                    alpha = value;
                }
            }
        }
        Ok(value)
    }

    fn min_value(
        &mut self,
        board: &mut Board,
        ai: Player,
        depth: u32,
        alpha: f64,
        mut beta: f64,
    ) -> Result<f64> {
        self.node_count += 1;
        if depth >= self.max_ply || board.is_full() {
            return Ok(evaluate(board, ai));
        }

        let opponent = ai.opponent();
        let mut value = f64::INFINITY;
        for column in board.legal_moves() {
            let score = self.play(board, column, opponent, ai, depth + 1, alpha, beta)?;
            if score < value {
                value = score;
            }
            if self.pruning {
                // the maximizing parent already has a better option
                if value <= alpha {
                    return Ok(value);
                }
                if value < beta {
                    beta = value;
                }
            }
        }
        Ok(value)
    }
}

impl Default for Minimax {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}
