//! A depth-limited game tree search agent for the board game 'Connect 4'
//!
//! Two strategies are provided: minimax with alpha-beta pruning for a
//! perfect opponent, and expectimax for an opponent that plays uniformly
//! at random. Both score unfinished positions with the same static
//! evaluation function.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_search::{board::Board, config::SearchConfig, minimax::Minimax, player::Player};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! // player one has three in a row along the bottom, column 0 is blocked
//! let mut board = Board::from_rows(&[
//!     ".......",
//!     ".......",
//!     ".......",
//!     ".......",
//!     "2......",
//!     "2111.2.",
//! ])?;
//! let mut search = Minimax::new(SearchConfig::default());
//! let best_move = search.best_move(&mut board, Player::One)?;
//!
//! assert_eq!(best_move, 4);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod error;

pub mod player;

pub mod board;

pub mod config;

pub mod evaluation;

pub mod minimax;

pub mod expectimax;

pub mod agent;

mod test;

pub use error::{Error, Result};

/// The default number of rows of the game board
pub const ROWS: usize = 6;

/// The default number of columns of the game board
pub const COLS: usize = 7;

/// The number of aligned tiles needed to win
pub const WINDOW: usize = 4;

// win detection scans windows of WINDOW cells in every direction
const_assert!(ROWS >= WINDOW);
const_assert!(COLS >= WINDOW);
