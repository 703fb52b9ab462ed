use anyhow::{anyhow, Result};
use crossterm::{
    cursor::MoveTo,
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use connect4_search::{
    board::{Board, Cell},
    player::Player,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum GameState {
    Playing,
    Won(Player),
    Draw,
}

/// A game in progress: the board, whose turn it is and the moves so far
#[derive(Clone)]
pub struct Game {
    pub board: Board,
    pub to_move: Player,
    pub history: Vec<usize>,
    pub state: GameState,
}

impl Game {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            to_move: Player::One,
            history: Vec::new(),
            state: GameState::Playing,
        }
    }

    /// Plays `column` for the player to move, validating it first
    pub fn play_checked(&mut self, column: usize) -> Result<GameState> {
        if let GameState::Won(_) | GameState::Draw = self.state {
            return Err(anyhow!("Invalid move, the game is over"));
        }
        if column >= self.board.cols() {
            return Err(anyhow!(
                "Invalid move, column {} out of range. Columns must be between 0 and {}",
                column,
                self.board.cols() - 1
            ));
        }
        if !self.board.playable(column) {
            return Err(anyhow!("Invalid move, column {} full", column));
        }

        let wins = self.board.is_winning_move(column, self.to_move);
        self.board.apply_move(column, self.to_move)?;
        self.history.push(column);

        self.state = if wins {
            GameState::Won(self.to_move)
        } else if self.board.is_full() {
            GameState::Draw
        } else {
            GameState::Playing
        };
        self.to_move = self.to_move.opponent();

        Ok(self.state)
    }

    pub fn display(&self) -> Result<()> {
        let mut stdout = stdout();
        let (rows, cols) = (self.board.rows(), self.board.cols());

        let header: String = (0..cols).map(|x| (x % 10).to_string()).collect();
        stdout.queue(PrintStyledContent(style(header + "\n")))?;
        for _ in 0..rows {
            stdout.queue(PrintStyledContent(style("\n")))?;
        }
        stdout.flush()?;

        // the cursor now sits on the line below the board
        let (origin_x, origin_y) = crossterm::cursor::position()?;
        let top = origin_y - rows as u16;

        for row in 0..rows {
            for column in 0..cols {
                stdout
                    .queue(MoveTo(origin_x + column as u16, top + row as u16))?
                    .queue(PrintStyledContent(
                        style("O")
                            .attribute(Attribute::Bold)
                            .on(Color::DarkBlue)
                            .with(match self.board.cell(row, column) {
                                Cell::Occupied(Player::One) => Color::Red,
                                Cell::Occupied(Player::Two) => Color::Yellow,
                                Cell::Empty => Color::DarkBlue,
                            }),
                    ))?;
            }
        }
        stdout
            .queue(MoveTo(origin_x, origin_y))?
            .queue(PrintStyledContent(style("\n")))?;
        stdout.flush()?;
        Ok(())
    }
}
