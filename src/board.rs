//! The game board and legal move generation

use std::fmt;

use crate::{player::Player, Error, Result, COLS, ROWS, WINDOW};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Cell {
    Empty,
    Occupied(Player),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Occupied(Player::One) => '1',
            Cell::Occupied(Player::Two) => '2',
        }
    }
}

/// A `rows x cols` grid of cells with gravity
///
/// Row 0 is the top of the board and so is the last row filled. Pieces
/// dropped into a column land on the lowest empty cell, so every column is a
/// contiguous stack of occupied cells growing up from the bottom row.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Board {
    cells: Vec<Cell>, // cells are stored row-major, top-to-bottom
    heights: Vec<usize>,
    rows: usize,
    cols: usize,
}

impl Board {
    /// Creates an empty board of the default size
    pub fn new() -> Self {
        Self {
            cells: vec![Cell::Empty; ROWS * COLS],
            heights: vec![0; COLS],
            rows: ROWS,
            cols: COLS,
        }
    }

    /// Creates an empty board of the given size
    ///
    /// Both dimensions must be able to hold a winning line.
    pub fn with_dimensions(rows: usize, cols: usize) -> Result<Self> {
        if rows < WINDOW || cols < WINDOW {
            return Err(Error::InvalidDimensions { rows, cols });
        }
        Ok(Self {
            cells: vec![Cell::Empty; rows * cols],
            heights: vec![0; cols],
            rows,
            cols,
        })
    }

    /// Parses a board drawn top row first, using `.` for empty cells and
    /// `1`/`2` for the players' tiles
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().chars().count());
        let mut board = Self::with_dimensions(height, width)?;

        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            if line.chars().count() != width {
                return Err(Error::InvalidBoard(format!(
                    "row {} has {} cells, expected {}",
                    row,
                    line.chars().count(),
                    width
                )));
            }
            for (column, tile) in line.chars().enumerate() {
                let cell = match tile {
                    '.' | '0' => Cell::Empty,
                    '1' => Cell::Occupied(Player::One),
                    '2' => Cell::Occupied(Player::Two),
                    _ => {
                        return Err(Error::InvalidBoard(format!(
                            "could not parse '{}' as a cell",
                            tile
                        )))
                    }
                };
                board.cells[row * width + column] = cell;
            }
        }

        // recover the column heights, rejecting floating tiles
        for column in 0..width {
            let height = (0..board.rows)
                .rev()
                .take_while(|&row| !board.cell(row, column).is_empty())
                .count();
            if (0..board.rows - height).any(|row| !board.cell(row, column).is_empty()) {
                return Err(Error::InvalidBoard(format!(
                    "column {} has a tile above an empty cell",
                    column
                )));
            }
            board.heights[column] = height;
        }
        Ok(board)
    }

    /// Replays a sequence of 1-indexed column digits on a default-sized
    /// board, alternating players starting with player one
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self> {
        let mut board = Self::new();
        let mut player = Player::One;

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column) if column >= 1 && column <= board.cols => {
                    let column = column - 1;
                    // abort if the position is won at any point
                    if board.winner().is_some() {
                        return Err(Error::InvalidBoard("game is already over".into()));
                    }
                    board.apply_move(column, player)?;
                    player = player.opponent();
                }
                _ => {
                    return Err(Error::InvalidBoard(format!(
                        "could not parse '{}' as a valid move",
                        column_char
                    )))
                }
            }
        }
        Ok(board)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The cell at `row` (0 is the top) and `column`
    pub fn cell(&self, row: usize, column: usize) -> Cell {
        self.cells[row * self.cols + column]
    }

    /// Number of tiles stacked in `column`
    pub fn height(&self, column: usize) -> usize {
        self.heights[column]
    }

    pub fn num_moves(&self) -> usize {
        self.heights.iter().sum()
    }

    pub fn playable(&self, column: usize) -> bool {
        column < self.cols && self.heights[column] < self.rows
    }

    /// Columns that can still take a tile, in ascending order
    pub fn legal_moves(&self) -> Vec<usize> {
        (0..self.cols).filter(|&c| self.playable(c)).collect()
    }

    pub fn is_full(&self) -> bool {
        self.heights.iter().all(|&h| h == self.rows)
    }

    /// Drops a tile for `player` into `column`, returning the row it landed on
    pub fn apply_move(&mut self, column: usize, player: Player) -> Result<usize> {
        if column >= self.cols {
            return Err(Error::ColumnOutOfRange {
                column,
                cols: self.cols,
            });
        }
        if !self.playable(column) {
            return Err(Error::IllegalMove { column });
        }
        let row = self.rows - 1 - self.heights[column];
        self.cells[row * self.cols + column] = Cell::Occupied(player);
        self.heights[column] += 1;
        Ok(row)
    }

    /// Removes the top tile of `column`, returning its owner
    pub fn undo_move(&mut self, column: usize) -> Result<Player> {
        if column >= self.cols {
            return Err(Error::ColumnOutOfRange {
                column,
                cols: self.cols,
            });
        }
        if self.heights[column] == 0 {
            return Err(Error::EmptyColumn { column });
        }
        let row = self.rows - self.heights[column];
        let index = row * self.cols + column;
        let owner = match self.cells[index] {
            Cell::Occupied(player) => player,
            Cell::Empty => return Err(Error::EmptyColumn { column }),
        };
        self.cells[index] = Cell::Empty;
        self.heights[column] -= 1;
        Ok(owner)
    }

    // cell addressed from the bottom-left corner, None when off the board
    fn cell_from_bottom(&self, x: i32, y: i32) -> Option<Cell> {
        if x < 0 || x >= self.cols as i32 || y < 0 || y >= self.rows as i32 {
            return None;
        }
        Some(self.cell(self.rows - 1 - y as usize, x as usize))
    }

    /// Would dropping a tile for `player` into a playable `column` complete a line?
    pub fn is_winning_move(&self, column: usize, player: Player) -> bool {
        let tile = Some(Cell::Occupied(player));
        let height = self.heights[column] as i32;
        let needed = WINDOW as i32 - 1;

        // check vertical alignment
        if height >= needed
            && (1..=needed).all(|i| self.cell_from_bottom(column as i32, height - i) == tile)
        {
            return true;
        }

        // check horizontal and diagonal alignment
        for dy_dx in -1i32..=1 {
            let mut run = 0;
            for dx in [-1i32, 1].iter() {
                let mut x = column as i32 + dx;
                let mut y = height + dx * dy_dx;
                while self.cell_from_bottom(x, y) == tile {
                    x += dx;
                    y += dx * dy_dx;
                    run += 1;
                }
            }
            if run >= needed {
                return true;
            }
        }

        false
    }

    /// The player owning a completed line, if any
    pub fn winner(&self) -> Option<Player> {
        let directions = [(0i32, 1i32), (1, 0), (1, 1), (1, -1)];
        for row in 0..self.rows as i32 {
            for column in 0..self.cols as i32 {
                let player = match self.cell(row as usize, column as usize) {
                    Cell::Occupied(player) => player,
                    Cell::Empty => continue,
                };
                for &(dr, dc) in directions.iter() {
                    let aligned = (1..WINDOW as i32).all(|i| {
                        let (r, c) = (row + dr * i, column + dc * i);
                        r >= 0
                            && r < self.rows as i32
                            && c >= 0
                            && c < self.cols as i32
                            && self.cell(r as usize, c as usize) == Cell::Occupied(player)
                    });
                    if aligned {
                        return Some(player);
                    }
                }
            }
        }
        None
    }

    /// The same position with every tile handed to the other player
    pub fn swap_players(&self) -> Self {
        let mut swapped = self.clone();
        for cell in swapped.cells.iter_mut() {
            if let Cell::Occupied(player) = *cell {
                *cell = Cell::Occupied(player.opponent());
            }
        }
        swapped
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            let line: String = (0..self.cols).map(|c| self.cell(row, c).to_char()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
