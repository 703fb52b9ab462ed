//! Players that pick a column for one side of the game

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::{
    board::Board, config::SearchConfig, expectimax::Expectimax, minimax::Minimax,
    player::Player, Error, Result,
};

/// Interface shared by every kind of player.
pub trait Agent {
    /// The side this agent plays for.
    fn player(&self) -> Player;

    /// Short name of the kind of player.
    fn kind(&self) -> &'static str;

    /// Display name, e.g. `Player 1:random`.
    fn label(&self) -> String {
        format!("Player {}:{}", self.player().id(), self.kind())
    }

    /// Select a playable column for the current position.
    fn choose_move(&mut self, board: &Board) -> Result<usize>;

    /// Nodes visited while choosing the last move, for searching agents.
    fn nodes_searched(&self) -> Option<usize> {
        None
    }
}

/// Plays the alpha-beta search's choice.
pub struct MinimaxAgent {
    player: Player,
    search: Minimax,
}

impl MinimaxAgent {
    pub fn new(player: Player, config: SearchConfig) -> Self {
        Self {
            player,
            search: Minimax::new(config),
        }
    }
}

impl Agent for MinimaxAgent {
    fn player(&self) -> Player {
        self.player
    }

    fn kind(&self) -> &'static str {
        "ai"
    }

    fn choose_move(&mut self, board: &Board) -> Result<usize> {
        // search on a working copy, the caller keeps read access to its board
        let mut working = board.clone();
        self.search.best_move(&mut working, self.player)
    }

    fn nodes_searched(&self) -> Option<usize> {
        Some(self.search.node_count)
    }
}

/// Plays the expectimax search's choice.
pub struct ExpectimaxAgent {
    player: Player,
    search: Expectimax,
}

impl ExpectimaxAgent {
    pub fn new(player: Player, config: SearchConfig) -> Self {
        Self {
            player,
            search: Expectimax::new(config),
        }
    }
}

impl Agent for ExpectimaxAgent {
    fn player(&self) -> Player {
        self.player
    }

    fn kind(&self) -> &'static str {
        "ai"
    }

    fn choose_move(&mut self, board: &Board) -> Result<usize> {
        let mut working = board.clone();
        self.search.best_move(&mut working, self.player)
    }

    fn nodes_searched(&self) -> Option<usize> {
        Some(self.search.node_count)
    }
}

/// An agent that selects uniformly at random from the playable columns.
pub struct RandomAgent {
    player: Player,
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(player: Player) -> Self {
        Self {
            player,
            rng: StdRng::from_entropy(),
        }
    }

    /// A reproducible random player.
    pub fn with_seed(player: Player, seed: u64) -> Self {
        Self {
            player,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn player(&self) -> Player {
        self.player
    }

    fn kind(&self) -> &'static str {
        "random"
    }

    fn choose_move(&mut self, board: &Board) -> Result<usize> {
        board
            .legal_moves()
            .choose(&mut self.rng)
            .copied()
            .ok_or(Error::NoLegalMove)
    }
}
