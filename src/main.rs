use anyhow::{anyhow, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use std::io::{stdin, stdout, Write};
use std::path::Path;

use connect4_search::{
    agent::{Agent, ExpectimaxAgent, MinimaxAgent, RandomAgent},
    board::Board,
    config::SearchConfig,
    player::Player,
};

mod game;
use game::*;

/// Search depths are read from this file when it exists
const CONFIG_PATH: &str = "search.toml";

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum AgentKind {
    Human,
    Random,
    AlphaBeta,
    Expectimax,
}

impl AgentKind {
    fn build(self, player: Player, config: SearchConfig, seed: Option<u64>) -> Box<dyn Agent> {
        match self {
            AgentKind::Human => Box::new(HumanAgent { player }),
            AgentKind::Random => match seed {
                Some(seed) => Box::new(RandomAgent::with_seed(player, seed)),
                None => Box::new(RandomAgent::new(player)),
            },
            AgentKind::AlphaBeta => Box::new(MinimaxAgent::new(player, config)),
            AgentKind::Expectimax => Box::new(ExpectimaxAgent::new(player, config)),
        }
    }
}

/// Reads moves from stdin until a playable column is given
struct HumanAgent {
    player: Player,
}

impl Agent for HumanAgent {
    fn player(&self) -> Player {
        self.player
    }

    fn kind(&self) -> &'static str {
        "human"
    }

    fn choose_move(&mut self, board: &Board) -> connect4_search::Result<usize> {
        loop {
            print!("Enter your move: ");
            stdout().flush()?;

            let mut buffer = String::new();
            if stdin().read_line(&mut buffer)? == 0 {
                return Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into());
            }
            match buffer.trim().parse::<usize>() {
                Ok(column) if board.playable(column) => return Ok(column),
                Ok(_) => println!("Column unavailable, choose from: {:?}", board.legal_moves()),
                Err(_) => println!("Invalid number: {}", buffer.trim()),
            }
        }
    }
}

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    stdout().flush()?;
    let mut buffer = String::new();
    if stdin().read_line(&mut buffer)? == 0 {
        return Err(anyhow!("input closed"));
    }
    Ok(buffer.trim().to_lowercase())
}

fn choose_kind(player: Player, allow_human: bool) -> Result<AgentKind> {
    let options = if allow_human {
        "h)uman, r)andom, a)lpha-beta, e)xpectimax"
    } else {
        "r)andom, a)lpha-beta, e)xpectimax"
    };
    loop {
        let answer = prompt(&format!("Player {}: {}? ", player.id(), options))?;
        match answer.chars().next() {
            Some('h') if allow_human => return Ok(AgentKind::Human),
            Some('r') => return Ok(AgentKind::Random),
            Some('a') => return Ok(AgentKind::AlphaBeta),
            Some('e') => return Ok(AgentKind::Expectimax),
            _ => println!("Unknown answer given"),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    println!("Welcome to Connect 4\n");

    let config = SearchConfig::load_or_default(Path::new(CONFIG_PATH))?;
    println!(
        "Alpha-beta depth: {}, expectimax depth: {}\n",
        config.max_ply_adversarial, config.max_ply_stochastic
    );

    loop {
        match prompt("p)lay a game or s)imulate a batch of games? ")?.chars().next() {
            Some('p') => return play_interactive(config),
            Some('s') => return simulate(config),
            _ => println!("Unknown answer given"),
        }
    }
}

fn play_interactive(config: SearchConfig) -> Result<()> {
    let kinds = [
        choose_kind(Player::One, true)?,
        choose_kind(Player::Two, true)?,
    ];
    let mut agents = [
        kinds[0].build(Player::One, config, None),
        kinds[1].build(Player::Two, config, None),
    ];
    let both_ai = !kinds.contains(&AgentKind::Human);

    let mut game = Game::new();

    // game loop
    loop {
        game.display()?;

        match game.state {
            GameState::Playing => {
                let agent = &mut agents[(game.to_move.id() - 1) as usize];
                println!("{}", agent.label());

                if agent.kind() != "human" {
                    println!("AI is thinking...");
                    stdout().flush()?;

                    // slow down play if both players are AI
                    if both_ai {
                        std::thread::sleep(std::time::Duration::new(1, 0));
                    }
                }

                let next_move = agent.choose_move(&game.board)?;
                match agent.nodes_searched() {
                    Some(nodes) => println!("Move: {} ({} positions searched)", next_move, nodes),
                    None => println!("Move: {}", next_move),
                }

                if let Err(err) = game.play_checked(next_move) {
                    println!("{}", err);
                    // try the move again
                    continue;
                }
            }

            // end states
            GameState::Won(player) => {
                println!("Player {} wins!", player.id());
                break;
            }
            GameState::Draw => {
                println!("Draw!");
                break;
            }
        }
    }
    Ok(())
}

/// Plays one game between two agents without rendering
fn play_game(agents: &mut [Box<dyn Agent>; 2]) -> Result<GameState> {
    let mut game = Game::new();
    while game.state == GameState::Playing {
        let agent = &mut agents[(game.to_move.id() - 1) as usize];
        let column = agent.choose_move(&game.board)?;
        game.play_checked(column)?;
    }
    log::debug!("game finished {:?} after moves {:?}", game.state, game.history);
    Ok(game.state)
}

fn simulate(config: SearchConfig) -> Result<()> {
    let kinds = [
        choose_kind(Player::One, false)?,
        choose_kind(Player::Two, false)?,
    ];
    let games = loop {
        match prompt("Number of games: ")?.parse::<usize>() {
            Ok(games) if games > 0 => break games,
            _ => println!("Invalid number"),
        }
    };
    log::info!("simulating {} games of {:?} against {:?}", games, kinds[0], kinds[1]);

    let progress = ProgressBar::new(games as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{elapsed_precise} [{bar:40}] {pos}/{len} games, eta {eta}"),
    );

    // each game runs its own single-threaded searches
    let results = (0..games as u64)
        .into_par_iter()
        .map(|index| {
            let mut agents = [
                kinds[0].build(Player::One, config, Some(2 * index)),
                kinds[1].build(Player::Two, config, Some(2 * index + 1)),
            ];
            let result = play_game(&mut agents);
            progress.inc(1);
            result
        })
        .collect::<Result<Vec<GameState>>>()?;
    progress.finish_with_message("done");

    let count = |state: GameState| results.iter().filter(|&&s| s == state).count();
    let (one, two, draws) = (
        count(GameState::Won(Player::One)),
        count(GameState::Won(Player::Two)),
        count(GameState::Draw),
    );
    println!(
        "Player 1 ({:?}) won {}, Player 2 ({:?}) won {}, {} draws",
        kinds[0], one, kinds[1], two, draws
    );
    Ok(())
}
