#[cfg(test)]
pub mod test {
    use anyhow::Result;
    use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

    use crate::{
        agent::{Agent, ExpectimaxAgent, MinimaxAgent},
        board::Board,
        config::SearchConfig,
        evaluation::evaluate,
        expectimax::Expectimax,
        minimax::Minimax,
        player::Player,
        Error,
    };

    // plays random moves from the empty board, stopping before any move that
    // would end the game, and returns the position with the player to move
    fn random_position(rng: &mut StdRng, max_moves: usize) -> Result<(Board, Player)> {
        let mut board = Board::new();
        let mut player = Player::One;
        let moves = rng.gen_range(0..=max_moves);
        for _ in 0..moves {
            let column = match board.legal_moves().choose(rng) {
                Some(&column) => column,
                None => break,
            };
            if board.is_winning_move(column, player) {
                break;
            }
            board.apply_move(column, player)?;
            player = player.opponent();
        }
        Ok((board, player))
    }

    fn winning_row() -> Result<Board> {
        // player one has three along the bottom row, the left end is blocked
        Ok(Board::from_rows(&[
            ".......",
            ".......",
            ".......",
            ".......",
            "2......",
            "2111.2.",
        ])?)
    }

    fn full_board() -> Result<Board> {
        Ok(Board::from_rows(&[
            "1212121", "1212121", "2121212", "2121212", "1212121", "1212121",
        ])?)
    }

    #[test]
    pub fn from_moves() -> Result<()> {
        let board = Board::from_moves("4455")?;
        assert_eq!(board.height(3), 2);
        assert_eq!(board.height(4), 2);
        assert_eq!(board.num_moves(), 4);
        assert!(Board::from_moves("48").is_err());
        assert!(Board::from_moves("1111111").is_err());
        Ok(())
    }

    #[test]
    pub fn legal_move_count() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            let (board, _) = random_position(&mut rng, 42)?;
            let moves = board.legal_moves();
            let full_columns = (0..board.cols())
                .filter(|&c| board.height(c) == board.rows())
                .count();

            assert!(moves.len() <= board.cols());
            assert_eq!(moves.len() + full_columns, board.cols());
            assert!(moves.windows(2).all(|pair| pair[0] < pair[1]));
            assert_eq!(board.is_full(), moves.is_empty());
        }

        let mut board = Board::new();
        for _ in 0..3 {
            board.apply_move(0, Player::One)?;
            board.apply_move(0, Player::Two)?;
        }
        assert_eq!(board.legal_moves(), vec![1, 2, 3, 4, 5, 6]);
        Ok(())
    }

    #[test]
    pub fn apply_undo_round_trip() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..100 {
            let (mut board, player) = random_position(&mut rng, 30)?;
            let before = board.clone();
            for column in before.legal_moves() {
                board.apply_move(column, player)?;
                assert_ne!(board, before);
                assert_eq!(board.undo_move(column)?, player);
                assert_eq!(board, before);
            }
        }
        Ok(())
    }

    #[test]
    pub fn move_errors() -> Result<()> {
        let mut board = Board::new();
        assert!(matches!(board.undo_move(3), Err(Error::EmptyColumn { column: 3 })));
        assert!(matches!(
            board.apply_move(7, Player::One),
            Err(Error::ColumnOutOfRange { column: 7, cols: 7 })
        ));

        let mut full = full_board()?;
        assert!(full.is_full());
        assert!(matches!(
            full.apply_move(2, Player::One),
            Err(Error::IllegalMove { column: 2 })
        ));
        Ok(())
    }

    #[test]
    pub fn winner_detection() -> Result<()> {
        let board = winning_row()?;
        assert_eq!(board.winner(), None);
        assert!(board.is_winning_move(4, Player::One));
        assert!(!board.is_winning_move(4, Player::Two));
        assert!(!board.is_winning_move(6, Player::One));

        let diagonal = Board::from_rows(&[
            ".......",
            ".......",
            "...1...",
            "..12...",
            ".122...",
            "1222...",
        ])?;
        assert_eq!(diagonal.winner(), Some(Player::One));
        Ok(())
    }

    #[test]
    pub fn evaluation_colour_symmetry() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let (board, _) = random_position(&mut rng, 30)?;
            let swapped = board.swap_players();
            for &player in [Player::One, Player::Two].iter() {
                assert_eq!(evaluate(&board, player), evaluate(&swapped, player.opponent()));
            }
        }
        Ok(())
    }

    #[test]
    pub fn alpha_beta_matches_full_minimax() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..25 {
            let (board, player) = random_position(&mut rng, 20)?;
            if board.is_full() {
                continue;
            }
            for depth in 1..=4 {
                let config = SearchConfig::default().with_max_ply_adversarial(depth);

                let mut pruned = Minimax::new(config);
                let mut working = board.clone();
                let (pruned_score, pruned_move) = pruned.search(&mut working, player)?;
                assert_eq!(working, board);

                let mut full = Minimax::new(config).without_pruning();
                let (full_score, full_move) = full.search(&mut working, player)?;

                assert_eq!(pruned_move, full_move);
                assert_eq!(pruned_score, full_score);
                assert!(pruned.node_count <= full.node_count);
            }
        }
        Ok(())
    }

    #[test]
    pub fn minimax_depth_counts_plies() -> Result<()> {
        // every applied half-move is one node: 7, 7 + 49, 7 + 49 + 343
        for &(depth, nodes) in [(1, 7), (2, 56), (3, 399)].iter() {
            let config = SearchConfig::default().with_max_ply_adversarial(depth);
            let mut search = Minimax::new(config).without_pruning();
            assert_eq!(search.max_ply(), depth);

            let mut board = Board::new();
            search.search(&mut board, Player::One)?;
            assert_eq!(search.node_count, nodes);
        }
        Ok(())
    }

    #[test]
    pub fn minimax_two_plies_takes_worst_reply() -> Result<()> {
        let mut board = Board::from_moves("4453")?;
        let config = SearchConfig::default().with_max_ply_adversarial(2);
        let scores = Minimax::new(config).root_scores(&mut board, Player::One)?;
        assert_eq!(scores.len(), 7);

        for (column, score) in scores {
            board.apply_move(column, Player::One)?;
            let mut worst = f64::INFINITY;
            for reply in board.legal_moves() {
                board.apply_move(reply, Player::Two)?;
                worst = worst.min(evaluate(&board, Player::One));
                board.undo_move(reply)?;
            }
            board.undo_move(column)?;
            assert_eq!(score, worst);
        }
        Ok(())
    }

    #[test]
    pub fn takes_immediate_win() -> Result<()> {
        for depth in 1..=4 {
            let config = SearchConfig::default()
                .with_max_ply_adversarial(depth)
                .with_max_ply_stochastic(depth);
            let mut board = winning_row()?;
            assert_eq!(Minimax::new(config).best_move(&mut board, Player::One)?, 4);
            assert_eq!(Expectimax::new(config).best_move(&mut board, Player::One)?, 4);
        }

        // default depths
        let board = winning_row()?;
        let config = SearchConfig::default();
        assert_eq!(MinimaxAgent::new(Player::One, config).choose_move(&board)?, 4);
        assert_eq!(ExpectimaxAgent::new(Player::One, config).choose_move(&board)?, 4);
        Ok(())
    }

    #[test]
    pub fn blocks_opponent_win() -> Result<()> {
        let board = Board::from_rows(&[
            ".......",
            ".......",
            ".......",
            ".......",
            ".......",
            "1222.11",
        ])?;
        let config = SearchConfig::default().with_max_ply_stochastic(4);
        assert_eq!(MinimaxAgent::new(Player::One, config).choose_move(&board)?, 4);
        assert_eq!(ExpectimaxAgent::new(Player::One, config).choose_move(&board)?, 4);
        Ok(())
    }

    #[test]
    pub fn empty_board_search() -> Result<()> {
        let mut board = Board::new();
        let mut search = Minimax::new(SearchConfig::default());
        let column = search.best_move(&mut board, Player::One)?;
        assert!(column < 7);
        assert_eq!(board, Board::new());

        // stateless: a repeated search visits the same tree
        let nodes = search.node_count;
        assert_eq!(search.best_move(&mut board, Player::One)?, column);
        assert_eq!(search.node_count, nodes);
        Ok(())
    }

    #[test]
    pub fn full_board_has_no_move() -> Result<()> {
        let mut board = full_board()?;
        let config = SearchConfig::default();
        assert!(matches!(
            Minimax::new(config).best_move(&mut board, Player::One),
            Err(Error::NoLegalMove)
        ));
        assert!(matches!(
            Expectimax::new(config).best_move(&mut board, Player::Two),
            Err(Error::NoLegalMove)
        ));
        Ok(())
    }

    #[test]
    pub fn expectimax_leaves_board_unchanged() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(5);
        let config = SearchConfig::default().with_max_ply_stochastic(3);
        for _ in 0..10 {
            let (mut board, player) = random_position(&mut rng, 20)?;
            if board.is_full() {
                continue;
            }
            let before = board.clone();
            let column = Expectimax::new(config).best_move(&mut board, player)?;
            assert_eq!(board, before);
            assert!(board.playable(column));
        }
        Ok(())
    }

    #[test]
    pub fn expectimax_averages_replies() -> Result<()> {
        // with two plies every root score is the mean over the opponent's replies
        let mut board = Board::from_moves("44")?;
        let config = SearchConfig::default().with_max_ply_stochastic(2);
        let mut search = Expectimax::new(config);
        assert_eq!(search.max_ply(), 2);
        let scores = search.root_scores(&mut board, Player::One)?;
        assert_eq!(scores.len(), 7);

        let (column, score) = scores[0];
        board.apply_move(column, Player::One)?;
        let replies = board.legal_moves();
        let mut total = 0.0;
        for &reply in replies.iter() {
            board.apply_move(reply, Player::Two)?;
            total += evaluate(&board, Player::One);
            board.undo_move(reply)?;
        }
        board.undo_move(column)?;
        assert_eq!(score, total / replies.len() as f64);
        Ok(())
    }

    #[test]
    pub fn small_board_search() -> Result<()> {
        let mut board = Board::with_dimensions(4, 5)?;
        let config = SearchConfig::default().with_max_ply_stochastic(4);
        let column = Minimax::new(config).best_move(&mut board, Player::Two)?;
        assert!(column < 5);
        let column = Expectimax::new(config).best_move(&mut board, Player::Two)?;
        assert!(column < 5);
        assert!(Board::with_dimensions(3, 7).is_err());
        Ok(())
    }
}
