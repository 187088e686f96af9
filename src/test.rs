#[cfg(test)]
pub mod test {
    use anyhow::Result;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use std::cell::Cell;
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::rc::Rc;

    use crate::arena::{self, FoxPolicy};
    use crate::board::{Board, CellState};
    use crate::game_state::{GameState, Phase, Winner};
    use crate::manager::GameManager;
    use crate::moves::{Actor, Move};
    use crate::pieces::{Fox, Hound};
    use crate::search::*;
    use crate::strategy::{easy, evaluate_position, hard, medium, Difficulty, Tactic};
    use crate::NUM_HOUNDS;

    const START: &str = "
        .H.H.H.H
        ........
        ........
        ........
        ........
        ........
        ........
        F.......";

    // the only move sealing every escape route is hound 0 to (1,2)
    const SEALABLE: &str = "
        ...H....
        H...H.H.
        ........
        ..F.....
        ........
        ........
        ........
        ........";

    // no single move seals the Fox in, hound 0 to (1,2) cuts the most routes
    const LEAKY: &str = "
        ...H....
        ....H.H.
        ........
        ..F.....
        ........
        ........
        .....H..
        ........";

    // hound 2 to (6,3) leaves the Fox without a move
    const TRAPPABLE: &str = "
        ........
        ........
        ........
        ........
        .H.H....
        ..F.H...
        .H......
        ........";

    const DEFENSIVE: &str = "
        ........
        .H...H..
        ..H.....
        ........
        ........
        .....F..
        ........
        .......H";

    const FOX_ON_RIGHT: &str = "
        .H.H.H.H
        ........
        ........
        ........
        ........
        ........
        ........
        ......F.";

    fn position(diagram: &str) -> Result<(Board, Fox, [Hound; NUM_HOUNDS])> {
        Board::from_diagram(diagram)
    }

    fn decide(
        difficulty: Difficulty,
        diagram: &str,
        seed: u64,
    ) -> Result<Option<crate::strategy::Decision>> {
        let (mut board, fox, mut hounds) = position(diagram)?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Ok(difficulty.decide(&mut hounds, &fox, &mut board, &mut rng))
    }

    #[test]
    pub fn starting_layout() -> Result<()> {
        let (board, fox, hounds) = position(START)?;
        assert_eq!(board, Board::starting());
        assert_eq!(fox.position(), (7, 0));
        let cells: Vec<(i32, i32)> = hounds.iter().map(Hound::position).collect();
        assert_eq!(cells, vec![(0, 1), (0, 3), (0, 5), (0, 7)]);
        assert_eq!(board.occupied_count(), 5);
        assert_eq!(board.to_diagram(), format!("{}", board));
        Ok(())
    }

    #[test]
    pub fn diagram_rejects_bad_positions() {
        assert!(Board::from_diagram("F.......").is_err());
        // two foxes
        assert!(Board::from_diagram(START.replace("F.......", "F.F.....")).is_err());
        // three hounds
        assert!(Board::from_diagram(START.replace(".H.H.H.H", ".H.H.H..")).is_err());
        // no fox
        assert!(Board::from_diagram(START.replace("F.......", "........")).is_err());
        assert!(Board::from_diagram(START.replace("F.......", "F......x")).is_err());
        assert!(Board::from_diagram(START.replace("F.......", "F......")).is_err());
    }

    #[test]
    pub fn cell_queries_are_total() {
        let board = Board::starting();
        let off_board = [
            (-1, 0),
            (0, -1),
            (8, 0),
            (0, 8),
            (i32::MIN, i32::MAX),
            (i32::MAX, 0),
        ];
        for (row, col) in off_board {
            assert!(!board.is_valid_cell(row, col));
            assert!(board.is_fox_blocked(row, col));
            assert_eq!(board.cell_state(row, col), CellState::Empty);
            assert!(!board.is_cell_occupied(row, col));
            assert_eq!(Board::cell_mask(row, col), 0);
        }
        assert_eq!(board.cell_state(0, 1), CellState::Hound);
        assert_eq!(board.cell_state(7, 0), CellState::Fox);
        assert!(board.cell_state(3, 3).is_empty());
    }

    #[test]
    pub fn move_validity_over_every_pair() -> Result<()> {
        let (board, _, _) = position(
            "
            ........
            ........
            ...H....
            ....F...
            .....H..
            ........
            .H......
            ......H.",
        )?;

        for from in 0..64 {
            for to in 0..64 {
                let (from_row, from_col) = Board::coordinates(from);
                let (to_row, to_col) = Board::coordinates(to);
                let diagonal_step =
                    (to_row - from_row).abs() == 1 && (to_col - from_col).abs() == 1;
                let free = board.cell_state(to_row, to_col).is_empty();

                let fox = board.is_valid_move(from_row, from_col, to_row, to_col, true);
                assert_eq!(
                    fox,
                    board.cell_state(from_row, from_col) == CellState::Fox && diagonal_step && free
                );

                let hound = board.is_valid_move(from_row, from_col, to_row, to_col, false);
                assert_eq!(
                    hound,
                    board.cell_state(from_row, from_col) == CellState::Hound
                        && diagonal_step
                        && free
                        && to_row > from_row
                );
            }
        }

        // (2,3) and (4,5) hold hounds
        assert_eq!(Fox::new(3, 4).possible_moves(&board), vec![(2, 5), (4, 3)]);
        assert_eq!(Hound::new(2, 3).possible_moves(&board), vec![(3, 2)]);
        assert!(!board.is_valid_move(2, 3, 1, 2, false));
        Ok(())
    }

    #[test]
    pub fn move_piece_round_trip() {
        let mut board = Board::starting();
        let before = board.clone();
        board.move_piece(0, 1, 1, 2);
        assert_eq!(board.cell_state(1, 2), CellState::Hound);
        assert!(board.cell_state(0, 1).is_empty());
        assert_eq!(board.occupied_count(), 5);
        board.move_piece(1, 2, 0, 1);
        assert_eq!(board, before);
    }

    #[test]
    pub fn fox_blocked_and_escaped() -> Result<()> {
        let (board, fox, _) = position(
            "
            ........
            ........
            ........
            ........
            ........
            .H.H....
            ..F.....
            .H.H....",
        )?;
        assert!(board.is_fox_blocked(fox.row(), fox.col()));
        assert!(fox.possible_moves(&board).is_empty());
        assert!(board.has_fox_escaped(0));
        assert!(!board.has_fox_escaped(1));
        Ok(())
    }

    #[test]
    pub fn game_state_transitions() {
        let mut state = GameState::new();
        assert!(state.is_fox_turn());
        assert_eq!(state.status_message(), "Fox's turn. Click on the fox to move.");

        state.set_fox_turn(false);
        assert_eq!(state.phase(), Phase::HoundsToMove);
        assert_eq!(state.status_message(), "Hounds' turn. AI is thinking...");

        state.set_game_over(Winner::Hounds);
        assert_eq!(state.winner(), Some(Winner::Hounds));
        assert_eq!(state.status_message(), "Fox is trapped! Hounds win!");

        // a finished game stays finished
        state.set_game_over(Winner::Fox);
        state.set_fox_turn(true);
        assert_eq!(state.winner(), Some(Winner::Hounds));
        assert!(!state.is_fox_turn());

        state.reset();
        assert_eq!(state, GameState::new());
        assert_eq!(state.winner(), None);
    }

    #[test]
    pub fn move_display() {
        let mv = Move::hound(2, (1, 4), (2, 5));
        assert_eq!(mv.to_string(), "Hound 2 moves from (1,4) to (2,5)");
        assert_eq!(mv.actor(), Actor::Hound(2));
        assert_eq!(mv.hound_index(), Some(2));
        let fox = Move::fox((7, 0), (6, 1));
        assert_eq!(fox.actor(), Actor::Fox);
        assert_eq!(fox.hound_index(), None);
        assert_eq!(fox.to_string(), "Fox moves from (7,0) to (6,1)");
    }

    #[test]
    pub fn simulation_restores_on_unwind() -> Result<()> {
        let (mut board, _, mut hounds) = position(TRAPPABLE)?;
        let (board_before, hounds_before) = (board.clone(), hounds);
        let mv = Move::hound(2, (5, 4), (6, 3));

        let seen = simulate(&mut board, &mut hounds, &mv, |board, hounds| {
            (board.cell_state(6, 3), hounds[2].position())
        });
        assert_eq!(seen, (CellState::Hound, (6, 3)));
        assert_eq!(board, board_before);
        assert_eq!(hounds, hounds_before);

        let result = catch_unwind(AssertUnwindSafe(|| {
            simulate(&mut board, &mut hounds, &mv, |_, _| -> () {
                panic!("probe failed");
            })
        }));
        assert!(result.is_err());
        assert_eq!(board, board_before);
        assert_eq!(hounds, hounds_before);
        Ok(())
    }

    #[test]
    pub fn move_enumeration_order() -> Result<()> {
        let (mut board, fox, mut hounds) = position(TRAPPABLE)?;
        let moves = all_possible_moves(&hounds, &board);
        assert_eq!(
            moves,
            vec![
                Move::hound(0, (4, 1), (5, 0)),
                Move::hound(2, (5, 4), (6, 3)),
                Move::hound(2, (5, 4), (6, 5)),
                Move::hound(3, (6, 1), (7, 0)),
                Move::hound(3, (6, 1), (7, 2)),
            ]
        );
        assert_eq!(find_any_valid_move(&hounds, &board), Some(moves[0]));
        assert_eq!(
            find_fox_trapping_move(&mut hounds, &fox, &mut board),
            Some(Move::hound(2, (5, 4), (6, 3)))
        );

        let (board, _, hounds) = position(
            "
            ........
            ........
            ...F....
            ........
            ........
            ........
            ........
            .H.H.H.H",
        )?;
        assert!(all_possible_moves(&hounds, &board).is_empty());
        assert_eq!(find_any_valid_move(&hounds, &board), None);
        Ok(())
    }

    #[test]
    pub fn emergency_block_needs_a_hound_on_the_top_row() -> Result<()> {
        // hounds only move down, so none of them can ever land on row 0
        let (board, fox, hounds) = position(
            "
            .......H
            ..F.....
            .H.H.H..
            ........
            ........
            ........
            ........
            ........",
        )?;
        assert_eq!(fox.possible_moves(&board)[0], (0, 1));
        assert_eq!(find_emergency_block(&hounds, &fox, &board), None);
        Ok(())
    }

    #[test]
    pub fn shortest_paths_to_top_row() -> Result<()> {
        let (board, fox, _) = position(SEALABLE)?;
        let paths = find_paths_to_top_row(fox.position(), &board);
        assert_eq!(paths.columns().collect::<Vec<_>>(), vec![1]);
        assert_eq!(paths.total(), 1);
        assert_eq!(paths.shortest_length(), Some(3));
        assert_eq!(
            paths.path_to(1),
            Some(&[(3, 2), (2, 1), (1, 2), (0, 1)][..])
        );
        assert_eq!(paths.path_to(3), None);

        // one path per reachable top-row cell, however many routes lead there
        let (board, fox, _) = position(DEFENSIVE)?;
        let paths = find_paths_to_top_row(fox.position(), &board);
        assert_eq!(paths.columns().collect::<Vec<_>>(), vec![2, 4, 6]);
        assert_eq!(paths.total(), 3);
        assert_eq!(paths.shortest_length(), Some(5));
        assert_eq!(
            paths.path_to(6),
            Some(&[(5, 5), (4, 4), (3, 5), (2, 6), (1, 7), (0, 6)][..])
        );

        // every top-row cell the fox could reach holds a hound
        let (board, fox, _) = position(START)?;
        assert!(find_paths_to_top_row(fox.position(), &board).is_empty());
        Ok(())
    }

    #[test]
    pub fn path_census() -> Result<()> {
        let (board, fox, _) = position(SEALABLE)?;
        let census = census_paths_to_top(fox.position(), &board);
        assert_eq!(census.total, 704);
        assert_eq!(count_paths_to_top(fox.position(), &board), 704);
        assert_eq!(census.by_column.values().sum::<usize>(), 704);

        let critical = census.critical_points();
        assert_eq!(critical.len(), 6);
        assert_eq!(critical[0], (1, 2));

        let (board, fox, _) = position(LEAKY)?;
        assert_eq!(count_paths_to_top(fox.position(), &board), 210);
        Ok(())
    }

    #[test]
    pub fn hard_seals_every_route() -> Result<()> {
        for seed in 0..3 {
            let decision = decide(Difficulty::Hard, SEALABLE, seed)?.expect("hounds can move");
            assert_eq!(decision.tactic, Tactic::ComprehensiveBlock);
            assert_eq!(decision.mv, Move::hound(0, (0, 3), (1, 2)));
        }

        let (mut board, fox, mut hounds) = position(SEALABLE)?;
        let mv = Move::hound(0, (0, 3), (1, 2));
        let left = simulate(&mut board, &mut hounds, &mv, |board, _| {
            count_paths_to_top(fox.position(), board)
        });
        assert_eq!(left, 0);
        Ok(())
    }

    #[test]
    pub fn hard_cuts_most_routes() -> Result<()> {
        let decision = decide(Difficulty::Hard, LEAKY, 0)?.expect("hounds can move");
        assert_eq!(decision.tactic, Tactic::ComprehensiveBlock);
        assert_eq!(decision.mv, Move::hound(0, (0, 3), (1, 2)));

        let (mut board, fox, mut hounds) = position(LEAKY)?;
        let left = simulate(&mut board, &mut hounds, &decision.mv, |board, _| {
            count_paths_to_top(fox.position(), board)
        });
        assert_eq!(left, 210 - 161);
        Ok(())
    }

    #[test]
    pub fn hard_from_the_start() -> Result<()> {
        let decision = decide(Difficulty::Hard, START, 0)?.expect("hounds can move");
        assert_eq!(decision.tactic, Tactic::DiagonalWall);
        assert_eq!(decision.mv, Move::hound(3, (0, 7), (1, 6)));

        let (board, fox, hounds) = position(FOX_ON_RIGHT)?;
        assert_eq!(
            hard::find_diagonal_wall_move(&hounds, &fox, &board),
            Some(Move::hound(3, (0, 7), (1, 6)))
        );

        let (mut board, fox, mut hounds) = position(START)?;
        assert_eq!(
            hard::find_strategic_move(&mut hounds, &fox, &mut board),
            Some(Move::hound(2, (0, 5), (1, 6)))
        );
        assert_eq!(
            hard::find_tactical_move(&hounds, &fox, &board),
            Some(Move::hound(0, (0, 1), (1, 0)))
        );
        Ok(())
    }

    #[test]
    pub fn position_evaluation() -> Result<()> {
        let (_, fox, hounds) = position(START)?;
        assert_eq!(evaluate_position(&hounds, &fox), 40);
        let (_, fox, hounds) = position(SEALABLE)?;
        assert_eq!(evaluate_position(&hounds, &fox), 125);
        Ok(())
    }

    #[test]
    pub fn medium_tactics() -> Result<()> {
        let (mut board, fox, mut hounds) = position(SEALABLE)?;
        assert_eq!(
            medium::find_path_reducing_move(&mut hounds, &fox, &mut board),
            Some(Move::hound(0, (0, 3), (1, 2)))
        );

        // (2,2) to (3,3) thins out routes but leaves all three top-row cells open
        let (mut board, fox, mut hounds) = position(DEFENSIVE)?;
        let thinning = Move::hound(2, (2, 2), (3, 3));
        let open = simulate(&mut board, &mut hounds, &thinning, |board, _| {
            find_paths_to_top_row(fox.position(), board).total()
        });
        assert_eq!(open, 3);
        assert_eq!(
            medium::find_path_reducing_move(&mut hounds, &fox, &mut board),
            Some(Move::hound(1, (1, 5), (2, 4)))
        );
        assert_eq!(
            medium::find_defensive_row_move(&hounds, &fox, &board),
            Some(Move::hound(2, (2, 2), (3, 3)))
        );
        assert_eq!(
            medium::find_tactical_move(&hounds, &fox, &board),
            Some(Move::hound(1, (1, 5), (2, 4)))
        );

        // nothing to block, no row to hold: medium falls through to scoring
        for seed in 0..20 {
            let decision = decide(Difficulty::Medium, START, seed)?.expect("hounds can move");
            assert_eq!(decision.tactic, Tactic::Tactical);
            assert_eq!(decision.mv, Move::hound(0, (0, 1), (1, 0)));
        }
        Ok(())
    }

    #[test]
    pub fn approach_nearest_hound() -> Result<()> {
        let (board, fox, hounds) = position(START)?;
        assert_eq!(
            easy::find_approach_move(&hounds, &fox, &board),
            Some(Move::hound(0, (0, 1), (1, 0)))
        );

        // the nearest hound is stuck on the bottom row
        let (board, fox, hounds) = position(
            "
            .H.H.H..
            ........
            ........
            ........
            ........
            ........
            ..F.....
            ...H....",
        )?;
        assert_eq!(
            easy::find_approach_move(&hounds, &fox, &board),
            Some(Move::hound(0, (0, 1), (1, 0)))
        );
        Ok(())
    }

    #[test]
    pub fn trap_rates() -> Result<()> {
        let trap = Move::hound(2, (5, 4), (6, 3));
        let (mut board, fox, mut hounds) = position(TRAPPABLE)?;
        let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);

        let mut trapped = 0;
        let calls = 2000;
        for _ in 0..calls {
            let decision = Difficulty::Easy
                .decide(&mut hounds, &fox, &mut board, &mut rng)
                .expect("hounds can move");
            if decision.tactic == Tactic::Trap {
                assert_eq!(decision.mv, trap);
                trapped += 1;
            }
        }
        assert!(
            (900..=1100).contains(&trapped),
            "easy trapped {} times out of {}",
            trapped,
            calls
        );

        for _ in 0..calls {
            let decision = Difficulty::Medium
                .decide(&mut hounds, &fox, &mut board, &mut rng)
                .expect("hounds can move");
            assert_eq!(decision.tactic, Tactic::Trap);
            assert_eq!(decision.mv, trap);
        }

        let decision = Difficulty::Hard
            .decide(&mut hounds, &fox, &mut board, &mut rng)
            .expect("hounds can move");
        assert_eq!(decision.tactic, Tactic::Trap);
        assert_eq!(decision.mv, trap);
        Ok(())
    }

    fn tactic_counts(
        difficulty: Difficulty,
        diagram: &str,
        calls: usize,
        seed: u64,
    ) -> Result<Vec<(Tactic, Move)>> {
        let (mut board, fox, mut hounds) = position(diagram)?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut decisions = Vec::with_capacity(calls);
        for _ in 0..calls {
            let decision = difficulty
                .decide(&mut hounds, &fox, &mut board, &mut rng)
                .expect("hounds can move");
            decisions.push((decision.tactic, decision.mv));
        }
        Ok(decisions)
    }

    #[test]
    pub fn easy_tactic_rates() -> Result<()> {
        // no trap and no escape to block, so it is approach or a random move
        let (board, _, hounds) = position(START)?;
        let legal = all_possible_moves(&hounds, &board);
        let decisions = tactic_counts(Difficulty::Easy, START, 2000, 0xea5e)?;

        let mut approached = 0;
        let mut random = 0;
        for (tactic, mv) in decisions {
            match tactic {
                Tactic::Approach => {
                    assert_eq!(mv, Move::hound(0, (0, 1), (1, 0)));
                    approached += 1;
                }
                Tactic::Random => {
                    assert!(legal.contains(&mv));
                    random += 1;
                }
                other => panic!("unexpected tactic {:?}", other),
            }
        }
        assert!((900..=1100).contains(&approached), "approached {} times", approached);
        assert!((900..=1100).contains(&random), "moved at random {} times", random);
        Ok(())
    }

    #[test]
    pub fn medium_tactic_rates() -> Result<()> {
        let decisions = tactic_counts(Difficulty::Medium, DEFENSIVE, 2000, 0x3ed1)?;

        let (mut reduced, mut defended, mut tactical) = (0, 0, 0);
        for (tactic, mv) in decisions {
            match tactic {
                Tactic::PathReduction => {
                    assert_eq!(mv, Move::hound(1, (1, 5), (2, 4)));
                    reduced += 1;
                }
                Tactic::DefensiveRow => {
                    assert_eq!(mv, Move::hound(2, (2, 2), (3, 3)));
                    defended += 1;
                }
                Tactic::Tactical => {
                    assert_eq!(mv, Move::hound(1, (1, 5), (2, 4)));
                    tactical += 1;
                }
                other => panic!("unexpected tactic {:?}", other),
            }
        }
        // 80%, then 70% of the remaining 20%, then the rest
        assert!((1500..=1700).contains(&reduced), "reduced paths {} times", reduced);
        assert!((220..=340).contains(&defended), "held the row {} times", defended);
        assert!((70..=170).contains(&tactical), "scored moves {} times", tactical);
        Ok(())
    }

    #[test]
    pub fn deciding_leaves_position_untouched() -> Result<()> {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        for diagram in [START, SEALABLE, LEAKY, TRAPPABLE, DEFENSIVE, FOX_ON_RIGHT] {
            for difficulty in Difficulty::ALL {
                let (mut board, fox, mut hounds) = position(diagram)?;
                let (board_before, hounds_before) = (board.clone(), hounds);

                for _ in 0..10 {
                    let mv = difficulty
                        .best_move(&mut hounds, &fox, &mut board, &mut rng)
                        .expect("hounds can move");
                    let (from_row, from_col) = mv.from();
                    let (to_row, to_col) = mv.to();
                    assert!(board.is_valid_move(from_row, from_col, to_row, to_col, false));
                }

                assert_eq!(board, board_before);
                assert_eq!(hounds, hounds_before);
            }
        }
        Ok(())
    }

    #[test]
    pub fn difficulty_names() -> Result<()> {
        assert_eq!("hard".parse::<Difficulty>()?, Difficulty::Hard);
        assert_eq!(" MEDIUM ".parse::<Difficulty>()?, Difficulty::Medium);
        assert!("expert".parse::<Difficulty>().is_err());
        for difficulty in Difficulty::ALL {
            assert_eq!(difficulty.to_string().parse::<Difficulty>()?, difficulty);
        }
        assert_eq!(Difficulty::default(), Difficulty::Easy);
        Ok(())
    }

    #[test]
    pub fn new_game() {
        let mut game = GameManager::new().with_seed(1);
        game.set_difficulty(Difficulty::Medium);
        assert!(game.submit_fox_move(6, 1));
        assert!(game.request_ai_move());

        game.new_game();
        let cells: Vec<(i32, i32)> = game.hounds().iter().map(Hound::position).collect();
        assert_eq!(cells, vec![(0, 1), (0, 3), (0, 5), (0, 7)]);
        assert_eq!(game.fox().position(), (7, 0));
        assert_eq!(game.board(), &Board::starting());
        assert!(game.game_state().is_fox_turn());
        assert_eq!(game.difficulty(), Difficulty::Medium);
        assert_eq!(game.last_decision(), None);
        assert_eq!(game.fox_moves(), vec![(6, 1)]);
        assert!(game.can_any_hound_move());
    }

    #[test]
    pub fn turn_order_is_enforced() {
        let mut game = GameManager::new().with_seed(2);
        let board = game.board().clone();

        assert!(!game.request_ai_move());
        assert!(!game.submit_fox_move(5, 2));
        assert!(!game.submit_fox_move(7, 1));
        assert!(!game.submit_fox_move(-1, 1));
        assert_eq!(game.board(), &board);

        assert!(game.submit_fox_move(6, 1));
        assert_eq!(game.game_state().phase(), Phase::HoundsToMove);
        assert!(!game.submit_fox_move(5, 2));
        assert!(game.request_ai_move());
        assert!(game.game_state().is_fox_turn());
    }

    #[test]
    pub fn fox_escapes() -> Result<()> {
        // a fox is required
        assert!(GameManager::from_diagram(
            "
            .......H
            H.......
            ........
            ........
            ........
            ........
            ...H.H..
            ........",
        )
        .is_err());

        let mut game = GameManager::from_diagram(
            "
            ........
            F.......
            ........
            ........
            ........
            ........
            .H.H.H.H
            ........",
        )?;
        assert!(game.submit_fox_move(0, 1));
        assert_eq!(game.game_state().winner(), Some(Winner::Fox));
        assert_eq!(game.game_state().status_message(), "Fox has escaped! Fox wins!");
        assert!(!game.submit_fox_move(1, 0));
        assert!(!game.request_ai_move());
        Ok(())
    }

    #[test]
    pub fn hounds_trap_the_fox() -> Result<()> {
        let mut game = GameManager::from_diagram(
            "
            ........
            ........
            ........
            ........
            ........
            .H.H....
            ....H...
            .H.F....",
        )?
        .with_difficulty(Difficulty::Hard);
        assert_eq!(game.fox_moves(), vec![(6, 2)]);
        assert!(game.submit_fox_move(6, 2));
        assert!(game.request_ai_move());

        assert_eq!(game.hounds()[2].position(), (7, 3));
        assert_eq!(game.game_state().winner(), Some(Winner::Hounds));
        assert_eq!(game.game_state().status_message(), "Fox is trapped! Hounds win!");
        assert_eq!(game.last_decision().map(|decision| decision.tactic), Some(Tactic::Trap));
        Ok(())
    }

    #[test]
    pub fn stuck_hounds_lose() -> Result<()> {
        let mut game = GameManager::from_diagram(
            "
            ........
            ........
            ........
            ...F....
            ........
            ........
            ........
            .H.H.H.H",
        )?;
        assert!(!game.can_any_hound_move());
        assert!(game.submit_fox_move(2, 2));
        assert!(!game.request_ai_move());
        assert_eq!(game.game_state().winner(), Some(Winner::Fox));
        assert_eq!(game.game_state().status_message(), "Hounds can't move! Fox wins!");
        Ok(())
    }

    #[test]
    pub fn listeners_hear_every_change() {
        let calls = Rc::new(Cell::new(0));
        let mut game = GameManager::new().with_seed(4);
        let counter = Rc::clone(&calls);
        game.subscribe(move || counter.set(counter.get() + 1));

        assert!(!game.submit_fox_move(5, 5));
        assert_eq!(calls.get(), 0);
        assert!(game.submit_fox_move(6, 1));
        assert_eq!(calls.get(), 1);
        assert!(game.request_ai_move());
        assert_eq!(calls.get(), 2);
        game.set_difficulty(Difficulty::Hard);
        assert_eq!(calls.get(), 2);
        game.new_game();
        assert_eq!(calls.get(), 3);
    }

    #[test]
    pub fn self_play_invariants() {
        for difficulty in Difficulty::ALL {
            for seed in 0..10 {
                let mut game = GameManager::new().with_seed(seed).with_difficulty(difficulty);
                let mut fox_rng = ChaCha8Rng::seed_from_u64(seed);

                while !game.game_state().is_game_over() {
                    if game.game_state().is_fox_turn() {
                        let (row, col) = FoxPolicy::Random
                            .choose(&game, &mut fox_rng)
                            .expect("the fox is never left without a move");
                        assert!(game.submit_fox_move(row, col));
                    } else if game.request_ai_move() {
                        let decision = game.last_decision().expect("a hound moved");
                        assert!(decision.mv.to().0 > decision.mv.from().0);
                    }

                    let board = game.board();
                    assert_eq!(board.occupied_count(), 5);
                    assert_eq!(board.fox_cells(), vec![game.fox().position()]);
                    for hound in game.hounds() {
                        assert_eq!(board.cell_state(hound.row(), hound.col()), CellState::Hound);
                    }
                }
            }
        }
    }

    #[test]
    pub fn greedy_fox_takes_the_exit() -> Result<()> {
        let game = GameManager::from_diagram(
            "
            ........
            ..F.....
            ........
            ........
            ........
            ........
            ........
            .H.H.H.H",
        )?;
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(FoxPolicy::Greedy.choose(&game, &mut rng), Some((0, 1)));
        assert!("greedy".parse::<FoxPolicy>().is_ok());
        assert!("lazy".parse::<FoxPolicy>().is_err());
        Ok(())
    }

    #[test]
    pub fn arena_games_finish() {
        let outcome = arena::play_game(Difficulty::Hard, FoxPolicy::Greedy, 11);
        assert_eq!(outcome, arena::play_game(Difficulty::Hard, FoxPolicy::Greedy, 11));
        assert!(outcome.winner.is_some());

        let report = arena::run(Difficulty::Medium, FoxPolicy::Random, 12, 7);
        assert_eq!(report.games, 12);
        assert_eq!(report.unfinished, 0);
        assert_eq!(report.fox_wins + report.hound_wins, 12);
        assert!(report.average_plies() > 0.0);
    }
}
