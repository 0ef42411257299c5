use log::info;
use std::{
    sync::{Arc, LazyLock},
    thread,
    time::Duration,
};
use twophase::{
    CancellationToken, CubeState, MalformedInput, MoveSequence, SolveError, Solver, SolverConfig,
    TableConfig, Tables, UnsolvableState, facelet,
};

static TABLES: LazyLock<Arc<Tables>> =
    LazyLock::new(|| Arc::new(Tables::build(&TableConfig::default()).unwrap()));

const SOLVED: &str = "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB";

fn solver(config: SolverConfig) -> Solver {
    Solver::with_tables(Arc::clone(&TABLES), config)
}

fn scrambled(scramble: &str) -> (CubeState, String) {
    let scramble: MoveSequence = scramble.parse().unwrap();
    let state = CubeState::SOLVED.apply_sequence(&scramble);
    (state, facelet::encode(&state))
}

#[test_log::test]
fn test_solved_cube_needs_no_moves() {
    let solution = solver(SolverConfig::default()).solve(SOLVED).unwrap();
    assert!(solution.is_empty());
}

#[test_log::test]
fn test_sexy_move() {
    let (state, facelets) = scrambled("R U R' U'");
    let solution = solver(SolverConfig::default()).solve(&facelets).unwrap();
    info!("Solution: {solution}");
    assert!(solution.len() <= 20);
    assert!(state.apply_sequence(&solution.moves).is_solved());
}

#[test_log::test]
fn test_target_length_finds_optimal_sexy_move() {
    let (state, facelets) = scrambled("R U R' U'");
    let solution = solver(SolverConfig {
        target_length: Some(4),
        ..SolverConfig::default()
    })
    .solve(&facelets)
    .unwrap();
    assert_eq!(solution.len(), 4);
    assert!(state.apply_sequence(&solution.moves).is_solved());
}

#[test_log::test]
fn test_random_scrambles() {
    let solver = solver(SolverConfig::default());
    let mut rng = fastrand::Rng::with_seed(2024);
    for _ in 0..20 {
        let scramble = MoveSequence::random(30, &mut rng);
        let state = CubeState::SOLVED.apply_sequence(&scramble);
        let solution = solver.solve(&facelet::encode(&state)).unwrap();
        info!("{scramble} solved by {solution}");
        assert!(solution.len() <= 30);
        assert!(solution.phase1_length <= 12);
        assert!(state.apply_sequence(&solution.moves).is_solved());
    }
}

#[test_log::test]
fn test_refinement_never_lengthens() {
    let mut rng = fastrand::Rng::with_seed(77);
    let first = solver(SolverConfig::default());
    let refined = solver(SolverConfig {
        target_length: Some(20),
        ..SolverConfig::default()
    });
    for _ in 0..3 {
        let scramble = MoveSequence::random(25, &mut rng);
        let state = CubeState::SOLVED.apply_sequence(&scramble);
        let facelets = facelet::encode(&state);
        let first = first.solve(&facelets).unwrap();
        let refined = refined.solve(&facelets).unwrap();
        assert!(refined.len() <= first.len());
        assert!(state.apply_sequence(&refined.moves).is_solved());
    }
}

#[test_log::test]
fn test_any_color_alphabet() {
    let (state, facelets) = scrambled("F2 D' B L2 U R'");
    let recolored: String = facelets
        .chars()
        .map(|c| match c {
            'U' => 'W',
            'R' => 'R',
            'F' => 'G',
            'D' => 'Y',
            'L' => 'O',
            _ => 'B',
        })
        .collect();
    let solution = solver(SolverConfig::default()).solve(&recolored).unwrap();
    assert!(state.apply_sequence(&solution.moves).is_solved());
}

#[test_log::test]
fn test_malformed_input() {
    let solver = solver(SolverConfig::default());
    assert_eq!(
        solver.solve(&SOLVED[..53]),
        Err(SolveError::Malformed(MalformedInput::WrongLength(53)))
    );
    let mut unbalanced = SOLVED.to_owned();
    unbalanced.replace_range(0..1, "R");
    assert!(matches!(
        solver.solve(&unbalanced),
        Err(SolveError::Malformed(MalformedInput::UnbalancedColor { .. }))
    ));
}

#[test_log::test]
fn test_twisted_corner_is_unsolvable() {
    // Rotate the stickers of the URF corner in place
    let mut facelets: Vec<char> = SOLVED.chars().collect();
    let (u, r, f) = (facelets[8], facelets[9], facelets[20]);
    facelets[8] = f;
    facelets[9] = u;
    facelets[20] = r;
    let facelets: String = facelets.into_iter().collect();
    assert_eq!(
        solver(SolverConfig::default()).solve(&facelets),
        Err(SolveError::Unsolvable(UnsolvableState::CornerTwist))
    );
}

#[test_log::test]
fn test_cancelled_before_start() {
    let (_, facelets) = scrambled("R U2 F' L D B2");
    let cancel = CancellationToken::new();
    cancel.cancel();
    assert_eq!(
        solver(SolverConfig::default()).solve_with_cancel(&facelets, &cancel),
        Err(SolveError::Cancelled)
    );
}

#[test_log::test]
fn test_cancelled_from_another_thread() {
    // An unreachable target keeps the search going until it is cancelled
    let (_, facelets) = scrambled("R U2 F' L D B2 R' U F2 D' L2 B U' R2 F");
    let solver = solver(SolverConfig {
        target_length: Some(0),
        phase1_max_depth: 30,
        ..SolverConfig::default()
    });
    let cancel = CancellationToken::new();
    let canceller = {
        let cancel = cancel.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(200));
            cancel.cancel();
        })
    };
    let result = solver.solve_with_cancel(&facelets, &cancel);
    canceller.join().unwrap();
    assert_eq!(result, Err(SolveError::Cancelled));
}

#[test_log::test]
fn test_free_function_uses_shared_tables() {
    // Installed before first use, so the user's cache directory is never read
    assert!(Tables::init_shared(Arc::clone(&TABLES)).is_ok());
    assert!(Tables::init_shared(Arc::clone(&TABLES)).is_err());
    assert!(Arc::ptr_eq(&Tables::shared(), &*TABLES));

    let (state, facelets) = scrambled("D L' B2 U");
    let moves = twophase::solve(&facelets).unwrap();
    assert!(state.apply_sequence(&moves).is_solved());
}
