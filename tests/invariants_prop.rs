//! Property tests for the collision, lock and line-clear rules.

use blockdrop::game::{Board, Cell, Color, Game, Geometry, Piece, ShapeType};
use proptest::prelude::*;

const W: usize = 10;
const H: usize = 20;
const GREY: Color = Color::rgb(90, 90, 90);

fn board_from(mask: &[bool]) -> Board {
    let mut board = Board::new(W, H);
    for (i, &filled) in mask.iter().enumerate() {
        if filled {
            board.set(i % W, i / W, Cell::Occupied(GREY));
        }
    }
    board
}

fn piece_strategy() -> impl Strategy<Value = Piece> {
    (0..ShapeType::ALL.len(), 0usize..4, -4i32..14, -5i32..24).prop_map(|(s, r, x, y)| {
        let mut piece = Piece::new(ShapeType::ALL[s], x, y);
        piece.rotation = r;
        piece
    })
}

// Lower rows dense, so full rows show up regularly.
fn mask_strategy() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(prop::bool::weighted(0.85), W * H).prop_map(|mut mask| {
        for cell in mask.iter_mut().take(W * H / 2) {
            *cell = false;
        }
        mask
    })
}

fn game_with(board: Board, piece: Piece) -> Game {
    let mut game = Game::with_seed(Geometry::new(W, H), 9);
    game.board = board;
    game.current = piece;
    game
}

proptest! {
    #[test]
    fn is_valid_matches_cell_rules(mask in mask_strategy(), piece in piece_strategy()) {
        let board = board_from(&mask);
        let expected = piece.cells().all(|(x, y)| {
            x >= 0
                && x < W as i32
                && y < H as i32
                && (y < 0 || !mask[y as usize * W + x as usize])
        });
        prop_assert_eq!(board.is_valid(&piece), expected);
    }

    #[test]
    fn lock_writes_only_visible_piece_cells(piece in piece_strategy()) {
        let mut board = Board::new(W, H);
        prop_assume!(board.is_valid(&piece));
        let cleared = board.lock(&piece);
        prop_assert_eq!(cleared, 0);

        let mut expected: Vec<(usize, usize)> = piece
            .cells()
            .filter(|&(_, y)| y >= 0)
            .map(|(x, y)| (x as usize, y as usize))
            .collect();
        expected.sort();
        let mut written = Vec::new();
        for y in 0..H {
            for x in 0..W {
                match board.get(x, y) {
                    Cell::Occupied(c) => {
                        prop_assert_eq!(c, piece.color);
                        written.push((x, y));
                    }
                    Cell::Empty => {}
                }
            }
        }
        written.sort();
        prop_assert_eq!(written, expected);
    }

    #[test]
    fn clear_lines_keeps_partial_rows_in_order(mask in mask_strategy()) {
        let mut board = board_from(&mask);
        let before = board.clone();
        let partial: Vec<Vec<Cell>> = (0..H)
            .filter(|&y| !before.is_row_full(y))
            .map(|y| before.row(y).to_vec())
            .collect();
        let full = H - partial.len();

        let mut game = game_with(board.clone(), Piece::new(ShapeType::O, 0, 0));
        let cleared = board.clear_lines();

        prop_assert_eq!(cleared, full);
        prop_assert_eq!(board.cells.len(), W * H);
        for y in 0..full {
            prop_assert!(board.row(y).iter().all(|c| c.is_empty()));
        }
        for (i, row) in partial.iter().enumerate() {
            prop_assert_eq!(board.row(full + i), row.as_slice());
        }

        prop_assert_eq!(game.clear_lines(), full);
        prop_assert_eq!(game.score, 100 * full as u64);
    }

    #[test]
    fn rejected_move_and_rotate_change_nothing(
        mask in mask_strategy(),
        piece in piece_strategy(),
        dx in prop_oneof![Just(-1i32), Just(1i32)],
    ) {
        let mut game = game_with(board_from(&mask), piece.clone());
        let moved = piece.shifted(dx, 0);
        let fits = moved.x >= 0
            && moved.x + moved.width() as i32 <= W as i32
            && game.board.is_valid(&moved);
        prop_assert_eq!(game.move_horizontal(dx), fits);
        if !fits {
            prop_assert_eq!(&game.current, &piece);
        }

        let mut game = game_with(board_from(&mask), piece.clone());
        let turned = piece.rotated();
        let fits = game.board.is_valid(&turned);
        prop_assert_eq!(game.rotate(), fits);
        if !fits {
            prop_assert_eq!(&game.current, &piece);
        }
    }

    #[test]
    fn hard_drop_lands_on_the_lowest_reachable_row(mask in mask_strategy(), piece in piece_strategy()) {
        let board = board_from(&mask);
        prop_assume!(board.is_valid(&piece));

        let mut landed = piece.clone();
        while board.is_valid(&landed.shifted(0, 1)) {
            landed = landed.shifted(0, 1);
        }
        prop_assert!(!board.is_valid(&landed.shifted(0, 1)));
        let mut expected = board.clone();
        expected.lock(&landed);

        let mut game = game_with(board, piece);
        game.hard_drop();
        prop_assert_eq!(game.board, expected);
    }
}
