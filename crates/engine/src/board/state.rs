use super::Board;
use crate::types::*;

impl Board {
    /// Execute a move for the side to move and update game state. The
    /// board is left untouched on every error path.
    pub fn try_make_move(&mut self, mv: Move) -> Result<GameMove, MoveError> {
        if self.game_status.is_over() {
            return Err(MoveError::GameOver);
        }

        let piece = self.get_piece(mv.from).ok_or(MoveError::EmptySource)?;
        if piece.color != self.current_turn {
            return Err(MoveError::WrongColor);
        }
        if !self.get_legal_moves(mv.from).contains(&mv.to) {
            return Err(MoveError::IllegalDestination);
        }

        let captured = self.get_piece(mv.to);

        let mut moved = piece;
        moved.has_moved = true;

        // Auto-queen on reaching the far rank; underpromotion is not offered
        let promoted =
            moved.kind == PieceKind::Pawn && mv.to.rank() == moved.color.promotion_rank();
        if promoted {
            moved.kind = PieceKind::Queen;
        }

        self.set_piece(mv.to, Some(moved));
        self.set_piece(mv.from, None);

        let record = GameMove {
            mv,
            piece,
            captured,
            promoted,
            previous_status: self.game_status,
        };
        self.move_history.push(record);

        self.current_turn = self.current_turn.opposite();
        self.update_game_status();

        Ok(record)
    }

    /// Undo the last move made, restoring position, turn, the mover's
    /// old has_moved flag and the prior status exactly.
    pub fn undo_move(&mut self) -> Result<GameMove, MoveError> {
        let last = self.move_history.pop().ok_or(MoveError::NothingToUndo)?;

        self.set_piece(last.mv.from, Some(last.piece));
        self.set_piece(last.mv.to, last.captured);
        self.current_turn = self.current_turn.opposite();
        self.game_status = last.previous_status;

        Ok(last)
    }

    /// Reclassify the game for the side to move.
    pub fn update_game_status(&mut self) {
        let to_move = self.current_turn;
        let in_check = self.is_in_check(to_move);
        let has_moves = self.has_any_legal_move(to_move);

        self.game_status = match (in_check, has_moves) {
            (true, false) => GameStatus::Checkmate(to_move),
            (false, false) => GameStatus::Stalemate,
            (true, true) => GameStatus::Check(to_move),
            (false, true) => GameStatus::InProgress,
        };
    }

    pub fn get_last_move(&self) -> Option<&GameMove> {
        self.move_history.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(from: (u8, u8), to: (u8, u8)) -> Move {
        Move::new(Square::new(from.0, from.1), Square::new(to.0, to.1))
    }

    #[test]
    fn accepted_move_relocates_piece_and_flips_turn() {
        let mut board = Board::new();

        let record = board.try_make_move(mv((4, 1), (4, 3))).unwrap();
        assert_eq!(record.captured, None);

        assert!(board.get_piece(Square::new(4, 1)).is_none());
        let pawn = board.get_piece(Square::new(4, 3)).unwrap();
        assert_eq!(pawn.kind, PieceKind::Pawn);
        assert!(pawn.has_moved);

        assert_eq!(board.current_turn, Color::Black);
        assert_eq!(board.game_status, GameStatus::InProgress);
    }

    #[test]
    fn rejected_move_leaves_board_unmodified() {
        let mut board = Board::new();
        let before = board.squares;

        // e2-e5 is not a pawn move
        assert_eq!(
            board.try_make_move(mv((4, 1), (4, 4))),
            Err(MoveError::IllegalDestination)
        );
        // Black may not move first
        assert_eq!(
            board.try_make_move(mv((4, 6), (4, 4))),
            Err(MoveError::WrongColor)
        );
        // Nothing lives on e4
        assert_eq!(
            board.try_make_move(mv((4, 3), (4, 4))),
            Err(MoveError::EmptySource)
        );

        assert_eq!(board.squares, before);
        assert_eq!(board.current_turn, Color::White);
        assert!(board.move_history.is_empty());
    }

    #[test]
    fn capture_discards_the_victim() {
        let mut board = Board::from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w").unwrap();

        let record = board.try_make_move(mv((4, 3), (3, 4))).unwrap();
        let victim = record.captured.unwrap();
        assert_eq!(victim.kind, PieceKind::Pawn);
        assert_eq!(victim.color, Color::Black);

        let pawn = board.get_piece(Square::new(3, 4)).unwrap();
        assert_eq!(pawn.color, Color::White);
    }

    #[test]
    fn pawn_promotes_to_queen_on_far_rank() {
        let mut board = Board::from_fen("4k3/P7/8/8/8/8/8/4K3 w").unwrap();

        let record = board.try_make_move(mv((0, 6), (0, 7))).unwrap();
        assert!(record.promoted);

        let queen = board.get_piece(Square::new(0, 7)).unwrap();
        assert_eq!(queen.kind, PieceKind::Queen);
        assert_eq!(queen.color, Color::White);
        assert!(queen.has_moved);
    }

    #[test]
    fn black_pawn_promotes_on_rank_zero() {
        let mut board = Board::from_fen("4k3/8/8/8/8/8/6p1/4K3 b").unwrap();

        board.try_make_move(mv((6, 1), (6, 0))).unwrap();
        let queen = board.get_piece(Square::new(6, 0)).unwrap();
        assert_eq!(queen.kind, PieceKind::Queen);
        assert_eq!(queen.color, Color::Black);
    }

    #[test]
    fn undo_restores_position_exactly() {
        let mut board = Board::from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w").unwrap();
        let squares_before = board.squares;
        let status_before = board.game_status;

        board.try_make_move(mv((4, 3), (3, 4))).unwrap();
        let undone = board.undo_move().unwrap();

        assert_eq!(board.squares, squares_before);
        assert_eq!(board.current_turn, Color::White);
        assert_eq!(board.game_status, status_before);
        assert_eq!(undone.mv, mv((4, 3), (3, 4)));
        assert!(board.move_history.is_empty());
    }

    #[test]
    fn undo_restores_promoted_pawn_and_has_moved_flag() {
        let mut board = Board::from_fen("3qk3/P7/8/8/8/8/8/4K3 w").unwrap();

        board.try_make_move(mv((0, 6), (0, 7))).unwrap();
        board.undo_move().unwrap();

        let pawn = board.get_piece(Square::new(0, 6)).unwrap();
        assert_eq!(pawn.kind, PieceKind::Pawn);
        assert!(pawn.has_moved); // off its start rank in the FEN
        assert!(board.get_piece(Square::new(0, 7)).is_none());
    }

    #[test]
    fn undo_with_no_history_is_an_error() {
        let mut board = Board::new();
        assert_eq!(board.undo_move(), Err(MoveError::NothingToUndo));
    }

    #[test]
    fn moving_into_check_is_rejected() {
        // d2 knight is pinned to the d1 king by the d8 rook
        let mut board = Board::from_fen("3rk3/8/8/8/8/8/3N4/3K4 w").unwrap();

        assert_eq!(
            board.try_make_move(mv((3, 1), (5, 2))),
            Err(MoveError::IllegalDestination)
        );
    }

    #[test]
    fn checking_move_sets_check_status() {
        let mut board = Board::from_fen("4k3/8/8/8/8/8/R7/4K3 w").unwrap();

        board.try_make_move(mv((0, 1), (0, 7))).unwrap();
        assert_eq!(board.game_status, GameStatus::Check(Color::Black));
    }

    #[test]
    fn ladder_mate_ends_the_game() {
        // Rook a7 seals rank 7; lifting the b6 rook to b8 mates
        let mut board = Board::from_fen("4k3/R7/1R6/8/8/8/8/4K3 w").unwrap();

        board.try_make_move(mv((1, 5), (1, 7))).unwrap();
        assert_eq!(board.game_status, GameStatus::Checkmate(Color::Black));
        assert!(board.is_checkmate(Color::Black));

        // No further moves are accepted
        assert_eq!(
            board.try_make_move(mv((4, 7), (3, 7))),
            Err(MoveError::GameOver)
        );
    }

    #[test]
    fn stalemating_move_ends_the_game_as_draw() {
        // Queen to b6 leaves the a8 king unattacked with nowhere to go
        let mut board = Board::from_fen("k7/8/2Q5/8/8/8/8/4K3 w").unwrap();

        board.try_make_move(mv((2, 5), (1, 5))).unwrap();
        assert_eq!(board.game_status, GameStatus::Stalemate);
    }

    #[test]
    fn opening_advance_leaves_both_kings_safe() {
        let mut board = Board::new();
        board.try_make_move(mv((4, 1), (4, 3))).unwrap();

        assert!(!board.is_in_check(Color::White));
        assert!(!board.is_in_check(Color::Black));
        assert!(!board.is_checkmate(Color::White));
        assert!(!board.is_checkmate(Color::Black));
        assert_eq!(board.game_status, GameStatus::InProgress);
    }
}
