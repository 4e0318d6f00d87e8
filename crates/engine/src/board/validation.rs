use super::Board;
use crate::types::*;

impl Board {
    /// Whether any piece of `by_color` attacks `square`. Full-board scan
    /// against each piece's attack pattern.
    pub fn is_under_threat(&self, square: Square, by_color: Color) -> bool {
        for index in 0..64 {
            let from = Square(index);
            if let Some(piece) = self.get_piece(from) {
                if piece.color == by_color && self.get_attack_squares(from).contains(&square) {
                    return true;
                }
            }
        }
        false
    }

    pub fn find_king(&self, color: Color) -> Option<Square> {
        for index in 0..64 {
            let square = Square(index);
            if let Some(piece) = self.get_piece(square) {
                if piece.color == color && piece.kind == PieceKind::King {
                    return Some(square);
                }
            }
        }
        None
    }

    /// A color with no king on the board counts as in check: a captured
    /// king is this engine's terminal signal for hand-built positions.
    pub fn is_in_check(&self, color: Color) -> bool {
        match self.find_king(color) {
            Some(king_square) => self.is_under_threat(king_square, color.opposite()),
            None => true,
        }
    }

    /// Probe a candidate move on a copy of the position and report whether
    /// it would leave the mover's own king attacked. The real board is
    /// never touched, so there is no revert step to get wrong.
    pub(crate) fn move_exposes_king(&self, from: Square, to: Square) -> bool {
        let piece = match self.get_piece(from) {
            Some(piece) => piece,
            None => return false,
        };

        let mut probe = self.position_copy();
        probe.set_piece(to, Some(piece));
        probe.set_piece(from, None);
        probe.is_in_check(piece.color)
    }

    pub fn has_any_legal_move(&self, color: Color) -> bool {
        for index in 0..64 {
            let square = Square(index);
            if let Some(piece) = self.get_piece(square) {
                if piece.color == color && !self.get_legal_moves(square).is_empty() {
                    return true;
                }
            }
        }
        false
    }

    /// Checkmate requires being in check; a move drought without check is
    /// stalemate, reported separately.
    pub fn is_checkmate(&self, color: Color) -> bool {
        self.is_in_check(color) && !self.has_any_legal_move(color)
    }

    pub fn is_stalemate(&self, color: Color) -> bool {
        !self.is_in_check(color) && !self.has_any_legal_move(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rook_on_shared_rank_gives_check_until_blocked() {
        // Black rook a1, white king e1, nothing between them
        let mut board = Board::from_fen("4k3/8/8/8/8/8/8/r3K3 w").unwrap();
        assert!(board.is_in_check(Color::White));

        // Interpose a white bishop on c1
        board.set_piece(
            Square::new(2, 0),
            Some(Piece::new(Color::White, PieceKind::Bishop)),
        );
        assert!(!board.is_in_check(Color::White));
    }

    #[test]
    fn missing_king_reports_check() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/8 w").unwrap();
        assert!(board.is_in_check(Color::White));
        assert!(!board.is_in_check(Color::Black));
    }

    #[test]
    fn king_may_not_step_onto_attacked_square() {
        // Black rook owns the e-file above the king
        let board = Board::from_fen("4k3/8/8/8/4r3/8/8/3K4 w").unwrap();

        let moves = board.get_legal_moves(Square::new(3, 0));
        assert!(!moves.contains(&Square::new(4, 0)));
        assert!(!moves.contains(&Square::new(4, 1)));
        assert!(moves.contains(&Square::new(2, 0)));
    }

    #[test]
    fn king_cannot_approach_pawn_attack_even_on_empty_diagonal() {
        // The pawn's attack squares are its diagonals regardless of
        // occupancy, so the king may not step onto d4 or f4. It can stand
        // in front of the pawn: e4 is an advance square, not an attack.
        let board = Board::from_fen("4k3/8/8/4p3/8/4K3/8/8 w").unwrap();

        let moves = board.get_legal_moves(Square::new(4, 2));
        assert!(!moves.contains(&Square::new(3, 3)));
        assert!(!moves.contains(&Square::new(5, 3)));
        assert!(moves.contains(&Square::new(4, 3)));
    }

    #[test]
    fn pinned_piece_may_not_expose_its_king() {
        // White knight d2 shields the d1 king from the d8 rook
        let board = Board::from_fen("3rk3/8/8/8/8/8/3N4/3K4 w").unwrap();

        assert!(board.get_legal_moves(Square::new(3, 1)).is_empty());
        // The knight still has pseudo-moves; only the filter removes them
        assert!(!board.get_pseudo_legal_moves(Square::new(3, 1)).is_empty());
    }

    #[test]
    fn only_check_resolving_moves_survive_the_filter() {
        // Black rook e8 checks the e1 king; the a4 rook's one legal move
        // is the e4 interposition.
        let board = Board::from_fen("4r3/8/8/8/R7/8/8/4K3 w").unwrap();
        assert!(board.is_in_check(Color::White));

        assert_eq!(
            board.get_legal_moves(Square::new(0, 3)),
            vec![Square::new(4, 3)]
        );
    }

    #[test]
    fn checkmate_and_stalemate_are_distinguished() {
        // Back-rank mate: black king h8 boxed in by its own pawns? Use the
        // classic two-rook ladder instead: white rooks on ranks 7 and 8.
        let mate = Board::from_fen("R3k3/1R6/8/8/8/8/8/4K3 b").unwrap();
        assert!(mate.is_in_check(Color::Black));
        assert!(!mate.has_any_legal_move(Color::Black));
        assert!(mate.is_checkmate(Color::Black));
        assert!(!mate.is_stalemate(Color::Black));

        // Queen-vs-king stalemate: black king a8, white queen b6
        let stale = Board::from_fen("k7/8/1Q6/8/8/8/8/4K3 b").unwrap();
        assert!(!stale.is_in_check(Color::Black));
        assert!(!stale.has_any_legal_move(Color::Black));
        assert!(stale.is_stalemate(Color::Black));
        assert!(!stale.is_checkmate(Color::Black));
    }
}
