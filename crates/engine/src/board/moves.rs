use super::Board;
use crate::types::*;

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

impl Board {
    /// Destinations reachable under the piece's movement rule alone,
    /// ignoring whether the move leaves the mover's own king in check.
    pub fn get_pseudo_legal_moves(&self, square: Square) -> Vec<Square> {
        let piece = match self.get_piece(square) {
            Some(piece) => piece,
            None => return Vec::new(),
        };

        match piece.kind {
            PieceKind::Pawn => self.get_pawn_moves(square, piece),
            PieceKind::Knight => self.get_step_moves(square, piece.color, &KNIGHT_OFFSETS),
            PieceKind::Bishop => self.get_sliding_moves(square, piece.color, &BISHOP_DIRECTIONS),
            PieceKind::Rook => self.get_sliding_moves(square, piece.color, &ROOK_DIRECTIONS),
            PieceKind::Queen => self.get_queen_moves(square, piece.color),
            PieceKind::King => self.get_step_moves(square, piece.color, &KING_OFFSETS),
        }
    }

    /// Squares the piece attacks, as seen by check detection. Identical to
    /// the pseudo-moves for every kind except pawns: a pawn attacks both
    /// forward diagonals whether or not they are occupied, and never
    /// attacks the squares it merely advances to.
    pub fn get_attack_squares(&self, square: Square) -> Vec<Square> {
        let piece = match self.get_piece(square) {
            Some(piece) => piece,
            None => return Vec::new(),
        };

        match piece.kind {
            PieceKind::Pawn => self.get_pawn_attacks(square, piece.color),
            _ => self.get_pseudo_legal_moves(square),
        }
    }

    /// Pseudo-moves that do not leave the mover's own king in check.
    pub fn get_legal_moves(&self, square: Square) -> Vec<Square> {
        self.get_pseudo_legal_moves(square)
            .into_iter()
            .filter(|&to| !self.move_exposes_king(square, to))
            .collect()
    }

    fn get_pawn_moves(&self, square: Square, piece: Piece) -> Vec<Square> {
        let mut moves = Vec::new();
        let direction = piece.color.pawn_direction();

        // Forward moves, single then double; both require empty squares
        if let Some(forward) = square.offset(0, direction) {
            if self.get_piece(forward).is_none() {
                moves.push(forward);

                if !piece.has_moved {
                    if let Some(double_forward) = forward.offset(0, direction) {
                        if self.get_piece(double_forward).is_none() {
                            moves.push(double_forward);
                        }
                    }
                }
            }
        }

        // Diagonal captures, only onto an opposing piece
        for df in [-1, 1] {
            if let Some(capture_square) = square.offset(df, direction) {
                if let Some(target) = self.get_piece(capture_square) {
                    if target.color != piece.color {
                        moves.push(capture_square);
                    }
                }
            }
        }

        moves
    }

    /// The pawn's attack pattern: both forward diagonals, regardless of
    /// what stands on them.
    fn get_pawn_attacks(&self, square: Square, color: Color) -> Vec<Square> {
        let direction = color.pawn_direction();
        [-1, 1]
            .iter()
            .filter_map(|&df| square.offset(df, direction))
            .collect()
    }

    /// Knight and king moves: fixed offsets onto empty or capturable squares.
    fn get_step_moves(&self, square: Square, color: Color, offsets: &[(i8, i8)]) -> Vec<Square> {
        let mut moves = Vec::new();

        for &(df, dr) in offsets {
            if let Some(target_square) = square.offset(df, dr) {
                match self.get_piece(target_square) {
                    None => moves.push(target_square),
                    Some(target) if target.color != color => moves.push(target_square),
                    Some(_) => {}
                }
            }
        }

        moves
    }

    /// Ray-cast one square at a time; a ray stops at the first occupied
    /// square, including it only when it holds an opposing piece.
    fn get_sliding_moves(&self, square: Square, color: Color, directions: &[(i8, i8)]) -> Vec<Square> {
        let mut moves = Vec::new();

        for &(df, dr) in directions {
            let mut current = square;
            while let Some(target_square) = current.offset(df, dr) {
                match self.get_piece(target_square) {
                    None => moves.push(target_square),
                    Some(target) => {
                        if target.color != color {
                            moves.push(target_square);
                        }
                        break;
                    }
                }
                current = target_square;
            }
        }

        moves
    }

    fn get_queen_moves(&self, square: Square, color: Color) -> Vec<Square> {
        let mut moves = self.get_sliding_moves(square, color, &ROOK_DIRECTIONS);
        moves.extend(self.get_sliding_moves(square, color, &BISHOP_DIRECTIONS));
        moves
    }
}
